//! The contract every wrapper shape implements.
//!
//! A concrete model type implements one of [`ScalarExpectation`],
//! [`ListExpectation`] or [`ObjectExpectation`] and then names that shape in
//! its [`Expectation`] impl:
//!
//! ```ignore
//! impl Expectation for Message {
//!     type Shape = shape::Scalar;
//! }
//! ```
//!
//! The shape marker routes `from_json` / `to_json` to the right traversal, so
//! a declared field whose type is not wired up is a compile error rather than
//! a runtime failure.
//!
//! [`ScalarExpectation`]: crate::ScalarExpectation
//! [`ListExpectation`]: crate::ListExpectation
//! [`ObjectExpectation`]: crate::ObjectExpectation

use serde_json::Value;

use crate::violation::{Violation, ViolationKind, Violations};

/// Result of reading one value: the violations found, or the value.
///
/// `Ok(None)` means the value was absent and not required.
pub type Outcome<T> = Result<Option<T>, Violations>;

/// Stand-in for an absent object member.
pub(crate) static NULL: Value = Value::Null;

/// A value that has passed structural validation.
///
/// Only this crate can create one, which keeps wrapper construction inside
/// the validation pipeline: `admit` is the only way a wrapper receives its
/// value.
#[derive(Debug)]
pub struct Admitted<T>(T);

impl<T> Admitted<T> {
    pub(crate) fn new(value: T) -> Self {
        Self(value)
    }

    pub fn get(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

/// A typed wrapper that parses and validates a JSON value and can serialize
/// itself back.
pub trait Expectation: Sized {
    /// Which traversal reads and writes this type.
    type Shape: Traversal<Self>;

    /// Read `value` found at `path`.
    ///
    /// `null` and absent values yield `Ok(None)` unless `required`, in which
    /// case they are a missing-value violation.
    fn from_json(value: &Value, path: &str, required: bool) -> Outcome<Self> {
        <Self::Shape as Traversal<Self>>::from_json(value, path, required)
    }

    fn to_json(&self) -> Value {
        <Self::Shape as Traversal<Self>>::to_json(self)
    }
}

/// The read/write algorithm for one shape of wrapper.
pub trait Traversal<T> {
    fn from_json(value: &Value, path: &str, required: bool) -> Outcome<T>;
    fn to_json(item: &T) -> Value;
}

/// Shape markers used as [`Expectation::Shape`].
pub mod shape {
    /// String, integer, double, boolean or enum leaf.
    #[derive(Debug)]
    pub enum Scalar {}

    /// Ordered collection of one element expectation.
    #[derive(Debug)]
    pub enum List {}

    /// Record of named child expectations.
    #[derive(Debug)]
    pub enum Object {}
}

/// Shared handling of `null`/absent input.
pub(crate) fn absent<T>(path: &str, required: bool, missing_id: &'static str) -> Outcome<T> {
    if required {
        Err(Violation::with_kind(
            ViolationKind::MissingRequired,
            missing_id,
            path,
            "Expected a value, but got nothing.",
        )
        .into())
    } else {
        Ok(None)
    }
}

pub(crate) fn shape_mismatch(id: &'static str, path: &str, message: &str) -> Violations {
    Violation::with_kind(ViolationKind::ShapeMismatch, id, path, message).into()
}

/// Name of a value's JSON kind, for messages.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Abort on a model declaration that cannot be satisfied by any input.
///
/// These are programmer errors (for example a `finish` that needs a field
/// the descriptors mark optional), never data errors, so they do not travel
/// through the violation channel.
#[track_caller]
pub(crate) fn wiring_defect(path: &str, detail: &str) -> ! {
    panic!("expectation wiring defect @({path}): {detail}")
}
