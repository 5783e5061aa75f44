//! Object wrapper: a JSON object read through a fixed list of field descriptors.
//!
//! A model declares its members once, in order, as [`Field`] descriptors.
//! Reading walks every descriptor, delegating each member to its child
//! expectation at `path.name`, and never stops at the first bad field: all
//! members are checked and every violation is returned together.
//!
//! A JSON *string* in object position is parsed as an embedded document and
//! read in place, so payloads that carry a nested object as stringified JSON
//! are accepted. A string that is not a JSON object gets its own id, distinct
//! from a plain shape mismatch.

use std::fmt;

use serde_json::{Map, Value};

use crate::expectation::{
    absent, kind_name, shape, shape_mismatch, wiring_defect, Expectation, Outcome, Traversal,
    NULL,
};
use crate::path;
use crate::violation::{codes, Violation, ViolationKind, Violations};

type Decode<M> = Box<
    dyn Fn(&Value, &str, bool, &mut <M as ObjectExpectation>::Draft) -> Result<(), Violations>
        + Send
        + Sync,
>;
type Encode<M> = Box<dyn Fn(&M) -> Option<Value> + Send + Sync>;

/// A record of named child expectations.
///
/// Values are collected into a [`Draft`](ObjectExpectation::Draft) while the
/// descriptors run; once every member has been read without violations,
/// [`finish`](ObjectExpectation::finish) turns the draft into the model.
///
/// Descriptor lists are built once per type and cached for the life of the
/// process, typically in a `OnceLock`:
///
/// ```ignore
/// impl ObjectExpectation for Inner {
///     type Draft = InnerDraft;
///
///     fn fields() -> &'static [Field<Self>] {
///         static FIELDS: OnceLock<Vec<Field<Inner>>> = OnceLock::new();
///         FIELDS.get_or_init(|| {
///             vec![Field::required(
///                 "InnerMessage",
///                 |inner: &Inner| &inner.message,
///                 |draft: &mut InnerDraft, value| draft.message = Some(value),
///             )]
///         })
///     }
///
///     fn finish(draft: InnerDraft) -> Option<Self> {
///         Some(Inner { message: draft.message? })
///     }
/// }
/// ```
pub trait ObjectExpectation: Sized + 'static {
    /// Builder the descriptors write into.
    type Draft: Default + 'static;

    /// The ordered member descriptors.
    fn fields() -> &'static [Field<Self>];

    /// Build the model from a draft whose members all read cleanly.
    ///
    /// Returning `None` here means the model's declaration is inconsistent
    /// (for example a field that `finish` needs is declared optional) and
    /// aborts the read.
    fn finish(draft: Self::Draft) -> Option<Self>;

    /// Rule over the whole record, run after `finish`.
    fn validate(self, _path: &str) -> Result<Self, Violations> {
        Ok(self)
    }
}

/// Static description of one member of an object model.
pub struct Field<M: ObjectExpectation> {
    json_name: &'static str,
    required: bool,
    decode: Decode<M>,
    encode: Encode<M>,
}

impl<M: ObjectExpectation> Field<M> {
    /// A member that must be present and non-null.
    pub fn required<T: Expectation + 'static>(
        json_name: &'static str,
        get: fn(&M) -> &T,
        set: fn(&mut M::Draft, T),
    ) -> Self {
        Self {
            json_name,
            required: true,
            decode: decoder::<M, T>(set),
            encode: Box::new(move |model: &M| Some(get(model).to_json())),
        }
    }

    /// A member that may be absent or `null`; absent members are omitted on
    /// serialization.
    pub fn optional<T: Expectation + 'static>(
        json_name: &'static str,
        get: fn(&M) -> Option<&T>,
        set: fn(&mut M::Draft, T),
    ) -> Self {
        Self {
            json_name,
            required: false,
            decode: decoder::<M, T>(set),
            encode: Box::new(move |model: &M| get(model).map(|child| child.to_json())),
        }
    }

    pub fn json_name(&self) -> &'static str {
        self.json_name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl<M: ObjectExpectation> fmt::Debug for Field<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("json_name", &self.json_name)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

fn decoder<M: ObjectExpectation, T: Expectation + 'static>(set: fn(&mut M::Draft, T)) -> Decode<M> {
    Box::new(
        move |value: &Value, path: &str, required: bool, draft: &mut M::Draft| -> Result<(), Violations> {
            if let Some(child) = T::from_json(value, path, required)? {
                set(draft, child);
            }
            Ok(())
        },
    )
}

impl<T: ObjectExpectation> Traversal<T> for shape::Object {
    fn from_json(value: &Value, path: &str, required: bool) -> Outcome<T> {
        match value {
            Value::Null => absent(path, required, codes::object::MISSING),
            Value::Object(members) => read_members(members, path),
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(members)) => read_members(&members, path),
                _ => Err(Violation::with_kind(
                    ViolationKind::DocumentSyntax,
                    codes::object::UNPARSABLE_STRING,
                    path,
                    "Expected an object, but was given a string which could not be deserialized to an object.",
                )
                .into()),
            },
            other => Err(shape_mismatch(
                codes::object::WRONG_SHAPE,
                path,
                &format!("Expected an object, but got {}.", kind_name(other)),
            )),
        }
    }

    fn to_json(model: &T) -> Value {
        let mut members = Map::new();
        for field in T::fields() {
            if let Some(child) = (field.encode)(model) {
                members.insert(field.json_name.to_owned(), child);
            }
        }
        Value::Object(members)
    }
}

fn read_members<T: ObjectExpectation>(members: &Map<String, Value>, path: &str) -> Outcome<T> {
    let mut draft = T::Draft::default();
    let mut violations = Violations::new();

    for field in T::fields() {
        let field_path = path::member(path, field.json_name);
        let child = members.get(field.json_name).unwrap_or(&NULL);
        tracing::trace!(path = %field_path, required = field.required, "reading field");

        if let Err(found) = (field.decode)(child, &field_path, field.required, &mut draft) {
            violations.merge(found);
        }
    }

    if !violations.is_empty() {
        tracing::debug!(path = %path, count = violations.len(), "object rejected");
        return Err(violations);
    }

    match T::finish(draft) {
        Some(model) => model.validate(path).map(Some),
        None => wiring_defect(path, "finish() could not build the model from a clean draft"),
    }
}
