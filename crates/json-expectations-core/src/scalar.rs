//! Scalar wrappers: string, integer, double, boolean and enum leaves.
//!
//! Every scalar read follows the same steps:
//!
//! 1. `null`/absent → missing-value violation if required, else absent.
//! 2. Object or array → shape mismatch (distinct id for each).
//! 3. Anything else is stringified and parsed as the declared [`Primitive`].
//! 4. The wrapper's [`ScalarExpectation::validate`] hook runs last.
//!
//! ## Number convention
//!
//! Integers and doubles use one fixed, locale-free convention: optional
//! surrounding ASCII whitespace, an optional sign, `.` as the only decimal
//! separator and (doubles only) an optional exponent. Group separators are
//! never accepted, so `"7,5"` and `"1.000.000,5"` are parse failures instead
//! of silently becoming `75.0` or a different magnitude. Non-finite doubles
//! are rejected because JSON cannot carry them back out.

use std::borrow::Cow;
use std::str::FromStr;

use serde_json::Value;
use strum::VariantNames;

use crate::expectation::{absent, kind_name, shape, shape_mismatch, Admitted, Outcome, Traversal};
use crate::violation::{codes, Violation, ViolationKind, Violations};

/// Violation ids a primitive kind raises before parsing starts.
#[derive(Debug, Clone, Copy)]
pub struct ScalarCodes {
    pub missing: &'static str,
    pub got_object: &'static str,
    pub got_array: &'static str,
}

/// A primitive kind a scalar wrapper can hold.
///
/// Implemented for `String`, `i64`, `f64`, `bool` and every [`Symbols`] enum.
pub trait Primitive: Sized {
    const CODES: ScalarCodes;

    /// Parse a non-null, non-container JSON value.
    fn parse(value: &Value, path: &str) -> Result<Self, Violation>;

    fn to_json(&self) -> Value;
}

/// A named wrapper around exactly one primitive value.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// pub struct ExcitedMessage(String);
///
/// impl ScalarExpectation for ExcitedMessage {
///     type Primitive = String;
///
///     fn admit(value: Admitted<String>) -> Self {
///         Self(value.into_inner())
///     }
///
///     fn primitive(&self) -> &String {
///         &self.0
///     }
///
///     fn validate(self, path: &str) -> Result<Self, Violations> {
///         if self.0.contains('!') {
///             Ok(self)
///         } else {
///             Err(Violation::at("greeting.not-excited", path, "Only excited greetings are allowed!!!").into())
///         }
///     }
/// }
/// ```
pub trait ScalarExpectation: Sized {
    type Primitive: Primitive;

    fn admit(value: Admitted<Self::Primitive>) -> Self;

    fn primitive(&self) -> &Self::Primitive;

    /// Domain rule layered over the parse. Defaults to accepting everything.
    fn validate(self, _path: &str) -> Result<Self, Violations> {
        Ok(self)
    }

    /// Compare the held primitive with a plain value, so callers can write
    /// `greetings.excited.matches("Hello World!")`.
    fn matches<Q: ?Sized>(&self, other: &Q) -> bool
    where
        Self::Primitive: PartialEq<Q>,
    {
        self.primitive() == other
    }
}

/// Marker for enums usable as a scalar primitive.
///
/// The symbol set comes from strum's derives; matching is exact and
/// case-sensitive.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, VariantNames)]
/// pub enum PossibleValues { Abc, Def, Hij }
///
/// impl Symbols for PossibleValues {}
/// ```
pub trait Symbols: Copy + FromStr + VariantNames + Into<&'static str> + 'static {}

impl<T: ScalarExpectation> Traversal<T> for shape::Scalar {
    fn from_json(value: &Value, path: &str, required: bool) -> Outcome<T> {
        let codes = <T::Primitive as Primitive>::CODES;
        match value {
            Value::Null => absent(path, required, codes.missing),
            Value::Object(_) => Err(shape_mismatch(
                codes.got_object,
                path,
                "Expected a primitive, but got an object.",
            )),
            Value::Array(_) => Err(shape_mismatch(
                codes.got_array,
                path,
                "Expected a primitive, but got an array.",
            )),
            scalar => {
                let primitive = T::Primitive::parse(scalar, path)?;
                T::admit(Admitted::new(primitive)).validate(path).map(Some)
            }
        }
    }

    fn to_json(item: &T) -> Value {
        item.primitive().to_json()
    }
}

/// Text of a scalar as the parse step sees it: strings by content, numbers
/// and booleans by their JSON spelling.
fn scalar_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

fn parse_failure(id: &'static str, path: &str, expected: &str, text: &str) -> Violation {
    Violation::with_kind(
        ViolationKind::ScalarParse,
        id,
        path,
        format!("Expected {expected}, but got the value \"{text}\""),
    )
}

impl Primitive for String {
    const CODES: ScalarCodes = ScalarCodes {
        missing: codes::string::MISSING,
        got_object: codes::string::GOT_OBJECT,
        got_array: codes::string::GOT_ARRAY,
    };

    fn parse(value: &Value, _path: &str) -> Result<Self, Violation> {
        Ok(scalar_text(value).into_owned())
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Primitive for i64 {
    const CODES: ScalarCodes = ScalarCodes {
        missing: codes::int::MISSING,
        got_object: codes::int::GOT_OBJECT,
        got_array: codes::int::GOT_ARRAY,
    };

    fn parse(value: &Value, path: &str) -> Result<Self, Violation> {
        let text = scalar_text(value);
        text.trim()
            .parse::<i64>()
            .map_err(|_| parse_failure(codes::int::NOT_AN_INTEGER, path, "an integer", &text))
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl Primitive for f64 {
    const CODES: ScalarCodes = ScalarCodes {
        missing: codes::double::MISSING,
        got_object: codes::double::GOT_OBJECT,
        got_array: codes::double::GOT_ARRAY,
    };

    fn parse(value: &Value, path: &str) -> Result<Self, Violation> {
        let text = scalar_text(value);
        match text.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Ok(parsed),
            _ => Err(parse_failure(
                codes::double::NOT_A_NUMBER,
                path,
                "a double",
                &text,
            )),
        }
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl Primitive for bool {
    const CODES: ScalarCodes = ScalarCodes {
        missing: codes::boolean::MISSING,
        got_object: codes::boolean::GOT_OBJECT,
        got_array: codes::boolean::GOT_ARRAY,
    };

    fn parse(value: &Value, path: &str) -> Result<Self, Violation> {
        let text = scalar_text(value);
        match text.to_ascii_lowercase().as_str() {
            "false" | "0" => Ok(false),
            "true" | "1" => Ok(true),
            _ => Err(parse_failure(
                codes::boolean::NOT_A_BOOLEAN,
                path,
                "a boolean",
                &text,
            )),
        }
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl<E: Symbols> Primitive for E {
    const CODES: ScalarCodes = ScalarCodes {
        missing: codes::symbol::MISSING,
        got_object: codes::symbol::GOT_OBJECT,
        got_array: codes::symbol::GOT_ARRAY,
    };

    fn parse(value: &Value, path: &str) -> Result<Self, Violation> {
        let text = match value {
            Value::String(s) => s,
            other => {
                return Err(Violation::with_kind(
                    ViolationKind::ShapeMismatch,
                    codes::symbol::NOT_A_STRING,
                    path,
                    format!(
                        "Expected a string, but got another primitive ({}).",
                        kind_name(other)
                    ),
                ))
            }
        };

        E::from_str(text).map_err(|_| {
            let options = E::VARIANTS
                .iter()
                .map(|symbol| format!("\"{symbol}\""))
                .collect::<Vec<_>>()
                .join(", ");
            Violation::with_kind(
                ViolationKind::EnumOutOfRange,
                codes::symbol::UNKNOWN_SYMBOL,
                path,
                format!("The string value (\"{text}\") was not in list of valid options: [{options}]"),
            )
        })
    }

    fn to_json(&self) -> Value {
        let symbol: &'static str = (*self).into();
        Value::String(symbol.to_owned())
    }
}
