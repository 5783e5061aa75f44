//! List wrapper: a JSON array read element-wise into an ordered collection.

use serde_json::Value;

use crate::expectation::{
    absent, shape, shape_mismatch, wiring_defect, Admitted, Expectation, Outcome, Traversal,
};
use crate::path;
use crate::violation::{codes, Violations};

/// A named wrapper around an ordered collection of one element expectation.
///
/// Elements are always read as required: an array has no absent slots, so a
/// `null` element is a missing-value violation at its index.
pub trait ListExpectation: Sized {
    type Element: Expectation;

    fn admit(elements: Admitted<Vec<Self::Element>>) -> Self;

    fn elements(&self) -> &[Self::Element];

    /// Whole-list rule, run once every element has been read successfully.
    fn validate(self, _path: &str) -> Result<Self, Violations> {
        Ok(self)
    }
}

impl<T: ListExpectation> Traversal<T> for shape::List {
    fn from_json(value: &Value, path: &str, required: bool) -> Outcome<T> {
        let items = match value {
            Value::Null => return absent(path, required, codes::list::MISSING),
            Value::Array(items) => items,
            Value::Object(_) => {
                return Err(shape_mismatch(
                    codes::list::GOT_OBJECT,
                    path,
                    "Expected an array, but got an object.",
                ))
            }
            _ => {
                return Err(shape_mismatch(
                    codes::list::GOT_PRIMITIVE,
                    path,
                    "Expected an array, but got a primitive.",
                ))
            }
        };

        let mut elements = Vec::with_capacity(items.len());
        let mut violations = Violations::new();

        // Every index is read; one bad element never hides the rest.
        for (i, item) in items.iter().enumerate() {
            let item_path = path::index(path, i);
            match T::Element::from_json(item, &item_path, true) {
                Ok(Some(element)) => elements.push(element),
                Ok(None) => wiring_defect(&item_path, "a required list element read as absent"),
                Err(found) => violations.merge(found),
            }
        }

        if !violations.is_empty() {
            tracing::debug!(path = %path, count = violations.len(), "list rejected");
            return Err(violations);
        }

        T::admit(Admitted::new(elements)).validate(path).map(Some)
    }

    fn to_json(list: &T) -> Value {
        Value::Array(list.elements().iter().map(|element| element.to_json()).collect())
    }
}
