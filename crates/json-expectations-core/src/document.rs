//! Root document façade: raw text in, typed model or full violation set out.

use std::io::Read;

use serde_json::Value;

use crate::config::OutputOptions;
use crate::error::ExpectationError;
use crate::expectation::{shape, wiring_defect, Expectation};
use crate::object::ObjectExpectation;
use crate::path;
use crate::violation::{codes, Violation, ViolationKind, Violations};

/// Entry and exit points for a root object model.
///
/// Implemented for every [`ObjectExpectation`] whose [`Expectation::Shape`]
/// is [`shape::Object`].
pub trait Document: ObjectExpectation + Expectation<Shape = shape::Object> {
    /// Parse and validate a JSON document.
    ///
    /// Text that is not JSON yields a single `document.syntax` violation and
    /// no partial result; otherwise the root is read as a required object at
    /// path `""`.
    fn from_text(raw: &str) -> Result<Self, Violations> {
        let value: Value = serde_json::from_str(raw).map_err(|err| {
            tracing::debug!(error = %err, "document is not valid JSON");
            syntax_violation()
        })?;
        Self::from_value(&value)
    }

    fn from_slice(raw: &[u8]) -> Result<Self, Violations> {
        let value: Value = serde_json::from_slice(raw).map_err(|err| {
            tracing::debug!(error = %err, "document is not valid JSON");
            syntax_violation()
        })?;
        Self::from_value(&value)
    }

    /// Read a whole document from `reader`, then validate it.
    ///
    /// I/O failures surface as [`ExpectationError::Io`]; everything about
    /// the content, including invalid JSON, is [`ExpectationError::Violated`].
    fn from_reader<R: Read>(mut reader: R) -> Result<Self, ExpectationError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        Ok(Self::from_slice(&raw)?)
    }

    /// Validate an already-parsed tree.
    fn from_value(value: &Value) -> Result<Self, Violations> {
        match Self::from_json(value, path::ROOT, true) {
            Ok(Some(model)) => Ok(model),
            Ok(None) => wiring_defect(path::ROOT, "a required document read as absent"),
            Err(violations) => {
                tracing::debug!(count = violations.len(), "document rejected");
                Err(violations)
            }
        }
    }

    fn to_value(&self) -> Value {
        self.to_json()
    }

    /// Serialize back to JSON text, optionally indented with two spaces.
    fn to_text(&self, indented: bool) -> String {
        let value = self.to_value();
        if indented {
            format!("{value:#}")
        } else {
            value.to_string()
        }
    }

    fn to_text_with(&self, options: &OutputOptions) -> String {
        self.to_text(options.indented())
    }
}

impl<T> Document for T where T: ObjectExpectation + Expectation<Shape = shape::Object> {}

fn syntax_violation() -> Violations {
    Violation::with_kind(
        ViolationKind::DocumentSyntax,
        codes::DOCUMENT_SYNTAX,
        path::ROOT,
        "The given text is not a valid JSON document.",
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;
    use crate::expectation::Admitted;
    use crate::object::Field;
    use crate::scalar::ScalarExpectation;
    use pretty_assertions::assert_eq;
    use std::sync::OnceLock;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Title(String);

    impl ScalarExpectation for Title {
        type Primitive = String;
        fn admit(value: Admitted<String>) -> Self {
            Self(value.into_inner())
        }
        fn primitive(&self) -> &String {
            &self.0
        }
    }

    impl Expectation for Title {
        type Shape = shape::Scalar;
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Note {
        title: Title,
    }

    #[derive(Default)]
    struct NoteDraft {
        title: Option<Title>,
    }

    impl ObjectExpectation for Note {
        type Draft = NoteDraft;

        fn fields() -> &'static [Field<Self>] {
            static FIELDS: OnceLock<Vec<Field<Note>>> = OnceLock::new();
            FIELDS.get_or_init(|| {
                vec![Field::required(
                    "title",
                    |n: &Note| &n.title,
                    |d: &mut NoteDraft, v| d.title = Some(v),
                )]
            })
        }

        fn finish(draft: NoteDraft) -> Option<Self> {
            Some(Note {
                title: draft.title?,
            })
        }
    }

    impl Expectation for Note {
        type Shape = shape::Object;
    }

    #[test]
    fn test_invalid_text_is_one_syntax_violation() {
        let violations = Note::from_text("{\"title\": ").unwrap_err();
        assert_eq!(
            violations.render(),
            "[document.syntax] @() The given text is not a valid JSON document."
        );
        assert_eq!(
            violations.iter().next().unwrap().kind(),
            ViolationKind::DocumentSyntax
        );
    }

    #[test]
    fn test_root_must_be_an_object() {
        let violations = Note::from_text("[1]").unwrap_err();
        assert!(violations.contains_id(codes::object::WRONG_SHAPE));

        let violations = Note::from_text("null").unwrap_err();
        assert!(violations.contains_id(codes::object::MISSING));
    }

    #[test]
    fn test_from_slice_matches_from_text() {
        let from_slice = Note::from_slice(br#"{"title":"hi"}"#).unwrap();
        let from_text = Note::from_text(r#"{"title":"hi"}"#).unwrap();
        assert_eq!(from_slice, from_text);
    }

    #[test]
    fn test_from_reader_splits_io_from_violations() {
        let note = Note::from_reader(&br#"{"title":"hi"}"#[..]).unwrap();
        assert_eq!(note.title, Title("hi".into()));

        match Note::from_reader(&br#"{"title":[]}"#[..]) {
            Err(ExpectationError::Violated(violations)) => {
                assert_eq!(violations.ids().collect::<Vec<_>>(), vec![codes::string::GOT_ARRAY]);
            }
            other => panic!("expected violations, got {other:?}"),
        }

        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
            }
        }
        assert!(matches!(Note::from_reader(Broken), Err(ExpectationError::Io(_))));
    }

    #[test]
    fn test_to_text_layouts() {
        let note = Note::from_text(r#"{"title":"hi"}"#).unwrap();
        assert_eq!(note.to_text(false), r#"{"title":"hi"}"#);
        assert_eq!(note.to_text(true), "{\n  \"title\": \"hi\"\n}");

        let options = OutputOptions {
            layout: Layout::Indented,
            ..OutputOptions::default()
        };
        assert_eq!(note.to_text_with(&options), note.to_text(true));
    }
}
