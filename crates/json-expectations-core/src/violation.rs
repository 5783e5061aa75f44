//! Violation records and the accumulating set every failed read returns.
//!
//! A [`Violation`] pairs a stable id with a description that already embeds
//! the document path as an `@(<path>)` prefix. [`Violations`] keeps them in
//! insertion order so the rendered text is reproducible across runs.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ViolationFormat;
use crate::error::ExpectationError;

/// Stable ids raised by the built-in wrappers.
///
/// These never change meaning once published; callers may branch on them.
pub mod codes {
    /// Raw text that is not a JSON document.
    pub const DOCUMENT_SYNTAX: &str = "document.syntax";

    pub mod string {
        pub const MISSING: &str = "string.missing";
        pub const GOT_OBJECT: &str = "string.got-object";
        pub const GOT_ARRAY: &str = "string.got-array";
    }

    pub mod int {
        pub const MISSING: &str = "int.missing";
        pub const GOT_OBJECT: &str = "int.got-object";
        pub const GOT_ARRAY: &str = "int.got-array";
        pub const NOT_AN_INTEGER: &str = "int.not-an-integer";
    }

    pub mod double {
        pub const MISSING: &str = "double.missing";
        pub const GOT_OBJECT: &str = "double.got-object";
        pub const GOT_ARRAY: &str = "double.got-array";
        pub const NOT_A_NUMBER: &str = "double.not-a-number";
    }

    pub mod boolean {
        pub const MISSING: &str = "bool.missing";
        pub const GOT_OBJECT: &str = "bool.got-object";
        pub const GOT_ARRAY: &str = "bool.got-array";
        pub const NOT_A_BOOLEAN: &str = "bool.not-a-boolean";
    }

    pub mod symbol {
        pub const MISSING: &str = "enum.missing";
        pub const GOT_OBJECT: &str = "enum.got-object";
        pub const GOT_ARRAY: &str = "enum.got-array";
        /// A number or boolean where a symbol name was expected.
        pub const NOT_A_STRING: &str = "enum.not-a-string";
        pub const UNKNOWN_SYMBOL: &str = "enum.unknown-symbol";
    }

    pub mod list {
        pub const MISSING: &str = "list.missing";
        pub const GOT_OBJECT: &str = "list.got-object";
        pub const GOT_PRIMITIVE: &str = "list.got-primitive";
    }

    pub mod object {
        pub const MISSING: &str = "object.missing";
        pub const WRONG_SHAPE: &str = "object.wrong-shape";
        /// A string in object position whose content is not a JSON object.
        pub const UNPARSABLE_STRING: &str = "object.unparsable-string";
    }
}

/// Classification of a violation, for callers that group without matching ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// The raw text (or an embedded stringified document) is not valid JSON.
    DocumentSyntax,
    /// Object, array or primitive found where another shape was expected.
    ShapeMismatch,
    /// A required value is absent or `null`.
    MissingRequired,
    /// A scalar's text does not parse as the declared primitive.
    ScalarParse,
    /// A string that is not among the declared enum symbols.
    EnumOutOfRange,
    /// A type-specific `validate` hook rejected an otherwise well-formed value.
    DomainRule,
}

/// One structured, path-qualified diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    id: String,
    kind: ViolationKind,
    description: String,
}

impl Violation {
    /// Create a domain-rule violation from an id and a full description.
    ///
    /// The description should already carry its `@(<path>)` prefix; prefer
    /// [`Violation::at`] when building one inside a `validate` hook.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ViolationKind::DomainRule,
            description: description.into(),
        }
    }

    /// Create a domain-rule violation whose description is `@(<path>) <message>`.
    ///
    /// # Example
    /// ```
    /// use json_expectations_core::Violation;
    /// let v = Violation::at("order.total.negative", ".orders[2].total", "Totals cannot be negative.");
    /// assert_eq!(v.render(), "[order.total.negative] @(.orders[2].total) Totals cannot be negative.");
    /// ```
    pub fn at(id: impl Into<String>, path: &str, message: impl fmt::Display) -> Self {
        Self::with_kind(ViolationKind::DomainRule, id, path, message)
    }

    pub(crate) fn with_kind(
        kind: ViolationKind,
        id: impl Into<String>,
        path: &str,
        message: impl fmt::Display,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            description: format!("@({path}) {message}"),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// `[<id>] <description>`, the single-line wire form.
    pub fn render(&self) -> String {
        format!("[{}] {}", self.id, self.description)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.description)
    }
}

/// Ordered set of violations collected during one validation pass.
///
/// Displays as the newline-joined wire form, so it can be returned directly
/// as an error from `main` or wrapped by `anyhow`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(transparent)]
#[error("{}", render_entries(.entries))]
pub struct Violations {
    entries: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.entries.push(violation);
    }

    /// Append every entry of `other`, keeping its order after ours.
    pub fn merge(&mut self, other: Violations) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Violation::id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.entries.iter().any(|v| v.id == id)
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.entries
    }

    /// Newline-joined `[<id>] <description>` lines.
    pub fn render(&self) -> String {
        render_entries(&self.entries)
    }

    /// The serde form: a JSON array of `{ id, kind, description }` records.
    pub fn render_json(&self) -> Result<String, ExpectationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_with(&self, format: ViolationFormat) -> Result<String, ExpectationError> {
        match format {
            ViolationFormat::Text => Ok(self.render()),
            ViolationFormat::Json => self.render_json(),
        }
    }
}

fn render_entries(entries: &[Violation]) -> String {
    entries
        .iter()
        .map(Violation::render)
        .collect::<Vec<_>>()
        .join("\n")
}

impl From<Violation> for Violations {
    fn from(violation: Violation) -> Self {
        Self {
            entries: vec![violation],
        }
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(entries: Vec<Violation>) -> Self {
        Self { entries }
    }
}

impl Extend<Violation> for Violations {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
