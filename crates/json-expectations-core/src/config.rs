//! Output configuration for documents and violation reports.

use serde::{Deserialize, Serialize};

/// Whitespace layout of serialized JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Single line, no insignificant whitespace.
    #[default]
    Compact,
    /// Two-space indentation, one member per line.
    Indented,
}

/// How a violation set is rendered for logs and APIs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationFormat {
    /// Newline-joined `[<id>] <description>` lines.
    #[default]
    Text,
    /// JSON array of `{ id, kind, description }` records.
    Json,
}

/// Options for writing documents and reports.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case`, matching the CLI flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OutputOptions {
    /// Layout for re-serialized documents. Default: compact.
    pub layout: Layout,
    /// Format for violation reports. Default: text.
    pub violations: ViolationFormat,
}

impl OutputOptions {
    pub fn indented(self) -> bool {
        self.layout == Layout::Indented
    }
}
