//! # json-expectations-core
//!
//! Validate untrusted JSON into strongly-typed models, reporting every
//! structural and semantic violation in one pass, and serialize validated
//! models back to JSON.
//!
//! ## Model declaration
//!
//! Each model type is a named wrapper implementing one shape trait
//! ([`ScalarExpectation`], [`ListExpectation`] or [`ObjectExpectation`]) and
//! naming that shape in its [`Expectation`] impl. Objects describe their
//! members with an ordered list of [`Field`] descriptors.
//!
//! ```
//! use std::sync::OnceLock;
//!
//! use json_expectations_core::{
//!     shape, Admitted, Document, Expectation, Field, ObjectExpectation, ScalarExpectation,
//!     Violation, Violations,
//! };
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Total(f64);
//!
//! impl ScalarExpectation for Total {
//!     type Primitive = f64;
//!
//!     fn admit(value: Admitted<f64>) -> Self {
//!         Self(value.into_inner())
//!     }
//!
//!     fn primitive(&self) -> &f64 {
//!         &self.0
//!     }
//!
//!     fn validate(self, path: &str) -> Result<Self, Violations> {
//!         if self.0 >= 0.0 {
//!             Ok(self)
//!         } else {
//!             Err(Violation::at("total.negative", path, "Totals cannot be negative.").into())
//!         }
//!     }
//! }
//!
//! impl Expectation for Total {
//!     type Shape = shape::Scalar;
//! }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Invoice {
//!     total: Total,
//! }
//!
//! #[derive(Default)]
//! struct InvoiceDraft {
//!     total: Option<Total>,
//! }
//!
//! impl ObjectExpectation for Invoice {
//!     type Draft = InvoiceDraft;
//!
//!     fn fields() -> &'static [Field<Self>] {
//!         static FIELDS: OnceLock<Vec<Field<Invoice>>> = OnceLock::new();
//!         FIELDS.get_or_init(|| {
//!             vec![Field::required(
//!                 "total",
//!                 |invoice: &Invoice| &invoice.total,
//!                 |draft: &mut InvoiceDraft, value| draft.total = Some(value),
//!             )]
//!         })
//!     }
//!
//!     fn finish(draft: InvoiceDraft) -> Option<Self> {
//!         Some(Invoice { total: draft.total? })
//!     }
//! }
//!
//! impl Expectation for Invoice {
//!     type Shape = shape::Object;
//! }
//!
//! let invoice = Invoice::from_text(r#"{"total": "12.50"}"#).unwrap();
//! assert_eq!(invoice.to_text(false), r#"{"total":12.5}"#);
//!
//! let violations = Invoice::from_text(r#"{"total": -1}"#).unwrap_err();
//! assert_eq!(
//!     violations.render(),
//!     "[total.negative] @(.total) Totals cannot be negative."
//! );
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod expectation;
pub mod list;
pub mod object;
pub mod path;
pub mod scalar;
pub mod violation;

pub use config::{Layout, OutputOptions, ViolationFormat};
pub use document::Document;
pub use error::ExpectationError;
pub use expectation::{shape, Admitted, Expectation, Outcome, Traversal};
pub use list::ListExpectation;
pub use object::{Field, ObjectExpectation};
pub use scalar::{Primitive, ScalarCodes, ScalarExpectation, Symbols};
pub use violation::{codes, Violation, ViolationKind, Violations};
