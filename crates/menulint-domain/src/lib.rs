//! menulint Domain Layer
//!
//! Record types produced by a menu review and the trait that describes the
//! shape a model response must decode into.
//!
//! ## Key Concepts
//!
//! - **Correction**: a flagged span of menu text and its remedy
//! - **ComparisonResult**: a discrepancy between the menu and a reference price sheet
//! - **Finding**: an expected record shape (response schema plus per-record checks)
//!
//! Records are only ever built by decoding model output. A batch that does not
//! decode as a whole is rejected as a whole.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod comparison;
pub mod correction;
pub mod finding;

// Re-exports for convenience
pub use comparison::{ComparisonDetails, ComparisonIssue, ComparisonResult};
pub use correction::{Correction, CorrectionKind};
pub use finding::Finding;
