//! Paper data model types.
//!
//! - `paper` - the raw paper record as fetched from the analysis service
//! - `span` - ranges, tags, and the `TextSpan` partition unit
//! - `statement` - curated annotations and assembled quantitative statements

pub mod paper;
pub mod span;
pub mod statement;

pub use paper::{Paper, PaperAnnotations};
pub use span::{AnnotationAnchor, Palette, Range, ReferenceKind, ReferenceTag, TextSpan};
pub use statement::{Annotation, QuantitativeStatement};
