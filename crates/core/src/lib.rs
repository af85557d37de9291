//! annotext - preparation of annotated scientific papers for linear rendering.
//!
//! Takes a paper's plain text together with independently produced annotation
//! layers (section headers, in-text references, quantitative-statement
//! extractions) and turns them into an ordered, gapless, non-overlapping
//! partition of the text that renderers consume directly.

pub mod curation;
pub mod error;
pub mod model;
pub mod prepare;

pub use error::{AnnotextError, Result};
pub use model::paper::Paper;
pub use model::span::{AnnotationAnchor, Range, ReferenceKind, ReferenceTag, TextSpan};
pub use model::statement::{Annotation, QuantitativeStatement};
pub use prepare::annotated_text::{PreparedText, prepare_annotated_text};
pub use prepare::normalize::normalize_spans;
