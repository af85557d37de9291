//! Paper preparation pipeline.
//!
//! - `annotated_text` - collectors and the assembly entry point
//! - `normalize` - the span normalization sweep
//! - `references` - bibliography list preparation
//! - `metadata` - paper metadata preparation
//! - `authors` - author and affiliation preparation

pub mod annotated_text;
pub mod authors;
pub mod metadata;
pub mod normalize;
pub mod references;

pub use annotated_text::{PreparedText, prepare_annotated_text};
pub use authors::{AuthorInformation, format_author_name, prepare_author_data};
pub use metadata::{PaperMeta, prepare_metadata};
pub use normalize::normalize_spans;
pub use references::{Reference, ReferenceNumberDict, prepare_references};
