//! Curated annotation projections and assembled quantitative statements.

use serde::Serialize;

use crate::model::paper::CurationEntry;

/// Display projection of one curated role.
///
/// `approved` and `comment` reflect the latest entry of the role's curation
/// history; both stay `None` while the history is empty ("not yet reviewed").
/// Earlier entries are retained server-side for audit but never shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Annotation {
    /// Projects a surface text and its curation history onto the latest
    /// decision. Empty comments are treated as absent.
    pub fn from_curated(text: String, curation: &[CurationEntry]) -> Self {
        let mut annotation = Annotation {
            text,
            approved: None,
            comment: None,
        };
        if let Some(latest) = curation.last() {
            annotation.approved = Some(latest.approve);
            annotation.comment = latest
                .comment
                .clone()
                .filter(|comment| !comment.is_empty());
        }
        annotation
    }
}

/// One fully assembled quantitative statement.
///
/// Eight span-bearing roles plus three classification-only roles. Only the
/// `quantity` role is visually anchored in the partition; the others are
/// reached through the statement table when the anchor's popover opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantitativeStatement {
    pub entity: Annotation,
    pub property: Annotation,
    pub quantity: Annotation,
    pub temporal_scope: Annotation,
    pub spatial_scope: Annotation,
    pub reference: Annotation,
    pub method: Annotation,
    pub qualifier: Annotation,
    #[serde(rename = "type")]
    pub kind: Annotation,
    pub rational: Annotation,
    pub system: Annotation,
}
