//! Paper metadata preparation.

use serde::Serialize;

use crate::model::paper::Bibliographic;

/// Normalized display metadata for the paper header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_pdf: Option<String>,
}

/// Extracts title, publication date and the main links from the paper's
/// bibliographic metadata.
pub fn prepare_metadata(bibliographic: &Bibliographic) -> PaperMeta {
    let location = bibliographic.primary_location.as_ref();
    PaperMeta {
        title: bibliographic.title.clone(),
        published: bibliographic
            .publication_date
            .clone()
            .filter(|date| !date.is_empty()),
        link: location
            .and_then(|loc| loc.landing_page_url.clone())
            .filter(|url| !url.is_empty()),
        link_pdf: location
            .and_then(|loc| loc.pdf_url.clone())
            .filter(|url| !url.is_empty()),
    }
}
