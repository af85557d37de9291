//! Raw paper record as fetched from the analysis service.
//!
//! The shapes here mirror the service's JSON contract field for field; the
//! preparation pipeline never mutates a `Paper`, it only derives display
//! structures from it.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{AnnotextError, Result};

/// A fully annotated paper.
#[derive(Debug, Clone, Deserialize)]
pub struct Paper {
    /// Plain-text body. When `fulltext_available` is false this holds the
    /// fallback text (typically the abstract).
    pub text: String,
    pub fulltext_available: bool,
    pub metadata: Metadata,
    #[serde(default)]
    pub annotations: PaperAnnotations,
    /// Bibliography entries keyed by reference id.
    #[serde(default)]
    pub bibliography: Bibliography,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub bibliographic: Bibliographic,
}

/// Bibliographic metadata of the paper itself.
#[derive(Debug, Clone, Deserialize)]
pub struct Bibliographic {
    pub title: String,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub primary_location: Option<PrimaryLocation>,
    /// OpenAlex authorships, when the paper was matched against OpenAlex.
    #[serde(default)]
    pub authorships: Option<Vec<AuthorOpenAlex>>,
    /// Authors extracted from the PDF, used when no OpenAlex match exists.
    #[serde(default)]
    pub authors: Option<Vec<AuthorPdf>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryLocation {
    #[serde(default)]
    pub landing_page_url: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

/// All annotation layers of a paper.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaperAnnotations {
    #[serde(default)]
    pub section_header: Vec<RawSpan>,
    #[serde(default)]
    pub citations: Vec<RawReference>,
    #[serde(default)]
    pub figure_refs: Vec<RawReference>,
    #[serde(default)]
    pub table_refs: Vec<RawReference>,
    #[serde(default)]
    pub equation_refs: Vec<RawReference>,
    #[serde(default)]
    pub quantitative_statements: Vec<RawStatement>,
    #[serde(default)]
    pub body_text: Vec<RawSpan>,
}

/// A plain ranged annotation (section headers, body-text blocks).
#[derive(Debug, Clone, Deserialize)]
pub struct RawSpan {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// An in-text reference occurrence.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReference {
    pub start: usize,
    pub end: usize,
    pub text: String,
    #[serde(default)]
    pub ref_id: Option<String>,
}

/// One entry of a role's append-only curation history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurationEntry {
    pub approve: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A span-bearing extraction role before preparation.
///
/// Implicit roles have no literal span in the document; their offsets are
/// meaningless and must not be turned into candidate spans.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAnnotation {
    #[serde(default)]
    pub start: usize,
    #[serde(default)]
    pub end: usize,
    pub text: String,
    #[serde(default)]
    pub is_implicit: bool,
    #[serde(default)]
    pub curation: Vec<CurationEntry>,
}

/// A classification-only role: a label from a fixed option set, never a span.
#[derive(Debug, Clone, Deserialize)]
pub struct RawClassification {
    pub class: Option<String>,
    #[serde(default)]
    pub curation: Vec<CurationEntry>,
}

/// One raw quantitative-statement extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStatement {
    pub claim: RawClaim,
    pub qualifiers: RawQualifiers,
    pub statement_classification: RawStatementClassification,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawClaim {
    pub entity: RawAnnotation,
    pub property: RawAnnotation,
    pub quantity: RawAnnotation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawQualifiers {
    pub temporal_scope: RawAnnotation,
    pub spatial_scope: RawAnnotation,
    pub reference: RawAnnotation,
    pub method: RawAnnotation,
    pub qualifier: RawAnnotation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStatementClassification {
    #[serde(rename = "type")]
    pub kind: RawClassification,
    pub rational: RawClassification,
    pub system: RawClassification,
}

impl RawStatement {
    /// The 8 span-bearing roles in their canonical order.
    pub fn span_roles(&self) -> [(&'static str, &RawAnnotation); 8] {
        [
            ("entity", &self.claim.entity),
            ("property", &self.claim.property),
            ("quantity", &self.claim.quantity),
            ("temporal_scope", &self.qualifiers.temporal_scope),
            ("spatial_scope", &self.qualifiers.spatial_scope),
            ("reference", &self.qualifiers.reference),
            ("method", &self.qualifiers.method),
            ("qualifier", &self.qualifiers.qualifier),
        ]
    }
}

/// Raw bibliography entry as delivered by the analysis service.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperRef {
    #[serde(default)]
    pub authors: Vec<AuthorName>,
    /// Identifier lists keyed by scheme ("DOI", "arXiv", "ISSN", ...).
    #[serde(default)]
    pub other_ids: IdentifierMap,
    #[serde(default)]
    pub pages: String,
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub year: Option<i32>,
}

pub type Bibliography = IndexMap<String, PaperRef>;
pub type IdentifierMap = IndexMap<String, Vec<String>>;

/// Structured author name as extracted from a PDF bibliography.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorName {
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub middle: Vec<String>,
    #[serde(default)]
    pub last: String,
    #[serde(default)]
    pub suffix: String,
}

/// Author record extracted from the PDF itself.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorPdf {
    #[serde(flatten)]
    pub name: AuthorName,
    #[serde(default)]
    pub affiliation: Option<Affiliation>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Affiliation {
    #[serde(default)]
    pub institution: Option<String>,
}

/// OpenAlex authorship record.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorOpenAlex {
    pub author: OpenAlexAuthor,
    #[serde(default)]
    pub institutions: Vec<OpenAlexInstitution>,
    #[serde(default)]
    pub raw_affiliation_strings: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAlexAuthor {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAlexInstitution {
    pub id: String,
    pub display_name: String,
}

impl Paper {
    /// Checks that every annotation range lies inside the text on character
    /// boundaries.
    ///
    /// The normalizer itself assumes well-formed ranges; callers are expected
    /// to validate a freshly fetched record once before preparing it.
    pub fn validate(&self) -> Result<()> {
        let text = &self.text;
        for h in &self.annotations.section_header {
            check_range("section_header", h.start, h.end, text)?;
        }
        for b in &self.annotations.body_text {
            check_range("body_text", b.start, b.end, text)?;
        }
        for (refs, kind) in [
            (&self.annotations.citations, "citation"),
            (&self.annotations.figure_refs, "figure_ref"),
            (&self.annotations.table_refs, "table_ref"),
            (&self.annotations.equation_refs, "equation_ref"),
        ] {
            for r in refs {
                check_range(kind, r.start, r.end, text)?;
            }
        }
        for statement in &self.annotations.quantitative_statements {
            for (role, raw) in statement.span_roles() {
                if !raw.is_implicit {
                    check_range(role, raw.start, raw.end, text)?;
                }
            }
        }
        Ok(())
    }
}

fn check_range(kind: &'static str, start: usize, end: usize, text: &str) -> Result<()> {
    if start > end {
        return Err(AnnotextError::SpanInverted { kind, start, end });
    }
    if end > text.len() {
        return Err(AnnotextError::SpanOutOfBounds {
            kind,
            start,
            end,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        return Err(AnnotextError::SpanNotOnCharBoundary { kind, start, end });
    }
    Ok(())
}
