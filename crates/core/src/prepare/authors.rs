//! Author and affiliation preparation.
//!
//! Papers carry authors in one of two shapes: OpenAlex authorships (when the
//! paper was matched against OpenAlex) or names extracted from the PDF.
//! Both normalize to the same display structure with institutions numbered
//! in first-seen order.

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::paper::{AuthorName, AuthorOpenAlex, AuthorPdf, Bibliographic};

/// One display-ready author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Indices into the institution table, 1-based as rendered.
    pub institution_numbers: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Institution {
    pub nbr: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

pub type Institutions = IndexMap<String, Institution>;

/// Authors plus the institution index they share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorInformation {
    pub authors: Vec<Author>,
    pub institutions: Institutions,
}

/// Formats a structured author name for display.
///
/// Single-character segments are treated as initials and get a period
/// ("A" becomes "A."); empty segments are skipped; the remaining parts are
/// joined by single spaces, e.g. "A. B. Smith Jr".
pub fn format_author_name(author: &AuthorName) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3 + author.middle.len());
    let mut push = |value: &str| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        if trimmed.chars().count() == 1 {
            parts.push(format!("{trimmed}."));
        } else {
            parts.push(trimmed.to_string());
        }
    };

    push(&author.first);
    for middle in &author.middle {
        push(middle);
    }
    push(&author.last);
    push(&author.suffix);

    parts.join(" ")
}

/// Prepares author data from whichever source the paper carries, preferring
/// OpenAlex authorships over PDF-extracted names. Returns `None` when the
/// paper has neither.
pub fn prepare_author_data(bibliographic: &Bibliographic) -> Option<AuthorInformation> {
    if let Some(authorships) = &bibliographic.authorships {
        return Some(prepare_from_openalex(authorships));
    }
    bibliographic
        .authors
        .as_ref()
        .map(|authors| prepare_from_pdf(authors))
}

/// Numbers institutions in first-seen order across all authors.
struct InstitutionIndex {
    institutions: Institutions,
}

impl InstitutionIndex {
    fn new() -> Self {
        Self {
            institutions: Institutions::new(),
        }
    }

    fn number(&mut self, name: &str, link: Option<&str>) -> usize {
        if let Some(existing) = self.institutions.get(name) {
            return existing.nbr;
        }
        let nbr = self.institutions.len() + 1;
        self.institutions.insert(
            name.to_string(),
            Institution {
                nbr,
                link: link.map(str::to_string),
            },
        );
        nbr
    }
}

fn prepare_from_openalex(authorships: &[AuthorOpenAlex]) -> AuthorInformation {
    let mut index = InstitutionIndex::new();
    let authors = authorships
        .iter()
        .map(|authorship| {
            let mut institution_numbers = Vec::new();

            // Raw affiliation strings that match no declared institution are
            // affiliations OpenAlex failed to resolve; keep them as their own
            // numbered entries.
            if authorship.raw_affiliation_strings.len() > authorship.institutions.len() {
                for affiliation in &authorship.raw_affiliation_strings {
                    let matched = authorship
                        .institutions
                        .iter()
                        .any(|inst| affiliation.contains(&inst.display_name));
                    if !matched {
                        institution_numbers.push(index.number(affiliation, None));
                    }
                }
            }

            for inst in &authorship.institutions {
                institution_numbers.push(index.number(&inst.display_name, Some(&inst.id)));
            }

            Author {
                name: authorship.author.display_name.clone(),
                link: Some(authorship.author.id.clone()),
                email: None,
                institution_numbers,
            }
        })
        .collect();

    AuthorInformation {
        authors,
        institutions: index.institutions,
    }
}

fn prepare_from_pdf(authors: &[AuthorPdf]) -> AuthorInformation {
    let mut index = InstitutionIndex::new();
    let prepared = authors
        .iter()
        .map(|author| {
            let institution = author
                .affiliation
                .as_ref()
                .and_then(|affiliation| affiliation.institution.as_deref())
                .map(str::trim)
                .filter(|name| !name.is_empty());

            Author {
                name: format_author_name(&author.name),
                link: None,
                email: author.email.clone(),
                institution_numbers: institution
                    .map(|name| vec![index.number(name, None)])
                    .unwrap_or_default(),
            }
        })
        .collect();

    AuthorInformation {
        authors: prepared,
        institutions: index.institutions,
    }
}
