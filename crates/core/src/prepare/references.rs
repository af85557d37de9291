//! Bibliography preparation - raw reference entries to a numbered display
//! list for the reference-list renderer.

use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

use crate::model::paper::{Bibliography, IdentifierMap, PaperRef};
use crate::prepare::authors::format_author_name;

/// Mapping from reference id to the displayed citation label, built while
/// collecting citation occurrences and consumed here.
pub type ReferenceNumberDict = IndexMap<String, String>;

/// Journal, volume and pages of a published reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationInfo {
    pub journal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
}

/// One normalized bibliography entry, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub ref_id: String,
    /// Label under which the paper cites this entry, when it does.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_nr: Option<String>,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_info: Option<PublicationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Identifier lists (DOI, arXiv, ISSN, ...) for link rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<IdentifierMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

/// Converts a raw bibliography into a formatted reference list.
///
/// Author names are formatted with [`format_author_name`], `--` page ranges
/// become en dashes, DOI and arXiv identifiers turn into a clickable URL
/// (DOI preferred), and entries are sorted by citation number ascending with
/// uncited entries last.
pub fn prepare_references(
    bibliography: &Bibliography,
    ref_numbers: &ReferenceNumberDict,
) -> Vec<Reference> {
    bibliography
        .iter()
        .map(|(ref_id, entry)| prepare_entry(ref_id, entry, ref_numbers))
        .sorted_by_key(|reference| {
            (
                reference.ref_nr.is_none(),
                reference.ref_nr.as_deref().map_or(u64::MAX, label_order),
            )
        })
        .collect()
}

fn prepare_entry(ref_id: &str, entry: &PaperRef, ref_numbers: &ReferenceNumberDict) -> Reference {
    let publication_info = (!entry.venue.is_empty()).then(|| PublicationInfo {
        journal: entry.venue.clone(),
        volume: (!entry.volume.is_empty()).then(|| entry.volume.clone()),
        pages: (!entry.pages.is_empty()).then(|| entry.pages.replace("--", "\u{2013}")),
    });

    Reference {
        ref_id: ref_id.to_string(),
        ref_nr: ref_numbers.get(ref_id).cloned(),
        title: entry.title.clone(),
        authors: entry.authors.iter().map(format_author_name).collect(),
        publication_info,
        year: entry.year,
        links: (!entry.other_ids.is_empty()).then(|| entry.other_ids.clone()),
        url: entry_url(&entry.other_ids),
        raw_text: (!entry.raw_text.is_empty()).then(|| entry.raw_text.clone()),
    }
}

fn entry_url(ids: &IdentifierMap) -> Option<String> {
    if let Some(doi) = ids.get("DOI").and_then(|list| list.first()) {
        return Some(format!("https://www.doi.org/{doi}"));
    }
    ids.get("arXiv")
        .and_then(|list| list.first())
        .map(|id| format!("https://arxiv.org/abs/{id}"))
}

/// Sort key for citation labels like "[3]", "(12)" or "7": the first run of
/// digits, so bracketed numeric labels order numerically. Labels without
/// digits sort after all numbered ones.
fn label_order(label: &str) -> u64 {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(u64::MAX)
}
