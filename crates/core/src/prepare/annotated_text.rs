//! Assembly of the annotated text: candidate-span collectors and the
//! preparation entry point.
//!
//! Candidate spans come from three producers over the same text: the
//! headline segmenter, the reference collector, and the statement assembler.
//! They are merged by [`normalize_spans`] into the final partition.

use serde::Serialize;

use crate::model::paper::{
    Paper, RawAnnotation, RawClassification, RawReference, RawSpan, RawStatement,
};
use crate::model::span::{AnnotationAnchor, Palette, Range, ReferenceKind, ReferenceTag, TextSpan};
use crate::model::statement::{Annotation, QuantitativeStatement};
use crate::prepare::normalize::normalize_spans;
use crate::prepare::references::ReferenceNumberDict;

/// Result of preparing one paper for rendering.
///
/// Derived, read-only, and recomputed on every fetch; curation edits go
/// through the external write path and only show up after a re-fetch.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedText {
    /// The normalized partition of the paper text.
    pub spans: Vec<TextSpan>,
    /// Statement table, indexed by the ordinals carried on quantity anchors.
    pub statements: Vec<QuantitativeStatement>,
    /// Reference id to displayed citation label.
    pub ref_numbers: ReferenceNumberDict,
}

/// Prepares a paper's annotated text for linear rendering.
///
/// Papers without extractable full text short-circuit to a single plain span
/// over the fallback text; no normalization runs in that case.
pub fn prepare_annotated_text(paper: &Paper) -> PreparedText {
    let text = &paper.text;

    if !paper.fulltext_available {
        return PreparedText {
            spans: vec![TextSpan::plain(text.clone(), 0, text.len())],
            statements: Vec::new(),
            ref_numbers: ReferenceNumberDict::new(),
        };
    }

    let mut candidates: Vec<TextSpan> = Vec::new();
    collect_headlines(text, &paper.annotations.section_header, &mut candidates);

    let mut ref_numbers = ReferenceNumberDict::new();
    collect_citations(
        &paper.annotations.citations,
        &mut ref_numbers,
        &mut candidates,
    );
    collect_references(
        &paper.annotations.figure_refs,
        ReferenceKind::Figure,
        &mut candidates,
    );
    collect_references(
        &paper.annotations.table_refs,
        ReferenceKind::Table,
        &mut candidates,
    );
    collect_references(
        &paper.annotations.equation_refs,
        ReferenceKind::Equation,
        &mut candidates,
    );

    let palette = Palette::default();
    let statements = paper
        .annotations
        .quantitative_statements
        .iter()
        .enumerate()
        .map(|(index, raw)| assemble_statement(raw, index, &palette, &mut candidates))
        .collect();

    inject_leading_gap(paper, &mut candidates);

    PreparedText {
        spans: normalize_spans(candidates, text),
        statements,
        ref_numbers,
    }
}

/// Splits the text into alternating headline / normal-text candidates along
/// the section-header boundaries, which arrive non-overlapping and in
/// document order.
///
/// Text before the first header is front matter and is left to the
/// leading-gap rule; text after the last header is left to the normalizer's
/// gap fill.
fn collect_headlines(text: &str, headers: &[RawSpan], out: &mut Vec<TextSpan>) {
    let mut cursor = 0usize;
    for header in headers {
        if cursor != 0 && cursor < header.start {
            out.push(TextSpan::plain(
                text[cursor..header.start].to_string(),
                cursor,
                header.start,
            ));
        }
        out.push(TextSpan::headline(
            text[header.start..header.end].to_string(),
            header.start,
            header.end,
        ));
        cursor = header.end;
    }
}

/// Emits citation candidates and fills the reference-number dictionary.
/// The first occurrence of an id decides its displayed label.
fn collect_citations(
    citations: &[RawReference],
    ref_numbers: &mut ReferenceNumberDict,
    out: &mut Vec<TextSpan>,
) {
    for citation in citations {
        if let Some(id) = &citation.ref_id {
            ref_numbers
                .entry(id.clone())
                .or_insert_with(|| citation.text.clone());
        }
        out.push(TextSpan::reference(
            citation.text.clone(),
            citation.start,
            citation.end,
            ReferenceTag {
                kind: ReferenceKind::Citation,
                id: citation.ref_id.clone(),
            },
        ));
    }
}

fn collect_references(refs: &[RawReference], kind: ReferenceKind, out: &mut Vec<TextSpan>) {
    for occurrence in refs {
        out.push(TextSpan::reference(
            occurrence.text.clone(),
            occurrence.start,
            occurrence.end,
            ReferenceTag {
                kind,
                id: occurrence.ref_id.clone(),
            },
        ));
    }
}

/// A span-bearing role after curation projection, with its source range when
/// the extraction was explicit.
struct PreparedRole {
    annotation: Annotation,
    range: Option<Range>,
}

fn prepare_role(raw: &RawAnnotation) -> PreparedRole {
    PreparedRole {
        annotation: Annotation::from_curated(raw.text.clone(), &raw.curation),
        range: (!raw.is_implicit).then(|| Range::new(raw.start, raw.end)),
    }
}

fn prepare_classification(raw: &RawClassification) -> Annotation {
    Annotation::from_curated(raw.class.clone().unwrap_or_default(), &raw.curation)
}

/// Assembles one statement and injects its single visual anchor.
///
/// Only the `quantity` role becomes a candidate span; highlighting all eight
/// span roles would nest illegibly, and the anchor's popover lists the rest.
/// An implicit quantity keeps the statement in the table without a span.
fn assemble_statement(
    raw: &RawStatement,
    index: usize,
    palette: &Palette,
    candidates: &mut Vec<TextSpan>,
) -> QuantitativeStatement {
    let quantity = prepare_role(&raw.claim.quantity);
    if let Some(range) = quantity.range {
        candidates.push(TextSpan::quantity(
            quantity.annotation.text.clone(),
            range.start,
            range.end,
            AnnotationAnchor {
                is_quantity: true,
                index,
                color: palette.token(index),
            },
        ));
    }

    QuantitativeStatement {
        entity: prepare_role(&raw.claim.entity).annotation,
        property: prepare_role(&raw.claim.property).annotation,
        quantity: quantity.annotation,
        temporal_scope: prepare_role(&raw.qualifiers.temporal_scope).annotation,
        spatial_scope: prepare_role(&raw.qualifiers.spatial_scope).annotation,
        reference: prepare_role(&raw.qualifiers.reference).annotation,
        method: prepare_role(&raw.qualifiers.method).annotation,
        qualifier: prepare_role(&raw.qualifiers.qualifier).annotation,
        kind: prepare_classification(&raw.statement_classification.kind),
        rational: prepare_classification(&raw.statement_classification.rational),
        system: prepare_classification(&raw.statement_classification.system),
    }
}

/// Injects a plain filler candidate between the body-text start and the
/// first produced candidate, so front matter (title and author block) stays
/// out of the annotated rendering.
///
/// The body start is the offset just past the title's first occurrence,
/// overridden by the first annotated body-text block when one is present.
fn inject_leading_gap(paper: &Paper, candidates: &mut Vec<TextSpan>) {
    let Some(first) = candidates.first() else {
        return;
    };
    let first_start = first.start;

    let title = &paper.metadata.bibliographic.title;
    let mut body_start = paper
        .text
        .find(title.as_str())
        .map(|at| at + title.len())
        .unwrap_or(0);
    if let Some(block) = paper.annotations.body_text.first() {
        if block.start > 0 {
            body_start = block.start;
        }
    }

    if first_start > body_start {
        candidates.push(TextSpan::plain(
            paper.text[body_start..first_start].to_string(),
            body_start,
            first_start,
        ));
    }
}
