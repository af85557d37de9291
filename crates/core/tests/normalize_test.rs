//! Tests for the span normalization sweep.
//!
//! The partition contract: spans strictly ordered by start, adjacent spans
//! share boundaries, concatenated span texts reproduce the input text, and
//! every input tag survives on the narrowest span it applies to.

use annotext_core::model::span::{
    AnnotationAnchor, Palette, ReferenceKind, ReferenceTag, TextSpan,
};
use annotext_core::prepare::normalize::normalize_spans;

// ============================================================================
// Helpers
// ============================================================================

fn plain(text: &str, start: usize, end: usize) -> TextSpan {
    TextSpan::plain(text[start..end].to_string(), start, end)
}

fn headline(text: &str, start: usize, end: usize) -> TextSpan {
    TextSpan::headline(text[start..end].to_string(), start, end)
}

fn citation(text: &str, start: usize, end: usize, id: Option<&str>) -> TextSpan {
    TextSpan::reference(
        text[start..end].to_string(),
        start,
        end,
        ReferenceTag {
            kind: ReferenceKind::Citation,
            id: id.map(str::to_string),
        },
    )
}

fn quantity(text: &str, start: usize, end: usize, index: usize) -> TextSpan {
    TextSpan::quantity(
        text[start..end].to_string(),
        start,
        end,
        AnnotationAnchor {
            is_quantity: true,
            index,
            color: Palette::default().token(index),
        },
    )
}

/// Asserts the three structural partition properties over `text`.
fn assert_partition(spans: &[TextSpan], text: &str) {
    let concatenated: String = spans.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(concatenated, text, "concatenated span texts must equal text");

    assert!(spans.first().is_none_or(|s| s.start == 0));
    assert!(spans.last().is_none_or(|s| s.end == text.len()));
    for pair in spans.windows(2) {
        assert_eq!(
            pair[0].end, pair[1].start,
            "adjacent spans must share a boundary"
        );
    }
    for span in spans {
        assert!(span.start < span.end, "no degenerate span may be emitted");
        assert_eq!(span.text, &text[span.start..span.end]);
    }
}

// ============================================================================
// Merge scenarios
// ============================================================================

#[test]
fn test_single_headline_with_trailing_filler() {
    // "AB" with one headline candidate over "A".
    let text = "AB";
    let spans = normalize_spans(vec![headline(text, 0, 1)], text);

    assert_partition(&spans, text);
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].text, "A");
    assert!(spans[0].is_headline);
    assert_eq!(spans[1].text, "B");
    assert!(!spans[1].is_headline);

    insta::assert_json_snapshot!(spans, @r###"
    [
      {
        "text": "A",
        "start": 0,
        "end": 1,
        "is_headline": true
      },
      {
        "text": "B",
        "start": 1,
        "end": 2,
        "is_headline": false
      }
    ]
    "###);
}

#[test]
fn test_nested_quantity_inside_citation() {
    // Citation [2,5) fully contains quantity anchor [3,4).
    let text = "0123456789";
    let spans = normalize_spans(
        vec![citation(text, 2, 5, Some("b0")), quantity(text, 3, 4, 0)],
        text,
    );

    assert_partition(&spans, text);
    assert_eq!(spans.len(), 5);

    // Leading and trailing filler around the candidates.
    assert_eq!((spans[0].start, spans[0].end), (0, 2));
    assert!(spans[0].reference.is_none() && spans[0].annotation.is_none());
    assert_eq!((spans[4].start, spans[4].end), (5, 10));

    // Citation prefix, nested quantity, citation continuation.
    assert_eq!((spans[1].start, spans[1].end), (2, 3));
    assert_eq!(
        spans[1].reference.as_ref().map(|r| r.kind),
        Some(ReferenceKind::Citation)
    );
    assert_eq!((spans[2].start, spans[2].end), (3, 4));
    let anchor = spans[2].annotation.as_ref().expect("quantity anchor");
    assert!(anchor.is_quantity);
    assert_eq!(anchor.index, 0);
    assert!(spans[2].reference.is_none());
    assert_eq!((spans[3].start, spans[3].end), (4, 5));
    assert_eq!(
        spans[3].reference.as_ref().map(|r| r.kind),
        Some(ReferenceKind::Citation)
    );
}

#[test]
fn test_identical_ranges_collapse_into_one_span() {
    // A reference and a quantity anchor over the same range.
    // The producers push references first, so the reference stays visible
    // and the statement index is folded into `indices`.
    let text = "0123456789";
    let spans = normalize_spans(
        vec![citation(text, 5, 8, None), quantity(text, 5, 8, 3)],
        text,
    );

    assert_partition(&spans, text);
    let tagged: Vec<&TextSpan> = spans
        .iter()
        .filter(|s| s.reference.is_some() || s.annotation.is_some() || !s.indices.is_empty())
        .collect();
    assert_eq!(tagged.len(), 1, "exact duplicates must merge into one span");
    let merged = tagged[0];
    assert_eq!((merged.start, merged.end), (5, 8));
    assert_eq!(
        merged.reference.as_ref().map(|r| r.kind),
        Some(ReferenceKind::Citation)
    );
    assert_eq!(merged.indices, vec![3]);
}

#[test]
fn test_duplicate_citations_merge() {
    let text = "citing [1] here";
    let spans = normalize_spans(
        vec![
            citation(text, 7, 10, Some("b1")),
            citation(text, 7, 10, Some("b1")),
        ],
        text,
    );

    assert_partition(&spans, text);
    let cited: Vec<&TextSpan> = spans.iter().filter(|s| s.reference.is_some()).collect();
    assert_eq!(cited.len(), 1);
    assert_eq!((cited[0].start, cited[0].end), (7, 10));
}

// ============================================================================
// Edge-case policy
// ============================================================================

#[test]
fn test_zero_length_candidates_are_dropped() {
    let text = "ABCDEF";
    let mut degenerate = plain(text, 3, 3);
    degenerate.reference = Some(ReferenceTag {
        kind: ReferenceKind::Figure,
        id: None,
    });
    let spans = normalize_spans(vec![headline(text, 0, 2), degenerate], text);

    assert_partition(&spans, text);
    assert!(
        spans.iter().all(|s| s.reference.is_none()),
        "a zero-length candidate must not influence the output"
    );
    assert_eq!(spans.len(), 2);
}

#[test]
fn test_no_candidates_yields_single_filler() {
    let text = "no annotations at all";
    let spans = normalize_spans(Vec::new(), text);
    assert_partition(&spans, text);
    assert_eq!(spans.len(), 1);
    assert!(!spans[0].is_headline);
}

#[test]
fn test_empty_text_yields_empty_partition() {
    assert!(normalize_spans(Vec::new(), "").is_empty());
}

#[test]
fn test_gap_between_candidates_becomes_filler() {
    let text = "AABBBCCDDD";
    let spans = normalize_spans(vec![headline(text, 0, 2), citation(text, 5, 7, None)], text);

    assert_partition(&spans, text);
    assert_eq!(spans.len(), 4);
    assert_eq!(spans[1].text, "BBB");
    assert!(spans[1].reference.is_none() && !spans[1].is_headline);
    assert_eq!(spans[3].text, "DDD");
}

#[test]
fn test_partial_overlap_emits_prefix_then_later_span() {
    // [2,6) headline and [4,8) citation overlap without containment.
    let text = "0123456789";
    let spans = normalize_spans(vec![headline(text, 2, 6), citation(text, 4, 8, None)], text);

    assert_partition(&spans, text);
    // [0,2) filler, [2,4) headline prefix, [4,8) citation, [8,10) filler.
    assert_eq!(spans.len(), 4);
    assert!(spans[1].is_headline);
    assert_eq!((spans[1].start, spans[1].end), (2, 4));
    assert!(spans[2].reference.is_some());
    assert_eq!((spans[2].start, spans[2].end), (4, 8));
    // The citation starts inside the headline's range and keeps its typography.
    assert!(spans[2].is_headline);
}

#[test]
fn test_reference_inside_headline_keeps_headline_flag() {
    let text = "1 Introduction [3] and more text";
    let spans = normalize_spans(
        vec![headline(text, 0, 18), citation(text, 15, 18, Some("b3"))],
        text,
    );

    assert_partition(&spans, text);
    let cited = spans
        .iter()
        .find(|s| s.reference.is_some())
        .expect("citation span");
    assert!(cited.is_headline);
}

#[test]
fn test_containment_remainder_continues_sweep() {
    // One broad headline containing two separate citations.
    let text = "0123456789ABCDEF";
    let spans = normalize_spans(
        vec![
            headline(text, 0, 12),
            citation(text, 2, 4, None),
            citation(text, 7, 9, None),
        ],
        text,
    );

    assert_partition(&spans, text);
    // [0,2)H [2,4)C [4,7)H [7,9)C [9,12)H [12,16) filler
    assert_eq!(spans.len(), 6);
    assert!(spans[0].is_headline && spans[0].reference.is_none());
    assert!(spans[1].reference.is_some() && spans[1].is_headline);
    assert!(spans[2].is_headline && spans[2].reference.is_none());
    assert!(spans[3].reference.is_some());
    assert!(spans[4].is_headline);
    assert!(!spans[5].is_headline);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_normalization_is_deterministic() {
    let text = "The ocean absorbs 31% of emitted CO2 every year [12].";
    let build = || {
        vec![
            headline(text, 0, 3),
            citation(text, 48, 52, Some("b12")),
            quantity(text, 18, 21, 0),
            quantity(text, 18, 21, 1),
            plain(text, 4, 9),
        ]
    };

    let first = normalize_spans(build(), text);
    let second = normalize_spans(build(), text);
    assert_partition(&first, text);
    assert_eq!(first, second);
}

#[test]
fn test_coverage_with_many_overlapping_candidates() {
    let text = "abcdefghijklmnopqrstuvwxyz";
    let candidates = vec![
        headline(text, 0, 4),
        plain(text, 4, 10),
        citation(text, 8, 14, Some("b0")),
        quantity(text, 12, 18, 0),
        quantity(text, 12, 18, 1),
        citation(text, 20, 22, None),
        plain(text, 21, 21),
        quantity(text, 24, 25, 2),
    ];

    let spans = normalize_spans(candidates, text);
    assert_partition(&spans, text);
}
