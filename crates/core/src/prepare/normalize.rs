//! Span normalization - merges overlapping candidate spans into an ordered,
//! gapless, non-overlapping partition of the text.
//!
//! Candidates arrive unordered from three producers (headline segmenter,
//! reference collector, statement assembler) and may overlap, repeat a range
//! exactly, or be zero-length. The output partition is the contract surface
//! every renderer reads: strictly ordered by start offset, adjacent spans
//! share boundaries, and the concatenation of all span texts reproduces the
//! input text exactly.

use crate::model::span::TextSpan;

/// Normalizes candidate spans into a partition of `text`.
///
/// Tag handling on merges:
/// - zero-length candidates are dropped and never split against;
/// - candidates with identical ranges collapse into one span: the reference
///   tag is adopted from the other span if absent, and a collapsed-away
///   annotation anchor's statement index is folded into the survivor's
///   `indices` list;
/// - reference- or anchor-tagged spans inside a headline's range inherit the
///   headline flag so they keep headline typography;
/// - on overlap the non-overlapping prefix of the earlier span is emitted
///   with its own tags, a fully contained span is emitted as-is, and the
///   remainder of the containing span continues the sweep.
///
/// Ranges are assumed to lie inside `text` on character boundaries; see
/// [`Paper::validate`](crate::model::paper::Paper::validate).
pub fn normalize_spans(mut candidates: Vec<TextSpan>, text: &str) -> Vec<TextSpan> {
    // Sort descending so the sweep consumes candidates in ascending document
    // order by popping from the tail. The sort is stable, which pins the
    // merge order of identical ranges to reverse insertion order.
    candidates.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut partition: Vec<TextSpan> = Vec::with_capacity(candidates.len() * 2);
    let mut pending_indices: Vec<usize> = Vec::new();

    // First non-degenerate candidate; without one the whole text is filler.
    let mut current = loop {
        match candidates.pop() {
            Some(span) if span.is_degenerate() => continue,
            Some(span) => break span,
            None => {
                if !text.is_empty() {
                    partition.push(TextSpan::plain(text.to_string(), 0, text.len()));
                }
                return partition;
            }
        }
    };

    if current.start > 0 {
        partition.push(TextSpan::plain(
            text[..current.start].to_string(),
            0,
            current.start,
        ));
    }

    while let Some(mut next) = candidates.pop() {
        if next.is_degenerate() {
            continue;
        }

        if next.start == current.start && next.end == current.end {
            // Exact range match: collapse before emission. The later span
            // survives with its own tags, adopting the earlier reference tag
            // only if it has none; an earlier anchor is remembered through
            // the pending index list instead of producing a duplicate span.
            if next.reference.is_none() {
                next.reference = current.reference.take();
            }
            if let Some(anchor) = &current.annotation {
                pending_indices.push(anchor.index);
            }
            current = next;
            continue;
        }

        // A reference or anchored quantity inside a headline keeps headline
        // typography through its own emission rather than nesting.
        if next.annotation.is_some() || next.reference.is_some() {
            next.is_headline = current.is_headline;
        }

        if current.end >= next.start {
            // Overlap or containment: emit the non-overlapping prefix of
            // `current` with its tags and any accumulated indices.
            fold_secondary_anchor(&current, &mut pending_indices);
            if current.start < next.start {
                partition.push(TextSpan {
                    text: text[current.start..next.start].to_string(),
                    start: current.start,
                    end: next.start,
                    is_headline: current.is_headline,
                    indices: std::mem::take(&mut pending_indices),
                    annotation: current.annotation,
                    reference: current.reference.clone(),
                });
            }
            if current.end >= next.end {
                // `current` swallows `next`: emit it, then resume the sweep
                // with the remainder of `current`.
                fold_secondary_anchor(&next, &mut pending_indices);
                next.indices = std::mem::take(&mut pending_indices);
                let resume_at = next.end;
                partition.push(next);
                current.text = text[resume_at..current.end].to_string();
                current.start = resume_at;
            } else {
                current = next;
            }
        } else {
            // No overlap: emit `current`, fill the gap, move on. A remainder
            // that shrank to zero length contributes nothing and is dropped;
            // its pending indices carry over to the next emission.
            fold_secondary_anchor(&current, &mut pending_indices);
            let gap_start = current.end;
            if !current.is_degenerate() {
                current.indices = std::mem::take(&mut pending_indices);
                partition.push(current);
            }
            if gap_start < next.start {
                partition.push(TextSpan::plain(
                    text[gap_start..next.start].to_string(),
                    gap_start,
                    next.start,
                ));
            }
            current = next;
        }
    }

    // Queue exhausted: emit the final span and pad out to end-of-text.
    fold_secondary_anchor(&current, &mut pending_indices);
    let tail_start = current.end;
    if !current.is_degenerate() {
        current.indices = std::mem::take(&mut pending_indices);
        partition.push(current);
    }
    if tail_start < text.len() {
        partition.push(TextSpan::plain(
            text[tail_start..].to_string(),
            tail_start,
            text.len(),
        ));
    }

    partition
}

/// Records a non-primary anchor's statement index before its span is emitted
/// or split. The quantity anchor itself stays visible and is never folded.
fn fold_secondary_anchor(span: &TextSpan, pending: &mut Vec<usize>) {
    if let Some(anchor) = &span.annotation {
        if !anchor.is_quantity {
            pending.push(anchor.index);
        }
    }
}
