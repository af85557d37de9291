//! Ranges, tags, and the `TextSpan` unit of the normalized partition.

use serde::Serialize;

/// Half-open byte range into the paper's plain-text body.
///
/// Invariant: `0 <= start <= end <= text.len()`. A range with
/// `start == end` is degenerate, carries no renderable content, and is
/// discarded during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Category of an in-text reference occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Citation,
    Figure,
    Table,
    Equation,
}

impl ReferenceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ReferenceKind::Citation => "citation",
            ReferenceKind::Figure => "figure",
            ReferenceKind::Table => "table",
            ReferenceKind::Equation => "equation",
        }
    }
}

/// Tag attached to spans that cover a reference occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceTag {
    pub kind: ReferenceKind,
    /// Identifier into the paper's bibliography (citations) or object list
    /// (figures, tables, equations), when the source resolved one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Fixed ordered palette of highlight color tokens.
///
/// Statement highlights cycle through the palette by statement ordinal, so
/// the token is independent of the role being highlighted. The palette is
/// plain immutable configuration; callers thread it through the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    tokens: &'static [&'static str],
}

impl Palette {
    pub const DEFAULT_TOKENS: [&'static str; 5] = ["amber", "lime", "sky", "purple", "rose"];

    /// Color token for the statement with the given ordinal.
    pub fn token(&self, index: usize) -> &'static str {
        self.tokens[index % self.tokens.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            tokens: &Self::DEFAULT_TOKENS,
        }
    }
}

/// Anchor tying a highlighted span back to its quantitative statement.
///
/// Only the statement's `quantity` role is injected into normalization, so
/// every anchor reaching the renderer has `is_quantity == true`; the flag is
/// kept on the type because merge bookkeeping distinguishes primary anchors
/// from folded-in secondary ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnnotationAnchor {
    pub is_quantity: bool,
    /// Ordinal of the statement in the paper's extraction list.
    pub index: usize,
    /// Palette token for the highlight.
    pub color: &'static str,
}

/// One segment of the normalized partition.
///
/// `text` is always the exact substring of the paper text covered by
/// `start..end` for filler and headline spans; collector-produced spans carry
/// the annotation's own surface text, which equals the substring for
/// well-formed input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub is_headline: bool,
    /// Statement indices whose roles coincide exactly with this span's range
    /// without being its visible anchor. One highlighted region can open
    /// several statement popovers through this list.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub indices: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<AnnotationAnchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceTag>,
}

impl TextSpan {
    /// Untagged span, used for normal body text and gap filler.
    pub fn plain(text: String, start: usize, end: usize) -> Self {
        Self {
            text,
            start,
            end,
            is_headline: false,
            indices: Vec::new(),
            annotation: None,
            reference: None,
        }
    }

    /// Section-header span.
    pub fn headline(text: String, start: usize, end: usize) -> Self {
        Self {
            is_headline: true,
            ..Self::plain(text, start, end)
        }
    }

    /// Span covering an in-text reference occurrence.
    pub fn reference(text: String, start: usize, end: usize, tag: ReferenceTag) -> Self {
        Self {
            reference: Some(tag),
            ..Self::plain(text, start, end)
        }
    }

    /// Span anchoring a quantitative statement's quantity phrase.
    pub fn quantity(text: String, start: usize, end: usize, anchor: AnnotationAnchor) -> Self {
        Self {
            annotation: Some(anchor),
            ..Self::plain(text, start, end)
        }
    }

    pub const fn range(&self) -> Range {
        Range::new(self.start, self.end)
    }

    pub const fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}
