//! Tailored-resume markdown dialect: line classification and inline bold spans.
//!
//! The dialect is small: `#`/`##`/`###` headings, `-`/`*` bullets,
//! `**bold**` spans and `label:` bullets. Every input line classifies to exactly
//! one [`LineKind`]; there is no parse failure, only degraded formatting.

use std::borrow::Cow;

use crate::layout::font_metrics::FontWeight;

const BOLD_MARKER: &str = "**";

// ────────────────────────────────────────────────────────────────────────────
// Line classification
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    H1,
    H2,
    H3,
    Bullet,
    Body,
}

/// One classified `\n`-delimited line.
///
/// For headings `text` is already marker-stripped (and upper-cased for H2).
/// For bullets it is the text after the bullet marker; for bodies the trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub kind: LineKind,
    pub text: Cow<'a, str>,
}

/// Lazily classifies every line of `markdown`. Restartable: clone the iterator or call again.
pub fn parse_lines(markdown: &str) -> impl Iterator<Item = Line<'_>> + Clone + '_ {
    markdown.split('\n').map(classify_line)
}

/// Classifies a single raw line. Priority: `###`, `##`, `#`, bullet, blank, body.
pub fn classify_line(raw: &str) -> Line<'_> {
    let line = raw.trim();

    if let Some(rest) = line.strip_prefix("###") {
        return heading(LineKind::H3, rest);
    }
    if let Some(rest) = line.strip_prefix("##") {
        let mut h2 = heading(LineKind::H2, rest);
        h2.text = Cow::Owned(h2.text.to_uppercase());
        return h2;
    }
    if let Some(rest) = line.strip_prefix('#') {
        return heading(LineKind::H1, rest);
    }
    if let Some(body) = bullet_body(line) {
        return Line {
            kind: LineKind::Bullet,
            text: Cow::Borrowed(body),
        };
    }
    if line.is_empty() {
        return Line {
            kind: LineKind::Blank,
            text: Cow::Borrowed(""),
        };
    }
    Line {
        kind: LineKind::Body,
        text: Cow::Borrowed(line),
    }
}

fn heading(kind: LineKind, rest: &str) -> Line<'_> {
    Line {
        kind,
        text: Cow::Owned(rest.trim_start().replace(BOLD_MARKER, "")),
    }
}

/// `-` or `*` followed by at least one whitespace character.
fn bullet_body(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('*'))?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inline spans
// ────────────────────────────────────────────────────────────────────────────

/// A maximal run of a segment that is either bold or plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineSpan<'a> {
    pub text: &'a str,
    pub weight: FontWeight,
}

impl<'a> InlineSpan<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            weight: FontWeight::Regular,
        }
    }

    pub fn bold(text: &'a str) -> Self {
        Self {
            text,
            weight: FontWeight::Bold,
        }
    }
}

/// Splits a segment into ordered, gap-free bold/plain spans.
///
/// Markers pair up left to right with the nearest closing `**` (non-greedy).
/// An unmatched trailing `**` opens a bold span that runs to the end of the
/// segment. Zero-length spans are dropped.
pub fn split_spans(segment: &str) -> Vec<InlineSpan<'_>> {
    let mut spans = Vec::new();
    let mut rest = segment;

    while let Some(open) = rest.find(BOLD_MARKER) {
        push_span(&mut spans, InlineSpan::plain(&rest[..open]));
        let inner = &rest[open + BOLD_MARKER.len()..];
        match inner.find(BOLD_MARKER) {
            Some(close) => {
                push_span(&mut spans, InlineSpan::bold(&inner[..close]));
                rest = &inner[close + BOLD_MARKER.len()..];
            }
            None => {
                push_span(&mut spans, InlineSpan::bold(inner));
                rest = "";
            }
        }
    }
    push_span(&mut spans, InlineSpan::plain(rest));

    spans
}

fn push_span<'a>(spans: &mut Vec<InlineSpan<'a>>, span: InlineSpan<'a>) {
    if !span.text.is_empty() {
        spans.push(span);
    }
}

/// Splits `text` at its first colon into `(label, content)` when the label is non-empty.
///
/// The label keeps its colon; the content is trimmed.
pub fn split_label(text: &str) -> Option<(&str, &str)> {
    match text.find(':') {
        Some(colon) if colon > 0 => Some((&text[..=colon], text[colon + 1..].trim())),
        _ => None,
    }
}

pub fn has_bold_marker(text: &str) -> bool {
    text.contains(BOLD_MARKER)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
