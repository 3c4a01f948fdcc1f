//! Word-wrap and page-break primitive shared by every line kind.
//!
//! Greedy wrap, one token at a time: a token goes on the current visual line if it
//! fits before the right boundary (gap included), or if the line is still empty:
//! an over-wide token is placed whole rather than split. Otherwise the cursor drops
//! one line height back to the line's left boundary, opening a new page first when
//! that would cross the bottom limit.
//!
//! The cursor is a plain value threaded through calls; the only side effects are
//! appending pages and runs to the [`Document`].

use crate::layout::document::{Document, LayoutConfig, PageSize, TextRun};
use crate::layout::font_metrics::FontWeight;
use crate::layout::markdown::InlineSpan;

// ────────────────────────────────────────────────────────────────────────────
// Frame + cursor
// ────────────────────────────────────────────────────────────────────────────

/// Usable area of a page, derived once per render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Left text edge (x₀ for unindented content).
    pub left: f32,
    /// Right text edge (x_max).
    pub right: f32,
    /// Baseline of the first line on a fresh page.
    pub top: f32,
    /// Lowest baseline content may sit on.
    pub floor: f32,
}

impl Frame {
    pub fn new(size: PageSize, config: &LayoutConfig) -> Self {
        Self {
            left: config.margin,
            right: size.width - config.margin,
            top: size.height - config.top_margin,
            floor: config.margin + config.line_height,
        }
    }
}

/// Transient layout position: target page index plus the current baseline point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub x: f32,
    pub y: f32,
}

impl Cursor {
    /// The cursor moved down by `dy` without any page-break check.
    pub fn down(self, dy: f32) -> Self {
        Self {
            y: self.y - dy,
            ..self
        }
    }

    pub fn at_x(self, x: f32) -> Self {
        Self { x, ..self }
    }
}

/// True when a baseline at `y` would sit below the frame's floor.
pub fn needs_page_break(y: f32, frame: &Frame) -> bool {
    y < frame.floor
}

/// Appends a page and returns a cursor at its top-left text position.
pub fn open_page(doc: &mut Document, frame: &Frame) -> Cursor {
    let page = doc.add_page();
    Cursor {
        page,
        x: frame.left,
        y: frame.top,
    }
}

/// Moves to a fresh page if the cursor's baseline is below the floor; `x` is kept.
pub fn ensure_room(doc: &mut Document, cursor: Cursor, frame: &Frame) -> Cursor {
    if needs_page_break(cursor.y, frame) {
        open_page(doc, frame).at_x(cursor.x)
    } else {
        cursor
    }
}

/// Places one run at the cursor without moving it.
pub fn place_run(doc: &mut Document, cursor: Cursor, text: &str, weight: FontWeight, size: f32) {
    doc.place(
        cursor.page,
        TextRun {
            text: text.to_string(),
            x: cursor.x,
            y: cursor.y,
            weight,
            size,
        },
    );
}

// ────────────────────────────────────────────────────────────────────────────
// Tokens
// ────────────────────────────────────────────────────────────────────────────

/// One unbreakable word with its own style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub weight: FontWeight,
    pub size: f32,
    /// Whether the source had whitespace before this word. Glued words
    /// (`**bold**suffix`) get no gap.
    pub space_before: bool,
}

/// Splits spans into word tokens, remembering where the source had whitespace.
///
/// Runs of whitespace collapse to a single gap; a span boundary with no
/// whitespace on either side produces a glued token.
pub fn word_tokens<'a>(spans: &[InlineSpan<'a>], size: f32) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut pending_space = false;

    for span in spans {
        let mut rest = span.text;
        loop {
            let trimmed = rest.trim_start();
            if trimmed.len() != rest.len() {
                pending_space = true;
            }
            if trimmed.is_empty() {
                break;
            }
            let end = trimmed
                .find(char::is_whitespace)
                .unwrap_or(trimmed.len());
            tokens.push(Token {
                text: &trimmed[..end],
                weight: span.weight,
                size,
                space_before: pending_space,
            });
            pending_space = false;
            rest = &trimmed[end..];
        }
    }

    tokens
}

// ────────────────────────────────────────────────────────────────────────────
// Flow
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `tokens` left to right from `cursor`, wrapping back to `line_start`.
///
/// Returns the cursor just past the last placed token, on the baseline of the
/// last visual line. Gaps are one regular-weight space at the token's size and
/// never appear at the start of a visual line.
pub fn flow_tokens(
    doc: &mut Document,
    mut cursor: Cursor,
    tokens: &[Token<'_>],
    line_start: f32,
    frame: &Frame,
    line_height: f32,
) -> Cursor {
    let family = doc.family;
    let mut line_empty = cursor.x <= line_start;

    for token in tokens {
        let width = family.metrics(token.weight).measure_str(token.text, token.size);
        let mut gap = if line_empty || !token.space_before {
            0.0
        } else {
            family.metrics(FontWeight::Regular).space_width(token.size)
        };

        if !line_empty && cursor.x + gap + width > frame.right {
            cursor = next_line(doc, cursor, line_start, frame, line_height);
            gap = 0.0;
        }

        cursor.x += gap;
        place_run(doc, cursor, token.text, token.weight, token.size);
        cursor.x += width;
        line_empty = false;
    }

    cursor
}

/// Starts a new visual line, breaking to a new page when it would cross the floor.
fn next_line(
    doc: &mut Document,
    cursor: Cursor,
    line_start: f32,
    frame: &Frame,
    line_height: f32,
) -> Cursor {
    let next = cursor.down(line_height).at_x(line_start);
    if needs_page_break(next.y, frame) {
        open_page(doc, frame).at_x(line_start)
    } else {
        next
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
