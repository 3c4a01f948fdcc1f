//! Markdown → paginated layout. Drives the classified lines top to bottom,
//! threading one [`Cursor`] through a per-kind renderer.
//!
//! Headings are single unwrapped bold runs (a too-wide heading overflows the right
//! margin). Bullets and body lines go through [`flow_tokens`].

use crate::layout::document::{Document, LayoutConfig, PageSize};
use crate::layout::flow::{
    ensure_room, flow_tokens, needs_page_break, open_page, place_run, word_tokens, Cursor, Frame,
    Token,
};
use crate::layout::font_metrics::{FontFamily, FontWeight};
use crate::layout::markdown::{
    has_bold_marker, parse_lines, split_label, split_spans, InlineSpan, Line, LineKind,
};

const BULLET_GLYPH: &str = "•";

/// Blank lines nudge the cursor by this fraction of a line height.
const BLANK_LINE_FACTOR: f32 = 0.8;

/// Lays out `markdown` on pages of `size`. Always yields at least one page.
pub fn layout_markdown(
    size: PageSize,
    markdown: &str,
    family: FontFamily,
    config: &LayoutConfig,
) -> Document {
    let frame = Frame::new(size, config);
    let mut doc = Document::new(size, family);
    let mut cursor = open_page(&mut doc, &frame);

    for line in parse_lines(markdown) {
        cursor = render_line(&mut doc, cursor, &line, &frame, config);
    }

    doc
}

fn render_line(
    doc: &mut Document,
    cursor: Cursor,
    line: &Line<'_>,
    frame: &Frame,
    config: &LayoutConfig,
) -> Cursor {
    match line.kind {
        // No page-break check here: the next content line performs its own.
        LineKind::Blank => cursor.down(config.line_height * BLANK_LINE_FACTOR),
        LineKind::H1 | LineKind::H2 | LineKind::H3 => {
            let style = HeadingStyle::for_kind(line.kind, config);
            render_heading(doc, cursor, &line.text, style, frame)
        }
        LineKind::Bullet => render_bullet(doc, cursor, &line.text, frame, config),
        LineKind::Body => render_body(doc, cursor, &line.text, frame, config),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Headings
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
struct HeadingStyle {
    space_before: f32,
    size: f32,
    space_after: f32,
}

impl HeadingStyle {
    fn for_kind(kind: LineKind, config: &LayoutConfig) -> Self {
        let lh = config.line_height;
        match kind {
            LineKind::H1 => Self {
                space_before: config.section_spacing * 1.5,
                size: config.name_size,
                space_after: lh * 2.5,
            },
            LineKind::H2 => Self {
                space_before: config.section_spacing,
                size: config.title_size,
                space_after: lh * 2.2,
            },
            _ => Self {
                space_before: config.subsection_spacing,
                size: config.subtitle_size,
                space_after: lh * 1.8,
            },
        }
    }
}

/// The page-break check runs after the leading space, so the heading itself
/// never lands below the floor. On a fresh page the leading space is kept.
fn render_heading(
    doc: &mut Document,
    cursor: Cursor,
    text: &str,
    style: HeadingStyle,
    frame: &Frame,
) -> Cursor {
    let mut at = cursor.down(style.space_before).at_x(frame.left);
    if needs_page_break(at.y, frame) {
        at = open_page(doc, frame).down(style.space_before);
    }
    if !text.is_empty() {
        place_run(doc, at, text, FontWeight::Bold, style.size);
    }
    at.down(style.space_after)
}

// ────────────────────────────────────────────────────────────────────────────
// Bullets + body
// ────────────────────────────────────────────────────────────────────────────

/// Bullet glyph at the left margin, then the text from the indent.
///
/// Text containing `**` is split into bold/plain spans. Otherwise a `label:`
/// prefix is drawn bold with the rest plain. Otherwise the text is plain.
fn render_bullet(
    doc: &mut Document,
    cursor: Cursor,
    text: &str,
    frame: &Frame,
    config: &LayoutConfig,
) -> Cursor {
    let size = config.body_size;
    let start = ensure_room(doc, cursor.at_x(frame.left), frame);
    place_run(doc, start, BULLET_GLYPH, FontWeight::Regular, size);

    let indent = frame.left + config.bullet_indent;
    let tokens = bullet_tokens(text, size);
    let end = flow_tokens(doc, start.at_x(indent), &tokens, indent, frame, config.line_height);

    end.down(config.line_height).at_x(frame.left)
}

fn bullet_tokens(text: &str, size: f32) -> Vec<Token<'_>> {
    if has_bold_marker(text) {
        return word_tokens(&split_spans(text), size);
    }
    match split_label(text) {
        Some((label, content)) => {
            let mut tokens = vec![Token {
                text: label,
                weight: FontWeight::Bold,
                size,
                space_before: false,
            }];
            let mut rest = word_tokens(&[InlineSpan::plain(content)], size);
            if let Some(first) = rest.first_mut() {
                first.space_before = true;
            }
            tokens.extend(rest);
            tokens
        }
        None => word_tokens(&[InlineSpan::plain(text)], size),
    }
}

/// Same as a bullet's span branch, from the left margin with no glyph.
fn render_body(
    doc: &mut Document,
    cursor: Cursor,
    text: &str,
    frame: &Frame,
    config: &LayoutConfig,
) -> Cursor {
    let start = ensure_room(doc, cursor.at_x(frame.left), frame);
    let tokens = word_tokens(&split_spans(text), config.body_size);
    let end = flow_tokens(doc, start, &tokens, frame.left, frame, config.line_height);

    end.down(config.line_height).at_x(frame.left)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
