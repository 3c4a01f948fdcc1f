//! In-memory layout result: a document of fixed-size pages holding absolutely
//! positioned text runs. Produced by the renderer, consumed by the PDF writer.

use crate::layout::font_metrics::{FontFamily, FontWeight};
use crate::render::RenderError;

// ────────────────────────────────────────────────────────────────────────────
// Geometry
// ────────────────────────────────────────────────────────────────────────────

/// Page dimensions in points. Every page of a document shares one size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US letter, 8.5" × 11".
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    /// Validates that both dimensions are finite and positive.
    pub fn new(width: f32, height: f32) -> Result<Self, RenderError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RenderError::InputDocument(format!(
                "invalid page size {width} x {height}"
            )));
        }
        Ok(Self { width, height })
    }
}

/// Spacing and type-scale constants for the resume layout, all in points.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Left, right and bottom margin.
    pub margin: f32,
    pub top_margin: f32,
    pub line_height: f32,
    /// Space above an H2; H1 uses 1.5× this.
    pub section_spacing: f32,
    /// Space above an H3.
    pub subsection_spacing: f32,
    pub body_size: f32,
    /// H1, the candidate's name.
    pub name_size: f32,
    /// H2, section titles.
    pub title_size: f32,
    /// H3: employers, projects and schools.
    pub subtitle_size: f32,
    /// Offset from the bullet glyph to the bullet's text.
    pub bullet_indent: f32,
}

/// Returns the default resume layout: 50pt margins, 30pt top margin, 10.5pt body on a 12pt grid.
pub fn default_layout_config() -> LayoutConfig {
    LayoutConfig {
        margin: 50.0,
        top_margin: 30.0,
        line_height: 12.0,
        section_spacing: 25.0,
        subsection_spacing: 15.0,
        body_size: 10.5,
        name_size: 20.0,
        title_size: 18.0,
        subtitle_size: 14.0,
        bullet_indent: 10.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document model
// ────────────────────────────────────────────────────────────────────────────

/// A styled string at an absolute baseline position (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub weight: FontWeight,
    pub size: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

/// Ordered pages of one size, plus the typeface whose two weights they use.
#[derive(Debug, Clone)]
pub struct Document {
    pub size: PageSize,
    pub family: FontFamily,
    pages: Vec<Page>,
}

impl Document {
    /// Creates an empty document. Pages are added on demand by the renderer.
    pub fn new(size: PageSize, family: FontFamily) -> Self {
        Self {
            size,
            family,
            pages: Vec::new(),
        }
    }

    /// Appends a blank page and returns its index. Pages are never removed.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Page::default());
        self.pages.len() - 1
    }

    /// Places a run on an existing page.
    ///
    /// # Panics
    /// If `page` was not returned by [`Document::add_page`].
    pub fn place(&mut self, page: usize, run: TextRun) {
        self.pages[page].runs.push(run);
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn run_count(&self) -> usize {
        self.pages.iter().map(|p| p.runs.len()).sum()
    }

    /// All runs in placement order, paired with their page index.
    pub fn runs(&self) -> impl Iterator<Item = (usize, &TextRun)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, p)| p.runs.iter().map(move |r| (i, r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_rejects_non_positive() {
        assert!(PageSize::new(0.0, 792.0).is_err());
        assert!(PageSize::new(612.0, -1.0).is_err());
        assert!(PageSize::new(f32::NAN, 792.0).is_err());
        assert_eq!(PageSize::new(612.0, 792.0).unwrap(), PageSize::LETTER);
    }

    #[test]
    fn test_add_page_returns_sequential_indices() {
        let mut doc = Document::new(PageSize::LETTER, FontFamily::Helvetica);
        assert_eq!(doc.add_page(), 0);
        assert_eq!(doc.add_page(), 1);
        assert_eq!(doc.pages().len(), 2);
    }

    #[test]
    fn test_runs_iterates_in_page_order() {
        let mut doc = Document::new(PageSize::LETTER, FontFamily::Helvetica);
        let first = doc.add_page();
        let second = doc.add_page();
        let run = |text: &str| TextRun {
            text: text.to_string(),
            x: 50.0,
            y: 700.0,
            weight: FontWeight::Regular,
            size: 10.5,
        };
        doc.place(second, run("b"));
        doc.place(first, run("a"));

        let texts: Vec<_> = doc.runs().map(|(p, r)| (p, r.text.as_str())).collect();
        assert_eq!(texts, vec![(0, "a"), (1, "b")]);
        assert_eq!(doc.run_count(), 2);
    }
}
