//! lopdf plumbing: serialize a laid-out [`Document`], and probe page size from an uploaded PDF.
//!
//! Output layout: one `Pages` node carrying the shared `MediaBox` and font
//! resources, one content stream per page. Fonts are the standard Type1 faces
//! with WinAnsi encoding, so nothing is embedded. No `Info` dictionary or file
//! `ID` is written and streams are left uncompressed, which keeps the bytes a
//! pure function of the layout.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream, StringFormat};

use crate::layout::font_metrics::encode_win_ansi;
use crate::layout::{Document, FontFamily, FontWeight, PageSize, TextRun};
use crate::render::RenderError;

const PDF_VERSION: &str = "1.5";

/// Guards `Parent` walks against cyclic page trees.
const MAX_TREE_DEPTH: usize = 32;

fn font_key(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Regular => "F1",
        FontWeight::Bold => "F2",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Writer
// ────────────────────────────────────────────────────────────────────────────

/// Serializes every page of `doc` into a standalone PDF.
pub fn write_pdf(doc: &Document) -> Result<Vec<u8>, RenderError> {
    let mut pdf = lopdf::Document::with_version(PDF_VERSION);
    let pages_id = pdf.new_object_id();

    let regular_id = pdf.add_object(font_dictionary(doc.family, FontWeight::Regular));
    let bold_id = pdf.add_object(font_dictionary(doc.family, FontWeight::Bold));
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            font_key(FontWeight::Regular) => regular_id,
            font_key(FontWeight::Bold) => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(doc.pages().len());
    for page in doc.pages() {
        let content = page_content(&page.runs)
            .encode()
            .map_err(|e| RenderError::Serialization(format!("content stream: {e}")))?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(doc.size.width),
            Object::Real(doc.size.height),
        ],
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)
        .map_err(|e| RenderError::Serialization(format!("write PDF: {e}")))?;
    Ok(bytes)
}

fn font_dictionary(family: FontFamily, weight: FontWeight) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => family.base_font(weight),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// One text object per page. `Tf` is only re-emitted when weight or size changes.
fn page_content(runs: &[TextRun]) -> Content {
    let mut operations = Vec::with_capacity(runs.len() * 3 + 2);
    operations.push(Operation::new("BT", vec![]));

    let mut current: Option<(FontWeight, f32)> = None;
    for run in runs {
        if current != Some((run.weight, run.size)) {
            operations.push(Operation::new(
                "Tf",
                vec![font_key(run.weight).into(), Object::Real(run.size)],
            ));
            current = Some((run.weight, run.size));
        }
        operations.push(Operation::new(
            "Tm",
            vec![
                Object::Integer(1),
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(1),
                Object::Real(run.x),
                Object::Real(run.y),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&run.text),
                StringFormat::Literal,
            )],
        ));
    }

    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

// ────────────────────────────────────────────────────────────────────────────
// Page-size probe
// ────────────────────────────────────────────────────────────────────────────

/// Reads the first page's `MediaBox` (inherited through `Parent` if needed).
///
/// Width and height are the box extents, so a box with a non-zero origin still
/// yields its true size.
pub fn original_page_size(bytes: &[u8]) -> Result<PageSize, RenderError> {
    let pdf = lopdf::Document::load_mem(bytes)
        .map_err(|e| RenderError::InputDocument(format!("failed to parse PDF: {e}")))?;

    let first_page = pdf
        .get_pages()
        .into_values()
        .next()
        .ok_or_else(|| RenderError::InputDocument("PDF has no pages".to_string()))?;

    let [llx, lly, urx, ury] = inherited_media_box(&pdf, first_page)?;
    PageSize::new((urx - llx).abs(), (ury - lly).abs())
}

fn inherited_media_box(pdf: &lopdf::Document, page_id: ObjectId) -> Result<[f32; 4], RenderError> {
    let mut node = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = pdf
            .get_dictionary(node)
            .map_err(|e| RenderError::InputDocument(format!("page tree node {node:?}: {e}")))?;

        if let Ok(media_box) = dict.get(b"MediaBox") {
            return media_box_values(pdf, media_box);
        }

        node = dict
            .get(b"Parent")
            .and_then(Object::as_reference)
            .map_err(|_| RenderError::InputDocument("first page has no MediaBox".to_string()))?;
    }
    Err(RenderError::InputDocument(
        "page tree too deep while resolving MediaBox".to_string(),
    ))
}

fn media_box_values(pdf: &lopdf::Document, media_box: &Object) -> Result<[f32; 4], RenderError> {
    let invalid = |detail: &str| RenderError::InputDocument(format!("invalid MediaBox: {detail}"));

    let (_, resolved) = pdf
        .dereference(media_box)
        .map_err(|e| invalid(&e.to_string()))?;
    let array = resolved.as_array().map_err(|_| invalid("not an array"))?;
    if array.len() != 4 {
        return Err(invalid(&format!("expected 4 numbers, got {}", array.len())));
    }

    let mut values = [0.0f32; 4];
    for (slot, item) in values.iter_mut().zip(array) {
        let (_, number) = pdf.dereference(item).map_err(|e| invalid(&e.to_string()))?;
        *slot = number.as_float().map_err(|_| invalid("non-numeric entry"))?;
    }
    Ok(values)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
