//! Shared helpers for the integration tests.
//!
//! Fixture PDFs are built in memory with `lopdf`, so no binary fixtures need
//! to be checked in.

#![allow(dead_code)]

use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use pdfmerge::merge::PdfDocument;
use std::path::{Path, PathBuf};

/// Page height of every fixture page.
pub const PAGE_HEIGHT: i64 = 500;

/// Build a document with one page per width, each page carrying a label.
pub fn pdf_with_widths(widths: &[i64]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = add_font(&mut doc);

    let kids: Vec<Object> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            add_page(
                &mut doc,
                pages_id,
                font_id,
                Some(*width),
                &format!("page {} of {}", i + 1, widths.len()),
            )
            .into()
        })
        .collect();

    finish(doc, pages_id, kids, dictionary! {})
}

/// Build a document whose pages take their `MediaBox` from the page tree.
pub fn pdf_with_inherited_media_box(width: i64, height: i64, pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let font_id = add_font(&mut doc);

    let kids: Vec<Object> = (0..pages)
        .map(|i| add_page(&mut doc, pages_id, font_id, None, &format!("inherited {i}")).into())
        .collect();

    finish(
        doc,
        pages_id,
        kids,
        dictionary! {
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
        },
    )
}

/// Write `bytes` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}

/// Write a fixture PDF with the given page widths to `dir/name`.
pub fn write_pdf(dir: &Path, name: &str, widths: &[i64]) -> PathBuf {
    write_file(dir, name, &pdf_with_widths(widths))
}

/// Page widths of an encoded document, in order.
pub fn page_widths(bytes: &[u8]) -> Vec<f32> {
    page_sizes(bytes).into_iter().map(|(w, _)| w).collect()
}

/// Page sizes of an encoded document, in order.
pub fn page_sizes(bytes: &[u8]) -> Vec<(f32, f32)> {
    let doc = PdfDocument::load(bytes).expect("document decodes");
    doc.page_indices()
        .into_iter()
        .map(|i| {
            let size = doc.page_size(i).expect("page has a MediaBox");
            (size.width, size.height)
        })
        .collect()
}

/// Decoded content of every page, in order.
pub fn page_contents(bytes: &[u8]) -> Vec<Vec<u8>> {
    let doc = Document::load_mem(bytes).expect("document decodes");
    doc.get_pages()
        .into_values()
        .map(|page_id| doc.get_page_content(page_id).expect("page has content"))
        .collect()
}

/// `BaseFont` of the `/F1` resource of every page, in order.
pub fn page_fonts(bytes: &[u8]) -> Vec<Vec<u8>> {
    let doc = Document::load_mem(bytes).expect("document decodes");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let fonts = doc.get_page_fonts(page_id).expect("page resources");
            let font = fonts.get(b"F1".as_slice()).expect("page uses /F1");
            font.get(b"BaseFont")
                .and_then(Object::as_name)
                .expect("font has a BaseFont")
                .to_vec()
        })
        .collect()
}

/// Assert two widths are equal within rounding.
pub fn assert_widths(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len(), "page count: {actual:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 0.5, "width {a} != {e} in {actual:?}");
    }
}

fn add_font(doc: &mut Document) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    })
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    width: Option<i64>,
    label: &str,
) -> ObjectId {
    let content = format!("BT /F1 18 Tf 20 20 Td ({label}) Tj ET");
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let mut page = dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
    };
    if let Some(width) = width {
        page.set(
            "MediaBox",
            vec![0.into(), 0.into(), width.into(), PAGE_HEIGHT.into()],
        );
    }

    doc.add_object(page)
}

fn finish(
    mut doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    extra: lopdf::Dictionary,
) -> Vec<u8> {
    let count = kids.len() as i64;
    let mut pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
    };
    for (key, value) in extra.iter() {
        pages.set(key.clone(), value.clone());
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("fixture serializes");
    bytes
}
