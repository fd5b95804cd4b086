//! Custom assertions for PDF masking tests.

use anyhow::Result;
use std::path::Path;

/// Extracts text from a PDF, returning an error instead of panicking.
pub fn extract_text(pdf_path: &Path) -> Result<String> {
    pii_masker::extract_text(pdf_path).map_err(|e| anyhow::anyhow!("Failed to extract text: {}", e))
}

/// Asserts that a string no longer appears in the PDF text.
///
/// # Panics
/// Panics if the pattern is still found in the PDF text.
pub fn assert_redacted(pdf_path: &Path, pattern: &str) {
    let text = extract_text_or_panic(pdf_path);
    assert!(
        !text.contains(pattern),
        "Pattern '{}' should be redacted but was found in output PDF at '{}'",
        pattern,
        pdf_path.display()
    );
}

/// Asserts that a string survived masking.
///
/// # Panics
/// Panics if the pattern is not found in the PDF.
pub fn assert_preserved(pdf_path: &Path, pattern: &str) {
    let text = extract_text_or_panic(pdf_path);
    assert!(
        text.contains(pattern),
        "Pattern '{}' should be preserved but was not found in PDF at '{}'",
        pattern,
        pdf_path.display()
    );
}

/// Asserts that a PDF exists and loads.
///
/// # Panics
/// Panics if the PDF is missing, empty or structurally broken.
pub fn assert_valid_pdf(pdf_path: &Path) {
    assert!(
        pdf_path.exists(),
        "PDF should exist at '{}'",
        pdf_path.display()
    );
    let metadata = std::fs::metadata(pdf_path).expect("Failed to get PDF metadata");
    assert!(metadata.len() > 0, "PDF should not be empty");
    assert!(
        is_valid_pdf(pdf_path),
        "PDF at '{}' should load",
        pdf_path.display()
    );
}

/// Validates that a PDF is loadable and has basic structure.
pub fn is_valid_pdf(pdf_path: &Path) -> bool {
    ::lopdf::Document::load(pdf_path).is_ok()
}

/// Number of pages according to lopdf.
pub fn page_count(pdf_path: &Path) -> Result<usize> {
    Ok(::lopdf::Document::load(pdf_path)?.get_pages().len())
}

/// A filled rectangle painted on a page: colour and `re` operands in PDF
/// user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillBox {
    pub rgb: [f32; 3],
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FillBox {
    pub fn is_black(&self) -> bool {
        self.rgb == [0.0, 0.0, 0.0]
    }

    pub fn is_white(&self) -> bool {
        self.rgb == [1.0, 1.0, 1.0]
    }

    /// Whether this box matches `[x y w h]` within `tolerance` points.
    pub fn matches(&self, rect: [f32; 4], tolerance: f32) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .zip(rect.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    pub fn contains_y(&self, y: f32) -> bool {
        self.y <= y && y <= self.y + self.height
    }
}

/// Every `rg` + `re` + `f` box painted on the page, in content order.
pub fn fill_boxes(pdf_path: &Path, page_number: u32) -> Result<Vec<FillBox>> {
    let doc = ::lopdf::Document::load(pdf_path)?;
    let page_id = *doc
        .get_pages()
        .get(&page_number)
        .ok_or_else(|| anyhow::anyhow!("Page {} not found", page_number))?;
    let content = doc.get_and_decode_page_content(page_id)?;

    let numbers = |op: &::lopdf::content::Operation| -> Vec<f32> {
        op.operands.iter().filter_map(|o| o.as_float().ok()).collect()
    };

    let mut boxes = Vec::new();
    let mut rgb = [0.0, 0.0, 0.0];
    let ops = &content.operations;

    for (idx, op) in ops.iter().enumerate() {
        match op.operator.as_str() {
            "rg" => {
                if let [r, g, b] = numbers(op)[..] {
                    rgb = [r, g, b];
                }
            }
            "re" if ops.get(idx + 1).is_some_and(|next| next.operator == "f") => {
                if let [x, y, width, height] = numbers(op)[..] {
                    boxes.push(FillBox {
                        rgb,
                        x,
                        y,
                        width,
                        height,
                    });
                }
            }
            _ => {}
        }
    }

    Ok(boxes)
}

/// Number of `Do` operations drawing an image XObject, over all pages.
pub fn drawn_images(pdf_path: &Path) -> Result<usize> {
    let doc = ::lopdf::Document::load(pdf_path)?;
    let mut count = 0;

    for page_id in doc.get_pages().into_values() {
        let images = image_names(&doc, page_id);
        let content = doc.get_and_decode_page_content(page_id)?;

        count += content
            .operations
            .iter()
            .filter(|op| op.operator == "Do")
            .filter_map(|op| op.operands.first())
            .filter_map(|name| name.as_name().ok())
            .filter(|name| images.iter().any(|image| image.as_slice() == *name))
            .count();
    }

    Ok(count)
}

fn image_names(doc: &::lopdf::Document, page_id: ::lopdf::ObjectId) -> Vec<Vec<u8>> {
    let (inline, referenced) = doc.get_page_resources(page_id);
    let resources = inline
        .into_iter()
        .chain(referenced.iter().filter_map(|id| doc.get_dictionary(*id).ok()));

    let mut names = Vec::new();
    for dict in resources {
        let Ok(xobjects) = dict
            .get_deref(b"XObject", doc)
            .and_then(::lopdf::Object::as_dict)
        else {
            continue;
        };

        for (name, object) in xobjects.iter() {
            let is_image = doc
                .dereference(object)
                .ok()
                .and_then(|(_, target)| target.as_stream().ok())
                .and_then(|stream| stream.dict.get(b"Subtype").ok())
                .and_then(|subtype| subtype.as_name().ok())
                == Some(b"Image".as_slice());

            if is_image {
                names.push(name.clone());
            }
        }
    }

    names
}

fn extract_text_or_panic(pdf_path: &Path) -> String {
    extract_text(pdf_path).unwrap_or_else(|e| {
        panic!(
            "Failed to extract text from PDF '{}': {}",
            pdf_path.display(),
            e
        )
    })
}
