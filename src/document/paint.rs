//! Fill boxes over redacted regions.
//!
//! MuPDF removes the content under a redaction but leaves the area blank.
//! After the document is saved, each redacted page gets one extra content
//! stream that paints the regions in their fill colour. The existing page
//! content is wrapped in `q`/`Q` so the boxes are drawn in default user
//! space whatever graphics state the page leaves behind.

use super::{RedactionRegion, Transform};
use crate::error::{MaskerError, MaskerResult};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, Stream};
use std::path::Path;

/// Regions applied to one page, with the mapping back to PDF user space.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PageFills {
    /// 0-based page index
    pub page: usize,
    /// Page coordinates (top-left origin) to PDF user space
    pub to_user_space: Transform,
    pub regions: Vec<RedactionRegion>,
}

impl PageFills {
    /// `re`/`f` operations painting every region in its fill colour.
    pub fn operations(&self) -> Vec<Operation> {
        let mut ops = Vec::with_capacity(self.regions.len() * 3 + 2);
        ops.push(Operation::new("q", vec![]));

        for region in &self.regions {
            let rect = self.to_user_space.map_rect(&region.rect);
            let [r, g, b] = region.fill.rgb();

            ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
            ops.push(Operation::new(
                "re",
                vec![
                    rect.x0.into(),
                    rect.y0.into(),
                    rect.width().into(),
                    rect.height().into(),
                ],
            ));
            ops.push(Operation::new("f", vec![]));
        }

        ops.push(Operation::new("Q", vec![]));
        ops
    }
}

/// Paints `fills` into the PDF at `path`, rewriting it in place.
///
/// Errors are reported against `output`, the file the caller is producing.
pub(crate) fn paint_fills(path: &Path, output: &Path, fills: &[PageFills]) -> MaskerResult<()> {
    let write_error = |reason: String| MaskerError::OutputWrite {
        path: output.to_path_buf(),
        reason,
    };

    let mut doc = lopdf::Document::load(path)
        .map_err(|e| write_error(format!("Failed to reload redacted PDF: {}", e)))?;
    let pages = doc.get_pages();

    for fill in fills.iter().filter(|f| !f.regions.is_empty()) {
        let page_id = u32::try_from(fill.page + 1)
            .ok()
            .and_then(|number| pages.get(&number).copied())
            .ok_or_else(|| write_error(format!("Page {} not found", fill.page + 1)))?;

        // Restore the default graphics state before painting
        let mut boxes = vec![Operation::new("Q", vec![])];
        boxes.extend(fill.operations());
        let encoded = Content { operations: boxes }
            .encode()
            .map_err(|e| write_error(e.to_string()))?;

        let mut painted = b"\n".to_vec();
        painted.extend(encoded);

        let mut contents: Vec<Object> = doc
            .get_page_contents(page_id)
            .into_iter()
            .map(Object::Reference)
            .collect();

        let save_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        let paint_id = doc.add_object(Stream::new(Dictionary::new(), painted));
        contents.insert(0, Object::Reference(save_id));
        contents.push(Object::Reference(paint_id));

        doc.get_dictionary_mut(page_id)
            .map_err(|e| write_error(e.to_string()))?
            .set("Contents", contents);
    }

    doc.save(path)
        .map_err(|e| write_error(format!("Failed to write fills: {}", e)))?;
    Ok(())
}
