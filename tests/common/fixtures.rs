//! Test fixtures and PDF builders.
//!
//! Builds small résumé-like PDFs with `printpdf`, one text object per
//! line so MuPDF sees the same line structure a real résumé has. The photo
//! résumé is assembled with `lopdf` so one image object can be drawn at
//! two known positions.

use anyhow::Result;
use printpdf::*;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const TOP_MARGIN_MM: f32 = 270.0;
const LINE_SPACING_MM: f32 = 8.0;
const LEFT_MARGIN_MM: f32 = 20.0;

/// Builder for creating test résumés with custom content.
///
/// # Example
///
/// ```no_run
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// ResumePdfBuilder::new()
///     .with_line("Jane Doe")
///     .with_line("jane.doe@example.com")
///     .new_page()
///     .with_line("Experience")
///     .build(std::path::Path::new("/tmp/resume.pdf"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ResumePdfBuilder {
    title: String,
    pages: Vec<Vec<String>>,
    font_size: f32,
}

impl ResumePdfBuilder {
    pub fn new() -> Self {
        Self {
            title: "Resume".to_string(),
            pages: vec![Vec::new()],
            font_size: 11.0,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Appends a line to the current page.
    pub fn with_line(mut self, line: &str) -> Self {
        if let Some(page) = self.pages.last_mut() {
            page.push(line.to_string());
        }
        self
    }

    pub fn with_lines(self, lines: &[&str]) -> Self {
        lines.iter().fold(self, |builder, line| builder.with_line(line))
    }

    /// Starts a new page; following lines go there.
    pub fn new_page(mut self) -> Self {
        self.pages.push(Vec::new());
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Builds the PDF and writes it to the specified path.
    pub fn build(self, output_path: &Path) -> Result<PathBuf> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(&self.title, Mm(210.0), Mm(297.0), "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        let mut first = Some((first_page, first_layer));

        for (page_idx, lines) in self.pages.iter().enumerate() {
            let (page, layer) = match first.take() {
                Some(indices) => indices,
                None => doc.add_page(Mm(210.0), Mm(297.0), format!("Layer {}", page_idx + 1)),
            };
            let current_layer = doc.get_page(page).get_layer(layer);

            for (line_idx, line) in lines.iter().enumerate() {
                let y = TOP_MARGIN_MM - LINE_SPACING_MM * line_idx as f32;
                current_layer.use_text(
                    line.as_str(),
                    self.font_size,
                    Mm(LEFT_MARGIN_MM),
                    Mm(y),
                    &font,
                );
            }
        }

        doc.save(&mut BufWriter::new(fs::File::create(output_path)?))?;
        Ok(output_path.to_path_buf())
    }
}

impl Default for ResumePdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A one-page résumé carrying an email and a phone number.
pub fn create_contact_resume(path: &Path) -> Result<PathBuf> {
    ResumePdfBuilder::new()
        .with_title("Jane Doe - Resume")
        .with_lines(&[
            "Jane Doe",
            "Senior Software Engineer",
            "jane.doe@example.com",
            "(555) 234-5678",
            "Experience",
            "Built distributed storage systems in Rust",
        ])
        .build(path)
}

/// A résumé with no contact information at all.
pub fn create_clean_resume(path: &Path) -> Result<PathBuf> {
    ResumePdfBuilder::new()
        .with_title("Anonymous Resume")
        .with_lines(&[
            "Senior Software Engineer",
            "Experience",
            "Built distributed storage systems in Rust",
            "Education",
            "BSc Computer Science",
        ])
        .build(path)
}

/// Page size of the photo résumé, in points.
pub const PHOTO_PAGE_SIZE: (f32, f32) = (595.0, 842.0);

/// Side of each square photo placement, in points.
pub const PHOTO_SIZE: f32 = 80.0;

/// Lower-left corners (PDF user space) where the photo is drawn.
pub const PHOTO_PLACEMENTS: [(f32, f32); 2] = [(400.0, 700.0), (400.0, 500.0)];

/// A one-page résumé whose single photo is placed twice, plus a name and
/// an email line.
pub fn create_photo_resume(path: &Path) -> Result<PathBuf> {
    use ::lopdf::content::{Content, Operation};
    use ::lopdf::{dictionary, Object, Stream};

    let mut doc = ::lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    // 2x2 RGB photo
    let pixels = vec![
        200, 40, 40, 40, 200, 40, //
        40, 40, 200, 200, 200, 40,
    ];
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => 2,
            "Height" => 2,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        pixels,
    ));

    let mut operations = Vec::new();
    for (text, y) in [("Jane Doe", 760), ("jane.doe@example.com", 740)] {
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 11.into()]),
            Operation::new("Td", vec![72.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]);
    }
    for (x, y) in PHOTO_PLACEMENTS {
        operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    PHOTO_SIZE.into(),
                    0.into(),
                    0.into(),
                    PHOTO_SIZE.into(),
                    x.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec!["Im1".into()]),
            Operation::new("Q", vec![]),
        ]);
    }

    let content = Content { operations }.encode()?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
            "XObject" => dictionary! { "Im1" => image_id },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                PHOTO_PAGE_SIZE.0.into(),
                PHOTO_PAGE_SIZE.1.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path)?;
    Ok(path.to_path_buf())
}

/// Writes bytes that are not a PDF.
pub fn create_corrupt_pdf(path: &Path) -> Result<PathBuf> {
    fs::write(path, b"This is not a PDF file at all")?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builder_pages() {
        let builder = ResumePdfBuilder::new()
            .with_line("a")
            .new_page()
            .with_line("b");
        assert_eq!(builder.page_count(), 2);
    }

    #[test]
    fn test_create_photo_resume_draws_twice() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let pdf_path = temp_dir.path().join("photo.pdf");
        create_photo_resume(&pdf_path)?;

        assert_eq!(crate::common::drawn_images(&pdf_path)?, 2);
        Ok(())
    }

    #[test]
    fn test_create_contact_resume() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let pdf_path = temp_dir.path().join("resume.pdf");
        create_contact_resume(&pdf_path)?;
        assert!(pdf_path.exists());
        Ok(())
    }
}
