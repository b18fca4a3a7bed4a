//! Built-in PDF backend.
//!
//! Produces an A4 document: a cover page with the report title and author,
//! then one page (or more, when text overflows) per section. Page header
//! and footer texts are repeated on every page. Image slots are listed by
//! reference; images are not embedded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::html::{parameter, slot_value};
use super::DocumentBackend;
use crate::config::TEXT_WRAP_WIDTH;
use crate::datasource::{report_parameters, FieldFamily, ReportDataSource};
use crate::error::{Result, TranslatorError};
use crate::template::ReportTemplate;
use crate::types::{is_blank, OutputFormat, Report};

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: f32 = 56.0;
const BODY_TOP: f32 = 770.0;
const BODY_BOTTOM: f32 = 72.0;
const HEADER_Y: f32 = 810.0;
const FOOTER_Y: f32 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

/// A line of text placed on a page.
#[derive(Debug, Clone, PartialEq)]
struct PlacedLine {
    font: Font,
    size: i64,
    y: f32,
    text: String,
}

/// Fills pages top to bottom, starting a new page on overflow.
#[derive(Debug)]
struct PageBuilder {
    pages: Vec<Vec<PlacedLine>>,
    y: f32,
}

impl PageBuilder {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: BODY_TOP,
        }
    }

    fn break_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = BODY_TOP;
    }

    fn push(&mut self, font: Font, size: i64, text: impl Into<String>) {
        let leading = size as f32 + 4.0;
        if self.y - leading < BODY_BOTTOM {
            self.pages.push(Vec::new());
            self.y = BODY_TOP;
        }
        self.y -= leading;

        let line = PlacedLine {
            font,
            size,
            y: self.y,
            text: text.into(),
        };
        if let Some(page) = self.pages.last_mut() {
            page.push(line);
        }
    }

    fn push_wrapped(&mut self, font: Font, size: i64, text: &str, width: usize) {
        for line in textwrap::wrap(text, width.max(1)) {
            self.push(font, size, line.into_owned());
        }
    }

    fn gap(&mut self, amount: f32) {
        self.y -= amount;
    }

    fn finish(self) -> Vec<Vec<PlacedLine>> {
        self.pages
    }
}

/// Renders a report as a PDF document.
#[derive(Debug, Clone, Copy)]
pub struct PdfBackend {
    wrap_width: usize,
}

impl PdfBackend {
    /// Create a backend wrapping body text at `wrap_width` characters.
    #[must_use]
    pub fn new(wrap_width: usize) -> Self {
        Self {
            wrap_width: wrap_width.max(1),
        }
    }
}

impl Default for PdfBackend {
    fn default() -> Self {
        Self::new(TEXT_WRAP_WIDTH)
    }
}

impl DocumentBackend for PdfBackend {
    fn name(&self) -> &str {
        "pdf"
    }

    fn render(
        &self,
        report: &Report,
        _template: &ReportTemplate,
        format: OutputFormat,
    ) -> Result<Vec<u8>> {
        if format != OutputFormat::Pdf {
            return Err(TranslatorError::Backend {
                format: format.to_string(),
                message: "the PDF backend only renders pdf".to_string(),
            });
        }

        let pages = self.layout(report)?;
        let params = report_parameters(report);
        write_pdf(
            &pages,
            parameter(&params, "title"),
            parameter(&params, "user"),
            parameter(&params, "pageHeader"),
            parameter(&params, "pageFooter"),
        )
    }
}

impl PdfBackend {
    /// Lay out the cover page and the section pages.
    fn layout(&self, report: &Report) -> Result<Vec<Vec<PlacedLine>>> {
        let params = report_parameters(report);
        let mut builder = PageBuilder::new();

        let title = parameter(&params, "title");
        if !is_blank(title) {
            builder.push_wrapped(Font::Bold, 20, title.trim(), self.wrap_width / 2);
            builder.gap(12.0);
        }
        builder.push(Font::Regular, 12, parameter(&params, "user").trim());
        builder.push(Font::Regular, 12, parameter(&params, "email"));

        let mut source = ReportDataSource::new(report);
        while source.next() {
            builder.break_page();
            for slot in 0..report.max_slots {
                self.layout_slot(&mut builder, &source, slot)?;
            }
        }

        Ok(builder.finish())
    }

    fn layout_slot(
        &self,
        builder: &mut PageBuilder,
        source: &ReportDataSource<'_>,
        slot: usize,
    ) -> Result<()> {
        if let Some(title) = slot_value(source, FieldFamily::Title, slot)? {
            builder.push_wrapped(Font::Bold, 14, title, self.wrap_width * 3 / 4);
        }
        if let Some(drill) = slot_value(source, FieldFamily::DrillParameters, slot)? {
            builder.push_wrapped(Font::Regular, 10, drill, self.wrap_width);
        }
        if let Some(image) = slot_value(source, FieldFamily::Image, slot)? {
            builder.push(Font::Regular, 10, format!("Image: {image}"));
        }
        if let Some(description) = slot_value(source, FieldFamily::Description, slot)? {
            builder.push_wrapped(Font::Regular, 11, description, self.wrap_width);
        }
        builder.gap(16.0);
        Ok(())
    }
}

/// Encode text for a standard Type1 font; unsupported characters become `?`.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            u8::try_from(u32::from(c))
                .ok()
                .filter(|b| *b >= 0x20 && *b != 0x7f)
                .unwrap_or(b'?')
        })
        .collect()
}

fn text_operations(font: Font, size: i64, x: f32, y: f32, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
        ),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(encode_text(text))]),
        Operation::new("ET", vec![]),
    ]
}

/// Assemble the PDF document from laid out pages.
fn write_pdf(
    pages: &[Vec<PlacedLine>],
    title: &str,
    author: &str,
    page_header: &str,
    page_footer: &str,
) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let total = pages.len();
    let mut kids: Vec<Object> = Vec::with_capacity(total);

    for (index, lines) in pages.iter().enumerate() {
        let mut operations = Vec::new();

        if !is_blank(page_header) {
            operations.extend(text_operations(Font::Regular, 9, MARGIN, HEADER_Y, page_header));
        }
        for line in lines {
            operations.extend(text_operations(line.font, line.size, MARGIN, line.y, &line.text));
        }

        let footer = if is_blank(page_footer) {
            format!("{} / {total}", index + 1)
        } else {
            format!("{}    {} / {total}", page_footer.trim(), index + 1)
        };
        operations.extend(text_operations(Font::Regular, 9, MARGIN, FOOTER_Y, &footer));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = i64::try_from(kids.len()).unwrap_or(i64::MAX);
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_text(title.trim())),
        "Author" => Object::string_literal(encode_text(author.trim())),
        "Producer" => Object::string_literal("report-translator"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Section;

    fn report_with_sections(count: usize) -> Report {
        let mut report = Report::new(2);
        report.first_name = "Jane".to_string();
        report.last_name = "Doe".to_string();
        report.title = "Q1 Sales".to_string();
        for i in 0..count {
            let mut section = Section::new(2);
            section.set_title(0, format!("Section {i}"));
            section.set_description(0, "Up 10%");
            report.add_section(section);
        }
        report
    }

    fn render(report: &Report) -> Vec<u8> {
        let template = ReportTemplate::from_source("classic", "");
        PdfBackend::default()
            .render(report, &template, OutputFormat::Pdf)
            .unwrap()
    }

    #[test]
    fn test_one_page_per_section_plus_cover() {
        let bytes = render(&report_with_sections(3));
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 4);
    }

    #[test]
    fn test_cover_only_without_sections() {
        let bytes = render(&report_with_sections(0));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_long_description_overflows_to_next_page() {
        let mut report = report_with_sections(0);
        let mut section = Section::new(2);
        section.set_description(0, "word ".repeat(2000));
        report.add_section(section);

        let pages = PdfBackend::default().layout(&report).unwrap();
        assert!(pages.len() > 2);
        for page in &pages {
            assert!(page.iter().all(|line| line.y >= BODY_BOTTOM));
        }
    }

    #[test]
    fn test_empty_section_gets_blank_page() {
        let mut report = report_with_sections(0);
        report.add_section(Section::new(2));
        report.add_section(Section::new(2));

        let pages = PdfBackend::default().layout(&report).unwrap();
        assert_eq!(pages.len(), 3);
        assert!(pages[1].is_empty());
        assert!(pages[2].is_empty());
    }

    #[test]
    fn test_rejects_other_formats() {
        let template = ReportTemplate::from_source("classic", "");
        let result =
            PdfBackend::default().render(&Report::new(2), &template, OutputFormat::Html);
        assert!(matches!(result, Err(TranslatorError::Backend { .. })));
    }

    #[test]
    fn test_fonts_use_latin1_encoding() {
        let bytes = render(&report_with_sections(1));
        let doc = Document::load_mem(&bytes).unwrap();

        let fonts: Vec<_> = doc
            .objects
            .values()
            .filter_map(|object| object.as_dict().ok())
            .filter(|dict| matches!(dict.get(b"Type").and_then(Object::as_name), Ok(b"Font")))
            .collect();

        assert_eq!(fonts.len(), 2);
        for font in fonts {
            assert_eq!(
                font.get(b"Encoding").and_then(Object::as_name).unwrap(),
                b"WinAnsiEncoding"
            );
        }
    }

    #[test]
    fn test_encode_text() {
        assert_eq!(encode_text("Café"), b"Caf\xe9".to_vec());
        assert_eq!(encode_text("日本"), b"??".to_vec());
        assert_eq!(encode_text("a\tb"), b"a?b".to_vec());
    }
}
