//! Parsing of report XML documents into the [`Report`] model.
//!
//! Parsing is best-effort: a failure stops extraction, but the fields read
//! up to that point are kept and the failure travels with the report in a
//! [`ParseOutcome`].
//!
//! # Slot lookup
//!
//! Slot elements (`SectionTitle_<n>`, `SectionImage_<n>`,
//! `SectionDrillParameters_<n>`, `SectionDescription_<n>`) are looked up by
//! their position among all elements with the same tag in the whole
//! document, not inside the section being built. Image, drill-parameter and
//! description slots use the index of the current section. Title slots use
//! a [`TitleCursor`] that is carried from one section to the next. The two
//! positions are tracked separately.

use std::collections::HashMap;

use roxmltree::{Document, Node};

use crate::config::{DEFAULT_FORMAT, SLOT_DEFAULT};
use crate::error::{Result, TranslatorError};
use crate::table::extract_sheet_content;
use crate::types::{Report, Section};
use crate::xml::{descendants_with_tag, get_tag_name, get_text, node_text};

/// How much of a document made it into the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// Every field was extracted.
    Complete,
    /// Extraction stopped early; the report holds what was read before.
    Partial,
    /// The document could not be read at all; the report holds defaults only.
    Failed,
}

impl ParseStatus {
    /// Lowercase label for logs and summaries.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Partial => "partial",
            Self::Failed => "failed",
        }
    }
}

/// Result of parsing a report document.
#[derive(Debug)]
pub struct ParseOutcome {
    /// The report, complete or not.
    pub report: Report,

    /// The failure that stopped extraction, if any.
    pub error: Option<TranslatorError>,
}

impl ParseOutcome {
    /// Classify the outcome.
    #[must_use]
    pub fn status(&self) -> ParseStatus {
        match &self.error {
            None => ParseStatus::Complete,
            Some(TranslatorError::XmlParse(_)) => ParseStatus::Failed,
            Some(_) => ParseStatus::Partial,
        }
    }

    /// Whether every field was extracted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Turn the outcome into a `Result`.
    ///
    /// With `strict` set, any parse failure becomes
    /// [`TranslatorError::PartialParse`]. Otherwise the report is returned
    /// as-is.
    pub fn into_result(self, strict: bool) -> Result<Report> {
        match self.error {
            Some(err) if strict => Err(TranslatorError::PartialParse {
                source: Box::new(err),
            }),
            _ => Ok(self.report),
        }
    }
}

/// Position used to look up `SectionTitle_<n>` elements.
///
/// Starts at zero and advances once per completed section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TitleCursor {
    position: usize,
}

impl TitleCursor {
    /// Current lookup position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Record that a section has been completed.
    pub fn complete_section(&mut self) {
        self.position += 1;
    }
}

/// Slot elements of a document, grouped by tag in document order.
struct SlotElements<'a, 'input> {
    by_tag: HashMap<&'a str, Vec<Node<'a, 'input>>>,
}

impl<'a, 'input> SlotElements<'a, 'input> {
    fn collect(doc: &'a Document<'input>) -> Self {
        let mut by_tag: HashMap<&'a str, Vec<Node<'a, 'input>>> = HashMap::new();
        for node in doc.descendants().filter(|n| n.is_element()) {
            let tag = get_tag_name(node);
            if is_slot_tag(tag) {
                by_tag.entry(tag).or_default().push(node);
            }
        }
        Self { by_tag }
    }

    /// Text of the `index`-th element tagged `tag`, if such an element exists.
    ///
    /// An element without text yields [`SLOT_DEFAULT`].
    fn text(&self, tag: &str, index: usize) -> Option<String> {
        let node = self.by_tag.get(tag)?.get(index)?;
        let text = get_text(*node);
        Some(if text.is_empty() {
            SLOT_DEFAULT.to_string()
        } else {
            text
        })
    }
}

fn is_slot_tag(tag: &str) -> bool {
    const FAMILIES: [&str; 4] = [
        "SectionTitle_",
        "SectionImage_",
        "SectionDrillParameters_",
        "SectionDescription_",
    ];
    FAMILIES.iter().any(|family| {
        tag.strip_prefix(family)
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    })
}

/// Parse a report document.
///
/// Never fails: malformed XML or missing required elements are reported in
/// the returned [`ParseOutcome`] next to whatever was extracted.
///
/// # Examples
/// ```
/// use report_translator::parser::{parse_report, ParseStatus};
///
/// let xml = r#"<Report>
///     <FirstName>Jane</FirstName><LastName>Doe</LastName><Email>jane@x.com</Email>
///     <Title>Q1 Sales</Title>
///     <Section><SectionTitle_0>Revenue</SectionTitle_0></Section>
/// </Report>"#;
///
/// let outcome = parse_report(xml, 2);
/// assert_eq!(outcome.status(), ParseStatus::Complete);
/// assert_eq!(outcome.report.sections[0].title(0), Some("Revenue"));
/// assert_eq!(outcome.report.sections[0].title(1), Some(" "));
/// ```
pub fn parse_report(xml: &str, max_slots: usize) -> ParseOutcome {
    match Document::parse(xml) {
        Ok(doc) => parse_document(&doc, max_slots),
        Err(e) => {
            tracing::warn!(error = %e, "Report document is not well-formed XML");
            ParseOutcome {
                report: Report::new(max_slots),
                error: Some(TranslatorError::XmlParse(e)),
            }
        }
    }
}

/// Parse an already loaded report document.
pub fn parse_document(doc: &Document<'_>, max_slots: usize) -> ParseOutcome {
    let mut report = Report::new(max_slots);
    let error = fill_report(doc, &mut report).err();

    if let Some(err) = &error {
        tracing::warn!(
            error = %err,
            sections = report.sections.len(),
            "Report parsed partially"
        );
    }

    ParseOutcome { report, error }
}

/// Extract header fields and sections, in that order, into `report`.
fn fill_report(doc: &Document<'_>, report: &mut Report) -> Result<()> {
    report.first_name = required_text(doc, "FirstName")?;
    report.last_name = required_text(doc, "LastName")?;
    report.email = required_text(doc, "Email")?;

    report.title = optional_text(doc, "Title");
    report.page_header = optional_text(doc, "PageHeader");
    report.page_footer = optional_text(doc, "PageFooter");
    report.format = format_text(doc);

    let slots = SlotElements::collect(doc);
    let mut cursor = TitleCursor::default();

    for (index, node) in descendants_with_tag(doc, "Section").enumerate() {
        let section = extract_section(node, index, &slots, &mut cursor, report.max_slots);
        tracing::debug!(section = index, "Parsed section");
        report.add_section(section);
    }

    Ok(())
}

/// Build one section record.
fn extract_section(
    node: Node<'_, '_>,
    index: usize,
    slots: &SlotElements<'_, '_>,
    cursor: &mut TitleCursor,
    max_slots: usize,
) -> Section {
    let mut section = Section::new(max_slots);

    for slot in 0..max_slots {
        if let Some(title) = slots.text(&format!("SectionTitle_{slot}"), cursor.position()) {
            section.set_title(slot, title);
        }
        if let Some(image) = slots.text(&format!("SectionImage_{slot}"), index) {
            section.set_image(slot, image);
        }
        if let Some(params) = slots.text(&format!("SectionDrillParameters_{slot}"), index) {
            section.set_drill_parameters(slot, params);
        }
        if let Some(description) = slots.text(&format!("SectionDescription_{slot}"), index) {
            section.set_description(slot, description);
        }
    }

    section.sheet = extract_sheet_content(node);
    cursor.complete_section();
    section
}

/// Text of the first element tagged `tag`; a missing element or text is an error.
fn required_text(doc: &Document<'_>, tag: &str) -> Result<String> {
    let node = descendants_with_tag(doc, tag)
        .next()
        .ok_or_else(|| TranslatorError::MissingElement {
            element: tag.to_string(),
            context: "report header".to_string(),
        })?;

    node_text(node)
        .map(|t| t.trim().to_string())
        .ok_or_else(|| TranslatorError::MissingText {
            element: tag.to_string(),
        })
}

/// Text of the first element tagged `tag`, or [`SLOT_DEFAULT`] when absent or empty.
fn optional_text(doc: &Document<'_>, tag: &str) -> String {
    descendants_with_tag(doc, tag)
        .next()
        .and_then(node_text)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map_or_else(|| SLOT_DEFAULT.to_string(), str::to_string)
}

/// Raw `Format` text, or [`DEFAULT_FORMAT`] when absent or empty.
fn format_text(doc: &Document<'_>) -> String {
    descendants_with_tag(doc, "Format")
        .next()
        .and_then(node_text)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map_or_else(|| DEFAULT_FORMAT.to_string(), str::to_string)
}
