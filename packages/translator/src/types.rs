//! Core data types for the translator.
//!
//! These types form the normalized report model: a [`Report`] with header
//! metadata and an ordered list of fixed-capacity [`Section`] records.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_FORMAT, SLOT_DEFAULT};

/// Output formats a report can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Paginated PDF document.
    Pdf,

    /// Spreadsheet with an overview sheet and one sheet per section.
    Xls,

    /// Paginated HTML document.
    Html,

    /// Word-processor document.
    Doc,

    /// Presentation.
    Pptx,
}

impl OutputFormat {
    /// Resolve a format identifier.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Unknown or empty identifiers resolve to [`OutputFormat::Pdf`].
    ///
    /// # Examples
    /// ```
    /// use report_translator::types::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::resolve("XLS"), OutputFormat::Xls);
    /// assert_eq!(OutputFormat::resolve("odt"), OutputFormat::Pdf);
    /// ```
    #[must_use]
    pub fn resolve(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "xls" => Self::Xls,
            "html" => Self::Html,
            "doc" => Self::Doc,
            "pptx" => Self::Pptx,
            _ => Self::Pdf,
        }
    }

    /// Lowercase identifier of the format.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Xls => "xls",
            Self::Html => "html",
            Self::Doc => "doc",
            Self::Pptx => "pptx",
        }
    }

    /// File extension of the written artifact.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Whether this format is produced by a paginated document backend.
    #[must_use]
    pub fn is_paginated(&self) -> bool {
        !matches!(self, Self::Xls)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `SectionTitle` / `SectionDescription` pair of a section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverviewEntry {
    /// Text of the `SectionTitle` element.
    pub title: String,

    /// Text of the `SectionDescription` that followed it, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Tabular content of a section, in document encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SheetContent {
    /// Title/description pairs listed on the overview sheet.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<OverviewEntry>,

    /// Texts of the `ColumnHeader` elements.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub column_headers: Vec<String>,

    /// One entry per `Row` element, holding its `Column` texts.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Vec<String>>,
}

impl SheetContent {
    /// Title the section's sheet is named after.
    #[must_use]
    pub fn sheet_title(&self) -> Option<&str> {
        self.entries.first().map(|e| e.title.as_str())
    }

    /// Whether the section carried no tabular content at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.column_headers.is_empty() && self.rows.is_empty()
    }
}

/// A fixed-capacity section record.
///
/// All four slot arrays always hold exactly `max_slots` values. Slots that
/// were not supplied hold [`SLOT_DEFAULT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    titles: Vec<String>,
    descriptions: Vec<String>,
    drill_parameters: Vec<String>,
    images: Vec<String>,

    /// Tables and overview entries of the section.
    #[serde(default, skip_serializing_if = "SheetContent::is_empty")]
    pub sheet: SheetContent,
}

impl Section {
    /// Create a section with every slot set to the default value.
    #[must_use]
    pub fn new(max_slots: usize) -> Self {
        let filled = vec![SLOT_DEFAULT.to_string(); max_slots];
        Self {
            titles: filled.clone(),
            descriptions: filled.clone(),
            drill_parameters: filled.clone(),
            images: filled,
            sheet: SheetContent::default(),
        }
    }

    /// Number of slots per field family.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.titles.len()
    }

    /// Title in a slot.
    #[must_use]
    pub fn title(&self, slot: usize) -> Option<&str> {
        self.titles.get(slot).map(String::as_str)
    }

    /// Description in a slot.
    #[must_use]
    pub fn description(&self, slot: usize) -> Option<&str> {
        self.descriptions.get(slot).map(String::as_str)
    }

    /// Drill-down parameters in a slot.
    #[must_use]
    pub fn drill_parameters(&self, slot: usize) -> Option<&str> {
        self.drill_parameters.get(slot).map(String::as_str)
    }

    /// Image reference in a slot.
    #[must_use]
    pub fn image(&self, slot: usize) -> Option<&str> {
        self.images.get(slot).map(String::as_str)
    }

    /// All titles.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// All descriptions.
    #[must_use]
    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    /// All drill-down parameters.
    #[must_use]
    pub fn all_drill_parameters(&self) -> &[String] {
        &self.drill_parameters
    }

    /// All image references.
    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Set a title. Out-of-range slots are ignored and return `false`.
    pub fn set_title(&mut self, slot: usize, value: impl Into<String>) -> bool {
        set_slot(&mut self.titles, slot, value.into())
    }

    /// Set a description. Out-of-range slots are ignored and return `false`.
    pub fn set_description(&mut self, slot: usize, value: impl Into<String>) -> bool {
        set_slot(&mut self.descriptions, slot, value.into())
    }

    /// Set drill-down parameters. Out-of-range slots are ignored and return `false`.
    pub fn set_drill_parameters(&mut self, slot: usize, value: impl Into<String>) -> bool {
        set_slot(&mut self.drill_parameters, slot, value.into())
    }

    /// Set an image reference. Out-of-range slots are ignored and return `false`.
    pub fn set_image(&mut self, slot: usize, value: impl Into<String>) -> bool {
        set_slot(&mut self.images, slot, value.into())
    }
}

fn set_slot(slots: &mut [String], slot: usize, value: String) -> bool {
    match slots.get_mut(slot) {
        Some(existing) => {
            *existing = value;
            true
        }
        None => false,
    }
}

/// The normalized report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Author first name.
    pub first_name: String,

    /// Author last name.
    pub last_name: String,

    /// Author email address.
    pub email: String,

    /// Report title.
    pub title: String,

    /// Text printed at the top of every page.
    pub page_header: String,

    /// Text printed at the bottom of every page.
    pub page_footer: String,

    /// Raw format identifier as found in the document.
    pub format: String,

    /// Slot capacity every section was built with.
    pub max_slots: usize,

    /// Sections in document order.
    pub sections: Vec<Section>,
}

impl Report {
    /// Create an empty report with all defaults applied.
    #[must_use]
    pub fn new(max_slots: usize) -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            title: SLOT_DEFAULT.to_string(),
            page_header: SLOT_DEFAULT.to_string(),
            page_footer: SLOT_DEFAULT.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            max_slots,
            sections: Vec::new(),
        }
    }

    /// Author name as shown on paginated output.
    ///
    /// # Examples
    /// ```
    /// use report_translator::types::Report;
    ///
    /// let mut report = Report::new(2);
    /// report.first_name = "Jane".to_string();
    /// report.last_name = "Doe".to_string();
    /// assert_eq!(report.user(), "Jane Doe");
    /// ```
    #[must_use]
    pub fn user(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Resolved output format.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::resolve(&self.format)
    }

    /// Append a section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }
}

/// Whether a slot or header value carries content.
///
/// # Examples
/// ```
/// use report_translator::types::is_blank;
///
/// assert!(is_blank(" "));
/// assert!(!is_blank("Revenue"));
/// ```
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_resolution_case_insensitive() {
        assert_eq!(OutputFormat::resolve("PDF"), OutputFormat::Pdf);
        assert_eq!(OutputFormat::resolve("Pdf"), OutputFormat::Pdf);
        assert_eq!(OutputFormat::resolve("pdf"), OutputFormat::Pdf);
        assert_eq!(OutputFormat::resolve("Xls"), OutputFormat::Xls);
        assert_eq!(OutputFormat::resolve("HTML"), OutputFormat::Html);
        assert_eq!(OutputFormat::resolve("Doc"), OutputFormat::Doc);
        assert_eq!(OutputFormat::resolve("PPTX"), OutputFormat::Pptx);
    }

    #[test]
    fn test_format_resolution_fallback() {
        assert_eq!(OutputFormat::resolve(""), OutputFormat::Pdf);
        assert_eq!(OutputFormat::resolve(" "), OutputFormat::Pdf);
        assert_eq!(OutputFormat::resolve("docx"), OutputFormat::Pdf);
    }

    #[test]
    fn test_format_paginated() {
        assert!(OutputFormat::Pdf.is_paginated());
        assert!(OutputFormat::Pptx.is_paginated());
        assert!(!OutputFormat::Xls.is_paginated());
    }

    #[test]
    fn test_section_prefilled() {
        let section = Section::new(3);
        assert_eq!(section.capacity(), 3);
        for slot in 0..3 {
            assert_eq!(section.title(slot), Some(" "));
            assert_eq!(section.description(slot), Some(" "));
            assert_eq!(section.drill_parameters(slot), Some(" "));
            assert_eq!(section.image(slot), Some(" "));
        }
        assert_eq!(section.title(3), None);
    }

    #[test]
    fn test_section_never_resized() {
        let mut section = Section::new(2);
        assert!(section.set_title(1, "Second"));
        assert!(!section.set_title(2, "Out of range"));
        assert!(!section.set_image(5, "chart.png"));

        assert_eq!(section.titles().len(), 2);
        assert_eq!(section.images().len(), 2);
        assert_eq!(section.title(1), Some("Second"));
    }

    #[test]
    fn test_report_defaults() {
        let report = Report::new(2);
        assert_eq!(report.title, " ");
        assert_eq!(report.page_header, " ");
        assert_eq!(report.page_footer, " ");
        assert_eq!(report.format, "pdf");
        assert_eq!(report.output_format(), OutputFormat::Pdf);
        assert!(report.sections.is_empty());
    }

    #[test]
    fn test_sheet_title_is_first_entry() {
        let sheet = SheetContent {
            entries: vec![
                OverviewEntry {
                    title: "Revenue".to_string(),
                    description: None,
                },
                OverviewEntry {
                    title: "Costs".to_string(),
                    description: None,
                },
            ],
            ..SheetContent::default()
        };
        assert_eq!(sheet.sheet_title(), Some("Revenue"));
        assert!(!sheet.is_empty());
        assert!(SheetContent::default().is_empty());
    }
}
