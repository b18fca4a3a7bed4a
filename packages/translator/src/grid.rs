//! Projection of a [`Report`] onto a multi-sheet grid.
//!
//! The grid is an in-memory workbook: an overview sheet followed by one sheet
//! per section. Serialization lives in [`crate::xlsx`].

use std::collections::BTreeMap;

use crate::config::{OVERVIEW_SHEET_NAME, REPORT_TITLE_LABEL};
use crate::types::{Report, Section};

/// A row: zero-based column index to cell text.
pub type Row = BTreeMap<u16, String>;

/// A named sheet of rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sheet {
    /// Sheet name before spreadsheet-specific sanitizing.
    pub name: String,

    /// Rows in order.
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create an empty sheet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Append a row with the given cells in columns `0..`.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row = (0u16..).zip(cells.into_iter().map(Into::into)).collect();
        self.rows.push(row);
    }

    /// Cell text at `row`, `column`.
    #[must_use]
    pub fn cell(&self, row: usize, column: u16) -> Option<&str> {
        self.rows.get(row)?.get(&column).map(String::as_str)
    }

    /// Cells of a row, in column order.
    #[must_use]
    pub fn row_values(&self, row: usize) -> Vec<&str> {
        self.rows
            .get(row)
            .map(|r| r.values().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Highest column index used in any row, plus one.
    #[must_use]
    pub fn column_count(&self) -> u16 {
        self.rows
            .iter()
            .filter_map(|r| r.keys().next_back())
            .max()
            .map_or(0, |last| last + 1)
    }
}

/// An ordered collection of sheets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    /// Sheets in order; the overview sheet is always first.
    pub sheets: Vec<Sheet>,
}

impl Grid {
    /// The overview sheet.
    #[must_use]
    pub fn overview(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    /// Section sheets, in section order.
    #[must_use]
    pub fn section_sheets(&self) -> &[Sheet] {
        self.sheets.get(1..).unwrap_or_default()
    }

    /// Find a sheet by name.
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// Project a report onto a grid.
///
/// The overview sheet starts with `["Report Title", title]` and
/// `[first name, last name, email]`, followed by one row per section title
/// (with its description in the second column when present). Each section
/// gets a sheet whose first row holds the column headers and whose further
/// rows hold the table rows.
///
/// # Examples
/// ```
/// use report_translator::grid::project;
/// use report_translator::types::Report;
///
/// let mut report = Report::new(2);
/// report.title = "Q1 Sales".to_string();
///
/// let grid = project(&report);
/// assert_eq!(grid.sheets.len(), 1);
/// assert_eq!(grid.overview().unwrap().row_values(0), vec!["Report Title", "Q1 Sales"]);
/// ```
#[must_use]
pub fn project(report: &Report) -> Grid {
    let mut overview = Sheet::new(OVERVIEW_SHEET_NAME);
    overview.push_row([REPORT_TITLE_LABEL, report.title.as_str()]);
    overview.push_row([
        report.first_name.as_str(),
        report.last_name.as_str(),
        report.email.as_str(),
    ]);

    let section_sheets: Vec<Sheet> = report
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| project_section(section, index, &mut overview))
        .collect();

    let mut sheets = Vec::with_capacity(section_sheets.len() + 1);
    sheets.push(overview);
    sheets.extend(section_sheets);
    Grid { sheets }
}

/// Build the sheet of one section and add its overview rows.
fn project_section(section: &Section, index: usize, overview: &mut Sheet) -> Sheet {
    let content = &section.sheet;
    let name = content
        .sheet_title()
        .map_or_else(|| format!("Section {}", index + 1), str::to_string);

    for entry in &content.entries {
        match &entry.description {
            Some(description) => {
                overview.push_row([entry.title.as_str(), description.as_str()]);
            }
            None => overview.push_row([entry.title.as_str()]),
        }
    }

    let mut sheet = Sheet::new(name);
    sheet.push_row(content.column_headers.iter().map(String::as_str));
    for row in &content.rows {
        sheet.push_row(row.iter().map(String::as_str));
    }

    sheet
}
