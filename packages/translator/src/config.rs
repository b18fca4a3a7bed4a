//! Configuration constants and validation functions for the translator.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TranslatorError};
use crate::types::OutputFormat;

/// Default number of repeating slots a single `Section` block may contribute.
///
/// Report layouts place one or two charts on a page, one chart per slot.
pub const DEFAULT_MAX_SLOTS: usize = 2;

/// Upper bound accepted for a configured slot capacity.
pub const MAX_SLOTS_LIMIT: usize = 64;

/// Value of every slot and optional header field that was not supplied.
///
/// Downstream renderers treat a value that trims to empty as absent, so this
/// must stay a single space rather than an empty string.
pub const SLOT_DEFAULT: &str = " ";

/// Format used when the document does not name one.
pub const DEFAULT_FORMAT: &str = "pdf";

/// Name of the first sheet of every spreadsheet.
pub const OVERVIEW_SHEET_NAME: &str = "Overview";

/// Label in the first cell of the overview sheet.
pub const REPORT_TITLE_LABEL: &str = "Report Title";

/// Width applied to every spreadsheet column that receives a cell.
pub const COLUMN_WIDTH: f64 = 20.0;

/// Extension of report template sources.
pub const TEMPLATE_EXTENSION: &str = "jrxml";

/// Longest sheet name spreadsheet applications accept.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Longest text a spreadsheet cell holds, in characters.
pub const MAX_CELL_LEN: usize = 32_767;

/// Line width (in characters) for text on paginated pages.
pub const TEXT_WRAP_WIDTH: usize = 90;

/// Characters spreadsheet applications reject in sheet names.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SHEET_NAME_FORBIDDEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\]:*?/\\]").expect("valid regex"));

/// Options controlling a single translation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Slot capacity of every `Section` record.
    pub max_slots: usize,

    /// Fail the run when the report could only be parsed partially.
    pub strict: bool,

    /// Format to use instead of the document's `Format` tag.
    pub format_override: Option<String>,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            max_slots: DEFAULT_MAX_SLOTS,
            strict: false,
            format_override: None,
        }
    }
}

impl TranslateOptions {
    /// Set the slot capacity after validating it.
    pub fn with_max_slots(mut self, max_slots: usize) -> Result<Self> {
        validate_max_slots(max_slots)?;
        self.max_slots = max_slots;
        Ok(self)
    }

    /// Toggle strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Override the document's format.
    #[must_use]
    pub fn with_format_override(mut self, format: impl Into<String>) -> Self {
        self.format_override = Some(format.into());
        self
    }
}

/// Validate a slot capacity.
///
/// # Examples
/// ```
/// use report_translator::config::validate_max_slots;
///
/// assert!(validate_max_slots(2).is_ok());
/// assert!(validate_max_slots(0).is_err());
/// ```
pub fn validate_max_slots(max_slots: usize) -> Result<()> {
    if (1..=MAX_SLOTS_LIMIT).contains(&max_slots) {
        Ok(())
    } else {
        Err(TranslatorError::InvalidMaxSlots(max_slots))
    }
}

/// Make a section title usable as a sheet name.
///
/// Forbidden characters are removed, the result is trimmed and cut to
/// [`MAX_SHEET_NAME_LEN`] characters. A sheet name may not start or end with
/// an apostrophe, so those are trimmed along with whitespace. An empty result
/// becomes `Section <n>` where `n` is the one-based `position`.
///
/// # Examples
/// ```
/// use report_translator::config::sanitize_sheet_name;
///
/// assert_eq!(sanitize_sheet_name("Revenue", 1), "Revenue");
/// assert_eq!(sanitize_sheet_name("Q1/Q2 [draft]", 1), "Q1Q2 draft");
/// assert_eq!(sanitize_sheet_name("'Quoted'", 2), "Quoted");
/// assert_eq!(sanitize_sheet_name("  ", 3), "Section 3");
/// ```
pub fn sanitize_sheet_name(name: &str, position: usize) -> String {
    let is_edge = |c: char| c == '\'' || c.is_whitespace();
    let cleaned = SHEET_NAME_FORBIDDEN.replace_all(name, "");
    let truncated: String = cleaned
        .trim_matches(is_edge)
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let truncated = truncated.trim_end_matches(is_edge).to_string();

    if truncated.is_empty() {
        format!("Section {position}")
    } else {
        truncated
    }
}

/// Return a sheet name not yet present in `taken`, and record it.
///
/// Names are compared case-insensitively, as spreadsheet applications do.
pub fn unique_sheet_name(name: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.to_lowercase()) {
        return name;
    }

    let mut counter = 2;
    loop {
        let suffix = format!(" ({counter})");
        let room = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
        let base: String = name.chars().take(room).collect();
        let candidate = format!("{}{suffix}", base.trim_end());
        if taken.insert(candidate.to_lowercase()) {
            return candidate;
        }
        counter += 1;
    }
}

/// Build the path of the artifact written for a format.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use report_translator::config::output_path;
/// use report_translator::types::OutputFormat;
///
/// let path = output_path(Path::new("out"), "q1", OutputFormat::Xls);
/// assert_eq!(path, Path::new("out").join("q1.xls"));
/// ```
pub fn output_path(dir: &Path, base_name: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("{base_name}.{}", format.extension()))
}

/// Build the path of a template source.
pub fn template_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{TEMPLATE_EXTENSION}"))
}

/// Resolve the input document path.
///
/// Uses `dir/name` when it exists. A name without extension falls back to
/// `dir/name.xml`.
pub fn input_path(dir: &Path, name: &str) -> PathBuf {
    let direct = dir.join(name);
    if direct.exists() || Path::new(name).extension().is_some() {
        return direct;
    }

    let with_xml = dir.join(format!("{name}.xml"));
    if with_xml.exists() {
        with_xml
    } else {
        direct
    }
}
