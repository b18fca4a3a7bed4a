//! Rendering dispatch.
//!
//! The report's output format decides the route: `xls` goes through the
//! tabular projection and is written as a workbook, every other format is
//! handed to the paginated backend registered for it.

use crate::backend::BackendRegistry;
use crate::error::{Result, TranslatorError};
use crate::grid::project;
use crate::template::ReportTemplate;
use crate::types::{OutputFormat, Report};
use crate::xlsx::write_xlsx;

/// Where a format is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Tabular projection to a workbook.
    Tabular,
    /// A paginated document backend.
    Paginated(OutputFormat),
}

/// Pick the route for a format.
///
/// # Examples
/// ```
/// use report_translator::render::{route, Route};
/// use report_translator::types::OutputFormat;
///
/// assert_eq!(route(OutputFormat::Xls), Route::Tabular);
/// assert_eq!(route(OutputFormat::Html), Route::Paginated(OutputFormat::Html));
/// ```
#[must_use]
pub fn route(format: OutputFormat) -> Route {
    if format.is_paginated() {
        Route::Paginated(format)
    } else {
        Route::Tabular
    }
}

/// Rendered document bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Format the bytes are in.
    pub format: OutputFormat,
    /// Document content.
    pub bytes: Vec<u8>,
}

/// Render a report in the format it asks for.
///
/// Returns [`TranslatorError::BackendUnavailable`] when the report asks for a
/// paginated format nobody registered a backend for.
pub fn render(
    report: &Report,
    template: &ReportTemplate,
    registry: &BackendRegistry,
) -> Result<Rendered> {
    let format = report.output_format();

    let bytes = match route(format) {
        Route::Tabular => {
            let grid = project(report);
            tracing::debug!(sheets = grid.sheets.len(), "Projected report to grid");
            write_xlsx(&grid)?
        }
        Route::Paginated(format) => {
            let backend = registry
                .get(format)
                .ok_or_else(|| TranslatorError::BackendUnavailable {
                    format: format.to_string(),
                })?;
            tracing::debug!(backend = backend.name(), template = %template.name, "Rendering document");
            backend.render(report, template, format)?
        }
    };

    Ok(Rendered { format, bytes })
}
