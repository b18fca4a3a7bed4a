//! Translator service that ties all components together.

use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::BackendRegistry;
use crate::config::{input_path, output_path, TranslateOptions};
use crate::error::Result;
use crate::output::write_atomic;
use crate::parser::{parse_report, ParseStatus};
use crate::render::render;
use crate::template::ReportTemplate;
use crate::types::{OutputFormat, Report};

/// Locations of one translation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    /// Directory holding the report document.
    pub input_dir: PathBuf,
    /// Report document name, with or without `.xml`.
    pub input_file: String,
    /// Directory the artifact is written to.
    pub output_dir: PathBuf,
    /// Artifact base name; the extension follows the format.
    pub output_file: String,
    /// Directory holding report templates.
    pub template_dir: PathBuf,
    /// Template base name.
    pub template: String,
}

impl TranslateRequest {
    /// Path of the report document.
    #[must_use]
    pub fn input_path(&self) -> PathBuf {
        input_path(&self.input_dir, &self.input_file)
    }
}

/// What a translation run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateSummary {
    /// Path of the written artifact.
    pub output: PathBuf,
    /// Format the artifact is in.
    pub format: OutputFormat,
    /// How much of the document made it into the report.
    pub status: ParseStatus,
    /// Number of sections in the report.
    pub sections: usize,
    /// Description of the parse failure, when the status is not complete.
    pub parse_error: Option<String>,
}

/// Parse the report document and write it in its output format.
///
/// Parse failures are not fatal unless `options.strict` is set: the report
/// holds whatever was read before the failure and the summary carries the
/// status. Rendering and writing failures are always returned.
///
/// # Arguments
/// * `request` - Input, output and template locations
/// * `options` - Slot capacity, strictness and format override
/// * `registry` - Backends for paginated formats
pub fn translate(
    request: &TranslateRequest,
    options: &TranslateOptions,
    registry: &BackendRegistry,
) -> Result<TranslateSummary> {
    let (report, status, parse_error) = load_report(&request.input_path(), options)?;

    let template = ReportTemplate::load(&request.template_dir, &request.template)?;
    if template.source.is_some() {
        let missing = template.missing_fields(report.max_slots);
        if !missing.is_empty() {
            tracing::warn!(
                template = %template.name,
                missing = %missing.join(", "),
                "Template does not declare every report field"
            );
        }
    }

    let rendered = render(&report, &template, registry)?;
    let output = output_path(&request.output_dir, &request.output_file, rendered.format);
    write_atomic(&output, &rendered.bytes)?;

    tracing::info!(
        output = %output.display(),
        format = %rendered.format,
        status = status.as_str(),
        "Wrote report"
    );

    Ok(TranslateSummary {
        output,
        format: rendered.format,
        status,
        sections: report.sections.len(),
        parse_error,
    })
}

/// Read and parse a report document, applying the options.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn load_report(
    path: &Path,
    options: &TranslateOptions,
) -> Result<(Report, ParseStatus, Option<String>)> {
    let bytes = fs::read(path)?;
    let xml = String::from_utf8_lossy(&bytes);

    let outcome = parse_report(&xml, options.max_slots);
    let status = outcome.status();
    let parse_error = outcome.error.as_ref().map(ToString::to_string);
    if let Some(err) = &parse_error {
        tracing::warn!(path = %path.display(), status = status.as_str(), "Parse stopped early: {err}");
    }

    let mut report = outcome.into_result(options.strict)?;
    if let Some(format) = &options.format_override {
        tracing::debug!(from = %report.format, to = %format, "Overriding output format");
        report.format.clone_from(format);
    }

    Ok((report, status, parse_error))
}
