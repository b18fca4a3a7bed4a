//! Built-in HTML backend.

use std::fmt::Write;

use super::DocumentBackend;
use crate::datasource::{report_parameters, FieldFamily, ReportDataSource};
use crate::error::{Result, TranslatorError};
use crate::template::ReportTemplate;
use crate::types::{is_blank, OutputFormat, Report};

/// Renders a report as a single HTML page.
///
/// Each section becomes a `<section>` with one block per slot that has any
/// content. Blank values are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlBackend;

impl DocumentBackend for HtmlBackend {
    fn name(&self) -> &str {
        "html"
    }

    fn render(
        &self,
        report: &Report,
        template: &ReportTemplate,
        format: OutputFormat,
    ) -> Result<Vec<u8>> {
        if format != OutputFormat::Html {
            return Err(TranslatorError::Backend {
                format: format.to_string(),
                message: "the HTML backend only renders html".to_string(),
            });
        }

        Ok(render_html(report, template)?.into_bytes())
    }
}

fn render_html(report: &Report, template: &ReportTemplate) -> Result<String> {
    let params = report_parameters(report);
    let title = parameter(&params, "title");
    let page_header = parameter(&params, "pageHeader");
    let page_footer = parameter(&params, "pageFooter");

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    // Writing into a String cannot fail.
    let _ = writeln!(html, "<meta name=\"template\" content=\"{}\">", escape_html(&template.name));
    let _ = writeln!(html, "<title>{}</title>", escape_html(title.trim()));
    html.push_str("</head>\n<body>\n");

    if !is_blank(page_header) {
        let _ = writeln!(html, "<header>{}</header>", escape_html(page_header));
    }
    if !is_blank(title) {
        let _ = writeln!(html, "<h1>{}</h1>", escape_html(title));
    }
    let _ = writeln!(
        html,
        "<p class=\"author\">{} &lt;{}&gt;</p>",
        escape_html(parameter(&params, "user").trim()),
        escape_html(parameter(&params, "email"))
    );

    let mut source = ReportDataSource::new(report);
    while source.next() {
        html.push_str("<section>\n");
        for slot in 0..report.max_slots {
            render_slot(&mut html, &source, slot)?;
        }
        html.push_str("</section>\n");
    }

    if !is_blank(page_footer) {
        let _ = writeln!(html, "<footer>{}</footer>", escape_html(page_footer));
    }
    html.push_str("</body>\n</html>\n");

    Ok(html)
}

/// Append the block of one slot, if it has any content.
fn render_slot(html: &mut String, source: &ReportDataSource<'_>, slot: usize) -> Result<()> {
    let title = slot_value(source, FieldFamily::Title, slot)?;
    let drill = slot_value(source, FieldFamily::DrillParameters, slot)?;
    let image = slot_value(source, FieldFamily::Image, slot)?;
    let description = slot_value(source, FieldFamily::Description, slot)?;

    if title.is_none() && drill.is_none() && image.is_none() && description.is_none() {
        return Ok(());
    }

    let _ = writeln!(html, "<div class=\"slot\" data-slot=\"{slot}\">");
    if let Some(title) = title {
        let _ = writeln!(html, "<h2>{}</h2>", escape_html(title));
    }
    if let Some(drill) = drill {
        let _ = writeln!(html, "<p class=\"drill\">{}</p>", escape_html(drill));
    }
    if let Some(image) = image {
        let _ = writeln!(
            html,
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(image),
            escape_html(title.unwrap_or_default())
        );
    }
    if let Some(description) = description {
        let _ = writeln!(html, "<p>{}</p>", escape_html(description));
    }
    html.push_str("</div>\n");

    Ok(())
}

/// Value of a slot field in the current section, `None` when blank.
pub(super) fn slot_value<'a>(
    source: &ReportDataSource<'a>,
    family: FieldFamily,
    slot: usize,
) -> Result<Option<&'a str>> {
    let text = source.field_value(&family.field_name(slot))?;
    Ok((!is_blank(text)).then_some(text))
}

/// Value of a report parameter, empty when unknown.
pub(super) fn parameter<'a>(params: &'a [(&'static str, String)], name: &str) -> &'a str {
    params
        .iter()
        .find(|(key, _)| *key == name)
        .map_or("", |(_, value)| value.as_str())
}

/// Escape text for use in HTML content and attribute values.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
