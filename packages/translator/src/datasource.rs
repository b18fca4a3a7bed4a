//! Field provider over a [`Report`] for paginated document backends.
//!
//! Templates address per-section values with names like `Section_Title_0`
//! or `Section_Drill_Parameters_1`: a field family followed by a slot index.
//! [`ReportDataSource`] walks the sections with a cursor and resolves those
//! names against the current section. Report-wide values are handed to the
//! template as parameters, see [`report_parameters`].

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TranslatorError};
use crate::types::{Report, Section};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FIELD_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Section_(Title|Description|Drill_Parameters|Image)_(\d+)$").expect("valid regex")
});

/// Per-slot field families a template can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldFamily {
    /// `Section_Title_<n>`.
    Title,
    /// `Section_Description_<n>`.
    Description,
    /// `Section_Drill_Parameters_<n>`.
    DrillParameters,
    /// `Section_Image_<n>`.
    Image,
}

impl FieldFamily {
    /// All families, in template declaration order.
    pub const ALL: [Self; 4] = [
        Self::Description,
        Self::DrillParameters,
        Self::Image,
        Self::Title,
    ];

    /// Field name prefix, without the trailing slot index.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Title => "Section_Title_",
            Self::Description => "Section_Description_",
            Self::DrillParameters => "Section_Drill_Parameters_",
            Self::Image => "Section_Image_",
        }
    }

    /// Template field name for a slot.
    ///
    /// # Examples
    /// ```
    /// use report_translator::datasource::FieldFamily;
    ///
    /// assert_eq!(FieldFamily::DrillParameters.field_name(1), "Section_Drill_Parameters_1");
    /// ```
    #[must_use]
    pub fn field_name(&self, slot: usize) -> String {
        format!("{}{slot}", self.prefix())
    }

    /// Value of this family in a section slot.
    #[must_use]
    pub fn value<'a>(&self, section: &'a Section, slot: usize) -> Option<&'a str> {
        match self {
            Self::Title => section.title(slot),
            Self::Description => section.description(slot),
            Self::DrillParameters => section.drill_parameters(slot),
            Self::Image => section.image(slot),
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Title" => Some(Self::Title),
            "Description" => Some(Self::Description),
            "Drill_Parameters" => Some(Self::DrillParameters),
            "Image" => Some(Self::Image),
            _ => None,
        }
    }
}

/// Split a template field name into its family and slot index.
///
/// # Examples
/// ```
/// use report_translator::datasource::{parse_field_name, FieldFamily};
///
/// assert_eq!(parse_field_name("Section_Image_3"), Some((FieldFamily::Image, 3)));
/// assert_eq!(parse_field_name("title"), None);
/// ```
#[must_use]
pub fn parse_field_name(name: &str) -> Option<(FieldFamily, usize)> {
    let caps = FIELD_NAME_PATTERN.captures(name)?;
    let family = FieldFamily::from_label(caps.get(1)?.as_str())?;
    let slot = caps.get(2)?.as_str().parse().ok()?;
    Some((family, slot))
}

/// Every per-slot field name a template for `max_slots` slots must declare.
#[must_use]
pub fn template_field_names(max_slots: usize) -> Vec<String> {
    FieldFamily::ALL
        .iter()
        .flat_map(|family| (0..max_slots).map(move |slot| family.field_name(slot)))
        .collect()
}

/// Names of the report-wide template parameters.
pub const PARAMETER_NAMES: [&str; 5] = ["title", "user", "email", "pageHeader", "pageFooter"];

/// Report-wide template parameters, in [`PARAMETER_NAMES`] order.
#[must_use]
pub fn report_parameters(report: &Report) -> Vec<(&'static str, String)> {
    vec![
        ("title", report.title.clone()),
        ("user", report.user()),
        ("email", report.email.clone()),
        ("pageHeader", report.page_header.clone()),
        ("pageFooter", report.page_footer.clone()),
    ]
}

/// Cursor over the sections of a report.
///
/// The cursor starts before the first section; call [`next`](Self::next)
/// before reading fields.
#[derive(Debug)]
pub struct ReportDataSource<'a> {
    report: &'a Report,
    position: Option<usize>,
}

impl<'a> ReportDataSource<'a> {
    /// Create a data source positioned before the first section.
    #[must_use]
    pub fn new(report: &'a Report) -> Self {
        Self {
            report,
            position: None,
        }
    }

    /// Advance to the next section. Returns `false` once all sections were visited.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        let next = self.position.map_or(0, |p| p + 1);
        if next < self.report.sections.len() {
            self.position = Some(next);
            true
        } else {
            self.position = Some(self.report.sections.len());
            false
        }
    }

    /// Index of the current section.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position.filter(|&p| p < self.report.sections.len())
    }

    /// The section under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&'a Section> {
        self.position().and_then(|p| self.report.sections.get(p))
    }

    /// Value of a named field in the current section.
    ///
    /// Returns [`TranslatorError::UnknownField`] for names that are not a
    /// per-slot field, name a slot outside the report's capacity, or are
    /// read while the cursor is not on a section.
    pub fn field_value(&self, name: &str) -> Result<&'a str> {
        let unknown = || TranslatorError::UnknownField(name.to_string());
        let (family, slot) = parse_field_name(name).ok_or_else(unknown)?;
        let section = self.current().ok_or_else(unknown)?;
        family.value(section, slot).ok_or_else(unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_section_report() -> Report {
        let mut report = Report::new(2);
        report.first_name = "Jane".to_string();
        report.last_name = "Doe".to_string();

        let mut first = Section::new(2);
        first.set_title(0, "Revenue");
        first.set_drill_parameters(1, "region=west");
        report.add_section(first);

        let mut second = Section::new(2);
        second.set_image(0, "costs.png");
        report.add_section(second);

        report
    }

    #[test]
    fn test_parse_field_name() {
        assert_eq!(
            parse_field_name("Section_Title_0"),
            Some((FieldFamily::Title, 0))
        );
        assert_eq!(
            parse_field_name("Section_Description_12"),
            Some((FieldFamily::Description, 12))
        );
        assert_eq!(
            parse_field_name("Section_Drill_Parameters_1"),
            Some((FieldFamily::DrillParameters, 1))
        );
        assert_eq!(parse_field_name("Section_Title_"), None);
        assert_eq!(parse_field_name("Section_Chart_0"), None);
        assert_eq!(parse_field_name("xSection_Title_0"), None);
    }

    #[test]
    fn test_field_name_round_trip() {
        for family in FieldFamily::ALL {
            assert_eq!(parse_field_name(&family.field_name(4)), Some((family, 4)));
        }
    }

    #[test]
    fn test_template_field_names() {
        let names = template_field_names(2);
        assert_eq!(
            names,
            vec![
                "Section_Description_0",
                "Section_Description_1",
                "Section_Drill_Parameters_0",
                "Section_Drill_Parameters_1",
                "Section_Image_0",
                "Section_Image_1",
                "Section_Title_0",
                "Section_Title_1",
            ]
        );
    }

    #[test]
    fn test_cursor_walks_sections() {
        let report = two_section_report();
        let mut source = ReportDataSource::new(&report);

        assert!(source.current().is_none());
        assert!(source.next());
        assert_eq!(source.field_value("Section_Title_0").unwrap(), "Revenue");
        assert_eq!(
            source.field_value("Section_Drill_Parameters_1").unwrap(),
            "region=west"
        );
        assert_eq!(source.field_value("Section_Image_0").unwrap(), " ");

        assert!(source.next());
        assert_eq!(source.field_value("Section_Image_0").unwrap(), "costs.png");

        assert!(!source.next());
        assert!(!source.next());
        assert!(source.field_value("Section_Title_0").is_err());
    }

    #[test]
    fn test_field_value_errors() {
        let report = two_section_report();
        let mut source = ReportDataSource::new(&report);

        // Before the first advance.
        assert!(source.field_value("Section_Title_0").is_err());

        source.next();
        assert!(matches!(
            source.field_value("Section_Title_2"),
            Err(TranslatorError::UnknownField(_))
        ));
        assert!(source.field_value("title").is_err());
    }

    #[test]
    fn test_empty_report_has_no_sections() {
        let report = Report::new(2);
        let mut source = ReportDataSource::new(&report);
        assert!(!source.next());
    }

    #[test]
    fn test_report_parameters() {
        let report = two_section_report();
        let params = report_parameters(&report);

        let names: Vec<_> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, PARAMETER_NAMES);
        assert_eq!(params[1].1, "Jane Doe");
        assert_eq!(params[0].1, " ");
    }
}
