//! Report templates handed to paginated document backends.
//!
//! The template's format belongs to the backend. The translator only checks
//! that the template mentions every field and parameter the report model
//! provides.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::template_path;
use crate::datasource::{template_field_names, PARAMETER_NAMES};
use crate::error::Result;

/// A report template located at `<dir>/<name>.jrxml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTemplate {
    /// Template base name.
    pub name: String,

    /// Path of the template source.
    pub path: PathBuf,

    /// Template source, when the file exists.
    pub source: Option<String>,
}

impl ReportTemplate {
    /// Load a template. A missing file is not an error; `source` stays `None`.
    pub fn load(dir: &Path, name: &str) -> Result<Self> {
        let path = template_path(dir, name);
        let source = if path.is_file() {
            Some(fs::read_to_string(&path)?)
        } else {
            tracing::warn!(path = %path.display(), "Template not found");
            None
        };

        Ok(Self {
            name: name.to_string(),
            path,
            source,
        })
    }

    /// Create a template from source text.
    #[must_use]
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            source: Some(source.into()),
        }
    }

    /// Field and parameter names the template does not mention.
    ///
    /// A name counts as mentioned when it appears quoted in the source
    /// (`"Section_Title_0"`). Without source every name is missing.
    ///
    /// # Examples
    /// ```
    /// use report_translator::template::ReportTemplate;
    ///
    /// let template = ReportTemplate::from_source("t", r#"<parameter name="title"/>"#);
    /// let missing = template.missing_fields(1);
    /// assert!(!missing.contains(&"title".to_string()));
    /// assert!(missing.contains(&"Section_Title_0".to_string()));
    /// ```
    #[must_use]
    pub fn missing_fields(&self, max_slots: usize) -> Vec<String> {
        let required = PARAMETER_NAMES
            .iter()
            .map(|p| (*p).to_string())
            .chain(template_field_names(max_slots));

        match &self.source {
            Some(source) => required
                .filter(|name| !source.contains(&format!("\"{name}\"")))
                .collect(),
            None => required.collect(),
        }
    }
}
