//! Paginated document backends.
//!
//! A backend turns a [`Report`] and a [`ReportTemplate`] into document bytes
//! for one output format. Backends are registered per format in a
//! [`BackendRegistry`]; callers can plug in their own (for example a
//! word-processor or presentation renderer) next to the built-in HTML and
//! PDF ones.

mod html;
mod pdf;

use std::collections::HashMap;

pub use html::HtmlBackend;
pub use pdf::PdfBackend;

use crate::error::Result;
use crate::template::ReportTemplate;
use crate::types::{OutputFormat, Report};

/// Trait for paginated document backends.
pub trait DocumentBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Render the report.
    ///
    /// # Arguments
    /// * `report` - The parsed report
    /// * `template` - Template selected by the caller
    /// * `format` - Format the output must be in
    fn render(
        &self,
        report: &Report,
        template: &ReportTemplate,
        format: OutputFormat,
    ) -> Result<Vec<u8>>;
}

/// Registry mapping output formats to backends.
pub struct BackendRegistry {
    backends: HashMap<OutputFormat, Box<dyn DocumentBackend>>,
}

impl BackendRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// Create a registry with the built-in HTML and PDF backends.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(OutputFormat::Html, HtmlBackend);
        registry.register(OutputFormat::Pdf, PdfBackend::default());
        registry
    }

    /// Register a backend for a format, replacing any previous one.
    pub fn register(&mut self, format: OutputFormat, backend: impl DocumentBackend + 'static) {
        self.backends.insert(format, Box::new(backend));
    }

    /// Get the backend for a format.
    #[must_use]
    pub fn get(&self, format: OutputFormat) -> Option<&dyn DocumentBackend> {
        self.backends.get(&format).map(|b| b.as_ref())
    }

    /// Check if a backend is registered for a format.
    #[must_use]
    pub fn has_backend(&self, format: OutputFormat) -> bool {
        self.backends.contains_key(&format)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut formats: Vec<_> = self.backends.keys().map(OutputFormat::as_str).collect();
        formats.sort_unstable();
        f.debug_struct("BackendRegistry")
            .field("formats", &formats)
            .finish()
    }
}
