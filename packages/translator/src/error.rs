//! Error types for the translator.
//!
//! Parse problems are reported through `ParseOutcome` instead of being
//! returned as errors, so `TranslatorError` is what a partial parse carries
//! and what projection, rendering and output return directly.

use thiserror::Error;

/// Main error type for the translator library.
#[derive(Debug, Error)]
pub enum TranslatorError {
    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML element.
    #[error("Missing required XML element: <{element}> in {context}")]
    MissingElement { element: String, context: String },

    /// Required element is present but carries no text.
    #[error("Element <{element}> has no text content")]
    MissingText { element: String },

    /// Slot capacity outside the supported range.
    #[error("Invalid slot capacity: {0}. Expected a value between 1 and {max}", max = crate::config::MAX_SLOTS_LIMIT)]
    InvalidMaxSlots(usize),

    /// Template field name that does not map onto a slot.
    #[error("Unknown report field: '{0}'")]
    UnknownField(String),

    /// No document backend registered for the requested format.
    #[error("No document backend registered for format '{format}'")]
    BackendUnavailable { format: String },

    /// A document backend failed to render.
    #[error("Backend failed to render {format}: {message}")]
    Backend { format: String, message: String },

    /// Spreadsheet serialization failed.
    #[error("Spreadsheet generation failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// PDF generation failed.
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// A best-effort parse was escalated to a failure.
    #[error("Report was only partially parsed: {source}")]
    PartialParse {
        #[source]
        source: Box<TranslatorError>,
    },
}

/// Result type alias for translator operations.
pub type Result<T> = std::result::Result<T, TranslatorError>;
