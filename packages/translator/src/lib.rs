//! Report Translator - Render report XML documents as PDF, HTML or spreadsheets.
//!
//! A report document carries author metadata, header and footer texts, an
//! output format and a list of sections. Each section holds a fixed number
//! of chart slots plus optional tabular data. This crate parses such a
//! document into a [`Report`] and renders it either as a workbook (one
//! overview sheet plus one sheet per section) or through a paginated
//! document backend.
//!
//! # Example
//!
//! ```
//! use report_translator::{parse_report, project};
//!
//! let xml = r#"<Report>
//!     <FirstName>Jane</FirstName><LastName>Doe</LastName><Email>jane@x.com</Email>
//!     <Format>xls</Format>
//!     <Section><SectionTitle>Revenue</SectionTitle></Section>
//! </Report>"#;
//!
//! let report = parse_report(xml, 2).report;
//! let grid = project(&report);
//! assert_eq!(grid.sheets[1].name, "Revenue");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, options and path helpers
//! - [`types`]: Report model (Report, Section, OutputFormat)
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML utilities
//! - [`parser`]: Best-effort report parsing
//! - [`table`]: Per-section table extraction
//! - [`grid`]: Tabular projection
//! - [`xlsx`]: Workbook writer
//! - [`datasource`]: Field provider for paginated backends
//! - [`template`]: Report templates
//! - [`backend`]: Paginated document backends
//! - [`render`]: Format dispatch
//! - [`output`]: Atomic file output and model dumps
//! - [`translator`]: Main translator service
//! - [`cli`]: Command-line interface

pub mod backend;
pub mod cli;
pub mod config;
pub mod datasource;
pub mod error;
pub mod grid;
pub mod output;
pub mod parser;
pub mod render;
pub mod table;
pub mod template;
pub mod translator;
pub mod types;
pub mod xlsx;
pub mod xml;

// Re-export main functions
pub use translator::{translate, TranslateRequest, TranslateSummary};

// Re-export commonly used items
pub use backend::{BackendRegistry, DocumentBackend};
pub use config::TranslateOptions;
pub use error::{Result, TranslatorError};
pub use grid::{project, Grid, Sheet};
pub use parser::{parse_report, ParseOutcome, ParseStatus};
pub use render::{render, Rendered, Route};
pub use types::{OutputFormat, Report, Section};
