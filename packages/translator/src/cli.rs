//! Command-line interface for the translator.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::backend::BackendRegistry;
use crate::config::{TranslateOptions, DEFAULT_MAX_SLOTS};
use crate::error::{Result, TranslatorError};
use crate::output::save_model_yaml;
use crate::parser::ParseStatus;
use crate::translator::{load_report, translate, TranslateRequest, TranslateSummary};

/// Report Translator - Render report XML documents as PDF, HTML or spreadsheets.
#[derive(Parser, Debug)]
#[command(name = "report-translator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the report document
    pub input_dir: PathBuf,

    /// Report document name (".xml" is added when needed)
    pub input_file: String,

    /// Directory the output is written to
    pub output_dir: PathBuf,

    /// Output base name; the extension follows the format
    pub output_file: String,

    /// Directory holding report templates
    pub template_dir: PathBuf,

    /// Template base name
    pub template: String,

    /// Slots per section
    #[arg(long, default_value_t = DEFAULT_MAX_SLOTS)]
    pub max_slots: usize,

    /// Output format, overriding the document's Format element
    #[arg(short, long)]
    pub format: Option<String>,

    /// Fail when the document could only be parsed partially
    #[arg(long)]
    pub strict: bool,

    /// Also write the parsed report model as YAML to this path
    #[arg(long, value_name = "PATH")]
    pub dump_model: Option<PathBuf>,
}

impl Cli {
    /// Locations of the run.
    #[must_use]
    pub fn request(&self) -> TranslateRequest {
        TranslateRequest {
            input_dir: self.input_dir.clone(),
            input_file: self.input_file.clone(),
            output_dir: self.output_dir.clone(),
            output_file: self.output_file.clone(),
            template_dir: self.template_dir.clone(),
            template: self.template.clone(),
        }
    }

    /// Options of the run.
    pub fn options(&self) -> Result<TranslateOptions> {
        let options = TranslateOptions::default()
            .with_max_slots(self.max_slots)?
            .with_strict(self.strict);
        Ok(match &self.format {
            Some(format) => options.with_format_override(format.clone()),
            None => options,
        })
    }
}

/// Run the CLI.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    translate_command(&cli)
}

/// Execute a translation.
fn translate_command(cli: &Cli) -> Result<ExitCode> {
    let options = cli.options()?;
    let request = cli.request();
    let input = request.input_path();

    // Validate directories before doing any work
    ensure_dir(&request.output_dir, "Output")?;
    if !input.is_file() {
        return Err(TranslatorError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input document does not exist: {}", input.display()),
        )));
    }

    println!(
        "{} {} with template {}",
        style("Translating").bold(),
        style(input.display()).cyan(),
        style(&request.template).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    if let Some(path) = &cli.dump_model {
        pb.set_message("Writing report model...");
        let dumped = load_report(&input, &options)
            .and_then(|(report, _, _)| save_model_yaml(&report, path));
        if let Err(e) = dumped {
            pb.finish_and_clear();
            return Err(e);
        }
    }

    pb.set_message("Rendering report...");
    let registry = BackendRegistry::with_defaults();
    let summary = match translate(&request, &options, &registry) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();
    print_summary(&summary, cli.dump_model.as_deref());

    Ok(match summary.status {
        ParseStatus::Failed => ExitCode::FAILURE,
        ParseStatus::Complete | ParseStatus::Partial => ExitCode::SUCCESS,
    })
}

fn print_summary(summary: &TranslateSummary, model: Option<&Path>) {
    println!("  Format: {}", style(summary.format).green());
    println!("  Sections: {}", summary.sections);
    match summary.status {
        ParseStatus::Complete => {}
        ParseStatus::Partial => println!(
            "  {} {}",
            style("Partial:").yellow().bold(),
            summary.parse_error.as_deref().unwrap_or_default()
        ),
        ParseStatus::Failed => println!(
            "  {} {}",
            style("Unreadable:").red().bold(),
            summary.parse_error.as_deref().unwrap_or_default()
        ),
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        summary.output.display()
    );
    if let Some(model) = model {
        println!("{} {}", style("Model:").green().bold(), model.display());
    }
}

fn ensure_dir(dir: &Path, label: &str) -> Result<()> {
    if !dir.exists() {
        return Err(TranslatorError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{label} directory does not exist: {}", dir.display()),
        )));
    }
    if !dir.is_dir() {
        return Err(TranslatorError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{label} path is not a directory: {}", dir.display()),
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARGS: [&str; 7] = [
        "report-translator",
        "in",
        "q1_sales",
        "out",
        "q1",
        "templates",
        "classic",
    ];

    #[test]
    fn test_cli_parse_positionals() {
        let cli = Cli::parse_from(ARGS);

        assert_eq!(cli.input_dir, PathBuf::from("in"));
        assert_eq!(cli.input_file, "q1_sales");
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.output_file, "q1");
        assert_eq!(cli.template_dir, PathBuf::from("templates"));
        assert_eq!(cli.template, "classic");
        assert_eq!(cli.max_slots, DEFAULT_MAX_SLOTS);
        assert!(cli.format.is_none());
        assert!(!cli.strict);
        assert!(cli.dump_model.is_none());
    }

    #[test]
    fn test_cli_parse_options() {
        let args: Vec<&str> = ARGS
            .iter()
            .copied()
            .chain(["--max-slots", "4", "--format", "html", "--strict"])
            .collect();
        let cli = Cli::parse_from(args);

        let options = cli.options().unwrap();
        assert_eq!(options.max_slots, 4);
        assert!(options.strict);
        assert_eq!(options.format_override.as_deref(), Some("html"));
    }

    #[test]
    fn test_cli_rejects_missing_positionals() {
        let err = Cli::try_parse_from(ARGS[..6].iter().copied()).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_invalid_max_slots() {
        let args: Vec<&str> = ARGS.iter().copied().chain(["--max-slots", "0"]).collect();
        let cli = Cli::parse_from(args);
        assert!(matches!(
            cli.options(),
            Err(TranslatorError::InvalidMaxSlots(0))
        ));
    }

    #[test]
    fn test_ensure_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ensure_dir(dir.path(), "Output").is_ok());
        assert!(ensure_dir(&dir.path().join("absent"), "Output").is_err());
    }
}
