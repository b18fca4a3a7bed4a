//! Writing artifacts to disk.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::Report;

/// Write `bytes` to `path` atomically.
///
/// The content goes to a hidden temp file next to `path` first, is synced,
/// and then renamed over the destination. The temp file is removed when any
/// step fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .map_or_else(|| "output".into(), |n| n.to_string_lossy());
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    let result = write_then_rename(&temp_file, path, bytes);
    if result.is_err() && temp_file.exists() {
        let _ = fs::remove_file(&temp_file);
    }
    result
}

fn write_then_rename(temp_file: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    {
        let mut file = File::create(temp_file)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(temp_file, path)?;
    Ok(())
}

/// Serialize the report model to YAML.
pub fn generate_model_yaml(report: &Report) -> Result<String> {
    Ok(serde_yaml_ng::to_string(report)?)
}

/// Write the report model as YAML to `path`, creating parent directories.
pub fn save_model_yaml(report: &Report, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = generate_model_yaml(report)?;
    write_atomic(path, content.as_bytes())?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Section;
    use tempfile::tempdir;

    fn sample_report() -> Report {
        let mut report = Report::new(2);
        report.first_name = "Jane".to_string();
        report.last_name = "Doe".to_string();
        report.email = "jane@x.com".to_string();
        let mut section = Section::new(2);
        section.set_title(0, "Revenue");
        report.add_section(section);
        report
    }

    #[test]
    fn test_write_atomic_creates_and_replaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.xls");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!dir.path().join(".out.xls.tmp").exists());
    }

    #[test]
    fn test_write_atomic_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.pdf");

        assert!(write_atomic(&path, b"data").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_generate_model_yaml() {
        let yaml = generate_model_yaml(&sample_report()).unwrap();

        assert!(yaml.contains("first_name: Jane"));
        assert!(yaml.contains("email: jane@x.com"));
        assert!(yaml.contains("- Revenue"));

        let back: Report = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(back, sample_report());
    }

    #[test]
    fn test_save_model_yaml_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug").join("model.yaml");

        let written = save_model_yaml(&sample_report(), &path).unwrap();
        assert_eq!(written, path);
        assert!(fs::read_to_string(&path).unwrap().contains("last_name: Doe"));
    }
}
