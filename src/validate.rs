// src/validate.rs

//! Post-generation artifact validation, run as an advisory CI gate.
//!
//! Fatal findings: missing file, empty file, wrong magic bytes. Size
//! ceiling breaches are warnings only; the budgets are architectural,
//! not protocol limits, and must not block a release on their own.

use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::font::ttf::SFNT_VERSION;
use crate::font::woff::WOFF_SIGNATURE;
use crate::font::woff2::WOFF2_SIGNATURE;
use crate::font::FontArtifacts;

/// Documented size ceilings per format, in bytes.
pub const TTF_SIZE_CEILING: u64 = 200 * 1024;
pub const WOFF_SIZE_CEILING: u64 = 100 * 1024;
pub const WOFF2_SIZE_CEILING: u64 = 50 * 1024;

/// One validation finding for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Blocks the validation step (missing/empty/wrong-format file).
    Fatal(String),
    /// Visible but non-blocking (size ceiling breach).
    Warning(String),
}

/// Everything checked about a single artifact.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub size: u64,
    pub findings: Vec<Finding>,
}

impl FileReport {
    pub fn passed(&self) -> bool {
        !self.findings.iter().any(|f| matches!(f, Finding::Fatal(_)))
    }
}

/// The full validation result over the three artifacts.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub files: Vec<FileReport>,
}

impl ValidationReport {
    /// Whether any file carries a fatal finding.
    pub fn has_fatal(&self) -> bool {
        self.files.iter().any(|f| !f.passed())
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

fn check_file(path: &Path, magic: &[u8; 4], size_ceiling: u64) -> FileReport {
    let mut findings = Vec::new();
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            findings.push(Finding::Fatal(format!("unreadable: {e}")));
            return FileReport { path: path.to_path_buf(), size: 0, findings };
        }
    };
    let size = data.len() as u64;
    if data.is_empty() {
        findings.push(Finding::Fatal("file is empty".to_string()));
    } else if data.len() < 4 || data[..4] != magic[..] {
        findings.push(Finding::Fatal(format!(
            "bad magic bytes: expected {:02X?}, got {:02X?}",
            magic,
            &data[..data.len().min(4)]
        )));
    }
    if size > size_ceiling {
        findings.push(Finding::Warning(format!(
            "size {size} exceeds ceiling {size_ceiling}"
        )));
    }
    FileReport { path: path.to_path_buf(), size, findings }
}

/// Validates the three artifacts for `font_name` under `dir`.
pub fn validate_artifacts(dir: &Path, font_name: &str) -> ValidationReport {
    let artifacts = FontArtifacts::for_font(dir, font_name);
    let ttf_magic = SFNT_VERSION.to_be_bytes();
    ValidationReport {
        files: vec![
            check_file(&artifacts.ttf, &ttf_magic, TTF_SIZE_CEILING),
            check_file(&artifacts.woff, &WOFF_SIGNATURE, WOFF_SIZE_CEILING),
            check_file(&artifacts.woff2, &WOFF2_SIGNATURE, WOFF2_SIZE_CEILING),
        ],
    }
}

/// Logs the per-file pass/fail lines and the size summary.
pub fn log_report(report: &ValidationReport) {
    for file in &report.files {
        let verdict = if file.passed() { "PASS" } else { "FAIL" };
        info!("{verdict} {} ({} bytes)", file.path.display(), file.size);
        for finding in &file.findings {
            match finding {
                Finding::Fatal(msg) => warn!("  fatal: {msg}"),
                Finding::Warning(msg) => warn!("  warning: {msg}"),
            }
        }
    }
    info!(
        "total artifact size: {} bytes across {} files",
        report.total_size(),
        report.files.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::font::generate;
    use test_log::test;

    fn generate_into(dir: &Path) -> GeneratorConfig {
        let config = GeneratorConfig {
            out_dir: dir.to_path_buf(),
            ..Default::default()
        };
        generate(&config).unwrap();
        config
    }

    #[test]
    fn test_fresh_artifacts_validate_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let config = generate_into(dir.path());
        let report = validate_artifacts(dir.path(), &config.font_name);
        assert!(!report.has_fatal());
        for file in &report.files {
            assert!(file.findings.is_empty(), "{:?}", file.findings);
            assert!(file.size > 0);
        }
    }

    #[test]
    fn test_fresh_artifacts_stay_under_ceilings() {
        let dir = tempfile::tempdir().unwrap();
        let config = generate_into(dir.path());
        let report = validate_artifacts(dir.path(), &config.font_name);
        assert!(report.files[0].size < TTF_SIZE_CEILING);
        assert!(report.files[1].size < WOFF_SIZE_CEILING);
        assert!(report.files[2].size < WOFF2_SIZE_CEILING);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let report = validate_artifacts(dir.path(), "Nothing");
        assert!(report.has_fatal());
        assert!(report.files.iter().all(|f| !f.passed()));
    }

    #[test]
    fn test_empty_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = generate_into(dir.path());
        fs::write(dir.path().join(format!("{}.woff2", config.font_name)), b"").unwrap();
        let report = validate_artifacts(dir.path(), &config.font_name);
        assert!(report.has_fatal());
        assert!(report.files[0].passed());
        assert!(report.files[1].passed());
        assert!(!report.files[2].passed());
    }

    #[test]
    fn test_wrong_magic_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = generate_into(dir.path());
        // Swap the WOFF and WOFF2 files.
        let woff = dir.path().join(format!("{}.woff", config.font_name));
        let woff2 = dir.path().join(format!("{}.woff2", config.font_name));
        let woff_data = fs::read(&woff).unwrap();
        let woff2_data = fs::read(&woff2).unwrap();
        fs::write(&woff, woff2_data).unwrap();
        fs::write(&woff2, woff_data).unwrap();
        let report = validate_artifacts(dir.path(), &config.font_name);
        assert!(report.files[0].passed());
        assert!(!report.files[1].passed());
        assert!(!report.files[2].passed());
    }

    #[test]
    fn test_size_breach_is_warning_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = generate_into(dir.path());
        // Inflate the TTF past its ceiling while keeping valid magic.
        let ttf = dir.path().join(format!("{}.ttf", config.font_name));
        let mut data = fs::read(&ttf).unwrap();
        data.resize((TTF_SIZE_CEILING + 1) as usize, 0);
        fs::write(&ttf, data).unwrap();
        let report = validate_artifacts(dir.path(), &config.font_name);
        assert!(!report.has_fatal());
        assert!(report.files[0]
            .findings
            .iter()
            .any(|f| matches!(f, Finding::Warning(_))));
    }
}
