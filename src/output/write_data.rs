use crate::dynamics::BenchmarkReport;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Serialises the whole run, warm-up steps included, as yaml.
pub fn report_to_yaml(report: &BenchmarkReport) -> Result<String> {
    Ok(serde_yaml::to_string(report)?)
}

/// Replaces `file_path` with the yaml form of `report`.
pub fn write_report(report: &BenchmarkReport, file_path: &Path) -> Result<()> {
    let yaml: String = report_to_yaml(report)?;
    fs::write(file_path, yaml)
        .with_context(|| format!("Unable to write report file {}", file_path.display()))?;
    Ok(())
}
