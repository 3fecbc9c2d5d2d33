//! JSON module report

use crate::output::{ModuleReport, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Formats the report as a pretty-printed JSON array
pub fn format_json_report(report: &[ModuleReport]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the report to `output_path`, replacing any existing file
///
/// # Arguments
///
/// * `report` - Module entries in report order
/// * `output_path` - Destination file
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Serialization or IO failed
pub fn write_json_report(report: &[ModuleReport], output_path: &Path) -> OutputResult<()> {
    let json = format_json_report(report)?;

    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;

    tracing::info!("Saved module report to {}", output_path.display());
    Ok(())
}
