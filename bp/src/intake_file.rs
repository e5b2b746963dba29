//! Intake file loading

use eyre::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use bipcore::IntakeRecord;

/// Load an intake from YAML or JSON, chosen by extension
///
/// `.json` is parsed as JSON. Everything else, including `.yaml`, `.yml`, and
/// no extension, is parsed as YAML.
pub fn load_intake<P: AsRef<Path>>(path: P) -> Result<IntakeRecord> {
    let path = path.as_ref();
    debug!(path = %path.display(), "load_intake: called");

    let content =
        fs::read_to_string(path).context(format!("Failed to read intake file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let intake: IntakeRecord = if is_json {
        debug!("load_intake: parsing as JSON");
        serde_json::from_str(&content).context(format!("Failed to parse intake JSON {}", path.display()))?
    } else {
        debug!("load_intake: parsing as YAML");
        serde_yaml::from_str(&content).context(format!("Failed to parse intake YAML {}", path.display()))?
    };

    debug!(
        behaviors = intake.target_behaviors.len(),
        functions = intake.functions.len(),
        "load_intake: parsed"
    );
    Ok(intake)
}

/// A filled-in sample intake, as YAML
pub fn intake_template() -> Result<String> {
    let yaml = serde_yaml::to_string(&IntakeRecord::sample()).context("Failed to serialize sample intake")?;
    Ok(format!(
        "# FBA intake for `bp generate`\n# Run `bp categories` for the accepted category labels.\n{yaml}"
    ))
}
