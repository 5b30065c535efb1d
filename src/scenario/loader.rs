//! Scenario file loading
//!
//! Supports YAML and TOML scenario files.

use std::fs;
use std::path::Path;

use crate::errors::{Result, SteplineError};

use super::Scenario;

/// Maximum scenario file size (1 MB) - prevents OOM from malicious files
const MAX_SCENARIO_FILE_SIZE: u64 = 1024 * 1024;

/// Load a scenario from a file (YAML or TOML)
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let metadata = fs::metadata(path)?;

    let file_size = metadata.len();
    if file_size > MAX_SCENARIO_FILE_SIZE {
        return Err(SteplineError::Argument(format!(
            "Scenario file too large: {} bytes (max {} bytes)",
            file_size, MAX_SCENARIO_FILE_SIZE
        )));
    }

    let content = fs::read_to_string(path)?;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let scenario: Scenario = match extension.to_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| {
            SteplineError::Argument(format!("Failed to parse YAML scenario: {}", e))
        })?,
        "toml" => toml::from_str(&content).map_err(|e| {
            SteplineError::Argument(format!("Failed to parse TOML scenario: {}", e))
        })?,
        _ => {
            // Try YAML first, then TOML
            serde_yaml::from_str(&content).or_else(|_| {
                toml::from_str(&content).map_err(|e| {
                    SteplineError::Argument(format!("Failed to parse scenario: {}", e))
                })
            })?
        }
    };

    validate_scenario(&scenario)?;

    Ok(scenario)
}

/// Validate basic scenario structure
pub fn validate_scenario(scenario: &Scenario) -> Result<()> {
    if scenario.name.is_empty() {
        return Err(SteplineError::Argument(
            "Scenario must have a name".to_string(),
        ));
    }

    if scenario.steps.is_empty() {
        return Err(SteplineError::Argument(
            "Scenario must have at least one step".to_string(),
        ));
    }

    for (i, step) in scenario.steps.iter().enumerate() {
        let step_prefix = format!("Step {} ({})", i, step.name);

        if step.samples < 1 {
            return Err(SteplineError::Argument(format!(
                "{}: samples must be >= 1",
                step_prefix
            )));
        }

        if let Some(ref delay) = step.delay {
            if delay.trim().is_empty() {
                return Err(SteplineError::Argument(format!(
                    "{}: delay expression must not be blank",
                    step_prefix
                )));
            }
        }

        for expectation in &step.expectations {
            if expectation.trim().is_empty() {
                return Err(SteplineError::Argument(format!(
                    "{}: expectation expression must not be blank",
                    step_prefix
                )));
            }
        }

        for (name, expression) in &step.extractions {
            if name.trim().is_empty() {
                return Err(SteplineError::Argument(format!(
                    "{}: extraction name must not be blank",
                    step_prefix
                )));
            }
            if expression.trim().is_empty() {
                return Err(SteplineError::Argument(format!(
                    "{}: extraction \"{}\" must have an expression",
                    step_prefix, name
                )));
            }
        }
    }

    Ok(())
}
