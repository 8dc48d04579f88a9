//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying sweep
//! configurations and validation results in text and JSON.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::config::{ConfigHasher, SweepConfig, ValidationResult};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Comparison of two sweep files by section fingerprint.
#[derive(Debug, serde::Serialize)]
pub struct SweepDiff {
    /// Short hash of the left document.
    pub left_hash: String,
    /// Short hash of the right document.
    pub right_hash: String,
    /// Whether the dataset selectors differ.
    pub dataset_changed: bool,
    /// Whether the hyperparameter search spaces differ.
    pub search_space_changed: bool,
    /// Whether the model settings differ.
    pub model_changed: bool,
}

/// Hyperparameter row for table display.
#[derive(Tabled)]
struct ParamRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Range / Choices")]
    range: String,
}

impl SweepDiff {
    /// Computes the diff between two sweep configurations.
    #[must_use]
    pub fn compute(left: &SweepConfig, right: &SweepConfig) -> Self {
        let hasher = ConfigHasher::new();
        Self {
            left_hash: hasher.short_hash(&hasher.hash_config(left)),
            right_hash: hasher.short_hash(&hasher.hash_config(right)),
            dataset_changed: !ConfigHasher::hashes_match(
                &hasher.hash_dataset(left),
                &hasher.hash_dataset(right),
            ),
            search_space_changed: !ConfigHasher::hashes_match(
                &hasher.hash_search_space(left),
                &hasher.hash_search_space(right),
            ),
            model_changed: !ConfigHasher::hashes_match(
                &hasher.hash_model(&left.model),
                &hasher.hash_model(&right.model),
            ),
        }
    }

    /// Returns true if the two documents describe the same sweep.
    #[must_use]
    pub const fn is_same(&self) -> bool {
        !self.dataset_changed && !self.search_space_changed && !self.model_changed
    }
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a sweep configuration summary for display.
    #[must_use]
    pub fn format_summary(&self, config: &SweepConfig) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&SummaryJson::from(config)).unwrap_or_default()
            }
            OutputFormat::Text => Self::format_summary_text(config),
        }
    }

    /// Formats a summary as text.
    fn format_summary_text(config: &SweepConfig) -> String {
        let hasher = ConfigHasher::new();
        let hash = hasher.hash_config(config);

        let mut output = String::new();

        let _ = write!(
            output,
            "\nSweep: {} (fingerprint {})\n",
            config.experiment_id().bold(),
            hasher.short_hash(&hash)
        );
        let _ = write!(
            output,
            "   Dataset: {} pair_id {:?}\n\n",
            config.dataset.name, config.dataset.pair_id
        );

        let rows: Vec<ParamRow> = config
            .hyperparameters
            .iter()
            .map(|(name, spec)| ParamRow {
                name: name.clone(),
                kind: spec.kind().to_string(),
                range: Self::truncate(&spec.describe(), 40),
            })
            .collect();

        if rows.is_empty() {
            output.push_str("   No hyperparameters defined.\n");
        } else {
            let table = Table::new(rows).to_string();
            output.push_str(&table);
            output.push('\n');
        }

        let _ = write!(
            output,
            "\n{} tunable hyperparameters\n",
            config.tunable_count().to_string().green()
        );

        output.push_str("\nModel settings:\n");
        if let Some(name) = &config.model.name {
            let _ = writeln!(output, "   name: {name}");
        }
        if let Some(batch_size) = config.model.batch_size {
            let _ = writeln!(output, "   batch_size: {batch_size}");
        }
        if let Some(loss) = &config.model.loss {
            let _ = writeln!(output, "   loss: {loss}");
        }
        if let Some(max_epochs) = config.model.max_epochs {
            let _ = writeln!(output, "   max_epochs: {max_epochs}");
        }
        if let Some(seed) = config.model.seed {
            let _ = writeln!(output, "   seed: {seed}");
        }
        if !config.model.extra.is_empty() {
            let keys: Vec<&str> = config.model.extra.keys().map(String::as_str).collect();
            let _ = writeln!(output, "   {} other keys: {}", keys.len(), keys.join(", "));
        }

        output
    }

    /// Formats a validation result for display.
    #[must_use]
    pub fn format_validation(&self, result: &ValidationResult, show_warnings: bool) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&ValidationJson::from(result)).unwrap_or_default()
            }
            OutputFormat::Text => Self::format_validation_text(result, show_warnings),
        }
    }

    /// Formats a validation result as text.
    fn format_validation_text(result: &ValidationResult, show_warnings: bool) -> String {
        let mut output = String::new();

        if result.is_valid() {
            let _ = writeln!(output, "{} Sweep file is valid.", "✓".green());
        } else {
            let _ = writeln!(
                output,
                "{} Sweep file has {} schema error(s):",
                "✗".red(),
                result.error_count()
            );
            for error in &result.errors {
                let _ = writeln!(output, "   - {error}");
            }
        }

        if show_warnings && !result.warnings.is_empty() {
            let _ = writeln!(output, "\n{} Warnings:", "⚠".yellow());
            for warning in &result.warnings {
                let _ = writeln!(output, "   - {warning}");
            }
        }

        output
    }

    /// Formats a sweep diff for display.
    #[must_use]
    pub fn format_diff(&self, diff: &SweepDiff) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(diff).unwrap_or_default(),
            OutputFormat::Text => {
                if diff.is_same() {
                    return format!(
                        "{} Documents describe the same sweep ({}).\n",
                        "✓".green(),
                        diff.left_hash
                    );
                }

                let mut output = format!(
                    "{} Documents differ ({} vs {}):\n",
                    "⚠".yellow(),
                    diff.left_hash,
                    diff.right_hash
                );
                let changed = |flag: bool| if flag { "changed".yellow() } else { "same".green() };
                let _ = writeln!(output, "   dataset:       {}", changed(diff.dataset_changed));
                let _ = writeln!(
                    output,
                    "   search space:  {}",
                    changed(diff.search_space_changed)
                );
                let _ = writeln!(output, "   model:         {}", changed(diff.model_changed));
                output
            }
        }
    }

    /// Truncates a string to a maximum length.
    fn truncate(s: &str, max_len: usize) -> String {
        if s.len() <= max_len {
            s.to_string()
        } else {
            format!("{}...", &s[..max_len - 3])
        }
    }
}

// JSON serialization helpers

#[derive(serde::Serialize)]
struct SummaryJson {
    experiment_id: String,
    fingerprint: String,
    dataset: DatasetJson,
    tunable_count: usize,
    hyperparameters: Vec<ParamJson>,
    model: serde_json::Value,
}

#[derive(serde::Serialize)]
struct DatasetJson {
    name: String,
    pair_id: Vec<i64>,
}

#[derive(serde::Serialize)]
struct ParamJson {
    name: String,
    kind: String,
    range: String,
}

#[derive(serde::Serialize)]
struct ValidationJson {
    valid: bool,
    errors: Vec<SchemaErrorJson>,
    warnings: Vec<String>,
}

#[derive(serde::Serialize)]
struct SchemaErrorJson {
    field: String,
    message: String,
}

impl From<&SweepConfig> for SummaryJson {
    fn from(config: &SweepConfig) -> Self {
        let hasher = ConfigHasher::new();
        Self {
            experiment_id: config.experiment_id(),
            fingerprint: hasher.hash_config(config),
            dataset: DatasetJson {
                name: config.dataset.name.clone(),
                pair_id: config.dataset.pair_id.clone(),
            },
            tunable_count: config.tunable_count(),
            hyperparameters: config
                .hyperparameters
                .iter()
                .map(|(name, spec)| ParamJson {
                    name: name.clone(),
                    kind: spec.kind().to_string(),
                    range: spec.describe(),
                })
                .collect(),
            model: serde_json::to_value(&config.model).unwrap_or_default(),
        }
    }
}

impl From<&ValidationResult> for ValidationJson {
    fn from(result: &ValidationResult) -> Self {
        Self {
            valid: result.is_valid(),
            errors: result
                .errors
                .iter()
                .map(|e| SchemaErrorJson {
                    field: e.field.clone(),
                    message: e.message.clone(),
                })
                .collect(),
            warnings: result.warnings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigParser;

    const SWEEP: &str = r"
dataset:
  name: Lorenz_Official
  pair_id: [8]
hyperparameters:
  lr:
    type: loguniform
    lower_bound: 1.0e-5
    upper_bound: 0.01
model:
  name: spacetime
  batch_size: 128
";

    fn load() -> SweepConfig {
        ConfigParser::new().parse_yaml(SWEEP, None).unwrap()
    }

    #[test]
    fn test_summary_text_mentions_params() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let output = formatter.format_summary(&load());
        assert!(output.contains("lr"));
        assert!(output.contains("loguniform"));
        assert!(output.contains("Lorenz_Official"));
    }

    #[test]
    fn test_summary_json_parses() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_summary(&load());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["tunable_count"], 1);
        assert_eq!(value["dataset"]["name"], "Lorenz_Official");
    }

    #[test]
    fn test_diff_same_document() {
        let config = load();
        let diff = SweepDiff::compute(&config, &config);
        assert!(diff.is_same());

        let formatter = OutputFormatter::new(OutputFormat::Text);
        assert!(formatter.format_diff(&diff).contains("same sweep"));
    }

    #[test]
    fn test_diff_detects_search_space_change() {
        let left = load();
        let mut right = left.clone();
        right.hyperparameters.insert(
            String::from("lr"),
            crate::config::HyperparameterSpec::LogUniform {
                lower_bound: 1e-4,
                upper_bound: 0.01,
            },
        );

        let diff = SweepDiff::compute(&left, &right);
        assert!(!diff.is_same());
        assert!(diff.search_space_changed);
        assert!(!diff.dataset_changed);
        assert!(!diff.model_changed);
    }

    #[test]
    fn test_validation_text_lists_errors() {
        let result = ValidationResult {
            errors: vec![crate::error::SchemaError::new(
                "dataset.pair_id",
                "must not be empty",
            )],
            warnings: vec![String::from("model.batch_size is not set")],
        };

        let formatter = OutputFormatter::new(OutputFormat::Text);
        let output = formatter.format_validation(&result, true);
        assert!(output.contains("dataset.pair_id"));
        assert!(output.contains("Warnings"));
    }
}
