//! Schema validation for sweep configuration documents.
//!
//! Validation is a pure check over an in-memory document, so it can be run
//! on programmatically constructed sweeps as well as loaded files. All
//! violations are collected before reporting; nothing fails fast.

use std::collections::HashSet;
use tracing::debug;

use crate::error::SchemaError;

use super::spec::{DatasetRef, HyperparameterSpec, ModelConfig, SweepConfig};

/// Hyperparameter names the spacetime harness conventionally tunes.
const CONVENTIONAL_PARAMS: &[&str] = &[
    "dropout",
    "horizon",
    "kernel_dim",
    "lag",
    "lr",
    "n_blocks",
    "weight_decay",
];

/// Validator for sweep configurations.
#[derive(Debug)]
pub struct ConfigValidator {
    /// Names treated as conventional for this harness.
    conventional_params: HashSet<String>,
}

/// Validation result containing all errors and warnings found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Schema violations, in document order.
    pub errors: Vec<SchemaError>,
    /// Non-fatal issues.
    pub warnings: Vec<String>,
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator {
    /// Creates a validator with the default conventional parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            conventional_params: CONVENTIONAL_PARAMS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    /// Adds a name to the conventional parameter set.
    pub fn add_conventional_param(&mut self, name: impl Into<String>) {
        self.conventional_params.insert(name.into());
    }

    /// Validates a sweep configuration, collecting every violation.
    #[must_use]
    pub fn validate(&self, config: &SweepConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_dataset(&config.dataset, &mut result);
        self.validate_hyperparameters(config, &mut result);
        Self::validate_model(&config.model, &mut result);

        if result.errors.is_empty() {
            debug!("Sweep validation passed");
        } else {
            debug!(errors = result.errors.len(), "Sweep validation failed");
        }
        result
    }

    /// Validates the dataset selector.
    fn validate_dataset(dataset: &DatasetRef, result: &mut ValidationResult) {
        if dataset.name.is_empty() {
            result.errors.push(SchemaError::new(
                "dataset.name",
                "Dataset name cannot be empty",
            ));
        }

        if dataset.pair_id.is_empty() {
            result.errors.push(SchemaError::new(
                "dataset.pair_id",
                "pair_id is missing or empty; at least one paired series index is required",
            ));
        }
    }

    /// Validates every hyperparameter entry.
    fn validate_hyperparameters(&self, config: &SweepConfig, result: &mut ValidationResult) {
        if config.hyperparameters.is_empty() {
            result
                .warnings
                .push(String::from("No hyperparameters defined; nothing to tune"));
        }

        for (name, spec) in &config.hyperparameters {
            let field = format!("hyperparameters.{name}");
            Self::validate_param(spec, &field, result);

            if !self.conventional_params.contains(name) {
                result.warnings.push(format!(
                    "{field}: '{name}' is not a conventional hyperparameter name for this harness"
                ));
            }
        }

        // Absent conventional names are tolerated, but worth pointing out.
        for name in &self.conventional_params {
            if !config.hyperparameters.is_empty() && !config.hyperparameters.contains_key(name) {
                result.warnings.push(format!(
                    "hyperparameters: conventional name '{name}' is not tuned"
                ));
            }
        }
    }

    /// Validates a single hyperparameter specification.
    fn validate_param(spec: &HyperparameterSpec, field: &str, result: &mut ValidationResult) {
        match spec {
            HyperparameterSpec::Choice { choices } => {
                if choices.is_empty() {
                    result.errors.push(SchemaError::new(
                        format!("{field}.choices"),
                        "choices cannot be empty",
                    ));
                }
            }
            HyperparameterSpec::RandInt {
                lower_bound,
                upper_bound,
            } => {
                if lower_bound >= upper_bound {
                    result.errors.push(SchemaError::new(
                        field,
                        format!(
                            "lower_bound ({lower_bound}) must be less than upper_bound ({upper_bound})"
                        ),
                    ));
                }
            }
            HyperparameterSpec::LogUniform {
                lower_bound,
                upper_bound,
            } => {
                if *lower_bound <= 0.0 {
                    result.errors.push(SchemaError::new(
                        field,
                        format!("lower_bound ({lower_bound}) must be positive for loguniform"),
                    ));
                } else if lower_bound >= upper_bound {
                    result.errors.push(SchemaError::new(
                        field,
                        format!(
                            "lower_bound ({lower_bound}) must be less than upper_bound ({upper_bound})"
                        ),
                    ));
                }
            }
        }
    }

    /// Validates the model settings record.
    ///
    /// The required-key set is owned by the consuming harness, so absent keys
    /// never produce errors here. Values that can only be mistakes are
    /// surfaced as warnings.
    fn validate_model(model: &ModelConfig, result: &mut ValidationResult) {
        if model.name.is_none() {
            result
                .warnings
                .push(String::from("model.name is not set; the harness may reject the run"));
        }

        if model.batch_size.is_none() {
            result
                .warnings
                .push(String::from("model.batch_size is not set"));
        }

        if let Some(split) = model.train_split
            && (split <= 0.0 || split >= 1.0)
        {
            result.warnings.push(format!(
                "model.train_split ({split}) is outside (0, 1); the harness owns this invariant"
            ));
        }
    }
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the number of warnings.
    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}
