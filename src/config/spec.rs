//! Schema types for the sweep configuration document.
//!
//! This module defines the structs that map to a `sweep.yaml` file: a dataset
//! selector, a hyperparameter search space, and a fixed model settings record.
//! The document is declarative; nothing here samples, trains, or mutates.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// The root structure of a sweep configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepConfig {
    /// Which dataset variant and paired series to use.
    pub dataset: DatasetRef,
    /// One entry per tunable hyperparameter name.
    #[serde(default)]
    pub hyperparameters: BTreeMap<String, HyperparameterSpec>,
    /// Fixed model and training settings, passed through to the harness.
    #[serde(default)]
    pub model: ModelConfig,
}

/// Selects a dataset variant and the paired series indices within it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetRef {
    /// Dataset identifier (e.g. "Lorenz_Official").
    pub name: String,
    /// Paired series indices. A bare integer in the document is accepted
    /// and normalized to a one-element sequence.
    #[serde(default, deserialize_with = "scalar_or_sequence")]
    pub pair_id: Vec<i64>,
}

/// A sampling-distribution specification for one hyperparameter.
///
/// The `type` tag in the document selects the variant. Bounds are stored as
/// written; range inclusivity and the exact draw shape are owned by the
/// external tuner that consumes this schema, so no sampling API is exposed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HyperparameterSpec {
    /// Draw one element from a discrete set.
    Choice {
        /// Candidate values, in document order.
        choices: Vec<ChoiceValue>,
    },
    /// Draw an integer between the bounds.
    RandInt {
        /// Lower bound. Must be strictly less than `upper_bound`.
        lower_bound: i64,
        /// Upper bound.
        upper_bound: i64,
    },
    /// Draw a value whose logarithm is uniform between the log-bounds.
    LogUniform {
        /// Lower bound. Must be strictly positive and less than `upper_bound`.
        lower_bound: f64,
        /// Upper bound.
        upper_bound: f64,
    },
}

/// A candidate value inside a `choice` set.
///
/// YAML `0` stays an integer and `0.0` stays a float, so documents round-trip
/// without changing the numeric shape of their values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChoiceValue {
    /// An integer candidate.
    Int(i64),
    /// A floating-point candidate.
    Float(f64),
}

/// Fixed model and training settings.
///
/// Every known key is optional; the required-key set is owned by the
/// consuming harness, and this crate only guarantees type-correctness of the
/// keys present. Unknown keys are preserved verbatim in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Model architecture name (e.g. "spacetime").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Training batch size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
    /// Loss function name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss: Option<String>,
    /// Maximum training epochs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_epochs: Option<u32>,
    /// Epochs without improvement before stopping early.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_stopping_epochs: Option<u32>,
    /// Metric used for model selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val_metric: Option<String>,
    /// Input/output transform name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_transform: Option<String>,
    /// Per-criterion loss weights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criterion_weights: Option<Vec<f64>>,
    /// Norm order for the loss criterion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub norm_order: Option<f64>,
    /// Fraction of the series used for training.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub train_split: Option<f64>,
    /// Random seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Verbose harness output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    /// Embedding sub-module configuration name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_config: Option<String>,
    /// Encoder sub-module configuration name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoder_config: Option<String>,
    /// Decoder sub-module configuration name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoder_config: Option<String>,
    /// Output sub-module configuration name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_config: Option<String>,
    /// Keys this crate does not know about, preserved for the harness.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Accepts either a single integer or a sequence of integers.
fn scalar_or_sequence<'de, D>(deserializer: D) -> std::result::Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PairId {
        One(i64),
        Many(Vec<i64>),
    }

    Ok(match PairId::deserialize(deserializer)? {
        PairId::One(id) => vec![id],
        PairId::Many(ids) => ids,
    })
}

impl SweepConfig {
    /// Returns an identifier combining dataset and model names,
    /// suitable for naming runs and log directories.
    #[must_use]
    pub fn experiment_id(&self) -> String {
        let model = self.model.name.as_deref().unwrap_or("unnamed");
        format!("{}-{}", self.dataset.name, model)
    }

    /// Returns the hyperparameter names, in sorted order.
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        self.hyperparameters.keys().map(String::as_str).collect()
    }

    /// Returns the number of tunable hyperparameters.
    #[must_use]
    pub fn tunable_count(&self) -> usize {
        self.hyperparameters.len()
    }

    /// Looks up a hyperparameter specification by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&HyperparameterSpec> {
        self.hyperparameters.get(name)
    }
}

impl DatasetRef {
    /// Returns the first paired series index, if any.
    #[must_use]
    pub fn primary_pair(&self) -> Option<i64> {
        self.pair_id.first().copied()
    }
}

impl HyperparameterSpec {
    /// Returns the `type` tag this variant serializes under.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Choice { .. } => "choice",
            Self::RandInt { .. } => "randint",
            Self::LogUniform { .. } => "loguniform",
        }
    }

    /// Renders the search range for display.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Choice { choices } => choices
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            Self::RandInt {
                lower_bound,
                upper_bound,
            } => format!("{lower_bound} .. {upper_bound}"),
            Self::LogUniform {
                lower_bound,
                upper_bound,
            } => format!("{lower_bound:e} .. {upper_bound:e}"),
        }
    }
}

impl std::fmt::Display for ChoiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_spec_decode() {
        let yaml = "type: choice\nchoices: [0, 0.1, 0.25]\n";
        let spec: HyperparameterSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            spec,
            HyperparameterSpec::Choice {
                choices: vec![
                    ChoiceValue::Int(0),
                    ChoiceValue::Float(0.1),
                    ChoiceValue::Float(0.25),
                ],
            }
        );
        assert_eq!(spec.kind(), "choice");
    }

    #[test]
    fn test_randint_spec_decode() {
        let yaml = "type: randint\nlower_bound: 2\nupper_bound: 48\n";
        let spec: HyperparameterSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            spec,
            HyperparameterSpec::RandInt {
                lower_bound: 2,
                upper_bound: 48,
            }
        );
        assert_eq!(spec.kind(), "randint");
    }

    #[test]
    fn test_loguniform_spec_decode() {
        let yaml = "type: loguniform\nlower_bound: 1.0e-5\nupper_bound: 0.01\n";
        let spec: HyperparameterSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            spec,
            HyperparameterSpec::LogUniform {
                lower_bound: 1e-5,
                upper_bound: 0.01,
            }
        );
        assert_eq!(spec.kind(), "loguniform");
    }

    #[test]
    fn test_pair_id_scalar_form() {
        let dataset: DatasetRef = serde_yaml::from_str("name: Lorenz_Official\npair_id: 8\n").unwrap();
        assert_eq!(dataset.pair_id, vec![8]);
        assert_eq!(dataset.primary_pair(), Some(8));
    }

    #[test]
    fn test_pair_id_sequence_form() {
        let dataset: DatasetRef =
            serde_yaml::from_str("name: Lorenz_Official\npair_id: [8, 9]\n").unwrap();
        assert_eq!(dataset.pair_id, vec![8, 9]);
    }

    #[test]
    fn test_model_extra_keys_preserved() {
        let yaml = "name: spacetime\nbatch_size: 128\nlag: 64\ninference_only: false\n";
        let model: ModelConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(model.name.as_deref(), Some("spacetime"));
        assert_eq!(model.batch_size, Some(128));
        assert_eq!(model.extra.len(), 2);
        assert!(model.extra.contains_key("lag"));
        assert!(model.extra.contains_key("inference_only"));
    }

    #[test]
    fn test_describe_ranges() {
        let spec = HyperparameterSpec::RandInt {
            lower_bound: 1,
            upper_bound: 6,
        };
        assert_eq!(spec.describe(), "1 .. 6");

        let spec = HyperparameterSpec::Choice {
            choices: vec![ChoiceValue::Int(0), ChoiceValue::Float(0.1)],
        };
        assert_eq!(spec.describe(), "0, 0.1");
    }

    #[test]
    fn test_experiment_id() {
        let config = SweepConfig {
            dataset: DatasetRef {
                name: String::from("Lorenz_Official"),
                pair_id: vec![8],
            },
            hyperparameters: BTreeMap::new(),
            model: ModelConfig {
                name: Some(String::from("spacetime")),
                ..ModelConfig::default()
            },
        };
        assert_eq!(config.experiment_id(), "Lorenz_Official-spacetime");
        assert_eq!(config.tunable_count(), 0);
    }
}
