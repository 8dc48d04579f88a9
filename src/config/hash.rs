//! Deterministic fingerprints for sweep configurations.
//!
//! Two sweep files that hash the same describe the same search space and
//! model settings, so harnesses can reuse cached trial results and the CLI
//! can tell whether an edit actually changed anything.

use sha2::{Digest, Sha256};

use super::spec::{ChoiceValue, HyperparameterSpec, ModelConfig, SweepConfig};

/// Hasher for computing sweep configuration fingerprints.
#[derive(Debug, Default)]
pub struct ConfigHasher;

impl ConfigHasher {
    /// Creates a new configuration hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes a hash of the entire sweep configuration.
    ///
    /// This hash changes when the dataset selector, any hyperparameter
    /// specification, or any model setting changes.
    #[must_use]
    pub fn hash_config(&self, config: &SweepConfig) -> String {
        let mut hasher = Sha256::new();

        hasher.update(self.hash_dataset(config).as_bytes());
        hasher.update(self.hash_search_space(config).as_bytes());
        hasher.update(self.hash_model(&config.model).as_bytes());

        hex::encode(hasher.finalize())
    }

    /// Computes a hash of the dataset selector.
    #[must_use]
    pub fn hash_dataset(&self, config: &SweepConfig) -> String {
        let mut hasher = Sha256::new();

        hasher.update(config.dataset.name.as_bytes());
        for id in &config.dataset.pair_id {
            hasher.update(id.to_be_bytes());
        }

        hex::encode(hasher.finalize())
    }

    /// Computes a hash of the hyperparameter search space.
    ///
    /// Entries are visited in name order, which `BTreeMap` already provides,
    /// so authoring order never affects the fingerprint.
    #[must_use]
    pub fn hash_search_space(&self, config: &SweepConfig) -> String {
        let mut hasher = Sha256::new();

        for (name, spec) in &config.hyperparameters {
            hasher.update(name.as_bytes());
            hasher.update(self.hash_param(spec).as_bytes());
        }

        hex::encode(hasher.finalize())
    }

    /// Computes a hash for a single hyperparameter specification.
    #[must_use]
    pub fn hash_param(&self, spec: &HyperparameterSpec) -> String {
        let mut hasher = Sha256::new();
        hasher.update(spec.kind().as_bytes());

        match spec {
            HyperparameterSpec::Choice { choices } => {
                for choice in choices {
                    match choice {
                        ChoiceValue::Int(v) => {
                            hasher.update([0u8]);
                            hasher.update(v.to_be_bytes());
                        }
                        ChoiceValue::Float(v) => {
                            hasher.update([1u8]);
                            hasher.update(v.to_be_bytes());
                        }
                    }
                }
            }
            HyperparameterSpec::RandInt {
                lower_bound,
                upper_bound,
            } => {
                hasher.update(lower_bound.to_be_bytes());
                hasher.update(upper_bound.to_be_bytes());
            }
            HyperparameterSpec::LogUniform {
                lower_bound,
                upper_bound,
            } => {
                hasher.update(lower_bound.to_be_bytes());
                hasher.update(upper_bound.to_be_bytes());
            }
        }

        hex::encode(hasher.finalize())
    }

    /// Computes a hash of the model settings record.
    #[must_use]
    pub fn hash_model(&self, model: &ModelConfig) -> String {
        let mut hasher = Sha256::new();

        // Serialized form covers known and extra keys alike; BTreeMap keeps
        // the extra keys in a stable order.
        let serialized = serde_yaml::to_string(model).unwrap_or_default();
        hasher.update(serialized.as_bytes());

        hex::encode(hasher.finalize())
    }

    /// Computes a short hash (first 8 characters) for display purposes.
    #[must_use]
    pub fn short_hash(&self, hash: &str) -> String {
        hash.chars().take(8).collect()
    }

    /// Compares two hashes in constant time.
    #[must_use]
    pub fn hashes_match(hash1: &str, hash2: &str) -> bool {
        if hash1.len() != hash2.len() {
            return false;
        }

        hash1
            .bytes()
            .zip(hash2.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::spec::DatasetRef;
    use std::collections::BTreeMap;

    fn create_test_config() -> SweepConfig {
        let mut hyperparameters = BTreeMap::new();
        hyperparameters.insert(
            String::from("lr"),
            HyperparameterSpec::LogUniform {
                lower_bound: 1e-5,
                upper_bound: 0.01,
            },
        );
        hyperparameters.insert(
            String::from("lag"),
            HyperparameterSpec::RandInt {
                lower_bound: 2,
                upper_bound: 48,
            },
        );

        SweepConfig {
            dataset: DatasetRef {
                name: String::from("Lorenz_Official"),
                pair_id: vec![8],
            },
            hyperparameters,
            model: ModelConfig {
                name: Some(String::from("spacetime")),
                batch_size: Some(128),
                ..ModelConfig::default()
            },
        }
    }

    #[test]
    fn test_hash_deterministic() {
        let hasher = ConfigHasher::new();
        let config = create_test_config();

        assert_eq!(hasher.hash_config(&config), hasher.hash_config(&config));
    }

    #[test]
    fn test_bound_change_changes_hash() {
        let hasher = ConfigHasher::new();
        let config = create_test_config();
        let mut changed = config.clone();
        changed.hyperparameters.insert(
            String::from("lr"),
            HyperparameterSpec::LogUniform {
                lower_bound: 1e-4,
                upper_bound: 0.01,
            },
        );

        assert_ne!(hasher.hash_config(&config), hasher.hash_config(&changed));
        assert_ne!(
            hasher.hash_search_space(&config),
            hasher.hash_search_space(&changed)
        );
        assert_eq!(hasher.hash_dataset(&config), hasher.hash_dataset(&changed));
    }

    #[test]
    fn test_pair_id_changes_dataset_hash() {
        let hasher = ConfigHasher::new();
        let config = create_test_config();
        let mut changed = config.clone();
        changed.dataset.pair_id = vec![9];

        assert_ne!(hasher.hash_dataset(&config), hasher.hash_dataset(&changed));
    }

    #[test]
    fn test_param_kind_disambiguates() {
        let hasher = ConfigHasher::new();
        let randint = HyperparameterSpec::RandInt {
            lower_bound: 1,
            upper_bound: 2,
        };
        let loguniform = HyperparameterSpec::LogUniform {
            lower_bound: 1.0,
            upper_bound: 2.0,
        };

        assert_ne!(hasher.hash_param(&randint), hasher.hash_param(&loguniform));
    }

    #[test]
    fn test_model_extra_key_changes_hash() {
        let hasher = ConfigHasher::new();
        let config = create_test_config();
        let mut changed = config.clone();
        changed
            .model
            .extra
            .insert(String::from("lag"), serde_yaml::Value::from(64));

        assert_ne!(hasher.hash_model(&config.model), hasher.hash_model(&changed.model));
    }

    #[test]
    fn test_short_hash() {
        let hasher = ConfigHasher::new();
        let full_hash = "abcdef1234567890abcdef1234567890";
        let short = hasher.short_hash(full_hash);

        assert_eq!(short, "abcdef12");
        assert_eq!(short.len(), 8);
    }

    #[test]
    fn test_hashes_match() {
        assert!(ConfigHasher::hashes_match("abc123", "abc123"));
        assert!(!ConfigHasher::hashes_match("abc123", "abc124"));
        assert!(!ConfigHasher::hashes_match("abc123", "abc12"));
    }
}
