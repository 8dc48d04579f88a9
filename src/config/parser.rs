//! Loading sweep configuration documents from files and strings.
//!
//! Parsing is two-staged so the two failure kinds stay distinct: a document
//! that is not well-formed YAML fails with a parse error, and a well-formed
//! document that violates the schema fails with the full list of schema
//! errors. Nothing is silently defaulted.

use std::path::Path;
use tracing::{debug, info};

use crate::error::{ConfigError, Result, SweepError};

use super::spec::SweepConfig;
use super::validator::ConfigValidator;

/// Parser for loading sweep configuration documents.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Validator applied after decoding.
    validator: ConfigValidator,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            validator: ConfigValidator::new(),
        }
    }

    /// Creates a parser with a custom validator.
    #[must_use]
    pub const fn with_validator(validator: ConfigValidator) -> Self {
        Self { validator }
    }

    /// Loads and validates a sweep document from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, malformed, or
    /// violates the schema.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<SweepConfig> {
        let path = path.as_ref();
        info!("Loading sweep configuration from: {}", path.display());

        if !path.exists() {
            return Err(SweepError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SweepError::Config(ConfigError::parse(
                format!("Failed to read file: {e}"),
                Some(path.display().to_string()),
            ))
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses and validates a sweep document from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed YAML, or a schema error carrying
    /// every violation for a well-formed but invalid document.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<SweepConfig> {
        let config = Self::decode(content, source)?;
        self.check(config)
    }

    /// Loads a sweep document with environment variable overrides.
    ///
    /// Overrides are applied after decoding and before validation:
    /// `SWEEPCFG_DATASET_NAME`, `SWEEPCFG_DATASET_PAIR_ID` (comma-separated
    /// integers), `SWEEPCFG_MODEL_SEED`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded, an override value is
    /// unparseable, or the resulting document violates the schema.
    pub fn load_with_env(&self, path: impl AsRef<Path>) -> Result<SweepConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SweepError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SweepError::Config(ConfigError::parse(
                format!("Failed to read file: {e}"),
                Some(path.display().to_string()),
            ))
        })?;

        let mut config = Self::decode(&content, Some(path))?;
        Self::apply_overrides(&mut config, |name| std::env::var(name).ok())?;
        self.check(config)
    }

    /// Decodes a document: YAML syntax first, then the typed schema.
    fn decode(content: &str, source: Option<&Path>) -> Result<SweepConfig> {
        debug!("Parsing sweep YAML");

        // Stage 1: syntax. The only way to get a parse error.
        let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            SweepError::Config(ConfigError::parse(format!("YAML parse error: {e}"), location))
        })?;

        // Stage 2: shape. Missing sections, wrong types, and unrecognized
        // distribution tags are schema errors, not parse errors.
        let config: SweepConfig = serde_yaml::from_value(value).map_err(|e| {
            SweepError::Config(ConfigError::schema_single("document", e.to_string()))
        })?;

        debug!(
            dataset = %config.dataset.name,
            params = config.tunable_count(),
            "Decoded sweep document"
        );
        Ok(config)
    }

    /// Runs the validator and surfaces all violations at once.
    fn check(&self, config: SweepConfig) -> Result<SweepConfig> {
        let result = self.validator.validate(&config);
        if result.is_valid() {
            Ok(config)
        } else {
            Err(SweepError::Config(ConfigError::Schema {
                errors: result.errors,
            }))
        }
    }

    /// Applies overrides from a variable lookup.
    fn apply_overrides(
        config: &mut SweepConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        if let Some(name) = lookup("SWEEPCFG_DATASET_NAME") {
            debug!("Overriding dataset.name from environment");
            config.dataset.name = name;
        }

        if let Some(pair_id) = lookup("SWEEPCFG_DATASET_PAIR_ID") {
            debug!("Overriding dataset.pair_id from environment");
            config.dataset.pair_id = pair_id
                .split(',')
                .map(|part| {
                    part.trim().parse::<i64>().map_err(|e| {
                        SweepError::Config(ConfigError::InvalidOverride {
                            name: String::from("SWEEPCFG_DATASET_PAIR_ID"),
                            message: format!("'{part}' is not an integer: {e}"),
                        })
                    })
                })
                .collect::<Result<Vec<_>>>()?;
        }

        if let Some(seed) = lookup("SWEEPCFG_MODEL_SEED") {
            debug!("Overriding model.seed from environment");
            config.model.seed = Some(seed.parse::<u64>().map_err(|e| {
                SweepError::Config(ConfigError::InvalidOverride {
                    name: String::from("SWEEPCFG_MODEL_SEED"),
                    message: format!("'{seed}' is not an unsigned integer: {e}"),
                })
            })?);
        }

        Ok(())
    }
}

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["sweep.yaml", "sweep.yml", "config.yaml", "config.yml"];

/// Finds the sweep file in the given directory or its parents.
///
/// # Errors
///
/// Returns an error if no configuration file is found.
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Result<std::path::PathBuf> {
    let start = start_dir.as_ref();
    let mut current = start.to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found sweep file: {}", config_path.display());
                return Ok(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    Err(SweepError::Config(ConfigError::FileNotFound {
        path: start.join(DEFAULT_CONFIG_FILES[0]),
    }))
}
