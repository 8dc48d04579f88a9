//! Configuration module for the sweepcfg system.
//!
//! This module handles all sweep-document functionality:
//! - Parsing and deserializing `sweep.yaml`
//! - Validation of the search space and dataset selector
//! - Computing configuration fingerprints for change detection

mod spec;
mod parser;
mod validator;
mod hash;

pub use spec::{ChoiceValue, DatasetRef, HyperparameterSpec, ModelConfig, SweepConfig};
pub use parser::{ConfigParser, DEFAULT_CONFIG_FILES, find_config_file};
pub use validator::{ConfigValidator, ValidationResult};
pub use hash::ConfigHasher;
