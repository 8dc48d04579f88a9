// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # sweepcfg
//!
//! Declarative, validated hyperparameter sweep configuration for forecasting
//! experiments.
//!
//! ## Overview
//!
//! A sweep file describes everything an external tuning/training harness
//! needs to run a hyperparameter search:
//!
//! - A `dataset` selector (variant name plus paired series indices)
//! - A `hyperparameters` search space (choice / randint / loguniform specs)
//! - A `model` record of fixed training settings
//!
//! This crate owns the schema, the loader, and the validator. It does NOT
//! sample from the distributions, build the model, or run training; those
//! belong to the harness that consumes the loaded document.
//!
//! ## Modules
//!
//! - [`config`]: Schema types, parsing, validation, and fingerprinting
//! - [`error`]: Parse and schema error types
//! - [`cli`]: Command-line interface for authoring and checking sweep files
//!
//! ## Example
//!
//! ```yaml
//! dataset:
//!   name: Lorenz_Official
//!   pair_id: [8]
//!
//! hyperparameters:
//!   lr:
//!     type: loguniform
//!     lower_bound: 1.0e-5
//!     upper_bound: 0.01
//!
//! model:
//!   name: spacetime
//!   batch_size: 128
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter, SweepDiff};
pub use config::{
    ChoiceValue, ConfigHasher, ConfigParser, ConfigValidator, DatasetRef, HyperparameterSpec,
    ModelConfig, SweepConfig, ValidationResult,
};
pub use error::{ConfigError, Result, SchemaError, SweepError};
