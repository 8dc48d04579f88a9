//! sweepcfg CLI entrypoint.
//!
//! This is the main entrypoint for the sweepcfg command-line tool.

use std::path::PathBuf;
use std::process::ExitCode;

use sweepcfg::cli::{Cli, Commands, OutputFormatter, SweepDiff};
use sweepcfg::config::{ConfigParser, ConfigValidator, find_config_file};
use sweepcfg::error::Result;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Dispatches the selected command.
fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Validate { warnings } => cmd_validate(cli.config.as_ref(), warnings, &formatter),
        Commands::Show => cmd_show(cli.config.as_ref(), &formatter),
        Commands::Diff { other } => cmd_diff(cli.config.as_ref(), &other, &formatter),
    }
}

/// Initialize a new sweep file.
fn cmd_init(path: &PathBuf, force: bool) -> Result<()> {
    info!("Initializing new sweep file in: {}", path.display());

    let config_path = path.join("sweep.yaml");

    if !force && config_path.exists() {
        eprintln!("Sweep file already exists: {}", config_path.display());
        eprintln!("Use --force to overwrite.");
        return Ok(());
    }

    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }

    let template = include_str!("../templates/sweep.yaml");
    std::fs::write(&config_path, template)?;
    eprintln!("Created: {}", config_path.display());

    eprintln!("\nNext steps:");
    eprintln!("  1. Edit sweep.yaml with your dataset, search space, and model settings");
    eprintln!("  2. Run 'sweepcfg validate' to check the file");
    eprintln!("  3. Run 'sweepcfg show' to review the search space");
    eprintln!("  4. Point your tuning harness at the file");

    Ok(())
}

/// Validate a sweep file.
fn cmd_validate(
    config_path: Option<&PathBuf>,
    show_warnings: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let config_file = resolve_config_path(config_path)?;
    info!("Validating sweep file: {}", config_file.display());

    let parser = ConfigParser::new();
    match parser.load_with_env(&config_file) {
        Ok(config) => {
            // Re-run the validator to surface warnings; load already
            // guaranteed there are no errors.
            let result = ConfigValidator::new().validate(&config);
            eprintln!("{}", formatter.format_validation(&result, show_warnings));

            eprintln!("Sweep summary:");
            eprintln!("  Experiment: {}", config.experiment_id());
            eprintln!("  Dataset: {} pair_id {:?}", config.dataset.name, config.dataset.pair_id);
            eprintln!("  Tunable hyperparameters: {}", config.tunable_count());
            Ok(())
        }
        Err(err) => {
            if let Some(errors) = err.schema_errors() {
                let result = sweepcfg::config::ValidationResult {
                    errors: errors.to_vec(),
                    warnings: vec![],
                };
                eprintln!("{}", formatter.format_validation(&result, false));
            }
            Err(err)
        }
    }
}

/// Show the search space and model settings.
fn cmd_show(config_path: Option<&PathBuf>, formatter: &OutputFormatter) -> Result<()> {
    let config_file = resolve_config_path(config_path)?;
    let config = ConfigParser::new().load_with_env(&config_file)?;

    eprintln!("{}", formatter.format_summary(&config));
    Ok(())
}

/// Compare two sweep files.
fn cmd_diff(
    config_path: Option<&PathBuf>,
    other: &PathBuf,
    formatter: &OutputFormatter,
) -> Result<()> {
    let config_file = resolve_config_path(config_path)?;
    let parser = ConfigParser::new();

    let left = parser.load_file(&config_file)?;
    let right = parser.load_file(other)?;

    let diff = SweepDiff::compute(&left, &right);
    eprintln!("{}", formatter.format_diff(&diff));

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Resolves the sweep file path.
fn resolve_config_path(config_path: Option<&PathBuf>) -> Result<PathBuf> {
    config_path.map_or_else(|| find_config_file("."), |path| Ok(path.clone()))
}
