//! Command-line parsing for the `ml` calculator.
//!
//! Argument parsing stays separate from the model code; everything here is
//! turned into plain numbers and a `SolverConfig` before the model is called.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Direction;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "ml",
    version,
    about = "Metallicity-dependent stellar mass-luminosity calculator (LMC/SMC grid)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Load reference fits from a JSON file instead of the built-in LMC/SMC grid.
    #[arg(long, global = true, value_name = "JSON")]
    pub grid: Option<PathBuf>,

    /// Bisection tolerance (overrides ML_TOLERANCE).
    #[arg(long, global = true)]
    pub tolerance: Option<f64>,

    /// Bisection iteration cap (overrides ML_MAX_ITER).
    #[arg(long, global = true)]
    pub max_iter: Option<usize>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Luminosity bounds from a stellar mass.
    Lum(LumArgs),
    /// Mass bounds from a stellar luminosity.
    Mass(MassArgs),
    /// Evaluate every row of a CSV file (`id,value,x,z`) in parallel.
    Batch(BatchArgs),
}

/// Hydrogen and metal mass fractions.
#[derive(Debug, Args, Clone, Copy)]
pub struct CompositionArgs {
    /// Hydrogen mass fraction X.
    #[arg(short = 'x', long = "x")]
    pub x: f64,

    /// Metal mass fraction Z (grid anchors: 0.008 and 0.004).
    #[arg(short = 'z', long = "z")]
    pub z: f64,
}

#[derive(Debug, Args)]
pub struct LumArgs {
    /// Stellar mass (Msun).
    #[arg(short = 'm', long)]
    pub mass: f64,

    #[command(flatten)]
    pub composition: CompositionArgs,

    /// Write the result (with grid and solver settings) to a JSON file.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct MassArgs {
    /// Luminosity as log10(L/Lsun).
    #[arg(short = 'l', long = "lum", allow_hyphen_values = true)]
    pub lum: f64,

    #[command(flatten)]
    pub composition: CompositionArgs,

    /// Write the result (with grid and solver settings) to a JSON file.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Input CSV with header `id,value,x,z`.
    #[arg(long, value_name = "CSV")]
    pub input: PathBuf,

    /// What `value` holds: a mass (`lum`) or a log-luminosity (`mass`).
    #[arg(long, value_enum)]
    pub direction: Direction,

    /// Write per-row results to a CSV file.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_mass_direction_with_negative_luminosity() {
        let cli = Cli::try_parse_from(["ml", "mass", "--lum", "-0.5", "-x", "0.3", "-z", "0.008"])
            .unwrap();
        match cli.command {
            Command::Mass(args) => {
                assert_eq!(args.lum, -0.5);
                assert_eq!(args.composition.x, 0.3);
                assert_eq!(args.composition.z, 0.008);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ml", "lum", "-m", "5", "-x", "0.3", "-z", "0.006", "--json", "--tolerance", "1e-8",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.tolerance, Some(1e-8));
        assert!(matches!(cli.command, Command::Lum(LumArgs { mass, .. }) if mass == 5.0));
    }

    #[test]
    fn batch_direction_uses_short_names() {
        let args = ["ml", "batch", "--input", "stars.csv", "--direction", "mass"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Batch(args) => assert_eq!(args.direction, Direction::Mass),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
