//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves solver settings (defaults, `.env`/environment, then flags)
//! - loads the reference grid (built-in or `--grid FILE`)
//! - evaluates one star or a whole CSV batch
//! - prints text or JSON and writes optional exports

use std::path::Path;

use clap::Parser;
use serde::Serialize;

use crate::cli::{BatchArgs, Cli, Command};
use crate::domain::{Direction, SolverConfig};
use crate::error::AppError;
use crate::io::batch::BatchRecord;
use crate::models::MlRelation;

pub mod pipeline;

/// Entry point for the `ml` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::init();

    let cli = Cli::parse();
    let solver = solver_config(&cli)?;
    let rel = match &cli.grid {
        Some(path) => crate::io::load_grid(path)?,
        None => MlRelation::standard(),
    };
    log::debug!("reference metallicities: {:?}", rel.metallicities());

    match &cli.command {
        Command::Lum(args) => handle_single(
            &cli,
            &rel,
            &solver,
            Direction::Luminosity,
            args.mass,
            args.composition.x,
            args.composition.z,
            args.export_json.as_deref(),
        ),
        Command::Mass(args) => handle_single(
            &cli,
            &rel,
            &solver,
            Direction::Mass,
            args.lum,
            args.composition.x,
            args.composition.z,
            args.export_json.as_deref(),
        ),
        Command::Batch(args) => handle_batch(&cli, &rel, &solver, args),
    }
}

/// Defaults, then `.env`/environment, then CLI flags.
pub fn solver_config(cli: &Cli) -> Result<SolverConfig, AppError> {
    let mut solver = SolverConfig::from_env()?;
    if let Some(tol) = cli.tolerance {
        solver.tolerance = tol;
    }
    if let Some(max_iter) = cli.max_iter {
        solver.max_iter = max_iter;
    }
    solver.validate()?;
    Ok(solver)
}

#[allow(clippy::too_many_arguments)]
fn handle_single(
    cli: &Cli,
    rel: &MlRelation,
    solver: &SolverConfig,
    direction: Direction,
    value: f64,
    x: f64,
    z: f64,
    export_json: Option<&Path>,
) -> Result<(), AppError> {
    let output = pipeline::evaluate_star(rel, direction, value, x, z, solver)?;

    if cli.json {
        println!("{}", to_json(&output)?);
    } else {
        print!("{}", crate::report::format_output(&output));
    }

    if let Some(path) = export_json {
        crate::io::write_export_json(path, rel.grid(), solver, &output)?;
    }

    Ok(())
}

fn handle_batch(
    cli: &Cli,
    rel: &MlRelation,
    solver: &SolverConfig,
    args: &BatchArgs,
) -> Result<(), AppError> {
    let table = crate::io::load_star_rows(&args.input)?;
    for err in &table.row_errors {
        log::warn!("skipping line {}: {}", err.line, err.message);
    }

    let outcomes = pipeline::run_batch(rel, &table.rows, args.direction, solver);
    let records: Vec<BatchRecord> = outcomes
        .iter()
        .map(|o| BatchRecord::from_outcome(o, args.direction))
        .collect();

    if cli.json {
        println!("{}", to_json(&records)?);
    } else {
        print!(
            "{}",
            crate::report::format_batch(&outcomes, args.direction, &table.row_errors)
        );
    }

    if let Some(path) = &args.export {
        crate::io::export_batch_csv(path, &records)?;
    }

    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(4, format!("Failed to encode JSON: {e}")))
}
