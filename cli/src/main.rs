//! casematch CLI: demonstration programs and a fixture runner.
//!
//! Subcommands:
//! - `sqrt <x> [--tolerance t]` Newton square root
//! - `calc <op> <left> <right>` integer arithmetic over an operation union
//! - `knapsack <capacity> <weight:value>...` 0/1 knapsack
//! - `deriv` symbolic derivatives of the demo expressions
//! - `run <fixture>` run a YAML or JSON fixture file

use std::process;

use casematch_test::fixture::Fixture;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod calc;
mod knapsack;
mod sqrt;
mod symbolic;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "sqrt" => cmd_sqrt(&args[2..]),
        "calc" => cmd_calc(&args[2..]),
        "knapsack" => cmd_knapsack(&args[2..]),
        "deriv" => cmd_deriv(),
        "run" => cmd_run(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_sqrt(args: &[String]) -> Result<(), String> {
    let (x, tolerance) = parse_sqrt_args(args)?;
    let root = sqrt::newton_sqrt(x, tolerance)?;
    println!("sqrt({x}) = {root}");
    Ok(())
}

fn cmd_calc(args: &[String]) -> Result<(), String> {
    let [name, left, right] = args else {
        return Err("calc requires <op> <left> <right>".into());
    };
    let op = calc::parse(name, parse_number(left)?, parse_number(right)?)?;
    let value = calc::eval(op)?;
    println!("{} = {value}", calc::render(op));
    Ok(())
}

fn cmd_knapsack(args: &[String]) -> Result<(), String> {
    let (capacity, items) = parse_knapsack_args(args)?;
    let packing = knapsack::solve(&items, capacity);
    println!(
        "{}",
        knapsack::Report {
            items: &items,
            packing: &packing,
        }
    );
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Uniform return type for all commands
fn cmd_deriv() -> Result<(), String> {
    for (label, expr) in symbolic::demos() {
        println!("{label}: {expr}");
        println!("Derivative: {}", symbolic::derivative(&expr, "x"));
    }
    Ok(())
}

fn cmd_run(args: &[String]) -> Result<(), String> {
    let [path] = args else {
        return Err("run requires a fixture file path".into());
    };

    let fixtures = Fixture::load(path).map_err(|e| format!("failed to load \"{path}\": {e}"))?;

    let mut failed = 0_usize;
    let mut total = 0_usize;
    for fixture in &fixtures {
        println!("{}", fixture.name);
        let results = fixture.run().map_err(|e| format!("{}: {e}", fixture.name))?;
        for result in results {
            total += 1;
            if !result.passed {
                failed += 1;
            }
            println!("  {result}");
        }
    }

    println!("{} passed, {failed} failed", total - failed);
    if failed > 0 {
        return Err(format!("{failed} of {total} cases failed"));
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

fn parse_number<T>(text: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    text.trim()
        .parse()
        .map_err(|e| format!("invalid number \"{text}\": {e}"))
}

fn parse_sqrt_args(args: &[String]) -> Result<(f64, f64), String> {
    let mut x = None;
    let mut tolerance = sqrt::DEFAULT_TOLERANCE;
    let mut i = 0;

    while i < args.len() {
        if args[i] == "--tolerance" {
            i += 1;
            let value = args
                .get(i)
                .ok_or_else(|| "--tolerance requires a value".to_string())?;
            tolerance = parse_number(value)?;
        } else if x.is_none() {
            x = Some(parse_number(&args[i])?);
        } else {
            return Err(format!("unexpected argument \"{}\"", args[i]));
        }
        i += 1;
    }

    let x = x.ok_or_else(|| "sqrt requires a number".to_string())?;
    Ok((x, tolerance))
}

fn parse_knapsack_args(args: &[String]) -> Result<(u32, Vec<knapsack::Item>), String> {
    let (capacity, items) = args
        .split_first()
        .ok_or_else(|| "knapsack requires <capacity> <weight:value>...".to_string())?;
    let capacity = parse_number(capacity)?;
    let items = items
        .iter()
        .map(|item| knapsack::Item::parse(item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((capacity, items))
}

fn print_usage() {
    eprintln!(
        "Usage: casematch <command> [options]

Commands:
  sqrt <x> [--tolerance t]              Newton square root
  calc <op> <left> <right>              Integer arithmetic (add, sub, mul, div)
  knapsack <capacity> <weight:value>... 0/1 knapsack
  deriv                                 Symbolic derivatives of the demo expressions
  run <fixture.yaml|fixture.json>       Run a fixture file
  help                                  Show this help

Set RUST_LOG=casematch=trace to log every clause step."
    );
}
