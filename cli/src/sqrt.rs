//! Newton square root driven by a positional guard.

use casematch::prelude::*;
use tracing::trace;

/// Default convergence tolerance on `|guess² - x|`, scaled by `x` above 1.
pub const DEFAULT_TOLERANCE: f64 = 0.0001;

/// Recursion bound; inputs whose guesses cannot reach the tolerance stop here.
const MAX_STEPS: u32 = 100;

/// Square root of `x` by Newton iteration.
///
/// The first guess is the power of two nearest `sqrt(x)`, so any finite input
/// converges in a handful of steps. A guess is accepted once `|guess² - x|`
/// is below `tolerance * max(x, 1)`.
///
/// Each step is one multi-subject match over `(x, guess, step)`: a guard
/// accepts a guess within tolerance, a second guard stops runaway inputs,
/// and the wildcard clause recurses with an improved guess.
pub fn newton_sqrt(x: f64, tolerance: f64) -> Result<f64, String> {
    if !x.is_finite() || x < 0.0 {
        return Err(format!("cannot take the square root of {x}"));
    }
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(format!("tolerance must be positive, got {tolerance}"));
    }
    improve(x, initial_guess(x), 0, tolerance * x.max(1.0))
}

fn initial_guess(x: f64) -> f64 {
    if x > 0.0 {
        // Exponent-only estimate: 2^round(log2(x) / 2)
        2f64.powi((x.log2() / 2.0).round() as i32)
    } else {
        1.0
    }
}

fn improve(x: f64, guess: f64, step: u32, tolerance: f64) -> Result<f64, String> {
    trace!(x, guess, step, "newton step");
    match_all((x, guess, step))
        .with(
            guard3(|x: &f64, g: &f64, _: &u32| (g * g - x).abs() < tolerance),
            |_, g, _| Ok::<f64, String>(*g),
        )
        .with(guard3(|_: &f64, _: &f64, step: &u32| *step >= MAX_STEPS), |x, g, _| {
            Err::<f64, String>(format!(
                "no convergence for {x} within {tolerance} after {MAX_STEPS} steps (last guess {g})"
            ))
        })
        .with(wildcard(), |x, g, step| {
            improve(*x, (g + x / g) / 2.0, step + 1, tolerance)
        })
        .materialize::<Result<f64, String>>()
        .map_err(|e| e.to_string())?
}
