//! Line Tracer: drives the Step Engine from one seed until termination.
//!
//! State machine: `Start -> Running` on successful seed validation,
//! `Start -> Terminated` on an invalid seed, `Running -> Running` on a
//! successful step, `Running -> Terminated` on any step result. Once
//! terminated the line never advances again.

use crate::error::TerminationCode;
use crate::grid::Grid;
use crate::sampler::{sample, wrap_point, SampleOutcome};
use crate::step::{step, StepOutcome};

/// A single seed's trajectory for one integration direction.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub points: Vec<[f64; 3]>,
    pub termination: TerminationCode,
}

/// Trace one seed under sign `+1.0` (forward) or `-1.0` (backward).
///
/// `h` is the fixed RK4 arc length for this trace (`step_size *
/// min(axis spacing)`, already resolved by the caller). The seed is
/// stored verbatim in slot 0 regardless of any cyclic wraparound;
/// every subsequent point is stored in the Sampler's wrapped frame.
pub(crate) fn trace_line(grid: &Grid, seed: [f64; 3], sign: f64, h: f64, max_steps: usize) -> Trajectory {
    let mut points = Vec::with_capacity(max_steps.min(1024));
    points.push(seed);

    // A boundary-inclusive seed is in-domain; only the first step that
    // would cross out terminates the line.
    match sample(grid, seed) {
        SampleOutcome::OutOfDomain => {
            return Trajectory {
                points,
                termination: TerminationCode::OutOfDomain,
            };
        }
        SampleOutcome::Nan => {
            return Trajectory {
                points,
                termination: TerminationCode::Nan,
            };
        }
        SampleOutcome::Value(_) => {}
    }

    let mut current = seed;
    while points.len() < max_steps {
        match step(grid, current, sign, h) {
            StepOutcome::Advanced(next_raw) => {
                let next = wrap_point(grid, next_raw);
                points.push(next);
                current = next;
            }
            StepOutcome::Terminated(code) => {
                return Trajectory {
                    points,
                    termination: code,
                };
            }
        }
    }

    Trajectory {
        points,
        termination: TerminationCode::StepBudgetExhausted,
    }
}
