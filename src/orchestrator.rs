//! Orchestrator: the public `trace` operation. Validates inputs,
//! performs the origin-translation conditioning step, and invokes the
//! Parallel Dispatcher once (single direction) or twice (bidirectional),
//! stitching the two halves together.

use ndarray::{Array1, Array2};
use tracing::info;

use crate::dispatch::trace_all;
use crate::error::ValidationError;
use crate::grid::Grid;
use crate::tracer::Trajectory;

/// Integration direction for a trace call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Both,
    Forward,
}

impl TryFrom<i32> for Direction {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Backward),
            0 => Ok(Direction::Both),
            1 => Ok(Direction::Forward),
            other => Err(ValidationError::InvalidDirection { value: other }),
        }
    }
}

/// Per-seed termination codes: one column for a single direction, two
/// (forward, backward) for a bidirectional trace.
#[derive(Debug, Clone)]
pub enum Termination {
    Single(Vec<i32>),
    Bidirectional(Vec<[i32; 2]>),
}

/// The result of a `trace` call: one polyline and termination reading
/// per input seed, in input order.
#[derive(Debug, Clone)]
pub struct TraceOutput {
    pub trajectories: Vec<Vec<[f64; 3]>>,
    pub termination: Termination,
}

fn validate_seeds(seeds: &Array2<f64>) -> Result<(), ValidationError> {
    if seeds.ncols() != 3 {
        return Err(ValidationError::SeedShape {
            shape: seeds.shape().to_vec(),
        });
    }
    Ok(())
}

fn validate_max_steps(max_steps: usize) -> Result<(), ValidationError> {
    if max_steps == 0 {
        return Err(ValidationError::InvalidMaxSteps { value: 0 });
    }
    Ok(())
}

fn validate_step_size(step_size: f64) -> Result<(), ValidationError> {
    if !step_size.is_finite() || step_size <= 0.0 {
        return Err(ValidationError::InvalidStepSize { value: step_size });
    }
    Ok(())
}

/// Drop out any point carrying a NaN component, then translate the
/// remaining points back by `origin`.
fn finish_points(points: &[[f64; 3]], origin: [f64; 3]) -> Vec<[f64; 3]> {
    points
        .iter()
        .filter(|p| !p.iter().any(|c| c.is_nan()))
        .map(|p| [p[0] + origin[0], p[1] + origin[1], p[2] + origin[2]])
        .collect()
}

/// Trace streamlines from `seeds` through `grid`.
///
/// `direction` selects forward, backward, or both (in which case each
/// seed's output is `reverse(backward[1..]) ++ forward[0..]`, so the
/// seed itself appears exactly once, at the join).
pub fn trace(
    seeds: &Array2<f64>,
    grid: &Grid,
    direction: Direction,
    step_size: f64,
    max_steps: usize,
) -> Result<TraceOutput, ValidationError> {
    validate_seeds(seeds)?;
    validate_max_steps(max_steps)?;
    validate_step_size(step_size)?;

    let origin = grid.origin();
    let shifted_grid = grid.shifted(origin);
    let origin_arr = Array1::from(origin.to_vec());
    let translated_seeds = seeds - &origin_arr;
    let h = shifted_grid.arc_length(step_size);

    info!(
        seeds = seeds.nrows(),
        ?direction,
        step_size,
        max_steps,
        "starting trace"
    );

    match direction {
        Direction::Forward | Direction::Backward => {
            let sign = if direction == Direction::Forward {
                1.0
            } else {
                -1.0
            };
            let lines = trace_all(&shifted_grid, &translated_seeds, sign, h, max_steps);

            let mut trajectories = Vec::with_capacity(lines.len());
            let mut termination = Vec::with_capacity(lines.len());
            for line in &lines {
                trajectories.push(finish_points(&line.points, origin));
                termination.push(line.termination.code());
            }

            Ok(TraceOutput {
                trajectories,
                termination: Termination::Single(termination),
            })
        }
        Direction::Both => {
            let forward = trace_all(&shifted_grid, &translated_seeds, 1.0, h, max_steps);
            let backward = trace_all(&shifted_grid, &translated_seeds, -1.0, h, max_steps);

            let mut trajectories = Vec::with_capacity(forward.len());
            let mut termination = Vec::with_capacity(forward.len());
            for (f, b) in forward.iter().zip(backward.iter()) {
                trajectories.push(finish_points(&stitch(f, b), origin));
                termination.push([f.termination.code(), b.termination.code()]);
            }

            Ok(TraceOutput {
                trajectories,
                termination: Termination::Bidirectional(termination),
            })
        }
    }
}

/// `reverse(backward[1..n_r]) ++ forward[0..n_f]`. Degrades gracefully
/// when either half has length 0 or 1.
fn stitch(forward: &Trajectory, backward: &Trajectory) -> Vec<[f64; 3]> {
    let mut combined = Vec::with_capacity(forward.points.len() + backward.points.len());
    if backward.points.len() > 1 {
        combined.extend(backward.points[1..].iter().rev().copied());
    }
    combined.extend(forward.points.iter().copied());
    combined
}
