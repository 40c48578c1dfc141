//! Step Engine: one classical fourth-order Runge-Kutta step of fixed
//! arc length along the unit field direction.

use crate::error::TerminationCode;
use crate::grid::Grid;
use crate::sampler::{sample, SampleOutcome};

/// Outcome of a single RK4 step attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum StepOutcome {
    /// The step succeeded; the trajectory advances to this point.
    Advanced([f64; 3]),
    /// The line terminates here (at the *current* point, not a partial
    /// next point) with the given code.
    Terminated(TerminationCode),
}

fn add_scaled(p: [f64; 3], dir: [f64; 3], scale: f64) -> [f64; 3] {
    [
        p[0] + scale * dir[0],
        p[1] + scale * dir[1],
        p[2] + scale * dir[2],
    ]
}

/// Sample the field at `p` and return the unit direction `sign * v /
/// ||v||`, or the termination code that should end the line.
fn unit_direction(grid: &Grid, sign: f64, p: [f64; 3]) -> Result<[f64; 3], TerminationCode> {
    match sample(grid, p) {
        SampleOutcome::Value(v) => {
            let magnitude = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            if magnitude == 0.0 {
                // Normalization undefined at a null point: treat as NaN.
                Err(TerminationCode::Nan)
            } else {
                Ok([
                    sign * v[0] / magnitude,
                    sign * v[1] / magnitude,
                    sign * v[2] / magnitude,
                ])
            }
        }
        SampleOutcome::OutOfDomain => Err(TerminationCode::OutOfDomain),
        SampleOutcome::Nan => Err(TerminationCode::Nan),
    }
}

/// Advance `p` by one RK4 step of arc length `h` along `sign * v/||v||`.
pub(crate) fn step(grid: &Grid, p: [f64; 3], sign: f64, h: f64) -> StepOutcome {
    let k1 = match unit_direction(grid, sign, p) {
        Ok(d) => d,
        Err(code) => return StepOutcome::Terminated(code),
    };

    let p2 = add_scaled(p, k1, h / 2.0);
    let k2 = match unit_direction(grid, sign, p2) {
        Ok(d) => d,
        Err(code) => return StepOutcome::Terminated(code),
    };

    let p3 = add_scaled(p, k2, h / 2.0);
    let k3 = match unit_direction(grid, sign, p3) {
        Ok(d) => d,
        Err(code) => return StepOutcome::Terminated(code),
    };

    let p4 = add_scaled(p, k3, h);
    let k4 = match unit_direction(grid, sign, p4) {
        Ok(d) => d,
        Err(code) => return StepOutcome::Terminated(code),
    };

    let mut next = p;
    for i in 0..3 {
        next[i] += (h / 6.0) * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
    }

    if next.iter().any(|component| component.is_nan()) {
        return StepOutcome::Terminated(TerminationCode::Nan);
    }

    StepOutcome::Advanced(next)
}
