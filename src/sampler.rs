//! Sampler: trilinear interpolation of the field at an arbitrary point,
//! with cyclic wraparound and out-of-domain/NaN detection.

use crate::grid::{CellLookup, Grid};

/// Result of sampling the field at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SampleOutcome {
    /// The interpolated (vx, vy, vz) at the point.
    Value([f64; 3]),
    /// The point lies outside the domain on a non-cyclic axis.
    OutOfDomain,
    /// A sampled component came out NaN.
    Nan,
}

/// Wrap `q` into `[axis[0], axis[n-1])` via a single `rem_euclid`
/// reduction — no accumulation drift across repeated wraps within a
/// trace, per the spec's "one fmod-style reduction" requirement.
fn wrap_cyclic(grid: &Grid, dim: usize, q: f64) -> f64 {
    if !grid.cyclic(dim) {
        return q;
    }
    let axis = grid.axis(dim);
    let lo = axis[0];
    let hi = axis[axis.len() - 1];
    let span = hi - lo;
    lo + (q - lo).rem_euclid(span)
}

/// The two (index, weight) corner contributions along one axis. When
/// `fraction == 0` the "upper" corner collapses to the same index as
/// the lower one (its weight is zero), so no out-of-bounds or
/// wrapped-to-node-0 index is ever actually read.
fn corners(index: usize, fraction: f64) -> [(usize, f64); 2] {
    let upper_index = if fraction > 0.0 { index + 1 } else { index };
    [(index, 1.0 - fraction), (upper_index, fraction)]
}

/// Wrap every cyclic axis of `p` into `[axis[0], axis[n-1])`. Non-cyclic
/// axes pass through unchanged. Used to keep stored trajectory points in
/// the Sampler's frame after a step, per the cyclic-wraparound contract.
pub(crate) fn wrap_point(grid: &Grid, p: [f64; 3]) -> [f64; 3] {
    [
        wrap_cyclic(grid, 0, p[0]),
        wrap_cyclic(grid, 1, p[1]),
        wrap_cyclic(grid, 2, p[2]),
    ]
}

/// Sample the field at `p`, expressed in axis (grid-relative) coordinates.
pub(crate) fn sample(grid: &Grid, p: [f64; 3]) -> SampleOutcome {
    let mut wrapped = [0.0; 3];
    for dim in 0..3 {
        wrapped[dim] = wrap_cyclic(grid, dim, p[dim]);
    }

    let mut index = [0usize; 3];
    let mut fraction = [0.0f64; 3];
    for dim in 0..3 {
        match grid.locate_cell(dim, wrapped[dim]) {
            CellLookup::OutOfDomain => return SampleOutcome::OutOfDomain,
            CellLookup::Inside {
                index: i,
                fraction: f,
            } => {
                index[dim] = i;
                fraction[dim] = f;
            }
        }
    }

    let cx = corners(index[0], fraction[0]);
    let cy = corners(index[1], fraction[1]);
    let cz = corners(index[2], fraction[2]);

    let field = grid.field();
    let mut result = [0.0f64; 3];
    for (component, slot) in result.iter_mut().enumerate() {
        let mut acc = 0.0;
        for &(ix, wx) in &cx {
            if wx == 0.0 {
                continue;
            }
            for &(iy, wy) in &cy {
                if wy == 0.0 {
                    continue;
                }
                for &(iz, wz) in &cz {
                    if wz == 0.0 {
                        continue;
                    }
                    acc += wx * wy * wz * field[[ix, iy, iz, component]];
                }
            }
        }
        if acc.is_nan() {
            return SampleOutcome::Nan;
        }
        *slot = acc;
    }

    SampleOutcome::Value(result)
}
