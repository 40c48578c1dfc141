//! Grid Model: the immutable bundle of field samples, coordinate axes,
//! and cyclic flags that every other component reads from.
//!
//! Construction is the only place invariants are checked. Once a `Grid`
//! exists, every other component (Sampler, Step Engine, Line Tracer,
//! Dispatcher) treats it as already-valid and never re-validates it.

use std::sync::Arc;

use ndarray::{Array1, Array4};
use tracing::debug;

use crate::error::ValidationError;

/// Which cell a coordinate falls into along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum CellLookup {
    /// Lower index `i` such that `axis[i] <= q < axis[i + 1]`, and the
    /// in-cell fraction in `[0, 1]`.
    Inside { index: usize, fraction: f64 },
    /// `q` is outside `[axis[0], axis[n - 1]]` on a non-cyclic axis.
    OutOfDomain,
}

/// The immutable vector field, its axes, and cyclic flags.
///
/// Construct with [`Grid::new`]. A successfully constructed `Grid` is a
/// proof that its axes are strictly monotone and that every cyclic
/// axis's opposing faces match componentwise.
#[derive(Debug, Clone)]
pub struct Grid {
    field: Arc<Array4<f64>>,
    axes: [Array1<f64>; 3],
    cyclic: [bool; 3],
    /// Minimum adjacent-node spacing per axis, cached at construction time.
    min_spacing: [f64; 3],
}

impl Grid {
    /// Construct and validate a grid.
    ///
    /// `field` must have shape `(nx, ny, nz, 3)` with `nx, ny, nz >= 2`.
    /// Each axis in `axes` must be strictly monotone increasing and its
    /// length must match the corresponding field dimension. For every
    /// `i` with `cyclic[i]` true, the field slices at index `0` and
    /// index `n - 1` along axis `i` must be componentwise equal.
    pub fn new(
        field: Array4<f64>,
        axes: [Array1<f64>; 3],
        cyclic: [bool; 3],
    ) -> Result<Self, ValidationError> {
        let shape = field.shape();
        if shape[3] != 3 {
            return Err(ValidationError::FieldShape {
                shape: shape.to_vec(),
            });
        }
        for dim in 0..3 {
            if shape[dim] < 2 {
                return Err(ValidationError::AxisTooShort {
                    axis: dim,
                    len: shape[dim],
                });
            }
            if axes[dim].len() != shape[dim] {
                return Err(ValidationError::AxisLengthMismatch {
                    axis: dim,
                    axis_len: axes[dim].len(),
                    field_len: shape[dim],
                });
            }
            Self::validate_monotone(dim, &axes[dim])?;
        }

        for dim in 0..3 {
            if cyclic[dim] {
                Self::validate_cyclic_face(dim, &field)?;
            }
        }

        let min_spacing = [
            Self::min_adjacent_spacing(&axes[0]),
            Self::min_adjacent_spacing(&axes[1]),
            Self::min_adjacent_spacing(&axes[2]),
        ];

        debug!(
            shape = ?shape,
            cyclic = ?cyclic,
            min_spacing = ?min_spacing,
            "constructed grid"
        );

        Ok(Self {
            field: Arc::new(field),
            axes,
            cyclic,
            min_spacing,
        })
    }

    /// The grid's own origin: the first node's coordinate on each axis.
    #[inline]
    pub(crate) fn origin(&self) -> [f64; 3] {
        [self.axes[0][0], self.axes[1][0], self.axes[2][0]]
    }

    /// A cheap copy of this grid with every axis shifted by `-origin`,
    /// sharing the same field data via `Arc`. Used by the Orchestrator
    /// to translate into a numerically-conditioned frame starting at
    /// zero before dispatching; shifting is a pure conditioning choice
    /// and does not change monotonicity, spacing, or cyclic validity,
    /// so it bypasses full re-validation.
    pub(crate) fn shifted(&self, origin: [f64; 3]) -> Self {
        let axes = std::array::from_fn(|dim| &self.axes[dim] - origin[dim]);
        Self {
            field: Arc::clone(&self.field),
            axes,
            cyclic: self.cyclic,
            min_spacing: self.min_spacing,
        }
    }

    fn validate_monotone(axis: usize, values: &Array1<f64>) -> Result<(), ValidationError> {
        for index in 0..values.len().saturating_sub(1) {
            if !(values[index] < values[index + 1]) {
                return Err(ValidationError::AxisNotMonotone { axis, index });
            }
        }
        Ok(())
    }

    fn validate_cyclic_face(axis: usize, field: &Array4<f64>) -> Result<(), ValidationError> {
        let last = field.shape()[axis] - 1;
        let first_slice = field.index_axis(ndarray::Axis(axis), 0);
        let last_slice = field.index_axis(ndarray::Axis(axis), last);
        for component in 0..3 {
            let a = first_slice.index_axis(ndarray::Axis(2), component);
            let b = last_slice.index_axis(ndarray::Axis(2), component);
            if a != b {
                return Err(ValidationError::CyclicFaceMismatch { axis, component });
            }
        }
        Ok(())
    }

    fn min_adjacent_spacing(values: &Array1<f64>) -> f64 {
        values
            .windows(2)
            .into_iter()
            .map(|pair| pair[1] - pair[0])
            .fold(f64::INFINITY, f64::min)
    }

    /// Length of the grid along axis `dim` (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn axis_len(&self, dim: usize) -> usize {
        self.axes[dim].len()
    }

    #[inline]
    pub(crate) fn axis(&self, dim: usize) -> &Array1<f64> {
        &self.axes[dim]
    }

    #[inline]
    pub(crate) fn cyclic(&self, dim: usize) -> bool {
        self.cyclic[dim]
    }

    #[inline]
    pub(crate) fn field(&self) -> &Array4<f64> {
        self.field.as_ref()
    }

    /// The minimum adjacent-node spacing per axis, cached at construction.
    #[inline]
    pub(crate) fn min_spacing(&self) -> [f64; 3] {
        self.min_spacing
    }

    /// Fixed RK4 arc length for a given `step_size` fraction: `step_size
    /// * min(axis spacings)`, reduced across axes as specified.
    #[inline]
    pub(crate) fn arc_length(&self, step_size: f64) -> f64 {
        let m = self.min_spacing;
        step_size * m[0].min(m[1]).min(m[2])
    }

    /// Locate the cell bracketing coordinate `q` along axis `dim` via
    /// binary search. Non-cyclic callers get `OutOfDomain` outside
    /// `[axis[0], axis[n-1]]`; cyclic callers must wrap `q` before
    /// calling this (see `Sampler`).
    pub(crate) fn locate_cell(&self, dim: usize, q: f64) -> CellLookup {
        let axis = &self.axes[dim];
        let n = axis.len();
        let lo = axis[0];
        let hi = axis[n - 1];

        if !self.cyclic[dim] && (q < lo || q > hi) {
            return CellLookup::OutOfDomain;
        }

        if q >= hi {
            // On the upper face: cyclic wrap snaps here (fraction 0 into
            // node 0), non-cyclic boundary-inclusive seed also lands here.
            return CellLookup::Inside {
                index: n - 1,
                fraction: 0.0,
            };
        }

        // Binary search for the largest index i with axis[i] <= q.
        let mut left = 0usize;
        let mut right = n - 1;
        while left + 1 < right {
            let mid = left + (right - left) / 2;
            if axis[mid] <= q {
                left = mid;
            } else {
                right = mid;
            }
        }

        let span = axis[left + 1] - axis[left];
        let fraction = if span > 0.0 { (q - axis[left]) / span } else { 0.0 };
        CellLookup::Inside {
            index: left,
            fraction,
        }
    }
}
