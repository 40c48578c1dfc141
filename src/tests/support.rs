use ndarray::{Array1, Array4};

use crate::Grid;

/// A uniformly-spaced axis `0, spacing, 2*spacing, ..., (n-1)*spacing`.
pub(crate) fn uniform_axis(n: usize, spacing: f64) -> Array1<f64> {
    Array1::from_shape_fn(n, |i| i as f64 * spacing)
}

/// A constant vector field of shape `(nx, ny, nz, 3)`.
pub(crate) fn constant_field(nx: usize, ny: usize, nz: usize, value: [f64; 3]) -> Array4<f64> {
    Array4::from_shape_fn((nx, ny, nz, 3), |(_, _, _, c)| value[c])
}

/// Build and validate a grid with uniform spacing and a constant field.
pub(crate) fn uniform_grid(
    n: [usize; 3],
    spacing: f64,
    value: [f64; 3],
    cyclic: [bool; 3],
) -> Grid {
    let field = constant_field(n[0], n[1], n[2], value);
    let axes = [
        uniform_axis(n[0], spacing),
        uniform_axis(n[1], spacing),
        uniform_axis(n[2], spacing),
    ];
    Grid::new(field, axes, cyclic).expect("uniform grid should validate")
}
