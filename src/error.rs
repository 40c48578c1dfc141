//! Structured error taxonomy for grid construction and trace validation.
//!
//! Every variant here corresponds to a precondition named in the core's
//! external contract (field shape, axis monotonicity, cyclic face
//! matching, seed shape, and the scalar trace parameters). None of these
//! are raised mid-trace: validation happens synchronously, before any
//! seed is dispatched, so a `ValidationError` always aborts the whole
//! call rather than a single line.

use thiserror::Error;

/// A precondition violated during grid construction or trace validation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("field array must be rank 4 with shape (nx, ny, nz, 3), got {shape:?}")]
    FieldShape { shape: Vec<usize> },

    #[error("axis {axis} must have at least 2 nodes, got {len}")]
    AxisTooShort { axis: usize, len: usize },

    #[error("axis {axis} length {axis_len} does not match field dimension {field_len}")]
    AxisLengthMismatch {
        axis: usize,
        axis_len: usize,
        field_len: usize,
    },

    #[error("axis {axis} is not strictly monotone increasing at index {index}")]
    AxisNotMonotone { axis: usize, index: usize },

    #[error(
        "cyclic axis {axis} has mismatched field values at its first and last node (component {component})"
    )]
    CyclicFaceMismatch { axis: usize, component: usize },

    #[error("seeds must be a (n, 3) array, got shape {shape:?}")]
    SeedShape { shape: Vec<usize> },

    #[error("max_steps must be a positive integer, got {value}")]
    InvalidMaxSteps { value: i64 },

    #[error("step_size must be a positive finite float, got {value}")]
    InvalidStepSize { value: f64 },

    #[error("direction must be -1, 0, or 1, got {value}")]
    InvalidDirection { value: i32 },

    #[error("worker count must be a positive integer, got {value}")]
    InvalidWorkerCount { value: i64 },
}

/// Reason a single trajectory stopped advancing.
///
/// Not an error: every seed always produces one of these per direction,
/// and one line's termination never affects any other line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum TerminationCode {
    /// A NaN was encountered in the sampled field or in the updated position.
    Nan = -1,
    /// The step budget (`max_steps`) was exhausted.
    StepBudgetExhausted = 1,
    /// The next step would leave the domain on a non-cyclic face.
    OutOfDomain = 2,
}

impl TerminationCode {
    /// The integer encoding used at the public boundary (`-1`, `1`, `2`).
    #[inline]
    pub fn code(self) -> i32 {
        self as i8 as i32
    }
}

impl From<TerminationCode> for i32 {
    #[inline]
    fn from(value: TerminationCode) -> Self {
        value.code()
    }
}
