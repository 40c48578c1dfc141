//! Parallel Runge-Kutta streamline integration over a regular 3D vector
//! field grid.
//!
//! The crate traces streamlines: given a vector field sampled on a
//! regular (possibly non-uniform, possibly cyclic) grid and a set of
//! seed points, it integrates each seed forward, backward, or in both
//! directions using a fixed-arc-length fourth-order Runge-Kutta
//! integrator, until the line leaves the domain, exhausts its step
//! budget, or runs into an undefined (NaN) sample.
//!
//! The public surface is three operations: [`Grid::new`] (construct
//! and validate a grid), [`trace`] (integrate streamlines from a set
//! of seeds), and [`set_worker_count`]/[`get_worker_count`] (the one
//! piece of process-wide configuration, the size of the thread pool
//! tracing runs on).
//!
//! ```no_run
//! use ndarray::{Array1, Array2, Array4};
//! use streamtracer::{trace, Direction, Grid};
//!
//! let field = Array4::from_elem((4, 4, 4, 3), 0.0);
//! let axis = Array1::linspace(0.0, 3.0, 4);
//! let grid = Grid::new(field, [axis.clone(), axis.clone(), axis], [false, false, false])?;
//!
//! let seeds = Array2::from_shape_vec((1, 3), vec![1.0, 1.0, 1.0])?;
//! let output = trace(&seeds, &grid, Direction::Forward, 0.1, 100)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod dispatch;
mod error;
mod grid;
mod orchestrator;
mod sampler;
mod step;
mod tracer;

pub use dispatch::{get_worker_count, set_worker_count};
pub use error::{TerminationCode, ValidationError};
pub use grid::Grid;
pub use orchestrator::{trace, Direction, TraceOutput, Termination};
pub use tracer::Trajectory;

#[cfg(test)]
mod tests;
