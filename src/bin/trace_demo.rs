//! Demo binary: trace a handful of seeds through a synthetic swirling
//! field and print each trajectory's length and termination code.
//!
//! Not part of the library's public surface; a worked example of wiring
//! `tracing` output and reading back a `trace` call's result.

use ndarray::{Array1, Array2, Array4};
use tracing_subscriber::EnvFilter;

use streamtracer::{trace, set_worker_count, Direction, Grid};

fn build_demo_grid() -> anyhow::Result<Grid> {
    const N: usize = 64;
    let axis = Array1::linspace(0.0, (N - 1) as f64, N);

    // A field that rotates around the z axis: (-y, x, 0) recentered on
    // the grid's midpoint, so streamlines spiral outward from the core.
    let center = (N - 1) as f64 / 2.0;
    let field = Array4::from_shape_fn((N, N, N, 3), |(i, j, _k, c)| {
        let x = i as f64 - center;
        let y = j as f64 - center;
        match c {
            0 => -y,
            1 => x,
            _ => 0.0,
        }
    });

    Ok(Grid::new(field, [axis.clone(), axis.clone(), axis], [false, false, false])?)
}

fn run() -> anyhow::Result<()> {
    let grid = build_demo_grid()?;

    let seeds = Array2::from_shape_vec(
        (4, 3),
        vec![
            40.0, 32.0, 32.0, 48.0, 32.0, 32.0, 56.0, 32.0, 32.0, 60.0, 32.0, 32.0,
        ],
    )?;

    set_worker_count(4)?;
    let output = trace(&seeds, &grid, Direction::Forward, 0.25, 5_000)?;

    for (i, (trajectory, code)) in output
        .trajectories
        .iter()
        .zip(match &output.termination {
            streamtracer::Termination::Single(codes) => codes.iter(),
            streamtracer::Termination::Bidirectional(_) => unreachable!("single direction"),
        })
        .enumerate()
    {
        println!(
            "seed {i}: {} points, terminated with code {code}",
            trajectory.len()
        );
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        eprintln!("trace_demo failed: {err:#}");
        std::process::exit(1);
    }
}
