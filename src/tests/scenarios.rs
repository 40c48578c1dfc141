//! The concrete worked examples: one test per scenario.

use ndarray::{Array1, Array2, Array4};

use crate::error::TerminationCode;
use crate::{trace, Direction, Grid, Termination};

use super::support::uniform_grid;

fn single_seed(seed: [f64; 3]) -> Array2<f64> {
    Array2::from_shape_vec((1, 3), seed.to_vec()).unwrap()
}

#[test]
fn scenario_1_uniform_x_field_interior_seed() {
    let grid = uniform_grid([101, 101, 101], 1.0, [1.0, 0.0, 0.0], [false, false, false]);
    let seeds = single_seed([0.0, 0.0, 0.0]);
    let out = trace(&seeds, &grid, Direction::Forward, 0.1, 2000).unwrap();

    let line = &out.trajectories[0];
    assert_eq!(line.len(), 1001);
    for (i, p) in line.iter().enumerate() {
        assert!((p[0] - i as f64 * 0.1).abs() < 1e-9, "point {i}: {p:?}");
        assert_eq!(p[1], 0.0);
        assert_eq!(p[2], 0.0);
    }
    match &out.termination {
        Termination::Single(codes) => assert_eq!(codes[0], TerminationCode::OutOfDomain.code()),
        Termination::Bidirectional(_) => panic!("expected single-direction termination"),
    }
}

#[test]
fn scenario_2_backward_from_same_seed() {
    let grid = uniform_grid([101, 101, 101], 1.0, [1.0, 0.0, 0.0], [false, false, false]);
    let seeds = single_seed([0.0, 0.0, 0.0]);
    let out = trace(&seeds, &grid, Direction::Backward, 0.1, 2000).unwrap();

    let line = &out.trajectories[0];
    assert_eq!(line.len(), 1);
    assert_eq!(line[0], [0.0, 0.0, 0.0]);
    match &out.termination {
        Termination::Single(codes) => assert_eq!(codes[0], TerminationCode::OutOfDomain.code()),
        Termination::Bidirectional(_) => panic!("expected single-direction termination"),
    }
}

#[test]
fn scenario_3_cyclic_x_axis() {
    let grid = uniform_grid([101, 101, 101], 1.0, [1.0, 0.0, 0.0], [true, false, false]);
    let seeds = single_seed([99.95, 50.0, 50.0]);
    let out = trace(&seeds, &grid, Direction::Forward, 0.1, 4).unwrap();

    let line = &out.trajectories[0];
    let expected = [
        [99.95, 50.0, 50.0],
        [0.05, 50.0, 50.0],
        [0.15, 50.0, 50.0],
        [0.25, 50.0, 50.0],
    ];
    assert_eq!(line.len(), expected.len());
    for (got, want) in line.iter().zip(expected.iter()) {
        for c in 0..3 {
            assert!((got[c] - want[c]).abs() < 1e-9, "{got:?} vs {want:?}");
        }
    }
    match &out.termination {
        Termination::Single(codes) => {
            assert_eq!(codes[0], TerminationCode::StepBudgetExhausted.code())
        }
        Termination::Bidirectional(_) => panic!("expected single-direction termination"),
    }
}

#[test]
fn scenario_4_non_matching_cyclic_faces_rejected() {
    let mut field = Array4::from_elem((100, 100, 100, 3), 1.0);
    field.slice_mut(ndarray::s![0, .., .., 0]).fill(-1.0);
    let axis = Array1::from_shape_fn(100, |i| i as f64);
    let result = Grid::new(
        field,
        [axis.clone(), axis.clone(), axis],
        [true, false, false],
    );
    assert!(result.is_err());
}

#[test]
fn scenario_5_multi_seed_round_of_termination() {
    let grid = uniform_grid([101, 101, 101], 1.0, [1.0, 0.0, 0.0], [false, false, false]);
    let seeds = Array2::from_shape_vec(
        (3, 3),
        vec![
            50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0,
        ],
    )
    .unwrap();
    let out = trace(&seeds, &grid, Direction::Both, 0.1, 2000).unwrap();

    assert_eq!(out.trajectories.len(), 3);
    match &out.termination {
        Termination::Bidirectional(codes) => {
            for pair in codes {
                assert_eq!(*pair, [TerminationCode::OutOfDomain.code(); 2]);
            }
        }
        Termination::Single(_) => panic!("expected bidirectional termination"),
    }
}

#[test]
fn scenario_6_direction_change_field() {
    // field is (1,0,0) at x-node-indices 0 and 1, (0,1,0) at indices 2 and 3,
    // independent of y and z; the transition is trilinearly blended between
    // node index 1 and node index 2.
    let field = Array4::from_shape_fn((4, 4, 4, 3), |(ix, _, _, c)| {
        if ix < 2 {
            [1.0, 0.0, 0.0][c]
        } else {
            [0.0, 1.0, 0.0][c]
        }
    });
    let axis = Array1::from_shape_fn(4, |i| i as f64);
    let grid = Grid::new(field, [axis.clone(), axis.clone(), axis], [false, false, false])
        .expect("valid grid");

    let seeds = single_seed([0.0, 0.0, 0.0]);
    let out = trace(&seeds, &grid, Direction::Forward, 0.1, 1000).unwrap();

    let line = &out.trajectories[0];
    // Early on, while entirely inside the x in [0, 1] cell, the field is
    // exactly (1, 0, 0): y and z stay put and x advances by h each step.
    for p in line.iter().take(10) {
        assert_eq!(p[1], 0.0);
        assert_eq!(p[2], 0.0);
    }

    let last = *line.last().unwrap();
    assert!(last[0] > 0.0 && last[0] < 3.0, "x_last = {}", last[0]);
    assert!(last[1] > 2.9, "y_last = {}", last[1]);

    match &out.termination {
        Termination::Single(codes) => assert_eq!(codes[0], TerminationCode::OutOfDomain.code()),
        Termination::Bidirectional(_) => panic!("expected single-direction termination"),
    }
}
