//! Tests for the finite-difference radial eigensolver

use super::{Eigensolver, MatrixSolver};
use crate::error::AvAtomError;
use crate::grid::LogGrid;
use crate::session::BoundaryCondition;
use ndarray::Array2;
use std::f64::consts::PI;

fn coulomb(grid: &LogGrid, z: f64, spindims: usize) -> Array2<f64> {
    let row = grid.xgrid().mapv(|x| -z * (-x).exp());
    let mut v = Array2::zeros((spindims, grid.len()));
    for mut spin_row in v.rows_mut() {
        spin_row.assign(&row);
    }
    v
}

#[test]
fn test_hydrogen_levels() {
    let grid = LogGrid::new(-8.0, 30.0, 300).unwrap();
    let solver = MatrixSolver::new(BoundaryCondition::Dirichlet);
    let states = solver.solve(coulomb(&grid, 1.0, 1).view(), &grid, 2, 2).unwrap();

    let e1s = states.eigvals[[0, 0, 0]];
    let e2s = states.eigvals[[0, 0, 1]];
    let e2p = states.eigvals[[0, 1, 0]];
    assert!((e1s + 0.5).abs() < 2e-3, "1s = {}", e1s);
    assert!((e2s + 0.125).abs() < 2e-3, "2s = {}", e2s);
    assert!((e2p + 0.125).abs() < 2e-3, "2p = {}", e2p);
}

#[test]
fn test_hydrogenic_scaling_with_charge() {
    let grid = LogGrid::new(-8.0, 30.0, 300).unwrap();
    let solver = MatrixSolver::new(BoundaryCondition::Dirichlet);
    let states = solver.solve(coulomb(&grid, 2.0, 1).view(), &grid, 1, 1).unwrap();
    assert!((states.eigvals[[0, 0, 0]] + 2.0).abs() < 1e-2);
}

#[test]
fn test_eigenfunctions_normalised_and_ordered() {
    let grid = LogGrid::new(-8.0, 10.0, 200).unwrap();
    let solver = MatrixSolver::new(BoundaryCondition::Dirichlet);
    let states = solver.solve(coulomb(&grid, 3.0, 1).view(), &grid, 3, 4).unwrap();
    let x = grid.xgrid();

    for l in 0..3 {
        for n in 0..4 {
            let p = states.eigfuncs.slice(ndarray::s![0, l, n, ..]);
            let norm: f64 = p
                .iter()
                .zip(x.iter())
                .map(|(&pi, &xi)| pi * pi * (2.0 * xi).exp())
                .sum::<f64>()
                * grid.dx();
            assert!((norm - 1.0).abs() < 1e-10, "l={} n={} norm={}", l, n, norm);
            // pinned to zero at the cavity wall
            assert_eq!(p[grid.len() - 1], 0.0);
        }
        for n in 1..4 {
            assert!(states.eigvals[[0, l, n]] >= states.eigvals[[0, l, n - 1]]);
        }
    }
}

#[test]
fn test_identical_spin_channels() {
    let grid = LogGrid::new(-8.0, 10.0, 120).unwrap();
    let solver = MatrixSolver::new(BoundaryCondition::Dirichlet);
    let states = solver.solve(coulomb(&grid, 1.0, 2).view(), &grid, 2, 2).unwrap();
    assert_eq!(states.eigvals.dim(), (2, 2, 2));
    assert_eq!(states.eigfuncs.dim(), (2, 2, 2, 120));
    for l in 0..2 {
        for n in 0..2 {
            assert_eq!(states.eigvals[[0, l, n]], states.eigvals[[1, l, n]]);
        }
    }
}

#[test]
fn test_free_particle_boundary_conditions() {
    let radius = 5.0;
    let grid = LogGrid::new(-8.0, radius, 300).unwrap();
    let v = Array2::zeros((1, grid.len()));

    let dirichlet = MatrixSolver::new(BoundaryCondition::Dirichlet)
        .solve(v.view(), &grid, 1, 2)
        .unwrap();
    let neumann = MatrixSolver::new(BoundaryCondition::Neumann)
        .solve(v.view(), &grid, 1, 2)
        .unwrap();

    // j0(kR) = 0 gives kR = π ; j0'(kR) = 0 gives kR = 0 and 4.4934
    let e_dirichlet = PI * PI / (2.0 * radius * radius);
    let e_neumann = 4.493_409_457_909_064_f64.powi(2) / (2.0 * radius * radius);
    assert!((dirichlet.eigvals[[0, 0, 0]] - e_dirichlet).abs() < 1e-3);
    assert!(neumann.eigvals[[0, 0, 0]].abs() < 1e-3);
    assert!((neumann.eigvals[[0, 0, 1]] - e_neumann).abs() < 2e-3);
}

#[test]
fn test_too_many_states_requested() {
    let grid = LogGrid::new(-4.0, 2.0, 4).unwrap();
    let solver = MatrixSolver::new(BoundaryCondition::Dirichlet);
    let result = solver.solve(coulomb(&grid, 1.0, 1).view(), &grid, 1, 4);
    assert!(matches!(result, Err(AvAtomError::Configuration(_))));

    // the Neumann wall point is a free unknown
    let neumann = MatrixSolver::new(BoundaryCondition::Neumann);
    assert!(neumann.solve(coulomb(&grid, 1.0, 1).view(), &grid, 1, 4).is_ok());
}
