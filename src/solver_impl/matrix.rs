//! Finite-difference matrix eigensolver on the logarithmic grid
//!
//! With r = e^x and R(r) = e^{-x/2} P(x) the radial Schrödinger equation becomes
//!
//! -½ P'' + [e^{2x} V(x) + ½ (l + ½)²] P = ε e^{2x} P
//!
//! which is discretised with the three-point Laplacian into a generalised
//! symmetric problem K P = ε S P, S = diag(e^{2x}). Scaling by S^{-1/2} gives an
//! ordinary symmetric matrix that nalgebra diagonalises directly.

extern crate nalgebra as na;

use super::{Eigensolver, Eigenstates};
use crate::error::{AvAtomError, Result};
use crate::grid::LogGrid;
use crate::session::BoundaryCondition;
use na::{DMatrix, DVector};
use ndarray::{Array3, Array4, ArrayView1, ArrayView2};
use std::cmp::Ordering;
use tracing::debug;

#[derive(Clone, Copy, Debug)]
pub struct MatrixSolver {
    pub bc: BoundaryCondition,
}

impl MatrixSolver {
    pub fn new(bc: BoundaryCondition) -> Self {
        MatrixSolver { bc }
    }

    /// Number of free grid values for the chosen wall condition.
    pub fn unknowns(&self, ngrid: usize) -> usize {
        match self.bc {
            // the value at the wall is pinned to zero
            BoundaryCondition::Dirichlet => ngrid - 1,
            BoundaryCondition::Neumann => ngrid,
        }
    }

    /// Diagonal of S, including the half weight of the Neumann wall row.
    fn metric(&self, xgrid: ArrayView1<'_, f64>, m: usize) -> DVector<f64> {
        DVector::from_fn(m, |i, _| {
            let weight = if self.wall_row(i, m) { 0.5 } else { 1.0 };
            weight * (2.0 * xgrid[i]).exp()
        })
    }

    fn wall_row(&self, i: usize, m: usize) -> bool {
        self.bc == BoundaryCondition::Neumann && i + 1 == m
    }

    /// Symmetric matrix K for one angular momentum channel.
    fn hamiltonian(
        &self,
        v: ArrayView1<'_, f64>,
        xgrid: ArrayView1<'_, f64>,
        dx: f64,
        l: usize,
        m: usize,
    ) -> DMatrix<f64> {
        let centrifugal = 0.5 * (l as f64 + 0.5).powi(2);
        let off_diag = -0.5 / (dx * dx);

        let mut k = DMatrix::<f64>::zeros(m, m);
        for i in 0..m {
            let w = (2.0 * xgrid[i]).exp() * v[i] + centrifugal;
            if self.wall_row(i, m) {
                // ghost point P_N = P_{N-2} + dx P_{N-1} from P' = P/2, row halved
                k[(i, i)] = (2.0 - dx) / (4.0 * dx * dx) + 0.5 * w;
            } else {
                k[(i, i)] = 1.0 / (dx * dx) + w;
            }
            if i + 1 < m {
                k[(i, i + 1)] = off_diag;
                k[(i + 1, i)] = off_diag;
            }
        }
        k
    }

    fn solve_channel(
        &self,
        v: ArrayView1<'_, f64>,
        grid: &LogGrid,
        l: usize,
        nmax: usize,
    ) -> (Vec<f64>, Vec<Vec<f64>>) {
        let xgrid = grid.xgrid();
        let dx = grid.dx();
        let m = self.unknowns(grid.len());

        let s = self.metric(xgrid, m);
        let s_inv_sqrt = s.map(|x| 1.0 / x.sqrt());
        let k = self.hamiltonian(v, xgrid, dx, l, m);

        let mut h = k;
        for i in 0..m {
            for j in 0..m {
                h[(i, j)] *= s_inv_sqrt[i] * s_inv_sqrt[j];
            }
        }

        let eig = h.symmetric_eigen();
        let mut order: Vec<usize> = (0..m).collect();
        order.sort_by(|&a, &b| {
            eig.eigenvalues[a]
                .partial_cmp(&eig.eigenvalues[b])
                .unwrap_or(Ordering::Equal)
        });

        let norm = 1.0 / dx.sqrt();
        let mut values = Vec::with_capacity(nmax);
        let mut functions = Vec::with_capacity(nmax);
        for &col in order.iter().take(nmax) {
            let q = eig.eigenvectors.column(col);
            let sign = dominant_sign(q.iter());
            let mut p = vec![0.0; grid.len()];
            for i in 0..m {
                p[i] = sign * norm * q[i] * s_inv_sqrt[i];
            }
            values.push(eig.eigenvalues[col]);
            functions.push(p);
        }
        (values, functions)
    }
}

/// +1 if the entry of largest magnitude is positive, -1 otherwise.
fn dominant_sign<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    let max_val = values
        .max_by(|a, b| a.abs().partial_cmp(&b.abs()).unwrap_or(Ordering::Less))
        .copied()
        .unwrap_or(0.0);
    if max_val < 0.0 {
        -1.0
    } else {
        1.0
    }
}

impl Eigensolver for MatrixSolver {
    fn solve(
        &self,
        potential: ArrayView2<'_, f64>,
        grid: &LogGrid,
        lmax: usize,
        nmax: usize,
    ) -> Result<Eigenstates> {
        let (spindims, ngrid) = potential.dim();
        if ngrid != grid.len() {
            return Err(AvAtomError::Configuration(format!(
                "potential has {} grid points but the grid has {}",
                ngrid,
                grid.len()
            )));
        }
        let m = self.unknowns(ngrid);
        if nmax > m {
            return Err(AvAtomError::Configuration(format!(
                "nmax={} exceeds the {} states representable on a {}-point grid",
                nmax, m, ngrid
            )));
        }

        let mut eigfuncs = Array4::<f64>::zeros((spindims, lmax, nmax, ngrid));
        let mut eigvals = Array3::<f64>::zeros((spindims, lmax, nmax));

        for s in 0..spindims {
            let v = potential.row(s);
            for l in 0..lmax {
                let (values, functions) = self.solve_channel(v, grid, l, nmax);
                debug!(
                    "spin {} l={}: lowest eigenvalue {:.8} Ha",
                    s, l, values[0]
                );
                for (n, (value, function)) in values.into_iter().zip(functions).enumerate() {
                    eigvals[[s, l, n]] = value;
                    for (i, p) in function.into_iter().enumerate() {
                        eigfuncs[[s, l, n, i]] = p;
                    }
                }
            }
        }

        Ok(Eigenstates { eigfuncs, eigvals })
    }
}
