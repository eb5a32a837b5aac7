//! Logarithmic radial grid
//!
//! Points are uniformly spaced in x = ln(r), running from `x0` out to the
//! cavity radius. Radial integrals pick up the Jacobian dr = r dx.

use crate::error::{AvAtomError, Result};
use ndarray::{Array1, ArrayView1};

#[derive(Clone, Debug)]
pub struct LogGrid {
    xgrid: Array1<f64>,
    rgrid: Array1<f64>,
    dx: f64,
}

impl LogGrid {
    /// Build `ngrid` points from `x0` to `ln(radius)`.
    pub fn new(x0: f64, radius: f64, ngrid: usize) -> Result<Self> {
        if ngrid < 3 {
            return Err(AvAtomError::Configuration(format!(
                "grid needs at least 3 points, got {}",
                ngrid
            )));
        }
        if !(radius > 0.0) {
            return Err(AvAtomError::Configuration(format!(
                "cavity radius must be positive, got {}",
                radius
            )));
        }
        let x_max = radius.ln();
        if x0 >= x_max {
            return Err(AvAtomError::Configuration(format!(
                "inner grid coordinate x0={} must lie below ln(radius)={:.6}",
                x0, x_max
            )));
        }

        let xgrid = Array1::linspace(x0, x_max, ngrid);
        let rgrid = xgrid.mapv(f64::exp);
        let dx = (x_max - x0) / (ngrid - 1) as f64;

        Ok(Self { xgrid, rgrid, dx })
    }

    pub fn len(&self) -> usize {
        self.xgrid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xgrid.is_empty()
    }

    pub fn xgrid(&self) -> ArrayView1<'_, f64> {
        self.xgrid.view()
    }

    pub fn rgrid(&self) -> ArrayView1<'_, f64> {
        self.rgrid.view()
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Outer radius of the grid (the cavity wall).
    pub fn r_max(&self) -> f64 {
        self.rgrid[self.rgrid.len() - 1]
    }

    /// Trapezoid weights in x, without the dx factor.
    pub fn trapezoid_weight(&self, i: usize) -> f64 {
        if i == 0 || i + 1 == self.len() {
            0.5
        } else {
            1.0
        }
    }

    /// ∫ f(r) r² dr over the grid.
    pub fn integrate_radial(&self, f: ArrayView1<'_, f64>) -> f64 {
        let mut total = 0.0;
        for (i, (&fi, &x)) in f.iter().zip(self.xgrid.iter()).enumerate() {
            total += self.trapezoid_weight(i) * fi * (3.0 * x).exp();
        }
        total * self.dx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_endpoints() {
        let grid = LogGrid::new(-10.0, 5.0, 101).unwrap();
        assert_eq!(grid.len(), 101);
        assert!((grid.xgrid()[0] + 10.0).abs() < 1e-12);
        assert!((grid.r_max() - 5.0).abs() < 1e-10);
        assert!((grid.dx() - (5.0f64.ln() + 10.0) / 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_integrate_constant_gives_sphere_moment() {
        // ∫_0^R r² dr = R³/3 (the inner cut-off at e^-12 is negligible)
        let grid = LogGrid::new(-12.0, 2.0, 4001).unwrap();
        let ones = Array1::from_elem(grid.len(), 1.0);
        let value = grid.integrate_radial(ones.view());
        assert!((value - 8.0 / 3.0).abs() < 1e-4, "got {}", value);
    }

    #[test]
    fn test_rejects_bad_sizing() {
        assert!(matches!(
            LogGrid::new(-10.0, 5.0, 2),
            Err(AvAtomError::Configuration(_))
        ));
        assert!(matches!(
            LogGrid::new(-10.0, -1.0, 100),
            Err(AvAtomError::Configuration(_))
        ));
        assert!(matches!(
            LogGrid::new(3.0, 5.0, 100),
            Err(AvAtomError::Configuration(_))
        ));
    }
}
