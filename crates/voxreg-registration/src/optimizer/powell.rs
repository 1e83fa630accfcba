//! Powell's direction-set minimization.

use tracing::debug;

use super::brent::{bracket, brent};
use crate::error::Result;

const BRENT_MAX_ITER: usize = 100;

/// Derivative-free multivariate minimizer (Powell's method).
///
/// Maintains a set of search directions, initially the coordinate axes,
/// and performs successive 1-D line minimizations (bracketing + Brent)
/// along each. After every sweep the direction of largest decrease may be
/// replaced by the overall displacement of the sweep, building up
/// conjugate directions without any gradient information.
///
/// Cost evaluations are strictly sequential; given a deterministic cost
/// function, the trajectory (including tie-breaking on plateaus) is fully
/// reproducible. The search may terminate on a local minimum; that is a
/// property of the method, not something the optimizer masks.
#[derive(Debug, Clone)]
pub struct Powell {
    max_iter: usize,
    ftol: f64,
    xtol: f64,
}

/// Outcome of a Powell search.
#[derive(Debug, Clone)]
pub struct PowellResult {
    /// Best parameter vector found.
    pub x: Vec<f64>,
    /// Cost at `x`.
    pub fval: f64,
    /// Outer iterations performed.
    pub iterations: usize,
    /// Whether the relative-decrease test was met before `max_iter`.
    ///
    /// When false the search ran out of iterations; `x` is still the best
    /// point seen and is returned rather than discarded.
    pub converged: bool,
}

impl Powell {
    /// Create a minimizer bounded by `max_iter` outer iterations.
    pub fn new(max_iter: usize) -> Self {
        assert!(max_iter > 0, "optimizer needs at least one iteration");
        Self {
            max_iter,
            ftol: 1e-4,
            xtol: 1e-4,
        }
    }

    /// Override the convergence tolerances.
    ///
    /// `ftol` bounds the relative function decrease per iteration; `xtol`
    /// scales the line-search abscissa tolerance.
    pub fn with_tolerances(mut self, ftol: f64, xtol: f64) -> Self {
        self.ftol = ftol;
        self.xtol = xtol;
        self
    }

    /// Minimize `f` starting from `x0`, without derivatives.
    ///
    /// Any error returned by the cost function aborts the search
    /// immediately and propagates; the search is not retried.
    pub fn minimize<F>(&self, f: &mut F, x0: &[f64]) -> Result<PowellResult>
    where
        F: FnMut(&[f64]) -> Result<f64>,
    {
        let n = x0.len();
        let mut direc: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();

        let mut x = x0.to_vec();
        let mut fval = f(&x)?;
        let mut x_prev = x.clone();
        let mut iterations = 0;
        let mut converged = false;

        loop {
            let fx = fval;
            let mut bigind = 0;
            let mut delta = 0.0;

            // One line minimization along each direction in the set.
            for (i, dir) in direc.iter().enumerate() {
                let f_before = fval;
                let (x_new, f_new, _) = self.line_minimize(f, &x, dir)?;
                x = x_new;
                fval = f_new;
                if f_before - fval > delta {
                    delta = f_before - fval;
                    bigind = i;
                }
            }
            iterations += 1;
            debug!("iteration {}: cost {:.6}", iterations, fval);

            if 2.0 * (fx - fval) <= self.ftol * (fx.abs() + fval.abs()) + 1e-20 {
                converged = true;
                break;
            }
            if iterations >= self.max_iter {
                break;
            }

            // Extrapolate along the overall displacement of this sweep.
            let direc1: Vec<f64> = x.iter().zip(&x_prev).map(|(a, b)| a - b).collect();
            let x2: Vec<f64> = x.iter().zip(&x_prev).map(|(a, b)| 2.0 * a - b).collect();
            x_prev = x.clone();
            let fx2 = f(&x2)?;

            if fx2 < fx {
                // Powell's criterion for replacing the direction of
                // largest decrease with the sweep displacement.
                let mut t = 2.0 * (fx + fx2 - 2.0 * fval);
                let mut temp = fx - fval - delta;
                t *= temp * temp;
                temp = fx - fx2;
                t -= delta * temp * temp;

                if t < 0.0 {
                    let (x_new, f_new, step) = self.line_minimize(f, &x, &direc1)?;
                    x = x_new;
                    fval = f_new;
                    if step.iter().any(|&s| s != 0.0) {
                        direc[bigind] = direc[n - 1].clone();
                        direc[n - 1] = step;
                    }
                }
            }
        }

        Ok(PowellResult {
            x,
            fval,
            iterations,
            converged,
        })
    }

    /// Minimize along `x + alpha * dir`; returns the new point, its cost,
    /// and the scaled step actually taken.
    fn line_minimize<F>(
        &self,
        f: &mut F,
        x: &[f64],
        dir: &[f64],
    ) -> Result<(Vec<f64>, f64, Vec<f64>)>
    where
        F: FnMut(&[f64]) -> Result<f64>,
    {
        let mut g = |alpha: f64| -> Result<f64> {
            let trial: Vec<f64> = x
                .iter()
                .zip(dir)
                .map(|(xi, di)| xi + alpha * di)
                .collect();
            f(&trial)
        };

        let br = bracket(&mut g, 0.0, 1.0)?;
        let (alpha, fmin) = brent(&mut g, br, self.xtol * 100.0, BRENT_MAX_ITER)?;

        let step: Vec<f64> = dir.iter().map(|d| alpha * d).collect();
        let x_new: Vec<f64> = x.iter().zip(&step).map(|(xi, si)| xi + si).collect();
        Ok((x_new, fmin, step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separable_quadratic() {
        let mut f = |p: &[f64]| {
            Ok((p[0] - 1.0).powi(2) + (p[1] + 2.0).powi(2) + p[2].powi(2))
        };
        let result = Powell::new(100).minimize(&mut f, &[0.0, 0.0, 0.0]).unwrap();
        assert!(result.converged);
        assert!((result.x[0] - 1.0).abs() < 1e-3);
        assert!((result.x[1] + 2.0).abs() < 1e-3);
        assert!(result.x[2].abs() < 1e-3);
        assert!(result.fval < 1e-5);
    }

    #[test]
    fn test_coupled_quadratic_needs_conjugate_directions() {
        // Strongly coupled bowl: axis-only sweeps converge slowly, the
        // direction replacement makes it tractable.
        let mut f = |p: &[f64]| {
            let (x, y) = (p[0], p[1]);
            Ok(10.0 * (x + y - 2.0).powi(2) + (x - y).powi(2))
        };
        let result = Powell::new(100).minimize(&mut f, &[5.0, -3.0]).unwrap();
        assert!(result.converged);
        assert!((result.x[0] - 1.0).abs() < 1e-2);
        assert!((result.x[1] - 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_rosenbrock() {
        let mut f = |p: &[f64]| {
            let (x, y) = (p[0], p[1]);
            Ok(100.0 * (y - x * x).powi(2) + (1.0 - x).powi(2))
        };
        let result = Powell::new(200)
            .minimize(&mut f, &[-1.0, 1.0])
            .unwrap();
        assert!((result.x[0] - 1.0).abs() < 1e-2);
        assert!((result.x[1] - 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_max_iter_returns_best_so_far() {
        let mut f = |p: &[f64]| {
            let (x, y) = (p[0], p[1]);
            Ok(100.0 * (y - x * x).powi(2) + (1.0 - x).powi(2))
        };
        let start = [-1.0, 1.0];
        let f_start = f(&start).unwrap();
        let result = Powell::new(1).minimize(&mut f, &start).unwrap();
        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        // Best point found so far, not the starting point.
        assert!(result.fval < f_start);
    }

    #[test]
    fn test_cost_error_propagates() {
        let mut f = |_: &[f64]| -> Result<f64> {
            Err(crate::error::RegistrationError::DegenerateHistogram)
        };
        assert!(Powell::new(10).minimize(&mut f, &[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_already_at_minimum_converges_immediately() {
        let mut f = |p: &[f64]| Ok(p[0] * p[0] + p[1] * p[1]);
        let result = Powell::new(10).minimize(&mut f, &[0.0, 0.0]).unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations, 1);
        assert!(result.x[0].abs() < 1e-6 && result.x[1].abs() < 1e-6);
    }
}
