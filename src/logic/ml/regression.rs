//! Degree-2 polynomial least squares
//!
//! `y = intercept + b1*x + b2*x^2`. The design is centered so the intercept
//! is fitted separately; the centered system is solved through SVD, giving
//! the minimum-norm solution when it is rank deficient (e.g. two points).

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::error::{EngineError, EngineResult};

/// Relative cutoff for singular values treated as zero
const RCOND: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolynomialFit {
    pub intercept: f64,
    /// [linear, quadratic]
    pub coefficients: [f64; 2],
    /// Population standard deviation of the in-sample residuals
    pub residual_std: f64,
    pub n_observations: usize,
}

impl PolynomialFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.coefficients[0] * x + self.coefficients[1] * x * x
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticRegression;

impl QuadraticRegression {
    pub fn fit(&self, x: &[f64], y: &[f64]) -> EngineResult<PolynomialFit> {
        if x.len() != y.len() {
            return Err(EngineError::model_fit(format!(
                "x has {} values, y has {}",
                x.len(),
                y.len()
            )));
        }
        if x.is_empty() {
            return Err(EngineError::model_fit("no observations to fit"));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(EngineError::model_fit("series contains non-finite values"));
        }

        let n = x.len();
        let squares: Vec<f64> = x.iter().map(|v| v * v).collect();
        let x_mean = x.iter().mean();
        let sq_mean = squares.iter().mean();
        let y_mean = y.iter().mean();

        let design = DMatrix::from_fn(n, 2, |r, c| match c {
            0 => x[r] - x_mean,
            _ => squares[r] - sq_mean,
        });
        let target = DVector::from_iterator(n, y.iter().map(|v| v - y_mean));

        let svd = design.svd(true, true);
        let eps = (svd.singular_values.max() * RCOND).max(0.0);
        let beta = svd
            .solve(&target, eps)
            .map_err(|e| EngineError::model_fit(format!("least squares failed: {}", e)))?;

        let coefficients = [beta[0], beta[1]];
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(EngineError::model_fit("least squares produced non-finite coefficients"));
        }
        let intercept = y_mean - coefficients[0] * x_mean - coefficients[1] * sq_mean;

        let mut fit = PolynomialFit {
            intercept,
            coefficients,
            residual_std: 0.0,
            n_observations: n,
        };
        let residuals: Vec<f64> = x.iter().zip(y).map(|(xi, yi)| yi - fit.predict(*xi)).collect();
        fit.residual_std = residuals.iter().population_std_dev();

        Ok(fit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_linear_series() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        let fit = QuadraticRegression.fit(&x, &y).unwrap();

        assert!((fit.coefficients[0] - 1.0).abs() < 1e-9);
        assert!(fit.coefficients[1].abs() < 1e-9);
        assert!((fit.intercept - 1.0).abs() < 1e-9);
        assert!(fit.residual_std < 1e-9);
        assert!((fit.predict(11.0) - 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_recovers_quadratic() {
        let x: Vec<f64> = (0..8).map(|d| d as f64 * 7.0).collect();
        let y: Vec<f64> = x.iter().map(|d| 3.0 - 0.5 * d + 0.02 * d * d).collect();
        let fit = QuadraticRegression.fit(&x, &y).unwrap();

        assert!((fit.coefficients[1] - 0.02).abs() < 1e-9);
        assert!((fit.predict(70.0) - (3.0 - 35.0 + 98.0)).abs() < 1e-6);
    }

    #[test]
    fn test_two_points_fit_exactly() {
        let fit = QuadraticRegression.fit(&[0.0, 7.0], &[2.0, 6.0]).unwrap();
        assert!((fit.predict(0.0) - 2.0).abs() < 1e-9);
        assert!((fit.predict(7.0) - 6.0).abs() < 1e-9);
        assert!(fit.residual_std < 1e-9);
    }

    #[test]
    fn test_single_x_value_is_flat() {
        // Every column is zero after centering; minimum-norm gives b = 0
        let fit = QuadraticRegression.fit(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(fit.coefficients, [0.0, 0.0]);
        assert!((fit.intercept - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_mismatch_and_nan() {
        assert!(QuadraticRegression.fit(&[1.0], &[1.0, 2.0]).is_err());
        assert!(QuadraticRegression.fit(&[], &[]).is_err());
        assert!(QuadraticRegression.fit(&[1.0, f64::NAN], &[1.0, 2.0]).is_err());
    }
}
