//! Column standardization (zero mean, unit population variance)

use ndarray::{Array2, Axis};
use statrs::statistics::Statistics;

use crate::error::{EngineError, EngineResult};

/// Standardize every column; zero-variance columns are only centered.
pub fn standardize(x: &Array2<f64>) -> EngineResult<Array2<f64>> {
    if x.ncols() == 0 {
        return Err(EngineError::model_fit("feature matrix has no columns"));
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(EngineError::model_fit("feature matrix contains non-finite values"));
    }

    let mut scaled = x.to_owned();
    for mut column in scaled.axis_iter_mut(Axis(1)) {
        let mean = column.iter().mean();
        let std = column.iter().population_std_dev();
        let scale = if std > 0.0 && std.is_finite() { std } else { 1.0 };
        column.mapv_inplace(|v| (v - mean) / scale);
    }
    Ok(scaled)
}
