use polars::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FitError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Training failed: {0}")]
    Training(String),
}

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Model is not fitted")]
    NotFitted,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Row {row} could not be classified: {reason}")]
    Unclassified { row: usize, reason: String },
}

impl From<PolarsError> for FitError {
    fn from(err: PolarsError) -> Self {
        FitError::InvalidInput(err.to_string())
    }
}

impl From<PolarsError> for PredictError {
    fn from(err: PolarsError) -> Self {
        PredictError::InvalidInput(err.to_string())
    }
}

/// Supervised estimator over polars frames.
///
/// `x` holds the attributes, `y` the label column(s). Implementors override
/// the `_impl` hooks; the public entry points stay stable.
pub trait Estimator: Sized {
    fn fit(&mut self, x: &DataFrame, y: &DataFrame) -> Result<&mut Self, FitError> {
        self._fit_impl(x, y)?;
        Ok(self)
    }

    fn _fit_impl(&mut self, _x: &DataFrame, _y: &DataFrame) -> Result<(), FitError> {
        Err(FitError::InvalidInput(
            "Default fit implementation not provided".to_string(),
        ))
    }

    fn predict(&self, x: &DataFrame) -> Result<DataFrame, PredictError> {
        self._predict_impl(x)
    }

    fn _predict_impl(&self, _x: &DataFrame) -> Result<DataFrame, PredictError> {
        Err(PredictError::NotFitted)
    }

    fn is_fitted(&self) -> bool;
}
