/// Ошибки обучения и предсказания

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("insufficient data for regression: {0}")]
    InsufficientData(String),
    #[error("insufficient class diversity: {distinct} distinct employment type label(s)")]
    InsufficientClassDiversity { distinct: usize },
    #[error("model fit failed: {0}")]
    Fit(String),
}

impl PredictionError {
    /// Короткий код ошибки для API
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::InsufficientData(_) => "insufficient_data",
            PredictionError::InsufficientClassDiversity { .. } => "insufficient_class_diversity",
            PredictionError::Fit(_) => "fit_failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),
}
