//! Labor ML - Rust библиотека

pub mod api;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod models;
pub mod preprocessing;
pub mod types;

pub use types::*;
pub use models::{
    predict_employment_type, predict_income, EmploymentModel, IncomeModel, PredictionService,
    TrainingSet,
};
pub use preprocessing::{normalize_income, FeatureEngineer, FeatureSpec, IncomeNormalizer};

// Re-export для удобства
pub use dataset::Dataset;
pub use error::{DatasetError, PredictionError};
