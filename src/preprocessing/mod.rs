/// Модуль предобработки данных

pub mod feature_engineering;
pub mod income;

pub use feature_engineering::{FeatureEngineer, FeatureSpec};
pub use income::{normalize_income, IncomeNormalizer};
