/// ML модели

pub mod employment;
pub mod income;
pub mod training;

pub use employment::{predict_employment_type, EmploymentModel, DEFAULT_MAX_ITERATIONS};
pub use income::{predict_income, IncomeModel};
pub use training::TrainingSet;

use ndarray::Array1;

use crate::error::PredictionError;
use crate::preprocessing::{FeatureEngineer, FeatureSpec};
use crate::types::{PredictionQuery, PredictionResult, Record, Sex};

/// Признаки запроса. Пол, которого не было в обучении, кодируется как базовая категория.
pub(crate) fn encode_query(spec: &FeatureSpec, query: &PredictionQuery) -> Array1<f64> {
    let sex = Sex::parse(&query.sex);
    let seen = sex.map_or(false, |s| s == spec.baseline || spec.indicators.contains(&s));
    if !seen {
        // Скорее всего ошибка во входных данных, а не осознанный выбор
        tracing::warn!(
            "Sex '{}' was not observed in training, falling back to baseline '{}'",
            query.sex,
            spec.baseline
        );
    }
    FeatureEngineer::encode_row(spec, query.age, sex)
}

/// Сервис предсказаний: каждое обращение обучает модель заново
#[derive(Debug, Clone, Copy)]
pub struct PredictionService {
    max_iterations: u64,
}

impl PredictionService {
    pub fn new(max_iterations: u64) -> Self {
        Self { max_iterations }
    }

    pub fn predict_income(
        &self,
        records: &[Record],
        query: &PredictionQuery,
    ) -> Result<(PredictionResult, usize), PredictionError> {
        let (income, rows) = income::fit_and_predict(records, query)?;

        tracing::info!(
            "Income prediction for age {} / {}: {:.2} ({} rows)",
            query.age,
            query.sex,
            income,
            rows
        );
        Ok((PredictionResult::Income(income), rows))
    }

    pub fn predict_employment_type(
        &self,
        records: &[Record],
        query: &PredictionQuery,
    ) -> Result<(PredictionResult, usize), PredictionError> {
        let (label, rows) = employment::fit_and_predict(records, query, self.max_iterations)?;

        tracing::info!(
            "Employment type prediction for age {} / {}: {} ({} rows)",
            query.age,
            query.sex,
            label,
            rows
        );
        Ok((PredictionResult::EmploymentType(label), rows))
    }
}

impl Default for PredictionService {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS)
    }
}
