//! Логистическая регрессия типа занятости (Formal / Informal / ...)

use linfa::prelude::*;
use linfa_logistic::{
    FittedLogisticRegression, LogisticRegression, MultiFittedLogisticRegression,
    MultiLogisticRegression,
};
use ndarray::{Array2, Axis};

use super::encode_query;
use super::training::TrainingSet;
use crate::error::PredictionError;
use crate::preprocessing::FeatureSpec;
use crate::types::{PredictionQuery, Record};

/// Лимит итераций с запасом, чтобы маленькие выборки успевали сойтись
pub const DEFAULT_MAX_ITERATIONS: u64 = 1000;

enum Classifier {
    Binary(FittedLogisticRegression<f64, String>),
    Multinomial(MultiFittedLogisticRegression<f64, String>),
}

pub struct EmploymentModel {
    spec: FeatureSpec,
    classifier: Classifier,
}

impl EmploymentModel {
    /// Бинарная модель для двух меток, мультиномиальная для большего числа
    pub fn fit(training: &TrainingSet<String>, max_iterations: u64) -> Result<Self, PredictionError> {
        let labels = training.labels();
        if labels.len() < 2 {
            return Err(PredictionError::InsufficientClassDiversity {
                distinct: labels.len(),
            });
        }

        let dataset = Dataset::new(training.features.clone(), training.targets.clone());

        let classifier = if labels.len() == 2 {
            let fitted = LogisticRegression::default()
                .max_iterations(max_iterations)
                .fit(&dataset)
                .map_err(|e| PredictionError::Fit(e.to_string()))?;
            Classifier::Binary(fitted)
        } else {
            let fitted = MultiLogisticRegression::default()
                .max_iterations(max_iterations)
                .fit(&dataset)
                .map_err(|e| PredictionError::Fit(e.to_string()))?;
            Classifier::Multinomial(fitted)
        };

        tracing::debug!(
            "Employment model fitted on {} rows, labels {:?}",
            training.len(),
            labels
        );

        Ok(Self {
            spec: training.spec.clone(),
            classifier,
        })
    }

    pub fn predict(&self, query: &PredictionQuery) -> Result<String, PredictionError> {
        let row: Array2<f64> = encode_query(&self.spec, query).insert_axis(Axis(0));
        let predicted = match &self.classifier {
            Classifier::Binary(model) => model.predict(&row),
            Classifier::Multinomial(model) => model.predict(&row),
        };

        predicted
            .into_iter()
            .next()
            .ok_or_else(|| PredictionError::Fit("classifier returned no label".to_string()))
    }
}

/// Выборка -> обучение -> предсказание. Возвращает метку и число строк обучения.
pub fn fit_and_predict(
    records: &[Record],
    query: &PredictionQuery,
    max_iterations: u64,
) -> Result<(String, usize), PredictionError> {
    let training = TrainingSet::employment(records)?;
    let model = EmploymentModel::fit(&training, max_iterations)?;
    Ok((model.predict(query)?, training.len()))
}

pub fn predict_employment_type(
    records: &[Record],
    age: f64,
    sex: &str,
) -> Result<String, PredictionError> {
    fit_and_predict(records, &PredictionQuery::new(age, sex), DEFAULT_MAX_ITERATIONS)
        .map(|(label, _)| label)
}
