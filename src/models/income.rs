//! Линейная регрессия дохода по возрасту и полу

use linfa::prelude::*;
use linfa_linear::{FittedLinearRegression, LinearRegression};
use ndarray::Axis;

use super::training::TrainingSet;
use super::encode_query;
use crate::error::PredictionError;
use crate::preprocessing::FeatureSpec;
use crate::types::{PredictionQuery, Record};

/// Обычный МНК со свободным членом
pub struct IncomeModel {
    spec: FeatureSpec,
    fitted: FittedLinearRegression<f64>,
}

impl IncomeModel {
    pub fn fit(training: &TrainingSet<f64>) -> Result<Self, PredictionError> {
        let dataset = Dataset::new(training.features.clone(), training.targets.clone());

        let fitted = LinearRegression::new()
            .fit(&dataset)
            .map_err(|e| PredictionError::Fit(e.to_string()))?;

        if !fitted.intercept().is_finite() || fitted.params().iter().any(|p| !p.is_finite()) {
            return Err(PredictionError::InsufficientData(
                "regression coefficients are not finite".to_string(),
            ));
        }

        tracing::debug!(
            "Income model fitted on {} rows: intercept {:.2}, params {:?}",
            training.len(),
            fitted.intercept(),
            fitted.params().to_vec()
        );

        Ok(Self {
            spec: training.spec.clone(),
            fitted,
        })
    }

    pub fn predict(&self, query: &PredictionQuery) -> f64 {
        let row = encode_query(&self.spec, query).insert_axis(Axis(0));
        self.fitted.predict(&row)[0]
    }

    pub fn intercept(&self) -> f64 {
        self.fitted.intercept()
    }

    pub fn coefficients(&self) -> Vec<f64> {
        self.fitted.params().to_vec()
    }
}

/// Новая модель на каждый вызов. Возвращает прогноз и число строк обучения.
pub fn fit_and_predict(
    records: &[Record],
    query: &PredictionQuery,
) -> Result<(f64, usize), PredictionError> {
    let training = TrainingSet::income(records)?;
    let model = IncomeModel::fit(&training)?;
    Ok((model.predict(query), training.len()))
}

pub fn predict_income(records: &[Record], age: f64, sex: &str) -> Result<f64, PredictionError> {
    fit_and_predict(records, &PredictionQuery::new(age, sex)).map(|(income, _)| income)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawValue;

    fn record(age: f64, sex: &str, income: &str) -> Record {
        Record {
            age: Some(RawValue::Number(age)),
            sex: Some(sex.to_string()),
            income_range: Some(RawValue::from(income)),
            ..Default::default()
        }
    }

    fn scenario() -> Vec<Record> {
        vec![
            record(25.0, "Hombre", "$5,000"),
            record(45.0, "Mujer", "$9,000"),
            record(30.0, "Hombre", "$6,000"),
            record(50.0, "Mujer", "$10,000"),
        ]
    }

    #[test]
    fn recovers_exact_linear_relation() {
        // income = 1000 + 100 * age + 500 * mujer
        let records = vec![
            record(20.0, "Hombre", "3000"),
            record(40.0, "Hombre", "5000"),
            record(30.0, "Mujer", "4500"),
            record(50.0, "Mujer", "6500"),
        ];
        let training = TrainingSet::income(&records).unwrap();
        let model = IncomeModel::fit(&training).unwrap();

        assert!((model.intercept() - 1000.0).abs() < 1e-6);
        let coefficients = model.coefficients();
        assert!((coefficients[0] - 100.0).abs() < 1e-6);
        assert!((coefficients[1] - 500.0).abs() < 1e-6);

        let predicted = model.predict(&PredictionQuery::new(35.0, "Mujer"));
        assert!((predicted - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn scenario_prediction_is_finite_and_reproducible() {
        let records = scenario();
        let first = predict_income(&records, 35.0, "Hombre").unwrap();
        let second = predict_income(&records, 35.0, "Hombre").unwrap();

        assert!(first.is_finite());
        assert!((first - second).abs() < 1e-9);
        // Выше дохода самого молодого мужчины: возраст растет, доход растет
        assert!(first > 5000.0);
    }

    #[test]
    fn unknown_sex_uses_baseline() {
        let records = scenario();
        let baseline = predict_income(&records, 35.0, "Hombre").unwrap();
        let unknown = predict_income(&records, 35.0, "Otro").unwrap();
        assert!((baseline - unknown).abs() < 1e-9);
    }

    #[test]
    fn pipeline_reports_training_rows() {
        let mut records = scenario();
        records.push(record(40.0, "Otro", "$8,000"));

        let (income, rows) = fit_and_predict(&records, &PredictionQuery::new(35.0, "Hombre")).unwrap();
        assert_eq!(rows, 4);
        assert_eq!(income, predict_income(&records, 35.0, "Hombre").unwrap());
    }

    #[test]
    fn single_row_is_insufficient() {
        let records = vec![record(25.0, "Hombre", "$5,000")];
        assert!(matches!(
            predict_income(&records, 30.0, "Hombre"),
            Err(PredictionError::InsufficientData(_))
        ));
    }
}
