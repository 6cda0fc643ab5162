//! Обучающая выборка: фильтрация строк и матрица признаков

use std::collections::BTreeSet;

use ndarray::{Array1, Array2};

use crate::error::PredictionError;
use crate::preprocessing::{normalize_income, FeatureEngineer, FeatureSpec};
use crate::types::{Record, Sex};

/// Отфильтрованные строки + описание признаков. Чистая функция от набора данных,
/// поэтому ее результат можно кешировать по версии данных.
#[derive(Debug, Clone)]
pub struct TrainingSet<T> {
    pub spec: FeatureSpec,
    pub features: Array2<f64>,
    pub targets: Array1<T>,
}

impl<T> TrainingSet<T> {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl TrainingSet<f64> {
    /// Edad + Sexo -> нормализованный Nivel_Ingresos
    pub fn income(records: &[Record]) -> Result<Self, PredictionError> {
        let rows = collect_rows(records, |r| normalize_income(r.income_range.as_ref()));

        if rows.len() < 2 {
            return Err(PredictionError::InsufficientData(format!(
                "{} valid row(s), need at least 2",
                rows.len()
            )));
        }

        let (spec, features, targets) = assemble(rows)?;

        if spec.indicators.is_empty() {
            return Err(PredictionError::InsufficientData(format!(
                "all rows share one sex ({})",
                spec.baseline
            )));
        }

        let rank = FeatureEngineer::centered_rank(&features);
        if rank < spec.n_features() {
            return Err(PredictionError::InsufficientData(format!(
                "rank-deficient features (rank {} of {})",
                rank,
                spec.n_features()
            )));
        }

        Ok(Self {
            spec,
            features,
            targets,
        })
    }
}

impl TrainingSet<String> {
    /// Edad + Sexo -> Tipo_Empleo
    pub fn employment(records: &[Record]) -> Result<Self, PredictionError> {
        let rows = collect_rows(records, |r| {
            r.employment_type
                .as_deref()
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
        });

        let distinct = rows
            .iter()
            .map(|(_, _, label)| label.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        if distinct < 2 {
            return Err(PredictionError::InsufficientClassDiversity { distinct });
        }

        let (spec, features, targets) = assemble(rows)?;
        Ok(Self {
            spec,
            features,
            targets,
        })
    }

    /// Уникальные метки в порядке сортировки
    pub fn labels(&self) -> Vec<String> {
        self.targets
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Строки, где есть возраст, пол и цель; все три должны успешно разобраться
fn collect_rows<T>(records: &[Record], target: impl Fn(&Record) -> Option<T>) -> Vec<(f64, Sex, T)> {
    records
        .iter()
        .filter_map(|record| {
            let age = record.age.as_ref()?.as_number()?;
            let sex = Sex::parse(record.sex.as_deref()?)?;
            let y = target(record)?;
            Some((age, sex, y))
        })
        .collect()
}

fn assemble<T>(rows: Vec<(f64, Sex, T)>) -> Result<(FeatureSpec, Array2<f64>, Array1<T>), PredictionError> {
    let observed: Vec<Sex> = rows.iter().map(|(_, sex, _)| *sex).collect();
    let spec = FeatureSpec::from_observed(&observed)
        .ok_or_else(|| PredictionError::InsufficientData("no valid rows".to_string()))?;

    let inputs: Vec<(f64, Sex)> = rows.iter().map(|(age, sex, _)| (*age, *sex)).collect();
    let features = FeatureEngineer::design_matrix(&spec, &inputs);
    let targets: Array1<T> = rows.into_iter().map(|(_, _, y)| y).collect();

    Ok((spec, features, targets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawValue;

    fn record(age: RawValue, sex: &str, income: &str, employment: &str) -> Record {
        Record {
            age: Some(age),
            sex: Some(sex.to_string()),
            income_range: Some(RawValue::from(income)),
            employment_type: Some(employment.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn income_set_drops_unparseable_rows() {
        let records = vec![
            record(25.0.into(), "Hombre", "$5,000", "Formal"),
            record("cuarenta".into(), "Mujer", "$9,000", "Formal"),
            record(45.0.into(), "Mujer", "abc", "Formal"),
            record(30.0.into(), "Hombre", "$6,000", "Informal"),
            record(50.0.into(), "Mujer", "$9,001 - $11,000", "Informal"),
            record(41.0.into(), "Otro", "$9,000", "Informal"),
            Record::default(),
        ];

        let set = TrainingSet::income(&records).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.targets.to_vec(), vec![5000.0, 6000.0, 10000.5]);
        assert_eq!(set.features.column(1).to_vec(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn income_set_requires_two_rows() {
        let records = vec![record(25.0.into(), "Hombre", "$5,000", "Formal")];
        assert!(matches!(
            TrainingSet::income(&records),
            Err(PredictionError::InsufficientData(_))
        ));
        assert!(matches!(
            TrainingSet::income(&[]),
            Err(PredictionError::InsufficientData(_))
        ));
    }

    #[test]
    fn income_set_requires_both_sexes() {
        let records = vec![
            record(25.0.into(), "Hombre", "$5,000", "Formal"),
            record(35.0.into(), "Hombre", "$7,000", "Formal"),
            record(45.0.into(), "Hombre", "$9,000", "Formal"),
        ];
        assert!(matches!(
            TrainingSet::income(&records),
            Err(PredictionError::InsufficientData(_))
        ));
    }

    #[test]
    fn income_set_rejects_collinear_features() {
        let records = vec![
            record(25.0.into(), "Hombre", "$5,000", "Formal"),
            record(45.0.into(), "Mujer", "$9,000", "Formal"),
        ];
        assert!(matches!(
            TrainingSet::income(&records),
            Err(PredictionError::InsufficientData(_))
        ));
    }

    #[test]
    fn employment_set_requires_two_labels() {
        let records = vec![
            record(25.0.into(), "Hombre", "$5,000", "Formal"),
            record(45.0.into(), "Mujer", "$9,000", " Formal "),
        ];
        assert_eq!(
            TrainingSet::employment(&records).unwrap_err(),
            PredictionError::InsufficientClassDiversity { distinct: 1 }
        );
    }

    #[test]
    fn employment_set_keeps_rows_without_income() {
        let mut no_income = record(33.0.into(), "Mujer", "", "Informal");
        no_income.income_range = None;
        let records = vec![record(25.0.into(), "Hombre", "$5,000", "Formal"), no_income];

        let set = TrainingSet::employment(&records).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.labels(), vec!["Formal".to_string(), "Informal".to_string()]);
    }
}
