//! Feature engineering для ML моделей

#![allow(non_snake_case)]

use ndarray::{Array1, Array2};

use crate::types::Sex;

/// Набор колонок матрицы признаков: возраст + индикаторы пола без базовой категории
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSpec {
    pub baseline: Sex,
    pub indicators: Vec<Sex>,
}

impl FeatureSpec {
    /// Базовая категория - первая из присутствующих в порядке объявления (drop_first)
    pub fn from_observed(observed: &[Sex]) -> Option<Self> {
        let mut present: Vec<Sex> = Sex::ALL
            .iter()
            .copied()
            .filter(|sex| observed.contains(sex))
            .collect();

        if present.is_empty() {
            return None;
        }

        let baseline = present.remove(0);
        Some(Self {
            baseline,
            indicators: present,
        })
    }

    pub fn n_features(&self) -> usize {
        1 + self.indicators.len()
    }

    pub fn column_names(&self) -> Vec<String> {
        std::iter::once("Edad".to_string())
            .chain(self.indicators.iter().map(|sex| format!("Sexo_{}", sex)))
            .collect()
    }
}

pub struct FeatureEngineer;

impl FeatureEngineer {
    /// Одна строка признаков. Неизвестный пол (None) кодируется нулями,
    /// то есть как базовая категория.
    pub fn encode_row(spec: &FeatureSpec, age: f64, sex: Option<Sex>) -> Array1<f64> {
        let mut row = Array1::zeros(spec.n_features());
        row[0] = age;
        for (i, indicator) in spec.indicators.iter().enumerate() {
            if sex == Some(*indicator) {
                row[i + 1] = 1.0;
            }
        }
        row
    }

    pub fn design_matrix(spec: &FeatureSpec, rows: &[(f64, Sex)]) -> Array2<f64> {
        let mut features = Array2::zeros((rows.len(), spec.n_features()));
        for (i, &(age, sex)) in rows.iter().enumerate() {
            features
                .row_mut(i)
                .assign(&Self::encode_row(spec, age, Some(sex)));
        }
        features
    }

    /// Ранг центрированной матрицы признаков (метод Гаусса с выбором главного элемента).
    /// Центрирование учитывает свободный член регрессии.
    pub fn centered_rank(X: &Array2<f64>) -> usize {
        let n = X.nrows();
        let m = X.ncols();
        if n == 0 {
            return 0;
        }

        let mut a = X.clone();
        for j in 0..m {
            let mean = a.column(j).sum() / n as f64;
            a.column_mut(j).mapv_inplace(|v| v - mean);
        }

        let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if scale == 0.0 {
            return 0;
        }
        let tol = scale * 1e-9;

        let mut rank = 0;
        for col in 0..m {
            if rank == n {
                break;
            }

            // Поиск максимального элемента в столбце
            let mut max_row = rank;
            let mut max_val = a[[rank, col]].abs();
            for k in (rank + 1)..n {
                if a[[k, col]].abs() > max_val {
                    max_val = a[[k, col]].abs();
                    max_row = k;
                }
            }
            if max_val < tol {
                continue;
            }

            if max_row != rank {
                for j in 0..m {
                    a.swap([rank, j], [max_row, j]);
                }
            }

            let pivot = a[[rank, col]];
            for k in (rank + 1)..n {
                let factor = a[[k, col]] / pivot;
                for j in col..m {
                    a[[k, j]] -= factor * a[[rank, j]];
                }
            }
            rank += 1;
        }

        rank
    }
}
