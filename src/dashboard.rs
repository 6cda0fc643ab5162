//! Страницы дашборда и сводки по полу

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::preprocessing::normalize_income;
use crate::types::{LabelCount, RawValue, Record, Sex, SexSummary};

/// Страница дашборда. Любое значение параметра `page` отображается на страницу.
/// Своя сводка есть у `Hours` и `EmploymentType`, остальные показывают доход по полу.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Overview,
    Sex,
    Income,
    Hours,
    EmploymentType,
    Predictions,
}

impl View {
    pub fn from_param(page: Option<&str>) -> Self {
        let Some(page) = page else {
            return View::Overview;
        };

        match page.trim().to_lowercase().as_str() {
            "sexo" | "sex" => View::Sex,
            "ingresos" | "income" => View::Income,
            "horas" | "hours" => View::Hours,
            "tipo-empleo" | "tipo_empleo" | "employment-type" => View::EmploymentType,
            "predicciones" | "predictions" => View::Predictions,
            _ => View::Overview,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Overview => "Empleo y Desempleo",
            View::Sex => "Distribución por Sexo",
            View::Income => "Ingreso Promedio por Sexo",
            View::Hours => "Horas Trabajadas",
            View::EmploymentType => "Tipo de Empleo",
            View::Predictions => "Predicciones",
        }
    }
}

/// Сводка, которую показывает страница: у каждой страницы своя метрика
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "metric", rename_all = "snake_case")]
pub enum PageSummary {
    Income { by_sex: Vec<SexSummary> },
    Hours { by_sex: Vec<SexSummary> },
    EmploymentType { counts: Vec<LabelCount> },
}

impl PageSummary {
    pub fn for_view(view: View, records: &[Record]) -> Self {
        match view {
            View::Hours => PageSummary::Hours {
                by_sex: summarize_hours_by_sex(records),
            },
            View::EmploymentType => PageSummary::EmploymentType {
                counts: count_employment_types(records),
            },
            View::Overview | View::Sex | View::Income | View::Predictions => PageSummary::Income {
                by_sex: summarize_by_sex(records),
            },
        }
    }
}

/// Количество строк и статистика нормализованного дохода по каждому полу
pub fn summarize_by_sex(records: &[Record]) -> Vec<SexSummary> {
    summarize_metric(records, |r| normalize_income(r.income_range.as_ref()))
}

/// То же для Horas_Trabajadas
pub fn summarize_hours_by_sex(records: &[Record]) -> Vec<SexSummary> {
    summarize_metric(records, |r| r.hours_worked.as_ref().and_then(RawValue::as_number))
}

/// Число строк по (пол, тип занятости), отсортировано по полу и метке
pub fn count_employment_types(records: &[Record]) -> Vec<LabelCount> {
    let mut counts: BTreeMap<(Sex, String), usize> = BTreeMap::new();
    for record in records {
        let Some(sex) = record.sex.as_deref().and_then(Sex::parse) else {
            continue;
        };
        let Some(label) = record
            .employment_type
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
        else {
            continue;
        };
        *counts.entry((sex, label.to_string())).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((sex, label), count)| LabelCount { sex, label, count })
        .collect()
}

fn summarize_metric(records: &[Record], metric: impl Fn(&Record) -> Option<f64>) -> Vec<SexSummary> {
    Sex::ALL
        .iter()
        .filter_map(|&sex| {
            let rows: Vec<&Record> = records
                .iter()
                .filter(|r| r.sex.as_deref().and_then(Sex::parse) == Some(sex))
                .collect();
            if rows.is_empty() {
                return None;
            }

            let values: Vec<f64> = rows.iter().filter_map(|&r| metric(r)).collect();

            let (mean, min, max) = if values.is_empty() {
                (None, None, None)
            } else {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (Some(mean), Some(min), Some(max))
            };

            Some(SexSummary {
                sex,
                count: rows.len(),
                mean,
                min,
                max,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn every_page_value_maps_to_a_view() {
        assert_eq!(View::from_param(None), View::Overview);
        assert_eq!(View::from_param(Some("ingresos")), View::Income);
        assert_eq!(View::from_param(Some("Tipo-Empleo")), View::EmploymentType);
        assert_eq!(View::from_param(Some("predictions")), View::Predictions);
        assert_eq!(View::from_param(Some("desconocida")), View::Overview);
        assert_eq!(View::from_param(Some("")), View::Overview);
    }

    #[test]
    fn summary_for_sample_year() {
        let sample = Dataset::sample();
        let summary = summarize_by_sex(&sample.for_year(2023));

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].sex, Sex::Hombre);
        assert_eq!(summary[0].count, 1);
        assert_eq!(summary[0].mean, Some(7000.0));
        assert_eq!(summary[1].max, Some(9000.0));
    }

    #[test]
    fn summary_skips_absent_sexes_and_bad_incomes() {
        let records = vec![
            Record {
                sex: Some("Mujer".into()),
                income_range: Some("$1,000 - $3,000".into()),
                ..Default::default()
            },
            Record {
                sex: Some("Mujer".into()),
                income_range: Some("n/d".into()),
                ..Default::default()
            },
        ];

        let summary = summarize_by_sex(&records);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[0].mean, Some(2000.0));
    }

    #[test]
    fn hours_page_summarizes_hours_worked() {
        let records = vec![
            Record {
                sex: Some("Hombre".into()),
                hours_worked: Some(40.0.into()),
                income_range: Some("$9,000".into()),
                ..Default::default()
            },
            Record {
                sex: Some("Hombre".into()),
                hours_worked: Some("48".into()),
                ..Default::default()
            },
        ];

        let PageSummary::Hours { by_sex } = PageSummary::for_view(View::Hours, &records) else {
            panic!("hours page must summarize hours");
        };
        assert_eq!(by_sex.len(), 1);
        assert_eq!(by_sex[0].mean, Some(44.0));
        assert_eq!(by_sex[0].max, Some(48.0));
    }

    #[test]
    fn employment_page_counts_labels_per_sex() {
        let record = |sex: &str, label: &str| Record {
            sex: Some(sex.into()),
            employment_type: Some(label.into()),
            ..Default::default()
        };
        let records = vec![
            record("Mujer", "Formal"),
            record("Hombre", "Informal"),
            record("Mujer", " Formal "),
            record("Mujer", "Informal"),
            record("Otro", "Formal"),
            record("Hombre", ""),
        ];

        let PageSummary::EmploymentType { counts } =
            PageSummary::for_view(View::EmploymentType, &records)
        else {
            panic!("employment page must count labels");
        };
        assert_eq!(
            counts,
            vec![
                LabelCount { sex: Sex::Hombre, label: "Informal".into(), count: 1 },
                LabelCount { sex: Sex::Mujer, label: "Formal".into(), count: 2 },
                LabelCount { sex: Sex::Mujer, label: "Informal".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn income_pages_share_income_summary() {
        let sample = Dataset::sample();
        for view in [View::Overview, View::Sex, View::Income, View::Predictions] {
            assert!(matches!(
                PageSummary::for_view(view, sample.records()),
                PageSummary::Income { .. }
            ));
        }
    }
}
