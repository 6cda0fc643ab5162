/// Типы данных для ML модуля

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ячейка исходной таблицы: число или строка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Приведение к числу (аналог to_numeric с coerce)
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Произвольное JSON-значение из запроса. Булевы значения приводятся к 1/0,
    /// всё остальное, что не число и не строка, считается отсутствующим.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map(RawValue::Number),
            serde_json::Value::String(s) => Some(RawValue::Text(s.clone())),
            serde_json::Value::Bool(b) => Some(RawValue::Number(if *b { 1.0 } else { 0.0 })),
            _ => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// Одна строка набора данных по занятости
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(rename = "Año", alias = "year", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(rename = "Edad", alias = "age", skip_serializing_if = "Option::is_none")]
    pub age: Option<RawValue>,
    #[serde(rename = "Sexo", alias = "sex", skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(rename = "Nivel_Ingresos", alias = "income_range", skip_serializing_if = "Option::is_none")]
    pub income_range: Option<RawValue>,
    #[serde(rename = "Tipo_Empleo", alias = "employment_type", skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(rename = "Horas_Trabajadas", alias = "hours_worked", skip_serializing_if = "Option::is_none")]
    pub hours_worked: Option<RawValue>,
    #[serde(rename = "Posicion_Ocupacion", alias = "occupation_position", skip_serializing_if = "Option::is_none")]
    pub occupation_position: Option<String>,
    #[serde(rename = "Poblacion_Total", alias = "total_population", skip_serializing_if = "Option::is_none")]
    pub total_population: Option<RawValue>,
}

/// Закрытый набор категорий пола. Порядок объявления задает порядок one-hot колонок.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sex {
    Hombre,
    Mujer,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Hombre, Sex::Mujer];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "hombre" | "male" | "man" => Some(Sex::Hombre),
            "mujer" | "female" | "woman" => Some(Sex::Mujer),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Hombre => "Hombre",
            Sex::Mujer => "Mujer",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Запрос на предсказание: возраст и пол как их прислал клиент
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionQuery {
    pub age: f64,
    pub sex: String,
}

impl PredictionQuery {
    pub fn new(age: f64, sex: impl Into<String>) -> Self {
        Self {
            age,
            sex: sex.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionResult {
    Income(f64),
    EmploymentType(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeIncomeRequest {
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizeIncomeResponse {
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRequest {
    pub age: f64,
    pub sex: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub records: Option<Vec<Record>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub prediction: PredictionResult,
    pub training_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SexSummary {
    pub sex: Sex,
    pub count: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub sex: Sex,
    pub label: String,
    pub count: usize,
}
