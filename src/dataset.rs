//! Загрузка набора данных по занятости

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::DatasetError;
use crate::types::{RawValue, Record};

/// Таблица в памяти, загружается один раз и только читается
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        tracing::info!("Loaded {} records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Пустые ячейки становятся отсутствующими значениями
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<Record>() {
            records.push(row?);
        }

        Ok(Self { records })
    }

    /// Демонстрационная таблица 2020-2023
    pub fn sample() -> Self {
        let incomes = [5000.0, 7000.0, 6000.0, 8000.0, 6500.0, 8500.0, 7000.0, 9000.0];
        let records = incomes
            .iter()
            .enumerate()
            .map(|(i, &income)| Record {
                year: Some(2020 + (i / 2) as i32),
                sex: Some(if i % 2 == 0 { "Hombre" } else { "Mujer" }.to_string()),
                income_range: Some(RawValue::Number(income)),
                ..Default::default()
            })
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Отсортированные уникальные годы
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .filter_map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn for_year(&self, year: i32) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| r.year == Some(year))
            .cloned()
            .collect()
    }
}
