//! Нормализация диапазонов дохода

use crate::types::RawValue;

pub struct IncomeNormalizer;

impl IncomeNormalizer {
    /// Диапазон вида "$5,001 - $10,000" -> середина диапазона.
    /// Любая ошибка разбора дает None, а не панику.
    pub fn normalize(value: &RawValue) -> Option<f64> {
        match value {
            RawValue::Number(n) => n.is_finite().then_some(*n),
            RawValue::Text(text) => Self::normalize_str(text),
        }
    }

    pub fn normalize_str(text: &str) -> Option<f64> {
        let cleaned = text.replace(['$', ','], "");

        // Ведущий минус тоже считается разделителем: отрицательные значения не поддерживаются
        let numbers: Vec<f64> = cleaned
            .split('-')
            .map(str::trim)
            .filter(|part| Self::is_numeric(part))
            .map(|part| part.parse::<f64>().ok())
            .collect::<Option<Vec<f64>>>()?;

        match numbers.as_slice() {
            [low, high] => Some((low + high) / 2.0),
            [single] => Some(*single),
            _ => None,
        }
    }

    /// Цифры с не более чем одной десятичной точкой. Только ASCII: полноширинные
    /// и прочие юникодные цифры не принимаются, такие части отбрасываются.
    fn is_numeric(part: &str) -> bool {
        let digits = part.replacen('.', "", 1);
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
    }
}

/// Отсутствующее значение дает None
pub fn normalize_income(value: Option<&RawValue>) -> Option<f64> {
    value.and_then(IncomeNormalizer::normalize)
}
