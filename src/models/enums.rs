//! Enums compartidos
//!
//! Cada enum mapea a un tipo ENUM de PostgreSQL del mismo nombre.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::Type;

/// Tipo de combustible - mapea al ENUM fuel_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "fuel_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Ai92,
    Ai95,
    Ai98,
    Diesel,
    Gas,
}

impl FuelType {
    /// Etiqueta tal y como aparece en el surtidor
    pub fn label(&self) -> &'static str {
        match self {
            FuelType::Ai92 => "АИ-92",
            FuelType::Ai95 => "АИ-95",
            FuelType::Ai98 => "АИ-98",
            FuelType::Diesel => "ДТ",
            FuelType::Gas => "ГАЗ",
        }
    }
}

/// Tipo de periodo de las estadísticas - mapea al ENUM period_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash, Default)]
#[sqlx(type_name = "period_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    #[default]
    Month,
    Quarter,
    Year,
}

impl PeriodType {
    /// Rango `[inicio, fin)` del periodo que contiene `date`
    pub fn bounds(&self, date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let year = date.year();
        let (start_month, months) = match self {
            PeriodType::Month => (date.month(), 1),
            PeriodType::Quarter => ((date.month() - 1) / 3 * 3 + 1, 3),
            PeriodType::Year => (1, 12),
        };

        let start = NaiveDate::from_ymd_opt(year, start_month, 1)?;
        let end_month = start_month + months;
        let end = if end_month > 12 {
            NaiveDate::from_ymd_opt(year + 1, end_month - 12, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, end_month, 1)?
        };

        Some((start, end))
    }
}

/// Banco con el que se paga un servicio - mapea al ENUM bank
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "bank", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    Mk1,
    Mk2,
    M3,
    Other,
}

impl Bank {
    pub fn label(&self) -> &'static str {
        match self {
            Bank::Mk1 => "Сбербанк (MK1)",
            Bank::Mk2 => "Тинькофф (MK2)",
            Bank::M3 => "ВТБ (M3)",
            Bank::Other => "Другой",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        let (start, end) = PeriodType::Month.bounds(date(2024, 2, 17)).unwrap();
        assert_eq!(start, date(2024, 2, 1));
        assert_eq!(end, date(2024, 3, 1));

        let (start, end) = PeriodType::Month.bounds(date(2024, 12, 31)).unwrap();
        assert_eq!(start, date(2024, 12, 1));
        assert_eq!(end, date(2025, 1, 1));
    }

    #[test]
    fn test_quarter_bounds() {
        let (start, end) = PeriodType::Quarter.bounds(date(2024, 5, 17)).unwrap();
        assert_eq!(start, date(2024, 4, 1));
        assert_eq!(end, date(2024, 7, 1));

        let (start, end) = PeriodType::Quarter.bounds(date(2024, 11, 2)).unwrap();
        assert_eq!(start, date(2024, 10, 1));
        assert_eq!(end, date(2025, 1, 1));
    }

    #[test]
    fn test_year_bounds() {
        let (start, end) = PeriodType::Year.bounds(date(2023, 7, 4)).unwrap();
        assert_eq!(start, date(2023, 1, 1));
        assert_eq!(end, date(2024, 1, 1));
    }

    #[test]
    fn test_fuel_type_serde() {
        let json = serde_json::to_string(&FuelType::Ai95).unwrap();
        assert_eq!(json, "\"ai95\"");
        let parsed: FuelType = serde_json::from_str("\"diesel\"").unwrap();
        assert_eq!(parsed, FuelType::Diesel);
        assert_eq!(FuelType::Diesel.label(), "ДТ");
    }
}
