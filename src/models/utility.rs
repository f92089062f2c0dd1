//! Modelos de pagos de servicios (luz, agua, gas, alquiler...)

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::enums::{Bank, PeriodType};

/// Compañía a la que se paga un servicio
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UtilityCompany {
    pub id: Uuid,
    pub name: String,
    pub category_name: Option<String>,
    pub account_number: Option<String>,
}

impl UtilityCompany {
    pub fn display_name(&self) -> &str {
        self.category_name
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.name)
    }
}

/// Pago de un servicio - mapea a la tabla utility_payments
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UtilityPayment {
    pub id: Uuid,
    pub date: NaiveDate,
    pub month: i32,
    pub quarter: i32,
    pub company_id: Option<Uuid>,
    pub company_name: String,
    pub description: String,
    pub price: Decimal,
    pub is_paid: bool,
    pub billing_statement: String,
    pub bank: Option<Bank>,
    pub needs_payment: bool,
    pub is_reported: bool,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Estado de un pago
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    NeedsPayment,
    Pending,
}

impl UtilityPayment {
    pub fn status(&self) -> PaymentStatus {
        if self.is_paid {
            PaymentStatus::Paid
        } else if self.needs_payment {
            PaymentStatus::NeedsPayment
        } else {
            PaymentStatus::Pending
        }
    }

    pub fn category(&self) -> PaymentCategory {
        PaymentCategory::classify(&self.company_name, &self.description)
    }
}

/// Categoría de un pago para el resumen mensual
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCategory {
    Electricity,
    Gas,
    Water,
    Rent,
    Maintenance,
    Trash,
    Internet,
    Other,
}

// Se prueba en este orden: la primera categoría con coincidencia gana
const CATEGORY_KEYWORDS: &[(PaymentCategory, &[&str])] = &[
    (PaymentCategory::Trash, &["отход", "мусор", "trash", "waste"]),
    (PaymentCategory::Internet, &["интернет", "internet", "провайдер"]),
    (PaymentCategory::Rent, &["аренд", "наем", "наём", "найм", "rent"]),
    (PaymentCategory::Maintenance, &["содержан", "ремонт", "обслуживан", "maintenance"]),
    (PaymentCategory::Water, &["вод", "хвс", "гвс", "water"]),
    (PaymentCategory::Electricity, &["электр", "энерг", "свет", "electric"]),
    (PaymentCategory::Gas, &["газ", "gas"]),
];

impl PaymentCategory {
    /// Clasifica por nombre de compañía y descripción
    pub fn classify(company_name: &str, description: &str) -> Self {
        let text = format!("{} {}", company_name, description).to_lowercase();

        CATEGORY_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
            .map(|(category, _)| *category)
            .unwrap_or(PaymentCategory::Other)
    }
}

/// Resumen mensual de pagos, calculado al vuelo
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: i32,
    pub total_payments: Decimal,
    pub paid_amount: Decimal,
    pub pending_amount: Decimal,
    pub payment_count: i64,
    pub paid_count: i64,
    pub pending_count: i64,
    pub completion_rate: Decimal,
    pub electricity_total: Decimal,
    pub gas_total: Decimal,
    pub water_total: Decimal,
    pub rent_total: Decimal,
    pub maintenance_total: Decimal,
    pub trash_total: Decimal,
    pub internet_total: Decimal,
    pub other_total: Decimal,
}

impl MonthlySummary {
    pub fn from_payments(year: i32, month: i32, payments: &[UtilityPayment]) -> Self {
        let mut summary = Self {
            year,
            month,
            total_payments: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            pending_amount: Decimal::ZERO,
            payment_count: 0,
            paid_count: 0,
            pending_count: 0,
            completion_rate: Decimal::ZERO,
            electricity_total: Decimal::ZERO,
            gas_total: Decimal::ZERO,
            water_total: Decimal::ZERO,
            rent_total: Decimal::ZERO,
            maintenance_total: Decimal::ZERO,
            trash_total: Decimal::ZERO,
            internet_total: Decimal::ZERO,
            other_total: Decimal::ZERO,
        };

        for payment in payments {
            summary.total_payments += payment.price;
            *summary.category_total_mut(payment.category()) += payment.price;
            summary.payment_count += 1;
            if payment.is_paid {
                summary.paid_amount += payment.price;
                summary.paid_count += 1;
            } else {
                summary.pending_amount += payment.price;
                summary.pending_count += 1;
            }
        }

        if summary.total_payments > Decimal::ZERO {
            summary.completion_rate =
                (summary.paid_amount / summary.total_payments * Decimal::ONE_HUNDRED).round_dp(2);
        }

        summary
    }

    fn category_total_mut(&mut self, category: PaymentCategory) -> &mut Decimal {
        match category {
            PaymentCategory::Electricity => &mut self.electricity_total,
            PaymentCategory::Gas => &mut self.gas_total,
            PaymentCategory::Water => &mut self.water_total,
            PaymentCategory::Rent => &mut self.rent_total,
            PaymentCategory::Maintenance => &mut self.maintenance_total,
            PaymentCategory::Trash => &mut self.trash_total,
            PaymentCategory::Internet => &mut self.internet_total,
            PaymentCategory::Other => &mut self.other_total,
        }
    }
}

/// Pago regular mensual - mapea a la tabla recurring_payments
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecurringPayment {
    pub id: Uuid,
    pub company_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    /// Día del mes en que vence el pago (1-31)
    pub due_day: i32,
    pub bank: Option<Bank>,
    pub is_active: bool,
    /// Generar el pago automáticamente cada mes
    pub auto_create: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecurringPayment {
    /// Fecha de vencimiento en un mes dado. Un `due_day` mayor que el último
    /// día del mes cae en el último día.
    pub fn due_date(&self, year: i32, month: u32) -> Option<NaiveDate> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
        let (_, next_month) = PeriodType::Month.bounds(first_day)?;
        let last_day = next_month.pred_opt()?.day();
        let day = u32::try_from(self.due_day).ok()?.clamp(1, last_day);
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Plantilla para crear pagos rápidamente - mapea a la tabla payment_templates
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PaymentTemplate {
    pub id: Uuid,
    pub name: String,
    pub company_name: String,
    pub description: String,
    pub default_amount: Option<Decimal>,
    pub default_bank: Option<Bank>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(price: i64, is_paid: bool, needs_payment: bool) -> UtilityPayment {
        UtilityPayment {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            month: 3,
            quarter: 1,
            company_id: None,
            company_name: "Мосэнергосбыт".to_string(),
            description: "Электроэнергия".to_string(),
            price: Decimal::from(price),
            is_paid,
            billing_statement: String::new(),
            bank: None,
            needs_payment,
            is_reported: false,
            comment: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status() {
        assert_eq!(payment(10, true, true).status(), PaymentStatus::Paid);
        assert_eq!(payment(10, false, true).status(), PaymentStatus::NeedsPayment);
        assert_eq!(payment(10, false, false).status(), PaymentStatus::Pending);
    }

    #[test]
    fn test_monthly_summary() {
        let payments = vec![payment(300, true, false), payment(100, false, true)];
        let summary = MonthlySummary::from_payments(2024, 3, &payments);

        assert_eq!(summary.total_payments, Decimal::from(400));
        assert_eq!(summary.paid_amount, Decimal::from(300));
        assert_eq!(summary.pending_amount, Decimal::from(100));
        assert_eq!(summary.payment_count, 2);
        assert_eq!(summary.paid_count, 1);
        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.completion_rate, Decimal::from(75));
    }

    #[test]
    fn test_monthly_summary_category_totals() {
        let mut water = payment(120, true, false);
        water.company_name = "Мосводоканал".to_string();
        water.description = "Холодная вода".to_string();
        let mut other = payment(55, false, false);
        other.company_name = "Домофон-сервис".to_string();
        other.description = "Абонентская плата".to_string();

        let payments = vec![payment(300, true, false), water, other];
        let summary = MonthlySummary::from_payments(2024, 3, &payments);

        assert_eq!(summary.electricity_total, Decimal::from(300));
        assert_eq!(summary.water_total, Decimal::from(120));
        assert_eq!(summary.other_total, Decimal::from(55));
        assert_eq!(summary.gas_total, Decimal::ZERO);
    }

    #[test]
    fn test_payment_category_classification() {
        let cases = [
            ("Мосэнергосбыт", "Электроэнергия", PaymentCategory::Electricity),
            ("Мосгаз", "Газоснабжение", PaymentCategory::Gas),
            ("МФЦ", "Вывоз твердых коммунальных отходов", PaymentCategory::Trash),
            ("Ростелеком", "Домашний интернет", PaymentCategory::Internet),
            ("Иванов И.И.", "Аренда квартиры", PaymentCategory::Rent),
            ("УК Жилищник", "Содержание и ремонт", PaymentCategory::Maintenance),
            ("Rostelecom", "Internet", PaymentCategory::Internet),
            ("Домофон-сервис", "Абонентская плата", PaymentCategory::Other),
        ];

        for (company, description, expected) in cases {
            assert_eq!(
                PaymentCategory::classify(company, description),
                expected,
                "{} / {}",
                company,
                description
            );
        }
    }

    fn recurring(due_day: i32) -> RecurringPayment {
        RecurringPayment {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            description: "Аренда квартиры".to_string(),
            amount: Decimal::from(45_000),
            due_day,
            bank: Some(Bank::Mk1),
            is_active: true,
            auto_create: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_recurring_due_date_clamps_to_month_end() {
        assert_eq!(
            recurring(31).due_date(2024, 2),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            recurring(31).due_date(2023, 4),
            NaiveDate::from_ymd_opt(2023, 4, 30)
        );
        assert_eq!(
            recurring(10).due_date(2024, 12),
            NaiveDate::from_ymd_opt(2024, 12, 10)
        );
        assert_eq!(recurring(10).due_date(2024, 13), None);
    }

    #[test]
    fn test_monthly_summary_empty() {
        let summary = MonthlySummary::from_payments(2024, 3, &[]);
        assert_eq!(summary.completion_rate, Decimal::ZERO);
        assert_eq!(summary.payment_count, 0);
    }

    #[test]
    fn test_company_display_name() {
        let company = UtilityCompany {
            id: Uuid::new_v4(),
            name: "ПАО Мосэнергосбыт".to_string(),
            category_name: Some("Свет".to_string()),
            account_number: None,
        };
        assert_eq!(company.display_name(), "Свет");

        let company = UtilityCompany { category_name: None, ..company };
        assert_eq!(company.display_name(), "ПАО Мосэнергосбыт");
    }
}
