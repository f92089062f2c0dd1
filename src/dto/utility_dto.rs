use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    utility::{
        PaymentCategory, PaymentStatus, PaymentTemplate, RecurringPayment, UtilityCompany, UtilityPayment,
    },
    Bank,
};

// Compañías

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, max = 255), custom = "crate::utils::validation::validate_not_empty")]
    pub name: String,
    #[validate(length(max = 100))]
    pub category_name: Option<String>,
    #[validate(length(max = 100))]
    pub account_number: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 1, max = 255), custom = "crate::utils::validation::validate_not_empty")]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub category_name: Option<String>,
    #[validate(length(max = 100))]
    pub account_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub category_name: Option<String>,
    pub account_number: Option<String>,
    pub display_name: String,
}

impl From<UtilityCompany> for CompanyResponse {
    fn from(company: UtilityCompany) -> Self {
        Self {
            display_name: company.display_name().to_string(),
            id: company.id,
            name: company.name,
            category_name: company.category_name,
            account_number: company.account_number,
        }
    }
}

// Pagos

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePaymentRequest {
    pub date: NaiveDate,
    #[validate(range(min = 1, max = 12))]
    pub month: Option<i32>,
    #[validate(range(min = 1, max = 4))]
    pub quarter: Option<i32>,
    pub company_id: Option<Uuid>,
    #[validate(length(max = 255))]
    pub company_name: Option<String>,
    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub description: String,
    #[validate(custom = "crate::utils::validation::validate_payment_amount")]
    pub price: Decimal,
    pub is_paid: Option<bool>,
    #[validate(length(max = 100))]
    pub billing_statement: Option<String>,
    pub bank: Option<Bank>,
    pub needs_payment: Option<bool>,
    pub is_reported: Option<bool>,
    pub comment: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePaymentRequest {
    pub date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 12))]
    pub month: Option<i32>,
    #[validate(range(min = 1, max = 4))]
    pub quarter: Option<i32>,
    pub company_id: Option<Uuid>,
    #[validate(length(max = 255))]
    pub company_name: Option<String>,
    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub description: Option<String>,
    #[validate(custom = "crate::utils::validation::validate_payment_amount")]
    pub price: Option<Decimal>,
    pub is_paid: Option<bool>,
    #[validate(length(max = 100))]
    pub billing_statement: Option<String>,
    pub bank: Option<Bank>,
    pub needs_payment: Option<bool>,
    pub is_reported: Option<bool>,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
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
    pub bank_label: Option<&'static str>,
    pub needs_payment: bool,
    pub is_reported: bool,
    pub comment: Option<String>,
    pub status: PaymentStatus,
    pub category: PaymentCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UtilityPayment> for PaymentResponse {
    fn from(payment: UtilityPayment) -> Self {
        Self {
            status: payment.status(),
            category: payment.category(),
            bank_label: payment.bank.map(|bank| bank.label()),
            id: payment.id,
            date: payment.date,
            month: payment.month,
            quarter: payment.quarter,
            company_id: payment.company_id,
            company_name: payment.company_name,
            description: payment.description,
            price: payment.price,
            is_paid: payment.is_paid,
            billing_statement: payment.billing_statement,
            bank: payment.bank,
            needs_payment: payment.needs_payment,
            is_reported: payment.is_reported,
            comment: payment.comment,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PaymentFilters {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub quarter: Option<i32>,
    pub is_paid: Option<bool>,
    pub needs_payment: Option<bool>,
    pub bank: Option<Bank>,
    pub company_name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Mes del resumen; por defecto el mes en curso
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

// Pagos regulares

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecurringPaymentRequest {
    pub company_id: Uuid,
    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub description: String,
    #[validate(custom = "crate::utils::validation::validate_payment_amount")]
    pub amount: Decimal,
    #[validate(range(min = 1, max = 31))]
    pub due_day: i32,
    pub bank: Option<Bank>,
    pub is_active: Option<bool>,
    pub auto_create: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRecurringPaymentRequest {
    pub company_id: Option<Uuid>,
    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub description: Option<String>,
    #[validate(custom = "crate::utils::validation::validate_payment_amount")]
    pub amount: Option<Decimal>,
    #[validate(range(min = 1, max = 31))]
    pub due_day: Option<i32>,
    pub bank: Option<Bank>,
    pub is_active: Option<bool>,
    pub auto_create: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct RecurringPaymentResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub due_day: i32,
    pub bank: Option<Bank>,
    pub bank_label: Option<&'static str>,
    pub is_active: bool,
    pub auto_create: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecurringPayment> for RecurringPaymentResponse {
    fn from(recurring: RecurringPayment) -> Self {
        Self {
            bank_label: recurring.bank.map(|bank| bank.label()),
            id: recurring.id,
            company_id: recurring.company_id,
            description: recurring.description,
            amount: recurring.amount,
            due_day: recurring.due_day,
            bank: recurring.bank,
            is_active: recurring.is_active,
            auto_create: recurring.auto_create,
            created_at: recurring.created_at,
            updated_at: recurring.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecurringPaymentFilters {
    pub company_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// Plantillas

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, max = 100), custom = "crate::utils::validation::validate_not_empty")]
    pub name: String,
    #[validate(length(min = 1, max = 255), custom = "crate::utils::validation::validate_not_empty")]
    pub company_name: String,
    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub description: String,
    #[validate(custom = "crate::utils::validation::validate_payment_amount")]
    pub default_amount: Option<Decimal>,
    pub default_bank: Option<Bank>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTemplateRequest {
    #[validate(length(min = 1, max = 100), custom = "crate::utils::validation::validate_not_empty")]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255), custom = "crate::utils::validation::validate_not_empty")]
    pub company_name: Option<String>,
    #[validate(custom = "crate::utils::validation::validate_not_empty")]
    pub description: Option<String>,
    #[validate(custom = "crate::utils::validation::validate_payment_amount")]
    pub default_amount: Option<Decimal>,
    pub default_bank: Option<Bank>,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub id: Uuid,
    pub name: String,
    pub company_name: String,
    pub description: String,
    pub default_amount: Option<Decimal>,
    pub default_bank: Option<Bank>,
    pub default_bank_label: Option<&'static str>,
}

impl From<PaymentTemplate> for TemplateResponse {
    fn from(template: PaymentTemplate) -> Self {
        Self {
            default_bank_label: template.default_bank.map(|bank| bank.label()),
            id: template.id,
            name: template.name,
            company_name: template.company_name,
            description: template.description,
            default_amount: template.default_amount,
            default_bank: template.default_bank,
        }
    }
}

/// Crea un pago a partir de una plantilla. Lo que no se indica sale de la
/// plantilla.
#[derive(Debug, Deserialize, Validate)]
pub struct ApplyTemplateRequest {
    pub date: NaiveDate,
    pub company_id: Option<Uuid>,
    #[validate(custom = "crate::utils::validation::validate_payment_amount")]
    pub price: Option<Decimal>,
    pub bank: Option<Bank>,
    pub is_paid: Option<bool>,
    pub needs_payment: Option<bool>,
    pub comment: Option<String>,
}
