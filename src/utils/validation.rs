//! Utilidades de validación
//!
//! Validadores usados por los DTOs (`#[validate(custom = ...)]`).

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    /// Matrícula rusa: letra, 3 dígitos, 2 letras, región de 2-3 dígitos (ej: у123хм456)
    static ref LICENSE_PLATE_RE: Regex =
        Regex::new(r"(?i)^[авекмнорстухabekmhopctyx]\d{3}[авекмнорстухabekmhopctyx]{2}\d{2,3}$")
            .expect("valid license plate regex");
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Mayor valor de una columna NUMERIC(6,2): litros y precios unitarios
pub const MAX_UNIT_AMOUNT: Decimal = Decimal::from_parts(999_999, 0, 0, false, 2);
/// Mayor valor de una columna NUMERIC(8,2): costes de un repostaje
pub const MAX_COST: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);
/// Mayor valor de una columna NUMERIC(10,2): importes de servicios
pub const MAX_PAYMENT_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2); // 9_999_999_999 = 2 * 2^32 + 1_410_065_407

fn decimal_in_range(value: &Decimal, max: Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)?;
    if *value > max {
        let mut error = ValidationError::new("range");
        error.add_param("value".into(), value);
        error.add_param("max".into(), &max);
        return Err(error);
    }
    Ok(())
}

/// Litros o precio por litro: `0..=9999.99`
pub fn validate_unit_amount(value: &Decimal) -> Result<(), ValidationError> {
    decimal_in_range(value, MAX_UNIT_AMOUNT)
}

/// Coste o descuento de un repostaje: `0..=999999.99`
pub fn validate_cost(value: &Decimal) -> Result<(), ValidationError> {
    decimal_in_range(value, MAX_COST)
}

/// Importe de un pago de servicios: `0..=99999999.99`
pub fn validate_payment_amount(value: &Decimal) -> Result<(), ValidationError> {
    decimal_in_range(value, MAX_PAYMENT_AMOUNT)
}

/// Validar formato de matrícula de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let clean_plate: String = value.chars().filter(|c| !matches!(c, ' ' | '-' | '_')).collect();
    if clean_plate.is_empty() {
        // la matrícula es opcional
        return Ok(());
    }
    if !LICENSE_PLATE_RE.is_match(&clean_plate) {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"у123хм456".to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Lada").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(Decimal::ZERO).is_ok());
        assert!(validate_non_negative(Decimal::new(4999, 2)).is_ok());
        assert!(validate_non_negative(Decimal::new(-1, 2)).is_err());
        assert!(validate_non_negative(-3i32).is_err());
    }

    #[test]
    fn test_amount_limits_match_columns() {
        assert_eq!(MAX_UNIT_AMOUNT.to_string(), "9999.99");
        assert_eq!(MAX_COST.to_string(), "999999.99");
        assert_eq!(MAX_PAYMENT_AMOUNT.to_string(), "99999999.99");
    }

    #[test]
    fn test_bounded_amounts() {
        assert!(validate_unit_amount(&Decimal::new(999_999, 2)).is_ok());
        assert!(validate_unit_amount(&Decimal::from(10_000)).is_err());
        assert!(validate_unit_amount(&Decimal::new(-1, 0)).is_err());

        assert!(validate_cost(&Decimal::new(99_999_999, 2)).is_ok());
        assert!(validate_cost(&Decimal::from(1_000_000)).is_err());

        assert!(validate_payment_amount(&Decimal::from(1_000_000)).is_ok());
        assert!(validate_payment_amount(&Decimal::from(100_000_000)).is_err());
    }

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate("у123хм456").is_ok());
        assert!(validate_license_plate("A123BC77").is_ok());
        assert!(validate_license_plate("a 123 bc 77").is_ok());
        assert!(validate_license_plate("").is_ok());
        assert!(validate_license_plate("1234567").is_err());
        assert!(validate_license_plate("Z123BC77").is_err());
    }
}
