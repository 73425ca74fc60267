//! Just enough of the Kubernetes quantity grammar to validate a quantity and
//! tell whether it is zero.
//!
//! ```text
//! <quantity>        ::= <signedNumber><suffix>
//! <signedNumber>    ::= <number> | +<number> | -<number>
//! <number>          ::= <digits> | <digits>.<digits> | <digits>. | .<digits>
//! <suffix>          ::= <binarySI> | <decimalExponent> | <decimalSI>
//! <binarySI>        ::= Ki | Mi | Gi | Ti | Pi | Ei
//! <decimalSI>       ::= n | u | m | "" | k | M | G | T | P | E
//! <decimalExponent> ::= "e" <signedNumber> | "E" <signedNumber>
//! ```

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use thiserror::Error;

const BINARY_SI_SUFFIXES: &[&str] = &["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];
const DECIMAL_SI_SUFFIXES: &[&str] = &["n", "u", "m", "", "k", "M", "G", "T", "P", "E"];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("quantities must match the regular expression '^([+-]?[0-9.]+)([eEinumkKMGTP]*[-+]?[0-9]*)$', got {0:?}")]
pub struct QuantityError(pub String);

/// Returns `true` when the quantity parses and its numeric part is zero,
/// regardless of the unit suffix.
pub fn is_zero(quantity: &Quantity) -> Result<bool, QuantityError> {
    let mantissa = parse(&quantity.0)?;
    Ok(mantissa.chars().all(|c| c == '0' || c == '.'))
}

/// Validates a quantity string.
pub fn validate(quantity: &Quantity) -> Result<(), QuantityError> {
    parse(&quantity.0).map(|_| ())
}

/// Splits the quantity into its unsigned number and suffix, validates both and
/// returns the number.
fn parse(raw: &str) -> Result<&str, QuantityError> {
    let invalid = || QuantityError(raw.to_owned());

    let unsigned = raw
        .strip_prefix('+')
        .or_else(|| raw.strip_prefix('-'))
        .unwrap_or(raw);

    let number_len = unsigned
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(unsigned.len());
    let (number, suffix) = unsigned.split_at(number_len);

    if !is_valid_number(number) || !is_valid_suffix(suffix) {
        return Err(invalid());
    }

    Ok(number)
}

fn is_valid_number(number: &str) -> bool {
    let mut parts = number.split('.');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next();
    if parts.next().is_some() {
        return false;
    }

    match fraction {
        None => !integer.is_empty(),
        Some(fraction) => !(integer.is_empty() && fraction.is_empty()),
    }
}

fn is_valid_suffix(suffix: &str) -> bool {
    if BINARY_SI_SUFFIXES.contains(&suffix) || DECIMAL_SI_SUFFIXES.contains(&suffix) {
        return true;
    }

    match suffix
        .strip_prefix('e')
        .or_else(|| suffix.strip_prefix('E'))
    {
        Some(exponent) => {
            let digits = exponent
                .strip_prefix('+')
                .or_else(|| exponent.strip_prefix('-'))
                .unwrap_or(exponent);
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
