//! Utility functions and helpers.
//!
//! This module contains helpers used throughout the application, such as the
//! logging setup and amount formatting.

pub mod logging;

pub use logging::init_tracing;

/// Format an amount with a currency symbol and two decimals, e.g. `"$ 12.50"`.
#[must_use]
pub fn format_amount(currency: &str, amount: f64) -> String {
    if currency.is_empty() {
        format!("{amount:.2}")
    } else {
        format!("{currency} {amount:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("R$", 12.5), "R$ 12.50");
        assert_eq!(format_amount("$", 0.0), "$ 0.00");
        assert_eq!(format_amount("", 3.333), "3.33");
    }
}
