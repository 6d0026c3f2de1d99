//! Temperature and distance conversions.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// Miles in one kilometer.
pub const MILES_PER_KM: f64 = 0.621_371;

/// Supported conversion modes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Conversion {
    /// Celsius to Fahrenheit
    #[value(name = "c-to-f")]
    CelsiusToFahrenheit,

    /// Fahrenheit to Celsius
    #[value(name = "f-to-c")]
    FahrenheitToCelsius,

    /// Kilometers to miles
    #[value(name = "km-to-mi")]
    KilometersToMiles,

    /// Miles to kilometers
    #[value(name = "mi-to-km")]
    MilesToKilometers,
}

impl Conversion {
    /// Apply the conversion to `value`.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::CelsiusToFahrenheit => value * 9.0 / 5.0 + 32.0,
            Self::FahrenheitToCelsius => (value - 32.0) * 5.0 / 9.0,
            Self::KilometersToMiles => value * MILES_PER_KM,
            Self::MilesToKilometers => value / MILES_PER_KM,
        }
    }

    /// Unit symbols as `(from, to)`.
    #[must_use]
    pub const fn units(self) -> (&'static str, &'static str) {
        match self {
            Self::CelsiusToFahrenheit => ("°C", "°F"),
            Self::FahrenheitToCelsius => ("°F", "°C"),
            Self::KilometersToMiles => ("km", "mi"),
            Self::MilesToKilometers => ("mi", "km"),
        }
    }
}

/// Error for conversion input that is not a number.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The input text did not parse as a number.
    #[error("Enter a number (got {0:?})")]
    InvalidNumber(String),
}

/// The outcome of one conversion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Converted {
    /// The mode that was applied.
    pub mode: Conversion,

    /// The original value.
    pub input: f64,

    /// The converted value.
    pub output: f64,
}

impl fmt::Display for Converted {
    /// Formats as `"0.00 °C = 32.00 °F"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (from, to) = self.mode.units();
        write!(f, "{:.2} {from} = {:.2} {to}", self.input, self.output)
    }
}

/// Parse `input` and convert it.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidNumber`] if `input` is not a number.
pub fn convert(mode: Conversion, input: &str) -> Result<Converted, ConvertError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ConvertError::InvalidNumber(input.to_string()))?;

    Ok(Converted {
        mode,
        input: value,
        output: mode.apply(value),
    })
}
