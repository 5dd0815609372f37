//! Nominal vs. real (today's purchasing power) value conversions
//!
//! Rates are whole-number percentages (3 means 3%). Years at or before the
//! base year are never adjusted, so year-0 values are identical in both views.

use serde::{Deserialize, Serialize};

/// Cumulative price-level factor after `years` at `rate` percent per year
pub fn inflation_multiplier(years: f64, rate: f64) -> f64 {
    if years <= 0.0 {
        return 1.0;
    }
    (1.0 + rate / 100.0).powf(years)
}

/// Convert a future-dollar amount into today's dollars
pub fn nominal_to_real(amount: f64, years: f64, rate: f64) -> f64 {
    amount / inflation_multiplier(years, rate)
}

/// Convert a today's-dollar amount into future dollars
pub fn real_to_nominal(amount: f64, years: f64, rate: f64) -> f64 {
    amount * inflation_multiplier(years, rate)
}

/// Alias of [`nominal_to_real`] for callers working with display values
pub fn to_real_value(nominal: f64, years: f64, inflation_rate: f64) -> f64 {
    nominal_to_real(nominal, years, inflation_rate)
}

/// Alias of [`real_to_nominal`]
pub fn to_nominal_value(real: f64, years: f64, inflation_rate: f64) -> f64 {
    real_to_nominal(real, years, inflation_rate)
}

/// An amount carried in both dollar bases so consumers can pick a view
/// without recomputing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationAdjusted {
    /// Actual future dollars
    pub nominal: f64,
    /// Same amount in base-year purchasing power
    pub real: f64,
}

impl InflationAdjusted {
    /// Build from a nominal amount observed `years` after the base year
    pub fn from_nominal(nominal: f64, years: f64, rate: f64) -> Self {
        if years <= 0.0 {
            return Self { nominal, real: nominal };
        }
        Self {
            nominal,
            real: nominal_to_real(nominal, years, rate),
        }
    }

    /// Build from a base-year amount projected `years` ahead
    pub fn from_real(real: f64, years: f64, rate: f64) -> Self {
        if years <= 0.0 {
            return Self { nominal: real, real };
        }
        Self {
            nominal: real_to_nominal(real, years, rate),
            real,
        }
    }
}
