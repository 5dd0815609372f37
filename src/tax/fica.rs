//! Payroll taxes (Social Security + Medicare)
//!
//! FICA is assessed on gross wages. Pre-tax retirement contributions do not
//! reduce the base.

use super::types::{FicaBreakdown, FilingStatus};

/// Social Security taxable wage base (2024)
pub const SOCIAL_SECURITY_WAGE_CAP: f64 = 168_600.0;
pub const SOCIAL_SECURITY_RATE: f64 = 0.062;
pub const MEDICARE_RATE: f64 = 0.0145;
pub const ADDITIONAL_MEDICARE_RATE: f64 = 0.009;

/// Wages above which the additional Medicare tax applies
pub fn additional_medicare_threshold(status: FilingStatus) -> f64 {
    match status {
        FilingStatus::MarriedFilingJointly => 250_000.0,
        FilingStatus::MarriedFilingSeparately => 125_000.0,
        FilingStatus::Single | FilingStatus::HeadOfHousehold => 200_000.0,
    }
}

pub fn calculate_fica(gross_income: f64, status: FilingStatus) -> FicaBreakdown {
    let threshold = additional_medicare_threshold(status);
    if gross_income <= 0.0 {
        return FicaBreakdown {
            additional_medicare_threshold: threshold,
            ..Default::default()
        };
    }

    let social_security_wages = gross_income.min(SOCIAL_SECURITY_WAGE_CAP);
    let social_security_tax = social_security_wages * SOCIAL_SECURITY_RATE;
    let medicare_tax = gross_income * MEDICARE_RATE;
    let additional_medicare_tax = (gross_income - threshold).max(0.0) * ADDITIONAL_MEDICARE_RATE;

    FicaBreakdown {
        social_security_wages,
        social_security_tax,
        medicare_wages: gross_income,
        medicare_tax,
        additional_medicare_threshold: threshold,
        additional_medicare_tax,
        total: social_security_tax + medicare_tax + additional_medicare_tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_under_cap() {
        let fica = calculate_fica(100_000.0, FilingStatus::Single);
        assert_abs_diff_eq!(fica.social_security_tax, 6_200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(fica.medicare_tax, 1_450.0, epsilon = 1e-9);
        assert_eq!(fica.additional_medicare_tax, 0.0);
        assert_abs_diff_eq!(fica.total, 7_650.0, epsilon = 1e-9);
    }

    #[test]
    fn test_social_security_capped() {
        let capped = SOCIAL_SECURITY_WAGE_CAP * SOCIAL_SECURITY_RATE;
        for gross in [500_000.0, 1_000_000.0, 10_000_000.0] {
            let fica = calculate_fica(gross, FilingStatus::MarriedFilingJointly);
            assert_eq!(fica.social_security_wages, SOCIAL_SECURITY_WAGE_CAP);
            assert_eq!(fica.social_security_tax, capped);
        }
    }

    #[test]
    fn test_additional_medicare_threshold_by_status() {
        let single = calculate_fica(300_000.0, FilingStatus::Single);
        assert_abs_diff_eq!(single.additional_medicare_tax, 100_000.0 * 0.009, epsilon = 1e-9);

        let joint = calculate_fica(300_000.0, FilingStatus::MarriedFilingJointly);
        assert_abs_diff_eq!(joint.additional_medicare_tax, 50_000.0 * 0.009, epsilon = 1e-9);

        let separate = calculate_fica(300_000.0, FilingStatus::MarriedFilingSeparately);
        assert_abs_diff_eq!(separate.additional_medicare_tax, 175_000.0 * 0.009, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_and_negative_wages() {
        assert_eq!(calculate_fica(0.0, FilingStatus::Single).total, 0.0);
        assert_eq!(calculate_fica(-10_000.0, FilingStatus::HeadOfHousehold).total, 0.0);
    }
}
