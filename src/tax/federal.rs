//! Federal income tax: 2024 brackets and standard deductions
//!
//! Taxable income = max(0, gross - pre-tax contributions - standard deduction).

use super::types::{apply_brackets, marginal_rate, Bracket, FederalTaxBreakdown, FilingStatus};

const INF: f64 = f64::INFINITY;

const SINGLE: [Bracket; 7] = [
    Bracket::new(0.0, 11_600.0, 0.10),
    Bracket::new(11_600.0, 47_150.0, 0.12),
    Bracket::new(47_150.0, 100_525.0, 0.22),
    Bracket::new(100_525.0, 191_950.0, 0.24),
    Bracket::new(191_950.0, 243_725.0, 0.32),
    Bracket::new(243_725.0, 609_350.0, 0.35),
    Bracket::new(609_350.0, INF, 0.37),
];

const MARRIED_JOINT: [Bracket; 7] = [
    Bracket::new(0.0, 23_200.0, 0.10),
    Bracket::new(23_200.0, 94_300.0, 0.12),
    Bracket::new(94_300.0, 201_050.0, 0.22),
    Bracket::new(201_050.0, 383_900.0, 0.24),
    Bracket::new(383_900.0, 487_450.0, 0.32),
    Bracket::new(487_450.0, 731_200.0, 0.35),
    Bracket::new(731_200.0, INF, 0.37),
];

const MARRIED_SEPARATE: [Bracket; 7] = [
    Bracket::new(0.0, 11_600.0, 0.10),
    Bracket::new(11_600.0, 47_150.0, 0.12),
    Bracket::new(47_150.0, 100_525.0, 0.22),
    Bracket::new(100_525.0, 191_950.0, 0.24),
    Bracket::new(191_950.0, 243_725.0, 0.32),
    Bracket::new(243_725.0, 365_600.0, 0.35),
    Bracket::new(365_600.0, INF, 0.37),
];

const HEAD_OF_HOUSEHOLD: [Bracket; 7] = [
    Bracket::new(0.0, 16_550.0, 0.10),
    Bracket::new(16_550.0, 63_100.0, 0.12),
    Bracket::new(63_100.0, 100_500.0, 0.22),
    Bracket::new(100_500.0, 191_950.0, 0.24),
    Bracket::new(191_950.0, 243_700.0, 0.32),
    Bracket::new(243_700.0, 609_350.0, 0.35),
    Bracket::new(609_350.0, INF, 0.37),
];

/// Bracket table for a filing status
pub fn federal_brackets(status: FilingStatus) -> &'static [Bracket] {
    match status {
        FilingStatus::Single => &SINGLE,
        FilingStatus::MarriedFilingJointly => &MARRIED_JOINT,
        FilingStatus::MarriedFilingSeparately => &MARRIED_SEPARATE,
        FilingStatus::HeadOfHousehold => &HEAD_OF_HOUSEHOLD,
    }
}

/// Standard deduction for a filing status
pub fn federal_standard_deduction(status: FilingStatus) -> f64 {
    match status {
        FilingStatus::Single | FilingStatus::MarriedFilingSeparately => 14_600.0,
        FilingStatus::MarriedFilingJointly => 29_200.0,
        FilingStatus::HeadOfHousehold => 21_900.0,
    }
}

/// Federal income tax on an already-computed AGI
pub fn calculate_federal_tax(adjusted_gross_income: f64, status: FilingStatus) -> FederalTaxBreakdown {
    let agi = adjusted_gross_income.max(0.0);
    let standard_deduction = federal_standard_deduction(status);
    let taxable_income = (agi - standard_deduction).max(0.0);

    let brackets = apply_brackets(taxable_income, federal_brackets(status));
    let tax = brackets.iter().map(|b| b.tax).sum();
    let marginal = marginal_rate(&brackets);

    FederalTaxBreakdown {
        adjusted_gross_income: agi,
        standard_deduction,
        taxable_income,
        brackets,
        tax,
        marginal_rate: marginal,
    }
}
