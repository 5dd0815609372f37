//! Tax input and output structures

use serde::{Deserialize, Serialize};

/// Federal filing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    #[default]
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
}

impl FilingStatus {
    /// Parse the common spellings used by scenario files
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "single" | "s" => Some(FilingStatus::Single),
            "married_filing_jointly" | "married_jointly" | "mfj" | "joint" => {
                Some(FilingStatus::MarriedFilingJointly)
            }
            "married_filing_separately" | "married_separately" | "mfs" => {
                Some(FilingStatus::MarriedFilingSeparately)
            }
            "head_of_household" | "hoh" => Some(FilingStatus::HeadOfHousehold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilingStatus::Single => "single",
            FilingStatus::MarriedFilingJointly => "married_filing_jointly",
            FilingStatus::MarriedFilingSeparately => "married_filing_separately",
            FilingStatus::HeadOfHousehold => "head_of_household",
        }
    }
}

/// Annual pre-tax contributions by account type
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreTaxContributions {
    /// Traditional 401(k) / 403(b) / 457 elective deferrals
    pub traditional_401k: f64,
    /// Deductible traditional IRA contributions
    pub traditional_ira: f64,
    /// Health savings account contributions
    pub hsa: f64,
    /// Anything else excluded from federal AGI (dependent care FSA, etc.)
    pub other: f64,
}

impl PreTaxContributions {
    /// Sum of all categories, negatives ignored
    pub fn total(&self) -> f64 {
        self.traditional_401k.max(0.0)
            + self.traditional_ira.max(0.0)
            + self.hsa.max(0.0)
            + self.other.max(0.0)
    }
}

/// One row of a progressive rate table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Lower bound of taxable income (inclusive)
    pub min: f64,
    /// Upper bound (exclusive); `f64::INFINITY` for the top bracket
    pub max: f64,
    /// Marginal rate as a decimal
    pub rate: f64,
}

impl Bracket {
    pub const fn new(min: f64, max: f64, rate: f64) -> Self {
        Self { min, max, rate }
    }
}

/// Tax owed from a single bracket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketTax {
    pub min: f64,
    /// `None` for the open-ended top bracket
    pub max: Option<f64>,
    pub rate: f64,
    /// Portion of taxable income falling inside this bracket
    pub taxable_amount: f64,
    pub tax: f64,
}

/// Walk a bracket table and return the per-bracket breakdown.
/// Every bracket is reported, including those with nothing taxed.
pub fn apply_brackets(taxable_income: f64, brackets: &[Bracket]) -> Vec<BracketTax> {
    let income = taxable_income.max(0.0);
    brackets
        .iter()
        .map(|b| {
            let taxable_amount = if income > b.min {
                (income.min(b.max) - b.min).max(0.0)
            } else {
                0.0
            };
            BracketTax {
                min: b.min,
                max: if b.max.is_finite() { Some(b.max) } else { None },
                rate: b.rate,
                taxable_amount,
                tax: taxable_amount * b.rate,
            }
        })
        .collect()
}

/// Rate of the highest bracket that actually taxed something
pub fn marginal_rate(breakdown: &[BracketTax]) -> f64 {
    breakdown
        .iter()
        .rev()
        .find(|b| b.taxable_amount > 0.0)
        .map(|b| b.rate)
        .unwrap_or(0.0)
}

/// Federal income tax detail
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FederalTaxBreakdown {
    pub adjusted_gross_income: f64,
    pub standard_deduction: f64,
    pub taxable_income: f64,
    pub brackets: Vec<BracketTax>,
    pub tax: f64,
    pub marginal_rate: f64,
}

/// How a state taxes wage income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateTaxKind {
    #[default]
    None,
    Flat,
    Progressive,
}

/// Surtax line applied on state taxable income above a threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurtaxLine {
    pub threshold: f64,
    pub rate: f64,
    pub taxable_amount: f64,
    pub tax: f64,
}

/// State income tax detail
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StateTaxBreakdown {
    /// Normalized two-letter code; empty when the input code was not recognized
    pub state_code: String,
    pub kind: StateTaxKind,
    pub adjusted_gross_income: f64,
    /// Deduction plus personal exemption removed before rates apply
    pub deduction: f64,
    pub taxable_income: f64,
    /// HSA contributions added back because the state does not exclude them
    pub hsa_add_back: f64,
    pub brackets: Vec<BracketTax>,
    pub surtax: Option<SurtaxLine>,
    pub tax: f64,
    pub marginal_rate: f64,
}

/// Payroll tax detail
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FicaBreakdown {
    pub social_security_wages: f64,
    pub social_security_tax: f64,
    pub medicare_wages: f64,
    pub medicare_tax: f64,
    pub additional_medicare_threshold: f64,
    pub additional_medicare_tax: f64,
    pub total: f64,
}

/// Full tax picture for one income year
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_income: f64,
    pub filing_status: FilingStatus,
    pub pre_tax: PreTaxContributions,
    pub total_pre_tax: f64,
    pub federal: FederalTaxBreakdown,
    pub state: StateTaxBreakdown,
    pub fica: FicaBreakdown,
    pub total_tax: f64,
    /// Total tax / gross income, as a decimal
    pub effective_rate: f64,
    /// Federal + state marginal income tax rate, as a decimal
    pub combined_marginal_rate: f64,
    /// Gross income less total tax; pre-tax contributions remain part of it
    pub net_income: f64,
}

impl TaxResult {
    /// Result for a year with no positive income
    pub fn zero(filing_status: FilingStatus, state_code: &str) -> Self {
        Self {
            filing_status,
            state: StateTaxBreakdown {
                state_code: super::state::state_config(state_code)
                    .map(|c| c.code.to_string())
                    .unwrap_or_default(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn federal_agi(&self) -> f64 {
        self.federal.adjusted_gross_income
    }

    pub fn state_agi(&self) -> f64 {
        self.state.adjusted_gross_income
    }

    /// Net income spread over twelve months
    pub fn monthly_net_income(&self) -> f64 {
        self.net_income / 12.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [Bracket; 3] = [
        Bracket::new(0.0, 10_000.0, 0.10),
        Bracket::new(10_000.0, 40_000.0, 0.20),
        Bracket::new(40_000.0, f64::INFINITY, 0.30),
    ];

    #[test]
    fn test_apply_brackets_partial_fill() {
        let breakdown = apply_brackets(25_000.0, &TABLE);
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown[0].taxable_amount, 10_000.0);
        assert_eq!(breakdown[1].taxable_amount, 15_000.0);
        assert_eq!(breakdown[2].taxable_amount, 0.0);
        assert_eq!(breakdown[2].max, None);

        let total: f64 = breakdown.iter().map(|b| b.tax).sum();
        assert!((total - 4_000.0).abs() < 1e-9);
        assert_eq!(marginal_rate(&breakdown), 0.20);
    }

    #[test]
    fn test_negative_income_taxes_nothing() {
        let breakdown = apply_brackets(-500.0, &TABLE);
        assert!(breakdown.iter().all(|b| b.tax == 0.0));
        assert_eq!(marginal_rate(&breakdown), 0.0);
    }

    #[test]
    fn test_filing_status_parse() {
        assert_eq!(FilingStatus::parse("MFJ"), Some(FilingStatus::MarriedFilingJointly));
        assert_eq!(
            FilingStatus::parse("married-filing-separately"),
            Some(FilingStatus::MarriedFilingSeparately)
        );
        assert_eq!(FilingStatus::parse("Head of Household"), Some(FilingStatus::HeadOfHousehold));
        assert_eq!(FilingStatus::parse("widow"), None);
    }

    #[test]
    fn test_pre_tax_total_ignores_negatives() {
        let c = PreTaxContributions {
            traditional_401k: 23_000.0,
            traditional_ira: -100.0,
            hsa: 4_150.0,
            other: 0.0,
        };
        assert_eq!(c.total(), 27_150.0);
    }
}
