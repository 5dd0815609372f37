//! Scenario assumptions: return, withdrawal, inflation and spending policy
//!
//! All rates are stored as whole-number percentages (7 means 7%) and are
//! converted to decimals at the point of use. A rate at or below zero turns
//! the dependent feature off rather than erroring.

pub mod loader;

pub use loader::{
    load_scenarios, load_scenarios_from_csv, load_scenarios_from_csv_reader,
    load_scenarios_from_json_reader, DEFAULT_SCENARIO_PATH,
};

use serde::{Deserialize, Serialize};

use crate::tax::{FilingStatus, PreTaxContributions};

/// Convert a whole-number percentage to a decimal
pub fn pct(rate: f64) -> f64 {
    rate / 100.0
}

/// Optional income and tax detail for a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeAssumptions {
    /// Gross annual income today
    pub gross_income: f64,
    /// Annual raise, percent
    pub income_growth_rate: f64,
    pub filing_status: FilingStatus,
    /// Two-letter state code; unknown codes are taxed as no-income-tax states
    pub state_code: String,
    pub pre_tax: PreTaxContributions,
}

impl Default for IncomeAssumptions {
    fn default() -> Self {
        Self {
            gross_income: 0.0,
            income_growth_rate: 0.0,
            filing_status: FilingStatus::Single,
            state_code: String::new(),
            pre_tax: PreTaxContributions::default(),
        }
    }
}

impl IncomeAssumptions {
    /// Gross income after `years` of raises
    pub fn gross_income_in(&self, years: u32) -> f64 {
        self.gross_income * self.growth_multiplier(years)
    }

    pub fn growth_multiplier(&self, years: u32) -> f64 {
        (1.0 + pct(self.income_growth_rate)).powi(years as i32)
    }
}

/// One planning scenario. Immutable for the duration of a projection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioAssumptions {
    pub name: String,
    /// Expected annual investment return, percent
    pub return_rate: f64,
    /// Safe withdrawal rate, percent
    pub swr: f64,
    /// Annual inflation, percent
    pub inflation_rate: f64,
    /// Spending floor in today's dollars, per month
    pub base_monthly_budget: f64,
    /// Percent of net worth added to the annual budget
    pub spending_growth_rate: f64,
    /// Fixed yearly contribution used when no income detail is given
    pub yearly_contribution: f64,
    pub income: Option<IncomeAssumptions>,
}

impl Default for ScenarioAssumptions {
    fn default() -> Self {
        Self::default_plan()
    }
}

impl ScenarioAssumptions {
    /// Middle-of-the-road planning defaults
    pub fn default_plan() -> Self {
        Self {
            name: "Base".to_string(),
            return_rate: 7.0,
            swr: 4.0,
            inflation_rate: 3.0,
            base_monthly_budget: 4_000.0,
            spending_growth_rate: 0.0,
            yearly_contribution: 0.0,
            income: None,
        }
    }

    pub fn return_decimal(&self) -> f64 {
        pct(self.return_rate)
    }

    pub fn swr_decimal(&self) -> f64 {
        pct(self.swr)
    }

    pub fn spending_growth_decimal(&self) -> f64 {
        pct(self.spending_growth_rate)
    }

    /// Income block, only when it carries a positive gross income
    pub fn taxable_income(&self) -> Option<&IncomeAssumptions> {
        self.income.as_ref().filter(|i| i.gross_income > 0.0)
    }

    /// Contribution growth factor for the simple (no tax detail) savings rule
    pub fn contribution_multiplier(&self, years: u32) -> f64 {
        self.income
            .as_ref()
            .map(|i| i.growth_multiplier(years))
            .unwrap_or(1.0)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
