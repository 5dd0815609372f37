//! Projection output rows

use serde::{Deserialize, Serialize};

use crate::inflation::InflationAdjusted;

/// One simulated year. Row 0 is the present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    // Timing
    pub year_index: u32,
    pub year: i32,
    pub age: Option<i32>,

    // Balances
    pub net_worth: f64,
    /// Net worth in today's dollars
    pub real_net_worth: f64,
    pub interest: f64,
    pub cumulative_interest: f64,
    pub cumulative_contributions: f64,

    // Safe withdrawal output
    pub swr_annual: f64,
    pub swr_monthly: f64,
    pub swr_weekly: f64,
    pub swr_daily: f64,

    // Spending and savings
    pub monthly_spend: f64,
    pub annual_spend: f64,
    pub annual_savings: f64,
    /// Gross income for the year, 0 without income detail
    pub gross_income: f64,
    pub total_tax: f64,

    // FI status
    pub fi_target: f64,
    /// Net worth as a percentage of `fi_target`
    pub fi_progress: f64,
    pub coast_fi_year: Option<i32>,
    pub coast_fi_age: Option<i32>,
    pub is_fi_year: bool,
    pub is_crossover: bool,
    pub swr_covers_spend: bool,
}

impl ProjectionRow {
    /// Create a row with zeroed amounts
    pub fn new(year_index: u32, year: i32) -> Self {
        Self {
            year_index,
            year,
            age: None,
            net_worth: 0.0,
            real_net_worth: 0.0,
            interest: 0.0,
            cumulative_interest: 0.0,
            cumulative_contributions: 0.0,
            swr_annual: 0.0,
            swr_monthly: 0.0,
            swr_weekly: 0.0,
            swr_daily: 0.0,
            monthly_spend: 0.0,
            annual_spend: 0.0,
            annual_savings: 0.0,
            gross_income: 0.0,
            total_tax: 0.0,
            fi_target: 0.0,
            fi_progress: 0.0,
            coast_fi_year: None,
            coast_fi_age: None,
            is_fi_year: false,
            is_crossover: false,
            swr_covers_spend: false,
        }
    }

    /// Net worth in both dollar bases
    pub fn net_worth_adjusted(&self) -> InflationAdjusted {
        InflationAdjusted {
            nominal: self.net_worth,
            real: self.real_net_worth,
        }
    }

    pub fn set_net_worth(&mut self, worth: InflationAdjusted) {
        self.net_worth = worth.nominal;
        self.real_net_worth = worth.real;
    }
}

/// One simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjectionRow {
    /// 1-indexed month of the projection
    pub month_index: u32,
    /// 0-indexed year of the projection
    pub year_index: u32,
    /// Month within the projection year (1-12)
    pub month_of_year: u32,

    pub net_worth: f64,
    pub interest: f64,
    pub contribution: f64,
    pub cumulative_interest: f64,
    pub cumulative_contributions: f64,

    pub monthly_spend: f64,
    pub swr_monthly: f64,
    pub fi_target: f64,
    pub fi_progress: f64,
    pub is_fi_month: bool,
    pub is_crossover: bool,
}

impl MonthlyProjectionRow {
    pub fn new(month_index: u32) -> Self {
        Self {
            month_index,
            year_index: (month_index.saturating_sub(1)) / 12,
            month_of_year: (month_index.saturating_sub(1)) % 12 + 1,
            net_worth: 0.0,
            interest: 0.0,
            contribution: 0.0,
            cumulative_interest: 0.0,
            cumulative_contributions: 0.0,
            monthly_spend: 0.0,
            swr_monthly: 0.0,
            fi_target: 0.0,
            fi_progress: 0.0,
            is_fi_month: false,
            is_crossover: false,
        }
    }
}

/// Monthly rows folded into one year: flows summed, stocks at period end
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct YearlySummaryRow {
    pub year_index: u32,
    /// Months present in this year (12 except possibly the last)
    pub months: u32,

    // Flows
    pub interest: f64,
    pub contributions: f64,
    pub spending: f64,

    // Stocks
    pub ending_net_worth: f64,
    pub cumulative_interest: f64,
    pub cumulative_contributions: f64,
    pub fi_target: f64,
    pub fi_progress: f64,

    /// Whether FI or crossover was first reached during the year
    pub reached_fi: bool,
    pub reached_crossover: bool,
}
