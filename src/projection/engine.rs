//! Core projection engine for yearly net-worth projections

use crate::assumptions::ScenarioAssumptions;
use crate::history::NetWorthHistory;
use crate::inflation::InflationAdjusted;
use crate::realtime::{Clock, SystemClock};
use crate::spending::monthly_budget;
use crate::tax::calculate_taxes;

use super::fi::{coast_fi_search, fi_target_for_annual, progress_toward, SwrAmounts};
use super::rows::ProjectionRow;
use super::state::ProjectionState;

/// Years simulated after the present row (61 rows in total)
pub const DEFAULT_PROJECTION_YEARS: u32 = 60;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionOptions {
    /// Calendar year of row 0
    pub start_year: i32,

    /// Used for ages on rows and coast-FI
    pub birth_year: Option<i32>,

    /// Number of yearly transitions after row 0
    pub years: u32,

    /// Overrides the latest history sample as the starting net worth
    pub starting_net_worth: Option<f64>,
}

impl ProjectionOptions {
    pub fn new(start_year: i32) -> Self {
        Self {
            start_year,
            birth_year: None,
            years: DEFAULT_PROJECTION_YEARS,
            starting_net_worth: None,
        }
    }

    /// Start in the clock's current year
    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::new(clock.current_year())
    }

    pub fn with_birth_year(mut self, birth_year: i32) -> Self {
        self.birth_year = Some(birth_year);
        self
    }

    pub fn with_starting_net_worth(mut self, net_worth: f64) -> Self {
        self.starting_net_worth = Some(net_worth);
        self
    }
}

impl Default for ProjectionOptions {
    /// Starts in the wall-clock year; use [`ProjectionOptions::new`] for a
    /// pinned start.
    fn default() -> Self {
        Self::from_clock(&SystemClock)
    }
}

/// Income, tax and savings for one year
#[derive(Debug, Clone, Copy, Default)]
struct YearFlow {
    savings: f64,
    gross_income: f64,
    total_tax: f64,
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: ScenarioAssumptions,
    options: ProjectionOptions,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and options
    pub fn new(assumptions: ScenarioAssumptions, options: ProjectionOptions) -> Self {
        Self { assumptions, options }
    }

    pub fn assumptions(&self) -> &ScenarioAssumptions {
        &self.assumptions
    }

    pub fn options(&self) -> &ProjectionOptions {
        &self.options
    }

    /// Explicit override, else the latest sample, else zero
    pub fn starting_net_worth(&self, history: &NetWorthHistory) -> f64 {
        self.options
            .starting_net_worth
            .or_else(|| history.latest().map(|s| s.amount))
            .unwrap_or(0.0)
    }

    /// Run the yearly projection: row 0 is the present, then one row per year
    pub fn project(&self, history: &NetWorthHistory) -> Vec<ProjectionRow> {
        let start = self.starting_net_worth(history);
        let base_annual_spend = monthly_budget(start, &self.assumptions, 0.0) * 12.0;
        let mut state = ProjectionState::new(start, base_annual_spend);

        let mut rows = Vec::with_capacity(self.options.years as usize + 1);
        rows.push(self.present_row(&mut state));

        for _year in 1..=self.options.years {
            let row = self.calculate_year(&mut state);
            rows.push(row);
        }

        log::debug!(
            "projected '{}' from {:.2} over {} years; FI year {:?}",
            self.assumptions.name,
            start,
            self.options.years,
            rows.iter().find(|r| r.is_fi_year).map(|r| r.year),
        );
        rows
    }

    /// Row 0: today's figures, no transition applied
    fn present_row(&self, state: &mut ProjectionState) -> ProjectionRow {
        let monthly_spend = monthly_budget(state.net_worth, &self.assumptions, 0.0);
        let flow = self.year_flow(0, monthly_spend * 12.0, state.base_annual_spend);
        self.finish_row(state, monthly_spend, flow, 0.0)
    }

    /// Advance one year and record it
    fn calculate_year(&self, state: &mut ProjectionState) -> ProjectionRow {
        let year_index = state.period + 1;

        // Spending is set by net worth at the start of the year
        let monthly_spend = monthly_budget(state.net_worth, &self.assumptions, year_index as f64);
        let flow = self.year_flow(year_index, monthly_spend * 12.0, state.base_annual_spend);
        let interest = state.net_worth * self.assumptions.return_decimal();

        state.advance(interest, flow.savings);
        self.finish_row(state, monthly_spend, flow, interest)
    }

    /// Savings for a year: taxed net income less spending when income detail
    /// is present, otherwise the grown fixed contribution less spending growth
    fn year_flow(&self, year_index: u32, annual_spend: f64, base_annual_spend: f64) -> YearFlow {
        let a = &self.assumptions;
        match a.taxable_income() {
            Some(income) => {
                let gross = income.gross_income_in(year_index);
                let taxes = calculate_taxes(gross, income.filing_status, &income.state_code, &income.pre_tax);
                YearFlow {
                    savings: taxes.net_income - annual_spend,
                    gross_income: gross,
                    total_tax: taxes.total_tax,
                }
            }
            None => YearFlow {
                savings: a.yearly_contribution * a.contribution_multiplier(year_index)
                    - (annual_spend - base_annual_spend),
                ..Default::default()
            },
        }
    }

    fn finish_row(&self, state: &mut ProjectionState, monthly_spend: f64, flow: YearFlow, interest: f64) -> ProjectionRow {
        let a = &self.assumptions;
        let year_index = state.period;
        let mut row = ProjectionRow::new(year_index, self.options.start_year + year_index as i32);
        row.age = self.options.birth_year.map(|b| row.year - b);

        let net_worth = state.net_worth;
        row.set_net_worth(InflationAdjusted::from_nominal(net_worth, year_index as f64, a.inflation_rate));
        row.interest = interest;
        row.cumulative_interest = state.cumulative_interest;
        row.cumulative_contributions = state.cumulative_contributions;

        let swr = SwrAmounts::new(net_worth, a.swr);
        row.swr_annual = swr.annual;
        row.swr_monthly = swr.monthly;
        row.swr_weekly = swr.weekly;
        row.swr_daily = swr.daily;

        row.monthly_spend = monthly_spend;
        row.annual_spend = monthly_spend * 12.0;
        row.annual_savings = flow.savings;
        row.gross_income = flow.gross_income;
        row.total_tax = flow.total_tax;

        row.fi_target = fi_target_for_annual(row.annual_spend, a.swr);
        row.fi_progress = progress_toward(net_worth, row.fi_target);
        row.swr_covers_spend = row.fi_target > 0.0 && swr.monthly >= monthly_spend;
        row.is_fi_year = state.mark_fi(row.swr_covers_spend);
        row.is_crossover = state.mark_crossover();

        row.coast_fi_year = coast_fi_search(net_worth, a, year_index).map(|k| row.year + k as i32);
        row.coast_fi_age = match (row.coast_fi_year, self.options.birth_year) {
            (Some(year), Some(birth)) => Some(year - birth),
            _ => None,
        };

        row
    }
}

/// Yearly projection for one scenario
pub fn project_yearly(
    settings: &ScenarioAssumptions,
    history: &NetWorthHistory,
    options: &ProjectionOptions,
) -> Vec<ProjectionRow> {
    ProjectionEngine::new(settings.clone(), options.clone()).project(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::IncomeAssumptions;
    use crate::history::NetWorthSample;
    use crate::tax::{FilingStatus, PreTaxContributions};
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn flat_plan() -> ScenarioAssumptions {
        ScenarioAssumptions {
            return_rate: 7.0,
            swr: 4.0,
            inflation_rate: 0.0,
            base_monthly_budget: 4_000.0,
            spending_growth_rate: 0.0,
            yearly_contribution: 20_000.0,
            ..ScenarioAssumptions::default_plan()
        }
    }

    fn options(start: f64) -> ProjectionOptions {
        ProjectionOptions::new(2025).with_starting_net_worth(start)
    }

    #[test]
    fn test_projection_runs() {
        let rows = project_yearly(&flat_plan(), &NetWorthHistory::empty(), &options(100_000.0));
        assert_eq!(rows.len(), 61);
        assert_eq!(rows[0].year_index, 0);
        assert_eq!(rows[0].year, 2025);
        assert_eq!(rows[60].year_index, 60);
        assert_eq!(rows[60].year, 2085);
        assert!(rows.windows(2).all(|w| w[1].year_index == w[0].year_index + 1));
    }

    #[test]
    fn test_present_row_has_no_transition() {
        let rows = project_yearly(&flat_plan(), &NetWorthHistory::empty(), &options(100_000.0));
        let row = &rows[0];
        assert_eq!(row.net_worth, 100_000.0);
        assert_eq!(row.real_net_worth, row.net_worth);
        assert_eq!(row.interest, 0.0);
        assert_eq!(row.cumulative_interest, 0.0);
        assert_eq!(row.cumulative_contributions, 0.0);
        assert_eq!(row.annual_savings, 20_000.0);
        assert!(!row.is_crossover);
    }

    #[test]
    fn test_simple_savings_rule() {
        let rows = project_yearly(&flat_plan(), &NetWorthHistory::empty(), &options(100_000.0));
        assert_relative_eq!(rows[1].interest, 7_000.0, epsilon = 1e-9);
        assert_relative_eq!(rows[1].net_worth, 127_000.0, epsilon = 1e-9);
        assert_relative_eq!(rows[2].net_worth, 127_000.0 * 1.07 + 20_000.0, epsilon = 1e-9);
        assert_relative_eq!(rows[2].cumulative_contributions, 40_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_spending_growth_reduces_simple_savings() {
        let plan = ScenarioAssumptions { inflation_rate: 3.0, ..flat_plan() };
        let rows = project_yearly(&plan, &NetWorthHistory::empty(), &options(0.0));
        // Year 1 spend is 3% above base: 48,000 × 0.03 less saved
        assert_relative_eq!(rows[1].annual_savings, 20_000.0 - 1_440.0, epsilon = 1e-6);
        let worth = rows[1].net_worth_adjusted();
        assert_eq!(worth.nominal, rows[1].net_worth);
        assert_relative_eq!(worth.real, worth.nominal / 1.03, epsilon = 1e-6);
    }

    #[test]
    fn test_spending_uses_start_of_year_net_worth() {
        let plan = ScenarioAssumptions { spending_growth_rate: 1.0, inflation_rate: 2.0, ..flat_plan() };
        let rows = project_yearly(&plan, &NetWorthHistory::empty(), &options(400_000.0));

        assert_relative_eq!(rows[0].monthly_spend, 4_000.0 + 400_000.0 * 0.01 / 12.0, epsilon = 1e-9);
        for t in 1..=10 {
            let floor = 4_000.0 * 1.02f64.powi(t as i32);
            let expected = floor + rows[t - 1].net_worth * 0.01 / 12.0;
            assert_relative_eq!(rows[t].monthly_spend, expected, epsilon = 1e-6);
            assert_relative_eq!(rows[t].annual_spend, expected * 12.0, epsilon = 1e-6);
            // Net worth moves every year, so end-of-year spending would differ
            assert!((rows[t].net_worth - rows[t - 1].net_worth).abs() > 1_000.0);
            assert_relative_eq!(
                rows[t].annual_savings,
                20_000.0 - (rows[t].annual_spend - rows[0].annual_spend),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_income_savings_use_net_income() {
        let plan = ScenarioAssumptions {
            income: Some(IncomeAssumptions {
                gross_income: 120_000.0,
                income_growth_rate: 3.0,
                filing_status: FilingStatus::Single,
                state_code: "CA".to_string(),
                pre_tax: PreTaxContributions { traditional_401k: 23_000.0, ..Default::default() },
            }),
            ..flat_plan()
        };
        let rows = project_yearly(&plan, &NetWorthHistory::empty(), &options(50_000.0));

        let gross = 120_000.0 * 1.03;
        let taxes = calculate_taxes(gross, FilingStatus::Single, "CA", &plan.income.as_ref().unwrap().pre_tax);
        assert_relative_eq!(rows[1].gross_income, gross, epsilon = 1e-9);
        assert_relative_eq!(rows[1].total_tax, taxes.total_tax, epsilon = 1e-9);
        assert_relative_eq!(rows[1].annual_savings, taxes.net_income - 48_000.0, epsilon = 1e-9);
        assert_relative_eq!(rows[1].net_worth, 50_000.0 * 1.07 + taxes.net_income - 48_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_gross_income_falls_back_to_contribution() {
        let plan = ScenarioAssumptions {
            income: Some(IncomeAssumptions::default()),
            ..flat_plan()
        };
        let rows = project_yearly(&plan, &NetWorthHistory::empty(), &options(0.0));
        assert_eq!(rows[1].annual_savings, 20_000.0);
        assert_eq!(rows[1].total_tax, 0.0);
    }

    #[test]
    fn test_drawdown_when_spending_exceeds_income() {
        let plan = ScenarioAssumptions { yearly_contribution: 0.0, return_rate: 0.0, ..flat_plan() };
        let plan = ScenarioAssumptions {
            income: Some(IncomeAssumptions { gross_income: 30_000.0, ..Default::default() }),
            ..plan
        };
        let rows = project_yearly(&plan, &NetWorthHistory::empty(), &options(100_000.0));
        assert!(rows[1].annual_savings < 0.0);
        assert!(rows[1].net_worth < 100_000.0);
    }

    #[test]
    fn test_starting_net_worth_sources() {
        let plan = flat_plan();
        let history = NetWorthHistory::new(vec![
            NetWorthSample::new(80_000.0, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            NetWorthSample::new(90_000.0, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
        ]);

        let latest = project_yearly(&plan, &history, &ProjectionOptions::new(2025));
        assert_eq!(latest[0].net_worth, 90_000.0);

        let overridden = project_yearly(&plan, &history, &options(1.0));
        assert_eq!(overridden[0].net_worth, 1.0);

        let empty = project_yearly(&plan, &NetWorthHistory::empty(), &ProjectionOptions::new(2025));
        assert_eq!(empty[0].net_worth, 0.0);
    }

    #[test]
    fn test_progress_scenario() {
        let plan = ScenarioAssumptions { base_monthly_budget: 2_000.0, ..flat_plan() };
        let rows = project_yearly(&plan, &NetWorthHistory::empty(), &options(500_000.0));
        assert_eq!(rows[0].fi_target, 600_000.0);
        assert_relative_eq!(rows[0].fi_progress, 83.333_333, epsilon = 1e-4);
    }

    #[test]
    fn test_fi_year_fires_once() {
        let rows = project_yearly(&flat_plan(), &NetWorthHistory::empty(), &options(100_000.0));
        let fi_rows: Vec<_> = rows.iter().filter(|r| r.is_fi_year).collect();
        assert_eq!(fi_rows.len(), 1);
        let first_covering = rows.iter().find(|r| r.swr_covers_spend).unwrap();
        assert_eq!(fi_rows[0].year_index, first_covering.year_index);
        assert!(fi_rows[0].net_worth >= 1_200_000.0);
    }

    #[test]
    fn test_already_fi_fires_at_present_only() {
        let rows = project_yearly(&flat_plan(), &NetWorthHistory::empty(), &options(2_000_000.0));
        assert!(rows[0].is_fi_year);
        assert!(rows[1..].iter().all(|r| !r.is_fi_year));
        assert!(rows.iter().all(|r| r.swr_covers_spend));
    }

    #[test]
    fn test_swr_disabled() {
        let plan = ScenarioAssumptions { swr: 0.0, ..flat_plan() };
        let rows = project_yearly(&plan, &NetWorthHistory::empty(), &options(5_000_000.0));
        assert!(rows.iter().all(|r| r.fi_target == 0.0 && r.fi_progress == 0.0));
        assert!(rows.iter().all(|r| !r.is_fi_year && r.coast_fi_year.is_none()));
    }

    #[test]
    fn test_coast_fi_year_and_age() {
        let plan = ScenarioAssumptions { yearly_contribution: 0.0, ..flat_plan() };
        let opts = options(600_000.0).with_birth_year(1990);
        let rows = project_yearly(&plan, &NetWorthHistory::empty(), &opts);
        assert_eq!(rows[0].age, Some(35));
        assert_eq!(rows[0].coast_fi_year, Some(2036));
        assert_eq!(rows[0].coast_fi_age, Some(46));
        // With no contributions the coast point does not move
        assert_eq!(rows[3].coast_fi_year, Some(2036));
    }

    #[test]
    fn test_idempotent() {
        let plan = ScenarioAssumptions { spending_growth_rate: 1.0, inflation_rate: 2.5, ..flat_plan() };
        let a = project_yearly(&plan, &NetWorthHistory::empty(), &options(250_000.0));
        let b = project_yearly(&plan, &NetWorthHistory::empty(), &options(250_000.0));
        assert_eq!(a, b);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn crossover_fires_exactly_once(
            start in 0.0f64..500_000.0,
            contribution in 1_000.0f64..100_000.0,
            rate in 1.0f64..12.0,
        ) {
            let plan = ScenarioAssumptions {
                return_rate: rate,
                yearly_contribution: contribution,
                ..flat_plan()
            };
            let mut opts = options(start);
            opts.years = 200;
            let rows = project_yearly(&plan, &NetWorthHistory::empty(), &opts);
            let count = rows.iter().filter(|r| r.is_crossover).count();
            prop_assert_eq!(count, 1);
        }
    }
}
