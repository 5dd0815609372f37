//! Financial-independence arithmetic shared by the projection and milestone code

use serde::{Deserialize, Serialize};

use crate::assumptions::{pct, ScenarioAssumptions};
use crate::spending::monthly_budget;

use super::rows::ProjectionRow;

/// Longest forward search for a coast-FI point, in periods
pub const COAST_FI_HORIZON: u32 = 100;

/// Net worth at which the safe withdrawal covers `monthly_spend`.
/// Zero when spending or the withdrawal rate is not positive.
pub fn calculate_fi_target(monthly_spend: f64, swr: f64) -> f64 {
    fi_target_for_annual(monthly_spend * 12.0, swr)
}

pub(crate) fn fi_target_for_annual(annual_spend: f64, swr: f64) -> f64 {
    if annual_spend <= 0.0 || swr <= 0.0 {
        return 0.0;
    }
    annual_spend / pct(swr)
}

/// Net worth as a percentage of the FI target
pub fn calculate_fi_progress(net_worth: f64, monthly_spend: f64, swr: f64) -> f64 {
    progress_toward(net_worth, calculate_fi_target(monthly_spend, swr))
}

pub(crate) fn progress_toward(net_worth: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    net_worth / target * 100.0
}

/// Safe-withdrawal output at four cadences
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SwrAmounts {
    pub annual: f64,
    pub monthly: f64,
    pub weekly: f64,
    pub daily: f64,
}

impl SwrAmounts {
    pub fn new(net_worth: f64, swr: f64) -> Self {
        let annual = if swr > 0.0 { net_worth * pct(swr) } else { 0.0 };
        Self {
            annual,
            monthly: annual / 12.0,
            weekly: annual / 52.0,
            daily: annual / 365.0,
        }
    }
}

/// Result of compounding a principal with level annual contributions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FutureValue {
    pub total: f64,
    pub contributions: f64,
    pub interest: f64,
}

/// Grow `principal` for `years` at `rate` percent, adding
/// `annual_contribution` at the end of each year.
pub fn calculate_future_value(principal: f64, rate: f64, years: u32, annual_contribution: f64) -> FutureValue {
    let r = pct(rate);
    let growth = (1.0 + r).powi(years as i32);
    let annuity = if r == 0.0 {
        annual_contribution * years as f64
    } else {
        annual_contribution * (growth - 1.0) / r
    };
    let total = principal * growth + annuity;
    let contributions = principal + annual_contribution * years as f64;
    FutureValue {
        total,
        contributions,
        interest: total - contributions,
    }
}

/// Index of the first row whose withdrawal output covers spending
pub fn years_to_fi(rows: &[ProjectionRow]) -> Option<u32> {
    rows.iter().find(|r| r.swr_covers_spend).map(|r| r.year_index)
}

/// Periods until `net_worth`, growing with no further contributions, covers
/// the FI target implied by spending at that future point. Spending is
/// re-derived each period from the grown net worth. `None` when the search
/// runs out or the FI target is degenerate.
pub fn coast_fi_search(net_worth: f64, assumptions: &ScenarioAssumptions, years_from_now: u32) -> Option<u32> {
    if assumptions.swr <= 0.0 {
        return None;
    }
    let growth = 1.0 + assumptions.return_decimal();
    let mut projected = net_worth;

    for k in 0..COAST_FI_HORIZON {
        let spend = monthly_budget(projected, assumptions, (years_from_now + k) as f64);
        let target = calculate_fi_target(spend, assumptions.swr);
        if target <= 0.0 {
            return None;
        }
        if projected >= target {
            return Some(k);
        }
        projected *= growth;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_fi_target_identity() {
        assert_eq!(calculate_fi_target(4_000.0, 4.0), 1_200_000.0);
    }

    #[test]
    fn test_fi_target_disabled() {
        assert_eq!(calculate_fi_target(4_000.0, 0.0), 0.0);
        assert_eq!(calculate_fi_target(4_000.0, -1.0), 0.0);
        assert_eq!(calculate_fi_target(0.0, 4.0), 0.0);
        assert_eq!(calculate_fi_progress(1_000.0, 4_000.0, 0.0), 0.0);
    }

    #[test]
    fn test_progress_scenario() {
        // 500k against a 600k target
        assert_relative_eq!(calculate_fi_progress(500_000.0, 2_000.0, 4.0), 83.333_333, epsilon = 1e-4);
    }

    #[test]
    fn test_future_value_identity() {
        let fv = calculate_future_value(100_000.0, 7.0, 10, 0.0);
        assert!((fv.total - 196_715.14).abs() < 1.0);
        assert_eq!(fv.contributions, 100_000.0);
        assert_relative_eq!(fv.interest, fv.total - 100_000.0);
    }

    #[test]
    fn test_future_value_with_contributions() {
        let fv = calculate_future_value(0.0, 0.0, 5, 10_000.0);
        assert_eq!(fv.total, 50_000.0);
        assert_eq!(fv.interest, 0.0);

        let fv = calculate_future_value(0.0, 10.0, 2, 1_000.0);
        assert_relative_eq!(fv.total, 2_100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_swr_amounts() {
        let swr = SwrAmounts::new(1_200_000.0, 4.0);
        assert_relative_eq!(swr.annual, 48_000.0, epsilon = 1e-9);
        assert_relative_eq!(swr.monthly, 4_000.0, epsilon = 1e-9);
        assert_relative_eq!(swr.weekly, 48_000.0 / 52.0, epsilon = 1e-9);
        assert_relative_eq!(swr.daily, 48_000.0 / 365.0, epsilon = 1e-9);
    }

    #[test]
    fn test_coast_fi_search() {
        let plan = ScenarioAssumptions {
            inflation_rate: 0.0,
            ..ScenarioAssumptions::default_plan()
        };
        // Already at the 1.2M target
        assert_eq!(coast_fi_search(1_200_000.0, &plan, 0), Some(0));
        // 600k doubles in a little over ten years at 7%
        assert_eq!(coast_fi_search(600_000.0, &plan, 0), Some(11));
        // Nothing to compound
        assert_eq!(coast_fi_search(0.0, &plan, 0), None);

        let no_swr = ScenarioAssumptions { swr: 0.0, ..plan };
        assert_eq!(coast_fi_search(10_000_000.0, &no_swr, 0), None);
    }

    #[test]
    fn test_coast_fi_search_wealth_linked_spending() {
        let level = ScenarioAssumptions {
            inflation_rate: 0.0,
            ..ScenarioAssumptions::default_plan()
        };
        let linked = ScenarioAssumptions { spending_growth_rate: 1.0, ..level.clone() };

        // Target becomes 1.2M + 0.25 × projected, so 1.6M must be reached
        let level_k = coast_fi_search(600_000.0, &level, 0);
        let linked_k = coast_fi_search(600_000.0, &linked, 0);
        assert_eq!(level_k, Some(11));
        assert_eq!(linked_k, Some(15));

        // Spending share equal to the SWR keeps the target ahead forever
        let runaway = ScenarioAssumptions { spending_growth_rate: 4.0, ..level };
        assert_eq!(coast_fi_search(600_000.0, &runaway, 0), None);
    }

    proptest! {
        #[test]
        fn fi_target_decreases_in_swr(spend in 1.0f64..50_000.0, swr in 0.5f64..10.0, bump in 0.01f64..5.0) {
            prop_assert!(calculate_fi_target(spend, swr + bump) < calculate_fi_target(spend, swr));
        }

        #[test]
        fn fi_target_increases_in_spend(spend in 1.0f64..50_000.0, swr in 0.5f64..10.0, bump in 1.0f64..5_000.0) {
            prop_assert!(calculate_fi_target(spend + bump, swr) > calculate_fi_target(spend, swr));
        }
    }
}
