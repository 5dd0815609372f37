//! Level-based spending policy
//!
//! The allowed budget is an inflation-adjusted floor plus a slice of current
//! net worth:
//!
//! ```text
//! monthly = base × (1 + inflation/100)^years + max(0, net_worth) × growth/100 / 12
//! ```
//!
//! Both terms are nominal dollars for the year `years` from now. Callers
//! pass the net worth at the *start* of the period being budgeted. Negative
//! net worth contributes nothing, so the budget never falls below the floor.

use crate::assumptions::ScenarioAssumptions;
use crate::inflation::inflation_multiplier;

/// Monthly budget for the period `years_from_now` (fractional years allowed)
pub fn monthly_budget(net_worth: f64, assumptions: &ScenarioAssumptions, years_from_now: f64) -> f64 {
    let floor = assumptions.base_monthly_budget * inflation_multiplier(years_from_now, assumptions.inflation_rate);
    floor + wealth_linked_monthly(net_worth, assumptions)
}

/// Annual budget, twelve times the monthly figure
pub fn annual_budget(net_worth: f64, assumptions: &ScenarioAssumptions, years_from_now: f64) -> f64 {
    monthly_budget(net_worth, assumptions, years_from_now) * 12.0
}

/// Portion of the monthly budget driven by net worth. Debt adds nothing.
pub fn wealth_linked_monthly(net_worth: f64, assumptions: &ScenarioAssumptions) -> f64 {
    let rate = assumptions.spending_growth_decimal();
    if rate <= 0.0 || net_worth <= 0.0 {
        return 0.0;
    }
    net_worth * rate / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn plan(spending_growth_rate: f64) -> ScenarioAssumptions {
        ScenarioAssumptions {
            base_monthly_budget: 3_000.0,
            inflation_rate: 3.0,
            spending_growth_rate,
            ..ScenarioAssumptions::default_plan()
        }
    }

    #[test]
    fn test_floor_only_today() {
        assert_eq!(monthly_budget(1_000_000.0, &plan(0.0), 0.0), 3_000.0);
    }

    #[test]
    fn test_floor_inflates() {
        assert_relative_eq!(monthly_budget(0.0, &plan(0.0), 2.0), 3_000.0 * 1.03 * 1.03, epsilon = 1e-9);
    }

    #[test]
    fn test_wealth_linked_component() {
        // 1% of 1.2M is 12,000 a year, 1,000 a month
        assert_relative_eq!(monthly_budget(1_200_000.0, &plan(1.0), 0.0), 4_000.0, epsilon = 1e-9);
        assert_relative_eq!(annual_budget(1_200_000.0, &plan(1.0), 0.0), 48_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_net_worth_uses_floor() {
        assert_eq!(monthly_budget(-250_000.0, &plan(2.0), 0.0), 3_000.0);
    }

    #[test]
    fn test_fractional_years() {
        let half = monthly_budget(0.0, &plan(0.0), 0.5);
        assert!(half > 3_000.0 && half < 3_090.0);
    }

    proptest! {
        #[test]
        fn budget_never_below_floor(
            net_worth in -5.0e6f64..5.0e6,
            growth in 0.0f64..10.0,
            years in 0.0f64..40.0,
        ) {
            let settings = plan(growth);
            let floor = monthly_budget(0.0, &settings, years);
            prop_assert!(monthly_budget(net_worth, &settings, years) >= floor);
            prop_assert!(wealth_linked_monthly(net_worth, &settings) >= 0.0);
        }
    }
}
