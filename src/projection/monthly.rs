//! Month-by-month projection and yearly aggregation

use crate::assumptions::ScenarioAssumptions;
use crate::spending::monthly_budget;
use crate::tax::calculate_taxes;

use super::fi::{calculate_fi_target, progress_toward, SwrAmounts};
use super::rows::{MonthlyProjectionRow, YearlySummaryRow};
use super::state::ProjectionState;

/// Default monthly horizon (ten years)
pub const DEFAULT_PROJECTION_MONTHS: u32 = 120;

/// Monthly rate compounding to the annual rate: `(1 + r)^(1/12) - 1`
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    (1.0 + annual_rate_pct / 100.0).powf(1.0 / 12.0) - 1.0
}

/// Project `month_count` months from `starting_net_worth`.
///
/// `contribution_override` is a fixed monthly contribution that replaces the
/// scenario's income or yearly contribution; spending growth above the
/// starting budget is still taken out of it.
pub fn project_monthly(
    starting_net_worth: f64,
    settings: &ScenarioAssumptions,
    month_count: u32,
    contribution_override: Option<f64>,
) -> Vec<MonthlyProjectionRow> {
    let rate = monthly_rate(settings.return_rate);
    let base_monthly_spend = monthly_budget(starting_net_worth, settings, 0.0);
    let mut state = ProjectionState::new(starting_net_worth, base_monthly_spend * 12.0);
    let mut rows = Vec::with_capacity(month_count as usize);

    // Net income only changes once a year
    let mut cached_income: Option<(u32, f64)> = None;

    for month in 1..=month_count {
        let mut row = MonthlyProjectionRow::new(month);
        let years_elapsed = (month - 1) as f64 / 12.0;

        let monthly_spend = monthly_budget(state.net_worth, settings, years_elapsed);
        let spend_growth = monthly_spend - base_monthly_spend;

        let contribution = match (contribution_override, settings.taxable_income()) {
            (Some(fixed), _) => fixed - spend_growth,
            (None, Some(income)) => {
                let monthly_net = match cached_income {
                    Some((year, net)) if year == row.year_index => net,
                    _ => {
                        let gross = income.gross_income_in(row.year_index);
                        let net = calculate_taxes(gross, income.filing_status, &income.state_code, &income.pre_tax)
                            .monthly_net_income();
                        cached_income = Some((row.year_index, net));
                        net
                    }
                };
                monthly_net - monthly_spend
            }
            (None, None) => {
                settings.yearly_contribution * settings.contribution_multiplier(row.year_index) / 12.0 - spend_growth
            }
        };

        let interest = state.net_worth * rate;
        state.advance(interest, contribution);

        row.net_worth = state.net_worth;
        row.interest = interest;
        row.contribution = contribution;
        row.cumulative_interest = state.cumulative_interest;
        row.cumulative_contributions = state.cumulative_contributions;

        row.monthly_spend = monthly_spend;
        row.swr_monthly = SwrAmounts::new(state.net_worth, settings.swr).monthly;
        row.fi_target = calculate_fi_target(monthly_spend, settings.swr);
        row.fi_progress = progress_toward(state.net_worth, row.fi_target);
        row.is_fi_month = state.mark_fi(row.fi_target > 0.0 && row.swr_monthly >= monthly_spend);
        row.is_crossover = state.mark_crossover();

        rows.push(row);
    }

    log::debug!(
        "projected '{}' monthly for {} months; ending net worth {:.2}",
        settings.name,
        month_count,
        state.net_worth
    );
    rows
}

/// Fold monthly rows into yearly summaries keyed by year index
pub fn aggregate_yearly(rows: &[MonthlyProjectionRow]) -> Vec<YearlySummaryRow> {
    let mut summaries: Vec<YearlySummaryRow> = Vec::new();

    for row in rows {
        let needs_new = summaries.last().map(|s| s.year_index != row.year_index).unwrap_or(true);
        if needs_new {
            summaries.push(YearlySummaryRow {
                year_index: row.year_index,
                ..Default::default()
            });
        }
        let Some(summary) = summaries.last_mut() else {
            continue;
        };

        summary.months += 1;
        summary.interest += row.interest;
        summary.contributions += row.contribution;
        summary.spending += row.monthly_spend;

        summary.ending_net_worth = row.net_worth;
        summary.cumulative_interest = row.cumulative_interest;
        summary.cumulative_contributions = row.cumulative_contributions;
        summary.fi_target = row.fi_target;
        summary.fi_progress = row.fi_progress;

        summary.reached_fi |= row.is_fi_month;
        summary.reached_crossover |= row.is_crossover;
    }

    summaries
}
