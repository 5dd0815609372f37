//! Milestone detection over a completed projection
//!
//! Each definition yields a per-row net-worth threshold; the milestone is
//! reached at the first row meeting it. FI-linked thresholds move with
//! spending, so a later row can fall back below a threshold that an earlier
//! row met. The first row still counts.

use serde::Serialize;

use crate::assumptions::ScenarioAssumptions;
use crate::projection::{calculate_fi_target, ProjectionRow};

use super::catalog::{milestone_catalog, MilestoneDefinition, MilestoneRule};

/// Outcome of one milestone against a projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneResult {
    pub definition: &'static MilestoneDefinition,
    pub achieved_year: Option<i32>,
    pub achieved_age: Option<i32>,
    /// Index into the projection rows
    pub row_index: Option<usize>,
    /// Reached at or before the present row
    pub is_achieved: bool,
    pub net_worth_at_achievement: Option<f64>,
}

impl MilestoneResult {
    fn unreached(definition: &'static MilestoneDefinition) -> Self {
        Self {
            definition,
            achieved_year: None,
            achieved_age: None,
            row_index: None,
            is_achieved: false,
            net_worth_at_achievement: None,
        }
    }

    pub fn is_reached(&self) -> bool {
        self.row_index.is_some()
    }
}

/// Current standing among the percentage milestones
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneProgress {
    /// Highest percentage milestone already achieved
    pub current: Option<MilestoneResult>,
    /// Lowest percentage milestone not yet achieved
    pub next: Option<MilestoneResult>,
    /// Progress from `current` to `next`, 0-100
    pub progress_to_next: f64,
}

/// Score every catalog milestone against `rows`
pub fn detect_milestones(
    rows: &[ProjectionRow],
    settings: &ScenarioAssumptions,
    birth_year: Option<i32>,
) -> Vec<MilestoneResult> {
    milestone_catalog()
        .iter()
        .map(|definition| detect_one(definition, rows, settings, birth_year))
        .collect()
}

fn detect_one(
    definition: &'static MilestoneDefinition,
    rows: &[ProjectionRow],
    settings: &ScenarioAssumptions,
    birth_year: Option<i32>,
) -> MilestoneResult {
    let hit = rows
        .iter()
        .position(|row| row_meets(definition.rule, row, rows, settings, birth_year));

    let Some(index) = hit else {
        return MilestoneResult::unreached(definition);
    };
    let row = &rows[index];
    MilestoneResult {
        definition,
        achieved_year: Some(row.year),
        achieved_age: birth_year.map(|b| row.year - b),
        row_index: Some(index),
        is_achieved: index == 0,
        net_worth_at_achievement: Some(row.net_worth),
    }
}

fn row_meets(
    rule: MilestoneRule,
    row: &ProjectionRow,
    rows: &[ProjectionRow],
    settings: &ScenarioAssumptions,
    birth_year: Option<i32>,
) -> bool {
    match rule {
        MilestoneRule::Crossover => row.is_crossover,
        MilestoneRule::CoastFi { retirement_age } => match (row.coast_fi_year, birth_year) {
            (Some(year), Some(birth)) => year - birth <= retirement_age,
            (Some(_), None) => true,
            (None, _) => false,
        },
        _ => threshold(rule, row, rows, settings, birth_year)
            .map(|t| t > 0.0 && row.net_worth >= t)
            .unwrap_or(false),
    }
}

/// Net-worth threshold of `rule` at `row`; `None` when undefined there
fn threshold(
    rule: MilestoneRule,
    row: &ProjectionRow,
    rows: &[ProjectionRow],
    settings: &ScenarioAssumptions,
    birth_year: Option<i32>,
) -> Option<f64> {
    match rule {
        MilestoneRule::FiPercentage { percent } => Some(row.fi_target * percent / 100.0),
        MilestoneRule::SpendingMultiple { multiplier } => {
            Some(calculate_fi_target(row.monthly_spend * multiplier, settings.swr))
        }
        MilestoneRule::Runway { months, buffer } => Some(row.monthly_spend * months * buffer),
        MilestoneRule::NetWorth { amount } => Some(amount),
        MilestoneRule::ReturnsExceedSavings { multiple } => {
            let r = settings.return_decimal();
            if r <= 0.0 || row.annual_savings <= 0.0 {
                return None;
            }
            Some(row.annual_savings * multiple / r)
        }
        MilestoneRule::StressTest { haircut, retirement_age } => {
            let retirement_year = birth_year? + retirement_age;
            let years_left = retirement_year - row.year;
            if years_left < 0 || haircut >= 1.0 {
                return None;
            }
            let future_target = rows
                .iter()
                .find(|r| r.year == retirement_year)
                .or_else(|| rows.last())
                .map(|r| r.fi_target)?;
            let growth = (1.0 + settings.return_decimal()).powi(years_left);
            Some(future_target / ((1.0 - haircut) * growth))
        }
        MilestoneRule::Crossover | MilestoneRule::CoastFi { .. } => None,
    }
}

/// Pick current and next percentage milestones and interpolate between them
/// using the present row's FI progress
pub fn summarize_milestones(results: &[MilestoneResult], rows: &[ProjectionRow]) -> MilestoneProgress {
    let mut percentage: Vec<(f64, &MilestoneResult)> = results
        .iter()
        .filter_map(|r| r.definition.fi_percent().map(|p| (p, r)))
        .collect();
    percentage.sort_by(|a, b| a.0.total_cmp(&b.0));

    let current = percentage.iter().rev().find(|(_, r)| r.is_achieved).copied();
    let next = percentage.iter().find(|(_, r)| !r.is_achieved).copied();

    let progress_now = rows.first().map(|r| r.fi_progress).unwrap_or(0.0);
    let lower = current.map(|(p, _)| p).unwrap_or(0.0);
    let progress_to_next = match next {
        Some((upper, _)) if upper > lower => ((progress_now - lower) / (upper - lower) * 100.0).clamp(0.0, 100.0),
        Some(_) => 0.0,
        None => 100.0,
    };

    MilestoneProgress {
        current: current.map(|(_, r)| r.clone()),
        next: next.map(|(_, r)| r.clone()),
        progress_to_next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::NetWorthHistory;
    use crate::milestones::catalog::milestone;
    use crate::projection::{project_yearly, ProjectionOptions};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn plan() -> ScenarioAssumptions {
        ScenarioAssumptions {
            inflation_rate: 0.0,
            yearly_contribution: 30_000.0,
            ..ScenarioAssumptions::default_plan()
        }
    }

    fn project(plan: &ScenarioAssumptions, start: f64, birth_year: Option<i32>) -> Vec<ProjectionRow> {
        let mut options = ProjectionOptions::new(2025).with_starting_net_worth(start);
        options.birth_year = birth_year;
        project_yearly(plan, &NetWorthHistory::empty(), &options)
    }

    fn result<'a>(results: &'a [MilestoneResult], id: &str) -> &'a MilestoneResult {
        results.iter().find(|r| r.definition.id == id).unwrap()
    }

    #[test]
    fn test_every_definition_scored() {
        let rows = project(&plan(), 10_000.0, Some(1990));
        let results = detect_milestones(&rows, &plan(), Some(1990));
        assert_eq!(results.len(), milestone_catalog().len());
    }

    #[test]
    fn test_percentage_milestones_at_present() {
        // 500k of a 1.2M target is 41.7%
        let rows = project(&plan(), 500_000.0, None);
        let results = detect_milestones(&rows, &plan(), None);
        assert!(result(&results, "fi_25").is_achieved);
        assert_eq!(result(&results, "fi_25").achieved_year, Some(2025));
        assert!(!result(&results, "fi_50").is_achieved);
        assert!(result(&results, "fi_50").is_reached());
        assert!(result(&results, "first_100k").is_achieved);
        assert!(result(&results, "runway_2y").is_achieved);
    }

    #[test]
    fn test_flamingo_matches_half_fi() {
        let rows = project(&plan(), 50_000.0, None);
        let results = detect_milestones(&rows, &plan(), None);
        assert_eq!(result(&results, "flamingo_fi").row_index, result(&results, "fi_50").row_index);
    }

    #[test]
    fn test_lifestyle_ordering() {
        let rows = project(&plan(), 50_000.0, None);
        let results = detect_milestones(&rows, &plan(), None);
        let year = |id| result(&results, id).row_index.unwrap();
        assert!(year("lean_fi") <= year("barista_fi"));
        assert!(year("barista_fi") <= year("regular_fi"));
        assert!(year("regular_fi") <= year("chubby_fi"));
        assert!(year("chubby_fi") <= year("fat_fi"));
        assert_eq!(year("regular_fi"), year("fi_100"));
    }

    #[test]
    fn test_returns_exceed_savings() {
        // Savings 30k at 7%: threshold 428,571 and 857,143
        let rows = project(&plan(), 0.0, None);
        let results = detect_milestones(&rows, &plan(), None);
        let single = result(&results, "returns_match_savings");
        let double = result(&results, "returns_double_savings");
        assert!(single.net_worth_at_achievement.unwrap() >= 30_000.0 / 0.07);
        assert!(double.row_index.unwrap() > single.row_index.unwrap());
    }

    #[test]
    fn test_stress_test_needs_birth_year() {
        let rows = project(&plan(), 400_000.0, None);
        let results = detect_milestones(&rows, &plan(), None);
        assert!(!result(&results, "crash_proof").is_reached());

        let rows = project(&plan(), 400_000.0, Some(1995));
        let results = detect_milestones(&rows, &plan(), Some(1995));
        let crash = result(&results, "crash_proof");
        // 200k × 1.07^35 ≈ 2.13M clears the 1.2M target today
        assert!(crash.is_achieved);
        assert_eq!(crash.achieved_age, Some(30));
    }

    #[test]
    fn test_coast_fi_respects_retirement_age() {
        let no_savings = ScenarioAssumptions { yearly_contribution: 0.0, ..plan() };

        // Coast point in 2036, age 46 for someone born in 1990
        let rows = project(&no_savings, 600_000.0, Some(1990));
        let results = detect_milestones(&rows, &no_savings, Some(1990));
        assert!(result(&results, "coast_fi").is_achieved);

        // Same money at 60 coasts past 65
        let rows = project(&no_savings, 600_000.0, Some(1965));
        let results = detect_milestones(&rows, &no_savings, Some(1965));
        let coast = result(&results, "coast_fi");
        assert!(!coast.is_achieved);
    }

    #[test]
    fn test_crossover_delegates_to_flag() {
        let rows = project(&plan(), 0.0, None);
        let results = detect_milestones(&rows, &plan(), None);
        let index = result(&results, "crossover").row_index.unwrap();
        assert!(rows[index].is_crossover);
    }

    #[test]
    fn test_unreached_milestone() {
        let broke = ScenarioAssumptions { yearly_contribution: 0.0, return_rate: 0.0, ..plan() };
        let rows = project(&broke, 0.0, None);
        let results = detect_milestones(&rows, &broke, None);
        let r = result(&results, "first_100k");
        assert!(!r.is_reached());
        assert_eq!(r.achieved_year, None);
        assert_eq!(r.net_worth_at_achievement, None);
    }

    #[test]
    fn test_first_row_wins_when_threshold_outruns_net_worth() {
        // The inflating spending floor overtakes a slow-growing portfolio, so
        // the FI target climbs back above net worth after an early hit. The
        // first hit still stands.
        let volatile = ScenarioAssumptions {
            return_rate: 1.0,
            swr: 4.0,
            inflation_rate: 5.0,
            spending_growth_rate: 3.0,
            base_monthly_budget: 1_000.0,
            yearly_contribution: 0.0,
            ..plan()
        };
        let rows = project(&volatile, 1_300_000.0, None);
        let results = detect_milestones(&rows, &volatile, None);
        let fi = result(&results, "fi_100");
        let first = fi.row_index.unwrap();
        assert_eq!(first, 0);
        assert!(rows.iter().skip(1).any(|r| r.net_worth < r.fi_target));
    }

    #[test]
    fn test_summary_interpolates() {
        // 500k of 600k: 83.3%, between 75% and 90%
        let lean = ScenarioAssumptions { base_monthly_budget: 2_000.0, ..plan() };
        let rows = project(&lean, 500_000.0, None);
        let results = detect_milestones(&rows, &lean, None);
        let summary = summarize_milestones(&results, &rows);
        assert_eq!(summary.current.as_ref().unwrap().definition.id, "fi_75");
        assert_eq!(summary.next.as_ref().unwrap().definition.id, "fi_90");
        assert_relative_eq!(summary.progress_to_next, (83.333_333 - 75.0) / 15.0 * 100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_summary_edges() {
        let rows = project(&plan(), 0.0, None);
        let results = detect_milestones(&rows, &plan(), None);
        let summary = summarize_milestones(&results, &rows);
        assert!(summary.current.is_none());
        assert_eq!(summary.next.as_ref().unwrap().definition, milestone("fi_10").unwrap());
        assert_eq!(summary.progress_to_next, 0.0);

        let rows = project(&plan(), 5_000_000.0, None);
        let results = detect_milestones(&rows, &plan(), None);
        let summary = summarize_milestones(&results, &rows);
        assert_eq!(summary.current.as_ref().unwrap().definition.id, "fi_100");
        assert!(summary.next.is_none());
        assert_eq!(summary.progress_to_next, 100.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn percentage_milestones_in_order(
            start in 0.0f64..300_000.0,
            contribution in 5_000.0f64..80_000.0,
            rate in 2.0f64..10.0,
        ) {
            let growing = ScenarioAssumptions {
                return_rate: rate,
                yearly_contribution: contribution,
                ..plan()
            };
            let rows = project(&growing, start, None);
            let results = detect_milestones(&rows, &growing, None);
            let years: Vec<i32> = results
                .iter()
                .filter(|r| r.definition.fi_percent().is_some())
                .map(|r| r.achieved_year.unwrap_or(i32::MAX))
                .collect();
            prop_assert!(years.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
