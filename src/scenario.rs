//! Scenario runner for batch projections
//!
//! Holds one net-worth history and one set of projection options, then runs
//! any number of scenarios against them. Scenarios are independent, so
//! batches fan out across threads.

use rayon::prelude::*;
use serde::Serialize;

use crate::assumptions::ScenarioAssumptions;
use crate::history::NetWorthHistory;
use crate::milestones::{detect_milestones, summarize_milestones, MilestoneProgress, MilestoneResult};
use crate::projection::{
    aggregate_yearly, project_monthly, years_to_fi, MonthlyProjectionRow, ProjectionEngine, ProjectionOptions,
    ProjectionRow, YearlySummaryRow,
};

/// Everything produced for one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: ScenarioAssumptions,
    pub rows: Vec<ProjectionRow>,
    pub milestones: Vec<MilestoneResult>,
    pub progress: MilestoneProgress,
}

impl ScenarioOutcome {
    /// The row where financial independence is first reached
    pub fn fi_row(&self) -> Option<&ProjectionRow> {
        self.rows.iter().find(|r| r.is_fi_year)
    }

    /// Calendar year of financial independence, if reached
    pub fn fi_year(&self) -> Option<i32> {
        self.fi_row().map(|r| r.year)
    }

    pub fn years_to_fi(&self) -> Option<u32> {
        years_to_fi(&self.rows)
    }
}

/// Monthly projection with its yearly roll-up
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyOutcome {
    pub scenario_name: String,
    pub months: Vec<MonthlyProjectionRow>,
    pub years: Vec<YearlySummaryRow>,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(history, ProjectionOptions::new(2025));
/// let outcomes = runner.run_all(&scenarios);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    history: NetWorthHistory,
    options: ProjectionOptions,
}

impl ScenarioRunner {
    pub fn new(history: NetWorthHistory, options: ProjectionOptions) -> Self {
        Self { history, options }
    }

    /// Project one scenario and score its milestones
    pub fn run(&self, scenario: &ScenarioAssumptions) -> ScenarioOutcome {
        let engine = ProjectionEngine::new(scenario.clone(), self.options.clone());
        let rows = engine.project(&self.history);
        let milestones = detect_milestones(&rows, scenario, self.options.birth_year);
        let progress = summarize_milestones(&milestones, &rows);

        ScenarioOutcome {
            scenario: scenario.clone(),
            rows,
            milestones,
            progress,
        }
    }

    /// Run every scenario in parallel; output order follows input order
    pub fn run_all(&self, scenarios: &[ScenarioAssumptions]) -> Vec<ScenarioOutcome> {
        log::info!("running {} scenario(s)", scenarios.len());
        scenarios.par_iter().map(|s| self.run(s)).collect()
    }

    /// Monthly projection from the same starting point as the yearly run
    pub fn run_monthly(
        &self,
        scenario: &ScenarioAssumptions,
        month_count: u32,
        contribution_override: Option<f64>,
    ) -> MonthlyOutcome {
        let engine = ProjectionEngine::new(scenario.clone(), self.options.clone());
        let start = engine.starting_net_worth(&self.history);
        let months = project_monthly(start, scenario, month_count, contribution_override);
        let years = aggregate_yearly(&months);

        MonthlyOutcome {
            scenario_name: scenario.name.clone(),
            months,
            years,
        }
    }

    pub fn history(&self) -> &NetWorthHistory {
        &self.history
    }

    pub fn options(&self) -> &ProjectionOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::NetWorthSample;
    use chrono::{TimeZone, Utc};

    fn runner() -> ScenarioRunner {
        let history = NetWorthHistory::new(vec![NetWorthSample::new(
            250_000.0,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        )]);
        ScenarioRunner::new(history, ProjectionOptions::new(2025).with_birth_year(1990))
    }

    fn scenarios() -> Vec<ScenarioAssumptions> {
        [5.0, 7.0, 9.0]
            .iter()
            .map(|&rate| ScenarioAssumptions {
                return_rate: rate,
                inflation_rate: 0.0,
                yearly_contribution: 25_000.0,
                ..ScenarioAssumptions::default_plan().with_name(format!("{rate}%"))
            })
            .collect()
    }

    #[test]
    fn test_run_all_keeps_order() {
        let outcomes = runner().run_all(&scenarios());
        assert_eq!(outcomes.len(), 3);
        let names: Vec<_> = outcomes.iter().map(|o| o.scenario.name.as_str()).collect();
        assert_eq!(names, vec!["5%", "7%", "9%"]);

        // Higher return reaches FI no later
        let fi: Vec<_> = outcomes.iter().map(|o| o.fi_year().unwrap()).collect();
        assert!(fi[2] <= fi[1] && fi[1] <= fi[0]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let runner = runner();
        let scenarios = scenarios();
        let parallel = runner.run_all(&scenarios);
        for (outcome, scenario) in parallel.iter().zip(&scenarios) {
            assert_eq!(outcome.rows, runner.run(scenario).rows);
        }
    }

    #[test]
    fn test_outcome_uses_history_anchor() {
        let outcome = runner().run(&scenarios()[1]);
        assert_eq!(outcome.rows[0].net_worth, 250_000.0);
        assert_eq!(outcome.rows[0].age, Some(35));
        assert_eq!(outcome.milestones.len(), crate::milestones::MILESTONES.len());
        assert_eq!(
            outcome.years_to_fi().map(|y| 2025 + y as i32),
            outcome.fi_year()
        );
        let fi_row = outcome.fi_row().unwrap();
        assert!(fi_row.is_fi_year && fi_row.swr_covers_spend);
    }

    #[test]
    fn test_run_monthly() {
        let monthly = runner().run_monthly(&scenarios()[0], 24, None);
        assert_eq!(monthly.months.len(), 24);
        assert_eq!(monthly.years.len(), 2);
        assert_eq!(monthly.scenario_name, "5%");
    }
}
