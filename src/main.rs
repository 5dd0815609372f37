//! FI Projection CLI
//!
//! Runs scenarios against a net-worth history and writes projection rows to CSV

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use fi_projection::assumptions::{load_scenarios, DEFAULT_SCENARIO_PATH};
use fi_projection::history::load_history;
use fi_projection::projection::DEFAULT_PROJECTION_MONTHS;
use fi_projection::{NetWorthHistory, ProjectionOptions, ScenarioAssumptions, ScenarioOutcome, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "fi_projection")]
#[command(about = "Project net worth toward financial independence and report milestones")]
struct Cli {
    /// Scenario file (.json or .csv); falls back to data/scenarios.json, then built-in defaults
    #[arg(short, long)]
    scenarios: Option<PathBuf>,

    /// Net-worth history CSV (amount,timestamp)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Starting net worth, overriding the history
    #[arg(long)]
    net_worth: Option<f64>,

    /// Birth year for ages and coast-FI
    #[arg(long)]
    birth_year: Option<i32>,

    /// Calendar year of the first row (defaults to the current year)
    #[arg(long)]
    start_year: Option<i32>,

    /// Write a monthly projection of this many months instead of yearly rows
    #[arg(long, num_args = 0..=1, default_missing_value = "120")]
    monthly: Option<u32>,

    /// Monthly contribution override for the monthly projection
    #[arg(long, requires = "monthly")]
    monthly_contribution: Option<f64>,

    /// Output CSV; one file per scenario when several are run
    #[arg(short, long, default_value = "projection_output.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let scenarios = read_scenarios(cli.scenarios.as_deref())?;
    let history = match &cli.history {
        Some(path) => load_history(path).with_context(|| format!("loading history from {}", path.display()))?,
        None => NetWorthHistory::empty(),
    };

    let mut options = match cli.start_year {
        Some(year) => ProjectionOptions::new(year),
        None => ProjectionOptions::default(),
    };
    options.birth_year = cli.birth_year;
    options.starting_net_worth = cli.net_worth;

    let runner = ScenarioRunner::new(history, options);

    println!("FI Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("==================\n");

    if let Some(months) = cli.monthly {
        let months = if months == 0 { DEFAULT_PROJECTION_MONTHS } else { months };
        for scenario in &scenarios {
            let outcome = runner.run_monthly(scenario, months, cli.monthly_contribution);
            let path = output_path(&cli.output, &scenario.name, scenarios.len());
            write_csv(&path, &outcome.months)?;

            println!("{}: {} months written to {}", scenario.name, outcome.months.len(), path.display());
            for year in &outcome.years {
                println!(
                    "  Year {:>2}: net worth ${:>14.2}  interest ${:>12.2}  saved ${:>12.2}  FI {:>6.1}%",
                    year.year_index, year.ending_net_worth, year.interest, year.contributions, year.fi_progress
                );
            }
        }
        return Ok(());
    }

    let outcomes = runner.run_all(&scenarios);
    for outcome in &outcomes {
        let path = output_path(&cli.output, &outcome.scenario.name, outcomes.len());
        write_csv(&path, &outcome.rows)?;
        print_summary(outcome);
        println!("  Rows written to: {}\n", path.display());
    }

    Ok(())
}

fn read_scenarios(path: Option<&Path>) -> Result<Vec<ScenarioAssumptions>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None if Path::new(DEFAULT_SCENARIO_PATH).exists() => PathBuf::from(DEFAULT_SCENARIO_PATH),
        None => {
            log::info!("no scenario file, using default plan");
            return Ok(vec![ScenarioAssumptions::default_plan()]);
        }
    };
    let scenarios = load_scenarios(&path).with_context(|| format!("loading scenarios from {}", path.display()))?;
    if scenarios.is_empty() {
        anyhow::bail!("{} contains no scenarios", path.display());
    }
    Ok(scenarios)
}

/// `out.csv` for a single scenario, `out_<name>.csv` for several
fn output_path(base: &Path, scenario_name: &str, scenario_count: usize) -> PathBuf {
    if scenario_count <= 1 {
        return base.to_path_buf();
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("projection_output");
    let slug: String = scenario_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    base.with_file_name(format!("{stem}_{slug}.csv"))
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_summary(outcome: &ScenarioOutcome) {
    let scenario = &outcome.scenario;
    println!("Scenario: {}", scenario.name);
    println!(
        "  Return {:.1}%  SWR {:.1}%  Inflation {:.1}%  Budget ${:.0}/mo",
        scenario.return_rate, scenario.swr, scenario.inflation_rate, scenario.base_monthly_budget
    );

    if let Some(row) = outcome.rows.first() {
        println!("  Net worth today: ${:.2}", row.net_worth);
        println!("  FI target: ${:.2} ({:.1}% there)", row.fi_target, row.fi_progress);
    }
    match (outcome.fi_row(), outcome.years_to_fi()) {
        (Some(row), Some(years)) => {
            let worth = row.net_worth_adjusted();
            println!(
                "  FI year: {} in {years} years with ${:.2} (${:.2} in today's dollars)",
                row.year, worth.nominal, worth.real
            );
        }
        _ => println!("  FI year: not within horizon"),
    }

    let progress = &outcome.progress;
    if let Some(current) = &progress.current {
        println!("  Current milestone: {}", current.definition.name);
    }
    if let Some(next) = &progress.next {
        println!("  Next milestone: {} ({:.1}% of the way)", next.definition.name, progress.progress_to_next);
    }

    println!("  Milestones:");
    for result in &outcome.milestones {
        let when = match (result.achieved_year, result.achieved_age) {
            (Some(year), Some(age)) => format!("{year} (age {age})"),
            (Some(year), None) => year.to_string(),
            _ => "-".to_string(),
        };
        let mark = if result.is_achieved { "*" } else { " " };
        println!("    {mark} {:<24} {when}", result.definition.name);
    }
}
