//! Scenario loader
//!
//! Reads scenarios from JSON (a single object or an array) or from a flat CSV
//! file with one scenario per row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::{IncomeAssumptions, ScenarioAssumptions};
use crate::error::LoadError;
use crate::tax::{FilingStatus, PreTaxContributions};

/// Default scenario file used by the command-line driver
pub const DEFAULT_SCENARIO_PATH: &str = "data/scenarios.json";

#[derive(Deserialize)]
#[serde(untagged)]
enum ScenarioDocument {
    Many(Vec<ScenarioAssumptions>),
    One(ScenarioAssumptions),
}

/// Raw CSV row. Income columns are optional; a row without `gross_income`
/// and `income_growth_rate` has no income block.
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    return_rate: f64,
    swr: f64,
    inflation_rate: f64,
    base_monthly_budget: f64,
    #[serde(default)]
    spending_growth_rate: Option<f64>,
    #[serde(default)]
    yearly_contribution: Option<f64>,
    #[serde(default)]
    gross_income: Option<f64>,
    #[serde(default)]
    income_growth_rate: Option<f64>,
    #[serde(default)]
    filing_status: Option<String>,
    #[serde(default)]
    state_code: Option<String>,
    #[serde(default)]
    traditional_401k: Option<f64>,
    #[serde(default)]
    traditional_ira: Option<f64>,
    #[serde(default)]
    hsa: Option<f64>,
    #[serde(default)]
    other_pre_tax: Option<f64>,
}

impl CsvRow {
    fn to_scenario(self, row: usize) -> Result<ScenarioAssumptions, LoadError> {
        let income = if self.gross_income.is_some() || self.income_growth_rate.is_some() {
            let filing_status = match self.filing_status.as_deref().map(str::trim) {
                None | Some("") => FilingStatus::Single,
                Some(value) => FilingStatus::parse(value).ok_or_else(|| {
                    LoadError::UnknownFilingStatus { row, value: value.to_string() }
                })?,
            };
            Some(IncomeAssumptions {
                gross_income: self.gross_income.unwrap_or(0.0),
                income_growth_rate: self.income_growth_rate.unwrap_or(0.0),
                filing_status,
                state_code: self.state_code.unwrap_or_default().trim().to_ascii_uppercase(),
                pre_tax: PreTaxContributions {
                    traditional_401k: self.traditional_401k.unwrap_or(0.0),
                    traditional_ira: self.traditional_ira.unwrap_or(0.0),
                    hsa: self.hsa.unwrap_or(0.0),
                    other: self.other_pre_tax.unwrap_or(0.0),
                },
            })
        } else {
            None
        };

        Ok(ScenarioAssumptions {
            name: self.name,
            return_rate: self.return_rate,
            swr: self.swr,
            inflation_rate: self.inflation_rate,
            base_monthly_budget: self.base_monthly_budget,
            spending_growth_rate: self.spending_growth_rate.unwrap_or(0.0),
            yearly_contribution: self.yearly_contribution.unwrap_or(0.0),
            income,
        })
    }
}

/// Load scenarios from a `.json` or `.csv` file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioAssumptions>, LoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let scenarios = match extension.as_deref() {
        Some("json") => {
            let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
            load_scenarios_from_json_reader(file)?
        }
        Some("csv") => load_scenarios_from_csv(path)?,
        _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    };

    log::info!("loaded {} scenario(s) from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load scenarios from JSON text: either one scenario object or an array
pub fn load_scenarios_from_json_reader<R: Read>(reader: R) -> Result<Vec<ScenarioAssumptions>, LoadError> {
    let document: ScenarioDocument = serde_json::from_reader(reader)?;
    Ok(match document {
        ScenarioDocument::Many(list) => list,
        ScenarioDocument::One(single) => vec![single],
    })
}

/// Load scenarios from a flat CSV file
pub fn load_scenarios_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioAssumptions>, LoadError> {
    let reader = csv::Reader::from_path(path)?;
    read_csv_rows(reader)
}

/// Load scenarios from any CSV reader (e.g., string buffer)
pub fn load_scenarios_from_csv_reader<R: Read>(reader: R) -> Result<Vec<ScenarioAssumptions>, LoadError> {
    read_csv_rows(csv::Reader::from_reader(reader))
}

fn read_csv_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<ScenarioAssumptions>, LoadError> {
    let mut scenarios = Vec::new();
    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario(index + 1)?);
    }
    Ok(scenarios)
}
