//! Tracked values: a result paired with a record of how it was computed
//!
//! The wrappers here call the plain engine functions and describe the
//! inputs; the engine never depends on this module.

use serde::Serialize;

use crate::assumptions::ScenarioAssumptions;
use crate::inflation::inflation_multiplier;
use crate::projection::{calculate_fi_progress, calculate_fi_target};
use crate::spending::{monthly_budget, wealth_linked_monthly};

/// Provenance of a computed value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationTrace {
    pub label: String,
    pub formula: String,
    pub inputs: Vec<(String, f64)>,
    pub result_note: Option<String>,
}

impl CalculationTrace {
    pub fn new(label: impl Into<String>, formula: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            formula: formula.into(),
            inputs: Vec::new(),
            result_note: None,
        }
    }

    pub fn input(mut self, name: impl Into<String>, value: f64) -> Self {
        self.inputs.push((name.into(), value));
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.result_note = Some(note.into());
        self
    }
}

/// A value with an optional trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tracked<T> {
    pub value: T,
    pub trace: Option<CalculationTrace>,
}

impl<T> Tracked<T> {
    pub fn plain(value: T) -> Self {
        Self { value, trace: None }
    }

    pub fn traced(value: T, trace: CalculationTrace) -> Self {
        Self { value, trace: Some(trace) }
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Tracked<U> {
        Tracked {
            value: f(self.value),
            trace: self.trace,
        }
    }
}

pub fn traced_fi_target(monthly_spend: f64, swr: f64) -> Tracked<f64> {
    let value = calculate_fi_target(monthly_spend, swr);
    let mut trace = CalculationTrace::new("FI target", "monthly spend × 12 ÷ (SWR ÷ 100)")
        .input("monthly spend", monthly_spend)
        .input("SWR %", swr);
    if value == 0.0 {
        trace = trace.note("disabled: spending or withdrawal rate not positive");
    }
    Tracked::traced(value, trace)
}

pub fn traced_fi_progress(net_worth: f64, monthly_spend: f64, swr: f64) -> Tracked<f64> {
    let value = calculate_fi_progress(net_worth, monthly_spend, swr);
    let target = calculate_fi_target(monthly_spend, swr);
    let trace = CalculationTrace::new("FI progress", "net worth ÷ FI target × 100")
        .input("net worth", net_worth)
        .input("FI target", target)
        .note(format!("{value:.2}% of {target:.0}"));
    Tracked::traced(value, trace)
}

pub fn traced_monthly_budget(net_worth: f64, assumptions: &ScenarioAssumptions, years_from_now: f64) -> Tracked<f64> {
    let value = monthly_budget(net_worth, assumptions, years_from_now);
    let trace = CalculationTrace::new(
        "Monthly budget",
        "base × (1 + inflation)^years + net worth × spending growth ÷ 12",
    )
    .input("base budget", assumptions.base_monthly_budget)
    .input("inflation factor", inflation_multiplier(years_from_now, assumptions.inflation_rate))
    .input("net worth", net_worth)
    .input("wealth-linked share", wealth_linked_monthly(net_worth, assumptions));
    Tracked::traced(value, trace)
}
