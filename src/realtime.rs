//! Real-time net-worth estimate between recorded samples
//!
//! The only time-dependent piece of the crate. "Now" comes from a [`Clock`]
//! so everything else stays deterministic.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::assumptions::ScenarioAssumptions;
use crate::history::{NetWorthHistory, NetWorthSample};

const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    fn current_year(&self) -> i32 {
        self.now().year()
    }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Estimated net worth at `as_of`, grown from the latest sample
#[derive(Debug, Clone, Serialize)]
pub struct RealtimeEstimate {
    pub anchor: NetWorthSample,
    pub as_of: DateTime<Utc>,
    /// Years since the anchor, never negative
    pub elapsed_years: f64,
    pub estimated_net_worth: f64,
    /// Instantaneous growth rate at `as_of`, dollars per second
    pub growth_per_second: f64,
    pub growth_per_day: f64,
}

/// Compound the latest sample forward to the clock's "now", adding the yearly
/// contribution pro rata. `None` when there is no history.
pub fn estimate_current_net_worth(
    history: &NetWorthHistory,
    assumptions: &ScenarioAssumptions,
    clock: &dyn Clock,
) -> Option<RealtimeEstimate> {
    let anchor = *history.latest()?;
    let as_of = clock.now();

    let elapsed_seconds = (as_of - anchor.timestamp).num_milliseconds() as f64 / 1_000.0;
    let elapsed_years = (elapsed_seconds / SECONDS_PER_YEAR).max(0.0);

    let rate = assumptions.return_decimal();
    let contribution = assumptions.yearly_contribution;
    let growth = (1.0 + rate).powf(elapsed_years);
    let estimated_net_worth = anchor.amount * growth + contribution * elapsed_years;

    // d/dt of the estimate, in dollars per year
    let log_rate = if rate > -1.0 { (1.0 + rate).ln() } else { 0.0 };
    let per_year = anchor.amount * growth * log_rate + contribution;

    Some(RealtimeEstimate {
        anchor,
        as_of,
        elapsed_years,
        estimated_net_worth,
        growth_per_second: per_year / SECONDS_PER_YEAR,
        growth_per_day: per_year / 365.25,
    })
}
