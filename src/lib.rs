//! FI Projection - net-worth projection and milestone engine for financial-independence planning
//!
//! This library provides:
//! - Progressive tax calculation (federal, every state plus DC, FICA)
//! - Nominal/real dollar conversions
//! - Level-based spending policy
//! - Yearly and monthly net-worth projections with FI, crossover and coast-FI tracking
//! - Milestone detection over a projection
//! - Batch scenario runs, real-time estimates and traced values

pub mod error;
pub mod inflation;
pub mod tax;
pub mod spending;
pub mod assumptions;
pub mod history;
pub mod projection;
pub mod milestones;
pub mod realtime;
pub mod trace;
pub mod scenario;

// Re-export commonly used types
pub use error::LoadError;
pub use inflation::{to_nominal_value, to_real_value, InflationAdjusted};
pub use tax::{calculate_taxes, FilingStatus, PreTaxContributions, TaxResult};
pub use assumptions::{IncomeAssumptions, ScenarioAssumptions};
pub use history::{NetWorthHistory, NetWorthSample};
pub use projection::{
    aggregate_yearly, project_monthly, project_yearly, MonthlyProjectionRow, ProjectionEngine, ProjectionOptions,
    ProjectionRow, YearlySummaryRow,
};
pub use milestones::{detect_milestones, summarize_milestones, MilestoneProgress, MilestoneResult};
pub use realtime::{estimate_current_net_worth, Clock, FixedClock, SystemClock};
pub use scenario::{ScenarioOutcome, ScenarioRunner};
