//! Net-worth projection: yearly and monthly simulation plus FI arithmetic

mod state;
mod engine;
mod monthly;
mod rows;
pub mod fi;

pub use state::ProjectionState;
pub use engine::{project_yearly, ProjectionEngine, ProjectionOptions, DEFAULT_PROJECTION_YEARS};
pub use monthly::{aggregate_yearly, monthly_rate, project_monthly, DEFAULT_PROJECTION_MONTHS};
pub use rows::{MonthlyProjectionRow, ProjectionRow, YearlySummaryRow};
pub use fi::{
    calculate_fi_progress, calculate_fi_target, calculate_future_value, coast_fi_search, years_to_fi,
    FutureValue, SwrAmounts, COAST_FI_HORIZON,
};
