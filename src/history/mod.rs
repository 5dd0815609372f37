//! Net-worth history consumed by the projection engine

mod data;
pub mod loader;

pub use data::{NetWorthHistory, NetWorthSample};
pub use loader::{load_history, load_history_from_reader};
