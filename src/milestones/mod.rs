//! Milestone catalog and detection

pub mod catalog;
mod detect;

pub use catalog::{
    milestone, milestone_catalog, percentage_milestones, MilestoneCategory, MilestoneDefinition, MilestoneRule,
    MILESTONES, RETIREMENT_AGE,
};
pub use detect::{detect_milestones, summarize_milestones, MilestoneProgress, MilestoneResult};
