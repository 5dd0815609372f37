//! Static milestone catalog

use serde::Serialize;

use MilestoneCategory::*;
use MilestoneRule::*;

/// Retirement age used by the stress-test and coast-FI milestones
pub const RETIREMENT_AGE: i32 = 65;

/// Milestone grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneCategory {
    Percentage,
    Lifestyle,
    Special,
    Security,
    Compounding,
}

/// How a milestone's threshold is derived for a projection row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MilestoneRule {
    /// Net worth reaches `percent` of the row's FI target
    FiPercentage { percent: f64 },
    /// FI target for spending scaled by `multiplier`
    SpendingMultiple { multiplier: f64 },
    /// `months` of the row's spending, scaled by `buffer`
    Runway { months: f64, buffer: f64 },
    /// Fixed dollar amount
    NetWorth { amount: f64 },
    /// Annual return equals `multiple` times annual savings
    ReturnsExceedSavings { multiple: f64 },
    /// Net worth cut by `haircut` still compounds to the FI target by retirement
    StressTest { haircut: f64, retirement_age: i32 },
    /// First crossover row
    Crossover,
    /// First row with a coast-FI point at or before retirement
    CoastFi { retirement_age: i32 },
}

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MilestoneDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub category: MilestoneCategory,
    pub rule: MilestoneRule,
    pub description: &'static str,
    pub icon: &'static str,
}

impl MilestoneDefinition {
    const fn new(
        id: &'static str,
        name: &'static str,
        category: MilestoneCategory,
        rule: MilestoneRule,
        description: &'static str,
        icon: &'static str,
    ) -> Self {
        Self { id, name, category, rule, description, icon }
    }

    /// Percent of FI for percentage-category milestones
    pub fn fi_percent(&self) -> Option<f64> {
        match (self.category, self.rule) {
            (MilestoneCategory::Percentage, MilestoneRule::FiPercentage { percent }) => Some(percent),
            _ => None,
        }
    }
}

#[rustfmt::skip]
pub static MILESTONES: [MilestoneDefinition; 26] = [
    // Percentage of FI
    MilestoneDefinition::new("fi_10", "10% FI", Percentage, FiPercentage { percent: 10.0 },
        "Net worth reaches a tenth of your FI number", "seedling"),
    MilestoneDefinition::new("fi_25", "25% FI", Percentage, FiPercentage { percent: 25.0 },
        "A quarter of the way to financial independence", "sprout"),
    MilestoneDefinition::new("fi_50", "50% FI", Percentage, FiPercentage { percent: 50.0 },
        "Halfway to financial independence", "half-moon"),
    MilestoneDefinition::new("fi_75", "75% FI", Percentage, FiPercentage { percent: 75.0 },
        "Three quarters of your FI number", "mountain"),
    MilestoneDefinition::new("fi_90", "90% FI", Percentage, FiPercentage { percent: 90.0 },
        "The final stretch", "flag"),
    MilestoneDefinition::new("fi_100", "Financial Independence", Percentage, FiPercentage { percent: 100.0 },
        "Safe withdrawals cover your spending", "trophy"),

    // Lifestyle variants of FI
    MilestoneDefinition::new("lean_fi", "Lean FI", Lifestyle, SpendingMultiple { multiplier: 0.7 },
        "Independent on 70% of your planned spending", "leaf"),
    MilestoneDefinition::new("barista_fi", "Barista FI", Lifestyle, SpendingMultiple { multiplier: 0.85 },
        "Part-time work covers the remaining gap", "coffee"),
    MilestoneDefinition::new("regular_fi", "Regular FI", Lifestyle, SpendingMultiple { multiplier: 1.0 },
        "Independent at your planned spending", "house"),
    MilestoneDefinition::new("chubby_fi", "Chubby FI", Lifestyle, SpendingMultiple { multiplier: 1.25 },
        "Independent with a quarter more to spend", "cake"),
    MilestoneDefinition::new("fat_fi", "Fat FI", Lifestyle, SpendingMultiple { multiplier: 1.5 },
        "Independent with half again as much to spend", "gem"),

    // Runway and security
    MilestoneDefinition::new("runway_3m", "3-Month Runway", Security, Runway { months: 3.0, buffer: 1.0 },
        "Three months of expenses saved", "shield"),
    MilestoneDefinition::new("runway_6m", "6-Month Runway", Security, Runway { months: 6.0, buffer: 1.0 },
        "Six months of expenses saved", "shield"),
    MilestoneDefinition::new("runway_1y", "1-Year Runway", Security, Runway { months: 12.0, buffer: 1.0 },
        "A full year of expenses saved", "umbrella"),
    MilestoneDefinition::new("runway_2y", "2-Year Runway", Security, Runway { months: 24.0, buffer: 1.0 },
        "Two years of expenses saved", "umbrella"),
    MilestoneDefinition::new("walk_away", "Walk-Away Fund", Security, Runway { months: 24.0, buffer: 1.5 },
        "Two years of expenses plus a 50% cushion", "door"),

    // Compounding
    MilestoneDefinition::new("first_100k", "First $100k", Compounding, NetWorth { amount: 100_000.0 },
        "The hardest hundred thousand", "rocket"),
    MilestoneDefinition::new("quarter_million", "$250k", Compounding, NetWorth { amount: 250_000.0 },
        "A quarter million invested", "chart"),
    MilestoneDefinition::new("half_million", "$500k", Compounding, NetWorth { amount: 500_000.0 },
        "Half a million invested", "chart"),
    MilestoneDefinition::new("millionaire", "Millionaire", Compounding, NetWorth { amount: 1_000_000.0 },
        "Seven figures", "crown"),
    MilestoneDefinition::new("returns_match_savings", "Returns Match Savings", Compounding,
        ReturnsExceedSavings { multiple: 1.0 },
        "Annual investment returns equal what you save each year", "scales"),
    MilestoneDefinition::new("returns_double_savings", "Returns Double Savings", Compounding,
        ReturnsExceedSavings { multiple: 2.0 },
        "Annual investment returns are twice what you save each year", "scales"),
    MilestoneDefinition::new("crash_proof", "Crash Proof", Compounding,
        StressTest { haircut: 0.5, retirement_age: RETIREMENT_AGE },
        "Even after a 50% crash today, growth alone reaches FI by 65", "anchor"),

    // Special
    MilestoneDefinition::new("crossover", "Crossover Point", Special, Crossover,
        "Lifetime investment returns exceed lifetime contributions", "crossed-arrows"),
    MilestoneDefinition::new("coast_fi", "Coast FI", Special, CoastFi { retirement_age: RETIREMENT_AGE },
        "No further saving needed to reach FI by 65", "sailboat"),
    MilestoneDefinition::new("flamingo_fi", "Flamingo FI", Special, FiPercentage { percent: 50.0 },
        "Half your FI number, then let it grow while you downshift", "flamingo"),
];

/// The whole catalog
pub fn milestone_catalog() -> &'static [MilestoneDefinition] {
    &MILESTONES
}

/// Look up a definition by id
pub fn milestone(id: &str) -> Option<&'static MilestoneDefinition> {
    MILESTONES.iter().find(|m| m.id == id)
}

/// Percentage milestones in ascending order of percent
pub fn percentage_milestones() -> impl Iterator<Item = &'static MilestoneDefinition> {
    MILESTONES.iter().filter(|m| m.fi_percent().is_some())
}
