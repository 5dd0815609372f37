//! State income tax: per-state policy table (2024 tax year) and calculator
//!
//! Every state is an entry in [`STATE_TABLE`]; the calculator's control flow
//! is the same for all of them. Married-filing-separately uses the single
//! schedule. Head of household falls back to the single schedule unless the
//! state publishes its own.

use super::federal::federal_standard_deduction;
use super::types::{
    apply_brackets, marginal_rate, Bracket, FilingStatus, PreTaxContributions, StateTaxBreakdown,
    StateTaxKind, SurtaxLine,
};

const INF: f64 = f64::INFINITY;

/// Dollar amounts that vary by filing status
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusAmounts {
    pub single: f64,
    pub joint: f64,
    pub head_of_household: f64,
}

impl StatusAmounts {
    pub const ZERO: StatusAmounts = StatusAmounts::new(0.0, 0.0, 0.0);

    pub const fn new(single: f64, joint: f64, head_of_household: f64) -> Self {
        Self { single, joint, head_of_household }
    }

    /// Head of household gets the single amount
    pub const fn pair(single: f64, joint: f64) -> Self {
        Self { single, joint, head_of_household: single }
    }

    pub fn for_status(&self, status: FilingStatus) -> f64 {
        match status {
            FilingStatus::Single | FilingStatus::MarriedFilingSeparately => self.single,
            FilingStatus::MarriedFilingJointly => self.joint,
            FilingStatus::HeadOfHousehold => self.head_of_household,
        }
    }
}

/// Deduction a state allows before applying its rates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateDeduction {
    None,
    Fixed(StatusAmounts),
    /// State conforms to the federal standard deduction
    Federal,
}

impl StateDeduction {
    fn amount(&self, status: FilingStatus) -> f64 {
        match self {
            StateDeduction::None => 0.0,
            StateDeduction::Fixed(amounts) => amounts.for_status(status),
            StateDeduction::Federal => federal_standard_deduction(status),
        }
    }
}

/// Progressive schedules by filing status
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateSchedules {
    pub single: &'static [Bracket],
    pub joint: Option<&'static [Bracket]>,
    pub head_of_household: Option<&'static [Bracket]>,
}

impl StateSchedules {
    const fn uniform(table: &'static [Bracket]) -> Self {
        Self { single: table, joint: None, head_of_household: None }
    }

    const fn split(single: &'static [Bracket], joint: &'static [Bracket]) -> Self {
        Self { single, joint: Some(joint), head_of_household: None }
    }

    const fn full(
        single: &'static [Bracket],
        joint: &'static [Bracket],
        head_of_household: &'static [Bracket],
    ) -> Self {
        Self { single, joint: Some(joint), head_of_household: Some(head_of_household) }
    }

    pub fn for_status(&self, status: FilingStatus) -> &'static [Bracket] {
        match status {
            FilingStatus::Single | FilingStatus::MarriedFilingSeparately => self.single,
            FilingStatus::MarriedFilingJointly => self.joint.unwrap_or(self.single),
            FilingStatus::HeadOfHousehold => self.head_of_household.unwrap_or(self.single),
        }
    }
}

/// Rate structure of a state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatePolicy {
    None,
    Flat { rate: f64 },
    Progressive(StateSchedules),
}

/// Extra rate applied to state taxable income above a threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surtax {
    pub threshold: f64,
    pub rate: f64,
}

/// One state's income tax rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateTaxConfig {
    pub code: &'static str,
    pub name: &'static str,
    pub policy: StatePolicy,
    pub deduction: StateDeduction,
    pub exemption: StatusAmounts,
    /// State does not follow the federal HSA exclusion
    pub taxes_hsa_contributions: bool,
    pub surtax: Option<Surtax>,
}

impl StateTaxConfig {
    const fn no_tax(code: &'static str, name: &'static str) -> Self {
        Self {
            code,
            name,
            policy: StatePolicy::None,
            deduction: StateDeduction::None,
            exemption: StatusAmounts::ZERO,
            taxes_hsa_contributions: false,
            surtax: None,
        }
    }

    const fn flat(
        code: &'static str,
        name: &'static str,
        rate: f64,
        deduction: StateDeduction,
        exemption: StatusAmounts,
    ) -> Self {
        Self {
            code,
            name,
            policy: StatePolicy::Flat { rate },
            deduction,
            exemption,
            taxes_hsa_contributions: false,
            surtax: None,
        }
    }

    const fn progressive(
        code: &'static str,
        name: &'static str,
        schedules: StateSchedules,
        deduction: StateDeduction,
        exemption: StatusAmounts,
    ) -> Self {
        Self {
            code,
            name,
            policy: StatePolicy::Progressive(schedules),
            deduction,
            exemption,
            taxes_hsa_contributions: false,
            surtax: None,
        }
    }

    const fn taxing_hsa(mut self) -> Self {
        self.taxes_hsa_contributions = true;
        self
    }

    const fn with_surtax(mut self, threshold: f64, rate: f64) -> Self {
        self.surtax = Some(Surtax { threshold, rate });
        self
    }

    pub fn kind(&self) -> StateTaxKind {
        match self.policy {
            StatePolicy::None => StateTaxKind::None,
            StatePolicy::Flat { .. } => StateTaxKind::Flat,
            StatePolicy::Progressive(_) => StateTaxKind::Progressive,
        }
    }
}

// ---- Bracket schedules ----

const AL_SINGLE: [Bracket; 3] = [
    Bracket::new(0.0, 500.0, 0.02),
    Bracket::new(500.0, 3_000.0, 0.04),
    Bracket::new(3_000.0, INF, 0.05),
];
const AL_JOINT: [Bracket; 3] = [
    Bracket::new(0.0, 1_000.0, 0.02),
    Bracket::new(1_000.0, 6_000.0, 0.04),
    Bracket::new(6_000.0, INF, 0.05),
];

const AR_ALL: [Bracket; 5] = [
    Bracket::new(0.0, 5_100.0, 0.0),
    Bracket::new(5_100.0, 10_300.0, 0.02),
    Bracket::new(10_300.0, 14_700.0, 0.03),
    Bracket::new(14_700.0, 24_300.0, 0.034),
    Bracket::new(24_300.0, INF, 0.039),
];

const CA_SINGLE: [Bracket; 9] = [
    Bracket::new(0.0, 10_756.0, 0.01),
    Bracket::new(10_756.0, 25_499.0, 0.02),
    Bracket::new(25_499.0, 40_245.0, 0.04),
    Bracket::new(40_245.0, 55_866.0, 0.06),
    Bracket::new(55_866.0, 70_606.0, 0.08),
    Bracket::new(70_606.0, 360_659.0, 0.093),
    Bracket::new(360_659.0, 432_787.0, 0.103),
    Bracket::new(432_787.0, 721_314.0, 0.113),
    Bracket::new(721_314.0, INF, 0.123),
];
const CA_JOINT: [Bracket; 9] = [
    Bracket::new(0.0, 21_512.0, 0.01),
    Bracket::new(21_512.0, 50_998.0, 0.02),
    Bracket::new(50_998.0, 80_490.0, 0.04),
    Bracket::new(80_490.0, 111_732.0, 0.06),
    Bracket::new(111_732.0, 141_212.0, 0.08),
    Bracket::new(141_212.0, 721_318.0, 0.093),
    Bracket::new(721_318.0, 865_574.0, 0.103),
    Bracket::new(865_574.0, 1_442_628.0, 0.113),
    Bracket::new(1_442_628.0, INF, 0.123),
];
const CA_HOH: [Bracket; 9] = [
    Bracket::new(0.0, 21_527.0, 0.01),
    Bracket::new(21_527.0, 51_000.0, 0.02),
    Bracket::new(51_000.0, 65_744.0, 0.04),
    Bracket::new(65_744.0, 81_364.0, 0.06),
    Bracket::new(81_364.0, 96_107.0, 0.08),
    Bracket::new(96_107.0, 490_493.0, 0.093),
    Bracket::new(490_493.0, 588_593.0, 0.103),
    Bracket::new(588_593.0, 980_987.0, 0.113),
    Bracket::new(980_987.0, INF, 0.123),
];

const CT_SINGLE: [Bracket; 7] = [
    Bracket::new(0.0, 10_000.0, 0.02),
    Bracket::new(10_000.0, 50_000.0, 0.045),
    Bracket::new(50_000.0, 100_000.0, 0.055),
    Bracket::new(100_000.0, 200_000.0, 0.06),
    Bracket::new(200_000.0, 250_000.0, 0.065),
    Bracket::new(250_000.0, 500_000.0, 0.069),
    Bracket::new(500_000.0, INF, 0.0699),
];
const CT_JOINT: [Bracket; 7] = [
    Bracket::new(0.0, 20_000.0, 0.02),
    Bracket::new(20_000.0, 100_000.0, 0.045),
    Bracket::new(100_000.0, 200_000.0, 0.055),
    Bracket::new(200_000.0, 400_000.0, 0.06),
    Bracket::new(400_000.0, 500_000.0, 0.065),
    Bracket::new(500_000.0, 1_000_000.0, 0.069),
    Bracket::new(1_000_000.0, INF, 0.0699),
];
const CT_HOH: [Bracket; 7] = [
    Bracket::new(0.0, 16_000.0, 0.02),
    Bracket::new(16_000.0, 80_000.0, 0.045),
    Bracket::new(80_000.0, 160_000.0, 0.055),
    Bracket::new(160_000.0, 320_000.0, 0.06),
    Bracket::new(320_000.0, 400_000.0, 0.065),
    Bracket::new(400_000.0, 800_000.0, 0.069),
    Bracket::new(800_000.0, INF, 0.0699),
];

const DE_ALL: [Bracket; 7] = [
    Bracket::new(0.0, 2_000.0, 0.0),
    Bracket::new(2_000.0, 5_000.0, 0.022),
    Bracket::new(5_000.0, 10_000.0, 0.039),
    Bracket::new(10_000.0, 20_000.0, 0.048),
    Bracket::new(20_000.0, 25_000.0, 0.052),
    Bracket::new(25_000.0, 60_000.0, 0.0555),
    Bracket::new(60_000.0, INF, 0.066),
];

const DC_ALL: [Bracket; 7] = [
    Bracket::new(0.0, 10_000.0, 0.04),
    Bracket::new(10_000.0, 40_000.0, 0.06),
    Bracket::new(40_000.0, 60_000.0, 0.065),
    Bracket::new(60_000.0, 250_000.0, 0.085),
    Bracket::new(250_000.0, 500_000.0, 0.0925),
    Bracket::new(500_000.0, 1_000_000.0, 0.0975),
    Bracket::new(1_000_000.0, INF, 0.1075),
];

const HI_SINGLE: [Bracket; 12] = [
    Bracket::new(0.0, 2_400.0, 0.014),
    Bracket::new(2_400.0, 4_800.0, 0.032),
    Bracket::new(4_800.0, 9_600.0, 0.055),
    Bracket::new(9_600.0, 14_400.0, 0.064),
    Bracket::new(14_400.0, 19_200.0, 0.068),
    Bracket::new(19_200.0, 24_000.0, 0.072),
    Bracket::new(24_000.0, 36_000.0, 0.076),
    Bracket::new(36_000.0, 48_000.0, 0.079),
    Bracket::new(48_000.0, 150_000.0, 0.0825),
    Bracket::new(150_000.0, 175_000.0, 0.09),
    Bracket::new(175_000.0, 200_000.0, 0.10),
    Bracket::new(200_000.0, INF, 0.11),
];
const HI_JOINT: [Bracket; 12] = [
    Bracket::new(0.0, 4_800.0, 0.014),
    Bracket::new(4_800.0, 9_600.0, 0.032),
    Bracket::new(9_600.0, 19_200.0, 0.055),
    Bracket::new(19_200.0, 28_800.0, 0.064),
    Bracket::new(28_800.0, 38_400.0, 0.068),
    Bracket::new(38_400.0, 48_000.0, 0.072),
    Bracket::new(48_000.0, 72_000.0, 0.076),
    Bracket::new(72_000.0, 96_000.0, 0.079),
    Bracket::new(96_000.0, 300_000.0, 0.0825),
    Bracket::new(300_000.0, 350_000.0, 0.09),
    Bracket::new(350_000.0, 400_000.0, 0.10),
    Bracket::new(400_000.0, INF, 0.11),
];

const IA_SINGLE: [Bracket; 3] = [
    Bracket::new(0.0, 6_210.0, 0.044),
    Bracket::new(6_210.0, 31_050.0, 0.057),
    Bracket::new(31_050.0, INF, 0.06),
];
const IA_JOINT: [Bracket; 3] = [
    Bracket::new(0.0, 12_420.0, 0.044),
    Bracket::new(12_420.0, 62_100.0, 0.057),
    Bracket::new(62_100.0, INF, 0.06),
];

const KS_SINGLE: [Bracket; 3] = [
    Bracket::new(0.0, 15_000.0, 0.031),
    Bracket::new(15_000.0, 30_000.0, 0.0525),
    Bracket::new(30_000.0, INF, 0.057),
];
const KS_JOINT: [Bracket; 3] = [
    Bracket::new(0.0, 30_000.0, 0.031),
    Bracket::new(30_000.0, 60_000.0, 0.0525),
    Bracket::new(60_000.0, INF, 0.057),
];

const LA_SINGLE: [Bracket; 3] = [
    Bracket::new(0.0, 12_500.0, 0.0185),
    Bracket::new(12_500.0, 50_000.0, 0.035),
    Bracket::new(50_000.0, INF, 0.0425),
];
const LA_JOINT: [Bracket; 3] = [
    Bracket::new(0.0, 25_000.0, 0.0185),
    Bracket::new(25_000.0, 100_000.0, 0.035),
    Bracket::new(100_000.0, INF, 0.0425),
];

const ME_SINGLE: [Bracket; 3] = [
    Bracket::new(0.0, 26_050.0, 0.058),
    Bracket::new(26_050.0, 61_600.0, 0.0675),
    Bracket::new(61_600.0, INF, 0.0715),
];
const ME_JOINT: [Bracket; 3] = [
    Bracket::new(0.0, 52_100.0, 0.058),
    Bracket::new(52_100.0, 123_250.0, 0.0675),
    Bracket::new(123_250.0, INF, 0.0715),
];
const ME_HOH: [Bracket; 3] = [
    Bracket::new(0.0, 39_050.0, 0.058),
    Bracket::new(39_050.0, 92_450.0, 0.0675),
    Bracket::new(92_450.0, INF, 0.0715),
];

const MD_SINGLE: [Bracket; 8] = [
    Bracket::new(0.0, 1_000.0, 0.02),
    Bracket::new(1_000.0, 2_000.0, 0.03),
    Bracket::new(2_000.0, 3_000.0, 0.04),
    Bracket::new(3_000.0, 100_000.0, 0.0475),
    Bracket::new(100_000.0, 125_000.0, 0.05),
    Bracket::new(125_000.0, 150_000.0, 0.0525),
    Bracket::new(150_000.0, 250_000.0, 0.055),
    Bracket::new(250_000.0, INF, 0.0575),
];
const MD_JOINT: [Bracket; 8] = [
    Bracket::new(0.0, 1_000.0, 0.02),
    Bracket::new(1_000.0, 2_000.0, 0.03),
    Bracket::new(2_000.0, 3_000.0, 0.04),
    Bracket::new(3_000.0, 150_000.0, 0.0475),
    Bracket::new(150_000.0, 175_000.0, 0.05),
    Bracket::new(175_000.0, 225_000.0, 0.0525),
    Bracket::new(225_000.0, 300_000.0, 0.055),
    Bracket::new(300_000.0, INF, 0.0575),
];

const MN_SINGLE: [Bracket; 4] = [
    Bracket::new(0.0, 31_690.0, 0.0535),
    Bracket::new(31_690.0, 104_090.0, 0.068),
    Bracket::new(104_090.0, 193_240.0, 0.0785),
    Bracket::new(193_240.0, INF, 0.0985),
];
const MN_JOINT: [Bracket; 4] = [
    Bracket::new(0.0, 46_330.0, 0.0535),
    Bracket::new(46_330.0, 184_040.0, 0.068),
    Bracket::new(184_040.0, 321_450.0, 0.0785),
    Bracket::new(321_450.0, INF, 0.0985),
];
const MN_HOH: [Bracket; 4] = [
    Bracket::new(0.0, 39_010.0, 0.0535),
    Bracket::new(39_010.0, 156_670.0, 0.068),
    Bracket::new(156_670.0, 256_880.0, 0.0785),
    Bracket::new(256_880.0, INF, 0.0985),
];

const MS_ALL: [Bracket; 2] = [
    Bracket::new(0.0, 10_000.0, 0.0),
    Bracket::new(10_000.0, INF, 0.047),
];

const MO_ALL: [Bracket; 8] = [
    Bracket::new(0.0, 1_273.0, 0.0),
    Bracket::new(1_273.0, 2_546.0, 0.02),
    Bracket::new(2_546.0, 3_819.0, 0.025),
    Bracket::new(3_819.0, 5_092.0, 0.03),
    Bracket::new(5_092.0, 6_365.0, 0.035),
    Bracket::new(6_365.0, 7_638.0, 0.04),
    Bracket::new(7_638.0, 8_911.0, 0.045),
    Bracket::new(8_911.0, INF, 0.048),
];

const MT_SINGLE: [Bracket; 2] = [
    Bracket::new(0.0, 20_500.0, 0.047),
    Bracket::new(20_500.0, INF, 0.059),
];
const MT_JOINT: [Bracket; 2] = [
    Bracket::new(0.0, 41_000.0, 0.047),
    Bracket::new(41_000.0, INF, 0.059),
];
const MT_HOH: [Bracket; 2] = [
    Bracket::new(0.0, 30_750.0, 0.047),
    Bracket::new(30_750.0, INF, 0.059),
];

const NE_SINGLE: [Bracket; 4] = [
    Bracket::new(0.0, 3_700.0, 0.0246),
    Bracket::new(3_700.0, 22_170.0, 0.0351),
    Bracket::new(22_170.0, 35_730.0, 0.0501),
    Bracket::new(35_730.0, INF, 0.0584),
];
const NE_JOINT: [Bracket; 4] = [
    Bracket::new(0.0, 7_390.0, 0.0246),
    Bracket::new(7_390.0, 44_350.0, 0.0351),
    Bracket::new(44_350.0, 71_460.0, 0.0501),
    Bracket::new(71_460.0, INF, 0.0584),
];

const NJ_SINGLE: [Bracket; 7] = [
    Bracket::new(0.0, 20_000.0, 0.014),
    Bracket::new(20_000.0, 35_000.0, 0.0175),
    Bracket::new(35_000.0, 40_000.0, 0.035),
    Bracket::new(40_000.0, 75_000.0, 0.05525),
    Bracket::new(75_000.0, 500_000.0, 0.0637),
    Bracket::new(500_000.0, 1_000_000.0, 0.0897),
    Bracket::new(1_000_000.0, INF, 0.1075),
];
const NJ_JOINT: [Bracket; 8] = [
    Bracket::new(0.0, 20_000.0, 0.014),
    Bracket::new(20_000.0, 50_000.0, 0.0175),
    Bracket::new(50_000.0, 70_000.0, 0.0245),
    Bracket::new(70_000.0, 80_000.0, 0.035),
    Bracket::new(80_000.0, 150_000.0, 0.05525),
    Bracket::new(150_000.0, 500_000.0, 0.0637),
    Bracket::new(500_000.0, 1_000_000.0, 0.0897),
    Bracket::new(1_000_000.0, INF, 0.1075),
];

const NM_SINGLE: [Bracket; 5] = [
    Bracket::new(0.0, 5_500.0, 0.017),
    Bracket::new(5_500.0, 11_000.0, 0.032),
    Bracket::new(11_000.0, 16_000.0, 0.047),
    Bracket::new(16_000.0, 210_000.0, 0.049),
    Bracket::new(210_000.0, INF, 0.059),
];
const NM_JOINT: [Bracket; 5] = [
    Bracket::new(0.0, 8_000.0, 0.017),
    Bracket::new(8_000.0, 16_000.0, 0.032),
    Bracket::new(16_000.0, 24_000.0, 0.047),
    Bracket::new(24_000.0, 315_000.0, 0.049),
    Bracket::new(315_000.0, INF, 0.059),
];

const NY_SINGLE: [Bracket; 9] = [
    Bracket::new(0.0, 8_500.0, 0.04),
    Bracket::new(8_500.0, 11_700.0, 0.045),
    Bracket::new(11_700.0, 13_900.0, 0.0525),
    Bracket::new(13_900.0, 80_650.0, 0.055),
    Bracket::new(80_650.0, 215_400.0, 0.06),
    Bracket::new(215_400.0, 1_077_550.0, 0.0685),
    Bracket::new(1_077_550.0, 5_000_000.0, 0.0965),
    Bracket::new(5_000_000.0, 25_000_000.0, 0.103),
    Bracket::new(25_000_000.0, INF, 0.109),
];
const NY_JOINT: [Bracket; 9] = [
    Bracket::new(0.0, 17_150.0, 0.04),
    Bracket::new(17_150.0, 23_600.0, 0.045),
    Bracket::new(23_600.0, 27_900.0, 0.0525),
    Bracket::new(27_900.0, 161_550.0, 0.055),
    Bracket::new(161_550.0, 323_200.0, 0.06),
    Bracket::new(323_200.0, 2_155_350.0, 0.0685),
    Bracket::new(2_155_350.0, 5_000_000.0, 0.0965),
    Bracket::new(5_000_000.0, 25_000_000.0, 0.103),
    Bracket::new(25_000_000.0, INF, 0.109),
];
const NY_HOH: [Bracket; 9] = [
    Bracket::new(0.0, 12_800.0, 0.04),
    Bracket::new(12_800.0, 17_650.0, 0.045),
    Bracket::new(17_650.0, 20_900.0, 0.0525),
    Bracket::new(20_900.0, 107_650.0, 0.055),
    Bracket::new(107_650.0, 269_300.0, 0.06),
    Bracket::new(269_300.0, 1_616_450.0, 0.0685),
    Bracket::new(1_616_450.0, 5_000_000.0, 0.0965),
    Bracket::new(5_000_000.0, 25_000_000.0, 0.103),
    Bracket::new(25_000_000.0, INF, 0.109),
];

const ND_SINGLE: [Bracket; 3] = [
    Bracket::new(0.0, 47_150.0, 0.0),
    Bracket::new(47_150.0, 238_200.0, 0.0195),
    Bracket::new(238_200.0, INF, 0.025),
];
const ND_JOINT: [Bracket; 3] = [
    Bracket::new(0.0, 78_775.0, 0.0),
    Bracket::new(78_775.0, 289_975.0, 0.0195),
    Bracket::new(289_975.0, INF, 0.025),
];
const ND_HOH: [Bracket; 3] = [
    Bracket::new(0.0, 63_175.0, 0.0),
    Bracket::new(63_175.0, 264_100.0, 0.0195),
    Bracket::new(264_100.0, INF, 0.025),
];

const OH_ALL: [Bracket; 3] = [
    Bracket::new(0.0, 26_050.0, 0.0),
    Bracket::new(26_050.0, 100_000.0, 0.0275),
    Bracket::new(100_000.0, INF, 0.035),
];

const OK_SINGLE: [Bracket; 6] = [
    Bracket::new(0.0, 1_000.0, 0.0025),
    Bracket::new(1_000.0, 2_500.0, 0.0075),
    Bracket::new(2_500.0, 3_750.0, 0.0175),
    Bracket::new(3_750.0, 4_900.0, 0.0275),
    Bracket::new(4_900.0, 7_200.0, 0.0375),
    Bracket::new(7_200.0, INF, 0.0475),
];
const OK_JOINT: [Bracket; 6] = [
    Bracket::new(0.0, 2_000.0, 0.0025),
    Bracket::new(2_000.0, 5_000.0, 0.0075),
    Bracket::new(5_000.0, 7_500.0, 0.0175),
    Bracket::new(7_500.0, 9_800.0, 0.0275),
    Bracket::new(9_800.0, 14_400.0, 0.0375),
    Bracket::new(14_400.0, INF, 0.0475),
];

const OR_SINGLE: [Bracket; 4] = [
    Bracket::new(0.0, 4_300.0, 0.0475),
    Bracket::new(4_300.0, 10_750.0, 0.0675),
    Bracket::new(10_750.0, 125_000.0, 0.0875),
    Bracket::new(125_000.0, INF, 0.099),
];
const OR_JOINT: [Bracket; 4] = [
    Bracket::new(0.0, 8_600.0, 0.0475),
    Bracket::new(8_600.0, 21_500.0, 0.0675),
    Bracket::new(21_500.0, 250_000.0, 0.0875),
    Bracket::new(250_000.0, INF, 0.099),
];

const RI_ALL: [Bracket; 3] = [
    Bracket::new(0.0, 77_450.0, 0.0375),
    Bracket::new(77_450.0, 176_050.0, 0.0475),
    Bracket::new(176_050.0, INF, 0.0599),
];

const SC_ALL: [Bracket; 3] = [
    Bracket::new(0.0, 3_460.0, 0.0),
    Bracket::new(3_460.0, 17_330.0, 0.03),
    Bracket::new(17_330.0, INF, 0.062),
];

const VT_SINGLE: [Bracket; 4] = [
    Bracket::new(0.0, 45_400.0, 0.0335),
    Bracket::new(45_400.0, 110_050.0, 0.066),
    Bracket::new(110_050.0, 229_550.0, 0.076),
    Bracket::new(229_550.0, INF, 0.0875),
];
const VT_JOINT: [Bracket; 4] = [
    Bracket::new(0.0, 75_850.0, 0.0335),
    Bracket::new(75_850.0, 183_400.0, 0.066),
    Bracket::new(183_400.0, 279_450.0, 0.076),
    Bracket::new(279_450.0, INF, 0.0875),
];
const VT_HOH: [Bracket; 4] = [
    Bracket::new(0.0, 60_850.0, 0.0335),
    Bracket::new(60_850.0, 157_150.0, 0.066),
    Bracket::new(157_150.0, 254_500.0, 0.076),
    Bracket::new(254_500.0, INF, 0.0875),
];

const VA_ALL: [Bracket; 4] = [
    Bracket::new(0.0, 3_000.0, 0.02),
    Bracket::new(3_000.0, 5_000.0, 0.03),
    Bracket::new(5_000.0, 17_000.0, 0.05),
    Bracket::new(17_000.0, INF, 0.0575),
];

const WV_ALL: [Bracket; 5] = [
    Bracket::new(0.0, 10_000.0, 0.0236),
    Bracket::new(10_000.0, 25_000.0, 0.0315),
    Bracket::new(25_000.0, 40_000.0, 0.0354),
    Bracket::new(40_000.0, 60_000.0, 0.0472),
    Bracket::new(60_000.0, INF, 0.0512),
];

const WI_SINGLE: [Bracket; 4] = [
    Bracket::new(0.0, 14_320.0, 0.035),
    Bracket::new(14_320.0, 28_640.0, 0.044),
    Bracket::new(28_640.0, 315_310.0, 0.053),
    Bracket::new(315_310.0, INF, 0.0765),
];
const WI_JOINT: [Bracket; 4] = [
    Bracket::new(0.0, 19_090.0, 0.035),
    Bracket::new(19_090.0, 38_190.0, 0.044),
    Bracket::new(38_190.0, 420_420.0, 0.053),
    Bracket::new(420_420.0, INF, 0.0765),
];

use StateDeduction::{Federal, Fixed};

/// Every state plus DC, sorted by code
pub static STATE_TABLE: [StateTaxConfig; 51] = [
    StateTaxConfig::no_tax("AK", "Alaska"),
    StateTaxConfig::progressive(
        "AL",
        "Alabama",
        StateSchedules::split(&AL_SINGLE, &AL_JOINT),
        Fixed(StatusAmounts::pair(2_500.0, 7_500.0)),
        StatusAmounts::pair(1_500.0, 3_000.0),
    ),
    StateTaxConfig::progressive(
        "AR",
        "Arkansas",
        StateSchedules::uniform(&AR_ALL),
        Fixed(StatusAmounts::pair(2_340.0, 4_680.0)),
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::flat("AZ", "Arizona", 0.025, Federal, StatusAmounts::ZERO),
    StateTaxConfig::progressive(
        "CA",
        "California",
        StateSchedules::full(&CA_SINGLE, &CA_JOINT, &CA_HOH),
        Fixed(StatusAmounts::new(5_540.0, 11_080.0, 11_080.0)),
        StatusAmounts::ZERO,
    )
    .taxing_hsa()
    .with_surtax(1_000_000.0, 0.01),
    StateTaxConfig::flat("CO", "Colorado", 0.0425, Federal, StatusAmounts::ZERO),
    StateTaxConfig::progressive(
        "CT",
        "Connecticut",
        StateSchedules::full(&CT_SINGLE, &CT_JOINT, &CT_HOH),
        StateDeduction::None,
        StatusAmounts::new(15_000.0, 24_000.0, 19_000.0),
    ),
    StateTaxConfig::progressive(
        "DC",
        "District of Columbia",
        StateSchedules::uniform(&DC_ALL),
        Federal,
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::progressive(
        "DE",
        "Delaware",
        StateSchedules::uniform(&DE_ALL),
        Fixed(StatusAmounts::pair(3_250.0, 6_500.0)),
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::no_tax("FL", "Florida"),
    StateTaxConfig::flat(
        "GA",
        "Georgia",
        0.0539,
        Fixed(StatusAmounts::pair(12_000.0, 24_000.0)),
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::progressive(
        "HI",
        "Hawaii",
        StateSchedules::split(&HI_SINGLE, &HI_JOINT),
        Fixed(StatusAmounts::new(2_200.0, 4_400.0, 3_212.0)),
        StatusAmounts::pair(1_144.0, 2_288.0),
    ),
    StateTaxConfig::progressive(
        "IA",
        "Iowa",
        StateSchedules::split(&IA_SINGLE, &IA_JOINT),
        Federal,
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::flat("ID", "Idaho", 0.05695, Federal, StatusAmounts::ZERO),
    StateTaxConfig::flat(
        "IL",
        "Illinois",
        0.0495,
        StateDeduction::None,
        StatusAmounts::pair(2_775.0, 5_550.0),
    ),
    StateTaxConfig::flat(
        "IN",
        "Indiana",
        0.0305,
        StateDeduction::None,
        StatusAmounts::pair(1_000.0, 2_000.0),
    ),
    StateTaxConfig::progressive(
        "KS",
        "Kansas",
        StateSchedules::split(&KS_SINGLE, &KS_JOINT),
        Fixed(StatusAmounts::new(3_500.0, 8_000.0, 6_000.0)),
        StatusAmounts::pair(2_250.0, 4_500.0),
    ),
    StateTaxConfig::flat(
        "KY",
        "Kentucky",
        0.04,
        Fixed(StatusAmounts::pair(3_160.0, 6_320.0)),
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::progressive(
        "LA",
        "Louisiana",
        StateSchedules::split(&LA_SINGLE, &LA_JOINT),
        StateDeduction::None,
        StatusAmounts::new(4_500.0, 9_000.0, 9_000.0),
    ),
    StateTaxConfig::flat(
        "MA",
        "Massachusetts",
        0.05,
        StateDeduction::None,
        StatusAmounts::new(4_400.0, 8_800.0, 6_800.0),
    )
    .with_surtax(1_053_750.0, 0.04),
    StateTaxConfig::progressive(
        "MD",
        "Maryland",
        StateSchedules::full(&MD_SINGLE, &MD_JOINT, &MD_JOINT),
        Fixed(StatusAmounts::pair(2_550.0, 5_150.0)),
        StatusAmounts::pair(3_200.0, 6_400.0),
    ),
    StateTaxConfig::progressive(
        "ME",
        "Maine",
        StateSchedules::full(&ME_SINGLE, &ME_JOINT, &ME_HOH),
        Federal,
        StatusAmounts::pair(5_000.0, 10_000.0),
    ),
    StateTaxConfig::flat(
        "MI",
        "Michigan",
        0.0425,
        StateDeduction::None,
        StatusAmounts::pair(5_600.0, 11_200.0),
    ),
    StateTaxConfig::progressive(
        "MN",
        "Minnesota",
        StateSchedules::full(&MN_SINGLE, &MN_JOINT, &MN_HOH),
        Fixed(StatusAmounts::new(14_575.0, 29_150.0, 21_900.0)),
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::progressive(
        "MO",
        "Missouri",
        StateSchedules::uniform(&MO_ALL),
        Federal,
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::progressive(
        "MS",
        "Mississippi",
        StateSchedules::uniform(&MS_ALL),
        Fixed(StatusAmounts::new(2_300.0, 4_600.0, 3_400.0)),
        StatusAmounts::new(6_000.0, 12_000.0, 8_000.0),
    ),
    StateTaxConfig::progressive(
        "MT",
        "Montana",
        StateSchedules::full(&MT_SINGLE, &MT_JOINT, &MT_HOH),
        Federal,
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::flat(
        "NC",
        "North Carolina",
        0.045,
        Fixed(StatusAmounts::new(12_750.0, 25_500.0, 19_125.0)),
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::progressive(
        "ND",
        "North Dakota",
        StateSchedules::full(&ND_SINGLE, &ND_JOINT, &ND_HOH),
        Federal,
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::progressive(
        "NE",
        "Nebraska",
        StateSchedules::split(&NE_SINGLE, &NE_JOINT),
        Fixed(StatusAmounts::new(8_300.0, 16_600.0, 12_200.0)),
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::no_tax("NH", "New Hampshire"),
    StateTaxConfig::progressive(
        "NJ",
        "New Jersey",
        StateSchedules::full(&NJ_SINGLE, &NJ_JOINT, &NJ_JOINT),
        StateDeduction::None,
        StatusAmounts::pair(1_000.0, 2_000.0),
    )
    .taxing_hsa(),
    StateTaxConfig::progressive(
        "NM",
        "New Mexico",
        StateSchedules::full(&NM_SINGLE, &NM_JOINT, &NM_JOINT),
        Federal,
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::no_tax("NV", "Nevada"),
    StateTaxConfig::progressive(
        "NY",
        "New York",
        StateSchedules::full(&NY_SINGLE, &NY_JOINT, &NY_HOH),
        Fixed(StatusAmounts::new(8_000.0, 16_050.0, 11_200.0)),
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::progressive(
        "OH",
        "Ohio",
        StateSchedules::uniform(&OH_ALL),
        StateDeduction::None,
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::progressive(
        "OK",
        "Oklahoma",
        StateSchedules::split(&OK_SINGLE, &OK_JOINT),
        Fixed(StatusAmounts::new(6_350.0, 12_700.0, 9_350.0)),
        StatusAmounts::pair(1_000.0, 2_000.0),
    ),
    StateTaxConfig::progressive(
        "OR",
        "Oregon",
        StateSchedules::full(&OR_SINGLE, &OR_JOINT, &OR_JOINT),
        Fixed(StatusAmounts::new(2_745.0, 5_495.0, 4_420.0)),
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::flat("PA", "Pennsylvania", 0.0307, StateDeduction::None, StatusAmounts::ZERO),
    StateTaxConfig::progressive(
        "RI",
        "Rhode Island",
        StateSchedules::uniform(&RI_ALL),
        Fixed(StatusAmounts::new(10_550.0, 21_150.0, 15_850.0)),
        StatusAmounts::pair(4_950.0, 9_900.0),
    ),
    StateTaxConfig::progressive(
        "SC",
        "South Carolina",
        StateSchedules::uniform(&SC_ALL),
        Federal,
        StatusAmounts::ZERO,
    ),
    StateTaxConfig::no_tax("SD", "South Dakota"),
    StateTaxConfig::no_tax("TN", "Tennessee"),
    StateTaxConfig::no_tax("TX", "Texas"),
    StateTaxConfig::flat("UT", "Utah", 0.0455, StateDeduction::None, StatusAmounts::ZERO),
    StateTaxConfig::progressive(
        "VA",
        "Virginia",
        StateSchedules::uniform(&VA_ALL),
        Fixed(StatusAmounts::pair(8_000.0, 16_000.0)),
        StatusAmounts::pair(930.0, 1_860.0),
    ),
    StateTaxConfig::progressive(
        "VT",
        "Vermont",
        StateSchedules::full(&VT_SINGLE, &VT_JOINT, &VT_HOH),
        Fixed(StatusAmounts::new(7_400.0, 14_850.0, 11_100.0)),
        StatusAmounts::pair(4_850.0, 9_700.0),
    ),
    StateTaxConfig::no_tax("WA", "Washington"),
    StateTaxConfig::progressive(
        "WI",
        "Wisconsin",
        StateSchedules::split(&WI_SINGLE, &WI_JOINT),
        Fixed(StatusAmounts::new(13_230.0, 24_490.0, 17_090.0)),
        StatusAmounts::pair(700.0, 1_400.0),
    ),
    StateTaxConfig::progressive(
        "WV",
        "West Virginia",
        StateSchedules::uniform(&WV_ALL),
        StateDeduction::None,
        StatusAmounts::pair(2_000.0, 4_000.0),
    ),
    StateTaxConfig::no_tax("WY", "Wyoming"),
];

/// Look up a state by its two-letter code (case-insensitive)
pub fn state_config(code: &str) -> Option<&'static StateTaxConfig> {
    let code = code.trim();
    STATE_TABLE.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// State income tax.
///
/// `federal_agi` already excludes every pre-tax category; states that tax HSA
/// contributions get them added back here. Unknown codes produce a zero result.
pub fn calculate_state_tax(
    federal_agi: f64,
    status: FilingStatus,
    state_code: &str,
    pre_tax: &PreTaxContributions,
) -> StateTaxBreakdown {
    let Some(config) = state_config(state_code) else {
        log::debug!("unrecognized state code {state_code:?}, no state tax applied");
        return StateTaxBreakdown::default();
    };

    let hsa_add_back = if config.taxes_hsa_contributions {
        pre_tax.hsa.max(0.0)
    } else {
        0.0
    };
    let state_agi = (federal_agi + hsa_add_back).max(0.0);

    let mut breakdown = StateTaxBreakdown {
        state_code: config.code.to_string(),
        kind: config.kind(),
        adjusted_gross_income: state_agi,
        hsa_add_back,
        ..Default::default()
    };

    if config.policy == StatePolicy::None {
        return breakdown;
    }

    let deduction = config.deduction.amount(status) + config.exemption.for_status(status);
    let taxable_income = (state_agi - deduction).max(0.0);
    breakdown.deduction = deduction;
    breakdown.taxable_income = taxable_income;

    breakdown.brackets = match config.policy {
        StatePolicy::Flat { rate } => apply_brackets(taxable_income, &[Bracket::new(0.0, INF, rate)]),
        StatePolicy::Progressive(schedules) => {
            apply_brackets(taxable_income, schedules.for_status(status))
        }
        StatePolicy::None => Vec::new(),
    };
    let base_tax: f64 = breakdown.brackets.iter().map(|b| b.tax).sum();
    let mut marginal = marginal_rate(&breakdown.brackets);

    breakdown.surtax = config.surtax.map(|s| {
        let taxable_amount = (taxable_income - s.threshold).max(0.0);
        SurtaxLine {
            threshold: s.threshold,
            rate: s.rate,
            taxable_amount,
            tax: taxable_amount * s.rate,
        }
    });
    let surtax = match &breakdown.surtax {
        Some(line) if line.taxable_amount > 0.0 => {
            marginal += line.rate;
            line.tax
        }
        _ => 0.0,
    };

    breakdown.tax = base_tax + surtax;
    breakdown.marginal_rate = marginal;
    breakdown
}
