//! Progressive tax engine: federal income tax, state income tax and FICA
//!
//! Tax tables are immutable data; [`calculate_taxes`] runs the same steps for
//! every filing status and state:
//! 1. federal AGI = gross - all pre-tax contributions
//! 2. federal tax on AGI - standard deduction
//! 3. state tax on the state base (may add back HSA contributions)
//! 4. FICA on gross wages

mod types;
mod federal;
mod state;
mod fica;

pub use types::{
    apply_brackets, marginal_rate, Bracket, BracketTax, FederalTaxBreakdown, FicaBreakdown,
    FilingStatus, PreTaxContributions, StateTaxBreakdown, StateTaxKind, SurtaxLine, TaxResult,
};
pub use federal::{calculate_federal_tax, federal_brackets, federal_standard_deduction};
pub use state::{
    calculate_state_tax, state_config, StateDeduction, StatePolicy, StateSchedules,
    StateTaxConfig, StatusAmounts, Surtax, STATE_TABLE,
};
pub use fica::{
    additional_medicare_threshold, calculate_fica, ADDITIONAL_MEDICARE_RATE, MEDICARE_RATE,
    SOCIAL_SECURITY_RATE, SOCIAL_SECURITY_WAGE_CAP,
};

/// Compute total tax liability for one income year.
///
/// Zero or negative gross income collapses every line to zero.
pub fn calculate_taxes(
    gross_income: f64,
    filing_status: FilingStatus,
    state_code: &str,
    pre_tax: &PreTaxContributions,
) -> TaxResult {
    if gross_income <= 0.0 {
        return TaxResult::zero(filing_status, state_code);
    }

    let total_pre_tax = pre_tax.total();
    let federal_agi = (gross_income - total_pre_tax).max(0.0);

    let federal = calculate_federal_tax(federal_agi, filing_status);
    let state = calculate_state_tax(federal_agi, filing_status, state_code, pre_tax);
    let fica = calculate_fica(gross_income, filing_status);

    let total_tax = federal.tax + state.tax + fica.total;
    let combined_marginal_rate = federal.marginal_rate + state.marginal_rate;

    TaxResult {
        gross_income,
        filing_status,
        pre_tax: *pre_tax,
        total_pre_tax,
        federal,
        state,
        fica,
        total_tax,
        effective_rate: total_tax / gross_income,
        combined_marginal_rate,
        net_income: gross_income - total_tax,
    }
}
