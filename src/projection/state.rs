//! Simulation state carried between periods

/// Running balances of one projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Periods simulated so far (0 before the first transition)
    pub period: u32,

    /// End of period net worth
    pub net_worth: f64,

    pub cumulative_interest: f64,

    /// Sum of period savings; negative savings draw it down
    pub cumulative_contributions: f64,

    /// Annual spend in the starting period, the base of the simple savings rule
    pub base_annual_spend: f64,

    /// Whether the one-shot FI flag has fired
    pub fi_reached: bool,

    /// Whether the one-shot crossover flag has fired
    pub crossover_reached: bool,
}

impl ProjectionState {
    pub fn new(starting_net_worth: f64, base_annual_spend: f64) -> Self {
        Self {
            period: 0,
            net_worth: starting_net_worth,
            cumulative_interest: 0.0,
            cumulative_contributions: 0.0,
            base_annual_spend,
            fi_reached: false,
            crossover_reached: false,
        }
    }

    /// Apply one period's interest and savings
    pub fn advance(&mut self, interest: f64, savings: f64) {
        self.period += 1;
        self.net_worth += interest + savings;
        self.cumulative_interest += interest;
        self.cumulative_contributions += savings;
    }

    /// True exactly once: the first call where `covers_spend` holds
    pub fn mark_fi(&mut self, covers_spend: bool) -> bool {
        if covers_spend && !self.fi_reached {
            self.fi_reached = true;
            return true;
        }
        false
    }

    /// True exactly once: the first time cumulative interest exceeds
    /// cumulative contributions, both strictly positive
    pub fn mark_crossover(&mut self) -> bool {
        if self.crossover_reached {
            return false;
        }
        let crossed = self.cumulative_contributions > 0.0
            && self.cumulative_interest > 0.0
            && self.cumulative_interest > self.cumulative_contributions;
        if crossed {
            self.crossover_reached = true;
        }
        crossed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_fire_once() {
        let mut state = ProjectionState::new(0.0, 0.0);
        assert!(!state.mark_fi(false));
        assert!(state.mark_fi(true));
        assert!(!state.mark_fi(true));
    }

    #[test]
    fn test_crossover_needs_positive_contributions() {
        let mut state = ProjectionState::new(100_000.0, 0.0);
        assert!(!state.mark_crossover());

        // Interest with drawdown: contributions negative, no crossover
        state.advance(7_000.0, -1_000.0);
        assert!(!state.mark_crossover());

        state.advance(7_000.0, 5_000.0);
        assert_eq!(state.cumulative_contributions, 4_000.0);
        assert!(state.mark_crossover());
        assert!(!state.mark_crossover());
        assert_eq!(state.period, 2);
    }
}
