use crate::math::Decimal;

/// Movement of the reference-per-token rate since the last confirmed reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Appreciation {
    /// Grew since the last reading
    Increased,
    /// Same as the last reading
    Unchanged,
    /// Backing regressed; never transient
    Decreased,
}

/// Holds the last confirmed, non-decreasing `ref_per_tok`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppreciationTracker {
    previous: Decimal,
}

impl AppreciationTracker {
    /// Start from the last confirmed rate.
    pub fn new(previous: Decimal) -> Self {
        Self { previous }
    }

    /// Last confirmed rate.
    pub fn previous(&self) -> Decimal {
        self.previous
    }

    /// Compare `current` with the confirmed rate and advance unless it fell.
    pub fn observe(&mut self, current: Decimal) -> Appreciation {
        let movement = match current.cmp(&self.previous) {
            core::cmp::Ordering::Greater => Appreciation::Increased,
            core::cmp::Ordering::Equal => Appreciation::Unchanged,
            core::cmp::Ordering::Less => return Appreciation::Decreased,
        };
        self.previous = current;
        movement
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use odra::casper_types::U256;

    fn rate(raw: u64) -> Decimal {
        Decimal::from_scaled_val(U256::from(raw))
    }

    #[test]
    fn advances_on_growth_and_flat_readings() {
        let mut tracker = AppreciationTracker::new(rate(1_000_000));
        assert_eq!(tracker.observe(rate(1_000_500)), Appreciation::Increased);
        assert_eq!(tracker.previous(), rate(1_000_500));
        assert_eq!(tracker.observe(rate(1_000_500)), Appreciation::Unchanged);
        assert_eq!(tracker.previous(), rate(1_000_500));
    }

    #[test]
    fn keeps_previous_on_regression() {
        let mut tracker = AppreciationTracker::new(rate(1_000_000));
        assert_eq!(tracker.observe(rate(990_000)), Appreciation::Decreased);
        assert_eq!(tracker.previous(), rate(1_000_000));
        // recovery is measured against the untouched high mark
        assert_eq!(tracker.observe(rate(1_000_000)), Appreciation::Unchanged);
    }
}
