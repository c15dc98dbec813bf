//! Soundness signal derived from a single stored deadline.
//!
//! Only `when_default` is persisted. The visible status is a function of that
//! deadline and the current block time, so an expired soft default reads as
//! `Disabled` without another `refresh`.

use odra::prelude::*;

/// `when_default` while the collateral is sound.
pub const NEVER: u64 = u64::MAX;

/// Soundness of the collateral at a point in time.
#[odra::odra_type]
#[derive(Copy)]
pub enum CollateralStatus {
    /// Fully backing
    Sound,
    /// Soft default pending confirmation
    Iffy,
    /// Defaulted; terminal
    Disabled,
}

/// The stored default deadline and the rules for moving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefaultTimer {
    when_default: u64,
}

impl Default for DefaultTimer {
    fn default() -> Self {
        Self { when_default: NEVER }
    }
}

impl DefaultTimer {
    /// Timer holding a stored deadline.
    pub fn new(when_default: u64) -> Self {
        Self { when_default }
    }

    /// The deadline; [`NEVER`] while sound.
    pub fn when_default(&self) -> u64 {
        self.when_default
    }

    /// Status the deadline implies at `now`.
    pub fn status_at(&self, now: u64) -> CollateralStatus {
        if self.when_default == NEVER {
            CollateralStatus::Sound
        } else if self.when_default > now {
            CollateralStatus::Iffy
        } else {
            CollateralStatus::Disabled
        }
    }

    /// Whether the deadline has been reached.
    pub fn already_defaulted(&self, now: u64) -> bool {
        self.when_default <= now
    }

    /// Record the status the latest evaluation calls for.
    ///
    /// A confirmed default is never undone and a pending deadline is never
    /// pushed further out.
    pub fn mark(&mut self, status: CollateralStatus, now: u64, delay_until_default: u64) {
        if self.already_defaulted(now) {
            return;
        }
        self.when_default = match status {
            CollateralStatus::Sound => NEVER,
            // one below NEVER so a far deadline still reads as Iffy
            CollateralStatus::Iffy => self
                .when_default
                .min(now.saturating_add(delay_until_default).min(NEVER - 1)),
            CollateralStatus::Disabled => now,
        };
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const DELAY: u64 = 86_400_000;

    #[test]
    fn starts_sound() {
        let timer = DefaultTimer::default();
        assert_eq!(timer.when_default(), NEVER);
        assert_eq!(timer.status_at(0), CollateralStatus::Sound);
        assert_eq!(timer.status_at(u64::MAX - 1), CollateralStatus::Sound);
    }

    #[test]
    fn soft_default_expires_without_another_mark() {
        let mut timer = DefaultTimer::default();
        timer.mark(CollateralStatus::Iffy, 1_000, DELAY);
        assert_eq!(timer.when_default(), 1_000 + DELAY);
        assert_eq!(timer.status_at(1_000 + DELAY - 1), CollateralStatus::Iffy);
        assert_eq!(timer.status_at(1_000 + DELAY), CollateralStatus::Disabled);
    }

    #[test]
    fn repeated_iffy_keeps_first_deadline() {
        let mut timer = DefaultTimer::default();
        timer.mark(CollateralStatus::Iffy, 1_000, DELAY);
        timer.mark(CollateralStatus::Iffy, 5_000, DELAY);
        assert_eq!(timer.when_default(), 1_000 + DELAY);
    }

    #[test]
    fn soft_default_is_reversible_until_deadline() {
        let mut timer = DefaultTimer::default();
        timer.mark(CollateralStatus::Iffy, 1_000, DELAY);
        timer.mark(CollateralStatus::Sound, 2_000, DELAY);
        assert_eq!(timer.when_default(), NEVER);
        assert_eq!(timer.status_at(2_000), CollateralStatus::Sound);
    }

    #[test]
    fn hard_default_is_immediate_and_final() {
        let mut timer = DefaultTimer::default();
        timer.mark(CollateralStatus::Disabled, 7_000, DELAY);
        assert_eq!(timer.when_default(), 7_000);
        assert_eq!(timer.status_at(7_000), CollateralStatus::Disabled);

        timer.mark(CollateralStatus::Sound, 8_000, DELAY);
        assert_eq!(timer.when_default(), 7_000);
    }

    #[test]
    fn expired_soft_default_cannot_recover() {
        let mut timer = DefaultTimer::default();
        timer.mark(CollateralStatus::Iffy, 1_000, DELAY);
        timer.mark(CollateralStatus::Sound, 1_000 + DELAY, DELAY);
        assert_eq!(timer.when_default(), 1_000 + DELAY);
        assert!(timer.already_defaulted(1_000 + DELAY));
    }

    #[test]
    fn deadline_saturates() {
        let mut timer = DefaultTimer::default();
        timer.mark(CollateralStatus::Iffy, u64::MAX - 10, DELAY);
        assert_eq!(timer.when_default(), NEVER - 1);
        assert_eq!(timer.status_at(u64::MAX - 10), CollateralStatus::Iffy);
    }
}
