//! Monotonic tick source shared by every timer in the crate.
//!
//! Cooldowns, durations and channels store absolute [`Tick`] instants and
//! derive remaining time from [`Clock::now`]; nothing caches "now".

use std::cell::Cell;
use std::fmt;

/// Discrete time unit delivered by the host scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Ticks left until `self`, clamped at zero.
    #[inline]
    pub fn remaining_from(self, now: Tick) -> u64 {
        self.0.saturating_sub(now.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_add(rhs))
    }
}

impl std::ops::Sub<u64> for Tick {
    type Output = Tick;
    fn sub(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_sub(rhs))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only view of the current tick.
pub trait Clock {
    fn now(&self) -> Tick;
}

/// Manually advanced clock driven by the scheduler (or by tests).
#[derive(Debug, Default)]
pub struct TickCounter {
    current: Cell<Tick>,
}

impl TickCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(tick: Tick) -> Self {
        Self {
            current: Cell::new(tick),
        }
    }

    /// Advances by one tick and returns the new instant.
    pub fn advance(&self) -> Tick {
        self.advance_by(1)
    }

    pub fn advance_by(&self, ticks: u64) -> Tick {
        let next = self.current.get() + ticks;
        self.current.set(next);
        next
    }

    pub fn set(&self, tick: Tick) {
        self.current.set(tick);
    }
}

impl Clock for TickCounter {
    fn now(&self) -> Tick {
        self.current.get()
    }
}
