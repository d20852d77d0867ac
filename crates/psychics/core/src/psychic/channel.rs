use std::fmt;
use std::rc::Rc;

use crate::ability::{Ability, Cast, Payload, WandAction};
use crate::clock::Tick;

/// A delayed cast in progress. A psychic holds at most one.
#[derive(Clone)]
pub struct Channel {
    ability: Rc<Ability>,
    cast: Cast,
    started_at: Tick,
    casting_time: u64,
}

impl Channel {
    pub(crate) fn new(ability: Rc<Ability>, cast: Cast, started_at: Tick, casting_time: u64) -> Self {
        Self {
            ability,
            cast,
            started_at,
            casting_time,
        }
    }

    pub fn ability(&self) -> &Rc<Ability> {
        &self.ability
    }

    pub fn cast(&self) -> &Cast {
        &self.cast
    }

    pub fn event(&self) -> &Payload {
        &self.cast.event
    }

    pub fn action(&self) -> WandAction {
        self.cast.action
    }

    pub fn target(&self) -> Option<&Payload> {
        self.cast.target.as_ref()
    }

    pub fn started_at(&self) -> Tick {
        self.started_at
    }

    pub fn casting_time(&self) -> u64 {
        self.casting_time
    }

    pub fn completes_at(&self) -> Tick {
        self.started_at + self.casting_time
    }

    pub fn elapsed(&self, now: Tick) -> u64 {
        now.0.saturating_sub(self.started_at.0)
    }

    pub fn remaining(&self, now: Tick) -> u64 {
        self.completes_at().remaining_from(now)
    }

    /// True once the full casting time has elapsed.
    pub fn is_due(&self, now: Tick) -> bool {
        self.elapsed(now) >= self.casting_time
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("ability", &self.ability.name())
            .field("cast", &self.cast)
            .field("started_at", &self.started_at)
            .field("casting_time", &self.casting_time)
            .finish()
    }
}
