//! Shared context handed to espers and psychics.
//!
//! The [`Env`] replaces process-wide singletons: whoever owns the espers
//! (normally the runtime manager) builds one and passes it down explicitly.

use std::fmt;
use std::rc::Rc;

use crate::clock::{Clock, Tick};
use crate::config::PsychicsConfig;

/// Clock plus tunables for one set of espers.
#[derive(Clone)]
pub struct Env {
    clock: Rc<dyn Clock>,
    config: PsychicsConfig,
}

impl Env {
    pub fn new(clock: Rc<dyn Clock>, config: PsychicsConfig) -> Self {
        Self { clock, config }
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.clock
    }

    pub fn config(&self) -> &PsychicsConfig {
        &self.config
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("now", &self.clock.now())
            .field("config", &self.config)
            .finish()
    }
}
