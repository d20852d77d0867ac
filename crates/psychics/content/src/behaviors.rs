//! Generic behaviours usable from data files without custom code.

use psychics_core::{Ability, AbilityBehavior, Activation, Cast, Result};

/// Always-on ability with no cast. Its effect lives in the host, keyed by the
/// ability name.
#[derive(Debug, Default)]
pub struct Passive;

impl AbilityBehavior for Passive {}

/// Wand-triggered ability that pays its cost and starts its cooldown.
///
/// Any damage or healing is left to the host, which reads
/// [`Ability::damage`] or [`Ability::heal_amount`] after the cast.
#[derive(Debug, Default)]
pub struct Instant;

impl AbilityBehavior for Instant {
    fn activation(&self) -> Activation {
        Activation::ANY_ACTION
    }

    fn on_cast(&mut self, ability: &Ability, _cast: &Cast) -> Result<()> {
        ability.exhaust()?;
        tracing::trace!(ability = ability.name(), "instant ability cast");
        Ok(())
    }
}
