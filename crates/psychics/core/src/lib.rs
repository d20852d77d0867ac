//! Ability-casting core for psychic espers.
//!
//! Every entity that can use psychic powers is wrapped by an [`Esper`]. An
//! esper hosts at most one [`Psychic`], instantiated from an immutable
//! [`PsychicConcept`]. The psychic owns a mana pool, an optional [`Channel`]
//! and one [`Ability`] per [`AbilityConcept`] the concept lists.
//!
//! Casting is gated by [`Ability::test`], which reports a [`TestResult`]
//! rather than an error. Concrete abilities plug in through the
//! [`AbilityBehavior`] hook trait.
//!
//! Time is discrete: the host advances a [`Clock`] and calls
//! [`Esper::tick`], which completes due channels and regenerates mana. The
//! core is single-threaded (`Rc`/`RefCell`) and never touches the
//! filesystem; persisted state is a plain [`ConfigSection`].
pub mod ability;
pub mod clock;
pub mod config;
pub mod entity;
pub mod env;
pub mod error;
pub mod esper;
pub mod psychic;
pub mod section;
pub mod stats;

pub use ability::{
    Ability, AbilityBehavior, AbilityConcept, AbilityFactory, Activation, Cast, CastOptions,
    DamageRequest, Payload, Targeter, TestResult, WandAction, WandActions,
};
pub use clock::{Clock, Tick, TickCounter};
pub use config::PsychicsConfig;
pub use entity::{AttributeModifier, Entity, EntityAttribute};
pub use env::Env;
pub use error::{ErrorSeverity, HookError, HookResult, PsychicError, Result};
pub use esper::Esper;
pub use psychic::{Channel, Psychic, PsychicConcept, PsychicConceptRegistry};
pub use section::{ConfigSection, ConfigValue};
pub use stats::{Damage, DamageType, EsperAttribute, EsperStatistic};
