//! Abilities: per-psychic instances of an [`AbilityConcept`].
//!
//! An [`Ability`] owns its timers and the boxed [`AbilityBehavior`] that
//! implements the hooks. It only observes its psychic through a weak handle,
//! so a destroyed psychic is reported as an error instead of kept alive.
//!
//! # Cast protocol
//!
//! ```text
//! try_cast ─► action allowed? ─► test() ─► targeter ─► cost ─► cast
//!                                                               │
//!                          casting_time > 0 ◄───────────────────┤
//!                 Psychic::start_channel                        │ casting_time == 0
//!                          │                                    ▼
//!                 tick ... due ─► on_channel ─► on_cast      on_cast
//!                 interrupt    ─► on_interrupt
//! ```
//!
//! `try_cast` only gates entry; resources are spent by `exhaust`, which the
//! behaviour calls from `on_cast`.

mod behavior;
mod cast;
mod concept;
mod result;

pub use behavior::{AbilityBehavior, Activation, WandAction, WandActions};
pub use cast::{Cast, CastOptions, DamageRequest, Payload, Targeter};
pub use concept::{AbilityConcept, AbilityFactory};
pub use result::{TestResult, format_decimal};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::clock::Tick;
use crate::entity::Entity;
use crate::env::Env;
use crate::error::{HookError, PsychicError, Result};
use crate::esper::Esper;
use crate::psychic::Psychic;
use crate::section::ConfigSection;

const COOLDOWN_TIME: &str = "cooldown-time";

/// Mutable instance of one ability concept, owned by one psychic.
pub struct Ability {
    concept: Rc<AbilityConcept>,
    psychic: Weak<Psychic>,
    env: Rc<Env>,
    cooldown_until: Cell<Tick>,
    duration_until: Cell<Tick>,
    activation: Activation,
    targeter: RefCell<Option<Targeter>>,
    behavior: RefCell<Box<dyn AbilityBehavior>>,
}

impl Ability {
    pub(crate) fn new(
        concept: Rc<AbilityConcept>,
        psychic: Weak<Psychic>,
        env: Rc<Env>,
        behavior: Box<dyn AbilityBehavior>,
    ) -> Self {
        Self {
            concept,
            psychic,
            env,
            cooldown_until: Cell::new(Tick::ZERO),
            duration_until: Cell::new(Tick::ZERO),
            activation: behavior.activation(),
            targeter: RefCell::new(None),
            behavior: RefCell::new(behavior),
        }
    }

    pub fn concept(&self) -> &Rc<AbilityConcept> {
        &self.concept
    }

    pub fn name(&self) -> &str {
        &self.concept.name
    }

    pub fn psychic(&self) -> Result<Rc<Psychic>> {
        self.psychic.upgrade().ok_or(PsychicError::PsychicUnavailable)
    }

    pub fn esper(&self) -> Result<Rc<Esper>> {
        self.psychic()?.esper()
    }

    pub fn entity(&self) -> Result<Rc<dyn Entity>> {
        self.esper()?.entity()
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn is_active(&self) -> bool {
        matches!(self.activation, Activation::Active(_))
    }

    pub fn allowed_actions(&self) -> WandActions {
        self.activation.allowed_actions()
    }

    pub fn targeter(&self) -> Option<Targeter> {
        self.targeter.borrow().clone()
    }

    pub fn set_targeter(&self, targeter: Option<Targeter>) {
        *self.targeter.borrow_mut() = targeter;
    }

    pub fn check_state(&self) -> Result<()> {
        self.psychic()?.check_state()
    }

    pub fn check_enabled(&self) -> Result<()> {
        self.psychic()?.check_enabled()
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Remaining cooldown in ticks; never negative.
    pub fn cooldown(&self) -> u64 {
        self.cooldown_until.get().remaining_from(self.env.now())
    }

    /// Restarts the cooldown at `ticks` from now and updates the indicator.
    pub fn set_cooldown(&self, ticks: u64) -> Result<()> {
        self.check_state()?;
        self.cooldown_until.set(self.env.now() + ticks);
        self.update_cooldown_indicator(ticks);
        Ok(())
    }

    /// Remaining duration of a timed effect in ticks; never negative.
    pub fn duration(&self) -> u64 {
        self.duration_until.get().remaining_from(self.env.now())
    }

    pub fn set_duration(&self, ticks: u64) -> Result<()> {
        self.check_state()?;
        self.duration_until.set(self.env.now() + ticks);
        Ok(())
    }

    /// Pushes the remaining cooldown to the bound item, if any.
    pub(crate) fn refresh_cooldown_indicator(&self) {
        self.update_cooldown_indicator(self.cooldown());
    }

    fn update_cooldown_indicator(&self, ticks: u64) {
        let Some(wand) = self.concept.wand.as_deref() else {
            return;
        };
        if let Ok(entity) = self.entity() {
            entity.set_item_cooldown(wand, ticks);
        }
    }

    // ------------------------------------------------------------------
    // Cast protocol
    // ------------------------------------------------------------------

    /// Checks whether the ability could be cast right now.
    ///
    /// Order is fixed and the first failure wins: channel (active abilities
    /// only), disabled, level, cooldown, cost. No side effects.
    pub fn test(&self) -> Result<TestResult> {
        let psychic = self.psychic()?;

        if self.is_active() && psychic.is_channeling() {
            return Ok(TestResult::FailedChannel);
        }
        if !psychic.is_enabled() {
            return Ok(TestResult::FailedDisabled);
        }
        if psychic.esper()?.entity()?.level() < self.concept.level_requirement {
            return Ok(TestResult::FailedLevel);
        }
        if self.cooldown() > 0 {
            return Ok(TestResult::FailedCooldown);
        }
        if psychic.mana() < self.concept.cost {
            return Ok(TestResult::FailedCost);
        }

        Ok(TestResult::Success)
    }

    /// Starts the concept cooldown and pays the concept cost.
    ///
    /// Call exactly once per successful cast, normally from `on_cast`.
    pub fn exhaust(&self) -> Result<()> {
        let psychic = self.psychic()?;
        psychic.check_enabled()?;

        self.set_cooldown(self.concept.cooldown_time)?;
        psychic.consume_mana(self.concept.cost)
    }

    /// [`Ability::try_cast_with`] using the concept defaults.
    pub fn try_cast(&self, event: Payload, action: WandAction) -> Result<TestResult> {
        self.try_cast_with(event, action, CastOptions::default())
    }

    /// Validates a cast request and, if it passes, casts.
    pub fn try_cast_with(
        &self,
        event: Payload,
        action: WandAction,
        options: CastOptions,
    ) -> Result<TestResult> {
        if !self.allowed_actions().allows(action) {
            return Ok(TestResult::FailedAction);
        }

        let result = self.test()?;
        if !result.is_success() {
            return Ok(result);
        }

        let targeter = options.targeter.unwrap_or_else(|| self.targeter());
        let target = match targeter {
            Some(targeter) => match targeter(self) {
                Some(target) => Some(target),
                None => return Ok(TestResult::FailedTarget),
            },
            None => None,
        };

        let cost = options.cost.unwrap_or(self.concept.cost);
        if self.psychic()?.mana() < cost {
            return Ok(TestResult::FailedCost);
        }

        let casting_time = options.casting_time.unwrap_or(self.concept.casting_time);
        self.cast(event, action, casting_time, target)?;

        Ok(TestResult::Success)
    }

    /// Casts without validation: channels when `casting_time > 0`, otherwise
    /// runs `on_cast` immediately.
    pub fn cast(
        &self,
        event: Payload,
        action: WandAction,
        casting_time: u64,
        target: Option<Payload>,
    ) -> Result<()> {
        let psychic = self.psychic()?;
        psychic.check_state()?;

        let cast = Cast::new(event, action, target);
        if casting_time > 0 {
            psychic.start_channel(self, cast, casting_time)
        } else {
            self.with_behavior(|behavior, ability| behavior.on_cast(ability, &cast))?
        }
    }

    // ------------------------------------------------------------------
    // Statistics
    // ------------------------------------------------------------------

    /// Damage amount from the concept's damage statistic.
    pub fn damage_amount(&self) -> Result<f64> {
        let damage = self
            .concept
            .damage
            .as_ref()
            .ok_or_else(|| PsychicError::DamageUndefined(self.name().to_owned()))?;
        self.esper()?.statistic(&damage.stats)
    }

    /// Heal amount from the concept's healing statistic.
    pub fn heal_amount(&self) -> Result<f64> {
        let healing = self
            .concept
            .healing
            .as_ref()
            .ok_or_else(|| PsychicError::HealingUndefined(self.name().to_owned()))?;
        self.esper()?.statistic(healing)
    }

    /// Damage request for the host, credited to this ability's entity.
    pub fn damage(&self) -> Result<DamageRequest> {
        let kind = self
            .concept
            .damage
            .as_ref()
            .map(|damage| damage.kind)
            .ok_or_else(|| PsychicError::DamageUndefined(self.name().to_owned()))?;
        let esper = self.esper()?;

        Ok(DamageRequest {
            kind,
            amount: self.damage_amount()?,
            knockback: self.concept.knockback,
            source: esper.unique_id(),
        })
    }

    // ------------------------------------------------------------------
    // Hook dispatch and persistence
    // ------------------------------------------------------------------

    pub(crate) fn with_behavior<R>(
        &self,
        f: impl FnOnce(&mut dyn AbilityBehavior, &Ability) -> R,
    ) -> Result<R> {
        let mut behavior = self
            .behavior
            .try_borrow_mut()
            .map_err(|_| PsychicError::AbilityBusy(self.name().to_owned()))?;
        Ok(f(&mut **behavior, self))
    }

    /// Like [`Ability::with_behavior`] but logs instead of failing; used on
    /// teardown paths that must run to completion.
    pub(crate) fn notify(
        &self,
        hook: &'static str,
        f: impl FnOnce(&mut dyn AbilityBehavior, &Ability),
    ) {
        if let Err(err) = self.with_behavior(f) {
            tracing::warn!(ability = self.name(), hook, "skipped hook: {}", err);
        }
    }

    pub(crate) fn save(&self, section: &mut ConfigSection) {
        let cooldown = i64::try_from(self.cooldown()).unwrap_or(i64::MAX);
        section.set(COOLDOWN_TIME, cooldown);

        let saved = self
            .with_behavior(|behavior, ability| behavior.on_save(ability, section))
            .map_err(HookError::from)
            .and_then(|hook| hook);
        if let Err(err) = saved {
            tracing::warn!(ability = self.name(), "failed to save ability state: {}", err);
        }
    }

    pub(crate) fn load(&self, section: &ConfigSection) -> Result<()> {
        let cooldown = section.get_long(COOLDOWN_TIME).unwrap_or(0).max(0);
        self.set_cooldown(cooldown.unsigned_abs())?;

        let loaded = self
            .with_behavior(|behavior, ability| behavior.on_load(ability, section))
            .map_err(HookError::from)
            .and_then(|hook| hook);
        if let Err(err) = loaded {
            tracing::warn!(ability = self.name(), "failed to load ability state: {}", err);
        }

        Ok(())
    }
}

impl fmt::Debug for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ability")
            .field("concept", &self.concept.name)
            .field("activation", &self.activation)
            .field("cooldown_until", &self.cooldown_until.get())
            .field("duration_until", &self.duration_until.get())
            .finish_non_exhaustive()
    }
}
