//! Psychics: the ability set, mana pool and channel of one esper.
//!
//! Lifecycle:
//!
//! ```text
//! PsychicConcept::create_instance ─► attach(esper) ─► enabled ⇄ disabled ─► destroy
//! ```
//!
//! `attach` instantiates abilities and runs `on_initialize`, `on_attach` and
//! `on_enable`. `destroy` runs `on_disable` and `on_detach`, drops the channel
//! and the abilities, and leaves the psychic permanently invalid.

mod channel;
mod concept;

pub use channel::Channel;
pub use concept::{PsychicConcept, PsychicConceptRegistry};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::ability::{Ability, Cast};
use crate::env::Env;
use crate::error::{PsychicError, Result};
use crate::esper::Esper;
use crate::section::ConfigSection;

pub(crate) const NAME: &str = "name";
const MANA: &str = "mana";
const ABILITIES: &str = "abilities";

pub struct Psychic {
    concept: Rc<PsychicConcept>,
    env: Rc<Env>,
    esper: RefCell<Weak<Esper>>,
    abilities: RefCell<Vec<Rc<Ability>>>,
    mana: Cell<f64>,
    enabled: Cell<bool>,
    valid: Cell<bool>,
    channel: RefCell<Option<Channel>>,
}

impl Psychic {
    pub(crate) fn new(concept: Rc<PsychicConcept>, env: Rc<Env>) -> Self {
        let mana = concept.mana;
        Self {
            concept,
            env,
            esper: RefCell::new(Weak::new()),
            abilities: RefCell::new(Vec::new()),
            mana: Cell::new(mana),
            enabled: Cell::new(false),
            valid: Cell::new(true),
            channel: RefCell::new(None),
        }
    }

    pub fn concept(&self) -> &Rc<PsychicConcept> {
        &self.concept
    }

    pub fn name(&self) -> &str {
        &self.concept.name
    }

    pub fn env(&self) -> &Rc<Env> {
        &self.env
    }

    pub fn esper(&self) -> Result<Rc<Esper>> {
        self.esper
            .borrow()
            .upgrade()
            .ok_or(PsychicError::EsperUnavailable)
    }

    /// Snapshot of the owned abilities; empty once destroyed.
    pub fn abilities(&self) -> Vec<Rc<Ability>> {
        self.abilities.borrow().clone()
    }

    pub fn ability(&self, name: &str) -> Option<Rc<Ability>> {
        self.abilities
            .borrow()
            .iter()
            .find(|ability| ability.name() == name)
            .cloned()
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn is_valid(&self) -> bool {
        self.valid.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Fails once the psychic has been destroyed.
    pub fn check_state(&self) -> Result<()> {
        if self.valid.get() {
            Ok(())
        } else {
            Err(PsychicError::Destroyed(self.name().to_owned()))
        }
    }

    /// Fails when destroyed or disabled.
    pub fn check_enabled(&self) -> Result<()> {
        self.check_state()?;
        if self.enabled.get() {
            Ok(())
        } else {
            Err(PsychicError::Disabled(self.name().to_owned()))
        }
    }

    /// Enables or disables every ability. Disabling interrupts the channel.
    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.check_state()?;
        if self.enabled.get() == enabled {
            return Ok(());
        }

        if enabled {
            self.enabled.set(true);
            for ability in self.abilities() {
                ability.notify("on_enable", |behavior, ability| behavior.on_enable(ability));
                ability.refresh_cooldown_indicator();
            }
        } else {
            self.interrupt_channel()?;
            self.enabled.set(false);
            for ability in self.abilities() {
                ability.notify("on_disable", |behavior, ability| behavior.on_disable(ability));
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Mana
    // ------------------------------------------------------------------

    pub fn mana(&self) -> f64 {
        self.mana.get()
    }

    pub fn max_mana(&self) -> f64 {
        self.concept.mana
    }

    /// Sets mana, clamped to `[0, max]`.
    pub fn set_mana(&self, mana: f64) {
        self.mana.set(mana.clamp(0.0, self.max_mana()));
    }

    /// Spends mana. The pool stays within `[0, max]`; negative amounts
    /// spend nothing.
    pub fn consume_mana(&self, amount: f64) -> Result<()> {
        self.check_enabled()?;
        self.set_mana(self.mana.get() - amount.max(0.0));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Channel
    // ------------------------------------------------------------------

    pub fn is_channeling(&self) -> bool {
        self.channel.borrow().is_some()
    }

    pub fn channel(&self) -> Option<Channel> {
        self.channel.borrow().clone()
    }

    /// Begins a delayed cast of `ability`.
    ///
    /// A second channel is rejected with `ChannelActive`; the running one is
    /// never cancelled implicitly.
    pub(crate) fn start_channel(&self, ability: &Ability, cast: Cast, casting_time: u64) -> Result<()> {
        self.check_enabled()?;

        if let Some(active) = self.channel.borrow().as_ref() {
            return Err(PsychicError::ChannelActive(active.ability().name().to_owned()));
        }

        let owned = self
            .abilities
            .borrow()
            .iter()
            .find(|candidate| std::ptr::eq(Rc::as_ptr(candidate), ability))
            .cloned()
            .ok_or(PsychicError::PsychicUnavailable)?;

        let now = self.env.now();
        tracing::debug!(
            psychic = self.name(),
            ability = owned.name(),
            casting_time,
            "channel started at tick {}",
            now
        );
        *self.channel.borrow_mut() = Some(Channel::new(owned, cast, now, casting_time));

        Ok(())
    }

    /// Cancels the active channel and runs `on_interrupt`.
    ///
    /// Returns whether a channel was active.
    pub fn interrupt_channel(&self) -> Result<bool> {
        let channel = self.channel.borrow_mut().take();
        let Some(channel) = channel else {
            return Ok(false);
        };

        tracing::debug!(
            psychic = self.name(),
            ability = channel.ability().name(),
            "channel interrupted"
        );
        channel
            .ability()
            .with_behavior(|behavior, ability| behavior.on_interrupt(ability, &channel))?;

        Ok(true)
    }

    fn complete_channel(&self) -> Result<()> {
        let channel = self.channel.borrow_mut().take();
        let Some(channel) = channel else {
            return Ok(());
        };

        let ability = Rc::clone(channel.ability());
        tracing::debug!(psychic = self.name(), ability = ability.name(), "channel completed");

        ability.with_behavior(|behavior, ability| behavior.on_channel(ability, &channel))?;
        ability.with_behavior(|behavior, ability| behavior.on_cast(ability, channel.cast()))?
    }

    /// Advances one tick: regenerates mana and completes a due channel.
    pub fn tick(&self) -> Result<()> {
        if !self.valid.get() {
            return Ok(());
        }

        if self.enabled.get() && self.concept.mana_regen_per_tick > 0.0 {
            self.set_mana(self.mana() + self.concept.mana_regen_per_tick);
        }

        let now = self.env.now();
        let due = self
            .channel
            .borrow()
            .as_ref()
            .is_some_and(|channel| channel.is_due(now));
        if due {
            self.complete_channel()?;
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub(crate) fn attach(self: &Rc<Self>, esper: &Rc<Esper>) -> Result<()> {
        self.check_state()?;
        *self.esper.borrow_mut() = Rc::downgrade(esper);

        let owner = Rc::downgrade(self);
        let abilities: Vec<Rc<Ability>> = self
            .concept
            .abilities
            .iter()
            .map(|concept| concept.create_instance(owner.clone(), Rc::clone(&self.env)))
            .collect();
        *self.abilities.borrow_mut() = abilities.clone();

        for ability in &abilities {
            ability.with_behavior(|behavior, ability| behavior.on_initialize(ability))?;
        }
        for ability in &abilities {
            ability.with_behavior(|behavior, ability| behavior.on_attach(ability))?;
        }

        self.set_enabled(true)
    }

    /// Tears the psychic down. Later calls are no-ops.
    pub(crate) fn destroy(&self) {
        if !self.valid.get() {
            return;
        }

        let abilities = self.abilities();
        if self.enabled.replace(false) {
            for ability in &abilities {
                ability.notify("on_disable", |behavior, ability| behavior.on_disable(ability));
            }
        }
        for ability in &abilities {
            ability.notify("on_detach", |behavior, ability| behavior.on_detach(ability));
        }

        let channel = self.channel.borrow_mut().take();
        drop(channel);
        self.abilities.borrow_mut().clear();
        self.valid.set(false);

        tracing::debug!(psychic = self.name(), "psychic destroyed");
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    pub(crate) fn save(&self, section: &mut ConfigSection) {
        section.set(NAME, self.name());
        section.set(MANA, self.mana());

        let abilities_section = section.create_section(ABILITIES);
        for ability in self.abilities() {
            ability.save(abilities_section.create_section(ability.name()));
        }
    }

    pub(crate) fn load(&self, section: &ConfigSection) -> Result<()> {
        self.check_state()?;

        if let Some(mana) = section.get_double(MANA) {
            self.set_mana(mana);
        }

        let Some(abilities_section) = section.section(ABILITIES) else {
            return Ok(());
        };
        for ability in self.abilities() {
            if let Some(ability_section) = abilities_section.section(ability.name()) {
                ability.load(ability_section)?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Psychic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Psychic")
            .field("concept", &self.concept.name)
            .field("mana", &self.mana.get())
            .field("enabled", &self.enabled.get())
            .field("valid", &self.valid.get())
            .field("channel", &*self.channel.borrow())
            .finish_non_exhaustive()
    }
}
