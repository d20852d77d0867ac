use std::rc::Rc;

use super::Psychic;
use crate::ability::AbilityConcept;
use crate::env::Env;

/// Immutable template for one psychic: its ability list and resource pool.
#[derive(Debug)]
pub struct PsychicConcept {
    pub name: String,
    pub display_name: String,
    pub description: Vec<String>,
    /// Maximum mana.
    pub mana: f64,
    pub mana_regen_per_tick: f64,
    /// Added to the entity's max health while attached.
    pub health_bonus: f64,
    pub abilities: Vec<Rc<AbilityConcept>>,
}

impl PsychicConcept {
    pub const DEFAULT_MANA: f64 = 100.0;

    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            description: Vec::new(),
            mana: Self::DEFAULT_MANA,
            mana_regen_per_tick: 0.0,
            health_bonus: 0.0,
            abilities: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: Vec<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn with_mana(mut self, mana: f64) -> Self {
        self.mana = mana.max(0.0);
        self
    }

    #[must_use]
    pub fn with_mana_regen(mut self, per_tick: f64) -> Self {
        self.mana_regen_per_tick = per_tick.max(0.0);
        self
    }

    #[must_use]
    pub fn with_health_bonus(mut self, bonus: f64) -> Self {
        self.health_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: AbilityConcept) -> Self {
        self.abilities.push(Rc::new(ability));
        self
    }

    pub fn ability(&self, name: &str) -> Option<&Rc<AbilityConcept>> {
        self.abilities.iter().find(|concept| concept.name == name)
    }

    /// Creates a detached psychic with a full mana pool.
    ///
    /// Abilities are instantiated when the psychic is attached to an esper.
    pub fn create_instance(self: &Rc<Self>, env: Rc<Env>) -> Rc<Psychic> {
        Rc::new(Psychic::new(Rc::clone(self), env))
    }
}

/// Resolves psychic concepts by name (content catalog, runtime manager).
pub trait PsychicConceptRegistry {
    fn psychic_concept(&self, name: &str) -> Option<Rc<PsychicConcept>>;
}
