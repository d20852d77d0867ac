use std::fmt;
use std::rc::{Rc, Weak};

use super::Ability;
use super::behavior::AbilityBehavior;
use crate::env::Env;
use crate::psychic::Psychic;
use crate::stats::{Damage, EsperStatistic};

/// Builds a fresh behaviour for each ability instance.
pub type AbilityFactory = Rc<dyn Fn() -> Box<dyn AbilityBehavior>>;

/// Immutable template shared by every instance of one ability kind.
///
/// Created once when content is loaded and shared through `Rc` by every
/// psychic that selects it.
pub struct AbilityConcept {
    pub name: String,
    pub display_name: String,
    pub description: Vec<String>,
    pub level_requirement: u32,
    pub cost: f64,
    /// Cooldown length in ticks.
    pub cooldown_time: u64,
    /// Channel length in ticks; zero casts immediately.
    pub casting_time: u64,
    pub damage: Option<Damage>,
    pub healing: Option<EsperStatistic>,
    pub knockback: f64,
    /// Item whose cooldown indicator mirrors this ability's cooldown.
    pub wand: Option<String>,
    factory: AbilityFactory,
}

impl AbilityConcept {
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn AbilityBehavior> + 'static,
    {
        Self::with_factory(name, Rc::new(factory))
    }

    pub fn with_factory(name: impl Into<String>, factory: AbilityFactory) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            description: Vec::new(),
            level_requirement: 0,
            cost: 0.0,
            cooldown_time: 0,
            casting_time: 0,
            damage: None,
            healing: None,
            knockback: 0.0,
            wand: None,
            factory,
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
    pub fn with_level_requirement(mut self, level: u32) -> Self {
        self.level_requirement = level;
        self
    }

    /// Negative costs are clamped to zero.
    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost.max(0.0);
        self
    }

    #[must_use]
    pub fn with_cooldown_time(mut self, ticks: u64) -> Self {
        self.cooldown_time = ticks;
        self
    }

    #[must_use]
    pub fn with_casting_time(mut self, ticks: u64) -> Self {
        self.casting_time = ticks;
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: Damage) -> Self {
        self.damage = Some(damage);
        self
    }

    #[must_use]
    pub fn with_healing(mut self, healing: EsperStatistic) -> Self {
        self.healing = Some(healing);
        self
    }

    #[must_use]
    pub fn with_knockback(mut self, knockback: f64) -> Self {
        self.knockback = knockback;
        self
    }

    #[must_use]
    pub fn with_wand(mut self, item: impl Into<String>) -> Self {
        self.wand = Some(item.into());
        self
    }

    /// Instantiates an ability bound to this concept and to `psychic`.
    pub fn create_instance(self: &Rc<Self>, psychic: Weak<Psychic>, env: Rc<Env>) -> Rc<Ability> {
        let behavior = (self.factory)();
        Rc::new(Ability::new(Rc::clone(self), psychic, env, behavior))
    }
}

impl fmt::Debug for AbilityConcept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbilityConcept")
            .field("name", &self.name)
            .field("level_requirement", &self.level_requirement)
            .field("cost", &self.cost)
            .field("cooldown_time", &self.cooldown_time)
            .field("casting_time", &self.casting_time)
            .field("damage", &self.damage)
            .field("healing", &self.healing)
            .field("knockback", &self.knockback)
            .field("wand", &self.wand)
            .finish_non_exhaustive()
    }
}
