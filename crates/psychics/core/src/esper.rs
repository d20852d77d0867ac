//! Espers: the per-entity wrapper that hosts at most one psychic.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use uuid::Uuid;

use crate::entity::{AttributeModifier, Entity, EntityAttribute};
use crate::env::Env;
use crate::error::{PsychicError, Result};
use crate::psychic::{self, Psychic, PsychicConcept, PsychicConceptRegistry};
use crate::section::ConfigSection;
use crate::stats::{self, EsperAttribute, EsperStatistic};

const PSYCHIC: &str = "psychic";
const MODIFIER_NAME: &str = "Psychics";

pub struct Esper {
    env: Rc<Env>,
    unique_id: Uuid,
    attribute_key: Uuid,
    entity: RefCell<Option<Weak<dyn Entity>>>,
    psychic: RefCell<Option<Rc<Psychic>>>,
}

impl Esper {
    pub fn new(entity: &Rc<dyn Entity>, env: Rc<Env>) -> Rc<Self> {
        let unique_id = entity.unique_id();
        Rc::new(Self {
            env,
            unique_id,
            attribute_key: correlation_key(unique_id),
            entity: RefCell::new(Some(Rc::downgrade(entity))),
            psychic: RefCell::new(None),
        })
    }

    /// Id of the wrapped entity; also the persistence key.
    pub fn unique_id(&self) -> Uuid {
        self.unique_id
    }

    /// Key of the max-health modifier this esper owns on its entity.
    pub fn attribute_key(&self) -> Uuid {
        self.attribute_key
    }

    pub fn env(&self) -> &Rc<Env> {
        &self.env
    }

    pub fn entity(&self) -> Result<Rc<dyn Entity>> {
        self.entity
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or(PsychicError::EntityUnavailable)
    }

    /// Whether the entity still exists. Does not keep it alive.
    pub fn is_online(&self) -> bool {
        self.entity
            .borrow()
            .as_ref()
            .is_some_and(|entity| entity.strong_count() > 0)
    }

    pub fn psychic(&self) -> Option<Rc<Psychic>> {
        self.psychic.borrow().clone()
    }

    pub fn attribute(&self, attribute: EsperAttribute) -> Result<f64> {
        let entity = self.entity()?;
        let psychic = self.psychic();
        Ok(stats::resolve_attribute(
            entity.as_ref(),
            psychic.as_deref(),
            self.env.config(),
            attribute,
        ))
    }

    /// Weighted sum of attributes for this esper's entity.
    pub fn statistic(&self, statistic: &EsperStatistic) -> Result<f64> {
        let entity = self.entity()?;
        let psychic = self.psychic();
        Ok(stats::resolve_statistic(
            entity.as_ref(),
            psychic.as_deref(),
            self.env.config(),
            statistic,
        ))
    }

    /// Replaces the current psychic with a fresh instance of `concept`.
    pub fn attach_psychic(self: &Rc<Self>, concept: &Rc<PsychicConcept>) -> Result<Rc<Psychic>> {
        self.detach_psychic();
        self.entity()?;

        let psychic = concept.create_instance(Rc::clone(&self.env));
        *self.psychic.borrow_mut() = Some(Rc::clone(&psychic));

        if let Err(err) = psychic.attach(self) {
            self.psychic.borrow_mut().take();
            psychic.destroy();
            self.update_attribute();
            return Err(err);
        }

        self.update_attribute();
        tracing::debug!(esper = %self.unique_id, psychic = psychic.name(), "psychic attached");

        Ok(psychic)
    }

    /// Destroys the current psychic, if any, and resets the modifier.
    pub fn detach_psychic(&self) {
        let psychic = self.psychic.borrow_mut().take();
        let Some(psychic) = psychic else {
            return;
        };

        psychic.destroy();
        self.update_attribute();
        tracing::debug!(esper = %self.unique_id, psychic = psychic.name(), "psychic detached");
    }

    /// Reapplies the max-health modifier for the current psychic.
    ///
    /// The keyed modifier is removed before it is re-added, so it never stacks.
    fn update_attribute(&self) {
        let Ok(entity) = self.entity() else {
            return;
        };

        entity.remove_modifier(EntityAttribute::MaxHealth, self.attribute_key);
        if let Some(psychic) = self.psychic() {
            let bonus = psychic.concept().health_bonus;
            entity.add_modifier(
                EntityAttribute::MaxHealth,
                AttributeModifier::new(self.attribute_key, MODIFIER_NAME, bonus),
            );
        }
    }

    /// Advances the attached psychic by one tick.
    pub fn tick(&self) -> Result<()> {
        match self.psychic() {
            Some(psychic) => psychic.tick(),
            None => Ok(()),
        }
    }

    /// Restores a record written by [`Esper::save`], replacing current state.
    ///
    /// A psychic name the registry does not know is logged and skipped.
    pub fn load(
        self: &Rc<Self>,
        record: &ConfigSection,
        registry: &dyn PsychicConceptRegistry,
    ) -> Result<()> {
        self.detach_psychic();

        let Some(section) = record.section(PSYCHIC) else {
            return Ok(());
        };
        let Some(name) = section.get_string(psychic::NAME) else {
            return Ok(());
        };
        let Some(concept) = registry.psychic_concept(name) else {
            tracing::warn!(esper = %self.unique_id, psychic = name, "unknown psychic in saved record");
            return Ok(());
        };

        let psychic = self.attach_psychic(&concept)?;
        psychic.load(section)
    }

    pub fn save(&self) -> ConfigSection {
        let mut record = ConfigSection::new();
        if let Some(psychic) = self.psychic() {
            psychic.save(record.create_section(PSYCHIC));
        }
        record
    }

    /// Destroys the psychic and releases the entity.
    ///
    /// The modifier is left alone; the entity is going away.
    pub fn clear(&self) {
        let psychic = self.psychic.borrow_mut().take();
        if let Some(psychic) = psychic {
            psychic.destroy();
        }
        self.entity.borrow_mut().take();
    }
}

fn correlation_key(id: Uuid) -> Uuid {
    let (high, low) = id.as_u64_pair();
    Uuid::from_u64_pair(!low, !high)
}

impl fmt::Debug for Esper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Esper")
            .field("unique_id", &self.unique_id)
            .field("online", &self.is_online())
            .field("psychic", &self.psychic.borrow().as_ref().map(|p| p.name().to_owned()))
            .finish_non_exhaustive()
    }
}
