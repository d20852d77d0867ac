//! Per-process registry of espers and the tick scheduler that drives them.
//!
//! [`PsychicManager`] is the context object a host embeds. It owns the shared
//! clock, the concept catalog and the record repository, and keeps one
//! [`Esper`] per known entity.
//!
//! Lifecycle: `new` → `add_entity` / `tick` / `remove_entity` → `shutdown`.

use std::collections::BTreeMap;
use std::rc::Rc;

use psychics_content::ConceptCatalog;
use psychics_core::{
    Clock, Entity, Env, Esper, Psychic, PsychicConcept, PsychicConceptRegistry, PsychicsConfig,
    Tick, TickCounter,
};
use uuid::Uuid;

use crate::error::{Result, RuntimeError};
use crate::repository::EsperRepository;

pub struct PsychicManager {
    clock: Rc<TickCounter>,
    env: Rc<Env>,
    catalog: ConceptCatalog,
    repository: Box<dyn EsperRepository>,
    espers: BTreeMap<Uuid, Rc<Esper>>,
}

impl PsychicManager {
    pub fn new(
        catalog: ConceptCatalog,
        repository: Box<dyn EsperRepository>,
        config: PsychicsConfig,
    ) -> Self {
        let clock = Rc::new(TickCounter::new());
        let shared: Rc<dyn Clock> = Rc::clone(&clock) as Rc<dyn Clock>;
        let env = Rc::new(Env::new(shared, config));

        Self {
            clock,
            env,
            catalog,
            repository,
            espers: BTreeMap::new(),
        }
    }

    pub fn env(&self) -> &Rc<Env> {
        &self.env
    }

    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    pub fn catalog(&self) -> &ConceptCatalog {
        &self.catalog
    }

    pub fn repository(&self) -> &dyn EsperRepository {
        self.repository.as_ref()
    }

    pub fn concept(&self, name: &str) -> Option<Rc<PsychicConcept>> {
        self.catalog.psychic_concept(name)
    }

    pub fn esper(&self, id: Uuid) -> Option<Rc<Esper>> {
        self.espers.get(&id).cloned()
    }

    pub fn espers(&self) -> impl Iterator<Item = &Rc<Esper>> {
        self.espers.values()
    }

    pub fn len(&self) -> usize {
        self.espers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.espers.is_empty()
    }

    /// Registers `entity` and restores its saved record, if any.
    ///
    /// A record that fails to load is logged; the esper is kept without a
    /// psychic. Known entities return their existing esper.
    pub fn add_entity(&mut self, entity: &Rc<dyn Entity>) -> Rc<Esper> {
        let id = entity.unique_id();
        if let Some(esper) = self.espers.get(&id) {
            return Rc::clone(esper);
        }

        let esper = Esper::new(entity, Rc::clone(&self.env));
        match self.repository.load(id) {
            Ok(Some(record)) => {
                if let Err(err) = esper.load(&record, &self.catalog) {
                    tracing::warn!(esper = %id, "failed to restore esper: {}", err);
                }
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(esper = %id, "failed to read esper record: {}", err),
        }

        tracing::debug!(esper = %id, entity = %entity.name(), "esper registered");
        self.espers.insert(id, Rc::clone(&esper));
        esper
    }

    /// Attaches the named concept to a registered entity.
    pub fn attach_psychic(&self, id: Uuid, concept: &str) -> Result<Rc<Psychic>> {
        let esper = self.esper(id).ok_or(RuntimeError::UnknownEsper(id))?;
        let concept = self
            .concept(concept)
            .ok_or_else(|| RuntimeError::UnknownConcept(concept.to_owned()))?;
        Ok(esper.attach_psychic(&concept)?)
    }

    /// Saves, clears and forgets the esper for `id`.
    ///
    /// Returns false if the entity was not registered.
    pub fn remove_entity(&mut self, id: Uuid) -> Result<bool> {
        let Some(esper) = self.espers.remove(&id) else {
            return Ok(false);
        };

        let saved = self.save_esper(&esper);
        esper.clear();
        saved?;

        Ok(true)
    }

    pub fn save_esper(&self, esper: &Esper) -> Result<()> {
        self.repository.save(esper.unique_id(), &esper.save())?;
        Ok(())
    }

    /// Saves every esper. All espers are attempted; the last failure is
    /// returned.
    pub fn save_all(&self) -> Result<()> {
        let mut result = Ok(());
        for esper in self.espers.values() {
            if let Err(err) = self.save_esper(esper) {
                tracing::warn!(esper = %esper.unique_id(), "failed to save esper: {}", err);
                result = Err(err);
            }
        }
        result
    }

    /// Advances the clock by one tick and runs the per-tick work:
    /// esper ticks, offline cleanup and autosave.
    pub fn tick(&mut self) -> Tick {
        let now = self.clock.advance();

        for esper in self.espers.values() {
            if let Err(err) = esper.tick() {
                tracing::warn!(esper = %esper.unique_id(), "esper tick failed: {}", err);
            }
        }

        let offline: Vec<Uuid> = self
            .espers
            .iter()
            .filter(|(_, esper)| !esper.is_online())
            .map(|(id, _)| *id)
            .collect();
        for id in offline {
            tracing::debug!(esper = %id, "entity went offline");
            if let Err(err) = self.remove_entity(id) {
                tracing::warn!(esper = %id, "failed to save offline esper: {}", err);
            }
        }

        let interval = self.env.config().autosave_interval;
        if interval > 0 && now.0 % interval == 0 {
            tracing::debug!(tick = %now, espers = self.espers.len(), "autosave");
            if let Err(err) = self.save_all() {
                tracing::debug!(tick = %now, "autosave incomplete: {}", err);
            }
        }

        now
    }

    /// Saves and clears every esper and empties the registry.
    pub fn shutdown(&mut self) -> Result<()> {
        let result = self.save_all();
        for esper in std::mem::take(&mut self.espers).into_values() {
            esper.clear();
        }
        tracing::info!("psychics runtime shut down");
        result
    }
}

impl PsychicConceptRegistry for PsychicManager {
    fn psychic_concept(&self, name: &str) -> Option<Rc<PsychicConcept>> {
        self.catalog.psychic_concept(name)
    }
}
