#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use psychics_core::{
    Ability, AbilityBehavior, AbilityConcept, Activation, AttributeModifier, Cast, Channel, Clock,
    ConfigSection, Entity, EntityAttribute, Env, Esper, HookResult, Psychic, PsychicConcept,
    PsychicConceptRegistry, PsychicsConfig, TickCounter,
};
use uuid::Uuid;

pub const BASE_MAX_HEALTH: f64 = 20.0;

/// Host entity with interior-mutable modifiers and item cooldowns.
pub struct MockEntity {
    pub id: Uuid,
    pub level: Cell<u32>,
    pub health: Cell<f64>,
    pub armor: Cell<Option<f64>>,
    pub modifiers: RefCell<Vec<(EntityAttribute, AttributeModifier)>>,
    pub item_cooldowns: RefCell<HashMap<String, u64>>,
}

impl MockEntity {
    pub fn new(level: u32) -> Rc<Self> {
        Rc::new(Self {
            id: Uuid::new_v4(),
            level: Cell::new(level),
            health: Cell::new(BASE_MAX_HEALTH),
            armor: Cell::new(None),
            modifiers: RefCell::new(Vec::new()),
            item_cooldowns: RefCell::new(HashMap::new()),
        })
    }

    pub fn modifiers_on(&self, attribute: EntityAttribute) -> Vec<AttributeModifier> {
        self.modifiers
            .borrow()
            .iter()
            .filter(|(attr, _)| *attr == attribute)
            .map(|(_, modifier)| modifier.clone())
            .collect()
    }

    pub fn item_cooldown(&self, item: &str) -> Option<u64> {
        self.item_cooldowns.borrow().get(item).copied()
    }
}

impl Entity for MockEntity {
    fn unique_id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> String {
        "mock".to_owned()
    }

    fn level(&self) -> u32 {
        self.level.get()
    }

    fn health(&self) -> f64 {
        self.health.get()
    }

    fn attribute_value(&self, attribute: EntityAttribute) -> Option<f64> {
        match attribute {
            EntityAttribute::Armor => self.armor.get(),
            EntityAttribute::MaxHealth => {
                let bonus: f64 = self
                    .modifiers_on(EntityAttribute::MaxHealth)
                    .iter()
                    .map(|modifier| modifier.amount)
                    .sum();
                Some(BASE_MAX_HEALTH + bonus)
            }
        }
    }

    fn add_modifier(&self, attribute: EntityAttribute, modifier: AttributeModifier) {
        let mut modifiers = self.modifiers.borrow_mut();
        modifiers.retain(|(attr, existing)| !(*attr == attribute && existing.key == modifier.key));
        modifiers.push((attribute, modifier));
    }

    fn remove_modifier(&self, attribute: EntityAttribute, key: Uuid) {
        self.modifiers
            .borrow_mut()
            .retain(|(attr, existing)| !(*attr == attribute && existing.key == key));
    }

    fn set_item_cooldown(&self, item: &str, ticks: u64) {
        self.item_cooldowns.borrow_mut().insert(item.to_owned(), ticks);
    }
}

pub fn as_entity(entity: &Rc<MockEntity>) -> Rc<dyn Entity> {
    Rc::clone(entity) as Rc<dyn Entity>
}

pub fn env(clock: &Rc<TickCounter>) -> Rc<Env> {
    let clock: Rc<dyn Clock> = Rc::clone(clock) as Rc<dyn Clock>;
    Rc::new(Env::new(clock, PsychicsConfig::default()))
}

pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

/// Behaviour that records each hook and exhausts on cast.
pub struct Recorder {
    pub log: Log,
    pub activation: Activation,
    pub exhaust: bool,
    pub fail_save: bool,
    pub note: Option<String>,
}

impl Recorder {
    pub fn active(log: &Log) -> Self {
        Self {
            log: Rc::clone(log),
            activation: Activation::ANY_ACTION,
            exhaust: true,
            fail_save: false,
            note: None,
        }
    }

    pub fn passive(log: &Log) -> Self {
        Self {
            activation: Activation::Passive,
            ..Self::active(log)
        }
    }

    fn record(&self, ability: &Ability, hook: &str) {
        self.log.borrow_mut().push(format!("{}:{}", ability.name(), hook));
    }
}

impl AbilityBehavior for Recorder {
    fn activation(&self) -> Activation {
        self.activation
    }

    fn on_initialize(&mut self, ability: &Ability) {
        self.record(ability, "initialize");
    }

    fn on_attach(&mut self, ability: &Ability) {
        self.record(ability, "attach");
    }

    fn on_detach(&mut self, ability: &Ability) {
        self.record(ability, "detach");
    }

    fn on_save(&mut self, ability: &Ability, section: &mut ConfigSection) -> HookResult {
        self.record(ability, "save");
        if self.fail_save {
            return Err("disk on fire".into());
        }
        if let Some(note) = &self.note {
            section.set("note", note.as_str());
        }
        Ok(())
    }

    fn on_load(&mut self, ability: &Ability, section: &ConfigSection) -> HookResult {
        self.record(ability, "load");
        self.note = section.get_string("note").map(str::to_owned);
        Ok(())
    }

    fn on_enable(&mut self, ability: &Ability) {
        self.record(ability, "enable");
    }

    fn on_disable(&mut self, ability: &Ability) {
        self.record(ability, "disable");
    }

    fn on_cast(&mut self, ability: &Ability, _cast: &Cast) -> psychics_core::Result<()> {
        self.record(ability, "cast");
        if self.exhaust {
            ability.exhaust()?;
        }
        Ok(())
    }

    fn on_channel(&mut self, ability: &Ability, _channel: &Channel) {
        self.record(ability, "channel");
    }

    fn on_interrupt(&mut self, ability: &Ability, _channel: &Channel) {
        self.record(ability, "interrupt");
    }
}

/// Active ability concept backed by a [`Recorder`].
pub fn active_concept(name: &str, log: &Log) -> AbilityConcept {
    let log = Rc::clone(log);
    AbilityConcept::new(name, move || {
        Box::new(Recorder::active(&log)) as Box<dyn AbilityBehavior>
    })
}

pub fn passive_concept(name: &str, log: &Log) -> AbilityConcept {
    let log = Rc::clone(log);
    AbilityConcept::new(name, move || {
        Box::new(Recorder::passive(&log)) as Box<dyn AbilityBehavior>
    })
}

/// Registry over a fixed list of concepts.
pub struct Concepts(pub Vec<Rc<PsychicConcept>>);

impl PsychicConceptRegistry for Concepts {
    fn psychic_concept(&self, name: &str) -> Option<Rc<PsychicConcept>> {
        self.0.iter().find(|concept| concept.name == name).cloned()
    }
}

pub fn event() -> psychics_core::Payload {
    Rc::new(())
}

/// One entity wrapped by an esper, driven by a manual clock.
pub struct Fixture {
    pub clock: Rc<TickCounter>,
    pub entity: Rc<MockEntity>,
    pub esper: Rc<Esper>,
}

impl Fixture {
    pub fn new(level: u32) -> Self {
        let clock = Rc::new(TickCounter::new());
        let entity = MockEntity::new(level);
        let esper = Esper::new(&as_entity(&entity), env(&clock));
        Self {
            clock,
            entity,
            esper,
        }
    }

    pub fn attach(&self, concept: PsychicConcept) -> Rc<Psychic> {
        self.esper
            .attach_psychic(&Rc::new(concept))
            .expect("attach psychic")
    }
}

pub fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}
