#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use psychics_content::{AbilityRegistry, ConceptCatalog, PsychicLoader};
use psychics_core::{AttributeModifier, Entity, EntityAttribute};
use uuid::Uuid;

pub const CONCEPTS: &str = r#"[
    (
        name: "pyro",
        mana: 100.0,
        mana_regen: 1.0,
        health_bonus: 4.0,
        abilities: [
            (name: "fireball", kind: "instant", cost: 30.0, cooldown_time: 50),
            (name: "ember-skin", kind: "passive"),
        ],
    ),
]"#;

pub fn catalog() -> ConceptCatalog {
    PsychicLoader::load_str(CONCEPTS, &AbilityRegistry::with_builtins()).expect("test concepts")
}

/// Minimal host entity.
pub struct TestEntity {
    pub id: Uuid,
    pub level: Cell<u32>,
    pub modifiers: RefCell<Vec<AttributeModifier>>,
}

impl TestEntity {
    pub fn new() -> Rc<Self> {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: Uuid) -> Rc<Self> {
        Rc::new(Self {
            id,
            level: Cell::new(10),
            modifiers: RefCell::new(Vec::new()),
        })
    }

    pub fn as_entity(self: &Rc<Self>) -> Rc<dyn Entity> {
        Rc::clone(self) as Rc<dyn Entity>
    }
}

impl Entity for TestEntity {
    fn unique_id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> String {
        format!("test-{}", self.id)
    }

    fn level(&self) -> u32 {
        self.level.get()
    }

    fn health(&self) -> f64 {
        20.0
    }

    fn attribute_value(&self, attribute: EntityAttribute) -> Option<f64> {
        match attribute {
            EntityAttribute::MaxHealth => {
                Some(20.0 + self.modifiers.borrow().iter().map(|m| m.amount).sum::<f64>())
            }
            EntityAttribute::Armor => None,
        }
    }

    fn add_modifier(&self, _attribute: EntityAttribute, modifier: AttributeModifier) {
        let mut modifiers = self.modifiers.borrow_mut();
        modifiers.retain(|existing| existing.key != modifier.key);
        modifiers.push(modifier);
    }

    fn remove_modifier(&self, _attribute: EntityAttribute, key: Uuid) {
        self.modifiers.borrow_mut().retain(|existing| existing.key != key);
    }
}
