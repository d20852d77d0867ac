//! Boundary to the host's entity and attribute subsystems.
//!
//! Entities are owned by the host. Espers only keep a `Weak<dyn Entity>`, so
//! every method here takes `&self`; hosts use interior mutability for the
//! few writes the core performs (the max-health modifier and item cooldowns).

use uuid::Uuid;

/// Numeric entity attributes the core reads or modifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityAttribute {
    MaxHealth,
    Armor,
}

/// Additive modifier keyed by a stable id.
///
/// Adding a modifier whose key is already present replaces it.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeModifier {
    pub key: Uuid,
    pub name: String,
    pub amount: f64,
}

impl AttributeModifier {
    pub fn new(key: Uuid, name: impl Into<String>, amount: f64) -> Self {
        Self {
            key,
            name: name.into(),
            amount,
        }
    }
}

/// A live game actor as seen by the core.
pub trait Entity {
    /// Stable identity, also used as the persistence key.
    fn unique_id(&self) -> Uuid;

    /// Display name used in log lines.
    fn name(&self) -> String;

    fn level(&self) -> u32;

    fn health(&self) -> f64;

    /// Current value of a modifiable attribute, if the entity has it.
    fn attribute_value(&self, attribute: EntityAttribute) -> Option<f64>;

    /// Adds `modifier`, replacing any modifier with the same key.
    fn add_modifier(&self, attribute: EntityAttribute, modifier: AttributeModifier);

    fn remove_modifier(&self, attribute: EntityAttribute, key: Uuid);

    /// Cooldown indicator for the item bound to an ability.
    fn set_item_cooldown(&self, _item: &str, _ticks: u64) {}
}
