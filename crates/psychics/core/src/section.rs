//! Hierarchical key/value record used for persisted esper state.
//!
//! A record is one [`ConfigSection`] per entity. Sections nest, keys are kept
//! in sorted order so encoded output is stable, and typed getters return
//! `None` instead of failing when a key is missing or holds another type.

use std::collections::BTreeMap;

/// One value inside a [`ConfigSection`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ConfigValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Section(ConfigSection),
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<ConfigSection> for ConfigValue {
    fn from(value: ConfigSection) -> Self {
        Self::Section(value)
    }
}

/// Ordered map of named values and nested sections.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConfigSection {
    entries: BTreeMap<String, ConfigValue>,
}

impl ConfigSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            ConfigValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn get_long(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            ConfigValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer value that fits in an `i32`.
    pub fn get_int(&self, key: &str) -> Option<i32> {
        self.get_long(key).and_then(|value| i32::try_from(value).ok())
    }

    /// Floating value; integers are widened.
    pub fn get_double(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            ConfigValue::Float(value) => Some(*value),
            ConfigValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            ConfigValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn section(&self, key: &str) -> Option<&ConfigSection> {
        match self.get(key)? {
            ConfigValue::Section(section) => Some(section),
            _ => None,
        }
    }

    pub fn section_mut(&mut self, key: &str) -> Option<&mut ConfigSection> {
        match self.entries.get_mut(key)? {
            ConfigValue::Section(section) => Some(section),
            _ => None,
        }
    }

    /// Creates (or replaces) an empty nested section and returns it.
    pub fn create_section(&mut self, key: impl Into<String>) -> &mut ConfigSection {
        let key = key.into();
        self.entries
            .insert(key.clone(), ConfigValue::Section(ConfigSection::new()));
        match self.entries.get_mut(&key) {
            Some(ConfigValue::Section(section)) => section,
            _ => unreachable!("section was inserted above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_reject_other_types() {
        let mut section = ConfigSection::new();
        section.set("name", "pyro");
        section.set("cooldown-time", 40_i64);
        section.set("mana", 12.5);

        assert_eq!(section.get_string("name"), Some("pyro"));
        assert_eq!(section.get_long("cooldown-time"), Some(40));
        assert_eq!(section.get_int("cooldown-time"), Some(40));
        assert_eq!(section.get_double("cooldown-time"), Some(40.0));
        assert_eq!(section.get_long("mana"), None);
        assert_eq!(section.get_string("mana"), None);
        assert_eq!(section.section("name"), None);
    }

    #[test]
    fn int_getter_rejects_overflow() {
        let mut section = ConfigSection::new();
        section.set("big", i64::from(i32::MAX) + 1);
        assert_eq!(section.get_int("big"), None);
        assert_eq!(section.get_long("big"), Some(i64::from(i32::MAX) + 1));
    }

    #[test]
    fn create_section_replaces_previous_value() {
        let mut root = ConfigSection::new();
        root.create_section("psychic").set("name", "pyro");
        assert_eq!(
            root.section("psychic").and_then(|s| s.get_string("name")),
            Some("pyro")
        );

        root.create_section("psychic");
        assert!(root.section("psychic").is_some_and(ConfigSection::is_empty));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_encoding_round_trips_nested_sections() {
        let mut root = ConfigSection::new();
        let psychic = root.create_section("psychic");
        psychic.set("name", "pyro");
        psychic.set("mana", 42.5);
        psychic.set("enabled", true);
        psychic
            .create_section("abilities")
            .create_section("fireball")
            .set("cooldown-time", 30_i64);

        let json = serde_json::to_string(&root).expect("encode");
        let decoded: ConfigSection = serde_json::from_str(&json).expect("decode");
        assert_eq!(decoded, root);
    }
}
