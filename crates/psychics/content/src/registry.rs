//! Behaviour kinds referenced by ability data.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use psychics_core::{AbilityBehavior, AbilityFactory};

use crate::behaviors::{Instant, Passive};

/// Maps the `kind` string of an ability spec to the code that implements it.
#[derive(Clone, Default)]
pub struct AbilityRegistry {
    factories: HashMap<String, AbilityFactory>,
}

impl AbilityRegistry {
    pub const PASSIVE: &'static str = "passive";
    pub const INSTANT: &'static str = "instant";

    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with [`Passive`] and [`Instant`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Self::PASSIVE, || Box::new(Passive) as Box<dyn AbilityBehavior>);
        registry.register(Self::INSTANT, || Box::new(Instant) as Box<dyn AbilityBehavior>);
        registry
    }

    /// Registers `factory` under `kind`, replacing any previous registration.
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn AbilityBehavior> + 'static,
    {
        self.factories.insert(kind.into(), Rc::new(factory));
    }

    pub fn factory(&self, kind: &str) -> Option<AbilityFactory> {
        self.factories.get(kind).cloned()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for AbilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.kinds().collect();
        kinds.sort_unstable();
        f.debug_struct("AbilityRegistry").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let registry = AbilityRegistry::with_builtins();
        assert!(registry.contains("passive"));
        assert!(registry.contains("instant"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn factories_build_fresh_behaviours() {
        let registry = AbilityRegistry::with_builtins();
        let factory = registry.factory("instant").unwrap();
        assert!(factory().activation().allowed_actions().is_all());
        assert!(factory().activation().allowed_actions().is_all());
        assert!(registry.factory("fireball").is_none());
    }
}
