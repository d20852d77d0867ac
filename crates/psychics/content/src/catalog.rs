//! Loaded psychic concepts, by name.

use std::collections::HashMap;
use std::rc::Rc;

use psychics_core::{PsychicConcept, PsychicConceptRegistry};

/// Name-indexed set of psychic concepts.
#[derive(Clone, Debug, Default)]
pub struct ConceptCatalog {
    concepts: HashMap<String, Rc<PsychicConcept>>,
}

impl ConceptCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `concept`, returning the concept it replaced, if any.
    pub fn insert(&mut self, concept: PsychicConcept) -> Option<Rc<PsychicConcept>> {
        self.concepts.insert(concept.name.clone(), Rc::new(concept))
    }

    pub fn get(&self, name: &str) -> Option<&Rc<PsychicConcept>> {
        self.concepts.get(name)
    }

    /// Concept names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.concepts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<PsychicConcept>> {
        self.concepts.values()
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

impl PsychicConceptRegistry for ConceptCatalog {
    fn psychic_concept(&self, name: &str) -> Option<Rc<PsychicConcept>> {
        self.concepts.get(name).cloned()
    }
}

impl FromIterator<PsychicConcept> for ConceptCatalog {
    fn from_iter<I: IntoIterator<Item = PsychicConcept>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for concept in iter {
            catalog.insert(concept);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_concepts_by_name() {
        let catalog: ConceptCatalog = [PsychicConcept::new("pyro"), PsychicConcept::new("cryo")]
            .into_iter()
            .collect();

        assert_eq!(catalog.names(), vec!["cryo", "pyro"]);
        assert_eq!(catalog.psychic_concept("pyro").unwrap().name, "pyro");
        assert!(catalog.psychic_concept("ghost").is_none());
    }

    #[test]
    fn insert_replaces_same_name() {
        let mut catalog = ConceptCatalog::new();
        assert!(catalog.insert(PsychicConcept::new("pyro")).is_none());
        let replaced = catalog.insert(PsychicConcept::new("pyro").with_mana(5.0));
        assert!(replaced.is_some());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("pyro").unwrap().mana, 5.0);
    }
}
