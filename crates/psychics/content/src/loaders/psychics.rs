//! Psychic concept loader.
//!
//! Loads psychic concepts from RON files. Each ability names a behaviour
//! `kind` that must be present in the [`AbilityRegistry`].

use std::collections::BTreeMap;
use std::path::Path;

use psychics_core::{
    AbilityConcept, Damage, DamageType, EsperAttribute, EsperStatistic, PsychicConcept,
};
use serde::{Deserialize, Serialize};

use crate::catalog::ConceptCatalog;
use crate::loaders::{LoadResult, read_file};
use crate::registry::AbilityRegistry;

fn default_mana() -> f64 {
    PsychicConcept::DEFAULT_MANA
}

/// One psychic as written in a data file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PsychicSpec {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default = "default_mana")]
    pub mana: f64,
    #[serde(default)]
    pub mana_regen: f64,
    #[serde(default)]
    pub health_bonus: f64,
    #[serde(default)]
    pub abilities: Vec<AbilitySpec>,
}

/// One ability of a [`PsychicSpec`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilitySpec {
    pub name: String,
    /// Behaviour kind resolved through the [`AbilityRegistry`].
    pub kind: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub level_requirement: u32,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub cooldown_time: u64,
    #[serde(default)]
    pub casting_time: u64,
    #[serde(default)]
    pub damage: Option<DamageSpec>,
    /// Attribute weights keyed by kebab-case attribute name.
    #[serde(default)]
    pub healing: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub knockback: f64,
    #[serde(default)]
    pub wand: Option<String>,
}

/// Damage definition with kebab-case names, e.g.
/// `(kind: "blast", stats: {"attack-damage": 1.5})`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageSpec {
    pub kind: String,
    pub stats: BTreeMap<String, f64>,
}

/// Loader for psychic concepts from RON files.
pub struct PsychicLoader;

impl PsychicLoader {
    /// Load a concept catalog from a RON file.
    ///
    /// RON format: `Vec<PsychicSpec>`
    ///
    /// # Errors
    ///
    /// Unreadable or malformed files, unknown behaviour kinds, unknown
    /// attribute or damage names, and duplicate psychic or ability names.
    pub fn load(path: &Path, registry: &AbilityRegistry) -> LoadResult<ConceptCatalog> {
        let content = read_file(path)?;
        let catalog = Self::load_str(&content, registry)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;

        tracing::debug!(path = %path.display(), psychics = catalog.len(), "loaded psychic concepts");
        Ok(catalog)
    }

    pub fn load_str(content: &str, registry: &AbilityRegistry) -> LoadResult<ConceptCatalog> {
        let specs: Vec<PsychicSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse psychic RON: {}", e))?;

        let mut catalog = ConceptCatalog::new();
        for spec in specs {
            let name = spec.name.clone();
            let concept = Self::build(spec, registry)?;
            if catalog.insert(concept).is_some() {
                anyhow::bail!("Duplicate psychic '{}'", name);
            }
        }

        Ok(catalog)
    }

    /// Resolves one spec into a concept.
    pub fn build(spec: PsychicSpec, registry: &AbilityRegistry) -> LoadResult<PsychicConcept> {
        let mut concept = PsychicConcept::new(spec.name.clone())
            .with_description(spec.description)
            .with_mana(spec.mana)
            .with_mana_regen(spec.mana_regen)
            .with_health_bonus(spec.health_bonus);
        if let Some(display_name) = spec.display_name {
            concept = concept.with_display_name(display_name);
        }

        for ability in spec.abilities {
            if concept.ability(&ability.name).is_some() {
                anyhow::bail!(
                    "Duplicate ability '{}' in psychic '{}'",
                    ability.name,
                    spec.name
                );
            }
            let ability = build_ability(ability, registry)
                .map_err(|e| anyhow::anyhow!("psychic '{}': {}", spec.name, e))?;
            concept = concept.with_ability(ability);
        }

        Ok(concept)
    }
}

fn build_ability(spec: AbilitySpec, registry: &AbilityRegistry) -> LoadResult<AbilityConcept> {
    let factory = registry.factory(&spec.kind).ok_or_else(|| {
        anyhow::anyhow!("Unknown ability kind '{}' for ability '{}'", spec.kind, spec.name)
    })?;

    let mut concept = AbilityConcept::with_factory(spec.name.clone(), factory)
        .with_description(spec.description)
        .with_level_requirement(spec.level_requirement)
        .with_cost(spec.cost)
        .with_cooldown_time(spec.cooldown_time)
        .with_casting_time(spec.casting_time)
        .with_knockback(spec.knockback);

    if let Some(display_name) = spec.display_name {
        concept = concept.with_display_name(display_name);
    }
    if let Some(damage) = spec.damage {
        let kind: DamageType = damage.kind.parse().map_err(|_| {
            anyhow::anyhow!("Unknown damage type '{}' for ability '{}'", damage.kind, spec.name)
        })?;
        concept = concept.with_damage(Damage::new(kind, parse_statistic(&damage.stats, &spec.name)?));
    }
    if let Some(healing) = spec.healing {
        concept = concept.with_healing(parse_statistic(&healing, &spec.name)?);
    }
    if let Some(wand) = spec.wand {
        concept = concept.with_wand(wand);
    }

    Ok(concept)
}

fn parse_statistic(weights: &BTreeMap<String, f64>, ability: &str) -> LoadResult<EsperStatistic> {
    weights
        .iter()
        .map(|(name, weight)| -> LoadResult<(EsperAttribute, f64)> {
            let attribute: EsperAttribute = name.parse().map_err(|_| {
                anyhow::anyhow!("Unknown attribute '{}' for ability '{}'", name, ability)
            })?;
            Ok((attribute, *weight))
        })
        .collect()
}
