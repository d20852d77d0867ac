//! Statistic engine.
//!
//! An [`EsperAttribute`] is one raw number read from the entity (or from its
//! psychic, for mana). An [`EsperStatistic`] is a weighted sum of attributes:
//!
//! ```text
//! statistic = Σ weight(attr) × resolve_attribute(attr)
//! ```
//!
//! Both resolutions are pure; abilities use them for damage and heal amounts.

use std::collections::BTreeMap;

use strum::{Display, EnumString};

use crate::config::PsychicsConfig;
use crate::entity::{Entity, EntityAttribute};
use crate::psychic::Psychic;

/// Attribute kinds a statistic can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EsperAttribute {
    AttackDamage,
    Level,
    Defense,
    Health,
    Mana,
}

/// Weighted attribute set. Insertion order does not matter.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EsperStatistic {
    stats: BTreeMap<EsperAttribute, f64>,
}

impl EsperStatistic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`EsperStatistic::set`].
    #[must_use]
    pub fn with(mut self, attribute: EsperAttribute, weight: f64) -> Self {
        self.set(attribute, weight);
        self
    }

    pub fn set(&mut self, attribute: EsperAttribute, weight: f64) {
        self.stats.insert(attribute, weight);
    }

    pub fn weight(&self, attribute: EsperAttribute) -> Option<f64> {
        self.stats.get(&attribute).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EsperAttribute, f64)> + '_ {
        self.stats.iter().map(|(attr, weight)| (*attr, *weight))
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

impl FromIterator<(EsperAttribute, f64)> for EsperStatistic {
    fn from_iter<I: IntoIterator<Item = (EsperAttribute, f64)>>(iter: I) -> Self {
        Self {
            stats: iter.into_iter().collect(),
        }
    }
}

/// Damage categories reported to the host alongside an amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DamageType {
    Melee,
    Ranged,
    Blast,
}

/// Damage definition attached to an ability concept.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Damage {
    pub kind: DamageType,
    pub stats: EsperStatistic,
}

impl Damage {
    pub fn new(kind: DamageType, stats: EsperStatistic) -> Self {
        Self { kind, stats }
    }
}

/// Resolves one attribute for `entity`.
///
/// `psychic` is the entity's attached psychic, if any; mana reads zero
/// without one.
pub fn resolve_attribute(
    entity: &dyn Entity,
    psychic: Option<&Psychic>,
    config: &PsychicsConfig,
    attribute: EsperAttribute,
) -> f64 {
    match attribute {
        EsperAttribute::AttackDamage => {
            let scaled = f64::from(entity.level()) * config.attack_damage_per_level;
            scaled.min(config.attack_damage_max)
        }
        EsperAttribute::Level => f64::from(entity.level()),
        EsperAttribute::Defense => entity.attribute_value(EntityAttribute::Armor).unwrap_or(0.0),
        EsperAttribute::Health => entity.health(),
        EsperAttribute::Mana => psychic.map_or(0.0, Psychic::mana),
    }
}

/// Weighted sum of [`resolve_attribute`] over `statistic`.
pub fn resolve_statistic(
    entity: &dyn Entity,
    psychic: Option<&Psychic>,
    config: &PsychicsConfig,
    statistic: &EsperStatistic,
) -> f64 {
    statistic
        .iter()
        .map(|(attr, weight)| weight * resolve_attribute(entity, psychic, config, attr))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::AttributeModifier;
    use uuid::Uuid;

    struct Dummy {
        level: u32,
        armor: Option<f64>,
    }

    impl Entity for Dummy {
        fn unique_id(&self) -> Uuid {
            Uuid::nil()
        }
        fn name(&self) -> String {
            "dummy".into()
        }
        fn level(&self) -> u32 {
            self.level
        }
        fn health(&self) -> f64 {
            20.0
        }
        fn attribute_value(&self, attribute: EntityAttribute) -> Option<f64> {
            match attribute {
                EntityAttribute::Armor => self.armor,
                EntityAttribute::MaxHealth => Some(20.0),
            }
        }
        fn add_modifier(&self, _: EntityAttribute, _: AttributeModifier) {}
        fn remove_modifier(&self, _: EntityAttribute, _: Uuid) {}
    }

    #[test]
    fn attack_damage_scales_with_level_and_caps() {
        let config = PsychicsConfig::default();
        let low = Dummy { level: 10, armor: None };
        let high = Dummy { level: 200, armor: None };

        let low_atk = resolve_attribute(&low, None, &config, EsperAttribute::AttackDamage);
        assert!((low_atk - 4.0).abs() < 1e-9);
        assert_eq!(
            resolve_attribute(&high, None, &config, EsperAttribute::AttackDamage),
            25.0
        );
    }

    #[test]
    fn missing_armor_and_psychic_read_zero() {
        let config = PsychicsConfig::default();
        let entity = Dummy { level: 1, armor: None };
        assert_eq!(resolve_attribute(&entity, None, &config, EsperAttribute::Defense), 0.0);
        assert_eq!(resolve_attribute(&entity, None, &config, EsperAttribute::Mana), 0.0);
    }

    #[test]
    fn statistic_is_weighted_sum() {
        let config = PsychicsConfig::default();
        let entity = Dummy { level: 5, armor: Some(8.0) };
        let stats = EsperStatistic::new()
            .with(EsperAttribute::Level, 2.0)
            .with(EsperAttribute::Defense, 0.5)
            .with(EsperAttribute::Health, 0.1);

        let value = resolve_statistic(&entity, None, &config, &stats);
        assert!((value - (10.0 + 4.0 + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn attribute_names_parse_from_kebab_case() {
        assert_eq!("attack-damage".parse::<EsperAttribute>(), Ok(EsperAttribute::AttackDamage));
        assert_eq!(EsperAttribute::Mana.to_string(), "mana");
        assert!("stamina".parse::<EsperAttribute>().is_err());
    }
}
