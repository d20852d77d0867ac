mod common;

use std::rc::Rc;

use common::*;
use psychics_core::{
    AbilityBehavior, AbilityConcept, ConfigSection, Entity, EntityAttribute, Esper, EsperAttribute,
    PsychicConcept, PsychicError,
};

fn noting_concept(name: &str, log: &Log, note: Option<&str>, fail_save: bool) -> AbilityConcept {
    let log = Rc::clone(log);
    let note = note.map(str::to_owned);
    AbilityConcept::new(name, move || {
        let mut recorder = Recorder::active(&log);
        recorder.note = note.clone();
        recorder.fail_save = fail_save;
        Box::new(recorder) as Box<dyn AbilityBehavior>
    })
}

#[test]
fn attach_runs_lifecycle_hooks_in_order() {
    let log = new_log();
    let fixture = Fixture::new(1);
    let psychic = fixture.attach(
        PsychicConcept::new("pyro")
            .with_ability(active_concept("bolt", &log))
            .with_ability(passive_concept("aura", &log)),
    );

    assert!(psychic.is_enabled());
    assert_eq!(
        entries(&log),
        vec![
            "bolt:initialize",
            "aura:initialize",
            "bolt:attach",
            "aura:attach",
            "bolt:enable",
            "aura:enable",
        ]
    );

    log.borrow_mut().clear();
    fixture.esper.detach_psychic();
    assert_eq!(
        entries(&log),
        vec!["bolt:disable", "aura:disable", "bolt:detach", "aura:detach"]
    );
    assert!(fixture.esper.psychic().is_none());
}

#[test]
fn health_modifier_is_replaced_not_stacked() {
    let fixture = Fixture::new(1);
    let concept = Rc::new(PsychicConcept::new("tank").with_health_bonus(8.0));

    fixture.esper.attach_psychic(&concept).unwrap();
    fixture.esper.attach_psychic(&concept).unwrap();

    let modifiers = fixture.entity.modifiers_on(EntityAttribute::MaxHealth);
    assert_eq!(modifiers.len(), 1);
    assert_eq!(modifiers[0].key, fixture.esper.attribute_key());
    assert_eq!(modifiers[0].name, "Psychics");
    assert_eq!(
        fixture.entity.attribute_value(EntityAttribute::MaxHealth),
        Some(BASE_MAX_HEALTH + 8.0)
    );

    fixture.esper.detach_psychic();
    assert_eq!(
        fixture.entity.attribute_value(EntityAttribute::MaxHealth),
        Some(BASE_MAX_HEALTH)
    );
}

#[test]
fn reattach_destroys_previous_psychic() {
    let log = new_log();
    let fixture = Fixture::new(1);
    let first = fixture.attach(PsychicConcept::new("pyro").with_ability(active_concept("bolt", &log)));
    let bolt = first.ability("bolt").unwrap();

    let second = fixture.attach(PsychicConcept::new("cryo"));

    assert!(!first.is_valid());
    assert!(first.abilities().is_empty());
    assert_eq!(first.check_state(), Err(PsychicError::Destroyed("pyro".to_owned())));
    assert_eq!(
        bolt.set_cooldown(5),
        Err(PsychicError::Destroyed("pyro".to_owned()))
    );
    assert_eq!(fixture.esper.psychic().unwrap().name(), second.name());

    drop(first);
    assert_eq!(bolt.psychic().err(), Some(PsychicError::PsychicUnavailable));
}

#[test]
fn save_and_load_restore_mana_cooldowns_and_hook_data() {
    let log = new_log();
    let concept = Rc::new(
        PsychicConcept::new("pyro")
            .with_ability(noting_concept("bolt", &log, Some("hello"), false))
            .with_ability(active_concept("flash", &log)),
    );
    let registry = Concepts(vec![Rc::clone(&concept)]);

    let fixture = Fixture::new(1);
    let psychic = fixture.esper.attach_psychic(&concept).unwrap();
    psychic.set_mana(42.0);
    psychic.ability("bolt").unwrap().set_cooldown(100).unwrap();

    let record = fixture.esper.save();
    let section = record.section("psychic").unwrap();
    assert_eq!(section.get_string("name"), Some("pyro"));
    assert_eq!(section.get_double("mana"), Some(42.0));
    let bolt_section = section.section("abilities").unwrap().section("bolt").unwrap();
    assert_eq!(bolt_section.get_long("cooldown-time"), Some(100));
    assert_eq!(bolt_section.get_string("note"), Some("hello"));

    let restored = Fixture::new(1);
    restored.clock.advance_by(500);
    restored.esper.load(&record, &registry).unwrap();

    let psychic = restored.esper.psychic().unwrap();
    assert!(psychic.is_enabled());
    assert!(approx(psychic.mana(), 42.0));
    assert_eq!(psychic.ability("bolt").unwrap().cooldown(), 100);
    assert_eq!(psychic.ability("flash").unwrap().cooldown(), 0);
    assert!(entries(&log).contains(&"bolt:load".to_owned()));
}

#[test]
fn failing_save_hook_still_persists_cooldown() {
    let log = new_log();
    let fixture = Fixture::new(1);
    let psychic = fixture
        .attach(PsychicConcept::new("pyro").with_ability(noting_concept("bolt", &log, None, true)));
    psychic.ability("bolt").unwrap().set_cooldown(30).unwrap();

    let record = fixture.esper.save();
    let bolt_section = record
        .section("psychic")
        .and_then(|s| s.section("abilities"))
        .and_then(|s| s.section("bolt"))
        .unwrap();
    assert_eq!(bolt_section.get_long("cooldown-time"), Some(30));
    assert!(entries(&log).contains(&"bolt:save".to_owned()));
}

#[test]
fn unknown_concept_leaves_esper_without_psychic() {
    let fixture = Fixture::new(1);
    fixture.attach(PsychicConcept::new("pyro"));

    let mut record = ConfigSection::new();
    record.create_section("psychic").set("name", "ghost");

    fixture.esper.load(&record, &Concepts(Vec::new())).unwrap();
    assert!(fixture.esper.psychic().is_none());
    assert!(fixture.esper.save().is_empty());
}

#[test]
fn negative_saved_cooldown_loads_as_zero() {
    let log = new_log();
    let concept = Rc::new(PsychicConcept::new("pyro").with_ability(active_concept("bolt", &log)));
    let mut record = ConfigSection::new();
    let section = record.create_section("psychic");
    section.set("name", "pyro");
    section
        .create_section("abilities")
        .create_section("bolt")
        .set("cooldown-time", -40_i64);

    let fixture = Fixture::new(1);
    fixture
        .esper
        .load(&record, &Concepts(vec![concept]))
        .unwrap();

    let psychic = fixture.esper.psychic().unwrap();
    assert_eq!(psychic.ability("bolt").unwrap().cooldown(), 0);
    assert!(approx(psychic.mana(), PsychicConcept::DEFAULT_MANA));
}

#[test]
fn clear_releases_entity_and_keeps_modifier() {
    let fixture = Fixture::new(1);
    let psychic = fixture.attach(PsychicConcept::new("tank").with_health_bonus(4.0));

    fixture.esper.clear();

    assert!(!psychic.is_valid());
    assert!(fixture.esper.psychic().is_none());
    assert_eq!(
        fixture.esper.entity().err(),
        Some(PsychicError::EntityUnavailable)
    );
    assert!(!fixture.esper.is_online());
    assert_eq!(fixture.entity.modifiers_on(EntityAttribute::MaxHealth).len(), 1);
}

#[test]
fn dropped_entity_goes_offline() {
    let clock = Rc::new(psychics_core::TickCounter::new());
    let entity = MockEntity::new(3);
    let esper = Esper::new(&as_entity(&entity), env(&clock));
    assert!(esper.is_online());
    assert_eq!(esper.unique_id(), entity.id);

    drop(entity);

    assert!(!esper.is_online());
    assert_eq!(esper.entity().err(), Some(PsychicError::EntityUnavailable));
    assert_eq!(
        esper.attribute(EsperAttribute::Level),
        Err(PsychicError::EntityUnavailable)
    );
}

#[test]
fn attributes_read_mana_from_attached_psychic() {
    let fixture = Fixture::new(5);
    fixture.entity.armor.set(Some(7.0));
    assert!(approx(fixture.esper.attribute(EsperAttribute::Mana).unwrap(), 0.0));

    fixture.attach(PsychicConcept::new("pyro").with_mana(60.0));

    assert!(approx(fixture.esper.attribute(EsperAttribute::Mana).unwrap(), 60.0));
    assert!(approx(fixture.esper.attribute(EsperAttribute::Defense).unwrap(), 7.0));
    assert!(approx(fixture.esper.attribute(EsperAttribute::Level).unwrap(), 5.0));
    assert!(approx(fixture.esper.attribute(EsperAttribute::AttackDamage).unwrap(), 2.0));
}
