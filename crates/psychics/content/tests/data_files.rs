use std::path::PathBuf;

use psychics_content::{AbilityRegistry, ConfigLoader, PsychicLoader};
use psychics_core::{PsychicConceptRegistry, PsychicsConfig};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn shipped_concepts_load_with_builtins() {
    let catalog =
        PsychicLoader::load(&data_dir().join("psychics.ron"), &AbilityRegistry::with_builtins())
            .unwrap();

    assert_eq!(catalog.names(), vec!["biokinesis", "pyrokinesis"]);

    let pyro = catalog.psychic_concept("pyrokinesis").unwrap();
    let inferno = pyro.ability("inferno").unwrap();
    assert_eq!(inferno.casting_time, 40);
    assert!(inferno.damage.is_some());

    let bio = catalog.psychic_concept("biokinesis").unwrap();
    assert!(bio.ability("mend").unwrap().healing.is_some());
}

#[test]
fn shipped_concepts_need_registered_kinds() {
    let err = PsychicLoader::load(&data_dir().join("psychics.ron"), &AbilityRegistry::new())
        .unwrap_err();
    assert!(err.to_string().contains("Unknown ability kind"));
}

#[test]
fn shipped_config_matches_defaults() {
    let config = ConfigLoader::load(&data_dir().join("psychics.toml")).unwrap();
    assert_eq!(config, PsychicsConfig::default());
}
