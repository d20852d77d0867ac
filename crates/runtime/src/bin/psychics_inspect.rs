//! Read and inspect a persisted esper record.
//!
//! Prints the psychic, its mana and each ability's remaining cooldown. With a
//! concept file, also checks that the saved psychic and abilities still exist.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use psychics_content::{AbilityRegistry, PsychicLoader};
use psychics_core::{ConfigSection, PsychicConceptRegistry};
use psychics_runtime::FileEsperRepository;

/// Inspect a persisted esper record
#[derive(Parser)]
#[command(name = "psychics-inspect")]
#[command(about = "Inspect persisted esper records", long_about = None)]
#[command(version)]
struct Cli {
    /// Record file to read (`<uuid>.json`)
    #[arg(value_name = "RECORD")]
    record: PathBuf,

    /// RON concept file to validate the record against
    #[arg(value_name = "CONCEPTS")]
    concepts: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Psychic, mana and cooldowns
    Summary,
    /// The raw record as pretty JSON
    Json,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    psychics_runtime::logging::init();

    let cli = Cli::parse();

    let record = FileEsperRepository::read_record(&cli.record)
        .with_context(|| format!("Failed to read record: {}", cli.record.display()))?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        OutputFormat::Summary => print_summary(&record),
    }

    if let Some(path) = cli.concepts {
        let catalog = PsychicLoader::load(&path, &AbilityRegistry::with_builtins())
            .with_context(|| format!("Failed to load concepts: {}", path.display()))?;
        check_against(&record, &catalog);
    }

    Ok(())
}

fn print_summary(record: &ConfigSection) {
    let Some(psychic) = record.section("psychic") else {
        println!("no psychic attached");
        return;
    };

    println!("psychic: {}", psychic.get_string("name").unwrap_or("<unnamed>"));
    if let Some(mana) = psychic.get_double("mana") {
        println!("mana:    {}", psychics_core::ability::format_decimal(mana));
    }

    let Some(abilities) = psychic.section("abilities") else {
        return;
    };
    println!("abilities:");
    for name in abilities.keys() {
        let cooldown = abilities
            .section(name)
            .and_then(|ability| ability.get_long("cooldown-time"))
            .unwrap_or(0);
        if cooldown > 0 {
            println!("  {:<24} cooldown {} ticks", name, cooldown);
        } else {
            println!("  {:<24} ready", name);
        }
    }
}

fn check_against(record: &ConfigSection, catalog: &dyn PsychicConceptRegistry) {
    let Some(section) = record.section("psychic") else {
        return;
    };
    let Some(name) = section.get_string("name") else {
        println!("warning: psychic section has no name");
        return;
    };
    let Some(concept) = catalog.psychic_concept(name) else {
        println!("warning: psychic `{}` is not in the concept file; it will not be restored", name);
        return;
    };

    let mut stale = 0;
    if let Some(abilities) = section.section("abilities") {
        for ability in abilities.keys() {
            if concept.ability(ability).is_none() {
                println!("warning: ability `{}` no longer exists in `{}`", ability, name);
                stale += 1;
            }
        }
    }
    if stale == 0 {
        println!("record matches concepts");
    }
}
