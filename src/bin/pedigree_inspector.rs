// pedigree_inspector.rs - Standalone utility to inspect a family file without running inference

use clap::{Arg, Command};
use heredity::core::{hypothesis_space_size, DEFAULT_MAX_PERSONS};
use heredity::data::Family;
use std::path::Path;

fn trait_label(observed: Option<bool>) -> &'static str {
    match observed {
        Some(true) => "has trait",
        Some(false) => "no trait",
        None => "unknown",
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("Pedigree Inspector")
        .version(heredity::VERSION)
        .about("Summarizes pedigree structure and hypothesis-space size of a family file")
        .arg(Arg::new("family")
            .value_name("FILE")
            .help("Path to family record file (.csv or .tsv)")
            .required(true))
        .arg(Arg::new("max-persons")
            .long("max-persons")
            .value_name("N")
            .help("Ceiling used to judge whether exact inference is feasible (default: 12)"))
        .get_matches();

    let family_path = matches
        .get_one::<String>("family")
        .ok_or("missing family file")?;
    let max_persons = match matches.get_one::<String>("max-persons") {
        Some(value) => value
            .parse::<usize>()
            .map_err(|_| format!("Invalid max-persons value: {}", value))?,
        None => DEFAULT_MAX_PERSONS,
    };

    println!("🔬 {}", heredity::get_info());
    println!("================================");

    let family = Family::from_file(Path::new(family_path))?;

    println!("\n=== PEDIGREE ===");
    for (idx, person) in family.persons().iter().enumerate() {
        let parentage = match (&person.mother, &person.father) {
            (Some(mother), Some(father)) => format!("child of {} and {}", mother, father),
            _ => "founder".to_string(),
        };
        println!(
            "  {:<16} generation {}  {:<28} {}",
            person.name,
            family.generation(idx),
            parentage,
            trait_label(person.observed_trait)
        );
    }

    let founders = family.founders().count();
    let deepest = (0..family.len())
        .map(|idx| family.generation(idx))
        .max()
        .unwrap_or(0);

    println!("\n=== SUMMARY ===");
    println!("📊 Persons: {}", family.len());
    println!("🌱 Founders: {}", founders);
    println!("👶 Children: {}", family.len() - founders);
    println!("🔎 Observed traits: {}", family.observed_count());
    println!("🧬 Generations: {}", deepest + 1);

    match hypothesis_space_size(&family) {
        Some(worlds) => println!("🎯 Worlds to score: {}", worlds),
        None => println!("🎯 Worlds to score: beyond 128-bit range"),
    }

    if family.len() > max_persons {
        println!(
            "⚠️  {} persons exceeds the ceiling of {}: exact inference is not practical",
            family.len(),
            max_persons
        );
    } else {
        println!("✅ Family size within the exact-inference ceiling of {}", max_persons);
    }

    Ok(())
}
