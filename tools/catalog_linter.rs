/// Catalog Linter: validates speech-pattern and trigger catalogs.
///
/// Usage: catalog_linter [--patterns <path>]... [--triggers <path>]...
///
/// With no arguments the built-in catalogs are checked. Paths may be files
/// or directories of `.ron` files.

use persona_engine::core::speech::SpeechLibrary;
use persona_engine::core::trigger::TriggerCatalog;
use persona_engine::schema::speech::PhraseCategory;
use persona_engine::schema::traits::NumericTrait;
use persona_engine::schema::trigger::Condition;
use rustc_hash::FxHashMap;
use std::path::Path;
use std::process;

/// Below this many phrases a category repeats itself quickly.
const MIN_PHRASES: usize = 2;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,persona_engine=debug")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut pattern_paths = Vec::new();
    let mut trigger_paths = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!("Usage: catalog_linter [--patterns <path>]... [--triggers <path>]...");
                process::exit(0);
            }
            "--patterns" if i + 1 < args.len() => {
                i += 1;
                pattern_paths.push(args[i].clone());
            }
            "--triggers" if i + 1 < args.len() => {
                i += 1;
                trigger_paths.push(args[i].clone());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let builtin = pattern_paths.is_empty() && trigger_paths.is_empty();

    let mut library = SpeechLibrary::default();
    let mut catalog = TriggerCatalog::default();

    if builtin {
        match SpeechLibrary::builtin() {
            Ok(lib) => library = lib,
            Err(e) => errors.push(format!("built-in speech patterns: {}", e)),
        }
        match TriggerCatalog::builtin() {
            Ok(cat) => catalog = cat,
            Err(e) => errors.push(format!("built-in triggers: {}", e)),
        }
    }

    for path in &pattern_paths {
        for file in ron_files(Path::new(path), &mut errors) {
            match SpeechLibrary::load_from_ron(&file) {
                Ok(lib) => {
                    println!("  Loaded: {}", file.display());
                    library.merge(lib);
                }
                Err(e) => errors.push(format!("{}: {}", file.display(), e)),
            }
        }
    }

    for path in &trigger_paths {
        for file in ron_files(Path::new(path), &mut errors) {
            match TriggerCatalog::load_from_ron(&file) {
                Ok(cat) => {
                    println!("  Loaded: {}", file.display());
                    catalog.merge(cat);
                }
                Err(e) => errors.push(format!("{}: {}", file.display(), e)),
            }
        }
    }

    println!(
        "Loaded {} speech patterns, {} triggers",
        library.patterns().len(),
        catalog.len()
    );

    lint_patterns(&library, &mut warnings);
    lint_triggers(&catalog, &mut warnings);

    println!("\n=== Catalog Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn ron_files(path: &Path, errors: &mut Vec<String>) -> Vec<std::path::PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    if !path.is_dir() {
        errors.push(format!("Path '{}' does not exist", path.display()));
        return Vec::new();
    }
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(path) {
        for entry in entries.flatten() {
            let p = entry.path();
            if p.is_dir() {
                files.extend(ron_files(&p, errors));
            } else if p.extension().and_then(|s| s.to_str()) == Some("ron") {
                files.push(p);
            }
        }
    }
    files.sort();
    files
}

fn lint_patterns(library: &SpeechLibrary, warnings: &mut Vec<String>) {
    for pattern in library.patterns() {
        if pattern.requirements.is_empty() {
            warnings.push(format!(
                "Pattern '{}' has no requirements and applies to every character",
                pattern.id
            ));
        }
        for category in PhraseCategory::ALL {
            let count = pattern.phrases.get(category).len();
            if count > 0 && count < MIN_PHRASES {
                warnings.push(format!(
                    "Pattern '{}' has only {} {} (minimum {} recommended)",
                    pattern.id,
                    count,
                    category.name(),
                    MIN_PHRASES
                ));
            }
        }
        if pattern.examples.is_empty() {
            warnings.push(format!("Pattern '{}' has no examples", pattern.id));
        }
    }
}

fn lint_triggers(catalog: &TriggerCatalog, warnings: &mut Vec<String>) {
    let mut by_priority: FxHashMap<i32, Vec<&str>> = FxHashMap::default();

    for trigger in catalog.triggers() {
        by_priority
            .entry(trigger.priority)
            .or_default()
            .push(trigger.id.as_str());

        if trigger.conditions.is_empty() && trigger.gate.is_none() {
            warnings.push(format!(
                "Trigger '{}' has no conditions and fires on every message",
                trigger.id
            ));
        }
        if trigger.effects.is_empty() {
            warnings.push(format!("Trigger '{}' has no effects", trigger.id));
        }
        for effect in &trigger.effects {
            if NumericTrait::from_name(&effect.trait_name).is_none() {
                warnings.push(format!(
                    "Trigger '{}' targets '{}', which is not a numeric trait; the effect will be ignored",
                    trigger.id, effect.trait_name
                ));
            }
        }
        for condition in &trigger.conditions {
            if let Condition::Contains { terms, .. } = condition {
                if terms.iter().any(|t| t.trim().is_empty()) {
                    warnings.push(format!(
                        "Trigger '{}' has an empty keyword, which matches everything",
                        trigger.id
                    ));
                }
            }
        }
    }

    let mut shared: Vec<(i32, Vec<&str>)> = by_priority
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .collect();
    shared.sort_by(|a, b| b.0.cmp(&a.0));
    for (priority, ids) in shared {
        warnings.push(format!(
            "Triggers {:?} share priority {}; they apply in load order",
            ids, priority
        ));
    }
}
