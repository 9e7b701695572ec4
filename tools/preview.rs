/// Preview: interactive shell for trying a character against the engine.
///
/// Usage: preview [--traits <file>] [--patterns <path>] [--triggers <path>]
///                [--config <file>] [--seed <n>] [--mode lite|full]
///
/// Commands:
///   describe          print the behavior description
///   patterns          list applicable speech patterns
///   speak <category>  sample a phrase (greetings, insults, ...)
///   open              sample an opening line
///   say <message>     feed a message to the session and show effects
///   traits            print current numeric traits
///   mode <lite|full>  switch description mode
///   reset             restore the base traits and clear history
///   help              list commands
///   quit              exit

use persona_engine::config::EngineConfig;
use persona_engine::core::engine::PersonalityEngine;
use persona_engine::schema::behavior::Mode;
use persona_engine::schema::speech::PhraseCategory;
use persona_engine::schema::traits::{NumericTrait, TraitVector};
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,persona_engine=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut traits_path = None;
    let mut config = EngineConfig::default();
    let mut seed = None;
    let mut mode = None;
    let mut patterns = Vec::new();
    let mut triggers = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return;
            }
            "--traits" if i + 1 < args.len() => {
                i += 1;
                traits_path = Some(args[i].clone());
            }
            "--patterns" if i + 1 < args.len() => {
                i += 1;
                patterns.push(args[i].clone());
            }
            "--triggers" if i + 1 < args.len() => {
                i += 1;
                triggers.push(args[i].clone());
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                match EngineConfig::load_from_ron(Path::new(&args[i])) {
                    Ok(c) => config = c,
                    Err(e) => {
                        eprintln!("ERROR: Failed to load config: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = Some(args[i].parse().unwrap_or(42));
            }
            "--mode" if i + 1 < args.len() => {
                i += 1;
                mode = parse_mode(&args[i]);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let traits = match traits_path {
        Some(ref path) => match TraitVector::load_from_ron(Path::new(path)) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("ERROR: Failed to load traits: {}", e);
                std::process::exit(1);
            }
        },
        None => TraitVector::default(),
    };

    let mut builder = PersonalityEngine::builder().config(config);
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    if let Some(mode) = mode {
        builder = builder.default_mode(mode);
    }
    for path in &patterns {
        builder = builder.speech_patterns_file(path);
    }
    for path in &triggers {
        builder = builder.triggers_file(path);
    }
    let engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let mut session = match engine.session(traits, "") {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    let mut mode = engine.config().default_mode;

    println!(
        "Loaded {} speech patterns, {} triggers",
        engine.speech_library().patterns().len(),
        engine.trigger_catalog().len()
    );
    println!("Seed: {}", engine.config().seed);
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (line.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "describe" => {
                let set = engine.describe(session.traits(), mode);
                println!("\n{}", set.to_prompt_section());
            }
            "patterns" => {
                let applicable = engine.applicable_patterns(session.traits());
                if applicable.is_empty() {
                    println!("No patterns apply; fallback phrases will be used.");
                }
                for pattern in applicable {
                    println!("  {} ({})", pattern.name, pattern.id);
                }
            }
            "speak" => match parse_category(rest) {
                Some(category) => println!("{}", session.pick_phrase(category)),
                None => {
                    let names: Vec<&str> = PhraseCategory::ALL.iter().map(|c| c.name()).collect();
                    println!("Usage: speak <category>");
                    println!("  category: {}", names.join(", "));
                }
            },
            "open" => println!("{}", session.pick_opening()),
            "say" => {
                if rest.is_empty() {
                    println!("Usage: say <message>");
                    continue;
                }
                let outcome = session.observe(rest);
                if outcome.is_quiet() {
                    println!("(no triggers fired)");
                    continue;
                }
                println!("Fired: {}", outcome.fired.join(", "));
                for effect in &outcome.effects {
                    println!(
                        "  {} {:+}% ({:?})",
                        effect.trait_name, effect.modifier, effect.duration
                    );
                }
            }
            "traits" => print_traits(session.traits()),
            "mode" => match parse_mode(rest) {
                Some(m) => {
                    mode = m;
                    println!("Mode set to {:?}", mode);
                }
                None => println!("Usage: mode <lite|full> (current: {:?})", mode),
            },
            "reset" => {
                session.reset();
                println!("Traits restored.");
            }
            _ => println!("Unknown command '{}'. Type 'help' for commands.", cmd),
        }
    }
}

fn print_usage() {
    println!("Usage: preview [--traits <file>] [--patterns <path>] [--triggers <path>]");
    println!("               [--config <file>] [--seed <n>] [--mode lite|full]");
}

fn print_help() {
    println!("Commands:");
    println!("  describe           print the behavior description");
    println!("  patterns           list applicable speech patterns");
    println!("  speak <category>   sample a phrase");
    println!("  open               sample an opening line");
    println!("  say <message>      feed a message and show effects");
    println!("  traits             print current numeric traits");
    println!("  mode <lite|full>   switch description mode");
    println!("  reset              restore base traits");
    println!("  quit               exit");
}

fn parse_mode(s: &str) -> Option<Mode> {
    match s.to_lowercase().as_str() {
        "lite" => Some(Mode::Lite),
        "full" => Some(Mode::Full),
        _ => None,
    }
}

fn parse_category(s: &str) -> Option<PhraseCategory> {
    let s = s.to_lowercase();
    PhraseCategory::ALL.into_iter().find(|c| c.name() == s)
}

fn print_traits(traits: &TraitVector) {
    for key in NumericTrait::ALL {
        if let Some(value) = traits.get(key) {
            println!("  {:<22} {:>6.1}", key.name(), value);
        }
    }
}
