//! A short scripted conversation with a tavern keeper whose mood sours and
//! recovers as the patron talks.

use persona_engine::schema::speech::PhraseCategory;
use persona_engine::{EngineError, Mode, PersonalityEngine, TraitVector};

fn main() -> Result<(), EngineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,persona_engine=debug")),
        )
        .init();

    let keeper = TraitVector {
        openness: 45.0,
        conscientiousness: 70.0,
        extraversion: 65.0,
        agreeableness: 60.0,
        neuroticism: 35.0,
        sarcasm_level: Some(72.0),
        wit_humor: Some(68.0),
        empathy: Some(55.0),
        directness: Some(60.0),
        formality_level: Some(25.0),
        trust_level: Some(50.0),
        stress_response: Some(40.0),
        core_fear: Some("losing the tavern to debt".to_string()),
        signature_phrase: Some("Coin first, stories after.".to_string()),
        ..TraitVector::default()
    };

    let engine = PersonalityEngine::builder()
        .seed(2024)
        .default_mode(Mode::Full)
        .build()?;

    println!("{}", engine.describe(&keeper, Mode::Full).to_prompt_section());

    let mut session = engine.session(keeper, "Took over the tavern after her father died.")?;
    println!("Keeper: {}", session.pick_opening());

    let script = [
        "Haha, this ale tastes like a joke",
        "You're an idiot, this place is a dump",
        "Sorry. My mother ran a tavern too.",
        "I hear you're deep in debt with the guild",
        "Thank you, truly. I appreciate the warm fire.",
    ];

    for line in script {
        println!("\nPatron: {}", line);
        let outcome = session.observe(line);
        if outcome.is_quiet() {
            println!("  (unmoved)");
        } else {
            println!("  fired: {}", outcome.fired.join(", "));
        }
        let traits = session.traits();
        println!(
            "  agreeableness {:.1}, neuroticism {:.1}, trust {:.1}",
            traits.agreeableness,
            traits.neuroticism,
            traits.trust_level.unwrap_or_default()
        );
        println!("Keeper: {}", session.pick_phrase(PhraseCategory::Exclamations));
    }

    session.reset();
    println!("\nNext morning: {}", session.pick_phrase(PhraseCategory::Greetings));
    Ok(())
}
