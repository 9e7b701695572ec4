/// Trigger integration tests: messages in, trait effects out.

use persona_engine::core::effects::apply_effects;
use persona_engine::core::engine::PersonalityEngine;
use persona_engine::core::trigger::{TriggerCatalog, TriggerError};
use persona_engine::schema::traits::TraitVector;
use persona_engine::schema::trigger::{Background, Duration, TriggerContext};

#[test]
fn hostile_message_through_builtin_catalog() {
    let engine = PersonalityEngine::builder().build().unwrap();
    let effects = engine.evaluate(
        &TriggerContext::new("You're so stupid."),
        &Background::new(""),
    );
    let names: Vec<&str> = effects.iter().map(|e| e.trait_name.as_str()).collect();
    assert_eq!(names, vec!["agreeableness", "directness", "stress_response"]);
    assert!(effects.iter().all(|e| e.duration == Duration::Instant));

    let base = TraitVector {
        directness: Some(50.0),
        stress_response: Some(50.0),
        ..TraitVector::default()
    };
    let shifted = apply_effects(&base, &effects);
    assert_eq!(shifted.agreeableness, 30.0);
    assert_eq!(shifted.directness, Some(65.0));
    assert_eq!(shifted.stress_response, Some(60.0));
}

#[test]
fn profane_insult_fires_only_hostile_attack() {
    let engine = PersonalityEngine::builder().build().unwrap();
    let context = TriggerContext::new("you are so fucking stupid");
    let fired: Vec<&str> = engine
        .trigger_catalog()
        .fired(&context, &Background::new(""))
        .into_iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(fired, vec!["hostile-attack"]);

    let base = TraitVector {
        directness: Some(50.0),
        stress_response: Some(50.0),
        ..TraitVector::default()
    };
    let shifted = apply_effects(&base, &engine.evaluate(&context, &Background::new("")));
    assert_eq!(shifted.agreeableness, 30.0);
    assert_eq!(shifted.directness, Some(65.0));
    assert_eq!(shifted.stress_response, Some(60.0));
}

#[test]
fn evaluating_twice_gives_identical_effects() {
    let engine = PersonalityEngine::builder().build().unwrap();
    let traits = TraitVector {
        core_fear: Some("losing my family".to_string()),
        ..TraitVector::default()
    };
    let background = Background::for_character("Raised by a single mother.", &traits);
    let context = TriggerContext::new("Haha, prove it, your family is pathetic")
        .with_history(["thank you, friend", "you idiot"]);

    let first = engine.evaluate(&context, &background);
    let second = engine.evaluate(&context, &background);
    assert_eq!(first, second);

    let names: Vec<&str> = first.iter().map(|e| e.trait_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            // parental-trauma
            "neuroticism",
            "emotional_volatility",
            "trust_level",
            // hostile-attack
            "agreeableness",
            "directness",
            "stress_response",
            // challenge-authority
            "dominance",
            "confidence",
            "agreeableness",
            // building-trust
            "trust_level",
            "empathy",
            // humor-attempt
            "wit_humor",
            "optimism",
        ]
    );
}

#[test]
fn words_containing_family_terms_do_not_fire() {
    let engine = PersonalityEngine::builder().build().unwrap();
    let raised_by_mother = Background::new("Raised by a single mother after losing his father.");
    for message in ["Give me a moment.", "Momentum is everything", "The daddy longlegs", "Transparent"] {
        let fired = engine
            .trigger_catalog()
            .fired(&TriggerContext::new(message), &raised_by_mother);
        assert!(fired.is_empty(), "{:?} fired {:?}", message, fired);
    }
    let fired = engine
        .trigger_catalog()
        .fired(&TriggerContext::new("How's your Mom?"), &raised_by_mother);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].id, "parental-trauma");
}

#[test]
fn parental_trauma_needs_matching_background() {
    let engine = PersonalityEngine::builder().build().unwrap();
    let orphan = Background::new("Raised by a single mother after losing his father at sea.");
    let sailor = Background::new("Grew up on the docks and never left.");

    let ask_father = TriggerContext::new("Tell me about your father.");
    let ask_ship = TriggerContext::new("Tell me about your ship.");

    let fired = |ctx: &TriggerContext, bg: &Background<'_>| -> Vec<String> {
        engine
            .trigger_catalog()
            .fired(ctx, bg)
            .into_iter()
            .map(|t| t.id.clone())
            .collect()
    };

    assert_eq!(fired(&ask_father, &orphan), vec!["parental-trauma".to_string()]);
    assert!(fired(&ask_ship, &orphan).is_empty());
    assert!(fired(&ask_father, &sailor).is_empty());
}

#[test]
fn formative_trauma_opens_the_gate() {
    let engine = PersonalityEngine::builder().build().unwrap();
    let traits = TraitVector {
        formative_trauma: Some("Abandoned by family as a child".to_string()),
        ..TraitVector::default()
    };
    let background = Background::for_character("A quiet innkeeper.", &traits);
    let effects = engine.evaluate(&TriggerContext::new("Do you miss your mom?"), &background);
    assert_eq!(effects.len(), 3);
    assert_eq!(effects[0].trait_name, "neuroticism");
}

#[test]
fn building_trust_reads_history() {
    let engine = PersonalityEngine::builder().build().unwrap();
    let context = TriggerContext::new("So, what's the plan?")
        .with_history(["I trust you with this", "Let's get going"]);
    let effects = engine.evaluate(&context, &Background::new(""));
    let names: Vec<&str> = effects.iter().map(|e| e.trait_name.as_str()).collect();
    assert_eq!(names, vec!["trust_level", "empathy"]);
}

#[test]
fn multiple_triggers_accumulate_in_priority_order() {
    let engine = PersonalityEngine::builder().build().unwrap();
    let context = TriggerContext::new("Haha, you're wrong and you're an idiot");
    let ids: Vec<&str> = engine
        .trigger_catalog()
        .fired(&context, &Background::new(""))
        .into_iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["hostile-attack", "challenge-authority", "humor-attempt"]);
}

#[test]
fn custom_triggers_load_from_file() {
    let catalog =
        TriggerCatalog::load_from_ron(std::path::Path::new("tests/fixtures/custom_triggers.ron"))
            .unwrap();
    assert_eq!(catalog.len(), 2);
    let first = catalog.triggers().next().unwrap();
    assert_eq!(first.id, "gold-mention");
}

#[test]
fn bad_catalogs_are_rejected_at_load() {
    let bad_pattern = r#"[(
        id: "broken",
        name: "Broken",
        trigger_type: pattern,
        conditions: [matches(pattern: "(unclosed")],
        effects: [],
        priority: 1,
    )]"#;
    assert!(matches!(
        TriggerCatalog::parse_ron(bad_pattern),
        Err(TriggerError::InvalidPattern { .. })
    ));

    let bad_modifier = r#"[(
        id: "too-much",
        name: "Too Much",
        trigger_type: keyword,
        conditions: [contains(terms: ["x"])],
        effects: [(trait_name: "openness", modifier: 150.0, duration: instant)],
        priority: 1,
    )]"#;
    assert!(matches!(
        TriggerCatalog::parse_ron(bad_modifier),
        Err(TriggerError::ModifierOutOfRange { .. })
    ));
}

#[test]
fn session_accumulates_across_turns() {
    let engine = PersonalityEngine::builder().build().unwrap();
    let mut session = engine
        .session(
            TraitVector {
                directness: Some(50.0),
                stress_response: Some(50.0),
                ..TraitVector::default()
            },
            "",
        )
        .unwrap();
    session.observe("shut up");
    session.observe("you moron");
    // 50 -> 30 -> 18
    assert!((session.traits().agreeableness - 18.0).abs() < 1e-4);
    session.reset();
    assert_eq!(session.traits().agreeableness, 50.0);
}
