//! Per-conversation state: a working trait vector that triggers push around.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

use crate::core::effects::apply_effects;
use crate::core::engine::PersonalityEngine;
use crate::core::trigger::{
    character_specific_trigger, collect_effects, TriggerCatalog, TriggerError,
};
use crate::schema::behavior::BehaviorSet;
use crate::schema::speech::PhraseCategory;
use crate::schema::traits::TraitVector;
use crate::schema::trigger::{Background, Effect, TriggerContext};

/// What one observed message did to the character.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnOutcome {
    /// Ids of the triggers that fired, in evaluation order.
    pub fired: Vec<String>,
    pub effects: Vec<Effect>,
}

impl TurnOutcome {
    pub fn is_quiet(&self) -> bool {
        self.fired.is_empty()
    }
}

/// A single character's conversation. Created with
/// [`PersonalityEngine::session`].
#[derive(Debug)]
pub struct PersonaSession<'e> {
    engine: &'e PersonalityEngine,
    base: TraitVector,
    working: TraitVector,
    background: String,
    triggers: TriggerCatalog,
    history: VecDeque<String>,
    rng: StdRng,
    turns: u64,
}

impl<'e> PersonaSession<'e> {
    pub(crate) fn new(
        engine: &'e PersonalityEngine,
        traits: TraitVector,
        background: String,
    ) -> Result<Self, TriggerError> {
        let triggers = match character_specific_trigger(&traits) {
            Some(fear) => engine.trigger_catalog().with_trigger(fear)?,
            None => engine.trigger_catalog().clone(),
        };
        tracing::debug!("session started with {} triggers", triggers.len());
        Ok(Self {
            engine,
            working: traits.clone(),
            base: traits,
            background,
            triggers,
            history: VecDeque::new(),
            rng: StdRng::seed_from_u64(engine.config().seed),
            turns: 0,
        })
    }

    /// Evaluate `message` against the current history, apply the resulting
    /// effects to the working vector, then record the message.
    pub fn observe(&mut self, message: &str) -> TurnOutcome {
        let context = TriggerContext::new(message).with_history(self.history.iter().cloned());
        let background = Background::for_character(&self.background, &self.base);

        let fired = self.triggers.fired(&context, &background);
        let outcome = TurnOutcome {
            fired: fired.iter().map(|t| t.id.clone()).collect(),
            effects: collect_effects(&fired),
        };

        self.working = apply_effects(&self.working, &outcome.effects);
        self.remember(message);
        self.turns += 1;
        if !outcome.is_quiet() {
            tracing::info!("turn {}: fired {:?}", self.turns, outcome.fired);
        }
        outcome
    }

    fn remember(&mut self, message: &str) {
        let window = self.engine.config().history_window;
        if window == 0 {
            return;
        }
        while self.history.len() >= window {
            self.history.pop_front();
        }
        self.history.push_back(message.to_string());
    }

    /// Drop every accumulated effect and the message history.
    pub fn reset(&mut self) {
        self.working = self.base.clone();
        self.history.clear();
        self.turns = 0;
    }

    /// The current (post-effect) vector.
    pub fn traits(&self) -> &TraitVector {
        &self.working
    }

    pub fn base_traits(&self) -> &TraitVector {
        &self.base
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Behavior of the current vector in the engine's default mode.
    pub fn behavior(&self) -> BehaviorSet {
        self.engine
            .describe(&self.working, self.engine.config().default_mode)
    }

    pub fn speech(&self, category: PhraseCategory) -> Vec<String> {
        self.engine.contextual_speech(&self.working, category)
    }

    pub fn pick_phrase(&mut self, category: PhraseCategory) -> String {
        self.engine.pick_phrase(&self.working, category, &mut self.rng)
    }

    pub fn pick_opening(&mut self) -> String {
        self.engine.pick_opening(&self.working, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PersonalityEngine {
        PersonalityEngine::builder()
            .seed(9)
            .history_window(3)
            .build()
            .unwrap()
    }

    fn bartender() -> TraitVector {
        TraitVector {
            directness: Some(50.0),
            stress_response: Some(50.0),
            trust_level: Some(50.0),
            ..TraitVector::default()
        }
    }

    #[test]
    fn hostile_message_shifts_working_vector() {
        let engine = engine();
        let mut session = engine.session(bartender(), "").unwrap();
        let outcome = session.observe("you're an idiot");
        assert_eq!(outcome.fired, vec!["hostile-attack".to_string()]);
        assert_eq!(outcome.effects.len(), 3);
        assert_eq!(session.traits().agreeableness, 30.0);
        assert_eq!(session.traits().directness, Some(65.0));
        assert_eq!(session.base_traits().agreeableness, 50.0);
    }

    #[test]
    fn outcome_matches_engine_evaluation() {
        let engine = engine();
        let mut session = engine.session(bartender(), "Lost his father young.").unwrap();
        let message = "haha, your father was a loser";
        let expected = engine.evaluate(
            &TriggerContext::new(message),
            &Background::new("Lost his father young."),
        );
        let outcome = session.observe(message);
        assert_eq!(
            outcome.fired,
            vec!["parental-trauma", "hostile-attack", "humor-attempt"]
        );
        assert_eq!(outcome.effects, expected);
    }

    #[test]
    fn quiet_message_changes_nothing() {
        let engine = engine();
        let mut session = engine.session(bartender(), "").unwrap();
        let outcome = session.observe("the weather is mild today");
        assert!(outcome.is_quiet());
        assert_eq!(session.traits(), session.base_traits());
        assert_eq!(session.turns(), 1);
    }

    #[test]
    fn history_is_bounded() {
        let engine = engine();
        let mut session = engine.session(bartender(), "").unwrap();
        for msg in ["one", "two", "three", "four", "five"] {
            session.observe(msg);
        }
        let history: Vec<&str> = session.history().collect();
        assert_eq!(history, vec!["three", "four", "five"]);
    }

    #[test]
    fn repeated_hostility_uses_history() {
        let engine = PersonalityEngine::builder().history_window(10).build().unwrap();
        let mut session = engine.session(bartender(), "").unwrap();
        session.observe("you idiot");
        session.observe("stupid question");
        session.observe("I hate this");
        let outcome = session.observe("hello");
        assert!(outcome.fired.contains(&"repeated-hostility".to_string()));
    }

    #[test]
    fn core_fear_trigger_is_per_session() {
        let engine = engine();
        let fearful = TraitVector {
            core_fear: Some("drowning in deep water".to_string()),
            ..bartender()
        };
        let mut session = engine.session(fearful, "").unwrap();
        let outcome = session.observe("Let's go swim in the deep lake");
        assert_eq!(outcome.fired.first().map(String::as_str), Some("core-fear"));
        assert_eq!(session.traits().neuroticism, 70.0);

        // the engine's own catalog is untouched
        assert!(engine.trigger_catalog().triggers().all(|t| t.id != "core-fear"));
    }

    #[test]
    fn reset_restores_base() {
        let engine = engine();
        let mut session = engine.session(bartender(), "").unwrap();
        session.observe("shut up, loser");
        assert_ne!(session.traits(), session.base_traits());
        session.reset();
        assert_eq!(session.traits(), session.base_traits());
        assert_eq!(session.history().count(), 0);
    }

    #[test]
    fn same_seed_same_phrases() {
        let engine = engine();
        let mut a = engine.session(bartender(), "").unwrap();
        let mut b = engine.session(bartender(), "").unwrap();
        for _ in 0..5 {
            assert_eq!(a.pick_phrase(PhraseCategory::Greetings), b.pick_phrase(PhraseCategory::Greetings));
            assert_eq!(a.pick_opening(), b.pick_opening());
        }
    }
}
