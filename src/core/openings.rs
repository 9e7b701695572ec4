//! Opening lines: threshold-gated pools of conversation openers.

use rustc_hash::FxHashSet;

use crate::schema::traits::{NumericTrait, TraitVector};

const SARCASTIC: &[&str] = &[
    "Oh, great. Another conversation. My favorite.",
    "Let me guess, you need something.",
    "Well, this should be interesting.",
];

const HOSTILE: &[&str] = &[
    "What do you want?",
    "Make it quick.",
    "You've got about thirty seconds.",
];

const CONFIDENT: &[&str] = &[
    "You came to the right person.",
    "Relax, I've got this handled.",
    "Ask me anything. Go on.",
];

const ANXIOUS: &[&str] = &[
    "Oh! Sorry, I didn't see you there.",
    "Is everything okay? Did something happen?",
    "Hi, um, is this a bad time?",
];

const CASUAL: &[&str] = &[
    "Hey, what's up?",
    "Yo! What's going on?",
    "Sup? Pull up a chair.",
];

const THOUGHTFUL: &[&str] = &[
    "I was just thinking about something interesting.",
    "Have you ever noticed how strange ordinary things are?",
    "Let's get straight to it. What's on your mind?",
];

const CARING: &[&str] = &[
    "Hey, how are you really doing?",
    "It's good to see you. How have you been?",
    "You look like you've had a day. Want to talk?",
];

const DEFAULT: &[&str] = &[
    "Hello there.",
    "Hi, what brings you here?",
    "Hey. What's on your mind?",
];

fn at_least(traits: &TraitVector, key: NumericTrait, threshold: f32) -> bool {
    traits.get(key).is_some_and(|v| v >= threshold)
}

fn at_most(traits: &TraitVector, key: NumericTrait, threshold: f32) -> bool {
    traits.get(key).is_some_and(|v| v <= threshold)
}

/// Openers for this personality, deduplicated in first-seen order. Every
/// threshold that holds contributes its pool; the default pool is always
/// included last.
pub fn varied_openings(traits: &TraitVector) -> Vec<String> {
    use NumericTrait::*;

    let pools: [(bool, &[&str]); 7] = [
        (at_least(traits, SarcasmLevel, 70.0), SARCASTIC),
        (
            at_most(traits, Agreeableness, 30.0) || at_least(traits, Dominance, 70.0),
            HOSTILE,
        ),
        (at_least(traits, Confidence, 80.0), CONFIDENT),
        (at_least(traits, Neuroticism, 70.0), ANXIOUS),
        (at_most(traits, FormalityLevel, 30.0), CASUAL),
        (
            at_least(traits, Conscientiousness, 70.0) || at_least(traits, Openness, 80.0),
            THOUGHTFUL,
        ),
        (at_least(traits, Empathy, 70.0), CARING),
    ];

    let mut seen = FxHashSet::default();
    pools
        .into_iter()
        .filter_map(|(active, pool)| active.then_some(pool))
        .chain(std::iter::once(DEFAULT))
        .flatten()
        .filter(|line| seen.insert(*line))
        .map(|line| line.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_always_present() {
        let openings = varied_openings(&TraitVector::default());
        assert_eq!(openings, DEFAULT.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }

    #[test]
    fn pools_combine_in_threshold_order() {
        let v = TraitVector {
            sarcasm_level: Some(70.0),
            neuroticism: 70.0,
            ..TraitVector::default()
        };
        let openings = varied_openings(&v);
        assert_eq!(openings.len(), SARCASTIC.len() + ANXIOUS.len() + DEFAULT.len());
        assert_eq!(openings[0], SARCASTIC[0]);
        assert_eq!(openings[SARCASTIC.len()], ANXIOUS[0]);
    }

    #[test]
    fn either_side_of_an_or_threshold_enables_pool() {
        let disagreeable = TraitVector {
            agreeableness: 30.0,
            ..TraitVector::default()
        };
        let dominant = TraitVector {
            dominance: Some(70.0),
            ..TraitVector::default()
        };
        assert!(varied_openings(&disagreeable).contains(&HOSTILE[0].to_string()));
        assert!(varied_openings(&dominant).contains(&HOSTILE[0].to_string()));
    }

    #[test]
    fn no_duplicates() {
        let v = TraitVector {
            openness: 90.0,
            conscientiousness: 90.0,
            neuroticism: 90.0,
            agreeableness: 10.0,
            sarcasm_level: Some(90.0),
            confidence: Some(90.0),
            formality_level: Some(10.0),
            empathy: Some(90.0),
            dominance: Some(90.0),
            ..TraitVector::default()
        };
        let openings = varied_openings(&v);
        let unique: FxHashSet<&String> = openings.iter().collect();
        assert_eq!(unique.len(), openings.len());
        assert_eq!(openings.len(), 24);
    }
}
