//! Behavior deriver: threshold rule tables turning a trait vector into a
//! categorized behavior description.

use crate::core::interaction::detect_interactions;
use crate::core::scaler::scale_trait;
use crate::schema::behavior::{BehaviorCategory, BehaviorSet, Mode, ResponseModifier};
use crate::schema::traits::{NumericTrait, TraitVector};

use BehaviorCategory::{BehavioralQuirks, ConversationStyle, EmotionalResponses, SpeechPatterns};
use NumericTrait::*;

/// Which side of the intensity scale a rule watches.
#[derive(Debug, Clone, Copy)]
enum Bound {
    AtLeast(f32),
    AtMost(f32),
}

/// One entry of a rule table. `{level}` in `text` is replaced with the
/// bucket descriptor.
#[derive(Debug)]
struct ThresholdRule {
    key: NumericTrait,
    bound: Bound,
    category: BehaviorCategory,
    text: &'static str,
}

const fn high(key: NumericTrait, category: BehaviorCategory, text: &'static str) -> ThresholdRule {
    ThresholdRule {
        key,
        bound: Bound::AtLeast(0.8),
        category,
        text,
    }
}

const fn low(key: NumericTrait, category: BehaviorCategory, text: &'static str) -> ThresholdRule {
    ThresholdRule {
        key,
        bound: Bound::AtMost(0.2),
        category,
        text,
    }
}

const BIG_FIVE_RULES: &[ThresholdRule] = &[
    high(Openness, ConversationStyle, "Explores unusual ideas and hypotheticals with {level} curiosity"),
    high(Openness, SpeechPatterns, "Uses vivid, imaginative language"),
    low(Openness, ConversationStyle, "Sticks to the familiar and dismisses abstract speculation"),
    high(Conscientiousness, ConversationStyle, "Organizes thoughts carefully and follows through on every point"),
    low(Conscientiousness, BehavioralQuirks, "Loses track of plans and drops topics halfway"),
    high(Extraversion, SpeechPatterns, "Talks with {level} enthusiasm and fills silences"),
    high(Extraversion, ConversationStyle, "Takes the lead and asks about others"),
    low(Extraversion, SpeechPatterns, "Keeps replies short and reserved"),
    low(Extraversion, ConversationStyle, "Waits to be addressed before speaking"),
    high(Agreeableness, SpeechPatterns, "Uses diplomatic, warm language and softens criticism"),
    high(Agreeableness, EmotionalResponses, "Forgives slights quickly"),
    low(Agreeableness, SpeechPatterns, "Uses blunt, harsh language without cushioning"),
    low(Agreeableness, EmotionalResponses, "Holds grudges and answers slights with hostility"),
    high(Neuroticism, EmotionalResponses, "Reacts to uncertainty with {level} anxiety"),
    high(Neuroticism, BehavioralQuirks, "Second-guesses statements and over-apologizes"),
    low(Neuroticism, EmotionalResponses, "Stays calm and unflappable under pressure"),
];

const EXTENDED_RULES: &[ThresholdRule] = &[
    ThresholdRule {
        key: SarcasmLevel,
        bound: Bound::AtLeast(0.95),
        category: SpeechPatterns,
        text: "Treats sincerity as weakness; mockery is the default register",
    },
    ThresholdRule {
        key: SarcasmLevel,
        bound: Bound::AtLeast(0.6),
        category: SpeechPatterns,
        text: "Uses {level} sarcasm and dry irony",
    },
    low(SarcasmLevel, SpeechPatterns, "Says exactly what they mean, without irony"),
    high(WitHumor, SpeechPatterns, "Makes {level} witty jokes and quick comebacks"),
    low(WitHumor, ConversationStyle, "Takes jokes literally and rarely makes them"),
    high(Empathy, EmotionalResponses, "Picks up on others' feelings and responds with care"),
    low(Empathy, EmotionalResponses, "Misses or ignores other people's emotional cues"),
    high(Confidence, SpeechPatterns, "States opinions as facts with {level} self-assurance"),
    low(Confidence, SpeechPatterns, "Hedges statements with \"maybe\" and \"I think\""),
    high(Impulsiveness, BehavioralQuirks, "Blurts out thoughts before finishing the last one"),
    low(Impulsiveness, ConversationStyle, "Pauses to think before answering"),
];

const COMMUNICATION_RULES: &[ThresholdRule] = &[
    high(FormalityLevel, SpeechPatterns, "Uses formal address and avoids contractions"),
    low(FormalityLevel, SpeechPatterns, "Talks casually, full of contractions and slang"),
    high(Verbosity, ConversationStyle, "Gives long, winding answers"),
    low(Verbosity, ConversationStyle, "Answers in as few words as possible"),
    high(Directness, SpeechPatterns, "Gets straight to the point, no hedging"),
    low(Directness, SpeechPatterns, "Talks around topics and hints instead of stating"),
    high(ProfanityUsage, SpeechPatterns, "Swears with {level} frequency"),
    low(ProfanityUsage, SpeechPatterns, "Never swears"),
];

/// Communication traits that always surface as response modifiers.
const COMMUNICATION_MODIFIERS: [(NumericTrait, &str); 4] = [
    (FormalityLevel, "formality"),
    (Verbosity, "verbosity"),
    (Directness, "directness"),
    (ProfanityUsage, "profanity"),
];

const PSYCHOLOGICAL_RULES: &[ThresholdRule] = &[
    high(EmotionalVolatility, EmotionalResponses, "Mood swings sharply from one message to the next"),
    low(EmotionalVolatility, EmotionalResponses, "Emotionally steady; rarely shows strong feelings"),
    high(TrustLevel, ConversationStyle, "Takes people at their word"),
    low(TrustLevel, ConversationStyle, "Suspects hidden motives and questions intentions"),
    high(Optimism, EmotionalResponses, "Finds the bright side of every setback"),
    low(Optimism, EmotionalResponses, "Expects the worst and says so"),
    high(StressResponse, EmotionalResponses, "Snaps or shuts down under {level} stress"),
    low(StressResponse, EmotionalResponses, "Handles pressure with composure"),
];

const RELATIONAL_RULES: &[ThresholdRule] = &[
    high(Dominance, ConversationStyle, "Steers the conversation and expects to be followed"),
    low(Dominance, ConversationStyle, "Defers to others and avoids taking charge"),
    high(SocialEnergy, ConversationStyle, "Gets more animated the longer a conversation runs"),
    low(SocialEnergy, BehavioralQuirks, "Grows tired and curt as conversations drag on"),
    high(Loyalty, EmotionalResponses, "Defends friends fiercely, even when they are wrong"),
    low(Loyalty, EmotionalResponses, "Switches sides whenever it is convenient"),
];

/// Derive the behavior description for `traits`.
///
/// Each group's rules fire independently; both a high and a low rule can
/// exist for one trait. `Mode::Full` adds trait interactions and the
/// flavor-field pass.
pub fn derive_behaviors(traits: &TraitVector, mode: Mode) -> BehaviorSet {
    let mut set = BehaviorSet::default();

    apply_rules(BIG_FIVE_RULES, traits, &mut set);
    apply_rules(EXTENDED_RULES, traits, &mut set);
    derive_communication(traits, &mut set);
    derive_psychological(traits, &mut set);
    derive_relational(traits, &mut set);

    if mode == Mode::Full {
        set.trait_interactions = detect_interactions(traits);
        derive_advanced(traits, &mut set);
    }

    tracing::debug!(
        "derived {:?} behavior set: {} speech, {} emotional, {} style, {} quirks, {} modifiers, {} interactions",
        mode,
        set.speech_patterns.len(),
        set.emotional_responses.len(),
        set.conversation_style.len(),
        set.behavioral_quirks.len(),
        set.response_modifiers.len(),
        set.trait_interactions.len()
    );
    set
}

fn apply_rules(rules: &[ThresholdRule], traits: &TraitVector, set: &mut BehaviorSet) {
    for rule in rules {
        let Some(value) = traits.get(rule.key) else {
            continue;
        };
        let bucket = scale_trait(value);
        let fires = match rule.bound {
            Bound::AtLeast(min) => bucket.intensity >= min,
            Bound::AtMost(max) => bucket.intensity <= max,
        };
        if fires {
            tracing::trace!("rule fired for {} = {}: {}", rule.key, value, rule.text);
            set.push(rule.category, rule.text.replace("{level}", bucket.descriptor));
        }
    }
}

fn derive_communication(traits: &TraitVector, set: &mut BehaviorSet) {
    apply_rules(COMMUNICATION_RULES, traits, set);

    for (key, label) in COMMUNICATION_MODIFIERS {
        if let Some(value) = traits.get(key) {
            let bucket = scale_trait(value);
            set.response_modifiers.push(ResponseModifier {
                trait_name: key.name().to_string(),
                effect: format!("{} {}", bucket.descriptor, label),
                intensity: bucket.intensity,
            });
        }
    }

    if let Some(style) = traits.primary_language_style {
        set.push(SpeechPatterns, style.description());
    }
    if let Some(education) = traits.education_level {
        set.push(ConversationStyle, education.description());
    }
}

fn derive_psychological(traits: &TraitVector, set: &mut BehaviorSet) {
    apply_rules(PSYCHOLOGICAL_RULES, traits, set);

    if let Some(ref fear) = traits.core_fear {
        set.push(
            EmotionalResponses,
            format!("Turns defensive when talk drifts toward their fear of {}", fear),
        );
    }
    if let Some(ref desire) = traits.greatest_desire {
        set.push(
            ConversationStyle,
            format!("Steers conversations toward what they want most: {}", desire),
        );
    }
}

fn derive_relational(traits: &TraitVector, set: &mut BehaviorSet) {
    apply_rules(RELATIONAL_RULES, traits, set);

    if let Some(style) = traits.conflict_style {
        set.push(ConversationStyle, style.description());
    }
}

/// Flavor fields: catchphrases, tics, quirks and the response-shape modifiers.
fn derive_advanced(traits: &TraitVector, set: &mut BehaviorSet) {
    if let Some(ref phrase) = traits.signature_phrase {
        set.push(SpeechPatterns, format!("Often says \"{}\"", phrase));
    }
    if let Some(ref tic) = traits.speaking_tic {
        set.push(BehavioralQuirks, format!("Speaking tic: {}", tic));
    }
    for quirk in traits.quirks.descriptions() {
        set.push(BehavioralQuirks, quirk);
    }

    if let Some(length) = traits.response_length_preference {
        let (effect, intensity) = length.modifier();
        set.response_modifiers.push(ResponseModifier {
            trait_name: "response_length_preference".to_string(),
            effect: effect.to_string(),
            intensity,
        });
    }
    if let Some(value) = traits.emotion_intensity {
        let bucket = scale_trait(value);
        set.response_modifiers.push(ResponseModifier {
            trait_name: EmotionIntensity.name().to_string(),
            effect: format!("Expresses emotion with {} intensity", bucket.descriptor),
            intensity: bucket.intensity,
        });
    }

    if let Some(education) = traits.education_level {
        set.push(SpeechPatterns, education.vocabulary());
    }
    if let Some(ref trauma) = traits.formative_trauma {
        set.push(
            EmotionalResponses,
            format!("Reacts sharply to anything that recalls {}", trauma),
        );
    }
}
