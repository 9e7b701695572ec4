//! Trait interaction detector: joint-threshold predicates for behaviors no
//! single trait explains.

use crate::schema::behavior::TraitInteraction;
use crate::schema::traits::{NumericTrait, TraitVector};

use NumericTrait::*;

struct InteractionRule {
    traits: &'static [NumericTrait],
    condition: &'static str,
    behavior: &'static str,
    predicate: fn(&TraitVector) -> bool,
}

/// Closed catalog, evaluated in declaration order.
const INTERACTIONS: &[InteractionRule] = &[
    InteractionRule {
        traits: &[Impulsiveness, Conscientiousness],
        condition: "impulsiveness > 70 and conscientiousness < 30",
        behavior: "chaotic thought patterns; jumps between topics mid-sentence",
        predicate: |v| v.above(Impulsiveness, 70.0) && v.below(Conscientiousness, 30.0),
    },
    InteractionRule {
        traits: &[SarcasmLevel, Empathy],
        condition: "sarcasm_level > 70 and empathy < 30",
        behavior: "cutting remarks with no regard for how they land",
        predicate: |v| v.above(SarcasmLevel, 70.0) && v.below(Empathy, 30.0),
    },
    InteractionRule {
        traits: &[SarcasmLevel, Empathy],
        condition: "sarcasm_level > 70 and empathy > 70",
        behavior: "affectionate teasing; the sarcasm is a sign of fondness",
        predicate: |v| v.above(SarcasmLevel, 70.0) && v.above(Empathy, 70.0),
    },
    InteractionRule {
        traits: &[Confidence, Neuroticism],
        condition: "confidence > 80 and neuroticism > 70",
        behavior: "brittle bravado that cracks when challenged",
        predicate: |v| v.above(Confidence, 80.0) && v.above(Neuroticism, 70.0),
    },
    InteractionRule {
        traits: &[Extraversion, Agreeableness],
        condition: "extraversion > 70 and agreeableness < 30",
        behavior: "loud, combative presence that picks arguments for fun",
        predicate: |v| v.above(Extraversion, 70.0) && v.below(Agreeableness, 30.0),
    },
    InteractionRule {
        traits: &[Extraversion, Directness],
        condition: "extraversion < 30 and directness > 70",
        behavior: "speaks rarely, but every word lands bluntly",
        predicate: |v| v.below(Extraversion, 30.0) && v.above(Directness, 70.0),
    },
    InteractionRule {
        traits: &[Openness, WitHumor],
        condition: "openness > 80 and wit_humor > 70",
        behavior: "inventive wordplay and absurd hypotheticals",
        predicate: |v| v.above(Openness, 80.0) && v.above(WitHumor, 70.0),
    },
    InteractionRule {
        traits: &[Dominance, Loyalty],
        condition: "dominance > 70 and loyalty > 80",
        behavior: "fiercely protective leader who speaks for the group",
        predicate: |v| v.above(Dominance, 70.0) && v.above(Loyalty, 80.0),
    },
    InteractionRule {
        traits: &[TrustLevel, EmotionalVolatility],
        condition: "trust_level < 30 and emotional_volatility > 70",
        behavior: "paranoid outbursts when questioned",
        predicate: |v| v.below(TrustLevel, 30.0) && v.above(EmotionalVolatility, 70.0),
    },
    InteractionRule {
        traits: &[Optimism, Neuroticism],
        condition: "optimism > 80 and neuroticism > 70",
        behavior: "frantic cheerfulness papering over anxiety",
        predicate: |v| v.above(Optimism, 80.0) && v.above(Neuroticism, 70.0),
    },
    InteractionRule {
        traits: &[FormalityLevel, ProfanityUsage],
        condition: "formality_level > 70 and profanity_usage > 70",
        behavior: "eloquent, precisely placed profanity",
        predicate: |v| v.above(FormalityLevel, 70.0) && v.above(ProfanityUsage, 70.0),
    },
    InteractionRule {
        traits: &[Empathy, Agreeableness, Dominance],
        condition: "empathy > 70 and agreeableness > 70 and dominance < 30",
        behavior: "self-effacing caretaker who puts everyone else first",
        predicate: |v| {
            v.above(Empathy, 70.0) && v.above(Agreeableness, 70.0) && v.below(Dominance, 30.0)
        },
    },
];

/// Every interaction whose predicate holds, in catalog order. A predicate
/// reading an unconfigured trait does not hold.
pub fn detect_interactions(traits: &TraitVector) -> Vec<TraitInteraction> {
    INTERACTIONS
        .iter()
        .filter(|rule| (rule.predicate)(traits))
        .map(|rule| {
            tracing::trace!("trait interaction detected: {}", rule.condition);
            TraitInteraction {
                traits: rule.traits.to_vec(),
                resulting_behavior: rule.behavior.to_string(),
                condition: Some(rule.condition.to_string()),
            }
        })
        .collect()
}
