//! Trigger engine: prioritized, context-sensitive rules that emit trait
//! effects for a live message.

use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashSet;
use std::path::Path;
use thiserror::Error;

use crate::catalog;
use crate::schema::traits::TraitVector;
use crate::schema::trigger::{
    Background, Condition, ContextSignal, Duration, Effect, Gate, PersonalityTrigger, Sentiment,
    TriggerContext, TriggerType,
};

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("trigger '{trigger}': invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        trigger: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("trigger '{trigger}': modifier {modifier} on {trait_name} is outside [-100, 100]")]
    ModifierOutOfRange {
        trigger: String,
        trait_name: String,
        modifier: f32,
    },
}

/// How many trailing history entries context conditions look at.
pub const CONTEXT_WINDOW: usize = 5;

/// Priority of the trigger synthesized from a character's core fear.
pub const CORE_FEAR_PRIORITY: i32 = 100;

const POSITIVE_WORDS: &[&str] = &[
    "love", "like", "great", "amazing", "awesome", "wonderful", "thank", "thanks", "appreciate",
    "happy", "brilliant", "good", "kind", "beautiful", "fantastic", "glad", "proud", "best",
];

const NEGATIVE_WORDS: &[&str] = &[
    "hate", "stupid", "idiot", "awful", "terrible", "bad", "sad", "angry", "dumb", "worst", "ugly",
    "annoying", "useless", "lonely", "hurt", "depressed", "pathetic", "crying", "worthless",
];

/// Four profanity-adjacent tokens; three or more in recent history reads as
/// sustained hostility.
const HOSTILITY_TOKENS: [&str; 4] = ["fuck", "stupid", "idiot", "hate"];
const HOSTILITY_THRESHOLD: usize = 3;

const TRUST_KEYWORDS: &[&str] = &[
    "trust", "friend", "thank", "appreciate", "understand", "believe in you", "here for you",
];

/// Words shorter than this never become core-fear terms.
const MIN_FEAR_WORD: usize = 3;

/// Filler words dropped when tokenizing a core fear.
const FEAR_STOPWORDS: &[&str] = &[
    "fear", "fears", "afraid", "scared", "terrified", "phobia", "of", "the", "and", "for", "not",
    "being", "about", "that", "this", "with", "from", "have", "will", "they", "them", "their",
    "what", "when", "into", "ever", "never", "other", "others", "someone", "something",
];

/// A trigger with its `Matches` conditions compiled.
#[derive(Debug, Clone)]
struct CompiledTrigger {
    trigger: PersonalityTrigger,
    /// One slot per condition; `Some` for `Matches`.
    regexes: Vec<Option<Regex>>,
    /// Whole-word matcher for a `BackgroundMentions` gate with terms.
    gate: Option<Regex>,
}

impl CompiledTrigger {
    fn compile(trigger: PersonalityTrigger) -> Result<Self, TriggerError> {
        for effect in &trigger.effects {
            if !(-100.0..=100.0).contains(&effect.modifier) {
                return Err(TriggerError::ModifierOutOfRange {
                    trigger: trigger.id.clone(),
                    trait_name: effect.trait_name.clone(),
                    modifier: effect.modifier,
                });
            }
        }

        let mut regexes = Vec::with_capacity(trigger.conditions.len());
        for condition in &trigger.conditions {
            let compiled = match condition {
                Condition::Matches {
                    pattern,
                    case_sensitive,
                } => {
                    let re = RegexBuilder::new(pattern)
                        .case_insensitive(!case_sensitive)
                        .build()
                        .map_err(|source| TriggerError::InvalidPattern {
                            trigger: trigger.id.clone(),
                            pattern: pattern.clone(),
                            source,
                        })?;
                    Some(re)
                }
                _ => None,
            };
            regexes.push(compiled);
        }
        let gate = match &trigger.gate {
            Some(Gate::BackgroundMentions(terms)) if !terms.is_empty() => {
                let pattern = whole_words_pattern(terms);
                let re = RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| TriggerError::InvalidPattern {
                        trigger: trigger.id.clone(),
                        pattern,
                        source,
                    })?;
                Some(re)
            }
            _ => None,
        };
        Ok(Self {
            trigger,
            regexes,
            gate,
        })
    }

    fn conditions_hold(&self, context: &TriggerContext) -> bool {
        self.trigger
            .conditions
            .iter()
            .zip(&self.regexes)
            .all(|(condition, regex)| match condition {
                Condition::Contains {
                    terms,
                    case_sensitive,
                } => contains_any(&context.message, terms, *case_sensitive),
                Condition::Matches { .. } => regex
                    .as_ref()
                    .is_some_and(|re| re.is_match(&context.message)),
                Condition::Sentiment(wanted) => analyze_sentiment(&context.message) == *wanted,
                Condition::Context(signal) => detect_context(&context.history, *signal),
            })
    }

    fn gate_passes(&self, background: &Background<'_>) -> bool {
        match &self.trigger.gate {
            None => true,
            Some(Gate::BackgroundMentions(_)) => self
                .gate
                .as_ref()
                .is_some_and(|re| background.texts().any(|text| re.is_match(text))),
        }
    }
}

/// An immutable trigger catalog, kept in evaluation order (descending
/// priority, ties in insertion order).
#[derive(Debug, Clone, Default)]
pub struct TriggerCatalog {
    triggers: Vec<CompiledTrigger>,
}

impl TriggerCatalog {
    /// Build a catalog. Patterns are compiled and modifiers range-checked
    /// here so that evaluation cannot fail.
    pub fn new(triggers: Vec<PersonalityTrigger>) -> Result<Self, TriggerError> {
        let triggers = triggers
            .into_iter()
            .map(CompiledTrigger::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let mut catalog = Self { triggers };
        catalog.sort();
        Ok(catalog)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, TriggerError> {
        Self::parse_ron(catalog::TRIGGERS_RON)
    }

    pub fn parse_ron(input: &str) -> Result<Self, TriggerError> {
        let triggers: Vec<PersonalityTrigger> = ron::from_str(input)?;
        Self::new(triggers)
    }

    pub fn load_from_ron(path: &Path) -> Result<Self, TriggerError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::parse_ron(&contents)?;
        tracing::debug!("loaded {} triggers from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Merge `other` into this catalog. Triggers in `other` replace those
    /// with the same id.
    pub fn merge(&mut self, other: TriggerCatalog) {
        for incoming in other.triggers {
            match self
                .triggers
                .iter_mut()
                .find(|t| t.trigger.id == incoming.trigger.id)
            {
                Some(existing) => *existing = incoming,
                None => self.triggers.push(incoming),
            }
        }
        self.sort();
    }

    /// A copy of this catalog with one more trigger.
    pub fn with_trigger(&self, trigger: PersonalityTrigger) -> Result<Self, TriggerError> {
        let mut extended = self.clone();
        extended.merge(Self::new(vec![trigger])?);
        Ok(extended)
    }

    fn sort(&mut self) {
        // sort_by is stable, so equal priorities keep insertion order
        self.triggers
            .sort_by(|a, b| b.trigger.priority.cmp(&a.trigger.priority));
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Triggers in evaluation order.
    pub fn triggers(&self) -> impl Iterator<Item = &PersonalityTrigger> {
        self.triggers.iter().map(|t| &t.trigger)
    }

    /// Every trigger that fires for `context`, in evaluation order. The whole
    /// catalog is checked on every call.
    pub fn fired<'a>(
        &'a self,
        context: &TriggerContext,
        background: &Background<'_>,
    ) -> Vec<&'a PersonalityTrigger> {
        self.triggers
            .iter()
            .filter(|t| t.conditions_hold(context) && t.gate_passes(background))
            .map(|t| {
                tracing::debug!(
                    "trigger '{}' fired (priority {})",
                    t.trigger.id,
                    t.trigger.priority
                );
                &t.trigger
            })
            .collect()
    }
}

/// Effects of every firing trigger, concatenated in priority order.
pub fn evaluate_triggers(
    catalog: &TriggerCatalog,
    context: &TriggerContext,
    background: &Background<'_>,
) -> Vec<Effect> {
    collect_effects(&catalog.fired(context, background))
}

/// Concatenate the effects of `fired`, keeping their order.
pub fn collect_effects(fired: &[&PersonalityTrigger]) -> Vec<Effect> {
    fired
        .iter()
        .flat_map(|t| t.effects.iter().cloned())
        .collect()
}

/// A trigger built from the character's core fear: mentioning any of its
/// words spikes neuroticism and stress. `None` when there is no usable fear.
pub fn character_specific_trigger(traits: &TraitVector) -> Option<PersonalityTrigger> {
    let fear = traits.core_fear.as_deref()?;
    let mut seen = FxHashSet::default();
    let terms: Vec<String> = words(fear)
        .filter(|w| w.chars().count() >= MIN_FEAR_WORD && !FEAR_STOPWORDS.contains(&w.as_str()))
        .filter(|w| seen.insert(w.clone()))
        .collect();
    if terms.is_empty() {
        return None;
    }

    Some(PersonalityTrigger {
        id: "core-fear".to_string(),
        name: format!("Core Fear: {}", fear),
        trigger_type: TriggerType::Trauma,
        conditions: vec![Condition::Matches {
            pattern: whole_words_pattern(&terms),
            case_sensitive: false,
        }],
        effects: vec![
            Effect::new("neuroticism", 40.0, Duration::Instant),
            Effect::new("stress_response", 50.0, Duration::Instant),
        ],
        priority: CORE_FEAR_PRIORITY,
        gate: None,
    })
}

/// Count lexicon hits; whichever side has more wins.
pub fn analyze_sentiment(message: &str) -> Sentiment {
    let mut positive = 0usize;
    let mut negative = 0usize;
    for word in words(message) {
        if POSITIVE_WORDS.contains(&word.as_str()) {
            positive += 1;
        }
        if NEGATIVE_WORDS.contains(&word.as_str()) {
            negative += 1;
        }
    }
    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Check a history signal over the last [`CONTEXT_WINDOW`] entries.
pub fn detect_context(history: &[String], signal: ContextSignal) -> bool {
    let start = history.len().saturating_sub(CONTEXT_WINDOW);
    let recent = history[start..].join(" ").to_lowercase();
    match signal {
        ContextSignal::RepeatedHostility => {
            let recent_words: Vec<String> = words(&recent).collect();
            HOSTILITY_TOKENS
                .iter()
                .filter(|token| recent_words.iter().any(|w| w.starts_with(*token)))
                .count()
                >= HOSTILITY_THRESHOLD
        }
        ContextSignal::BuildingTrust => TRUST_KEYWORDS.iter().any(|k| recent.contains(k)),
    }
}

/// A case-folded alternation that only matches `terms` as whole words.
fn whole_words_pattern(terms: &[String]) -> String {
    let alternatives: Vec<String> = terms.iter().map(|t| regex::escape(t)).collect();
    format!(r"\b(?:{})\b", alternatives.join("|"))
}

fn contains_any(message: &str, terms: &[String], case_sensitive: bool) -> bool {
    if case_sensitive {
        terms.iter().any(|t| message.contains(t.as_str()))
    } else {
        let message = message.to_lowercase();
        terms.iter().any(|t| message.contains(&t.to_lowercase()))
    }
}

/// Lowercased words; apostrophes stay inside words.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}
