//! Speech pattern library: trait-gated phrase bundles and the matcher that
//! pools them per category.

use rustc_hash::FxHashSet;
use std::path::Path;
use thiserror::Error;

use crate::catalog;
use crate::schema::speech::{PhraseCategory, SpeechPattern};
use crate::schema::traits::{NumericTrait, TraitVector};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("pattern '{pattern}': requirement on {trait_name} has min > max")]
    InvertedBounds {
        pattern: String,
        trait_name: NumericTrait,
    },
    #[error("duplicate speech pattern id: {0}")]
    DuplicateId(String),
}

/// Returned for categories that have no fallback generator.
pub const PLACEHOLDER_PHRASE: &str = "...";

/// An immutable, ordered catalog of speech patterns.
#[derive(Debug, Clone, Default)]
pub struct SpeechLibrary {
    patterns: Vec<SpeechPattern>,
}

impl SpeechLibrary {
    /// Build a library, rejecting inverted bounds and duplicate ids.
    pub fn new(patterns: Vec<SpeechPattern>) -> Result<Self, CatalogError> {
        let mut seen = FxHashSet::default();
        for pattern in &patterns {
            if !seen.insert(pattern.id.as_str()) {
                return Err(CatalogError::DuplicateId(pattern.id.clone()));
            }
            for req in &pattern.requirements {
                if let (Some(min), Some(max)) = (req.min, req.max) {
                    if min > max {
                        return Err(CatalogError::InvertedBounds {
                            pattern: pattern.id.clone(),
                            trait_name: req.trait_name,
                        });
                    }
                }
            }
        }
        Ok(Self { patterns })
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse_ron(catalog::SPEECH_PATTERNS_RON)
    }

    /// Parse a RON list of speech patterns.
    pub fn parse_ron(input: &str) -> Result<Self, CatalogError> {
        let patterns: Vec<SpeechPattern> = ron::from_str(input)?;
        Self::new(patterns)
    }

    /// Load a RON list of speech patterns from a file.
    pub fn load_from_ron(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let library = Self::parse_ron(&contents)?;
        tracing::debug!(
            "loaded {} speech patterns from {}",
            library.patterns.len(),
            path.display()
        );
        Ok(library)
    }

    /// Merge `other` into this library. A pattern in `other` replaces the
    /// pattern with the same id in place; new ids are appended.
    pub fn merge(&mut self, other: SpeechLibrary) {
        for pattern in other.patterns {
            match self.patterns.iter_mut().find(|p| p.id == pattern.id) {
                Some(existing) => *existing = pattern,
                None => self.patterns.push(pattern),
            }
        }
    }

    pub fn patterns(&self) -> &[SpeechPattern] {
        &self.patterns
    }

    pub fn get(&self, id: &str) -> Option<&SpeechPattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    /// Every pattern whose requirements all hold, in catalog order.
    pub fn applicable_patterns(&self, traits: &TraitVector) -> Vec<&SpeechPattern> {
        self.patterns.iter().filter(|p| p.matches(traits)).collect()
    }

    /// Phrases for `category` across all applicable patterns, first-seen
    /// order with duplicates dropped. Never empty: falls back to a small
    /// trait-driven pool, or a placeholder for categories without one.
    pub fn contextual_speech(&self, traits: &TraitVector, category: PhraseCategory) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut pool = Vec::new();
        for pattern in self.applicable_patterns(traits) {
            for phrase in pattern.phrases.get(category) {
                if seen.insert(phrase.as_str()) {
                    pool.push(phrase.clone());
                }
            }
        }

        if pool.is_empty() {
            tracing::trace!("no pattern phrases for {}, using fallback", category.name());
            return fallback_phrases(traits, category);
        }
        pool
    }
}

/// Hand-written pools keyed on a few Big Five traits.
fn fallback_phrases(traits: &TraitVector, category: PhraseCategory) -> Vec<String> {
    let phrases: &[&str] = match category {
        PhraseCategory::Greetings => {
            if traits.extraversion >= 70.0 {
                &["Hey there! Great to see you!", "Oh hi! What's going on?"]
            } else if traits.extraversion <= 30.0 {
                &["Hi.", "Oh. Hello."]
            } else {
                &["Hello.", "Hey, how's it going?"]
            }
        }
        PhraseCategory::Agreements => {
            if traits.agreeableness >= 70.0 {
                &["Absolutely, you're right.", "I couldn't agree more."]
            } else if traits.agreeableness <= 30.0 {
                &["Fine. Whatever.", "I guess."]
            } else {
                &["Sure.", "Makes sense."]
            }
        }
        PhraseCategory::Disagreements => {
            if traits.agreeableness >= 70.0 {
                &[
                    "I see it a little differently, if that's okay.",
                    "Hmm, I'm not sure I agree, but I get it.",
                ]
            } else if traits.agreeableness <= 30.0 {
                &["No. You're wrong.", "That's ridiculous."]
            } else {
                &["I'm not sure about that.", "I don't think so."]
            }
        }
        PhraseCategory::Questions => {
            if traits.openness >= 70.0 {
                &["What if we looked at it another way?", "Have you ever wondered why?"]
            } else {
                &["What do you mean?", "Why's that?"]
            }
        }
        PhraseCategory::Exclamations => {
            if traits.neuroticism >= 70.0 {
                &["Oh no!", "This is bad!"]
            } else if traits.extraversion >= 70.0 {
                &["Wow!", "No way!"]
            } else {
                &["Huh.", "Really?"]
            }
        }
        PhraseCategory::Compliments => {
            if traits.agreeableness >= 50.0 {
                &["That's really good.", "Nicely done."]
            } else {
                &["Not bad."]
            }
        }
        PhraseCategory::Transitions | PhraseCategory::Fillers | PhraseCategory::Insults => {
            &[PLACEHOLDER_PHRASE]
        }
    };
    phrases.iter().map(|s| s.to_string()).collect()
}
