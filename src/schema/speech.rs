use serde::{Deserialize, Serialize};

use super::traits::{NumericTrait, TraitVector};

/// The phrase categories a pattern can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseCategory {
    Greetings,
    Agreements,
    Disagreements,
    Questions,
    Exclamations,
    Transitions,
    Fillers,
    Insults,
    Compliments,
}

impl PhraseCategory {
    pub const ALL: [PhraseCategory; 9] = [
        Self::Greetings,
        Self::Agreements,
        Self::Disagreements,
        Self::Questions,
        Self::Exclamations,
        Self::Transitions,
        Self::Fillers,
        Self::Insults,
        Self::Compliments,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Greetings => "greetings",
            Self::Agreements => "agreements",
            Self::Disagreements => "disagreements",
            Self::Questions => "questions",
            Self::Exclamations => "exclamations",
            Self::Transitions => "transitions",
            Self::Fillers => "fillers",
            Self::Insults => "insults",
            Self::Compliments => "compliments",
        }
    }
}

/// A single trait bound. Both ends are inclusive; a missing end is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub trait_name: NumericTrait,
    #[serde(default)]
    pub min: Option<f32>,
    #[serde(default)]
    pub max: Option<f32>,
}

impl Requirement {
    /// An unconfigured trait only satisfies a requirement with no bounds.
    pub fn is_satisfied_by(&self, vector: &TraitVector) -> bool {
        let Some(value) = vector.get(self.trait_name) else {
            return self.min.is_none() && self.max.is_none();
        };
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Example phrases grouped by category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhraseBank {
    #[serde(default)]
    pub greetings: Vec<String>,
    #[serde(default)]
    pub agreements: Vec<String>,
    #[serde(default)]
    pub disagreements: Vec<String>,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub exclamations: Vec<String>,
    #[serde(default)]
    pub transitions: Vec<String>,
    #[serde(default)]
    pub fillers: Vec<String>,
    #[serde(default)]
    pub insults: Option<Vec<String>>,
    #[serde(default)]
    pub compliments: Option<Vec<String>>,
}

impl PhraseBank {
    pub fn get(&self, category: PhraseCategory) -> &[String] {
        match category {
            PhraseCategory::Greetings => &self.greetings,
            PhraseCategory::Agreements => &self.agreements,
            PhraseCategory::Disagreements => &self.disagreements,
            PhraseCategory::Questions => &self.questions,
            PhraseCategory::Exclamations => &self.exclamations,
            PhraseCategory::Transitions => &self.transitions,
            PhraseCategory::Fillers => &self.fillers,
            PhraseCategory::Insults => self.insults.as_deref().unwrap_or(&[]),
            PhraseCategory::Compliments => self.compliments.as_deref().unwrap_or(&[]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechExample {
    pub situation: String,
    pub response: String,
}

/// A named, trait-gated bundle of phrases for a personality archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechPattern {
    pub id: String,
    pub name: String,
    pub requirements: Vec<Requirement>,
    pub phrases: PhraseBank,
    #[serde(default)]
    pub examples: Vec<SpeechExample>,
}

impl SpeechPattern {
    /// All requirements must hold.
    pub fn matches(&self, vector: &TraitVector) -> bool {
        self.requirements.iter().all(|r| r.is_satisfied_by(vector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirement(min: Option<f32>, max: Option<f32>) -> Requirement {
        Requirement {
            trait_name: NumericTrait::SarcasmLevel,
            min,
            max,
        }
    }

    fn with_sarcasm(value: f32) -> TraitVector {
        TraitVector {
            sarcasm_level: Some(value),
            ..TraitVector::default()
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let r = requirement(Some(70.0), Some(90.0));
        assert!(r.is_satisfied_by(&with_sarcasm(70.0)));
        assert!(r.is_satisfied_by(&with_sarcasm(90.0)));
        assert!(!r.is_satisfied_by(&with_sarcasm(69.9)));
        assert!(!r.is_satisfied_by(&with_sarcasm(90.1)));
    }

    #[test]
    fn open_bounds_are_unconstrained() {
        assert!(requirement(None, Some(10.0)).is_satisfied_by(&with_sarcasm(0.0)));
        assert!(requirement(Some(10.0), None).is_satisfied_by(&with_sarcasm(100.0)));
    }

    #[test]
    fn absent_trait_fails_bounded_requirement() {
        let v = TraitVector::default();
        assert!(!requirement(Some(0.0), None).is_satisfied_by(&v));
        assert!(requirement(None, None).is_satisfied_by(&v));
    }

    #[test]
    fn optional_categories_read_as_empty() {
        let bank = PhraseBank {
            greetings: vec!["Hey.".to_string()],
            ..PhraseBank::default()
        };
        assert_eq!(bank.get(PhraseCategory::Greetings), ["Hey."]);
        assert!(bank.get(PhraseCategory::Insults).is_empty());
        assert!(bank.get(PhraseCategory::Compliments).is_empty());
    }
}
