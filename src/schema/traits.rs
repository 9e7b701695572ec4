use serde::{Deserialize, Serialize};

/// The full personality configuration of a character.
///
/// The Big Five are always present; every other attribute is optional and
/// rules that read an absent attribute simply do not fire. Numeric values are
/// expected in `[0, 100]`, but nothing here enforces it: only
/// [`apply_effects`](crate::core::effects::apply_effects) clamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitVector {
    // Big Five
    pub openness: f32,
    pub conscientiousness: f32,
    pub extraversion: f32,
    pub agreeableness: f32,
    pub neuroticism: f32,

    // Extended
    #[serde(default)]
    pub sarcasm_level: Option<f32>,
    #[serde(default)]
    pub wit_humor: Option<f32>,
    #[serde(default)]
    pub empathy: Option<f32>,
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub impulsiveness: Option<f32>,

    // Communication
    #[serde(default)]
    pub formality_level: Option<f32>,
    #[serde(default)]
    pub verbosity: Option<f32>,
    #[serde(default)]
    pub directness: Option<f32>,
    #[serde(default)]
    pub profanity_usage: Option<f32>,
    #[serde(default)]
    pub primary_language_style: Option<LanguageStyle>,
    #[serde(default)]
    pub education_level: Option<EducationLevel>,

    // Psychological
    #[serde(default)]
    pub emotional_volatility: Option<f32>,
    #[serde(default)]
    pub trust_level: Option<f32>,
    #[serde(default)]
    pub optimism: Option<f32>,
    #[serde(default)]
    pub stress_response: Option<f32>,
    #[serde(default)]
    pub core_fear: Option<String>,
    #[serde(default)]
    pub greatest_desire: Option<String>,

    // Relational
    #[serde(default)]
    pub dominance: Option<f32>,
    #[serde(default)]
    pub social_energy: Option<f32>,
    #[serde(default)]
    pub loyalty: Option<f32>,
    #[serde(default)]
    pub conflict_style: Option<ConflictStyle>,

    // Flavor
    #[serde(default)]
    pub signature_phrase: Option<String>,
    #[serde(default)]
    pub speaking_tic: Option<String>,
    #[serde(default)]
    pub formative_trauma: Option<String>,
    #[serde(default)]
    pub quirks: Quirks,
    #[serde(default)]
    pub response_length_preference: Option<ResponseLength>,
    #[serde(default)]
    pub emotion_intensity: Option<f32>,
}

impl Default for TraitVector {
    /// A balanced personality: Big Five at the midpoint, nothing else set.
    fn default() -> Self {
        Self {
            openness: 50.0,
            conscientiousness: 50.0,
            extraversion: 50.0,
            agreeableness: 50.0,
            neuroticism: 50.0,
            sarcasm_level: None,
            wit_humor: None,
            empathy: None,
            confidence: None,
            impulsiveness: None,
            formality_level: None,
            verbosity: None,
            directness: None,
            profanity_usage: None,
            primary_language_style: None,
            education_level: None,
            emotional_volatility: None,
            trust_level: None,
            optimism: None,
            stress_response: None,
            core_fear: None,
            greatest_desire: None,
            dominance: None,
            social_energy: None,
            loyalty: None,
            conflict_style: None,
            signature_phrase: None,
            speaking_tic: None,
            formative_trauma: None,
            quirks: Quirks::default(),
            response_length_preference: None,
            emotion_intensity: None,
        }
    }
}

impl TraitVector {
    /// Read a numeric trait. `None` when the attribute is not configured.
    pub fn get(&self, key: NumericTrait) -> Option<f32> {
        match key {
            NumericTrait::Openness => Some(self.openness),
            NumericTrait::Conscientiousness => Some(self.conscientiousness),
            NumericTrait::Extraversion => Some(self.extraversion),
            NumericTrait::Agreeableness => Some(self.agreeableness),
            NumericTrait::Neuroticism => Some(self.neuroticism),
            NumericTrait::SarcasmLevel => self.sarcasm_level,
            NumericTrait::WitHumor => self.wit_humor,
            NumericTrait::Empathy => self.empathy,
            NumericTrait::Confidence => self.confidence,
            NumericTrait::Impulsiveness => self.impulsiveness,
            NumericTrait::FormalityLevel => self.formality_level,
            NumericTrait::Verbosity => self.verbosity,
            NumericTrait::Directness => self.directness,
            NumericTrait::ProfanityUsage => self.profanity_usage,
            NumericTrait::EmotionalVolatility => self.emotional_volatility,
            NumericTrait::TrustLevel => self.trust_level,
            NumericTrait::Optimism => self.optimism,
            NumericTrait::StressResponse => self.stress_response,
            NumericTrait::Dominance => self.dominance,
            NumericTrait::SocialEnergy => self.social_energy,
            NumericTrait::Loyalty => self.loyalty,
            NumericTrait::EmotionIntensity => self.emotion_intensity,
        }
    }

    /// Mutable access to a configured numeric trait.
    pub(crate) fn slot_mut(&mut self, key: NumericTrait) -> Option<&mut f32> {
        match key {
            NumericTrait::Openness => Some(&mut self.openness),
            NumericTrait::Conscientiousness => Some(&mut self.conscientiousness),
            NumericTrait::Extraversion => Some(&mut self.extraversion),
            NumericTrait::Agreeableness => Some(&mut self.agreeableness),
            NumericTrait::Neuroticism => Some(&mut self.neuroticism),
            NumericTrait::SarcasmLevel => self.sarcasm_level.as_mut(),
            NumericTrait::WitHumor => self.wit_humor.as_mut(),
            NumericTrait::Empathy => self.empathy.as_mut(),
            NumericTrait::Confidence => self.confidence.as_mut(),
            NumericTrait::Impulsiveness => self.impulsiveness.as_mut(),
            NumericTrait::FormalityLevel => self.formality_level.as_mut(),
            NumericTrait::Verbosity => self.verbosity.as_mut(),
            NumericTrait::Directness => self.directness.as_mut(),
            NumericTrait::ProfanityUsage => self.profanity_usage.as_mut(),
            NumericTrait::EmotionalVolatility => self.emotional_volatility.as_mut(),
            NumericTrait::TrustLevel => self.trust_level.as_mut(),
            NumericTrait::Optimism => self.optimism.as_mut(),
            NumericTrait::StressResponse => self.stress_response.as_mut(),
            NumericTrait::Dominance => self.dominance.as_mut(),
            NumericTrait::SocialEnergy => self.social_energy.as_mut(),
            NumericTrait::Loyalty => self.loyalty.as_mut(),
            NumericTrait::EmotionIntensity => self.emotion_intensity.as_mut(),
        }
    }

    /// Returns true if the value is configured and strictly above `threshold`.
    pub fn above(&self, key: NumericTrait, threshold: f32) -> bool {
        self.get(key).is_some_and(|v| v > threshold)
    }

    /// Returns true if the value is configured and strictly below `threshold`.
    pub fn below(&self, key: NumericTrait, threshold: f32) -> bool {
        self.get(key).is_some_and(|v| v < threshold)
    }

    /// Load a trait vector from a RON file.
    pub fn load_from_ron(path: &std::path::Path) -> Result<TraitVector, TraitVectorError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TraitVectorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Every numeric attribute of a [`TraitVector`].
///
/// Names are the snake_case field names; free-text and categorical fields
/// have no key, so effects naming them are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericTrait {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
    SarcasmLevel,
    WitHumor,
    Empathy,
    Confidence,
    Impulsiveness,
    FormalityLevel,
    Verbosity,
    Directness,
    ProfanityUsage,
    EmotionalVolatility,
    TrustLevel,
    Optimism,
    StressResponse,
    Dominance,
    SocialEnergy,
    Loyalty,
    EmotionIntensity,
}

impl NumericTrait {
    pub const ALL: [NumericTrait; 22] = [
        Self::Openness,
        Self::Conscientiousness,
        Self::Extraversion,
        Self::Agreeableness,
        Self::Neuroticism,
        Self::SarcasmLevel,
        Self::WitHumor,
        Self::Empathy,
        Self::Confidence,
        Self::Impulsiveness,
        Self::FormalityLevel,
        Self::Verbosity,
        Self::Directness,
        Self::ProfanityUsage,
        Self::EmotionalVolatility,
        Self::TrustLevel,
        Self::Optimism,
        Self::StressResponse,
        Self::Dominance,
        Self::SocialEnergy,
        Self::Loyalty,
        Self::EmotionIntensity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Openness => "openness",
            Self::Conscientiousness => "conscientiousness",
            Self::Extraversion => "extraversion",
            Self::Agreeableness => "agreeableness",
            Self::Neuroticism => "neuroticism",
            Self::SarcasmLevel => "sarcasm_level",
            Self::WitHumor => "wit_humor",
            Self::Empathy => "empathy",
            Self::Confidence => "confidence",
            Self::Impulsiveness => "impulsiveness",
            Self::FormalityLevel => "formality_level",
            Self::Verbosity => "verbosity",
            Self::Directness => "directness",
            Self::ProfanityUsage => "profanity_usage",
            Self::EmotionalVolatility => "emotional_volatility",
            Self::TrustLevel => "trust_level",
            Self::Optimism => "optimism",
            Self::StressResponse => "stress_response",
            Self::Dominance => "dominance",
            Self::SocialEnergy => "social_energy",
            Self::Loyalty => "loyalty",
            Self::EmotionIntensity => "emotion_intensity",
        }
    }

    /// Look up a key by field name. Non-numeric or unknown names give `None`.
    pub fn from_name(name: &str) -> Option<NumericTrait> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

impl std::fmt::Display for NumericTrait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageStyle {
    Formal,
    Casual,
    Slang,
    Poetic,
    Technical,
    Archaic,
}

impl LanguageStyle {
    /// Phrase fragment describing how this style sounds.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Formal => "Speaks in complete, carefully constructed sentences",
            Self::Casual => "Talks in a relaxed, conversational register",
            Self::Slang => "Leans on slang and street vocabulary",
            Self::Poetic => "Reaches for imagery and lyrical turns of phrase",
            Self::Technical => "Favors precise technical terminology",
            Self::Archaic => "Uses old-fashioned words and antiquated phrasing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Minimal,
    HighSchool,
    College,
    Graduate,
    Doctorate,
    SelfTaught,
}

impl EducationLevel {
    /// Conversation-style fragment for this education level.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Minimal => "Explains things through everyday experience rather than theory",
            Self::HighSchool => "Sticks to common knowledge and practical examples",
            Self::College => "Comfortable with abstract ideas and references to reading",
            Self::Graduate => "Frames arguments carefully and cites specifics",
            Self::Doctorate => "Discusses ideas with academic depth and nuance",
            Self::SelfTaught => "Knowledge is deep in odd places and patchy elsewhere",
        }
    }

    /// Vocabulary note used by the advanced pass.
    pub fn vocabulary(&self) -> &'static str {
        match self {
            Self::Minimal => "Uses short, plain words",
            Self::HighSchool => "Uses everyday vocabulary",
            Self::College => "Uses a broad, educated vocabulary",
            Self::Graduate => "Uses specialized vocabulary without explaining it",
            Self::Doctorate => "Uses dense, jargon-heavy vocabulary",
            Self::SelfTaught => "Mixes rare words with occasional mispronunciations",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStyle {
    Avoidant,
    Accommodating,
    Competitive,
    Collaborative,
    Compromising,
    PassiveAggressive,
}

impl ConflictStyle {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Avoidant => "Changes the subject or goes quiet when conflict appears",
            Self::Accommodating => "Gives ground quickly to keep the peace",
            Self::Competitive => "Treats disagreements as contests to be won",
            Self::Collaborative => "Looks for a solution that works for everyone",
            Self::Compromising => "Proposes middle ground and splits the difference",
            Self::PassiveAggressive => "Agrees on the surface while needling underneath",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseLength {
    Terse,
    Brief,
    Moderate,
    Detailed,
    Verbose,
}

impl ResponseLength {
    /// (effect text, intensity) for the response-length modifier.
    pub fn modifier(&self) -> (&'static str, f32) {
        match self {
            Self::Terse => ("Replies in a handful of words", 0.2),
            Self::Brief => ("Keeps replies to a sentence or two", 0.4),
            Self::Moderate => ("Replies in a short paragraph", 0.6),
            Self::Detailed => ("Gives thorough, multi-paragraph replies", 0.8),
            Self::Verbose => ("Rambles at length given any opening", 1.0),
        }
    }
}

/// Boolean speech quirks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quirks {
    #[serde(default)]
    pub makes_puns: bool,
    #[serde(default)]
    pub uses_metaphors: bool,
    #[serde(default)]
    pub references_pop_culture: bool,
    #[serde(default)]
    pub speaks_in_third_person: bool,
    #[serde(default)]
    pub asks_rhetorical_questions: bool,
    #[serde(default)]
    pub trails_off: bool,
}

impl Quirks {
    /// Descriptions of every enabled quirk, in declaration order.
    pub fn descriptions(&self) -> Vec<&'static str> {
        [
            (self.makes_puns, "Cannot resist a pun, even a bad one"),
            (self.uses_metaphors, "Explains things through extended metaphors"),
            (
                self.references_pop_culture,
                "Drops pop-culture references into conversation",
            ),
            (self.speaks_in_third_person, "Refers to themselves in the third person"),
            (
                self.asks_rhetorical_questions,
                "Asks rhetorical questions and answers them",
            ),
            (self.trails_off, "Lets sentences trail off with an ellipsis..."),
        ]
        .into_iter()
        .filter_map(|(enabled, text)| enabled.then_some(text))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_trait_names_round_trip() {
        for key in NumericTrait::ALL {
            assert_eq!(NumericTrait::from_name(key.name()), Some(key));
        }
    }

    #[test]
    fn non_numeric_names_have_no_key() {
        assert_eq!(NumericTrait::from_name("core_fear"), None);
        assert_eq!(NumericTrait::from_name("primary_language_style"), None);
        assert_eq!(NumericTrait::from_name("Agreeableness"), None);
    }

    #[test]
    fn get_reads_optional_fields() {
        let v = TraitVector {
            sarcasm_level: Some(85.0),
            ..TraitVector::default()
        };
        assert_eq!(v.get(NumericTrait::SarcasmLevel), Some(85.0));
        assert_eq!(v.get(NumericTrait::Empathy), None);
        assert_eq!(v.get(NumericTrait::Openness), Some(50.0));
    }

    #[test]
    fn above_and_below_ignore_absent_values() {
        let v = TraitVector::default();
        assert!(!v.above(NumericTrait::Impulsiveness, 70.0));
        assert!(!v.below(NumericTrait::Impulsiveness, 70.0));
        assert!(v.below(NumericTrait::Openness, 51.0));
        assert!(!v.above(NumericTrait::Openness, 50.0));
    }

    #[test]
    fn quirk_descriptions_follow_flags() {
        let quirks = Quirks {
            makes_puns: true,
            trails_off: true,
            ..Quirks::default()
        };
        let d = quirks.descriptions();
        assert_eq!(d.len(), 2);
        assert!(d[0].contains("pun"));
        assert!(d[1].contains("trail off"));
    }

    #[test]
    fn ron_round_trip() {
        let v = TraitVector {
            sarcasm_level: Some(85.0),
            primary_language_style: Some(LanguageStyle::Slang),
            core_fear: Some("being abandoned".to_string()),
            quirks: Quirks {
                makes_puns: true,
                ..Quirks::default()
            },
            ..TraitVector::default()
        };
        let serialized = ron::to_string(&v).unwrap();
        let deserialized: TraitVector = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized, v);
    }

    #[test]
    fn load_fixture_from_ron() {
        let path = std::path::PathBuf::from("tests/fixtures/sardonic_bartender.ron");
        let v = TraitVector::load_from_ron(&path).unwrap();
        assert_eq!(v.sarcasm_level, Some(85.0));
        assert_eq!(v.primary_language_style, Some(LanguageStyle::Casual));
        assert!(v.quirks.makes_puns);
    }
}
