use serde::{Deserialize, Serialize};

/// Informational tag describing what a trigger reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Keyword,
    Pattern,
    Sentiment,
    Context,
    Trauma,
}

/// Coarse message polarity from the fixed lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// History-derived signals a context condition can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSignal {
    RepeatedHostility,
    BuildingTrust,
}

/// One clause of a trigger. All clauses of a trigger must hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Any of `terms` occurs in the message as a substring.
    Contains {
        terms: Vec<String>,
        #[serde(default)]
        case_sensitive: bool,
    },
    /// `pattern` matches the message.
    Matches {
        pattern: String,
        #[serde(default)]
        case_sensitive: bool,
    },
    Sentiment(Sentiment),
    Context(ContextSignal),
}

/// Extra character-relevance check applied after the conditions pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    /// The character's background, trauma or fear text mentions any term.
    BackgroundMentions(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Duration {
    Instant,
    Conversation,
    Permanent,
}

/// A percentage change to one trait. `modifier` is in `[-100, 100]`.
///
/// `trait_name` is a field name of [`TraitVector`](super::traits::TraitVector);
/// names that are not numeric traits are ignored when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub trait_name: String,
    pub modifier: f32,
    pub duration: Duration,
}

impl Effect {
    pub fn new(trait_name: impl Into<String>, modifier: f32, duration: Duration) -> Self {
        Self {
            trait_name: trait_name.into(),
            modifier,
            duration,
        }
    }
}

/// A context-sensitive rule that perturbs traits during conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityTrigger {
    pub id: String,
    pub name: String,
    pub trigger_type: TriggerType,
    pub conditions: Vec<Condition>,
    pub effects: Vec<Effect>,
    pub priority: i32,
    #[serde(default)]
    pub gate: Option<Gate>,
}

/// Per-evaluation input: the live message plus prior messages, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerContext {
    pub message: String,
    pub history: Vec<String>,
    pub mood: Option<String>,
    pub relationship_level: Option<f32>,
}

impl TriggerContext {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_history<I, S>(mut self, history: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.history = history.into_iter().map(Into::into).collect();
        self
    }
}

/// Character text consulted by trigger gates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Background<'a> {
    pub text: &'a str,
    pub formative_trauma: Option<&'a str>,
    pub core_fear: Option<&'a str>,
}

impl<'a> Background<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            formative_trauma: None,
            core_fear: None,
        }
    }

    /// Background text plus the trauma and fear fields of `traits`.
    pub fn for_character(text: &'a str, traits: &'a super::traits::TraitVector) -> Self {
        Self {
            text,
            formative_trauma: traits.formative_trauma.as_deref(),
            core_fear: traits.core_fear.as_deref(),
        }
    }

    /// Every non-empty text field, background first.
    pub fn texts(&self) -> impl Iterator<Item = &'a str> {
        [Some(self.text), self.formative_trauma, self.core_fear]
            .into_iter()
            .flatten()
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::traits::TraitVector;

    #[test]
    fn background_texts_cover_all_fields() {
        let traits = TraitVector {
            formative_trauma: Some("Watched the orphanage burn".to_string()),
            ..TraitVector::default()
        };
        let bg = Background::for_character("A quiet sailor", &traits);
        let texts: Vec<&str> = bg.texts().collect();
        assert_eq!(texts, vec!["A quiet sailor", "Watched the orphanage burn"]);
        assert_eq!(Background::default().texts().count(), 0);
    }

    #[test]
    fn condition_ron_shape() {
        let parsed: Vec<Condition> = ron::from_str(
            r#"[
                contains(terms: ["hello"]),
                matches(pattern: "^hi", case_sensitive: true),
                sentiment(negative),
                context(building_trust),
            ]"#,
        )
        .unwrap();
        assert_eq!(
            parsed[0],
            Condition::Contains {
                terms: vec!["hello".to_string()],
                case_sensitive: false,
            }
        );
        assert!(matches!(parsed[1], Condition::Matches { case_sensitive: true, .. }));
        assert_eq!(parsed[2], Condition::Sentiment(Sentiment::Negative));
        assert_eq!(parsed[3], Condition::Context(ContextSignal::BuildingTrust));
    }

    #[test]
    fn context_builder_collects_history() {
        let ctx = TriggerContext::new("hi").with_history(["one", "two"]);
        assert_eq!(ctx.message, "hi");
        assert_eq!(ctx.history, vec!["one".to_string(), "two".to_string()]);
    }
}
