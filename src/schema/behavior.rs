use serde::{Deserialize, Serialize};

use super::traits::NumericTrait;

/// Which optional passes the behavior deriver runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Threshold rules and categorical lookups only.
    #[default]
    Lite,
    /// Adds trait interactions and the flavor-field pass.
    Full,
}

/// A structured adjustment to how responses are shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseModifier {
    pub trait_name: String,
    pub effect: String,
    pub intensity: f32,
}

/// An emergent behavior produced by a joint configuration of traits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitInteraction {
    pub traits: Vec<NumericTrait>,
    pub resulting_behavior: String,
    pub condition: Option<String>,
}

/// The behavior categories rule text lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorCategory {
    SpeechPatterns,
    EmotionalResponses,
    ConversationStyle,
    BehavioralQuirks,
}

/// Natural-language description of how a personality shows up in dialogue.
/// Recomputed from scratch on every request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BehaviorSet {
    pub speech_patterns: Vec<String>,
    pub emotional_responses: Vec<String>,
    pub conversation_style: Vec<String>,
    pub behavioral_quirks: Vec<String>,
    pub response_modifiers: Vec<ResponseModifier>,
    pub trait_interactions: Vec<TraitInteraction>,
}

impl BehaviorSet {
    pub fn push(&mut self, category: BehaviorCategory, text: impl Into<String>) {
        let list = match category {
            BehaviorCategory::SpeechPatterns => &mut self.speech_patterns,
            BehaviorCategory::EmotionalResponses => &mut self.emotional_responses,
            BehaviorCategory::ConversationStyle => &mut self.conversation_style,
            BehaviorCategory::BehavioralQuirks => &mut self.behavioral_quirks,
        };
        list.push(text.into());
    }

    pub fn category(&self, category: BehaviorCategory) -> &[String] {
        match category {
            BehaviorCategory::SpeechPatterns => &self.speech_patterns,
            BehaviorCategory::EmotionalResponses => &self.emotional_responses,
            BehaviorCategory::ConversationStyle => &self.conversation_style,
            BehaviorCategory::BehavioralQuirks => &self.behavioral_quirks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.speech_patterns.is_empty()
            && self.emotional_responses.is_empty()
            && self.conversation_style.is_empty()
            && self.behavioral_quirks.is_empty()
            && self.response_modifiers.is_empty()
            && self.trait_interactions.is_empty()
    }

    /// Render as a plain-text block for a system prompt. Empty sections are
    /// left out.
    pub fn to_prompt_section(&self) -> String {
        let mut out = String::new();
        let sections = [
            ("Speech patterns", &self.speech_patterns),
            ("Emotional responses", &self.emotional_responses),
            ("Conversation style", &self.conversation_style),
            ("Behavioral quirks", &self.behavioral_quirks),
        ];
        for (title, lines) in sections {
            if lines.is_empty() {
                continue;
            }
            out.push_str(title);
            out.push_str(":\n");
            for line in lines {
                out.push_str("- ");
                out.push_str(line);
                out.push('\n');
            }
        }

        if !self.response_modifiers.is_empty() {
            out.push_str("Response modifiers:\n");
            for m in &self.response_modifiers {
                out.push_str(&format!(
                    "- {} ({}, intensity {:.2})\n",
                    m.effect, m.trait_name, m.intensity
                ));
            }
        }

        if !self.trait_interactions.is_empty() {
            out.push_str("Trait interactions:\n");
            for i in &self.trait_interactions {
                out.push_str("- ");
                out.push_str(&i.resulting_behavior);
                if let Some(ref condition) = i.condition {
                    out.push_str(&format!(" [{}]", condition));
                }
                out.push('\n');
            }
        }

        out
    }
}
