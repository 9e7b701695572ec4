//! The engine facade: built-in and custom catalogs behind one handle.
//!
//! A built engine is immutable and can be shared across threads; anything
//! stateful lives in a [`PersonaSession`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::{ConfigError, EngineConfig};
use crate::core::behavior::derive_behaviors;
use crate::core::openings::varied_openings;
use crate::core::session::PersonaSession;
use crate::core::speech::{CatalogError, SpeechLibrary, PLACEHOLDER_PHRASE};
use crate::core::trigger::{evaluate_triggers, TriggerCatalog, TriggerError};
use crate::schema::behavior::{BehaviorSet, Mode};
use crate::schema::speech::{PhraseCategory, SpeechPattern};
use crate::schema::traits::TraitVector;
use crate::schema::trigger::{Background, Effect, TriggerContext};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("speech catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("trigger catalog error: {0}")]
    Trigger(#[from] TriggerError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Top-level engine. Built via `PersonalityEngine::builder()`.
#[derive(Debug, Clone)]
pub struct PersonalityEngine {
    speech: SpeechLibrary,
    triggers: TriggerCatalog,
    config: EngineConfig,
}

/// Builder for constructing a `PersonalityEngine`.
pub struct PersonalityEngineBuilder {
    config: EngineConfig,
    /// Directly provided patterns (for testing without files).
    speech: Option<SpeechLibrary>,
    /// Directly provided triggers (for testing without files).
    triggers: Option<TriggerCatalog>,
}

impl PersonalityEngine {
    pub fn builder() -> PersonalityEngineBuilder {
        PersonalityEngineBuilder {
            config: EngineConfig::default(),
            speech: None,
            triggers: None,
        }
    }

    /// Derive the behavior description for `traits`.
    pub fn describe(&self, traits: &TraitVector, mode: Mode) -> BehaviorSet {
        derive_behaviors(traits, mode)
    }

    pub fn applicable_patterns(&self, traits: &TraitVector) -> Vec<&SpeechPattern> {
        self.speech.applicable_patterns(traits)
    }

    pub fn contextual_speech(&self, traits: &TraitVector, category: PhraseCategory) -> Vec<String> {
        self.speech.contextual_speech(traits, category)
    }

    pub fn openings(&self, traits: &TraitVector) -> Vec<String> {
        varied_openings(traits)
    }

    /// Sample one phrase from the category pool.
    pub fn pick_phrase(&self, traits: &TraitVector, category: PhraseCategory, rng: &mut StdRng) -> String {
        let pool = self.contextual_speech(traits, category);
        pool.choose(rng)
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_PHRASE.to_string())
    }

    /// Sample one opening line.
    pub fn pick_opening(&self, traits: &TraitVector, rng: &mut StdRng) -> String {
        let pool = self.openings(traits);
        pool.choose(rng)
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_PHRASE.to_string())
    }

    /// Effects from the engine's trigger catalog for one message.
    pub fn evaluate(&self, context: &TriggerContext, background: &Background<'_>) -> Vec<Effect> {
        evaluate_triggers(&self.triggers, context, background)
    }

    /// Start a conversation. The session works on its own copy of `traits`.
    pub fn session(
        &self,
        traits: TraitVector,
        background: impl Into<String>,
    ) -> Result<PersonaSession<'_>, EngineError> {
        Ok(PersonaSession::new(self, traits, background.into())?)
    }

    pub fn speech_library(&self) -> &SpeechLibrary {
        &self.speech
    }

    pub fn trigger_catalog(&self) -> &TriggerCatalog {
        &self.triggers
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl PersonalityEngineBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn default_mode(mut self, mode: Mode) -> Self {
        self.config.default_mode = mode;
        self
    }

    pub fn history_window(mut self, window: usize) -> Self {
        self.config.history_window = window;
        self
    }

    /// Skip the built-in catalogs.
    pub fn without_builtin(mut self) -> Self {
        self.config.include_builtin = false;
        self
    }

    pub fn speech_patterns_file(mut self, path: &str) -> Self {
        self.config.speech_patterns.push(PathBuf::from(path));
        self
    }

    pub fn triggers_file(mut self, path: &str) -> Self {
        self.config.triggers.push(PathBuf::from(path));
        self
    }

    /// Provide speech patterns directly; merged last.
    pub fn with_speech_library(mut self, library: SpeechLibrary) -> Self {
        self.speech = Some(library);
        self
    }

    /// Provide triggers directly; merged last.
    pub fn with_triggers(mut self, triggers: TriggerCatalog) -> Self {
        self.triggers = Some(triggers);
        self
    }

    /// Build the engine. Catalogs are assembled as built-in (unless
    /// disabled), then configured files in order, then directly provided
    /// catalogs; later entries replace earlier ones with the same id.
    pub fn build(self) -> Result<PersonalityEngine, EngineError> {
        let mut speech = if self.config.include_builtin {
            SpeechLibrary::builtin()?
        } else {
            SpeechLibrary::default()
        };
        for path in &self.config.speech_patterns {
            speech.merge(SpeechLibrary::load_from_ron(path)?);
        }
        if let Some(library) = self.speech {
            speech.merge(library);
        }

        let mut triggers = if self.config.include_builtin {
            TriggerCatalog::builtin()?
        } else {
            TriggerCatalog::default()
        };
        for path in &self.config.triggers {
            triggers.merge(TriggerCatalog::load_from_ron(path)?);
        }
        if let Some(catalog) = self.triggers {
            triggers.merge(catalog);
        }

        tracing::info!(
            "personality engine ready: {} speech patterns, {} triggers",
            speech.patterns().len(),
            triggers.len()
        );

        Ok(PersonalityEngine {
            speech,
            triggers,
            config: self.config,
        })
    }
}
