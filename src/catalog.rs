//! Built-in catalogs, compiled into the binary.

pub const SPEECH_PATTERNS_RON: &str = include_str!("../persona_data/speech_patterns.ron");
pub const TRIGGERS_RON: &str = include_str!("../persona_data/triggers.ron");
