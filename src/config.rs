//! API key presence and model defaults.
//!
//! Secrets come from an external store (the process environment in
//! production). Only their presence is kept; values are never stored,
//! embedded in the binary, or logged.

use crate::error::AppError;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretKey {
    OpenAi,
    Google,
    ElevenLabs,
    SerpApi,
}

impl SecretKey {
    pub const ALL: [SecretKey; 4] = [
        SecretKey::OpenAi,
        SecretKey::Google,
        SecretKey::ElevenLabs,
        SecretKey::SerpApi,
    ];

    /// Keys whose absence degrades the AI status indicator.
    pub const REQUIRED: [SecretKey; 1] = [SecretKey::OpenAi];

    pub fn env_name(self) -> &'static str {
        match self {
            SecretKey::OpenAi => "OPENAI_API_KEY",
            SecretKey::Google => "GOOGLE_API_KEY",
            SecretKey::ElevenLabs => "ELEVENLABS_API_KEY",
            SecretKey::SerpApi => "SERPAPI_KEY",
        }
    }
}

pub trait SecretStore {
    fn lookup(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretStore;

impl SecretStore for EnvSecretStore {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl SecretStore for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiStatus {
    Enabled,
    Degraded { missing: Vec<&'static str> },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    present: HashSet<SecretKey>,
    pub model: ModelSettings,
}

impl BotConfig {
    pub fn load(store: &impl SecretStore) -> Self {
        let present: HashSet<SecretKey> = SecretKey::ALL
            .into_iter()
            .filter(|key| {
                store
                    .lookup(key.env_name())
                    .is_some_and(|value| !value.trim().is_empty())
            })
            .collect();

        info!(
            "Loaded configuration: {}/{} API keys present",
            present.len(),
            SecretKey::ALL.len()
        );

        let config = Self {
            present,
            model: ModelSettings::default(),
        };
        if !config.validate_keys() {
            warn!(
                "Missing API keys: {}; AI features disabled",
                config.missing_required().join(", ")
            );
        }
        config
    }

    pub fn from_env() -> Self {
        Self::load(&EnvSecretStore)
    }

    pub fn require(&self, key: SecretKey) -> Result<(), AppError> {
        if self.present.contains(&key) {
            Ok(())
        } else {
            Err(AppError::ConfigMissing(key.env_name().to_string()))
        }
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        SecretKey::REQUIRED
            .into_iter()
            .filter(|key| self.require(*key).is_err())
            .map(SecretKey::env_name)
            .collect()
    }

    pub fn validate_keys(&self) -> bool {
        self.missing_required().is_empty()
    }

    pub fn ai_status(&self) -> AiStatus {
        match self.require(SecretKey::OpenAi) {
            Ok(()) => AiStatus::Enabled,
            Err(_) => AiStatus::Degraded {
                missing: self.missing_required(),
            },
        }
    }
}
