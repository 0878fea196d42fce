use std::env;
use std::path::Path;

use serde::Deserialize;

use crate::dispatch::Endpoint;
use crate::error::MentorError;
use crate::prompt::LearnerProfile;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model candidates tried in order when mentor.toml doesn't override them.
pub const DEFAULT_MODELS: [&str; 4] = [
    "gemini-flash-latest",
    "gemini-2.5-flash",
    "gemini-2.0-flash",
    "gemini-pro-latest",
];

#[derive(Debug)]
pub struct Config {
    pub api_key: String,
    pub endpoints: Vec<Endpoint>,
    pub profile: LearnerProfile,
}

/// Optional mentor.toml overrides: an ordered `models` list and a
/// `[profile]` table.
#[derive(Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    models: Vec<String>,
    profile: LearnerProfile,
}

impl Config {
    /// Load from the environment plus the optional config file. The file
    /// path comes from MENTOR_CONFIG, falling back to ./mentor.toml.
    pub fn load() -> Result<Self, MentorError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| MentorError::Config("GEMINI_API_KEY not set".to_string()))?;

        let file = read_file_config();

        let models: Vec<String> = if file.models.is_empty() {
            DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
        } else {
            file.models
        };

        let endpoints = models
            .iter()
            .map(|model| Endpoint::new(model, format!("{API_BASE}/{model}:generateContent")))
            .collect();

        Ok(Config {
            api_key,
            endpoints,
            profile: file.profile,
        })
    }
}

fn read_file_config() -> FileConfig {
    let path = env::var("MENTOR_CONFIG").unwrap_or_else(|_| "mentor.toml".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        return FileConfig::default();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!("failed to read {}: {e}", path.display());
            return FileConfig::default();
        }
    };

    match toml::from_str(&contents) {
        Ok(parsed) => {
            tracing::info!("loaded config from {}", path.display());
            parsed
        }
        Err(e) => {
            tracing::warn!("failed to parse {}: {e}", path.display());
            FileConfig::default()
        }
    }
}
