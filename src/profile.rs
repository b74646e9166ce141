//! Device identity and locally persisted player data
//!
//! One JSON file per installation holding the stable device id, the
//! display name, and the best score seen locally. Loading is lenient: a
//! missing or corrupt file becomes a fresh profile with a generated id.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display names are capped at this many characters
pub const MAX_NAME_LENGTH: usize = 20;

/// Fallback display name
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// Trim, strip markup-hostile characters, cap the length, and fall back
/// to the default when nothing survives.
pub fn sanitize_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '&'))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return DEFAULT_PLAYER_NAME.to_string();
    }
    cleaned.chars().take(MAX_NAME_LENGTH).collect()
}

/// Locally persisted per-installation data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Stable identifier, generated once and kept for the install's life
    pub device_id: String,
    pub player_name: String,
    /// Best score seen locally; advisory until reconciled with the server
    #[serde(default)]
    pub best_score: u32,
}

impl PlayerProfile {
    /// Fresh profile with a generated device id.
    pub fn generate() -> Self {
        Self {
            device_id: format!("device_{}", Uuid::new_v4()),
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            best_score: 0,
        }
    }
}

/// Load/save home for the profile file
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the profile, falling back to a freshly generated one (which
    /// is saved immediately so the device id sticks).
    pub fn load(&self) -> PlayerProfile {
        match fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<PlayerProfile>(&json) {
                Ok(profile) => {
                    log::info!(
                        "loaded profile for {} (best {})",
                        profile.player_name,
                        profile.best_score
                    );
                    return profile;
                }
                Err(err) => log::warn!("corrupt profile file, regenerating: {err}"),
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("no profile yet, generating one");
            }
            Err(err) => log::warn!("could not read profile, regenerating: {err}"),
        }

        let profile = PlayerProfile::generate();
        self.save(&profile);
        profile
    }

    /// Persist the profile; failures are logged, never fatal.
    pub fn save(&self, profile: &PlayerProfile) {
        match serde_json::to_string_pretty(profile) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    log::warn!("could not save profile: {err}");
                }
            }
            Err(err) => log::warn!("could not serialize profile: {err}"),
        }
    }
}
