use directories::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::charset::{GenerationOptions, clamp_length};
use crate::complexity::ScorerKind;
use crate::error::Result;
use crate::fingerprint::DEFAULT_SIZE;

/// Environment variable pointing at an alternative settings file
pub const CONFIG_ENV: &str = "PROTECTIT_CONFIG";

/// Application settings. Read once at start-up, never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Length shown when the password field is empty
    pub default_length: usize,
    /// Fingerprint width and height in pixels (64-512, default 128)
    pub fingerprint_size: u32,
    /// Delay between an input event and the roll (0-2000 ms, default 100)
    pub roll_delay_ms: u64,
    /// Cracking nodes assumed by the crack-time estimate (1-1000000)
    pub nodes: u32,
    /// Guesses per second of a single node
    pub guesses_per_node: f64,
    /// Shortest password the complexity meter accepts as valid
    pub minimum_chars: usize,
    pub strength_scale_factor: f64,
    pub scorer: ScorerKind,

    /// Initial state of the option checkboxes
    pub options: GenerationOptions,
    pub spell_password: bool,
    pub qr_hash: bool,
    pub visual_hash: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_length: 16,
            fingerprint_size: DEFAULT_SIZE,
            roll_delay_ms: 100,
            nodes: 1,
            guesses_per_node: 1e9,
            minimum_chars: 8,
            strength_scale_factor: 1.0,
            scorer: ScorerKind::Complexify,
            options: GenerationOptions::default(),
            spell_password: true,
            qr_hash: true,
            visual_hash: true,
        }
    }
}

impl Settings {
    /// Returns the path to the settings file
    pub fn settings_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        match ProjectDirs::from("com", "ProtectIt", "ProtectIt") {
            Some(dirs) => dirs.config_dir().join("settings.json"),
            None => PathBuf::from("settings.json"),
        }
    }

    /// Load settings from file, or return defaults if not found or invalid
    pub fn load() -> Self {
        let path = Self::settings_path();
        if !path.exists() {
            debug!("no settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("ignoring settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Parse a settings file and clamp every value into its range
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut settings: Settings = serde_json::from_str(&data)?;
        settings.clamp_all();
        Ok(settings)
    }

    fn clamp_all(&mut self) {
        self.set_default_length(self.default_length);
        self.set_fingerprint_size(self.fingerprint_size);
        self.set_roll_delay(self.roll_delay_ms);
        self.set_nodes(self.nodes);
        if self.strength_scale_factor.is_nan() || self.strength_scale_factor <= 0.0 {
            self.strength_scale_factor = 1.0;
        }
        if self.guesses_per_node.is_nan() || self.guesses_per_node < 1.0 {
            self.guesses_per_node = 1e9;
        }
    }

    /// Clamp the empty-field length display into the generator's range
    pub fn set_default_length(&mut self, length: usize) {
        self.default_length = clamp_length(i64::try_from(length).unwrap_or(i64::MAX));
    }

    /// Validate and clamp fingerprint size to allowed range
    pub fn set_fingerprint_size(&mut self, size: u32) {
        self.fingerprint_size = size.clamp(64, 512);
    }

    /// Validate and clamp the roll delay to allowed range
    pub fn set_roll_delay(&mut self, millis: u64) {
        self.roll_delay_ms = millis.clamp(0, 2000);
    }

    /// Validate and clamp node count to allowed range
    pub fn set_nodes(&mut self, nodes: u32) {
        self.nodes = nodes.clamp(1, 1_000_000);
    }

    pub fn roll_delay(&self) -> Duration {
        Duration::from_millis(self.roll_delay_ms)
    }
}
