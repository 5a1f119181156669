//! Application configuration.
//!
//! Layering, lowest to highest priority:
//!
//! 1. compiled defaults ([`AppConfig::default`])
//! 2. a TOML file (`--config <path>`, else `celestial_hands.toml` in the
//!    working directory when present)
//! 3. environment variables ([`ENV_PARTICLE_COUNT`], [`ENV_TRANSITION_SECS`],
//!    [`ENV_SEED`])
//!
//! ```toml
//! provider = "sim"
//!
//! [morph]
//! particle_count  = 20000
//! transition_secs = 0.8
//! easing          = "expo-out"
//! seed            = 42
//!
//! [morph.shapes]
//! text = "HELLO"
//!
//! [window]
//! width  = 1280
//! height = 720
//! ```

use std::env;
use std::fs;
use std::path::Path;

use log::{info, warn};
use particle_morph::MorphConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "celestial_hands.toml";

pub const ENV_PARTICLE_COUNT:  &str = "CELESTIAL_PARTICLE_COUNT";
pub const ENV_TRANSITION_SECS: &str = "CELESTIAL_TRANSITION_SECS";
pub const ENV_SEED:            &str = "CELESTIAL_SEED";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("config validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ════════════════════════════════════════════════════════════════════════════
// Sections
// ════════════════════════════════════════════════════════════════════════════

/// Where hand landmarks come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Keyboard picks the pose, mouse moves the palm.
    #[default]
    Sim,
    /// JSON lines on standard input.
    Stdin,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title:  String,
    pub width:  usize,
    pub height: usize,
    /// Frame rate cap; 0 disables the limiter.
    pub fps:    u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title:  "Celestial Hands".to_string(),
            width:  960,
            height: 600,
            fps:    60,
        }
    }
}

impl WindowConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width < 64 || self.height < 64 {
            return Err(ConfigError::Validation(format!(
                "window must be at least 64x64, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderKind,
    pub morph:    MorphConfig,
    pub window:   WindowConfig,
}

impl AppConfig {
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve the full configuration: file (explicit or default location),
    /// then environment, then validation.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match explicit {
            Some(path) => {
                info!("loading config from {}", path.display());
                Self::from_toml_file(path)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                info!("loading config from {DEFAULT_CONFIG_FILE}");
                Self::from_toml_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from any key → value lookup.  Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_PARTICLE_COUNT) {
            match val.trim().parse() {
                Ok(n) => self.morph.particle_count = n,
                Err(_) => warn!("ignoring {ENV_PARTICLE_COUNT}={val:?}: not a count"),
            }
        }
        if let Some(val) = lookup(ENV_TRANSITION_SECS) {
            match val.trim().parse() {
                Ok(secs) => self.morph.transition_secs = secs,
                Err(_) => warn!("ignoring {ENV_TRANSITION_SECS}={val:?}: not a number"),
            }
        }
        if let Some(val) = lookup(ENV_SEED) {
            match val.trim().parse() {
                Ok(seed) => self.morph.seed = Some(seed),
                Err(_) => warn!("ignoring {ENV_SEED}={val:?}: not an integer"),
            }
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.morph
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        self.window.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_morph::Easing;

    #[test]
    fn defaults_validate() {
        let cfg = AppConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.morph.particle_count, 30_000);
        assert_eq!(cfg.morph.transition_secs, 1.2);
        assert_eq!(cfg.provider, ProviderKind::Sim);
    }

    #[test]
    fn toml_overrides_only_what_it_names() {
        let cfg = AppConfig::from_toml_str(
            r#"
            provider = "stdin"

            [morph]
            particle_count = 500
            easing = "linear"

            [morph.shapes]
            text = "HI"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.provider, ProviderKind::Stdin);
        assert_eq!(cfg.morph.particle_count, 500);
        assert_eq!(cfg.morph.easing, Easing::Linear);
        assert_eq!(cfg.morph.shapes.text, "HI");
        assert_eq!(cfg.morph.shapes.sphere_radius, 4.0);
        assert_eq!(cfg.morph.transition_secs, 1.2);
        assert_eq!(cfg.window, WindowConfig::default());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml_str("[morph\nparticle_count = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let err = AppConfig::from_toml_str("provider = \"camera\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_rejected() {
        let cfg = AppConfig::from_toml_str("[morph]\nparticle_count = 0").unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));

        let cfg = AppConfig::from_toml_str("[morph]\ntransition_secs = -1.0").unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));

        let cfg = AppConfig::from_toml_str("[window]\nwidth = 10").unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn overrides_apply_and_bad_values_are_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(|key| match key {
            ENV_PARTICLE_COUNT => Some("1234".into()),
            ENV_TRANSITION_SECS => Some("fast".into()),
            ENV_SEED => Some(" 99 ".into()),
            _ => None,
        });
        assert_eq!(cfg.morph.particle_count, 1234);
        assert_eq!(cfg.morph.transition_secs, 1.2);
        assert_eq!(cfg.morph.seed, Some(99));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/celestial.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
