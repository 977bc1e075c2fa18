//! Folio configuration file handling

use anyhow::{Context, Result};
use folio_animation::{FrameLimits, MotionPreference, SpringConfig};
use folio_calendar::MAX_VISIBLE_LANES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given
pub const CONFIG_FILE: &str = "folio.toml";

/// Top-level Folio configuration (folio.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub spring: SpringSection,
    #[serde(default)]
    pub frame: FrameLimits,
    #[serde(default)]
    pub motion: MotionSection,
    #[serde(default)]
    pub calendar: CalendarSection,
}

/// Spring parameters: a named preset, optionally overridden field by field
#[derive(Debug, Deserialize, Serialize)]
pub struct SpringSection {
    #[serde(default = "default_preset")]
    pub preset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stiffness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damping: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
}

fn default_preset() -> String {
    "default".to_string()
}

impl Default for SpringSection {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            stiffness: None,
            damping: None,
            mass: None,
            precision: None,
        }
    }
}

impl SpringSection {
    /// Resolve the preset and apply overrides
    pub fn resolve(&self, preset: Option<&str>) -> Result<SpringConfig> {
        let name = preset.unwrap_or(&self.preset);
        let base = SpringConfig::named(name).with_context(|| format!("Unknown spring preset {name:?}"))?;

        SpringConfig::with_precision(
            self.stiffness.unwrap_or(base.stiffness()),
            self.damping.unwrap_or(base.damping()),
            self.mass.unwrap_or(base.mass()),
            self.precision.unwrap_or(base.precision()),
        )
        .context("Invalid [spring] section")
    }
}

/// Accessibility settings
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MotionSection {
    /// Equivalent to the user agent reporting `prefers-reduced-motion: reduce`
    #[serde(default)]
    pub reduced: bool,
}

impl MotionSection {
    pub fn preference(&self) -> MotionPreference {
        MotionPreference::from_reduced(self.reduced)
    }
}

/// Calendar view settings
#[derive(Debug, Deserialize, Serialize)]
pub struct CalendarSection {
    /// Lanes drawn per day before collapsing into "+N"
    #[serde(default = "default_max_visible_lanes")]
    pub max_visible_lanes: usize,
}

fn default_max_visible_lanes() -> usize {
    MAX_VISIBLE_LANES
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            max_visible_lanes: default_max_visible_lanes(),
        }
    }
}

impl FolioConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `folio.toml` in the working
    /// directory is used if present, and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) if path.is_dir() => path.join(CONFIG_FILE),
            Some(path) => path.to_path_buf(),
            None => {
                let local = PathBuf::from(CONFIG_FILE);
                if !local.exists() {
                    tracing::debug!("no {CONFIG_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                local
            }
        };

        if !config_path.exists() {
            anyhow::bail!("No config file at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;

        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: FolioConfig = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.spring.resolve(None)?;
        self.frame.validate().context("Invalid [frame] section")?;
        if self.calendar.max_visible_lanes == 0 {
            anyhow::bail!("[calendar] max_visible_lanes must be at least 1");
        }
        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FolioConfig::from_toml("").unwrap();
        assert_eq!(config.spring.resolve(None).unwrap(), SpringConfig::default());
        assert_eq!(config.frame, FrameLimits::default());
        assert_eq!(config.motion.preference(), MotionPreference::NoPreference);
        assert_eq!(config.calendar.max_visible_lanes, 4);
    }

    #[test]
    fn test_preset_with_overrides() {
        let config = FolioConfig::from_toml(
            r#"
            [spring]
            preset = "button"
            damping = 30.0

            [motion]
            reduced = true
            "#,
        )
        .unwrap();

        let spring = config.spring.resolve(None).unwrap();
        assert_eq!(spring.stiffness(), 400.0);
        assert_eq!(spring.damping(), 30.0);
        assert_eq!(spring.mass(), 0.5);
        assert!(config.motion.preference().is_reduced());

        // A command-line preset replaces the file's preset, not its overrides
        let stiff = config.spring.resolve(Some("stiff")).unwrap();
        assert_eq!(stiff.stiffness(), 400.0);
        assert_eq!(stiff.damping(), 30.0);
        assert_eq!(stiff.mass(), 1.0);
    }

    #[test]
    fn test_rejects_invalid_sections() {
        assert!(FolioConfig::from_toml("[spring]\nmass = 0.0\n").is_err());
        assert!(FolioConfig::from_toml("[spring]\npreset = \"bouncy\"\n").is_err());
        assert!(FolioConfig::from_toml("[frame]\nmax_dt = -1.0\n").is_err());
        assert!(FolioConfig::from_toml("[calendar]\nmax_visible_lanes = 0\n").is_err());
    }

    #[test]
    fn test_frame_section_is_partial() {
        let config = FolioConfig::from_toml("[frame]\nmax_dt = 0.1\n").unwrap();
        assert_eq!(config.frame.max_dt, 0.1);
        assert_eq!(config.frame.first_dt, FrameLimits::default().first_dt);
    }

    #[test]
    fn test_serializes_back_to_toml() {
        let text = FolioConfig::default().to_toml().unwrap();
        let reparsed = FolioConfig::from_toml(&text).unwrap();
        assert_eq!(reparsed.calendar.max_visible_lanes, 4);
        assert_eq!(reparsed.spring.preset, "default");
    }
}
