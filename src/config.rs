use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    #[serde(default = "default_exit_password")]
    pub exit_password: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_cabinet_title")]
    pub cabinet_title: String,
    #[serde(default = "default_audio_enabled")]
    pub audio_enabled: bool,
    #[serde(default = "default_master_volume")]
    pub master_volume: f32,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_admin_password() -> String {
    "admin123".to_string()
}
fn default_exit_password() -> String {
    "arcade2025".to_string()
}
fn default_theme() -> String {
    "arcade-dark".to_string()
}
fn default_cabinet_title() -> String {
    "ARCADR".to_string()
}
fn default_audio_enabled() -> bool {
    true
}
fn default_master_volume() -> f32 {
    0.8
}
fn default_tick_rate_ms() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_password: default_admin_password(),
            exit_password: default_exit_password(),
            theme: default_theme(),
            cabinet_title: default_cabinet_title(),
            audio_enabled: default_audio_enabled(),
            master_volume: default_master_volume(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("arcadr")
            .join("config.toml")
    }

    /// Clamp out-of-range values from hand-edited files.
    pub fn validate(&mut self) {
        if !(0.0..=1.0).contains(&self.master_volume) {
            self.master_volume = self.master_volume.clamp(0.0, 1.0);
        }
        if self.theme.is_empty() {
            self.theme = default_theme();
        }
        if self.tick_rate_ms == 0 {
            self.tick_rate_ms = default_tick_rate_ms();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.admin_password, "admin123");
        assert_eq!(config.exit_password, "arcade2025");
        assert_eq!(config.theme, "arcade-dark");
        assert!(config.audio_enabled);
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let toml_str = r#"
admin_password = "letmein"
theme = "crt-green"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.admin_password, "letmein");
        assert_eq!(config.theme, "crt-green");
        assert_eq!(config.exit_password, "arcade2025");
        assert!((config.master_volume - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.admin_password, deserialized.admin_password);
        assert_eq!(config.cabinet_title, deserialized.cabinet_title);
        assert_eq!(config.tick_rate_ms, deserialized.tick_rate_ms);
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut config = Config::default();
        config.master_volume = 3.0;
        config.theme = String::new();
        config.tick_rate_ms = 0;
        config.validate();
        assert!((config.master_volume - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.theme, "arcade-dark");
        assert_eq!(config.tick_rate_ms, 100);
    }
}
