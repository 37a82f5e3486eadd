use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
///
/// Holds what the CLI needs to build a client: the developer API key and the
/// error-suppression preference. The library never reads this itself; the
/// binary loads it and hands the values to [`crate::DarkSky`] explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Developer API key embedded into every request path.
    pub api_key: Option<String>,

    /// Swallow transport failures instead of surfacing them.
    #[serde(default)]
    pub suppress_errors: bool,
}

impl Config {
    /// Return the stored API key, or a hint-carrying error when none is set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `darksky configure` first."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "darksky", "darksky-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.require_api_key().unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("darksky configure"));
    }

    #[test]
    fn set_api_key_makes_it_available() {
        let mut cfg = Config::default();

        cfg.set_api_key("SECRET_KEY".into());

        let key = cfg.require_api_key().expect("key must exist");
        assert_eq!(key, "SECRET_KEY");
    }

    #[test]
    fn suppress_errors_defaults_to_false() {
        // Older config files carry only the key; the flag must default.
        let cfg: Config = toml::from_str(r#"api_key = "SECRET_KEY""#).unwrap();

        assert_eq!(cfg.api_key.as_deref(), Some("SECRET_KEY"));
        assert!(!cfg.suppress_errors);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config { api_key: Some("SECRET_KEY".into()), suppress_errors: true };

        let toml = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&toml).unwrap();

        assert_eq!(back.api_key, cfg.api_key);
        assert_eq!(back.suppress_errors, cfg.suppress_errors);
    }
}
