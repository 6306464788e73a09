//! Global configuration loader for TableTalk.
//!
//! Reads `config.toml` from the config directory (`~/.tabletalk/` in
//! production) and deserializes it into [`GlobalConfig`]. Falls back to
//! defaults when the file is missing or malformed, so a fresh install
//! works without any setup.

use std::path::{Path, PathBuf};

use tabletalk_types::config::GlobalConfig;

/// Default config directory: `~/.tabletalk`.
///
/// Returns `None` when the home directory cannot be determined.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tabletalk"))
}

/// Load global configuration from `{config_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(config_dir: &Path) -> GlobalConfig {
    let config_path = config_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Command-line overrides layered on top of the loaded config.
///
/// Flags win over `config.toml`, which wins over built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_path: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub max_steps: Option<u32>,
}

/// Apply CLI overrides to a loaded [`GlobalConfig`].
pub fn apply_overrides(mut config: GlobalConfig, overrides: ConfigOverrides) -> GlobalConfig {
    if let Some(path) = overrides.database_path {
        config.database_path = path;
    }
    if let Some(model) = overrides.model {
        config.model = model;
    }
    if let Some(base_url) = overrides.base_url {
        config.base_url = base_url;
    }
    if let Some(max_steps) = overrides.max_steps {
        config.max_steps = max_steps;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.database_path, "analytics.db");
        assert_eq!(config.model, "llama3-8b-8192");
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
database_path = "/data/sales.db"
model = "llama-3.3-70b-versatile"
max_steps = 8
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.database_path, "/data/sales.db");
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.max_steps, 8);
        // Unspecified fields keep their defaults
        assert_eq!(config.handle_ttl_secs, 7200);
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.model, "llama3-8b-8192");
        assert_eq!(config.max_steps, 15);
    }

    #[test]
    fn apply_overrides_flags_win() {
        let config = apply_overrides(
            GlobalConfig::default(),
            ConfigOverrides {
                database_path: Some("reports.db".into()),
                model: Some("llama-3.1-8b-instant".into()),
                base_url: None,
                max_steps: Some(5),
            },
        );
        assert_eq!(config.database_path, "reports.db");
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.max_steps, 5);
        // Untouched fields come from the loaded config
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn apply_overrides_none_is_identity() {
        let config = apply_overrides(GlobalConfig::default(), ConfigOverrides::default());
        assert_eq!(config.database_path, "analytics.db");
        assert_eq!(config.max_tokens, 1024);
    }
}
