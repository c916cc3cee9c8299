use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for the expungement decider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub completion: CompletionConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    /// host:port the HTTP form is served on
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// `openai` (async-openai client) or `compatible` (plain HTTP)
    pub provider: String,
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: PathBuf,
}

pub const PROVIDER_OPENAI: &str = "openai";
pub const PROVIDER_COMPATIBLE: &str = "compatible";

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// Always returns a usable config; problems are logged.
    pub fn load() -> Self {
        // first .env found wins; existing process variables are not overwritten
        let env_paths = [".env", "../.env"];

        let mut env_loaded = false;
        for path in &env_paths {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                env_loaded = true;
                break;
            }
        }

        if !env_loaded {
            tracing::warn!("No .env file found - continuing with env vars only");
        }

        let config_path =
            env::var("EXPUNGE_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        // file, then environment on top
        let mut config = Self::from_file(Path::new(&config_path));
        config.apply_env_overrides();

        // a missing key is reported here but only fails on the first completion call
        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    fn from_file(path: &Path) -> Self {
        // no file is normal for env-only deployments
        if !path.exists() {
            tracing::warn!("Config file not found at {} - using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to parse config file {}: {} - using defaults",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::error!(
                    "Failed to read config file {}: {} - using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the process environment in production)
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // OPENAI_API_KEY keeps the name users already export
        if let Some(api_key) = lookup("OPENAI_API_KEY") {
            self.completion.api_key = api_key;
        }
        // provider names compare lowercase in validate()
        if let Some(provider) = lookup("EXPUNGE_PROVIDER") {
            self.completion.provider = provider.to_lowercase();
        }
        // only read by the compatible transport
        if let Some(api_base) = lookup("EXPUNGE_API_BASE") {
            self.completion.api_base = api_base;
        }
        if let Some(model) = lookup("EXPUNGE_MODEL") {
            self.completion.model = model;
        }
        if let Some(bind) = lookup("EXPUNGE_HTTP_BIND") {
            self.server.bind = bind;
        }
        // relative paths resolve against the working directory
        if let Some(dir) = lookup("EXPUNGE_EXPORT_DIR") {
            self.export.dir = PathBuf::from(dir);
        }
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.completion.api_key.is_empty() {
            return Err("OPENAI_API_KEY environment variable must be set".into());
        }
        if self.completion.provider != PROVIDER_OPENAI
            && self.completion.provider != PROVIDER_COMPATIBLE
        {
            return Err(format!(
                "Unknown completion provider '{}' (expected '{}' or '{}')",
                self.completion.provider, PROVIDER_OPENAI, PROVIDER_COMPATIBLE
            )
            .into());
        }
        if self.completion.model.is_empty() {
            return Err("Completion model cannot be empty".into());
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "expungement-decider".to_string(),
            bind: "127.0.0.1:8501".to_string(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            provider: PROVIDER_OPENAI.to_string(),
            api_key: String::new(),
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("exports"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.completion.model, "gpt-4");
        assert_eq!(cfg.completion.provider, PROVIDER_OPENAI);
        assert_eq!(cfg.server.bind, "127.0.0.1:8501");
        assert_eq!(cfg.export.dir, PathBuf::from("exports"));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let vars: HashMap<&str, &str> = [
            ("OPENAI_API_KEY", "sk-test"),
            ("EXPUNGE_PROVIDER", "Compatible"),
            ("EXPUNGE_MODEL", "llama3-70b-8192"),
            ("EXPUNGE_EXPORT_DIR", "/tmp/summaries"),
        ]
        .into_iter()
        .collect();

        let mut cfg = Config::default();
        cfg.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.completion.api_key, "sk-test");
        assert_eq!(cfg.completion.provider, PROVIDER_COMPATIBLE);
        assert_eq!(cfg.completion.model, "llama3-70b-8192");
        assert_eq!(cfg.export.dir, PathBuf::from("/tmp/summaries"));
        // untouched
        assert_eq!(cfg.server.bind, "127.0.0.1:8501");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_flags_missing_key_and_unknown_provider() {
        let mut cfg = Config::default();
        assert!(cfg.validate().is_err());

        cfg.completion.api_key = "sk-test".to_string();
        cfg.completion.provider = "anthropic".to_string();
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("anthropic"));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "completion:\n  provider: compatible\n  api_key: ''\n  api_base: http://localhost:11434/v1\n  model: llama3\n").unwrap();

        let cfg = Config::from_file(&path);
        assert_eq!(cfg.completion.api_base, "http://localhost:11434/v1");
        assert_eq!(cfg.completion.model, "llama3");
        assert_eq!(cfg.server.name, "expungement-decider");
    }

    #[test]
    fn test_unparseable_yaml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "completion: [not, a, map").unwrap();

        let cfg = Config::from_file(&path);
        assert_eq!(cfg.completion.model, "gpt-4");
    }
}
