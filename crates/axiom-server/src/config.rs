//! Layered server configuration

use anyhow::bail;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default config template created when no config exists
const DEFAULT_CONFIG: &str = r#"
[server]
mode = "development"  # or "production"

[content]
root = ""    # Plugin checkout directory (development mode). Or set AXIOM_CONTENT_ROOT.
bundle = ""  # Content bundle path (production mode). Or set AXIOM_BUNDLE.

[logging]
level = "info"  # trace, debug, info, warn, error
"#;

/// Which backend serves content.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Read Markdown directly from a plugin checkout
    Development,
    /// Read the pre-serialized JSON bundle
    Production,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub mode: Mode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    #[serde(default)]
    pub root: String,
    #[serde(default)]
    pub bundle: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Global config path: ~/.axiom/axiom.toml
    fn global_config_path() -> anyhow::Result<PathBuf> {
        let Some(home) = dirs::home_dir() else {
            bail!("could not determine home directory");
        };
        Ok(home.join(".axiom").join("axiom.toml"))
    }

    /// Ensure global config directory and file exist, creating defaults if needed
    fn ensure_global_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::global_config_path()?;
        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)?;
                eprintln!("Created config directory: {}", config_dir.display());
            }
        }

        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG.trim())?;
            eprintln!("Created default config: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Load configuration with layered approach:
    /// 1. Global config: ~/.axiom/axiom.toml (auto-created if missing)
    /// 2. Local override: ./axiom.toml (workspace, optional)
    /// 3. Environment variables with AXIOM__ prefix
    /// 4. Convenience env vars (AXIOM_MODE, AXIOM_CONTENT_ROOT, AXIOM_BUNDLE)
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        let global_config_path = Self::ensure_global_config()?;

        let mut builder = config::Config::builder()
            .add_source(config::File::from(global_config_path))
            .add_source(config::File::with_name("axiom").required(false))
            .add_source(config::Environment::with_prefix("AXIOM").separator("__"));

        if let Ok(mode) = env::var("AXIOM_MODE") {
            builder = builder.set_override("server.mode", mode)?;
        }

        if let Ok(root) = env::var("AXIOM_CONTENT_ROOT") {
            builder = builder.set_override("content.root", root)?;
        }

        if let Ok(bundle) = env::var("AXIOM_BUNDLE") {
            builder = builder.set_override("content.bundle", bundle)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// A mode without its source path is a packaging defect; refuse to start.
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.server.mode {
            Mode::Development if self.content.root.is_empty() => {
                bail!("development mode requires content.root (or AXIOM_CONTENT_ROOT)")
            }
            Mode::Production if self.content.bundle.is_empty() => {
                bail!("production mode requires content.bundle (or AXIOM_BUNDLE)")
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mode: Mode, root: &str, bundle: &str) -> Config {
        Config {
            server: ServerConfig { mode },
            content: ContentConfig {
                root: root.to_string(),
                bundle: bundle.to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    #[test]
    fn development_mode_requires_root() {
        assert!(config(Mode::Development, "", "").validate().is_err());
        assert!(config(Mode::Development, "/plugin", "").validate().is_ok());
    }

    #[test]
    fn production_mode_requires_bundle() {
        assert!(config(Mode::Production, "", "").validate().is_err());
        assert!(config(Mode::Production, "", "/bundle.json").validate().is_ok());
    }

    #[test]
    fn mode_deserializes_lowercase() {
        let mode: Mode = serde_json::from_str("\"development\"").unwrap();
        assert_eq!(mode, Mode::Development);
        let mode: Mode = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(mode, Mode::Production);
    }
}
