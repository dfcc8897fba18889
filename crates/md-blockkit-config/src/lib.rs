use md_blockkit_engine::{LexOptions, RenderOptions, render::options::DEFAULT_BULLET};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found at {config_path}")]
    ConfigNotFound { config_path: PathBuf },

    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Output preferences. Every key is optional; missing keys keep the
/// stock output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix for unordered list items.
    pub bullet: String,
    /// `emoji` flag on header and image-title text objects.
    pub header_emoji: bool,
    /// Turn paragraphs holding only an image into image blocks.
    pub image_blocks: bool,
    /// Pretty-print the JSON payload.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bullet: DEFAULT_BULLET.to_string(),
            header_emoji: true,
            image_blocks: false,
            pretty: true,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    /// Loads from `explicit` if given (with `~` and `$VARS` expanded), else
    /// from the default location.
    ///
    /// A missing file is only tolerated at the default location.
    pub fn load(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        let Some(path) = explicit else {
            return Self::load_from_path(Self::config_path());
        };
        let config_path = Self::expand_path(path).unwrap_or_else(|| path.to_path_buf());
        match Self::load_from_path(&config_path)? {
            Some(config) => Ok(Some(config)),
            None => Err(ConfigError::ConfigNotFound { config_path }),
        }
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/md-blockkit");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            bullet: self.bullet.clone(),
            header_emoji: self.header_emoji,
        }
    }

    pub fn lex_options(&self) -> LexOptions {
        LexOptions {
            image_blocks: self.image_blocks,
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
