use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// par-play configuration, loaded from `~/.config/par-play/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine binary to launch (resolved through PATH)
    pub engine_binary: String,
    /// Use the engine's own config directory instead of par-play's
    pub use_engine_config: bool,
    /// Resume playback position on the next run
    pub watch_later: bool,
    /// Window title shown when nothing is playing
    pub window_title: String,
    /// Initial window size, replaced by the video size on reconfig
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine_binary: "mpv".to_string(),
            use_engine_config: false,
            watch_later: false,
            window_title: "par-play".to_string(),
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        if config_path.exists() {
            log::info!("loading config from {config_path:?}");
            let contents = fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            log::info!("config not found, creating default at {config_path:?}");
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Configuration file path (XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// par-play's config directory, also handed to the engine as its
    /// config-dir unless `use_engine_config` is set.
    pub fn config_dir() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join("par-play"),
            None => PathBuf::from("."),
        }
    }

    /// Engine options implied by the config file, applied before the
    /// command-line ones.
    pub fn engine_options(&self) -> Vec<(String, Option<String>)> {
        let mut options = Vec::new();
        if self.watch_later {
            options.push(("save-position-on-quit".to_string(), Some("yes".to_string())));
        }
        options
    }
}
