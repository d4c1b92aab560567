/// Client configuration
use crate::error::{CliError, Result};
use nebula_api_client::{ApiConfig, DEFAULT_BASE_URL};
use nebula_playback::{FadeCurve, PlaybackConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File looked up in the working directory when no `--config` is given
const DEFAULT_CONFIG_FILE: &str = "nebula.toml";

/// Longest accepted crossfade
pub const MAX_CROSSFADE_SECS: f32 = 30.0;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NebulaConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Where the recently played list and cached mixes live
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// 0 disables crossfade
    #[serde(default)]
    pub crossfade_secs: f32,

    /// `linear`, `square_root`, `s_curve` or `equal_power`
    #[serde(default)]
    pub fade_curve: FadeCurve,
}

impl NebulaConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `nebula.toml` in the working
    /// directory is used if present. `NEBULA_<SECTION>__<KEY>` environment
    /// variables override both.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (e.g. NEBULA_API__BASE_URL)
        settings = settings.add_source(
            config::Environment::with_prefix("NEBULA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(CliError::Config(
                "Backend URL is required (set NEBULA_API__BASE_URL)".to_string(),
            ));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CliError::Config(format!(
                "Backend URL must start with http:// or https://, got {base_url:?}"
            )));
        }

        if self.api.timeout_secs == 0 || self.api.connect_timeout_secs == 0 {
            return Err(CliError::Config("Timeouts must be at least 1 second".to_string()));
        }

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(CliError::Config(format!(
                "Volume must be between 0.0 and 1.0, got {}",
                self.playback.volume
            )));
        }

        if !(0.0..=MAX_CROSSFADE_SECS).contains(&self.playback.crossfade_secs) {
            return Err(CliError::Config(format!(
                "Crossfade must be between 0 and {} seconds, got {}",
                MAX_CROSSFADE_SECS, self.playback.crossfade_secs
            )));
        }

        Ok(())
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api.base_url.trim()).with_timeouts(
            Duration::from_secs(self.api.timeout_secs),
            Duration::from_secs(self.api.connect_timeout_secs),
        )
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            volume: self.playback.volume,
            crossfade: Duration::try_from_secs_f32(self.playback.crossfade_secs)
                .unwrap_or_default(),
            fade_curve: self.playback.fade_curve,
        }
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        data_dir: default_data_dir(),
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from("./data"), |dir| dir.join("nebula"))
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        volume: default_volume(),
        crossfade_secs: 0.0,
        fade_curve: FadeCurve::default(),
    }
}

fn default_volume() -> f32 {
    1.0
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            storage: default_storage(),
            playback: default_playback(),
        }
    }
}
