use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use taskdeck_client::{FileTaskApi, HttpTaskApi, TaskClient};

const CONFIG_DIR: &str = ".taskdeck";
const CONFIG_FILE: &str = "config.toml";
const STATE_FILE: &str = "state.json";
const GLOBAL_CONFIG_DIR: &str = "taskdeck";

/// Top-level configuration loaded from `.taskdeck/config.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl ProjectConfig {
    /// Load the project configuration under `dir`, falling back to the user's
    /// global configuration and then to defaults.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if dir.join(CONFIG_DIR).join(CONFIG_FILE).exists() {
            return Self::from_workdir(dir);
        }
        if let Some(global) = global_config_path()
            && global.exists()
        {
            let mut config = Self::from_file(&global)?;
            config.base_dir = dir.to_path_buf();
            return Ok(config);
        }
        Self::from_workdir(dir)
    }

    /// Load configuration from a known project directory.
    pub fn from_workdir(workdir: impl AsRef<Path>) -> Result<Self> {
        let workdir = workdir.as_ref();
        let config_path = workdir.join(CONFIG_DIR).join(CONFIG_FILE);
        let mut config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };
        config.base_dir = workdir.to_path_buf();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self =
            toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.api.ensure_single_source()
    }

    /// Build the task client, letting command-line overrides win over the file.
    pub fn client(&self, overrides: &ApiOverrides) -> Result<TaskClient> {
        if let Some(url) = &overrides.api_url {
            return Ok(TaskClient::Http(HttpTaskApi::new(url.as_str())?));
        }
        if let Some(path) = &overrides.data_file {
            return Ok(TaskClient::File(FileTaskApi::new(path.clone())));
        }
        if let Some(url) = &self.api.base_url {
            return Ok(TaskClient::Http(HttpTaskApi::new(url.as_str())?));
        }
        if let Some(path) = &self.api.data_file {
            return Ok(TaskClient::File(FileTaskApi::new(self.resolve(path))));
        }
        bail!(
            "no task source configured: pass --api-url or --data-file, or set api.base_url / api.data_file in {}",
            Path::new(CONFIG_DIR).join(CONFIG_FILE).display()
        );
    }

    /// File backing persisted UI preferences.
    pub fn state_file(&self) -> PathBuf {
        self.ui.state_file.as_ref().map_or_else(
            || self.base_dir.join(CONFIG_DIR).join(STATE_FILE),
            |path| self.resolve(path),
        )
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(GLOBAL_CONFIG_DIR).join(CONFIG_FILE))
}

/// Command-line overrides for the task source.
#[derive(Debug, Clone, Default)]
pub struct ApiOverrides {
    pub api_url: Option<String>,
    pub data_file: Option<PathBuf>,
}

/// Where tasks come from.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

impl ApiConfig {
    fn ensure_single_source(&self) -> Result<()> {
        if self.base_url.is_some() && self.data_file.is_some() {
            bail!("set either api.base_url or api.data_file, not both");
        }
        Ok(())
    }
}

/// Retry and polling behavior of task requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub retry_count: u32,
    pub retry_delay_ms: u64,
    pub auto_retry: bool,
    /// Refresh interval for the TUI and `watch`; `0` disables polling.
    pub poll_interval_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retry_count: 3,
            retry_delay_ms: 1_000,
            auto_retry: false,
            poll_interval_secs: 0,
        }
    }
}

impl FetchConfig {
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub const fn poll_interval(&self) -> Option<Duration> {
        if self.poll_interval_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.poll_interval_secs))
        }
    }
}

/// Terminal UI settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub debounce_ms: u64,
    pub state_file: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            state_file: None,
        }
    }
}

impl UiConfig {
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
