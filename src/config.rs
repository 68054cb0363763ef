use std::path::PathBuf;

use thiserror::Error;

use crate::chart::Theme;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "commitpulse";
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API URL cannot be empty")]
    EmptyApiUrl,

    #[error("API URL must start with http:// or https://, got {0}")]
    InvalidApiUrl(String),

    #[error("User agent cannot be empty")]
    EmptyUserAgent,

    #[error("Commit window must be at least one day")]
    EmptyWindow,

    #[error("Unknown chart theme: {0} (expected dark or light)")]
    UnknownTheme(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub user_agent: String,
    pub window_days: u32,
    pub chart_path: PathBuf,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            chart_path: PathBuf::from("commits.svg"),
            theme: Theme::Dark,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `COMMITPULSE_API_URL`, `COMMITPULSE_CHART_PATH`
    /// and `COMMITPULSE_THEME` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("COMMITPULSE_API_URL").filter(|v| !v.is_empty()) {
            config = config.with_api_url(url);
        }
        if let Some(path) = lookup("COMMITPULSE_CHART_PATH").filter(|v| !v.is_empty()) {
            config = config.with_chart_path(path);
        }
        if let Some(theme) = lookup("COMMITPULSE_THEME").filter(|v| !v.is_empty()) {
            config = config.with_theme(theme.parse()?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }

    pub fn with_chart_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chart_path = path.into();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }

        if self.window_days == 0 {
            return Err(ConfigError::EmptyWindow);
        }

        Ok(())
    }
}
