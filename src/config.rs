use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::api::DEFAULT_FEED_URL;

/// Which matches feed the category facet. The upstream site computed it over
/// the full snapshot before status filtering; some deployments prefer only
/// the displayed subset. Kept as a policy flag, not a hard-coded choice.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryScope {
    #[default]
    FullSet,
    Displayed,
}

impl CategoryScope {
    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryScope::FullSet => "All matches (pre-filter)",
            CategoryScope::Displayed => "Displayed matches only",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Feed endpoint; overridable with --feed
    pub feed_url: String,
    /// IANA zone the feed's naive time strings are written in
    pub feed_timezone: String,
    pub category_scope: CategoryScope,
    /// External player binary
    pub player_command: String,
    /// Ask the player to start muted
    pub autoplay_muted: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_timezone: "Asia/Kolkata".to_string(),
            category_scope: CategoryScope::default(),
            player_command: "mpv".to_string(),
            autoplay_muted: false,
        }
    }
}

impl AppConfig {
    /// Loads config.json if present, defaults otherwise. Feed data is never
    /// written here — only user settings.
    pub fn load() -> Result<Self, anyhow::Error> {
        if let Some(proj_dirs) = ProjectDirs::from("com", "fancast", "fancast") {
            let config_path = proj_dirs.config_dir().join("config.json");
            if config_path.exists() {
                let content = fs::read_to_string(config_path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }
        Ok(AppConfig::default())
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        if let Some(proj_dirs) = ProjectDirs::from("com", "fancast", "fancast") {
            let config_dir = proj_dirs.config_dir();
            fs::create_dir_all(config_dir)?;
            let config_path = config_dir.join("config.json");
            let content = serde_json::to_string_pretty(self)?;
            fs::write(config_path, content)?;
        }
        Ok(())
    }

    /// Zone the feed's time strings are interpreted in.
    pub fn feed_tz(&self) -> chrono_tz::Tz {
        self.feed_timezone
            .parse()
            .unwrap_or(chrono_tz::Asia::Kolkata)
    }

    /// Zone times are rendered in: the system timezone when detectable.
    pub fn display_tz(&self) -> chrono_tz::Tz {
        iana_time_zone::get_timezone()
            .ok()
            .and_then(|tz| tz.parse().ok())
            .unwrap_or(chrono_tz::UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.category_scope, CategoryScope::FullSet);
        assert_eq!(config.player_command, "mpv");
        assert_eq!(config.feed_tz(), chrono_tz::Asia::Kolkata);
    }

    #[test]
    fn test_partial_config_file_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "player_command": "vlc" }"#).unwrap();
        assert_eq!(config.player_command, "vlc");
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
    }

    #[test]
    fn test_bad_timezone_falls_back() {
        let config = AppConfig {
            feed_timezone: "Not/AZone".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.feed_tz(), chrono_tz::Asia::Kolkata);
    }
}
