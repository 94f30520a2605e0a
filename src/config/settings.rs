use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::{MakeupStrategy, NotificationStrategy, TimeRange, TimeUnit};

fn default_time_unit() -> TimeUnit {
    TimeUnit::Days
}
fn default_complete_count() -> u32 {
    1
}
fn default_makeup_strategy() -> MakeupStrategy {
    MakeupStrategy::WithCurrentPrayer
}
fn default_notification_strategy() -> NotificationStrategy {
    NotificationStrategy::WithEachPrayer
}
fn default_range() -> TimeRange {
    TimeRange::Weekly
}
fn default_hijri_offset() -> i32 {
    0
}
fn default_tick_rate_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Unit assumed by `missed add` when `--unit` is not given.
    #[serde(default = "default_time_unit")]
    pub default_time_unit: TimeUnit,
    #[serde(default = "default_complete_count")]
    pub default_complete_count: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_time_unit: default_time_unit(),
            default_complete_count: default_complete_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_makeup_strategy")]
    pub default_makeup_strategy: MakeupStrategy,
    #[serde(default = "default_notification_strategy")]
    pub default_notification_strategy: NotificationStrategy,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            default_makeup_strategy: default_makeup_strategy(),
            default_notification_strategy: default_notification_strategy(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_range")]
    pub default_range: TimeRange,
    /// Days to add/subtract from the Hijri date for local moon sighting.
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_range: default_range(),
            hijri_offset: default_hijri_offset(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub plans: PlanConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "qada").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("qada.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Parsing config.toml")
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.tracker.default_time_unit, TimeUnit::Days);
        assert_eq!(config.tracker.default_complete_count, 1);
        assert_eq!(config.display.default_range, TimeRange::Weekly);
        assert_eq!(
            config.plans.default_makeup_strategy,
            MakeupStrategy::WithCurrentPrayer
        );
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [tracker]
            default_time_unit = "months"

            [plans]
            default_notification_strategy = "none"

            [display]
            default_range = "monthly"
            "#,
        )
        .unwrap();
        assert_eq!(config.tracker.default_time_unit, TimeUnit::Months);
        assert_eq!(config.tracker.default_complete_count, 1);
        assert_eq!(
            config.plans.default_notification_strategy,
            NotificationStrategy::None
        );
        assert_eq!(config.display.default_range, TimeRange::Monthly);
        assert_eq!(config.display.tick_rate_ms, 1000);
    }

    #[test]
    fn unknown_values_are_errors() {
        assert!(AppConfig::from_toml("[tracker]\ndefault_time_unit = \"eons\"").is_err());
    }
}
