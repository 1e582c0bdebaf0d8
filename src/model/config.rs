use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::cell::RankPolicy;
use super::grid::GridLayout;

/// Configuration from slotgrid.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_url")]
    pub url: String,
    /// Request timeout; 0 keeps the transport default
    #[serde(default)]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            url: default_server_url(),
            timeout_secs: 0,
        }
    }
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

/// Slot granularity presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    #[default]
    Hourly,
    HalfHourly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    pub layout: LayoutKind,
    /// Explicit row labels; overrides `layout` when non-empty
    #[serde(default)]
    pub time_labels: Vec<String>,
    /// Explicit column labels; overrides the weekday default when non-empty
    #[serde(default)]
    pub day_labels: Vec<String>,
    #[serde(default = "default_max_preferred_rank")]
    pub max_preferred_rank: u8,
    #[serde(default = "default_neutral_rank")]
    pub neutral_rank: u8,
    #[serde(default = "default_unavailable_rank")]
    pub unavailable_rank: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            layout: LayoutKind::Hourly,
            time_labels: Vec::new(),
            day_labels: Vec::new(),
            max_preferred_rank: default_max_preferred_rank(),
            neutral_rank: default_neutral_rank(),
            unavailable_rank: default_unavailable_rank(),
        }
    }
}

fn default_max_preferred_rank() -> u8 {
    3
}

fn default_neutral_rank() -> u8 {
    3
}

fn default_unavailable_rank() -> u8 {
    5
}

impl GridConfig {
    pub fn policy(&self) -> RankPolicy {
        RankPolicy {
            max_preferred: self.max_preferred_rank,
            neutral: self.neutral_rank,
            unavailable: self.unavailable_rank,
        }
    }

    pub fn layout(&self) -> GridLayout {
        let mut layout = match self.layout {
            LayoutKind::Hourly => GridLayout::hourly(),
            LayoutKind::HalfHourly => GridLayout::half_hourly(),
        };
        if !self.time_labels.is_empty() {
            layout.time_labels = self.time_labels.clone();
        }
        if !self.day_labels.is_empty() {
            layout.day_labels = self.day_labels.clone();
        }
        layout
    }

    /// Describe the first inconsistency, if any
    pub fn validation_error(&self) -> Option<String> {
        if self.max_preferred_rank == 0 {
            return Some("max_preferred_rank must be at least 1".into());
        }
        if self.unavailable_rank <= self.max_preferred_rank {
            return Some(format!(
                "unavailable_rank ({}) must exceed max_preferred_rank ({})",
                self.unavailable_rank, self.max_preferred_rank
            ));
        }
        for labels in [&self.time_labels, &self.day_labels] {
            if labels.iter().any(|l| l.is_empty() || l.contains('-')) {
                return Some("grid labels must be non-empty and must not contain '-'".into());
            }
        }
        None
    }
}

/// Request selectors and the course list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_semester")]
    pub semester: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub courses: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            semester: default_semester(),
            location: default_location(),
            courses: Vec::new(),
        }
    }
}

fn default_semester() -> String {
    "S1".to_string()
}

fn default_location() -> String {
    "STLUC".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
