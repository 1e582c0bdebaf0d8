use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// One named, scored candidate schedule
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationOption {
    pub id: String,
    pub display_name: String,
    pub score: f64,
    pub conflict_count: u32,
    pub grid: Grid,
}

impl RecommendationOption {
    /// Number of slots carrying an assigned course
    pub fn booked_slots(&self) -> usize {
        self.grid
            .iter()
            .filter(|(_, c)| c.assigned_course.is_some())
            .count()
    }
}

/// Which of the two parallel grids is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    EditingPreferences,
    ViewingRecommendation,
}

impl ViewMode {
    /// Tab label
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::EditingPreferences => "My Preferences",
            ViewMode::ViewingRecommendation => "Recommended",
        }
    }

    pub fn is_read_only(self) -> bool {
        self == ViewMode::ViewingRecommendation
    }

    pub fn toggled(self) -> ViewMode {
        match self {
            ViewMode::EditingPreferences => ViewMode::ViewingRecommendation,
            ViewMode::ViewingRecommendation => ViewMode::EditingPreferences,
        }
    }
}
