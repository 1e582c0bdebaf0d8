use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{Grid, GridLayout, Preference, RankPolicy};

/// One entry of the sparse preference map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    pub preference: Preference,
    pub rank: u8,
}

/// `DAY-TIME` key → entry, in grid row-major order. Absent keys mean unset.
pub type SparsePreferences = IndexMap<String, PreferenceEntry>;

/// Body of the recommendation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub semester: String,
    pub location: String,
    pub courses: Vec<String>,
    #[serde(rename = "timetablePreferences")]
    pub timetable_preferences: SparsePreferences,
}

/// Encode every non-unset cell of the preferences grid
pub fn encode_preferences(grid: &Grid, layout: &GridLayout) -> SparsePreferences {
    grid.iter()
        .filter(|(_, cell)| !cell.is_unset())
        .filter_map(|(coord, cell)| {
            let key = layout.key_for(coord)?;
            Some((
                key,
                PreferenceEntry {
                    preference: cell.preference,
                    rank: cell.rank,
                },
            ))
        })
        .collect()
}

/// Rebuild a preferences grid from a sparse map.
///
/// Unknown keys and `default` entries are skipped. Ranks are normalized to
/// the policy: preferred ranks are clamped, unavailable takes the sentinel.
pub fn decode_preferences(
    sparse: &SparsePreferences,
    layout: &GridLayout,
    policy: &RankPolicy,
) -> Grid {
    let mut grid = Grid::for_layout(layout, policy);
    for (key, entry) in sparse {
        let Some(coord) = layout.coord_for_key(key) else {
            tracing::debug!(key = %key, "unknown preference key skipped");
            continue;
        };
        let cell = match entry.preference {
            Preference::Unset => continue,
            Preference::Preferred => policy.preferred_cell(entry.rank),
            Preference::Unavailable => policy.unavailable_cell(),
        };
        grid = grid.with_cell(coord, cell);
    }
    grid
}
