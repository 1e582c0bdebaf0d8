use serde::{Deserialize, Serialize};

/// A cell's desirability category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    /// No preference expressed (`default` on the wire)
    #[serde(rename = "default")]
    Unset,
    Preferred,
    Unavailable,
}

impl Preference {
    /// Wire name used in request payloads and recommendation responses
    pub fn wire_name(self) -> &'static str {
        match self {
            Preference::Unset => "default",
            Preference::Preferred => "preferred",
            Preference::Unavailable => "unavailable",
        }
    }

    /// Parse a wire name. Unknown names yield None.
    pub fn from_wire(s: &str) -> Option<Preference> {
        match s {
            "default" => Some(Preference::Unset),
            "preferred" => Some(Preference::Preferred),
            "unavailable" => Some(Preference::Unavailable),
            _ => None,
        }
    }
}

/// Rank values in force for a session.
///
/// Preferred cells carry a rank in `1..=max_preferred`; lower is more desired.
/// Unset and unavailable cells carry fixed sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankPolicy {
    pub max_preferred: u8,
    pub neutral: u8,
    pub unavailable: u8,
}

impl Default for RankPolicy {
    fn default() -> Self {
        RankPolicy {
            max_preferred: 3,
            neutral: 3,
            unavailable: 5,
        }
    }
}

impl RankPolicy {
    /// Whether `rank` is a selectable preferred rank
    pub fn is_preferred_rank(&self, rank: u8) -> bool {
        (1..=self.max_preferred).contains(&rank)
    }

    /// Clamp a rank into the preferred range
    pub fn clamp_preferred(&self, rank: u8) -> u8 {
        rank.clamp(1, self.max_preferred)
    }

    /// A fresh cell: unset, neutral rank, no course
    pub fn default_cell(&self) -> Cell {
        Cell {
            preference: Preference::Unset,
            rank: self.neutral,
            assigned_course: None,
        }
    }

    pub fn preferred_cell(&self, rank: u8) -> Cell {
        Cell {
            preference: Preference::Preferred,
            rank: self.clamp_preferred(rank),
            assigned_course: None,
        }
    }

    pub fn unavailable_cell(&self) -> Cell {
        Cell {
            preference: Preference::Unavailable,
            rank: self.unavailable,
            assigned_course: None,
        }
    }
}

/// One (time slot, day) position in the schedule grid
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub preference: Preference,
    pub rank: u8,
    /// Set for committed schedule slots coming from a recommendation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_course: Option<String>,
}

impl Cell {
    /// Cells with an assigned course never accept gesture input
    pub fn is_editable(&self) -> bool {
        self.assigned_course.is_none()
    }

    pub fn is_unset(&self) -> bool {
        self.preference == Preference::Unset
    }
}
