//! Visual descriptor for a cell, derived purely from its state and the view.
//! Nothing here knows about terminals; the theme maps [`Fill`] to colors.

use crate::model::{Cell, Preference, ViewMode};

/// How strongly a preferred cell is shaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTier {
    First,
    Second,
    Lower,
}

/// Background category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Empty,
    Preferred(RankTier),
    Unavailable,
    Course,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellStyle {
    pub fill: Fill,
    /// Whether the cell reacts to the pointer (editing view only)
    pub hoverable: bool,
    pub label: Option<String>,
}

pub fn style_of(cell: &Cell, view: ViewMode) -> CellStyle {
    let hoverable = view == ViewMode::EditingPreferences;
    if let Some(course) = &cell.assigned_course {
        return CellStyle {
            fill: Fill::Course,
            hoverable,
            label: Some(course.clone()),
        };
    }
    let (fill, label) = match cell.preference {
        Preference::Unset => (Fill::Empty, None),
        Preference::Preferred => {
            let tier = match cell.rank {
                0 | 1 => RankTier::First,
                2 => RankTier::Second,
                _ => RankTier::Lower,
            };
            (
                Fill::Preferred(tier),
                Some("\u{2605}".repeat(cell.rank.max(1) as usize)),
            )
        }
        Preference::Unavailable => (Fill::Unavailable, Some("\u{2715}".to_string())),
    };
    CellStyle {
        fill,
        hoverable,
        label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RankPolicy;

    #[test]
    fn course_wins_over_preference() {
        let cell = Cell {
            assigned_course: Some("COMP3506".into()),
            ..RankPolicy::default().unavailable_cell()
        };
        let style = style_of(&cell, ViewMode::ViewingRecommendation);
        assert_eq!(style.fill, Fill::Course);
        assert_eq!(style.label.as_deref(), Some("COMP3506"));
        assert!(!style.hoverable);
    }

    #[test]
    fn preferred_tiers() {
        let p = RankPolicy {
            max_preferred: 4,
            neutral: 4,
            unavailable: 5,
        };
        let tiers: Vec<_> = (1..=4)
            .map(|r| style_of(&p.preferred_cell(r), ViewMode::EditingPreferences).fill)
            .collect();
        assert_eq!(
            tiers,
            vec![
                Fill::Preferred(RankTier::First),
                Fill::Preferred(RankTier::Second),
                Fill::Preferred(RankTier::Lower),
                Fill::Preferred(RankTier::Lower),
            ]
        );
        let style = style_of(&p.preferred_cell(2), ViewMode::EditingPreferences);
        assert_eq!(style.label.as_deref(), Some("\u{2605}\u{2605}"));
    }

    #[test]
    fn empty_and_unavailable() {
        let p = RankPolicy::default();
        let empty = style_of(&p.default_cell(), ViewMode::EditingPreferences);
        assert_eq!(empty.fill, Fill::Empty);
        assert!(empty.hoverable);
        assert!(empty.label.is_none());
        let blocked = style_of(&p.unavailable_cell(), ViewMode::EditingPreferences);
        assert_eq!(blocked.fill, Fill::Unavailable);
    }
}
