use serde::Serialize;

use crate::model::{Grid, GridLayout, RecommendationOption, ViewMode};
use crate::tui::style::style_of;
use crate::util::unicode::{display_width, truncate_to_width};

/// Width of one day column in text output
const COL_W: usize = 10;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct OptionJson {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub conflicts: u32,
    pub booked_slots: usize,
}

pub fn option_to_json(option: &RecommendationOption) -> OptionJson {
    OptionJson {
        id: option.id.clone(),
        name: option.display_name.clone(),
        score: option.score,
        conflicts: option.conflict_count,
        booked_slots: option.booked_slots(),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// `Name (id)  score 0.90  1 conflict  4 slots`
pub fn format_option_header(option: &RecommendationOption) -> String {
    format!(
        "{} ({})  score {:.2}  {}  {}",
        option.display_name,
        option.id,
        option.score,
        plural(option.conflict_count as usize, "conflict"),
        plural(option.booked_slots(), "slot"),
    )
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("1 {}", word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// Render a grid as aligned text, one line per time slot.
/// Empty cells show as `·`.
pub fn format_grid(grid: &Grid, layout: &GridLayout, view: ViewMode) -> Vec<String> {
    let label_w = layout
        .time_labels
        .iter()
        .map(|l| display_width(l))
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(grid.times() + 1);
    let mut header = " ".repeat(label_w + 1);
    for day in &layout.day_labels {
        header.push_str(&pad_to(&truncate_to_width(day, COL_W - 1), COL_W));
    }
    lines.push(header.trim_end().to_string());

    for t in 0..grid.times() {
        let label = layout.time_labels.get(t).map_or("", String::as_str);
        let mut line = format!("{:>width$} ", label, width = label_w);
        for cell in grid.row(t) {
            let text = style_of(cell, view)
                .label
                .unwrap_or_else(|| "\u{00B7}".to_string());
            line.push_str(&pad_to(&truncate_to_width(&text, COL_W - 1), COL_W));
        }
        lines.push(line.trim_end().to_string());
    }
    lines
}

fn pad_to(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(pad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Coord, Preference, RankPolicy};
    use insta::assert_snapshot;

    fn small_layout() -> GridLayout {
        GridLayout {
            time_labels: vec!["8".into(), "9".into()],
            day_labels: vec!["MON".into(), "TUE".into()],
        }
    }

    fn booked(code: &str) -> Cell {
        Cell {
            preference: Preference::Preferred,
            rank: 1,
            assigned_course: Some(code.into()),
        }
    }

    #[test]
    fn grid_text() {
        let policy = RankPolicy::default();
        let grid = Grid::for_layout(&small_layout(), &policy)
            .with_cell(Coord::new(0, 0), booked("COMP3506"))
            .with_cell(Coord::new(1, 1), policy.preferred_cell(2));
        let text = format_grid(&grid, &small_layout(), ViewMode::ViewingRecommendation).join("\n");
        assert_snapshot!(text, @r"
          MON       TUE
        8 COMP3506  ·
        9 ·         ★★
        ");
    }

    #[test]
    fn header_pluralizes_conflicts() {
        let policy = RankPolicy::default();
        let mut option = RecommendationOption {
            id: "a".into(),
            display_name: "Mornings".into(),
            score: 0.9,
            conflict_count: 1,
            grid: Grid::for_layout(&small_layout(), &policy)
                .with_cell(Coord::new(0, 0), booked("COMP3506")),
        };
        assert_eq!(
            format_option_header(&option),
            "Mornings (a)  score 0.90  1 conflict  1 slot"
        );
        option.conflict_count = 3;
        assert!(format_option_header(&option).contains("3 conflicts"));
    }

    #[test]
    fn option_json_fields() {
        let policy = RankPolicy::default();
        let option = RecommendationOption {
            id: "rec_1".into(),
            display_name: "Recommendation 1".into(),
            score: 0.0,
            conflict_count: 0,
            grid: Grid::for_layout(&small_layout(), &policy),
        };
        let value = serde_json::to_value(option_to_json(&option)).unwrap();
        assert_eq!(value["id"], "rec_1");
        assert_eq!(value["name"], "Recommendation 1");
        assert_eq!(value["booked_slots"], 0);
    }
}
