use crate::model::{Cell, Preference, RankPolicy};

/// Left-click cycle: unset → preferred(rank) → preferred(rank+1) → … →
/// preferred(max) → unset. Unavailable cells reset to unset.
///
/// Cells carrying an assigned course are returned unchanged.
pub fn apply_primary(cell: &Cell, current_rank: u8, policy: &RankPolicy) -> Cell {
    if !cell.is_editable() {
        return cell.clone();
    }
    match cell.preference {
        Preference::Unset => policy.preferred_cell(current_rank),
        Preference::Preferred if cell.rank < policy.max_preferred => Cell {
            rank: cell.rank + 1,
            ..cell.clone()
        },
        _ => policy.default_cell(),
    }
}

/// Right-click toggle: unavailable → unset, anything else → unavailable.
///
/// Cells carrying an assigned course are returned unchanged.
pub fn apply_secondary(cell: &Cell, policy: &RankPolicy) -> Cell {
    if !cell.is_editable() {
        return cell.clone();
    }
    match cell.preference {
        Preference::Unavailable => policy.default_cell(),
        _ => policy.unavailable_cell(),
    }
}
