//! Pointer-down / enter / up sequences turned into rectangular paint strokes.
//!
//! A gesture keeps the grid as it was before pointer-down. Every extend
//! restates the full rectangle from the anchor over that snapshot, so a
//! cell's final value depends only on the current rectangle, never on the
//! path the pointer took to get there.

use crate::model::{Cell, CellRect, Coord, Grid, RankPolicy};

use super::cell_ops::{apply_primary, apply_secondary};

/// Which pointer button started the gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// What a gesture paints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    Preferred,
    Unavailable,
}

impl From<PointerButton> for GestureMode {
    fn from(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => GestureMode::Preferred,
            PointerButton::Secondary => GestureMode::Unavailable,
        }
    }
}

/// A live drag between pointer-down and pointer-up
#[derive(Debug, Clone)]
pub struct SelectionGesture {
    pub anchor: Coord,
    pub mode: GestureMode,
    /// Rank captured at pointer-down; later rank changes don't affect this gesture
    pub rank: u8,
    base: Grid,
    clicked: Grid,
    last: Coord,
}

impl SelectionGesture {
    /// Start a gesture at `anchor`, applying the single-cell action there.
    ///
    /// Returns the gesture and the grid after the click, or None when the
    /// anchor is outside the grid.
    pub fn begin(
        grid: &Grid,
        anchor: Coord,
        button: PointerButton,
        current_rank: u8,
        policy: &RankPolicy,
    ) -> Option<(SelectionGesture, Grid)> {
        let cell = grid.get(anchor)?;
        let rank = policy.clamp_preferred(current_rank);
        let clicked_cell = match button {
            PointerButton::Primary => apply_primary(cell, rank, policy),
            PointerButton::Secondary => apply_secondary(cell, policy),
        };
        let clicked = grid.with_cell(anchor, clicked_cell);
        let gesture = SelectionGesture {
            anchor,
            mode: button.into(),
            rank,
            base: grid.clone(),
            clicked: clicked.clone(),
            last: anchor,
        };
        Some((gesture, clicked))
    }

    /// The rectangle a move to `to` covers
    pub fn rect_to(&self, to: Coord) -> CellRect {
        CellRect::spanning(self.anchor, to)
    }

    /// Cell value every covered cell is overwritten with
    pub fn target_cell(&self, policy: &RankPolicy) -> Cell {
        match self.mode {
            GestureMode::Preferred => policy.preferred_cell(self.rank),
            GestureMode::Unavailable => policy.unavailable_cell(),
        }
    }

    /// Grid for the pointer at `to`: the pre-gesture grid with the
    /// anchor→`to` rectangle painted. Moving back onto the anchor gives the
    /// plain-click result.
    pub fn extend(&mut self, to: Coord, policy: &RankPolicy) -> Grid {
        self.last = to;
        if to == self.anchor {
            return self.clicked.clone();
        }
        let target = self.target_cell(policy);
        self.base.map_rect(self.rect_to(to), |cell| {
            if cell.is_editable() {
                target.clone()
            } else {
                cell.clone()
            }
        })
    }

    /// Last pointer position seen by this gesture
    pub fn last(&self) -> Coord {
        self.last
    }
}
