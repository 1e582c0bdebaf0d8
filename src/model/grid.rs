use serde::{Deserialize, Serialize};

use super::cell::{Cell, RankPolicy};

/// A grid address: time slot row, day column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub time: usize,
    pub day: usize,
}

impl Coord {
    pub fn new(time: usize, day: usize) -> Self {
        Coord { time, day }
    }
}

/// Axis-aligned, inclusive rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub top_left: Coord,
    pub bottom_right: Coord,
}

impl CellRect {
    /// The rectangle with `a` and `b` as opposite corners
    pub fn spanning(a: Coord, b: Coord) -> Self {
        CellRect {
            top_left: Coord::new(a.time.min(b.time), a.day.min(b.day)),
            bottom_right: Coord::new(a.time.max(b.time), a.day.max(b.day)),
        }
    }

    pub fn contains(&self, c: Coord) -> bool {
        (self.top_left.time..=self.bottom_right.time).contains(&c.time)
            && (self.top_left.day..=self.bottom_right.day).contains(&c.day)
    }

    /// Number of covered cells (never zero)
    pub fn cell_count(&self) -> usize {
        (self.bottom_right.time - self.top_left.time + 1)
            * (self.bottom_right.day - self.top_left.day + 1)
    }

    /// Row-major iteration over every covered coordinate
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.top_left.time..=self.bottom_right.time).flat_map(move |t| {
            (self.top_left.day..=self.bottom_right.day).map(move |d| Coord::new(t, d))
        })
    }
}

/// Row and column labels for a session; their lengths fix the grid dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub time_labels: Vec<String>,
    pub day_labels: Vec<String>,
}

const WEEKDAYS: [&str; 5] = ["MON", "TUE", "WED", "THU", "FRI"];

impl GridLayout {
    /// 11 one-hour slots, 8am to 6pm, Monday to Friday
    pub fn hourly() -> Self {
        let time_labels = (8u32..=18)
            .map(|h| if h > 12 { h - 12 } else { h })
            .map(|h| h.to_string())
            .collect();
        GridLayout {
            time_labels,
            day_labels: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// 28 half-hour slots from 8:00 to 21:30, Monday to Friday
    pub fn half_hourly() -> Self {
        let time_labels = (0..28)
            .map(|i| format!("{}:{:02}", 8 + i / 2, (i % 2) * 30))
            .collect();
        GridLayout {
            time_labels,
            day_labels: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn times(&self) -> usize {
        self.time_labels.len()
    }

    pub fn days(&self) -> usize {
        self.day_labels.len()
    }

    /// Composite `DAY-TIME` key used by the sparse preference encoding
    pub fn key_for(&self, c: Coord) -> Option<String> {
        let day = self.day_labels.get(c.day)?;
        let time = self.time_labels.get(c.time)?;
        Some(format!("{}-{}", day, time))
    }

    /// Inverse of [`GridLayout::key_for`]
    pub fn coord_for_key(&self, key: &str) -> Option<Coord> {
        let (day, time) = key.split_once('-')?;
        let d = self.day_labels.iter().position(|l| l == day)?;
        let t = self.time_labels.iter().position(|l| l == time)?;
        Some(Coord::new(t, d))
    }
}

/// Fixed-size 2-D collection of cells indexed by (time, day).
///
/// Updates never mutate in place: every `with_*` method returns a new grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    times: usize,
    days: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid of default cells
    pub fn new(times: usize, days: usize, policy: &RankPolicy) -> Self {
        Grid {
            times,
            days,
            cells: vec![policy.default_cell(); times * days],
        }
    }

    pub fn for_layout(layout: &GridLayout, policy: &RankPolicy) -> Self {
        Grid::new(layout.times(), layout.days(), policy)
    }

    pub fn times(&self) -> usize {
        self.times
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.time < self.times && c.day < self.days
    }

    fn index(&self, c: Coord) -> Option<usize> {
        self.contains(c).then(|| c.time * self.days + c.day)
    }

    pub fn get(&self, c: Coord) -> Option<&Cell> {
        self.index(c).map(|i| &self.cells[i])
    }

    /// Replace one cell. Out-of-range coordinates leave the grid unchanged.
    pub fn with_cell(&self, c: Coord, cell: Cell) -> Grid {
        let mut next = self.clone();
        if let Some(i) = self.index(c) {
            next.cells[i] = cell;
        }
        next
    }

    /// Apply `f` to every cell in `rect` that lies inside the grid
    pub fn map_rect(&self, rect: CellRect, f: impl Fn(&Cell) -> Cell) -> Grid {
        let mut next = self.clone();
        for c in rect.coords() {
            if let Some(i) = self.index(c) {
                next.cells[i] = f(&self.cells[i]);
            }
        }
        next
    }

    /// Row-major iteration with coordinates
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        let days = self.days;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Coord::new(i / days, i % days), cell))
    }

    /// Cells of one time slot, in day order
    pub fn row(&self, time: usize) -> &[Cell] {
        if time >= self.times {
            return &[];
        }
        &self.cells[time * self.days..(time + 1) * self.days]
    }
}
