use serde_json::Value;

use crate::model::{Cell, Coord, Grid, Preference, RankPolicy, RecommendationOption};

/// Error type for recommendation payloads that can't be read at all.
///
/// Individual malformed grid positions are never errors; they reconcile to
/// default cells.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response has neither a schedule grid nor a recommendations list")]
    UnrecognizedShape,
}

/// Parse a response body and reconcile it
pub fn reconcile_str(
    body: &str,
    times: usize,
    days: usize,
    policy: &RankPolicy,
) -> Result<Vec<RecommendationOption>, ReconcileError> {
    let payload: Value = serde_json::from_str(body)?;
    reconcile(&payload, times, days, policy)
}

/// Normalize either response shape into an ordered list of options.
///
/// Accepted shapes:
/// - a bare `T × D` schedule (array of rows of position lists)
/// - `{ "recommendations": [ { id?, name?, score?, conflicts?, grid | schedule }, … ] }`
/// - a single variant object carrying `grid` or `schedule`
pub fn reconcile(
    payload: &Value,
    times: usize,
    days: usize,
    policy: &RankPolicy,
) -> Result<Vec<RecommendationOption>, ReconcileError> {
    match payload {
        Value::Array(_) => Ok(vec![RecommendationOption {
            id: synthesized_id(0),
            display_name: synthesized_name(0),
            score: 0.0,
            conflict_count: 0,
            grid: grid_from_schedule(payload, times, days, policy),
        }]),
        Value::Object(map) => {
            if let Some(Value::Array(variants)) = map.get("recommendations") {
                Ok(variants
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| option_from_variant(i, v, times, days, policy))
                    .collect())
            } else {
                option_from_variant(0, payload, times, days, policy)
                    .map(|opt| vec![opt])
                    .ok_or(ReconcileError::UnrecognizedShape)
            }
        }
        _ => Err(ReconcileError::UnrecognizedShape),
    }
}

fn synthesized_id(index: usize) -> String {
    format!("rec_{}", index + 1)
}

fn synthesized_name(index: usize) -> String {
    format!("Recommendation {}", index + 1)
}

fn option_from_variant(
    index: usize,
    variant: &Value,
    times: usize,
    days: usize,
    policy: &RankPolicy,
) -> Option<RecommendationOption> {
    let schedule = variant
        .get("grid")
        .filter(|g| g.is_array())
        .or_else(|| variant.get("schedule").filter(|s| s.is_array()));
    let Some(schedule) = schedule else {
        tracing::debug!(index, "recommendation variant without a grid skipped");
        return None;
    };

    let id = match variant.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => synthesized_id(index),
    };
    let display_name = variant
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| synthesized_name(index));
    let score = variant.get("score").and_then(Value::as_f64).unwrap_or(0.0);
    let conflict_count = variant
        .get("conflicts")
        .and_then(Value::as_u64)
        .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX));

    Some(RecommendationOption {
        id,
        display_name,
        score,
        conflict_count,
        grid: grid_from_schedule(schedule, times, days, policy),
    })
}

/// Build a grid from a `T × D` nested schedule. Positions beyond the grid
/// are ignored; missing or malformed positions stay default.
pub fn grid_from_schedule(schedule: &Value, times: usize, days: usize, policy: &RankPolicy) -> Grid {
    let mut grid = Grid::new(times, days, policy);
    let Some(rows) = schedule.as_array() else {
        return grid;
    };
    for (t, row) in rows.iter().take(times).enumerate() {
        let Some(positions) = row.as_array() else {
            continue;
        };
        for (d, position) in positions.iter().take(days).enumerate() {
            if let Some(cell) = cell_from_position(position, policy) {
                grid = grid.with_cell(Coord::new(t, d), cell);
            }
        }
    }
    grid
}

/// A position is a list of zero or one course records; only the first
/// record is used.
fn cell_from_position(position: &Value, policy: &RankPolicy) -> Option<Cell> {
    let record = position.as_array()?.first()?;
    let course = record
        .get("course_code")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|c| !c.is_empty())?;
    let preference = record
        .get("preferences")
        .and_then(Value::as_str)
        .and_then(Preference::from_wire)
        .unwrap_or(Preference::Preferred);
    let requested = record
        .get("rank")
        .and_then(Value::as_u64)
        .filter(|r| *r > 0)
        .map_or(1, |r| u8::try_from(r).unwrap_or(u8::MAX));
    // Ranks from the wire are brought inside the policy like local edits
    let rank = match preference {
        Preference::Preferred => policy.clamp_preferred(requested),
        Preference::Unavailable => policy.unavailable,
        Preference::Unset => policy.neutral,
    };
    Some(Cell {
        preference,
        rank,
        assigned_course: Some(course.to_string()),
    })
}
