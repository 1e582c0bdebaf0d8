use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde_json::Value;

use crate::model::{Coord, Grid, GridLayout, RankPolicy, RecommendationOption, ViewMode};

use super::encode::{RecommendRequest, encode_preferences};
use super::gesture::{PointerButton, SelectionGesture};
use super::reconcile::reconcile;

/// How long a notice stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// A transient, user-visible message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub raised_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.raised_at) >= NOTICE_TTL
    }
}

/// Owns both grids, the live gesture and the loaded recommendation options,
/// and routes every user operation according to the current view.
#[derive(Debug, Clone)]
pub struct Coordinator {
    layout: GridLayout,
    policy: RankPolicy,
    preferences: Grid,
    recommendation: Grid,
    options: IndexMap<String, RecommendationOption>,
    selected: Option<String>,
    view: ViewMode,
    current_rank: u8,
    gesture: Option<SelectionGesture>,
    pending_requests: usize,
    notice: Option<Notice>,
}

impl Coordinator {
    pub fn new(layout: GridLayout, policy: RankPolicy) -> Self {
        let preferences = Grid::for_layout(&layout, &policy);
        Coordinator {
            recommendation: preferences.clone(),
            preferences,
            layout,
            policy,
            options: IndexMap::new(),
            selected: None,
            view: ViewMode::EditingPreferences,
            current_rank: 1,
            gesture: None,
            pending_requests: 0,
            notice: None,
        }
    }

    /// Replace the preferences grid wholesale (state restore).
    /// Grids of the wrong dimensions are ignored.
    pub fn restore_preferences(&mut self, grid: Grid) -> bool {
        if grid.times() != self.layout.times() || grid.days() != self.layout.days() {
            return false;
        }
        self.preferences = grid;
        true
    }

    // --- Accessors ---

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn policy(&self) -> &RankPolicy {
        &self.policy
    }

    pub fn preferences(&self) -> &Grid {
        &self.preferences
    }

    pub fn recommendation(&self) -> &Grid {
        &self.recommendation
    }

    /// The grid for the current view
    pub fn active_grid(&self) -> &Grid {
        match self.view {
            ViewMode::EditingPreferences => &self.preferences,
            ViewMode::ViewingRecommendation => &self.recommendation,
        }
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn current_rank(&self) -> u8 {
        self.current_rank
    }

    pub fn options(&self) -> impl Iterator<Item = &RecommendationOption> {
        self.options.values()
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn selected_option(&self) -> Option<&RecommendationOption> {
        self.selected.as_ref().and_then(|id| self.options.get(id))
    }

    pub fn gesture(&self) -> Option<&SelectionGesture> {
        self.gesture.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_requests > 0
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    // --- View mode ---

    /// Explicit tab selection. Neither grid is discarded; a live gesture ends.
    pub fn set_view(&mut self, view: ViewMode) {
        if self.view != view {
            self.end_gesture();
            self.view = view;
        }
    }

    // --- Preferences editing ---

    /// Set the rank used by future primary actions. Out-of-range ranks are ignored.
    pub fn set_rank(&mut self, rank: u8) -> bool {
        if !self.policy.is_preferred_rank(rank) {
            return false;
        }
        self.current_rank = rank;
        true
    }

    /// Reset every preference cell to default
    pub fn clear_preferences(&mut self) {
        self.end_gesture();
        self.preferences = Grid::for_layout(&self.layout, &self.policy);
    }

    /// Pointer-down on `at`. Ignored in the read-only view or outside the grid.
    /// A press while a gesture is live leaves that gesture in charge until
    /// release.
    pub fn begin_gesture(&mut self, at: Coord, button: PointerButton) -> bool {
        if self.view.is_read_only() || self.gesture.is_some() {
            return false;
        }
        match SelectionGesture::begin(
            &self.preferences,
            at,
            button,
            self.current_rank,
            &self.policy,
        ) {
            Some((gesture, grid)) => {
                self.preferences = grid;
                self.gesture = Some(gesture);
                true
            }
            None => false,
        }
    }

    /// Pointer entered `at` while the button is held. Leaving the grid ends
    /// the gesture.
    pub fn extend_gesture(&mut self, at: Coord) {
        if self.view.is_read_only() {
            return;
        }
        if !self.preferences.contains(at) {
            self.end_gesture();
            return;
        }
        if let Some(gesture) = &mut self.gesture
            && gesture.last() != at
        {
            self.preferences = gesture.extend(at, &self.policy);
        }
    }

    /// Pointer released
    pub fn end_gesture(&mut self) {
        self.gesture = None;
    }

    // --- Recommendations ---

    /// Build the outbound request and mark it pending
    pub fn start_request(
        &mut self,
        semester: &str,
        location: &str,
        courses: &[String],
    ) -> RecommendRequest {
        self.pending_requests += 1;
        RecommendRequest {
            semester: semester.to_string(),
            location: location.to_string(),
            courses: courses.to_vec(),
            timetable_preferences: encode_preferences(&self.preferences, &self.layout),
        }
    }

    /// Reconcile a response body and install it, or surface a failure.
    /// The recommendation state is replaced completely or not at all.
    pub fn complete_request(&mut self, payload: &Value, now: Instant) {
        match reconcile(
            payload,
            self.layout.times(),
            self.layout.days(),
            &self.policy,
        ) {
            Ok(options) => self.install_options(options, now),
            Err(e) => self.fail_request(&e.to_string(), now),
        }
    }

    /// Install reconciled options. The first becomes selected and the view
    /// switches to the recommendation. An empty list is reported instead.
    pub fn install_options(&mut self, options: Vec<RecommendationOption>, now: Instant) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
        if options.is_empty() {
            self.notify("No Recommendations", "The server returned no timetables.", now);
            return;
        }

        let mut by_id = IndexMap::with_capacity(options.len());
        for mut option in options {
            if by_id.contains_key(&option.id) {
                option.id = unique_id(&by_id, &option.id);
            }
            by_id.insert(option.id.clone(), option);
        }
        tracing::info!(options = by_id.len(), "recommendations loaded");

        let first = by_id.keys().next().cloned();
        self.options = by_id;
        self.selected = None;
        if let Some(id) = first {
            self.select_option(&id);
        }
        self.set_view(ViewMode::ViewingRecommendation);
    }

    /// `onRequestFailure`: show a notice, leave every grid untouched
    pub fn fail_request(&mut self, reason: &str, now: Instant) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
        tracing::warn!(reason, "recommendation request failed");
        self.notify("Recommendation Failed", reason, now);
    }

    /// Switch the active recommendation. Unknown ids change nothing.
    pub fn select_option(&mut self, id: &str) -> bool {
        let Some(option) = self.options.get(id) else {
            return false;
        };
        self.recommendation = option.grid.clone();
        self.selected = Some(option.id.clone());
        tracing::debug!(id, "recommendation selected");
        true
    }

    /// Select the option `delta` places after the current one, wrapping
    pub fn cycle_option(&mut self, delta: isize) -> bool {
        let len = self.options.len();
        if len == 0 {
            return false;
        }
        let current = self
            .selected
            .as_ref()
            .and_then(|id| self.options.get_index_of(id))
            .unwrap_or(0);
        let next = (current as isize + delta).rem_euclid(len as isize) as usize;
        match self.options.get_index(next) {
            Some((id, _)) => {
                let id = id.clone();
                self.select_option(&id)
            }
            None => false,
        }
    }

    // --- Notices ---

    pub fn notify(&mut self, title: &str, body: &str, now: Instant) {
        self.notice = Some(Notice {
            title: title.to_string(),
            body: body.to_string(),
            raised_at: now,
        });
    }

    /// Drop the notice once its time is up
    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }
}

fn unique_id(taken: &IndexMap<String, RecommendationOption>, id: &str) -> String {
    (2..)
        .map(|n| format!("{}#{}", id, n))
        .find(|candidate| !taken.contains_key(candidate))
        .unwrap_or_else(|| id.to_string())
}
