use std::time::Instant;

use pretty_assertions::assert_eq;
use serde_json::json;

use slotgrid::model::{Cell, Coord, GridLayout, Preference, RankPolicy, ViewMode};
use slotgrid::ops::cell_ops::{apply_primary, apply_secondary};
use slotgrid::ops::coordinator::Coordinator;
use slotgrid::ops::encode::encode_preferences;
use slotgrid::ops::gesture::PointerButton;
use slotgrid::ops::reconcile::reconcile;

fn policies() -> Vec<RankPolicy> {
    vec![
        RankPolicy::default(),
        RankPolicy {
            max_preferred: 4,
            neutral: 4,
            unavailable: 5,
        },
    ]
}

fn coordinator() -> Coordinator {
    Coordinator::new(GridLayout::hourly(), RankPolicy::default())
}

fn click(c: &mut Coordinator, at: Coord, button: PointerButton) {
    c.begin_gesture(at, button);
    c.end_gesture();
}

#[test]
fn primary_cycle_closes() {
    for policy in policies() {
        for start_rank in 1..=policy.max_preferred {
            let mut cell = policy.default_cell();
            // From rank r the cycle visits r..=max then unset
            let steps = (policy.max_preferred - start_rank + 2) as usize;
            for _ in 0..steps {
                cell = apply_primary(&cell, start_rank, &policy);
            }
            assert_eq!(cell, policy.default_cell());
        }
        let mut cell = policy.default_cell();
        for _ in 0..=policy.max_preferred {
            cell = apply_primary(&cell, 1, &policy);
        }
        assert_eq!(cell, policy.default_cell());
    }
}

#[test]
fn secondary_is_a_toggle() {
    for policy in policies() {
        let unset = policy.default_cell();
        let blocked = apply_secondary(&unset, &policy);
        assert_eq!(blocked, policy.unavailable_cell());
        assert_eq!(apply_secondary(&blocked, &policy), unset);

        // Preferred cells become unavailable regardless of rank
        let preferred = policy.preferred_cell(2);
        assert_eq!(apply_secondary(&preferred, &policy), policy.unavailable_cell());
    }
}

#[test]
fn assigned_cells_ignore_actions() {
    let policy = RankPolicy::default();
    let booked = Cell {
        assigned_course: Some("COMP3506".into()),
        ..policy.preferred_cell(1)
    };
    assert_eq!(apply_primary(&booked, 1, &policy), booked);
    assert_eq!(apply_secondary(&booked, &policy), booked);
}

#[test]
fn drag_paints_exactly_the_rectangle() {
    let mut c = coordinator();
    c.set_rank(2);
    c.begin_gesture(Coord::new(2, 1), PointerButton::Primary);
    c.extend_gesture(Coord::new(3, 2));
    c.extend_gesture(Coord::new(4, 3));
    c.end_gesture();

    let policy = RankPolicy::default();
    for (coord, cell) in c.preferences().iter() {
        let inside = (2..=4).contains(&coord.time) && (1..=3).contains(&coord.day);
        if inside {
            assert_eq!(*cell, policy.preferred_cell(2), "at {:?}", coord);
        } else {
            assert_eq!(*cell, policy.default_cell(), "at {:?}", coord);
        }
    }
}

#[test]
fn reentering_cells_is_idempotent() {
    let mut direct = coordinator();
    direct.begin_gesture(Coord::new(2, 1), PointerButton::Secondary);
    direct.extend_gesture(Coord::new(4, 3));
    direct.end_gesture();

    let mut wandering = coordinator();
    wandering.begin_gesture(Coord::new(2, 1), PointerButton::Secondary);
    for to in [(4, 3), (3, 2), (2, 1), (5, 4), (4, 3), (3, 3), (4, 3)] {
        wandering.extend_gesture(Coord::new(to.0, to.1));
    }
    wandering.end_gesture();

    assert_eq!(wandering.preferences(), direct.preferences());
}

#[test]
fn zero_area_drag_is_a_click() {
    let mut clicked = coordinator();
    click(&mut clicked, Coord::new(5, 2), PointerButton::Primary);

    let mut dragged = coordinator();
    dragged.begin_gesture(Coord::new(5, 2), PointerButton::Primary);
    dragged.extend_gesture(Coord::new(6, 3));
    dragged.extend_gesture(Coord::new(5, 2));
    dragged.end_gesture();

    assert_eq!(dragged.preferences(), clicked.preferences());
}

#[test]
fn single_and_wrapped_payloads_reconcile_equal() {
    let policy = RankPolicy::default();
    let schedule = json!([
        [[{"course_code": "COMP3506"}], [], []],
        [[], [{"course_code": "MATH1051", "preferences": "unavailable", "rank": 5}], []],
    ]);
    let wrapped = json!({"recommendations": [{"grid": schedule.clone()}]});

    let single = reconcile(&schedule, 2, 3, &policy).unwrap();
    let multi = reconcile(&wrapped, 2, 3, &policy).unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(multi.len(), 1);
    assert_eq!(single[0].grid, multi[0].grid);
}

#[test]
fn empty_positions_stay_default() {
    let policy = RankPolicy::default();
    let payload = json!([[[], [{"course_code": ""}], [{"rank": 2}], "junk"]]);
    let options = reconcile(&payload, 1, 4, &policy).unwrap();
    for (_, cell) in options[0].grid.iter() {
        assert_eq!(*cell, policy.default_cell());
    }
}

#[test]
fn editing_after_viewing_leaves_recommendation_untouched() {
    let mut c = coordinator();
    let payload = json!({"recommendations": [
        {"id": "x", "grid": [[[{"course_code": "COMP3506"}]]]}
    ]});
    c.complete_request(&payload, Instant::now());
    assert_eq!(c.view(), ViewMode::ViewingRecommendation);
    let before = c.recommendation().clone();

    c.set_view(ViewMode::EditingPreferences);
    c.begin_gesture(Coord::new(0, 0), PointerButton::Primary);
    c.extend_gesture(Coord::new(3, 4));
    c.end_gesture();

    assert_eq!(*c.recommendation(), before);
    assert_eq!(
        c.preferences().get(Coord::new(0, 0)).unwrap().preference,
        Preference::Preferred
    );
}

#[test]
fn click_cycle_end_to_end() {
    let mut c = coordinator();
    let at = Coord::new(0, 0);
    let expected = [
        (Preference::Preferred, 1),
        (Preference::Preferred, 2),
        (Preference::Preferred, 3),
        (Preference::Unset, 3),
    ];
    for (preference, rank) in expected {
        click(&mut c, at, PointerButton::Primary);
        let cell = c.preferences().get(at).unwrap();
        assert_eq!((cell.preference, cell.rank), (preference, rank));
    }
}

#[test]
fn request_body_is_sparse() {
    let mut c = coordinator();
    click(&mut c, Coord::new(0, 0), PointerButton::Primary);
    click(&mut c, Coord::new(10, 4), PointerButton::Secondary);

    let body = c.start_request("S1", "STLUC", &["COMP3506".to_string()]);
    assert!(c.is_loading());
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(
        value,
        json!({
            "semester": "S1",
            "location": "STLUC",
            "courses": ["COMP3506"],
            "timetablePreferences": {
                "MON-8": {"preference": "preferred", "rank": 1},
                "FRI-6": {"preference": "unavailable", "rank": 5}
            }
        })
    );
    assert_eq!(encode_preferences(c.preferences(), c.layout()).len(), 2);
}

#[test]
fn failed_request_changes_no_grid() {
    let mut c = coordinator();
    c.complete_request(
        &json!({"recommendations": [{"id": "x", "grid": [[[{"course_code": "A1"}]]]}]}),
        Instant::now(),
    );
    c.set_view(ViewMode::EditingPreferences);
    click(&mut c, Coord::new(1, 1), PointerButton::Primary);
    let prefs = c.preferences().clone();
    let rec = c.recommendation().clone();

    c.start_request("S1", "STLUC", &["A1".to_string()]);
    c.fail_request("connection refused", Instant::now());

    assert!(!c.is_loading());
    assert_eq!(*c.preferences(), prefs);
    assert_eq!(*c.recommendation(), rec);
    assert_eq!(c.selected_option().unwrap().id, "x");
    assert_eq!(c.notice().unwrap().title, "Recommendation Failed");
}
