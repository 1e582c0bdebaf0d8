use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::model::ViewMode;
use crate::ops::gesture::PointerButton;

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    match app.mode {
        Mode::Navigate => handle_navigate(app, key, now),
        Mode::AddCourse => handle_add_course(app, key, now),
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        // View tabs
        KeyCode::Tab | KeyCode::BackTab => {
            let next = app.coordinator.view().toggled();
            app.coordinator.set_view(next);
        }
        KeyCode::Char('p') => app.coordinator.set_view(ViewMode::EditingPreferences),
        KeyCode::Char('r') => app.coordinator.set_view(ViewMode::ViewingRecommendation),

        // Rank selector
        KeyCode::Char(c @ '1'..='9') => {
            let rank = c as u8 - b'0';
            app.coordinator.set_rank(rank);
        }
        KeyCode::Char('c') => {
            if app.coordinator.view() == ViewMode::EditingPreferences {
                app.coordinator.clear_preferences();
            }
        }

        // Courses
        KeyCode::Char('a') => {
            app.course_input.clear();
            app.mode = Mode::AddCourse;
        }
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected_course(now),
        KeyCode::Char('j') | KeyCode::Down => app.move_course_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_course_cursor(-1),

        // Selectors
        KeyCode::Char('s') => {
            app.session.cycle_semester();
            app.persist_session(now);
        }
        KeyCode::Char('l') => {
            app.session.cycle_location();
            app.persist_session(now);
        }

        // Recommendations
        KeyCode::Enter | KeyCode::Char('g') => app.request_recommendations(now),
        KeyCode::Char(']') | KeyCode::Right => {
            app.coordinator.cycle_option(1);
        }
        KeyCode::Char('[') | KeyCode::Left => {
            app.coordinator.cycle_option(-1);
        }
        _ => {}
    }
}

fn handle_add_course(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Enter => {
            app.add_course(now);
            app.mode = Mode::Navigate;
        }
        KeyCode::Esc => {
            app.course_input.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            app.course_input.pop();
        }
        KeyCode::Char(c) => app.course_input.push(c),
        _ => {}
    }
}

/// Route pointer events to the selection gesture
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let hit = app
        .grid_geometry
        .and_then(|g| g.hit(mouse.column, mouse.row));
    match mouse.kind {
        MouseEventKind::Down(button) => {
            let button = match button {
                MouseButton::Left => PointerButton::Primary,
                MouseButton::Right => PointerButton::Secondary,
                MouseButton::Middle => return,
            };
            if let Some(at) = hit {
                app.coordinator.begin_gesture(at, button);
            }
        }
        MouseEventKind::Drag(_) => match hit {
            Some(at) => app.coordinator.extend_gesture(at),
            None => app.coordinator.end_gesture(),
        },
        MouseEventKind::Up(_) => app.coordinator.end_gesture(),
        MouseEventKind::Moved => app.hover = hit,
        _ => {}
    }
}
