use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

const NAVIGATE_HINT: &str = "drag prefer  right-drag block  Enter request  Tab view  q quit";
const ADD_COURSE_HINT: &str = "Enter add  Esc cancel";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if let Some(notice) = app.coordinator.notice() {
        spans.push(Span::styled(
            format!(" {} ", notice.title),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.red)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", notice.body),
            Style::default().fg(app.theme.text).bg(bg),
        ));
    } else if app.coordinator.is_loading() {
        spans.push(Span::styled(
            " Requesting recommendations\u{2026}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }

    let hint = match app.mode {
        Mode::Navigate => NAVIGATE_HINT,
        Mode::AddCourse => ADD_COURSE_HINT,
    };
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use std::time::Instant;

    #[test]
    fn idle_shows_hint_right_aligned() {
        let app = app_with_courses(&[]);
        let output = render_to_string(80, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(output.len(), 80);
        assert!(output.ends_with(NAVIGATE_HINT));
    }

    #[test]
    fn notice_takes_the_left_side() {
        let mut app = app_with_courses(&[]);
        app.request_recommendations(Instant::now());
        let output = render_to_string(100, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.starts_with(" No Courses  Add at least one course first."));
        assert!(output.ends_with(NAVIGATE_HINT));
    }

    #[test]
    fn add_course_hint() {
        let mut app = app_with_courses(&[]);
        app.mode = Mode::AddCourse;
        let output = render_to_string(40, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.ends_with(ADD_COURSE_HINT));
    }
}
