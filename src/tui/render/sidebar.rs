use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

/// Render selectors, rank, course list and recommendation options
pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let text = Style::default().fg(app.theme.text).bg(bg);
    let bright = Style::default().fg(app.theme.text_bright).bg(bg);
    let heading = Style::default()
        .fg(app.theme.purple)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let inner_w = area.width.saturating_sub(3) as usize;

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Semester ", dim),
        Span::styled(app.session.semester_label().to_string(), bright),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Campus   ", dim),
        Span::styled(app.session.location_label().to_string(), bright),
    ]));

    // Rank selector: filled stars up to the current rank
    let policy = app.coordinator.policy();
    let rank = app.coordinator.current_rank();
    let mut rank_spans = vec![Span::styled("Rank     ", dim)];
    for r in 1..=policy.max_preferred {
        let style = if r == rank {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            text
        };
        rank_spans.push(Span::styled(r.to_string(), style));
        rank_spans.push(Span::styled(" ", text));
    }
    lines.push(Line::from(rank_spans));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled("Courses", heading)));
    if app.session.courses.is_empty() && app.mode != Mode::AddCourse {
        lines.push(Line::from(Span::styled("  none (a to add)", dim)));
    }
    for (i, course) in app.session.courses.iter().enumerate() {
        let selected = i == app.course_cursor && app.mode == Mode::Navigate;
        let (marker, style) = if selected {
            ("\u{25B8} ", bright.bg(app.theme.selection_bg))
        } else {
            ("  ", text)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, truncate_to_width(course, inner_w)),
            style,
        )));
    }
    if app.mode == Mode::AddCourse {
        lines.push(Line::from(vec![
            Span::styled("+ ", Style::default().fg(app.theme.highlight).bg(bg)),
            Span::styled(app.course_input.clone(), bright),
            Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
        ]));
    }
    lines.push(Line::default());

    lines.push(Line::from(Span::styled("Options", heading)));
    if app.coordinator.option_count() == 0 {
        lines.push(Line::from(Span::styled("  none yet (Enter)", dim)));
    }
    let selected_id = app.coordinator.selected_option().map(|o| o.id.as_str());
    for option in app.coordinator.options() {
        let is_selected = selected_id == Some(option.id.as_str());
        let (marker, style) = if is_selected {
            ("\u{25B8} ", bright.add_modifier(Modifier::BOLD))
        } else {
            ("  ", text)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, truncate_to_width(&option.display_name, inner_w)),
            style,
        )));
        let conflicts = match option.conflict_count {
            1 => "1 conflict".to_string(),
            n => format!("{} conflicts", n),
        };
        let conflict_style = if option.conflict_count > 0 {
            Style::default().fg(app.theme.red).bg(bg)
        } else {
            dim
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  score {:.2}  ", option.score), dim),
            Span::styled(conflicts, conflict_style),
        ]));
    }

    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(dim)
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use std::time::Instant;

    fn render(app: &App) -> String {
        render_to_string(30, 20, |frame, area| render_sidebar(frame, app, area))
    }

    #[test]
    fn empty_session() {
        let app = app_with_courses(&[]);
        let output = render(&app);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "\u{2502}Semester SEMESTER 1");
        assert_eq!(lines[1], "\u{2502}Campus   ST LUCIA");
        assert_eq!(lines[2], "\u{2502}Rank     1 2 3");
        assert!(output.contains("none (a to add)"));
        assert!(output.contains("none yet (Enter)"));
    }

    #[test]
    fn courses_with_cursor() {
        let mut app = app_with_courses(&["COMP3506", "MATH1051"]);
        app.course_cursor = 1;
        let output = render(&app);
        assert!(output.contains("\u{2502}  COMP3506"));
        assert!(output.contains("\u{2502}\u{25B8} MATH1051"));
    }

    #[test]
    fn add_prompt_shows_input() {
        let mut app = app_with_courses(&[]);
        app.mode = Mode::AddCourse;
        app.course_input = "csse".into();
        let output = render(&app);
        assert!(output.contains("+ csse\u{258C}"));
        assert!(!output.contains("none (a to add)"));
    }

    #[test]
    fn options_with_metadata() {
        let mut app = app_with_courses(&["COMP3506"]);
        app.coordinator
            .complete_request(&two_option_payload(), Instant::now());
        let output = render(&app);
        assert!(output.contains("\u{25B8} Mornings"));
        assert!(output.contains("  Afternoons"));
        assert!(output.contains("score 0.90  0 conflicts"));
        assert!(output.contains("score 0.40  2 conflicts"));
    }
}
