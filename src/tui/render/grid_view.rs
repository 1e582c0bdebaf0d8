use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Coord;
use crate::tui::app::{App, GridGeometry};
use crate::tui::style::style_of;
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the active grid: day header, time labels, one block per cell.
/// Records where the cells landed so mouse input can be mapped back.
pub fn render_grid_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let grid = app.coordinator.active_grid();
    let layout = app.coordinator.layout();
    let view = app.coordinator.view();

    let label_w = layout
        .time_labels
        .iter()
        .map(|l| display_width(l))
        .max()
        .unwrap_or(0) as u16
        + 2;
    let days = grid.days();
    let times = grid.times();
    if days == 0 || times == 0 || area.width <= label_w || area.height < 2 {
        app.grid_geometry = None;
        return;
    }

    let cell_w = (area.width - label_w) / days as u16;
    let cell_h = ((area.height - 1) / times as u16).max(1);
    let visible_times = ((area.height - 1) / cell_h) as usize;
    let geometry = GridGeometry {
        x: area.x + label_w,
        y: area.y + 1,
        cell_w,
        cell_h,
        times: visible_times.min(times),
        days,
    };
    if cell_w < 2 {
        app.grid_geometry = None;
        return;
    }

    // Day header
    let mut header = vec![Span::styled(
        " ".repeat(label_w as usize),
        Style::default().bg(bg),
    )];
    for label in &layout.day_labels {
        let text = truncate_to_width(label, cell_w as usize - 1);
        let pad = (cell_w as usize).saturating_sub(display_width(&text));
        header.push(Span::styled(
            format!("{}{}", text, " ".repeat(pad)),
            Style::default().fg(app.theme.text_bright).bg(bg).add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(header)),
        Rect::new(area.x, area.y, area.width, 1),
    );

    for t in 0..geometry.times {
        let row_y = geometry.y + t as u16 * cell_h;

        // Time label, right-aligned against the first column
        let label = Paragraph::new(format!("{} ", layout.time_labels[t]))
            .alignment(Alignment::Right)
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(label, Rect::new(area.x, row_y, label_w, 1));

        for d in 0..days {
            let coord = Coord::new(t, d);
            let Some(cell) = grid.get(coord) else {
                continue;
            };
            let style = style_of(cell, view);
            let mut block_style = Style::default()
                .fg(app.theme.cell_text)
                .bg(app.theme.fill_color(style.fill));
            if style.hoverable && app.hover == Some(coord) {
                block_style = block_style.add_modifier(Modifier::REVERSED);
            }
            let inner_w = cell_w - 1;
            let text = style
                .label
                .as_deref()
                .map(|l| truncate_to_width(l, inner_w as usize))
                .unwrap_or_default();
            let rect = Rect::new(geometry.x + d as u16 * cell_w, row_y, inner_w, cell_h);
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .style(block_style),
                rect,
            );
        }
    }

    app.grid_geometry = Some(geometry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::gesture::PointerButton;
    use crate::tui::render::test_helpers::*;
    use std::time::Instant;

    #[test]
    fn hourly_grid_layout() {
        let mut app = app_with_courses(&[]);
        let output = render_to_string(60, 12, |frame, area| {
            render_grid_view(frame, &mut app, area);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "    MON        TUE        WED        THU        FRI");
        // Empty cells are blank, so each row trims down to its label
        assert_eq!(lines[1], "  8");
        assert_eq!(lines[5], " 12");
        assert_eq!(lines[6], "  1");
        assert_eq!(lines[11], "  6");

        let geometry = app.grid_geometry.unwrap();
        assert_eq!(geometry.x, 4);
        assert_eq!(geometry.y, 1);
        assert_eq!(geometry.cell_w, 11);
        assert_eq!(geometry.cell_h, 1);
        assert_eq!(geometry.times, 11);
    }

    #[test]
    fn cells_show_labels() {
        let mut app = app_with_courses(&[]);
        app.coordinator.set_rank(2);
        app.coordinator
            .begin_gesture(Coord::new(0, 0), PointerButton::Primary);
        app.coordinator.end_gesture();
        app.coordinator
            .begin_gesture(Coord::new(0, 1), PointerButton::Secondary);
        app.coordinator.end_gesture();
        let output = render_to_string(60, 12, |frame, area| {
            render_grid_view(frame, &mut app, area);
        });
        let row = output.lines().nth(1).unwrap();
        assert!(row.contains("\u{2605}\u{2605}"));
        assert!(row.contains("\u{2715}"));
    }

    #[test]
    fn recommendation_shows_course_codes() {
        let mut app = app_with_courses(&["COMP3506"]);
        app.coordinator
            .complete_request(&two_option_payload(), Instant::now());
        let output = render_to_string(60, 12, |frame, area| {
            render_grid_view(frame, &mut app, area);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].contains("COMP3506"));
        assert!(lines[2].contains("COMP3506"));
        assert!(!lines[3].contains("COMP3506"));
    }

    #[test]
    fn too_small_area_records_no_geometry() {
        let mut app = app_with_courses(&[]);
        render_to_string(5, 1, |frame, area| {
            render_grid_view(frame, &mut app, area);
        });
        assert!(app.grid_geometry.is_none());
    }
}
