use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::AppConfig;
use crate::tui::app::App;

pub const TERM_W: u16 = 100;
pub const TERM_H: u16 = 30;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An app on the default hourly layout with the given courses selected
pub fn app_with_courses(courses: &[&str]) -> App {
    let mut config = AppConfig::default();
    config.session.courses = courses.iter().map(|c| c.to_string()).collect();
    App::new(&config)
}

/// Payload with two options; the first books MON-8 and MON-9 for COMP3506
pub fn two_option_payload() -> serde_json::Value {
    serde_json::json!({
        "recommendations": [
            {
                "id": "a",
                "name": "Mornings",
                "score": 0.9,
                "conflicts": 0,
                "grid": [
                    [[{"course_code": "COMP3506"}], [], [], [], []],
                    [[{"course_code": "COMP3506"}], [], [], [], []]
                ]
            },
            {
                "id": "b",
                "name": "Afternoons",
                "score": 0.4,
                "conflicts": 2,
                "grid": []
            }
        ]
    })
}
