use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::client::{RecommendClient, RequestEvent, RequestRunner};
use crate::io::config_io::{resolve_config, write_session};
use crate::io::state::{SavedState, read_state, write_state};
use crate::model::{AppConfig, Coord};
use crate::ops::coordinator::Coordinator;
use crate::ops::encode::{decode_preferences, encode_preferences};
use crate::ops::session::Session;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a course code into the sidebar prompt
    AddCourse,
}

/// Where the grid was last drawn, for mapping mouse positions to cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Top-left of the first cell (below the header, right of the labels)
    pub x: u16,
    pub y: u16,
    pub cell_w: u16,
    pub cell_h: u16,
    /// Rows that fit on screen
    pub times: usize,
    pub days: usize,
}

impl GridGeometry {
    pub fn hit(&self, col: u16, row: u16) -> Option<Coord> {
        if col < self.x || row < self.y || self.cell_w == 0 || self.cell_h == 0 {
            return None;
        }
        let day = ((col - self.x) / self.cell_w) as usize;
        let time = ((row - self.y) / self.cell_h) as usize;
        (day < self.days && time < self.times).then(|| Coord::new(time, day))
    }
}

/// Main application state
pub struct App {
    pub coordinator: Coordinator,
    pub session: Session,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Text typed into the add-course prompt
    pub course_input: String,
    /// Highlighted entry in the course list
    pub course_cursor: usize,
    /// Set by the grid renderer each frame
    pub grid_geometry: Option<GridGeometry>,
    /// Cell under the pointer
    pub hover: Option<Coord>,
    /// Config file that session edits are written back to
    pub config_path: Option<PathBuf>,
    /// Directory holding the state file
    pub state_dir: Option<PathBuf>,
    client: Option<RecommendClient>,
    runner: RequestRunner,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let client = match RecommendClient::new(&config.server) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "recommendation client unavailable");
                None
            }
        };
        App {
            coordinator: Coordinator::new(config.grid.layout(), config.grid.policy()),
            session: Session::from_config(&config.session),
            theme: Theme::from_colors(&config.ui.colors),
            mode: Mode::Navigate,
            should_quit: false,
            course_input: String::new(),
            course_cursor: 0,
            grid_geometry: None,
            hover: None,
            config_path: None,
            state_dir: None,
            client,
            runner: RequestRunner::new(),
        }
    }

    /// Send the current preferences and courses to the service.
    /// Refused locally when no course is selected.
    pub fn request_recommendations(&mut self, now: Instant) {
        if self.session.courses.is_empty() {
            self.coordinator
                .notify("No Courses", "Add at least one course first.", now);
            return;
        }
        let Some(client) = self.client.clone() else {
            self.coordinator.notify(
                "Recommendation Failed",
                "The recommendation client could not be created.",
                now,
            );
            return;
        };
        let request = self.coordinator.start_request(
            &self.session.semester,
            &self.session.location,
            &self.session.courses,
        );
        self.runner.spawn(client, request);
    }

    /// Apply finished requests and expire stale notices
    pub fn tick(&mut self, now: Instant) {
        for evt in self.runner.poll() {
            match evt {
                RequestEvent::Completed(payload) => self.coordinator.complete_request(&payload, now),
                RequestEvent::Failed(reason) => self.coordinator.fail_request(&reason, now),
            }
        }
        self.coordinator.expire_notice(now);
    }

    pub fn add_course(&mut self, now: Instant) {
        let raw = std::mem::take(&mut self.course_input);
        match self.session.add_course(&raw) {
            Ok(code) => {
                self.course_cursor = self.session.courses.len() - 1;
                tracing::info!(course = %code, "course added");
                self.persist_session(now);
            }
            Err(rejection) => {
                self.coordinator
                    .notify("Course Not Added", &rejection.to_string(), now);
            }
        }
    }

    pub fn remove_selected_course(&mut self, now: Instant) {
        if let Some(code) = self.session.remove_course(self.course_cursor) {
            tracing::info!(course = %code, "course removed");
            self.course_cursor = self
                .course_cursor
                .min(self.session.courses.len().saturating_sub(1));
            self.persist_session(now);
        }
    }

    pub fn move_course_cursor(&mut self, delta: isize) {
        let len = self.session.courses.len();
        if len == 0 {
            self.course_cursor = 0;
            return;
        }
        let next = (self.course_cursor as isize + delta).clamp(0, len as isize - 1);
        self.course_cursor = next as usize;
    }

    /// Write the session selectors and course list back to the config file
    pub fn persist_session(&mut self, now: Instant) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = write_session(
            path,
            &self.session.semester,
            &self.session.location,
            &self.session.courses,
        ) {
            tracing::warn!(error = %e, "could not save session");
            self.coordinator
                .notify("Session Not Saved", &e.to_string(), now);
        }
    }
}

/// Restore the preferences grid and rank from the state file
pub fn restore_state(app: &mut App) {
    let Some(dir) = &app.state_dir else {
        return;
    };
    let Some(saved) = read_state(dir) else {
        return;
    };
    let layout = app.coordinator.layout().clone();
    let policy = *app.coordinator.policy();
    let grid = decode_preferences(&saved.preferences, &layout, &policy);
    if app.coordinator.restore_preferences(grid) {
        tracing::info!(cells = saved.preferences.len(), "preferences restored");
    }
    if let Some(rank) = saved.rank {
        app.coordinator.set_rank(rank);
    }
}

/// Save the preferences grid and rank to the state file
pub fn save_state(app: &App) {
    let Some(dir) = &app.state_dir else {
        return;
    };
    let state = SavedState {
        saved_at: Some(chrono::Utc::now()),
        rank: Some(app.coordinator.current_rank()),
        preferences: encode_preferences(app.coordinator.preferences(), app.coordinator.layout()),
    };
    if let Err(e) = write_state(dir, &state) {
        tracing::warn!(error = %e, "could not save state");
    }
}

/// Run the TUI application
pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let (config, found) = resolve_config(config_path, &cwd)?;

    let mut app = App::new(&config);
    app.state_dir = Some(
        found
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone()),
    );
    app.config_path = found.or_else(|| config_path.map(Path::to_path_buf));
    restore_state(&mut app);
    tracing::info!(
        times = app.coordinator.layout().times(),
        days = app.coordinator.layout().days(),
        config = ?app.config_path,
        "starting"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    save_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_saved = app.coordinator.preferences().clone();
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key, Instant::now());
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        // Save once a gesture settles
        if app.coordinator.gesture().is_none() && *app.coordinator.preferences() != last_saved {
            save_state(app);
            last_saved = app.coordinator.preferences().clone();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
