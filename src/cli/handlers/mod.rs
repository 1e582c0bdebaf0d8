mod init;
pub use init::cmd_init;

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::resolve_config;
use crate::io::state::read_state;
use crate::model::{AppConfig, ViewMode};
use crate::ops::encode::{RecommendRequest, decode_preferences, encode_preferences};
use crate::ops::reconcile::reconcile_str;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.as_deref();
    match cli.command {
        None => crate::tui::run(config_path),
        Some(Commands::Init(args)) => cmd_init(args),
        Some(Commands::Preview(args)) => {
            let (config, _) = load(config_path)?;
            print!("{}", preview(&args, &config)?);
            Ok(())
        }
        Some(Commands::Encode(args)) => {
            let (config, found) = load(config_path)?;
            let dir = state_dir(found.as_deref())?;
            println!("{}", encode(&args, &config, &dir)?);
            Ok(())
        }
    }
}

fn load(
    explicit: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    Ok(resolve_config(explicit, &cwd)?)
}

/// The state file lives next to the config, or in the working directory
fn state_dir(config_path: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match config_path.and_then(Path::parent) {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(std::env::current_dir()?),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Reconcile a saved server response and render every option
pub fn preview(args: &PreviewArgs, config: &AppConfig) -> Result<String, Box<dyn std::error::Error>> {
    let body = fs::read_to_string(&args.file)
        .map_err(|e| format!("could not read {}: {}", args.file.display(), e))?;
    let layout = config.grid.layout();
    let options = reconcile_str(
        &body,
        layout.times(),
        layout.days(),
        &config.grid.policy(),
    )?;

    if args.json {
        let summaries: Vec<OptionJson> = options.iter().map(option_to_json).collect();
        return Ok(format!("{}\n", serde_json::to_string_pretty(&summaries)?));
    }

    if options.is_empty() {
        return Ok("no recommendations\n".to_string());
    }
    let mut out = String::new();
    for (i, option) in options.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format_option_header(option));
        out.push('\n');
        for line in format_grid(&option.grid, &layout, ViewMode::ViewingRecommendation) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    Ok(out)
}

/// Build the request body the TUI would send from the saved preferences
pub fn encode(
    args: &EncodeArgs,
    config: &AppConfig,
    state_dir: &Path,
) -> Result<String, Box<dyn std::error::Error>> {
    let layout = config.grid.layout();
    let policy = config.grid.policy();
    let saved = read_state(state_dir).unwrap_or_default();
    // Round-trip through a grid so stale keys and out-of-range ranks are dropped
    let grid = decode_preferences(&saved.preferences, &layout, &policy);
    let preferences = encode_preferences(&grid, &layout);

    if args.preferences_only {
        return Ok(serde_json::to_string_pretty(&preferences)?);
    }
    let request = RecommendRequest {
        semester: config.session.semester.clone(),
        location: config.session.location.clone(),
        courses: config.session.courses.clone(),
        timetable_preferences: preferences,
    };
    Ok(serde_json::to_string_pretty(&request)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::state::{SavedState, write_state};
    use crate::ops::encode::PreferenceEntry;
    use crate::model::Preference;
    use tempfile::TempDir;

    fn write_payload(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("response.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn preview_renders_each_option() {
        let tmp = TempDir::new().unwrap();
        let file = write_payload(
            tmp.path(),
            r#"{"recommendations": [
                {"id": "a", "name": "Mornings", "score": 0.5, "conflicts": 1,
                 "grid": [[[{"course_code": "COMP3506"}], [], [], [], []]]},
                {"id": "b", "grid": []}
            ]}"#,
        );
        let out = preview(&PreviewArgs { file, json: false }, &AppConfig::default()).unwrap();
        assert!(out.contains("Mornings (a)  score 0.50  1 conflict  1 slot"));
        assert!(out.contains("Recommendation 2 (b)  score 0.00  0 conflicts  0 slots"));
        assert!(out.contains("8 COMP3506  \u{00B7}"));
    }

    #[test]
    fn preview_json_summaries() {
        let tmp = TempDir::new().unwrap();
        let file = write_payload(tmp.path(), "[]");
        let out = preview(&PreviewArgs { file, json: true }, &AppConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["id"], "rec_1");
        assert_eq!(value[0]["booked_slots"], 0);
    }

    #[test]
    fn preview_rejects_unknown_shapes() {
        let tmp = TempDir::new().unwrap();
        let file = write_payload(tmp.path(), "42");
        assert!(preview(&PreviewArgs { file, json: false }, &AppConfig::default()).is_err());
    }

    #[test]
    fn encode_builds_request_from_state() {
        let tmp = TempDir::new().unwrap();
        let mut state = SavedState::default();
        state.preferences.insert(
            "TUE-9".into(),
            PreferenceEntry {
                preference: Preference::Preferred,
                rank: 2,
            },
        );
        state.preferences.insert(
            "SUN-9".into(),
            PreferenceEntry {
                preference: Preference::Unavailable,
                rank: 5,
            },
        );
        write_state(tmp.path(), &state).unwrap();

        let mut config = AppConfig::default();
        config.session.courses = vec!["COMP3506".into()];
        let out = encode(
            &EncodeArgs {
                preferences_only: false,
            },
            &config,
            tmp.path(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["semester"], "S1");
        assert_eq!(value["courses"][0], "COMP3506");
        assert_eq!(value["timetablePreferences"]["TUE-9"]["preference"], "preferred");
        assert_eq!(value["timetablePreferences"]["TUE-9"]["rank"], 2);
        assert!(value["timetablePreferences"].get("SUN-9").is_none());
    }

    #[test]
    fn encode_without_state_is_empty() {
        let tmp = TempDir::new().unwrap();
        let out = encode(
            &EncodeArgs {
                preferences_only: true,
            },
            &AppConfig::default(),
            tmp.path(),
        )
        .unwrap();
        assert_eq!(out, "{}");
    }
}
