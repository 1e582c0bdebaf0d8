use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io::{CONFIG_FILE, write_session};

const CONFIG_TEMPLATE: &str = r##"[server]
url = "http://127.0.0.1:5000"
# timeout_secs = 30

[grid]
layout = "{layout}"          # "hourly" or "half-hourly"
max_preferred_rank = 3
neutral_rank = 3
unavailable_rank = 5
# time_labels = ["8", "9", "10"]
# day_labels = ["MON", "TUE", "WED", "THU", "FRI"]

[session]
semester = "S1"              # S1 or S2
location = "STLUC"           # STLUC, GATTN or HERST
courses = []

# --- UI Customization ---
# Uncomment and edit to override defaults.
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# highlight = "#FB4196"
# preferred_1 = "#16A34A"
# preferred_2 = "#22C55E"
# preferred_3 = "#4ADE80"
# unavailable = "#B91C1C"
# course = "#2563EB"
"##;

/// Render the starter config for the chosen layout
pub fn config_template(half_hourly: bool) -> String {
    let layout = if half_hourly { "half-hourly" } else { "hourly" };
    CONFIG_TEMPLATE.replace("{layout}", layout)
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    init_in(&cwd, &args)?;
    println!("wrote {}", cwd.join(CONFIG_FILE).display());
    Ok(())
}

/// Write the starter config into `dir`, adding any requested courses
pub fn init_in(dir: &Path, args: &InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !args.force {
        return Err(format!("{} already exists (use --force to overwrite)", path.display()).into());
    }
    fs::write(&path, config_template(args.half_hourly))?;

    if !args.courses.is_empty() {
        let mut session = crate::ops::session::Session::from_config(&Default::default());
        for raw in &args.courses {
            session.add_course(raw)?;
        }
        write_session(&path, &session.semester, &session.location, &session.courses)?;
    }
    Ok(())
}
