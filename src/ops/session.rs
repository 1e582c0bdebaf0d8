use std::sync::LazyLock;

use regex::Regex;

use crate::model::SessionConfig;

/// Selectable semesters, in cycle order
pub const SEMESTERS: &[(&str, &str)] = &[("S1", "SEMESTER 1"), ("S2", "SEMESTER 2")];

/// Selectable campuses, in cycle order
pub const LOCATIONS: &[(&str, &str)] = &[
    ("STLUC", "ST LUCIA"),
    ("GATTN", "GATTON"),
    ("HERST", "HERSTON"),
];

static COURSE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{2,12}$").expect("valid course code regex"));

/// Why a course was not added
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseRejection {
    #[error("enter a course code first")]
    Empty,
    #[error("{0} is not a valid course code")]
    Invalid(String),
    #[error("{0} is already in your list")]
    Duplicate(String),
}

/// Request selectors and the selected course list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub semester: String,
    pub location: String,
    pub courses: Vec<String>,
}

impl Session {
    pub fn from_config(config: &SessionConfig) -> Self {
        Session {
            semester: config.semester.clone(),
            location: config.location.clone(),
            courses: config.courses.clone(),
        }
    }

    /// Normalize (trim, drop inner spaces, upper-case) and append a course
    pub fn add_course(&mut self, raw: &str) -> Result<String, CourseRejection> {
        let code: String = raw
            .split_whitespace()
            .collect::<String>()
            .to_uppercase();
        if code.is_empty() {
            return Err(CourseRejection::Empty);
        }
        if !COURSE_CODE_RE.is_match(&code) {
            return Err(CourseRejection::Invalid(code));
        }
        if self.courses.contains(&code) {
            return Err(CourseRejection::Duplicate(code));
        }
        self.courses.push(code.clone());
        Ok(code)
    }

    /// Remove the course at `index`, returning it
    pub fn remove_course(&mut self, index: usize) -> Option<String> {
        (index < self.courses.len()).then(|| self.courses.remove(index))
    }

    pub fn cycle_semester(&mut self) {
        self.semester = next_in(SEMESTERS, &self.semester);
    }

    pub fn cycle_location(&mut self) {
        self.location = next_in(LOCATIONS, &self.location);
    }

    pub fn semester_label(&self) -> &str {
        label_in(SEMESTERS, &self.semester)
    }

    pub fn location_label(&self) -> &str {
        label_in(LOCATIONS, &self.location)
    }
}

/// The code after `current`; unknown codes restart at the first entry
fn next_in(choices: &[(&str, &str)], current: &str) -> String {
    let next = choices
        .iter()
        .position(|(code, _)| *code == current)
        .map_or(0, |i| (i + 1) % choices.len());
    choices[next].0.to_string()
}

fn label_in<'a>(choices: &'a [(&'a str, &'a str)], code: &'a str) -> &'a str {
    choices
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(code, |(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::from_config(&SessionConfig::default())
    }

    #[test]
    fn add_course_normalizes() {
        let mut s = session();
        assert_eq!(s.add_course("  comp 3506 ").unwrap(), "COMP3506");
        assert_eq!(s.courses, vec!["COMP3506"]);
    }

    #[test]
    fn add_course_rejections() {
        let mut s = session();
        s.add_course("math1051").unwrap();
        assert_eq!(s.add_course("   "), Err(CourseRejection::Empty));
        assert_eq!(
            s.add_course("MATH1051"),
            Err(CourseRejection::Duplicate("MATH1051".into()))
        );
        assert_eq!(
            s.add_course("csse/2010"),
            Err(CourseRejection::Invalid("CSSE/2010".into()))
        );
        assert_eq!(s.courses.len(), 1);
    }

    #[test]
    fn remove_course_bounds() {
        let mut s = session();
        s.add_course("A1").unwrap();
        assert_eq!(s.remove_course(3), None);
        assert_eq!(s.remove_course(0), Some("A1".into()));
        assert!(s.courses.is_empty());
    }

    #[test]
    fn selectors_cycle_and_wrap() {
        let mut s = session();
        assert_eq!(s.semester_label(), "SEMESTER 1");
        s.cycle_semester();
        assert_eq!(s.semester, "S2");
        s.cycle_semester();
        assert_eq!(s.semester, "S1");

        s.cycle_location();
        assert_eq!(s.location, "GATTN");
        s.cycle_location();
        s.cycle_location();
        assert_eq!(s.location, "STLUC");
        assert_eq!(s.location_label(), "ST LUCIA");
    }

    #[test]
    fn unknown_codes_keep_raw_label() {
        let mut s = session();
        s.location = "EXTERNAL".into();
        assert_eq!(s.location_label(), "EXTERNAL");
        s.cycle_location();
        assert_eq!(s.location, "STLUC");
    }
}
