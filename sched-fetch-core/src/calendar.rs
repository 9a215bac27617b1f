//! Schedule loading: read an .ics file and reduce it to the events we archive.
//!
//! Only VEVENT components matter. Everything else in the calendar (VTIMEZONE,
//! VTODO, ...) is skipped without error.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use icalendar::parser::{Component, read_calendar, unfold};

use crate::error::{FetchError, FetchResult};

/// One schedule entry: the event's UID and the URL of its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEvent {
    pub id: String,
    pub url: String,
}

/// The events of a calendar in document order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Schedule {
    events: Vec<ScheduleEvent>,
    skipped: usize,
}

impl Schedule {
    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of top-level components that were not events.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl IntoIterator for Schedule {
    type Item = ScheduleEvent;
    type IntoIter = std::vec::IntoIter<ScheduleEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

/// Open and parse the calendar at `path`.
///
/// The file handle is closed before this returns, whether parsing succeeded
/// or not.
pub fn load_schedule(path: &Path) -> FetchResult<Schedule> {
    let bytes = read_file(path)?;

    let content = String::from_utf8(bytes).map_err(|e| FetchError::ParseCalendar {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_schedule(&content).map_err(|reason| FetchError::ParseCalendar {
        path: path.to_path_buf(),
        reason,
    })
}

fn read_file(path: &Path) -> FetchResult<Vec<u8>> {
    let open_err = |source: std::io::Error| FetchError::OpenCalendar {
        path: PathBuf::from(path),
        source,
    };

    let mut file = File::open(path).map_err(open_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(open_err)?;
    Ok(bytes)
}

/// Parse calendar text into a [`Schedule`].
pub fn parse_schedule(content: &str) -> Result<Schedule, String> {
    let content = content.trim_start_matches('\u{feff}');
    if !content.trim_start().starts_with("BEGIN:VCALENDAR") {
        return Err("missing BEGIN:VCALENDAR".to_string());
    }

    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| e.to_string())?;

    let mut schedule = Schedule::default();
    for component in &calendar.components {
        match to_schedule_event(component) {
            Some(event) => schedule.events.push(event),
            None => schedule.skipped += 1,
        }
    }

    Ok(schedule)
}

fn to_schedule_event(component: &Component) -> Option<ScheduleEvent> {
    if component.name != "VEVENT" {
        return None;
    }

    Some(ScheduleEvent {
        id: prop_or_empty(component, "UID"),
        url: prop_or_empty(component, "URL"),
    })
}

/// Missing properties read as empty strings.
fn prop_or_empty(component: &Component, name: &str) -> String {
    component
        .find_prop(name)
        .map(|p| p.val.to_string())
        .unwrap_or_default()
}
