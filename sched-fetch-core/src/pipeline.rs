//! The archive run: every event of a schedule, in order, fetched and written
//! one at a time. The first failure ends the run.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::calendar::{Schedule, ScheduleEvent, load_schedule};
use crate::error::{FetchError, FetchResult};
use crate::fragment::{FragmentSelector, PageSource, fetch_fragment};
use crate::output::OutputDir;

/// What a completed run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub skipped: usize,
}

impl RunSummary {
    pub fn events_written(&self) -> usize {
        self.written.len()
    }
}

pub struct Pipeline<S> {
    source: S,
    output: OutputDir,
    selector: FragmentSelector,
    strict: bool,
}

impl<S: PageSource> Pipeline<S> {
    pub fn new(source: S, output: OutputDir, selector: FragmentSelector) -> Self {
        Self {
            source,
            output,
            selector,
            strict: false,
        }
    }

    /// Fail instead of writing an empty file when a page has no fragment.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn output(&self) -> &OutputDir {
        &self.output
    }

    pub fn run_file(&self, ics: &Path) -> FetchResult<RunSummary> {
        let schedule = load_schedule(ics)?;
        self.run(schedule)
    }

    pub fn run(&self, schedule: Schedule) -> FetchResult<RunSummary> {
        let mut summary = RunSummary {
            written: Vec::with_capacity(schedule.len()),
            skipped: schedule.skipped(),
        };

        for event in schedule {
            let path = self.archive(&event)?;
            summary.written.push(path);
        }

        Ok(summary)
    }

    fn archive(&self, event: &ScheduleEvent) -> FetchResult<PathBuf> {
        info!(id = %event.id, url = %event.url, "fetching event");

        let fragment = fetch_fragment(&self.source, &event.url, &self.selector, self.strict)
            .map_err(|e| FetchError::Event {
                id: event.id.clone(),
                url: event.url.clone(),
                source: Box::new(e),
            })?;

        let path = self.output.write(&event.id, &fragment)?;
        debug!(path = %path.display(), bytes = fragment.len(), "wrote event");

        Ok(path)
    }
}
