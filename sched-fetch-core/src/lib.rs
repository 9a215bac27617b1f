//! Core pipeline for sched-fetch.
//!
//! Reads a Sched conference schedule (.ics), fetches the page behind each
//! event's URL and stores the page's `sched-content-inner` fragment as
//! `<UID>.html`:
//! - `calendar` turns an .ics file into an ordered list of events
//! - `fragment` fetches pages and cuts out the fragment
//! - `output` writes fragments to the destination directory
//! - `pipeline` runs the three in sequence, stopping at the first error

pub mod calendar;
pub mod error;
pub mod fragment;
pub mod output;
pub mod pipeline;

pub use calendar::{Schedule, ScheduleEvent, load_schedule, parse_schedule};
pub use error::{FetchError, FetchResult};
pub use fragment::{FragmentSelector, HttpSource, PageSource, extract_fragment, fetch_fragment};
pub use output::OutputDir;
pub use pipeline::{Pipeline, RunSummary};
