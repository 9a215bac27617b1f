use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;

/// Long flags that may also be spelled with a single dash (`-ics path`,
/// `-destination=path`), the way the tool has always been invoked.
const LONG_FLAGS: &[&str] = &["ics", "destination", "strict"];

#[derive(Parser, Debug)]
#[command(name = "fetch-events")]
#[command(about = "Fetch the page of every event in a Sched .ics schedule and store its session fragment as <UID>.html")]
#[command(version)]
pub struct Cli {
    /// The path to a local schedule '.ics' file
    #[arg(long, allow_hyphen_values = true)]
    pub ics: Option<PathBuf>,

    /// The folder where event data from the schedule will be written
    #[arg(long, allow_hyphen_values = true)]
    pub destination: Option<PathBuf>,

    /// Fail when an event page has no sched-content-inner element
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Unset means empty, which fails when the file is opened.
    pub fn ics_path(&self) -> &Path {
        self.ics.as_deref().unwrap_or(Path::new(""))
    }

    /// Unset means empty, which resolves to the current directory.
    pub fn destination_path(&self) -> &Path {
        self.destination.as_deref().unwrap_or(Path::new(""))
    }
}

/// Rewrite `-flag` / `-flag=value` to `--flag` / `--flag=value` for known
/// long flags. Everything else passes through untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| if i == 0 { arg } else { normalize_arg(arg) })
        .collect()
}

fn normalize_arg(arg: OsString) -> OsString {
    let Some(s) = arg.to_str() else {
        return arg;
    };

    let Some(rest) = s.strip_prefix('-') else {
        return arg;
    };
    if rest.starts_with('-') {
        return arg;
    }

    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    if LONG_FLAGS.contains(&name) {
        OsString::from(format!("-{s}"))
    } else {
        arg
    }
}
