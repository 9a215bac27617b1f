//! Writing fragments to `<destination>/<event id>.html`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{FetchError, FetchResult};

/// Absolute destination directory, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Resolve `dest` against the current directory. An empty path means the
    /// current directory itself. The directory is not created.
    pub fn resolve(dest: &Path) -> FetchResult<Self> {
        let resolve_err = |source: std::io::Error| FetchError::ResolveDestination {
            path: dest.to_path_buf(),
            source,
        };

        let root = if dest.as_os_str().is_empty() {
            std::env::current_dir().map_err(resolve_err)?
        } else {
            std::path::absolute(dest).map_err(resolve_err)?
        };

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<id>.html`. Leading separators in `id` are dropped so the
    /// file always lands under `root`.
    pub fn path_for(&self, id: &str) -> PathBuf {
        let name = id.trim_start_matches(|c| c == '/' || c == std::path::MAIN_SEPARATOR);
        self.root.join(format!("{name}.html"))
    }

    /// Write `fragment` for event `id`, replacing any previous file.
    pub fn write(&self, id: &str, fragment: &str) -> FetchResult<PathBuf> {
        let path = self.path_for(id);

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| FetchError::OpenOutput {
                path: path.clone(),
                source,
            })?;

        file.write_all(fragment.as_bytes())
            .map_err(|source| FetchError::WriteOutput {
                path: path.clone(),
                source,
            })?;

        // Drop does not report close errors.
        file.sync_all().map_err(|source| FetchError::FlushOutput {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_is_absolute() {
        let out = OutputDir::resolve(Path::new("events")).unwrap();

        assert!(out.root().is_absolute());
        assert!(out.root().ends_with("events"));
    }

    #[test]
    fn test_resolve_empty_is_current_dir() {
        let out = OutputDir::resolve(Path::new("")).unwrap();
        assert_eq!(out.root(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_path_for_appends_html() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::resolve(dir.path()).unwrap();

        assert_eq!(out.path_for("E1"), dir.path().join("E1.html"));
    }

    #[test]
    fn test_path_for_absolute_id_stays_in_destination() {
        let dir = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let out = OutputDir::resolve(dir.path()).unwrap();
        let id = format!("{}/pwned", elsewhere.path().display());

        let path = out.path_for(&id);

        assert!(path.starts_with(dir.path()));
        assert!(!path.starts_with(elsewhere.path()));
        assert!(path.ends_with("pwned.html"));
    }

    #[test]
    fn test_path_for_strips_only_leading_separators() {
        let out = OutputDir::resolve(Path::new("/srv/events")).unwrap();

        assert_eq!(out.path_for("//2020/E1"), Path::new("/srv/events/2020/E1.html"));
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::resolve(dir.path()).unwrap();

        let path = out.write("E1", "<p>Hello</p>").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<p>Hello</p>");
    }

    #[test]
    fn test_write_truncates_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::resolve(dir.path()).unwrap();

        out.write("E1", "a much longer first fragment").unwrap();
        let path = out.write("E1", "short").unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "short");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::resolve(&dir.path().join("missing")).unwrap();

        let err = out.write("E1", "Hello").unwrap_err();
        assert!(matches!(err, FetchError::OpenOutput { .. }));
        assert!(err.to_string().contains("E1.html"));
        assert!(!dir.path().join("missing").exists());
    }
}
