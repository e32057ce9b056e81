use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::{CfError, Result};

/// File name, inside the config directory, of the previous-kubeconfig record.
pub const PREVIOUS_FILE: &str = "previous";

/// Remembers which kubeconfig was active before the last switch.
#[derive(Debug, Clone)]
pub struct History {
    path: PathBuf,
}

impl History {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the record with `previous`, creating the config directory on first use.
    pub fn record_previous(&self, previous: &Path) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(CfError::io(format!("creating {}", parent.display())))?;
        }
        fs::write(&self.path, previous.as_os_str().as_encoded_bytes())
            .map_err(CfError::io(format!("writing {}", self.path.display())))?;
        debug!(file = %self.path().display(), previous = %previous.display(), "recorded previous kubeconfig");
        Ok(())
    }

    /// Reads the recorded path. An absent or empty record is `NotFound`.
    pub fn read_previous(&self) -> Result<PathBuf> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CfError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(CfError::io(format!("reading {}", self.path.display()))(e)),
        };
        if raw.is_empty() {
            return Err(CfError::NotFound(self.path.clone()));
        }
        path_from_bytes(raw).map_err(CfError::io(format!("decoding {}", self.path.display())))
    }
}

#[cfg(unix)]
fn path_from_bytes(raw: Vec<u8>) -> io::Result<PathBuf> {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt};
    Ok(PathBuf::from(OsString::from_vec(raw)))
}

#[cfg(not(unix))]
fn path_from_bytes(raw: Vec<u8>) -> io::Result<PathBuf> {
    String::from_utf8(raw)
        .map(PathBuf::from)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_record_is_not_found() {
        let dir = TempDir::new().unwrap();
        let history = History::new(dir.path().join("cf").join(PREVIOUS_FILE));
        assert!(history.read_previous().unwrap_err().is_not_found());
    }

    #[test]
    fn record_overwrites() {
        let dir = TempDir::new().unwrap();
        let history = History::new(dir.path().join("cf").join(PREVIOUS_FILE));

        history.record_previous(Path::new("/k/a.yaml")).unwrap();
        assert_eq!(history.read_previous().unwrap(), PathBuf::from("/k/a.yaml"));

        history.record_previous(Path::new("/k/b.yaml")).unwrap();
        assert_eq!(history.read_previous().unwrap(), PathBuf::from("/k/b.yaml"));
        assert_eq!(fs::read_to_string(history.path()).unwrap(), "/k/b.yaml");
    }

    #[test]
    fn empty_record_is_not_found() {
        let dir = TempDir::new().unwrap();
        let history = History::new(dir.path().join(PREVIOUS_FILE));
        history.record_previous(Path::new("")).unwrap();
        assert!(history.read_previous().unwrap_err().is_not_found());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path_round_trips() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};
        let dir = TempDir::new().unwrap();
        let history = History::new(dir.path().join(PREVIOUS_FILE));
        let odd = Path::new(OsStr::from_bytes(b"/k/caf\xe9.yaml"));
        history.record_previous(odd).unwrap();
        assert_eq!(history.read_previous().unwrap(), odd);
    }

    #[test]
    fn unreadable_record_is_io_error() {
        let dir = TempDir::new().unwrap();
        let history = History::new(dir.path());
        assert!(matches!(history.read_previous(), Err(CfError::Io { .. })));
    }
}
