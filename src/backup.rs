use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::{CfError, Result};

pub const MAX_BACKUP_ATTEMPTS: usize = 999;

/// Suffix for files displaced by a symlink switch.
pub const BACKUP_SUFFIX: &str = "-backup";

fn with_suffix(base: &Path, index: usize, suffix: &str) -> PathBuf {
    let mut s = OsString::from(base.as_os_str());
    if index > 0 {
        s.push(format!("-{index}"));
    }
    s.push(suffix);
    PathBuf::from(s)
}

/// Returns the first free name among `base+suffix`, `base-1+suffix`, `base-2+suffix`, ...
///
/// Existing symlinks, dangling or not, count as occupied. Nothing is
/// created: the caller has to rename into the returned path.
pub fn generate_backup_name(base: &Path, suffix: &str) -> Result<PathBuf> {
    for index in 0..MAX_BACKUP_ATTEMPTS {
        let candidate = with_suffix(base, index, suffix);
        match fs::symlink_metadata(&candidate) {
            Ok(_) => continue,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(backup = %candidate.display(), "picked backup name");
                return Ok(candidate);
            }
            Err(e) => return Err(CfError::io(format!("stat {}", candidate.display()))(e)),
        }
    }
    Err(CfError::Exhausted { base: base.to_path_buf(), attempts: MAX_BACKUP_ATTEMPTS })
}
