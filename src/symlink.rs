use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    backup::{BACKUP_SUFFIX, generate_backup_name},
    error::{CfError, Result},
};

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

/// What currently occupies the active kubeconfig location.
///
/// `Ok(None)` when nothing is there, `Ok(Some(target))` for a symlink and
/// `NotASymlinkUnconfirmed` for a regular file (or anything else).
pub fn current_target(active: &Path) -> Result<Option<PathBuf>> {
    let meta = match fs::symlink_metadata(active) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(CfError::io(format!("stat {}", active.display()))(e)),
    };
    if !meta.file_type().is_symlink() {
        return Err(CfError::NotASymlinkUnconfirmed(active.to_path_buf()));
    }
    let target = fs::read_link(active).map_err(CfError::io(format!("readlink {}", active.display())))?;
    Ok(Some(target))
}

/// Makes `active` a symlink to `target`.
///
/// A missing `active` is created directly, an existing symlink is
/// replaced, and anything else is renamed to a free backup name first so
/// no real file is ever lost. There is no rollback if a later step fails.
pub fn point_to(target: &Path, active: &Path) -> Result<()> {
    match fs::symlink_metadata(active) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(link = %active.display(), "no existing kubeconfig, creating symlink");
        }
        Err(e) => return Err(CfError::io(format!("stat {}", active.display()))(e)),
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::remove_file(active)
                .map_err(CfError::io(format!("removing old symlink {}", active.display())))?;
        }
        Ok(_) => {
            let backup = generate_backup_name(active, BACKUP_SUFFIX)?;
            info!(from = %active.display(), to = %backup.display(), "backing up kubeconfig");
            fs::rename(active, &backup).map_err(CfError::io(format!(
                "renaming {} to {}",
                active.display(),
                backup.display()
            )))?;
        }
    }
    create_symlink(target, active).map_err(CfError::io(format!(
        "creating symlink {} -> {}",
        active.display(),
        target.display()
    )))?;
    info!(link = %active.display(), target = %target.display(), "symlink switched");
    Ok(())
}
