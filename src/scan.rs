use std::{fs, path::Path};

use regex::Regex;
use tracing::debug;

use crate::{
    error::{CfError, Result},
    model::Candidate,
};

/// Name of the capture group that carries the display name, e.g. `(?P<name>...)`.
pub const NAME_GROUP: &str = "name";

/// Display name for a filename, or `None` when the pattern does not name it.
///
/// The `name` group wins when the pattern has one; otherwise the first
/// capture group is used. A match whose chosen group did not participate
/// falls back to the whole match. Patterns without capture groups never
/// produce a name.
pub fn extract_name(pattern: &Regex, file_name: &str) -> Option<String> {
    if pattern.captures_len() < 2 {
        return None;
    }
    let caps = pattern.captures(file_name)?;
    let group = caps.name(NAME_GROUP).or_else(|| caps.get(1)).or_else(|| caps.get(0))?;
    Some(group.as_str().to_string())
}

/// Lists every non-directory entry of `dir` whose filename matches `pattern`.
///
/// Order follows the directory listing; nothing is sorted or cached.
pub fn list_candidates(dir: &Path, pattern: &Regex) -> Result<Vec<Candidate>> {
    let mut out = Vec::new();
    let entries = fs::read_dir(dir).map_err(CfError::io(format!("reading {}", dir.display())))?;
    for entry in entries {
        let entry = entry.map_err(CfError::io(format!("reading {}", dir.display())))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else { continue };
        let Some(name) = extract_name(pattern, file_name) else { continue };

        // Follow symlinks: dangling links and links to directories are skipped too.
        let path = entry.path();
        match fs::metadata(&path) {
            Ok(meta) if !meta.is_dir() => {}
            Ok(_) => continue,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        }

        let full_path = std::path::absolute(&path)
            .map_err(CfError::io(format!("resolving {}", path.display())))?;
        out.push(Candidate::new(name, full_path));
    }
    debug!(dir = %dir.display(), count = out.len(), "listed kubeconfig candidates");
    Ok(out)
}

/// Lists candidates across several directories, preserving directory order.
pub fn list_candidates_in(dirs: &[impl AsRef<Path>], pattern: &Regex) -> Result<Vec<Candidate>> {
    let mut out = Vec::new();
    for dir in dirs {
        out.extend(list_candidates(dir.as_ref(), pattern)?);
    }
    Ok(out)
}

/// Picks the candidate a command-line argument refers to.
///
/// An exact name match wins outright; otherwise the argument must be a
/// prefix of exactly one name.
pub fn resolve_name<'a>(candidates: &'a [Candidate], query: &str) -> Result<&'a Candidate> {
    if let Some(exact) = candidates.iter().find(|c| c.name == query) {
        return Ok(exact);
    }
    let matches: Vec<&Candidate> = candidates.iter().filter(|c| c.name.starts_with(query)).collect();
    match matches.as_slice() {
        [] => Err(CfError::NoMatch(query.to_string())),
        [only] => Ok(*only),
        many => Err(CfError::AmbiguousMatch {
            query: query.to_string(),
            names: many.iter().map(|c| c.name.clone()).collect(),
        }),
    }
}
