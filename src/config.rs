use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use regex::Regex;

use crate::{cli::Cli, history::PREVIOUS_FILE};

pub const DEFAULT_MATCH_PATTERN: &str = r"^(?P<name>(config)|([^\.]+\.yaml))$";

/// Entry of `KUBECTL_CF_PATHS` that stands for the directory of the kubeconfig symlink.
pub const KUBECONFIG_DIR_TOKEN: &str = "$KUBECONFIG_DIR";

/// Base name suggested when a regular kubeconfig file has to be moved aside.
pub const DEFAULT_KUBECONFIG_BASE_NAME: &str = "default-kubeconfig";
pub const DEFAULT_KUBECONFIG_SUFFIX: &str = ".yaml";

/// Settings resolved once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct Config {
    /// The symlink that kubectl reads.
    pub kubeconfig_path: PathBuf,
    pub search_dirs: Vec<PathBuf>,
    pub pattern: Regex,
    pub history_path: PathBuf,
    /// Whether the shell's `KUBECONFIG` (or its absence) already selects `kubeconfig_path`.
    pub env_selects_kubeconfig: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Self::resolve(cli, dirs::home_dir().as_deref(), env::var("KUBECONFIG").ok().as_deref())
    }

    fn resolve(cli: &Cli, home: Option<&Path>, kubeconfig_env: Option<&str>) -> Result<Self> {
        // Only needed for defaults, so a missing home is fatal only then.
        let kube_dir = || -> Result<PathBuf> {
            Ok(home.context("cannot resolve home directory")?.join(".kube"))
        };

        let kubeconfig_path = match cli.kubeconfig.as_deref().and_then(first_path) {
            Some(path) => absolute(&path)?,
            None => kube_dir()?.join("config"),
        };
        let kubeconfig_dir = kubeconfig_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        let mut search_dirs: Vec<PathBuf> = cli
            .paths
            .as_deref()
            .unwrap_or_default()
            .split(':')
            .filter(|p| !p.is_empty())
            .map(|p| if p == KUBECONFIG_DIR_TOKEN { kubeconfig_dir.clone() } else { PathBuf::from(p) })
            .collect();
        if search_dirs.is_empty() {
            search_dirs.push(kubeconfig_dir);
        }

        let pattern_str = cli.pattern.as_deref().filter(|p| !p.is_empty()).unwrap_or(DEFAULT_MATCH_PATTERN);
        let pattern = Regex::new(pattern_str)
            .with_context(|| format!("invalid kubeconfig match pattern {pattern_str:?}"))?;

        let config_dir = match cli.config_dir.as_deref().filter(|d| !d.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => kube_dir()?.join("kubectl-cf"),
        };

        let env_selects_kubeconfig = match kubeconfig_env.and_then(first_path) {
            Some(from_env) => absolute(&from_env)? == kubeconfig_path,
            None => home.is_some_and(|h| h.join(".kube").join("config") == kubeconfig_path),
        };

        Ok(Self {
            kubeconfig_path,
            search_dirs,
            pattern,
            history_path: config_dir.join(PREVIOUS_FILE),
            env_selects_kubeconfig,
        })
    }

    pub fn kubeconfig_dir(&self) -> &Path {
        match self.kubeconfig_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("resolving {}", path.display()))
}

fn first_path(list: &str) -> Option<PathBuf> {
    list.split(':').find(|p| !p.is_empty()).map(PathBuf::from)
}
