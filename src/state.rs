use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::{
    backup::generate_backup_name,
    config::{Config, DEFAULT_KUBECONFIG_BASE_NAME, DEFAULT_KUBECONFIG_SUFFIX},
    error::CfError,
    history::History,
    messages::t,
    model::{Candidate, Input},
    scan, style, symlink,
};

/// Argument that switches back to the previously active kubeconfig.
pub const PREVIOUS_TOKEN: &str = "-";

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Mode {
    Select { candidates: Vec<Candidate>, cursor: usize },
    /// The kubeconfig location holds a regular file; waiting for permission to move it to `suggestion`.
    AskRenameConfirm { suggestion: PathBuf },
    /// Terminal. `None` means leave without printing anything.
    Quit { farewell: Option<String> },
}

/// One interactive run: owns the mode and the notion of the current kubeconfig.
pub struct Session<'a> {
    config: &'a Config,
    history: History,
    /// Absolute form of `config.kubeconfig_path`.
    active: PathBuf,
    /// Target of the kubeconfig symlink; empty when there is none yet.
    current: PathBuf,
    pending_target: Option<String>,
    mode: Mode,
}

impl<'a> Session<'a> {
    /// Inspects the kubeconfig location and settles the first mode.
    ///
    /// A direct target in `args` is applied as soon as the session reaches
    /// `Select`. Only unexpected filesystem failures are returned as errors.
    pub fn start(config: &'a Config, args: &[String]) -> Result<Self> {
        let active = std::path::absolute(&config.kubeconfig_path)
            .unwrap_or_else(|_| config.kubeconfig_path.clone());
        let mut session = Session {
            config,
            history: History::new(&config.history_path),
            active,
            current: PathBuf::new(),
            pending_target: None,
            mode: Mode::Quit { farewell: None },
        };

        if args.len() > 1 {
            let err = CfError::Arity { expected: 1, got: args.len() };
            debug!(%err, "rejecting arguments");
            session.quit_with_warning(t("wrongNumberOfArgumentExpect", &[&1]));
            return Ok(session);
        }
        session.pending_target = args.first().cloned();

        debug!(kubeconfig = %config.kubeconfig_path.display(), "inspecting kubeconfig");
        match symlink::current_target(&config.kubeconfig_path) {
            Ok(Some(target)) => {
                session.current = session.absolutize(target);
                debug!(current = %session.current.display(), "kubeconfig is a symlink");
                session.enter_select()?;
            }
            Ok(None) => {
                warn!(kubeconfig = %config.kubeconfig_path.display(), "kubeconfig does not exist");
                session.enter_select()?;
            }
            Err(CfError::NotASymlinkUnconfirmed(path)) => {
                debug!(path = %path.display(), "kubeconfig is not a symlink");
                let base = config.kubeconfig_dir().join(DEFAULT_KUBECONFIG_BASE_NAME);
                match generate_backup_name(&base, DEFAULT_KUBECONFIG_SUFFIX) {
                    Ok(suggestion) => session.mode = Mode::AskRenameConfirm { suggestion },
                    Err(e) => session.quit_with_warning(t("renameError", &[&e])),
                }
            }
            Err(e) => return Err(e).context("inspecting kubeconfig"),
        }
        Ok(session)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn is_quit(&self) -> bool {
        matches!(self.mode, Mode::Quit { .. })
    }

    pub fn farewell(&self) -> Option<&str> {
        match &self.mode {
            Mode::Quit { farewell } => farewell.as_deref(),
            _ => None,
        }
    }

    /// Advances the state machine by one input.
    pub fn handle(&mut self, input: Input) -> Result<()> {
        if input == Input::Quit {
            self.mode = Mode::Quit { farewell: None };
            return Ok(());
        }
        match &mut self.mode {
            Mode::Quit { .. } => {}
            Mode::AskRenameConfirm { suggestion } => match input {
                Input::Yes => {
                    let suggestion = suggestion.clone();
                    self.confirm_rename(&suggestion)?;
                }
                Input::No => {
                    let msg = t("renameCancelled", &[&self.config.kubeconfig_path.display()]);
                    self.quit_with_warning(msg);
                }
                _ => {}
            },
            Mode::Select { candidates, cursor } => {
                let len = candidates.len();
                match input {
                    Input::Up if len > 0 => *cursor = if *cursor == 0 { len - 1 } else { *cursor - 1 },
                    Input::Down if len > 0 => *cursor = (*cursor + 1) % len,
                    Input::Confirm => {
                        if let Some(target) = candidates.get(*cursor).map(|c| c.full_path.clone()) {
                            self.switch_to(&target);
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn absolutize(&self, target: PathBuf) -> PathBuf {
        if target.as_os_str().is_empty() || target.is_absolute() {
            return target;
        }
        self.config.kubeconfig_dir().join(target)
    }

    fn quit_with_warning(&mut self, msg: String) {
        self.mode = Mode::Quit { farewell: Some(style::warning(&msg)) };
    }

    fn enter_select(&mut self) -> Result<()> {
        let candidates: Vec<Candidate> =
            match scan::list_candidates_in(&self.config.search_dirs, &self.config.pattern) {
                Ok(found) => found.into_iter().filter(|c| c.full_path != self.active).collect(),
                Err(e) => {
                    self.quit_with_warning(t("listCandidatesError", &[&e]));
                    return Ok(());
                }
            };
        let cursor = candidates.iter().position(|c| c.full_path == self.current).unwrap_or(0);
        self.mode = Mode::Select { candidates, cursor };

        if let Some(target) = self.pending_target.take() {
            self.switch_by_argument(&target)?;
        }
        Ok(())
    }

    fn switch_by_argument(&mut self, query: &str) -> Result<()> {
        if query == PREVIOUS_TOKEN {
            match self.history.read_previous() {
                Ok(previous) => {
                    debug!(previous = %previous.display(), "switching to previous kubeconfig");
                    self.switch_to(&previous);
                }
                Err(e) if e.is_not_found() => self.quit_with_warning(t("noPreviousKubeconfig", &[])),
                Err(e) => return Err(e).context("reading previous kubeconfig"),
            }
            return Ok(());
        }

        let Mode::Select { candidates, .. } = &self.mode else { return Ok(()) };
        let resolved = scan::resolve_name(candidates, query).map(|c| c.full_path.clone());
        match resolved {
            Ok(target) => self.switch_to(&target),
            Err(CfError::NoMatch(q)) => self.quit_with_warning(t("noMatchFound", &[&q])),
            Err(CfError::AmbiguousMatch { query, names }) => {
                self.quit_with_warning(t("moreThanOneMatchesFound", &[&query, &names.join(", ")]))
            }
            Err(e) => self.quit_with_warning(e.to_string()),
        }
        Ok(())
    }

    /// Records the current kubeconfig as previous, then re-points the symlink.
    ///
    /// The history write happens first so an interrupted switch still
    /// remembers the old path. This is ordering only, not a transaction.
    fn switch_to(&mut self, target: &Path) {
        if let Err(e) = self.history.record_previous(&self.current) {
            self.quit_with_warning(t("updatePreviousKubeconfigError", &[&e]));
            return;
        }
        if let Err(e) = symlink::point_to(target, &self.config.kubeconfig_path) {
            self.quit_with_warning(t("createSymlinkError", &[&e]));
            return;
        }
        self.current = target.to_path_buf();

        let link = style::info(&self.config.kubeconfig_path.display().to_string());
        let to = style::info(&target.display().to_string());
        let mut farewell = t("symlinkNowPointTo", &[&link, &to]);
        if !self.config.env_selects_kubeconfig {
            farewell.push('\n');
            farewell.push_str(&style::warning(&t(
                "kubeconfigEnvWarning",
                &[&self.config.kubeconfig_path.display()],
            )));
        }
        self.mode = Mode::Quit { farewell: Some(farewell) };
    }

    fn confirm_rename(&mut self, suggestion: &Path) -> Result<()> {
        let kubeconfig = &self.config.kubeconfig_path;
        info!(from = %kubeconfig.display(), to = %suggestion.display(), "renaming kubeconfig");
        if let Err(e) = fs::rename(kubeconfig, suggestion) {
            let e = CfError::io(format!("renaming {}", kubeconfig.display()))(e);
            self.quit_with_warning(t("renameError", &[&e]));
            return Ok(());
        }
        if let Err(e) = symlink::point_to(suggestion, kubeconfig) {
            self.quit_with_warning(t("createSymlinkError", &[&e]));
            return Ok(());
        }
        self.current = std::path::absolute(suggestion).unwrap_or_else(|_| suggestion.to_path_buf());
        self.enter_select()
    }
}
