use std::path::PathBuf;

/// A kubeconfig file that can be selected, with the display name extracted from its filename.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub name: String,
    pub full_path: PathBuf,
}

impl Candidate {
    pub fn new(name: impl Into<String>, full_path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), full_path: full_path.into() }
    }
}

/// Keyboard-level intents the selection state machine understands.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Input {
    Up,
    Down,
    Confirm,
    Yes,
    No,
    Quit,
}
