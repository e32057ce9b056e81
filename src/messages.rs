use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    static ref MESSAGES: HashMap<&'static str, &'static str> = HashMap::from([
        ("whatKubeconfig", "What kubeconfig do you want to use?"),
        ("helpActions", "(↑/k up, ↓/j down, enter to select, q/esc to quit)"),
        ("helpConfirm", "(y to rename and continue, n to cancel, q/esc to quit)"),
        ("noCandidates", "No kubeconfig files found in {}"),
        ("symlinkNowPointTo", "Symlink {} now points to {}"),
        (
            "kubeconfigEnvWarning",
            "Warning: KUBECONFIG in this shell does not point to {}, kubectl will not see the switch",
        ),
        ("createSymlinkError", "Failed to create symlink: {}"),
        ("updatePreviousKubeconfigError", "Failed to record previous kubeconfig: {}"),
        ("noPreviousKubeconfig", "No previous kubeconfig"),
        ("noMatchFound", "No kubeconfig matches {}"),
        ("moreThanOneMatchesFound", "More than one kubeconfig matches {}: {}"),
        ("wrongNumberOfArgumentExpect", "Wrong number of arguments, expect at most {}"),
        ("kubeconfigNotSymlink", "{} is not a symlink."),
        ("renameKubeconfigPrompt", "Rename it to {} and point the symlink at it? (y/n)"),
        ("renameCancelled", "Cancelled, {} is left untouched"),
        ("renameError", "Failed to rename kubeconfig: {}"),
        ("listCandidatesError", "Failed to list kubeconfig files: {}"),
    ]);
}

/// Looks up `key` and fills its `{}` placeholders with `args` in order.
///
/// Unknown keys render as the key itself; surplus placeholders stay literal.
pub fn t(key: &str, args: &[&dyn std::fmt::Display]) -> String {
    let template = MESSAGES.get(key).copied().unwrap_or(key);
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}
