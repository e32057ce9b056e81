use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kubectl-cf",
    version,
    about = "Switch the active kubeconfig by re-pointing its symlink"
)]
pub struct Cli {
    /// Kubeconfig name or unique prefix to switch to, or "-" for the previous one.
    /// Without it an interactive list is shown
    #[arg(value_name = "NAME")]
    pub targets: Vec<String>,

    /// Path of the kubeconfig symlink (default: ~/.kube/config).
    /// Only the first entry of a ':'-separated list is used
    #[arg(long, env = "KUBECONFIG", value_name = "PATH")]
    pub kubeconfig: Option<String>,

    /// ':'-separated directories to search for kubeconfig files
    /// ("$KUBECONFIG_DIR" stands for the directory of the symlink)
    #[arg(long, env = "KUBECTL_CF_PATHS", value_name = "DIRS")]
    pub paths: Option<String>,

    /// Regex a filename must match to be listed; the "name" group
    /// (or the first group) becomes the display name
    #[arg(long, env = "KUBECTL_CF_KUBECONFIG_MATCH_PATTERN", value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Directory holding kubectl-cf state (default: ~/.kube/kubectl-cf)
    #[arg(long, env = "KUBECTL_CF_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<String>,

    /// Log filter, e.g. "debug" or "kubectl_cf=trace"
    #[arg(long, env = "LOG_LEVEL", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_all_positionals() {
        let cli = Cli::try_parse_from(["kubectl-cf", "a", "b"]).unwrap();
        assert_eq!(cli.targets, vec!["a", "b"]);
    }

    #[test]
    fn dash_is_a_positional() {
        let cli = Cli::try_parse_from(["kubectl-cf", "-"]).unwrap();
        assert_eq!(cli.targets, vec!["-"]);
    }

    #[test]
    fn flags_override() {
        let cli = Cli::try_parse_from([
            "kubectl-cf",
            "--kubeconfig",
            "/tmp/kc",
            "--pattern",
            r"^(\w+)\.kc$",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.kubeconfig.as_deref(), Some("/tmp/kc"));
        assert_eq!(cli.pattern.as_deref(), Some(r"^(\w+)\.kc$"));
        assert_eq!(cli.log_level, "debug");
        assert!(cli.targets.is_empty());
    }
}
