use colored::Colorize;

// colored checks NO_COLOR / CLICOLOR itself.

pub fn warning(s: &str) -> String {
    s.red().to_string()
}

pub fn info(s: &str) -> String {
    s.blue().to_string()
}
