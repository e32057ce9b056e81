use std::{fmt::Display, ops::Range};

use anyhow::{Result, anyhow};
use skim_tuikit::prelude::*;

use crate::{
    messages::t,
    model::Input,
    state::{Mode, Session},
};

const CURSOR_MARK: &str = ">";
const CURRENT_MARK: &str = "*";

fn term_err<T, E: Display>(r: std::result::Result<T, E>) -> Result<T> {
    r.map_err(|e| anyhow!("terminal error: {e}"))
}

fn plain() -> Attr {
    Attr { fg: Color::Default, bg: Color::Default, effect: Effect::empty() }
}

fn current_attr() -> Attr {
    Attr { fg: Color::AnsiValue(33), bg: Color::Default, effect: Effect::BOLD }
}

fn subtle_attr() -> Attr {
    Attr { fg: Color::AnsiValue(241), bg: Color::Default, effect: Effect::empty() }
}

fn warning_attr() -> Attr {
    Attr { fg: Color::AnsiValue(1), bg: Color::Default, effect: Effect::empty() }
}

/// Maps a key press to a state machine input; unbound keys yield `None`.
pub fn input_for(event: &Event) -> Option<Input> {
    let Event::Key(key) = event else { return None };
    match key {
        Key::Ctrl('c') | Key::ESC | Key::Char('q') => Some(Input::Quit),
        Key::Up | Key::Char('k') => Some(Input::Up),
        Key::Down | Key::Char('j') => Some(Input::Down),
        Key::Enter => Some(Input::Confirm),
        Key::Char('y') | Key::Char('Y') => Some(Input::Yes),
        Key::Char('n') | Key::Char('N') => Some(Input::No),
        _ => None,
    }
}

/// One line of the selection list, without styling.
pub fn candidate_line(name: &str, path: &str, width: usize, focused: bool, current: bool) -> String {
    let cursor = if focused { CURSOR_MARK } else { " " };
    let suffix = if current { CURRENT_MARK } else { "" };
    format!("{cursor} {name:<width$} {path}{suffix}")
}

/// Rows of the list that fit in `rows` lines, scrolled so `cursor` stays visible.
pub fn visible_range(len: usize, cursor: usize, rows: usize) -> Range<usize> {
    let rows = rows.max(1);
    let start = (cursor + 1).saturating_sub(rows).min(len.saturating_sub(rows));
    start..len.min(start + rows)
}

/// Splits `text` into chunks of at most `width` characters.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width.max(1)).map(|c| c.iter().collect()).collect()
}

/// Drives the session with key presses until it quits.
///
/// Sessions that are already finished never open the terminal.
pub fn run(session: &mut Session) -> Result<()> {
    if session.is_quit() {
        return Ok(());
    }
    let term: Term<()> = term_err(Term::with_height(TermHeight::Percent(40)))?;
    while !session.is_quit() {
        draw(&term, session)?;
        let event = term_err(term.poll_event())?;
        if let Some(input) = input_for(&event) {
            session.handle(input)?;
        }
    }
    term_err(term.clear())?;
    term_err(term.present())?;
    Ok(())
}

fn print_wrapped(term: &Term<()>, row: usize, text: &str, width: usize, attr: Attr) -> Result<usize> {
    let lines = wrap(text, width);
    for (offset, line) in lines.iter().enumerate() {
        term_err(term.print_with_attr(row + offset, 0, line, attr))?;
    }
    Ok(lines.len())
}

fn draw(term: &Term<()>, session: &Session) -> Result<()> {
    let (width, height) = term_err(term.term_size())?;
    term_err(term.clear())?;
    match session.mode() {
        Mode::Select { candidates, cursor } => {
            term_err(term.print_with_attr(0, 0, &t("whatKubeconfig", &[]), plain()))?;
            let mut row = 2;
            if candidates.is_empty() {
                let dirs: Vec<String> =
                    session.config().search_dirs.iter().map(|d| d.display().to_string()).collect();
                let notice = t("noCandidates", &[&dirs.join(", ")]);
                term_err(term.print_with_attr(row, 0, &notice, warning_attr()))?;
                row += 1;
            }
            // header (2 rows) and footer (2 rows) stay on screen
            let rows = height.saturating_sub(4);
            let name_width = candidates.iter().map(|c| c.name.chars().count()).max().unwrap_or(0);
            for index in visible_range(candidates.len(), *cursor, rows) {
                let candidate = &candidates[index];
                let current = candidate.full_path == session.current();
                let path = candidate.full_path.display().to_string();
                let line = candidate_line(&candidate.name, &path, name_width, index == *cursor, current);
                let attr = if current { current_attr() } else { plain() };
                term_err(term.print_with_attr(row, 0, &line, attr))?;
                row += 1;
            }
            term_err(term.print_with_attr(row + 1, 0, &t("helpActions", &[]), subtle_attr()))?;
        }
        Mode::AskRenameConfirm { suggestion } => {
            let kubeconfig = session.config().kubeconfig_path.display();
            let mut row = 0;
            let notice = t("kubeconfigNotSymlink", &[&kubeconfig]);
            row += print_wrapped(term, row, &notice, width, warning_attr())?;
            let prompt = t("renameKubeconfigPrompt", &[&suggestion.display()]);
            row += print_wrapped(term, row, &prompt, width, warning_attr())?;
            print_wrapped(term, row + 1, &t("helpConfirm", &[]), width, subtle_attr())?;
        }
        Mode::Quit { .. } => {}
    }
    term_err(term.present())
}
