use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::BOOKMARK, text.style(theme().heading.clone()));
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    if is_quiet() {
        return;
    }
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::INFO.style(theme().info.clone()), label.style(theme().info.clone()));
}

/// Unstyled line, e.g. a row of a plain listing
pub fn plain(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{}", text);
}

pub fn muted(text: &str) -> String {
    text.style(theme().muted.clone()).to_string()
}

/// Ask a yes/no question on the terminal. Anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> std::io::Result<bool> {
    let term = console::Term::stderr();
    term.write_str(&format!("{} {} (y/N): ", Icons::WARN, question.style(theme().warn.clone())))?;
    let answer = term.read_line()?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
