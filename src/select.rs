//! Interactive fuzzy picker
//!
//! Commands only depend on [`FuzzySelect`]: given items and a way to label
//! them, return one item or [`Error::SelectionCancelled`]. [`TermSelector`]
//! is the terminal implementation.

use console::{Key, Term};
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use owo_colors::OwoColorize;
use crate::ui::theme;
use crate::{Error, Result};

/// Rows shown at once
const WINDOW: usize = 10;

pub trait FuzzySelect {
    fn select<'a, T, F>(&self, items: &'a [T], label: F, prompt: &str) -> Result<&'a T>
    where
        F: Fn(&T) -> String;
}

/// Fuzzy matcher behind the picker's filter line.
///
/// Query atoms are matched case-insensitively with fzf-style scoring;
/// `None` means the candidate does not match.
pub struct Scorer {
    matcher: Matcher,
    pattern: Pattern,
    buf: Vec<char>,
}

impl Scorer {
    pub fn new(query: &str) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            pattern: Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart),
            buf: Vec::new(),
        }
    }

    pub fn score(&mut self, candidate: &str) -> Option<u32> {
        let haystack = Utf32Str::new(candidate, &mut self.buf);
        self.pattern.score(haystack, &mut self.matcher)
    }
}

/// Indices of `labels` matching `query`, best first. Ties keep input order.
pub fn filter(query: &str, labels: &[String]) -> Vec<usize> {
    if query.trim().is_empty() {
        return (0..labels.len()).collect();
    }

    let mut scorer = Scorer::new(query);
    let mut scored: Vec<(usize, u32)> = labels
        .iter()
        .enumerate()
        .filter_map(|(i, label)| scorer.score(label).map(|s| (i, s)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.into_iter().map(|(i, _)| i).collect()
}

/// Picker drawn on stderr so stdout stays clean for scripting.
pub struct TermSelector {
    term: Term,
}

impl TermSelector {
    pub fn new() -> Self {
        Self { term: Term::stderr() }
    }

    fn render(&self, prompt: &str, query: &str, labels: &[String], matches: &[usize], cursor: usize) -> Result<usize> {
        let offset = cursor.saturating_sub(WINDOW - 1);
        let mut lines = 0;

        self.term.write_line(&format!(
            "{} {} {}",
            prompt.style(theme().prompt.clone()),
            ">".style(theme().prompt.clone()),
            query
        ))?;
        lines += 1;

        for (row, &idx) in matches.iter().enumerate().skip(offset).take(WINDOW) {
            let line = if row == cursor {
                format!("{} {}", ">".style(theme().selection.clone()), labels[idx].style(theme().selection.clone()))
            } else {
                format!("  {}", labels[idx])
            };
            self.term.write_line(&line)?;
            lines += 1;
        }

        self.term.write_line(&format!(
            "  {}",
            format!("{}/{}", matches.len(), labels.len()).style(theme().muted.clone())
        ))?;
        Ok(lines + 1)
    }
}

impl Default for TermSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzySelect for TermSelector {
    fn select<'a, T, F>(&self, items: &'a [T], label: F, prompt: &str) -> Result<&'a T>
    where
        F: Fn(&T) -> String,
    {
        if items.is_empty() {
            return Err(Error::SelectionCancelled);
        }
        if !self.term.is_term() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "interactive selection needs a terminal; pass a name instead",
            )));
        }

        let labels: Vec<String> = items.iter().map(label).collect();
        let mut query = String::new();
        let mut matches = filter(&query, &labels);
        let mut cursor = 0usize;

        self.term.hide_cursor()?;
        let result = loop {
            let drawn = self.render(prompt, &query, &labels, &matches, cursor)?;

            let key = match self.term.read_key() {
                Ok(key) => key,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                    self.term.clear_last_lines(drawn)?;
                    break Err(Error::SelectionCancelled);
                }
                Err(e) => break Err(e.into()),
            };
            self.term.clear_last_lines(drawn)?;

            match key {
                Key::Escape | Key::Char('\u{3}') => break Err(Error::SelectionCancelled),
                Key::Enter => {
                    if let Some(&idx) = matches.get(cursor) {
                        break Ok(&items[idx]);
                    }
                }
                Key::ArrowUp => cursor = cursor.saturating_sub(1),
                Key::ArrowDown | Key::Tab => {
                    if cursor + 1 < matches.len() {
                        cursor += 1;
                    }
                }
                Key::Backspace => {
                    query.pop();
                    matches = filter(&query, &labels);
                    cursor = 0;
                }
                Key::Char(c) if !c.is_control() => {
                    query.push(c);
                    matches = filter(&query, &labels);
                    cursor = 0;
                }
                _ => {}
            }
        };
        self.term.show_cursor()?;
        result
    }
}
