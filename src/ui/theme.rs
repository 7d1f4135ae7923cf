use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for gitbm's messages and the branch picker.
#[derive(Debug, Clone)]
pub struct Theme {
    pub heading: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    /// Picker prompt and its `>` marker
    pub prompt: Style,
    /// Highlighted picker row
    pub selection: Style,
    pub muted: Style,
}

impl Theme {
    /// Colors when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        let enabled = std::env::var_os("NO_COLOR").is_none() && console::Term::stdout().is_term();
        Self::new(enabled)
    }

    pub fn new(colored: bool) -> Self {
        let pick = |style: Style| if colored { style } else { Style::new() };
        Self {
            heading: pick(Style::new().cyan().bold()),
            success: pick(Style::new().green().bold()),
            error: pick(Style::new().red().bold()),
            warn: pick(Style::new().yellow().bold()),
            info: pick(Style::new().blue()),
            prompt: pick(Style::new().magenta().bold()),
            selection: pick(Style::new().green().bold().underline()),
            muted: pick(Style::new().bright_black()),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
