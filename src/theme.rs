use std::fmt;

/// Light or dark appearance. Independent of any browsing state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggle(&mut self) -> ThemeMode {
        *self = match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        };
        *self
    }

    pub fn is_dark(&self) -> bool {
        *self == ThemeMode::Dark
    }

    /// Icon for the toggle button: what clicking it switches to.
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "☀",
            ThemeMode::Light => "🌙",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::Light => write!(f, "light"),
        }
    }
}
