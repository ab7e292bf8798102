//! Theme slice

use serde::{Deserialize, Serialize};

/// Colour theme. Persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,

    /// Dark theme.
    Dark,
}

/// Theme actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    /// Set a specific theme.
    Set(Theme),

    /// Flip between light and dark.
    Toggle,
}

pub(super) fn reduce(state: &mut Theme, action: ThemeAction) {
    match action {
        ThemeAction::Set(theme) => *state = theme,
        ThemeAction::Toggle => {
            *state = match state {
                Theme::Light => Theme::Dark,
                Theme::Dark => Theme::Light,
            };
        }
    }
}
