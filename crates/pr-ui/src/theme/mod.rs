//! Theme system

use pr_core::session::Decision;
use ratatui::prelude::*;

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border color for focused elements
    pub focus_border: Color,
    /// Border color for unfocused elements
    pub unfocus_border: Color,
    /// Kept bucket color
    pub kept: Color,
    /// Discarded bucket color
    pub discarded: Color,
    /// Skipped bucket color
    pub skipped: Color,
    /// Warning message color
    pub warning: Color,
    /// Secondary text color
    pub muted: Color,
    /// Status bar background
    pub status_bg: Color,
}

impl Theme {
    /// Color associated with a decision
    pub fn decision_color(&self, decision: Decision) -> Color {
        match decision {
            Decision::Keep => self.kept,
            Decision::Discard => self.discarded,
            Decision::Skip => self.skipped,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focus_border: Color::Cyan,
            unfocus_border: Color::DarkGray,
            kept: Color::Green,
            discarded: Color::Red,
            skipped: Color::Yellow,
            warning: Color::Yellow,
            muted: Color::DarkGray,
            status_bg: Color::DarkGray,
        }
    }
}
