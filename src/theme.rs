//! Theme configuration and colors.
//!
//! Palettes come from the `ratatui-themes` crate; Astra layers network,
//! workflow status and credibility colors on top.

use ratatui::style::{Color, Modifier, Style};
use ratatui_themes::{ThemeName, ThemePalette};
use serde::{Deserialize, Serialize};

use crate::models::{CredibilityLevel, SocialNetwork};

/// Selected palette, stored in the config by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(pub ThemeName);

impl Theme {
    /// Every palette offered in the picker
    #[must_use]
    pub const fn all() -> &'static [ThemeName] {
        ThemeName::all()
    }

    /// Following palette, wrapping at the end
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0.next())
    }

    /// Name shown in the picker and on the profile page
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0.display_name()
    }

    /// Wrapped palette name
    #[must_use]
    pub const fn inner(&self) -> ThemeName {
        self.0
    }

    /// Resolved UI colors
    #[must_use]
    pub fn colors(&self) -> ThemeColors {
        ThemeColors::from_palette(self.0.palette())
    }
}

impl From<ThemeName> for Theme {
    fn from(name: ThemeName) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Brand colors of the publication networks; fixed across palettes
const TELEGRAM: Color = Color::Rgb(0x2A, 0xAB, 0xEE);
const VK: Color = Color::Rgb(0x00, 0x77, 0xFF);
const INSTAGRAM: Color = Color::Rgb(0xE1, 0x30, 0x6C);
const SHORTS: Color = Color::Rgb(0xFF, 0x00, 0x33);

/// Colors the page renderers draw with.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Page background
    pub bg: Color,
    /// Popups and the status bar
    pub bg_secondary: Color,
    /// Body text
    pub fg: Color,
    /// Secondary text, borders and unticked checks
    pub muted: Color,
    /// Titles, focus borders and the logo
    pub primary: Color,
    /// Labels and key hints
    pub secondary: Color,
    /// Approved, ready, published
    pub success: Color,
    /// In progress, scheduled
    pub warning: Color,
    /// Rejected, errors
    pub error: Color,
    /// New, pending
    pub info: Color,
    /// Selected row background
    pub selection: Color,
}

impl ThemeColors {
    /// Derive UI colors from a palette
    #[must_use]
    pub fn from_palette(p: ThemePalette) -> Self {
        Self {
            bg: p.bg,
            bg_secondary: lighten(p.bg, 10),
            fg: p.fg,
            muted: p.muted,
            primary: p.accent,
            secondary: p.secondary,
            success: p.success,
            warning: p.warning,
            error: p.error,
            info: p.info,
            selection: p.selection,
        }
    }

    fn fg_style(color: Color) -> Style {
        Style::default().fg(color)
    }

    /// Body text
    #[must_use]
    pub fn text(&self) -> Style {
        Self::fg_style(self.fg)
    }

    /// De-emphasized text
    #[must_use]
    pub fn text_dim(&self) -> Style {
        Self::fg_style(self.muted)
    }

    /// Hints and counters
    #[must_use]
    pub fn text_muted(&self) -> Style {
        Self::fg_style(self.muted).add_modifier(Modifier::DIM)
    }

    /// Accent text
    #[must_use]
    pub fn text_primary(&self) -> Style {
        Self::fg_style(self.primary)
    }

    /// Label text
    #[must_use]
    pub fn text_secondary(&self) -> Style {
        Self::fg_style(self.secondary)
    }

    /// Success
    #[must_use]
    pub fn text_success(&self) -> Style {
        Self::fg_style(self.success)
    }

    /// Warning
    #[must_use]
    pub fn text_warning(&self) -> Style {
        Self::fg_style(self.warning)
    }

    /// Error
    #[must_use]
    pub fn text_error(&self) -> Style {
        Self::fg_style(self.error)
    }

    /// Info
    #[must_use]
    pub fn text_info(&self) -> Style {
        Self::fg_style(self.info)
    }

    /// Border of an unfocused block
    #[must_use]
    pub fn block(&self) -> Style {
        Self::fg_style(self.muted)
    }

    /// Border of the focused block
    #[must_use]
    pub fn block_focus(&self) -> Style {
        Self::fg_style(self.primary)
    }

    /// Highlighted row
    #[must_use]
    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .fg(self.fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Inactive sidebar entry
    #[must_use]
    pub fn tab(&self) -> Style {
        self.text_muted()
    }

    /// Current sidebar entry
    #[must_use]
    pub fn tab_active(&self) -> Style {
        self.text_primary().add_modifier(Modifier::BOLD)
    }

    /// Shortcut letter in hints
    #[must_use]
    pub fn key_hint(&self) -> Style {
        self.text_secondary().add_modifier(Modifier::BOLD)
    }

    /// Brand style for a publication network
    #[must_use]
    pub fn network(&self, network: SocialNetwork) -> Style {
        Self::fg_style(match network {
            SocialNetwork::Telegram => TELEGRAM,
            SocialNetwork::Vk => VK,
            SocialNetwork::Instagram => INSTAGRAM,
            SocialNetwork::Shorts => SHORTS,
        })
    }

    /// Style for a workflow status key (`new`, `approved`, `scheduled`...)
    #[must_use]
    pub fn status(&self, key: &str) -> Style {
        match key {
            "approved" | "ready" | "published" => self.text_success(),
            "rejected" => self.text_error(),
            "in_progress" | "scheduled" => self.text_warning(),
            "new" | "pending" => self.text_info(),
            _ => self.text_dim(),
        }
    }

    /// Style for a credibility badge
    #[must_use]
    pub fn credibility(&self, level: CredibilityLevel) -> Style {
        let color = match level {
            CredibilityLevel::High => self.success,
            CredibilityLevel::Medium => self.warning,
            CredibilityLevel::Low => self.error,
        };
        Self::fg_style(color).add_modifier(Modifier::BOLD)
    }

    /// Readiness checkmark style
    #[must_use]
    pub fn check(&self, done: bool) -> Style {
        if done { self.text_success() } else { self.text_muted() }
    }

    /// ASCII logo
    #[must_use]
    pub fn logo_style_primary(&self) -> Style {
        self.text_primary().add_modifier(Modifier::BOLD)
    }
}

/// Raise each RGB channel; named colors pass through
fn lighten(color: Color, amount: u8) -> Color {
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            r.saturating_add(amount),
            g.saturating_add(amount),
            b.saturating_add(amount),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_rotation_visits_every_palette() {
        let start = Theme::default();
        let mut theme = start;
        for _ in 0..Theme::all().len() {
            theme = theme.next();
        }
        assert_eq!(theme, start);
        assert_ne!(start.next(), start);
    }

    #[test]
    fn test_status_styles() {
        let colors = Theme::default().colors();
        assert_eq!(colors.status("approved"), colors.text_success());
        assert_eq!(colors.status("rejected"), colors.text_error());
        assert_eq!(colors.status("draft"), colors.text_dim());
        assert_ne!(
            colors.network(SocialNetwork::Telegram),
            colors.network(SocialNetwork::Instagram)
        );
    }

    #[test]
    fn test_lighten_saturates() {
        assert_eq!(lighten(Color::Rgb(250, 0, 16), 10), Color::Rgb(255, 10, 26));
        assert_eq!(lighten(Color::Reset, 10), Color::Reset);
    }
}
