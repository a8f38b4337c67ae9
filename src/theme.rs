//! Colour tokens and the styles derived from them.
//!
//! The registration page uses a small palette: a deep indigo accent, a pale
//! blue tint, neutral greys for field backgrounds and placeholders, and a dark
//! red for the "no results" message. Components keep a [`Theme`] and ask it
//! for styles at render time, so overriding a token restyles everything that
//! uses it.
//!
//! ```rust
//! use alumni_portal::theme::Theme;
//!
//! let theme = Theme::default().with_accent("#1d4ed8");
//! assert_eq!(theme.accent, "#1d4ed8");
//! assert_eq!(theme.light, "#e8f0fc");
//! ```

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Accent colour ("indblue").
pub const INDBLUE: &str = "#394686";
/// Pale blue tint ("lightblue").
pub const LIGHTBLUE: &str = "#e8f0fc";

/// Palette for every component in the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Headings, highlighted rows, buttons and the login panel.
    pub accent: String,
    /// Text drawn on the accent colour and the focused field tint.
    pub light: String,
    /// Placeholders, icons and secondary text.
    pub muted: String,
    /// Regular text.
    pub text: String,
    /// Field backgrounds.
    pub surface: String,
    /// Error text.
    pub error: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: INDBLUE.to_string(),
            light: LIGHTBLUE.to_string(),
            muted: "#9ca3af".to_string(),
            text: "#000000".to_string(),
            surface: "#f3f4f6".to_string(),
            error: "#991b1b".to_string(),
        }
    }
}

impl Theme {
    /// Replaces the accent colour.
    pub fn with_accent(mut self, color: impl Into<String>) -> Self {
        self.accent = color.into();
        self
    }

    /// Replaces the light tint.
    pub fn with_light(mut self, color: impl Into<String>) -> Self {
        self.light = color.into();
        self
    }

    /// Replaces the muted colour.
    pub fn with_muted(mut self, color: impl Into<String>) -> Self {
        self.muted = color.into();
        self
    }

    /// Replaces the error colour.
    pub fn with_error(mut self, color: impl Into<String>) -> Self {
        self.error = color.into();
        self
    }

    /// Panel heading.
    pub fn heading(&self) -> Style {
        Style::new()
            .foreground(Color::from(self.accent.as_str()))
            .bold(true)
    }

    /// Heading on the accent-coloured panel.
    pub fn heading_inverse(&self) -> Style {
        Style::new()
            .foreground(Color::from(self.light.as_str()))
            .bold(true)
    }

    /// Plain field text.
    pub fn field_text(&self) -> Style {
        Style::new().foreground(Color::from(self.text.as_str()))
    }

    /// Background of an unfocused field.
    pub fn field(&self) -> Style {
        Style::new().background(Color::from(self.surface.as_str()))
    }

    /// Background of the focused field.
    pub fn field_focused(&self) -> Style {
        Style::new()
            .background(Color::from(self.light.as_str()))
            .foreground(Color::from(self.accent.as_str()))
    }

    /// Placeholder and icon text.
    pub fn placeholder(&self) -> Style {
        Style::new().foreground(Color::from(self.muted.as_str()))
    }

    /// A list row under the pointer or keyboard highlight.
    pub fn row_highlighted(&self) -> Style {
        Style::new()
            .background(Color::from(self.accent.as_str()))
            .foreground(Color::from("#ffffff"))
    }

    /// A list row.
    pub fn row(&self) -> Style {
        Style::new().foreground(Color::from(self.text.as_str()))
    }

    /// The "no results" row.
    pub fn no_results(&self) -> Style {
        Style::new().foreground(Color::from(self.error.as_str()))
    }

    /// Links such as "Lost Your SIH Email".
    pub fn link(&self) -> Style {
        Style::new()
            .foreground(Color::from(self.accent.as_str()))
            .underline(true)
    }

    /// Outlined button on the register panel.
    pub fn button(&self, focused: bool) -> Style {
        let style = Style::new()
            .border_style(lipgloss::rounded_border())
            .border_foreground(Color::from(self.accent.as_str()))
            .padding(0, 4, 0, 4)
            .bold(true);
        if focused {
            style
                .background(Color::from(self.accent.as_str()))
                .foreground(Color::from("#ffffff"))
        } else {
            style.foreground(Color::from(self.accent.as_str()))
        }
    }

    /// Outlined button on the accent-coloured panel.
    pub fn button_inverse(&self, focused: bool) -> Style {
        let style = Style::new()
            .border_style(lipgloss::rounded_border())
            .border_foreground(Color::from("#ffffff"))
            .padding(0, 4, 0, 4)
            .bold(true);
        if focused {
            style
                .background(Color::from("#ffffff"))
                .foreground(Color::from(self.accent.as_str()))
        } else {
            style.foreground(Color::from("#ffffff"))
        }
    }

    /// Text on the accent-coloured login panel.
    pub fn panel_inverse(&self) -> Style {
        Style::new()
            .background(Color::from(self.accent.as_str()))
            .foreground(Color::from("#ffffff"))
    }
}
