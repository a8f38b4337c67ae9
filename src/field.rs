//! Single-line text field for the plain inputs of a form.
//!
//! A stripped-down sibling of a full text input: it appends typed text,
//! deletes the last grapheme on backspace and clears on `ctrl+u`. There is no
//! cursor movement and no validation. A field marked required only shows a
//! `*` in its placeholder.
//!
//! ```rust
//! use alumni_portal::field::Model;
//! use alumni_portal::Component;
//!
//! let mut name = Model::new("Enter your Full Name").required(true);
//! name.focus();
//! name.insert_str("Asha");
//! assert_eq!(name.value(), "Asha");
//! ```

use crate::key::{self, KeyMap as KeyMapTrait};
use crate::runeutil;
use crate::theme::Theme;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};

/// Editing keys of a text field.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Delete the last character.
    pub delete_backward: key::Binding,
    /// Clear the whole value.
    pub clear: key::Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            delete_backward: key::new_binding(vec![
                key::with_keys_str(&["backspace", "ctrl+h"]),
                key::with_help("⌫", "delete"),
            ]),
            clear: key::new_binding(vec![
                key::with_keys_str(&["ctrl+u"]),
                key::with_help("ctrl+u", "clear"),
            ]),
        }
    }
}

impl KeyMapTrait for KeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.delete_backward, &self.clear]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.delete_backward, &self.clear]]
    }
}

/// A single-line text field.
#[derive(Debug, Clone)]
pub struct Model {
    /// Text shown while the value is empty.
    pub placeholder: String,
    /// Glyph drawn before the field.
    pub icon: String,
    /// Width of the editable area in columns.
    pub width: usize,
    /// Key bindings.
    pub key_map: KeyMap,
    /// Colours.
    pub theme: Theme,
    value: String,
    required: bool,
    focus: bool,
}

impl Model {
    /// Creates an empty, unfocused field.
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            icon: String::from("›"),
            width: 32,
            key_map: KeyMap::default(),
            theme: Theme::default(),
            value: String::new(),
            required: false,
            focus: false,
        }
    }

    /// Marks the field as required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the icon glyph.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Sets the width of the editable area.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the colours.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Reports whether the field is marked required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value.
    pub fn set_value(&mut self, value: &str) {
        self.value = runeutil::sanitize(value);
    }

    /// Appends text at the end of the value.
    pub fn insert_str(&mut self, text: &str) {
        self.value.push_str(&runeutil::sanitize(text));
    }

    /// Deletes the last grapheme.
    pub fn delete_backward(&mut self) {
        runeutil::pop_grapheme(&mut self.value);
    }

    /// Clears the value.
    pub fn reset(&mut self) {
        self.value.clear();
    }

    /// Handles a key press. Unfocused fields ignore input.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;

        if self.key_map.delete_backward.matches(key_msg) {
            self.delete_backward();
        } else if self.key_map.clear.matches(key_msg) {
            self.reset();
        } else if let KeyCode::Char(c) = key_msg.key {
            if !key_msg
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                self.value.push(c);
            }
        }
        None
    }

    /// Renders the field on one line.
    pub fn view(&self) -> String {
        let icon = self.theme.placeholder().render(&self.icon);
        let background = if self.focus {
            self.theme.field_focused()
        } else {
            self.theme.field()
        };

        let body = if self.value.is_empty() {
            let mut placeholder = self.placeholder.clone();
            if self.required {
                placeholder.push('*');
            }
            let text = runeutil::pad(&runeutil::truncate(&placeholder, self.width), self.width);
            self.theme.placeholder().render(&text)
        } else {
            let visible = if self.focus {
                // leave a column for the caret
                runeutil::tail(&self.value, self.width.saturating_sub(1)).to_string()
            } else {
                runeutil::truncate(&self.value, self.width)
            };
            let caret = if self.focus { "▏" } else { "" };
            let text = runeutil::pad(&format!("{}{}", visible, caret), self.width);
            self.theme.field_text().render(&text)
        };

        background.render(&format!("{} {}", icon, body))
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(""), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        Model::update(self, &msg)
    }

    fn view(&self) -> String {
        Model::view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn ctrl(c: char) -> Msg {
        Box::new(KeyMsg {
            key: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        })
    }

    fn plain(view: &str) -> String {
        strip_ansi_escapes::strip_str(view)
    }

    #[test]
    fn test_typing_requires_focus() {
        let mut field = Model::new("College");
        field.update(&key(KeyCode::Char('x')));
        assert_eq!(field.value(), "");

        field.focus();
        for c in "IIT".chars() {
            field.update(&key(KeyCode::Char(c)));
        }
        assert_eq!(field.value(), "IIT");
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut field = Model::new("Email");
        field.focus();
        field.set_value("a@b.c");
        field.update(&key(KeyCode::Backspace));
        assert_eq!(field.value(), "a@b.");

        field.update(&ctrl('u'));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_control_chords_are_not_text() {
        let mut field = Model::new("Name");
        field.focus();
        field.update(&ctrl('a'));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_required_placeholder() {
        let field = Model::new("Enter your Full Name").required(true);
        assert!(plain(&field.view()).contains("Enter your Full Name*"));
        let optional = Model::new("Select your College");
        assert!(!plain(&optional.view()).contains('*'));
    }

    #[test]
    fn test_view_shows_value_instead_of_placeholder() {
        let mut field = Model::new("Participated in :").with_width(20);
        field.set_value("SIH 2022");
        let view = plain(&field.view());
        assert!(view.contains("SIH 2022"));
        assert!(!view.contains("Participated"));
    }

    #[test]
    fn test_set_value_strips_line_breaks() {
        let mut field = Model::new("Name");
        field.set_value("Asha\nRao");
        assert_eq!(field.value(), "Asha Rao");
    }
}
