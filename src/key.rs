//! Type-safe key bindings shared by every component in the crate.
//!
//! A [`Binding`] groups one or more key presses under a single action and
//! carries the help text shown to the user. Components keep their bindings in
//! a key map struct and implement [`KeyMap`] so help views can list them.
//!
//! ```rust
//! use alumni_portal::key::{self, KeyMap};
//!
//! let clear = key::new_binding(vec![
//!     key::with_keys_str(&["ctrl+u"]),
//!     key::with_help("ctrl+u", "clear search"),
//! ]);
//! assert_eq!(clear.help().key, "ctrl+u");
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key combination: a key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers held while pressing it.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl KeyPress {
    /// Parses a key description such as `"enter"`, `"ctrl+u"`, `"shift+tab"`
    /// or a single character. Returns `None` for names it does not know.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut parts: Vec<&str> = spec.split('+').collect();
        let name = parts.pop()?;
        for modifier in parts {
            match modifier {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match name {
            "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => {
                modifiers.remove(KeyModifiers::SHIFT);
                KeyCode::BackTab
            }
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" => KeyCode::Delete,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pgup" => KeyCode::PageUp,
            "pgdown" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };

        Some(Self { code, modifiers })
    }

    fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        // Terminals report shifted characters and back-tab with SHIFT set;
        // the key code already carries it.
        let implied = |code: KeyCode, modifiers: KeyModifiers| match code {
            KeyCode::Char(_) | KeyCode::BackTab => modifiers - KeyModifiers::SHIFT,
            _ => modifiers,
        };
        implied(msg.key, msg.modifiers) == implied(self.code, self.modifiers)
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"↑/↓"`.
    pub key: String,
    /// What the key does.
    pub desc: String,
}

/// A set of key presses mapped to one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from key codes or `(code, modifiers)` pairs.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Returns the key presses of this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Returns the help text of this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Enables or disables the binding. Disabled bindings never match.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Reports whether the binding is enabled and has at least one key.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Reports whether `msg` triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Option applied by [`new_binding`].
pub type BindingOpt = Box<dyn FnOnce(&mut Binding)>;

/// Builds a binding from a list of options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        opt(&mut binding);
    }
    binding
}

/// Option adding the keys described by `keys` (see [`KeyPress::parse`]).
/// Unknown names are skipped.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    let parsed: Vec<KeyPress> = keys.iter().filter_map(|k| KeyPress::parse(k)).collect();
    Box::new(move |b: &mut Binding| b.keys.extend(parsed))
}

/// Option setting the help text.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    let help = Help {
        key: key.to_string(),
        desc: desc.to_string(),
    };
    Box::new(move |b: &mut Binding| b.help = help)
}

/// Implemented by component key maps so their bindings can be listed in help.
pub trait KeyMap {
    /// Bindings shown in the one-line help.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings shown in the expanded help, grouped in columns.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Renders the short help of a key map as `"key desc • key desc"`.
pub fn short_help_line(map: &dyn KeyMap) -> String {
    map.short_help()
        .into_iter()
        .filter(|b| b.enabled() && !b.help.key.is_empty())
        .map(|b| format!("{} {}", b.help.key, b.help.desc))
        .collect::<Vec<_>>()
        .join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(KeyPress::parse("enter"), Some(KeyCode::Enter.into()));
        assert_eq!(
            KeyPress::parse("ctrl+u"),
            Some((KeyCode::Char('u'), KeyModifiers::CONTROL).into())
        );
        assert_eq!(KeyPress::parse("shift+tab"), Some(KeyCode::BackTab.into()));
        assert_eq!(KeyPress::parse("space"), Some(KeyCode::Char(' ').into()));
        assert_eq!(KeyPress::parse("x"), Some(KeyCode::Char('x').into()));
        assert_eq!(KeyPress::parse("hyper+x"), None);
        assert_eq!(KeyPress::parse("nonsense"), None);
    }

    #[test]
    fn test_binding_matches_modifiers() {
        let clear = new_binding(vec![with_keys_str(&["ctrl+u"])]);
        assert!(clear.matches(&press(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(!clear.matches(&press(KeyCode::Char('u'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_shifted_characters_match() {
        let end = Binding::new(vec![KeyCode::Char('G')]);
        assert!(end.matches(&press(KeyCode::Char('G'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_back_tab_matches_with_shift() {
        let prev = new_binding(vec![with_keys_str(&["shift+tab"])]);
        assert!(prev.matches(&press(KeyCode::BackTab, KeyModifiers::SHIFT)));
        assert!(prev.matches(&press(KeyCode::BackTab, KeyModifiers::NONE)));
        assert!(!prev.matches(&press(KeyCode::Tab, KeyModifiers::NONE)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut up = Binding::new(vec![KeyCode::Up]).with_help("↑", "up");
        assert!(up.matches(&press(KeyCode::Up, KeyModifiers::NONE)));
        up.set_enabled(false);
        assert!(!up.matches(&press(KeyCode::Up, KeyModifiers::NONE)));
        assert!(!Binding::default().enabled());
    }

    #[test]
    fn test_short_help_line() {
        struct Map {
            a: Binding,
            b: Binding,
        }
        impl KeyMap for Map {
            fn short_help(&self) -> Vec<&Binding> {
                vec![&self.a, &self.b]
            }
            fn full_help(&self) -> Vec<Vec<&Binding>> {
                vec![vec![&self.a, &self.b]]
            }
        }
        let map = Map {
            a: Binding::new(vec![KeyCode::Enter]).with_help("enter", "select"),
            b: Binding::new(vec![KeyCode::Esc]).with_help("esc", "close"),
        };
        assert_eq!(short_help_line(&map), "enter select • esc close");
    }
}
