//! Key bindings for the searchable select.

use crate::key::{self, KeyMap as KeyMapTrait};

/// Key bindings of the searchable select.
///
/// Printable characters that match none of these bindings are typed into the
/// search box while the select is open.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Open the list from the closed display.
    pub open: key::Binding,
    /// Move the highlight up.
    pub up: key::Binding,
    /// Move the highlight down.
    pub down: key::Binding,
    /// Select the highlighted entry.
    pub select: key::Binding,
    /// Close without changing the selection.
    pub dismiss: key::Binding,
    /// Delete the last character of the search text.
    pub delete_backward: key::Binding,
    /// Clear the search text.
    pub clear_search: key::Binding,
}

/// Default bindings: enter/space/↓ to open, ↑/↓ to move, enter to pick,
/// esc to close.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        open: key::new_binding(vec![
            key::with_keys_str(&["enter", "space", "down"]),
            key::with_help("enter", "open"),
        ]),
        up: key::new_binding(vec![
            key::with_keys_str(&["up", "ctrl+p"]),
            key::with_help("↑", "up"),
        ]),
        down: key::new_binding(vec![
            key::with_keys_str(&["down", "ctrl+n"]),
            key::with_help("↓", "down"),
        ]),
        select: key::new_binding(vec![
            key::with_keys_str(&["enter"]),
            key::with_help("enter", "select"),
        ]),
        dismiss: key::new_binding(vec![
            key::with_keys_str(&["esc"]),
            key::with_help("esc", "close"),
        ]),
        delete_backward: key::new_binding(vec![
            key::with_keys_str(&["backspace", "ctrl+h"]),
            key::with_help("⌫", "delete"),
        ]),
        clear_search: key::new_binding(vec![
            key::with_keys_str(&["ctrl+u"]),
            key::with_help("ctrl+u", "clear search"),
        ]),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl KeyMapTrait for KeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.up, &self.down, &self.select, &self.dismiss]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.open, &self.up, &self.down],
            vec![&self.select, &self.dismiss],
            vec![&self.delete_backward, &self.clear_search],
        ]
    }
}
