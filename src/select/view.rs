//! Rendering for the searchable select.

use super::model::{Model, Row};
use crate::runeutil;
use crate::Component;

/// Marker drawn at the right end of the closed display line.
pub const ARROW: &str = "▼";

impl Model {
    /// Renders the select: one display line while closed; the search box
    /// followed by the visible list rows while open. Every line is exactly
    /// [`Model::width`] columns wide.
    pub fn view(&self) -> String {
        let state = self.state();
        if !state.is_open() {
            return self.display_view(state.selected.as_deref());
        }

        let mut lines = Vec::with_capacity(1 + self.max_visible);
        lines.push(self.search_view(&state.search));
        for row in self.visible_rows() {
            lines.push(self.row_view(&row));
        }
        lines.join("\n")
    }

    fn display_view(&self, selected: Option<&str>) -> String {
        let inner = self.width - 2;
        let background = if self.focused() {
            self.theme.field_focused()
        } else {
            self.theme.field()
        };
        let text = match selected {
            Some(value) => self
                .theme
                .field_text()
                .render(&runeutil::pad(&runeutil::truncate(value, inner), inner)),
            None => self
                .theme
                .placeholder()
                .render(&runeutil::pad(&runeutil::truncate(&self.placeholder, inner), inner)),
        };
        background.render(&format!("{} {}", text, ARROW))
    }

    fn search_view(&self, search: &str) -> String {
        let inner = self.width - 2;
        let body = if search.is_empty() {
            self.theme
                .placeholder()
                .render(&runeutil::pad(&runeutil::truncate(&self.search_placeholder, inner), inner))
        } else {
            let visible = runeutil::tail(search, inner - 1);
            self.theme
                .field_text()
                .render(&runeutil::pad(&format!("{}▏", visible), inner))
        };
        self.theme
            .field_focused()
            .render(&format!("⌕ {}", body))
    }

    fn row_view(&self, row: &Row) -> String {
        let inner = self.width - 1;
        match row {
            Row::Candidate { label, highlighted } => {
                let text = format!(" {}", runeutil::pad(&runeutil::truncate(label, inner), inner));
                if *highlighted {
                    self.theme.row_highlighted().render(&text)
                } else {
                    self.theme.row().render(&text)
                }
            }
            Row::NoResults => {
                let text = format!(
                    " {}",
                    runeutil::pad(&runeutil::truncate(&self.no_results_text, inner), inner)
                );
                self.theme.no_results().render(&text)
            }
        }
    }
}
