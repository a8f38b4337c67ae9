//! Searchable select (combo-box) component.
//!
//! While closed the select renders a single display line with the current
//! selection, or a placeholder and a `▼` marker. Focusing it opens a search
//! box; every keystroke refilters the candidate list with a case-insensitive
//! literal substring match. Picking an entry commits it and closes the list;
//! a press anywhere outside the select's area closes it without changing the
//! selection. Both ways of closing clear the search text.
//!
//! # Outside presses
//!
//! The host owns the screen, so it reports two things: where it drew the
//! select ([`Model::set_origin`]) and every pointer press, through a
//! [`PointerHub`](crate::pointer::PointerHub) the select is mounted on.
//!
//! ```rust
//! use alumni_portal::candidates::CandidateList;
//! use alumni_portal::pointer::{PointerDown, PointerHub};
//! use alumni_portal::select;
//!
//! let hub = PointerHub::new();
//! let mut state = select::new(CandidateList::new(["Delhi", "Goa", "Gujarat", "Kerala"]));
//! state.mount(&hub);
//! state.set_origin(0, 0);
//!
//! state.focus_display();
//! state.set_search_text("Go");
//! assert!(state.click_item("Goa"));
//! assert_eq!(state.selected().as_deref(), Some("Goa"));
//! assert_eq!(state.search_text(), "");
//!
//! state.unmount();
//! assert_eq!(hub.listener_count(), 0);
//! ```

pub mod keymap;
pub mod model;
pub mod view;


pub use keymap::{default_key_map, KeyMap};
pub use model::{new, Mode, Model, Row, WidgetState};
pub use view::ARROW;
