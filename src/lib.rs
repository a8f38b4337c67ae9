#![warn(missing_docs)]

//! # alumni-portal
//!
//! Terminal rendition of an alumni registration page, built from small
//! [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs) components.
//!
//! The interesting piece is [`select`]: a searchable select that switches
//! between a display line and a live-filtered search list, and closes itself
//! when the pointer goes down anywhere outside it. The rest of the crate is
//! the form around it.
//!
//! ## Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`select::Model`] | Searchable select over a fixed [`CandidateList`] |
//! | [`field::Model`] | Single-line text field |
//! | [`form::Model`] | The registration and login panels |
//!
//! ## Outside presses
//!
//! Every mouse press the host receives is dispatched through a
//! [`PointerHub`]; components that care about presses outside their own
//! area subscribe to it and get a guard that unsubscribes on drop.
//!
//! ```rust
//! use alumni_portal::prelude::*;
//!
//! let hub = PointerHub::new();
//! let mut state = Select::new(CandidateList::new(["Delhi", "Goa"]));
//! state.mount(&hub);
//! state.set_origin(0, 0);
//! state.focus();
//! assert!(state.is_open());
//!
//! hub.dispatch(&PointerDown::new(50, 20));
//! assert!(!state.is_open());
//! ```

pub mod candidates;
pub mod field;
pub mod form;
pub mod key;
pub mod pointer;
pub mod runeutil;
pub mod select;
pub mod theme;

use bubbletea_rs::Cmd;

/// Focus management shared by every interactive component.
///
/// Only the focused component reacts to key presses. `focus()` may return a
/// command for the runtime; `blur()` should undo any transient state the
/// component shows while focused.
///
/// ```rust
/// use alumni_portal::prelude::*;
///
/// fn cycle<T: Component>(component: &mut T) {
///     let _cmd: Option<Cmd> = component.focus();
///     assert!(component.focused());
///     component.blur();
///     assert!(!component.focused());
/// }
///
/// let mut name = TextField::new("Enter your Full Name");
/// cycle(&mut name);
/// ```
pub trait Component {
    /// Gives the component keyboard focus.
    fn focus(&mut self) -> Option<Cmd>;

    /// Takes keyboard focus away.
    fn blur(&mut self);

    /// Reports whether the component has keyboard focus.
    fn focused(&self) -> bool;
}

pub use candidates::{CandidateList, FilteredView, STATES_AND_UTS};
pub use field::Model as TextField;
pub use form::{Model as RegistrationForm, Values as RegistrationValues};
pub use key::{new_binding, with_help, with_keys_str, Binding, KeyMap, KeyPress};
pub use pointer::{PointerDown, PointerHub, Region, Subscription};
pub use select::{Mode as SelectMode, Model as Select, Row as SelectRow, WidgetState};
pub use theme::Theme;

/// Convenient imports for building with the crate's components.
///
/// ```rust
/// use alumni_portal::prelude::*;
///
/// let form = RegistrationForm::new();
/// assert_eq!(form.values().state, None);
/// ```
pub mod prelude {
    pub use crate::candidates::{CandidateList, FilteredView, STATES_AND_UTS};
    pub use crate::field::Model as TextField;
    pub use crate::form::{Model as RegistrationForm, Values as RegistrationValues};
    pub use crate::key::{Binding, KeyMap};
    pub use crate::pointer::{PointerDown, PointerHub, Region, Subscription};
    pub use crate::select::{Mode as SelectMode, Model as Select, Row as SelectRow, WidgetState};
    pub use crate::theme::Theme;
    pub use crate::Component;
    pub use bubbletea_rs::Cmd;
}
