//! State machine and lifecycle of the searchable select.

use super::keymap::{default_key_map, KeyMap};
use crate::candidates::{CandidateList, FilteredView};
use crate::pointer::{PointerDown, PointerHub, Region, Subscription};
use crate::runeutil;
use crate::theme::Theme;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, MouseMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Whether the select shows its display line or its search box and list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Display line with the current selection or the placeholder.
    #[default]
    Closed,
    /// Search box with the filtered list below it.
    Open,
}

/// The mutable state of one select.
///
/// `search` is only meaningful while open; every transition into
/// [`Mode::Closed`] clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetState {
    /// The committed selection.
    pub selected: Option<String>,
    /// Contents of the search box.
    pub search: String,
    /// Current mode.
    pub mode: Mode,
}

impl WidgetState {
    /// Reports whether the select is open.
    pub fn is_open(&self) -> bool {
        self.mode == Mode::Open
    }

    fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.mode = Mode::Open;
        tracing::debug!(selected = ?self.selected, "select opened");
        true
    }

    fn set_search(&mut self, text: String) -> bool {
        if !self.is_open() {
            return false;
        }
        tracing::debug!(search = %text, "select search changed");
        self.search = text;
        true
    }

    fn select(&mut self, value: &str) {
        self.selected = Some(value.to_string());
        self.search.clear();
        self.mode = Mode::Closed;
        tracing::debug!(selected = value, "select committed");
    }

    fn dismiss(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.search.clear();
        self.mode = Mode::Closed;
        tracing::debug!(selected = ?self.selected, "select dismissed");
        true
    }
}

/// State shared with the outside-click handler.
#[derive(Debug, Default)]
pub(super) struct Shared {
    pub(super) state: WidgetState,
    origin: Option<(u16, u16)>,
    width: u16,
    rows: u16,
}

impl Shared {
    fn height(&self) -> u16 {
        if self.state.is_open() {
            1 + self.rows
        } else {
            1
        }
    }

    fn region(&self) -> Option<Region> {
        self.origin
            .map(|(x, y)| Region::new(x, y, self.width, self.height()))
    }

    fn on_pointer_down(&mut self, event: &PointerDown) {
        if !self.state.is_open() {
            return;
        }
        // Never positioned by the host: nothing on screen can be inside.
        let inside = self.region().is_some_and(|r| event.is_inside(&r));
        if !inside {
            tracing::debug!(column = event.column, row = event.row, "pointer down outside select");
            self.state.dismiss();
        }
    }
}

pub(super) fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One rendered row of the open list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// A selectable candidate.
    Candidate {
        /// The candidate label.
        label: String,
        /// Whether the keyboard highlight is on this row.
        highlighted: bool,
    },
    /// Shown instead of zero rows when nothing matches. Not selectable.
    NoResults,
}

/// A combo-box that toggles between a display line and a live-filtered
/// search list.
///
/// The select subscribes to a [`PointerHub`] when mounted and closes itself
/// when a press lands outside the area the host reported for it. Dropping the
/// model, or calling [`Model::unmount`], removes that subscription.
///
/// # Examples
///
/// ```rust
/// use alumni_portal::candidates::CandidateList;
/// use alumni_portal::pointer::{PointerDown, PointerHub};
/// use alumni_portal::select::Model;
///
/// let hub = PointerHub::new();
/// let mut state = Model::new(CandidateList::new(["Delhi", "Goa", "Gujarat", "Kerala"]));
/// state.mount(&hub);
/// state.set_origin(10, 4);
///
/// state.focus_display();
/// state.set_search_text("go");
/// assert_eq!(state.filtered().collect::<Vec<_>>(), vec!["Goa"]);
///
/// // a press far away closes the list and keeps the selection empty
/// hub.dispatch(&PointerDown::new(0, 0));
/// assert!(!state.is_open());
/// assert_eq!(state.selected(), None);
/// ```
#[derive(Debug)]
pub struct Model {
    /// Text on the closed display line when nothing is selected.
    pub placeholder: String,
    /// Text in the empty search box.
    pub search_placeholder: String,
    /// Text of the row shown when nothing matches.
    pub no_results_text: String,
    /// Key bindings.
    pub key_map: KeyMap,
    /// Colours.
    pub theme: Theme,
    pub(super) candidates: CandidateList,
    pub(super) shared: Arc<Mutex<Shared>>,
    pub(super) max_visible: usize,
    pub(super) width: usize,
    pub(super) highlight: usize,
    pub(super) offset: usize,
    subscription: Option<Subscription>,
    hub: Option<PointerHub>,
    focus: bool,
}

/// Creates a closed, unmounted select over `candidates`.
pub fn new(candidates: CandidateList) -> Model {
    let width = 32;
    let shared = Shared {
        width: width as u16,
        ..Shared::default()
    };
    Model {
        placeholder: String::from("Select your College State*"),
        search_placeholder: String::from("Search for States/UTs"),
        no_results_text: String::from("No results found"),
        key_map: default_key_map(),
        theme: Theme::default(),
        candidates,
        shared: Arc::new(Mutex::new(shared)),
        max_visible: 6,
        width,
        highlight: 0,
        offset: 0,
        subscription: None,
        hub: None,
        focus: false,
    }
}

impl Model {
    /// Creates a closed, unmounted select over `candidates`.
    pub fn new(candidates: CandidateList) -> Self {
        new(candidates)
    }

    /// Sets the display placeholder.
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Sets the search box placeholder.
    pub fn with_search_placeholder(mut self, text: impl Into<String>) -> Self {
        self.search_placeholder = text.into();
        self
    }

    /// Sets the text of the "no results" row.
    pub fn with_no_results_text(mut self, text: impl Into<String>) -> Self {
        self.no_results_text = text.into();
        self
    }

    /// Sets how many list rows are visible at once (at least one).
    pub fn with_max_visible(mut self, rows: usize) -> Self {
        self.max_visible = rows.max(1);
        self.sync_rows();
        self
    }

    /// Sets the width in columns.
    pub fn with_width(mut self, width: usize) -> Self {
        self.set_width(width);
        self
    }

    /// Sets the colours.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the width in columns (at least four).
    pub fn set_width(&mut self, width: usize) {
        self.width = width.max(4);
        lock(&self.shared).width = u16::try_from(self.width).unwrap_or(u16::MAX);
    }

    /// Width in columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The candidate list.
    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    // Lifecycle

    /// Subscribes to `hub` for outside-click detection. A select is mounted
    /// on at most one hub; mounting again moves the subscription.
    pub fn mount(&mut self, hub: &PointerHub) {
        self.unmount();
        let shared = Arc::clone(&self.shared);
        self.subscription = Some(hub.subscribe(move |event| {
            lock(&shared).on_pointer_down(event);
        }));
        self.hub = Some(hub.clone());
        tracing::debug!("select mounted");
    }

    /// Removes the outside-click subscription. Presses dispatched afterwards
    /// never reach this select.
    pub fn unmount(&mut self) {
        self.hub = None;
        if self.subscription.take().is_some() {
            tracing::debug!("select unmounted");
        }
    }

    /// Reports whether the select holds a pointer subscription.
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Records where the host drew the select (top-left cell).
    pub fn set_origin(&mut self, x: u16, y: u16) {
        lock(&self.shared).origin = Some((x, y));
    }

    /// The screen area the select currently occupies, once positioned.
    pub fn region(&self) -> Option<Region> {
        lock(&self.shared).region()
    }

    /// Number of lines [`Model::view`] renders.
    pub fn height(&self) -> usize {
        usize::from(lock(&self.shared).height())
    }

    // State

    /// A copy of the current state.
    pub fn state(&self) -> WidgetState {
        lock(&self.shared).state.clone()
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        lock(&self.shared).state.mode
    }

    /// Reports whether the search list is showing.
    pub fn is_open(&self) -> bool {
        lock(&self.shared).state.is_open()
    }

    /// The committed selection.
    pub fn selected(&self) -> Option<String> {
        lock(&self.shared).state.selected.clone()
    }

    /// The search text (always empty while closed).
    pub fn search_text(&self) -> String {
        lock(&self.shared).state.search.clone()
    }

    /// Candidates matching the current search text, recomputed on each call.
    pub fn filtered(&self) -> FilteredView<'_> {
        let search = self.search_text();
        self.candidates.filter(&search)
    }

    /// The keyboard-highlighted candidate, if the list is open and non-empty.
    pub fn highlighted(&self) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        self.filtered().nth(self.highlight).map(str::to_string)
    }

    /// The rows of the open list inside the visible window. Empty while
    /// closed; exactly one [`Row::NoResults`] when nothing matches.
    pub fn visible_rows(&self) -> Vec<Row> {
        if !self.is_open() {
            return Vec::new();
        }
        let rows: Vec<Row> = self
            .filtered()
            .enumerate()
            .skip(self.offset)
            .take(self.max_visible)
            .map(|(i, label)| Row::Candidate {
                label: label.to_string(),
                highlighted: i == self.highlight,
            })
            .collect();
        if rows.is_empty() {
            vec![Row::NoResults]
        } else {
            rows
        }
    }

    // Transitions

    /// The display line received focus: open the search list. The selection
    /// is untouched and the search starts empty.
    pub fn focus_display(&mut self) -> bool {
        let opened = lock(&self.shared).state.open();
        if opened {
            self.highlight = 0;
            self.offset = 0;
            self.sync_rows();
        }
        opened
    }

    /// Replaces the search text. Ignored while closed. The text is stored the
    /// way [`runeutil::sanitize`] leaves it: tabs and line breaks become
    /// spaces and other control characters are dropped.
    pub fn set_search_text(&mut self, text: &str) -> bool {
        let changed = lock(&self.shared).state.set_search(runeutil::sanitize(text));
        if changed {
            self.highlight = 0;
            self.offset = 0;
            self.sync_rows();
        }
        changed
    }

    /// An entry of the open list was clicked: commit `value`, clear the
    /// search and close. Values not in the current filtered list (including
    /// the "no results" text) are refused.
    pub fn click_item(&mut self, value: &str) -> bool {
        if !self.is_open() || !self.filtered().any(|label| label == value) {
            return false;
        }
        lock(&self.shared).state.select(value);
        self.sync_rows();
        true
    }

    /// Closes the list without changing the selection, clearing the search.
    /// This is what an outside press or `esc` does.
    pub fn dismiss(&mut self) -> bool {
        lock(&self.shared).state.dismiss()
    }

    /// Selects the highlighted entry.
    pub fn select_highlighted(&mut self) -> bool {
        match self.highlighted() {
            Some(value) => self.click_item(&value),
            None => false,
        }
    }

    /// Moves the highlight one row down, scrolling as needed.
    pub fn highlight_next(&mut self) {
        let count = self.filtered().count();
        if count > 0 && self.highlight + 1 < count {
            self.highlight += 1;
            self.sync_viewport();
        }
    }

    /// Moves the highlight one row up, scrolling as needed.
    pub fn highlight_prev(&mut self) {
        if self.highlight > 0 {
            self.highlight -= 1;
            self.sync_viewport();
        }
    }

    /// Handles a press the host found inside this select's area: on the
    /// closed display it opens, on a candidate row it selects. Returns
    /// whether the press was inside.
    pub fn pointer_down(&mut self, event: &PointerDown) -> bool {
        let region = match self.region() {
            Some(region) if event.is_inside(&region) => region,
            _ => return false,
        };

        if !self.is_open() {
            self.focus_display();
            return true;
        }

        let line = usize::from(event.row - region.y);
        if line == 0 {
            // search box
            return true;
        }
        if let Some(Row::Candidate { label, .. }) = self.visible_rows().get(line - 1).cloned() {
            self.click_item(&label);
        }
        true
    }

    /// Handles a press for a select that is the whole program: dispatches it
    /// through the hub the select is mounted on, then handles it like
    /// [`Model::pointer_down`]. Hosts that dispatch presses themselves call
    /// `pointer_down` instead.
    pub fn press(&mut self, event: &PointerDown) -> bool {
        if let Some(hub) = &self.hub {
            hub.dispatch(event);
        }
        self.pointer_down(event)
    }

    /// Handles key presses. Presses are ignored unless the select has focus.
    /// A [`PointerDown`] message is passed to [`Model::pointer_down`] without
    /// being dispatched.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(event) = msg.downcast_ref::<PointerDown>() {
            self.pointer_down(event);
            return None;
        }
        if !self.focus {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;

        if !self.is_open() {
            if self.key_map.open.matches(key_msg) {
                self.focus_display();
            }
            return None;
        }

        if self.key_map.dismiss.matches(key_msg) {
            self.dismiss();
        } else if self.key_map.select.matches(key_msg) {
            self.select_highlighted();
        } else if self.key_map.up.matches(key_msg) {
            self.highlight_prev();
        } else if self.key_map.down.matches(key_msg) {
            self.highlight_next();
        } else if self.key_map.delete_backward.matches(key_msg) {
            let mut search = self.search_text();
            if runeutil::pop_grapheme(&mut search).is_some() {
                self.set_search_text(&search);
            }
        } else if self.key_map.clear_search.matches(key_msg) {
            self.set_search_text("");
        } else if let KeyCode::Char(c) = key_msg.key {
            if !key_msg
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                let mut search = self.search_text();
                search.push(c);
                self.set_search_text(&search);
            }
        }
        None
    }

    fn sync_rows(&mut self) {
        let count = self.filtered().take(self.max_visible).count();
        let rows = count.max(1);
        lock(&self.shared).rows = u16::try_from(rows).unwrap_or(u16::MAX);
    }

    fn sync_viewport(&mut self) {
        if self.highlight >= self.offset + self.max_visible {
            self.offset = self.highlight + 1 - self.max_visible;
        }
        if self.highlight < self.offset {
            self.offset = self.highlight;
        }
    }
}

impl Component for Model {
    /// Keyboard focus lands on the display line, which opens the list.
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        self.focus_display();
        None
    }

    /// Leaving the select closes it the same way an outside press does.
    fn blur(&mut self) {
        self.focus = false;
        self.dismiss();
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

/// Run on its own, the select fills the top left of the screen, listens on
/// [`PointerHub::global`] and starts focused.
impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut select = new(crate::candidates::STATES_AND_UTS.clone());
        select.mount(PointerHub::global());
        select.set_origin(0, 0);
        let cmd = select.focus();
        (select, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let press = msg.downcast_ref::<PointerDown>().copied().or_else(|| {
            msg.downcast_ref::<MouseMsg>()
                .and_then(PointerDown::from_mouse_msg)
        });
        if let Some(press) = press {
            self.press(&press);
            return None;
        }
        Model::update(self, &msg)
    }

    fn view(&self) -> String {
        Model::view(self)
    }
}
