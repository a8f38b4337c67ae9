//! The alumni registration page.
//!
//! Two panels side by side: the register panel with the detail fields, the
//! state select and an inert "Next" button, and the accent-coloured login
//! panel with an inert "Sign in" button. Nothing is validated or submitted;
//! [`Model::values`] exposes what was entered.
//!
//! The form is the host of its select: it lays out every control itself, so
//! it knows where each one is on screen. It tells the select where it was
//! drawn, dispatches every mouse press through its [`PointerHub`] and then
//! hands the press to the control underneath.

use crate::candidates::STATES_AND_UTS;
use crate::field;
use crate::key::{self, KeyMap as KeyMapTrait};
use crate::pointer::{PointerDown, PointerHub, Region};
use crate::select;
use crate::theme::Theme;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, MouseMsg, Msg};
use lipgloss_extras::lipgloss;

const LEFT_WIDTH: usize = 40;
const RIGHT_WIDTH: usize = 40;
const INDENT: &str = "  ";
const FIELD_WIDTH: usize = 34;

/// The focusable controls, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Full name field.
    FullName,
    /// College state select.
    State,
    /// College field.
    College,
    /// "Participated in" field.
    Participated,
    /// Email field.
    Email,
    /// The inert "Next" button.
    Next,
    /// The inert "Sign in" button.
    SignIn,
}

const ORDER: [Focus; 7] = [
    Focus::FullName,
    Focus::State,
    Focus::College,
    Focus::Participated,
    Focus::Email,
    Focus::Next,
    Focus::SignIn,
];

impl Focus {
    fn position(self) -> usize {
        ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        ORDER[(self.position() + 1) % ORDER.len()]
    }

    fn prev(self) -> Self {
        ORDER[(self.position() + ORDER.len() - 1) % ORDER.len()]
    }
}

/// Everything the user entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Values {
    /// Full name.
    pub full_name: String,
    /// College state, once one was picked.
    pub state: Option<String>,
    /// College.
    pub college: String,
    /// Event the user participated in.
    pub participated_in: String,
    /// Current email address.
    pub email: String,
}

/// Form-level key bindings. Keys not bound here go to the focused control.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Focus the next control.
    pub next_field: key::Binding,
    /// Focus the previous control.
    pub prev_field: key::Binding,
    /// Activate the focused button.
    pub press: key::Binding,
    /// Leave the program.
    pub quit: key::Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            next_field: key::new_binding(vec![
                key::with_keys_str(&["tab"]),
                key::with_help("tab", "next"),
            ]),
            prev_field: key::new_binding(vec![
                key::with_keys_str(&["shift+tab"]),
                key::with_help("shift+tab", "back"),
            ]),
            press: key::new_binding(vec![
                key::with_keys_str(&["enter", "space"]),
                key::with_help("enter", "press"),
            ]),
            quit: key::new_binding(vec![
                key::with_keys_str(&["ctrl+c"]),
                key::with_help("ctrl+c", "quit"),
            ]),
        }
    }
}

impl KeyMapTrait for KeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.next_field, &self.prev_field, &self.quit]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.next_field, &self.prev_field],
            vec![&self.press, &self.quit],
        ]
    }
}

struct Layout {
    lines: Vec<String>,
    targets: Vec<(Focus, Region)>,
    select_origin: (u16, u16),
}

/// The registration page.
#[derive(Debug)]
pub struct Model {
    /// Full name field.
    pub full_name: field::Model,
    /// College state select.
    pub state: select::Model,
    /// College field.
    pub college: field::Model,
    /// "Participated in" field.
    pub participated: field::Model,
    /// Email field.
    pub email: field::Model,
    /// Form-level key bindings.
    pub key_map: KeyMap,
    theme: Theme,
    hub: PointerHub,
    focus: Focus,
    origin: (u16, u16),
    targets: Vec<(Focus, Region)>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates the page on the process-wide pointer hub, drawn at the top
    /// left of the screen, with the full name field focused.
    pub fn new() -> Self {
        Self::with_hub(PointerHub::global().clone())
    }

    /// Creates the page on `hub`.
    pub fn with_hub(hub: PointerHub) -> Self {
        let mut state = select::new(STATES_AND_UTS.clone()).with_width(FIELD_WIDTH);
        state.mount(&hub);

        let mut form = Self {
            full_name: field::Model::new("Enter your Full Name")
                .required(true)
                .with_icon("☺")
                .with_width(FIELD_WIDTH),
            state,
            college: field::Model::new("Select your College*")
                .with_icon("⌂")
                .with_width(FIELD_WIDTH),
            participated: field::Model::new("Participated in :*")
                .with_icon("◆")
                .with_width(FIELD_WIDTH),
            email: field::Model::new("Enter your Current Email Address*")
                .with_icon("✉")
                .with_width(FIELD_WIDTH),
            key_map: KeyMap::default(),
            theme: Theme::default(),
            hub,
            focus: Focus::FullName,
            origin: (0, 0),
            targets: Vec::new(),
        };
        form.full_name.focus();
        form.sync_layout();
        form
    }

    /// Moves the page on screen.
    pub fn with_origin(mut self, x: u16, y: u16) -> Self {
        self.origin = (x, y);
        self.sync_layout();
        self
    }

    /// Restyles the page and every control on it.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.full_name.theme = theme.clone();
        self.state.theme = theme.clone();
        self.college.theme = theme.clone();
        self.participated.theme = theme.clone();
        self.email.theme = theme.clone();
        self.theme = theme;
        self
    }

    /// The hub presses are dispatched through.
    pub fn hub(&self) -> &PointerHub {
        &self.hub
    }

    /// The focused control.
    pub fn focused(&self) -> Focus {
        self.focus
    }

    /// What was entered so far.
    pub fn values(&self) -> Values {
        Values {
            full_name: self.full_name.value().to_string(),
            state: self.state.selected(),
            college: self.college.value().to_string(),
            participated_in: self.participated.value().to_string(),
            email: self.email.value().to_string(),
        }
    }

    /// Screen areas of the focusable controls as of the last update.
    pub fn targets(&self) -> &[(Focus, Region)] {
        &self.targets
    }

    /// The control under `press`, if any.
    pub fn target_at(&self, press: &PointerDown) -> Option<Focus> {
        self.targets
            .iter()
            .find(|(_, region)| press.is_inside(region))
            .map(|(focus, _)| *focus)
    }

    /// Moves keyboard focus to `target`.
    pub fn set_focus(&mut self, target: Focus) {
        if target == self.focus {
            return;
        }
        let previous = self.focus;
        if let Some(control) = self.control(previous) {
            control.blur();
        }
        self.focus = target;
        if let Some(control) = self.control(target) {
            control.focus();
        }
        tracing::debug!(focus = ?target, "form focus moved");
        self.sync_layout();
    }

    /// Focuses the next control in tab order.
    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    /// Focuses the previous control in tab order.
    pub fn focus_prev(&mut self) {
        self.set_focus(self.focus.prev());
    }

    /// Handles a press anywhere on screen: first the document-level
    /// dispatch, then the control that was under the pointer.
    pub fn pointer_down(&mut self, press: PointerDown) {
        let target = self.target_at(&press);
        self.hub.dispatch(&press);

        if let Some(target) = target {
            self.set_focus(target);
            match target {
                Focus::State => {
                    self.state.pointer_down(&press);
                }
                Focus::Next | Focus::SignIn => press_inert(target),
                _ => {}
            }
        }
        self.sync_layout();
    }

    /// Handles key presses and mouse presses.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let press = msg.downcast_ref::<PointerDown>().copied().or_else(|| {
            msg.downcast_ref::<MouseMsg>()
                .and_then(PointerDown::from_mouse_msg)
        });
        if let Some(press) = press {
            self.pointer_down(press);
            return None;
        }

        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.key_map.quit.matches(key_msg) {
            return Some(bubbletea_rs::quit());
        }
        if self.key_map.next_field.matches(key_msg) {
            self.focus_next();
            return None;
        }
        if self.key_map.prev_field.matches(key_msg) {
            self.focus_prev();
            return None;
        }

        let cmd = match self.focus {
            Focus::FullName => self.full_name.update(msg),
            Focus::State => self.state.update(msg),
            Focus::College => self.college.update(msg),
            Focus::Participated => self.participated.update(msg),
            Focus::Email => self.email.update(msg),
            Focus::Next | Focus::SignIn => {
                if self.key_map.press.matches(key_msg) {
                    press_inert(self.focus);
                }
                None
            }
        };
        self.sync_layout();
        cmd
    }

    /// Renders both panels.
    pub fn view(&self) -> String {
        let mut out = self.layout().lines.join("\n");
        out.push('\n');
        out.push_str(
            &self
                .theme
                .placeholder()
                .render(&key::short_help_line(&self.key_map)),
        );
        out
    }

    fn control(&mut self, focus: Focus) -> Option<&mut dyn Component> {
        match focus {
            Focus::FullName => Some(&mut self.full_name),
            Focus::State => Some(&mut self.state),
            Focus::College => Some(&mut self.college),
            Focus::Participated => Some(&mut self.participated),
            Focus::Email => Some(&mut self.email),
            Focus::Next | Focus::SignIn => None,
        }
    }

    fn sync_layout(&mut self) {
        let layout = self.layout();
        let (x, y) = layout.select_origin;
        self.state.set_origin(x, y);
        self.targets = layout.targets;
    }

    fn layout(&self) -> Layout {
        let (ox, oy) = self.origin;
        let mut left: Vec<String> = Vec::new();
        let mut targets = Vec::new();

        let at = |row: usize| oy.saturating_add(row as u16);
        let field_width = (FIELD_WIDTH + 2) as u16;

        left.push(String::new());
        left.push(format!("{}{}", INDENT, self.theme.heading().render("Fill Your Details")));
        left.push(format!("{}{}", INDENT, self.theme.heading().render("━━━━")));
        left.push(String::new());

        targets.push((
            Focus::FullName,
            Region::new(ox + INDENT.len() as u16, at(left.len()), field_width, 1),
        ));
        left.push(format!("{}{}", INDENT, self.full_name.view()));
        left.push(String::new());

        // select: icon, then the select's own lines
        let select_row = left.len();
        let select_x = ox + INDENT.len() as u16 + 2;
        let icon = self.theme.placeholder().render("⌖");
        for (i, line) in self.state.view().lines().enumerate() {
            if i == 0 {
                left.push(format!("{}{} {}", INDENT, icon, line));
            } else {
                left.push(format!("{}  {}", INDENT, line));
            }
        }
        targets.push((
            Focus::State,
            Region::new(
                select_x,
                at(select_row),
                FIELD_WIDTH as u16,
                self.state.height() as u16,
            ),
        ));
        left.push(String::new());

        for (focus, control) in [
            (Focus::College, &self.college),
            (Focus::Participated, &self.participated),
            (Focus::Email, &self.email),
        ] {
            targets.push((
                focus,
                Region::new(ox + INDENT.len() as u16, at(left.len()), field_width, 1),
            ));
            left.push(format!("{}{}", INDENT, control.view()));
            left.push(String::new());
        }

        let link = "Lost Your SIH Email";
        left.push(format!(
            "{}{}",
            " ".repeat(INDENT.len() + FIELD_WIDTH + 2 - link.len()),
            self.theme.link().render(link)
        ));
        left.push(String::new());

        let next = self.theme.button(self.focus == Focus::Next).render("Next");
        let next_row = left.len();
        let next_width = block_width(&next);
        let next_indent = (LEFT_WIDTH.saturating_sub(next_width)) / 2;
        for line in next.lines() {
            left.push(format!("{}{}", " ".repeat(next_indent), line));
        }
        targets.push((
            Focus::Next,
            Region::new(
                ox + next_indent as u16,
                at(next_row),
                next_width as u16,
                next.lines().count() as u16,
            ),
        ));
        left.push(String::new());

        // login panel
        let mut right: Vec<String> = vec![String::new(); 3];
        right.push(format!("   {}", self.theme.heading_inverse().render("Hello, SIH Alumni!")));
        right.push(format!("   {}", self.theme.heading_inverse().render("━━━━")));
        right.push(String::new());
        right.push("   Now you know your Email Address!".to_string());
        right.push("   Login Here".to_string());
        right.push(String::new());
        right.push(String::new());

        let sign_in = self
            .theme
            .button_inverse(self.focus == Focus::SignIn)
            .render("Sign in");
        let sign_in_row = right.len();
        let sign_in_width = block_width(&sign_in);
        let sign_in_indent = (RIGHT_WIDTH.saturating_sub(sign_in_width)) / 2;
        for line in sign_in.lines() {
            right.push(format!("{}{}", " ".repeat(sign_in_indent), line));
        }
        targets.push((
            Focus::SignIn,
            Region::new(
                ox + (LEFT_WIDTH + sign_in_indent) as u16,
                at(sign_in_row),
                sign_in_width as u16,
                sign_in.lines().count() as u16,
            ),
        ));

        let height = left.len().max(right.len());
        let panel = self.theme.panel_inverse();
        let lines = (0..height)
            .map(|row| {
                let l = left.get(row).map(String::as_str).unwrap_or("");
                let r = right.get(row).map(String::as_str).unwrap_or("");
                format!(
                    "{}{}",
                    pad_visible(l, LEFT_WIDTH),
                    panel.render(&pad_visible(r, RIGHT_WIDTH))
                )
            })
            .collect();

        Layout {
            lines,
            targets,
            select_origin: (select_x, at(select_row)),
        }
    }
}

fn press_inert(target: Focus) {
    tracing::debug!(action = ?target, "inert action pressed");
}

fn block_width(block: &str) -> usize {
    block
        .lines()
        .map(lipgloss::width_visible)
        .max()
        .unwrap_or(0)
}

fn pad_visible(line: &str, width: usize) -> String {
    let visible = lipgloss::width_visible(line);
    if visible >= width {
        return line.to_string();
    }
    format!("{}{}", line, " ".repeat(width - visible))
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(), None)
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
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn type_text(form: &mut Model, text: &str) {
        for c in text.chars() {
            form.update(&key(KeyCode::Char(c)));
        }
    }

    fn press(form: &mut Model, region: Region) {
        let msg: Msg = Box::new(PointerDown::new(region.x, region.y));
        form.update(&msg);
    }

    fn region_of(form: &Model, focus: Focus) -> Region {
        form.targets()
            .iter()
            .find(|(f, _)| *f == focus)
            .map(|(_, r)| *r)
            .unwrap()
    }

    fn plain(view: &str) -> String {
        strip_ansi_escapes::strip_str(view)
    }

    #[test]
    fn test_initial_focus_and_values() {
        let form = Model::with_hub(PointerHub::new());
        assert_eq!(form.focused(), Focus::FullName);
        assert_eq!(form.values(), Values::default());
        assert_eq!(form.hub().listener_count(), 1);
    }

    #[test]
    fn test_tab_order_wraps() {
        let mut form = Model::with_hub(PointerHub::new());
        let mut seen = vec![form.focused()];
        for _ in 0..7 {
            form.update(&key(KeyCode::Tab));
            seen.push(form.focused());
        }
        assert_eq!(&seen[..7], &ORDER[..]);
        assert_eq!(seen[7], Focus::FullName);

        let back: Msg = Box::new(KeyMsg {
            key: KeyCode::BackTab,
            modifiers: KeyModifiers::SHIFT,
        });
        form.update(&back);
        assert_eq!(form.focused(), Focus::SignIn);
    }

    #[test]
    fn test_fill_in_everything() {
        let mut form = Model::with_hub(PointerHub::new());
        type_text(&mut form, "Asha Rao");

        form.update(&key(KeyCode::Tab));
        assert!(form.state.is_open(), "tabbing onto the select opens it");
        type_text(&mut form, "kera");
        form.update(&key(KeyCode::Enter));

        form.update(&key(KeyCode::Tab));
        type_text(&mut form, "CUSAT");
        form.update(&key(KeyCode::Tab));
        type_text(&mut form, "SIH 2022");
        form.update(&key(KeyCode::Tab));
        type_text(&mut form, "asha@example.org");

        assert_eq!(
            form.values(),
            Values {
                full_name: "Asha Rao".to_string(),
                state: Some("Kerala".to_string()),
                college: "CUSAT".to_string(),
                participated_in: "SIH 2022".to_string(),
                email: "asha@example.org".to_string(),
            }
        );
    }

    #[test]
    fn test_tabbing_away_closes_select() {
        let mut form = Model::with_hub(PointerHub::new());
        form.update(&key(KeyCode::Tab));
        type_text(&mut form, "go");
        form.update(&key(KeyCode::Tab));
        assert!(!form.state.is_open());
        assert_eq!(form.state.search_text(), "");
        assert_eq!(form.values().state, None);
    }

    #[test]
    fn test_click_select_then_click_elsewhere() {
        let mut form = Model::with_hub(PointerHub::new());
        let state = region_of(&form, Focus::State);
        press(&mut form, state);
        assert_eq!(form.focused(), Focus::State);
        assert!(form.state.is_open());

        // the select grew, so the college field moved down
        let college = region_of(&form, Focus::College);
        assert!(college.y > state.y + 1);

        press(&mut form, college);
        assert!(!form.state.is_open());
        assert_eq!(form.focused(), Focus::College);
        assert_eq!(form.values().state, None);
    }

    #[test]
    fn test_click_a_row_selects_it() {
        let mut form = Model::with_hub(PointerHub::new());
        let state = region_of(&form, Focus::State);
        press(&mut form, state);
        type_text(&mut form, "pradesh");

        // rows below the search line: Andhra, Arunachal, Himachal, ...
        let row = PointerDown::new(state.x + 1, state.y + 2);
        form.pointer_down(row);

        assert_eq!(form.values().state.as_deref(), Some("Arunachal Pradesh"));
        assert!(!form.state.is_open());
        assert_eq!(form.state.search_text(), "");
    }

    #[test]
    fn test_press_on_blank_area_dismisses() {
        let mut form = Model::with_hub(PointerHub::new());
        form.update(&key(KeyCode::Tab));
        type_text(&mut form, "del");
        form.pointer_down(PointerDown::new(0, 0));
        assert!(!form.state.is_open());
        assert_eq!(form.state.search_text(), "");
        assert_eq!(form.focused(), Focus::State);
    }

    #[test]
    fn test_select_origin_follows_layout() {
        let form = Model::with_hub(PointerHub::new()).with_origin(3, 2);
        let state = region_of(&form, Focus::State);
        assert_eq!(form.state.region(), Some(state));
    }

    #[test]
    fn test_buttons_are_inert() {
        let mut form = Model::with_hub(PointerHub::new());
        let next = region_of(&form, Focus::Next);
        press(&mut form, next);
        assert_eq!(form.focused(), Focus::Next);
        form.update(&key(KeyCode::Enter));
        assert_eq!(form.values(), Values::default());

        let sign_in = region_of(&form, Focus::SignIn);
        press(&mut form, sign_in);
        assert_eq!(form.focused(), Focus::SignIn);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut form = Model::with_hub(PointerHub::new());
        let msg: Msg = Box::new(KeyMsg {
            key: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        });
        assert!(form.update(&msg).is_some());
        assert_eq!(form.values().full_name, "");
    }

    #[test]
    fn test_view_has_both_panels() {
        let form = Model::with_hub(PointerHub::new());
        let view = plain(&form.view());
        for text in [
            "Fill Your Details",
            "Enter your Full Name*",
            "Select your College State*",
            "Select your College*",
            "Participated in :*",
            "Enter your Current Email Address*",
            "Lost Your SIH Email",
            "Next",
            "Hello, SIH Alumni!",
            "Login Here",
            "Sign in",
        ] {
            assert!(view.contains(text), "missing {text:?}");
        }
    }

    #[test]
    fn test_dropping_form_releases_subscription() {
        let hub = PointerHub::new();
        let form = Model::with_hub(hub.clone());
        assert_eq!(hub.listener_count(), 1);
        drop(form);
        assert_eq!(hub.listener_count(), 0);
    }
}
