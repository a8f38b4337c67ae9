//! Document-level pointer-down signal used for outside-click dismissal.
//!
//! Terminal applications receive every mouse event at the top of the model
//! tree. The host turns presses into [`PointerDown`] events and dispatches them
//! through a [`PointerHub`]; any component that needs to know about presses
//! anywhere on screen (not only inside its own area) subscribes a handler.
//!
//! A subscription is a guard: dropping the returned [`Subscription`] removes the
//! handler, so a component that owns its subscription can never leak it.
//!
//! ```rust
//! use alumni_portal::pointer::{PointerDown, PointerHub};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let hub = PointerHub::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&seen);
//! let sub = hub.subscribe(move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! hub.dispatch(&PointerDown::new(3, 4));
//! drop(sub);
//! hub.dispatch(&PointerDown::new(3, 4));
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

use bubbletea_rs::MouseMsg;
use crossterm::event::{MouseEvent, MouseEventKind};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// A rectangular screen area in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    /// Left column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Region {
    /// Creates a region.
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Reports whether the cell at `column`, `row` lies inside the region.
    /// Empty regions contain nothing.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let right = u32::from(self.x) + u32::from(self.width);
        let bottom = u32::from(self.y) + u32::from(self.height);
        column >= self.x
            && row >= self.y
            && u32::from(column) < right
            && u32::from(row) < bottom
    }
}

/// A pointer button went down at a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerDown {
    /// Column of the press.
    pub column: u16,
    /// Row of the press.
    pub row: u16,
}

impl PointerDown {
    /// Creates a pointer-down event.
    pub fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }

    /// Converts a crossterm mouse event. Only button presses qualify; moves,
    /// drags, releases and scrolling return `None`.
    pub fn from_mouse_event(event: &MouseEvent) -> Option<Self> {
        match event.kind {
            MouseEventKind::Down(_) => Some(Self::new(event.column, event.row)),
            _ => None,
        }
    }

    /// Converts a bubbletea mouse message, keeping only button presses.
    pub fn from_mouse_msg(msg: &MouseMsg) -> Option<Self> {
        match msg.button {
            MouseEventKind::Down(_) => Some(Self::new(msg.x, msg.y)),
            _ => None,
        }
    }

    /// Reports whether the press landed inside `region`.
    pub fn is_inside(&self, region: &Region) -> bool {
        region.contains(self.column, self.row)
    }
}

type Listener = Box<dyn FnMut(&PointerDown) + Send>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    // dispatch passes in flight, nested ones included
    depth: usize,
    // ids removed while a pass held their listeners; kept until the
    // outermost pass ends
    removed: HashSet<u64>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Listeners taken out of the registry for one dispatch pass. Dropping it
/// puts them back, also when a handler panics.
struct Pass<'a> {
    registry: &'a Mutex<Registry>,
    listeners: Vec<(u64, Listener)>,
}

impl<'a> Pass<'a> {
    fn begin(registry: &'a Mutex<Registry>) -> Self {
        let mut guard = lock(registry);
        guard.depth += 1;
        let listeners = std::mem::take(&mut guard.listeners);
        Self {
            registry,
            listeners,
        }
    }
}

impl Drop for Pass<'_> {
    fn drop(&mut self) {
        let mut registry = lock(self.registry);
        let mut listeners = std::mem::take(&mut self.listeners);
        listeners.retain(|(id, _)| !registry.removed.contains(id));
        listeners.append(&mut registry.listeners);
        registry.listeners = listeners;

        registry.depth = registry.depth.saturating_sub(1);
        if registry.depth == 0 {
            registry.removed.clear();
        }
    }
}

/// Cloneable handle to a pointer-down signal source.
///
/// Clones share the same set of listeners.
#[derive(Clone, Default)]
pub struct PointerHub {
    registry: Arc<Mutex<Registry>>,
}

static DOCUMENT: Lazy<PointerHub> = Lazy::new(PointerHub::new);

impl PointerHub {
    /// Creates an isolated hub with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide hub.
    pub fn global() -> &'static PointerHub {
        &DOCUMENT
    }

    /// Registers `handler` for every subsequent dispatch until the returned
    /// guard is dropped or cancelled.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&PointerDown) + Send + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(handler)));
        tracing::trace!(id, listeners = registry.listeners.len(), "pointer listener added");

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Delivers `event` to every current listener, in subscription order.
    /// Returns the number of listeners notified.
    ///
    /// Handlers may subscribe, cancel subscriptions or dispatch again on this
    /// hub while being dispatched to. A handler whose subscription is dropped
    /// during a dispatch is not called by any later dispatch; new subscriptions
    /// take effect from the next dispatch.
    pub fn dispatch(&self, event: &PointerDown) -> usize {
        let mut pass = Pass::begin(&self.registry);
        for (_, handler) in pass.listeners.iter_mut() {
            handler(event);
        }
        let notified = pass.listeners.len();
        drop(pass);

        tracing::trace!(
            column = event.column,
            row = event.row,
            notified,
            "pointer down dispatched"
        );
        notified
    }

    /// Number of live listeners. Listeners being notified by an in-flight
    /// dispatch are not counted.
    pub fn listener_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }

    fn remove(registry: &Mutex<Registry>, id: u64) {
        let mut registry = lock(registry);
        registry.listeners.retain(|(listener, _)| *listener != id);
        if registry.depth > 0 {
            registry.removed.insert(id);
        }
        tracing::trace!(id, listeners = registry.listeners.len(), "pointer listener removed");
    }
}

impl fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Guard for a registered pointer handler. Dropping it deregisters the
/// handler.
#[must_use = "dropping a Subscription removes its handler immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Deregisters the handler now.
    pub fn cancel(self) {}

    /// Reports whether the hub this subscription belongs to still exists.
    pub fn is_attached(&self) -> bool {
        self.registry.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            PointerHub::remove(&registry, self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter(hub: &PointerHub) -> (Arc<AtomicUsize>, Subscription) {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let sub = hub.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (hits, sub)
    }

    #[test]
    fn test_region_contains() {
        let region = Region::new(2, 3, 4, 2);
        assert!(region.contains(2, 3));
        assert!(region.contains(5, 4));
        assert!(!region.contains(6, 4));
        assert!(!region.contains(5, 5));
        assert!(!region.contains(1, 3));
        assert!(!Region::new(0, 0, 0, 0).contains(0, 0));
    }

    #[test]
    fn test_region_at_screen_edge() {
        let region = Region::new(u16::MAX - 1, u16::MAX - 1, 5, 5);
        assert!(region.contains(u16::MAX, u16::MAX));
    }

    #[test]
    fn test_from_mouse_event_only_presses() {
        let mut event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 7,
            row: 9,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            PointerDown::from_mouse_event(&event),
            Some(PointerDown::new(7, 9))
        );

        event.kind = MouseEventKind::Up(MouseButton::Left);
        assert_eq!(PointerDown::from_mouse_event(&event), None);
        event.kind = MouseEventKind::Moved;
        assert_eq!(PointerDown::from_mouse_event(&event), None);
    }

    #[test]
    fn test_dispatch_reaches_every_listener() {
        let hub = PointerHub::new();
        let (a, _sub_a) = counter(&hub);
        let (b, _sub_b) = counter(&hub);

        assert_eq!(hub.dispatch(&PointerDown::new(0, 0)), 2);
        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_deregisters() {
        let hub = PointerHub::new();
        let (a, sub_a) = counter(&hub);
        let (b, _sub_b) = counter(&hub);
        assert_eq!(hub.listener_count(), 2);

        drop(sub_a);
        assert_eq!(hub.listener_count(), 1);
        hub.dispatch(&PointerDown::new(1, 1));
        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_listeners() {
        let hub = PointerHub::new();
        let other = hub.clone();
        let (hits, sub) = counter(&hub);
        other.dispatch(&PointerDown::new(0, 0));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        sub.cancel();
        assert_eq!(other.listener_count(), 0);
    }

    #[test]
    fn test_cancel_during_dispatch() {
        let hub = PointerHub::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let (hits, sub) = counter(&hub);
        *slot.lock().unwrap() = Some(sub);

        let to_cancel = Arc::clone(&slot);
        let _canceller = hub.subscribe(move |_| {
            to_cancel.lock().unwrap().take();
        });

        hub.dispatch(&PointerDown::new(0, 0));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(hub.listener_count(), 1);

        hub.dispatch(&PointerDown::new(0, 0));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_nested_dispatch_keeps_dropped_handler_gone() {
        let hub = PointerHub::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let to_cancel = Arc::clone(&slot);
        let _canceller = hub.subscribe(move |_| {
            to_cancel.lock().unwrap().take();
        });
        let (hits, sub) = counter(&hub);
        *slot.lock().unwrap() = Some(sub);

        let inner = hub.clone();
        let nested = Arc::new(AtomicUsize::new(0));
        let depth = Arc::clone(&nested);
        let _redispatcher = hub.subscribe(move |event| {
            if depth.fetch_add(1, Ordering::SeqCst) == 0 {
                inner.dispatch(event);
            }
        });

        hub.dispatch(&PointerDown::new(0, 0));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(hub.listener_count(), 2);

        hub.dispatch(&PointerDown::new(0, 0));
        assert_eq!(hits.load(Ordering::SeqCst), 1, "dropped handler fired again");
    }

    #[test]
    fn test_panicking_handler_keeps_listeners() {
        let hub = PointerHub::new();
        let (hits, _sub) = counter(&hub);
        let armed = Arc::new(AtomicUsize::new(1));
        let fuse = Arc::clone(&armed);
        let _panicky = hub.subscribe(move |_| {
            if fuse.swap(0, Ordering::SeqCst) == 1 {
                panic!("handler failed");
            }
        });

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            hub.dispatch(&PointerDown::new(0, 0));
        }));
        assert!(result.is_err());
        assert_eq!(hub.listener_count(), 2);

        assert_eq!(hub.dispatch(&PointerDown::new(0, 0)), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_subscription_outlives_hub() {
        let hub = PointerHub::new();
        let (_hits, sub) = counter(&hub);
        assert!(sub.is_attached());
        drop(hub);
        assert!(!sub.is_attached());
        drop(sub);
    }
}
