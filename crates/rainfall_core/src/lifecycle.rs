//! Host lifecycle events
//!
//! The host screen reports when it becomes visible or hidden. Components that
//! should only animate while on screen register an observer here rather than
//! being wired to the host by hand.

use slotmap::{new_key_type, SlotMap};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

new_key_type! {
    /// Handle to a registered lifecycle observer
    pub struct ObserverId;
}

/// Application lifecycle events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Screen resumed (came to foreground)
    Resumed,
    /// Screen suspended (went to background)
    Suspended,
    /// System is low on memory - release caches if possible
    LowMemory,
}

type Observer = Rc<dyn Fn(LifecycleEvent)>;

struct LifecycleInner {
    observers: RefCell<SlotMap<ObserverId, Observer>>,
    resumed: Cell<bool>,
}

/// A lifecycle event source
///
/// Cloning yields another handle to the same source.
#[derive(Clone)]
pub struct Lifecycle {
    inner: Rc<LifecycleInner>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(LifecycleInner {
                observers: RefCell::new(SlotMap::with_key()),
                resumed: Cell::new(false),
            }),
        }
    }

    /// Register an observer
    pub fn observe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(LifecycleEvent) + 'static,
    {
        self.inner.observers.borrow_mut().insert(Rc::new(observer))
    }

    /// Unregister an observer; returns `false` if it was not registered
    pub fn remove(&self, id: ObserverId) -> bool {
        let removed = self.inner.observers.borrow_mut().remove(id);
        removed.is_some()
    }

    /// Deliver an event to every registered observer
    ///
    /// Observers are snapshotted first, so they may register or remove
    /// observers (including themselves) while handling the event.
    pub fn dispatch(&self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Resumed => self.inner.resumed.set(true),
            LifecycleEvent::Suspended => self.inner.resumed.set(false),
            LifecycleEvent::LowMemory => {}
        }

        let observers: Vec<Observer> = self.inner.observers.borrow().values().cloned().collect();
        tracing::debug!(
            "Lifecycle: dispatching {:?} to {} observers",
            event,
            observers.len()
        );
        for observer in observers {
            observer(event);
        }
    }

    /// Whether the latest Resumed/Suspended transition was Resumed
    pub fn is_resumed(&self) -> bool {
        self.inner.resumed.get()
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
