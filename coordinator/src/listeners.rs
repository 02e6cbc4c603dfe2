use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::CoordinatorState;

type Listener = Arc<dyn Fn(&CoordinatorState) + Send + Sync>;

#[derive(Default)]
struct Slots {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

fn lock(slots: &Mutex<Slots>) -> MutexGuard<'_, Slots> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registered state listeners.
#[derive(Clone, Default)]
pub(crate) struct Listeners {
    slots: Arc<Mutex<Slots>>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.len())
            .finish()
    }
}

impl Listeners {
    pub(crate) fn add(&self, listener: Listener) -> Subscription {
        let mut slots = lock(&self.slots);
        let id = slots.next_id;
        slots.next_id += 1;
        slots.entries.push((id, listener));
        Subscription {
            id,
            slots: Arc::downgrade(&self.slots),
        }
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.slots).entries.len()
    }

    /// Call every listener with `state`.
    ///
    /// The registry lock is released first, so listeners may subscribe,
    /// unsubscribe or read the coordinator.
    pub(crate) fn notify(&self, state: &CoordinatorState) {
        let listeners: Vec<Listener> = lock(&self.slots)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(state);
        }
    }
}

/// Keeps a state listener registered.
///
/// The listener is removed when the subscription is dropped.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    id: u64,
    slots: Weak<Mutex<Slots>>,
}

impl Subscription {
    /// Remove the listener now.
    pub fn cancel(self) {
        drop(self);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            lock(&slots).entries.retain(|(id, _)| *id != self.id);
        }
    }
}
