//! Application lifecycle notifications.
//!
//! The platform glue reports foreground/background transitions to an
//! [`AppLifecycle`]; consumers subscribe once and receive every later
//! transition as an [`AppState`] on a [`LifecycleEvents`] stream.

#![warn(missing_docs)]

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use async_channel::{Receiver, Sender, TrySendError, unbounded};
use log::{debug, warn};

/// The application's foreground state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    /// In the foreground and receiving events.
    #[default]
    Active,
    /// In the foreground but not receiving events (e.g. during a system prompt).
    Inactive,
    /// Moved to the background.
    Background,
}

impl AppState {
    /// Parse the state names reported by mobile runtimes.
    ///
    /// Returns `None` for names that are not lifecycle states.
    #[must_use]
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" | "foreground" | "resumed" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "background" | "paused" => Some(Self::Background),
            _ => None,
        }
    }

    /// Returns `true` if the app just became active.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Background => "background",
        })
    }
}

/// A source of application lifecycle transitions.
pub trait LifecycleNotifier {
    /// Subscribe to every transition reported after this call.
    fn subscribe(&self) -> LifecycleEvents;
}

/// Stream of lifecycle transitions for one subscriber.
#[derive(Debug)]
pub struct LifecycleEvents {
    receiver: Receiver<AppState>,
}

impl LifecycleEvents {
    /// Wait for the next transition.
    ///
    /// Returns `None` once the notifier has been closed and every pending
    /// transition has been delivered.
    pub async fn next(&self) -> Option<AppState> {
        self.receiver.recv().await.ok()
    }

    /// Take a transition that has already been delivered, without waiting.
    #[must_use]
    pub fn try_next(&self) -> Option<AppState> {
        self.receiver.try_recv().ok()
    }
}

#[derive(Debug)]
struct Shared {
    current: AppState,
    subscribers: Vec<Sender<AppState>>,
    closed: bool,
}

/// Broadcasting [`LifecycleNotifier`] driven by the platform glue.
///
/// Clones share the same subscriber list.
#[derive(Debug, Clone)]
pub struct AppLifecycle {
    shared: Arc<Mutex<Shared>>,
}

impl Default for AppLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl AppLifecycle {
    /// Create a notifier for an app that starts in the foreground.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                current: AppState::Active,
                subscribers: Vec::new(),
                closed: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        // State stays consistent even if a holder panicked
        self.shared
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// The most recently reported state.
    #[must_use]
    pub fn current(&self) -> AppState {
        self.lock().current
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        let mut shared = self.lock();
        shared.subscribers.retain(|sender| !sender.is_closed());
        shared.subscribers.len()
    }

    /// Report a transition to every subscriber.
    ///
    /// Subscribers whose stream was dropped are pruned. Transitions reported
    /// after [`close`](Self::close) are ignored.
    pub fn transition(&self, state: AppState) {
        let mut shared = self.lock();
        if shared.closed {
            warn!("ignoring lifecycle transition to {state} after close");
            return;
        }

        debug!("app state {} -> {state}", shared.current);
        shared.current = state;
        shared
            .subscribers
            .retain(|sender| match sender.try_send(state) {
                Ok(()) => true,
                Err(TrySendError::Closed(_)) => false,
                Err(TrySendError::Full(_)) => {
                    warn!("dropping lifecycle event: subscriber queue full");
                    true
                }
            });
    }

    /// End every subscriber stream.
    pub fn close(&self) {
        let mut shared = self.lock();
        shared.closed = true;
        for sender in shared.subscribers.drain(..) {
            sender.close();
        }
    }
}

impl LifecycleNotifier for AppLifecycle {
    fn subscribe(&self) -> LifecycleEvents {
        let (sender, receiver) = unbounded();
        let mut shared = self.lock();
        if shared.closed {
            sender.close();
        } else {
            shared.subscribers.push(sender);
        }
        LifecycleEvents { receiver }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_runtime_state_names() {
        assert_eq!(AppState::from_raw("active"), Some(AppState::Active));
        assert_eq!(AppState::from_raw("Background"), Some(AppState::Background));
        assert_eq!(AppState::from_raw("inactive"), Some(AppState::Inactive));
        assert_eq!(AppState::from_raw("unknown"), None);
    }

    #[tokio::test]
    async fn every_subscriber_sees_transitions() {
        let lifecycle = AppLifecycle::new();
        let first = lifecycle.subscribe();
        let second = lifecycle.subscribe();

        lifecycle.transition(AppState::Background);
        lifecycle.transition(AppState::Active);

        assert_eq!(first.next().await, Some(AppState::Background));
        assert_eq!(first.next().await, Some(AppState::Active));
        assert_eq!(second.next().await, Some(AppState::Background));
        assert_eq!(second.next().await, Some(AppState::Active));
        assert_eq!(lifecycle.current(), AppState::Active);
    }

    #[tokio::test]
    async fn transitions_before_subscribe_are_not_replayed() {
        let lifecycle = AppLifecycle::new();
        lifecycle.transition(AppState::Background);

        let events = lifecycle.subscribe();
        assert_eq!(events.try_next(), None);

        lifecycle.transition(AppState::Active);
        assert_eq!(events.next().await, Some(AppState::Active));
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let lifecycle = AppLifecycle::new();
        let kept = lifecycle.subscribe();
        drop(lifecycle.subscribe());

        lifecycle.transition(AppState::Inactive);
        assert_eq!(lifecycle.subscriber_count(), 1);
        assert_eq!(kept.try_next(), Some(AppState::Inactive));
    }

    #[tokio::test]
    async fn close_ends_streams_after_pending_events() {
        let lifecycle = AppLifecycle::new();
        let events = lifecycle.subscribe();

        lifecycle.transition(AppState::Background);
        lifecycle.close();
        lifecycle.transition(AppState::Active);

        assert_eq!(events.next().await, Some(AppState::Background));
        assert_eq!(events.next().await, None);
        assert_eq!(lifecycle.subscribe().next().await, None);
    }
}
