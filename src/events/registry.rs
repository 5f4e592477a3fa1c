use std::sync::OnceLock;

use super::{Listener, TeamEvent};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

/// Registry holding all registered event listeners.
///
/// Use [`register_event_listeners`] to configure listeners at application
/// startup.
pub struct EventRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventRegistry {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener to receive events.
    ///
    /// Listeners are called in the order they are registered.
    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    async fn dispatch(&self, event: &TeamEvent) {
        for listener in &self.listeners {
            listener.handle(event).await;
        }
    }
}

/// Register event listeners at application startup.
///
/// Call once during initialization. If never called, events are silently
/// ignored. Only the first call takes effect; later calls log a warning.
///
/// # Example
///
/// ```rust,ignore
/// use teamguard::register_event_listeners;
/// use teamguard::events::listeners::LoggingListener;
///
/// register_event_listeners(|registry| {
///     registry
///         .listen(LoggingListener::new())
///         .listen(TodoUnassignListener::new(todos));
/// });
/// ```
pub fn register_event_listeners<F>(f: F)
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::new();
    f(&mut registry);
    if REGISTRY.set(registry).is_err() {
        log::warn!(
            target: "teamguard",
            "register_event_listeners called more than once, ignoring"
        );
    }
}

/// Dispatch an event to all registered listeners.
///
/// No-op when no listeners are registered.
pub async fn dispatch(event: TeamEvent) {
    if let Some(registry) = REGISTRY.get() {
        registry.dispatch(&event).await;
    }
}
