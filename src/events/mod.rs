//! Event system for membership lifecycle actions.
//!
//! Every lifecycle action fires an event. If no listeners are registered,
//! events are silently ignored (zero overhead). The removal and leave
//! events are the cascade point for owning features: a listener severing
//! todo/planner assignments is the replacement for doing that work inline
//! in the membership engine.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use teamguard::register_event_listeners;
//! use teamguard::events::listeners::LoggingListener;
//!
//! fn main() {
//!     register_event_listeners(|registry| {
//!         registry.listen(LoggingListener::new());
//!     });
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::TeamEvent;
pub use listener::Listener;
pub use registry::{dispatch, register_event_listeners};
