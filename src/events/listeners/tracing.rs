use async_trait::async_trait;

use crate::events::{Listener, TeamEvent};

/// Emits membership events as `tracing` events.
///
/// Available with the `tracing` feature.
pub struct TracingListener;

impl TracingListener {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &TeamEvent) {
        tracing::info!(
            target: "teamguard::events",
            event = event.name(),
            team_id = event.team_id(),
            at = %event.timestamp(),
            "membership event"
        );
    }
}
