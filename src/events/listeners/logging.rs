use async_trait::async_trait;

use crate::events::{Listener, TeamEvent};

/// Logs all membership events using the `log` crate.
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Creates a new logging listener at INFO level.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    /// Creates a new logging listener at the specified level.
    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &TeamEvent) {
        log::log!(
            target: "teamguard::events",
            self.level,
            "event={} {:?}",
            event.name(),
            event
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_default_level() {
        assert_eq!(LoggingListener::new().level, log::Level::Info);
        assert_eq!(LoggingListener::default().level, log::Level::Info);
    }

    #[test]
    fn test_with_level() {
        assert_eq!(
            LoggingListener::with_level(log::Level::Debug).level,
            log::Level::Debug
        );
    }

    #[tokio::test]
    async fn test_handle_does_not_panic() {
        let listener = LoggingListener::new();
        let event = TeamEvent::MemberLeft {
            team_id: 1,
            user_id: 2,
            at: Utc::now(),
        };

        listener.handle(&event).await;
    }
}
