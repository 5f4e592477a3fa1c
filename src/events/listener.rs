use async_trait::async_trait;

use super::TeamEvent;

/// Trait for handling membership events asynchronously.
///
/// Implement this to react to lifecycle changes: cascade cleanup,
/// notifications, metrics. Listeners run in registration order within the
/// request that triggered the event.
///
/// # Example
///
/// ```rust,ignore
/// use teamguard::events::{Listener, TeamEvent};
/// use async_trait::async_trait;
///
/// struct TodoUnassignListener {
///     todos: TodoStore,
/// }
///
/// #[async_trait]
/// impl Listener for TodoUnassignListener {
///     async fn handle(&self, event: &TeamEvent) {
///         match event {
///             TeamEvent::MemberRemoved { team_id, user_id, .. }
///             | TeamEvent::MemberLeft { team_id, user_id, .. } => {
///                 // sever the user's todo assignments in this team
///             }
///             _ => {}
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Handle a membership event.
    async fn handle(&self, event: &TeamEvent);
}
