use serde::{Deserialize, Serialize};

/// Lifecycle of a sampling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// No subscriptions and no timer
    #[default]
    Idle,
    /// Streams subscribed and timer running
    Active,
}
