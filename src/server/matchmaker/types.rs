use std::time::Instant;
use uuid::Uuid;

/// Opaque per-connection identifier, assigned by the gateway when the
/// WebSocket is accepted. Unique for the lifetime of that connection.
pub type ConnectionId = Uuid;

/// A queued, unmatched connection.
#[derive(Clone, Debug)]
pub struct WaitingEntry {
    pub id: ConnectionId,
    /// When this entry was (re-)enqueued. Expiry is measured from here;
    /// a requeue after find-next gets a fresh timestamp.
    pub enqueued_at: Instant,
}
