/// Matchmaker module: handles the waiting queue, two-party pairings, and signal relay.

pub mod server;
pub mod session;
pub mod messages;
pub mod types;
