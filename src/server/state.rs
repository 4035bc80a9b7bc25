// src/server/state.rs

//! Application state for the signaling relay server.
//!
//! Holds a reference to the matchmaker actor address.
//! Used to share state between HTTP/WebSocket handlers and the actor system.

use actix::Addr;
use crate::server::matchmaker::server::Matchmaker;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the matchmaker actor (handles queueing, pairing, and relay).
    pub matchmaker_addr: Addr<Matchmaker>,
}

impl AppState {
    /// Create a new AppState with the given actor address.
    pub fn new(matchmaker_addr: Addr<Matchmaker>) -> Self {
        AppState { matchmaker_addr }
    }
}
