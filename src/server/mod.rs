// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main server components, including:
//! - Application state management
//! - HTTP/WebSocket routing
//! - Matchmaking and signal-relay logic (waiting queue, pairings, relay)
//! - Health/status snapshot

pub mod state;
pub mod router;
pub mod matchmaker;
pub mod health;
