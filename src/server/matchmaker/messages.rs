use actix::prelude::*;
use serde::{Serialize, Deserialize};
use serde_json::Value;

use super::types::ConnectionId;

/// Counters exposed by the health endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RelayStats {
    /// Open connections known to the matchmaker.
    pub connections: usize,
    /// Connections currently queued without a peer.
    pub waiting: usize,
    /// Active pairings (paired connections / 2).
    pub pairs: usize,
}

// Message client -> serveur
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data", rename_all = "kebab-case")]
pub enum ClientWsMessage {
    /// Opaque signaling payload to relay to the current peer. Never inspected.
    Signal(Value),
    /// Abandon the current pairing and seek a new one.
    FindNext,
    /// Keep-alive, ignored.
    Ping,
}

// Message serveur -> client
#[derive(Message, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data", rename_all = "kebab-case")]
pub enum ServerWsMessage {
    /// A pairing was established. The longer-waiting party is the initiator.
    #[serde(rename_all = "camelCase")]
    MatchFound {
        peer: ConnectionId,
        is_initiator: bool,
    },
    /// Enqueued, no peer available yet.
    WaitingForPeer,
    /// Payload relayed verbatim from the paired peer.
    Signal(Value),
    /// The paired peer left or asked for a new match.
    PeerDisconnected,
    /// Recoverable condition reported back to the sender.
    Error {
        message: String,
    },
}

impl ServerWsMessage {
    pub fn match_found(peer: ConnectionId, is_initiator: bool) -> Self {
        Self::MatchFound { peer, is_initiator }
    }
    pub fn error(message: &str) -> Self {
        Self::Error { message: message.to_string() }
    }
}
