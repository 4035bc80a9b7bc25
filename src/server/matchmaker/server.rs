/// Matchmaker actor.
///
/// Owns the waiting queue and the pair table, decides pairing on connect and
/// re-match, relays opaque signaling payloads between paired connections, and
/// cleans up on disconnect and on waiting-entry expiry.
///
/// All state mutations go through this actor's mailbox, one message at a time,
/// so no partial queue/pair state is ever observable mid-operation.

use actix::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use serde_json::Value;
use log::{info, debug, warn};

use super::types::{ConnectionId, WaitingEntry};
use super::messages::{ServerWsMessage, RelayStats};
use crate::config::relay::SWEEP_INTERVAL_SECS;

/// Main matchmaker actor.
pub struct Matchmaker {
    /// Open connections, by id. Presence here means the connection is live.
    sessions: HashMap<ConnectionId, Recipient<ServerWsMessage>>,
    /// Unmatched connections, FIFO by enqueue order. No duplicate ids.
    waiting: VecDeque<WaitingEntry>,
    /// Active pairings. Symmetric: if A maps to B then B maps to A.
    pairs: HashMap<ConnectionId, ConnectionId>,
    /// Maximum age of a waiting entry before the sweep removes it.
    waiting_timeout: Duration,
}

impl Matchmaker {
    /// Create a new matchmaker with the given waiting-entry timeout.
    pub fn new(waiting_timeout: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            waiting: VecDeque::new(),
            pairs: HashMap::new(),
            waiting_timeout,
        }
    }

    /// Send a message to one connection, if it is still open.
    fn emit(&self, to: ConnectionId, msg: ServerWsMessage) {
        if let Some(session) = self.sessions.get(&to) {
            session.do_send(msg);
        }
    }

    /// Pair `id` with the earliest waiting connection, or enqueue it.
    ///
    /// The popped partner has been waiting longer, so it is designated
    /// initiator of the peer handshake.
    fn match_or_enqueue(&mut self, id: ConnectionId) {
        if let Some(entry) = self.waiting.pop_front() {
            let partner = entry.id;
            self.pairs.insert(id, partner);
            self.pairs.insert(partner, id);
            self.emit(partner, ServerWsMessage::match_found(id, true));
            self.emit(id, ServerWsMessage::match_found(partner, false));
            info!("[Matchmaker] Paired {} with initiator {}", id, partner);
        } else {
            self.waiting.push_back(WaitingEntry { id, enqueued_at: Instant::now() });
            self.emit(id, ServerWsMessage::WaitingForPeer);
            debug!("[Matchmaker] {} enqueued, queue length {}", id, self.waiting.len());
        }
    }

    /// Remove both directions of `id`'s pairing, returning the partner if any.
    fn unpair(&mut self, id: ConnectionId) -> Option<ConnectionId> {
        let partner = self.pairs.remove(&id)?;
        self.pairs.remove(&partner);
        Some(partner)
    }

    /// Drop `id`'s waiting entry, if it has one.
    fn dequeue(&mut self, id: ConnectionId) {
        self.waiting.retain(|entry| entry.id != id);
    }

    /// Remove waiting entries older than the timeout. Expired connections get
    /// no notification: by assumption they are abandoned and unresponsive.
    fn expire_stale_entries(&mut self, now: Instant) {
        let before = self.waiting.len();
        let timeout = self.waiting_timeout;
        self.waiting
            .retain(|entry| now.duration_since(entry.enqueued_at) < timeout);
        let removed = before - self.waiting.len();
        if removed > 0 {
            info!("[Matchmaker] Swept {} stale waiting entries, queue length {}", removed, self.waiting.len());
        }
    }
}

/// Message: new connection established. The gateway registers the session's
/// recipient so the matchmaker can emit to it.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub id: ConnectionId,
    pub addr: Recipient<ServerWsMessage>,
}

/// Message: connection closed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: ConnectionId,
    pub reason: String,
}

/// Message: relay an opaque signaling payload to the sender's peer.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Signal {
    pub id: ConnectionId,
    pub payload: Value,
}

/// Message: abandon the current pairing and seek a new one.
#[derive(Message)]
#[rtype(result = "()")]
pub struct FindNext {
    pub id: ConnectionId,
}

/// Message: sweep stale waiting entries. Self-notified by the interval timer.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SweepStale;

/// Message: fetch the relay counters for the health endpoint.
#[derive(Message)]
#[rtype(result = "RelayStats")]
pub struct GetStats;

impl Actor for Matchmaker {
    type Context = Context<Self>;

    /// Schedule the periodic stale-entry sweep through the same mailbox as
    /// connection events.
    fn started(&mut self, ctx: &mut Self::Context) {
        ctx.run_interval(Duration::from_secs(SWEEP_INTERVAL_SECS), |_act, ctx| {
            ctx.notify(SweepStale);
        });
    }
}

impl Handler<Connect> for Matchmaker {
    type Result = ();

    /// Handles a new connection: pair it with the earliest waiting one, or enqueue it.
    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        // Ids are gateway-generated per connection, so a duplicate is a defect
        // upstream; replace the registration rather than panic.
        if self.sessions.insert(msg.id, msg.addr).is_some() {
            warn!("[Matchmaker] Duplicate connect for {}, replacing session", msg.id);
            if let Some(partner) = self.unpair(msg.id) {
                self.emit(partner, ServerWsMessage::PeerDisconnected);
            }
            self.dequeue(msg.id);
        }
        debug!("[Matchmaker] {} connected", msg.id);
        self.match_or_enqueue(msg.id);
    }
}

impl Handler<Disconnect> for Matchmaker {
    type Result = ();

    /// Handles a closed connection. Idempotent: a second disconnect for the
    /// same id is a no-op.
    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        if self.sessions.remove(&msg.id).is_none() {
            return;
        }
        if let Some(partner) = self.unpair(msg.id) {
            self.emit(partner, ServerWsMessage::PeerDisconnected);
        }
        self.dequeue(msg.id);
        info!("[Matchmaker] {} disconnected ({})", msg.id, msg.reason);
    }
}

impl Handler<Signal> for Matchmaker {
    type Result = ();

    /// Relays the payload verbatim to the sender's peer, or reports the
    /// absence of an active peer back to the sender. Non-fatal either way.
    fn handle(&mut self, msg: Signal, _ctx: &mut Self::Context) -> Self::Result {
        match self.pairs.get(&msg.id) {
            Some(&partner) if self.sessions.contains_key(&partner) => {
                self.emit(partner, ServerWsMessage::Signal(msg.payload));
            }
            _ => {
                debug!("[Matchmaker] {} signaled without an active peer", msg.id);
                self.emit(msg.id, ServerWsMessage::error("no active peer to relay to"));
            }
        }
    }
}

impl Handler<FindNext> for Matchmaker {
    type Result = ();

    /// Leaves the current pairing (notifying the partner), then re-runs the
    /// connect-time matching. The caller ends up freshly paired or freshly
    /// queued, never paired with a stale partner.
    fn handle(&mut self, msg: FindNext, _ctx: &mut Self::Context) -> Self::Result {
        if !self.sessions.contains_key(&msg.id) {
            return;
        }
        if let Some(partner) = self.unpair(msg.id) {
            self.emit(partner, ServerWsMessage::PeerDisconnected);
            debug!("[Matchmaker] {} left pairing with {} (find-next)", msg.id, partner);
        }
        // Drop the caller's own waiting entry so it cannot pop itself below,
        // and so the queue never holds it twice.
        self.dequeue(msg.id);
        self.match_or_enqueue(msg.id);
    }
}

impl Handler<SweepStale> for Matchmaker {
    type Result = ();

    fn handle(&mut self, _msg: SweepStale, _ctx: &mut Self::Context) -> Self::Result {
        self.expire_stale_entries(Instant::now());
    }
}

impl Handler<GetStats> for Matchmaker {
    type Result = MessageResult<GetStats>;

    fn handle(&mut self, _msg: GetStats, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(RelayStats {
            connections: self.sessions.len(),
            waiting: self.waiting.len(),
            pairs: self.pairs.len() / 2,
        })
    }
}

/// Test-only snapshot of the queue and pair table, for invariant checks.
#[cfg(test)]
pub struct StateSnapshot {
    pub waiting: Vec<ConnectionId>,
    pub pairs: HashMap<ConnectionId, ConnectionId>,
}

#[cfg(test)]
#[derive(Message)]
#[rtype(result = "StateSnapshot")]
pub struct InspectState;

#[cfg(test)]
impl Handler<InspectState> for Matchmaker {
    type Result = MessageResult<InspectState>;

    fn handle(&mut self, _msg: InspectState, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(StateSnapshot {
            waiting: self.waiting.iter().map(|entry| entry.id).collect(),
            pairs: self.pairs.clone(),
        })
    }
}
