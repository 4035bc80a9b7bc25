/// WebSocket session handler for the signaling relay.
///
/// This actor manages a single client's connection: it registers the
/// connection with the matchmaker on start, deregisters on stop, forwards
/// client messages (signal payloads, find-next) to the matchmaker, and
/// serializes matchmaker messages back to the client.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{error, warn};
use uuid::Uuid;

use super::messages::{ServerWsMessage, ClientWsMessage};
use super::server::{Connect, Disconnect, Signal, FindNext};
use super::types::ConnectionId;

/// Represents one client's WebSocket session.
pub struct SignalingSession {
    pub connection_id: ConnectionId,
    pub matchmaker_addr: Addr<super::server::Matchmaker>,
    /// Close reason reported by the client, if any. Forwarded on disconnect.
    close_reason: Option<String>,
}

impl SignalingSession {
    pub fn new(connection_id: ConnectionId, matchmaker_addr: Addr<super::server::Matchmaker>) -> Self {
        Self {
            connection_id,
            matchmaker_addr,
            close_reason: None,
        }
    }
}

impl Actor for SignalingSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Registers the connection with the matchmaker.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.matchmaker_addr.do_send(Connect {
            id: self.connection_id,
            addr: ctx.address().recipient(),
        });
    }

    /// Called when the session stops. Deregisters the connection.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.matchmaker_addr.do_send(Disconnect {
            id: self.connection_id,
            reason: self
                .close_reason
                .take()
                .unwrap_or_else(|| "connection closed".to_string()),
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for SignalingSession {
    /// Handles incoming WebSocket messages from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                // Parse the client message as JSON and forward to the matchmaker.
                match serde_json::from_str::<ClientWsMessage>(&text) {
                    Ok(ClientWsMessage::Signal(payload)) => {
                        self.matchmaker_addr.do_send(Signal {
                            id: self.connection_id,
                            payload,
                        });
                    }
                    Ok(ClientWsMessage::FindNext) => {
                        self.matchmaker_addr.do_send(FindNext {
                            id: self.connection_id,
                        });
                    }
                    Ok(ClientWsMessage::Ping) => {
                        // Keep-alive; nothing to forward.
                    }
                    Err(e) => {
                        // Malformed frames are dropped here; the matchmaker never sees them.
                        warn!("[Session] Dropping malformed message from {}: {}", self.connection_id, e);
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                self.close_reason = reason
                    .as_ref()
                    .and_then(|r| r.description.clone());
                ctx.close(reason);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for SignalingSession {
    type Result = ();

    /// Handles messages sent from the matchmaker to this session.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: close this one connection.
                error!("[Session] Failed to serialize message for {}: {}", self.connection_id, e);
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

/// WebSocket endpoint for the signaling relay.
///
/// Each accepted connection gets a fresh connection id; clients carry no
/// identity of their own.
pub async fn ws_signaling(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(
        SignalingSession::new(Uuid::new_v4(), data.matchmaker_addr.clone()),
        &req,
        stream,
    )
}
