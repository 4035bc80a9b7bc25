//! HTTP and WebSocket routing configuration.
//!
//! Defines the signaling WebSocket endpoint and the health endpoint.
//! The signaling endpoint is handled by a dedicated WebSocket actor per connection.

use actix_web::web;
use crate::server::health::health;
use crate::server::matchmaker::session::ws_signaling;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ws/signaling")
            .to(ws_signaling)
    )
    .service(
        web::resource("/health")
            .to(health)
    );
}
