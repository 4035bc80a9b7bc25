//! Main entry point for the signaling relay server.
//!
//! Initializes the actor system, configures application state, and launches the HTTP server
//! with the WebSocket signaling endpoint and the health endpoint.

use std::time::Duration;

use actix::Actor;
use actix_web::{web, App, HttpServer};
use server::matchmaker::server::Matchmaker;

pub mod config;
mod server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::init();

    // Start the Matchmaker actor (owns the waiting queue and pair table).
    let matchmaker_addr =
        Matchmaker::new(Duration::from_secs(config::relay::WAITING_TIMEOUT_SECS)).start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(matchmaker_addr));

    // Start the HTTP server with the WebSocket and health endpoints.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
