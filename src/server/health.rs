//! Health/status endpoint.
//!
//! Exposes an on-demand snapshot of the matchmaker counters (open connections,
//! waiting-queue length, active pairs) without dumping internal state.

use actix_web::{web, Error, HttpResponse};
use log::error;

use crate::server::matchmaker::server::GetStats;
use crate::server::state::AppState;

/// Return the current relay counters as JSON.
pub async fn health(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    match data.matchmaker_addr.send(GetStats).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(stats)),
        Err(e) => {
            error!("[Health] Matchmaker unreachable: {}", e);
            Ok(HttpResponse::ServiceUnavailable().body("matchmaker unavailable"))
        }
    }
}
