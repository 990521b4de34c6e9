// SPDX-License-Identifier: BUSL-1.1
//! Card-management API stub — standalone test double server.
//!
//! In-memory implementation of the card API endpoints that integration
//! clients call during testing, so test runs never touch the real upstream
//! service or its rate limits.
//!
//! Storage is in-memory (DashMap) with no persistence — data is lost on
//! restart. The `/__get_state` endpoint dumps the full store contents for
//! test harness assertions.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use cardstub_server::store::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("CARDSTUB_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000);

    let state = AppState::new();
    let app = cardstub_server::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("cardstub-server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
