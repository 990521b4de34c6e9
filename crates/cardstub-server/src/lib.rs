// SPDX-License-Identifier: BUSL-1.1
//! # cardstub-server — In-Memory Card-Management API Stub
//!
//! Simulation of a third-party card-management API, used as a stand-in for
//! testing clients that integrate against such a service. All state lives
//! in memory for the lifetime of the process.
//!
//! ## API Surface
//!
//! | Method | Path                            | Module        |
//! |--------|---------------------------------|---------------|
//! | POST   | `/1/cards`                      | [`routes`]    |
//! | POST   | `/1/cards/{cardid}/idLabels`    | [`routes`]    |
//! | POST   | `/1/cards/{cardid}/attachments` | [`routes`]    |
//! | GET    | `/1/lists/{listid}/cards`       | [`routes`]    |
//! | GET    | `/__get_state`                  | [`routes`]    |
//! | GET    | `/health`                       | [`routes`]    |
//!
//! All endpoints except `/__get_state` and `/health` require a
//! syntactically valid `key`/`token` pair (shape check only — see
//! [`cardstub_core::credentials`]).

pub mod error;
pub mod extract;
pub mod ingest;
pub mod model;
pub mod routes;
pub mod store;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::store::AppState;

/// App-wide request-body budget. The attachment route overrides this with
/// its own route-level limit.
const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Assemble the application router with request tracing and body limits.
pub fn app(state: AppState) -> Router {
    routes::router(state)
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
}
