//! # Request Routing and Dispatch
//!
//! This module splits incoming traffic between the upload API and the access
//! gate.
//!
//! ## Supported Routes
//!
//! - `POST /api/upload` - Upload a file (API key or session cookie)
//! - `*    /api/*`      - 405 on `/api/upload`, 404 elsewhere
//! - `*    *`           - Access gate, then static assets
//!
//! ## Request Flow
//!
//! ```text
//! GET /index.html
//! ↓
//! handle_request()
//! ↓
//! handle_gate() ── no cookie ──→ login page
//! ↓
//! ASSETS binding
//! ```

use worker::*;

use crate::config::Config;
use crate::handlers::{handle_api_routes, handle_gate};
use crate::middleware::GateMiddleware;

/// Handles incoming HTTP requests and routes them to appropriate handlers.
///
/// API paths skip the gate entirely; the upload handler does its own
/// authorization and answers 401 in JSON.
pub async fn handle_request(req: Request, env: Env, config: Config) -> Result<Response> {
    let path = req.url()?.path().to_string();

    if GateMiddleware::is_api_path(&path) {
        handle_api_routes(req, &env, &config).await
    } else {
        handle_gate(req, &env, &config).await
    }
}
