//! # Site Gate - Cloudflare Workers
//!
//! A password gate for a static site plus a single upload endpoint backed by
//! R2, built with Rust and Cloudflare Workers.
//!
//! ## Architecture
//!
//! - **Router**: Sends `/api/*` to the API handlers and everything else to the gate
//! - **Middleware**: Pure gate and upload-authorization decisions
//! - **Handlers**: Worker glue for the gate and the upload endpoint
//! - **Storage**: `ObjectStore` trait and its R2 implementation
//! - **Utils**: Object key generation and public URL construction
//!
//! ## Core Features
//!
//! - Shared-password login issuing a 24 hour `site_auth` cookie
//! - Uploads authorized by `x-api-key` or the session cookie
//! - Objects stored as `<uuid>-<file name>` with a long-lived public cache policy
//! - Structured JSON error bodies for every API failure
//!
//! ## Example Usage
//!
//! ```text
//! GET  /                 - Login page, or the site once logged in
//! POST /                 - Submit the `password` form field
//! POST /api/upload       - Multipart upload with a `file` field
//! ```

use worker::*;

mod config;
mod constants;
mod errors;
mod handlers;
mod logging;
mod middleware;
mod models;
mod pages;
mod router;
mod storage;
mod utils;

use config::Config;

/// Main entry point for the Cloudflare Worker.
///
/// Configuration is rebuilt from the environment on every request and passed
/// down explicitly; there is no process-wide cache.
#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    // Set up panic hook for better error reporting in development
    console_error_panic_hook::set_once();

    console_log!("Request: {:?} {}", req.method(), req.url()?.path());

    let config = Config::from_env(&env);

    router::handle_request(req, env, config).await
}
