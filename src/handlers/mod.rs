//! # Handlers Module
//!
//! This module contains HTTP request handlers for the gated site.
//! All API handlers answer with JSON and never let an error reach the runtime.

use worker::*;

use crate::config::Config;
use crate::constants::UPLOAD_PATH;
use crate::errors::AppError;

pub mod gate;
pub mod upload;

pub use gate::handle_gate;

/// Where an `/api/*` request goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiRoute {
    Upload,
    MethodNotAllowed,
    NotFound,
}

impl ApiRoute {
    /// Matches method and path. A trailing `/` on the path is ignored.
    pub fn resolve(method: &Method, path: &str) -> Self {
        match (method, path.trim_end_matches('/')) {
            (Method::Post, UPLOAD_PATH) => ApiRoute::Upload,
            (_, UPLOAD_PATH) => ApiRoute::MethodNotAllowed,
            _ => ApiRoute::NotFound,
        }
    }
}

/// Dispatches `/api/*` requests.
pub async fn handle_api_routes(req: Request, env: &Env, config: &Config) -> Result<Response> {
    let route = ApiRoute::resolve(&req.method(), req.url()?.path());

    match route {
        ApiRoute::Upload => upload::handle_upload(req, env, config).await,
        ApiRoute::MethodNotAllowed => error_response(AppError::MethodNotAllowed),
        ApiRoute::NotFound => error_response(AppError::NotFound),
    }
}

fn error_response(error: AppError) -> Result<Response> {
    error
        .to_response()
        .or_else(|_| Response::error("Internal Server Error", 500))
}
