//! # Access Gate Handler
//!
//! Wires [`GateMiddleware`] into the worker: reads the method, path, cookie
//! header and (for POST) the `password` form field, then turns the decision
//! into a response or forwards the request to the static assets binding.

use serde_json::json;
use worker::{Env, FormEntry, Request, Response, Result};

use crate::config::Config;
use crate::constants::PASSWORD_FIELD;
use crate::logging::Logger;
use crate::middleware::{GateMiddleware, GateRequest};
use crate::models::GateOutcome;
use crate::pages::login_page;

/// Handles every non-API request.
pub async fn handle_gate(mut req: Request, env: &Env, config: &Config) -> Result<Response> {
    let logger = Logger::from_request(&req);

    let url = req.url()?;
    let path = url.path().to_string();
    let method = req.method();
    let cookie_header = req.headers().get("Cookie")?.unwrap_or_default();

    let submitted_password = if GateMiddleware::needs_password(&method, &path) {
        read_password(&mut req).await
    } else {
        None
    };

    let outcome = GateMiddleware::evaluate(
        &GateRequest {
            method,
            path: &path,
            cookie_header: &cookie_header,
            submitted_password: submitted_password.as_deref(),
        },
        config,
    );

    match outcome {
        GateOutcome::Forward => forward(req, env, config, &logger).await,
        GateOutcome::Redirect {
            location,
            set_cookie,
        } => {
            logger.info("Login accepted", Some(json!({ "path": path })));
            redirect(&location, &set_cookie)
        }
        GateOutcome::LoginPage { error } => {
            if error {
                logger.warn("Login rejected", Some(json!({ "path": path })));
            }
            Response::from_html(login_page(error))
        }
    }
}

/// Extracts the `password` field. Anything that is not a form with a text
/// `password` field yields `None`.
async fn read_password(req: &mut Request) -> Option<String> {
    let form = req.form_data().await.ok()?;
    match form.get(PASSWORD_FIELD) {
        Some(FormEntry::Field(value)) => Some(value),
        _ => None,
    }
}

fn redirect(location: &str, set_cookie: &str) -> Result<Response> {
    let mut response = Response::ok("Redirecting...")?.with_status(302);
    let headers = response.headers_mut();
    headers.set("Location", location)?;
    headers.set("Set-Cookie", set_cookie)?;
    Ok(response)
}

/// Hands the request to the static assets binding.
async fn forward(req: Request, env: &Env, config: &Config, logger: &Logger) -> Result<Response> {
    match env.service(&config.assets_binding) {
        Ok(assets) => assets.fetch_request(req).await,
        Err(e) => {
            logger.error(
                "Static assets binding unavailable",
                Some(json!({ "binding": config.assets_binding, "error": e.to_string() })),
            );
            Response::error("Internal Server Error", 500)
        }
    }
}
