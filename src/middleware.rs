//! # Middleware Components
//!
//! This module holds the two credential checks that sit in front of the site:
//! the access gate for pages and the authorizer for the upload API.
//!
//! ## Middleware Types
//!
//! - **Gate Middleware**: password form, session cookie and forwarding rules
//! - **Auth Middleware**: API key or session cookie check for uploads
//!
//! ## Design Patterns
//!
//! - **Static Methods**: Middleware functions are implemented as static methods
//! - **Pure Decisions**: Both checks return plain values ([`GateOutcome`],
//!   [`Authorization`]) and never touch the worker runtime
//!
//! ## Session Cookie
//!
//! The cookie value is the configured page password itself, not a derived or
//! signed token. Anyone who can read the cookie knows the password. This is
//! kept for compatibility with existing clients.
//!
//! ## Usage Examples
//!
//! ```rust,ignore
//! let outcome = GateMiddleware::evaluate(&GateRequest {
//!     method: Method::Get,
//!     path: "/index.html",
//!     cookie_header: "site_auth=hunter2",
//!     submitted_password: None,
//! }, &config);
//!
//! let auth = AuthMiddleware::authorize(api_key_header.as_deref(), &cookie_header, &config);
//! ```

use worker::Method;

use crate::config::Config;
use crate::constants::{API_PREFIX, AUTH_COOKIE_MAX_AGE_SECS, AUTH_COOKIE_NAME};
use crate::models::{Authorization, GateOutcome};

/// The parts of a request the access gate looks at.
#[derive(Debug)]
pub struct GateRequest<'a> {
    pub method: Method,
    pub path: &'a str,
    pub cookie_header: &'a str,
    /// Value of the `password` form field, when the body was a form that had one.
    pub submitted_password: Option<&'a str>,
}

/// Access gate for every non-API path.
pub struct GateMiddleware;

impl GateMiddleware {
    /// Decides whether a request is forwarded, redirected with a fresh session
    /// cookie, or answered with the login page.
    ///
    /// # Rules
    ///
    /// 1. `/api/*` is always forwarded; those routes authenticate themselves.
    /// 2. `POST` compares the submitted password with `PAGE_PASSWORD`.
    ///    A match redirects to the same path and sets the session cookie;
    ///    anything else (including a missing field) shows the login page with
    ///    an error.
    /// 3. Any other method is forwarded when the `site_auth` cookie equals the
    ///    password, otherwise the plain login page is shown.
    ///
    /// An unset or empty `PAGE_PASSWORD` rejects every submission and every
    /// cookie.
    pub fn evaluate(req: &GateRequest<'_>, config: &Config) -> GateOutcome {
        if Self::is_api_path(req.path) {
            return GateOutcome::Forward;
        }

        if req.method == Method::Post {
            return match config.page_password.as_deref() {
                Some(password) if Self::password_matches(req.submitted_password, config) => {
                    GateOutcome::Redirect {
                        location: req.path.to_string(),
                        set_cookie: Self::session_cookie(password),
                    }
                }
                _ => GateOutcome::LoginPage { error: true },
            };
        }

        if Self::has_session_cookie(req.cookie_header, config) {
            GateOutcome::Forward
        } else {
            GateOutcome::LoginPage { error: false }
        }
    }

    /// Returns `true` for paths the gate never intercepts.
    pub fn is_api_path(path: &str) -> bool {
        path.starts_with(API_PREFIX)
    }

    /// Returns `true` when the gate needs the `password` form field to decide.
    pub fn needs_password(method: &Method, path: &str) -> bool {
        *method == Method::Post && !Self::is_api_path(path)
    }

    /// Exact string comparison against the configured password.
    pub fn password_matches(submitted: Option<&str>, config: &Config) -> bool {
        match (config.page_password.as_deref(), submitted) {
            (Some(expected), Some(given)) => given == expected,
            _ => false,
        }
    }

    /// Looks for a `site_auth` cookie whose value equals the configured password.
    pub fn has_session_cookie(cookie_header: &str, config: &Config) -> bool {
        let Some(password) = config.page_password.as_deref() else {
            return false;
        };

        Self::cookie_pairs(cookie_header)
            .any(|(name, value)| name == AUTH_COOKIE_NAME && value == password)
    }

    /// Splits a `Cookie` header into raw `(name, value)` pairs.
    ///
    /// Only the single space that follows each `;` separator is removed.
    /// Values are returned byte for byte, so a password with leading or
    /// trailing spaces still matches the cookie issued for it.
    fn cookie_pairs<'a>(cookie_header: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        cookie_header.split(';').enumerate().filter_map(|(index, pair)| {
            let pair = if index > 0 {
                pair.strip_prefix(' ').unwrap_or(pair)
            } else {
                pair
            };
            pair.split_once('=')
        })
    }

    /// Formats the `Set-Cookie` value issued after a successful login.
    pub fn session_cookie(password: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; Secure; SameSite=Strict; Max-Age={}",
            AUTH_COOKIE_NAME, password, AUTH_COOKIE_MAX_AGE_SECS
        )
    }
}

/// Authorization for the upload API.
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Checks the API key first and the session cookie second.
    ///
    /// - API key: `API_KEY` is set and the `x-api-key` header equals it.
    /// - Cookie: `PAGE_PASSWORD` is set and the raw `Cookie` header contains
    ///   `site_auth=<PAGE_PASSWORD>` as a substring.
    pub fn authorize(
        api_key_header: Option<&str>,
        cookie_header: &str,
        config: &Config,
    ) -> Authorization {
        if let (Some(expected), Some(given)) = (config.api_key.as_deref(), api_key_header) {
            if given == expected {
                return Authorization::AuthorizedByKey;
            }
        }

        if let Some(password) = config.page_password.as_deref() {
            let needle = format!("{}={}", AUTH_COOKIE_NAME, password);
            if cookie_header.contains(&needle) {
                return Authorization::AuthorizedByCookie;
            }
        }

        Authorization::Unauthorized
    }
}
