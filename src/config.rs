//! # Configuration Management
//!
//! This module provides configuration management for the gate and upload handlers.
//! Configuration is read from the worker environment (secrets first, then plain
//! vars) and collected into an immutable record that is passed by reference into
//! every handler invocation.
//!
//! ## Configuration Options
//!
//! - `PAGE_PASSWORD`: shared secret for page access and the session cookie
//! - `API_KEY`: shared secret for programmatic uploads
//! - `R2_PUBLIC_URL`: public base URL used to build returned links
//! - `OBJECT_KEY_POLICY`: `verbatim` (default) or `strip-path`
//!
//! Empty values are treated exactly like missing ones.
//!
//! ## Example
//!
//! ```rust,ignore
//! let config = Config::from_env(&env);
//! if config.public_url.is_none() {
//!     console_warn!("R2_PUBLIC_URL is not set");
//! }
//! ```

use worker::Env;

use crate::constants::{
    ASSETS_BINDING_NAME, ENV_API_KEY, ENV_OBJECT_KEY_POLICY, ENV_PAGE_PASSWORD,
    ENV_R2_PUBLIC_URL, STORAGE_BUCKET_NAME,
};
use crate::utils::ObjectKeyPolicy;

/// Configuration record for a single request.
///
/// Secrets are `None` when unset or empty, which disables the corresponding
/// credential path entirely.
#[derive(Clone, PartialEq)]
pub struct Config {
    /// Shared page password. Also the literal session cookie value.
    pub page_password: Option<String>,

    /// API key accepted in the `x-api-key` header on uploads.
    pub api_key: Option<String>,

    /// Public host of the object store, e.g. `https://files.example.com`.
    pub public_url: Option<String>,

    /// How the original file name is folded into the object key.
    pub key_policy: ObjectKeyPolicy,

    /// Name of the R2 bucket binding.
    pub bucket_binding: String,

    /// Name of the static assets binding.
    pub assets_binding: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("page_password", &self.page_password.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("public_url", &self.public_url)
            .field("key_policy", &self.key_policy)
            .field("bucket_binding", &self.bucket_binding)
            .field("assets_binding", &self.assets_binding)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_password: None,
            api_key: None,
            public_url: None,
            key_policy: ObjectKeyPolicy::default(),
            bucket_binding: STORAGE_BUCKET_NAME.to_string(),
            assets_binding: ASSETS_BINDING_NAME.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the worker environment.
    ///
    /// Each name is looked up as a secret first and as a plain var second, so
    /// `wrangler secret put` and `[vars]` both work.
    pub fn from_env(env: &Env) -> Self {
        Self::from_lookup(|name| {
            env.secret(name)
                .map(|value| value.to_string())
                .or_else(|_| env.var(name).map(|value| value.to_string()))
                .ok()
        })
    }

    /// Builds a configuration from an arbitrary name lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        Self {
            page_password: non_empty(ENV_PAGE_PASSWORD),
            api_key: non_empty(ENV_API_KEY),
            public_url: non_empty(ENV_R2_PUBLIC_URL),
            key_policy: non_empty(ENV_OBJECT_KEY_POLICY)
                .map(|value| ObjectKeyPolicy::parse(&value))
                .unwrap_or_default(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn reads_all_recognised_options() {
        let config = Config::from_lookup(lookup_from(&[
            ("PAGE_PASSWORD", "hunter2"),
            ("API_KEY", "k-123"),
            ("R2_PUBLIC_URL", "https://files.example.com"),
            ("OBJECT_KEY_POLICY", "strip-path"),
        ]));

        assert_eq!(config.page_password.as_deref(), Some("hunter2"));
        assert_eq!(config.api_key.as_deref(), Some("k-123"));
        assert_eq!(config.public_url.as_deref(), Some("https://files.example.com"));
        assert_eq!(config.key_policy, ObjectKeyPolicy::StripPath);
        assert_eq!(config.bucket_binding, "MY_R2_BUCKET");
        assert_eq!(config.assets_binding, "ASSETS");
    }

    #[test]
    fn empty_values_are_treated_as_missing() {
        let config = Config::from_lookup(lookup_from(&[
            ("PAGE_PASSWORD", ""),
            ("API_KEY", ""),
            ("R2_PUBLIC_URL", ""),
        ]));

        assert_eq!(config.page_password, None);
        assert_eq!(config.api_key, None);
        assert_eq!(config.public_url, None);
        assert_eq!(config.key_policy, ObjectKeyPolicy::Verbatim);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = Config::from_lookup(lookup_from(&[
            ("PAGE_PASSWORD", "hunter2"),
            ("API_KEY", "k-123"),
        ]));
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("k-123"));
        assert!(rendered.contains("<redacted>"));
    }
}
