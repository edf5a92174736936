//! # Application Constants
//!
//! This module defines application-wide constants used throughout the gate and
//! upload handlers. Centralizing constants keeps the wire contract (cookie name,
//! header names, paths) in one place.
//!
//! ## Binding Names
//!
//! Constants for Cloudflare Worker bindings that must match wrangler.toml configuration.
//!
//! ## Wire Contract
//!
//! Cookie, header and path names that clients depend on.

/// Secret holding the shared page password
pub const ENV_PAGE_PASSWORD: &str = "PAGE_PASSWORD";

/// Secret holding the programmatic upload API key
pub const ENV_API_KEY: &str = "API_KEY";

/// Public base URL of the R2 bucket, used to build returned links
pub const ENV_R2_PUBLIC_URL: &str = "R2_PUBLIC_URL";

/// Optional var selecting how upload file names become part of the object key
pub const ENV_OBJECT_KEY_POLICY: &str = "OBJECT_KEY_POLICY";

/// Standard R2 bucket binding name
pub const STORAGE_BUCKET_NAME: &str = "MY_R2_BUCKET";

/// Static assets binding name
pub const ASSETS_BINDING_NAME: &str = "ASSETS";

/// Name of the session cookie issued by the access gate
pub const AUTH_COOKIE_NAME: &str = "site_auth";

/// Session cookie lifetime (24 hours)
pub const AUTH_COOKIE_MAX_AGE_SECS: u64 = 86_400;

/// Form field carrying the submitted page password
pub const PASSWORD_FIELD: &str = "password";

/// Multipart field carrying the uploaded file
pub const FILE_FIELD: &str = "file";

/// HTTP header for programmatic upload authentication
pub const HEADER_API_KEY: &str = "x-api-key";

/// Header used as the request id for log correlation
pub const HEADER_CF_RAY: &str = "cf-ray";

/// Paths under this prefix authenticate themselves
pub const API_PREFIX: &str = "/api/";

/// Upload endpoint path
pub const UPLOAD_PATH: &str = "/api/upload";

/// Cache directive applied to every stored object
pub const OBJECT_CACHE_CONTROL: &str = "public, max-age=31536000";

/// Content type used when an upload declares none
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
