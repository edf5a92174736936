//! # Utility Functions
//!
//! This module provides utility functions used by the upload handler.
//! It covers storage key generation and public URL construction.
//!
//! ## Key Layout
//!
//! ```text
//! {uuid-v4}-{original file name}
//! ```
//!
//! The file name is appended verbatim unless the deployment opts into the
//! `strip-path` policy. Verbatim names may contain `/` or `..`; R2 treats the
//! key as an opaque string, but the returned URL will reflect them as-is.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! let key = generate_object_key(ObjectKeyPolicy::Verbatim, "photo.png");
//! // Result: "550e8400-e29b-41d4-a716-446655440000-photo.png"
//!
//! let url = public_object_url("https://files.example.com", &key);
//! // Result: "https://files.example.com/550e8400-e29b-41d4-a716-446655440000-photo.png"
//! ```

use uuid::Uuid;

/// How the original upload file name is folded into the storage key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ObjectKeyPolicy {
    /// Append the file name exactly as the client sent it.
    #[default]
    Verbatim,
    /// Remove path separators and reserved characters first.
    StripPath,
}

impl ObjectKeyPolicy {
    /// Parses the `OBJECT_KEY_POLICY` value. Unknown values fall back to
    /// [`ObjectKeyPolicy::Verbatim`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "strip-path" | "strip_path" | "strict" => Self::StripPath,
            _ => Self::Verbatim,
        }
    }

    /// Returns the file name as it should appear in the key.
    pub fn apply(self, file_name: &str) -> String {
        match self {
            Self::Verbatim => file_name.to_string(),
            Self::StripPath => sanitize_filename(file_name),
        }
    }
}

/// Generates a fresh storage key for an uploaded file.
///
/// A new random UUID is drawn on every call, so two uploads of the same file
/// name never share a key.
pub fn generate_object_key(policy: ObjectKeyPolicy, file_name: &str) -> String {
    object_key(Uuid::new_v4(), policy, file_name)
}

/// Builds a storage key from an explicit identifier.
pub fn object_key(id: Uuid, policy: ObjectKeyPolicy, file_name: &str) -> String {
    format!("{}-{}", id, policy.apply(file_name))
}

/// Builds the public URL for a stored object.
pub fn public_object_url(host: &str, key: &str) -> String {
    format!("{}/{}", host, key)
}

/// Sanitizes a filename for the `strip-path` policy.
///
/// Path separators and characters reserved on common filesystems are removed,
/// the result is capped at 255 characters, and an empty result becomes
/// `unknown`.
fn sanitize_filename(filename: &str) -> String {
    let filename = filename.trim();

    let safe_chars: String = filename
        .chars()
        .filter(|c| !"/\\:*?\"<>|".contains(*c) && !c.is_control())
        .take(255)
        .collect();

    // "." and ".." survive the filter above.
    if safe_chars.is_empty() || safe_chars.chars().all(|c| c == '.') {
        "unknown".to_string()
    } else {
        safe_chars
    }
}
