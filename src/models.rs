use serde::{Deserialize, Serialize};

/// JSON error body returned by every API failure.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Successful upload response.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UploadResponse {
    pub url: String,
}

/// A file part pulled out of the multipart body.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// HTTP metadata written alongside a stored object.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectMetadata {
    pub content_type: String,
    pub cache_control: String,
}

/// Which credential let an upload through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authorization {
    Unauthorized,
    AuthorizedByKey,
    AuthorizedByCookie,
}

impl Authorization {
    pub fn is_authorized(self) -> bool {
        !matches!(self, Authorization::Unauthorized)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Authorization::Unauthorized => "unauthorized",
            Authorization::AuthorizedByKey => "api_key",
            Authorization::AuthorizedByCookie => "cookie",
        }
    }
}

/// What the access gate decided to do with a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    /// Pass the request on to the next handler untouched.
    Forward,
    /// Password accepted: redirect back and issue the session cookie.
    Redirect { location: String, set_cookie: String },
    /// Show the login page, optionally with the "wrong password" notice.
    LoginPage { error: bool },
}
