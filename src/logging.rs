use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use worker::*;

use crate::constants::HEADER_CF_RAY;

/// Logger struct for handling structured logging
///
/// Callers must never pass secrets (passwords, API keys, cookie values) in
/// `data`.
pub struct Logger {
    request_id: String,
}

impl Logger {
    /// Create a new Logger instance
    ///
    /// # Arguments
    ///
    /// * `request_id` - A unique identifier for the current request
    pub fn new(request_id: String) -> Self {
        Self { request_id }
    }

    /// Create a Logger keyed by the request's `cf-ray` header, or a fresh
    /// UUID when the header is missing.
    pub fn from_request(req: &Request) -> Self {
        let request_id = req
            .headers()
            .get(HEADER_CF_RAY)
            .ok()
            .flatten()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Self::new(request_id)
    }

    /// Log an info message
    pub fn info(&self, message: &str, data: Option<serde_json::Value>) {
        self.log("INFO", message, data);
    }

    /// Log a warning message
    pub fn warn(&self, message: &str, data: Option<serde_json::Value>) {
        self.log("WARN", message, data);
    }

    /// Log an error message
    pub fn error(&self, message: &str, data: Option<serde_json::Value>) {
        self.log("ERROR", message, data);
    }

    fn record(&self, level: &str, message: &str, data: Option<serde_json::Value>) -> serde_json::Value {
        json!({
            "timestamp": Utc::now().to_rfc3339(),
            "level": level,
            "request_id": self.request_id,
            "message": message,
            "data": data
        })
    }

    /// Internal method to handle log creation and output
    ///
    /// # Arguments
    ///
    /// * `level` - The log level (INFO, WARN, ERROR)
    /// * `message` - The log message
    /// * `data` - Optional additional data to include in the log
    fn log(&self, level: &str, message: &str, data: Option<serde_json::Value>) {
        let log_data = self.record(level, message, data);

        match level {
            "WARN" => console_warn!("{}", log_data),
            "ERROR" => console_error!("{}", log_data),
            _ => console_log!("{}", log_data),
        }
    }
}
