use std::collections::HashMap;
use thiserror::Error;

/// Unified error type for the entire budget-client-core library.
/// Every fallible public function returns `Result<T, ClientError>`.
#[derive(Debug, Error)]
pub enum ClientError {
    // ── Transport / Network ─────────────────────────────────────────
    /// The request never produced a server reply (DNS, refused
    /// connection, timeout, TLS, ...).
    #[error("Network error: {0}")]
    Network(String),

    // ── Server-reported ─────────────────────────────────────────────
    /// The server replied with a non-success status. `fields` holds the
    /// structured error body (`error`, `password`, `email`, ...) when
    /// one was sent.
    #[error("Server error (HTTP {status})")]
    Api {
        status: u16,
        fields: HashMap<String, String>,
    },

    // ── Local validation ────────────────────────────────────────────
    /// Pre-submission validation failed; no request was made.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── Usage ───────────────────────────────────────────────────────
    /// The session context was read outside its provider's lifetime.
    /// A programming error, never shown to the user.
    #[error("Session context unavailable: {0}")]
    SessionScope(&'static str),
}

impl ClientError {
    /// The server-supplied `error` field, or `default` when absent or
    /// when this is not an [`ClientError::Api`] error.
    pub fn message(&self, default: &str) -> String {
        self.message_pref(&["error"], default)
    }

    /// First non-empty field from `order`, else `default`. Implements
    /// the registration fallback chain (`error` → `password` → `email`).
    pub fn message_pref(&self, order: &[&str], default: &str) -> String {
        if let ClientError::Api { fields, .. } = self {
            for key in order {
                if let Some(msg) = fields.get(*key) {
                    if !msg.is_empty() {
                        return msg.clone();
                    }
                }
            }
        }
        default.to_string()
    }
}

// ── Conversion helpers ──────────────────────────────────────────────

impl ClientError {
    /// Build an [`ClientError::Api`] from a non-success response body.
    ///
    /// The backend reports validation problems as a flat JSON object of
    /// field → message (`error`, `password`, `email`, ...). A body that
    /// is not shaped like that is kept verbatim under `error`, so a
    /// message still surfaces; non-string values are dropped.
    pub fn api_from_body(status: u16, body: &str) -> Self {
        let fields = match serde_json::from_str::<HashMap<String, serde_json::Value>>(body) {
            Ok(map) => map
                .into_iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                .collect(),
            Err(_) => {
                let mut fields = HashMap::new();
                if !body.trim().is_empty() {
                    fields.insert("error".to_string(), body.trim().to_string());
                }
                fields
            }
        };
        ClientError::Api { status, fields }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs so
        // credentials and filter values never end up in logs or toasts.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        ClientError::Network(sanitized)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}
