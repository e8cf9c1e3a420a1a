use thiserror::Error;

/// Failure of one API call. Every variant renders to the string the error
/// banner shows; callers display it verbatim and never retry on their own.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, DNS, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status. `detail` is the
    /// backend-supplied explanation when one was decodable, otherwise a
    /// generic placeholder built from the status code.
    #[error("{detail}")]
    Server { status: u16, detail: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Parse error: {0}")]
    Decode(String),

    /// The request could not be assembled (multipart body, bad header).
    #[error("Request error: {0}")]
    Request(String),
}

impl ApiError {
    pub fn server(status: u16, detail: Option<String>) -> Self {
        let detail = match detail {
            Some(d) if !d.is_empty() => d,
            _ => format!("Server error: {status}"),
        };
        ApiError::Server { status, detail }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Server { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_detail_is_displayed_verbatim() {
        let err = ApiError::server(404, Some("Conversation not found".into()));
        assert_eq!(err.to_string(), "Conversation not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn missing_detail_falls_back_to_status() {
        let err = ApiError::server(500, None);
        assert_eq!(err.to_string(), "Server error: 500");
        let err = ApiError::server(502, Some(String::new()));
        assert_eq!(err.to_string(), "Server error: 502");
    }

    #[test]
    fn network_errors_are_prefixed() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}
