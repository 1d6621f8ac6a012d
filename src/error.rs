pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The ways a call to the wallet API can fail.
///
/// Client errors (e.g. an expired token) and server errors are deliberately not distinguished by
/// callers; both arrive as `Status`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connection refused, TLS, etc.).
    #[error("Unable to reach the wallet API: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("The wallet API responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The server answered with a body that could not be decoded.
    #[error("Unable to decode the wallet API response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The in-memory backend was told to behave as if the server were down.
    #[error("The wallet API is unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// The HTTP status code, if the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let e = ApiError::Status {
            status: 401,
            body: "Unauthorized".to_string(),
        };
        assert_eq!(e.status(), Some(401));
        assert_eq!(
            e.to_string(),
            "The wallet API responded with status 401: Unauthorized"
        );
    }

    #[test]
    fn test_unavailable_has_no_status() {
        let e = ApiError::Unavailable("offline".to_string());
        assert_eq!(e.status(), None);
        assert!(e.to_string().contains("offline"));
    }
}
