use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to decode request parameters: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("invalid requested datatype: {0}")]
    UnknownType(String),

    #[error("rate limit reached: {0}")]
    RateLimited(String),

    #[error("provider request failed: {0}")]
    Upstream(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the provider asked us to back off (HTTP 429).
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited(_))
    }

    /// True for errors caused by the caller's input rather than the provider
    /// or the service itself.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::BadRequest(_) | Error::Validation(_) | Error::UnknownType(_)
        )
    }
}

/// Failure of a single outbound provider call.
///
/// Built where the transport or HTTP failure is detected and handed straight
/// to the caller, which picks the outward signal from `rate_limited`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{cause}")]
pub struct RequestError {
    pub rate_limited: bool,
    pub cause: String,
}

impl RequestError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            rate_limited: false,
            cause: cause.into(),
        }
    }

    pub fn rate_limited(cause: impl Into<String>) -> Self {
        Self {
            rate_limited: true,
            cause: cause.into(),
        }
    }
}

impl From<RequestError> for Error {
    fn from(e: RequestError) -> Self {
        if e.rate_limited {
            Error::RateLimited(e.cause)
        } else {
            Error::Upstream(e.cause)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_request_error_keeps_flag() {
        let err: Error = RequestError::rate_limited("status 429").into();
        assert!(err.is_rate_limited());
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "rate limit reached: status 429");
    }

    #[test]
    fn test_plain_request_error_is_upstream() {
        let err: Error = RequestError::new("request error: 500").into();
        assert!(matches!(err, Error::Upstream(ref cause) if cause == "request error: 500"));
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_client_errors() {
        assert!(Error::Validation("bad date".into()).is_client_error());
        assert!(Error::UnknownType("task".into()).is_client_error());
        assert!(!Error::Auth("expired".into()).is_client_error());
    }
}
