use reqwest::StatusCode;

use crate::error::RequestError;

/// Check if a provider status is a 429 rate limit.
pub fn is_rate_limited(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
}

/// Classify a provider response status.
///
/// Anything above 299 is a failure; 429 is singled out so the platform can
/// back off and replay the same page later. There is no retry or sleep here,
/// the caller owns the retry policy.
pub fn classify_status(status: StatusCode) -> Option<RequestError> {
    if status.as_u16() <= 299 {
        return None;
    }
    if is_rate_limited(status) {
        log::warn!("Rate limited ({status}) by provider");
        return Some(RequestError::rate_limited(format!(
            "rate limit reached: {}",
            status.as_u16()
        )));
    }
    Some(RequestError::new(format!("request error: {}", status.as_u16())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_statuses_pass() {
        assert!(classify_status(StatusCode::OK).is_none());
        assert!(classify_status(StatusCode::NO_CONTENT).is_none());
    }

    #[test]
    fn test_429_is_rate_limited() {
        let err = classify_status(StatusCode::TOO_MANY_REQUESTS).unwrap();
        assert!(err.rate_limited);
        assert_eq!(err.cause, "rate limit reached: 429");
    }

    #[test]
    fn test_other_failures_carry_status() {
        for status in [
            StatusCode::MULTIPLE_CHOICES,
            StatusCode::UNAUTHORIZED,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            let err = classify_status(status).unwrap();
            assert!(!err.rate_limited);
            assert!(err.cause.contains(&status.as_u16().to_string()));
        }
    }
}
