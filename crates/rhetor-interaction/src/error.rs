//! Error type shared by all sparring agent implementations.

use std::time::Duration;

use thiserror::Error;

/// Failure modes of a counter-argument or feedback inference call.
///
/// The variants mirror what a hosted inference endpoint actually reports so
/// callers can decide between retrying, waiting, or falling back to canned
/// replies.
#[derive(Debug, Clone, Error)]
pub enum InferenceError {
    /// The endpoint throttled the request (HTTP 429).
    #[error("inference endpoint rate limited the request")]
    RateLimited { retry_after: Option<Duration> },

    /// The hosted model is cold and still being loaded (HTTP 503).
    #[error("model '{model}' is still loading")]
    ModelLoading {
        model: String,
        estimated_secs: Option<f64>,
    },

    /// The API token was missing or rejected (HTTP 401/403).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The requested model does not exist on the endpoint (HTTP 404).
    #[error("model not found: {0}")]
    NotFound(String),

    /// Transport failures and anything else the endpoint reported.
    #[error("inference failed: {0}")]
    Unknown(String),
}

impl InferenceError {
    /// Stable lowercase label used in log fields and diagnostics output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "rate_limited",
            Self::ModelLoading { .. } => "model_loading",
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Suggested wait before retrying, when the endpoint provided one.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            Self::ModelLoading { estimated_secs, .. } => estimated_secs
                .filter(|secs| secs.is_finite() && *secs >= 0.0)
                .map(Duration::from_secs_f64),
            _ => None,
        }
    }

    /// Returns true if the request was throttled.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Returns true if the model is still warming up.
    pub fn is_model_loading(&self) -> bool {
        matches!(self, Self::ModelLoading { .. })
    }

    /// Returns true if the token was missing or rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels_are_stable() {
        let rate_limited = InferenceError::RateLimited { retry_after: None };
        let loading = InferenceError::ModelLoading {
            model: "m".to_string(),
            estimated_secs: None,
        };

        assert_eq!(rate_limited.kind(), "rate_limited");
        assert_eq!(loading.kind(), "model_loading");
        assert_eq!(InferenceError::Unauthorized("x".into()).kind(), "unauthorized");
        assert_eq!(InferenceError::NotFound("x".into()).kind(), "not_found");
        assert_eq!(InferenceError::Unknown("x".into()).kind(), "unknown");
    }

    #[test]
    fn test_retry_after_from_rate_limit() {
        let err = InferenceError::RateLimited {
            retry_after: Some(Duration::from_secs(30)),
        };
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_retry_after_from_model_loading_estimate() {
        let err = InferenceError::ModelLoading {
            model: "mistralai/Mistral-7B-Instruct-v0.3".to_string(),
            estimated_secs: Some(42.5),
        };
        assert_eq!(err.retry_after(), Some(Duration::from_secs_f64(42.5)));
        assert!(err.is_model_loading());
    }

    #[test]
    fn test_retry_after_ignores_invalid_estimates() {
        let negative = InferenceError::ModelLoading {
            model: "m".to_string(),
            estimated_secs: Some(-3.0),
        };
        let nan = InferenceError::ModelLoading {
            model: "m".to_string(),
            estimated_secs: Some(f64::NAN),
        };

        assert_eq!(negative.retry_after(), None);
        assert_eq!(nan.retry_after(), None);
    }

    #[test]
    fn test_display_includes_model_name() {
        let err = InferenceError::ModelLoading {
            model: "microsoft/DialoGPT-medium".to_string(),
            estimated_secs: Some(20.0),
        };
        assert!(err.to_string().contains("microsoft/DialoGPT-medium"));
    }
}
