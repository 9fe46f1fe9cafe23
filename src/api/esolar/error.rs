use reqwest::StatusCode;

/// How the caller should treat a failed refresh.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum FailureKind {
    /// Credentials are rejected: stop retrying until they change.
    #[display("authentication error")]
    Auth,

    /// Connectivity, timeout, or a non-2xx response: retry with backoff.
    #[display("transport error")]
    Transport,

    /// The response shape is unexpected: retry, but it may well be persistent.
    #[display("data error")]
    Data,
}

impl FailureKind {
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        !matches!(self, Self::Auth)
    }
}

/// Failed refresh chain.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build the HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("`{path}` rejected the credentials")]
    Unauthorized { path: &'static str },

    #[error("failed to call `{path}`")]
    Transport {
        path: &'static str,

        #[source]
        source: reqwest::Error,
    },

    #[error("`{path}` failed with HTTP {status}")]
    Status { path: &'static str, status: StatusCode },

    #[error("failed to deserialize `{path}` response JSON")]
    Json {
        path: &'static str,

        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected `{path}` response: {message}")]
    Data { path: &'static str, message: String },
}

impl FetchError {
    pub fn data(path: &'static str, message: impl Into<String>) -> Self {
        Self::Data { path, message: message.into() }
    }

    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Unauthorized { .. } => FailureKind::Auth,
            Self::Client(_) | Self::Transport { .. } | Self::Status { .. } => {
                FailureKind::Transport
            }
            Self::Json { .. } | Self::Data { .. } => FailureKind::Data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_ok() {
        assert_eq!(FetchError::Unauthorized { path: "/login" }.kind(), FailureKind::Auth);
        assert_eq!(
            FetchError::Status { path: "/login", status: StatusCode::BAD_GATEWAY }.kind(),
            FailureKind::Transport,
        );
        assert_eq!(FetchError::data("/x", "empty").kind(), FailureKind::Data);
        assert!(!FailureKind::Auth.is_retryable());
        assert!(FailureKind::Transport.is_retryable());
        assert!(FailureKind::Data.is_retryable());
    }

    #[test]
    fn display_ok() {
        let error = FetchError::data("/monitor/site/getUserPlantList", "no plants found");
        assert_eq!(
            error.to_string(),
            "unexpected `/monitor/site/getUserPlantList` response: no plants found",
        );
    }
}
