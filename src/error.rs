use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthError {
    #[error("invalid repository identity: {0}")]
    IdentityInvalid(String),

    #[error("repository not found: {0}. Check the URL and make sure the repository is public.")]
    NotFound(String),

    #[error("API rate limit exceeded: {0}. Provide a personal access token with --token or GITHUB_TOKEN.")]
    RateLimited(String),

    #[error("unauthorized: {0}. Check or refresh your personal access token.")]
    Unauthorized(String),

    #[error("API error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed API payload: {0}")]
    MalformedPayload(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HealthError>;

/// Failure reported by a [`crate::github::JsonSource`] for a single resource.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("rate limited on {0}")]
    RateLimited(String),

    #[error("unauthorized for {0}")]
    Unauthorized(String),

    #[error("status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("transport failure: {0}")]
    Network(String),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<FetchError> for HealthError {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::NotFound(resource) => HealthError::NotFound(resource),
            FetchError::RateLimited(resource) => HealthError::RateLimited(resource),
            FetchError::Unauthorized(resource) => HealthError::Unauthorized(resource),
            FetchError::Http { status, message } => HealthError::Http { status, message },
            FetchError::Network(message) => HealthError::Network(message),
            FetchError::Malformed(message) => HealthError::MalformedPayload(message),
        }
    }
}
