/// Errors raised while loading configuration, talking to the assessment API
/// or submitting results.
#[derive(Debug, thiserror::Error)]
pub enum AssessError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to read config file {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("missing API key: set the {0} environment variable")]
    MissingApiKey(&'static str),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("exceeded retry budget of {attempts} attempts for {url}")]
    RetriesExhausted { url: String, attempts: u32 },
}

pub type AssessResult<T> = Result<T, AssessError>;

impl AssessError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AssessError::Status { status, .. } => Some(*status),
            AssessError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
