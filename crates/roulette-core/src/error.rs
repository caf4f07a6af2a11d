use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouletteError {
    #[error("invalid project name '{0}': no letters found")]
    InvalidName(String),

    #[error("could not find a valid port for '{project}' (last candidate: {last_candidate})")]
    AllocationFailed { project: String, last_candidate: u32 },

    #[error("invalid argument format: expected save:<project>:<port>, got '{0}'")]
    MalformedToken(String),

    #[error("project name '{0}' must not contain ':'")]
    DelimiterInName(String),

    #[error("port {port} is not available for '{project}'")]
    PortUnavailable { project: String, port: u32 },

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RouletteError>;
