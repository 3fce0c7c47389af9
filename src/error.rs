use thiserror::Error;

/// Custom error type for Solar Guardian
#[derive(Error, Debug)]
pub enum SolarError {
    /// Connection failure, timeout or interrupted body transfer
    #[error("Network error: {0}")]
    Network(String),

    /// Provider answered with a non-2xx status
    #[error("Server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// Response body missing required fields or carrying invalid values
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Solar Guardian
pub type Result<T> = std::result::Result<T, SolarError>;

impl SolarError {
    /// Create a network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        SolarError::Network(msg.into())
    }

    /// Create a server error from a status code and response text
    pub fn server<S: Into<String>>(status: u16, msg: S) -> Self {
        SolarError::Server {
            status,
            message: msg.into(),
        }
    }

    /// Create a malformed payload error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        SolarError::MalformedPayload(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SolarError::Config(msg.into())
    }

    /// True for the three failures a fetch can end in
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            SolarError::Network(_) | SolarError::Server { .. } | SolarError::MalformedPayload(_)
        )
    }
}
