//! Agent errors
//!
//! Nothing here is fatal: the main loop logs and absorbs every variant.

#[derive(Debug, Clone)]
pub enum AgentError {
    /// Controller could not be reached
    Unreachable(String),
    /// Request exceeded its deadline
    Timeout,
    /// Controller answered with a non-success status
    Rejected(u16),
    /// Response body could not be parsed
    Parse(String),
    /// Local file system failure
    Io(String),
    /// Encryption failure
    Crypto,
}

impl std::fmt::Display for AgentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreachable(e) => write!(f, "Controller unreachable: {}", e),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Rejected(code) => write!(f, "Controller rejected request: {}", code),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Crypto => write!(f, "Encryption failed"),
        }
    }
}

impl std::error::Error for AgentError {}

impl From<std::io::Error> for AgentError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AgentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Rejected(status.as_u16())
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Unreachable(err.to_string())
        }
    }
}
