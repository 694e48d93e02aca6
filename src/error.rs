use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("timeout after {0}ms")]
    Timeout(u64),

    #[error("upstream returned HTTP {status}")]
    Upstream { status: u16, body: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to parse provider response: {0}")]
    SchemaParse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl RelayError {
    /// Message placed after the `Error: ` prefix of a transport failure reply.
    /// Upstream bodies are not included here; HTTP failures carry them separately.
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeout(ms) => format!("request timed out after {ms}ms"),
            Self::Request(e) => {
                // reqwest's Display stops at "error sending request"; append the source chain.
                let mut msg = e.to_string();
                let mut source = std::error::Error::source(e);
                while let Some(inner) = source {
                    msg.push_str(": ");
                    msg.push_str(&inner.to_string());
                    source = inner.source();
                }
                msg
            }
            Self::SchemaParse(detail) => format!("failed to parse provider response: {detail}"),
            Self::Upstream { .. } | Self::Config(_) => self.to_string(),
        }
    }
}
