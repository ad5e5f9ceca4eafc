use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing operation/environment. Never reaches the network.
    #[error("{0}")]
    Config(String),

    #[error("Could not authenticate with Ghost server")]
    Auth { detail: String },

    #[error("Could not export posts")]
    Export { detail: String },

    #[error("Could not delete posts")]
    Delete { detail: String },

    #[error("Could not import posts")]
    Import { detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// HTTP-equivalent status for this error: 400 for validation failures
    /// that never touched the network, 500 for any failed pipeline step.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Config(_) => 400,
            _ => 500,
        }
    }

    /// Response body for this error: the step's message plus the raw
    /// server/transport detail, in the shape the admin endpoint returns.
    pub fn response_body(&self) -> String {
        match self {
            Error::Config(message) => message.clone(),
            Error::Auth { detail } | Error::Delete { detail } => format!("{self} {detail}"),
            Error::Export { detail } => format!("Export was not successful. {detail}"),
            Error::Import { detail } => format!("Import was not successful. {detail}"),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
