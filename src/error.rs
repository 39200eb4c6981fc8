use crate::services::list_view::Notification;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Backend error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn candidate_not_found(id: i64) -> Self {
        Error::NotFound(format!("Candidate {} not found", id))
    }

    /// Missing or malformed user input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::InvalidInput(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// The backend could not be reached or answered with a failure status.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Reqwest(_) | Error::Json(_))
    }

    pub fn to_notification(&self) -> Notification {
        match self {
            Error::Validation(_) => Notification::warning("Please complete the required fields"),
            Error::InvalidInput(msg) => Notification::warning(msg.clone()),
            Error::NotFound(msg) => Notification::error(msg.clone()),
            Error::Unauthorized(_) => Notification::error("Invalid email or password"),
            Error::Network(_) | Error::Reqwest(_) | Error::Json(_) => {
                Notification::error(format!("Could not reach the server: {}", self))
            }
            Error::Config(msg) => Notification::error(msg.clone()),
        }
    }
}
