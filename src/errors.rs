use std::fmt;

/// Errors originating from the server logic
/// (routing, missing resources, bad file paths).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    Forbidden(String),
    InternalError,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
