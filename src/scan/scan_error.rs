use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ScanError {
    DirectoryUnavailable(String),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::DirectoryUnavailable(msg) => {
                write!(f, "Listing directory unavailable: {msg}")
            }
        }
    }
}

impl Error for ScanError {}
