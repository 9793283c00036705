use pairup_core::ReportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Score log I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not format timestamp: {0}")]
    Format(#[from] time::error::Format),
    #[error("Malformed score line: {0:?}")]
    MalformedLine(String),
}

pub type Result<T> = std::result::Result<T, RecordsError>;

impl From<RecordsError> for ReportError {
    fn from(err: RecordsError) -> Self {
        match err {
            RecordsError::Io(err) => ReportError::Unavailable(err.to_string()),
            other => ReportError::Encoding(other.to_string()),
        }
    }
}
