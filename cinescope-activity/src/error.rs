use thiserror::Error;

/// Errors from reading or writing the activity log.
#[derive(Debug, Error)]
pub enum ActivityError {
    /// The document store rejected an operation or could not be reached
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// A stored document does not have the expected shape
    #[error("Malformed activity document: {0}")]
    Malformed(String),

    /// The store refused the operation without a driver error
    #[error("Activity store unavailable: {0}")]
    Unavailable(String),
}

impl ActivityError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
