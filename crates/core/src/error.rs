use mbs_types::{ItemCode, ItemCodeError, TextError};

#[derive(Debug, thiserror::Error)]
pub enum MbsError {
    /// Malformed or missing user input. The message is shown to the user as-is.
    #[error("{0}")]
    InvalidInput(String),
    #[error("MBS Item {0} not found or is not current.")]
    NotFound(ItemCode),
    /// Every lookup of a multi-item request failed; holds the joined messages.
    #[error("{0}")]
    LookupsFailed(String),
    #[error("{0}")]
    DataSource(String),
    #[error("invalid data store configuration: {0}")]
    InvalidConfig(String),
}

impl MbsError {
    /// True for errors caused by the caller's input rather than by the data store.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::LookupsFailed(_))
    }
}

impl From<TextError> for MbsError {
    fn from(e: TextError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl From<ItemCodeError> for MbsError {
    fn from(e: ItemCodeError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl From<reqwest::Error> for MbsError {
    fn from(e: reqwest::Error) -> Self {
        Self::DataSource(e.to_string())
    }
}

pub type MbsResult<T> = std::result::Result<T, MbsError>;
