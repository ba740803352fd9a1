use thiserror::Error;
use webres_api::LocatorError;

#[derive(Error, Debug)]
pub enum WebresError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("lookup error: {0}")]
    Locator(#[from] LocatorError),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<webres_provider::BoxError> for WebresError {
    fn from(err: webres_provider::BoxError) -> Self {
        WebresError::Provider(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WebresError>;
