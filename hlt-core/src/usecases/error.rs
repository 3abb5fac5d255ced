use crate::repositories;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The title is invalid")]
    Title,
    #[error("The location is invalid")]
    Location,
    #[error("The description is invalid")]
    Description,
    #[error("Invalid id")]
    Id,
    #[error("Invalid URL")]
    Url,
    #[error("Invalid position")]
    InvalidPosition,
    #[error("Invalid rating")]
    Rating,
    #[error("Invalid credentials")]
    Credentials,
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<url::ParseError> for Error {
    fn from(_: url::ParseError) -> Self {
        Self::Url
    }
}
