use super::json_error_response;
use anyhow::anyhow;
pub use hlt_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
    serde::json::Error as JsonError,
};
use std::{io, string};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("{0}")]
    OtherWithStatus(#[source] anyhow::Error, Status),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn bad_request(err: anyhow::Error) -> Self {
        Self::OtherWithStatus(err, Status::BadRequest)
    }
}

impl From<JsonError<'_>> for Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(err) => Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity),
            JsonError::Parse(_str, err) => {
                Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity)
            }
        }
    }
}

impl From<string::FromUtf8Error> for Error {
    fn from(err: string::FromUtf8Error) -> Self {
        Self::Other(anyhow!(err))
    }
}

impl<T: io::Write> From<csv::IntoInnerError<csv::Writer<T>>> for Error {
    fn from(err: csv::IntoInnerError<csv::Writer<T>>) -> Self {
        Self::Other(anyhow!("{err}"))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Other(anyhow!(err))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Other(anyhow!(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(anyhow!(err))
    }
}

impl From<rocket::tokio::task::JoinError> for Error {
    fn from(err: rocket::tokio::task::JoinError) -> Self {
        Self::Other(anyhow!(err))
    }
}

fn repo_error_status(err: &RepoError) -> Option<Status> {
    match err {
        RepoError::NotFound => Some(Status::NotFound),
        RepoError::AlreadyExists => Some(Status::Conflict),
        RepoError::Io(_) | RepoError::Other(_) => None,
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> response::Result<'o> {
        match self {
            Error::Parameter(ParameterError::Repo(ref err)) | Error::Repo(ref err) => {
                if let Some(status) = repo_error_status(err) {
                    return json_error_response(req, err, status);
                }
                error!("Repository error: {err}");
                Err(Status::InternalServerError)
            }
            Error::Parameter(err) => match err {
                ParameterError::Credentials | ParameterError::Unauthorized => {
                    json_error_response(req, &err, Status::Unauthorized)
                }
                _ => json_error_response(req, &err, Status::BadRequest),
            },
            Error::OtherWithStatus(err, status) => json_error_response(req, &err, status),
            Error::Other(err) => {
                error!("Error: {err:#}");
                json_error_response(req, &err, Status::InternalServerError)
            }
        }
    }
}
