use reqwest::StatusCode;
use std::result::Result as StdResult;
use thiserror::Error;

use crate::model::ErrorPayload;

#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON marshalling failed {0}")]
    Json(#[from] serde_json::Error),

    /// No response reached us: connect refused, DNS, timeout.
    #[error("Service unavailable {0}")]
    Unavailable(#[source] reqwest::Error),

    #[error("HTTP IO failed {0}")]
    Http(#[from] reqwest::Error),

    #[error("Base URL `{0}` cannot address resources")]
    BaseUrl(String),

    #[error("`{0}` is not a book id")]
    InvalidBookId(String),

    #[error("Request failed {status}")]
    Rejected {
        status: StatusCode,
        payload: Option<ErrorPayload>,
    },
}

impl Error {
    /// The status the backend reported, preferring the one in its error body.
    pub fn reported_status(&self) -> Option<u16> {
        match self {
            Error::Rejected {
                payload: Some(payload),
                ..
            } => Some(payload.status),
            Error::Rejected { status, .. } => Some(status.as_u16()),
            _ => None,
        }
    }
}

pub type Result<A> = StdResult<A, Error>;
