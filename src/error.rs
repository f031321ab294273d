//! Provider error taxonomy.
//!
//! Every variant is a soft failure for the single attempt that produced it;
//! the cascade logs it and moves on to the next candidate or strategy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("provider request timed out")]
    Timeout,
    #[error("provider request failed: {0}")]
    Http(reqwest::Error),
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GeocodeError::Timeout
        } else if err.is_decode() {
            GeocodeError::Malformed(err.to_string())
        } else {
            GeocodeError::Http(err)
        }
    }
}
