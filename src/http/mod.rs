// HTTP module: the demo request executor
// Author: Gabriel Demetrios Lafis

mod executor;
mod request;

pub use executor::*;
pub use request::*;

use thiserror::Error;

/// Represents an error raised while sending a demo request.
///
/// HTTP error statuses are not errors: they come back as a normal
/// [`ResponseSummary`]. Only requests that cannot be built or delivered are.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error(
        "Could not call this endpoint directly.\n\
         Use this tool as a config builder and execute API calls in backend.\n\n\
         Details: {0}"
    )]
    Transport(String),
}
