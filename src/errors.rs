use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by every Nymeria client operation.
#[derive(Debug, Error)]
pub enum NymeriaError {
    /// The caller supplied none of the fields an endpoint requires.
    #[error("error: the supplied parameters are invalid")]
    InvalidParameters,
    /// The API key is blank or was rejected by the authentication check.
    #[error("error: the supplied auth key is invalid")]
    InvalidAuthKey,
    /// The server answered 400.
    #[error("error: bad request")]
    BadRequest,
    /// Authentication is required to access the resource.
    ///
    /// Declared for completeness; [`map_status`] never produces it.
    #[error("error: authentication required")]
    AuthenticationRequired,
    /// The server answered 402 (out of credits).
    #[error("error: payment required")]
    PaymentRequired,
    /// The server answered 404.
    #[error("error: not found")]
    NotFound,
    /// Any other non-200 status.
    #[error("error: the server returned an unexpected response")]
    ServerError,
    /// Legacy API catch-all: the response `status` field was not `"success"`.
    #[error("error: the request failed; perhaps you haven't authenticated or the request was malformed")]
    InvalidRequest,
    /// Transport failure (DNS, connect, timeout, body read).
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The response body was not the expected JSON document.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    /// The request URL could not be built.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Shorthand result type for client operations.
pub type Result<T> = std::result::Result<T, NymeriaError>;

/// Maps an HTTP status code onto the client error taxonomy.
///
/// Only 200 proceeds to decoding. 400, 402 and 404 have dedicated errors;
/// everything else (401 and 403 included) is a [`NymeriaError::ServerError`].
pub fn map_status(code: u16) -> Result<()> {
    match StatusCode::from_u16(code) {
        Ok(StatusCode::OK) => Ok(()),
        Ok(StatusCode::BAD_REQUEST) => Err(NymeriaError::BadRequest),
        Ok(StatusCode::PAYMENT_REQUIRED) => Err(NymeriaError::PaymentRequired),
        Ok(StatusCode::NOT_FOUND) => Err(NymeriaError::NotFound),
        _ => Err(NymeriaError::ServerError),
    }
}
