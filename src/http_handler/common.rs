use strum_macros::Display;

/// Environment variable holding the base request timeout threshold in milliseconds.
pub const TIMEOUT_THRESHOLD_ENV: &str = "LIGHTBRIDGE_TIMEOUT_THRESHOLD";

/// Fixed safety margin added on top of the configured timeout threshold.
pub const TIMEOUT_MARGIN_MS: u64 = 5000;

/// Header carrying the opaque credential on every outgoing request.
pub const CREDENTIAL_HEADER: &str = "x-auth-token";

/// Errors raised while configuring an [`HTTPClient`](super::http_client::HTTPClient).
///
/// All variants are fatal to construction: no client is produced.
#[derive(Debug, Display)]
pub enum ConfigError {
    /// The base URL was empty.
    EmptyBaseUrl,
    /// The credential contains bytes that are not valid in a header value.
    InvalidCredential,
    /// [`TIMEOUT_THRESHOLD_ENV`] is not set.
    MissingTimeoutThreshold,
    /// [`TIMEOUT_THRESHOLD_ENV`] did not parse as a millisecond count.
    NonNumericTimeoutThreshold(String),
    /// The underlying transport could not be initialized.
    ClientBuild(reqwest::Error),
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ClientBuild(err) => Some(err),
            _ => None,
        }
    }
}

/// Failure of a single request attempt.
///
/// Each variant carries the untouched [`reqwest::Error`]; the variant itself
/// only classifies. There is no retry and no recovery, the error is logged
/// once with its context and handed back to the caller.
#[derive(Debug, Display)]
pub enum RequestError {
    /// No connection to the remote endpoint could be established.
    NoConnection(reqwest::Error),
    /// The transport-side timeout expired before a response arrived.
    Timeout(reqwest::Error),
    /// The server answered with a non-success status code.
    BadStatus(reqwest::Error),
    /// The response body could not be decoded into the expected shape.
    Decode(reqwest::Error),
    /// Any other transport failure.
    Unknown(reqwest::Error),
}

impl RequestError {
    /// Status code of the failed response, when the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> { self.as_reqwest().status() }

    /// Borrows the original transport error.
    pub fn as_reqwest(&self) -> &reqwest::Error {
        match self {
            RequestError::NoConnection(err)
            | RequestError::Timeout(err)
            | RequestError::BadStatus(err)
            | RequestError::Decode(err)
            | RequestError::Unknown(err) => err,
        }
    }

    /// Unwraps into the original transport error.
    pub fn into_reqwest(self) -> reqwest::Error {
        match self {
            RequestError::NoConnection(err)
            | RequestError::Timeout(err)
            | RequestError::BadStatus(err)
            | RequestError::Decode(err)
            | RequestError::Unknown(err) => err,
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { Some(self.as_reqwest()) }
}

impl From<reqwest::Error> for RequestError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_connect() {
            RequestError::NoConnection(value)
        } else if value.is_timeout() {
            RequestError::Timeout(value)
        } else if value.is_status() {
            RequestError::BadStatus(value)
        } else if value.is_decode() {
            RequestError::Decode(value)
        } else {
            RequestError::Unknown(value)
        }
    }
}
