//! Conversions from external infrastructure errors into domain errors.

use std::io::Error as IoError;

use kvscribe_domain::ScribeError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ScribeError);

impl From<InfraError> for ScribeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ScribeError> for InfraError {
    fn from(value: ScribeError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoScribeError {
    fn into_scribe(self) -> ScribeError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → ScribeError */
/* -------------------------------------------------------------------------- */

impl IntoScribeError for IoError {
    fn into_scribe(self) -> ScribeError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::ConnectionRefused => {
                ScribeError::StoreUnavailable("connection refused".into())
            }
            ErrorKind::ConnectionReset | ErrorKind::BrokenPipe => {
                ScribeError::StoreUnavailable("connection closed by the store".into())
            }
            ErrorKind::TimedOut => {
                ScribeError::StoreUnavailable("store operation timed out".into())
            }
            ErrorKind::UnexpectedEof => {
                ScribeError::StoreUnavailable("store closed the connection mid-reply".into())
            }
            _ => ScribeError::StoreUnavailable(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_scribe())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ScribeError */
/* -------------------------------------------------------------------------- */

impl IntoScribeError for HttpError {
    fn into_scribe(self) -> ScribeError {
        if self.is_timeout() {
            return ScribeError::Fetch("HTTP request timed out".into());
        }

        if self.is_connect() {
            return ScribeError::Fetch("HTTP connection failure".into());
        }

        ScribeError::Fetch(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_scribe())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
