//! Error types for the default offers client.
//!
//! # Design
//! The taxonomy is flat: one enum, four variants, each carrying a message.
//! `ResourceNotFound`, `RequestValidation` and `Authentication` map to the
//! 404 / 400 / 401 statuses the API documents. Everything else, including
//! transport failures and unrecognised responses, lands in `Api` with a
//! human-readable description. The underlying transport error type is not
//! kept past the client boundary.

use thiserror::Error;

/// Message used for validation errors built from a list of field problems.
pub const VALIDATION_FAILED: &str = "request validation failed";

/// Message used when a response has neither a known content type nor an
/// empty success body.
pub const INVALID_RESPONSE: &str = "Invalid response from API";

/// Errors returned by `DefaultOffersClient`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Caller input failed a precondition, or the API answered 400.
    ///
    /// `fields` lists each field-level problem when the error was raised
    /// locally; it is empty when the error came from a 400 response.
    #[error("{message}")]
    RequestValidation { message: String, fields: Vec<String> },

    /// The API answered 401.
    #[error("{0}")]
    Authentication(String),

    /// The API answered 404.
    #[error("{0}")]
    ResourceNotFound(String),

    /// Any other failure: unexpected status, transport error, or a response
    /// the client cannot interpret.
    #[error("{0}")]
    Api(String),
}

/// Discriminant of [`Error`], for callers that branch on the kind only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RequestValidation,
    Authentication,
    ResourceNotFound,
    Api,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Validation failure raised before any network activity.
    pub fn validation(fields: Vec<String>) -> Self {
        Error::RequestValidation {
            message: VALIDATION_FAILED.to_string(),
            fields,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::RequestValidation { .. } => ErrorKind::RequestValidation,
            Error::Authentication(_) => ErrorKind::Authentication,
            Error::ResourceNotFound(_) => ErrorKind::ResourceNotFound,
            Error::Api(_) => ErrorKind::Api,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Error::RequestValidation { message, .. } => message,
            Error::Authentication(message)
            | Error::ResourceNotFound(message)
            | Error::Api(message) => message,
        }
    }

    /// Field-level problems; empty for every kind but local validation.
    pub fn fields(&self) -> &[String] {
        match self {
            Error::RequestValidation { fields, .. } => fields,
            _ => &[],
        }
    }
}
