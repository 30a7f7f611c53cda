//! Typed error handling for the receiver service
//!
//! This module provides the error type hierarchy surfaced by every layer of
//! the service, so clients can handle errors specifically rather than dealing
//! with generic `anyhow::Error` types.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: malformed input fields (identifier, email, Pix key)
//! - [`NotFoundError`]: referenced records that do not exist
//! - [`PolicyError`]: well-formed input rejected by a business rule
//! - [`StorageError`]: repository backend failures, propagated unchanged
//!
//! All errors are terminal for the request that raised them: the service
//! issues at most one write per call, so there is no partial application to
//! roll back.

use async_graphql::ErrorExtensions;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::core::pix::PixKeyType;

/// The main error type for the receiver service
///
/// Each variant wraps a more specific error type for that category.
#[derive(Debug)]
pub enum ReceiverError {
    /// Malformed input field
    Validation(ValidationError),

    /// Referenced record does not exist
    NotFound(NotFoundError),

    /// Business rule rejected the request
    Policy(PolicyError),

    /// Storage backend failure
    Storage(StorageError),
}

impl fmt::Display for ReceiverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiverError::Validation(e) => write!(f, "{}", e),
            ReceiverError::NotFound(e) => write!(f, "{}", e),
            ReceiverError::Policy(e) => write!(f, "{}", e),
            ReceiverError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ReceiverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReceiverError::Validation(e) => Some(e),
            ReceiverError::NotFound(e) => Some(e),
            ReceiverError::Policy(e) => Some(e),
            ReceiverError::Storage(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ReceiverError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReceiverError::Validation(_) => StatusCode::BAD_REQUEST,
            ReceiverError::NotFound(_) => StatusCode::NOT_FOUND,
            ReceiverError::Policy(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ReceiverError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ReceiverError::Validation(e) => e.error_code(),
            ReceiverError::NotFound(e) => e.error_code(),
            ReceiverError::Policy(e) => e.error_code(),
            ReceiverError::Storage(e) => e.error_code(),
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ReceiverError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

/// GraphQL error conversion: the message is surfaced verbatim and the error
/// code travels in the `code` extension.
impl ErrorExtensions for ReceiverError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.error_code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors for malformed input fields
///
/// Surfaced to the caller verbatim as field-level messages; never retried.
#[derive(Debug)]
pub enum ValidationError {
    /// Identifier does not match the CPF or CNPJ shape
    InvalidIdentifier { value: String },

    /// Email does not match the accepted pattern
    InvalidEmail { value: String },

    /// Email exceeds the configured maximum length
    EmailTooLong { length: usize, max: usize },

    /// Pix key type token is not in the registry
    KeyTypeNotFound { value: String },

    /// Pix key does not match the format rule for its key type
    InvalidPixKey { key_type: PixKeyType },

    /// A required field is missing or empty
    MissingField { field: &'static str },

    /// Receiver id is not a valid UUID
    InvalidId { value: String },

    /// Pagination cursor is not valid base64
    InvalidCursor { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidIdentifier { value } => {
                write!(f, "Invalid identifier format: '{}'", value)
            }
            ValidationError::InvalidEmail { value } => {
                write!(f, "Invalid email format: '{}'", value)
            }
            ValidationError::EmailTooLong { length, max } => {
                write!(f, "Email exceeds {} characters (length: {})", max, length)
            }
            ValidationError::KeyTypeNotFound { value } => {
                write!(f, "Pix key type not found: '{}'", value)
            }
            ValidationError::InvalidPixKey { key_type } => {
                write!(f, "Invalid Pix key for {} key type", key_type.as_str())
            }
            ValidationError::MissingField { field } => {
                write!(f, "Missing required field: '{}'", field)
            }
            ValidationError::InvalidId { value } => {
                write!(f, "Invalid receiver id: '{}'", value)
            }
            ValidationError::InvalidCursor { value } => {
                write!(f, "Invalid pagination cursor: '{}'", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            ValidationError::InvalidEmail { .. } => "INVALID_EMAIL",
            ValidationError::EmailTooLong { .. } => "EMAIL_TOO_LONG",
            ValidationError::KeyTypeNotFound { .. } => "PIX_KEY_TYPE_NOT_FOUND",
            ValidationError::InvalidPixKey { .. } => "INVALID_PIX_KEY",
            ValidationError::MissingField { .. } => "MISSING_FIELD",
            ValidationError::InvalidId { .. } => "INVALID_RECEIVER_ID",
            ValidationError::InvalidCursor { .. } => "INVALID_CURSOR",
        }
    }
}

impl From<ValidationError> for ReceiverError {
    fn from(err: ValidationError) -> Self {
        ReceiverError::Validation(err)
    }
}

// =============================================================================
// Not Found Errors
// =============================================================================

/// Errors for lookups that matched nothing
#[derive(Debug)]
pub enum NotFoundError {
    /// No receiver with the given id (or it is soft-deleted)
    Receiver { id: Uuid },

    /// A write matched zero records
    NoneMatched,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundError::Receiver { id } => {
                write!(f, "Receiver with id '{}' not found", id)
            }
            NotFoundError::NoneMatched => {
                write!(f, "Record does not exist")
            }
        }
    }
}

impl std::error::Error for NotFoundError {}

impl NotFoundError {
    pub fn error_code(&self) -> &'static str {
        match self {
            NotFoundError::Receiver { .. } => "RECEIVER_NOT_FOUND",
            NotFoundError::NoneMatched => "RECORD_NOT_FOUND",
        }
    }
}

impl From<NotFoundError> for ReceiverError {
    fn from(err: NotFoundError) -> Self {
        ReceiverError::NotFound(err)
    }
}

// =============================================================================
// Policy Errors
// =============================================================================

/// Semantically valid input rejected by a business rule
#[derive(Debug)]
pub enum PolicyError {
    /// The status gate dropped every requested field
    NoFieldsToUpdate,

    /// A Pix key type change was requested without a new key
    KeyTypeWithoutKey,

    /// A delete request carried no ids
    EmptyIdList,
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::NoFieldsToUpdate => {
                write!(f, "Required at least one field to be updated")
            }
            PolicyError::KeyTypeWithoutKey => {
                write!(
                    f,
                    "Updating the Pix key type requires also updating the Pix key"
                )
            }
            PolicyError::EmptyIdList => {
                write!(f, "At least one id is required to delete receivers")
            }
        }
    }
}

impl std::error::Error for PolicyError {}

impl PolicyError {
    pub fn error_code(&self) -> &'static str {
        match self {
            PolicyError::NoFieldsToUpdate => "NO_FIELDS_TO_UPDATE",
            PolicyError::KeyTypeWithoutKey => "PIX_KEY_TYPE_WITHOUT_KEY",
            PolicyError::EmptyIdList => "EMPTY_ID_LIST",
        }
    }
}

impl From<PolicyError> for ReceiverError {
    fn from(err: PolicyError) -> Self {
        ReceiverError::Policy(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors from the repository backend, propagated unchanged and never retried
/// by the service (retry policy, if any, belongs to the backend).
#[derive(Debug)]
pub enum StorageError {
    /// Connection error
    Connection {
        backend: &'static str,
        message: String,
    },

    /// Query execution error
    Query {
        backend: &'static str,
        message: String,
    },

    /// A lock guarding in-memory state was poisoned
    LockPoisoned { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Connection { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
            StorageError::Query { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
            StorageError::LockPoisoned { message } => {
                write!(f, "Failed to acquire lock: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Connection { .. } => "STORAGE_CONNECTION_ERROR",
            StorageError::Query { .. } => "STORAGE_QUERY_ERROR",
            StorageError::LockPoisoned { .. } => "STORAGE_LOCK_ERROR",
        }
    }
}

impl From<StorageError> for ReceiverError {
    fn from(err: StorageError) -> Self {
        ReceiverError::Storage(err)
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for receiver operations
pub type ReceiverResult<T> = Result<T, ReceiverError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = NotFoundError::Receiver { id: Uuid::nil() };
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains(&Uuid::nil().to_string()));
    }

    #[test]
    fn test_status_codes() {
        let err: ReceiverError = ValidationError::MissingField { field: "name" }.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: ReceiverError = NotFoundError::NoneMatched.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err: ReceiverError = PolicyError::NoFieldsToUpdate.into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let err: ReceiverError = StorageError::Connection {
            backend: "MongoDB",
            message: "connection refused".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_codes() {
        let err: ReceiverError = PolicyError::KeyTypeWithoutKey.into();
        assert_eq!(err.error_code(), "PIX_KEY_TYPE_WITHOUT_KEY");

        let err: ReceiverError = ValidationError::InvalidCursor {
            value: "!!!".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "INVALID_CURSOR");
    }

    #[test]
    fn test_invalid_pix_key_names_the_key_type() {
        let err = ValidationError::InvalidPixKey {
            key_type: PixKeyType::Cpf,
        };
        assert!(err.to_string().contains("CPF"));
    }

    #[test]
    fn test_key_type_not_found_message() {
        let err = ValidationError::KeyTypeNotFound {
            value: "cpf".to_string(),
        };
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("cpf"));
    }

    #[test]
    fn test_error_response_body() {
        let err: ReceiverError = NotFoundError::Receiver { id: Uuid::nil() }.into();
        let response = err.to_response();
        assert_eq!(response.code, "RECEIVER_NOT_FOUND");
        assert!(response.message.contains("not found"));
    }

    #[test]
    fn test_graphql_extension_carries_code() {
        let err: ReceiverError = PolicyError::NoFieldsToUpdate.into();
        let gql = err.extend();
        assert!(gql.message.contains("at least one field"));
        assert!(gql.extensions.is_some());
    }
}
