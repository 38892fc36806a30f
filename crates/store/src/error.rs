//! Error types for the document store.
//!
//! This module defines all error types used throughout the store layer,
//! organized by category: document state, validation, query construction,
//! and backend failures.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Document state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Query construction and execution errors
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to document state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested document was not found.
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// A document with the given ID already exists.
    #[error("document already exists: {collection}/{id}")]
    AlreadyExists { collection: String, id: String },

    /// The collection is not part of the schema registry.
    #[error("unknown collection: {collection}")]
    UnknownCollection { collection: String },
}

/// Errors related to document validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The document body is not a JSON object.
    #[error("document must be a JSON object")]
    NotAnObject,

    /// A required field is missing from the document.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    /// A status value outside the collection's value set.
    #[error("invalid status '{value}' for {collection}, expected one of: {allowed}")]
    InvalidStatus {
        collection: String,
        value: String,
        allowed: String,
    },

    /// A reference field points at a document that does not exist.
    #[error("reference '{field}' points to missing document {target}/{id}")]
    DanglingReference {
        field: String,
        target: String,
        id: String,
    },

    /// A uniquely-constrained field collides with an existing document.
    #[error("a {collection} record with {field} '{value}' already exists")]
    DuplicateValue {
        collection: String,
        field: String,
        value: String,
    },

    /// The document is still referenced by dependent records.
    #[error("{collection}/{id} is referenced by {count} {dependent} record(s)")]
    HasDependents {
        collection: String,
        id: String,
        dependent: String,
        count: u64,
    },
}

/// Errors related to query construction and execution.
#[derive(Error, Debug)]
pub enum QueryError {
    /// A field name not declared by the collection schema.
    #[error("field '{field}' is not queryable on {collection}")]
    UnknownField { collection: String, field: String },

    /// The aggregation target is not a declared reference field.
    #[error("'{field}' is not a reference field on {collection}")]
    NotAReference { collection: String, field: String },
}

/// Errors originating from the storage backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Failed to obtain a connection.
    #[error("backend '{backend_name}' connection failed: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Failed to serialize or deserialize document data.
    #[error("serialization error: {message}")]
    SerializationError { message: String },

    /// An internal backend failure.
    #[error("backend '{backend_name}' internal error: {message}")]
    Internal {
        backend_name: String,
        message: String,
    },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StoreError::Resource(ResourceError::NotFound {
            collection: "patients".to_string(),
            id: "123".to_string(),
        });
        assert_eq!(err.to_string(), "document not found: patients/123");
    }

    #[test]
    fn test_duplicate_value_display() {
        let err = ValidationError::DuplicateValue {
            collection: "departments".to_string(),
            field: "name".to_string(),
            value: "Cardiology".to_string(),
        };
        assert!(err.to_string().contains("Cardiology"));
    }

    #[test]
    fn test_has_dependents_display() {
        let err = ValidationError::HasDependents {
            collection: "departments".to_string(),
            id: "d1".to_string(),
            dependent: "staff".to_string(),
            count: 3,
        };
        assert!(err.to_string().contains("3 staff"));
    }

    #[test]
    fn test_error_conversion() {
        let err: StoreError = ResourceError::UnknownCollection {
            collection: "widgets".to_string(),
        }
        .into();
        assert!(matches!(err, StoreError::Resource(_)));
    }
}
