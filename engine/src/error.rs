//! Error types for the shape engine.

use crate::{FieldName, ShapeName};
use thiserror::Error;

/// All possible errors from the shape engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Configuration errors
    #[error("no property mapping registered for <{external}, {internal}>")]
    MappingNotFound {
        external: ShapeName,
        internal: ShapeName,
    },

    #[error("property mapping for '{external_name}' is registered twice for <{external}, {internal}>")]
    DuplicateMapping {
        external: ShapeName,
        internal: ShapeName,
        external_name: FieldName,
    },

    #[error("property mapping for '{0}' has no internal fields")]
    EmptyMapping(FieldName),

    #[error("property mapping targets unknown field '{field}' on {shape}")]
    UnknownInternalField { shape: ShapeName, field: FieldName },

    // Client input errors
    #[error("key mapping for {0} is missing")]
    UnknownSortField(FieldName),

    #[error("{shape} has no field named '{field}'")]
    UnknownField { shape: ShapeName, field: FieldName },

    #[error("empty field name in list")]
    EmptyFieldName,

    #[error("page number must be at least 1, got {0}")]
    InvalidPageNumber(usize),
}

impl Error {
    /// Whether the error was caused by the request rather than by how the
    /// engine was set up.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownSortField(_)
                | Error::UnknownField { .. }
                | Error::EmptyFieldName
                | Error::InvalidPageNumber(_)
        )
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
