//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] avrogen_schema::ParseError),

    /// Schema validation error.
    #[error("schema error: {0}")]
    Schema(#[from] avrogen_schema::SchemaError),

    /// Only record schemas can be turned into declarations.
    #[error("can only generate Rust code from record schemas, found {kind}")]
    RootNotRecord {
        /// Kind of the root schema.
        kind: String,
    },

    /// Two distinct schema names map to the same Rust identifier.
    #[error("'{first}' and '{second}' both map to the Rust identifier '{ident}'")]
    IdentifierCollision {
        /// Shared identifier.
        ident: String,
        /// Schema name that claimed the identifier first.
        first: String,
        /// Schema name that collided with it.
        second: String,
    },

    /// Encoder helpers cannot represent some fields on the Avro wire.
    #[error("encoders do not support the representation of: {fields}")]
    UnsupportedEncoding {
        /// Affected fields, as `record.field`.
        fields: String,
    },

    /// Generated text is not well-formed Rust.
    #[error("failed formatting: {message}")]
    Format {
        /// Parser message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid generator configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a root-kind error.
    pub fn root_not_record(kind: impl Into<String>) -> Self {
        Self::RootNotRecord { kind: kind.into() }
    }

    /// Creates an identifier collision error.
    pub fn collision(
        ident: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::IdentifierCollision {
            ident: ident.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Creates a formatting error with the given message.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Creates a configuration error with the given message.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns true if the error stems from the input schema.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Parse(_)
                | Self::Schema(_)
                | Self::RootNotRecord { .. }
                | Self::IdentifierCollision { .. }
                | Self::UnsupportedEncoding { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CodegenError::root_not_record("array");
        assert_eq!(
            err.to_string(),
            "can only generate Rust code from record schemas, found array"
        );
        assert!(err.is_input_error());

        let err = CodegenError::format("expected `;`");
        assert_eq!(err.to_string(), "failed formatting: expected `;`");
        assert!(!err.is_input_error());

        let err = CodegenError::collision("Item", "a.Item", "b.Item");
        assert_eq!(
            err.to_string(),
            "'a.Item' and 'b.Item' both map to the Rust identifier 'Item'"
        );
        assert!(err.is_input_error());
    }
}
