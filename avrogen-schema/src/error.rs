//! Error types for schema parsing and validation.

use thiserror::Error;

/// Error type for schema parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON syntax error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on {element}")]
    MissingAttribute {
        /// Element kind (record, field, enum, ...).
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on {element}")]
    InvalidAttribute {
        /// Element kind.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Unknown type reference.
    #[error("unknown type '{type_name}' referenced in {context}")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Where the reference appeared.
        context: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (record, enum, fixed).
        kind: String,
        /// Full name of the duplicate.
        name: String,
    },

    /// Invalid schema structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for schema validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Name does not follow Avro naming rules.
    #[error("invalid {kind} name '{name}'")]
    InvalidName {
        /// What the name belongs to.
        kind: String,
        /// Offending name.
        name: String,
    },

    /// Two fields of a record share a name.
    #[error("duplicate field '{field}' in record '{record}'")]
    DuplicateField {
        /// Record full name.
        record: String,
        /// Field name.
        field: String,
    },

    /// Two symbols of an enum share a name.
    #[error("duplicate symbol '{symbol}' in enum '{enum_name}'")]
    DuplicateSymbol {
        /// Enum full name.
        enum_name: String,
        /// Symbol.
        symbol: String,
    },

    /// Union breaks Avro union rules.
    #[error("invalid union: {message}")]
    InvalidUnion {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown type error.
    pub fn unknown_type(type_name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            context: context.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}
