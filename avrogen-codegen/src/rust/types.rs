//! Type expressions for generated Rust code.

use std::fmt;

/// Placeholder type for values whose static type cannot be determined.
pub const DYNAMIC_TYPE: &str = "serde_json::Value";

/// Import backing timestamp and duration logical types.
pub const TIME_IMPORT: &str = "std::time";

/// Import backing the `decimal` logical type.
pub const BIG_RATIONAL_IMPORT: &str = "num_rational::BigRational";

/// Rust type resolved for a schema node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Type named by a path (`String`, `i64`, `time::SystemTime`, a record).
    Path(String),
    /// `Vec<T>`.
    Sequence(Box<TypeExpr>),
    /// `HashMap<String, T>`.
    Map(Box<TypeExpr>),
    /// `Option<T>`.
    Optional(Box<TypeExpr>),
    /// `[u8; N]`.
    FixedBytes(usize),
    /// `Box<T>`, for a record referenced while it is still being resolved.
    Boxed(Box<TypeExpr>),
    /// Fully dynamic value.
    Dynamic,
}

impl TypeExpr {
    /// Creates a path type.
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    /// Creates the byte sequence type.
    #[must_use]
    pub fn bytes() -> Self {
        Self::Sequence(Box::new(Self::path("u8")))
    }

    /// Wraps an item type in a sequence. Boxing is dropped: `Vec` already adds indirection.
    #[must_use]
    pub fn sequence_of(item: Self) -> Self {
        Self::Sequence(Box::new(item.unboxed()))
    }

    /// Wraps a value type in a string-keyed map. Boxing is dropped as for sequences.
    #[must_use]
    pub fn map_of(value: Self) -> Self {
        Self::Map(Box::new(value.unboxed()))
    }

    /// Wraps a type in `Option`.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Returns true for sequence types, which already carry an empty state.
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Returns true for the dynamic placeholder.
    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic)
    }

    /// Removes one level of boxing.
    #[must_use]
    pub fn unboxed(self) -> Self {
        match self {
            Self::Boxed(inner) => *inner,
            other => other,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.write_str(path),
            Self::Sequence(item) => write!(f, "Vec<{item}>"),
            Self::Map(value) => write!(f, "std::collections::HashMap<String, {value}>"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::FixedBytes(size) => write!(f, "[u8; {size}]"),
            Self::Boxed(inner) => write!(f, "Box<{inner}>"),
            Self::Dynamic => f.write_str(DYNAMIC_TYPE),
        }
    }
}
