//! Error types

/// Errors raised by the table core.
///
/// Every variant is a caller contract violation: the table state is left
/// untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    /// Two column descriptors share the same key.
    #[error("Duplicate column key '{key}'")]
    DuplicateColumn { key: String },

    /// A key was used that no column descriptor declares.
    #[error("Unknown column '{key}'")]
    UnknownColumn { key: String },

    /// A reorder request was not a permutation of the current columns.
    #[error("Invalid column order: {reason}")]
    InvalidColumnOrder { reason: String },

    /// A filter entry could not be turned into a usable filter.
    #[error("Malformed filter for '{key}': {reason}")]
    MalformedFilter { key: String, reason: String },

    /// Two rows carry the same value in the identity column.
    #[error("Duplicate identity '{id}' in column '{key}'")]
    DuplicateIdentity { key: String, id: String },

    /// No current row carries this identity.
    #[error("No row with identity '{id}'")]
    UnknownIdentity { id: String },

    /// Row expansion was used without an identity column configured.
    #[error("Row expansion requires an identity key")]
    MissingIdentityKey,

    /// Configuration could not be parsed.
    #[error("Invalid table configuration: {0}")]
    Config(String),
}

impl TableError {
    /// Creates a duplicate column error.
    pub fn duplicate_column(key: impl Into<String>) -> Self {
        Self::DuplicateColumn { key: key.into() }
    }

    /// Creates an unknown column error.
    pub fn unknown_column(key: impl Into<String>) -> Self {
        Self::UnknownColumn { key: key.into() }
    }

    /// Creates an invalid column order error.
    pub fn invalid_order(reason: impl Into<String>) -> Self {
        Self::InvalidColumnOrder {
            reason: reason.into(),
        }
    }

    /// Creates a malformed filter error.
    pub fn malformed_filter(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedFilter {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown identity error.
    pub fn unknown_identity(id: impl Into<String>) -> Self {
        Self::UnknownIdentity { id: id.into() }
    }

    /// Creates a duplicate identity error.
    pub fn duplicate_identity(key: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateIdentity {
            key: key.into(),
            id: id.into(),
        }
    }
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
