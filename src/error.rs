use strum_macros::Display;
use thiserror::Error;

/// The collection in which an identifier was found twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IdentifierKind {
    #[strum(serialize = "event")]
    Event,
    #[strum(serialize = "object")]
    Object,
}

/// Input-validation failures of object-centric logs.
///
/// These are deterministic: they are detected before any partial result is committed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OcelError {
    /// A column is missing, or a cell does not have the shape its column requires.
    #[error("schema error: {0}")]
    Schema(String),

    /// Two events or two objects share an identifier.
    #[error("duplicate {kind} identifier `{id}`")]
    DuplicateIdentifier { kind: IdentifierKind, id: String },
}

impl OcelError {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }

    pub fn is_duplicate_identifier(&self) -> bool {
        matches!(self, Self::DuplicateIdentifier { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::{IdentifierKind, OcelError};

    #[test]
    fn error_messages() {
        let err = OcelError::schema("object type `order` is not a column");
        assert!(err.is_schema());
        assert_eq!(
            err.to_string(),
            "schema error: object type `order` is not a column"
        );

        let err = OcelError::DuplicateIdentifier {
            kind: IdentifierKind::Object,
            id: "o1".to_string(),
        };
        assert!(err.is_duplicate_identifier());
        assert_eq!(err.to_string(), "duplicate object identifier `o1`");
    }
}
