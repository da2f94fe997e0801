//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("{0}")]
    Validation(String),
}

impl DomainError {
    /// A required input field was absent from the request.
    pub fn missing_field(field: &str) -> Self {
        DomainError::Validation(format!("Missing `{}` in request body", field))
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = DomainError::missing_field("author.firstName");
        assert_eq!(err.to_string(), "Missing `author.firstName` in request body");
    }

    #[test]
    fn test_not_found_message_names_entity() {
        let id = Uuid::new_v4();
        let err = DomainError::NotFound {
            entity_type: "Post",
            id,
        };
        assert_eq!(err.to_string(), format!("Post with id {} not found", id));
    }
}
