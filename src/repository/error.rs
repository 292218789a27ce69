//! Repository error types

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Finding all entities
    FindAll,
    /// Finding a single entity by a lookup key
    FindOne,
    /// Creating a new entity
    Create,
    /// Updating an existing entity
    Update,
    /// Deleting an entity
    Delete,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FindAll => write!(f, "find_all"),
            Self::FindOne => write!(f, "find_one"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Entity was not found
    NotFound,
    /// Database constraint violation (unique index, field assertion)
    ConstraintViolation,
    /// Failed to connect to the store
    ConnectionFailed,
    /// Operation timed out
    Timeout,
    /// Query execution failed
    QueryFailed,
    /// Serialization or deserialization error
    SerializationError,
    /// Other unclassified error
    Other,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::QueryFailed => write!(f, "query_failed"),
            Self::SerializationError => write!(f, "serialization_error"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved (e.g., "Pet")
    pub entity_type: Option<String>,
    /// The lookup key of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a "not found" error with entity context
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            operation: RepositoryOperation::FindOne,
            kind: RepositoryErrorKind::NotFound,
            message: "Entity not found".to_string(),
            entity_type: Some(entity_type.into()),
            entity_id: Some(entity_id.into()),
        }
    }

    /// Create a query failed error
    pub fn query_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::QueryFailed, message)
    }

    /// Create a serialization error
    pub fn serialization_error(
        operation: RepositoryOperation,
        message: impl Into<String>,
    ) -> Self {
        Self::new(operation, RepositoryErrorKind::SerializationError, message)
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Check if this error is retriable (transient errors that may succeed on retry)
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(ref entity_type), Some(ref entity_id)) = (&self.entity_type, &self.entity_id)
        {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

// Conversion from surrealdb::Error, classified by message content since the
// driver surfaces engine errors as strings
impl From<surrealdb::Error> for RepositoryError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();

        let (kind, operation) = if msg.contains("already contains")
            || msg.contains("already exists")
            || msg.contains("unique")
        {
            (
                RepositoryErrorKind::ConstraintViolation,
                RepositoryOperation::Create,
            )
        } else if msg.contains("not found") || msg.contains("no record") {
            (RepositoryErrorKind::NotFound, RepositoryOperation::FindOne)
        } else if msg.contains("timeout") || msg.contains("timed out") {
            (RepositoryErrorKind::Timeout, RepositoryOperation::FindAll)
        } else if msg.contains("connect") || msg.contains("Connection") {
            (
                RepositoryErrorKind::ConnectionFailed,
                RepositoryOperation::FindAll,
            )
        } else if msg.contains("parse") || msg.contains("syntax") {
            (RepositoryErrorKind::QueryFailed, RepositoryOperation::FindAll)
        } else {
            (RepositoryErrorKind::Other, RepositoryOperation::FindAll)
        };

        Self::new(operation, kind, msg)
    }
}
