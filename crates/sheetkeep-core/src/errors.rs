use sheetkeep_core_types::RequestId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Empty or malformed input (empty path, aggregate without an ID)
    InvalidInput,
    /// Filesystem failure while preparing the storage location
    Io,
    /// Store unreachable, liveness check or integrity enablement failed
    Connection,
    /// Malformed migration script or failing migration statement
    Migration,
    /// Requested aggregate does not exist
    NotFound,
    /// Failure inside a repository transaction (always rolled back)
    Transaction,
    /// The request context was cancelled before the work committed
    Cancelled,
    /// A stored value could not be decoded into the model
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Connection => "ERR_CONNECTION",
            ExErrorKind::Migration => "ERR_MIGRATION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Transaction => "ERR_TRANSACTION",
            ExErrorKind::Cancelled => "ERR_CANCELLED",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context
/// needed to identify the failing operation.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Errors raised while decoding stored values into the model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Stored proficiency ordinal is outside {0, 1, 2}
    #[error("Unknown proficiency level: {value}")]
    UnknownProficiency { value: i64 },

    /// Stored ability code is not one of the six abilities
    #[error("Unknown ability code: {code}")]
    UnknownAbility { code: String },

    /// Stored equip state ordinal is outside {0, 1, 2}
    #[error("Unknown equip state: {value}")]
    UnknownEquipState { value: i64 },

    /// Spell slot array could not be encoded or decoded
    #[error("Invalid spell slot data: {message}")]
    SpellSlots { message: String },

    /// Timestamp outside the range the store can represent
    #[error("Timestamp out of range: {value}")]
    TimestampOutOfRange { value: i64 },
}

impl From<ModelError> for ExError {
    fn from(err: ModelError) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::SpellSlots {
            message: err.to_string(),
        }
    }
}
