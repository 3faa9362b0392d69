use thiserror::Error;

/// Result type alias using RepoError
pub type Result<T> = std::result::Result<T, RepoError>;

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of every error
/// the repository surface can produce. Each kind maps to a stable error code
/// that can be used for programmatic handling, testing, and protocol-binding
/// translation (e.g. into a transport's exception vocabulary).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed object identifier (neither a valid item id nor a relationship id)
    InvalidId,
    /// Structurally invalid argument (depth of 0, byte-range parameters, kind mismatch)
    InvalidArgument,
    /// The identifier or path resolves to nothing
    NotFound,
    /// Illegal item name, or a create/rename collided with an existing name
    NameConstraintViolation,
    /// Disallowed ACL parameters, wrong item kind, or missing required content
    ConstraintViolation,
    /// Operation rejected outright (read-only mode, stream deletion, range reads)
    NotSupported,
    /// Authentication against the backing store failed
    PermissionDenied,
    /// A content stream was requested or supplied for a folder
    StreamNotSupported,
    /// Content overwrite was refused because content already exists
    ContentAlreadyExists,
    /// Unclassified backing-store failure, wrapped
    Backend,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidId => "ERR_INVALID_ID",
            ErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ErrorKind::NotFound => "ERR_NOT_FOUND",
            ErrorKind::NameConstraintViolation => "ERR_NAME_CONSTRAINT_VIOLATION",
            ErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ErrorKind::NotSupported => "ERR_NOT_SUPPORTED",
            ErrorKind::PermissionDenied => "ERR_PERMISSION_DENIED",
            ErrorKind::StreamNotSupported => "ERR_STREAM_NOT_SUPPORTED",
            ErrorKind::ContentAlreadyExists => "ERR_CONTENT_ALREADY_EXISTS",
            ErrorKind::Backend => "ERR_BACKEND",
        }
    }
}

/// Comprehensive error taxonomy for repository operations
///
/// Validation failures are raised before any side effect; backing-store
/// failures mid-operation are wrapped as `Backend` and propagated after any
/// newly acquired lock has been released.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepoError {
    /// Malformed external object id
    #[error("Invalid object id: {id}")]
    InvalidId { id: String },

    /// Structurally invalid argument
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Object not found (by id or by path)
    #[error("Object not found: {object}")]
    NotFound { object: String },

    /// Illegal name or name collision
    #[error("Name constraint violation: {reason}")]
    NameConstraintViolation { reason: String },

    /// Operation violates a structural constraint
    #[error("Constraint violation: {reason}")]
    ConstraintViolation { reason: String },

    /// Operation is not supported by this repository
    #[error("Not supported: {reason}")]
    NotSupported { reason: String },

    /// Authentication or authorization failure
    #[error("Permission denied: {reason}")]
    PermissionDenied { reason: String },

    /// Content streams are not valid for the target object
    #[error("Content stream not supported: {object}")]
    StreamNotSupported { object: String },

    /// Refused to overwrite existing content
    #[error("Content already exists: {object}")]
    ContentAlreadyExists { object: String },

    /// Wrapped unclassified backing-store failure
    #[error("Backend failure: {message}")]
    Backend { message: String },
}

impl RepoError {
    /// Classify this error into its stable kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepoError::InvalidId { .. } => ErrorKind::InvalidId,
            RepoError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            RepoError::NotFound { .. } => ErrorKind::NotFound,
            RepoError::NameConstraintViolation { .. } => ErrorKind::NameConstraintViolation,
            RepoError::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
            RepoError::NotSupported { .. } => ErrorKind::NotSupported,
            RepoError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            RepoError::StreamNotSupported { .. } => ErrorKind::StreamNotSupported,
            RepoError::ContentAlreadyExists { .. } => ErrorKind::ContentAlreadyExists,
            RepoError::Backend { .. } => ErrorKind::Backend,
        }
    }

    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}
