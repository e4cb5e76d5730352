use thiserror::Error;

/// Unique column that rejected a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
	Name,
	Slug,
}

impl std::fmt::Display for ConflictField {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ConflictField::Name => f.write_str("name"),
			ConflictField::Slug => f.write_str("slug"),
		}
	}
}

/// Errors that can occur in the taggit system
#[derive(Debug, Error)]
pub enum TaggitError {
	/// Tag name is invalid
	#[error("Tag name is invalid: {0}")]
	InvalidTagName(String),

	/// Tag name exceeds maximum length
	#[error("Tag name too long: maximum {max} characters, got {len}")]
	TagNameTooLong { max: usize, len: usize },

	/// Tag name contains invalid characters
	#[error("Tag name contains invalid characters: {0}")]
	InvalidCharacters(String),

	/// Tag not found
	#[error("Tag not found: {0}")]
	TagNotFound(String),

	/// Tagged item not found
	#[error("Tagged item not found: id {0}")]
	TaggedItemNotFound(i64),

	/// A unique constraint rejected the write
	#[error("Unique constraint violated on tag {field}: '{value}'")]
	Conflict { field: ConflictField, value: String },

	/// Every slug resolution attempt lost the race against concurrent writers
	#[error("Could not allocate a unique slug for tag '{name}' after {attempts} attempts")]
	SlugConflict { name: String, attempts: usize },

	/// Bulk lookup over an empty or mixed-type owner collection
	#[error("Invalid bulk lookup: {0}")]
	InvalidBulkLookup(String),

	/// Owner has no primary key yet
	#[error("Cannot tag an unsaved {0} instance")]
	UnsavedObject(String),

	/// Stored content type id that the registry does not know
	#[error("Unknown content type id: {0}")]
	UnknownContentType(i64),

	/// Owner does not belong to the through-table's owner type
	#[error("Content type mismatch: expected {expected}, got {found}")]
	ContentTypeMismatch { expected: String, found: String },

	/// Database error reported by a store backend
	#[error("Database error: {0}")]
	DatabaseError(String),

	/// Configuration error
	#[error("Configuration error: {0}")]
	ConfigError(String),
}

impl TaggitError {
	/// Returns `true` for unique constraint violations
	pub fn is_conflict(&self) -> bool {
		matches!(self, TaggitError::Conflict { .. })
	}
}

impl From<toml::de::Error> for TaggitError {
	fn from(err: toml::de::Error) -> Self {
		TaggitError::ConfigError(err.to_string())
	}
}

/// Result type for taggit operations
pub type Result<T> = std::result::Result<T, TaggitError>;
