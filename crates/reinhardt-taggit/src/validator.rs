//! Tag name validation

use crate::error::{Result, TaggitError};

/// Validates a tag name before it is persisted.
///
/// # Errors
///
/// - [`TaggitError::InvalidTagName`] for empty or whitespace-only names
/// - [`TaggitError::TagNameTooLong`] when `name` has more than `max_length` characters
/// - [`TaggitError::InvalidCharacters`] when `name` contains control characters
///
/// # Examples
///
/// ```
/// use reinhardt_taggit::validator::validate_tag_name;
///
/// assert!(validate_tag_name("rust", 100).is_ok());
/// assert!(validate_tag_name("   ", 100).is_err());
/// assert!(validate_tag_name("rust", 3).is_err());
/// ```
pub fn validate_tag_name(name: &str, max_length: usize) -> Result<()> {
	if name.trim().is_empty() {
		return Err(TaggitError::InvalidTagName(
			"tag name must not be empty".to_string(),
		));
	}

	let len = name.chars().count();
	if len > max_length {
		return Err(TaggitError::TagNameTooLong {
			max: max_length,
			len,
		});
	}

	if name.chars().any(char::is_control) {
		return Err(TaggitError::InvalidCharacters(name.escape_debug().to_string()));
	}

	Ok(())
}
