//! Tagging configuration
//!
//! `TagConfig` is usually deserialized from the `[taggit]` table of the
//! project settings, but can also be assembled with [`TagConfig::builder`].

use crate::error::{Result, TaggitError};
use crate::slug::{DEFAULT_SEPARATOR, SlugResolver};
use serde::{Deserialize, Serialize};

/// Column length of `Tag::name` and `Tag::slug`
pub const DEFAULT_MAX_LENGTH: usize = 100;

/// Shortest positive slug limit, wide enough for a stem character plus a
/// suffix up to `-999999`
pub const MIN_SLUG_LENGTH: usize = 8;

/// Separators that stay literal inside a URL path segment
pub const SLUG_SEPARATORS: [char; 4] = ['-', '_', '.', '~'];

/// Number of insert attempts before slug allocation is reported as failed
pub const DEFAULT_MAX_CREATE_ATTEMPTS: usize = 100;

/// Tagging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
	/// Maximum tag name length in characters
	pub max_name_length: usize,
	/// Maximum slug length in characters (0 disables truncation).
	///
	/// Positive values must be at least [`MIN_SLUG_LENGTH`]; a suffix wider
	/// than the limit would otherwise produce an overlong slug.
	pub max_slug_length: usize,
	/// Separator between slug words and before numeric suffixes, one of
	/// [`SLUG_SEPARATORS`]
	pub slug_separator: char,
	/// Insert attempts allowed when concurrent writers take the resolved slug
	pub max_create_attempts: usize,
}

impl Default for TagConfig {
	fn default() -> Self {
		Self {
			max_name_length: DEFAULT_MAX_LENGTH,
			max_slug_length: DEFAULT_MAX_LENGTH,
			slug_separator: DEFAULT_SEPARATOR,
			max_create_attempts: DEFAULT_MAX_CREATE_ATTEMPTS,
		}
	}
}

impl TagConfig {
	/// Creates a builder for fluent configuration
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_taggit::TagConfig;
	///
	/// let config = TagConfig::builder()
	///     .max_slug_length(50)
	///     .slug_separator('_')
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(config.max_slug_length, 50);
	/// assert_eq!(config.slug_separator, '_');
	/// ```
	pub fn builder() -> TagConfigBuilder {
		TagConfigBuilder::default()
	}

	/// Parses a TOML document holding the taggit settings.
	///
	/// Missing keys fall back to their defaults.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_taggit::TagConfig;
	///
	/// let config = TagConfig::from_toml_str("max_create_attempts = 5").unwrap();
	/// assert_eq!(config.max_create_attempts, 5);
	/// assert_eq!(config.max_slug_length, 100);
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let config: TagConfig = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks that the settings can be used to create tags.
	///
	/// # Errors
	///
	/// Returns [`TaggitError::ConfigError`] if the separator is not a
	/// URL-unreserved character, the slug limit is too short for a numeric
	/// suffix, or a limit is zero where a positive value is required.
	pub fn validate(&self) -> Result<()> {
		if !SLUG_SEPARATORS.contains(&self.slug_separator) {
			return Err(TaggitError::ConfigError(format!(
				"slug_separator must be one of {SLUG_SEPARATORS:?}, got {:?}",
				self.slug_separator
			)));
		}
		if self.max_slug_length != 0 && self.max_slug_length < MIN_SLUG_LENGTH {
			return Err(TaggitError::ConfigError(format!(
				"max_slug_length must be 0 or at least {MIN_SLUG_LENGTH}, got {}",
				self.max_slug_length
			)));
		}
		if self.max_name_length == 0 {
			return Err(TaggitError::ConfigError(
				"max_name_length must be non-zero".to_string(),
			));
		}
		if self.max_create_attempts == 0 {
			return Err(TaggitError::ConfigError(
				"max_create_attempts must be non-zero".to_string(),
			));
		}
		Ok(())
	}

	/// Slug resolver matching these settings
	pub fn slug_resolver(&self) -> SlugResolver {
		SlugResolver::new(self.max_slug_length).with_separator(self.slug_separator)
	}
}

/// Builder for [`TagConfig`]
#[derive(Debug, Default)]
pub struct TagConfigBuilder {
	config: TagConfig,
}

impl TagConfigBuilder {
	pub fn max_name_length(mut self, len: usize) -> Self {
		self.config.max_name_length = len;
		self
	}

	pub fn max_slug_length(mut self, len: usize) -> Self {
		self.config.max_slug_length = len;
		self
	}

	pub fn slug_separator(mut self, separator: char) -> Self {
		self.config.slug_separator = separator;
		self
	}

	pub fn max_create_attempts(mut self, attempts: usize) -> Self {
		self.config.max_create_attempts = attempts;
		self
	}

	/// Validates and returns the configuration
	pub fn build(self) -> Result<TagConfig> {
		self.config.validate()?;
		Ok(self.config)
	}
}
