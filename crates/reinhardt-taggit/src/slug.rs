//! Slug generation and uniqueness resolution
//!
//! [`slugify`] turns a display string into a URL-safe token. [`SlugResolver`]
//! builds on it to find a slug that no persisted tag uses yet, appending
//! `-2`, `-3`, ... on collision and trimming the base so the result respects
//! the column length.
//!
//! # Examples
//!
//! ```
//! use reinhardt_taggit::slug::{slugify, unique_slug};
//!
//! assert_eq!(slugify("Hello World!"), "hello-world");
//!
//! let taken = ["django", "django-2"];
//! let slug = unique_slug("Django", 100, |candidate| taken.contains(&candidate));
//! assert_eq!(slug, "django-3");
//! ```

use std::convert::Infallible;

/// Separator placed between words and before numeric suffixes
pub const DEFAULT_SEPARATOR: char = '-';

/// Normalizes a display string into a URL-safe slug.
///
/// Punctuation is dropped, letters are transliterated to lowercase ASCII and
/// whitespace, `-` and `_` runs become a single `-`. The result only contains
/// `[a-z0-9-]` and never starts or ends with a separator.
///
/// # Examples
///
/// ```
/// use reinhardt_taggit::slug::slugify;
///
/// assert_eq!(slugify("  multiple   spaces  "), "multiple-spaces");
/// assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
/// assert_eq!(slugify("C++"), "c");
/// assert_eq!(slugify(""), "");
/// ```
pub fn slugify(input: &str) -> String {
	let kept: String = input
		.chars()
		.filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
		.collect();
	::slug::slugify(kept)
}

/// Like [`slugify`], joining words with `separator` instead of `-`.
pub fn slugify_with(input: &str, separator: char) -> String {
	let slug = slugify(input);
	if separator == DEFAULT_SEPARATOR {
		slug
	} else {
		slug.replace(DEFAULT_SEPARATOR, &separator.to_string())
	}
}

/// Removes separator characters from both ends of a slug.
pub fn slug_strip(value: &str, separator: char) -> &str {
	value.trim_matches(separator)
}

/// Resolves `name` to a slug for which `is_taken` returns `false`.
///
/// `max_length` of zero disables truncation.
pub fn unique_slug<F>(name: &str, max_length: usize, is_taken: F) -> String
where
	F: FnMut(&str) -> bool,
{
	SlugResolver::new(max_length).resolve(name, is_taken)
}

/// Finds a unique slug against a caller-supplied uniqueness oracle.
///
/// The result is only unique against the snapshot the oracle observed. Stores
/// must still enforce a unique constraint on the slug column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugResolver {
	max_length: usize,
	separator: char,
}

impl Default for SlugResolver {
	fn default() -> Self {
		Self {
			max_length: 0,
			separator: DEFAULT_SEPARATOR,
		}
	}
}

impl SlugResolver {
	/// Creates a resolver limiting slugs to `max_length` characters (0 = no limit)
	///
	/// A limit narrower than a numeric suffix yields suffix-only candidates
	/// that exceed it; `TagConfig::validate` rejects such limits.
	pub fn new(max_length: usize) -> Self {
		Self {
			max_length,
			..Self::default()
		}
	}

	/// Uses `separator` between words and before the numeric suffix
	pub fn with_separator(mut self, separator: char) -> Self {
		self.separator = separator;
		self
	}

	pub fn max_length(&self) -> usize {
		self.max_length
	}

	pub fn separator(&self) -> char {
		self.separator
	}

	/// Slug of `name` before any collision handling: slugified, truncated and
	/// stripped of edge separators.
	pub fn base_slug(&self, name: &str) -> String {
		let slug = slugify_with(name, self.separator);
		let slug = if self.max_length > 0 {
			truncate_chars(&slug, self.max_length)
		} else {
			slug.as_str()
		};
		slug_strip(slug, self.separator).to_string()
	}

	/// Resolves a unique slug with an infallible oracle.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_taggit::slug::SlugResolver;
	///
	/// let resolver = SlugResolver::new(5);
	/// let slug = resolver.resolve("abcde", |candidate| candidate == "abcde");
	/// assert_eq!(slug, "abc-2");
	/// ```
	pub fn resolve<F>(&self, name: &str, mut is_taken: F) -> String
	where
		F: FnMut(&str) -> bool,
	{
		match self.try_resolve(name, |candidate| Ok::<_, Infallible>(is_taken(candidate))) {
			Ok(slug) => slug,
			Err(never) => match never {},
		}
	}

	/// Resolves a unique slug with a fallible oracle, typically a store query.
	///
	/// An empty base slug counts as taken, so a name without sluggable
	/// characters resolves to `-2`, `-3`, ...
	///
	/// # Errors
	///
	/// Returns the first error produced by `is_taken`.
	pub fn try_resolve<F, E>(&self, name: &str, mut is_taken: F) -> Result<String, E>
	where
		F: FnMut(&str) -> Result<bool, E>,
	{
		let base = self.base_slug(name);
		if !base.is_empty() && !is_taken(&base)? {
			return Ok(base);
		}

		let mut next: u64 = 2;
		loop {
			let suffix = format!("{}{}", self.separator, next);
			let suffix_len = suffix.chars().count();
			let mut stem = base.as_str();
			if self.max_length > 0 && stem.chars().count() + suffix_len > self.max_length {
				stem = truncate_chars(stem, self.max_length.saturating_sub(suffix_len));
				stem = slug_strip(stem, self.separator);
			}

			let candidate = format!("{stem}{suffix}");
			if !is_taken(&candidate)? {
				return Ok(candidate);
			}
			tracing::trace!(candidate = %candidate, "slug candidate taken");
			next += 1;
		}
	}
}

fn truncate_chars(value: &str, max: usize) -> &str {
	match value.char_indices().nth(max) {
		Some((idx, _)) => &value[..idx],
		None => value,
	}
}
