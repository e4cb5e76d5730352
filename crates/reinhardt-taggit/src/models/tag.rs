//! Tag model

use crate::slug::slugify;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A uniquely named, uniquely slugged label
///
/// The slug is assigned once when the tag is created and has no setter;
/// renaming a tag leaves it untouched.
///
/// # Examples
///
/// ```
/// use reinhardt_taggit::Tag;
///
/// let mut tag = Tag::from_name("Rust Programming");
/// assert_eq!(tag.slug(), "rust-programming");
///
/// tag.rename("Rust");
/// assert_eq!(tag.name, "Rust");
/// assert_eq!(tag.slug(), "rust-programming");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
	/// Primary key, `None` until persisted
	pub id: Option<i64>,
	/// Human-readable name, unique across tags
	pub name: String,
	slug: String,
	pub created_at: DateTime<Utc>,
}

impl Tag {
	/// Creates an unsaved tag with an explicit slug
	pub fn new(name: &str, slug: &str) -> Self {
		Self {
			id: None,
			name: name.to_string(),
			slug: slug.to_string(),
			created_at: Utc::now(),
		}
	}

	/// Creates an unsaved tag whose slug is the plain slugified name.
	///
	/// No uniqueness check is made; use `TagManager::create_or_get` to persist
	/// tags.
	pub fn from_name(name: &str) -> Self {
		Self::new(name, &slugify(name))
	}

	/// Rebuilds a persisted tag from stored columns
	pub fn from_parts(id: i64, name: String, slug: String, created_at: DateTime<Utc>) -> Self {
		Self {
			id: Some(id),
			name,
			slug,
			created_at,
		}
	}

	pub fn slug(&self) -> &str {
		&self.slug
	}

	/// Changes the display name. The slug keeps its original value.
	pub fn rename(&mut self, name: &str) {
		self.name = name.to_string();
	}

	pub(crate) fn with_id(mut self, id: i64) -> Self {
		self.id = Some(id);
		self
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)
	}
}
