//! Storage backends
//!
//! [`TagStore`] and [`TaggedItemStore`] are the persistence boundary of the
//! taggit system. Database-backed implementations live with the host
//! application (see [`crate::sql`] for query builders); the in-memory stores
//! here enforce the same unique constraints and are what the tests run on.

mod memory;

pub use memory::{MemoryTagStore, MemoryTaggedItemStore};

use crate::error::Result;
use crate::lookup::LookupKey;
use crate::models::{Tag, TaggedItem};

/// Persistence for tags
///
/// Implementations must reject duplicate names and duplicate slugs with
/// [`TaggitError::Conflict`](crate::TaggitError::Conflict). Slug resolution
/// relies on that constraint to stay correct under concurrent writers.
pub trait TagStore: Send + Sync {
	/// Fetches a tag by primary key
	///
	/// # Errors
	///
	/// Returns [`TaggitError::TagNotFound`](crate::TaggitError::TagNotFound) when absent.
	fn get_tag(&self, id: i64) -> Result<Tag>;

	fn find_by_name(&self, name: &str) -> Result<Option<Tag>>;

	fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>>;

	fn slug_exists(&self, slug: &str) -> Result<bool> {
		Ok(self.find_by_slug(slug)?.is_some())
	}

	/// Persists a new tag and returns it with its assigned id
	fn insert_tag(&self, tag: Tag) -> Result<Tag>;

	/// Persists a changed name. The stored slug is never modified.
	fn update_tag(&self, tag: &Tag) -> Result<()>;

	fn delete_tag(&self, id: i64) -> Result<()>;

	/// Fetches the tags with the given ids, ordered by name. Unknown ids are skipped.
	fn tags_by_ids(&self, ids: &[i64]) -> Result<Vec<Tag>>;

	/// All tags ordered by name
	fn all_tags(&self) -> Result<Vec<Tag>>;
}

/// Persistence for one through-table
pub trait TaggedItemStore: Send + Sync {
	/// Persists a new row and returns it with its assigned id
	fn insert_item(&self, item: TaggedItem) -> Result<TaggedItem>;

	/// Fetches a row by primary key
	///
	/// # Errors
	///
	/// Returns [`TaggitError::TaggedItemNotFound`](crate::TaggitError::TaggedItemNotFound) when absent.
	fn get_item(&self, id: i64) -> Result<TaggedItem>;

	/// Rows matching `key`, in insertion order
	fn find_items(&self, key: &LookupKey) -> Result<Vec<TaggedItem>>;

	/// Rows pointing at `tag_id`, in insertion order
	fn items_for_tag(&self, tag_id: i64) -> Result<Vec<TaggedItem>>;

	/// Deletes rows matching `key`, restricted to `tag_id` when given.
	/// Returns the number of deleted rows.
	fn delete_items(&self, key: &LookupKey, tag_id: Option<i64>) -> Result<usize>;
}
