//! In-memory stores

use super::{TagStore, TaggedItemStore};
use crate::error::{ConflictField, Result, TaggitError};
use crate::lookup::LookupKey;
use crate::models::{Tag, TaggedItem};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// Tag table kept in memory
///
/// Name and slug uniqueness are checked under the write lock, so concurrent
/// inserts behave like a database with unique indexes on both columns.
#[derive(Debug, Default)]
pub struct MemoryTagStore {
	table: RwLock<TagTable>,
}

#[derive(Debug, Default)]
struct TagTable {
	rows: BTreeMap<i64, Tag>,
	by_name: HashMap<String, i64>,
	by_slug: HashMap<String, i64>,
	next_id: i64,
}

impl MemoryTagStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.table.read().rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

fn sorted_by_name(mut tags: Vec<Tag>) -> Vec<Tag> {
	tags.sort_by(|a, b| a.name.cmp(&b.name));
	tags
}

impl TagStore for MemoryTagStore {
	fn get_tag(&self, id: i64) -> Result<Tag> {
		self.table
			.read()
			.rows
			.get(&id)
			.cloned()
			.ok_or_else(|| TaggitError::TagNotFound(format!("id {id}")))
	}

	fn find_by_name(&self, name: &str) -> Result<Option<Tag>> {
		let table = self.table.read();
		Ok(table
			.by_name
			.get(name)
			.and_then(|id| table.rows.get(id))
			.cloned())
	}

	fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>> {
		let table = self.table.read();
		Ok(table
			.by_slug
			.get(slug)
			.and_then(|id| table.rows.get(id))
			.cloned())
	}

	fn slug_exists(&self, slug: &str) -> Result<bool> {
		Ok(self.table.read().by_slug.contains_key(slug))
	}

	fn insert_tag(&self, tag: Tag) -> Result<Tag> {
		let mut table = self.table.write();
		if table.by_name.contains_key(&tag.name) {
			return Err(TaggitError::Conflict {
				field: ConflictField::Name,
				value: tag.name,
			});
		}
		if table.by_slug.contains_key(tag.slug()) {
			return Err(TaggitError::Conflict {
				field: ConflictField::Slug,
				value: tag.slug().to_string(),
			});
		}

		table.next_id += 1;
		let id = table.next_id;
		let tag = tag.with_id(id);
		table.by_name.insert(tag.name.clone(), id);
		table.by_slug.insert(tag.slug().to_string(), id);
		table.rows.insert(id, tag.clone());
		Ok(tag)
	}

	fn update_tag(&self, tag: &Tag) -> Result<()> {
		let id = tag
			.id
			.ok_or_else(|| TaggitError::TagNotFound(format!("'{}' has not been saved", tag.name)))?;

		let mut table = self.table.write();
		let old_name = match table.rows.get(&id) {
			Some(stored) => stored.name.clone(),
			None => return Err(TaggitError::TagNotFound(format!("id {id}"))),
		};
		if old_name == tag.name {
			return Ok(());
		}
		if table.by_name.contains_key(&tag.name) {
			return Err(TaggitError::Conflict {
				field: ConflictField::Name,
				value: tag.name.clone(),
			});
		}

		table.by_name.remove(&old_name);
		table.by_name.insert(tag.name.clone(), id);
		if let Some(stored) = table.rows.get_mut(&id) {
			stored.rename(&tag.name);
		}
		Ok(())
	}

	fn delete_tag(&self, id: i64) -> Result<()> {
		let mut table = self.table.write();
		let tag = table
			.rows
			.remove(&id)
			.ok_or_else(|| TaggitError::TagNotFound(format!("id {id}")))?;
		table.by_name.remove(&tag.name);
		table.by_slug.remove(tag.slug());
		Ok(())
	}

	fn tags_by_ids(&self, ids: &[i64]) -> Result<Vec<Tag>> {
		let table = self.table.read();
		let tags = ids
			.iter()
			.filter_map(|id| table.rows.get(id))
			.cloned()
			.collect();
		Ok(sorted_by_name(tags))
	}

	fn all_tags(&self) -> Result<Vec<Tag>> {
		let tags = self.table.read().rows.values().cloned().collect();
		Ok(sorted_by_name(tags))
	}
}

/// Through-table kept in memory
///
/// Like a table without a `(tag_id, object)` unique index, it accepts the
/// same link twice.
#[derive(Debug, Default)]
pub struct MemoryTaggedItemStore {
	table: RwLock<ItemTable>,
}

#[derive(Debug, Default)]
struct ItemTable {
	rows: BTreeMap<i64, TaggedItem>,
	next_id: i64,
}

impl MemoryTaggedItemStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.table.read().rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl TaggedItemStore for MemoryTaggedItemStore {
	fn insert_item(&self, mut item: TaggedItem) -> Result<TaggedItem> {
		let mut table = self.table.write();
		table.next_id += 1;
		let id = table.next_id;
		item.id = Some(id);
		table.rows.insert(id, item.clone());
		Ok(item)
	}

	fn get_item(&self, id: i64) -> Result<TaggedItem> {
		self.table
			.read()
			.rows
			.get(&id)
			.cloned()
			.ok_or(TaggitError::TaggedItemNotFound(id))
	}

	fn find_items(&self, key: &LookupKey) -> Result<Vec<TaggedItem>> {
		Ok(self
			.table
			.read()
			.rows
			.values()
			.filter(|item| key.matches(item))
			.cloned()
			.collect())
	}

	fn items_for_tag(&self, tag_id: i64) -> Result<Vec<TaggedItem>> {
		Ok(self
			.table
			.read()
			.rows
			.values()
			.filter(|item| item.tag_id == tag_id)
			.cloned()
			.collect())
	}

	fn delete_items(&self, key: &LookupKey, tag_id: Option<i64>) -> Result<usize> {
		let mut table = self.table.write();
		let before = table.rows.len();
		table
			.rows
			.retain(|_, item| !(key.matches(item) && tag_id.is_none_or(|id| item.tag_id == id)));
		Ok(before - table.rows.len())
	}
}
