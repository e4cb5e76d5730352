//! High-level tagging API
//!
//! [`TagManager`] ties a tag store, a through-table store and a lookup
//! strategy together. It owns slug allocation for new tags and answers the
//! "tags of this object" and "objects with this tag" queries.
//!
//! # Examples
//!
//! ```
//! use reinhardt_taggit::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ContentTypeRegistry::new());
//! let article = registry.register("blog", "article");
//! let manager = TagManager::new(
//!     Arc::new(MemoryTagStore::new()),
//!     Arc::new(MemoryTaggedItemStore::new()),
//!     Arc::new(GenericTaggedItem::new(registry)),
//!     TagConfig::default(),
//! );
//!
//! let post = ObjectRef::new(article.clone(), 1);
//! manager.add(&post, &["Django Rocks", "python"]).unwrap();
//!
//! let names: Vec<String> = manager
//!     .tags_for(&article, Some(&post))
//!     .unwrap()
//!     .into_iter()
//!     .map(|tag| tag.name)
//!     .collect();
//! assert_eq!(names, vec!["Django Rocks", "python"]);
//! ```

use crate::config::TagConfig;
use crate::error::{ConflictField, Result, TaggitError};
use crate::lookup::{LookupKey, TaggedItemLookup, persisted_id};
use crate::models::{ContentType, ObjectRef, Tag, TaggedItem};
use crate::store::{TagStore, TaggedItemStore};
use crate::validator::validate_tag_name;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Tag creation and association queries over one through-table
#[derive(Clone)]
pub struct TagManager {
	tags: Arc<dyn TagStore>,
	items: Arc<dyn TaggedItemStore>,
	lookup: Arc<dyn TaggedItemLookup>,
	config: TagConfig,
}

impl std::fmt::Debug for TagManager {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TagManager")
			.field("lookup", &self.lookup)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

impl TagManager {
	pub fn new(
		tags: Arc<dyn TagStore>,
		items: Arc<dyn TaggedItemStore>,
		lookup: Arc<dyn TaggedItemLookup>,
		config: TagConfig,
	) -> Self {
		Self {
			tags,
			items,
			lookup,
			config,
		}
	}

	pub fn config(&self) -> &TagConfig {
		&self.config
	}

	pub fn lookup(&self) -> &Arc<dyn TaggedItemLookup> {
		&self.lookup
	}

	/// Returns the tag named exactly `name`, creating it if it does not exist.
	///
	/// An existing tag is returned unchanged. A new tag gets a slug that no
	/// stored tag uses. When a concurrent writer inserts the same slug between
	/// resolution and insert, the slug is resolved again, up to
	/// `max_create_attempts` times. When it inserts the same name, its tag is
	/// returned.
	///
	/// # Errors
	///
	/// - validation errors from [`validate_tag_name`]
	/// - [`TaggitError::SlugConflict`] when every attempt lost a race
	/// - store errors, passed through
	pub fn create_or_get(&self, name: &str) -> Result<Tag> {
		validate_tag_name(name, self.config.max_name_length)?;

		if let Some(tag) = self.tags.find_by_name(name)? {
			return Ok(tag);
		}

		let resolver = self.config.slug_resolver();
		let attempts = self.config.max_create_attempts;
		for attempt in 1..=attempts {
			let slug = resolver.try_resolve(name, |candidate| self.tags.slug_exists(candidate))?;
			match self.tags.insert_tag(Tag::new(name, &slug)) {
				Ok(tag) => {
					tracing::debug!(name = %tag.name, slug = %tag.slug(), attempt, "created tag");
					return Ok(tag);
				}
				Err(TaggitError::Conflict {
					field: ConflictField::Name,
					..
				}) => {
					if let Some(tag) = self.tags.find_by_name(name)? {
						return Ok(tag);
					}
					// the conflicting tag was renamed or deleted in the meantime
					tracing::warn!(name, attempt, "tag name conflict without a stored tag");
				}
				Err(TaggitError::Conflict {
					field: ConflictField::Slug,
					value,
				}) => {
					tracing::warn!(name, slug = %value, attempt, "slug taken by a concurrent writer");
				}
				Err(err) => return Err(err),
			}
		}

		tracing::warn!(name, attempts, "giving up on slug allocation");
		Err(TaggitError::SlugConflict {
			name: name.to_string(),
			attempts,
		})
	}

	/// Fetches a tag by primary key
	pub fn get_tag(&self, id: i64) -> Result<Tag> {
		self.tags.get_tag(id)
	}

	/// Fetches a tag by slug
	///
	/// # Errors
	///
	/// Returns [`TaggitError::TagNotFound`] when no tag has this slug.
	pub fn get_by_slug(&self, slug: &str) -> Result<Tag> {
		self.tags
			.find_by_slug(slug)?
			.ok_or_else(|| TaggitError::TagNotFound(slug.to_string()))
	}

	/// Renames a tag. The slug is not recomputed.
	pub fn rename(&self, id: i64, name: &str) -> Result<Tag> {
		validate_tag_name(name, self.config.max_name_length)?;
		let mut tag = self.tags.get_tag(id)?;
		tag.rename(name);
		self.tags.update_tag(&tag)?;
		Ok(tag)
	}

	/// Links `tag` to `owner`
	pub fn link(&self, tag: &Tag, owner: &ObjectRef) -> Result<TaggedItem> {
		let item = self.lookup.link(tag, owner)?;
		let item = self.items.insert_item(item)?;
		tracing::debug!(tag = %tag.name, owner = %owner, "tagged object");
		Ok(item)
	}

	/// Fetches a link by primary key together with its tag and owner
	///
	/// # Errors
	///
	/// Returns [`TaggitError::TaggedItemNotFound`] when no link has this id.
	pub fn get_link(&self, id: i64) -> Result<(TaggedItem, Tag, ObjectRef)> {
		let item = self.items.get_item(id)?;
		let tag = self.tags.get_tag(item.tag_id)?;
		let owner = self.lookup.owner_ref(&item)?;
		Ok((item, tag, owner))
	}

	/// Tags `owner` with `names`, creating missing tags.
	///
	/// Tags already linked to `owner` are skipped. Returns the new links.
	pub fn add(&self, owner: &ObjectRef, names: &[&str]) -> Result<Vec<TaggedItem>> {
		let key = self.lookup.lookup_key(owner)?;
		let mut linked: HashSet<i64> = self
			.items
			.find_items(&key)?
			.into_iter()
			.map(|item| item.tag_id)
			.collect();

		let mut created = Vec::new();
		for name in names {
			let tag = self.create_or_get(name)?;
			if linked.insert(persisted_id(&tag)?) {
				created.push(self.link(&tag, owner)?);
			}
		}
		Ok(created)
	}

	/// Unlinks the named tags from `owner`. Unknown names are ignored.
	///
	/// Returns the number of removed links.
	pub fn remove(&self, owner: &ObjectRef, names: &[&str]) -> Result<usize> {
		let key = self.lookup.lookup_key(owner)?;
		let mut removed = 0;
		for name in names {
			if let Some(tag) = self.tags.find_by_name(name)? {
				removed += self.items.delete_items(&key, tag.id)?;
			}
		}
		tracing::debug!(owner = %owner, removed, "untagged object");
		Ok(removed)
	}

	/// Unlinks every tag from `owner`
	pub fn clear(&self, owner: &ObjectRef) -> Result<usize> {
		let key = self.lookup.lookup_key(owner)?;
		self.items.delete_items(&key, None)
	}

	/// Replaces the tags of `owner` with exactly `names`
	pub fn set(&self, owner: &ObjectRef, names: &[&str]) -> Result<Vec<Tag>> {
		let wanted = names
			.iter()
			.map(|name| self.create_or_get(name))
			.collect::<Result<Vec<_>>>()?;
		let wanted_ids = wanted
			.iter()
			.map(persisted_id)
			.collect::<Result<HashSet<i64>>>()?;

		let key = self.lookup.lookup_key(owner)?;
		let current: BTreeSet<i64> = self
			.items
			.find_items(&key)?
			.into_iter()
			.map(|item| item.tag_id)
			.collect();
		for stale in current.iter().filter(|id| !wanted_ids.contains(id)) {
			self.items.delete_items(&key, Some(*stale))?;
		}

		let mut seen = HashSet::new();
		for tag in &wanted {
			let id = persisted_id(tag)?;
			if !current.contains(&id) && seen.insert(id) {
				self.link(tag, owner)?;
			}
		}
		self.tags_for_key(&key)
	}

	/// Distinct tags linked to `owner`, or to any owner of `content_type`
	/// when `owner` is `None`. Ordered by name.
	pub fn tags_for(&self, content_type: &ContentType, owner: Option<&ObjectRef>) -> Result<Vec<Tag>> {
		let key = match owner {
			Some(owner) => {
				if owner.content_type != *content_type {
					return Err(TaggitError::ContentTypeMismatch {
						expected: content_type.qualified_name(),
						found: owner.content_type.qualified_name(),
					});
				}
				self.lookup.lookup_key(owner)?
			}
			None => self.lookup.type_key(content_type)?,
		};
		self.tags_for_key(&key)
	}

	/// Distinct tags linked to any of `owners`, resolved with one bulk lookup
	pub fn tags_for_many(&self, owners: &[ObjectRef]) -> Result<Vec<Tag>> {
		let key = self.lookup.bulk_lookup_key(owners)?;
		self.tags_for_key(&key)
	}

	/// Distinct owners linked to `tag`, in link order
	pub fn entities_for(&self, tag: &Tag) -> Result<Vec<ObjectRef>> {
		let tag_id = persisted_id(tag)?;

		let mut seen = HashSet::new();
		let mut owners = Vec::new();
		for item in self.items.items_for_tag(tag_id)? {
			let owner = self.lookup.owner_ref(&item)?;
			if seen.insert(owner.clone()) {
				owners.push(owner);
			}
		}
		Ok(owners)
	}

	fn tags_for_key(&self, key: &LookupKey) -> Result<Vec<Tag>> {
		let ids: BTreeSet<i64> = self
			.items
			.find_items(key)?
			.into_iter()
			.map(|item| item.tag_id)
			.collect();
		let ids: Vec<i64> = ids.into_iter().collect();
		self.tags.tags_by_ids(&ids)
	}
}
