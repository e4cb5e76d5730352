//! Association lookup strategies
//!
//! A through-table is either *typed* (every row belongs to owners of one
//! model, referenced by `object_id` alone) or *generic* (rows carry a
//! `content_type_id` so any model can be tagged). [`TaggedItemLookup`] hides
//! that difference from [`TagManager`](crate::TagManager): it turns owners
//! into [`LookupKey`] criteria and stored rows back into [`ObjectRef`]s.
//!
//! # Examples
//!
//! ```
//! use reinhardt_taggit::{ContentTypeRegistry, GenericTaggedItem, LookupKey, ObjectRef, TaggedItemLookup};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ContentTypeRegistry::new());
//! let article = registry.register("blog", "article");
//! let lookup = GenericTaggedItem::new(registry);
//!
//! let owners = [ObjectRef::new(article.clone(), 1), ObjectRef::new(article.clone(), 2)];
//! let key = lookup.bulk_lookup_key(&owners).unwrap();
//! assert_eq!(
//!     key,
//!     LookupKey::Objects { content_type_id: article.id, object_ids: vec![1, 2] }
//! );
//! ```

use crate::error::{Result, TaggitError};
use crate::models::{ContentType, ObjectRef, Tag, TaggedItem, TypeRegistry};
use std::fmt;
use std::sync::Arc;

/// Criterion selecting rows of a through-table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
	/// Typed: `object_id = ?`
	Owner { object_id: i64 },
	/// Typed: `object_id IN (...)`
	Owners { object_ids: Vec<i64> },
	/// Typed: every row of the table
	AnyOwner,
	/// Generic: `content_type_id = ? AND object_id = ?`
	Object { content_type_id: i64, object_id: i64 },
	/// Generic: `content_type_id = ? AND object_id IN (...)`
	Objects {
		content_type_id: i64,
		object_ids: Vec<i64>,
	},
	/// Generic: `content_type_id = ?`
	ContentType { content_type_id: i64 },
}

impl LookupKey {
	/// Evaluates the criterion against a row
	pub fn matches(&self, item: &TaggedItem) -> bool {
		match self {
			LookupKey::Owner { object_id } => item.object_id == *object_id,
			LookupKey::Owners { object_ids } => object_ids.contains(&item.object_id),
			LookupKey::AnyOwner => true,
			LookupKey::Object {
				content_type_id,
				object_id,
			} => item.content_type_id == Some(*content_type_id) && item.object_id == *object_id,
			LookupKey::Objects {
				content_type_id,
				object_ids,
			} => {
				item.content_type_id == Some(*content_type_id)
					&& object_ids.contains(&item.object_id)
			}
			LookupKey::ContentType { content_type_id } => {
				item.content_type_id == Some(*content_type_id)
			}
		}
	}
}

/// Strategy for one kind of through-table
///
/// Pick [`TypedTaggedItem`] or [`GenericTaggedItem`] when constructing a
/// `TagManager`; the manager never inspects which one it got.
pub trait TaggedItemLookup: Send + Sync + fmt::Debug {
	/// Builds the row linking `tag` to `owner`
	///
	/// # Errors
	///
	/// Returns [`TaggitError::TagNotFound`] when `tag` is not persisted, plus
	/// whatever [`lookup_key`](Self::lookup_key) rejects.
	fn link(&self, tag: &Tag, owner: &ObjectRef) -> Result<TaggedItem>;

	/// Criterion selecting the rows of a single owner
	fn lookup_key(&self, owner: &ObjectRef) -> Result<LookupKey>;

	/// Criterion selecting the rows of several owners in one query
	fn bulk_lookup_key(&self, owners: &[ObjectRef]) -> Result<LookupKey>;

	/// Criterion selecting the rows of every owner of `content_type`
	fn type_key(&self, content_type: &ContentType) -> Result<LookupKey>;

	/// Resolves the owner a stored row points at
	fn owner_ref(&self, item: &TaggedItem) -> Result<ObjectRef>;
}

/// Primary key of a stored tag
///
/// # Errors
///
/// Returns [`TaggitError::TagNotFound`] when `tag` has no id.
pub(crate) fn persisted_id(tag: &Tag) -> Result<i64> {
	tag.id
		.ok_or_else(|| TaggitError::TagNotFound(format!("'{}' has not been saved", tag.name)))
}

/// Through-table bound to a single owner model
#[derive(Debug, Clone)]
pub struct TypedTaggedItem {
	content_type: ContentType,
}

impl TypedTaggedItem {
	pub fn new(content_type: ContentType) -> Self {
		Self { content_type }
	}

	pub fn content_type(&self) -> &ContentType {
		&self.content_type
	}

	fn check_type(&self, content_type: &ContentType) -> Result<()> {
		if *content_type == self.content_type {
			Ok(())
		} else {
			Err(TaggitError::ContentTypeMismatch {
				expected: self.content_type.qualified_name(),
				found: content_type.qualified_name(),
			})
		}
	}
}

impl TaggedItemLookup for TypedTaggedItem {
	fn link(&self, tag: &Tag, owner: &ObjectRef) -> Result<TaggedItem> {
		self.check_type(&owner.content_type)?;
		Ok(TaggedItem::typed(persisted_id(tag)?, owner.object_id))
	}

	fn lookup_key(&self, owner: &ObjectRef) -> Result<LookupKey> {
		self.check_type(&owner.content_type)?;
		Ok(LookupKey::Owner {
			object_id: owner.object_id,
		})
	}

	fn bulk_lookup_key(&self, owners: &[ObjectRef]) -> Result<LookupKey> {
		let object_ids = owners
			.iter()
			.map(|owner| {
				self.check_type(&owner.content_type)?;
				Ok(owner.object_id)
			})
			.collect::<Result<Vec<_>>>()?;
		Ok(LookupKey::Owners { object_ids })
	}

	fn type_key(&self, content_type: &ContentType) -> Result<LookupKey> {
		self.check_type(content_type)?;
		Ok(LookupKey::AnyOwner)
	}

	fn owner_ref(&self, item: &TaggedItem) -> Result<ObjectRef> {
		Ok(ObjectRef::new(self.content_type.clone(), item.object_id))
	}
}

/// Through-table holding owners of any model
#[derive(Clone)]
pub struct GenericTaggedItem {
	registry: Arc<dyn TypeRegistry>,
}

impl fmt::Debug for GenericTaggedItem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GenericTaggedItem").finish_non_exhaustive()
	}
}

impl GenericTaggedItem {
	pub fn new(registry: Arc<dyn TypeRegistry>) -> Self {
		Self { registry }
	}

	pub fn registry(&self) -> &Arc<dyn TypeRegistry> {
		&self.registry
	}
}

impl TaggedItemLookup for GenericTaggedItem {
	fn link(&self, tag: &Tag, owner: &ObjectRef) -> Result<TaggedItem> {
		Ok(TaggedItem::generic(
			persisted_id(tag)?,
			owner.content_type.id,
			owner.object_id,
		))
	}

	fn lookup_key(&self, owner: &ObjectRef) -> Result<LookupKey> {
		Ok(LookupKey::Object {
			content_type_id: owner.content_type.id,
			object_id: owner.object_id,
		})
	}

	/// All owners must share one content type; there is nothing to key an
	/// empty collection on, and a mixed one cannot be expressed as a single
	/// `content_type_id = ?` criterion.
	fn bulk_lookup_key(&self, owners: &[ObjectRef]) -> Result<LookupKey> {
		let Some(first) = owners.first() else {
			return Err(TaggitError::InvalidBulkLookup(
				"no owners to resolve a content type from".to_string(),
			));
		};

		if let Some(other) = owners
			.iter()
			.find(|owner| owner.content_type.id != first.content_type.id)
		{
			return Err(TaggitError::InvalidBulkLookup(format!(
				"owners mix content types {} and {}",
				first.content_type, other.content_type
			)));
		}

		Ok(LookupKey::Objects {
			content_type_id: first.content_type.id,
			object_ids: owners.iter().map(|owner| owner.object_id).collect(),
		})
	}

	fn type_key(&self, content_type: &ContentType) -> Result<LookupKey> {
		Ok(LookupKey::ContentType {
			content_type_id: content_type.id,
		})
	}

	fn owner_ref(&self, item: &TaggedItem) -> Result<ObjectRef> {
		let content_type_id = item.content_type_id.ok_or_else(|| {
			TaggitError::DatabaseError(format!(
				"tagged item {:?} has no content type in a generic table",
				item.id
			))
		})?;
		let content_type = self.registry.get_for_id(content_type_id)?;
		Ok(ObjectRef::new(content_type, item.object_id))
	}
}
