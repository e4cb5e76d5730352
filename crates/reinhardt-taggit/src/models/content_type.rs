//! Content types for generic tagging
//!
//! A [`ContentType`] identifies the model an owning object belongs to. Generic
//! through-tables store its numeric id next to the object id, and resolve it
//! back through a [`TypeRegistry`] when owners are listed.

use crate::error::{Result, TaggitError};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Owner type discriminator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentType {
	pub id: i64,
	pub app_label: String,
	pub model: String,
}

impl ContentType {
	pub fn new(id: i64, app_label: &str, model: &str) -> Self {
		Self {
			id,
			app_label: app_label.to_string(),
			model: model.to_string(),
		}
	}

	/// Returns `app_label.model`
	pub fn qualified_name(&self) -> String {
		format!("{}.{}", self.app_label, self.model)
	}
}

impl fmt::Display for ContentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.app_label, self.model)
	}
}

/// Maps owner types to content types and back
///
/// Implemented by the host application's content type framework. Stored ids
/// must stay stable for the lifetime of the data that references them.
pub trait TypeRegistry: Send + Sync {
	/// Returns the content type of a model, registering it when unseen
	fn get_for_model(&self, app_label: &str, model: &str) -> Result<ContentType>;

	/// Resolves a stored content type id
	///
	/// # Errors
	///
	/// Returns [`TaggitError::UnknownContentType`] when no type has this id.
	fn get_for_id(&self, id: i64) -> Result<ContentType>;
}

/// In-memory content type registry
///
/// Ids are assigned sequentially from 1 in registration order.
///
/// # Examples
///
/// ```
/// use reinhardt_taggit::{ContentTypeRegistry, TypeRegistry};
///
/// let registry = ContentTypeRegistry::new();
/// let article = registry.register("blog", "article");
/// assert_eq!(registry.register("blog", "article"), article);
/// assert_eq!(registry.get_for_id(article.id).unwrap().model, "article");
/// ```
#[derive(Debug, Default)]
pub struct ContentTypeRegistry {
	inner: RwLock<RegistryInner>,
}

#[derive(Debug, Default)]
struct RegistryInner {
	by_model: HashMap<(String, String), ContentType>,
	by_id: HashMap<i64, ContentType>,
	next_id: i64,
}

impl ContentTypeRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the content type for `app_label.model`, creating it if needed
	pub fn register(&self, app_label: &str, model: &str) -> ContentType {
		let key = (app_label.to_string(), model.to_string());
		if let Some(ct) = self.inner.read().by_model.get(&key) {
			return ct.clone();
		}

		let mut inner = self.inner.write();
		// another thread may have registered it between the two locks
		if let Some(ct) = inner.by_model.get(&key) {
			return ct.clone();
		}
		inner.next_id += 1;
		let ct = ContentType::new(inner.next_id, app_label, model);
		inner.by_id.insert(ct.id, ct.clone());
		inner.by_model.insert(key, ct.clone());
		tracing::debug!(content_type = %ct, id = ct.id, "registered content type");
		ct
	}

	pub fn get(&self, app_label: &str, model: &str) -> Option<ContentType> {
		self.inner
			.read()
			.by_model
			.get(&(app_label.to_string(), model.to_string()))
			.cloned()
	}

	pub fn get_by_id(&self, id: i64) -> Option<ContentType> {
		self.inner.read().by_id.get(&id).cloned()
	}

	/// All registered content types ordered by id
	pub fn all(&self) -> Vec<ContentType> {
		let mut all: Vec<_> = self.inner.read().by_id.values().cloned().collect();
		all.sort_by_key(|ct| ct.id);
		all
	}

	pub fn len(&self) -> usize {
		self.inner.read().by_id.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl TypeRegistry for ContentTypeRegistry {
	fn get_for_model(&self, app_label: &str, model: &str) -> Result<ContentType> {
		Ok(self.register(app_label, model))
	}

	fn get_for_id(&self, id: i64) -> Result<ContentType> {
		self.get_by_id(id)
			.ok_or(TaggitError::UnknownContentType(id))
	}
}
