//! Taggable trait definition
//!
//! Trait for models that can be tagged. Implement this trait directly
//! or use the `#[taggable]` attribute macro for auto-generation.

use super::content_type::{ContentType, TypeRegistry};
use crate::error::{Result, TaggitError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trait for models that can be tagged
///
/// Models implementing this trait can be associated with tags via `TaggedItem`.
/// The trait provides the content type discriminator and object identifier
/// needed for the polymorphic many-to-many relationship.
///
/// # Examples
///
/// ```rust
/// use reinhardt_taggit::Taggable;
///
/// struct Food {
///     id: Option<i64>,
///     name: String,
/// }
///
/// impl Taggable for Food {
///     fn content_type_name() -> &'static str {
///         "Food"
///     }
///
///     fn object_id(&self) -> Option<i64> {
///         self.id
///     }
/// }
///
/// let food = Food { id: Some(7), name: "apple".to_string() };
/// assert_eq!(food.object_id(), Some(7));
/// assert_eq!(Food::app_label(), "default");
/// ```
pub trait Taggable {
	/// Application the model belongs to
	fn app_label() -> &'static str {
		"default"
	}

	/// Returns the content type name used as discriminator in `TaggedItem`
	///
	/// This should be a stable, unique identifier for the model type.
	/// Typically the struct name (e.g., "Food", "Article").
	fn content_type_name() -> &'static str;

	/// Returns the primary key of this instance, `None` while unsaved
	///
	/// Used as `object_id` in `TaggedItem` to identify the specific
	/// instance being tagged.
	fn object_id(&self) -> Option<i64>;

	/// Looks up the content type of `Self` in `registry`
	fn content_type(registry: &dyn TypeRegistry) -> Result<ContentType>
	where
		Self: Sized,
	{
		registry.get_for_model(Self::app_label(), Self::content_type_name())
	}
}

/// Type-erased reference to an owning object
///
/// Pairs the owner's content type with its primary key. This is what the
/// association layer works with; it never needs the owner itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
	pub content_type: ContentType,
	pub object_id: i64,
}

impl ObjectRef {
	pub fn new(content_type: ContentType, object_id: i64) -> Self {
		Self {
			content_type,
			object_id,
		}
	}

	/// Builds the reference for a taggable model instance
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_taggit::{ContentTypeRegistry, ObjectRef, Taggable};
	///
	/// struct Article { id: i64 }
	///
	/// impl Taggable for Article {
	///     fn app_label() -> &'static str { "blog" }
	///     fn content_type_name() -> &'static str { "article" }
	///     fn object_id(&self) -> Option<i64> { Some(self.id) }
	/// }
	///
	/// let registry = ContentTypeRegistry::new();
	/// let owner = ObjectRef::of(&registry, &Article { id: 3 }).unwrap();
	/// assert_eq!(owner.content_type.qualified_name(), "blog.article");
	/// assert_eq!(owner.object_id, 3);
	/// ```
	///
	/// # Errors
	///
	/// Returns [`TaggitError::UnsavedObject`] when `object` has no primary key.
	pub fn of<T: Taggable>(registry: &dyn TypeRegistry, object: &T) -> Result<Self> {
		let object_id = object
			.object_id()
			.ok_or_else(|| TaggitError::UnsavedObject(T::content_type_name().to_string()))?;
		Ok(Self::new(T::content_type(registry)?, object_id))
	}
}

impl fmt::Display for ObjectRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}#{}", self.content_type, self.object_id)
	}
}
