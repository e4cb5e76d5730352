//! Model definitions for the taggit system
//!
//! This module contains the core data models:
//! - `Tag`: Core tag entity with name and slug
//! - `TaggedItem`: Junction record linking a tag to an owning object
//! - `Taggable`: Trait for models that can be tagged
//! - `ContentType`: Discriminator for owner types, resolved through a `TypeRegistry`

pub mod content_type;
pub mod tag;
pub mod taggable;
pub mod tagged_item;

pub use content_type::{ContentType, ContentTypeRegistry, TypeRegistry};
pub use tag::Tag;
pub use taggable::{ObjectRef, Taggable};
pub use tagged_item::TaggedItem;
