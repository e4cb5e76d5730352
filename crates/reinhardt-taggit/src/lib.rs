//! # reinhardt-taggit
//!
//! Simple tagging system for Reinhardt framework, inspired by django-taggit.
//!
//! ## Features
//!
//! - `Tag` model: Core tag entity with a unique name and a unique, URL-friendly slug
//! - Slug allocation: collisions get `-2`, `-3`, ... suffixes within the slug length limit,
//!   retried when a concurrent writer takes the slug first
//! - `TaggedItem` model with typed (one owner model) and generic (any owner model)
//!   through-tables, selected as a `TaggedItemLookup` strategy
//! - `TagManager`: tag creation, tagging and untagging, "tags for object" and
//!   "objects for tag" queries, bulk lookups
//! - `#[taggable]` attribute macro implementing `Taggable`
//! - SeaQuery rendering of lookups for database-backed stores
//!
//! ## Quick Start
//!
//! ```rust
//! use reinhardt_taggit::Tag;
//!
//! // Create a tag with auto-generated slug
//! let tag = Tag::from_name("Rust Programming");
//! assert_eq!(tag.slug(), "rust-programming");
//!
//! // Create a tag with explicit slug
//! let tag = Tag::new("Rust Programming", "rust-prog");
//! assert_eq!(tag.slug(), "rust-prog");
//! ```

// Public modules
pub mod config;
pub mod error;
pub mod lookup;
pub mod manager;
pub mod models;
pub mod slug;
pub mod sql;
pub mod store;
pub mod validator;

// Re-exports for convenient access
pub use config::{TagConfig, TagConfigBuilder};
pub use error::{ConflictField, Result, TaggitError};
pub use lookup::{GenericTaggedItem, LookupKey, TaggedItemLookup, TypedTaggedItem};
pub use manager::TagManager;
pub use models::{ContentType, ContentTypeRegistry, ObjectRef, Tag, Taggable, TaggedItem, TypeRegistry};
pub use store::{MemoryTagStore, MemoryTaggedItemStore, TagStore, TaggedItemStore};

pub use reinhardt_taggit_macros::taggable;

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::config::TagConfig;
	pub use crate::error::{Result, TaggitError};
	pub use crate::lookup::{GenericTaggedItem, TaggedItemLookup, TypedTaggedItem};
	pub use crate::manager::TagManager;
	pub use crate::models::{
		ContentType, ContentTypeRegistry, ObjectRef, Tag, Taggable, TaggedItem, TypeRegistry,
	};
	pub use crate::store::{MemoryTagStore, MemoryTaggedItemStore, TagStore, TaggedItemStore};
	pub use reinhardt_taggit_macros::taggable;
}
