//! TaggedItem model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Link between one tag and one owning object
///
/// Typed through-tables hold owners of a single model, so they leave
/// `content_type_id` empty. Generic through-tables store it next to
/// `object_id`; nothing cascades when the owner is deleted, so a generic row
/// may point at an object that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedItem {
	/// Primary key, `None` until persisted
	pub id: Option<i64>,
	pub tag_id: i64,
	pub content_type_id: Option<i64>,
	pub object_id: i64,
	pub created_at: DateTime<Utc>,
}

impl TaggedItem {
	/// Row for a typed through-table
	pub fn typed(tag_id: i64, object_id: i64) -> Self {
		Self {
			id: None,
			tag_id,
			content_type_id: None,
			object_id,
			created_at: Utc::now(),
		}
	}

	/// Row for a generic through-table
	pub fn generic(tag_id: i64, content_type_id: i64, object_id: i64) -> Self {
		Self {
			content_type_id: Some(content_type_id),
			..Self::typed(tag_id, object_id)
		}
	}

	pub fn is_generic(&self) -> bool {
		self.content_type_id.is_some()
	}
}
