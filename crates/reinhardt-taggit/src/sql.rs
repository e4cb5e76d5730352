//! SQL rendering of tag lookups
//!
//! Database-backed stores build their statements from the same
//! [`LookupKey`]s the in-memory stores evaluate, so both backends select the
//! same rows.
//!
//! # Examples
//!
//! ```
//! use reinhardt_taggit::LookupKey;
//! use reinhardt_taggit::sql::TaggitSchema;
//! use sea_query::PostgresQueryBuilder;
//!
//! let schema = TaggitSchema::default();
//! let key = LookupKey::Objects { content_type_id: 3, object_ids: vec![1, 2] };
//! let sql = schema.tags_query(&key).to_string(PostgresQueryBuilder);
//!
//! assert!(sql.starts_with("SELECT DISTINCT"));
//! assert!(sql.contains(r#""taggit_taggeditem"."content_type_id" = 3"#));
//! ```

use crate::lookup::LookupKey;
use sea_query::{Alias, Asterisk, Condition, Expr, ExprTrait, Order, Query, SelectStatement};

/// Default table holding tags
pub const TAG_TABLE: &str = "taggit_tag";

/// Default through-table
pub const TAGGED_ITEM_TABLE: &str = "taggit_taggeditem";

impl LookupKey {
	/// Renders the criterion as a condition on columns of `item_table`
	pub fn to_condition(&self, item_table: &str) -> Condition {
		let col = |name: &str| Expr::col((Alias::new(item_table), Alias::new(name)));
		match self {
			LookupKey::Owner { object_id } => Condition::all().add(col("object_id").eq(*object_id)),
			LookupKey::Owners { object_ids } => {
				Condition::all().add(col("object_id").is_in(object_ids.iter().copied()))
			}
			LookupKey::AnyOwner => Condition::all().add(col("object_id").is_not_null()),
			LookupKey::Object {
				content_type_id,
				object_id,
			} => Condition::all()
				.add(col("content_type_id").eq(*content_type_id))
				.add(col("object_id").eq(*object_id)),
			LookupKey::Objects {
				content_type_id,
				object_ids,
			} => Condition::all()
				.add(col("content_type_id").eq(*content_type_id))
				.add(col("object_id").is_in(object_ids.iter().copied())),
			LookupKey::ContentType { content_type_id } => {
				Condition::all().add(col("content_type_id").eq(*content_type_id))
			}
		}
	}
}

/// Table names of a taggit installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggitSchema {
	pub tag_table: String,
	pub item_table: String,
}

impl Default for TaggitSchema {
	fn default() -> Self {
		Self::new(TAG_TABLE, TAGGED_ITEM_TABLE)
	}
}

impl TaggitSchema {
	pub fn new(tag_table: &str, item_table: &str) -> Self {
		Self {
			tag_table: tag_table.to_string(),
			item_table: item_table.to_string(),
		}
	}

	/// Distinct tags linked through rows matching `key`, ordered by name
	pub fn tags_query(&self, key: &LookupKey) -> SelectStatement {
		let tag = Alias::new(&self.tag_table);
		let item = Alias::new(&self.item_table);
		Query::select()
			.distinct()
			.columns([
				(tag.clone(), Alias::new("id")),
				(tag.clone(), Alias::new("name")),
				(tag.clone(), Alias::new("slug")),
				(tag.clone(), Alias::new("created_at")),
			])
			.from(tag.clone())
			.inner_join(
				item.clone(),
				Expr::col((tag.clone(), Alias::new("id"))).equals((item, Alias::new("tag_id"))),
			)
			.cond_where(key.to_condition(&self.item_table))
			.order_by((tag, Alias::new("name")), Order::Asc)
			.to_owned()
	}

	/// Rows of the through-table matching `key`
	pub fn items_query(&self, key: &LookupKey) -> SelectStatement {
		Query::select()
			.column(Asterisk)
			.from(Alias::new(&self.item_table))
			.cond_where(key.to_condition(&self.item_table))
			.order_by(Alias::new("id"), Order::Asc)
			.to_owned()
	}

	/// Existence probe used as the slug uniqueness oracle
	pub fn slug_exists_query(&self, slug: &str) -> SelectStatement {
		Query::select()
			.column(Alias::new("id"))
			.from(Alias::new(&self.tag_table))
			.and_where(Expr::col(Alias::new("slug")).eq(slug))
			.limit(1)
			.to_owned()
	}
}
