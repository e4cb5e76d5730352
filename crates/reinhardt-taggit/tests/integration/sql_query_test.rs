//! Integration tests for SQL rendering of lookup keys
//!
//! Keys produced by the lookup strategies are rendered with SeaQuery, so a
//! database-backed store selects the rows the in-memory store matches.

use reinhardt_taggit::sql::TaggitSchema;
use reinhardt_taggit::{
	ContentTypeRegistry, GenericTaggedItem, ObjectRef, TaggedItemLookup, TypedTaggedItem,
};
use rstest::rstest;
use sea_query::{MysqlQueryBuilder, PostgresQueryBuilder};
use std::sync::Arc;

#[rstest]
fn test_generic_bulk_key_sql() {
	// Arrange
	let registry = Arc::new(ContentTypeRegistry::new());
	let article = registry.register("blog", "article");
	let lookup = GenericTaggedItem::new(registry);
	let owners = [
		ObjectRef::new(article.clone(), 10),
		ObjectRef::new(article.clone(), 11),
	];

	// Act
	let key = lookup.bulk_lookup_key(&owners).unwrap();
	let sql = TaggitSchema::default()
		.tags_query(&key)
		.to_string(PostgresQueryBuilder);

	// Assert
	assert!(sql.contains(r#""taggit_taggeditem"."content_type_id" = 1"#));
	assert!(sql.contains(r#""taggit_taggeditem"."object_id" IN (10, 11)"#));
	assert!(sql.contains(r#"ORDER BY "taggit_tag"."name" ASC"#));
}

#[rstest]
fn test_typed_key_sql_has_no_content_type() {
	// Arrange
	let registry = ContentTypeRegistry::new();
	let article = registry.register("blog", "article");
	let lookup = TypedTaggedItem::new(article.clone());
	let schema = TaggitSchema::new("blog_tag", "blog_article_tags");

	// Act
	let key = lookup.lookup_key(&ObjectRef::new(article, 3)).unwrap();
	let sql = schema.items_query(&key).to_string(MysqlQueryBuilder);

	// Assert
	assert!(sql.contains("`blog_article_tags`.`object_id` = 3"));
	assert!(!sql.contains("content_type_id"));
}
