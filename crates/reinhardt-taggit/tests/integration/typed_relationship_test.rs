//! Integration tests for typed through-tables
//!
//! The through-table holds owners of `blog.article` only and stores no
//! content type column.

use crate::fixtures::{TypedSetup, names, typed_setup};
use reinhardt_taggit::{ContentType, LookupKey, ObjectRef, TaggedItemStore, TaggitError};
use rstest::rstest;

#[rstest]
fn test_typed_rows_have_no_content_type(typed_setup: TypedSetup) {
	// Arrange
	let owner = ObjectRef::new(typed_setup.article.clone(), 1);

	// Act
	let links = typed_setup.manager.add(&owner, &["rust"]).unwrap();

	// Assert
	assert_eq!(links.len(), 1);
	assert!(!links[0].is_generic());
	assert_eq!(links[0].object_id, 1);
}

#[rstest]
fn test_typed_tags_for(typed_setup: TypedSetup) {
	// Arrange
	let manager = &typed_setup.manager;
	let first = ObjectRef::new(typed_setup.article.clone(), 1);
	let second = ObjectRef::new(typed_setup.article.clone(), 2);
	manager.add(&first, &["rust", "news"]).unwrap();
	manager.add(&second, &["news", "python"]).unwrap();

	// Act
	let own = manager.tags_for(&typed_setup.article, Some(&first)).unwrap();
	let all = manager.tags_for(&typed_setup.article, None).unwrap();
	let bulk = manager.tags_for_many(&[first, second]).unwrap();

	// Assert
	assert_eq!(names(&own), vec!["news", "rust"]);
	assert_eq!(names(&all), vec!["news", "python", "rust"]);
	assert_eq!(names(&bulk), vec!["news", "python", "rust"]);
}

#[rstest]
fn test_typed_empty_bulk_lookup(typed_setup: TypedSetup) {
	// Arrange
	let owner = ObjectRef::new(typed_setup.article.clone(), 1);
	typed_setup.manager.add(&owner, &["rust"]).unwrap();

	// Act
	let tags = typed_setup.manager.tags_for_many(&[]).unwrap();

	// Assert
	assert!(tags.is_empty());
}

#[rstest]
fn test_typed_entities_for(typed_setup: TypedSetup) {
	// Arrange
	let manager = &typed_setup.manager;
	let first = ObjectRef::new(typed_setup.article.clone(), 4);
	let second = ObjectRef::new(typed_setup.article.clone(), 2);
	manager.add(&first, &["news"]).unwrap();
	manager.add(&second, &["news"]).unwrap();
	let news = manager.get_by_slug("news").unwrap();

	// Act
	let owners = manager.entities_for(&news).unwrap();

	// Assert
	assert_eq!(owners, vec![first, second]);
}

#[rstest]
fn test_typed_rejects_foreign_owner(typed_setup: TypedSetup) {
	// Arrange
	let comment = ObjectRef::new(ContentType::new(99, "blog", "comment"), 1);

	// Act
	let added = typed_setup.manager.add(&comment, &["rust"]);
	let bulk = typed_setup.manager.tags_for_many(&[comment.clone()]);
	let by_type = typed_setup.manager.tags_for(&comment.content_type, None);

	// Assert
	assert!(matches!(added, Err(TaggitError::ContentTypeMismatch { .. })));
	assert!(matches!(bulk, Err(TaggitError::ContentTypeMismatch { .. })));
	assert!(matches!(by_type, Err(TaggitError::ContentTypeMismatch { .. })));
	assert!(typed_setup.items.is_empty());
}

#[rstest]
fn test_typed_store_rows(typed_setup: TypedSetup) {
	// Arrange
	let owner = ObjectRef::new(typed_setup.article.clone(), 5);
	typed_setup.manager.add(&owner, &["a", "b"]).unwrap();

	// Act
	let rows = typed_setup
		.items
		.find_items(&LookupKey::Owner { object_id: 5 })
		.unwrap();

	// Assert
	assert_eq!(rows.len(), 2);
	assert!(rows.iter().all(|row| row.content_type_id.is_none()));
}
