//! Integration tests for tag creation
//!
//! Covers `TagManager::create_or_get` slug allocation, including writers that
//! take a slug between resolution and insert.

use crate::fixtures::{
	GenericSetup, OfflineTagStore, RacingTagStore, StaleOracleTagStore, generic_setup,
	manager_with_store, names,
};
use reinhardt_taggit::{TagConfig, TagStore, TaggitError};
use rstest::rstest;
use std::collections::HashSet;
use std::sync::Arc;

/// Test that creating an existing name returns the stored tag
#[rstest]
fn test_create_or_get_returns_existing(generic_setup: GenericSetup) {
	// Arrange
	let manager = &generic_setup.manager;
	let first = manager.create_or_get("python").unwrap();

	// Act
	let second = manager.create_or_get("python").unwrap();

	// Assert
	assert_eq!(first, second);
	assert_eq!(generic_setup.tags.len(), 1);
}

/// Test the slug sequence for names that slugify alike
#[rstest]
fn test_colliding_names_get_numbered_slugs(generic_setup: GenericSetup) {
	// Arrange
	let manager = &generic_setup.manager;

	// Act
	let tags: Vec<_> = ["Django Rocks", "django rocks", "DJANGO ROCKS!"]
		.into_iter()
		.map(|name| manager.create_or_get(name).unwrap())
		.collect();

	// Assert
	let slugs: Vec<_> = tags.iter().map(|tag| tag.slug()).collect();
	assert_eq!(slugs, vec!["django-rocks", "django-rocks-2", "django-rocks-3"]);
	assert_eq!(
		manager.get_by_slug("django-rocks-2").unwrap().name,
		"django rocks"
	);
}

/// Test that names are case-sensitive while slugs are not
#[rstest]
fn test_names_are_case_sensitive(generic_setup: GenericSetup) {
	// Arrange
	let manager = &generic_setup.manager;

	// Act
	let upper = manager.create_or_get("Rust").unwrap();
	let lower = manager.create_or_get("rust").unwrap();

	// Assert
	assert_ne!(upper.id, lower.id);
	assert_eq!(upper.slug(), "rust");
	assert_eq!(lower.slug(), "rust-2");
}

/// Test slug truncation with a short slug column
#[rstest]
fn test_slug_length_limit() {
	// Arrange
	let config = TagConfig::builder().max_slug_length(8).build().unwrap();
	let manager = manager_with_store(Arc::new(reinhardt_taggit::MemoryTagStore::new()), config);

	// Act
	let first = manager.create_or_get("Extraordinary").unwrap();
	let second = manager.create_or_get("extraordinary").unwrap();

	// Assert
	assert_eq!(first.slug(), "extraord");
	assert_eq!(second.slug(), "extrao-2");
}

/// Test invalid names are rejected before touching the store
#[rstest]
#[case("")]
#[case("   ")]
fn test_blank_name_rejected(generic_setup: GenericSetup, #[case] name: &str) {
	// Arrange
	let manager = &generic_setup.manager;

	// Act
	let result = manager.create_or_get(name);

	// Assert
	assert!(matches!(result, Err(TaggitError::InvalidTagName(_))));
	assert!(generic_setup.tags.is_empty());
}

#[rstest]
fn test_too_long_name_rejected(generic_setup: GenericSetup) {
	// Arrange
	let name = "x".repeat(101);

	// Act
	let result = generic_setup.manager.create_or_get(&name);

	// Assert
	assert!(matches!(
		result,
		Err(TaggitError::TagNameTooLong { max: 100, len: 101 })
	));
}

/// Test that losing the slug race once leads to the next suffix
#[test]
fn test_retry_after_concurrent_slug_insert() {
	// Arrange
	let store = Arc::new(RacingTagStore::new(1));
	let manager = manager_with_store(store.clone(), TagConfig::default());

	// Act
	let tag = manager.create_or_get("Django Rocks").unwrap();

	// Assert
	assert_eq!(tag.slug(), "django-rocks-2");
	let rival = store.inner.find_by_slug("django-rocks").unwrap().unwrap();
	assert_eq!(rival.name, "Django Rocks (rival 0)");
	assert_eq!(store.all_tags().unwrap().len(), 2);
}

/// Test several lost races in a row
#[test]
fn test_retry_after_repeated_races() {
	// Arrange
	let store = Arc::new(RacingTagStore::new(3));
	let manager = manager_with_store(store.clone(), TagConfig::default());

	// Act
	let tag = manager.create_or_get("news").unwrap();

	// Assert
	assert_eq!(tag.slug(), "news-4");
	let all = store.all_tags().unwrap();
	let slugs: HashSet<_> = all.iter().map(|tag| tag.slug().to_string()).collect();
	assert_eq!(slugs.len(), all.len());
}

/// Test that a permanently stale uniqueness check ends in SlugConflict
#[test]
fn test_retry_budget_exhausted() {
	// Arrange
	let store = Arc::new(StaleOracleTagStore::default());
	let config = TagConfig::builder().max_create_attempts(5).build().unwrap();
	let manager = manager_with_store(store.clone(), config);

	// Act
	let result = manager.create_or_get("news");

	// Assert
	assert!(matches!(
		result,
		Err(TaggitError::SlugConflict { ref name, attempts: 5 }) if name == "news"
	));
	assert_eq!(*store.inserts.lock(), 5);
}

/// Test that store failures are not retried
#[test]
fn test_store_error_propagates() {
	// Arrange
	let manager = manager_with_store(Arc::new(OfflineTagStore), TagConfig::default());

	// Act
	let result = manager.create_or_get("news");

	// Assert
	assert!(matches!(result, Err(TaggitError::DatabaseError(_))));
}

/// Test concurrent creation of names sharing one base slug
#[rstest]
fn test_concurrent_creation_yields_unique_slugs(generic_setup: GenericSetup) {
	// Arrange
	let manager = &generic_setup.manager;
	let names: Vec<String> = (0..16)
		.map(|n| format!("{}News", " ".repeat(n)))
		.collect();

	// Act
	let tags: Vec<_> = std::thread::scope(|scope| {
		let handles: Vec<_> = names
			.iter()
			.map(|name| scope.spawn(move || manager.create_or_get(name)))
			.collect();
		handles
			.into_iter()
			.map(|handle| handle.join().unwrap().unwrap())
			.collect()
	});

	// Assert
	let slugs: HashSet<_> = tags.iter().map(|tag| tag.slug().to_string()).collect();
	assert_eq!(slugs.len(), 16);
	assert!(slugs.contains("news"));
	assert_eq!(generic_setup.tags.len(), 16);
}

/// Test renaming keeps the slug and frees the old name
#[rstest]
fn test_rename(generic_setup: GenericSetup) {
	// Arrange
	let manager = &generic_setup.manager;
	let tag = manager.create_or_get("python").unwrap();

	// Act
	let renamed = manager.rename(tag.id.unwrap(), "Python 3").unwrap();
	let fresh = manager.create_or_get("python").unwrap();

	// Assert
	assert_eq!(renamed.slug(), "python");
	assert_eq!(fresh.slug(), "python-2");
	assert_eq!(
		names(&generic_setup.tags.all_tags().unwrap()),
		vec!["Python 3", "python"]
	);
}

#[rstest]
fn test_rename_to_taken_name(generic_setup: GenericSetup) {
	// Arrange
	let manager = &generic_setup.manager;
	manager.create_or_get("rust").unwrap();
	let python = manager.create_or_get("python").unwrap();

	// Act
	let result = manager.rename(python.id.unwrap(), "rust");

	// Assert
	assert!(result.unwrap_err().is_conflict());
}

/// Test that slugs only use URL-safe separators
#[rstest]
#[case('/')]
#[case('?')]
#[case('#')]
#[case('%')]
#[case('&')]
fn test_reserved_separator_rejected(#[case] separator: char) {
	// Arrange & Act
	let result = TagConfig::builder().slug_separator(separator).build();

	// Assert
	assert!(matches!(result, Err(TaggitError::ConfigError(_))));
}

#[test]
fn test_custom_separator_slugs() {
	// Arrange
	let config = TagConfig::builder().slug_separator('_').build().unwrap();
	let manager = manager_with_store(Arc::new(reinhardt_taggit::MemoryTagStore::new()), config);

	// Act
	let first = manager.create_or_get("Django Rocks").unwrap();
	let second = manager.create_or_get("django rocks").unwrap();

	// Assert
	assert_eq!(first.slug(), "django_rocks");
	assert_eq!(second.slug(), "django_rocks_2");
}

/// Test that a slug limit too narrow for a suffix is refused
#[rstest]
#[case(1)]
#[case(3)]
fn test_narrow_slug_limit_rejected(#[case] len: usize) {
	// Arrange & Act
	let result = TagConfig::builder().max_slug_length(len).build();

	// Assert
	assert!(matches!(result, Err(TaggitError::ConfigError(_))));
}
