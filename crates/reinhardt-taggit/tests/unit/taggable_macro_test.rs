//! Unit tests for the `#[taggable]` attribute macro

use crate::fixtures::{Article, Note, Product};
use reinhardt_taggit::{ContentTypeRegistry, ObjectRef, Taggable, TaggitError};
use rstest::rstest;

#[test]
fn test_explicit_app_label_and_model() {
	// Arrange
	let article = Article::new(5, "Hello");

	// Act & Assert
	assert_eq!(Article::app_label(), "blog");
	assert_eq!(Article::content_type_name(), "article");
	assert_eq!(article.object_id(), Some(5));
}

#[rstest]
#[case(Some(12))]
#[case(None)]
fn test_optional_id(#[case] id: Option<i64>) {
	// Arrange
	let product = Product {
		id,
		sku: "SKU-1".to_string(),
	};

	// Act & Assert
	assert_eq!(product.object_id(), id);
	assert_eq!(Product::app_label(), "shop");
	assert_eq!(Product::content_type_name(), "Product");
}

#[test]
fn test_defaults() {
	// Arrange
	let note = Note { id: 3 };

	// Act & Assert
	assert_eq!(Note::app_label(), "default");
	assert_eq!(Note::content_type_name(), "Note");
	assert_eq!(note.object_id(), Some(3));
}

#[test]
fn test_object_ref_from_model() {
	// Arrange
	let registry = ContentTypeRegistry::new();
	let article = Article::new(9, "Hello");
	let product = Product::new(9, "SKU-9");

	// Act
	let article_ref = ObjectRef::of(&registry, &article).unwrap();
	let product_ref = ObjectRef::of(&registry, &product).unwrap();

	// Assert
	assert_eq!(article_ref.to_string(), "blog.article#9");
	assert_eq!(product_ref.to_string(), "shop.Product#9");
	assert_ne!(article_ref, product_ref);
	assert_eq!(
		Article::content_type(&registry).unwrap(),
		article_ref.content_type
	);
}

#[test]
fn test_unsaved_model_has_no_object_ref() {
	// Arrange
	let registry = ContentTypeRegistry::new();
	let draft = Product {
		id: None,
		sku: "DRAFT".to_string(),
	};

	// Act
	let result = ObjectRef::of(&registry, &draft);

	// Assert
	assert!(matches!(
		result,
		Err(TaggitError::UnsavedObject(ref model)) if model == "Product"
	));
}
