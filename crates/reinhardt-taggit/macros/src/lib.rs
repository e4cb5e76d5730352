//! Proc macros for reinhardt-taggit
//!
//! This crate provides the `` `#[taggable]` `` attribute macro for zero-boilerplate tagging.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Type, parse_macro_input};

/// Attribute macro to make a model taggable
///
/// This macro implements the `` `Taggable` `` trait so instances can be turned
/// into `` `ObjectRef` ``s and tagged through a `` `TagManager` ``.
///
/// # Usage
///
/// ```rust,ignore
/// use reinhardt_taggit::prelude::*;
///
/// #[taggable(app_label = "shop", model = "food")]
/// pub struct Food {
///     pub id: i64,
///     pub name: String,
/// }
///
/// assert_eq!(Food::content_type_name(), "food");
/// ```
///
/// # Requirements
///
/// - The struct must have a field named `id` of type `i64` or `Option<i64>`
/// - `app_label` defaults to `"default"`, `model` to the struct name
///
/// # Generated Code
///
/// `` `Taggable` `` trait implementation with `` `app_label()` ``,
/// `` `content_type_name()` `` and `` `object_id()` ``. Unsaved instances
/// (`id: None`) report no object id and cannot be tagged.
#[proc_macro_attribute]
pub fn taggable(attr: TokenStream, item: TokenStream) -> TokenStream {
	let mut app_label: Option<LitStr> = None;
	let mut model: Option<LitStr> = None;
	let parser = syn::meta::parser(|meta| {
		if meta.path.is_ident("app_label") {
			app_label = Some(meta.value()?.parse()?);
			Ok(())
		} else if meta.path.is_ident("model") {
			model = Some(meta.value()?.parse()?);
			Ok(())
		} else {
			Err(meta.error("unsupported taggable property, expected `app_label` or `model`"))
		}
	});
	parse_macro_input!(attr with parser);

	let input = parse_macro_input!(item as DeriveInput);
	match expand(&input, app_label, model) {
		Ok(impl_block) => TokenStream::from(quote! {
			#input
			#impl_block
		}),
		Err(err) => err.to_compile_error().into(),
	}
}

fn expand(
	input: &DeriveInput,
	app_label: Option<LitStr>,
	model: Option<LitStr>,
) -> syn::Result<TokenStream2> {
	let name = &input.ident;

	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new_spanned(
			input,
			"#[taggable] can only be applied to structs",
		));
	};
	let Fields::Named(fields) = &data.fields else {
		return Err(syn::Error::new_spanned(
			input,
			"#[taggable] requires a struct with named fields",
		));
	};
	let Some(id_field) = fields
		.named
		.iter()
		.find(|field| field.ident.as_ref().is_some_and(|ident| ident == "id"))
	else {
		return Err(syn::Error::new_spanned(
			name,
			"#[taggable] requires an `id: i64` or `id: Option<i64>` field",
		));
	};

	let object_id = if is_option(&id_field.ty) {
		quote! { self.id }
	} else {
		quote! { ::core::option::Option::Some(self.id) }
	};

	let model = model.unwrap_or_else(|| LitStr::new(&name.to_string(), name.span()));
	let app_label_fn = app_label.map(|label| {
		quote! {
			fn app_label() -> &'static str {
				#label
			}
		}
	});

	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
	Ok(quote! {
		#[automatically_derived]
		impl #impl_generics ::reinhardt_taggit::Taggable for #name #ty_generics #where_clause {
			#app_label_fn

			fn content_type_name() -> &'static str {
				#model
			}

			fn object_id(&self) -> ::core::option::Option<i64> {
				#object_id
			}
		}
	})
}

fn is_option(ty: &Type) -> bool {
	match ty {
		Type::Path(path) => path
			.path
			.segments
			.last()
			.is_some_and(|segment| segment.ident == "Option"),
		_ => false,
	}
}
