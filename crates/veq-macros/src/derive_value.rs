//! Implementation of the `#[derive(Value)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Index, parse_macro_input};

use crate::attrs::{FieldAttrs, TypeAttrs};

pub fn derive_value_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_value_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_value_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let attrs = TypeAttrs::from_attrs(&input.attrs)?;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Value cannot be derived for generic types",
        ));
    }

    // Determine the declared value-type name
    let value_name = attrs.name.clone().unwrap_or_else(|| name.to_string());

    let fields = collect_fields(input)?;

    let value_impl = generate_value_impl(name, &value_name, &fields);
    let std_impls = generate_std_impls(name);

    Ok(quote! {
        #value_impl
        #std_impls
    })
}

/// Fields as they participate in the contract.
struct ValueFields {
    /// Members compared and hashed, in declaration order.
    members: Vec<syn::Member>,
    /// The embedded `HashCache` member.
    cache: syn::Member,
}

/// Split the struct's fields into participating members and the cache.
///
/// The cache field is the unique field marked `#[value(cache)]` or whose
/// type path ends in `HashCache`. Skipped fields join neither side.
fn collect_fields(input: &DeriveInput) -> syn::Result<ValueFields> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Value can only be derived for structs; model variant sets as an enum field",
        ));
    };

    let fields: Vec<&syn::Field> = match &data.fields {
        Fields::Named(fields) => fields.named.iter().collect(),
        Fields::Unnamed(fields) => fields.unnamed.iter().collect(),
        Fields::Unit => Vec::new(),
    };

    let mut members = Vec::new();
    let mut cache = None;

    for (index, field) in fields.iter().enumerate() {
        let field_attrs = FieldAttrs::from_attrs(&field.attrs)?;

        let member = match &field.ident {
            Some(ident) => syn::Member::Named(ident.clone()),
            None => syn::Member::Unnamed(Index::from(index)),
        };

        if field_attrs.cache || is_hash_cache(&field.ty) {
            if cache.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "duplicate hash cache field",
                ));
            }
            cache = Some(member);
            continue;
        }

        if field_attrs.skip {
            continue;
        }

        members.push(member);
    }

    let Some(cache) = cache else {
        return Err(syn::Error::new_spanned(
            input,
            "value types must embed a `HashCache` field (or mark one with #[value(cache)])",
        ));
    };

    Ok(ValueFields { members, cache })
}

fn is_hash_cache(ty: &syn::Type) -> bool {
    let syn::Type::Path(path) = ty else {
        return false;
    };
    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "HashCache")
}

/// Generate the `Value` trait implementation.
fn generate_value_impl(name: &syn::Ident, value_name: &str, fields: &ValueFields) -> TokenStream2 {
    let members = &fields.members;
    let cache = &fields.cache;

    quote! {
        impl ::veq_core::Value for #name {
            fn fields_eq(&self, other: &Self) -> bool {
                true #(&& self.#members == other.#members)*
            }

            fn fields_hash(&self) -> u64 {
                let mut hasher = ::veq_core::ValueHasher::with_tag(
                    <Self as ::veq_core::Value>::type_tag(),
                );
                #(::core::hash::Hash::hash(&self.#members, &mut hasher);)*
                ::core::hash::Hasher::finish(&hasher)
            }

            fn hash_cache(&self) -> &::veq_core::HashCache {
                &self.#cache
            }

            fn type_name() -> &'static str {
                #value_name
            }
        }
    }
}

/// Generate `PartialEq`/`Eq`/`Hash` so operators and hash containers
/// funnel through the one equality routine.
fn generate_std_impls(name: &syn::Ident) -> TokenStream2 {
    quote! {
        impl ::core::cmp::PartialEq for #name {
            fn eq(&self, other: &Self) -> bool {
                ::veq_core::Value::value_eq(self, other)
            }
        }

        impl ::core::cmp::Eq for #name {}

        impl ::core::hash::Hash for #name {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(::veq_core::Value::value_hash(self));
            }
        }
    }
}
