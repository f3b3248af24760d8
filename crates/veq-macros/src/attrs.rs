//! Attribute parsing for the `Value` derive.

use syn::{Attribute, LitStr};

/// Parsed `#[value(...)]` attributes on a type.
#[derive(Debug, Default)]
pub struct TypeAttrs {
    /// Override name for the value type (default: Rust struct name)
    pub name: Option<String>,
}

/// Parsed `#[value(...)]` attributes on a field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Field is the hash cache
    pub cache: bool,
    /// Exclude field from equality and hashing
    pub skip: bool,
}

impl TypeAttrs {
    /// Parse attributes from a list of `#[value(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("value") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.name = Some(value.value());
                } else {
                    return Err(meta.error(format!(
                        "unknown value attribute: {}",
                        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                    )));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

impl FieldAttrs {
    /// Parse attributes from a list of `#[value(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("value") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("cache") {
                    result.cache = true;
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else {
                    return Err(meta.error(format!(
                        "unknown value field attribute: {}",
                        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                    )));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}
