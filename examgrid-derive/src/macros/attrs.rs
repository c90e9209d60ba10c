//! `#[row(...)]` field attribute parsing.

use syn::{Attribute, LitStr};

/// Options set on one field through `#[row(...)]`.
#[derive(Debug, Default)]
pub struct RowFieldAttrs {
    /// `#[row(skip)]`: the field is not readable by the grid.
    pub skip: bool,
    /// `#[row(rename = "name")]`: the key columns use for this field.
    pub rename: Option<String>,
}

/// Parse every `#[row(...)]` attribute on a field.
pub fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<RowFieldAttrs> {
    let mut parsed = RowFieldAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("row") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                parsed.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                parsed.rename = Some(name.value());
                Ok(())
            } else {
                Err(meta.error("unknown row attribute, expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }
    Ok(parsed)
}
