use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, parse2};

use super::attrs::parse_field_attrs;

/// Derive macro for the Row trait.
///
/// Every named field becomes readable by its name (or its `rename`), with
/// the value converted through `examgrid::Value::from`. Fields marked
/// `#[row(skip)]` are not readable. Only structs with named fields are
/// supported.
pub fn expand(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match parse2(input) {
        Ok(i) => i,
        Err(e) => return e.to_compile_error(),
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "#[derive(Row)] requires a struct with named fields",
                )
                .to_compile_error();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "#[derive(Row)] only supports structs")
                .to_compile_error();
        }
    };

    let mut keys = Vec::new();
    let mut arms = Vec::new();
    for field in fields {
        let attrs = match parse_field_attrs(&field.attrs) {
            Ok(a) => a,
            Err(e) => return e.to_compile_error(),
        };
        if attrs.skip {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let key = attrs.rename.unwrap_or_else(|| ident.unraw().to_string());
        arms.push(quote! {
            #key => ::core::option::Option::Some(
                ::examgrid::Value::from(::core::clone::Clone::clone(&self.#ident))
            ),
        });
        keys.push(key);
    }

    quote! {
        impl #impl_generics ::examgrid::row::Row for #name #ty_generics #where_clause {
            fn field(&self, key: &str) -> ::core::option::Option<::examgrid::Value> {
                match key {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_names() -> ::core::option::Option<&'static [&'static str]> {
                const FIELDS: &[&str] = &[#(#keys),*];
                ::core::option::Option::Some(FIELDS)
            }
        }
    }
}
