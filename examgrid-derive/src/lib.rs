mod macros;

use proc_macro::TokenStream;

#[proc_macro_derive(Row, attributes(row))]
pub fn derive_row(input: TokenStream) -> TokenStream {
    macros::row::expand(input.into()).into()
}
