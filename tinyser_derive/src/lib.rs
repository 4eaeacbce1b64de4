extern crate proc_macro;

mod common;
mod de;
mod ser;
mod shape;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput};

fn struct_impl(ast: &DeriveInput, fields: &syn::Fields) -> syn::Result<proc_macro2::TokenStream> {
    let fields = common::fields(fields)?;

    let shape = shape::tiny_shape(ast, &fields);
    let tser = ser::tiny_ser(ast, &fields);
    let tde = de::tiny_de(ast, &fields);

    Ok(quote! {
        #shape
        #tser
        #tde
    })
}

/// Derives the directive table and the encode/decode walks for a struct.
///
/// Fields are tagged with `#[tiny = "..."]`. Untagged, `""`, `"-"` and
/// non-`pub` fields are skipped; `"omitempty"` fields are written only when
/// they differ from their default.
///
/// The derived `is_default` only looks at the fields that are written. A
/// struct whose skipped fields hold values but whose written fields are all
/// default counts as default, so it is left out of an `"omitempty"` slot.
///
/// A defaulted `"omitempty"` field writes no bytes and is read back only while
/// input remains, so it decodes reliably only as the last written field of the
/// top-level value.
#[proc_macro_derive(TinySerDe, attributes(tiny))]
pub fn tinyserde_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let out = match &ast.data {
        Data::Struct(sd) => struct_impl(&ast, &sd.fields),
        Data::Enum(_) | Data::Union(_) => Err(syn::Error::new_spanned(
            &ast.ident,
            "TinySerDe can only be derived for structs: the format carries no variant tags",
        )),
    };

    out.unwrap_or_else(|e| e.to_compile_error()).into()
}
