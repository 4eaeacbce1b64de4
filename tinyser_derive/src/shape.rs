use crate::common::Field;
use quote::quote;
use syn::DeriveInput;

pub fn tiny_shape(ast: &DeriveInput, fields: &[Field]) -> proc_macro2::TokenStream {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();
    let specs = fields.iter().map(Field::spec);

    quote! {
        impl #impl_generics ::tinyser::directive::Shape for #name #ty_generics #where_clause {
            const FIELDS: &'static [::tinyser::directive::FieldSpec] = &[#(#specs,)*];
        }

        impl #impl_generics ::tinyser::encoding::HasKind for #name #ty_generics #where_clause {
            const KIND: ::tinyser::encoding::Kind = ::tinyser::encoding::Kind::Struct;
        }
    }
}
