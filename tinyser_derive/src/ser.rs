use crate::common::Field;
use quote::quote;
use syn::{parse_quote, DeriveInput, WhereClause};

/// Adds `bound` for every wire field's type when the struct is generic.
pub(crate) fn bounded_where(
    ast: &DeriveInput,
    fields: &[Field],
    bound: &syn::Path,
) -> Option<WhereClause> {
    let mut where_clause = ast.generics.where_clause.clone();
    if ast.generics.params.is_empty() {
        return where_clause;
    }
    let clause = where_clause.get_or_insert_with(|| parse_quote!(where));
    for field in fields.iter().filter(|f| !f.excluded()) {
        let ty = &field.ty;
        clause.predicates.push(parse_quote!(#ty: #bound));
    }
    where_clause
}

pub fn tiny_ser(ast: &DeriveInput, fields: &[Field]) -> proc_macro2::TokenStream {
    let name = &ast.ident;
    let (impl_generics, ty_generics, _) = ast.generics.split_for_impl();
    let where_clause = bounded_where(ast, fields, &parse_quote!(::tinyser::encoding::Ser));

    let wire: Vec<&Field> = fields.iter().filter(|f| !f.excluded()).collect();

    let puts = wire.iter().map(|f| {
        let member = &f.member;
        let index = f.index;
        quote! {
            ::tinyser::encoding::ser_field(
                s,
                &<Self as ::tinyser::directive::Shape>::FIELDS[#index],
                &self.#member,
            )?;
        }
    });

    let defaults = wire.iter().map(|f| {
        let member = &f.member;
        quote! { && ::tinyser::encoding::Ser::is_default(&self.#member) }
    });

    quote! {
        impl #impl_generics ::tinyser::encoding::Ser for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn ser<__S: ::tinyser::encoding::Serializer>(
                &self,
                s: &mut __S,
            ) -> ::tinyser::errors::Result<()> {
                #(#puts)*
                ::core::result::Result::Ok(())
            }

            fn is_default(&self) -> bool {
                true #(#defaults)*
            }
        }
    }
}
