use crate::{common::Field, ser::bounded_where};
use quote::quote;
use syn::{parse_quote, DeriveInput};

pub fn tiny_de(ast: &DeriveInput, fields: &[Field]) -> proc_macro2::TokenStream {
    let name = &ast.ident;
    let (impl_generics, ty_generics, _) = ast.generics.split_for_impl();
    let where_clause = bounded_where(ast, fields, &parse_quote!(::tinyser::encoding::De));

    // excluded fields get no code at all, so their types need no codec impls
    let takes = fields.iter().filter(|f| !f.excluded()).map(|f| {
        let member = &f.member;
        let index = f.index;
        quote! {
            ::tinyser::encoding::de_field(
                d,
                &<Self as ::tinyser::directive::Shape>::FIELDS[#index],
                &mut self.#member,
            )?;
        }
    });

    quote! {
        impl #impl_generics ::tinyser::encoding::De for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn de_in_place<__D: ::tinyser::encoding::Deserializer>(
                &mut self,
                d: &mut __D,
            ) -> ::tinyser::errors::Result<()> {
                #(#takes)*
                ::core::result::Result::Ok(())
            }
        }
    }
}
