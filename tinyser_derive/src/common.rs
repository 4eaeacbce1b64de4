use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    spanned::Spanned, Attribute, Expr, ExprLit, Fields, Index, Lit, LitStr, Member, Meta, Type,
    Visibility,
};

/// One declared field of a shape, with its directive attribute parsed.
pub(crate) struct Field {
    /// Position in declaration order, which is also its row in `FIELDS`.
    pub(crate) index: usize,
    pub(crate) member: Member,
    pub(crate) name: String,
    pub(crate) ty: Type,
    pub(crate) tag: Option<String>,
    pub(crate) public: bool,
}

impl Field {
    /// Whether the field is left out of the wire format entirely.
    ///
    /// Must agree with `tinyser::directive::Directive::resolve`, which decides
    /// between the two included directives at runtime.
    pub(crate) fn excluded(&self) -> bool {
        if !self.public {
            return true;
        }
        match self.tag.as_deref() {
            None | Some("") | Some("-") => true,
            Some(_) => false,
        }
    }

    /// The `FieldSpec` row for this field.
    pub(crate) fn spec(&self) -> TokenStream {
        let name = &self.name;
        let public = self.public;
        let tag = match &self.tag {
            Some(tag) => quote! { ::core::option::Option::Some(#tag) },
            None => quote! { ::core::option::Option::None },
        };
        quote! { ::tinyser::directive::FieldSpec::new(#name, #tag, #public) }
    }
}

fn parse_tag(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut found: Option<LitStr> = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("tiny")) {
        let lit = match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => s.clone(),
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "expected a string literal, as in #[tiny = \"name\"]",
                    ))
                }
            },
            Meta::List(_) => attr.parse_args::<LitStr>()?,
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected a directive, as in #[tiny = \"name\"]",
                ))
            }
        };
        if found.is_some() {
            return Err(syn::Error::new(attr.span(), "duplicate #[tiny] directive"));
        }
        found = Some(lit);
    }
    Ok(found.map(|lit| lit.value()))
}

/// Collects the fields of a struct in declaration order.
pub(crate) fn fields(fields: &Fields) -> syn::Result<Vec<Field>> {
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let (member, name) = match &field.ident {
                Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
                None => (
                    Member::Unnamed(Index {
                        index: index as u32,
                        span: field.span(),
                    }),
                    index.to_string(),
                ),
            };
            Ok(Field {
                index,
                member,
                name,
                ty: field.ty.clone(),
                tag: parse_tag(&field.attrs)?,
                public: match field.vis {
                    Visibility::Public(_) => true,
                    _ => false,
                },
            })
        })
        .collect()
}
