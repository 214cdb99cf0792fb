extern crate proc_macro;

use proc_macro2::{Ident, TokenStream};
use quote::{quote, quote_spanned, ToTokens};
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::*;

/// Derive `reqparam::FromRequest` for a struct of request parameters.
///
/// Every field is resolved by name with `reqparam::extract::Resolver`.
/// Fields accept a `#[param(..)]` attribute:
///
/// - `not_empty`: reject the request when the value is absent or blank.
/// - `tip = "..."`: the text appended to the name in the validation message,
///   implies `not_empty`.
/// - `name = "..."`: the request parameter name, defaults to the field name.
/// - `default = "..."`: the value used when the parameter is absent or empty.
/// - `required = false`: resolve an absent value instead of rejecting.
/// - `request_part`: leave the field to a dedicated part resolver.
#[proc_macro_derive(Params, attributes(param))]
pub fn derive_params(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    let strukt = match &input.data {
        Data::Struct(s) => s,
        Data::Enum(_) => return Err(Error::new_spanned(input, "expected struct, found enum")),
        Data::Union(_) => return Err(Error::new_spanned(input, "expected struct, found union")),
    };

    let fields = match &strukt.fields {
        Fields::Named(fields) => fields,
        Fields::Unnamed(_) => {
            return Err(Error::new_spanned(
                &strukt.fields,
                "tuple structs are not supported",
            ))
        }
        Fields::Unit => {
            return Err(Error::new_spanned(
                &strukt.fields,
                "unit structs are not supported",
            ))
        }
    };

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics.params,
            "generic parameters are not supported",
        ));
    }

    let fields = fields
        .named
        .iter()
        .map(|field| {
            let name = field.ident.as_ref().unwrap();
            let resolved = resolve(field)?;
            Ok(quote! {
                #name: #resolved,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        #[::reqparam::async_trait]
        impl ::reqparam::FromRequest for #name {
            async fn from_request(
                req: &mut ::reqparam::Request,
            ) -> ::std::result::Result<Self, ::reqparam::Rejection> {
                let resolver = ::reqparam::http::RequestExt::resolver(&*req);
                let snapshot =
                    ::reqparam::extract::RequestSnapshot::capture(req, resolver.config()).await?;

                ::std::result::Result::Ok(#name { #(#fields)* })
            }
        }
    })
}

fn resolve(field: &Field) -> Result<TokenStream> {
    // `r#type` reads the `type` parameter
    let field_name = field.ident.as_ref().unwrap().unraw().to_string();
    let ty = &field.ty;

    let mut modifiers = Vec::new();

    for attr in &field.attrs {
        if !attr.path.is_ident("param") {
            continue;
        }

        let list = match attr.parse_meta()? {
            Meta::List(list) => list,
            _ => return Err(bad_param(attr)),
        };

        for nested in &list.nested {
            modifiers.push(modifier(nested)?);
        }
    }

    Ok(quote_spanned! { ty.span() =>
        resolver.resolve::<#ty>(
            &snapshot,
            &::reqparam::extract::ParamDescriptor::of::<#ty>(#field_name) #(#modifiers)*,
        )?
    })
}

fn modifier(nested: &NestedMeta) -> Result<TokenStream> {
    let (path, lit) = match nested {
        NestedMeta::Meta(Meta::Path(path)) => (path, None),
        NestedMeta::Meta(Meta::NameValue(nv)) => (&nv.path, Some(&nv.lit)),
        _ => return Err(bad_param(nested)),
    };

    let ident = path
        .get_ident()
        .map(Ident::to_string)
        .ok_or_else(|| bad_param(path))?;

    match (ident.as_str(), lit) {
        ("not_empty", None) => Ok(quote! { .not_empty() }),
        ("request_part", None) => Ok(quote! { .request_part() }),
        ("name", Some(Lit::Str(value))) => Ok(quote! { .named(#value) }),
        ("tip", Some(Lit::Str(value))) => Ok(quote! { .tip(#value) }),
        ("default", Some(Lit::Str(value))) => Ok(quote! { .default_value(#value) }),
        ("required", Some(Lit::Bool(value))) => Ok(quote! { .required(#value) }),
        ("name" | "tip" | "default", Some(lit)) => {
            Err(Error::new_spanned(lit, "expected a string literal"))
        }
        ("required", Some(lit)) => Err(Error::new_spanned(lit, "expected `true` or `false`")),
        _ => Err(bad_param(nested)),
    }
}

fn bad_param(tokens: impl ToTokens) -> Error {
    Error::new_spanned(
        tokens,
        "expected one of `not_empty`, `request_part`, `name = \"..\"`, `tip = \"..\"`, \
         `default = \"..\"` or `required = bool`",
    )
}
