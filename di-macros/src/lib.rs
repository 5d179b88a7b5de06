//! Derive macros for nosograph's context-based dependency wiring.
//!
//! - `#[derive(Context)]` exposes every field of the root context through
//!   `crate::FromRef`, so `Graph::from_ref(&ctx)` hands out a clone.
//! - `#[derive(FromContext)]` builds a repository or service by resolving each
//!   of its fields from the context.
//!
//! Generated code names `crate::FromRef`, which the consuming crate defines.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields};

/// Implements `FromRef<Self>` for the type of each named field.
///
/// A field marked `#[context(skip)]` is left out, which is needed when two
/// fields share a type.
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct Context {
///     pub graph: Graph,
///     pub config: Arc<Config>,
/// }
/// // impl FromRef<Context> for Graph { .. }
/// // impl FromRef<Context> for Arc<Config> { .. }
/// ```
#[proc_macro_derive(Context, attributes(context))]
pub fn derive_context(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_context(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `FromRef<Context>` by resolving every field from the context.
///
/// The context type defaults to `Context` in scope and can be overridden:
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// #[from_context(context = crate::context::Context)]
/// pub struct ClassificationRepository {
///     graph: Graph,
/// }
/// ```
#[proc_macro_derive(FromContext, attributes(from_context))]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_from_context(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_context(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut impls = Vec::new();
    for field in named_fields(input, "Context")? {
        if is_skipped(field)? {
            continue;
        }
        let field_name = &field.ident;
        let field_type = &field.ty;
        impls.push(quote! {
            impl #impl_generics crate::FromRef<#name #ty_generics> for #field_type #where_clause {
                fn from_ref(ctx: &#name #ty_generics) -> Self {
                    ::core::clone::Clone::clone(&ctx.#field_name)
                }
            }
        });
    }

    Ok(quote! { #(#impls)* })
}

fn expand_from_context(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let context_type = context_type(input)?;

    let inits = named_fields(input, "FromContext")?.iter().map(|field| {
        let field_name = &field.ident;
        let field_type = &field.ty;
        quote! {
            #field_name: <#field_type as crate::FromRef<#context_type>>::from_ref(ctx)
        }
    });

    Ok(quote! {
        impl #impl_generics crate::FromRef<#context_type> for #name #ty_generics #where_clause {
            fn from_ref(ctx: &#context_type) -> Self {
                Self { #(#inits),* }
            }
        }
    })
}

fn named_fields<'a>(
    input: &'a DeriveInput,
    derive: &str,
) -> syn::Result<&'a Punctuated<Field, Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{derive} requires a struct with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{derive} can only be derived for structs"),
        )),
    }
}

fn is_skipped(field: &Field) -> syn::Result<bool> {
    let mut skip = false;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("context")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

fn context_type(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let mut context: Option<syn::Type> = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("from_context")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("context") {
                context = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `context = Type`"))
            }
        })?;
    }

    Ok(match context {
        Some(ty) => quote! { #ty },
        None => quote! { Context },
    })
}
