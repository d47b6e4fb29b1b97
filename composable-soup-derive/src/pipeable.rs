//! Implementation of the `#[pipeable]` attribute.
//!
//! The attribute turns an ordinary function into a constructor of a
//! `composable_soup::compose::Pipeable`. The arity is the number of
//! positional parameters, counted once at expansion time. A parameter marked
//! `#[options]` receives the keyword options instead and does not count
//! towards the arity.
//!
//! # Generated Code Structure
//!
//! For
//!
//! ```text
//! #[pipeable]
//! pub fn has_attr(name: String, node: Node) -> bool { node.has_attr(&name) }
//! ```
//!
//! the attribute generates:
//!
//! ```text
//! pub fn has_attr() -> ::composable_soup::compose::Pipeable {
//!     #[allow(clippy::needless_pass_by_value)]
//!     fn __pipeable_has_attr(name: String, node: Node) -> bool { node.has_attr(&name) }
//!
//!     ::composable_soup::compose::Pipeable::new("has_attr", 2usize, |mut __pipeable_arguments| {
//!         let __pipeable_argument_0 = __pipeable_arguments.positional::<String>(0usize)?;
//!         let __pipeable_argument_1 = __pipeable_arguments.positional::<Node>(1usize)?;
//!         ::core::result::Result::Ok(::core::convert::Into::into(
//!             __pipeable_has_attr(__pipeable_argument_0, __pipeable_argument_1),
//!         ))
//!     })
//! }
//! ```
//!
//! A function returning `Result<T, SoupError>` has its `Ok` value converted
//! and its error forwarded untouched.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{FnArg, ItemFn, ReturnType, Type, Visibility};

enum Parameter {
    Positional(Box<Type>),
    Options,
}

pub fn pipeable_impl(attribute: TokenStream, item: TokenStream) -> TokenStream {
    let attribute: TokenStream2 = attribute.into();

    let expanded = if attribute.is_empty() {
        match syn::parse::<ItemFn>(item) {
            Ok(function) => expand(function).unwrap_or_else(syn::Error::into_compile_error),
            Err(error) => error.to_compile_error(),
        }
    } else {
        syn::Error::new(attribute.span(), "#[pipeable] takes no arguments").to_compile_error()
    };

    TokenStream::from(expanded)
}

pub(crate) fn expand(mut function: ItemFn) -> syn::Result<TokenStream2> {
    validate_signature(&function)?;

    let parameters = function
        .sig
        .inputs
        .iter_mut()
        .map(classify)
        .collect::<syn::Result<Vec<_>>>()?;

    let options_parameters = parameters
        .iter()
        .filter(|parameter| matches!(parameter, Parameter::Options))
        .count();
    if options_parameters > 1 {
        return Err(syn::Error::new(
            function.sig.inputs.span(),
            "#[pipeable] accepts at most one #[options] parameter",
        ));
    }

    let name = function.sig.ident.clone();
    let name_literal = name.unraw().to_string();
    let inner_name = format_ident!("__pipeable_{}", name_literal);
    let arity = parameters.len() - options_parameters;

    let mut position = 0usize;
    let mut bindings = Vec::with_capacity(parameters.len());
    let mut call_arguments = Vec::with_capacity(parameters.len());

    for (index, parameter) in parameters.iter().enumerate() {
        let identifier = format_ident!("__pipeable_argument_{}", index);
        bindings.push(match parameter {
            Parameter::Positional(parameter_type) => {
                let binding = quote! {
                    let #identifier = __pipeable_arguments.positional::<#parameter_type>(#position)?;
                };
                position += 1;
                binding
            }
            Parameter::Options => quote! {
                let #identifier = __pipeable_arguments.options();
            },
        });
        call_arguments.push(identifier);
    }

    let invocation = quote! { #inner_name(#(#call_arguments),*) };
    let output = if returns_result(&function.sig.output) {
        quote! { ::core::result::Result::map(#invocation, ::core::convert::Into::into) }
    } else {
        quote! { ::core::result::Result::Ok(::core::convert::Into::into(#invocation)) }
    };

    let attributes = std::mem::take(&mut function.attrs);
    let visibility = std::mem::replace(&mut function.vis, Visibility::Inherited);
    function.sig.ident = inner_name;

    Ok(quote! {
        #(#attributes)*
        #visibility fn #name() -> ::composable_soup::compose::Pipeable {
            #[allow(clippy::needless_pass_by_value)]
            #function

            ::composable_soup::compose::Pipeable::new(
                #name_literal,
                #arity,
                |mut __pipeable_arguments: ::composable_soup::compose::Arguments| {
                    #(#bindings)*
                    #output
                },
            )
        }
    })
}

fn validate_signature(function: &ItemFn) -> syn::Result<()> {
    let signature = &function.sig;

    if !signature.generics.params.is_empty() {
        return Err(syn::Error::new(
            signature.generics.span(),
            "#[pipeable] functions cannot be generic; arguments are decoded by concrete type",
        ));
    }
    if let Some(asyncness) = &signature.asyncness {
        return Err(syn::Error::new(
            asyncness.span(),
            "#[pipeable] functions must be synchronous",
        ));
    }
    if let Some(variadic) = &signature.variadic {
        return Err(syn::Error::new(
            variadic.span(),
            "#[pipeable] functions need a fixed arity",
        ));
    }

    Ok(())
}

fn classify(input: &mut FnArg) -> syn::Result<Parameter> {
    match input {
        FnArg::Receiver(receiver) => Err(syn::Error::new(
            receiver.span(),
            "#[pipeable] cannot wrap methods; take the node as an ordinary parameter",
        )),
        FnArg::Typed(pattern) => {
            let before = pattern.attrs.len();
            pattern
                .attrs
                .retain(|attribute| !attribute.path().is_ident("options"));

            if pattern.attrs.len() == before {
                Ok(Parameter::Positional(pattern.ty.clone()))
            } else {
                Ok(Parameter::Options)
            }
        }
    }
}

fn returns_result(output: &ReturnType) -> bool {
    match output {
        ReturnType::Default => false,
        ReturnType::Type(_, output_type) => match output_type.as_ref() {
            Type::Path(path) => path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "Result"),
            _ => false,
        },
    }
}
