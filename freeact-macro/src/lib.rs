/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */
#![forbid(unsafe_code)]

//! FreeAct Macro Library
//!
//! Attribute macros that remove the boilerplate of declaring FreeAct events and
//! active-object state types.
//!
//! # Event Macro
//!
//! ```ignore
//! // Every instance carries the same signal.
//! #[freeact_event(signal = BUTTON_PRESSED)]
//! pub struct ButtonPressed {
//!     pub pin: u8,
//! }
//!
//! // The signal is chosen per instance through a `signal` field.
//! #[freeact_event]
//! pub struct Reading {
//!     pub signal: Signal,
//!     pub value: i32,
//! }
//! ```
//!
//! # Active Macro
//!
//! ```ignore
//! #[freeact_active]
//! pub struct Blinky {
//!     led_on: bool,
//! }
//! ```

use proc_macro::TokenStream;

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Expr, Fields};

fn has_derive(input: &DeriveInput, trait_name: &str) -> bool {
    input.attrs.iter().any(|attr| {
        if attr.path().is_ident("derive") {
            let mut found = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(trait_name) {
                    found = true;
                }
                Ok(())
            });
            found
        } else {
            false
        }
    })
}

fn has_signal_field(input: &DeriveInput) -> bool {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields
                .named
                .iter()
                .any(|field| field.ident.as_ref().is_some_and(|ident| ident == "signal")),
            _ => false,
        },
        _ => false,
    }
}

fn derive_missing(input: &DeriveInput, wanted: &[&str]) -> TokenStream2 {
    let traits: Vec<_> = wanted
        .iter()
        .filter(|name| !has_derive(input, name))
        .map(|name| syn::Ident::new(name, proc_macro2::Span::call_site()))
        .collect();
    if traits.is_empty() {
        quote!()
    } else {
        quote!(#[derive(#(#traits),*)])
    }
}

/// Turns a struct into a FreeAct event.
///
/// The struct gains `#[derive(Clone, Debug)]` (for whichever of the two is not
/// already derived) and an implementation of `freeact::Event`.
///
/// With `signal = EXPR` every instance reports `EXPR` as its signal. Without
/// arguments the struct must have a named field `signal: Signal`, which is
/// returned as-is.
///
/// A compile-time assertion checks that the type is `Send + Sync + 'static`, so
/// events can be shared with the consumer thread behind an `Arc`.
#[proc_macro_attribute]
pub fn freeact_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut signal: Option<Expr> = None;
    let options = syn::meta::parser(|meta| {
        if meta.path.is_ident("signal") {
            signal = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported freeact_event option; expected `signal = <expr>`"))
        }
    });
    parse_macro_input!(attr with options);

    let input = parse_macro_input!(item as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let signal_body = match signal {
        Some(expr) => quote!(#expr),
        None if has_signal_field(&input) => quote!(self.signal),
        None => {
            return syn::Error::new_spanned(
                name,
                "freeact_event needs either `signal = <expr>` or a named `signal` field",
            )
            .to_compile_error()
            .into();
        }
    };

    let derives = derive_missing(&input, &["Clone", "Debug"]);
    let assert_ident = quote::format_ident!("_AssertFreeActEvent_{}", name);

    let expanded = quote! {
        #derives
        #input

        impl #impl_generics ::freeact::Event for #name #ty_generics #where_clause {
            #[inline]
            fn signal(&self) -> ::freeact::Signal {
                #signal_body
            }
        }

        #[doc(hidden)]
        #[allow(dead_code, non_camel_case_types, non_snake_case, clippy::needless_lifetimes)]
        const _: () = {
            fn #assert_ident #impl_generics () #where_clause {
                fn assert_bounds<T: Send + Sync + 'static>() {}
                assert_bounds::<#name #ty_generics>();
            }
        };
    };

    TokenStream::from(expanded)
}

/// Prepares a struct for use as active-object state.
///
/// Adds `#[derive(Default, Debug)]` for whichever of the two is not already
/// derived; pass `no_default` to supply `Default` by hand. Asserts at compile
/// time that the type is `Send + 'static`, since the state moves onto the
/// active object's own thread when it starts. The type still has to implement
/// `freeact::Dispatch` itself.
#[proc_macro_attribute]
pub fn freeact_active(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut no_default = false;
    let options = syn::meta::parser(|meta| {
        if meta.path.is_ident("no_default") {
            no_default = true;
            Ok(())
        } else {
            Err(meta.error("unsupported freeact_active option; expected `no_default`"))
        }
    });
    parse_macro_input!(attr with options);

    let input = parse_macro_input!(item as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let wanted: &[&str] = if no_default {
        &["Debug"]
    } else {
        &["Default", "Debug"]
    };
    let derives = derive_missing(&input, wanted);
    let assert_ident = quote::format_ident!("_AssertFreeActActive_{}", name);

    let expanded = quote! {
        #derives
        #input

        #[doc(hidden)]
        #[allow(dead_code, non_camel_case_types, non_snake_case, clippy::needless_lifetimes)]
        const _: () = {
            fn #assert_ident #impl_generics () #where_clause {
                fn assert_bounds<T: Send + 'static>() {}
                assert_bounds::<#name #ty_generics>();
            }
        };
    };

    TokenStream::from(expanded)
}
