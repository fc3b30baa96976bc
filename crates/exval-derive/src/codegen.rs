//! Code generation for `#[derive(Describe)]`.
//!
//! Emits an `impl ::exval::Describe` whose descriptor is built once, on first
//! use, and lists every non-skipped field in declaration order.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::input::{FieldInput, FieldKind, MacroInput};

/// Main code generation entry point.
pub fn codegen(input: &MacroInput) -> TokenStream {
    let ident = &input.ident;
    let type_name = &input.type_name;
    let members: Vec<TokenStream> = input
        .fields
        .iter()
        .filter(|field| field.options.skip.is_none())
        .map(|field| generate_member(input, field))
        .collect();

    quote! {
        impl ::exval::Describe for #ident {
            fn descriptor() -> &'static ::exval::TypeDescriptor<Self> {
                static DESCRIPTOR: ::std::sync::LazyLock<::exval::TypeDescriptor<#ident>> =
                    ::std::sync::LazyLock::new(|| {
                        ::exval::TypeDescriptor::new(#type_name)
                            #(.with_member(#members))*
                    });
                &DESCRIPTOR
            }
        }
    }
}

/// Generate the `MemberDescriptor` expression for one field.
fn generate_member(input: &MacroInput, field: &FieldInput) -> TokenStream {
    let owner = &input.ident;
    let field_ident = &field.ident;
    let name = &field.member.name;

    let member = match &field.kind {
        FieldKind::Scalar(scalar) => {
            let variant = format_ident!("{}", scalar.name());
            quote! {
                ::exval::MemberDescriptor::scalar(
                    #name,
                    ::exval::ScalarType::#variant,
                    |instance: &#owner| ::exval::Value::from(
                        ::std::clone::Clone::clone(&instance.#field_ident)
                    ),
                )
            }
        }
        FieldKind::Other(type_name) => quote! {
            ::exval::MemberDescriptor::other(#name, #type_name)
        },
    };

    if field.options.read_only.is_some() {
        quote! { #member.read_only() }
    } else {
        member
    }
}
