//! Internal model of a `#[derive(Describe)]` input.
//!
//! Mirrors the runtime descriptor but keeps span information for error
//! messages.

use exval_semantics::{ScalarType, resolve_scalar_type};
use proc_macro2::Span;
use quote::ToTokens;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{
    Data, DeriveInput, Expr, Fields, GenericArgument, Ident, LitStr, Path, PathArguments, Token,
    Type, TypePath,
};

/// Top-level derive input.
pub struct MacroInput {
    pub ident: Ident,
    /// Type name reported in failure messages.
    pub type_name: String,
    pub fields: Vec<FieldInput>,
}

/// One named field of the struct.
pub struct FieldInput {
    pub ident: Ident,
    /// Member name exposed to expressions.
    pub member: SpannedIdent,
    pub kind: FieldKind,
    pub options: FieldOptions,
}

/// How a field binds.
pub enum FieldKind {
    Scalar(ScalarType),
    Other(String),
}

/// Options collected from `#[describe(...)]` on a field.
#[derive(Default)]
pub struct FieldOptions {
    pub read_only: Option<Span>,
    pub skip: Option<Span>,
    pub rename: Option<SpannedIdent>,
}

/// Wrapper for names that preserves span information.
#[derive(Clone)]
pub struct SpannedIdent {
    pub name: String,
    pub span: Span,
}

impl SpannedIdent {
    pub fn new(ident: &Ident) -> Self {
        Self {
            name: ident.to_string(),
            span: ident.span(),
        }
    }

    /// Create a SpannedIdent from a string literal.
    pub fn from_lit(lit: &LitStr) -> Self {
        Self {
            name: lit.value(),
            span: lit.span(),
        }
    }
}

/// An option name seen inside `#[describe(...)]` that is not recognized.
pub struct UnknownOption {
    pub name: String,
    pub span: Span,
    pub target: OptionTarget,
}

/// Where an attribute was written.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OptionTarget {
    Struct,
    Field,
}

impl MacroInput {
    /// Build the model from a derive input.
    ///
    /// Unknown options are collected rather than rejected here so validation
    /// can attach suggestions.
    pub fn from_derive(input: &DeriveInput) -> syn::Result<(Self, Vec<UnknownOption>)> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "Describe cannot be derived for generic types",
            ));
        }

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "Describe requires a struct with named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "Describe can only be derived for structs",
                ));
            }
        };

        let mut unknown = Vec::new();
        let mut type_name = input.ident.to_string();
        for attr in input.attrs.iter().filter(|a| a.path().is_ident("describe")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    type_name = lit.value();
                } else {
                    unknown.push(unknown_option(&meta.path, OptionTarget::Struct));
                    skip_value(&meta)?;
                }
                Ok(())
            })?;
        }

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let Some(ident) = field.ident.clone() else {
                continue;
            };
            let mut options = FieldOptions::default();
            for attr in field.attrs.iter().filter(|a| a.path().is_ident("describe")) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("read_only") {
                        options.read_only = Some(meta.path.span());
                    } else if meta.path.is_ident("skip") {
                        options.skip = Some(meta.path.span());
                    } else if meta.path.is_ident("rename") {
                        let lit: LitStr = meta.value()?.parse()?;
                        options.rename = Some(SpannedIdent::from_lit(&lit));
                    } else {
                        unknown.push(unknown_option(&meta.path, OptionTarget::Field));
                        skip_value(&meta)?;
                    }
                    Ok(())
                })?;
            }

            let member = options
                .rename
                .clone()
                .unwrap_or_else(|| SpannedIdent::new(&ident));
            fields.push(FieldInput {
                ident,
                member,
                kind: classify(&field.ty),
                options,
            });
        }

        Ok((
            MacroInput {
                ident: input.ident.clone(),
                type_name,
                fields,
            },
            unknown,
        ))
    }
}

/// Consume `= value` after an unrecognized option so parsing can continue.
fn skip_value(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    }
    Ok(())
}

fn unknown_option(path: &Path, target: OptionTarget) -> UnknownOption {
    UnknownOption {
        name: path.to_token_stream().to_string().replace(' ', ""),
        span: path.span(),
        target,
    }
}

/// Classify a field type through the shared scalar table.
///
/// `Option<T>` binds as `T`, nullable.
fn classify(ty: &Type) -> FieldKind {
    match ty {
        Type::Group(group) => classify(&group.elem),
        Type::Paren(paren) => classify(&paren.elem),
        Type::Path(path) if path.qself.is_none() => classify_path(path),
        other => FieldKind::Other(type_name(other)),
    }
}

fn classify_path(path: &TypePath) -> FieldKind {
    let Some(last) = path.path.segments.last() else {
        return FieldKind::Other(type_name(path));
    };

    match &last.arguments {
        PathArguments::None => resolve_scalar_type(&last.ident.to_string())
            .map_or_else(|| FieldKind::Other(type_name(path)), FieldKind::Scalar),
        PathArguments::AngleBracketed(args) if last.ident == "Option" && args.args.len() == 1 => {
            match args.args.first() {
                Some(GenericArgument::Type(inner)) => match classify(inner) {
                    FieldKind::Scalar(scalar) => FieldKind::Scalar(scalar),
                    FieldKind::Other(_) => FieldKind::Other(type_name(path)),
                },
                _ => FieldKind::Other(type_name(path)),
            }
        }
        _ => FieldKind::Other(type_name(path)),
    }
}

fn type_name(ty: &impl ToTokens) -> String {
    ty.to_token_stream().to_string().replace(' ', "")
}
