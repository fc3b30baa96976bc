use proc_macro::TokenStream;
use syn::DeriveInput;

mod codegen;
mod input;
mod validate;

/// Derive `exval::Describe` for a struct with named fields.
///
/// Each field becomes a member of the type's descriptor. Fields whose type
/// is a recognized scalar (integers up to 64 bits, `f32`, `f64`, `bool`,
/// `char`, `String`, or `Option` of one of those) bind into expressions;
/// any other field is still listed but never bound.
///
/// # Options
///
/// - `#[describe(rename = "Name")]` on the struct: type name used in
///   failure messages when no member is named.
/// - `#[describe(rename = "Name")]` on a field: member name seen by
///   expressions.
/// - `#[describe(read_only)]`: member is listed but not bound.
/// - `#[describe(skip)]`: field is left out of the descriptor.
///
/// # Example
///
/// ```ignore
/// #[derive(Describe)]
/// struct Range {
///     #[describe(rename = "Low")]
///     low: i32,
///     #[describe(rename = "High")]
///     high: i32,
///     #[describe(read_only)]
///     span: i32,
/// }
/// ```
#[proc_macro_derive(Describe, attributes(describe))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let derive = syn::parse_macro_input!(input as DeriveInput);

    let (input, unknown) = match input::MacroInput::from_derive(&derive) {
        Ok(parsed) => parsed,
        Err(e) => return e.to_compile_error().into(),
    };

    if let Err(e) = validate::validate(&input, &unknown) {
        return e.to_compile_error().into();
    }

    codegen::codegen(&input).into()
}
