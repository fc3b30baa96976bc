mod descriptor;
mod value;

pub use descriptor::{Access, Binding, Describe, MemberDescriptor, MemberType, TypeDescriptor};
pub use exval_semantics::{ScalarType, resolve_column_type};
pub use value::Value;
