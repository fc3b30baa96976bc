//! Member descriptors: the statically typed stand-in for runtime reflection.
//!
//! A [`TypeDescriptor`] lists a type's members once, with their declared type,
//! access mode and an accessor reading the current value from an instance.
//! It is built once per type and reused for every instance validated.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use exval_semantics::ScalarType;

use super::Value;

type Accessor<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Declared type of a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberType {
    /// A primitive scalar or string; bindable as a column.
    Scalar(ScalarType),
    /// Any other type (collections, nested objects, timestamps, ...).
    Other(String),
}

impl MemberType {
    pub fn scalar(&self) -> Option<ScalarType> {
        match self {
            MemberType::Scalar(ty) => Some(*ty),
            MemberType::Other(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            MemberType::Scalar(ty) => ty.name(),
            MemberType::Other(name) => name,
        }
    }
}

/// Whether a member can be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    #[default]
    ReadWrite,
    ReadOnly,
}

/// One member of a described type.
pub struct MemberDescriptor<T> {
    name: String,
    member_type: MemberType,
    access: Access,
    accessor: Option<Accessor<T>>,
}

impl<T> MemberDescriptor<T> {
    /// A writable scalar member read through `accessor`.
    pub fn scalar(
        name: impl Into<String>,
        ty: ScalarType,
        accessor: impl Fn(&T) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            member_type: MemberType::Scalar(ty),
            access: Access::ReadWrite,
            accessor: Some(Arc::new(accessor)),
        }
    }

    /// A member whose type is not bindable. It is never read.
    pub fn other(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            member_type: MemberType::Other(type_name.into()),
            access: Access::ReadWrite,
            accessor: None,
        }
    }

    /// Marks this member read-only.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.access = Access::ReadOnly;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member_type(&self) -> &MemberType {
        &self.member_type
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn is_read_only(&self) -> bool {
        self.access == Access::ReadOnly
    }

    /// Read the member's current value from `instance`.
    ///
    /// Members without an accessor read as `Null`.
    pub fn read(&self, instance: &T) -> Value {
        self.accessor
            .as_ref()
            .map_or(Value::Null, |accessor| accessor(instance))
    }
}

impl<T> Clone for MemberDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            member_type: self.member_type.clone(),
            access: self.access,
            accessor: self.accessor.clone(),
        }
    }
}

impl<T> Debug for MemberDescriptor<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("member_type", &self.member_type)
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

/// The member list of a type, in declaration order.
///
/// # Example
///
/// ```
/// use exval::{MemberDescriptor, ScalarType, TypeDescriptor};
///
/// struct Order {
///     quantity: u32,
///     id: u64,
///     lines: Vec<String>,
/// }
///
/// let descriptor = TypeDescriptor::new("Order")
///     .with_member(MemberDescriptor::scalar("Quantity", ScalarType::UInt32, |o: &Order| {
///         o.quantity.into()
///     }))
///     .with_member(
///         MemberDescriptor::scalar("Id", ScalarType::UInt64, |o: &Order| o.id.into()).read_only(),
///     )
///     .with_member(MemberDescriptor::other("Lines", "Vec<String>"));
///
/// assert_eq!(descriptor.members().len(), 3);
/// assert!(descriptor.member("Id").unwrap().is_read_only());
/// ```
pub struct TypeDescriptor<T> {
    type_name: String,
    members: Vec<MemberDescriptor<T>>,
}

impl<T> TypeDescriptor<T> {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            members: Vec::new(),
        }
    }

    /// Adds a member, returning the descriptor for chaining.
    #[must_use]
    pub fn with_member(mut self, member: MemberDescriptor<T>) -> Self {
        self.members.push(member);
        self
    }

    pub fn push(&mut self, member: MemberDescriptor<T>) {
        self.members.push(member);
    }

    /// Name of the described type, used in failure messages when no member
    /// name is supplied.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn members(&self) -> &[MemberDescriptor<T>] {
        &self.members
    }

    /// Look up a member by exact name.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor<T>> {
        self.members.iter().find(|m| m.name == name)
    }
}

impl<T> Clone for TypeDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name.clone(),
            members: self.members.clone(),
        }
    }
}

impl<T> Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("members", &self.members)
            .finish()
    }
}

/// Types that can describe their own members.
///
/// Usually implemented with `#[derive(Describe)]`.
pub trait Describe: Sized + 'static {
    fn descriptor() -> &'static TypeDescriptor<Self>;
}

/// A (name, column type, current value) triple for one eligible member.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub ty: ScalarType,
    pub value: Value,
}

impl Binding {
    pub fn new(name: impl Into<String>, ty: ScalarType, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            ty,
            value: value.into(),
        }
    }
}
