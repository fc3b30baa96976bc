//! Selects the members of a candidate instance that may appear as operands.

use crate::types::{Binding, TypeDescriptor};

/// Read the current value of every eligible member of `instance`.
///
/// A member is eligible when it is writable and its type is a scalar
/// (boolean, integer, floating point, character or string). Values are read
/// on every call; nothing is cached between calls.
pub fn eligible_bindings<T>(descriptor: &TypeDescriptor<T>, instance: &T) -> Vec<Binding> {
    descriptor
        .members()
        .iter()
        .filter_map(|member| {
            if member.is_read_only() {
                tracing::trace!(member = member.name(), "skipping read-only member");
                return None;
            }
            let Some(ty) = member.member_type().scalar() else {
                tracing::trace!(
                    member = member.name(),
                    member_type = member.member_type().name(),
                    "skipping non-scalar member"
                );
                return None;
            };
            Some(Binding {
                name: member.name().to_string(),
                ty,
                value: member.read(instance),
            })
        })
        .collect()
}
