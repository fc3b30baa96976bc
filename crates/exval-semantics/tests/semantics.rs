use exval_semantics::{ScalarType, resolve_column_type, resolve_scalar_type};

#[test]
fn primitive_names_resolve() {
    assert_eq!(resolve_scalar_type("bool"), Some(ScalarType::Boolean));
    assert_eq!(resolve_scalar_type("i32"), Some(ScalarType::Int32));
    assert_eq!(resolve_scalar_type("usize"), Some(ScalarType::UIntPtr));
    assert_eq!(resolve_scalar_type("f32"), Some(ScalarType::Float32));
    assert_eq!(resolve_scalar_type("char"), Some(ScalarType::Char));
    assert_eq!(resolve_scalar_type("String"), Some(ScalarType::String));
}

#[test]
fn qualified_paths_resolve_by_last_segment() {
    assert_eq!(
        resolve_scalar_type("std::string::String"),
        Some(ScalarType::String)
    );
    assert_eq!(
        resolve_scalar_type("core::primitive::u16"),
        Some(ScalarType::UInt16)
    );
}

#[test]
fn non_scalar_types_are_rejected() {
    for name in ["i128", "u128", "Vec", "HashMap", "str", "SystemTime", "Option"] {
        assert_eq!(resolve_scalar_type(name), None, "{name} should not be scalar");
    }
}

#[test]
fn every_scalar_type_round_trips_its_names() {
    for ty in ScalarType::ALL {
        assert_eq!(resolve_scalar_type(ty.rust_name()), Some(ty), "{ty}");
        assert_eq!(resolve_column_type(ty.name()), Some(ty), "{ty}");
    }
}

#[test]
fn integer_ranges_match_primitives() {
    assert_eq!(ScalarType::Int8.integer_range(), Some((-128, 127)));
    assert_eq!(ScalarType::UInt8.integer_range(), Some((0, 255)));
    assert_eq!(
        ScalarType::UInt64.integer_range(),
        Some((0, i128::from(u64::MAX)))
    );
    assert_eq!(ScalarType::Float64.integer_range(), None);
    assert!(ScalarType::Float32.is_float());
    assert!(ScalarType::IntPtr.is_integer());
    assert!(!ScalarType::String.is_integer());
}

#[test]
fn column_type_names_are_case_insensitive() {
    assert_eq!(resolve_column_type("int64"), Some(ScalarType::Int64));
    assert_eq!(resolve_column_type("BOOLEAN"), Some(ScalarType::Boolean));
    assert_eq!(resolve_column_type("Decimal"), None);
}
