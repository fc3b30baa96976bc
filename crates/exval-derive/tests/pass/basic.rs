// Test a plain struct derives and validates
use exval::{Describe, ExpressionRule, ScalarType};

#[derive(Describe)]
struct Range {
    low: i32,
    high: i32,
    label: String,
}

fn main() {
    let descriptor = Range::descriptor();
    assert_eq!(descriptor.type_name(), "Range");
    assert_eq!(descriptor.members().len(), 3);
    assert_eq!(
        descriptor.member("low").and_then(|m| m.member_type().scalar()),
        Some(ScalarType::Int32)
    );

    let range = Range {
        low: 1,
        high: 5,
        label: String::from("r"),
    };
    let _ = &range.label;
    let outcome = ExpressionRule::new("low < high").validate(&range, None).unwrap();
    assert!(outcome.is_success());
}
