// Test Option fields bind as nullable scalars
use exval::{Describe, ExpressionRule, ScalarType, templates};

#[derive(Describe)]
struct Contact {
    #[describe(rename = "Email")]
    email: Option<String>,
    #[describe(rename = "Age")]
    age: Option<u8>,
}

fn main() {
    let descriptor = Contact::descriptor();
    assert_eq!(
        descriptor.member("Age").and_then(|m| m.member_type().scalar()),
        Some(ScalarType::UInt8)
    );

    let empty = Contact {
        email: None,
        age: None,
    };
    let rule = ExpressionRule::new(templates::IS_NOT_NULL);
    assert!(!rule.validate(&empty, Some("Email")).unwrap().is_success());
    assert!(ExpressionRule::new(templates::IS_NULL)
        .validate(&empty, Some("Age"))
        .unwrap()
        .is_success());

    let filled = Contact {
        email: Some(String::from("a@b.c")),
        age: Some(30),
    };
    assert!(rule.validate(&filled, Some("Email")).unwrap().is_success());
}
