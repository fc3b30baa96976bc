// Test rename, read_only and skip options
use exval::{Describe, ExpressionRule};

#[derive(Describe)]
#[describe(rename = "Account")]
struct AccountRecord {
    #[describe(rename = "Balance")]
    balance: i64,
    #[describe(read_only)]
    id: u64,
    #[describe(skip)]
    cache: Vec<u8>,
    history: Vec<i64>,
}

fn main() {
    let descriptor = AccountRecord::descriptor();
    assert_eq!(descriptor.type_name(), "Account");
    assert!(descriptor.member("Balance").is_some());
    assert!(descriptor.member("id").unwrap().is_read_only());
    assert!(descriptor.member("cache").is_none());
    assert!(descriptor.member("history").unwrap().member_type().scalar().is_none());

    let account = AccountRecord {
        balance: -3,
        id: 7,
        cache: Vec::new(),
        history: Vec::new(),
    };
    let _ = (&account.cache, &account.history, account.id);

    let failure = ExpressionRule::new("Balance >= 0")
        .validate(&account, None)
        .unwrap();
    assert_eq!(
        failure.failure().unwrap().message,
        "The field Account is invalid."
    );
}
