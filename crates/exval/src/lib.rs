//! Declarative boolean invariants over an object's own members.
//!
//! An expression such as `PropertyA > PropertyB` or `{0} <> NULL` is
//! normalized into canonical predicate grammar, bound against the candidate's
//! writable scalar members, and evaluated with three-valued NULL logic.
//!
//! # Example
//!
//! ```
//! use exval::{Describe, ExpressionRule, templates};
//!
//! #[derive(Describe)]
//! struct Person {
//!     #[describe(rename = "Age")]
//!     age: u32,
//! }
//!
//! let rule = ExpressionRule::new(templates::IS_ODD);
//! assert!(rule.validate(&Person { age: 5 }, Some("Age")).unwrap().is_success());
//! assert!(!rule.validate(&Person { age: 4 }, Some("Age")).unwrap().is_success());
//! ```

mod enumerate;
pub mod interpreter;
mod normalize;
pub mod parser;
pub mod templates;
pub mod types;
mod validator;

pub use enumerate::eligible_bindings;
pub use interpreter::{EvalError, EvalOptions, evaluate};
pub use normalize::{MEMBER_PLACEHOLDER, normalize};
pub use types::{
    Access, Binding, Describe, MemberDescriptor, MemberType, ScalarType, TypeDescriptor, Value,
    resolve_column_type,
};
pub use validator::{ExpressionRule, ValidateError, ValidationFailure, ValidationOutcome, validate};

// Re-export the Describe derive
pub use exval_derive::Describe;
