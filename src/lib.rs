//! Form state handling and declarative submit-time validation
//!
//! This crate provides a framework-agnostic form core:
//! - Typed field declarations with fail-fast configuration checking
//! - Declarative per-field rules (required, pattern, custom predicate)
//! - Atomic submit-time validation with a wholesale-recomputed error map
//! - A submit callback gated behind validation
//! - Read-only bound-field views for presentational wrappers
//!
//! The form itself performs no rendering and owns no event loop: UI glue
//! feeds raw change strings into [`FormState::set_field`], calls
//! [`FormState::submit`] on the submit gesture (after suppressing its
//! toolkit's default action), and renders from [`FormState::bound_field`]
//! views.
//!
//! # Examples
//!
//! ```
//! use formwork::{FieldDescriptor, FieldValue, FormState, RuleSet};
//!
//! let mut form = FormState::builder()
//! 	.field(FieldDescriptor::text("name").with_label("Name"))
//! 	.field(FieldDescriptor::integer("age"))
//! 	.field(FieldDescriptor::text("password").with_label("Password"))
//! 	.validate(
//! 		"name",
//! 		RuleSet::new().pattern(
//! 			"^[A-Za-z]*$",
//! 			"You're not allowed to use special characters or numbers in your name.",
//! 		),
//! 	)
//! 	.validate(
//! 		"age",
//! 		RuleSet::new().custom(
//! 			|v| v.and_then(FieldValue::as_integer).is_some_and(|age| age > 17),
//! 			"You have to be at least 18 years old.",
//! 		),
//! 	)
//! 	.validate(
//! 		"password",
//! 		RuleSet::new().custom(
//! 			|v| v.and_then(FieldValue::as_text).is_some_and(|p| p.len() > 6),
//! 			"The password needs to be at least 6 characters long.",
//! 		),
//! 	)
//! 	.build()
//! 	.unwrap();
//!
//! form.set_field("name", "Jane").unwrap();
//! form.set_field("age", "15").unwrap();
//! form.set_field("password", "hunter22").unwrap();
//!
//! assert!(form.submit().is_rejected());
//! assert_eq!(form.error("age"), Some("You have to be at least 18 years old."));
//!
//! form.set_field("age", "21").unwrap();
//! assert!(form.submit().is_submitted());
//! ```

pub mod bound_field;
pub mod field;
pub mod form;
pub mod rules;
pub mod sanitize;

pub use bound_field::BoundField;
pub use field::{ChoiceOption, FieldDescriptor, FieldKind, FieldValue};
pub use form::{
	ConfigError, FormError, FormEvent, FormState, FormStateBuilder, SubmitOutcome,
};
pub use rules::{Predicate, RuleSet};
pub use sanitize::{SanitizeResult, Sanitizer};
