//! End-to-end submit flow tests
//!
//! Exercises the full change → submit → error-map contract over a signup
//! form shaped like the demo this library grew out of: a name with a
//! pattern rule, an age with a custom predicate, a password with a length
//! predicate, and a gender select.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use formwork::{FieldDescriptor, FieldKind, FieldValue, FormState, FormStateBuilder, RuleSet};
use rstest::rstest;

fn signup_form() -> FormStateBuilder {
	FormState::builder()
		.field(FieldDescriptor::text("name").with_label("Name"))
		.field(FieldDescriptor::integer("age").with_label("Age"))
		.field(FieldDescriptor::text("password").with_label("Password"))
		.field(FieldDescriptor::choice(
			"gender",
			[
				("male", "Male"),
				("female", "Female"),
				("non-binary", "Non-binary"),
			],
		))
}

fn submit_counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	(calls, move || {
		counter.fetch_add(1, Ordering::SeqCst);
	})
}

// Every blank rendition of every kind must trip a required rule, and the
// callback must not run.
#[rstest]
#[case(FieldDescriptor::text("f"), Some(""))]
#[case(FieldDescriptor::text("f"), None)]
#[case(FieldDescriptor::integer("f"), Some("0"))]
#[case(FieldDescriptor::integer("f"), None)]
#[case(FieldDescriptor::float("f"), Some("0.0"))]
#[case(FieldDescriptor::boolean("f"), Some("false"))]
fn test_required_rejects_blank_values(
	#[case] field: FieldDescriptor,
	#[case] raw: Option<&str>,
) {
	// Arrange
	let (calls, on_submit) = submit_counter();
	let mut form = FormState::builder()
		.field(field)
		.validate("f", RuleSet::new().required("This field is required."))
		.on_submit(on_submit)
		.build()
		.unwrap();
	if let Some(raw) = raw {
		form.set_field("f", raw).unwrap();
	}

	// Act
	let outcome = form.submit();

	// Assert
	assert!(outcome.is_rejected());
	assert_eq!(form.error("f"), Some("This field is required."));
	assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[rstest]
#[case("Jane1", true)]
#[case("Jane Doe", true)]
#[case("Jane", false)]
#[case("", false)]
fn test_pattern_rule(#[case] raw: &str, #[case] rejected: bool) {
	// Arrange
	let mut form = signup_form()
		.validate(
			"name",
			RuleSet::new().pattern(
				"^[A-Za-z]*$",
				"You're not allowed to use special characters or numbers in your name.",
			),
		)
		.build()
		.unwrap();
	form.set_field("name", raw).unwrap();

	// Act
	let outcome = form.submit();

	// Assert
	assert_eq!(outcome.is_rejected(), rejected);
	assert_eq!(form.error("name").is_some(), rejected);
}

#[rstest]
fn test_last_failing_rule_message_wins() {
	// All three rules fail for the empty name: custom overrides pattern
	// overrides required.
	let mut form = signup_form()
		.validate(
			"name",
			RuleSet::new()
				.required("A name is required.")
				.pattern("^[A-Za-z]+$", "Letters only.")
				.custom(|_| false, "Computer says no."),
		)
		.build()
		.unwrap();
	form.set_field("name", "").unwrap();

	assert!(form.submit().is_rejected());
	assert_eq!(form.error("name"), Some("Computer says no."));
}

#[rstest]
fn test_pattern_overrides_required_without_custom() {
	let mut form = signup_form()
		.validate(
			"name",
			RuleSet::new()
				.required("A name is required.")
				.pattern("^[A-Za-z]+$", "Letters only."),
		)
		.build()
		.unwrap();

	assert!(form.submit().is_rejected());
	assert_eq!(form.error("name"), Some("Letters only."));
}

#[rstest]
fn test_submit_is_idempotent_without_intervening_changes() {
	// Arrange
	let mut form = signup_form()
		.validate("name", RuleSet::new().required("A name is required."))
		.validate(
			"age",
			RuleSet::new().custom(
				|v| v.and_then(FieldValue::as_integer).is_some_and(|age| age > 17),
				"You have to be at least 18 years old.",
			),
		)
		.build()
		.unwrap();
	form.set_field("age", "15").unwrap();

	// Act
	assert!(form.submit().is_rejected());
	let first = form.errors().clone();
	assert!(form.submit().is_rejected());

	// Assert
	assert_eq!(&first, form.errors());
}

#[rstest]
fn test_mutations_touch_only_their_field() {
	// Arrange
	let mut form = signup_form().initial("gender", "male").build().unwrap();

	// Act: independent mutations of distinct keys
	form.set_field("name", "Jane").unwrap();
	form.set_field("age", "21").unwrap();
	form.set_field("password", "hunter22").unwrap();

	// Assert: all three values present plus the untouched initial
	assert_eq!(form.data().len(), 4);
	assert_eq!(form.value("name"), Some(&FieldValue::from("Jane")));
	assert_eq!(form.value("age"), Some(&FieldValue::Integer(21)));
	assert_eq!(form.value("password"), Some(&FieldValue::from("hunter22")));
	assert_eq!(form.value("gender"), Some(&FieldValue::from("male")));
}

#[rstest]
fn test_scenario_age_gate() {
	// Arrange
	let (calls, on_submit) = submit_counter();
	let mut form = signup_form()
		.validate(
			"age",
			RuleSet::new().custom(
				|v| v.and_then(FieldValue::as_integer).is_some_and(|age| age > 17),
				"You have to be at least 18 years old.",
			),
		)
		.on_submit(on_submit)
		.build()
		.unwrap();

	// Act & Assert: under-age submit is rejected with the rule's message
	form.set_field("age", "15").unwrap();
	assert!(form.submit().is_rejected());
	assert_eq!(form.errors().len(), 1);
	assert_eq!(form.error("age"), Some("You have to be at least 18 years old."));
	assert_eq!(calls.load(Ordering::SeqCst), 0);

	// Of-age submit clears the error and fires the callback exactly once
	form.set_field("age", "21").unwrap();
	assert!(form.submit().is_submitted());
	assert!(form.errors().is_empty());
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_scenario_name_pattern_recovery() {
	let mut form = signup_form()
		.validate(
			"name",
			RuleSet::new().pattern("^[A-Za-z]*$", "No special characters."),
		)
		.build()
		.unwrap();

	form.set_field("name", "Jane1").unwrap();
	assert!(form.submit().is_rejected());
	assert!(form.error("name").is_some());

	form.set_field("name", "Jane").unwrap();
	assert!(form.submit().is_submitted());
	assert!(form.error("name").is_none());
}

#[rstest]
fn test_scenario_no_rules_always_submits() {
	// Arrange
	let (calls, on_submit) = submit_counter();
	let mut form = signup_form().on_submit(on_submit).build().unwrap();

	// Act & Assert: whatever the data, submit passes and fires
	assert!(form.submit().is_submitted());
	form.set_field("name", "!!!").unwrap();
	form.set_field("age", "0").unwrap();
	assert!(form.submit().is_submitted());

	assert!(form.errors().is_empty());
	assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[rstest]
fn test_bound_fields_render_the_demo_form() {
	// The presentational contract end to end: labels, required markers,
	// select options, and error text all come from one view.
	let mut form = signup_form()
		.validate("password", RuleSet::new().required("A password is required."))
		.build()
		.unwrap();
	form.set_field("gender", "non-binary").unwrap();
	form.submit();

	let password = form.bound_field("password").unwrap();
	assert_eq!(password.label(), Some("Password"));
	assert!(password.required());
	assert_eq!(password.error(), Some("A password is required."));

	let gender = form.bound_field("gender").unwrap();
	assert_eq!(gender.kind(), FieldKind::Choice);
	assert_eq!(gender.options().len(), 3);
	assert!(gender.is_selected("non-binary"));
	assert!(!gender.required());
}
