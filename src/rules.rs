//! Declarative per-field validation rules
//!
//! A [`RuleSet`] is plain configuration data: an optional `required`
//! check, an optional regex `pattern`, and an optional `custom` predicate,
//! each with its own message. The builder compiles rule sets into
//! [`CompiledRules`] at construction time, so a malformed pattern or a
//! pattern on a non-text field fails fast instead of at the first submit.
//!
//! Evaluation never short-circuits: every configured rule runs on every
//! submit attempt, and when several fail the message of the last one
//! (required, then pattern, then custom) is the one that survives.

use regex::Regex;

use crate::field::{FieldKind, FieldValue};
use crate::form::ConfigError;

/// A custom validation predicate over the field's current value.
///
/// The value is `None` when the field has no entry; predicates decide for
/// themselves whether absence passes.
pub type Predicate = Box<dyn Fn(Option<&FieldValue>) -> bool + Send + Sync>;

/// Declarative checks for one field, built with chained calls.
///
/// # Examples
///
/// ```
/// use formwork::RuleSet;
///
/// let rules = RuleSet::new()
/// 	.required("A name is required.")
/// 	.pattern("^[A-Za-z]*$", "You're not allowed to use special characters or numbers in your name.");
/// ```
#[derive(Default)]
pub struct RuleSet {
	pub(crate) required: Option<String>,
	pub(crate) pattern: Option<(String, String)>,
	pub(crate) custom: Option<(Predicate, String)>,
}

impl RuleSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fail with `message` when the value is missing or blank.
	///
	/// Blankness keeps the source system's semantics: empty string, zero,
	/// `false`, and an absent entry all count as missing (see
	/// [`FieldValue::is_blank`]).
	pub fn required(mut self, message: impl Into<String>) -> Self {
		self.required = Some(message.into());
		self
	}

	/// Fail with `message` when the text value does not match `source`.
	///
	/// The source is compiled when the form is built; an invalid
	/// expression or a pattern on a non-text field is a [`ConfigError`].
	/// An absent value is matched as the empty string.
	pub fn pattern(mut self, source: impl Into<String>, message: impl Into<String>) -> Self {
		self.pattern = Some((source.into(), message.into()));
		self
	}

	/// Fail with `message` when `predicate` returns false.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{FieldValue, RuleSet};
	///
	/// let rules = RuleSet::new().custom(
	/// 	|value| value.and_then(FieldValue::as_integer).is_some_and(|age| age > 17),
	/// 	"You have to be at least 18 years old.",
	/// );
	/// ```
	pub fn custom(
		mut self,
		predicate: impl Fn(Option<&FieldValue>) -> bool + Send + Sync + 'static,
		message: impl Into<String>,
	) -> Self {
		self.custom = Some((Box::new(predicate), message.into()));
		self
	}

	pub fn is_empty(&self) -> bool {
		self.required.is_none() && self.pattern.is_none() && self.custom.is_none()
	}
}

/// A rule set with its pattern compiled, ready for submit-time checks.
pub(crate) struct CompiledRules {
	required: Option<String>,
	pattern: Option<(Regex, String)>,
	custom: Option<(Predicate, String)>,
}

impl CompiledRules {
	pub(crate) fn compile(
		rules: RuleSet,
		field: &str,
		kind: FieldKind,
	) -> Result<Self, ConfigError> {
		let pattern = match rules.pattern {
			Some((source, message)) => {
				if !kind.is_textual() {
					return Err(ConfigError::PatternOnNonText {
						field: field.to_string(),
						kind,
					});
				}
				let regex = Regex::new(&source).map_err(|error| ConfigError::BadPattern {
					field: field.to_string(),
					source: error,
				})?;
				Some((regex, message))
			}
			None => None,
		};

		Ok(Self {
			required: rules.required,
			pattern,
			custom: rules.custom,
		})
	}

	pub(crate) fn has_required(&self) -> bool {
		self.required.is_some()
	}

	/// Run every configured rule against the current value.
	///
	/// Returns the message of the last rule that failed, or `None` when
	/// the field passes this attempt.
	pub(crate) fn check(&self, value: Option<&FieldValue>) -> Option<String> {
		let mut failure = None;

		if let Some(message) = &self.required
			&& value.is_none_or(FieldValue::is_blank)
		{
			failure = Some(message.clone());
		}

		if let Some((regex, message)) = &self.pattern {
			let text = value.and_then(FieldValue::as_text).unwrap_or("");
			if !regex.is_match(text) {
				failure = Some(message.clone());
			}
		}

		if let Some((predicate, message)) = &self.custom
			&& !predicate(value)
		{
			failure = Some(message.clone());
		}

		failure
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn compiled(rules: RuleSet) -> CompiledRules {
		CompiledRules::compile(rules, "field", FieldKind::Text).unwrap()
	}

	#[rstest]
	fn test_required_failure_message() {
		// Arrange
		let rules = compiled(RuleSet::new().required("missing"));

		// Act & Assert
		assert_eq!(rules.check(None), Some("missing".to_string()));
		assert_eq!(
			rules.check(Some(&FieldValue::Text(String::new()))),
			Some("missing".to_string())
		);
		assert_eq!(rules.check(Some(&FieldValue::from("x"))), None);
	}

	#[rstest]
	fn test_pattern_overwrites_required() {
		// Both rules fail for the empty value; the later rule's message
		// must win.
		let rules = compiled(
			RuleSet::new()
				.required("missing")
				.pattern("^[a-z]+$", "lowercase only"),
		);

		assert_eq!(rules.check(None), Some("lowercase only".to_string()));
	}

	#[rstest]
	fn test_custom_overwrites_pattern() {
		let rules = compiled(
			RuleSet::new()
				.required("missing")
				.pattern("^[a-z]+$", "lowercase only")
				.custom(|_| false, "never valid"),
		);

		assert_eq!(rules.check(None), Some("never valid".to_string()));
		assert_eq!(
			rules.check(Some(&FieldValue::from("ok"))),
			Some("never valid".to_string())
		);
	}

	#[rstest]
	fn test_earlier_failure_survives_when_later_rules_pass() {
		let rules = compiled(
			RuleSet::new()
				.pattern("^[a-z]*$", "lowercase only")
				.custom(|_| true, "unused"),
		);

		assert_eq!(
			rules.check(Some(&FieldValue::from("ABC"))),
			Some("lowercase only".to_string())
		);
	}

	#[rstest]
	fn test_absent_value_matches_pattern_as_empty_string() {
		// "^[A-Za-z]*$" accepts the empty string, so an absent optional
		// field passes.
		let rules = compiled(RuleSet::new().pattern("^[A-Za-z]*$", "letters only"));
		assert_eq!(rules.check(None), None);

		// A pattern demanding at least one character fails on absence.
		let rules = compiled(RuleSet::new().pattern("^[A-Za-z]+$", "letters only"));
		assert_eq!(rules.check(None), Some("letters only".to_string()));
	}

	#[rstest]
	fn test_custom_predicate_sees_absence() {
		let rules = compiled(RuleSet::new().custom(
			|value| value.and_then(FieldValue::as_integer).is_some_and(|n| n > 17),
			"too young",
		));

		assert_eq!(rules.check(None), Some("too young".to_string()));
		assert_eq!(rules.check(Some(&FieldValue::Integer(15))), Some("too young".to_string()));
		assert_eq!(rules.check(Some(&FieldValue::Integer(21))), None);
	}

	#[rstest]
	fn test_pattern_rejected_on_numeric_field() {
		let result = CompiledRules::compile(
			RuleSet::new().pattern("^\\d+$", "digits"),
			"age",
			FieldKind::Integer,
		);

		assert!(matches!(result, Err(ConfigError::PatternOnNonText { .. })));
	}

	#[rstest]
	fn test_malformed_pattern_is_config_error() {
		let result = CompiledRules::compile(
			RuleSet::new().pattern("[unclosed", "bad"),
			"name",
			FieldKind::Text,
		);

		assert!(matches!(result, Err(ConfigError::BadPattern { .. })));
	}

	#[rstest]
	fn test_empty_ruleset() {
		assert!(RuleSet::new().is_empty());
		assert!(!RuleSet::new().required("x").is_empty());

		let rules = compiled(RuleSet::new());
		assert_eq!(rules.check(None), None);
	}
}
