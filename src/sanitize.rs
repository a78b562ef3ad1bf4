//! Raw input conversion
//!
//! Sanitizers are pure `&str -> typed value` conversions configured per
//! field and run on every change event. `Ok(None)` means the user cleared
//! the field: the form removes the entry instead of storing an empty
//! value, so a later `required` check sees the field as missing.

use crate::field::{FieldKind, FieldValue};

/// Outcome of a sanitizer run. `Err` carries a human-readable reason and
/// leaves the form's data untouched.
pub type SanitizeResult = Result<Option<FieldValue>, String>;

/// A pure conversion from raw UI input to a typed value.
///
/// Plain function pointers keep [`FieldDescriptor`] cheap to clone and
/// debug-print; capture-free closures coerce automatically.
///
/// [`FieldDescriptor`]: crate::FieldDescriptor
pub type Sanitizer = fn(&str) -> SanitizeResult;

/// Identity conversion for text fields. Stores the input as typed, empty
/// string included.
///
/// # Examples
///
/// ```
/// use formwork::{FieldValue, sanitize};
///
/// assert_eq!(sanitize::text("Jane"), Ok(Some(FieldValue::Text("Jane".into()))));
/// assert_eq!(sanitize::text(""), Ok(Some(FieldValue::Text(String::new()))));
/// ```
pub fn text(raw: &str) -> SanitizeResult {
	Ok(Some(FieldValue::Text(raw.to_string())))
}

/// Like [`text`], with surrounding whitespace stripped.
///
/// # Examples
///
/// ```
/// use formwork::{FieldValue, sanitize};
///
/// assert_eq!(sanitize::trimmed("  Jane "), Ok(Some(FieldValue::Text("Jane".into()))));
/// ```
pub fn trimmed(raw: &str) -> SanitizeResult {
	Ok(Some(FieldValue::Text(raw.trim().to_string())))
}

/// Parse a whole number. Empty input clears the field.
///
/// # Examples
///
/// ```
/// use formwork::{FieldValue, sanitize};
///
/// assert_eq!(sanitize::integer("21"), Ok(Some(FieldValue::Integer(21))));
/// assert_eq!(sanitize::integer("  -3 "), Ok(Some(FieldValue::Integer(-3))));
/// assert_eq!(sanitize::integer(""), Ok(None));
/// assert!(sanitize::integer("abc").is_err());
/// ```
pub fn integer(raw: &str) -> SanitizeResult {
	let raw = raw.trim();
	if raw.is_empty() {
		return Ok(None);
	}
	raw.parse::<i64>()
		.map(|n| Some(FieldValue::Integer(n)))
		.map_err(|_| "Enter a whole number".to_string())
}

/// Parse a floating-point number. Empty input clears the field;
/// non-finite values are rejected.
///
/// # Examples
///
/// ```
/// use formwork::{FieldValue, sanitize};
///
/// assert_eq!(sanitize::float("2.5"), Ok(Some(FieldValue::Float(2.5))));
/// assert_eq!(sanitize::float("1e3"), Ok(Some(FieldValue::Float(1000.0))));
/// assert_eq!(sanitize::float(""), Ok(None));
/// assert!(sanitize::float("inf").is_err());
/// ```
pub fn float(raw: &str) -> SanitizeResult {
	let raw = raw.trim();
	if raw.is_empty() {
		return Ok(None);
	}
	let parsed = raw
		.parse::<f64>()
		.map_err(|_| "Enter a number".to_string())?;
	if !parsed.is_finite() {
		return Err("Enter a valid number".to_string());
	}
	Ok(Some(FieldValue::Float(parsed)))
}

/// Parse a boolean from the spellings checkbox and select widgets emit.
///
/// # Examples
///
/// ```
/// use formwork::{FieldValue, sanitize};
///
/// assert_eq!(sanitize::boolean("on"), Ok(Some(FieldValue::Boolean(true))));
/// assert_eq!(sanitize::boolean("FALSE"), Ok(Some(FieldValue::Boolean(false))));
/// assert_eq!(sanitize::boolean(""), Ok(None));
/// assert!(sanitize::boolean("maybe").is_err());
/// ```
pub fn boolean(raw: &str) -> SanitizeResult {
	let raw = raw.trim();
	if raw.is_empty() {
		return Ok(None);
	}
	match raw.to_ascii_lowercase().as_str() {
		"true" | "on" | "1" | "yes" => Ok(Some(FieldValue::Boolean(true))),
		"false" | "off" | "0" | "no" => Ok(Some(FieldValue::Boolean(false))),
		_ => Err("Enter a yes or no value".to_string()),
	}
}

/// Default conversion for a declared kind.
pub(crate) fn default_for(kind: FieldKind) -> Sanitizer {
	match kind {
		FieldKind::Text | FieldKind::Choice => text,
		FieldKind::Integer => integer,
		FieldKind::Float => float,
		FieldKind::Boolean => boolean,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("21", Some(21))]
	#[case("  21  ", Some(21))]
	#[case("-3", Some(-3))]
	#[case("0", Some(0))]
	#[case("", None)]
	#[case("   ", None)]
	fn test_integer_accepts(#[case] raw: &str, #[case] expected: Option<i64>) {
		assert_eq!(integer(raw), Ok(expected.map(FieldValue::Integer)));
	}

	#[rstest]
	#[case("abc")]
	#[case("2.5")]
	#[case("1e3")]
	#[case("15 years")]
	fn test_integer_rejects(#[case] raw: &str) {
		assert!(integer(raw).is_err());
	}

	#[rstest]
	#[case("2.5", 2.5)]
	#[case("42", 42.0)]
	#[case("-1e-3", -0.001)]
	fn test_float_accepts(#[case] raw: &str, #[case] expected: f64) {
		assert_eq!(float(raw), Ok(Some(FieldValue::Float(expected))));
	}

	#[rstest]
	#[case("inf")]
	#[case("-inf")]
	#[case("NaN")]
	#[case("abc")]
	fn test_float_rejects_non_finite_and_junk(#[case] raw: &str) {
		assert!(float(raw).is_err());
	}

	#[rstest]
	fn test_text_keeps_empty_string() {
		// A text field the user emptied still holds Text("") so required
		// falsiness matches the source system.
		assert_eq!(text(""), Ok(Some(FieldValue::Text(String::new()))));
	}

	#[rstest]
	fn test_trimmed_strips() {
		assert_eq!(trimmed(" a b \t"), Ok(Some(FieldValue::Text("a b".into()))));
	}

	#[rstest]
	#[case("true", true)]
	#[case("ON", true)]
	#[case("yes", true)]
	#[case("1", true)]
	#[case("false", false)]
	#[case("off", false)]
	#[case("0", false)]
	fn test_boolean_spellings(#[case] raw: &str, #[case] expected: bool) {
		assert_eq!(boolean(raw), Ok(Some(FieldValue::Boolean(expected))));
	}

	#[rstest]
	fn test_defaults_match_kind() {
		assert_eq!(default_for(FieldKind::Integer)("7"), Ok(Some(FieldValue::Integer(7))));
		assert_eq!(
			default_for(FieldKind::Choice)("male"),
			Ok(Some(FieldValue::Text("male".into())))
		);
	}
}
