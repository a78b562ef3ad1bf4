//! Field declarations: kinds, typed values, and presentation metadata
//!
//! A form is built from an ordered list of [`FieldDescriptor`]s. Each
//! descriptor fixes the field's name, its declared [`FieldKind`], the
//! metadata presentational wrappers render (label, help text, choice
//! options), and the sanitizer that turns raw UI input into a typed
//! [`FieldValue`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sanitize::{self, Sanitizer};

/// Declared value type of a form field.
///
/// The kind is fixed at declaration time and every stored value must
/// conform to it. Presentational consumers use it the way a widget type
/// would be used: `Text` maps to a text input, `Integer`/`Float` to a
/// number input, `Boolean` to a checkbox, `Choice` to a select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
	Text,
	Integer,
	Float,
	Boolean,
	/// Text restricted to a declared option list; values are stored as
	/// [`FieldValue::Text`].
	Choice,
}

impl FieldKind {
	/// Whether values of this kind are stored as text.
	///
	/// Pattern rules may only be attached to textual fields.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::FieldKind;
	///
	/// assert!(FieldKind::Text.is_textual());
	/// assert!(FieldKind::Choice.is_textual());
	/// assert!(!FieldKind::Integer.is_textual());
	/// ```
	pub fn is_textual(&self) -> bool {
		matches!(self, FieldKind::Text | FieldKind::Choice)
	}

	/// Whether a value conforms to this declared kind.
	pub(crate) fn accepts(&self, value: &FieldValue) -> bool {
		match self {
			FieldKind::Text | FieldKind::Choice => matches!(value, FieldValue::Text(_)),
			FieldKind::Integer => matches!(value, FieldValue::Integer(_)),
			FieldKind::Float => matches!(value, FieldValue::Float(_)),
			FieldKind::Boolean => matches!(value, FieldValue::Boolean(_)),
		}
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			FieldKind::Text => "text",
			FieldKind::Integer => "integer",
			FieldKind::Float => "float",
			FieldKind::Boolean => "boolean",
			FieldKind::Choice => "choice",
		};
		f.write_str(name)
	}
}

/// A typed field value.
///
/// The closed enum replaces the anything-goes value slot of loosely typed
/// form stores: a field only ever holds a value of its declared kind, and
/// conversions from raw input happen in one declared place (the field's
/// sanitizer).
///
/// # Examples
///
/// ```
/// use formwork::FieldValue;
///
/// let v = FieldValue::from("Jane");
/// assert_eq!(v.as_text(), Some("Jane"));
/// assert_eq!(v.to_string(), "Jane");
///
/// let n = FieldValue::from(21);
/// assert_eq!(n.as_integer(), Some(21));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
	Text(String),
	Integer(i64),
	Float(f64),
	Boolean(bool),
}

impl FieldValue {
	/// The kind this value conforms to.
	///
	/// `Text` values report [`FieldKind::Text`] even when stored in a
	/// choice field; the descriptor, not the value, knows about options.
	pub fn kind(&self) -> FieldKind {
		match self {
			FieldValue::Text(_) => FieldKind::Text,
			FieldValue::Integer(_) => FieldKind::Integer,
			FieldValue::Float(_) => FieldKind::Float,
			FieldValue::Boolean(_) => FieldKind::Boolean,
		}
	}

	/// Whether a `required` rule treats this value as missing.
	///
	/// Preserves the source system's falsiness exactly: the empty string,
	/// integer `0`, float `0.0`, and `false` all count as blank. An absent
	/// entry is handled by the caller (`Option::is_none_or`).
	///
	/// # Examples
	///
	/// ```
	/// use formwork::FieldValue;
	///
	/// assert!(FieldValue::Text(String::new()).is_blank());
	/// assert!(FieldValue::Integer(0).is_blank());
	/// assert!(FieldValue::Boolean(false).is_blank());
	/// assert!(!FieldValue::Text("x".into()).is_blank());
	/// assert!(!FieldValue::Float(0.5).is_blank());
	/// ```
	pub fn is_blank(&self) -> bool {
		match self {
			FieldValue::Text(s) => s.is_empty(),
			FieldValue::Integer(n) => *n == 0,
			FieldValue::Float(x) => *x == 0.0,
			FieldValue::Boolean(b) => !b,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			FieldValue::Text(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_integer(&self) -> Option<i64> {
		match self {
			FieldValue::Integer(n) => Some(*n),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			FieldValue::Float(x) => Some(*x),
			FieldValue::Integer(n) => Some(*n as f64),
			_ => None,
		}
	}

	pub fn as_boolean(&self) -> Option<bool> {
		match self {
			FieldValue::Boolean(b) => Some(*b),
			_ => None,
		}
	}

	/// Convert into the equivalent JSON scalar.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::FieldValue;
	/// use serde_json::json;
	///
	/// assert_eq!(FieldValue::Integer(7).into_json(), json!(7));
	/// assert_eq!(FieldValue::Text("a".into()).into_json(), json!("a"));
	/// ```
	pub fn into_json(self) -> serde_json::Value {
		match self {
			FieldValue::Text(s) => serde_json::Value::String(s),
			FieldValue::Integer(n) => serde_json::json!(n),
			FieldValue::Float(x) => serde_json::json!(x),
			FieldValue::Boolean(b) => serde_json::Value::Bool(b),
		}
	}
}

/// Renders the value the way an input's `value` attribute would carry it.
impl fmt::Display for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldValue::Text(s) => f.write_str(s),
			FieldValue::Integer(n) => write!(f, "{n}"),
			FieldValue::Float(x) => write!(f, "{x}"),
			FieldValue::Boolean(b) => write!(f, "{b}"),
		}
	}
}

impl From<&str> for FieldValue {
	fn from(s: &str) -> Self {
		FieldValue::Text(s.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(s: String) -> Self {
		FieldValue::Text(s)
	}
}

impl From<i64> for FieldValue {
	fn from(n: i64) -> Self {
		FieldValue::Integer(n)
	}
}

impl From<i32> for FieldValue {
	fn from(n: i32) -> Self {
		FieldValue::Integer(i64::from(n))
	}
}

impl From<f64> for FieldValue {
	fn from(x: f64) -> Self {
		FieldValue::Float(x)
	}
}

impl From<bool> for FieldValue {
	fn from(b: bool) -> Self {
		FieldValue::Boolean(b)
	}
}

/// One entry in a choice field's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
	/// Stored value
	pub value: String,
	/// Human-readable label shown by the select wrapper
	pub label: String,
}

/// A declared form field: name, kind, and presentation metadata.
///
/// Descriptors are handed to [`FormStateBuilder::field`] in display order.
/// The builder rejects duplicate names and checks every other piece of
/// configuration against the declared set, so an undeclared field name
/// fails at construction instead of silently reading as absent.
///
/// [`FormStateBuilder::field`]: crate::FormStateBuilder::field
///
/// # Examples
///
/// ```
/// use formwork::{FieldDescriptor, FieldKind};
///
/// let age = FieldDescriptor::integer("age")
/// 	.with_label("Age")
/// 	.with_help_text("You must be at least 18 years old to sign up.");
///
/// assert_eq!(age.name(), "age");
/// assert_eq!(age.kind(), FieldKind::Integer);
/// assert_eq!(age.label(), Some("Age"));
/// ```
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
	pub(crate) name: String,
	pub(crate) kind: FieldKind,
	pub(crate) label: Option<String>,
	pub(crate) help_text: Option<String>,
	pub(crate) options: Vec<ChoiceOption>,
	pub(crate) sanitizer: Sanitizer,
}

impl FieldDescriptor {
	fn new(name: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			name: name.into(),
			kind,
			label: None,
			help_text: None,
			options: Vec::new(),
			sanitizer: sanitize::default_for(kind),
		}
	}

	/// Declare a text field.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{FieldDescriptor, FieldKind};
	///
	/// let field = FieldDescriptor::text("name");
	/// assert_eq!(field.kind(), FieldKind::Text);
	/// ```
	pub fn text(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Text)
	}

	/// Declare an integer field. Raw input is parsed with
	/// [`sanitize::integer`] unless a custom sanitizer is set.
	pub fn integer(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Integer)
	}

	/// Declare a float field.
	pub fn float(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Float)
	}

	/// Declare a boolean field.
	pub fn boolean(name: impl Into<String>) -> Self {
		Self::new(name, FieldKind::Boolean)
	}

	/// Declare a choice field with its option list.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::FieldDescriptor;
	///
	/// let gender = FieldDescriptor::choice(
	/// 	"gender",
	/// 	[
	/// 		("male", "Male"),
	/// 		("female", "Female"),
	/// 		("non-binary", "Non-binary"),
	/// 	],
	/// );
	/// assert_eq!(gender.options().len(), 3);
	/// ```
	pub fn choice<V, L>(
		name: impl Into<String>,
		options: impl IntoIterator<Item = (V, L)>,
	) -> Self
	where
		V: Into<String>,
		L: Into<String>,
	{
		let mut field = Self::new(name, FieldKind::Choice);
		field.options = options
			.into_iter()
			.map(|(value, label)| ChoiceOption {
				value: value.into(),
				label: label.into(),
			})
			.collect();
		field
	}

	/// Set the label rendered by the field's wrapper.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Set the sub-label (help text) rendered under the input.
	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	/// Replace the kind's default sanitizer.
	///
	/// The sanitizer's output kind must match the declared kind; a
	/// mismatch surfaces as [`FormError::TypeMismatch`] on the change
	/// event that triggers it.
	///
	/// [`FormError::TypeMismatch`]: crate::FormError::TypeMismatch
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{FieldDescriptor, sanitize};
	///
	/// let name = FieldDescriptor::text("name").with_sanitizer(sanitize::trimmed);
	/// ```
	pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
		self.sanitizer = sanitizer;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	pub fn help_text(&self) -> Option<&str> {
		self.help_text.as_deref()
	}

	pub fn options(&self) -> &[ChoiceOption] {
		&self.options
	}

	/// Whether `value` names one of the declared options.
	pub(crate) fn has_option(&self, value: &str) -> bool {
		self.options.iter().any(|o| o.value == value)
	}
}
