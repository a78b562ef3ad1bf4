//! Read-only per-field view for presentational wrappers

use crate::field::{ChoiceOption, FieldDescriptor, FieldKind, FieldValue};

/// Everything a label/input/select wrapper needs to render one field.
///
/// A `BoundField` borrows from its [`FormState`] and holds no state of
/// its own: the label and sub-label come from the descriptor, the
/// required marker from the configured rules, and the value and error
/// from the current form snapshot.
///
/// [`FormState`]: crate::FormState
///
/// # Examples
///
/// ```
/// use formwork::{FieldDescriptor, FormState, RuleSet};
///
/// let mut form = FormState::builder()
/// 	.field(
/// 		FieldDescriptor::text("name")
/// 			.with_label("Name")
/// 			.with_help_text("Letters only."),
/// 	)
/// 	.validate("name", RuleSet::new().required("A name is required."))
/// 	.build()
/// 	.unwrap();
/// form.set_field("name", "Jane").unwrap();
///
/// let bound = form.bound_field("name").unwrap();
/// assert_eq!(bound.label(), Some("Name"));
/// assert_eq!(bound.help_text(), Some("Letters only."));
/// assert!(bound.required());
/// assert_eq!(bound.display_value(), "Jane");
/// assert_eq!(bound.error(), None);
/// ```
pub struct BoundField<'a> {
	descriptor: &'a FieldDescriptor,
	value: Option<&'a FieldValue>,
	error: Option<&'a str>,
	required: bool,
}

impl<'a> BoundField<'a> {
	pub(crate) fn new(
		descriptor: &'a FieldDescriptor,
		value: Option<&'a FieldValue>,
		error: Option<&'a str>,
		required: bool,
	) -> Self {
		Self {
			descriptor,
			value,
			error,
			required,
		}
	}

	pub fn name(&self) -> &str {
		self.descriptor.name()
	}

	pub fn label(&self) -> Option<&str> {
		self.descriptor.label()
	}

	/// The sub-label rendered under the input.
	pub fn help_text(&self) -> Option<&str> {
		self.descriptor.help_text()
	}

	/// Whether the wrapper should render a required marker. Derived from
	/// the field's configured rules.
	pub fn required(&self) -> bool {
		self.required
	}

	/// The declared kind, which tells the wrapper what input to render.
	pub fn kind(&self) -> FieldKind {
		self.descriptor.kind()
	}

	pub fn value(&self) -> Option<&FieldValue> {
		self.value
	}

	/// The value as input text, suitable for a `value` attribute.
	/// Empty when the field has no entry.
	pub fn display_value(&self) -> String {
		self.value.map(ToString::to_string).unwrap_or_default()
	}

	/// The active error message from the most recent submit attempt.
	pub fn error(&self) -> Option<&str> {
		self.error
	}

	/// Option list for select wrappers; empty for non-choice fields.
	pub fn options(&self) -> &[ChoiceOption] {
		self.descriptor.options()
	}

	/// Whether `option_value` is the currently stored choice.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{FieldDescriptor, FormState};
	///
	/// let mut form = FormState::builder()
	/// 	.field(FieldDescriptor::choice("gender", [("male", "Male"), ("female", "Female")]))
	/// 	.build()
	/// 	.unwrap();
	/// form.set_field("gender", "female").unwrap();
	///
	/// let bound = form.bound_field("gender").unwrap();
	/// assert!(bound.is_selected("female"));
	/// assert!(!bound.is_selected("male"));
	/// ```
	pub fn is_selected(&self, option_value: &str) -> bool {
		self.value
			.and_then(FieldValue::as_text)
			.is_some_and(|current| current == option_value)
	}
}
