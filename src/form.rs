//! Form state and the submit gate
//!
//! [`FormState`] owns the field values, the compiled validation rules,
//! and the error map derived from the most recent submit attempt. It is
//! deliberately framework-agnostic: UI glue feeds it raw change strings,
//! reads values and errors back out, and learns the submit outcome from
//! plain return values (plus an optional watcher list for push-style
//! consumers).

use std::collections::HashMap;
use std::ops::Index;

use crate::bound_field::BoundField;
use crate::field::{FieldDescriptor, FieldKind, FieldValue};
use crate::rules::{CompiledRules, RuleSet};

/// Configuration rejected by [`FormStateBuilder::build`].
///
/// Every mapping the builder receives is checked against the declared
/// field list, so misconfiguration fails at construction instead of
/// surfacing as silently-absent values at submit time.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("duplicate field '{0}'")]
	DuplicateField(String),
	#[error("validation rules reference unknown field '{0}'")]
	UnknownRuleField(String),
	#[error("initial value references unknown field '{0}'")]
	UnknownInitialField(String),
	#[error("initial value for '{field}' is {actual}, declared kind is {expected}")]
	InitialKindMismatch {
		field: String,
		expected: FieldKind,
		actual: FieldKind,
	},
	#[error("initial value for '{field}' is not one of its options: '{value}'")]
	InitialNotInOptions { field: String, value: String },
	#[error("pattern rule on '{field}' requires a text field, declared kind is {kind}")]
	PatternOnNonText { field: String, kind: FieldKind },
	#[error("pattern rule on '{field}' does not compile: {source}")]
	BadPattern {
		field: String,
		#[source]
		source: regex::Error,
	},
}

/// Runtime misuse of a built form, reported by [`FormState::set_field`].
///
/// Validation failures are not errors; they land in the error map. These
/// variants cover change events the form cannot apply at all; the form's
/// data is left untouched when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("unknown field '{0}'")]
	UnknownField(String),
	#[error("sanitizer for '{field}' produced {actual}, declared kind is {expected}")]
	TypeMismatch {
		field: String,
		expected: FieldKind,
		actual: FieldKind,
	},
	#[error("invalid input for '{field}': {message}")]
	Sanitize { field: String, message: String },
}

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
	/// Every rule passed; the submit callback ran.
	Submitted,
	/// At least one rule failed; the error map holds this attempt's
	/// messages and the callback did not run.
	Rejected,
}

impl SubmitOutcome {
	pub fn is_submitted(&self) -> bool {
		matches!(self, SubmitOutcome::Submitted)
	}

	pub fn is_rejected(&self) -> bool {
		matches!(self, SubmitOutcome::Rejected)
	}
}

/// Change notification delivered to [`FormState::watch`] listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
	/// A field's stored value changed (or was cleared).
	ValueChanged { field: String },
	/// A submit attempt passed validation.
	Submitted,
	/// A submit attempt failed validation.
	Rejected,
}

type SubmitFn = Box<dyn FnMut() + Send>;
type WatchFn = Box<dyn Fn(&FormEvent) + Send + Sync>;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Form field values, declarative validation, and the submit gate.
///
/// The form has exactly two externally visible states, clean (empty
/// error map) and invalid, and only a submit attempt moves between
/// them. Changing a field never revalidates; a field can show a stale
/// error until the next attempt.
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> Clean
///     Clean --> Invalid: submit, any rule fails
///     Invalid --> Invalid: submit, any rule fails
///     Invalid --> Clean: submit, all rules pass
///     Clean --> Clean: submit, all rules pass
/// ```
///
/// # Examples
///
/// ```
/// use formwork::{FieldDescriptor, FormState, RuleSet};
///
/// let mut form = FormState::builder()
/// 	.field(FieldDescriptor::text("name").with_label("Name"))
/// 	.validate(
/// 		"name",
/// 		RuleSet::new().pattern(
/// 			"^[A-Za-z]*$",
/// 			"You're not allowed to use special characters or numbers in your name.",
/// 		),
/// 	)
/// 	.build()
/// 	.unwrap();
///
/// form.set_field("name", "Jane1").unwrap();
/// assert!(form.submit().is_rejected());
/// assert!(form.error("name").is_some());
///
/// form.set_field("name", "Jane").unwrap();
/// assert!(form.submit().is_submitted());
/// assert!(form.is_clean());
/// ```
pub struct FormState {
	fields: Vec<FieldDescriptor>,
	index: HashMap<String, usize>,
	rules: HashMap<String, CompiledRules>,
	data: HashMap<String, FieldValue>,
	initial: HashMap<String, FieldValue>,
	errors: HashMap<String, String>,
	on_submit: Option<SubmitFn>,
	watchers: Vec<WatchFn>,
}

impl FormState {
	/// Start declaring a form.
	pub fn builder() -> FormStateBuilder {
		FormStateBuilder::new()
	}

	/// Apply a change event to exactly one field.
	///
	/// The raw string is converted by the field's sanitizer; the
	/// resulting entry replaces the old one and every other field is left
	/// untouched. A sanitizer reporting "cleared" removes the entry. No
	/// validation runs here; errors are only recomputed on submit.
	///
	/// # Errors
	///
	/// [`FormError::UnknownField`] for an undeclared name,
	/// [`FormError::Sanitize`] when the conversion rejects the input, and
	/// [`FormError::TypeMismatch`] when a custom sanitizer produced a
	/// value of the wrong kind. The form's data is unchanged in every
	/// error case.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{FieldDescriptor, FieldValue, FormState};
	///
	/// let mut form = FormState::builder()
	/// 	.field(FieldDescriptor::integer("age"))
	/// 	.build()
	/// 	.unwrap();
	///
	/// form.set_field("age", "21").unwrap();
	/// assert_eq!(form.value("age"), Some(&FieldValue::Integer(21)));
	///
	/// // Erasing the input clears the entry.
	/// form.set_field("age", "").unwrap();
	/// assert_eq!(form.value("age"), None);
	/// ```
	pub fn set_field(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
		let field = self
			.index
			.get(name)
			.map(|&i| &self.fields[i])
			.ok_or_else(|| FormError::UnknownField(name.to_string()))?;

		let converted = (field.sanitizer)(raw).map_err(|message| FormError::Sanitize {
			field: name.to_string(),
			message,
		})?;

		match converted {
			Some(value) => {
				if !field.kind.accepts(&value) {
					return Err(FormError::TypeMismatch {
						field: name.to_string(),
						expected: field.kind,
						actual: value.kind(),
					});
				}
				self.data.insert(name.to_string(), value);
			}
			None => {
				self.data.remove(name);
			}
		}

		tracing::trace!(field = name, "field value changed");
		self.notify(&FormEvent::ValueChanged {
			field: name.to_string(),
		});
		Ok(())
	}

	/// Validate every configured field and gate the submit callback.
	///
	/// All rules for all fields run on every attempt; the error map is
	/// wholesale-replaced with exactly this attempt's failures, so a
	/// field that passes now loses any error from an earlier attempt.
	/// When nothing fails the callback runs (if one was configured) and
	/// the error map is cleared.
	pub fn submit(&mut self) -> SubmitOutcome {
		if self.rules.is_empty() {
			self.errors.clear();
			return self.accept();
		}

		let mut failures = HashMap::new();
		for field in &self.fields {
			let Some(rules) = self.rules.get(&field.name) else {
				continue;
			};
			if let Some(message) = rules.check(self.data.get(&field.name)) {
				tracing::debug!(field = %field.name, message = %message, "validation failed");
				failures.insert(field.name.clone(), message);
			}
		}

		if failures.is_empty() {
			self.errors.clear();
			self.accept()
		} else {
			self.errors = failures;
			tracing::debug!(failed = self.errors.len(), "submit rejected");
			self.notify(&FormEvent::Rejected);
			SubmitOutcome::Rejected
		}
	}

	fn accept(&mut self) -> SubmitOutcome {
		if let Some(on_submit) = self.on_submit.as_mut() {
			on_submit();
		}
		tracing::debug!("submit accepted");
		self.notify(&FormEvent::Submitted);
		SubmitOutcome::Submitted
	}

	/// Current field values.
	pub fn data(&self) -> &HashMap<String, FieldValue> {
		&self.data
	}

	/// Current value of one field, `None` when it has no entry.
	pub fn value(&self, name: &str) -> Option<&FieldValue> {
		self.data.get(name)
	}

	/// Errors from the most recent submit attempt.
	pub fn errors(&self) -> &HashMap<String, String> {
		&self.errors
	}

	/// The active error message for one field, if it failed the most
	/// recent submit attempt.
	pub fn error(&self, name: &str) -> Option<&str> {
		self.errors.get(name).map(String::as_str)
	}

	/// Whether the error map is empty.
	pub fn is_clean(&self) -> bool {
		self.errors.is_empty()
	}

	/// Whether any field differs from its initial value.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{FieldDescriptor, FormState};
	///
	/// let mut form = FormState::builder()
	/// 	.field(FieldDescriptor::text("name"))
	/// 	.initial("name", "John")
	/// 	.build()
	/// 	.unwrap();
	///
	/// assert!(!form.has_changed());
	/// form.set_field("name", "Jane").unwrap();
	/// assert!(form.has_changed());
	/// ```
	pub fn has_changed(&self) -> bool {
		self.data != self.initial
	}

	/// Snapshot the current values as a JSON object.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{FieldDescriptor, FormState};
	/// use serde_json::json;
	///
	/// let mut form = FormState::builder()
	/// 	.field(FieldDescriptor::text("name"))
	/// 	.field(FieldDescriptor::integer("age"))
	/// 	.build()
	/// 	.unwrap();
	/// form.set_field("name", "Jane").unwrap();
	/// form.set_field("age", "21").unwrap();
	///
	/// assert_eq!(form.data_json(), json!({ "name": "Jane", "age": 21 }));
	/// ```
	pub fn data_json(&self) -> serde_json::Value {
		let map: serde_json::Map<String, serde_json::Value> = self
			.data
			.iter()
			.map(|(name, value)| (name.clone(), value.clone().into_json()))
			.collect();
		serde_json::Value::Object(map)
	}

	/// The declared descriptor for one field.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.index.get(name).map(|&i| &self.fields[i])
	}

	/// Declared fields in declaration order.
	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	/// Read-only per-field view for presentational wrappers.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{FieldDescriptor, FormState, RuleSet};
	///
	/// let mut form = FormState::builder()
	/// 	.field(FieldDescriptor::text("password").with_label("Password"))
	/// 	.validate("password", RuleSet::new().required("A password is required."))
	/// 	.build()
	/// 	.unwrap();
	/// form.set_field("password", "hunter2").unwrap();
	///
	/// let bound = form.bound_field("password").unwrap();
	/// assert_eq!(bound.label(), Some("Password"));
	/// assert!(bound.required());
	/// assert_eq!(bound.display_value(), "hunter2");
	/// ```
	pub fn bound_field(&self, name: &str) -> Option<BoundField<'_>> {
		let &i = self.index.get(name)?;
		let descriptor = &self.fields[i];
		Some(BoundField::new(
			descriptor,
			self.data.get(name),
			self.errors.get(name).map(String::as_str),
			self.rules
				.get(name)
				.is_some_and(CompiledRules::has_required),
		))
	}

	/// Register a change listener.
	///
	/// Listeners receive [`FormEvent`]s after each applied change and
	/// each submit attempt. They observe; they cannot mutate the form.
	pub fn watch(&mut self, listener: impl Fn(&FormEvent) + Send + Sync + 'static) {
		self.watchers.push(Box::new(listener));
	}

	fn notify(&self, event: &FormEvent) {
		for watcher in &self.watchers {
			watcher(event);
		}
	}
}

/// Panicking value access by field name.
///
/// Returns the stored value; panics when the field has no entry. Use
/// [`FormState::value`] for the safe variant.
impl Index<&str> for FormState {
	type Output = FieldValue;

	fn index(&self, name: &str) -> &Self::Output {
		self.value(name)
			.unwrap_or_else(|| panic!("no value for field '{}'", name))
	}
}

/// Declares fields, rules, initial values, and the submit callback, then
/// fail-fast-validates the whole configuration.
///
/// # Examples
///
/// ```
/// use formwork::{FieldDescriptor, FieldValue, FormState, RuleSet};
///
/// let form = FormState::builder()
/// 	.field(FieldDescriptor::text("name"))
/// 	.field(FieldDescriptor::integer("age"))
/// 	.validate("age", RuleSet::new().custom(
/// 		|v| v.and_then(FieldValue::as_integer).is_some_and(|age| age > 17),
/// 		"You have to be at least 18 years old.",
/// 	))
/// 	.initial("name", "Jane")
/// 	.on_submit(|| println!("Form submitted!"))
/// 	.build();
///
/// assert!(form.is_ok());
/// ```
#[derive(Default)]
pub struct FormStateBuilder {
	fields: Vec<FieldDescriptor>,
	rules: Vec<(String, RuleSet)>,
	initial: Vec<(String, FieldValue)>,
	on_submit: Option<SubmitFn>,
}

impl FormStateBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declare a field. Declaration order is display and validation
	/// order.
	pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
		self.fields.push(descriptor);
		self
	}

	/// Attach validation rules to a declared field. Calling this twice
	/// for the same field replaces the earlier rules.
	pub fn validate(mut self, name: impl Into<String>, rules: RuleSet) -> Self {
		self.rules.push((name.into(), rules));
		self
	}

	/// Seed a field's starting value.
	pub fn initial(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
		self.initial.push((name.into(), value.into()));
		self
	}

	/// Callback invoked on every submit attempt that passes validation.
	pub fn on_submit(mut self, callback: impl FnMut() + Send + 'static) -> Self {
		self.on_submit = Some(Box::new(callback));
		self
	}

	/// Check the configuration and build the form.
	///
	/// # Errors
	///
	/// See [`ConfigError`]: duplicate field names, rules or initial
	/// values naming undeclared fields, kind-mismatched or
	/// out-of-options initial values, pattern rules on non-text fields,
	/// and pattern sources that do not compile.
	pub fn build(self) -> Result<FormState, ConfigError> {
		let mut index = HashMap::new();
		for (i, field) in self.fields.iter().enumerate() {
			if index.insert(field.name.clone(), i).is_some() {
				return Err(ConfigError::DuplicateField(field.name.clone()));
			}
		}

		let mut initial = HashMap::new();
		for (name, value) in self.initial {
			let Some(&i) = index.get(&name) else {
				return Err(ConfigError::UnknownInitialField(name));
			};
			let field = &self.fields[i];
			if !field.kind.accepts(&value) {
				return Err(ConfigError::InitialKindMismatch {
					field: name,
					expected: field.kind,
					actual: value.kind(),
				});
			}
			if field.kind == FieldKind::Choice {
				let text = value.as_text().unwrap_or_default();
				if !field.has_option(text) {
					return Err(ConfigError::InitialNotInOptions {
						field: name,
						value: text.to_string(),
					});
				}
			}
			initial.insert(name, value);
		}

		let mut rules = HashMap::new();
		for (name, rule_set) in self.rules {
			let Some(&i) = index.get(&name) else {
				return Err(ConfigError::UnknownRuleField(name));
			};
			let compiled = CompiledRules::compile(rule_set, &name, self.fields[i].kind)?;
			rules.insert(name, compiled);
		}

		Ok(FormState {
			fields: self.fields,
			index,
			rules,
			data: initial.clone(),
			initial,
			errors: HashMap::new(),
			on_submit: self.on_submit,
			watchers: Vec::new(),
		})
	}
}
