//! Declarative form configuration.
//!
//! A [`FormConfig`] describes a whole form; it is supplied once at
//! construction and never mutated afterwards. Configurations deserialize
//! from the JSON shape accepted by webform-toolkit, including the legacy
//! variants that used a flat `fields` array (or a nested array-of-arrays)
//! in place of `groups`.

use crate::error::{WebformError, WebformResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed vocabulary of supported field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	Text,
	Password,
	Hidden,
	Color,
	Date,
	Email,
	Number,
	Quantity,
	Range,
	Time,
	Submit,
	File,
	Textarea,
	Select,
	Radio,
	Checkbox,
}

impl FieldKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldKind::Text => "text",
			FieldKind::Password => "password",
			FieldKind::Hidden => "hidden",
			FieldKind::Color => "color",
			FieldKind::Date => "date",
			FieldKind::Email => "email",
			FieldKind::Number => "number",
			FieldKind::Quantity => "quantity",
			FieldKind::Range => "range",
			FieldKind::Time => "time",
			FieldKind::Submit => "submit",
			FieldKind::File => "file",
			FieldKind::Textarea => "textarea",
			FieldKind::Select => "select",
			FieldKind::Radio => "radio",
			FieldKind::Checkbox => "checkbox",
		}
	}

	/// Kinds rendered bare, without the labeled wrapper container.
	pub fn is_unwrapped(&self) -> bool {
		matches!(self, FieldKind::Hidden | FieldKind::Submit)
	}

	/// Kinds whose `filter` doubles as a pipe-delimited option list.
	pub fn is_choice(&self) -> bool {
		matches!(self, FieldKind::Select | FieldKind::Radio)
	}

	/// Kinds rendered as a plain `<input>` element.
	pub fn is_input(&self) -> bool {
		matches!(
			self,
			FieldKind::Text
				| FieldKind::Password
				| FieldKind::Hidden
				| FieldKind::Color
				| FieldKind::Date
				| FieldKind::Email
				| FieldKind::Number
				| FieldKind::Quantity
				| FieldKind::Range
				| FieldKind::Time
				| FieldKind::Submit
		)
	}

	/// Kinds carrying the `maxlength` attribute.
	pub fn accepts_maxlength(&self) -> bool {
		matches!(self, FieldKind::Text | FieldKind::Password)
	}

	/// Kinds carrying `max`/`min`/`step` attributes.
	pub fn is_numeric(&self) -> bool {
		matches!(self, FieldKind::Number | FieldKind::Quantity | FieldKind::Range)
	}

	/// Kinds the submission gate scans for required/invalid state.
	pub fn is_gate_relevant(&self) -> bool {
		matches!(
			self,
			FieldKind::Text
				| FieldKind::Password
				| FieldKind::Radio
				| FieldKind::Checkbox
				| FieldKind::File
				| FieldKind::Select
				| FieldKind::Textarea
		)
	}
}

impl FromStr for FieldKind {
	type Err = WebformError;

	/// # Examples
	///
	/// ```
	/// use webform::FieldKind;
	///
	/// assert_eq!("select".parse::<FieldKind>().unwrap(), FieldKind::Select);
	/// assert!("carousel".parse::<FieldKind>().is_err());
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"text" => FieldKind::Text,
			"password" => FieldKind::Password,
			"hidden" => FieldKind::Hidden,
			"color" => FieldKind::Color,
			"date" => FieldKind::Date,
			"email" => FieldKind::Email,
			"number" => FieldKind::Number,
			"quantity" => FieldKind::Quantity,
			"range" => FieldKind::Range,
			"time" => FieldKind::Time,
			"submit" => FieldKind::Submit,
			"file" => FieldKind::File,
			"textarea" => FieldKind::Textarea,
			"select" => FieldKind::Select,
			"radio" => FieldKind::Radio,
			"checkbox" => FieldKind::Checkbox,
			other => {
				return Err(WebformError::UnsupportedFieldKind {
					kind: other.to_string(),
				});
			}
		})
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Accept `true`/`false` as well as the legacy `0`/`1` integers.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Flag {
		Bool(bool),
		Num(i64),
	}

	Ok(match Flag::deserialize(deserializer)? {
		Flag::Bool(b) => b,
		Flag::Num(n) => n != 0,
	})
}

/// Declarative description of one form control.
///
/// The `type` key stays a free string at this level; the field factory
/// parses it into a [`FieldKind`] and rejects unknown values there, so a
/// bad kind fails field creation rather than config parsing.
///
/// # Examples
///
/// ```
/// use webform::{FieldDescriptor, FieldKind};
///
/// let field = FieldDescriptor::new(FieldKind::Text, "username")
/// 	.with_label("Username")
/// 	.with_maxlength(15)
/// 	.with_filter("^[A-Za-z0-9_]+$")
/// 	.with_error("Supported characters: A-Z, 0-9 and underscore")
/// 	.required();
///
/// assert_eq!(field.kind, "text");
/// assert!(field.required);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
	#[serde(rename = "type")]
	pub kind: String,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub placeholder: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub maxlength: Option<u32>,
	#[serde(default, deserialize_with = "flag")]
	pub required: bool,
	/// Validation rule pattern, or the pipe-delimited option list for
	/// choice kinds. The same string is both the allowed-value set and the
	/// choices offered.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub filter: Option<String>,
	/// Message shown when the rule fails.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub step: Option<f64>,
}

impl FieldDescriptor {
	pub fn new(kind: FieldKind, name: impl Into<String>) -> Self {
		Self {
			kind: kind.as_str().to_string(),
			name: name.into(),
			id: None,
			label: None,
			value: None,
			placeholder: None,
			maxlength: None,
			required: false,
			filter: None,
			error: None,
			description: None,
			max: None,
			min: None,
			step: None,
		}
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = Some(value.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	pub fn with_maxlength(mut self, maxlength: u32) -> Self {
		self.maxlength = Some(maxlength);
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
		self.filter = Some(filter.into());
		self
	}

	pub fn with_error(mut self, error: impl Into<String>) -> Self {
		self.error = Some(error.into());
		self
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn with_min(mut self, min: f64) -> Self {
		self.min = Some(min);
		self
	}

	pub fn with_max(mut self, max: f64) -> Self {
		self.max = Some(max);
		self
	}

	pub fn with_step(mut self, step: f64) -> Self {
		self.step = Some(step);
		self
	}
}

/// One fieldset: an optional legend plus an ordered run of fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldGroup {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub legend: Option<String>,
	#[serde(default)]
	pub fields: Vec<FieldDescriptor>,
}

impl FieldGroup {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
		self.legend = Some(legend.into());
		self
	}

	pub fn with_field(mut self, field: FieldDescriptor) -> Self {
		self.fields.push(field);
		self
	}
}

/// Legacy field layouts accepted in place of `groups`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegacyFields {
	/// Array of arrays: one group per inner array.
	Nested(Vec<Vec<FieldDescriptor>>),
	/// Flat field array: a single anonymous group.
	Flat(Vec<FieldDescriptor>),
}

fn default_submit() -> bool {
	true
}

/// Whole-form configuration.
///
/// # Examples
///
/// Deserializing the JSON shape used by webform-toolkit:
///
/// ```
/// use webform::FormConfig;
///
/// let config: FormConfig = serde_json::from_str(r#"{
/// 	"action": "https://www.domain.com/handler",
/// 	"params": "id=123&key=value",
/// 	"groups": [{
/// 		"legend": "Account",
/// 		"fields": [
/// 			{"type": "text", "name": "username", "required": true}
/// 		]
/// 	}]
/// }"#).unwrap();
///
/// assert_eq!(config.field_groups().len(), 1);
/// assert_eq!(config.param_pairs(), vec![
/// 	("id".to_string(), "123".to_string()),
/// 	("key".to_string(), "value".to_string()),
/// ]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// POST target URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub action: Option<String>,
	/// Static POST parameters, literally `&`/`=`-encoded.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub params: Option<String>,
	#[serde(default)]
	pub groups: Vec<FieldGroup>,
	/// Legacy `fields` key. Normalized into groups by [`field_groups`](Self::field_groups).
	#[serde(default, rename = "fields", skip_serializing_if = "Option::is_none")]
	pub legacy_fields: Option<LegacyFields>,
	/// Whether a submit control is rendered.
	#[serde(default = "default_submit")]
	pub submit: bool,
}

impl Default for FormConfig {
	fn default() -> Self {
		Self {
			id: None,
			action: None,
			params: None,
			groups: vec![],
			legacy_fields: None,
			submit: true,
		}
	}
}

impl FormConfig {
	pub fn new(action: impl Into<String>) -> Self {
		Self {
			action: Some(action.into()),
			..Self::default()
		}
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn with_params(mut self, params: impl Into<String>) -> Self {
		self.params = Some(params.into());
		self
	}

	pub fn with_group(mut self, group: FieldGroup) -> Self {
		self.groups.push(group);
		self
	}

	/// Suppress the submit control.
	pub fn without_submit(mut self) -> Self {
		self.submit = false;
		self
	}

	/// The effective group list: `groups` when present, otherwise the
	/// legacy `fields` layouts normalized into anonymous groups.
	pub fn field_groups(&self) -> Vec<FieldGroup> {
		if !self.groups.is_empty() {
			return self.groups.clone();
		}
		match &self.legacy_fields {
			Some(LegacyFields::Flat(fields)) => vec![FieldGroup {
				legend: None,
				fields: fields.clone(),
			}],
			Some(LegacyFields::Nested(groups)) => groups
				.iter()
				.map(|fields| FieldGroup {
					legend: None,
					fields: fields.clone(),
				})
				.collect(),
			None => vec![],
		}
	}

	/// Decode `params` into name/value pairs. A pair without `=` gets an
	/// empty value.
	pub fn param_pairs(&self) -> Vec<(String, String)> {
		let Some(params) = self.params.as_deref().filter(|p| !p.is_empty()) else {
			return vec![];
		};
		params
			.split('&')
			.map(|pair| match pair.split_once('=') {
				Some((name, value)) => (name.to_string(), value.to_string()),
				None => (pair.to_string(), String::new()),
			})
			.collect()
	}

	/// Fail unless the mandatory settings are present: a non-empty action
	/// and at least one field group.
	pub(crate) fn check_initializable(&self) -> WebformResult<()> {
		let has_action = self.action.as_deref().is_some_and(|a| !a.is_empty());
		if !has_action || self.field_groups().is_empty() {
			return Err(WebformError::Initialization);
		}
		Ok(())
	}
}
