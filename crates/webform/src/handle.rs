//! Live field state.
//!
//! A [`FieldHandle`] is the stateful side of one rendered field: it owns
//! the control element plus the label/description pieces around it, the
//! current value, and the validation state. Validation state lives here
//! rather than being stashed on the element itself; only the validator
//! writes `invalid`.

use crate::config::FieldKind;
use crate::validate::FadeDirection;
use regex::Regex;
use webform_dom::Element;

/// Pattern plus failure message, compiled once at field creation.
///
/// The pattern is applied with search semantics: it matches when found
/// anywhere in the value. Authors anchor with `^`/`$` when whole-value
/// matching is intended.
#[derive(Debug, Clone)]
pub struct Rule {
	pub pattern: Regex,
	pub message: String,
}

/// Error message element state, including the fade the host drives.
#[derive(Debug, Clone)]
pub(crate) struct ErrorMessage {
	pub text: String,
	pub opacity: f32,
	pub fade: Option<FadeDirection>,
}

/// The live, stateful representation of a rendered field.
#[derive(Debug)]
pub struct FieldHandle {
	pub(crate) kind: FieldKind,
	pub(crate) name: String,
	pub(crate) id: Option<String>,
	pub(crate) label: Option<String>,
	pub(crate) description: Option<String>,
	pub(crate) required: bool,
	pub(crate) value: String,
	/// Select kinds only: index of the currently selected option.
	pub(crate) selected_index: Option<usize>,
	/// Option vocabulary for choice kinds.
	pub(crate) options: Vec<String>,
	pub(crate) rule: Option<Rule>,
	pub(crate) invalid: bool,
	pub(crate) control: Element,
	pub(crate) message: Option<ErrorMessage>,
}

impl FieldHandle {
	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn is_required(&self) -> bool {
		self.required
	}

	/// Whether the field currently fails its validation rule.
	pub fn invalid(&self) -> bool {
		self.invalid
	}

	pub fn rule(&self) -> Option<&Rule> {
		self.rule.as_ref()
	}

	pub fn selected_index(&self) -> Option<usize> {
		self.selected_index
	}

	pub fn options(&self) -> &[String] {
		&self.options
	}

	/// The visible error message text, if one is attached.
	pub fn message(&self) -> Option<&str> {
		self.message.as_ref().map(|m| m.text.as_str())
	}

	/// Identifier used for the label `for` attribute and the error message
	/// id; falls back to the field name when no explicit id is set.
	pub(crate) fn dom_id(&self) -> &str {
		self.id.as_deref().unwrap_or(&self.name)
	}

	/// Materialize this field as an element tree reflecting current state.
	///
	/// Hidden and submit kinds render bare; every other kind is wrapped in
	/// a `div.field-{kind}` container holding label, control, optional
	/// description, and the error message when attached. The checkbox kind
	/// carries its label after the control, inside the control itself.
	pub fn element(&self) -> Element {
		if self.kind.is_unwrapped() {
			return self.control.clone();
		}

		let mut wrapper = Element::new("div").with_class(format!("field-{}", self.kind));

		if self.kind != FieldKind::Checkbox {
			let mut label = Element::new("label").with_attr("for", self.dom_id());
			if let Some(text) = &self.label {
				label.set_text(text);
			}
			if self.required {
				label.append_child(Element::new("span").with_class("required"));
			}
			if self.invalid {
				label.set_attr("aria-invalid", "true");
			}
			wrapper.append_child(label);
		}

		wrapper.append_child(self.control.clone());

		if let Some(text) = &self.description {
			wrapper.append_child(
				Element::new("p")
					.with_class("description")
					.with_attr("role", "info")
					.with_text(text),
			);
		}

		if let Some(message) = &self.message {
			let mut block = Element::new("p")
				.with_class("error-message")
				.with_attr("id", format!("error-{}", self.dom_id()))
				.with_attr("aria-invalid", "true")
				.with_text(&message.text);
			block.set_style("display", "block");
			block.set_style("opacity", format!("{:.1}", message.opacity));
			wrapper.append_child(block);
		}

		wrapper
	}
}
