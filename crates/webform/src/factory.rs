//! Field factory: descriptor in, renderable field handle out.
//!
//! Dispatches on the descriptor's kind and builds the control element for
//! it. The factory attaches no listeners; wiring validation into the
//! enclosing form is the assembler's job.

use crate::config::{FieldDescriptor, FieldKind};
use crate::error::{WebformError, WebformResult};
use crate::handle::{FieldHandle, Rule};
use regex::Regex;
use std::str::FromStr;
use webform_dom::Element;

/// Build one [`FieldHandle`] from a descriptor.
///
/// Fails with [`WebformError::UnsupportedFieldKind`] for a kind outside
/// the supported vocabulary, [`WebformError::MalformedFieldConfig`] for a
/// choice kind without an option list, and
/// [`WebformError::InvalidPattern`] when the rule does not compile.
///
/// # Examples
///
/// ```
/// use webform::factory::create_field;
/// use webform::{FieldDescriptor, FieldKind};
///
/// let handle = create_field(
/// 	&FieldDescriptor::new(FieldKind::Text, "username").with_maxlength(15),
/// )
/// .unwrap();
/// assert_eq!(handle.name(), "username");
/// assert!(!handle.invalid());
/// ```
pub fn create_field(descriptor: &FieldDescriptor) -> WebformResult<FieldHandle> {
	let kind = FieldKind::from_str(&descriptor.kind)?;

	let (mut control, options, selected_index) = match kind {
		k if k.is_input() => (input_control(k, descriptor), vec![], None),
		FieldKind::File => (file_control(descriptor), vec![], None),
		FieldKind::Textarea => (textarea_control(descriptor), vec![], None),
		FieldKind::Select => {
			let (control, options, selected) = menu_control(descriptor)?;
			(control, options, Some(selected))
		}
		FieldKind::Radio => {
			let (control, options) = radio_control(descriptor)?;
			(control, options, None)
		}
		FieldKind::Checkbox => (checkbox_control(descriptor), vec![], None),
		_ => unreachable!("all kinds dispatched above"),
	};

	if let Some(id) = &descriptor.id {
		control.set_attr("id", id);
	}

	// Hidden and submit fields never carry a rule.
	let rule = match (&descriptor.filter, kind.is_unwrapped()) {
		(Some(filter), false) => Some(Rule {
			pattern: Regex::new(filter).map_err(|source| WebformError::InvalidPattern {
				name: descriptor.name.clone(),
				source,
			})?,
			message: descriptor.error.clone().unwrap_or_default(),
		}),
		_ => None,
	};

	let value = initial_value(kind, descriptor, &options, selected_index);

	Ok(FieldHandle {
		kind,
		name: descriptor.name.clone(),
		id: descriptor.id.clone(),
		label: descriptor.label.clone(),
		description: descriptor.description.clone(),
		required: descriptor.required,
		value,
		selected_index,
		options,
		rule,
		invalid: false,
		control,
		message: None,
	})
}

/// The value a field holds before any interaction.
fn initial_value(
	kind: FieldKind,
	descriptor: &FieldDescriptor,
	options: &[String],
	selected_index: Option<usize>,
) -> String {
	match kind {
		FieldKind::Select => selected_index
			.and_then(|i| options.get(i))
			.cloned()
			.unwrap_or_default(),
		FieldKind::Radio => descriptor
			.value
			.as_deref()
			.filter(|v| options.iter().any(|o| o == v))
			.unwrap_or_default()
			.to_string(),
		// An unchecked checkbox contributes no value.
		FieldKind::Checkbox => descriptor.value.clone().unwrap_or_default(),
		FieldKind::File => String::new(),
		_ => descriptor.value.clone().unwrap_or_default(),
	}
}

fn format_bound(value: f64) -> String {
	if value.fract() == 0.0 {
		format!("{}", value as i64)
	} else {
		value.to_string()
	}
}

fn input_control(kind: FieldKind, descriptor: &FieldDescriptor) -> Element {
	let mut input = Element::new("input");
	input.set_attr("type", kind.as_str());
	input.set_attr("name", &descriptor.name);

	if let Some(value) = &descriptor.value {
		input.set_attr("value", value);
	}
	if kind.accepts_maxlength() {
		if let Some(maxlength) = descriptor.maxlength {
			input.set_attr("maxlength", maxlength.to_string());
		}
	}
	if kind.is_numeric() {
		if let Some(max) = descriptor.max {
			input.set_attr("max", format_bound(max));
		}
		if let Some(min) = descriptor.min {
			input.set_attr("min", format_bound(min));
		}
		if let Some(step) = descriptor.step {
			input.set_attr("step", format_bound(step));
		}
	}
	if let Some(placeholder) = &descriptor.placeholder {
		input.set_attr("placeholder", placeholder);
	}
	if descriptor.required {
		input.set_flag("required");
	}

	input
}

fn file_control(descriptor: &FieldDescriptor) -> Element {
	let mut input = Element::new("input");
	input.set_attr("type", "file");
	input.set_attr("name", &descriptor.name);
	if descriptor.required {
		input.set_flag("required");
	}
	input
}

fn textarea_control(descriptor: &FieldDescriptor) -> Element {
	let mut textarea = Element::new("textarea");
	textarea.set_attr("name", &descriptor.name);
	if let Some(placeholder) = &descriptor.placeholder {
		textarea.set_attr("placeholder", placeholder);
	}
	if descriptor.required {
		textarea.set_flag("required");
	}
	textarea
}

fn choice_options(descriptor: &FieldDescriptor) -> WebformResult<Vec<String>> {
	let filter = descriptor
		.filter
		.as_deref()
		.filter(|f| !f.is_empty())
		.ok_or_else(|| WebformError::MalformedFieldConfig {
			reason: format!("choice field '{}' has no option list", descriptor.name),
		})?;
	Ok(filter.split('|').map(str::to_string).collect())
}

/// Select menu. The first option is a placeholder: the configured `value`
/// when present, an empty option otherwise for required menus so that the
/// gate's selected-index rule has something to point at. The placeholder
/// gets no `value` attribute.
fn menu_control(descriptor: &FieldDescriptor) -> WebformResult<(Element, Vec<String>, usize)> {
	let mut options = choice_options(descriptor)?;

	let placeholder = match &descriptor.value {
		Some(value) => {
			options.insert(0, value.clone());
			true
		}
		None if descriptor.required => {
			options.insert(0, String::new());
			true
		}
		None => false,
	};

	let selected = 0;

	let mut select = Element::new("select").with_class("menu");
	select.set_attr("name", &descriptor.name);
	if descriptor.required {
		select.set_flag("required");
	}

	for (i, value) in options.iter().enumerate() {
		let mut option = Element::new("option").with_text(value);
		if !(placeholder && i == 0) {
			option.set_attr("value", value);
		}
		if i == selected {
			option.set_flag("selected");
		}
		select.append_child(option);
	}

	Ok((select, options, selected))
}

fn radio_control(descriptor: &FieldDescriptor) -> WebformResult<(Element, Vec<String>)> {
	let options = choice_options(descriptor)?;

	let mut div = Element::new("div").with_class("radios");
	for value in &options {
		let mut input = Element::new("input");
		input.set_attr("type", "radio");
		input.set_attr("name", &descriptor.name);
		input.set_attr("value", value);
		if descriptor.required {
			input.set_flag("required");
		}
		if Some(value.as_str()) == descriptor.value.as_deref() {
			input.set_flag("checked");
		}
		div.append_child(input);
		div.append_child(Element::new("span").with_text(value));
	}

	Ok((div, options))
}

/// Checkbox: the label text sits after the control, inside the wrapper.
fn checkbox_control(descriptor: &FieldDescriptor) -> Element {
	let mut div = Element::new("div").with_class("checkbox");

	let mut input = Element::new("input");
	input.set_attr("type", "checkbox");
	input.set_attr("name", &descriptor.name);
	if let Some(value) = &descriptor.value {
		input.set_attr("value", value);
		if !value.is_empty() {
			input.set_flag("checked");
		}
	}
	if descriptor.required {
		input.set_flag("required");
	}

	div.append_child(input);
	div.append_child(
		Element::new("span").with_text(descriptor.label.clone().unwrap_or_default()),
	);

	div
}
