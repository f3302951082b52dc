//! Form assembly and the live form instance.
//!
//! [`Webform`] is an explicit instance object: it owns its configuration,
//! its field handles, and its gate state. The browser toolkit this design
//! descends from stashed all of that on the container element and looked
//! it up ambiently; here construction returns the instance and every
//! operation goes through it.
//!
//! Event wiring becomes explicit entry points: [`set_value`](Webform::set_value)
//! and [`select`](Webform::select) stand in for the per-field value-change
//! listeners, [`revalidate_all`](Webform::revalidate_all) for the coarse
//! form-level pointer observer. Each revalidates the touched field before
//! recomputing the gate, so the gate always sees up-to-date `invalid`
//! flags.

use crate::config::{FieldDescriptor, FieldKind, FormConfig};
use crate::error::{WebformError, WebformResult};
use crate::factory::create_field;
use crate::gate;
use crate::handle::FieldHandle;
use crate::submit::{FormPost, NativeSubmit, SubmitOutcome, SubmitTransport};
use crate::validate;
use std::collections::BTreeMap;
use webform_dom::Element;

/// Receives the collected name/value pairs on a successful submit.
pub type SubmitCallback = Box<dyn FnMut(BTreeMap<String, String>)>;

struct GroupHandle {
	legend: Option<String>,
	field_ixs: Vec<usize>,
}

/// A rendered form: ordered field handles, hidden parameters, and the
/// submit trigger state.
pub struct Webform {
	pub(crate) config: FormConfig,
	groups: Vec<GroupHandle>,
	pub(crate) fields: Vec<FieldHandle>,
	hidden_params: Vec<(String, String)>,
	pub(crate) has_submit: bool,
	pub(crate) submit_enabled: bool,
	callback: Option<SubmitCallback>,
	transport: Box<dyn SubmitTransport>,
}

impl Webform {
	/// Assemble a form from its configuration.
	///
	/// Fails with [`WebformError::Initialization`] when the action or the
	/// field groups are missing or empty; field creation errors abort the
	/// whole assembly.
	///
	/// # Examples
	///
	/// ```
	/// use webform::{FieldDescriptor, FieldGroup, FieldKind, FormConfig, Webform};
	///
	/// let config = FormConfig::new("https://www.domain.com/handler").with_group(
	/// 	FieldGroup::new()
	/// 		.with_legend("Account")
	/// 		.with_field(FieldDescriptor::new(FieldKind::Text, "username").required()),
	/// );
	///
	/// let form = Webform::init(config, None).unwrap();
	/// assert_eq!(form.fields().len(), 1);
	/// // The required field is still empty, so the trigger starts disabled.
	/// assert!(!form.submit_enabled());
	/// ```
	pub fn init(config: FormConfig, callback: Option<SubmitCallback>) -> WebformResult<Self> {
		config.check_initializable()?;

		let mut form = Self {
			hidden_params: config.param_pairs(),
			has_submit: config.submit,
			groups: vec![],
			fields: vec![],
			submit_enabled: true,
			callback,
			transport: Box::new(NativeSubmit),
			config,
		};

		for group in form.config.field_groups() {
			let mut field_ixs = vec![];
			for descriptor in &group.fields {
				field_ixs.push(form.fields.len());
				form.fields.push(create_field(descriptor)?);
			}
			form.groups.push(GroupHandle {
				legend: group.legend.clone(),
				field_ixs,
			});
		}

		gate::set_button_state(&mut form);
		tracing::debug!(
			groups = form.groups.len(),
			fields = form.fields.len(),
			"webform assembled"
		);
		Ok(form)
	}

	/// Replace the transport the form hands successful posts to.
	pub fn with_transport(mut self, transport: Box<dyn SubmitTransport>) -> Self {
		self.transport = transport;
		self
	}

	/// Append one more field to the already-assembled form, running the
	/// same factory pipeline as initial assembly.
	///
	/// Fails with [`WebformError::MalformedFieldConfig`] when there is no
	/// group to append to or the descriptor is unusable.
	pub fn create(&mut self, descriptor: &FieldDescriptor) -> WebformResult<&FieldHandle> {
		if self.groups.is_empty() {
			return Err(WebformError::MalformedFieldConfig {
				reason: "form has no field group to append to".to_string(),
			});
		}
		if descriptor.name.is_empty() {
			return Err(WebformError::MalformedFieldConfig {
				reason: "field descriptor has no name".to_string(),
			});
		}

		let handle =
			create_field(descriptor).map_err(|e| WebformError::MalformedFieldConfig {
				reason: e.to_string(),
			})?;

		let ix = self.fields.len();
		self.fields.push(handle);
		if let Some(group) = self.groups.last_mut() {
			group.field_ixs.push(ix);
		}

		gate::set_button_state(self);
		tracing::debug!(field = %self.fields[ix].name(), "field appended");
		Ok(&self.fields[ix])
	}

	/// Tear the form down, dropping all field state and the callback.
	pub fn destroy(mut self) {
		self.callback = None;
		self.fields.clear();
		self.groups.clear();
		tracing::debug!("webform destroyed");
	}

	pub fn fields(&self) -> &[FieldHandle] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&FieldHandle> {
		self.fields.iter().find(|f| f.name() == name)
	}

	pub fn config(&self) -> &FormConfig {
		&self.config
	}

	/// Whether the submit trigger is currently enabled.
	pub fn submit_enabled(&self) -> bool {
		self.submit_enabled
	}

	/// Recompute the aggregate gate. Returns whether errors exist.
	pub fn recompute_gate(&mut self) -> bool {
		gate::set_button_state(self);
		gate::errors_exist(self)
	}

	/// Value-change entry point: update the named field, revalidate it,
	/// then recompute the gate. Returns `false` when no such field exists.
	///
	/// Select fields route through [`select_value`](Self::select_value) so
	/// their selected index stays coherent with the value.
	pub fn set_value(&mut self, name: &str, value: &str) -> bool {
		let Some(ix) = self.fields.iter().position(|f| f.name() == name) else {
			return false;
		};
		if self.fields[ix].kind() == FieldKind::Select {
			return self.select_value(name, value);
		}

		Self::apply_value(&mut self.fields[ix], value);
		validate::validate(&mut self.fields[ix]);
		gate::set_button_state(self);
		true
	}

	/// Choose a select option by index. Returns `false` when the field is
	/// not a select menu or the index is out of range.
	pub fn select(&mut self, name: &str, index: usize) -> bool {
		let Some(ix) = self.fields.iter().position(|f| f.name() == name) else {
			return false;
		};
		if self.fields[ix].kind() != FieldKind::Select
			|| index >= self.fields[ix].options().len()
		{
			return false;
		}

		let field = &mut self.fields[ix];
		field.selected_index = Some(index);
		field.value = field.options[index].clone();
		for (i, option) in field.control.children_mut().iter_mut().enumerate() {
			if i == index {
				option.set_flag("selected");
			} else {
				option.clear_flag("selected");
			}
		}

		validate::validate(&mut self.fields[ix]);
		gate::set_button_state(self);
		true
	}

	/// Choose a select option by its text. Returns `false` when the field
	/// is not a select menu or the option is unknown.
	pub fn select_value(&mut self, name: &str, value: &str) -> bool {
		let Some(field) = self.fields.iter().find(|f| f.name() == name) else {
			return false;
		};
		let Some(index) = field.options().iter().position(|o| o == value) else {
			return false;
		};
		self.select(name, index)
	}

	/// Coarse form-level interaction: revalidate every rule-bearing field
	/// and recompute the gate. Covers pointer-driven changes that carry no
	/// field-level event of their own.
	pub fn revalidate_all(&mut self) {
		for field in &mut self.fields {
			if field.rule.is_some() {
				validate::validate(field);
			}
		}
		gate::set_button_state(self);
	}

	/// Advance every in-flight error message fade by one frame. Returns
	/// whether any fade is still running.
	pub fn tick(&mut self) -> bool {
		let mut active = false;
		for field in &mut self.fields {
			active |= validate::tick(field);
		}
		active
	}

	/// Attempt submission. The native form action is always intercepted;
	/// only a clear gate lets anything out: the callback when one was
	/// supplied, otherwise a [`FormPost`] handed to the transport.
	pub fn submit(&mut self) -> SubmitOutcome {
		if gate::errors_exist(self) {
			tracing::debug!("submit suppressed, gate reports errors");
			return SubmitOutcome::Blocked;
		}

		let payload = self.collect_values();
		if let Some(callback) = &mut self.callback {
			callback(payload.clone());
			return SubmitOutcome::Delivered(payload);
		}

		let post = FormPost {
			action: self.config.action.clone().unwrap_or_default(),
			method: "POST".to_string(),
			enctype: "multipart/form-data".to_string(),
			payload,
		};
		self.transport.deliver(&post);
		SubmitOutcome::Posted(post)
	}

	/// Flat name→value mapping of all form controls, the shape a native
	/// form data snapshot would produce.
	pub fn collect_values(&self) -> BTreeMap<String, String> {
		let mut values = BTreeMap::new();
		for (name, value) in &self.hidden_params {
			values.insert(name.clone(), value.clone());
		}
		for field in &self.fields {
			match field.kind() {
				FieldKind::Submit => {}
				// Unchecked boxes and unselected radios contribute nothing.
				FieldKind::Checkbox | FieldKind::Radio => {
					if !field.value().is_empty() {
						values.insert(field.name().to_string(), field.value().to_string());
					}
				}
				_ => {
					values.insert(field.name().to_string(), field.value().to_string());
				}
			}
		}
		values
	}

	/// Materialize the whole form as an element tree reflecting current
	/// state.
	pub fn element(&self) -> Element {
		let mut form = Element::new("form").with_class("webform");
		if let Some(id) = &self.config.id {
			form.set_attr("id", id);
		}
		if let Some(action) = &self.config.action {
			form.set_attr("method", "POST");
			form.set_attr("enctype", "multipart/form-data");
			form.set_attr("action", action);
		}

		for (name, value) in &self.hidden_params {
			let mut hidden = Element::new("input");
			hidden.set_attr("type", "hidden");
			hidden.set_attr("name", name);
			hidden.set_attr("value", value);
			form.append_child(hidden);
		}

		for (i, group) in self.groups.iter().enumerate() {
			let mut fieldset = Element::new("fieldset").with_class(format!("field-group{}", i));
			if let Some(legend) = &group.legend {
				fieldset.append_child(Element::new("legend").with_text(legend));
			}
			for &ix in &group.field_ixs {
				fieldset.append_child(self.fields[ix].element());
			}
			form.append_child(fieldset);
		}

		if self.has_submit {
			let mut button = Element::new("input");
			button.set_attr("type", "submit");
			button.set_attr("value", "Submit");
			if !self.submit_enabled {
				button.set_flag("disabled");
			}
			form.append_child(Element::new("div").with_class("form-submit").with_child(button));
		}

		form
	}

	/// Render the whole form as HTML.
	pub fn render(&self) -> String {
		self.element().render()
	}

	fn apply_value(field: &mut FieldHandle, value: &str) {
		field.value = value.to_string();
		match field.kind() {
			FieldKind::Textarea => field.control.set_text(value),
			FieldKind::Checkbox => {
				if let Some(input) = field
					.control
					.children_mut()
					.iter_mut()
					.find(|c| c.tag() == "input")
				{
					if value.is_empty() {
						input.clear_flag("checked");
					} else {
						input.set_attr("value", value);
						input.set_flag("checked");
					}
				}
			}
			FieldKind::Radio => {
				for input in field.control.children_mut() {
					if input.tag() != "input" {
						continue;
					}
					if input.attr("value") == Some(value) {
						input.set_flag("checked");
					} else {
						input.clear_flag("checked");
					}
				}
			}
			// No value attribute to mirror for file inputs.
			FieldKind::File => {}
			_ => field.control.set_attr("value", value),
		}
	}
}
