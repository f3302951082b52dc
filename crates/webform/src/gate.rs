//! Aggregate submit gate.
//!
//! The gate is a pure scan over field state. It answers one question,
//! "do errors exist right now", and the answer drives the submit
//! trigger's disabled state and whether [`Webform::submit`] lets
//! anything out.
//!
//! [`Webform::submit`]: crate::Webform::submit

use crate::config::FieldKind;
use crate::form::Webform;

/// Scan every field and report whether anything blocks submission.
///
/// A field blocks when it is required and still empty (for select menus,
/// when the placeholder at index 0 is still chosen) or when it carries an
/// active validation error. Kinds that never hold user input are skipped.
pub fn errors_exist(form: &Webform) -> bool {
	for field in form.fields() {
		if !field.kind().is_gate_relevant() {
			continue;
		}

		let unfilled = field.is_required()
			&& (field.value().is_empty()
				|| (field.kind() == FieldKind::Select
					&& field.selected_index().unwrap_or(0) == 0));

		if unfilled || field.invalid() {
			tracing::trace!(field = %field.name(), "gate blocked");
			return true;
		}
	}
	false
}

/// Sync the submit trigger with the gate. A form built without a submit
/// trigger keeps gate bookkeeping but has no button to toggle.
pub(crate) fn set_button_state(form: &mut Webform) {
	let errored = errors_exist(form);
	form.submit_enabled = !errored;
	if form.has_submit {
		tracing::trace!(enabled = form.submit_enabled, "submit trigger state");
	}
}
