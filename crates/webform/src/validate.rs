//! Per-field validation state machine.
//!
//! Two states per field, Valid and Invalid, with transitions driven by
//! whether the rule pattern is found in the current value. Repeated
//! identical input causes no transition, so there is nothing to flicker.
//! The error message fades in and out one step per animation frame; a
//! state flip mid-fade cancels the in-flight fade by redirecting it, and
//! `invalid` always flips synchronously before any fade starts, so the
//! submission gate never depends on animation state.

use crate::handle::{ErrorMessage, FieldHandle};

/// Opacity change per animation frame.
pub const FADE_STEP: f32 = 0.1;

/// Direction of an in-flight error message fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
	In,
	Out,
}

/// Re-check a field's value against its rule, toggling error state.
///
/// - An empty value causes no transition: an empty optional field is never
///   flagged here; required-but-empty is the aggregate gate's business.
/// - The pattern is searched for anywhere in the value (not anchored).
/// - Valid→Invalid attaches the error message and flags the control;
///   Invalid→Valid clears the flags and starts the message fading out.
///
/// Returns whether the field is free of error after the check.
pub fn validate(handle: &mut FieldHandle) -> bool {
	if handle.value.is_empty() {
		return !handle.invalid;
	}
	let Some(rule) = &handle.rule else {
		return !handle.invalid;
	};

	let matched = rule.pattern.is_match(&handle.value);

	if !matched && !handle.invalid {
		let message = rule.message.clone();
		handle.invalid = true;
		flag_control(handle);
		// Cancels any fade-out still running from a previous recovery.
		handle.message = Some(ErrorMessage {
			text: message,
			opacity: 0.0,
			fade: Some(FadeDirection::In),
		});
		tracing::trace!(field = %handle.name, "field flagged invalid");
	} else if matched && handle.invalid {
		handle.invalid = false;
		unflag_control(handle);
		if let Some(message) = &mut handle.message {
			message.fade = Some(FadeDirection::Out);
		}
		tracing::trace!(field = %handle.name, "field recovered");
	}

	!handle.invalid
}

/// Advance an in-flight fade by one frame. Returns whether a fade is
/// still running afterwards. The message element is removed when its
/// fade-out completes.
pub(crate) fn tick(handle: &mut FieldHandle) -> bool {
	let Some(message) = &mut handle.message else {
		return false;
	};
	match message.fade {
		Some(FadeDirection::In) => {
			message.opacity += FADE_STEP;
			if message.opacity >= 1.0 {
				message.opacity = 1.0;
				message.fade = None;
			}
			message.fade.is_some()
		}
		Some(FadeDirection::Out) => {
			message.opacity -= FADE_STEP;
			if message.opacity < FADE_STEP {
				handle.message = None;
				false
			} else {
				true
			}
		}
		None => false,
	}
}

fn flag_control(handle: &mut FieldHandle) {
	let error_id = format!("error-{}", handle.dom_id());
	handle.control.add_class("error-on");
	handle.control.set_attr("aria-describedby", error_id);
	handle.control.set_attr("aria-invalid", "true");
}

fn unflag_control(handle: &mut FieldHandle) {
	handle.control.remove_class("error-on");
	handle.control.remove_attr("aria-describedby");
	handle.control.remove_attr("aria-invalid");
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{FieldDescriptor, FieldKind};
	use crate::factory::create_field;
	use crate::handle::FieldHandle;

	fn username_field() -> FieldHandle {
		create_field(
			&FieldDescriptor::new(FieldKind::Text, "username")
				.with_filter("^[A-Za-z0-9_]+$")
				.with_error("Supported characters: A-Z, 0-9 and underscore"),
		)
		.unwrap()
	}

	fn settle(handle: &mut FieldHandle) {
		while tick(handle) {}
	}

	#[test]
	fn test_empty_value_never_transitions() {
		let mut handle = username_field();
		assert!(validate(&mut handle));
		assert!(!handle.invalid());
		assert!(handle.message().is_none());
	}

	#[test]
	fn test_valid_to_invalid_transition() {
		let mut handle = username_field();
		handle.value = "user!@#$%".to_string();

		assert!(!validate(&mut handle));
		assert!(handle.invalid());
		assert_eq!(
			handle.message(),
			Some("Supported characters: A-Z, 0-9 and underscore")
		);

		let elm = handle.element();
		let control = elm.find_by_tag("input")[0];
		assert!(control.has_class("error-on"));
		assert_eq!(control.attr("aria-invalid"), Some("true"));
		assert_eq!(control.attr("aria-describedby"), Some("error-username"));
	}

	#[test]
	fn test_invalid_to_valid_transition_removes_message() {
		let mut handle = username_field();
		handle.value = "user!@#$%".to_string();
		validate(&mut handle);
		settle(&mut handle);

		handle.value = "newuser".to_string();
		assert!(validate(&mut handle));
		assert!(!handle.invalid());
		settle(&mut handle);
		assert!(handle.message().is_none());

		let elm = handle.element();
		let control = elm.find_by_tag("input")[0];
		assert!(!control.has_class("error-on"));
		assert_eq!(control.attr("aria-invalid"), None);
	}

	#[test]
	fn test_validate_is_idempotent() {
		let mut handle = username_field();
		handle.value = "user!@#$%".to_string();
		validate(&mut handle);
		settle(&mut handle);

		let before = handle.element();
		validate(&mut handle);
		assert_eq!(handle.element(), before);
	}

	#[test]
	fn test_pattern_is_searched_not_anchored() {
		let mut handle = create_field(
			&FieldDescriptor::new(FieldKind::Text, "code")
				.with_filter("[0-9]{3}")
				.with_error("Needs three digits"),
		)
		.unwrap();

		handle.value = "abc123xyz".to_string();
		assert!(validate(&mut handle));
		assert!(!handle.invalid());
	}

	#[test]
	fn test_fade_in_runs_to_full_opacity() {
		let mut handle = username_field();
		handle.value = "!".to_string();
		validate(&mut handle);

		let mut frames = 0;
		while tick(&mut handle) {
			frames += 1;
			assert!(frames < 20, "fade-in did not terminate");
		}
		assert_eq!(handle.message(), Some("Supported characters: A-Z, 0-9 and underscore"));
	}

	#[test]
	fn test_state_flip_mid_fade_cancels_fade_in() {
		let mut handle = username_field();
		handle.value = "!".to_string();
		validate(&mut handle);
		// A few frames into the fade-in, the user fixes the value.
		tick(&mut handle);
		tick(&mut handle);

		handle.value = "fixed".to_string();
		validate(&mut handle);
		assert!(!handle.invalid());

		settle(&mut handle);
		assert!(handle.message().is_none());
	}

	#[test]
	fn test_field_without_rule_stays_valid() {
		let mut handle =
			create_field(&FieldDescriptor::new(FieldKind::Text, "nickname")).unwrap();
		handle.value = "anything at all".to_string();
		assert!(validate(&mut handle));
		assert!(!handle.invalid());
	}
}
