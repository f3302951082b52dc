//! Form lifecycle tests
//!
//! End-to-end coverage of assembly, per-field validation, the submit
//! gate, and submission delivery.

use rstest::rstest;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use webform::{
	FieldDescriptor, FieldGroup, FieldKind, FormConfig, FormPost, SubmitOutcome,
	SubmitTransport, Webform, WebformError, FADE_STEP,
};

fn signup_config() -> FormConfig {
	FormConfig::new("https://www.domain.com/handler")
		.with_id("webform")
		.with_group(
			FieldGroup::new()
				.with_legend("Sign Up")
				.with_field(
					FieldDescriptor::new(FieldKind::Text, "username")
						.with_label("Username")
						.with_maxlength(15)
						.with_filter("^[A-Za-z0-9_]+$")
						.with_error("Supported characters: A-Z, 0-9 and underscore")
						.required(),
				)
				.with_field(
					FieldDescriptor::new(FieldKind::Password, "password")
						.with_label("Password")
						.with_filter("^.{8,}$")
						.with_error("Must be at least 8 characters")
						.required(),
				),
		)
}

#[derive(Default)]
struct RecordingTransport {
	posts: Rc<RefCell<Vec<FormPost>>>,
}

impl SubmitTransport for RecordingTransport {
	fn deliver(&mut self, post: &FormPost) {
		self.posts.borrow_mut().push(post.clone());
	}
}

#[rstest]
fn test_text_field_error_lifecycle() {
	let mut form = Webform::init(signup_config(), None).unwrap();

	// Invalid input flags the field and shows the error copy.
	form.set_value("username", "john doe!");
	let field = form.field("username").unwrap();
	assert!(field.invalid());
	assert_eq!(
		field.message(),
		Some("Supported characters: A-Z, 0-9 and underscore")
	);

	let elm = field.element();
	let control = elm.find_by_attr("name", "username").unwrap();
	assert!(control.has_class("error-on"));
	assert_eq!(control.attr("aria-describedby"), Some("error-username"));
	let message = elm.find_by_class("error-message").unwrap();
	assert_eq!(message.attr("id"), Some("error-username"));
	assert_eq!(message.attr("aria-invalid"), Some("true"));

	// A matching value clears the flag and fades the message out.
	form.set_value("username", "john_doe");
	assert!(!form.field("username").unwrap().invalid());
	while form.tick() {}
	assert_eq!(form.field("username").unwrap().message(), None);

	let elm = form.field("username").unwrap().element();
	let control = elm.find_by_attr("name", "username").unwrap();
	assert!(!control.has_class("error-on"));
	assert!(elm.find_by_class("error-message").is_none());
}

#[rstest]
fn test_error_message_fades_in_over_frames() {
	let mut form = Webform::init(signup_config(), None).unwrap();
	form.set_value("password", "short");

	// Ten frames at FADE_STEP reach full opacity, then the fade stops.
	let mut frames = 0;
	while form.tick() {
		frames += 1;
		assert!(frames <= (1.0 / FADE_STEP) as usize + 1);
	}
	assert!(form.field("password").unwrap().message().is_some());
}

#[rstest]
fn test_correction_mid_fade_cancels_cleanly() {
	let mut form = Webform::init(signup_config(), None).unwrap();
	form.set_value("password", "short");
	form.tick();
	form.tick();

	// Correcting while the fade-in is still running reverses it; the
	// message drains away instead of finishing its entrance.
	form.set_value("password", "long enough now");
	while form.tick() {}
	assert_eq!(form.field("password").unwrap().message(), None);
	assert!(!form.field("password").unwrap().invalid());
}

#[rstest]
fn test_gate_tracks_every_field() {
	let mut form = Webform::init(signup_config(), None).unwrap();
	assert!(!form.submit_enabled());

	form.set_value("username", "john_doe");
	assert!(!form.submit_enabled());

	form.set_value("password", "hunter22letters");
	assert!(form.submit_enabled());

	// One field going invalid re-arms the gate even though the other
	// still passes.
	form.set_value("username", "john doe!");
	assert!(!form.submit_enabled());
}

#[rstest]
fn test_required_select_gates_on_placeholder() {
	let config = FormConfig::new("/post").with_group(
		FieldGroup::new().with_field(
			FieldDescriptor::new(FieldKind::Select, "age")
				.with_label("Age group")
				.with_filter("18-24|25-34|35-44")
				.required(),
		),
	);
	let mut form = Webform::init(config, None).unwrap();

	// The injected placeholder sits at index 0, so the gate starts armed.
	assert!(!form.submit_enabled());

	assert!(form.select_value("age", "18-24"));
	assert!(form.submit_enabled());

	assert!(form.select("age", 0));
	assert!(!form.submit_enabled());
}

#[rstest]
fn test_select_placeholder_from_configured_value() {
	let config = FormConfig::new("/post").with_group(
		FieldGroup::new().with_field(
			FieldDescriptor::new(FieldKind::Select, "age")
				.with_value("Select an age group")
				.with_filter("18-24|25-34"),
		),
	);
	let form = Webform::init(config, None).unwrap();

	let elm = form.field("age").unwrap().element();
	let select = elm.find_by_class("menu").unwrap();
	let first = &select.children()[0];
	assert_eq!(first.text(), Some("Select an age group"));
	assert_eq!(first.attr("value"), None);
	assert!(first.has_flag("selected"));
}

#[rstest]
fn test_params_become_hidden_inputs_and_ride_the_payload() {
	let config = signup_config().with_params("id=123&key=value");
	let mut form = Webform::init(config, None).unwrap();

	let html = form.render();
	assert!(html.contains("type=\"hidden\""));
	assert!(html.contains("name=\"id\""));
	assert!(html.contains("value=\"123\""));

	form.set_value("username", "john_doe");
	form.set_value("password", "hunter22letters");
	match form.submit() {
		SubmitOutcome::Posted(post) => {
			assert_eq!(post.payload.get("id").map(String::as_str), Some("123"));
			assert_eq!(post.payload.get("key").map(String::as_str), Some("value"));
			assert_eq!(
				post.payload.get("username").map(String::as_str),
				Some("john_doe")
			);
		}
		other => panic!("expected a post, got {:?}", other),
	}
}

#[rstest]
fn test_single_param_yields_exactly_one_hidden_input() {
	let config = signup_config().with_params("token=00112233-4455-6677-8899-aabbccddeeff");
	let form = Webform::init(config, None).unwrap();

	let elm = form.element();
	let hidden = elm.find_all(&|e| e.attr("type") == Some("hidden"));
	assert_eq!(hidden.len(), 1);
	assert_eq!(hidden[0].attr("name"), Some("token"));
	assert_eq!(
		hidden[0].attr("value"),
		Some("00112233-4455-6677-8899-aabbccddeeff")
	);
}

#[rstest]
fn test_submit_blocked_while_gate_armed() {
	let mut form = Webform::init(signup_config(), None).unwrap();
	assert_eq!(form.submit(), SubmitOutcome::Blocked);
}

#[rstest]
fn test_submit_prefers_callback_over_transport() {
	let received = Rc::new(RefCell::new(None));
	let sink = Rc::clone(&received);
	let posts = Rc::new(RefCell::new(vec![]));

	let mut form = Webform::init(
		signup_config(),
		Some(Box::new(move |values| {
			*sink.borrow_mut() = Some(values);
		})),
	)
	.unwrap()
	.with_transport(Box::new(RecordingTransport {
		posts: Rc::clone(&posts),
	}));

	form.set_value("username", "john_doe");
	form.set_value("password", "hunter22letters");

	assert!(matches!(form.submit(), SubmitOutcome::Delivered(_)));
	let values = received.borrow().clone().unwrap();
	assert_eq!(values.get("username").map(String::as_str), Some("john_doe"));
	assert!(posts.borrow().is_empty());
}

#[rstest]
fn test_submit_posts_through_transport_without_callback() {
	let posts = Rc::new(RefCell::new(vec![]));
	let mut form = Webform::init(signup_config(), None)
		.unwrap()
		.with_transport(Box::new(RecordingTransport {
			posts: Rc::clone(&posts),
		}));

	form.set_value("username", "john_doe");
	form.set_value("password", "hunter22letters");
	assert!(matches!(form.submit(), SubmitOutcome::Posted(_)));

	let posts = posts.borrow();
	assert_eq!(posts.len(), 1);
	assert_eq!(posts[0].action, "https://www.domain.com/handler");
	assert_eq!(posts[0].method, "POST");
	assert_eq!(posts[0].enctype, "multipart/form-data");
}

#[rstest]
#[case::radio(FieldKind::Radio, "radios")]
#[case::checkbox(FieldKind::Checkbox, "checkbox")]
fn test_choice_controls_get_their_wrapper_class(
	#[case] kind: FieldKind,
	#[case] class: &str,
) {
	let mut descriptor = FieldDescriptor::new(kind, "choice").with_label("Pick one");
	if kind == FieldKind::Radio {
		descriptor = descriptor.with_filter("red|blue");
	}
	let config = FormConfig::new("/post").with_group(FieldGroup::new().with_field(descriptor));
	let form = Webform::init(config, None).unwrap();

	let elm = form.field("choice").unwrap().element();
	assert!(elm.find_by_class(class).is_some());
}

#[rstest]
fn test_config_deserializes_from_json() {
	let config: FormConfig = serde_json::from_value(json!({
		"action": "https://www.domain.com/handler",
		"params": "id=123",
		"groups": [{
			"legend": "Login",
			"fields": [{
				"type": "text",
				"name": "username",
				"label": "Username",
				"required": 1,
				"filter": "^[a-z]+$",
				"error": "Lowercase letters only"
			}]
		}]
	}))
	.unwrap();

	let form = Webform::init(config, None).unwrap();
	let field = form.field("username").unwrap();
	// The legacy numeric flag still reads as required.
	assert!(field.is_required());
	assert_eq!(field.kind(), FieldKind::Text);
}

#[rstest]
fn test_legacy_flat_fields_form_a_single_group() {
	let config: FormConfig = serde_json::from_value(json!({
		"action": "/post",
		"fields": [
			{"type": "text", "name": "first"},
			{"type": "text", "name": "last"}
		]
	}))
	.unwrap();

	let form = Webform::init(config, None).unwrap();
	assert_eq!(form.fields().len(), 2);
	assert!(form.element().find_by_class("field-group0").is_some());
	assert!(form.element().find_by_class("field-group1").is_none());
}

#[rstest]
fn test_legacy_nested_fields_form_one_group_each() {
	let config: FormConfig = serde_json::from_value(json!({
		"action": "/post",
		"fields": [
			[{"type": "text", "name": "first"}],
			[{"type": "text", "name": "last"}]
		]
	}))
	.unwrap();

	let form = Webform::init(config, None).unwrap();
	assert!(form.element().find_by_class("field-group1").is_some());
}

#[rstest]
fn test_bad_filter_pattern_fails_assembly() {
	let config = FormConfig::new("/post").with_group(
		FieldGroup::new()
			.with_field(FieldDescriptor::new(FieldKind::Text, "code").with_filter("([")),
	);
	match Webform::init(config, None) {
		Err(WebformError::InvalidPattern { name, .. }) => assert_eq!(name, "code"),
		other => panic!("expected InvalidPattern, got {:?}", other.err()),
	}
}

#[rstest]
fn test_render_disables_trigger_until_gate_clears() {
	let mut form = Webform::init(signup_config(), None).unwrap();
	assert!(form.render().contains("disabled"));

	form.set_value("username", "john_doe");
	form.set_value("password", "hunter22letters");
	assert!(!form.render().contains("disabled"));
}
