//! Declarative web forms with inline validation.
//!
//! A form is described as data: an ordered list of field groups, each
//! holding field descriptors (kind, name, label, validation filter,
//! error copy). [`Webform::init`] turns that description into a live
//! instance that renders an element tree, validates individual fields
//! as their values change, and gates submission on the aggregate state
//! of the whole form.
//!
//! # Examples
//!
//! ```
//! use webform::{FieldDescriptor, FieldGroup, FieldKind, FormConfig, Webform};
//!
//! let config = FormConfig::new("https://www.domain.com/handler")
//! 	.with_id("webform")
//! 	.with_group(
//! 		FieldGroup::new().with_legend("Login").with_field(
//! 			FieldDescriptor::new(FieldKind::Text, "username")
//! 				.with_label("Username")
//! 				.with_filter("^[A-Za-z0-9_]+$")
//! 				.with_error("Supported characters: A-Z, 0-9 and underscore")
//! 				.required(),
//! 		),
//! 	);
//!
//! let mut form = Webform::init(config, None)?;
//! form.set_value("username", "john_doe");
//! assert!(form.submit_enabled());
//!
//! let html = form.render();
//! assert!(html.contains("class=\"webform\""));
//! # Ok::<(), webform::WebformError>(())
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod form;
pub mod gate;
pub mod handle;
pub mod submit;
pub mod validate;

pub use config::{FieldDescriptor, FieldGroup, FieldKind, FormConfig};
pub use error::{WebformError, WebformResult};
pub use factory::create_field;
pub use form::{SubmitCallback, Webform};
pub use gate::errors_exist;
pub use handle::{FieldHandle, Rule};
pub use submit::{FormPost, NativeSubmit, SubmitOutcome, SubmitTransport};
pub use validate::{validate, FADE_STEP};
