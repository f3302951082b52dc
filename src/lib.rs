//! Webform-Toolkit facade crate.
//!
//! Re-exports the member crates so a consumer can depend on a single
//! package:
//!
//! - [`webform`]: configuration model, field factory, field validator,
//!   form assembler, and submission gate.
//! - [`dom`]: the element tree the factory renders into, with HTML
//!   output and tree queries.
//!
//! # Examples
//!
//! ```
//! use webform_toolkit::{FieldDescriptor, FieldGroup, FieldKind, FormConfig, Webform};
//!
//! let config = FormConfig::new("https://www.domain.com/handler")
//! 	.with_group(
//! 		FieldGroup::new().with_field(
//! 			FieldDescriptor::new(FieldKind::Text, "username")
//! 				.with_label("Username")
//! 				.required(),
//! 		),
//! 	);
//!
//! let form = Webform::init(config, None).unwrap();
//! assert!(!form.submit_enabled());
//! ```

pub use webform::*;
pub use webform_dom as dom;
