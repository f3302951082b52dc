//! Submit interception and hand-off.
//!
//! The form's native submission is always intercepted; when the gate is
//! clear and no callback was supplied, the collected values are described
//! as a [`FormPost`] and handed to a [`SubmitTransport`] fire-and-forget.
//! Delivery failure is invisible to the form.

use std::collections::BTreeMap;

/// A network submission the host should perform.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPost {
	pub action: String,
	pub method: String,
	pub enctype: String,
	pub payload: BTreeMap<String, String>,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
	/// The gate reported errors; nothing was invoked or posted.
	Blocked,
	/// The caller-supplied callback received the collected values.
	Delivered(BTreeMap<String, String>),
	/// No callback was supplied; the post was handed to the transport.
	Posted(FormPost),
}

/// Seam through which a real network submission leaves the form.
pub trait SubmitTransport {
	/// Fire-and-forget delivery. No retry, no timeout, no result.
	fn deliver(&mut self, post: &FormPost);
}

/// Default hand-off: the host environment owns the actual POST, exactly
/// as a browser owns a native form submission.
#[derive(Debug, Default)]
pub struct NativeSubmit;

impl SubmitTransport for NativeSubmit {
	fn deliver(&mut self, post: &FormPost) {
		tracing::debug!(action = %post.action, fields = post.payload.len(), "form post handed to host");
	}
}
