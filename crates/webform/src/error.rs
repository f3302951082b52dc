//! Error taxonomy.
//!
//! Structural and configuration problems are errors; a field failing its
//! validation rule is state on the handle, never an error.

/// Fatal construction-time failures.
#[derive(Debug, thiserror::Error)]
pub enum WebformError {
	/// Mandatory settings (action, field groups) are absent or empty.
	#[error("failed to initialize (missing settings)")]
	Initialization,

	/// A field descriptor names a kind outside the supported vocabulary.
	/// Aborts assembly of the enclosing form.
	#[error("invalid or missing field type: '{kind}'")]
	UnsupportedFieldKind { kind: String },

	/// The incremental append API was given an unusable descriptor, or the
	/// target form has nowhere to put the field.
	#[error("failed to create field (malformed config): {reason}")]
	MalformedFieldConfig { reason: String },

	/// A validation rule does not compile. Rules are compiled once at field
	/// creation, so a bad pattern surfaces before the form ever renders.
	#[error("invalid filter pattern for field '{name}'")]
	InvalidPattern {
		name: String,
		#[source]
		source: regex::Error,
	},
}

pub type WebformResult<T> = Result<T, WebformError>;
