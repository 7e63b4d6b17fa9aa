use crate::tree::Kind;
use std::path::PathBuf;

/// Errors produced while mapping a value tree onto a Rust value.
///
/// Every variant carries the dotted path of the value being decoded when the
/// failure happened. The root path is the empty string.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	#[error("{path}: expected {expected}, found {found}")]
	ShapeMismatch {
		path: String,
		expected: &'static str,
		found: Kind,
	},

	#[error("cannot parse '{path}' as {target}")]
	ScalarParse {
		path: String,
		target: &'static str,
		#[source]
		source: ScalarError,
	},

	#[error("{path}: unsupported type to {target}: {found}")]
	UnsupportedCoercion {
		path: String,
		target: &'static str,
		found: Kind,
	},

	#[error("{path}: unsupported target type: {target}")]
	UnsupportedTargetKind { path: String, target: &'static str },

	#[error("{path}: invalid field '{field}': {reason}")]
	Configuration {
		path: String,
		field: String,
		reason: &'static str,
	},
}

impl DecodeError {
	/// Dotted path of the value that failed to decode.
	pub fn path(&self) -> &str {
		match self {
			DecodeError::ShapeMismatch { path, .. }
			| DecodeError::ScalarParse { path, .. }
			| DecodeError::UnsupportedCoercion { path, .. }
			| DecodeError::UnsupportedTargetKind { path, .. }
			| DecodeError::Configuration { path, .. } => path,
		}
	}
}

/// Failures of the string-to-scalar conversions.
#[derive(Debug, thiserror::Error)]
pub enum ScalarError {
	#[error("invalid boolean literal: {0:?}")]
	InvalidBool(String),

	#[error(transparent)]
	InvalidInt(#[from] std::num::ParseIntError),

	#[error("value {value} out of range for {bits}-bit integer")]
	OutOfRange { value: String, bits: u32 },
}

/// Errors produced by the configuration reader.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
	#[error("line {line}, column {column}: {message}")]
	Syntax {
		line: usize,
		column: usize,
		message: String,
	},

	#[error("Failed to read config file: {path}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("line {line}: unknown macro '.{name}'")]
	UnknownMacro { name: String, line: usize },

	#[error("line {line}: macro '.{name}' rejected its argument")]
	MacroFailed { name: String, line: usize },
}

/// Result type alias using DecodeError.
pub type Result<T> = std::result::Result<T, DecodeError>;
