//! Decoding value trees into Rust values.
//!
//! This module handles:
//! - The [`Decode`] trait, implemented once per target shape
//! - Scalar coercion (booleans, sized integers, strings)
//! - Container builders (slices, string-keyed maps, pointers, dynamic values)
//! - Struct field plans and their directives

pub mod any;
pub mod container;
pub mod plan;
pub mod scalar;

pub use any::AnyValue;
pub use plan::{DecodeStruct, FieldBuilder, FieldPlan, decode_struct};

use crate::error::Result;
use crate::tree::Object;
use std::fmt;

/// The closed set of target shapes the decoder dispatches over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
	Bool,
	Int,
	String,
	Slice,
	Map,
	Pointer,
	Any,
	Struct,
	/// Types that may appear in a field plan but cannot be decoded into.
	Unsupported,
}

/// A value that can be filled in from a configuration tree.
///
/// `decode` handles one handle as given. `decode_blocks` handles a whole
/// key-group and decides the cardinality policy for repeated blocks: by
/// default each block is decoded into the same value in order, so later
/// blocks compose with (or overwrite) earlier ones.
pub trait Decode {
	fn shape() -> Shape
	where
		Self: Sized;

	fn decode(&mut self, path: &str, obj: &Object) -> Result<()>;

	fn decode_blocks(&mut self, path: &str, obj: &Object) -> Result<()> {
		for block in obj.iter(false) {
			self.decode(path, &block)?;
		}
		Ok(())
	}

	/// The field plan of a struct target; `None` for every other shape.
	fn field_plan() -> Option<FieldPlan<Self>>
	where
		Self: Sized,
	{
		None
	}
}

/// Decode a tree into `target`.
///
/// Decoding is fail-fast: the first error aborts, and `target` may be left
/// partially filled.
pub fn decode<T: Decode>(tree: &Object, target: &mut T) -> Result<()> {
	target.decode_blocks("", tree)
}

/// Path of a struct field; the root is not dot-joined.
pub(crate) fn field_path(path: &str, name: &str) -> String {
	if path.is_empty() {
		name.to_string()
	} else {
		format!("{path}.{name}")
	}
}

/// Path of a map entry or slice element.
pub(crate) fn index_path(path: &str, index: impl fmt::Display) -> String {
	format!("{path}[{index}]")
}
