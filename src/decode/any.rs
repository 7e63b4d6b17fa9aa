use crate::decode::{Decode, Shape, index_path};
use crate::error::{DecodeError, Result};
use crate::tree::{Kind, Object};
use serde::Serialize;
use std::collections::BTreeMap;

/// A schema-less decoded value.
///
/// Objects never collapse their repeated blocks: an object decodes to one
/// mapping per block, so `bar { a = 1 }; bar { b = 2 }` yields two mappings
/// under `bar`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyValue {
	#[default]
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	Sequence(Vec<AnyValue>),
	Mappings(Vec<BTreeMap<String, AnyValue>>),
}

impl AnyValue {
	pub fn is_null(&self) -> bool {
		matches!(self, AnyValue::Null)
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			AnyValue::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			AnyValue::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			AnyValue::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_sequence(&self) -> Option<&[AnyValue]> {
		match self {
			AnyValue::Sequence(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_mappings(&self) -> Option<&[BTreeMap<String, AnyValue>]> {
		match self {
			AnyValue::Mappings(maps) => Some(maps),
			_ => None,
		}
	}
}

impl From<bool> for AnyValue {
	fn from(b: bool) -> Self {
		AnyValue::Bool(b)
	}
}

impl From<i64> for AnyValue {
	fn from(i: i64) -> Self {
		AnyValue::Int(i)
	}
}

impl From<f64> for AnyValue {
	fn from(f: f64) -> Self {
		AnyValue::Float(f)
	}
}

impl From<&str> for AnyValue {
	fn from(s: &str) -> Self {
		AnyValue::String(s.to_string())
	}
}

impl<T: Into<AnyValue>> From<Vec<T>> for AnyValue {
	fn from(items: Vec<T>) -> Self {
		AnyValue::Sequence(items.into_iter().map(Into::into).collect())
	}
}

impl Decode for AnyValue {
	fn shape() -> Shape {
		Shape::Any
	}

	fn decode(&mut self, path: &str, obj: &Object) -> Result<()> {
		*self = match obj.kind() {
			Kind::Null => AnyValue::Null,
			Kind::Bool => AnyValue::Bool(obj.to_bool()),
			Kind::Int => AnyValue::Int(obj.to_int()),
			Kind::Float => AnyValue::Float(obj.to_float()),
			Kind::String => AnyValue::String(obj.to_str().unwrap_or_default().to_string()),
			Kind::Array => {
				let mut items = Vec::with_capacity(obj.len());
				for (i, elem) in obj.iter(true).enumerate() {
					let mut item = AnyValue::Null;
					item.decode_blocks(&index_path(path, i), &elem)?;
					items.push(item);
				}
				AnyValue::Sequence(items)
			}
			Kind::Object => {
				let mut mappings = Vec::new();
				for block in obj.iter(false) {
					if block.kind() != Kind::Object {
						return Err(DecodeError::ShapeMismatch {
							path: path.to_string(),
							expected: "object",
							found: block.kind(),
						});
					}

					let mut mapping = BTreeMap::new();
					for entry in block.iter(true) {
						let mut value = AnyValue::Null;
						value.decode_blocks(&index_path(path, entry.key()), &entry)?;
						mapping.insert(entry.key().to_string(), value);
					}
					mappings.push(mapping);
				}
				AnyValue::Mappings(mappings)
			}
		};
		Ok(())
	}

	/// Object groups are kept whole so that every block becomes a mapping;
	/// any other group resolves last-write-wins.
	fn decode_blocks(&mut self, path: &str, obj: &Object) -> Result<()> {
		if obj.kind() == Kind::Object {
			return self.decode(path, obj);
		}
		for block in obj.iter(false) {
			self.decode(path, &block)?;
		}
		Ok(())
	}
}
