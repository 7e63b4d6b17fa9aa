use crate::decode::{Decode, Shape, index_path};
use crate::error::{DecodeError, Result};
use crate::tree::{Kind, Object};
use std::collections::{BTreeMap, HashMap};

/// Objects contribute one element per block; arrays and scalars are expanded
/// into one element per item. The slice is rebuilt on every decode.
impl<T: Decode + Default> Decode for Vec<T> {
	fn shape() -> Shape {
		Shape::Slice
	}

	fn decode(&mut self, path: &str, obj: &Object) -> Result<()> {
		let expand = obj.kind() != Kind::Object;
		let mut items = Vec::with_capacity(obj.len());
		for (i, elem) in obj.iter(expand).enumerate() {
			let mut item = T::default();
			item.decode_blocks(&index_path(path, i), &elem)?;
			items.push(item);
		}

		*self = items;
		Ok(())
	}

	fn decode_blocks(&mut self, path: &str, obj: &Object) -> Result<()> {
		self.decode(path, obj)
	}
}

/// Decode every key-group of every block into the map, reusing entries that
/// are already present so that repeated blocks accumulate.
macro_rules! decode_map {
	($($map:ident),+) => {$(
		impl<T: Decode + Default> Decode for $map<String, T> {
			fn shape() -> Shape {
				Shape::Map
			}

			fn decode(&mut self, path: &str, obj: &Object) -> Result<()> {
				for block in obj.iter(false) {
					if block.kind() != Kind::Object {
						return Err(DecodeError::ShapeMismatch {
							path: path.to_string(),
							expected: "object",
							found: block.kind(),
						});
					}

					for entry in block.iter(true) {
						let key = entry.key().to_string();
						let mut value = self.remove(&key).unwrap_or_default();
						value.decode_blocks(&index_path(path, &key), &entry)?;
						self.insert(key, value);
					}
				}
				Ok(())
			}
		}
	)+};
}

decode_map!(HashMap, BTreeMap);

/// Every decode allocates a fresh pointee, so each repeated block replaces
/// the one before it.
impl<T: Decode + Default> Decode for Box<T> {
	fn shape() -> Shape {
		Shape::Pointer
	}

	fn decode(&mut self, path: &str, obj: &Object) -> Result<()> {
		let mut value = T::default();
		value.decode(path, obj)?;
		*self = Box::new(value);
		Ok(())
	}
}

impl<T: Decode + Default> Decode for Option<T> {
	fn shape() -> Shape {
		Shape::Pointer
	}

	fn decode(&mut self, path: &str, obj: &Object) -> Result<()> {
		let mut value = T::default();
		value.decode(path, obj)?;
		*self = Some(value);
		Ok(())
	}
}
