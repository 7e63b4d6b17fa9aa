use std::fmt;
use std::sync::Arc;

/// The kind of value a node holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	Null,
	Bool,
	Int,
	Float,
	String,
	Array,
	Object,
}

impl Kind {
	/// Lowercase name used in error messages.
	pub fn as_str(&self) -> &'static str {
		match self {
			Kind::Null => "null",
			Kind::Bool => "bool",
			Kind::Int => "int",
			Kind::Float => "float",
			Kind::String => "string",
			Kind::Array => "array",
			Kind::Object => "object",
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone)]
pub(crate) enum Value {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	Array(Vec<Arc<Node>>),
	/// First block of every key-group, in order of first appearance.
	Object(Vec<Arc<Node>>),
}

#[derive(Debug)]
pub(crate) struct Node {
	pub(crate) key: String,
	pub(crate) value: Value,
	/// Next block of the same key-group.
	pub(crate) next: Option<Arc<Node>>,
}

impl Node {
	fn kind(&self) -> Kind {
		match self.value {
			Value::Null => Kind::Null,
			Value::Bool(_) => Kind::Bool,
			Value::Int(_) => Kind::Int,
			Value::Float(_) => Kind::Float,
			Value::String(_) => Kind::String,
			Value::Array(_) => Kind::Array,
			Value::Object(_) => Kind::Object,
		}
	}
}

/// A shared handle on a node of a parsed configuration tree.
///
/// Handles are cheap to clone and keep the node they point at alive, even
/// after the tree's root handle is dropped. A handle returned by [`Object::get`]
/// or by expanded iteration covers the whole key-group (the entry plus every
/// later entry repeating its key); a handle returned by block iteration covers
/// exactly one block.
///
/// Two handles compare equal when they point at the same node.
#[derive(Clone)]
pub struct Object {
	node: Arc<Node>,
	group: bool,
}

impl Object {
	pub(crate) fn group(node: Arc<Node>) -> Self {
		Object { node, group: true }
	}

	pub(crate) fn block(node: Arc<Node>) -> Self {
		Object { node, group: false }
	}

	/// Kind of the value (of the first block, for key-groups).
	pub fn kind(&self) -> Kind {
		self.node.kind()
	}

	/// The key this value was stored under, or `""` for the root and array
	/// elements.
	pub fn key(&self) -> &str {
		&self.node.key
	}

	/// Number of key-groups of an object, elements of an array, or 1 for a
	/// scalar.
	pub fn len(&self) -> usize {
		match &self.node.value {
			Value::Array(items) | Value::Object(items) => items.len(),
			_ => 1,
		}
	}

	/// Whether the object or array has no entries. Scalars are never empty.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Number of blocks this handle covers.
	pub fn block_count(&self) -> usize {
		self.blocks().count()
	}

	/// Look up a direct child by exact key.
	///
	/// Returns the first key-group with that key, searching the handle's
	/// blocks in order.
	pub fn get(&self, key: &str) -> Option<Object> {
		self.blocks().find_map(|block| match &block.value {
			Value::Object(children) => children
				.iter()
				.find(|child| child.key == key)
				.map(|child| Object::group(Arc::clone(child))),
			_ => None,
		})
	}

	/// Iterate over the handle's contents.
	///
	/// Without expansion this yields one handle per block. With expansion the
	/// blocks are flattened: objects yield one handle per distinct key, arrays
	/// yield their elements and scalars yield themselves.
	pub fn iter(&self, expand: bool) -> Iter {
		let mut items = Vec::new();
		for block in self.blocks() {
			if !expand {
				items.push(Object::block(Arc::clone(block)));
				continue;
			}

			match &block.value {
				Value::Object(children) => {
					items.extend(children.iter().map(|c| Object::group(Arc::clone(c))));
				}
				Value::Array(elements) => {
					items.extend(elements.iter().map(|e| Object::block(Arc::clone(e))));
				}
				_ => items.push(Object::block(Arc::clone(block))),
			}
		}

		Iter {
			items: items.into_iter(),
		}
	}

	/// Native boolean coercion: numbers are true when non-zero, strings and
	/// containers are false.
	pub fn to_bool(&self) -> bool {
		match self.node.value {
			Value::Bool(b) => b,
			Value::Int(i) => i != 0,
			Value::Float(f) => f != 0.0,
			_ => false,
		}
	}

	/// Native integer coercion: floats truncate, booleans map to 0/1, other
	/// kinds yield 0.
	pub fn to_int(&self) -> i64 {
		match self.node.value {
			Value::Int(i) => i,
			Value::Float(f) => f as i64,
			Value::Bool(b) => i64::from(b),
			_ => 0,
		}
	}

	/// Native float coercion, with the same rules as [`Object::to_int`].
	pub fn to_float(&self) -> f64 {
		match self.node.value {
			Value::Int(i) => i as f64,
			Value::Float(f) => f,
			Value::Bool(b) => f64::from(u8::from(b)),
			_ => 0.0,
		}
	}

	/// The string payload, if this is a string value.
	pub fn to_str(&self) -> Option<&str> {
		match &self.node.value {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	/// Whether both handles point at the same node.
	pub fn ptr_eq(&self, other: &Object) -> bool {
		Arc::ptr_eq(&self.node, &other.node)
	}

	/// Number of live handles (and parent links) sharing this node.
	pub fn ref_count(&self) -> usize {
		Arc::strong_count(&self.node)
	}

	fn blocks(&self) -> Blocks<'_> {
		Blocks {
			next: Some(&self.node),
			chained: self.group,
		}
	}
}

impl PartialEq for Object {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Object")
			.field("key", &self.node.key)
			.field("kind", &self.kind())
			.field("blocks", &self.block_count())
			.finish()
	}
}

struct Blocks<'a> {
	next: Option<&'a Arc<Node>>,
	chained: bool,
}

impl<'a> Iterator for Blocks<'a> {
	type Item = &'a Arc<Node>;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next.take()?;
		if self.chained {
			self.next = current.next.as_ref();
		}
		Some(current)
	}
}

/// Iterator over the handles produced by [`Object::iter`].
///
/// Dropping it part-way is fine; handles already produced stay valid.
#[derive(Debug)]
pub struct Iter {
	items: std::vec::IntoIter<Object>,
}

impl Iterator for Iter {
	type Item = Object;

	fn next(&mut self) -> Option<Object> {
		self.items.next()
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.items.size_hint()
	}
}

impl ExactSizeIterator for Iter {}
