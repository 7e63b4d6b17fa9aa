//! Struct field plans.
//!
//! A struct describes its decodable fields once, in declaration order, by
//! implementing [`DecodeStruct`]. Each field carries at most one directive:
//!
//! - plain fields are matched by name (exactly, then case-insensitively)
//! - `key` receives the struct's own source key
//! - `object` receives a shared handle on the source block
//! - `decoded_fields` receives the names of the fields that were decoded
//! - `unused_keys` receives the source keys no field consumed
//! - `embedded(...).squash()` flattens another struct's plan into this one

use crate::decode::{Decode, Shape, field_path};
use crate::error::{DecodeError, Result};
use crate::tree::{Kind, Object};
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, trace};

/// Implemented by structs to register their fields.
///
/// Pair it with [`impl_decode!`](crate::impl_decode) to get the [`Decode`]
/// impl:
///
/// ```
/// use ucl_decode::{DecodeStruct, FieldPlan, decode, parse_str};
///
/// #[derive(Debug, Default)]
/// struct Listener {
///     name: String,
///     port: u16,
///     extra: Vec<String>,
/// }
///
/// impl DecodeStruct for Listener {
///     fn describe(plan: &mut FieldPlan<Self>) {
///         plan.key("name", |l| &mut l.name);
///         plan.field("port", |l| &mut l.port);
///         plan.unused_keys("extra", |l| &mut l.extra);
///     }
/// }
///
/// ucl_decode::impl_decode!(Listener);
///
/// let tree = parse_str("http { port = 8080; tls = off; }").unwrap();
/// let mut listener = Listener::default();
/// decode(&tree.get("http").unwrap(), &mut listener).unwrap();
///
/// assert_eq!(listener.name, "http");
/// assert_eq!(listener.port, 8080);
/// assert_eq!(listener.extra, vec!["tls"]);
/// ```
pub trait DecodeStruct: Sized + 'static {
	fn describe(plan: &mut FieldPlan<Self>);
}

type Setter<S> = Box<dyn Fn(&mut S, &str, &Object) -> Result<()> + Send + Sync>;
type KeySetter<S> = Box<dyn Fn(&mut S, &str) + Send + Sync>;
type ObjectSetter<S> = Box<dyn Fn(&mut S, &Object) + Send + Sync>;
type ListSetter<S> = Box<dyn Fn(&mut S, &[String]) + Send + Sync>;
type PlanFactory<S> = Box<dyn Fn() -> Option<FieldPlan<S>> + Send + Sync>;

/// Resolved field lists, one per struct type, built on first decode.
static RESOLVED: OnceLock<Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>> = OnceLock::new();

enum Directive<S> {
	Plain(Setter<S>),
	Key(KeySetter<S>),
	Object(ObjectSetter<S>),
	DecodedFields(ListSetter<S>),
	UnusedKeys(ListSetter<S>),
	/// The embedded type's shape, and its plan when it is a struct.
	Embedded { shape: Shape, plan: PlanFactory<S> },
}

struct Field<S> {
	/// Declared name, reported through `decoded_fields`.
	name: String,
	/// Source key to match; the declared name unless renamed.
	key: String,
	squash: bool,
	directive: Directive<S>,
}

/// The ordered field table of a struct.
pub struct FieldPlan<S> {
	fields: Vec<Field<S>>,
}

/// Returned by the [`FieldPlan`] registration methods to adjust a field.
pub struct FieldBuilder<'a, S> {
	field: &'a mut Field<S>,
}

impl<S> FieldBuilder<'_, S> {
	/// Match the field against `key` instead of its declared name.
	pub fn rename(self, key: &str) -> Self {
		self.field.key = key.to_string();
		self
	}

	/// Flatten an embedded struct's fields into the enclosing plan.
	pub fn squash(self) -> Self {
		self.field.squash = true;
		self
	}
}

impl<S: 'static> Default for FieldPlan<S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: 'static> FieldPlan<S> {
	pub fn new() -> Self {
		FieldPlan { fields: Vec::new() }
	}

	/// Build the plan a struct registers for itself.
	pub fn describe() -> Self
	where
		S: DecodeStruct,
	{
		let mut plan = Self::new();
		S::describe(&mut plan);
		plan
	}

	/// Number of registered fields, before squashed structs are expanded.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Register an ordinary field, decoded from the key matching `name`.
	pub fn field<F: Decode + 'static>(
		&mut self,
		name: &str,
		access: fn(&mut S) -> &mut F,
	) -> FieldBuilder<'_, S> {
		self.push(
			name,
			Directive::Plain(Box::new(move |s: &mut S, path: &str, obj: &Object| {
				access(s).decode_blocks(path, obj)
			})),
		)
	}

	/// Register a field that receives the struct's own source key.
	pub fn key(&mut self, name: &str, access: fn(&mut S) -> &mut String) -> FieldBuilder<'_, S> {
		self.push(
			name,
			Directive::Key(Box::new(move |s: &mut S, key: &str| {
				*access(s) = key.to_string();
			})),
		)
	}

	/// Register a field that keeps a handle on the source block.
	pub fn object(
		&mut self,
		name: &str,
		access: fn(&mut S) -> &mut Option<Object>,
	) -> FieldBuilder<'_, S> {
		self.push(
			name,
			Directive::Object(Box::new(move |s: &mut S, obj: &Object| {
				*access(s) = Some(obj.clone());
			})),
		)
	}

	/// Register a field that receives the declared names of the decoded
	/// fields, in decode order.
	pub fn decoded_fields(
		&mut self,
		name: &str,
		access: fn(&mut S) -> &mut Vec<String>,
	) -> FieldBuilder<'_, S> {
		self.push(name, Directive::DecodedFields(list_setter(access)))
	}

	/// Register a field that receives the source keys no field consumed, in
	/// source order.
	pub fn unused_keys(
		&mut self,
		name: &str,
		access: fn(&mut S) -> &mut Vec<String>,
	) -> FieldBuilder<'_, S> {
		self.push(name, Directive::UnusedKeys(list_setter(access)))
	}

	/// Register an embedded value. Only structs may be embedded, and only
	/// when squashed.
	pub fn embedded<E: Decode + 'static>(
		&mut self,
		name: &str,
		access: fn(&mut S) -> &mut E,
	) -> FieldBuilder<'_, S> {
		self.push(
			name,
			Directive::Embedded {
				shape: E::shape(),
				plan: Box::new(move || E::field_plan().map(|plan| plan.project(access))),
			},
		)
	}

	fn push(&mut self, name: &str, directive: Directive<S>) -> FieldBuilder<'_, S> {
		self.fields.push(Field {
			name: name.to_string(),
			key: name.to_string(),
			squash: false,
			directive,
		});

		let index = self.fields.len() - 1;
		FieldBuilder {
			field: &mut self.fields[index],
		}
	}

	/// Re-target every field through `outer`, so this plan can run against a
	/// struct that embeds `S`.
	fn project<P: 'static>(self, outer: fn(&mut P) -> &mut S) -> FieldPlan<P> {
		let fields = self
			.fields
			.into_iter()
			.map(|field| {
				let directive = match field.directive {
					Directive::Plain(set) => {
						Directive::Plain(Box::new(move |p: &mut P, path: &str, obj: &Object| {
							set(outer(p), path, obj)
						}))
					}
					Directive::Key(set) => {
						Directive::Key(Box::new(move |p: &mut P, key: &str| set(outer(p), key)))
					}
					Directive::Object(set) => {
						Directive::Object(Box::new(move |p: &mut P, obj: &Object| set(outer(p), obj)))
					}
					Directive::DecodedFields(set) => Directive::DecodedFields(Box::new(
						move |p: &mut P, names: &[String]| set(outer(p), names),
					)),
					Directive::UnusedKeys(set) => Directive::UnusedKeys(Box::new(
						move |p: &mut P, keys: &[String]| set(outer(p), keys),
					)),
					Directive::Embedded { shape, plan } => Directive::Embedded {
						shape,
						plan: Box::new(move || plan().map(|inner| inner.project(outer))),
					},
				};

				Field {
					name: field.name,
					key: field.key,
					squash: field.squash,
					directive,
				}
			})
			.collect();

		FieldPlan { fields }
	}

	/// Expand squashed structs breadth-first into one flat field list.
	fn resolve(self, path: &str) -> Result<Vec<Field<S>>> {
		let mut resolved = Vec::new();
		let mut queue = VecDeque::from([self]);

		while let Some(plan) = queue.pop_front() {
			for field in plan.fields {
				let Directive::Embedded { shape, plan } = &field.directive else {
					if field.squash {
						return Err(misconfigured(
							path,
							&field.name,
							"squash is only valid on embedded fields",
						));
					}
					resolved.push(field);
					continue;
				};

				let Some(inner) = plan().filter(|_| *shape == Shape::Struct) else {
					return Err(misconfigured(path, &field.name, "embedded field is not a struct"));
				};
				if !field.squash {
					return Err(misconfigured(path, &field.name, "embedded struct must be squashed"));
				}
				queue.push_back(inner);
			}
		}

		Ok(resolved)
	}
}

/// The resolved field list of `S`, shared by every decode into `S`.
///
/// Misconfigured plans are not cached, so each decode reports its own path.
fn resolved<S: DecodeStruct>(path: &str) -> Result<Arc<Vec<Field<S>>>> {
	let cache = RESOLVED.get_or_init(Default::default);
	let id = TypeId::of::<S>();

	let cached = cache
		.lock()
		.unwrap_or_else(PoisonError::into_inner)
		.get(&id)
		.cloned();
	if let Some(fields) = cached.and_then(|any| any.downcast::<Vec<Field<S>>>().ok()) {
		return Ok(fields);
	}

	let fields = Arc::new(FieldPlan::<S>::describe().resolve(path)?);
	let mut plans = cache.lock().unwrap_or_else(PoisonError::into_inner);
	// Another thread may have resolved the same type meanwhile; keep its copy.
	if let Some(existing) = plans.get(&id).cloned().and_then(|any| any.downcast::<Vec<Field<S>>>().ok()) {
		return Ok(existing);
	}
	plans.insert(id, Arc::clone(&fields) as Arc<dyn Any + Send + Sync>);
	Ok(fields)
}

fn list_setter<S: 'static>(access: fn(&mut S) -> &mut Vec<String>) -> ListSetter<S> {
	Box::new(move |s: &mut S, items: &[String]| {
		*access(s) = items.to_vec();
	})
}

fn misconfigured(path: &str, field: &str, reason: &'static str) -> DecodeError {
	DecodeError::Configuration {
		path: path.to_string(),
		field: field.to_string(),
		reason,
	}
}

/// Find the key-group for `key`, falling back to a case-insensitive scan.
/// The flag reports whether the fallback matched.
fn lookup(obj: &Object, key: &str) -> Option<(Object, bool)> {
	if let Some(found) = obj.get(key) {
		return Some((found, false));
	}

	obj.iter(true)
		.find(|candidate| eq_ignore_case(candidate.key(), key))
		.map(|found| (found, true))
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
	a.chars()
		.flat_map(char::to_lowercase)
		.eq(b.chars().flat_map(char::to_lowercase))
}

/// Decode one object block into a struct through its field plan.
pub fn decode_struct<S: DecodeStruct>(target: &mut S, path: &str, obj: &Object) -> Result<()> {
	if obj.kind() != Kind::Object {
		return Err(DecodeError::ShapeMismatch {
			path: path.to_string(),
			expected: "object",
			found: obj.kind(),
		});
	}

	let fields = resolved::<S>(path)?;
	let mut used = HashSet::new();
	let mut decoded = Vec::new();

	for field in fields.iter() {
		match &field.directive {
			Directive::Plain(set) => {
				let Some((matched, folded)) = lookup(obj, &field.key) else {
					continue;
				};

				let child = field_path(path, &field.key);
				trace!(path = %child, key = matched.key(), folded, "decoding field");
				used.insert(matched.key().to_string());
				set(target, &child, &matched)?;
				decoded.push(field.name.clone());
			}
			Directive::Key(set) => set(target, obj.key()),
			Directive::Object(set) => set(target, obj),
			// Filled in once every field has been visited.
			Directive::DecodedFields(_) | Directive::UnusedKeys(_) => {}
			// Expanded by resolve.
			Directive::Embedded { .. } => {}
		}
	}

	let wants_unused = fields
		.iter()
		.any(|field| matches!(field.directive, Directive::UnusedKeys(_)));
	let unused: Vec<String> = if wants_unused {
		obj.iter(true)
			.map(|entry| entry.key().to_string())
			.filter(|key| !used.contains(key))
			.collect()
	} else {
		Vec::new()
	};
	if !unused.is_empty() {
		debug!(path, unused = ?unused, "struct left keys unused");
	}

	for field in fields.iter() {
		match &field.directive {
			Directive::DecodedFields(set) => set(target, &decoded),
			Directive::UnusedKeys(set) => set(target, &unused),
			_ => {}
		}
	}

	Ok(())
}

/// Implement [`Decode`](crate::Decode) for structs that implement
/// [`DecodeStruct`](crate::DecodeStruct).
#[macro_export]
macro_rules! impl_decode {
	($($ty:ty),+ $(,)?) => {$(
		impl $crate::Decode for $ty {
			fn shape() -> $crate::Shape {
				$crate::Shape::Struct
			}

			fn decode(&mut self, path: &str, obj: &$crate::Object) -> $crate::Result<()> {
				$crate::decode::plan::decode_struct(self, path, obj)
			}

			fn field_plan() -> ::std::option::Option<$crate::FieldPlan<Self>> {
				::std::option::Option::Some($crate::FieldPlan::describe())
			}
		}
	)+};
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::decode::decode;
	use crate::tree::parse_str;
	use std::collections::HashMap;

	#[derive(Debug, Default, PartialEq)]
	struct Base {
		name: String,
		owner: String,
	}

	impl DecodeStruct for Base {
		fn describe(plan: &mut FieldPlan<Self>) {
			plan.field("name", |b| &mut b.name);
			plan.key("owner", |b| &mut b.owner);
		}
	}

	#[derive(Debug, Default, PartialEq)]
	struct Server {
		base: Base,
		port: i64,
		fields: Vec<String>,
	}

	impl DecodeStruct for Server {
		fn describe(plan: &mut FieldPlan<Self>) {
			plan.embedded("Base", |s| &mut s.base).squash();
			plan.field("port", |s| &mut s.port);
			plan.decoded_fields("fields", |s| &mut s.fields);
		}
	}

	#[derive(Debug, Default)]
	struct Unsquashed {
		base: Base,
	}

	impl DecodeStruct for Unsquashed {
		fn describe(plan: &mut FieldPlan<Self>) {
			plan.embedded("Base", |s| &mut s.base);
		}
	}

	#[derive(Debug, Default)]
	struct EmbedsString {
		label: String,
	}

	impl DecodeStruct for EmbedsString {
		fn describe(plan: &mut FieldPlan<Self>) {
			plan.embedded("Label", |s| &mut s.label).squash();
		}
	}

	#[derive(Debug, Default)]
	struct SquashedPlain {
		label: String,
	}

	impl DecodeStruct for SquashedPlain {
		fn describe(plan: &mut FieldPlan<Self>) {
			plan.field("label", |s| &mut s.label).squash();
		}
	}

	#[derive(Debug, Default, PartialEq)]
	struct Leftovers {
		bar: String,
		unused: Vec<String>,
	}

	impl DecodeStruct for Leftovers {
		fn describe(plan: &mut FieldPlan<Self>) {
			plan.field("Bar", |s| &mut s.bar);
			plan.unused_keys("Unused", |s| &mut s.unused);
		}
	}

	#[derive(Debug, Default, PartialEq)]
	struct Nested {
		foo: String,
	}

	impl DecodeStruct for Nested {
		fn describe(plan: &mut FieldPlan<Self>) {
			plan.field("Foo", |n| &mut n.foo);
		}
	}

	#[derive(Debug, Default, PartialEq)]
	struct Values {
		value: Vec<Box<Nested>>,
	}

	impl DecodeStruct for Values {
		fn describe(plan: &mut FieldPlan<Self>) {
			plan.field("Value", |v| &mut v.value);
		}
	}

	#[derive(Debug, Default, PartialEq)]
	struct Limits {
		soft: i64,
		hard: i64,
	}

	impl DecodeStruct for Limits {
		fn describe(plan: &mut FieldPlan<Self>) {
			plan.field("soft", |l| &mut l.soft);
			plan.field("hard", |l| &mut l.hard).rename("max");
		}
	}

	#[derive(Debug, Default, PartialEq)]
	struct Service {
		limits: Limits,
		raw: Option<Object>,
		servers: HashMap<String, Base>,
	}

	impl DecodeStruct for Service {
		fn describe(plan: &mut FieldPlan<Self>) {
			plan.field("limits", |s| &mut s.limits);
			plan.object("raw", |s| &mut s.raw);
			plan.field("servers", |s| &mut s.servers);
		}
	}

	crate::impl_decode!(Base, Server, Unsquashed, EmbedsString, SquashedPlain);
	crate::impl_decode!(Leftovers, Nested, Values, Limits, Service);

	#[test]
	fn test_squash_sets_embedded_and_sibling_fields() {
		let obj = parse_str("name = web; port = 80;").unwrap();

		let mut result = Server::default();
		decode(&obj, &mut result).unwrap();

		assert_eq!(result.base.name, "web");
		assert_eq!(result.port, 80);
	}

	#[test]
	fn test_squashed_fields_follow_the_embedding_struct() {
		let obj = parse_str("name = web; port = 80;").unwrap();

		let mut result = Server::default();
		decode(&obj, &mut result).unwrap();
		assert_eq!(result.fields, vec!["port", "name"]);
	}

	#[test]
	fn test_unsquashed_embedding_is_rejected() {
		let obj = parse_str("name = web;").unwrap();

		let err = decode(&obj, &mut Unsquashed::default()).unwrap_err();
		match err {
			DecodeError::Configuration { field, reason, .. } => {
				assert_eq!(field, "Base");
				assert_eq!(reason, "embedded struct must be squashed");
			}
			_ => panic!("Expected Configuration error"),
		}
	}

	#[test]
	fn test_embedding_non_struct_is_rejected() {
		let obj = parse_str("label = x;").unwrap();

		let err = decode(&obj, &mut EmbedsString::default()).unwrap_err();
		assert!(matches!(
			err,
			DecodeError::Configuration {
				reason: "embedded field is not a struct",
				..
			}
		));
	}

	#[test]
	fn test_squash_on_plain_field_is_rejected() {
		let obj = parse_str("label = x;").unwrap();

		let err = decode(&obj, &mut SquashedPlain::default()).unwrap_err();
		assert!(matches!(
			err,
			DecodeError::Configuration {
				reason: "squash is only valid on embedded fields",
				..
			}
		));
	}

	#[test]
	fn test_unused_keys_in_source_order() {
		let obj = parse_str("foo = [bar]; bar = baz; baz = what;").unwrap();

		let mut result = Leftovers::default();
		decode(&obj, &mut result).unwrap();

		assert_eq!(result.bar, "baz");
		assert_eq!(result.unused, vec!["foo", "baz"]);
	}

	#[test]
	fn test_unused_keys_empty_when_all_used() {
		let obj = parse_str("bar = baz;").unwrap();

		let mut result = Leftovers {
			unused: vec!["stale".to_string()],
			..Default::default()
		};
		decode(&obj, &mut result).unwrap();
		assert!(result.unused.is_empty());
	}

	#[test]
	fn test_case_insensitive_fallback() {
		let obj = parse_str("BAR = loud; Foo = mixed;").unwrap();

		let mut result = Leftovers::default();
		decode(&obj, &mut result).unwrap();
		assert_eq!(result.bar, "loud");
		assert_eq!(result.unused, vec!["Foo"]);

		let mut nested = Nested::default();
		decode(&obj, &mut nested).unwrap();
		assert_eq!(nested.foo, "mixed");
	}

	#[test]
	fn test_missing_field_is_left_alone() {
		let obj = parse_str("port = 1;").unwrap();

		let mut result = Server::default();
		result.base.name = "kept".to_string();
		decode(&obj, &mut result).unwrap();

		assert_eq!(result.base.name, "kept");
		assert_eq!(result.fields, vec!["port"]);
	}

	#[test]
	fn test_rename() {
		let obj = parse_str("limits { soft = 1; max = 9; hard = 5; }").unwrap();

		let mut result = Service::default();
		decode(&obj, &mut result).unwrap();
		assert_eq!(result.limits, Limits { soft: 1, hard: 9 });
	}

	#[test]
	fn test_repeated_blocks_merge_into_struct() {
		let obj = parse_str("limits { soft = 1; }\nlimits { max = 2; }").unwrap();

		let mut result = Service::default();
		decode(&obj, &mut result).unwrap();
		assert_eq!(result.limits, Limits { soft: 1, hard: 2 });
	}

	#[test]
	fn test_slice_of_boxed_structs_one_per_block() {
		let obj = parse_str(r#"value { foo = "bar"; }; value { foo = "baz"; }"#).unwrap();

		let mut result = Values::default();
		decode(&obj, &mut result).unwrap();

		assert_eq!(result.value.len(), 2);
		assert_eq!(result.value[0].foo, "bar");
		assert_eq!(result.value[1].foo, "baz");
	}

	#[test]
	fn test_key_directive_in_map_of_structs() {
		let obj = parse_str(
			r#"
			servers {
				web { name = "front" }
				db { name = "store" }
			}
			"#,
		)
		.unwrap();

		let mut result = Service::default();
		decode(&obj, &mut result).unwrap();

		assert_eq!(result.servers.len(), 2);
		assert_eq!(result.servers["web"].owner, "web");
		assert_eq!(result.servers["web"].name, "front");
		assert_eq!(result.servers["db"].owner, "db");
	}

	#[test]
	fn test_object_directive_outlives_tree() {
		let obj = parse_str("limits { soft = 3; }").unwrap();
		let mut result = Service::default();
		decode(&obj, &mut result).unwrap();

		let raw = result.raw.clone().unwrap();
		assert!(raw.ptr_eq(&obj));

		let limits = obj.get("limits").unwrap();
		drop(obj);
		drop(result);
		assert!(raw.get("limits").unwrap().ptr_eq(&limits));
		assert_eq!(raw.get("limits").unwrap().get("soft").unwrap().to_int(), 3);
		assert_eq!(raw.ref_count(), 1);
	}

	#[test]
	fn test_struct_from_scalar_fails_with_path() {
		let obj = parse_str("limits = 5;").unwrap();

		let err = decode(&obj, &mut Service::default()).unwrap_err();
		match err {
			DecodeError::ShapeMismatch {
				path,
				expected,
				found,
			} => {
				assert_eq!(path, "limits");
				assert_eq!(expected, "object");
				assert_eq!(found, Kind::Int);
			}
			_ => panic!("Expected ShapeMismatch error"),
		}
	}

	#[test]
	fn test_nested_error_path() {
		let obj = parse_str(r#"limits { soft = "lots"; }"#).unwrap();

		let err = decode(&obj, &mut Service::default()).unwrap_err();
		assert_eq!(err.path(), "limits.soft");
	}

	#[test]
	fn test_decoding_twice_is_idempotent() {
		let obj = parse_str(
			r#"
			name = web
			port = 80
			"#,
		)
		.unwrap();

		let mut first = Server::default();
		let mut second = Server::default();
		decode(&obj, &mut first).unwrap();
		decode(&obj, &mut second).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn test_plan_keeps_declaration_order() {
		let plan = FieldPlan::<Server>::describe();
		assert_eq!(plan.len(), 3);

		let names: Vec<_> = plan.fields.iter().map(|f| f.name.as_str()).collect();
		assert_eq!(names, vec!["Base", "port", "fields"]);
	}

	#[test]
	fn test_embedded_fields_record_their_shape() {
		let plan = FieldPlan::<Server>::describe();
		assert!(matches!(
			plan.fields[0].directive,
			Directive::Embedded {
				shape: Shape::Struct,
				..
			}
		));

		let plan = FieldPlan::<EmbedsString>::describe();
		assert!(matches!(
			plan.fields[0].directive,
			Directive::Embedded {
				shape: Shape::String,
				..
			}
		));
	}

	#[test]
	fn test_resolved_plan_is_shared() {
		let first = resolved::<Server>("").unwrap();
		let second = resolved::<Server>("other").unwrap();

		assert!(Arc::ptr_eq(&first, &second));
		let names: Vec<_> = first.iter().map(|f| f.name.as_str()).collect();
		assert_eq!(names, vec!["port", "fields", "name", "owner"]);
	}

	#[test]
	fn test_misconfigured_plan_reports_each_path() {
		for path in ["first", "second"] {
			match resolved::<Unsquashed>(path) {
				Err(DecodeError::Configuration { path: reported, .. }) => assert_eq!(reported, path),
				_ => panic!("Expected Configuration error"),
			}
		}
	}
}
