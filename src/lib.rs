//! ucl-decode - decode UCL configuration trees into strongly typed Rust values.
//!
//! This library provides:
//! - A reader that turns UCL text into an immutable, shared value tree
//! - A decode engine mapping that tree onto scalars, slices, maps, pointers,
//!   dynamic values and structs
//! - Per-struct field plans with rename, squash, key, object, decoded-fields
//!   and unused-keys directives
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use ucl_decode::{DecodeStruct, FieldPlan, decode, parse_str};
//!
//! #[derive(Debug, Default)]
//! struct Upstream {
//!     name: String,
//!     hosts: Vec<String>,
//!     weight: u32,
//! }
//!
//! impl DecodeStruct for Upstream {
//!     fn describe(plan: &mut FieldPlan<Self>) {
//!         plan.key("name", |u| &mut u.name);
//!         plan.field("hosts", |u| &mut u.hosts).rename("host");
//!         plan.field("weight", |u| &mut u.weight);
//!     }
//! }
//!
//! ucl_decode::impl_decode!(Upstream);
//!
//! let tree = parse_str(
//!     r#"
//!     upstream "api" {
//!         host = "10.0.0.1";
//!         host = "10.0.0.2";
//!         weight = 3;
//!     }
//!     "#,
//! )
//! .unwrap();
//!
//! let mut upstreams: HashMap<String, Upstream> = HashMap::new();
//! decode(&tree.get("upstream").unwrap(), &mut upstreams).unwrap();
//!
//! let api = &upstreams["api"];
//! assert_eq!(api.name, "api");
//! assert_eq!(api.hosts, vec!["10.0.0.1", "10.0.0.2"]);
//! assert_eq!(api.weight, 3);
//! ```

pub mod decode;
pub mod error;
pub mod tree;

pub use decode::{AnyValue, Decode, DecodeStruct, FieldBuilder, FieldPlan, Shape, decode};
pub use error::{DecodeError, ParseError, Result, ScalarError};
pub use tree::{Iter, Kind, Object, Parser, ParserFlags, parse_file, parse_str};
