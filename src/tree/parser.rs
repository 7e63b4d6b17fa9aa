use crate::error::ParseError;
use crate::tree::lexer::{Lexer, Spanned, Token};
use crate::tree::object::{Node, Object, Value};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, LazyLock};

static DECIMAL_INT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^([+-]?)([0-9]+)(kb|mb|gb|k|m|g)?$").expect("valid decimal pattern")
});

static HEX_INT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^([+-]?)0[xX]([0-9a-fA-F]+)$").expect("valid hex pattern"));

static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[+-]?(?:[0-9]+\.[0-9]*|\.[0-9]+|[0-9]+)(?:[eE][+-]?[0-9]+)?$")
		.expect("valid float pattern")
});

/// Handler invoked for a `.name argument;` macro. Returning `false` aborts
/// parsing.
pub type MacroHandler = Box<dyn FnMut(&str) -> bool>;

/// Options controlling how input is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserFlags {
	/// Lowercase every key (including section names) as it is read.
	pub key_lowercase: bool,
}

/// Reader for UCL configuration text.
///
/// Every chunk added through [`Parser::add_str`] or [`Parser::add_file`] is
/// merged into one top-level object, retrieved with [`Parser::object`].
pub struct Parser {
	flags: ParserFlags,
	root: DraftObject,
	macros: HashMap<String, MacroHandler>,
}

impl fmt::Debug for Parser {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Parser")
			.field("flags", &self.flags)
			.field("macros", &self.macros.keys().collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}

impl Default for Parser {
	fn default() -> Self {
		Parser::new(ParserFlags::default())
	}
}

impl Parser {
	pub fn new(flags: ParserFlags) -> Self {
		Parser {
			flags,
			root: DraftObject::default(),
			macros: HashMap::new(),
		}
	}

	/// Register a handler for `.name` macros.
	pub fn register_macro<F>(&mut self, name: &str, handler: F)
	where
		F: FnMut(&str) -> bool + 'static,
	{
		self.macros.insert(name.to_string(), Box::new(handler));
	}

	/// Parse a chunk of configuration text.
	pub fn add_str(&mut self, input: &str) -> Result<(), ParseError> {
		let tokens = Lexer::new(input).tokenize()?;
		Grammar {
			tokens: &tokens,
			pos: 0,
			flags: self.flags,
			macros: &mut self.macros,
		}
		.document(&mut self.root)
	}

	/// Read and parse a configuration file.
	pub fn add_file(&mut self, path: &Path) -> Result<(), ParseError> {
		let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		tracing::debug!(path = %path.display(), bytes = content.len(), "adding config file");

		self.add_str(&content)
	}

	/// Build the top-level object from everything parsed so far.
	pub fn object(&self) -> Object {
		Object::group(Arc::new(Node {
			key: String::new(),
			value: self.root.build_value(),
			next: None,
		}))
	}
}

/// Parse a string into its top-level object.
pub fn parse_str(input: &str) -> Result<Object, ParseError> {
	let mut parser = Parser::default();
	parser.add_str(input)?;
	Ok(parser.object())
}

/// Parse a file into its top-level object.
pub fn parse_file(path: &Path) -> Result<Object, ParseError> {
	let mut parser = Parser::default();
	parser.add_file(path)?;
	Ok(parser.object())
}

enum Draft {
	Scalar(Value),
	Array(Vec<Draft>),
	Object(DraftObject),
}

#[derive(Default)]
struct DraftObject {
	groups: Vec<(String, Vec<Draft>)>,
	index: HashMap<String, usize>,
}

impl DraftObject {
	fn insert(&mut self, key: String, value: Draft) {
		match self.index.get(&key) {
			Some(&i) => self.groups[i].1.push(value),
			None => {
				self.index.insert(key.clone(), self.groups.len());
				self.groups.push((key, vec![value]));
			}
		}
	}

	fn build_value(&self) -> Value {
		Value::Object(
			self.groups
				.iter()
				.map(|(key, blocks)| chain(key, blocks))
				.collect(),
		)
	}
}

impl Draft {
	fn build_value(&self) -> Value {
		match self {
			Draft::Scalar(value) => value.clone(),
			Draft::Array(items) => Value::Array(
				items
					.iter()
					.map(|item| {
						Arc::new(Node {
							key: String::new(),
							value: item.build_value(),
							next: None,
						})
					})
					.collect(),
			),
			Draft::Object(object) => object.build_value(),
		}
	}
}

/// Link the blocks of one key-group, first block at the head.
fn chain(key: &str, blocks: &[Draft]) -> Arc<Node> {
	let head = blocks.iter().rev().fold(None, |next, block| {
		Some(Arc::new(Node {
			key: key.to_string(),
			value: block.build_value(),
			next,
		}))
	});
	head.unwrap_or_else(|| {
		Arc::new(Node {
			key: key.to_string(),
			value: Value::Null,
			next: None,
		})
	})
}

struct Grammar<'a> {
	tokens: &'a [Spanned],
	pos: usize,
	flags: ParserFlags,
	macros: &'a mut HashMap<String, MacroHandler>,
}

impl<'a> Grammar<'a> {
	fn peek(&self) -> Option<&'a Token> {
		self.tokens.get(self.pos).map(|s| &s.token)
	}

	fn advance(&mut self) -> Option<&'a Spanned> {
		let spanned = self.tokens.get(self.pos)?;
		self.pos += 1;
		Some(spanned)
	}

	fn error(&self, message: impl Into<String>) -> ParseError {
		let (line, column) = match self.tokens.get(self.pos).or(self.tokens.last()) {
			Some(s) => (s.line, s.column),
			None => (1, 1),
		};
		ParseError::Syntax {
			line,
			column,
			message: message.into(),
		}
	}

	fn skip_newlines(&mut self) {
		while self.peek() == Some(&Token::Newline) {
			self.pos += 1;
		}
	}

	fn skip_separators(&mut self) {
		while matches!(
			self.peek(),
			Some(Token::Newline | Token::Semicolon | Token::Comma)
		) {
			self.pos += 1;
		}
	}

	fn document(&mut self, root: &mut DraftObject) -> Result<(), ParseError> {
		self.skip_separators();
		if self.peek() == Some(&Token::LBrace) {
			self.pos += 1;
			self.entries(root, true)?;
			self.skip_separators();
			if self.peek().is_some() {
				return Err(self.error("unexpected content after top-level object"));
			}
			return Ok(());
		}
		self.entries(root, false)
	}

	/// Read entries until `}` (when `braced`) or end of input.
	fn entries(&mut self, object: &mut DraftObject, braced: bool) -> Result<(), ParseError> {
		loop {
			self.skip_separators();
			match self.peek() {
				None if braced => return Err(self.error("expected '}'")),
				None => return Ok(()),
				Some(Token::RBrace) if braced => {
					self.pos += 1;
					return Ok(());
				}
				Some(Token::Macro(_)) => self.macro_call()?,
				Some(Token::Atom(_) | Token::Quoted(_)) => self.entry(object)?,
				Some(other) => {
					let message = format!("expected key, found {}", describe(other));
					return Err(self.error(message));
				}
			}
		}
	}

	fn entry(&mut self, object: &mut DraftObject) -> Result<(), ParseError> {
		let key = self.key()?;
		self.skip_newlines();

		let value = match self.peek() {
			Some(Token::Assign) => {
				self.pos += 1;
				self.skip_newlines();
				self.value()?
			}
			Some(Token::LBrace | Token::LBracket) => self.value()?,
			Some(Token::Atom(_) | Token::Quoted(_)) => {
				let mut names = Vec::new();
				let start = self.pos;
				while let Some(Token::Atom(_) | Token::Quoted(_)) = self.peek() {
					names.push(self.key()?);
				}

				if self.peek() == Some(&Token::LBrace) {
					let mut body = self.value()?;
					for name in names.into_iter().rev() {
						let mut section = DraftObject::default();
						section.insert(name, body);
						body = Draft::Object(section);
					}
					body
				} else if names.len() == 1 {
					self.pos = start;
					self.value()?
				} else {
					return Err(self.error("expected '{' after section names"));
				}
			}
			_ => return Err(self.error(format!("expected value for key '{key}'"))),
		};

		object.insert(key, value);
		self.end_of_entry()
	}

	fn end_of_entry(&mut self) -> Result<(), ParseError> {
		match self.peek() {
			None | Some(Token::Newline | Token::Semicolon | Token::Comma | Token::RBrace) => Ok(()),
			// A closed object or array needs no separator.
			_ if matches!(
				self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)).map(|s| &s.token),
				Some(Token::RBrace | Token::RBracket)
			) =>
			{
				Ok(())
			}
			Some(other) => {
				let message = format!("expected ';' or newline, found {}", describe(other));
				Err(self.error(message))
			}
		}
	}

	fn key(&mut self) -> Result<String, ParseError> {
		let key = match self.advance().map(|s| &s.token) {
			Some(Token::Atom(s) | Token::Quoted(s)) => s.clone(),
			_ => return Err(self.error("expected key")),
		};
		Ok(if self.flags.key_lowercase {
			key.to_lowercase()
		} else {
			key
		})
	}

	fn value(&mut self) -> Result<Draft, ParseError> {
		let Some(spanned) = self.advance() else {
			return Err(self.error("unexpected end of input, expected value"));
		};

		match &spanned.token {
			Token::Quoted(s) => Ok(Draft::Scalar(Value::String(s.clone()))),
			Token::Atom(s) => Ok(Draft::Scalar(classify_atom(s))),
			Token::LBrace => {
				let mut object = DraftObject::default();
				self.entries(&mut object, true)?;
				Ok(Draft::Object(object))
			}
			Token::LBracket => self.array(),
			other => {
				let message = format!("expected value, found {}", describe(other));
				self.pos -= 1;
				Err(self.error(message))
			}
		}
	}

	fn array(&mut self) -> Result<Draft, ParseError> {
		let mut items = Vec::new();
		loop {
			self.skip_separators();
			match self.peek() {
				None => return Err(self.error("expected ']'")),
				Some(Token::RBracket) => {
					self.pos += 1;
					return Ok(Draft::Array(items));
				}
				_ => items.push(self.value()?),
			}
		}
	}

	fn macro_call(&mut self) -> Result<(), ParseError> {
		let (name, line) = match self.advance() {
			Some(Spanned {
				token: Token::Macro(name),
				line,
				..
			}) => (name.clone(), *line),
			_ => return Err(self.error("expected macro")),
		};

		let argument = match self.peek() {
			Some(Token::Atom(s) | Token::Quoted(s)) => {
				let argument = s.clone();
				self.pos += 1;
				argument
			}
			_ => String::new(),
		};

		let handler = self
			.macros
			.get_mut(&name)
			.ok_or_else(|| ParseError::UnknownMacro {
				name: name.clone(),
				line,
			})?;

		tracing::trace!(name = %name, argument = %argument, "invoking macro");
		if !handler(&argument) {
			return Err(ParseError::MacroFailed { name, line });
		}

		self.end_of_entry()
	}
}

fn describe(token: &Token) -> String {
	match token {
		Token::LBrace => "'{'".to_string(),
		Token::RBrace => "'}'".to_string(),
		Token::LBracket => "'['".to_string(),
		Token::RBracket => "']'".to_string(),
		Token::Assign => "'='".to_string(),
		Token::Semicolon => "';'".to_string(),
		Token::Comma => "','".to_string(),
		Token::Newline => "newline".to_string(),
		Token::Quoted(s) | Token::Atom(s) => format!("'{s}'"),
		Token::Macro(name) => format!("'.{name}'"),
	}
}

/// Type a bare word: booleans, null, integers (with multiplier suffixes),
/// floats, and otherwise a string.
fn classify_atom(atom: &str) -> Value {
	match atom.to_ascii_lowercase().as_str() {
		"true" | "yes" | "on" => return Value::Bool(true),
		"false" | "no" | "off" => return Value::Bool(false),
		"null" => return Value::Null,
		_ => {}
	}

	if let Some(caps) = HEX_INT.captures(atom) {
		if let Ok(magnitude) = i64::from_str_radix(&caps[2], 16) {
			return Value::Int(if &caps[1] == "-" { -magnitude } else { magnitude });
		}
	} else if let Some(caps) = DECIMAL_INT.captures(atom) {
		let multiplier = match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
			Some("k") => 1_000,
			Some("m") => 1_000_000,
			Some("g") => 1_000_000_000,
			Some("kb") => 1 << 10,
			Some("mb") => 1 << 20,
			Some("gb") => 1 << 30,
			_ => 1,
		};
		let parsed = caps[2]
			.parse::<i64>()
			.ok()
			.and_then(|n| n.checked_mul(multiplier));
		if let Some(magnitude) = parsed {
			return Value::Int(if &caps[1] == "-" { -magnitude } else { magnitude });
		}
	}

	if FLOAT.is_match(atom)
		&& let Ok(f) = atom.parse::<f64>()
	{
		return Value::Float(f);
	}

	Value::String(atom.to_string())
}
