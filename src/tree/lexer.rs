use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
	LBrace,
	RBrace,
	LBracket,
	RBracket,
	/// `=` or `:` between a key and its value.
	Assign,
	Semicolon,
	Comma,
	Newline,
	/// Quoted string; never reinterpreted as a number or boolean.
	Quoted(String),
	/// Bare word, typed later by the parser.
	Atom(String),
	/// `.name` macro invocation.
	Macro(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
	pub(crate) token: Token,
	pub(crate) line: usize,
	pub(crate) column: usize,
}

pub(crate) struct Lexer {
	chars: Vec<char>,
	pos: usize,
	line: usize,
	column: usize,
}

impl Lexer {
	pub(crate) fn new(input: &str) -> Self {
		Lexer {
			chars: input.chars().collect(),
			pos: 0,
			line: 1,
			column: 1,
		}
	}

	/// Tokenize the whole input.
	pub(crate) fn tokenize(mut self) -> Result<Vec<Spanned>, ParseError> {
		let mut tokens = Vec::new();
		while let Some(spanned) = self.next_token()? {
			tokens.push(spanned);
		}
		Ok(tokens)
	}

	fn peek(&self) -> Option<char> {
		self.chars.get(self.pos).copied()
	}

	fn peek_at(&self, offset: usize) -> Option<char> {
		self.chars.get(self.pos + offset).copied()
	}

	fn bump(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.pos += 1;
		if c == '\n' {
			self.line += 1;
			self.column = 1;
		} else {
			self.column += 1;
		}
		Some(c)
	}

	fn error(&self, line: usize, column: usize, message: impl Into<String>) -> ParseError {
		ParseError::Syntax {
			line,
			column,
			message: message.into(),
		}
	}

	fn next_token(&mut self) -> Result<Option<Spanned>, ParseError> {
		self.skip_blanks_and_comments()?;

		let (line, column) = (self.line, self.column);
		let Some(c) = self.peek() else {
			return Ok(None);
		};

		let token = match c {
			'{' => self.single(Token::LBrace),
			'}' => self.single(Token::RBrace),
			'[' => self.single(Token::LBracket),
			']' => self.single(Token::RBracket),
			'=' | ':' => self.single(Token::Assign),
			';' => self.single(Token::Semicolon),
			',' => self.single(Token::Comma),
			'\n' => self.single(Token::Newline),
			'"' => Token::Quoted(self.double_quoted(line, column)?),
			'\'' => Token::Quoted(self.single_quoted(line, column)?),
			'.' if self.peek_at(1).is_some_and(|n| n.is_ascii_alphabetic()) => {
				self.bump();
				Token::Macro(self.atom())
			}
			_ => Token::Atom(self.atom()),
		};

		Ok(Some(Spanned {
			token,
			line,
			column,
		}))
	}

	fn single(&mut self, token: Token) -> Token {
		self.bump();
		token
	}

	fn skip_blanks_and_comments(&mut self) -> Result<(), ParseError> {
		loop {
			match (self.peek(), self.peek_at(1)) {
				(Some(c), _) if c != '\n' && c.is_whitespace() => {
					self.bump();
				}
				(Some('#'), _) | (Some('/'), Some('/')) => {
					while self.peek().is_some_and(|c| c != '\n') {
						self.bump();
					}
				}
				(Some('/'), Some('*')) => self.block_comment()?,
				_ => return Ok(()),
			}
		}
	}

	fn block_comment(&mut self) -> Result<(), ParseError> {
		let (line, column) = (self.line, self.column);
		let mut depth = 0usize;
		loop {
			match (self.peek(), self.peek_at(1)) {
				(Some('/'), Some('*')) => {
					self.bump();
					self.bump();
					depth += 1;
				}
				(Some('*'), Some('/')) => {
					self.bump();
					self.bump();
					depth -= 1;
					if depth == 0 {
						return Ok(());
					}
				}
				(Some(_), _) => {
					self.bump();
				}
				(None, _) => return Err(self.error(line, column, "unterminated comment")),
			}
		}
	}

	fn atom(&mut self) -> String {
		let mut out = String::new();
		while let Some(c) = self.peek() {
			let ends = c.is_whitespace()
				|| matches!(c, '{' | '}' | '[' | ']' | '=' | ';' | ',' | '"' | '\'' | '#')
				|| (c == ':' && self.peek_at(1).is_none_or(char::is_whitespace));
			if ends {
				break;
			}
			out.push(c);
			self.bump();
		}
		out
	}

	fn double_quoted(&mut self, line: usize, column: usize) -> Result<String, ParseError> {
		self.bump();
		let mut out = String::new();
		loop {
			match self.bump() {
				None => return Err(self.error(line, column, "unterminated string")),
				Some('"') => return Ok(out),
				Some('\\') => {
					let escaped = match self.bump() {
						Some('n') => '\n',
						Some('t') => '\t',
						Some('r') => '\r',
						Some('b') => '\u{8}',
						Some('f') => '\u{c}',
						Some('u') => self.unicode_escape()?,
						Some(c @ ('"' | '\\' | '/')) => c,
						Some(other) => {
							return Err(self.error(
								self.line,
								self.column,
								format!("invalid escape '\\{other}'"),
							));
						}
						None => return Err(self.error(line, column, "unterminated string")),
					};
					out.push(escaped);
				}
				Some(c) => out.push(c),
			}
		}
	}

	fn unicode_escape(&mut self) -> Result<char, ParseError> {
		let (line, column) = (self.line, self.column);
		let mut code = 0u32;
		for _ in 0..4 {
			let digit = self
				.bump()
				.and_then(|c| c.to_digit(16))
				.ok_or_else(|| self.error(line, column, "invalid unicode escape"))?;
			code = code * 16 + digit;
		}
		char::from_u32(code).ok_or_else(|| self.error(line, column, "invalid unicode escape"))
	}

	fn single_quoted(&mut self, line: usize, column: usize) -> Result<String, ParseError> {
		self.bump();
		let mut out = String::new();
		loop {
			match self.bump() {
				None => return Err(self.error(line, column, "unterminated string")),
				Some('\'') => return Ok(out),
				Some('\\') if self.peek() == Some('\'') => {
					self.bump();
					out.push('\'');
				}
				Some(c) => out.push(c),
			}
		}
	}
}
