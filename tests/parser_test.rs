use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use ucl_decode::{Kind, ParseError, Parser, ParserFlags, parse_file, parse_str};

// ============================================================================
// Files and chunks
// ============================================================================

#[test]
fn test_parse_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = temp_dir.path().join("app.conf");
	fs::write(&path, "name = app;\nworkers = 4k;\n").unwrap();

	let obj = parse_file(&path).unwrap();
	assert_eq!(obj.get("name").unwrap().to_str(), Some("app"));
	assert_eq!(obj.get("workers").unwrap().to_int(), 4000);
}

#[test]
fn test_missing_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = temp_dir.path().join("missing.conf");

	let err = parse_file(&path).unwrap_err();
	match err {
		ParseError::Io { path: reported, .. } => assert_eq!(reported, path),
		_ => panic!("Expected Io error"),
	}
}

#[test]
fn test_file_and_string_chunks_merge() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = temp_dir.path().join("base.conf");
	fs::write(&path, "server { port = 80 }").unwrap();

	let mut parser = Parser::default();
	parser.add_file(&path).unwrap();
	parser.add_str("server { port = 443 }\nmode = strict").unwrap();
	let obj = parser.object();

	assert_eq!(obj.len(), 2);
	let ports: Vec<_> = obj
		.get("server")
		.unwrap()
		.iter(false)
		.map(|block| block.get("port").unwrap().to_int())
		.collect();
	assert_eq!(ports, vec![80, 443]);
}

// ============================================================================
// Grammar
// ============================================================================

#[test]
fn test_comments() {
	let obj = parse_str(
		r#"
		# hash comment
		a = 1 // trailing comment
		/* block /* nested */ still comment */
		b = 2
		"#,
	)
	.unwrap();

	assert_eq!(obj.len(), 2);
	assert_eq!(obj.get("b").unwrap().to_int(), 2);
}

#[test]
fn test_quoting() {
	let obj = parse_str(
		r#"
		double = "tab\tnewline\n\"quoted\"";
		single = 'raw \n text';
		number = "42";
		"#,
	)
	.unwrap();

	assert_eq!(obj.get("double").unwrap().to_str(), Some("tab\tnewline\n\"quoted\""));
	assert_eq!(obj.get("single").unwrap().to_str(), Some("raw \\n text"));
	assert_eq!(obj.get("number").unwrap().kind(), Kind::String);
}

#[test]
fn test_number_suffixes() {
	let obj = parse_str("a = 1k; b = 1kb; c = 2mb; d = 3g; e = 0x10; f = -5; g = 2.5e1;").unwrap();

	assert_eq!(obj.get("a").unwrap().to_int(), 1000);
	assert_eq!(obj.get("b").unwrap().to_int(), 1024);
	assert_eq!(obj.get("c").unwrap().to_int(), 2 * 1024 * 1024);
	assert_eq!(obj.get("d").unwrap().to_int(), 3_000_000_000);
	assert_eq!(obj.get("e").unwrap().to_int(), 16);
	assert_eq!(obj.get("f").unwrap().to_int(), -5);
	assert_eq!(obj.get("g").unwrap().to_float(), 25.0);
}

#[test]
fn test_colon_separator_and_arrays() {
	let obj = parse_str("list: [\n  one,\n  two;\n  three,\n]\nurl: http://host:80/").unwrap();

	let items: Vec<_> = obj
		.get("list")
		.unwrap()
		.iter(true)
		.map(|o| o.to_str().unwrap().to_string())
		.collect();
	assert_eq!(items, vec!["one", "two", "three"]);
	assert_eq!(obj.get("url").unwrap().to_str(), Some("http://host:80/"));
}

#[test]
fn test_nested_named_sections() {
	let obj = parse_str(r#"zone "eu" "west" { size = 3 }"#).unwrap();

	let west = obj.get("zone").unwrap().get("eu").unwrap().get("west").unwrap();
	assert_eq!(west.kind(), Kind::Object);
	assert_eq!(west.get("size").unwrap().to_int(), 3);
}

#[test]
fn test_key_lowercase() {
	let mut parser = Parser::new(ParserFlags {
		key_lowercase: true,
	});
	parser.add_str("Name = Mixed").unwrap();
	let obj = parser.object();

	assert_eq!(obj.get("name").unwrap().to_str(), Some("Mixed"));
	assert!(obj.get("Name").is_none());
}

// ============================================================================
// Macros
// ============================================================================

#[test]
fn test_macro_receives_argument() {
	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&seen);

	let mut parser = Parser::default();
	parser.register_macro("include", move |arg| {
		sink.borrow_mut().push(arg.to_string());
		true
	});
	parser
		.add_str(".include \"extra.conf\";\nvalue = 1;\n.include other;")
		.unwrap();

	assert_eq!(*seen.borrow(), vec!["extra.conf", "other"]);
	assert_eq!(parser.object().get("value").unwrap().to_int(), 1);
}

#[test]
fn test_unknown_macro_line() {
	let err = parse_str("a = 1;\n\n.nope;").unwrap_err();
	assert!(matches!(err, ParseError::UnknownMacro { line: 3, .. }));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_syntax_errors() {
	for input in ["foo = ;", "foo = [1, 2", "= 1", "a { b = 1"] {
		let err = parse_str(input).unwrap_err();
		assert!(
			matches!(err, ParseError::Syntax { .. }),
			"input {input:?} produced {err:?}"
		);
	}
}

#[test]
fn test_syntax_error_display() {
	let err = parse_str("a = 1;\nb = ]").unwrap_err();
	assert!(err.to_string().starts_with("line 2, column 5:"));
}
