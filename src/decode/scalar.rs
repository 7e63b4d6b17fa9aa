use crate::decode::{Decode, Shape};
use crate::error::{DecodeError, Result, ScalarError};
use crate::tree::{Kind, Object};

impl Decode for bool {
	fn shape() -> Shape {
		Shape::Bool
	}

	fn decode(&mut self, path: &str, obj: &Object) -> Result<()> {
		*self = match obj.to_str() {
			Some(text) => parse_bool(text).map_err(|source| DecodeError::ScalarParse {
				path: path.to_string(),
				target: "bool",
				source,
			})?,
			None => obj.to_bool(),
		};
		Ok(())
	}
}

macro_rules! decode_int {
	($($ty:ty),+ $(,)?) => {$(
		impl Decode for $ty {
			fn shape() -> Shape {
				Shape::Int
			}

			fn decode(&mut self, path: &str, obj: &Object) -> Result<()> {
				let value = match obj.to_str() {
					Some(text) => parse_int::<$ty>(text),
					None => narrow::<$ty>(obj.to_int()),
				};
				*self = value.map_err(|source| DecodeError::ScalarParse {
					path: path.to_string(),
					target: stringify!($ty),
					source,
				})?;
				Ok(())
			}
		}
	)+};
}

decode_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Decode for String {
	fn shape() -> Shape {
		Shape::String
	}

	fn decode(&mut self, path: &str, obj: &Object) -> Result<()> {
		*self = match obj.kind() {
			Kind::Bool => obj.to_bool().to_string(),
			Kind::String => obj.to_str().unwrap_or_default().to_string(),
			Kind::Int => obj.to_int().to_string(),
			found => {
				return Err(DecodeError::UnsupportedCoercion {
					path: path.to_string(),
					target: "string",
					found,
				});
			}
		};
		Ok(())
	}
}

macro_rules! decode_unsupported {
	($($ty:ty),+ $(,)?) => {$(
		impl Decode for $ty {
			fn shape() -> Shape {
				Shape::Unsupported
			}

			fn decode(&mut self, path: &str, _obj: &Object) -> Result<()> {
				Err(DecodeError::UnsupportedTargetKind {
					path: path.to_string(),
					target: stringify!($ty),
				})
			}
		}
	)+};
}

decode_unsupported!(f32, f64, char);

/// Boolean literals accepted from string values.
pub fn parse_bool(text: &str) -> std::result::Result<bool, ScalarError> {
	match text {
		"1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
		"0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
		_ => Err(ScalarError::InvalidBool(text.to_string())),
	}
}

/// Parse an integer, picking the base from its prefix (`0x`, `0o`, `0b`, or a
/// leading `0` for octal) and checking it fits the target width.
///
/// Underscores may separate digits.
pub fn parse_int<T: TryFrom<i128>>(text: &str) -> std::result::Result<T, ScalarError> {
	let (negative, unsigned) = match text.as_bytes().first() {
		Some(b'-') => (true, &text[1..]),
		Some(b'+') => (false, &text[1..]),
		_ => (false, text),
	};

	let lower = unsigned.to_ascii_lowercase();
	let (radix, digits, prefixed) = if let Some(rest) = lower.strip_prefix("0x") {
		(16, rest, true)
	} else if let Some(rest) = lower.strip_prefix("0o") {
		(8, rest, true)
	} else if let Some(rest) = lower.strip_prefix("0b") {
		(2, rest, true)
	} else if lower.len() > 1 && lower.starts_with('0') {
		(8, &lower[1..], true)
	} else {
		(10, lower.as_str(), false)
	};

	let underscores_ok = !digits.ends_with('_')
		&& !digits.contains("__")
		&& (prefixed || !digits.starts_with('_'));
	// Misplaced underscores are left in so the digit parser rejects them.
	let cleaned = if underscores_ok {
		digits.replace('_', "")
	} else {
		digits.to_string()
	};

	let magnitude = u128::from_str_radix(&cleaned, radix)?;
	let out_of_range = || ScalarError::OutOfRange {
		value: text.to_string(),
		bits: bits_of::<T>(),
	};
	let signed = i128::try_from(magnitude).map_err(|_| out_of_range())?;
	let value = if negative { -signed } else { signed };

	T::try_from(value).map_err(|_| out_of_range())
}

fn narrow<T: TryFrom<i64>>(value: i64) -> std::result::Result<T, ScalarError> {
	T::try_from(value).map_err(|_| ScalarError::OutOfRange {
		value: value.to_string(),
		bits: bits_of::<T>(),
	})
}

fn bits_of<T>() -> u32 {
	(std::mem::size_of::<T>() * 8) as u32
}
