use indexmap::IndexMap;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

/// A typed value produced by parsing a placeholder's argument list.
///
/// Argument lists use a small literal grammar:
///
/// ```text
/// %json_to_url_encoded_query_string('query.json', ['@', '.'])%
/// %flatten_text(body.txt)%
/// ```
///
/// - **Null**: `null` (case-insensitive)
/// - **Bool**: `true` / `false` (case-insensitive)
/// - **Int**: `42`, `-7`
/// - **Float**: `3.14`
/// - **String**: `'quoted'`, `"quoted"` or a bare word
/// - **Array**: `[a, b]` or `['key' => value]`, arbitrarily nested
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ParsedValue {
	Null,
	Bool(bool),
	Int(i64),
	Float(Float),
	String(String),
	Array(ArrayValue),
}

impl ParsedValue {
	/// Returns the array payload, if this value is an array.
	pub fn as_array(&self) -> Option<&ArrayValue> {
		match self {
			Self::Array(array) => Some(array),
			_ => None,
		}
	}

	/// Returns true for `Null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Converts a scalar to the text it stands for when used as a file name or
	/// character. `true` becomes `"1"`, `false` and `null` become the empty
	/// string. Arrays have no text form and return `None`.
	pub fn to_text(&self) -> Option<String> {
		match self {
			Self::Null | Self::Bool(false) => Some(String::new()),
			Self::Bool(true) => Some("1".to_string()),
			Self::Int(value) => Some(value.to_string()),
			Self::Float(value) => Some(value.to_string()),
			Self::String(value) => Some(value.clone()),
			Self::Array(_) => None,
		}
	}
}

impl From<&str> for ParsedValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<i64> for ParsedValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<f64> for ParsedValue {
	fn from(value: f64) -> Self {
		Self::Float(Float(value))
	}
}

impl From<bool> for ParsedValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<ArrayValue> for ParsedValue {
	fn from(value: ArrayValue) -> Self {
		Self::Array(value)
	}
}

/// The two shapes an array literal can take.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValue {
	/// Positional entries, `['a', 'b']`.
	List(Vec<ParsedValue>),
	/// Keyed entries in insertion order, `['a' => 1, 2 => 'b']`. A repeated
	/// key overwrites the earlier value but keeps its original position.
	Map(IndexMap<ArrayKey, ParsedValue>),
}

impl ArrayValue {
	pub fn len(&self) -> usize {
		match self {
			Self::List(items) => items.len(),
			Self::Map(entries) => entries.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Iterates over the values, ignoring keys.
	pub fn values(&self) -> Box<dyn Iterator<Item = &ParsedValue> + '_> {
		match self {
			Self::List(items) => Box::new(items.iter()),
			Self::Map(entries) => Box::new(entries.values()),
		}
	}
}

/// Keys allowed in a keyed array literal. No other key type can be built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayKey {
	String(String),
	Int(i64),
}

impl std::fmt::Display for ArrayKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::String(key) => write!(f, "{key}"),
			Self::Int(key) => write!(f, "{key}"),
		}
	}
}

impl From<&str> for ArrayKey {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}

impl From<i64> for ArrayKey {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

/// A float wrapper that compares approximately so `ParsedValue` can derive
/// `PartialEq`.
#[derive(Debug, Clone, Copy)]
pub struct Float(pub f64);

impl PartialEq for Float {
	fn eq(&self, other: &Self) -> bool {
		float_cmp::approx_eq!(f64, self.0, other.0)
	}
}

impl std::fmt::Display for Float {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for ParsedValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::Int(value) => serializer.serialize_i64(*value),
			Self::Float(value) => serializer.serialize_f64(value.0),
			Self::String(value) => serializer.serialize_str(value),
			Self::Array(array) => array.serialize(serializer),
		}
	}
}

impl Serialize for ArrayValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::List(items) => items.serialize(serializer),
			Self::Map(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (key, value) in entries {
					map.serialize_entry(&key.to_string(), value)?;
				}
				map.end()
			}
		}
	}
}
