use indexmap::IndexMap;

use crate::ArrayKey;
use crate::ArrayValue;
use crate::Float;
use crate::ParsedValue;
use crate::StubfillError;
use crate::StubfillResult;
use crate::scanner::find_top_level;
use crate::scanner::find_top_level_where;
use crate::scanner::split_top_level;

/// Parse a placeholder's raw argument text into typed values.
///
/// The text is split on top-level commas. Each element wrapped in `[...]` is
/// parsed as an array literal, everything else is coerced as a scalar. Empty
/// or all-whitespace input yields no arguments.
///
/// ```rust
/// use stubfill_core::ParsedValue;
/// use stubfill_core::parse_arguments;
///
/// let args = parse_arguments("'body.json', 42, null").unwrap();
/// assert_eq!(args, vec![
/// 	ParsedValue::from("body.json"),
/// 	ParsedValue::Int(42),
/// 	ParsedValue::Null,
/// ]);
/// ```
pub fn parse_arguments(input: impl AsRef<str>) -> StubfillResult<Vec<ParsedValue>> {
	let input = input.as_ref();
	if input.trim().is_empty() {
		return Ok(Vec::new());
	}

	split_top_level(input, ',')
		.into_iter()
		.map(parse_value)
		.collect()
}

/// Parse a single element, either a nested array literal or a scalar.
fn parse_value(element: &str) -> StubfillResult<ParsedValue> {
	let element = element.trim();
	if is_array_literal(element) {
		return parse_array(element).map(ParsedValue::Array);
	}

	Ok(coerce_scalar(element))
}

fn is_array_literal(element: &str) -> bool {
	element.starts_with('[') && element.ends_with(']')
}

/// Parse an array literal such as `['a', 'b']` or `['key' => 'value']`.
///
/// A literal with no `=>` entries becomes an [`ArrayValue::List`]. As soon as
/// one entry is keyed the whole literal becomes an [`ArrayValue::Map`] and
/// positional entries take the next free integer key.
pub fn parse_array(literal: &str) -> StubfillResult<ArrayValue> {
	let literal = literal.trim();
	let content = literal.get(1..literal.len().saturating_sub(1)).unwrap_or("").trim();
	let mut builder = ArrayBuilder::default();

	if content.is_empty() {
		return Ok(builder.finish());
	}

	for element in split_top_level(content, ',') {
		if has_malformed_assignment(element) {
			return Err(StubfillError::MalformedAssociativeSyntax);
		}

		if let Some(arrow) = find_top_level(element, "=>") {
			let key_part = element[..arrow].trim();
			let value = parse_value(&element[arrow + 2..])?;
			builder.insert(parse_key(key_part)?, value);
		} else {
			builder.push(parse_value(element)?);
		}
	}

	Ok(builder.finish())
}

/// A top-level `=` that isn't part of `=>` with content on both sides is a
/// typo for `=>`. A lone trailing or leading `=` is left to the scalar rules.
fn has_malformed_assignment(element: &str) -> bool {
	let Some(position) = find_top_level_where(element, "=", |_, next| next != Some('>')) else {
		return false;
	};

	!element[..position].trim().is_empty() && !element[position + 1..].trim().is_empty()
}

fn parse_key(key_part: &str) -> StubfillResult<ArrayKey> {
	if is_array_literal(key_part) {
		return Err(StubfillError::InvalidArrayKey);
	}

	match coerce_scalar(key_part) {
		ParsedValue::String(key) => {
			Ok(canonical_integer(&key).map_or(ArrayKey::String(key), ArrayKey::Int))
		}
		ParsedValue::Int(key) => Ok(ArrayKey::Int(key)),
		_ => Err(StubfillError::InvalidArrayKey),
	}
}

/// A string key spelled as a plain decimal integer (`"7"`, `"-3"`, not
/// `"07"`, `"+7"` or `"-0"`) names the same entry as the integer key.
fn canonical_integer(key: &str) -> Option<i64> {
	let digits = key.strip_prefix('-').unwrap_or(key);
	let canonical = match digits.as_bytes() {
		[b'0'] => digits.len() == key.len(),
		[b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
		_ => false,
	};

	if canonical { key.parse().ok() } else { None }
}

/// Collects array entries, tracking whether any entry was explicitly keyed.
#[derive(Debug, Default)]
struct ArrayBuilder {
	entries: IndexMap<ArrayKey, ParsedValue>,
	keyed: bool,
	next_index: i64,
}

impl ArrayBuilder {
	fn push(&mut self, value: ParsedValue) {
		let key = ArrayKey::Int(self.next_index);
		self.next_index = self.next_index.saturating_add(1);
		self.entries.insert(key, value);
	}

	fn insert(&mut self, key: ArrayKey, value: ParsedValue) {
		if let ArrayKey::Int(index) = key {
			self.next_index = self.next_index.max(index.saturating_add(1));
		}

		self.keyed = true;
		self.entries.insert(key, value);
	}

	fn finish(self) -> ArrayValue {
		if self.keyed {
			ArrayValue::Map(self.entries)
		} else {
			ArrayValue::List(self.entries.into_values().collect())
		}
	}
}

/// Convert a literal token into a scalar value. Never produces an array.
///
/// Rules are checked in order: `null`, `true` / `false` (all
/// case-insensitive), numbers (a `.` makes it a float), a string wrapped in
/// matching quotes (backslash escapes removed), and finally the token itself
/// as a bare string.
pub fn coerce_scalar(token: &str) -> ParsedValue {
	let token = token.trim();

	if token.eq_ignore_ascii_case("null") {
		return ParsedValue::Null;
	}

	if token.eq_ignore_ascii_case("true") {
		return ParsedValue::Bool(true);
	}

	if token.eq_ignore_ascii_case("false") {
		return ParsedValue::Bool(false);
	}

	if is_numeric(token) {
		return if token.contains('.') {
			ParsedValue::Float(Float(token.parse().unwrap_or_default()))
		} else {
			ParsedValue::Int(parse_integer(token))
		};
	}

	if let Some(inner) = strip_quotes(token) {
		return ParsedValue::String(strip_backslashes(inner));
	}

	ParsedValue::String(token.to_string())
}

/// Optional sign, digits with at most one `.`, then an optional exponent.
fn is_numeric(token: &str) -> bool {
	let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
	let body = token.strip_prefix(['+', '-']).unwrap_or(token);
	let (mantissa, exponent) = match body.find(['e', 'E']) {
		Some(index) => (&body[..index], Some(&body[index + 1..])),
		None => (body, None),
	};
	let (whole, fraction) = match mantissa.split_once('.') {
		Some((whole, fraction)) => (whole, Some(fraction)),
		None => (mantissa, None),
	};

	let has_digits = !whole.is_empty() || fraction.is_some_and(|part| !part.is_empty());
	if !has_digits || !all_digits(whole) || !fraction.is_none_or(all_digits) {
		return false;
	}

	exponent.is_none_or(|exponent| {
		let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
		!digits.is_empty() && all_digits(digits)
	})
}

/// Integers that overflow or carry an exponent saturate through `f64`.
fn parse_integer(token: &str) -> i64 {
	token
		.parse::<i64>()
		.unwrap_or_else(|_| token.parse::<f64>().map_or(0, |value| value as i64))
}

fn strip_quotes(token: &str) -> Option<&str> {
	['\'', '"']
		.into_iter()
		.find(|quote| token.starts_with(*quote) && token.ends_with(*quote))
		.map(|_| token.get(1..token.len() - 1).unwrap_or(""))
}

/// Drop each backslash and keep the character it escapes, so `\'` becomes
/// `'` and `\\` becomes `\`.
fn strip_backslashes(input: &str) -> String {
	let mut result = String::with_capacity(input.len());
	let mut chars = input.chars();

	while let Some(current) = chars.next() {
		if current == '\\' {
			if let Some(escaped) = chars.next() {
				result.push(escaped);
			}
		} else {
			result.push(current);
		}
	}

	result
}
