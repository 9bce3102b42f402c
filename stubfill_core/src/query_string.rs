use serde_json::Number;
use serde_json::Value;

use crate::FileBasedProcessor;
use crate::ParsedValue;
use crate::StubfillError;
use crate::StubfillResult;

/// `%json_to_url_encoded_query_string(file, [ignored...])%`: a JSON file
/// rendered as an `application/x-www-form-urlencoded` body.
///
/// Top-level fields become `key=value` pairs joined by `&`, percent-encoded
/// per RFC 3986. Nested arrays and objects are embedded as their compact JSON
/// text, booleans become `1` / `0` and `null` fields are dropped.
///
/// The optional second argument lists characters to leave unencoded. Each
/// one's encoded form is replaced back with the raw character by plain
/// substring replacement over the finished string, so an ignored character
/// whose encoding appears inside another encoded sequence is restored there
/// too.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonToUrlEncodedQueryStringProcessor;

impl JsonToUrlEncodedQueryStringProcessor {
	pub const NAME: &'static str = "json_to_url_encoded_query_string";
}

impl FileBasedProcessor for JsonToUrlEncodedQueryStringProcessor {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn process_file_content(&self, content: &str, args: &[ParsedValue]) -> StubfillResult<String> {
		let ignored = ignored_characters(args)?;
		let invalid_json = |source: Option<serde_json::Error>| {
			StubfillError::InvalidJson {
				filename: args.first().and_then(ParsedValue::to_text).unwrap_or_default(),
				source,
			}
		};

		let data: Value =
			serde_json::from_str(content.trim()).map_err(|error| invalid_json(Some(error)))?;
		let query = build_query_string(&data).ok_or_else(|| invalid_json(None))?;

		Ok(restore_ignored_characters(query, &ignored))
	}
}

/// `args[1]` as a list of characters. Absent and `null` both mean none.
fn ignored_characters(args: &[ParsedValue]) -> StubfillResult<Vec<String>> {
	match args.get(1) {
		None | Some(ParsedValue::Null) => Ok(Vec::new()),
		Some(ParsedValue::Array(array)) => {
			array
				.values()
				.map(|value| value.to_text().ok_or(StubfillError::IgnoredCharacterNotScalar))
				.collect()
		}
		Some(_) => Err(StubfillError::IgnoredCharactersNotArray),
	}
}

/// Build a query string from a JSON object or array. Array indices become
/// the keys. Returns `None` for any other top-level JSON value.
pub fn build_query_string(data: &Value) -> Option<String> {
	let fields: Vec<(String, &Value)> = match data {
		Value::Object(map) => map.iter().map(|(key, value)| (key.clone(), value)).collect(),
		Value::Array(items) => {
			items
				.iter()
				.enumerate()
				.map(|(index, value)| (index.to_string(), value))
				.collect()
		}
		_ => return None,
	};

	let pairs: Vec<String> = fields
		.into_iter()
		.filter_map(|(key, value)| {
			query_value(value).map(|value| {
				format!("{}={}", urlencoding::encode(&key), urlencoding::encode(&value))
			})
		})
		.collect();

	Some(pairs.join("&"))
}

fn query_value(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::Bool(flag) => Some(if *flag { "1" } else { "0" }.to_string()),
		Value::Number(number) => Some(format_number(number)),
		Value::String(text) => Some(text.clone()),
		Value::Array(_) | Value::Object(_) => Some(value.to_string()),
	}
}

/// Floats use the shortest digits that round-trip. Whole floats drop the
/// trailing `.0`, so `2.0` is sent as `2`. Magnitudes below `1e-4` or from
/// `1e15` up switch to exponent form (`1.0E-7`, `1.5E+25`).
fn format_number(number: &Number) -> String {
	match number.as_f64() {
		Some(value) if number.is_f64() => format_float(value),
		_ => number.to_string(),
	}
}

fn format_float(value: f64) -> String {
	let scientific = format!("{value:e}");
	let Some((mantissa, exponent)) = scientific.split_once('e') else {
		return value.to_string();
	};
	let Ok(exponent) = exponent.parse::<i32>() else {
		return value.to_string();
	};

	if (-4..15).contains(&exponent) {
		return value.to_string();
	}

	let sign = if exponent < 0 { '-' } else { '+' };
	if mantissa.contains('.') {
		format!("{mantissa}E{sign}{}", exponent.abs())
	} else {
		format!("{mantissa}.0E{sign}{}", exponent.abs())
	}
}

fn restore_ignored_characters(mut query: String, ignored: &[String]) -> String {
	for character in ignored.iter().filter(|character| !character.is_empty()) {
		let encoded = urlencoding::encode(character);
		if encoded != character.as_str() {
			query = query.replace(encoded.as_ref(), character);
		}
	}

	query
}
