use std::borrow::Borrow;

use derive_more::Deref;
use indexmap::IndexMap;

use crate::FlattenTextProcessor;
use crate::JsonToUrlEncodedQueryStringProcessor;
use crate::PlaceholderProcessor;
use crate::StubfillError;
use crate::StubfillResult;

/// A validated processor name.
///
/// Names start with a lowercase ASCII letter, contain only lowercase letters,
/// digits, `_` and `.`, and end with a letter or digit: `a`, `proc.name`,
/// `flatten_text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref)]
pub struct ProcessorName(String);

impl ProcessorName {
	pub fn new(name: impl Into<String>) -> StubfillResult<Self> {
		let name = name.into();

		if name.is_empty() {
			return Err(StubfillError::EmptyProcessorName);
		}

		if !is_valid_processor_name(&name) {
			return Err(StubfillError::InvalidProcessorName(name));
		}

		Ok(Self(name))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for ProcessorName {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for ProcessorName {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

fn is_valid_processor_name(name: &str) -> bool {
	let Some((first, rest)) = name.as_bytes().split_first() else {
		return false;
	};

	if !first.is_ascii_lowercase() {
		return false;
	}

	let Some((last, middle)) = rest.split_last() else {
		return true;
	};

	let is_edge = |byte: &u8| byte.is_ascii_lowercase() || byte.is_ascii_digit();
	is_edge(last) && middle.iter().all(|byte| is_edge(byte) || matches!(byte, b'_' | b'.'))
}

/// The processors shipped with stubfill, in registration order.
pub fn builtin_processors() -> Vec<Box<dyn PlaceholderProcessor>> {
	vec![
		Box::new(FlattenTextProcessor),
		Box::new(JsonToUrlEncodedQueryStringProcessor),
	]
}

/// Processors indexed by name.
///
/// All validation happens in [`ProcessorRegistry::new`]; a constructed
/// registry is immutable and only supports exact, case-sensitive lookups.
pub struct ProcessorRegistry {
	processors: IndexMap<ProcessorName, Box<dyn PlaceholderProcessor>>,
}

impl ProcessorRegistry {
	/// Index `processors` by name. Fails on the first empty, invalid or
	/// duplicate name.
	pub fn new(
		processors: impl IntoIterator<Item = Box<dyn PlaceholderProcessor>>,
	) -> StubfillResult<Self> {
		let mut indexed = IndexMap::new();

		for processor in processors {
			let name = ProcessorName::new(processor.name())?;

			if indexed.contains_key(&name) {
				return Err(StubfillError::DuplicateProcessorName(name.to_string()));
			}

			indexed.insert(name, processor);
		}

		tracing::debug!(count = indexed.len(), "built processor registry");

		Ok(Self {
			processors: indexed,
		})
	}

	/// A registry holding every [`builtin_processors`] entry.
	pub fn with_defaults() -> StubfillResult<Self> {
		Self::new(builtin_processors())
	}

	/// Look up a processor by its exact name.
	pub fn get(&self, name: &str) -> StubfillResult<&dyn PlaceholderProcessor> {
		self.processors
			.get(name)
			.map(|processor| processor.as_ref())
			.ok_or_else(|| StubfillError::UnsupportedProcessor(name.to_string()))
	}

	pub fn contains(&self, name: &str) -> bool {
		self.processors.contains_key(name)
	}

	/// Registered names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &ProcessorName> {
		self.processors.keys()
	}

	pub fn len(&self) -> usize {
		self.processors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.processors.is_empty()
	}
}

impl std::fmt::Debug for ProcessorRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ProcessorRegistry")
			.field("processors", &self.processors.keys().collect::<Vec<_>>())
			.finish()
	}
}
