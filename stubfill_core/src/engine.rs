use std::collections::HashSet;
use std::path::Path;

use crate::ProcessorRegistry;
use crate::StubfillResult;
use crate::parse_arguments;

/// A `%name(args)%` occurrence found in template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderInvocation<'a> {
	/// The processor name between `%` and `(`.
	pub name: &'a str,
	/// The raw, unparsed text between `(` and `)%`.
	pub arguments: &'a str,
	/// The full matched text, from the opening `%` to the closing `)%`.
	pub matched: &'a str,
	/// Byte offset of the opening `%` in the template.
	pub offset: usize,
}

/// Find every non-overlapping placeholder in `template`, in order of
/// appearance.
///
/// A placeholder is `%IDENT(ARGS)%` where `IDENT` is
/// `[a-zA-Z_][a-zA-Z0-9_]*` and `ARGS` runs to the first `)%`. A `%` inside
/// the arguments is allowed unless an identifier character follows it, which
/// would make it the start of another placeholder. Text that doesn't fit the
/// grammar is ignored.
pub fn find_placeholders(template: &str) -> Vec<PlaceholderInvocation<'_>> {
	let mut invocations = Vec::new();
	let mut cursor = 0;

	while cursor < template.len() {
		if let Some(invocation) = match_placeholder(template, cursor) {
			cursor = invocation.offset + invocation.matched.len();
			invocations.push(invocation);
		} else {
			cursor += 1;
		}
	}

	invocations
}

fn is_ident_start(byte: u8) -> bool {
	byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_ident_continue(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Try to match a placeholder starting exactly at byte `start`.
fn match_placeholder(template: &str, start: usize) -> Option<PlaceholderInvocation<'_>> {
	let bytes = template.as_bytes();

	if bytes.get(start) != Some(&b'%') {
		return None;
	}

	let name_start = start + 1;
	if !bytes.get(name_start).copied().is_some_and(is_ident_start) {
		return None;
	}

	let mut name_end = name_start + 1;
	while bytes.get(name_end).copied().is_some_and(is_ident_continue) {
		name_end += 1;
	}

	if bytes.get(name_end) != Some(&b'(') {
		return None;
	}

	let arguments_start = name_end + 1;
	let mut cursor = arguments_start;

	loop {
		if bytes.get(cursor..cursor + 2) == Some(b")%".as_slice()) {
			return Some(PlaceholderInvocation {
				name: &template[name_start..name_end],
				arguments: &template[arguments_start..cursor],
				matched: &template[start..cursor + 2],
				offset: start,
			});
		}

		let current = *bytes.get(cursor)?;
		if current == b'%' && bytes.get(cursor + 1).copied().is_some_and(is_ident_start) {
			return None;
		}

		cursor += 1;
	}
}

/// Replaces placeholders in template text with the output of registered
/// processors.
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use stubfill_core::PlaceholderInjector;
/// use stubfill_core::ProcessorRegistry;
///
/// let injector = PlaceholderInjector::new(ProcessorRegistry::with_defaults().unwrap());
/// let body = injector
/// 	.inject("{\"query\": \"%flatten_text('query.graphql')%\"}", Path::new("stubs"))
/// 	.unwrap();
/// ```
#[derive(Debug)]
pub struct PlaceholderInjector {
	registry: ProcessorRegistry,
}

impl PlaceholderInjector {
	pub fn new(registry: ProcessorRegistry) -> Self {
		Self { registry }
	}

	pub fn registry(&self) -> &ProcessorRegistry {
		&self.registry
	}

	/// Substitute every placeholder in `template`.
	///
	/// Placeholders are resolved in order of appearance and each result
	/// replaces *every* occurrence of the matched text, so identical
	/// placeholders share a single processor call. Replacement is by text,
	/// not position: if a processor's output contains the literal text of a
	/// placeholder that comes later, that text is replaced as well.
	///
	/// Any failure aborts the whole call and no partial result is returned.
	pub fn inject(&self, template: &str, base_dir: &Path) -> StubfillResult<String> {
		let invocations = find_placeholders(template);
		if invocations.is_empty() {
			return Ok(template.to_string());
		}

		let mut result = template.to_string();
		let mut resolved = HashSet::new();

		for invocation in invocations {
			if !resolved.insert(invocation.matched) {
				continue;
			}

			let output = self.resolve(&invocation, base_dir)?;
			result = result.replace(invocation.matched, &output);
		}

		Ok(result)
	}

	/// Run the processor named by a single invocation.
	pub fn resolve(
		&self,
		invocation: &PlaceholderInvocation<'_>,
		base_dir: &Path,
	) -> StubfillResult<String> {
		let arguments = parse_arguments(invocation.arguments)?;
		tracing::trace!(
			placeholder = invocation.matched,
			count = arguments.len(),
			"parsed placeholder arguments"
		);

		let processor = self.registry.get(invocation.name)?;
		tracing::debug!(
			processor = invocation.name,
			base_dir = %base_dir.display(),
			"resolving placeholder"
		);

		processor.process(base_dir, &arguments)
	}
}
