use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use tempfile::TempDir;

use crate::ParsedValue;
use crate::PlaceholderInjector;
use crate::PlaceholderProcessor;
use crate::ProcessorRegistry;
use crate::StubfillResult;
use crate::builtin_processors;

/// Returns a fixed string and counts how often it ran.
pub(crate) struct StaticProcessor {
	name: String,
	output: String,
	calls: Arc<AtomicUsize>,
}

impl PlaceholderProcessor for StaticProcessor {
	fn name(&self) -> &str {
		&self.name
	}

	fn process(&self, _base_dir: &Path, _args: &[ParsedValue]) -> StubfillResult<String> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(self.output.clone())
	}
}

pub(crate) fn static_processor(name: &str, output: &str) -> Box<dyn PlaceholderProcessor> {
	counted_processor(name, output).0
}

pub(crate) fn counted_processor(
	name: &str,
	output: &str,
) -> (Box<dyn PlaceholderProcessor>, Arc<AtomicUsize>) {
	let calls = Arc::new(AtomicUsize::new(0));
	let processor = StaticProcessor {
		name: name.to_string(),
		output: output.to_string(),
		calls: Arc::clone(&calls),
	};

	(Box::new(processor), calls)
}

/// Renders its parsed arguments as compact JSON.
pub(crate) struct EchoProcessor;

impl PlaceholderProcessor for EchoProcessor {
	fn name(&self) -> &str {
		"echo"
	}

	fn process(&self, _base_dir: &Path, args: &[ParsedValue]) -> StubfillResult<String> {
		Ok(serde_json::to_string(args).unwrap_or_else(|e| panic!("serialize: {e}")))
	}
}

/// The built-in processors plus `echo`.
pub(crate) fn injector_with(
	extra: impl IntoIterator<Item = Box<dyn PlaceholderProcessor>>,
) -> PlaceholderInjector {
	let mut processors = builtin_processors();
	processors.push(Box::new(EchoProcessor));
	processors.extend(extra);

	let registry = ProcessorRegistry::new(processors).unwrap_or_else(|e| panic!("registry: {e}"));
	PlaceholderInjector::new(registry)
}

/// A temporary stub directory holding `files`.
pub(crate) fn stub_dir(files: &[(&str, &str)]) -> TempDir {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));

	for (name, content) in files {
		let path = tmp.path().join(name);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create dir: {e}"));
		}
		std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {name}: {e}"));
	}

	tmp
}

pub(crate) fn text(value: &str) -> ParsedValue {
	ParsedValue::from(value)
}
