use std::path::Path;
use std::path::PathBuf;

use crate::ParsedValue;
use crate::StubfillError;
use crate::StubfillResult;

/// A named unit of content generation invoked by a `%name(args)%`
/// placeholder.
///
/// Processors are looked up by [`name`](Self::name) in a
/// [`ProcessorRegistry`](crate::ProcessorRegistry) and receive the base
/// directory the template belongs to together with the parsed argument list.
pub trait PlaceholderProcessor: Send + Sync {
	/// The name placeholders use to invoke this processor.
	fn name(&self) -> &str;

	/// Produce the text that replaces the placeholder.
	fn process(&self, base_dir: &Path, args: &[ParsedValue]) -> StubfillResult<String>;
}

/// A processor whose first argument names a file relative to the base
/// directory.
///
/// Implementors only transform the file's content. Resolving the path and
/// reading the file is shared by the blanket [`PlaceholderProcessor`]
/// implementation.
pub trait FileBasedProcessor: Send + Sync {
	fn name(&self) -> &str;

	/// Transform the file content. `args` is the full argument list, with the
	/// file name still at index `0`.
	fn process_file_content(&self, content: &str, args: &[ParsedValue]) -> StubfillResult<String>;
}

impl<T: FileBasedProcessor> PlaceholderProcessor for T {
	fn name(&self) -> &str {
		FileBasedProcessor::name(self)
	}

	fn process(&self, base_dir: &Path, args: &[ParsedValue]) -> StubfillResult<String> {
		let path = resolve_file_path(base_dir, args, FileBasedProcessor::name(self))?;
		let content = read_file_content(&path)?;

		self.process_file_content(&content, args)
	}
}

/// Join the base directory and the file name in `args[0]` with a `/`.
pub fn resolve_file_path(
	base_dir: &Path,
	args: &[ParsedValue],
	processor: &str,
) -> StubfillResult<PathBuf> {
	let filename = args
		.first()
		.ok_or_else(|| StubfillError::MissingFilename(processor.to_string()))?
		.to_text()
		.ok_or(StubfillError::FilenameNotScalar)?;

	let mut path = base_dir.as_os_str().to_os_string();
	path.push("/");
	path.push(filename);

	Ok(PathBuf::from(path))
}

/// Read a whole file as UTF-8 text. The handle is released before returning
/// on every path.
pub fn read_file_content(path: &Path) -> StubfillResult<String> {
	if !path.exists() {
		return Err(StubfillError::FileNotFound(path.display().to_string()));
	}

	tracing::trace!(path = %path.display(), "reading processor file");

	let bytes = std::fs::read(path).map_err(|source| {
		StubfillError::UnreadableFile {
			path: path.display().to_string(),
			source,
		}
	})?;

	String::from_utf8(bytes).map_err(|source| {
		StubfillError::NonUtf8File {
			path: path.display().to_string(),
			source,
		}
	})
}
