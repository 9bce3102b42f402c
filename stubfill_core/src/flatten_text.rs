use crate::FileBasedProcessor;
use crate::ParsedValue;
use crate::StubfillResult;

/// `%flatten_text(file)%`: the file content on a single line.
///
/// Every run of whitespace, including newlines and Unicode spaces, becomes a
/// single space and the result is trimmed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlattenTextProcessor;

impl FlattenTextProcessor {
	pub const NAME: &'static str = "flatten_text";
}

impl FileBasedProcessor for FlattenTextProcessor {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn process_file_content(&self, content: &str, _args: &[ParsedValue]) -> StubfillResult<String> {
		Ok(flatten_whitespace(content))
	}
}

/// Collapse whitespace runs to one space and trim both ends.
pub fn flatten_whitespace(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}
