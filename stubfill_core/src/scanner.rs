//! Delimiter-aware scanning over argument text.
//!
//! Every search here walks the input one character at a time and only
//! reports matches at the *top level*: outside any quoted string and at
//! bracket depth zero. Commas, `=` and `=>` inside `'...'`, `"..."` or a
//! nested `[...]` are never split on.

/// Quote and bracket nesting at the current scan position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScanState {
	/// Incremented on `[`, decremented on `]`, only while outside quotes. May
	/// go negative on unbalanced input, which is never top level.
	bracket_depth: i32,
	/// The quote character that opened the current string, if inside one.
	quote: Option<char>,
}

impl ScanState {
	/// Update the state for `current`. A quote preceded by `\` is escaped and
	/// does not toggle the quote state.
	pub(crate) fn advance(&mut self, current: char, previous: Option<char>) {
		if matches!(current, '"' | '\'') && previous != Some('\\') {
			match self.quote {
				Some(open) if open == current => self.quote = None,
				None => self.quote = Some(current),
				Some(_) => {}
			}
		}

		if self.quote.is_none() {
			match current {
				'[' => self.bracket_depth += 1,
				']' => self.bracket_depth -= 1,
				_ => {}
			}
		}
	}

	pub(crate) fn is_top_level(&self) -> bool {
		self.quote.is_none() && self.bracket_depth == 0
	}
}

/// Split `input` on every top-level `delimiter`, trimming each segment.
///
/// Empty segments between delimiters are kept, but a trailing segment that is
/// empty after trimming is dropped, so `"a,"` yields `["a"]` while `"a,,b"`
/// yields `["a", "", "b"]`.
pub(crate) fn split_top_level(input: &str, delimiter: char) -> Vec<&str> {
	let mut segments = Vec::new();
	let mut state = ScanState::default();
	let mut previous = None;
	let mut start = 0;

	for (index, current) in input.char_indices() {
		state.advance(current, previous);
		previous = Some(current);

		if current == delimiter && state.is_top_level() {
			segments.push(input[start..index].trim());
			start = index + current.len_utf8();
		}
	}

	let tail = input[start..].trim();
	if !tail.is_empty() {
		segments.push(tail);
	}

	segments
}

/// Byte offset of the first top-level occurrence of `pattern` in `input`.
pub(crate) fn find_top_level(input: &str, pattern: &str) -> Option<usize> {
	find_top_level_where(input, pattern, |_, _| true)
}

/// Byte offset of the first top-level occurrence of `pattern` accepted by
/// `predicate`. The predicate receives the character at the match and the
/// character right after the pattern (`None` at the end of input).
pub(crate) fn find_top_level_where(
	input: &str,
	pattern: &str,
	predicate: impl Fn(char, Option<char>) -> bool,
) -> Option<usize> {
	if pattern.is_empty() || pattern.len() > input.len() {
		return None;
	}

	let last_start = input.len() - pattern.len();
	let mut state = ScanState::default();
	let mut previous = None;

	for (index, current) in input.char_indices() {
		if index > last_start {
			break;
		}

		state.advance(current, previous);
		previous = Some(current);

		if !state.is_top_level() || !input[index..].starts_with(pattern) {
			continue;
		}

		let next = input[index + pattern.len()..].chars().next();
		if predicate(current, next) {
			return Some(index);
		}
	}

	None
}
