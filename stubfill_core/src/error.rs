use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum StubfillError {
	#[error(transparent)]
	#[diagnostic(code(stubfill::io_error))]
	Io(#[from] std::io::Error),

	#[error("Invalid associative array syntax: use \"=>\" instead of \"=\"")]
	#[diagnostic(
		code(stubfill::malformed_associative_syntax),
		help("write keyed entries as `['key' => 'value']`")
	)]
	MalformedAssociativeSyntax,

	#[error("Array keys must be strings or integers")]
	#[diagnostic(
		code(stubfill::invalid_array_key),
		help("quote the key or use an integer, `true`, `null` and floats cannot be keys")
	)]
	InvalidArrayKey,

	#[error("Processor name cannot be empty")]
	#[diagnostic(code(stubfill::empty_processor_name))]
	EmptyProcessorName,

	#[error(
		"Invalid processor name \"{0}\". Processor names must start with a letter, contain only \
		 lowercase letters, numbers, underscores, and dots, and end with a letter or number."
	)]
	#[diagnostic(code(stubfill::invalid_processor_name))]
	InvalidProcessorName(String),

	#[error("Duplicate processor name \"{0}\" detected")]
	#[diagnostic(
		code(stubfill::duplicate_processor_name),
		help("each processor registered with a registry must have a unique name")
	)]
	DuplicateProcessorName(String),

	#[error("Unsupported processor \"{0}\"")]
	#[diagnostic(
		code(stubfill::unsupported_processor),
		help("run `stubfill processors` to list the registered processors")
	)]
	UnsupportedProcessor(String),

	#[error("File not found: {0}")]
	#[diagnostic(code(stubfill::file_not_found))]
	FileNotFound(String),

	#[error("Unable to read file: {path}")]
	#[diagnostic(code(stubfill::unreadable_file))]
	UnreadableFile {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("File is not valid UTF-8 text: {path}")]
	#[diagnostic(
		code(stubfill::non_utf8_file),
		help("processors read their files as UTF-8 text, re-encode the file as UTF-8")
	)]
	NonUtf8File {
		path: String,
		#[source]
		source: std::string::FromUtf8Error,
	},

	#[error("Invalid JSON in file: {filename}")]
	#[diagnostic(
		code(stubfill::invalid_json),
		help("the file must contain a JSON object or array")
	)]
	InvalidJson {
		filename: String,
		#[source]
		source: Option<serde_json::Error>,
	},

	#[error("Ignored characters must be an array")]
	#[diagnostic(
		code(stubfill::ignored_characters_not_array),
		help("pass the characters as a list, e.g. `['@', '.']`")
	)]
	IgnoredCharactersNotArray,

	#[error("Ignored characters must contain only scalar values")]
	#[diagnostic(code(stubfill::ignored_character_not_scalar))]
	IgnoredCharacterNotScalar,

	#[error("Missing filename argument for processor \"{0}\"")]
	#[diagnostic(
		code(stubfill::missing_filename),
		help("file-based processors take the file path as their first argument")
	)]
	MissingFilename(String),

	#[error("Filename argument must be a scalar value")]
	#[diagnostic(code(stubfill::filename_not_scalar))]
	FilenameNotScalar,

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(stubfill::config_parse),
		help("check that stubfill.toml is valid TOML with `stubs_directory` and/or [processors]")
	)]
	ConfigParse(String),
}

pub type StubfillResult<T> = Result<T, StubfillError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
