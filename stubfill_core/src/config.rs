use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::ProcessorRegistry;
use crate::StubfillError;
use crate::StubfillResult;
use crate::builtin_processors;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"stubfill.toml",
	".stubfill.toml",
	".config/stubfill.toml",
];

/// Configuration loaded from a `stubfill.toml` file.
///
/// ```toml
/// stubs_directory = "tests/stubs"
///
/// [processors]
/// disabled = ["json_to_url_encoded_query_string"]
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct StubfillConfig {
	/// Directory processors resolve file arguments against. Relative paths
	/// are relative to the project root. Defaults to the project root.
	#[serde(default)]
	pub stubs_directory: Option<PathBuf>,
	/// Which built-in processors are registered.
	#[serde(default)]
	pub processors: ProcessorsConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProcessorsConfig {
	/// Built-in processors to leave out of the registry.
	#[serde(default)]
	pub disabled: Vec<String>,
}

impl StubfillConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> StubfillResult<Option<StubfillConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: StubfillConfig =
			toml::from_str(&content).map_err(|e| StubfillError::ConfigParse(e.to_string()))?;

		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// The base directory handed to processors.
	pub fn stubs_dir(&self, root: &Path) -> PathBuf {
		match &self.stubs_directory {
			Some(directory) => root.join(directory),
			None => root.to_path_buf(),
		}
	}

	/// Build a registry from the built-in processors minus the disabled ones.
	/// Disabling a name that isn't built in is an error.
	pub fn build_registry(&self) -> StubfillResult<ProcessorRegistry> {
		let processors = builtin_processors();

		if let Some(unknown) = self
			.processors
			.disabled
			.iter()
			.find(|name| !processors.iter().any(|processor| processor.name() == name.as_str()))
		{
			return Err(StubfillError::UnsupportedProcessor(unknown.clone()));
		}

		ProcessorRegistry::new(processors.into_iter().filter(|processor| {
			!self
				.processors
				.disabled
				.iter()
				.any(|name| name == processor.name())
		}))
	}
}
