use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Fill `%processor(args)%` placeholders in stub and fixture files.",
	long_about = "stubfill replaces placeholders such as `%flatten_text('body.txt')%` inside \
	              mock-server stubs and test fixtures with content generated from files in a \
	              stub directory.\n\nQuick start:\n  stubfill inject stub.json    Print the \
	              filled stub\n  stubfill parse \"'a', [1]\"    Show how arguments are parsed\n  \
	              stubfill processors          List available processors"
)]
pub struct StubfillCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory, where `stubfill.toml` is
	/// discovered.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Replace every placeholder in a template file.
	///
	/// Each `%name(args)%` span is resolved through the named processor, which
	/// reads its file argument relative to the stub directory. The filled
	/// template is printed to stdout unless `--output` is given. Any failing
	/// placeholder aborts the whole run and nothing is written.
	Inject {
		/// The template file to fill. Use `-` to read from stdin.
		template: PathBuf,

		/// Directory processors resolve file arguments against. Overrides
		/// `stubs_directory` from `stubfill.toml`.
		#[arg(long)]
		stubs_dir: Option<PathBuf>,

		/// Write the result to this file instead of stdout.
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
	/// Parse a placeholder argument list and print it as JSON.
	///
	/// Useful for checking how quoting, nesting and `key => value` entries
	/// are interpreted, e.g. `stubfill parse "'a.json', ['@', '.']"`.
	Parse {
		/// The raw text that would appear between the parentheses.
		arguments: String,
	},
	/// List the processors available to placeholders.
	Processors,
}
