use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use stubfill_cli::Commands;
use stubfill_cli::StubfillCli;
use stubfill_core::PlaceholderInjector;
use stubfill_core::StubfillConfig;
use stubfill_core::parse_arguments;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,dimmed) => {
		if color_enabled() {
			format!("{}", $text.dimmed())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = StubfillCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Inject {
			template,
			stubs_dir,
			output,
		}) => run_inject(&args, template, stubs_dir.as_deref(), output.as_deref()),
		Some(Commands::Parse { arguments }) => run_parse(arguments),
		Some(Commands::Processors) => run_processors(&args),
		None => {
			eprintln!("No subcommand specified. Run `stubfill --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<stubfill_core::StubfillError>() {
			Ok(stubfill_err) => {
				let report: miette::Report = (*stubfill_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr so stdout only ever carries the filled template.
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.init();
}

fn resolve_root(args: &StubfillCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(root: &Path) -> Result<StubfillConfig, Box<dyn std::error::Error>> {
	Ok(StubfillConfig::load(root)?.unwrap_or_default())
}

fn read_template(template: &Path) -> Result<String, Box<dyn std::error::Error>> {
	if template == Path::new("-") {
		let mut content = String::new();
		std::io::stdin().read_to_string(&mut content)?;
		return Ok(content);
	}

	Ok(std::fs::read_to_string(template)?)
}

fn run_inject(
	args: &StubfillCli,
	template: &Path,
	stubs_dir: Option<&Path>,
	output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = load_config(&root)?;
	let stubs_dir = stubs_dir.map_or_else(|| config.stubs_dir(&root), Path::to_path_buf);
	let injector = PlaceholderInjector::new(config.build_registry()?);

	let content = read_template(template)?;
	tracing::debug!(
		template = %template.display(),
		stubs_dir = %stubs_dir.display(),
		"injecting template"
	);
	let injected = injector.inject(&content, &stubs_dir)?;

	match output {
		Some(path) => {
			std::fs::write(path, &injected)?;
			eprintln!("{} {}", colored!("Wrote", green), path.display());
		}
		None => print!("{injected}"),
	}

	Ok(())
}

fn run_parse(arguments: &str) -> Result<(), Box<dyn std::error::Error>> {
	let values = parse_arguments(arguments)?;
	println!("{}", serde_json::to_string_pretty(&values)?);

	Ok(())
}

fn run_processors(args: &StubfillCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let registry = load_config(&root)?.build_registry()?;

	if registry.is_empty() {
		println!("{}", colored!("No processors are enabled.", dimmed));
		return Ok(());
	}

	for name in registry.names() {
		println!("{name}");
	}

	Ok(())
}
