//! `stubfill_core` fills `%processor(args)%` placeholders inside stub and
//! fixture files. A placeholder names a registered processor and passes it a
//! small literal argument list; the processor reads a file relative to the
//! stub directory and its output replaces the placeholder text.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Template text
//!   -> Engine (finds `%name(args)%` spans)
//!   -> Argument parser (splits on top-level commas, coerces scalars, parses `[...]` literals)
//!   -> Registry (resolves the processor by exact name)
//!   -> Processor (reads `base_dir/<file>`, transforms the content)
//!   -> Engine (replaces every occurrence of the matched span)
//! ```
//!
//! ## Built-in Processors
//!
//! - `flatten_text(file)`: the file content with whitespace runs collapsed to
//!   a single space.
//! - `json_to_url_encoded_query_string(file, [ignored])`: a JSON object
//!   rendered as an RFC 3986 query string, optionally leaving some characters
//!   unencoded.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use stubfill_core::PlaceholderInjector;
//! use stubfill_core::StubfillConfig;
//!
//! let root = Path::new(".");
//! let config = StubfillConfig::load(root).unwrap().unwrap_or_default();
//! let injector = PlaceholderInjector::new(config.build_registry().unwrap());
//!
//! let stub = std::fs::read_to_string("stubs/create_user.json").unwrap();
//! let body = injector.inject(&stub, &config.stubs_dir(root)).unwrap();
//! println!("{body}");
//! ```

pub use arguments::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use flatten_text::*;
pub use processor::*;
pub use query_string::*;
pub use registry::*;
pub use value::*;

mod arguments;
pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
mod flatten_text;
mod processor;
mod query_string;
mod registry;
pub(crate) mod scanner;
mod value;

#[cfg(test)]
mod __fixtures;
