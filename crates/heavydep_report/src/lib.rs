//! Reporting front end for heavydep.
//!
//! This crate wires the core weigher to the command line: it parses and
//! validates configuration, runs the analysis, and presents the result as a
//! ranked listing, JSON, DOT text or a Graphviz-rendered image.
//!
//! # Examples
//!
//! ```no_run
//! use heavydep_report::{Config, run_weigh};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut cfg = Config::for_package("github.com/ttacon/heavydep");
//! cfg.recursive = true;
//! cfg.initialize()?;
//!
//! let result = run_weigh(&cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! heavydep_report::print_weights(&mut stdout, &result.imports, 10)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod graph;
mod render;
mod reporter;
mod runner;
mod types;

// Re-export public API
pub use config::{Config, resolve_gopath};
pub use graph::{Edge, dot_source, edges, write_dot};
pub use render::{ImageFormat, find_executable, render_graph, render_graph_with};
pub use reporter::{print_json, print_no_dependencies_message, print_weights};
pub use runner::run_weigh;
pub use types::WeighResult;
