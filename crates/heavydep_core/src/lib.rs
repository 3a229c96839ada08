//! Core of heavydep: finds the third-party dependencies a Go package relies on
//! most heavily.
//!
//! This crate provides:
//! - Extracting import paths from Go source files (imports-only parsing)
//! - Weighing a package's third-party imports by the number of files using them
//! - Walking the transitive dependency closure with per-depender edges
//!
//! # Examples
//!
//! ```no_run
//! use heavydep_core::{SourceRoot, Weigher, sort_by_weight};
//!
//! let weigher = Weigher::new(SourceRoot::from_gopath("/home/gopher/go"));
//!
//! for imp in weigher.weighted_imports_for_pkg("github.com/ttacon/heavydep") {
//!     println!("[{}] {}", imp.name, imp.weight);
//! }
//!
//! let mut closure = weigher.weighted_imports_for_pkg_rec("github.com/ttacon/heavydep");
//! sort_by_weight(&mut closure);
//! ```

mod closure;
mod config;
mod constants;
mod parser;
mod types;
mod weigher;

// Re-export public API
pub use config::SourceRoot;
pub use constants::{GO_EXTENSION, GO_STDLIB, GO_TEST_SUFFIX, is_std_lib, unquote};
pub use parser::{imports_for, imports_for_file, imports_in_source};
pub use types::{WeightedImport, sort_by_weight};
pub use weigher::Weigher;
