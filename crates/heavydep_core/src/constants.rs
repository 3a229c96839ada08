//! Constants for Go source discovery and standard-library classification.
//!
//! A Go package is a single directory. Only `.go` files directly inside it are
//! part of the package, and `_test.go` files are excluded because their imports
//! never reach a build of the package itself.
//!
//! ## Standard library
//!
//! An import path belongs to the standard library when its first path segment
//! is one of [`GO_STDLIB`]. Third-party paths always start with a domain-like
//! segment (`github.com`, `golang.org`, `gopkg.in`), so the first segment is
//! enough to tell them apart.

/// Extension of Go source files
pub const GO_EXTENSION: &str = ".go";

/// Suffix of Go test files, which are skipped when weighing a package
pub const GO_TEST_SUFFIX: &str = "_test.go";

/// Top-level names of the Go standard library (plus the cgo pseudo-package `C`)
pub const GO_STDLIB: &[&str] = &[
    "C",
    "archive",
    "bufio",
    "builtin",
    "bytes",
    "cmp",
    "compress",
    "container",
    "context",
    "crypto",
    "database",
    "debug",
    "embed",
    "encoding",
    "errors",
    "expvar",
    "flag",
    "fmt",
    "go",
    "hash",
    "html",
    "image",
    "index",
    "io",
    "iter",
    "log",
    "maps",
    "math",
    "mime",
    "net",
    "os",
    "path",
    "plugin",
    "reflect",
    "regexp",
    "runtime",
    "slices",
    "sort",
    "strconv",
    "strings",
    "structs",
    "sync",
    "syscall",
    "testing",
    "text",
    "time",
    "unicode",
    "unique",
    "unsafe",
    "weak",
];

/// Strip the quote characters an import literal carries in source.
///
/// Both interpreted (`"fmt"`) and raw (`` `fmt` ``) string literals are valid
/// import paths in Go.
pub fn unquote(imp: &str) -> &str {
    imp.trim_matches(|c: char| c == '"' || c == '`')
}

/// Whether `imp` names a standard-library package.
///
/// Quoted and unquoted forms are both accepted. An empty path is treated as
/// standard library so it never shows up as a dependency.
pub fn is_std_lib(imp: &str) -> bool {
    let cleaned = unquote(imp);
    match cleaned.split('/').next() {
        Some(first) if !first.is_empty() => GO_STDLIB.contains(&first),
        _ => true,
    }
}

/// Whether a directory entry name is a non-test Go source file
pub fn is_go_source(file_name: &str) -> bool {
    file_name.ends_with(GO_EXTENSION) && !file_name.ends_with(GO_TEST_SUFFIX)
}
