use anyhow::{Context, Result, anyhow, bail};
use log::{debug, trace, warn};
use std::{fs, path::Path};
use tree_sitter::{Language, Node, Parser};

use crate::constants::unquote;

/// Characters that may never appear in an import path
const ILLEGAL_PATH_CHARS: &str = "!\"#$%&'()*,:;<=>?[\\]^{|}`\u{FFFD}";

/// Imports of `file`, or nothing if it can't be read or parsed.
///
/// A single bad file must never abort a package scan, so failures are only
/// logged.
pub fn imports_for_file(file: &Path) -> Vec<String> {
    match imports_for(file) {
        Ok(imports) => imports,
        Err(e) => {
            warn!("Skipping {}: {:#}", file.display(), e);
            Vec::new()
        }
    }
}

/// Reads `file` and returns the import path literals it declares.
pub fn imports_for(file: &Path) -> Result<Vec<String>> {
    trace!("Parsing file for imports: {}", file.display());
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let imports = imports_in_source(&src)
        .with_context(|| format!("Failed to parse imports of {}", file.display()))?;
    debug!("Found {} imports in {}", imports.len(), file.display());
    Ok(imports)
}

/// Returns the import path literals declared in Go source, in declaration order.
///
/// Literals are returned exactly as written, quotes included. Only the package
/// clause and the import declarations that follow it are inspected: scanning
/// stops at the first other top-level declaration, so syntax errors further
/// down the file don't matter.
pub fn imports_in_source(src: &str) -> Result<Vec<String>> {
    let language: Language = tree_sitter_go::LANGUAGE.into();
    let mut parser = Parser::new();
    parser.set_language(&language).context("Failed to load the Go grammar")?;
    let tree = parser.parse(src, None).ok_or_else(|| anyhow!("Parser produced no syntax tree"))?;
    let root = tree.root_node();

    let mut imports = Vec::new();
    let mut seen_package = false;
    let mut cursor = root.walk();

    for node in root.named_children(&mut cursor) {
        match node.kind() {
            "comment" => continue,
            "package_clause" => {
                if seen_package || node.has_error() {
                    bail!("malformed package clause at line {}", line_of(&node));
                }
                seen_package = true;
            }
            "import_declaration" => {
                if !seen_package {
                    bail!("expected 'package', found 'import' at line {}", line_of(&node));
                }
                if node.has_error() {
                    bail!("malformed import declaration at line {}", line_of(&node));
                }
                collect_import_specs(&node, src, &mut imports)?;
            }
            "ERROR" if !seen_package || touches_imports(&node) => {
                bail!("syntax error at line {}", line_of(&node))
            }
            other => {
                if !seen_package {
                    bail!("expected 'package', found '{}' at line {}", other, line_of(&node));
                }
                trace!("Reached '{}', import section done", other);
                break;
            }
        }
    }

    if !seen_package {
        bail!("expected 'package' clause");
    }
    Ok(imports)
}

fn collect_import_specs(node: &Node, src: &str, imports: &mut Vec<String>) -> Result<()> {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => {
                let path = child
                    .child_by_field_name("path")
                    .ok_or_else(|| anyhow!("import without a path at line {}", line_of(&child)))?;
                let literal = &src[path.byte_range()];
                if !is_valid_import(literal) {
                    bail!("invalid import path: {}", literal);
                }
                trace!("Found import: {}", literal);
                imports.push(literal.to_string());
            }
            "import_spec_list" => collect_import_specs(&child, src, imports)?,
            _ => {}
        }
    }
    Ok(())
}

fn is_valid_import(literal: &str) -> bool {
    let path = unquote(literal);
    !path.is_empty()
        && path.chars().all(|c| {
            !c.is_whitespace() && !c.is_control() && !ILLEGAL_PATH_CHARS.contains(c)
        })
}

/// Whether an error node swallowed (part of) an import declaration
fn touches_imports(node: &Node) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| matches!(child.kind(), "import" | "import_spec" | "import_spec_list"));
    found
}

fn line_of(node: &Node) -> usize {
    node.start_position().row + 1
}
