use log::debug;
use std::io::{self, Write};

use heavydep_core::WeightedImport;

/// One `depender -> dependency` edge of the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<'a> {
    pub depender: &'a str,
    /// Unquoted import path
    pub dependency: &'a str,
    pub weight: usize,
}

/// Every edge recorded in `imports`, record by record.
///
/// A record without edges contributes nothing.
pub fn edges(imports: &[WeightedImport]) -> Vec<Edge<'_>> {
    imports
        .iter()
        .flat_map(|imp| {
            imp.edges.iter().map(move |(depender, weight)| Edge {
                depender,
                dependency: imp.path(),
                weight: *weight,
            })
        })
        .collect()
}

/// Writes the dependency graph of `imports` as Graphviz DOT.
pub fn write_dot<W: Write>(writer: &mut W, imports: &[WeightedImport]) -> io::Result<()> {
    let edges = edges(imports);
    debug!("Writing DOT graph with {} edges", edges.len());

    writeln!(writer, "digraph G {{")?;
    for edge in &edges {
        writeln!(
            writer,
            "\t\t{} -> {} [label=\"{}\"];",
            quote(edge.depender),
            quote(edge.dependency),
            edge.weight
        )?;
    }
    writeln!(writer, "}}")?;
    Ok(())
}

/// The DOT text of `imports`
pub fn dot_source(imports: &[WeightedImport]) -> io::Result<String> {
    let mut buf = Vec::new();
    write_dot(&mut buf, imports)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Quote a node ID for DOT
fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use heavydep_core::{SourceRoot, Weigher};
    use std::{collections::HashSet, fs, path::Path};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
    }

    fn closure_fixture() -> (TempDir, Vec<WeightedImport>) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "R/a.go", "package r\nimport (\n\t\"ex.com/x\"\n\t\"fmt\"\n)\n");
        create_test_file(root, "R/b.go", "package r\nimport \"ex.com/x\"\n");
        create_test_file(root, "ex.com/x/x.go", "package x\nimport \"ex.com/y\"\n");
        create_test_file(root, "ex.com/y/y.go", "package y\nimport `ex.com/x`\n");

        let imports = Weigher::new(SourceRoot::new(root)).weighted_imports_for_pkg_rec("R");
        (temp_dir, imports)
    }

    #[test]
    fn test_edges_enumerates_every_depender() {
        let (_temp_dir, imports) = closure_fixture();
        let got: HashSet<_> = edges(&imports).into_iter().collect();
        let want: HashSet<_> = [
            Edge { depender: "R", dependency: "ex.com/x", weight: 2 },
            Edge { depender: "ex.com/y", dependency: "ex.com/x", weight: 1 },
            Edge { depender: "ex.com/x", dependency: "ex.com/y", weight: 1 },
        ]
        .into_iter()
        .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_edges_tolerates_records_without_edges() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "R/a.go", "package r\nimport \"ex.com/x\"\n");
        let imports = Weigher::new(SourceRoot::new(temp_dir.path())).weighted_imports_for_pkg("R");
        assert_eq!(imports.len(), 1);
        assert!(edges(&imports).is_empty());
        assert_eq!(dot_source(&imports).unwrap(), "digraph G {\n}\n");
    }

    #[test]
    fn test_dot_source_has_one_line_per_edge() {
        let (_temp_dir, imports) = closure_fixture();
        let dot = dot_source(&imports).unwrap();
        assert!(dot.starts_with("digraph G {\n"));
        assert!(dot.ends_with("}\n"));

        let lines: HashSet<&str> = dot.lines().filter(|l| l.contains("->")).collect();
        let want: HashSet<&str> = [
            "\t\t\"R\" -> \"ex.com/x\" [label=\"2\"];",
            "\t\t\"ex.com/y\" -> \"ex.com/x\" [label=\"1\"];",
            "\t\t\"ex.com/x\" -> \"ex.com/y\" [label=\"1\"];",
        ]
        .into_iter()
        .collect();
        assert_eq!(lines, want);
    }

    #[test]
    fn test_write_dot_reports_writer_errors() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("sink closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let (_temp_dir, imports) = closure_fixture();
        let err = write_dot(&mut Broken, &imports).unwrap_err();
        assert_eq!(err.to_string(), "sink closed");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
    }
}
