use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, trace};
use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

use crate::{
    config::SourceRoot,
    constants::{is_go_source, is_std_lib, unquote},
    parser::imports_for_file,
    types::{WeightedImport, sort_by_weight},
};

/// Computes weighted third-party imports for packages under a source root.
#[derive(Debug, Clone)]
pub struct Weigher {
    source_root: SourceRoot,
}

impl Weigher {
    pub fn new(source_root: SourceRoot) -> Self {
        Self { source_root }
    }

    pub fn source_root(&self) -> &SourceRoot {
        &self.source_root
    }

    /// Computes the third-party imports that `pkg` depends on.
    ///
    /// The weight of an import is the number of non-test files in the package
    /// that import it, however many times (or under however many names) each
    /// file does. Standard-library imports are dropped and the result is
    /// sorted heaviest first, ties in the order they were first seen.
    ///
    /// A package whose directory is missing or unreadable has no dependencies;
    /// that is logged, never returned as an error.
    pub fn weighted_imports_for_pkg(&self, pkg: &str) -> Vec<WeightedImport> {
        let dir = self.source_root.package_dir(pkg);
        if !dir.is_dir() {
            debug!("No sources for package '{}' at {}", pkg, dir.display());
            return Vec::new();
        }

        let files = match list_go_files(&dir) {
            Ok(files) => files,
            Err(e) => {
                debug!("Couldn't list {}: {}", dir.display(), e);
                return Vec::new();
            }
        };
        trace!("Package '{}' has {} source files", pkg, files.len());

        // Keyed by unquoted path: `"x"` and `` `x` `` are the same import
        let mut imports: Vec<WeightedImport> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for file in &files {
            let mut in_file: HashSet<String> = HashSet::new();
            for imp in imports_for_file(file) {
                let path = unquote(&imp).to_string();
                if !in_file.insert(path.clone()) {
                    trace!("{} imports {} more than once", file.display(), imp);
                    continue;
                }
                match index.get(&path) {
                    Some(&i) => imports[i].weight += 1,
                    None => {
                        index.insert(path, imports.len());
                        imports.push(WeightedImport::new(imp, pkg));
                    }
                }
            }
        }

        imports.retain(|imp| !is_std_lib(&imp.name));
        sort_by_weight(&mut imports);

        debug!("Package '{}' has {} third-party imports", pkg, imports.len());
        imports
    }
}

/// Non-test Go files directly inside `dir`, sorted by file name.
fn list_go_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }
        let Some(name) = p.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if is_go_source(name) {
            files.push(p.to_path_buf());
        } else {
            trace!("Skipping non-source file: {}", p.display());
        }
    }
    Ok(files)
}
