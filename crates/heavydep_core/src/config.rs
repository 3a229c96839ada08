use log::trace;
use path_clean::clean;
use std::path::{Component, Path, PathBuf};

use crate::constants::unquote;

/// Directory that package identifiers are resolved against, usually
/// `$GOPATH/src`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    root: PathBuf,
}

impl SourceRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Source root of a GOPATH workspace (`<gopath>/src`)
    pub fn from_gopath(gopath: impl AsRef<Path>) -> Self {
        Self::new(gopath.as_ref().join("src"))
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Directory holding the sources of `pkg`.
    ///
    /// Surrounding quotes and leading slashes are dropped so import literals
    /// and package paths map to the same directory. The result never leaves
    /// the root: `..` segments that would climb above it are dropped.
    pub fn package_dir(&self, pkg: &str) -> PathBuf {
        let rel = clean(unquote(pkg).trim_start_matches('/'));
        let inside: PathBuf = rel
            .components()
            .skip_while(|c| matches!(c, Component::ParentDir | Component::CurDir))
            .collect();
        let dir = self.root.join(inside);
        trace!("Package '{}' maps to {}", pkg, dir.display());
        dir
    }
}
