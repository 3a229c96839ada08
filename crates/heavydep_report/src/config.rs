use anyhow::{Result, anyhow, bail};
use clap::Parser;
use log::{debug, info};
use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use heavydep_core::SourceRoot;

use crate::render::ImageFormat;

#[derive(Debug, Clone, Parser)]
#[command(name = "weigh")]
#[command(about = "Find the third-party dependencies a Go package relies on most heavily")]
pub struct Config {
    /// Package to inspect, as an import path under $GOPATH/src
    #[arg(long)]
    pub pkg: String,

    /// Recursively investigate dependencies
    #[arg(short, long)]
    pub recursive: bool,

    /// List only the N heaviest dependencies (0 lists all)
    #[arg(short = 'n', long, default_value = "0")]
    pub top: usize,

    /// Render the dependency graph to this file (png, jpg, jpeg, bmp, gif or pdf)
    #[arg(short, long)]
    pub graph: Option<PathBuf>,

    /// Print the dependency graph as DOT instead of the listing
    #[arg(long)]
    pub dot: bool,

    /// Print the listing as JSON
    #[arg(long, conflicts_with = "dot")]
    pub json: bool,

    /// GOPATH to resolve packages in (defaults to $GOPATH, then $HOME/go)
    #[arg(long)]
    pub gopath: Option<PathBuf>,

    #[clap(skip)]
    pub source_root: Option<SourceRoot>,

    #[clap(skip)]
    pub graph_format: Option<ImageFormat>,
}

impl Config {
    /// Config for `pkg` with every option at its default
    pub fn for_package(pkg: impl Into<String>) -> Self {
        Self {
            pkg: pkg.into(),
            recursive: false,
            top: 0,
            graph: None,
            dot: false,
            json: false,
            gopath: None,
            source_root: None,
            graph_format: None,
        }
    }

    /// Initialize the config by validating flags and resolving the source root
    pub fn initialize(&mut self) -> Result<()> {
        self.pkg = self.pkg.trim().to_string();
        if self.pkg.is_empty() {
            bail!("No package given, pass one with --pkg");
        }

        if let Some(graph) = &self.graph {
            let format = ImageFormat::from_file_name(graph).ok_or_else(|| {
                anyhow!("The file type of {:?} isn't a supported type", graph.display().to_string())
            })?;
            debug!("Graph will be rendered as {}", format.as_str());
            self.graph_format = Some(format);
        }

        let gopath = resolve_gopath(
            self.gopath.take(),
            env::var_os("GOPATH"),
            env::var_os("HOME"),
        )?;
        let source_root = SourceRoot::from_gopath(&gopath);
        info!("Using source root: {}", source_root.path().display());

        self.gopath = Some(gopath);
        self.source_root = Some(source_root);
        Ok(())
    }

    /// Get the source root, returning an error if not initialized
    pub fn source_root(&self) -> Result<&SourceRoot> {
        self.source_root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }
}

/// Picks the GOPATH the way the go tool does: an explicit value wins, then the
/// first entry of `$GOPATH`, then `$HOME/go`.
pub fn resolve_gopath(
    explicit: Option<PathBuf>,
    gopath_var: Option<OsString>,
    home_var: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(p) = explicit {
        debug!("Using provided GOPATH: {:?}", p);
        return Ok(p);
    }

    if let Some(first) = gopath_var
        .as_deref()
        .and_then(|v| env::split_paths(v).find(|p| !p.as_os_str().is_empty()))
    {
        debug!("Using GOPATH from environment: {:?}", first);
        return Ok(first);
    }

    match home_var.filter(|h| !h.is_empty()) {
        Some(home) => {
            let p = Path::new(&home).join("go");
            debug!("GOPATH not set, defaulting to {:?}", p);
            Ok(p)
        }
        None => Err(anyhow!("Could not determine GOPATH: set $GOPATH or pass --gopath")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_gopath_explicit_wins() {
        let p = resolve_gopath(
            Some(PathBuf::from("/explicit")),
            Some(OsString::from("/from/env")),
            Some(OsString::from("/home/gopher")),
        )
        .unwrap();
        assert_eq!(p, PathBuf::from("/explicit"));
    }

    #[test]
    fn test_resolve_gopath_env_first_entry() {
        let list = env::join_paths(["/first", "/second"]).unwrap();
        let p = resolve_gopath(None, Some(list), Some(OsString::from("/home/gopher"))).unwrap();
        assert_eq!(p, PathBuf::from("/first"));
    }

    #[test]
    fn test_resolve_gopath_defaults_to_home() {
        let p = resolve_gopath(None, Some(OsString::new()), Some(OsString::from("/home/gopher")))
            .unwrap();
        assert_eq!(p, PathBuf::from("/home/gopher/go"));
    }

    #[test]
    fn test_resolve_gopath_nothing_to_go_on() {
        assert!(resolve_gopath(None, None, None).is_err());
        assert!(resolve_gopath(None, None, Some(OsString::new())).is_err());
    }

    #[test]
    fn test_initialize_sets_source_root() {
        let temp_dir = TempDir::new().unwrap();
        let mut cfg = Config::for_package(" github.com/a/b ");
        cfg.gopath = Some(temp_dir.path().to_path_buf());
        cfg.initialize().unwrap();

        assert_eq!(cfg.pkg, "github.com/a/b");
        assert_eq!(cfg.source_root().unwrap().path(), temp_dir.path().join("src"));
        assert_eq!(cfg.graph_format, None);
    }

    #[test]
    fn test_initialize_rejects_empty_package() {
        let mut cfg = Config::for_package("  ");
        cfg.gopath = Some(PathBuf::from("/gopath"));
        assert!(cfg.initialize().is_err());
    }

    #[test]
    fn test_initialize_validates_graph_type() {
        let mut cfg = Config::for_package("github.com/a/b");
        cfg.gopath = Some(PathBuf::from("/gopath"));
        cfg.graph = Some(PathBuf::from("deps.png"));
        cfg.initialize().unwrap();
        assert_eq!(cfg.graph_format, Some(ImageFormat::Png));

        let mut cfg = Config::for_package("github.com/a/b");
        cfg.gopath = Some(PathBuf::from("/gopath"));
        cfg.graph = Some(PathBuf::from("deps.svg"));
        let err = cfg.initialize().unwrap_err();
        assert!(err.to_string().contains("isn't a supported type"));
    }

    #[test]
    fn test_source_root_requires_initialize() {
        assert!(Config::for_package("x").source_root().is_err());
    }

    #[test]
    fn test_parse_flags() {
        let cfg = Config::try_parse_from([
            "weigh", "--pkg", "github.com/a/b", "-r", "-n", "5", "-g", "deps.pdf",
        ])
        .unwrap();
        assert_eq!(cfg.pkg, "github.com/a/b");
        assert!(cfg.recursive);
        assert_eq!(cfg.top, 5);
        assert_eq!(cfg.graph, Some(PathBuf::from("deps.pdf")));
        assert!(!cfg.dot);
        assert!(!cfg.json);
    }

    #[test]
    fn test_parse_dot_and_json_conflict() {
        assert!(Config::try_parse_from(["weigh", "--pkg", "x", "--dot", "--json"]).is_err());
    }
}
