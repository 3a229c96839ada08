use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::{
    env,
    ffi::OsStr,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use heavydep_core::WeightedImport;

use crate::graph::dot_source;

/// Image types Graphviz can write that heavydep accepts for `--graph`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Jpg,
    Bmp,
    Gif,
    Pdf,
}

impl ImageFormat {
    /// Format named by the extension of `path`.
    ///
    /// The file name must be exactly `<stem>.<ext>`; names with more than one
    /// dot are rejected so `graph.tar.png` doesn't sneak through.
    pub fn from_file_name(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let (stem, ext) = name.split_once('.')?;
        if stem.is_empty() || ext.contains('.') {
            return None;
        }
        match ext {
            "png" => Some(Self::Png),
            "jpeg" => Some(Self::Jpeg),
            "jpg" => Some(Self::Jpg),
            "bmp" => Some(Self::Bmp),
            "gif" => Some(Self::Gif),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Value for dot's `-T` flag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Jpg => "jpg",
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::Pdf => "pdf",
        }
    }
}

/// Renders the dependency graph of `imports` to `output` with Graphviz.
///
/// Returns `Ok(false)` without writing anything when `dot` is not installed.
pub fn render_graph(imports: &[WeightedImport], output: &Path, format: ImageFormat) -> Result<bool> {
    let Some(dot) = find_executable("dot", env::var_os("PATH").as_deref()) else {
        warn!(
            "dot doesn't seem to be installed (or it's not on your PATH), not writing {}",
            output.display()
        );
        return Ok(false);
    };
    render_graph_with(&dot, imports, output, format)?;
    Ok(true)
}

/// Pipes the DOT text of `imports` through the `dot` binary at `dot`.
pub fn render_graph_with(
    dot: &Path,
    imports: &[WeightedImport],
    output: &Path,
    format: ImageFormat,
) -> Result<()> {
    let source = dot_source(imports).context("Failed to build the DOT graph")?;
    debug!("Running {} -T{} on {} bytes of DOT", dot.display(), format.as_str(), source.len());

    let mut child = Command::new(dot)
        .arg(format!("-T{}", format.as_str()))
        .arg(format!("-o{}", output.display()))
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to run {}", dot.display()))?;

    {
        let mut stdin = child.stdin.take().context("Failed to open a stdin pipe to dot")?;
        stdin.write_all(source.as_bytes()).context("Failed to write the graph to dot")?;
    }

    let out = child.wait_with_output().context("Failed to wait for dot")?;
    if !out.status.success() {
        bail!("dot exited with {}: {}", out.status, String::from_utf8_lossy(&out.stderr).trim());
    }

    info!("Wrote dependency graph to {}", output.display());
    Ok(())
}

/// Looks `name` up in a `PATH`-style list of directories.
pub fn find_executable(name: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    env::split_paths(path_var?)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata().is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
