use anyhow::Result;
use log::{debug, info};

use heavydep_core::{Weigher, sort_by_weight};

use crate::{config::Config, types::WeighResult};

/// Weighs the configured package, recursively if asked to.
///
/// `cfg` must have been initialized. Results are sorted heaviest first. In the
/// non-recursive case every dependency gets a single edge from the package
/// itself, so the graph output is a star around it.
pub fn run_weigh(cfg: &Config) -> Result<WeighResult> {
    let weigher = Weigher::new(cfg.source_root()?.clone());
    info!(
        "Weighing '{}'{} under {}",
        cfg.pkg,
        if cfg.recursive { " recursively" } else { "" },
        weigher.source_root().path().display()
    );

    let mut imports = if cfg.recursive {
        weigher.weighted_imports_for_pkg_rec(&cfg.pkg)
    } else {
        let mut imports = weigher.weighted_imports_for_pkg(&cfg.pkg);
        for imp in &mut imports {
            let depender = imp.depender().to_string();
            imp.edges.insert(depender, imp.weight);
        }
        imports
    };
    sort_by_weight(&mut imports);

    debug!("'{}' has {} third-party dependencies", cfg.pkg, imports.len());
    Ok(WeighResult { pkg: cfg.pkg.clone(), imports, recursive: cfg.recursive })
}
