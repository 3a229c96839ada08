use log::{debug, info, trace};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use crate::{constants::unquote, types::WeightedImport, weigher::Weigher};

impl Weigher {
    /// Like [`Weigher::weighted_imports_for_pkg`], but also investigates every
    /// third-party dependency to see how heavily it depends on other
    /// third-party dependencies.
    ///
    /// Each dependency is weighed as if its import path were a package under
    /// the source root; one with no sources there is a leaf. Every package is
    /// weighed at most once. The weight of each returned record is the sum of
    /// its `edges`, one edge per package that imports it.
    ///
    /// The result is in first-seen order; sort it for presentation.
    pub fn weighted_imports_for_pkg_rec(&self, root: &str) -> Vec<WeightedImport> {
        info!("Walking dependency closure of '{}'", root);

        // Keyed by unquoted path, so `"x"` and the package `x` are one node.
        // Names are marked when queued, not when weighed, so nothing is
        // weighed twice.
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(unquote(root).to_string());

        let mut queue: VecDeque<String> = VecDeque::new();
        let mut all: Vec<WeightedImport> = Vec::new();

        for imp in self.weighted_imports_for_pkg(root) {
            if seen.insert(imp.path().to_string()) {
                queue.push_back(imp.path().to_string());
            }
            all.push(imp);
        }

        let mut investigated = 1;
        while let Some(curr) = queue.pop_front() {
            trace!("Investigating '{}' ({} queued)", curr, queue.len());
            for imp in self.weighted_imports_for_pkg(&curr) {
                if seen.insert(imp.path().to_string()) {
                    trace!("Queueing '{}' (imported by '{}')", imp.path(), curr);
                    queue.push_back(imp.path().to_string());
                }
                all.push(imp);
            }
            investigated += 1;
        }

        let merged = merge(all);
        debug!(
            "Investigated {} packages, found {} distinct dependencies of '{}'",
            investigated,
            merged.len(),
            root
        );
        merged
    }
}

/// Folds per-package records into one record per dependency.
///
/// The first record for a dependency is adopted with a single edge from its
/// depender. Later records add their weight to the total and set the edge for
/// their depender, replacing any earlier edge from the same depender.
fn merge(all: Vec<WeightedImport>) -> Vec<WeightedImport> {
    let mut merged: Vec<WeightedImport> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for imp in all {
        match index.get(imp.path()) {
            Some(&i) => {
                let dep = &mut merged[i];
                dep.weight += imp.weight;
                dep.edges.insert(imp.depender, imp.weight);
            }
            None => {
                let mut dep = imp;
                dep.edges = BTreeMap::from([(dep.depender.clone(), dep.weight)]);
                index.insert(dep.path().to_string(), merged.len());
                merged.push(dep);
            }
        }
    }

    merged
}
