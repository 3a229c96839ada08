use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::unquote;

/// A third-party dependency, the number of times it is relied upon, and which
/// packages rely on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightedImport {
    /// Import literal as written in source, quotes included
    pub name: String,
    pub weight: usize,
    /// Depender package -> weight contributed by that depender alone.
    /// Only filled in by the recursive walk.
    pub edges: BTreeMap<String, usize>,
    #[serde(skip)]
    pub(crate) depender: String,
}

impl WeightedImport {
    pub(crate) fn new(name: impl Into<String>, depender: impl Into<String>) -> Self {
        Self { name: name.into(), weight: 1, edges: BTreeMap::new(), depender: depender.into() }
    }

    /// The import path without its surrounding quotes
    pub fn path(&self) -> &str {
        unquote(&self.name)
    }

    /// Package that produced this record during a single-package scan
    pub fn depender(&self) -> &str {
        &self.depender
    }
}

/// Sort heaviest first. The sort is stable, so equal weights keep the order in
/// which they were first encountered.
pub fn sort_by_weight(imports: &mut [WeightedImport]) {
    imports.sort_by(|a, b| b.weight.cmp(&a.weight));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted(name: &str, weight: usize) -> WeightedImport {
        let mut imp = WeightedImport::new(name, "pkg");
        imp.weight = weight;
        imp
    }

    #[test]
    fn test_sort_by_weight_descending() {
        let mut imps = vec![weighted("\"a\"", 1), weighted("\"b\"", 5), weighted("\"c\"", 3)];
        sort_by_weight(&mut imps);
        let names: Vec<&str> = imps.iter().map(|i| i.path()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_by_weight_is_stable() {
        let mut imps = vec![
            weighted("\"first\"", 2),
            weighted("\"heavy\"", 4),
            weighted("\"second\"", 2),
            weighted("\"third\"", 2),
        ];
        sort_by_weight(&mut imps);
        let names: Vec<&str> = imps.iter().map(|i| i.path()).collect();
        assert_eq!(names, vec!["heavy", "first", "second", "third"]);
    }

    #[test]
    fn test_path_strips_quotes() {
        assert_eq!(weighted("\"github.com/a/b\"", 1).path(), "github.com/a/b");
        assert_eq!(weighted("`github.com/a/b`", 1).path(), "github.com/a/b");
    }

    #[test]
    fn test_depender_is_not_serialized() {
        let imp = WeightedImport::new("\"x\"", "root/pkg");
        let json = serde_json::to_value(&imp).unwrap();
        assert_eq!(json["name"], "\"x\"");
        assert_eq!(json["weight"], 1);
        assert!(json.get("depender").is_none());
        assert!(json["edges"].as_object().unwrap().is_empty());
    }
}
