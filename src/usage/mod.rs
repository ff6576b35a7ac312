//! Usage projection: deciding whether an export path survives tree shaking
//! and under what final (possibly minified) name.
//!
//! The usage data itself is computed upstream by graph analysis and frozen
//! before code generation runs; this module only reads it through the
//! [`UsageOracle`] trait. The indirection exists because a module may
//! present its exports either as a single default value (the CommonJS
//! `module.exports = ...` pattern) or as a bag of named properties - the
//! usage table to consult differs, but the rewriting downstream is
//! identical once a used path (or the unused signal) is obtained.

use std::collections::HashMap;

/// How a module presents its exports to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportShape {
    /// The module exposes a single synthetic default binding.
    DefaultOnly,
    /// The module exposes multiple named bindings.
    NamedBindings,
}

/// Frozen usage-resolution data for one module.
///
/// Implementations must be read-only during rendering; the renderer may
/// query the same path any number of times and expects identical answers.
pub trait UsageOracle {
    /// Final (possibly renamed, possibly collapsed) path under which `path`
    /// is read, or `None` when it is statically never read.
    fn resolve_used_path(&self, path: &[String]) -> Option<Vec<String>>;

    /// Whether the synthetic default binding is read as a whole value.
    /// Only meaningful for [`ExportShape::DefaultOnly`] modules.
    fn is_default_wholly_used(&self) -> bool {
        false
    }

    /// Usage table scoped to exports nested inside the default binding.
    fn default_binding_usage(&self) -> Option<&dyn UsageOracle> {
        None
    }
}

/// Outcome of projecting one export path through the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageProjection {
    /// The export is read somewhere; rewrite the target to this final path.
    Used(Vec<String>),
    /// The export is statically never read; the store is dead.
    Unused,
}

impl UsageProjection {
    pub fn is_unused(&self) -> bool {
        matches!(self, UsageProjection::Unused)
    }
}

/// Projects `names` onto its final used path.
///
/// Default-only modules route through the default binding: a wholly-used
/// default keeps `names` verbatim (consumers reference the whole value
/// through the original path), otherwise the default binding's own nested
/// usage table resolves the path. Named-bindings modules query the oracle
/// directly.
pub fn project(names: &[String], shape: ExportShape, oracle: &dyn UsageOracle) -> UsageProjection {
    let resolved = match shape {
        ExportShape::DefaultOnly => {
            if oracle.is_default_wholly_used() {
                return UsageProjection::Used(names.to_vec());
            }
            // No nested table means no read of the default binding was ever
            // recorded, so nothing under it can be used.
            oracle
                .default_binding_usage()
                .and_then(|nested| nested.resolve_used_path(names))
        }
        ExportShape::NamedBindings => oracle.resolve_used_path(names),
    };

    match resolved {
        Some(path) => UsageProjection::Used(path),
        None => UsageProjection::Unused,
    }
}

/// Map-backed oracle over frozen usage data.
///
/// Useful for tests and for callers replaying usage decisions recorded by a
/// previous analysis run. Keys are original paths, values the final renamed
/// paths.
#[derive(Debug, Default)]
pub struct MapUsageOracle {
    used: HashMap<Vec<String>, Vec<String>>,
    default_wholly_used: bool,
    default_nested: Option<Box<MapUsageOracle>>,
}

impl MapUsageOracle {
    pub fn new() -> Self {
        MapUsageOracle::default()
    }

    /// Records that `path` is read under the final name `renamed`.
    pub fn record_used(&mut self, path: &[&str], renamed: &[&str]) {
        self.used.insert(
            path.iter().map(|s| s.to_string()).collect(),
            renamed.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Marks the synthetic default binding as read as a whole value.
    pub fn mark_default_wholly_used(&mut self) {
        self.default_wholly_used = true;
    }

    /// Usage table for exports nested inside the default binding,
    /// created on first access.
    pub fn nested_default(&mut self) -> &mut MapUsageOracle {
        self.default_nested.get_or_insert_with(Default::default)
    }
}

impl UsageOracle for MapUsageOracle {
    fn resolve_used_path(&self, path: &[String]) -> Option<Vec<String>> {
        self.used.get(path).cloned()
    }

    fn is_default_wholly_used(&self) -> bool {
        self.default_wholly_used
    }

    fn default_binding_usage(&self) -> Option<&dyn UsageOracle> {
        self.default_nested
            .as_deref()
            .map(|nested| nested as &dyn UsageOracle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_named_bindings_used() {
        let mut oracle = MapUsageOracle::new();
        oracle.record_used(&["foo"], &["a"]);

        let projection = project(&names(&["foo"]), ExportShape::NamedBindings, &oracle);
        assert_eq!(projection, UsageProjection::Used(names(&["a"])));
    }

    #[test]
    fn test_named_bindings_unused() {
        let oracle = MapUsageOracle::new();
        let projection = project(&names(&["foo"]), ExportShape::NamedBindings, &oracle);
        assert_eq!(projection, UsageProjection::Unused);
    }

    #[test]
    fn test_named_bindings_path_can_collapse() {
        // A renamed path may be shorter than the original when intermediate
        // segments collapse under minification.
        let mut oracle = MapUsageOracle::new();
        oracle.record_used(&["foo", "bar"], &["b"]);

        let projection = project(&names(&["foo", "bar"]), ExportShape::NamedBindings, &oracle);
        assert_eq!(projection, UsageProjection::Used(names(&["b"])));
    }

    #[test]
    fn test_default_wholly_used_keeps_names_verbatim() {
        let mut oracle = MapUsageOracle::new();
        oracle.mark_default_wholly_used();
        // A conflicting rename in the nested table must be ignored.
        oracle.nested_default().record_used(&["foo"], &["zzz"]);

        let projection = project(&names(&["foo", "bar"]), ExportShape::DefaultOnly, &oracle);
        assert_eq!(projection, UsageProjection::Used(names(&["foo", "bar"])));
    }

    #[test]
    fn test_default_delegates_to_nested_table() {
        let mut oracle = MapUsageOracle::new();
        oracle.nested_default().record_used(&["foo"], &["f"]);

        let projection = project(&names(&["foo"]), ExportShape::DefaultOnly, &oracle);
        assert_eq!(projection, UsageProjection::Used(names(&["f"])));
    }

    #[test]
    fn test_default_without_nested_table_is_unused() {
        let oracle = MapUsageOracle::new();
        let projection = project(&names(&["foo"]), ExportShape::DefaultOnly, &oracle);
        assert_eq!(projection, UsageProjection::Unused);
    }

    #[test]
    fn test_default_nested_table_miss_is_unused() {
        let mut oracle = MapUsageOracle::new();
        oracle.nested_default().record_used(&["other"], &["o"]);

        let projection = project(&names(&["foo"]), ExportShape::DefaultOnly, &oracle);
        assert_eq!(projection, UsageProjection::Unused);
    }
}
