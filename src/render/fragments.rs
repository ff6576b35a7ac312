//! Module-scoped collaborator sinks filled in while rendering: init
//! fragments (generated declarations ahead of the module body) and the set
//! of runtime capabilities the rewritten module depends on.

use super::base::RuntimeCapability;
use std::collections::BTreeSet;

/// Name of the generated dead-store target. Unused export assignments are
/// redirected to this local so the right-hand side's side effects survive
/// while the write itself is discarded.
pub const UNUSED_EXPORT_PLACEHOLDER: &str = "__unused_export__";

/// Declaration inserted at most once per module when any export resolves to
/// unused.
pub const UNUSED_EXPORT_DECLARATION: &str = "var __unused_export__;\n";

/// Keyed, insert-if-absent collection of module-scoped init fragments.
///
/// Fragments render ahead of the module body in first-insertion order.
/// Requesting a key that is already present is a no-op, so any number of
/// dead stores share one placeholder declaration.
#[derive(Debug, Default)]
pub struct InitFragments {
    fragments: Vec<(String, String)>,
}

impl InitFragments {
    pub fn new() -> Self {
        InitFragments::default()
    }

    /// Inserts `content` under `key` unless the key is already present.
    pub fn ensure(&mut self, key: &str, content: &str) {
        if !self.fragments.iter().any(|(k, _)| k == key) {
            self.fragments.push((key.to_string(), content.to_string()));
        }
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Concatenated fragment text, in first-insertion order.
    pub fn render(&self) -> String {
        self.fragments
            .iter()
            .map(|(_, content)| content.as_str())
            .collect()
    }
}

/// Set of runtime facilities the rewritten module depends on. Duplicates
/// are ignored; iteration order is deterministic.
#[derive(Debug, Default)]
pub struct RuntimeRequirements {
    capabilities: BTreeSet<RuntimeCapability>,
}

impl RuntimeRequirements {
    pub fn new() -> Self {
        RuntimeRequirements::default()
    }

    pub fn add(&mut self, capability: RuntimeCapability) {
        self.capabilities.insert(capability);
    }

    pub fn contains(&self, capability: RuntimeCapability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RuntimeCapability> + '_ {
        self.capabilities.iter().copied()
    }
}
