//! Base-binding resolution: mapping a record's base kind to the runtime
//! binding expression it writes through, the runtime capability that
//! binding relies on, and the shape of the replacement text.

use crate::record::ExportBase;
use std::fmt;

/// Runtime facility a rewritten assignment relies on. The surrounding
/// build system provisions these per module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuntimeCapability {
    /// The module's exports object argument must be in scope.
    ExportsObject,
    /// The module object argument must be in scope.
    ModuleObject,
    /// Module-level `this` must be bound to the exports object.
    ThisAsExports,
}

impl fmt::Display for RuntimeCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            RuntimeCapability::ExportsObject => "exports-object",
            RuntimeCapability::ModuleObject => "module-object",
            RuntimeCapability::ThisAsExports => "this-as-exports",
        };
        write!(f, "{}", tag)
    }
}

/// Shape of the replacement text for an assignment site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Plain property assignment: `<binding><chain> = value`.
    PlainAssignment,
    /// `Object.defineProperty(<target>, <name>, descriptor)` call.
    ReflectiveDefine,
}

/// Identifiers the surrounding runtime binds for one module. Bundlers
/// rename the `exports`/`module` arguments under some output formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleBindings {
    /// Name of the exports object argument, usually `exports`.
    pub exports_argument: String,
    /// Name of the module object argument, usually `module`.
    pub module_argument: String,
}

impl Default for ModuleBindings {
    fn default() -> Self {
        ModuleBindings {
            exports_argument: "exports".to_string(),
            module_argument: "module".to_string(),
        }
    }
}

/// Resolved root binding for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseResolution {
    /// Expression the property-access chain is appended to.
    pub binding: String,
    /// Runtime facility the binding relies on.
    pub capability: RuntimeCapability,
    /// Shape of the replacement text.
    pub mode: RenderMode,
}

/// Maps a base kind onto its runtime binding expression.
///
/// Exhaustive over the closed set of base kinds, so adding a kind is a
/// compile-time-checked change here.
pub fn resolve_base(base: ExportBase, bindings: &ModuleBindings) -> BaseResolution {
    match base {
        ExportBase::Exports => BaseResolution {
            binding: bindings.exports_argument.clone(),
            capability: RuntimeCapability::ExportsObject,
            mode: RenderMode::PlainAssignment,
        },
        ExportBase::ModuleExports => BaseResolution {
            binding: format!("{}.exports", bindings.module_argument),
            capability: RuntimeCapability::ModuleObject,
            mode: RenderMode::PlainAssignment,
        },
        ExportBase::This => BaseResolution {
            binding: "this".to_string(),
            capability: RuntimeCapability::ThisAsExports,
            mode: RenderMode::PlainAssignment,
        },
        ExportBase::DefineOnExports => BaseResolution {
            binding: bindings.exports_argument.clone(),
            capability: RuntimeCapability::ExportsObject,
            mode: RenderMode::ReflectiveDefine,
        },
        ExportBase::DefineOnModuleExports => BaseResolution {
            binding: format!("{}.exports", bindings.module_argument),
            capability: RuntimeCapability::ModuleObject,
            mode: RenderMode::ReflectiveDefine,
        },
        ExportBase::DefineOnThis => BaseResolution {
            binding: "this".to_string(),
            capability: RuntimeCapability::ThisAsExports,
            mode: RenderMode::ReflectiveDefine,
        },
    }
}
