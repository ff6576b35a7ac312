//! The rewrite renderer: turns one export record plus the module's frozen
//! usage data into a byte-exact replacement of the assignment target.
//!
//! Control flow per record: usage projection -> base resolution -> one of
//! four terminal render cases (`{used, unused} x {plain, reflective}`).
//! Rendering is pure and deterministic; the only writes are the text edit,
//! the idempotent placeholder fragment, and the capability set.

pub mod base;
pub mod fragments;
pub mod property_access;

use crate::record::ExportRecord;
use crate::source::SourceEditor;
use crate::usage::{project, ExportShape, UsageOracle, UsageProjection};
use thiserror::Error;

pub use base::{resolve_base, BaseResolution, ModuleBindings, RenderMode, RuntimeCapability};
pub use fragments::{
    InitFragments, RuntimeRequirements, UNUSED_EXPORT_DECLARATION, UNUSED_EXPORT_PLACEHOLDER,
};
pub use property_access::{is_safe_identifier, property_access};

use property_access::quote;

/// Errors that can occur while rendering a record. These are internal
/// invariant violations, not expected runtime conditions; they propagate
/// immediately and leave no partial edits behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The oracle resolved a used path with zero segments for a reflective
    /// define. A define call needs at least one property-name segment.
    #[error("used path for a reflective define has no property segments")]
    EmptyReflectivePath,
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Everything one module's render pass reads and writes.
///
/// The oracle and bindings are frozen inputs; the source buffer, init
/// fragments, and runtime requirements are the module-scoped sinks the
/// renderer fills in.
pub struct RenderContext<'a> {
    /// Identifiers the runtime binds for this module.
    pub bindings: &'a ModuleBindings,
    /// How the module presents its exports.
    pub shape: ExportShape,
    /// Frozen usage data for the module.
    pub oracle: &'a dyn UsageOracle,
    /// Output text buffer.
    pub source: &'a mut dyn SourceEditor,
    /// Module-scoped declaration sink.
    pub init_fragments: &'a mut InitFragments,
    /// Runtime capability sink.
    pub runtime_requirements: &'a mut RuntimeRequirements,
}

/// Rewrites one export assignment target.
///
/// The replacement text is computed in full before any sink is touched, so
/// a failing record is all-or-nothing: no edit, no fragment, no capability.
pub fn render(record: &ExportRecord, ctx: &mut RenderContext<'_>) -> RenderResult<()> {
    let projection = project(record.names(), ctx.shape, ctx.oracle);
    let resolution = resolve_base(record.base(), ctx.bindings);

    let replacement = match (&projection, resolution.mode) {
        (UsageProjection::Unused, RenderMode::PlainAssignment) => {
            // The write target becomes the placeholder; the assigned
            // expression after the range still evaluates.
            UNUSED_EXPORT_PLACEHOLDER.to_string()
        }
        (UsageProjection::Unused, RenderMode::ReflectiveDefine) => {
            // Redirect the define call's target argument to the placeholder.
            // The property-name and descriptor arguments after the range
            // keep their side effects; the closing parenthesis already
            // follows in the unmodified source.
            format!("{} = (", UNUSED_EXPORT_PLACEHOLDER)
        }
        (UsageProjection::Used(path), RenderMode::PlainAssignment) => {
            format!("{}{}", resolution.binding, property_access(path))
        }
        (UsageProjection::Used(path), RenderMode::ReflectiveDefine) => {
            // All but the last segment form the target object; the last
            // segment becomes the explicit property-name argument.
            let (last, target) = path
                .split_last()
                .ok_or(RenderError::EmptyReflectivePath)?;
            format!(
                "Object.defineProperty({}{}, {}, ",
                resolution.binding,
                property_access(target),
                quote(last)
            )
        }
    };

    if projection.is_unused() {
        ctx.init_fragments
            .ensure(UNUSED_EXPORT_PLACEHOLDER, UNUSED_EXPORT_DECLARATION);
    }
    ctx.runtime_requirements.add(resolution.capability);

    let range = record.range();
    ctx.source.replace(range.start, range.end, &replacement);
    Ok(())
}
