//! cjs-rewrite - CommonJS export-assignment rewriting for bundler code
//! generation.
//!
//! Given an [`record::ExportRecord`] describing one `exports.x = ...`,
//! `module.exports.x = ...`, `this.x = ...`, or `Object.defineProperty`-based
//! assignment site, plus the module's frozen usage data, [`render::render`]
//! produces the byte-exact replacement of the assignment target: renamed to
//! the final used path when the export is read, or redirected to a shared
//! dead-store placeholder (preserving right-hand side effects) when it is
//! not. Records round-trip through [`record::codec`] for incremental-build
//! caching.
//!
//! # Example
//!
//! ```ignore
//! use cjs_rewrite::record::{ExportBase, ExportRecord, SourceRange};
//! use cjs_rewrite::render::{render, InitFragments, ModuleBindings,
//!     RenderContext, RuntimeRequirements};
//! use cjs_rewrite::source::ReplaceSource;
//! use cjs_rewrite::usage::{ExportShape, MapUsageOracle};
//!
//! // `exports.foo = 1;` where `foo` survives tree shaking as `a`
//! let record = ExportRecord::new(
//!     SourceRange::new(0, 11),
//!     ExportBase::Exports,
//!     vec!["foo".to_string()],
//! )?;
//! let mut oracle = MapUsageOracle::new();
//! oracle.record_used(&["foo"], &["a"]);
//!
//! let mut source = ReplaceSource::new("exports.foo = 1;");
//! let mut fragments = InitFragments::new();
//! let mut requirements = RuntimeRequirements::new();
//! let bindings = ModuleBindings::default();
//! render(&record, &mut RenderContext {
//!     bindings: &bindings,
//!     shape: ExportShape::NamedBindings,
//!     oracle: &oracle,
//!     source: &mut source,
//!     init_fragments: &mut fragments,
//!     runtime_requirements: &mut requirements,
//! })?;
//!
//! assert_eq!(source.build(), "exports.a = 1;");
//! ```

pub mod record;
pub mod render;
pub mod source;
pub mod usage;
