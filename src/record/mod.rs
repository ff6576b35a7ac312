//! Export assignment records.
//!
//! An [`ExportRecord`] is the immutable description of one CommonJS export
//! assignment site (`exports.foo = ...`, `module.exports.foo = ...`,
//! `this.foo = ...`, or the `Object.defineProperty` equivalents), extracted
//! during source scanning and consumed exactly once per code-generation run
//! by the rewrite renderer. Records persist across incremental builds
//! through the binary codec in [`codec`].

pub mod codec;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when constructing or re-validating a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("export record has no property-name segments")]
    EmptyNames,

    #[error("export record range is inverted: start {start} > end {end}")]
    InvertedRange { start: u32, end: u32 },

    #[error(
        "unsupported export base: '{0}'. Valid bases: exports, module.exports, this, \
         Object.defineProperty(exports), Object.defineProperty(module.exports), \
         Object.defineProperty(this)"
    )]
    UnsupportedBase(String),
}

/// Result type for record construction.
pub type RecordResult<T> = Result<T, RecordError>;

/// Half-open `[start, end)` interval over the module's original source text.
///
/// Covers the assignment *target* (left-hand side) only; the assigned value
/// begins at `end` and is never touched by the rewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: u32,
    pub end: u32,
}

impl SourceRange {
    pub fn new(start: u32, end: u32) -> Self {
        SourceRange { start, end }
    }

    /// Length of the covered target text, in bytes.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Which root binding an assignment site writes through, and whether it
/// assigns via `Object.defineProperty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportBase {
    /// `exports.x = ...`
    #[serde(rename = "exports")]
    Exports,
    /// `module.exports.x = ...`
    #[serde(rename = "module.exports")]
    ModuleExports,
    /// `this.x = ...` (module-level `this` bound to the exports object)
    #[serde(rename = "this")]
    This,
    /// `Object.defineProperty(exports, "x", ...)`
    #[serde(rename = "Object.defineProperty(exports)")]
    DefineOnExports,
    /// `Object.defineProperty(module.exports, "x", ...)`
    #[serde(rename = "Object.defineProperty(module.exports)")]
    DefineOnModuleExports,
    /// `Object.defineProperty(this, "x", ...)`
    #[serde(rename = "Object.defineProperty(this)")]
    DefineOnThis,
}

impl ExportBase {
    /// All base kinds, in declaration order. Declaration order is the codec
    /// tag order and must not change across cache-format versions.
    pub const ALL: [ExportBase; 6] = [
        ExportBase::Exports,
        ExportBase::ModuleExports,
        ExportBase::This,
        ExportBase::DefineOnExports,
        ExportBase::DefineOnModuleExports,
        ExportBase::DefineOnThis,
    ];

    /// Stable one-byte codec tag.
    pub(crate) fn tag(self) -> u8 {
        self as u8
    }

    /// Inverse of [`ExportBase::tag`]; `None` for out-of-range bytes.
    pub(crate) fn from_tag(tag: u8) -> Option<ExportBase> {
        ExportBase::ALL.get(tag as usize).copied()
    }

    /// Whether this base assigns through `Object.defineProperty`.
    pub fn is_reflective(self) -> bool {
        matches!(
            self,
            ExportBase::DefineOnExports
                | ExportBase::DefineOnModuleExports
                | ExportBase::DefineOnThis
        )
    }
}

impl FromStr for ExportBase {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exports" => Ok(ExportBase::Exports),
            "module.exports" => Ok(ExportBase::ModuleExports),
            "this" => Ok(ExportBase::This),
            "Object.defineProperty(exports)" => Ok(ExportBase::DefineOnExports),
            "Object.defineProperty(module.exports)" => Ok(ExportBase::DefineOnModuleExports),
            "Object.defineProperty(this)" => Ok(ExportBase::DefineOnThis),
            _ => Err(RecordError::UnsupportedBase(s.to_string())),
        }
    }
}

impl fmt::Display for ExportBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ExportBase::Exports => "exports",
            ExportBase::ModuleExports => "module.exports",
            ExportBase::This => "this",
            ExportBase::DefineOnExports => "Object.defineProperty(exports)",
            ExportBase::DefineOnModuleExports => "Object.defineProperty(module.exports)",
            ExportBase::DefineOnThis => "Object.defineProperty(this)",
        };
        write!(f, "{}", tag)
    }
}

/// One detected export assignment site.
///
/// Created once during source scanning as an immutable fact about the
/// module and never mutated afterwards. `names` is the ordered sequence of
/// property-name segments being assigned, e.g. `["foo", "bar"]` for
/// `exports.foo.bar = ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordParts")]
pub struct ExportRecord {
    range: SourceRange,
    base: ExportBase,
    names: Vec<String>,
}

/// Raw field bag used to route deserialization through validation.
#[derive(Deserialize)]
struct RecordParts {
    range: SourceRange,
    base: ExportBase,
    names: Vec<String>,
}

impl TryFrom<RecordParts> for ExportRecord {
    type Error = RecordError;

    fn try_from(parts: RecordParts) -> Result<Self, Self::Error> {
        ExportRecord::new(parts.range, parts.base, parts.names)
    }
}

impl ExportRecord {
    /// Builds a record, rejecting malformed input up front.
    pub fn new(range: SourceRange, base: ExportBase, names: Vec<String>) -> RecordResult<Self> {
        if names.is_empty() {
            return Err(RecordError::EmptyNames);
        }
        if range.start > range.end {
            return Err(RecordError::InvertedRange {
                start: range.start,
                end: range.end,
            });
        }
        Ok(ExportRecord { range, base, names })
    }

    pub fn range(&self) -> SourceRange {
        self.range
    }

    pub fn base(&self) -> ExportBase {
        self.base
    }

    /// Property-name segments identifying the (possibly nested) export path.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The export name visible to static export-list queries: the top-level
    /// segment, regardless of how deep this record actually assigns.
    pub fn exported_name(&self) -> &str {
        &self.names[0]
    }
}
