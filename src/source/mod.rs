//! Patch buffer for byte-exact source rewriting.

/// Sink for range replacements over a module's original text.
///
/// Ranges are half-open `[start, end)` byte offsets into the *original*
/// text; edits over disjoint ranges must compose regardless of call order.
pub trait SourceEditor {
    /// Replaces the half-open `[start, end)` range with `text`.
    fn replace(&mut self, start: u32, end: u32, text: &str);
}

/// Records range replacements and applies them to the original text.
///
/// Edits are applied back-to-front (sorted descending by start) so byte
/// offsets recorded against the original text stay valid. Overlapping
/// edits are a caller error; offsets must fall on character boundaries.
#[derive(Debug, Clone)]
pub struct ReplaceSource {
    original: String,
    replacements: Vec<(u32, u32, String)>,
}

impl ReplaceSource {
    pub fn new(original: impl Into<String>) -> Self {
        ReplaceSource {
            original: original.into(),
            replacements: Vec::new(),
        }
    }

    /// The unmodified original text.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Number of edits recorded so far.
    pub fn edit_count(&self) -> usize {
        self.replacements.len()
    }

    /// Applies all recorded edits and returns the rewritten text. The
    /// buffer itself is left untouched, so `build` can be called again.
    pub fn build(&self) -> String {
        let mut replacements = self.replacements.clone();
        replacements.sort_by_key(|(start, _, _)| *start);

        let len = self.original.len() as u32;
        let mut result = self.original.clone();
        for (start, end, text) in replacements.into_iter().rev() {
            let start = start.min(len) as usize;
            let end = end.min(len).max(start as u32) as usize;
            result.replace_range(start..end, &text);
        }
        result
    }
}

impl SourceEditor for ReplaceSource {
    fn replace(&mut self, start: u32, end: u32, text: &str) {
        self.replacements.push((start, end, text.to_string()));
    }
}
