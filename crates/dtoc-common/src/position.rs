//! Line/column positions for byte offsets, used when reporting diagnostics.

/// Zero-based line and character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

/// A map from line numbers to byte offsets of line starts.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let bytes = source.as_bytes();

        for (i, &byte) in bytes.iter().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            } else if byte == b'\r' && bytes.get(i + 1) != Some(&b'\n') {
                // Lone \r (old Mac line ending)
                line_starts.push((i + 1) as u32);
            }
        }

        LineMap { line_starts }
    }

    /// Convert a byte offset to a Position. Characters are counted in chars.
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };

        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let slice = source.get(start..clamped_end).unwrap_or("");

        Position {
            line: line as u32,
            character: slice.chars().count() as u32,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
