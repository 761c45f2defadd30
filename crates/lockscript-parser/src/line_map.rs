//! Byte offset to line/column conversion.

use lockscript_ast::Range;

/// Precomputed line-start table for a single source string.
pub struct LineMap {
    line_starts: Vec<usize>,
}

impl LineMap {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (index, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(index + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-based (line, column) of a byte offset.
    pub fn position(&self, offset: usize) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insertion) => insertion - 1,
        };
        let column = offset - self.line_starts[line] + 1;
        (line as u32 + 1, column as u32)
    }

    /// Convert a byte span into a line/column [`Range`].
    pub fn range(&self, span: &std::ops::Range<usize>) -> Range {
        let (start_line, start_column) = self.position(span.start);
        let (end_line, end_column) = self.position(span.end);
        Range::new(start_line, start_column, end_line, end_column)
    }
}
