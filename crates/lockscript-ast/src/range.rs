//! Source location tracking.

/// A source range in line/column form.
///
/// Lines and columns are 1-based. The all-zero range denotes "no specific
/// location" and is used for errors detected before (or without) parsing,
/// such as an unknown script identifier or a circular dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Range {
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// The "no specific location" range.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A point range: start and end collapse to a single position.
    pub fn point(line: u32, column: u32) -> Self {
        Self::new(line, column, line, column)
    }

    /// True if this range carries no location information.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// The smallest range spanning both `self` and `other`.
    pub fn join(&self, other: &Range) -> Range {
        let (start_line, start_column) =
            if (self.start_line, self.start_column) <= (other.start_line, other.start_column) {
                (self.start_line, self.start_column)
            } else {
                (other.start_line, other.start_column)
            };
        let (end_line, end_column) =
            if (self.end_line, self.end_column) >= (other.end_line, other.end_column) {
                (self.end_line, self.end_column)
            } else {
                (other.end_line, other.end_column)
            };
        Range::new(start_line, start_column, end_line, end_column)
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            write!(f, "<no location>")
        } else {
            write!(
                f,
                "{}:{}-{}:{}",
                self.start_line, self.start_column, self.end_line, self.end_column
            )
        }
    }
}
