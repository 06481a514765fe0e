use serde::Serialize;

/// Index of a character (as defined by the rust `char` type) in the pattern.
pub type Position = usize;

/// Start and end position of a piece of the pattern. The end position is one
/// further than the last character covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Creates a new [`Span`].
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "span start ({start}) is after its end ({end})");
        Self { start, end }
    }

    /// A zero-width span at `pos`.
    pub fn empty(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}
