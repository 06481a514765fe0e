use regast_lexer::{Span, Token};
use serde::Serialize;

/// Information about a malformed construct found during parsing. Parsing
/// continues after a diagnostic is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    UnclosedGroup,
    UnclosedCharSet,
    UnopenedGroup,
    InvalidQuantifierTarget,
    InvalidCaptureGroupModifier,
    ReversedRange,
    ReversedQuantifierRange,
    UnknownRegexPart,
    GroupNestedTooDeeply,
    QuantifiersStackedTooDeeply,
}

/// Append-only list of the [`Diagnostic`]s of a single parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// A diagnostic located at a single token.
    pub fn at_token(kind: DiagnosticKind, token: &Token) -> Self {
        Self::new(kind, token.span)
    }
}

impl DiagnosticKind {
    pub fn message(&self) -> &'static str {
        use DiagnosticKind::*;
        match self {
            UnclosedGroup => "Unclosed group",
            UnclosedCharSet => "Unclosed character set",
            UnopenedGroup => "Unopened group",
            InvalidQuantifierTarget => "Invalid target for quantifier",
            InvalidCaptureGroupModifier => "Invalid capture group modifier",
            ReversedRange => "Range values reversed",
            ReversedQuantifierRange => "Quantifier range values reversed",
            UnknownRegexPart => "Unknown regex part",
            GroupNestedTooDeeply => "Group nested too deeply",
            QuantifiersStackedTooDeeply => "Quantifiers stacked too deeply",
        }
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Kinds of the diagnostics in the order they were found.
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.0.iter().map(|diagnostic| diagnostic.kind).collect()
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self(diagnostics)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ERROR] {}: {}", self.span, self.kind)
    }
}

impl std::error::Error for Diagnostic {}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for diagnostic in self.0.iter() {
            writeln!(f, "{}", diagnostic)?;
        }

        Ok(())
    }
}

impl std::error::Error for Diagnostics {}
