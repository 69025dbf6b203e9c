//! Lint context for rule execution

use oxc_semantic::{AstNodes, Scoping, Semantic};

use crate::Diagnostic;

/// Context passed to rules during linting
///
/// State is valid for one file's traversal only; no cross-file state.
pub struct LintContext<'a> {
    /// Source code being linted
    source_text: &'a str,
    /// Semantic analysis (scopes, symbols, references)
    semantic: &'a Semantic<'a>,
    /// Collected diagnostics
    diagnostics: Vec<Diagnostic>,
}

impl<'a> LintContext<'a> {
    pub fn new(source_text: &'a str, semantic: &'a Semantic<'a>) -> Self {
        Self {
            source_text,
            semantic,
            diagnostics: Vec::new(),
        }
    }

    /// Get the source text
    pub fn source_text(&self) -> &'a str {
        self.source_text
    }

    /// Get semantic analysis
    pub fn semantic(&self) -> &'a Semantic<'a> {
        self.semantic
    }

    /// AST nodes in document order
    pub fn nodes(&self) -> &'a AstNodes<'a> {
        self.semantic.nodes()
    }

    /// Scope and symbol information
    pub fn scoping(&self) -> &'a Scoping {
        self.semantic.scoping()
    }

    /// Get a slice of source text for a span
    pub fn span_text(&self, span: oxc_span::Span) -> &'a str {
        &self.source_text[span.start as usize..span.end as usize]
    }

    /// Report a diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Consume the context and return all diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Get reference to diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
