//! TypeScript lint rules over the oxc AST
//!
//! This crate provides two scope-aware lint rules for TypeScript sources:
//! 1. `consistent-type-imports` - enforces a configurable style for type-only
//!    imports and synthesizes the text edits to retag, split, or merge import
//!    declarations.
//! 2. `valid-rule-meta` - checks ESLint-style rule sources for agreement
//!    between declared `meta` capabilities (`fixable`, `hasSuggestions`) and
//!    what the rule's `create` function actually reports.
//!
//! Rules run standalone against an `oxc_semantic::Semantic`; fix application
//! and scheduling are left to the embedding host.

pub mod rules;
pub mod utils;
mod context;
mod diagnostic;

pub use context::LintContext;
pub use diagnostic::{Diagnostic, DiagnosticSeverity, Fix};
pub use rules::{ConsistentTypeImports, ValidRuleMeta};

/// Rule category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Rules that detect code that is likely to be incorrect
    Correctness,
    /// Rules that suggest improvements
    Pedantic,
    /// Rules that encourage best practices
    Style,
    /// Rules that may have false positives (experimental)
    Nursery,
}

/// Rule metadata
pub trait RuleMeta {
    const NAME: &'static str;
    const CATEGORY: RuleCategory;
    /// URL to documentation
    fn docs_url() -> String {
        format!(
            "https://github.com/ts-linter/ts-linter/blob/main/docs/rules/{}.md",
            Self::NAME
        )
    }
}
