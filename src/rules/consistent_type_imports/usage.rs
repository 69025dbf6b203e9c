//! Per-binding usage classification
//!
//! Decides, for one imported binding, whether every reference is erased at
//! compile time. The scope resolver flags most type positions directly; the
//! one shape it flags as a value read, `typeof x` (optionally narrowed with a
//! dotted path), is recognized by walking the qualified-name ancestor chain
//! up to a type query.

use oxc_ast::ast::BindingIdentifier;
use oxc_ast::AstKind;
use oxc_semantic::{NodeId, Reference, Semantic};
use oxc_syntax::reference::ReferenceFlags;

/// Classification of one imported binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    /// Every reference is type-safe, and at least one exists
    TypeOnly,
    /// At least one reference persists at runtime
    Value,
    /// No references at all
    Unused,
}

/// Classify a binding from its full reference set.
///
/// Pure function of the reference set: re-running always yields the same
/// class.
pub fn classify_binding(semantic: &Semantic<'_>, binding: &BindingIdentifier<'_>) -> Usage {
    let symbol_id = binding.symbol_id();
    let mut referenced = false;
    for reference in semantic.scoping().get_resolved_references(symbol_id) {
        referenced = true;
        if !is_type_safe_reference(semantic, reference) {
            return Usage::Value;
        }
    }
    if referenced {
        Usage::TypeOnly
    } else {
        Usage::Unused
    }
}

fn is_type_safe_reference(semantic: &Semantic<'_>, reference: &Reference) -> bool {
    let flags = reference.flags();
    if flags.contains(ReferenceFlags::Type) && !flags.is_value() {
        return true;
    }
    in_type_query(semantic, reference.node_id())
}

/// Walk straight chains of qualified-name access upward; a reference is
/// type-safe if a type query is reached before anything else breaks the
/// chain. Parenthesized or computed-member variants do not qualify.
fn in_type_query(semantic: &Semantic<'_>, node_id: NodeId) -> bool {
    for ancestor in semantic.nodes().ancestors(node_id) {
        match ancestor.kind() {
            AstKind::TSQualifiedName(_) => {}
            AstKind::TSTypeQuery(_) => return true,
            _ => return false,
        }
    }
    false
}
