//! Fix synthesis for import rewrites
//!
//! Translates a planned transformation into token-range text edits. Edits
//! produced for one diagnostic never overlap and apply cleanly in any order.
//! When an expected structural token (a keyword, brace, or comma) is not
//! where the declaration shape implies, synthesis returns `None` and the
//! diagnostic goes out without a fix.

use oxc_span::{GetSpan, Span};

use crate::diagnostic::Fix;
use crate::utils::{find_char, find_keyword, skip_whitespace, statement_removal_span};

use oxc_ast::ast::{
    ImportDeclaration, ImportDeclarationSpecifier, ImportDefaultSpecifier,
    ImportNamespaceSpecifier, ImportSpecifier,
};

use super::{ImportGroup, ImportRecord};

/// Specifiers of one declaration, separated by grammar position
struct SpecifierShape<'a> {
    default: Option<&'a ImportDefaultSpecifier<'a>>,
    namespace: Option<&'a ImportNamespaceSpecifier<'a>>,
    named: Vec<&'a ImportSpecifier<'a>>,
}

fn shape<'a>(decl: &'a ImportDeclaration<'a>) -> SpecifierShape<'a> {
    let mut out = SpecifierShape {
        default: None,
        namespace: None,
        named: Vec::new(),
    };
    if let Some(specifiers) = decl.specifiers.as_deref() {
        for specifier in specifiers {
            match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(s) => out.named.push(&**s),
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => out.default = Some(&**s),
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                    out.namespace = Some(&**s);
                }
            }
        }
    }
    out
}

/// Source text of a named specifier without any inline `type` qualifier
/// (`A`, `A as B`).
fn named_spec_text<'a>(source: &'a str, specifier: &ImportSpecifier<'_>) -> &'a str {
    &source[specifier.imported.span().start as usize..specifier.span.end as usize]
}

fn insert_at(position: u32, text: String) -> Fix {
    Fix::new(Span::new(position, position), text)
}

fn remove(span: Span) -> Fix {
    Fix::new(span, "")
}

/// Convert an entire declaration to `import type`, stripping inline `type`
/// qualifiers that would become redundant.
pub(crate) fn retag_type(source: &str, record: &ImportRecord<'_>) -> Option<Vec<Fix>> {
    let decl = record.decl;
    let keyword = find_keyword(source, decl.span.start, decl.source.span.start, "import")?;
    let mut fixes = vec![Fix::new(Span::new(keyword.end, keyword.end), " type")];
    for named in shape(decl).named {
        if named.import_kind.is_type() {
            fixes.push(remove(Span::new(
                named.span.start,
                named.imported.span().start,
            )));
        }
    }
    Some(fixes)
}

/// Strip the `type` qualifier from a type-only declaration.
pub(crate) fn retag_value(source: &str, record: &ImportRecord<'_>) -> Option<Vec<Fix>> {
    let decl = record.decl;
    let bound = decl
        .specifiers
        .as_deref()
        .and_then(|specifiers| specifiers.first())
        .map_or(decl.source.span.start, |first| first.span().start);
    let import_keyword = find_keyword(source, decl.span.start, bound, "import")?;
    let type_keyword = find_keyword(source, import_keyword.end, bound, "type")?;
    let end = skip_whitespace(source, type_keyword.end);
    Some(vec![remove(Span::new(type_keyword.start, end))])
}

/// Extract the type-only specifiers out of a mixed declaration, either into
/// the group's insertion target or into a new `import type` statement placed
/// before the declaration.
pub(crate) fn split_type(
    source: &str,
    group: &ImportGroup<'_>,
    record: &ImportRecord<'_>,
) -> Option<Vec<Fix>> {
    let decl = record.decl;
    let decl_shape = shape(decl);
    let source_literal = &source[decl.source.span.start as usize..decl.source.span.end as usize];

    let mut type_named: Vec<&ImportSpecifier<'_>> = Vec::new();
    let mut type_default: Option<&ImportDefaultSpecifier<'_>> = None;
    let mut type_namespace: Option<&ImportNamespaceSpecifier<'_>> = None;
    for specifier in record.type_specifiers.iter().copied() {
        match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(s) => type_named.push(&**s),
            ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => type_default = Some(&**s),
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => type_namespace = Some(&**s),
        }
    }

    let mut fixes = Vec::new();
    let mut new_statements = String::new();

    if !type_named.is_empty() {
        let names = type_named
            .iter()
            .map(|s| named_spec_text(source, s))
            .collect::<Vec<_>>()
            .join(", ");
        let target = group
            .insertion_target
            .map(|index| &group.records[index])
            .filter(|target| target.decl.span != decl.span);
        match target {
            Some(target) => {
                let last = shape(target.decl).named.last().copied()?;
                fixes.push(insert_at(last.span.end, format!(", {names}")));
            }
            None => {
                new_statements
                    .push_str(&format!("import type {{ {names} }} from {source_literal};\n"));
            }
        }

        if type_named.len() == decl_shape.named.len() {
            // The whole named list goes away; a default must remain ahead
            // of it, so take the comma and braces with it.
            let default = decl_shape.default?;
            let close = find_char(source, decl_shape.named.last()?.span.end, '}')?;
            fixes.push(remove(Span::new(default.span.end, close + 1)));
        } else {
            fixes.extend(named_removals(&decl_shape.named, &type_named));
        }
    }

    if let Some(default) = type_default {
        new_statements.push_str(&format!(
            "import type {} from {source_literal};\n",
            default.local.name
        ));
        let comma = find_char(source, default.span.end, ',')?;
        let after = skip_whitespace(source, comma + 1);
        fixes.push(remove(Span::new(default.span.start, after)));
    }

    if let Some(namespace) = type_namespace {
        let namespace_text =
            &source[namespace.span.start as usize..namespace.span.end as usize];
        new_statements.push_str(&format!(
            "import type {namespace_text} from {source_literal};\n"
        ));
        // A namespace in the type bucket of a split always follows a
        // surviving default specifier.
        let default = decl_shape.default?;
        fixes.push(remove(Span::new(default.span.end, namespace.span.end)));
    }

    if !new_statements.is_empty() {
        fixes.push(insert_at(decl.span.start, new_statements));
    }
    Some(fixes)
}

/// Merge a duplicate type-only named import into the canonical declaration.
pub(crate) fn merge_duplicate(
    source: &str,
    duplicate: &ImportRecord<'_>,
    target: &ImportRecord<'_>,
) -> Option<Vec<Fix>> {
    let names = shape(duplicate.decl)
        .named
        .iter()
        .map(|s| named_spec_text(source, s))
        .collect::<Vec<_>>()
        .join(", ");
    let last = shape(target.decl).named.last().copied()?;
    Some(vec![
        remove(statement_removal_span(source, duplicate.decl.span)),
        insert_at(last.span.end, format!(", {names}")),
    ])
}

/// Fold a named-only type declaration into a value sibling as inline `type`
/// specifiers.
pub(crate) fn combine_into(
    source: &str,
    record: &ImportRecord<'_>,
    target: &ImportRecord<'_>,
) -> Option<Vec<Fix>> {
    let names = shape(record.decl)
        .named
        .iter()
        .map(|s| format!("type {}", named_spec_text(source, s)))
        .collect::<Vec<_>>()
        .join(", ");
    let target_shape = shape(target.decl);

    let mut fixes = vec![remove(statement_removal_span(source, record.decl.span))];
    if let Some(last) = target_shape.named.last() {
        fixes.push(insert_at(last.span.end, format!(", {names}")));
    } else if let Some(default) = target_shape.default {
        fixes.push(insert_at(default.span.end, format!(", {{ {names} }}")));
    } else {
        return None;
    }
    Some(fixes)
}

/// Removals for a subset of a named list. Contiguous runs collapse into one
/// ranged deletion; commas are taken from the following specifier except
/// when a run reaches the end of the list, where the preceding comma goes
/// instead. The caller handles the all-specifiers case.
fn named_removals(all: &[&ImportSpecifier<'_>], removed: &[&ImportSpecifier<'_>]) -> Vec<Fix> {
    let indices: Vec<usize> = all
        .iter()
        .enumerate()
        .filter(|(_, s)| removed.iter().any(|r| r.span == s.span))
        .map(|(i, _)| i)
        .collect();

    let mut fixes = Vec::new();
    let mut i = 0;
    while i < indices.len() {
        let run_start = indices[i];
        let mut run_end = run_start;
        while i + 1 < indices.len() && indices[i + 1] == run_end + 1 {
            i += 1;
            run_end += 1;
        }
        i += 1;

        let span = if run_end + 1 < all.len() {
            Span::new(all[run_start].span.start, all[run_end + 1].span.start)
        } else {
            Span::new(all[run_start - 1].span.end, all[run_end].span.end)
        };
        fixes.push(remove(span));
    }
    fixes
}
