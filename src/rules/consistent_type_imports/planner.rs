//! Import transformation planning
//!
//! Pure decision layer: given a finalized import group and the configured
//! strategy, produce the per-declaration transformations. Indices refer into
//! the group's record list; when several records could serve as a target,
//! the earliest-declared one wins.

use oxc_ast::ast::ImportDeclarationSpecifier;

use super::{ImportGroup, ImportPreference, ImportRecord};

/// A planned transformation for one declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImportPlan {
    /// Convert the whole declaration to `import type`
    RetagType { record: usize },
    /// Extract the type-only specifiers out of a mixed declaration
    SplitType { record: usize },
    /// Strip the `type` qualifier from a type-only declaration
    RetagValue { record: usize },
    /// A type-only declaration duplicates an earlier one of the same
    /// specifier kind; only named duplicates carry a merge fix
    MergeDuplicate {
        record: usize,
        target: usize,
        fixable: bool,
    },
    /// Fold a type-only declaration into a value sibling as inline
    /// specifiers; `None` means no compatible sibling exists
    CombineInto {
        record: usize,
        target: Option<usize>,
    },
}

/// The specifier kind a type-only declaration exclusively carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecifierSlot {
    Default,
    Namespace,
    Named,
}

pub(crate) fn plan_group(group: &ImportGroup<'_>, prefer: ImportPreference) -> Vec<ImportPlan> {
    match prefer {
        ImportPreference::TypeImports => plan_type_imports(group),
        ImportPreference::NoTypeImports => plan_no_type_imports(group),
        ImportPreference::TypeImportsCombine => plan_combine(group),
    }
}

fn plan_type_imports(group: &ImportGroup<'_>) -> Vec<ImportPlan> {
    let mut plans = Vec::new();
    for (record, rec) in group.records.iter().enumerate() {
        if rec.is_type_decl() || rec.type_specifiers.is_empty() {
            continue;
        }
        if rec.value_specifiers.is_empty() && rec.unused_specifiers.is_empty() {
            plans.push(ImportPlan::RetagType { record });
        } else {
            plans.push(ImportPlan::SplitType { record });
        }
    }
    plans
}

fn plan_no_type_imports(group: &ImportGroup<'_>) -> Vec<ImportPlan> {
    group
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.is_type_decl())
        .map(|(record, _)| ImportPlan::RetagValue { record })
        .collect()
}

fn plan_combine(group: &ImportGroup<'_>) -> Vec<ImportPlan> {
    let clean = group.records.iter().all(|rec| {
        rec.is_type_decl() || (rec.value_specifiers.is_empty() && rec.unused_specifiers.is_empty())
    });
    let mixed = group
        .records
        .iter()
        .any(|rec| !rec.value_specifiers.is_empty());

    let mut plans = Vec::new();
    if clean {
        let mut seen_default: Option<usize> = None;
        let mut seen_namespace: Option<usize> = None;
        let mut seen_named: Option<usize> = None;
        for (record, rec) in group.records.iter().enumerate() {
            if !rec.is_type_decl() {
                plans.push(ImportPlan::RetagType { record });
                continue;
            }
            let Some(slot) = type_record_slot(rec) else {
                continue;
            };
            let seen = match slot {
                SpecifierSlot::Default => &mut seen_default,
                SpecifierSlot::Namespace => &mut seen_namespace,
                SpecifierSlot::Named => &mut seen_named,
            };
            match *seen {
                None => *seen = Some(record),
                Some(target) => plans.push(ImportPlan::MergeDuplicate {
                    record,
                    target,
                    fixable: slot == SpecifierSlot::Named,
                }),
            }
        }
    } else if mixed {
        for (record, rec) in group.records.iter().enumerate() {
            if rec.is_type_decl() {
                plans.push(ImportPlan::CombineInto {
                    record,
                    target: find_combine_target(group, rec),
                });
            }
        }
    }
    plans
}

fn type_record_slot(record: &ImportRecord<'_>) -> Option<SpecifierSlot> {
    let specifiers = record.decl.specifiers.as_deref()?;
    match specifiers.first()? {
        ImportDeclarationSpecifier::ImportSpecifier(_) => Some(SpecifierSlot::Named),
        ImportDeclarationSpecifier::ImportDefaultSpecifier(_) => Some(SpecifierSlot::Default),
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(_) => Some(SpecifierSlot::Namespace),
    }
}

/// Inline `type` qualifiers exist only for named specifiers, so only
/// named-only type declarations can be folded into a sibling. A sibling with
/// a namespace specifier cannot take a named list.
fn find_combine_target(group: &ImportGroup<'_>, record: &ImportRecord<'_>) -> Option<usize> {
    if !record.is_named_only() {
        return None;
    }
    group
        .records
        .iter()
        .position(|sibling| !sibling.is_type_decl() && !sibling.has_namespace())
}
