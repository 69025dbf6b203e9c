//! consistent-type-imports
//!
//! Enforce a consistent style for type-only imports. Import declarations are
//! grouped per module source, every binding is classified from its resolved
//! references, and the configured strategy decides which declarations get
//! retagged, split, or merged. Fixes are synthesized as minimal token-range
//! edits over the original source text.

mod fixer;
mod planner;
pub mod usage;

use indexmap::IndexMap;
use oxc_ast::ast::{BindingIdentifier, ImportDeclaration, ImportDeclarationSpecifier};
use oxc_ast::AstKind;
use oxc_semantic::Semantic;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;
use crate::utils::format_name_list;
use crate::{LintContext, RuleCategory, RuleMeta};
use planner::ImportPlan;
use usage::{classify_binding, Usage};

/// Import style strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportPreference {
    /// Type-only bindings must use `import type`
    #[default]
    TypeImports,
    /// `import type` is disallowed entirely
    NoTypeImports,
    /// Like `type-imports`, but type imports from one module are also
    /// deduplicated and folded into value imports where possible
    TypeImportsCombine,
}

/// Configuration for consistent-type-imports
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsistentTypeImportsConfig {
    pub prefer: ImportPreference,
    /// Report `import()` type annotations
    pub disallow_type_annotations: bool,
}

impl Default for ConsistentTypeImportsConfig {
    fn default() -> Self {
        Self {
            prefer: ImportPreference::default(),
            disallow_type_annotations: true,
        }
    }
}

/// Message identifiers reported by this rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageId {
    TypeOverValue,
    SomeImportsAreOnlyTypes,
    AImportIsOnlyTypes,
    ValueOverType,
    NoImportTypeAnnotations,
    DuplicateTypeImports,
    MustBeOneImport,
}

impl MessageId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TypeOverValue => "typeOverValue",
            Self::SomeImportsAreOnlyTypes => "someImportsAreOnlyTypes",
            Self::AImportIsOnlyTypes => "aImportIsOnlyTypes",
            Self::ValueOverType => "valueOverType",
            Self::NoImportTypeAnnotations => "noImportTypeAnnotations",
            Self::DuplicateTypeImports => "duplicateTypeImports",
            Self::MustBeOneImport => "mustBeOneImport",
        }
    }
}

/// One import statement within a group, with its classification buckets.
///
/// For declarations of `value` kind the three buckets partition the
/// specifier set exactly; type-only declarations are not classified.
pub(crate) struct ImportRecord<'a> {
    pub decl: &'a ImportDeclaration<'a>,
    pub type_specifiers: Vec<&'a ImportDeclarationSpecifier<'a>>,
    pub value_specifiers: Vec<&'a ImportDeclarationSpecifier<'a>>,
    pub unused_specifiers: Vec<&'a ImportDeclarationSpecifier<'a>>,
}

impl<'a> ImportRecord<'a> {
    pub fn is_type_decl(&self) -> bool {
        self.decl.import_kind.is_type()
    }

    fn specifiers(&self) -> &'a [ImportDeclarationSpecifier<'a>] {
        self.decl.specifiers.as_ref().map_or(&[], |v| v.as_slice())
    }

    pub fn has_namespace(&self) -> bool {
        self.specifiers()
            .iter()
            .any(|s| matches!(s, ImportDeclarationSpecifier::ImportNamespaceSpecifier(_)))
    }

    pub fn is_named_only(&self) -> bool {
        let specifiers = self.specifiers();
        !specifiers.is_empty()
            && specifiers
                .iter()
                .all(|s| matches!(s, ImportDeclarationSpecifier::ImportSpecifier(_)))
    }
}

/// All import declarations sharing one module-source string, in source order.
pub(crate) struct ImportGroup<'a> {
    pub source: &'a str,
    pub records: Vec<ImportRecord<'a>>,
    /// First type-only declaration with only named specifiers; synthesized
    /// type specifiers are inserted there instead of a new statement.
    pub insertion_target: Option<usize>,
}

fn specifier_local<'a>(specifier: &'a ImportDeclarationSpecifier<'a>) -> &'a BindingIdentifier<'a> {
    match specifier {
        ImportDeclarationSpecifier::ImportSpecifier(s) => &s.local,
        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => &s.local,
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => &s.local,
    }
}

/// Group every import declaration by its module source, classifying the
/// bindings of value-kind declarations along the way.
fn collect_import_groups<'a>(semantic: &Semantic<'a>) -> Vec<ImportGroup<'a>> {
    let mut groups: IndexMap<&'a str, ImportGroup<'a>, FxBuildHasher> = IndexMap::default();

    for node in semantic.nodes().iter() {
        let AstKind::ImportDeclaration(decl) = node.kind() else {
            continue;
        };
        let Some(specifiers) = decl.specifiers.as_ref() else {
            continue;
        };
        // Side-effect imports carry no type/value ambiguity.
        if specifiers.is_empty() {
            continue;
        }

        let mut record = ImportRecord {
            decl,
            type_specifiers: Vec::new(),
            value_specifiers: Vec::new(),
            unused_specifiers: Vec::new(),
        };

        if !decl.import_kind.is_type() {
            for specifier in specifiers.iter() {
                // Inline `type` qualifiers are already type-only by grammar.
                if let ImportDeclarationSpecifier::ImportSpecifier(named) = specifier {
                    if named.import_kind.is_type() {
                        record.type_specifiers.push(specifier);
                        continue;
                    }
                }
                match classify_binding(semantic, specifier_local(specifier)) {
                    Usage::TypeOnly => record.type_specifiers.push(specifier),
                    Usage::Value => record.value_specifiers.push(specifier),
                    Usage::Unused => record.unused_specifiers.push(specifier),
                }
            }
        }

        let source = decl.source.value.as_str();
        let group = groups.entry(source).or_insert_with(|| ImportGroup {
            source,
            records: Vec::new(),
            insertion_target: None,
        });
        let index = group.records.len();
        if group.insertion_target.is_none() && record.is_type_decl() && record.is_named_only() {
            group.insertion_target = Some(index);
        }
        group.records.push(record);
    }

    groups.into_values().collect()
}

/// consistent-type-imports rule
#[derive(Debug, Clone, Default)]
pub struct ConsistentTypeImports {
    pub config: ConsistentTypeImportsConfig,
}

impl RuleMeta for ConsistentTypeImports {
    const NAME: &'static str = "consistent-type-imports";
    const CATEGORY: RuleCategory = RuleCategory::Style;
}

impl ConsistentTypeImports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConsistentTypeImportsConfig) -> Self {
        Self { config }
    }

    /// Run the rule over one file's semantic model.
    pub fn run<'a>(&self, ctx: &mut LintContext<'a>) {
        if self.config.disallow_type_annotations {
            self.check_type_annotations(ctx);
        }

        let groups = collect_import_groups(ctx.semantic());
        for group in &groups {
            for plan in planner::plan_group(group, self.config.prefer) {
                self.report_plan(ctx, group, &plan);
            }
        }
    }

    fn check_type_annotations(&self, ctx: &mut LintContext<'_>) {
        for node in ctx.nodes().iter() {
            if let AstKind::TSImportType(annotation) = node.kind() {
                ctx.report(
                    Diagnostic::warning(
                        Self::NAME,
                        annotation.span,
                        "`import()` type annotations are forbidden.",
                    )
                    .with_code(MessageId::NoImportTypeAnnotations.as_str()),
                );
            }
        }
    }

    fn report_plan<'a>(&self, ctx: &mut LintContext<'a>, group: &ImportGroup<'a>, plan: &ImportPlan) {
        let source_text = ctx.source_text();
        match *plan {
            ImportPlan::RetagType { record } => {
                let record = &group.records[record];
                let fixes = fixer::retag_type(source_text, record);
                let diagnostic = Diagnostic::warning(
                    Self::NAME,
                    record.decl.span,
                    "All imports in the declaration are only used as types. Use `import type`.",
                )
                .with_code(MessageId::TypeOverValue.as_str());
                ctx.report(attach(diagnostic, fixes));
            }
            ImportPlan::SplitType { record } => {
                let record = &group.records[record];
                let names: Vec<&str> = record
                    .type_specifiers
                    .iter()
                    .map(|s| specifier_local(s).name.as_str())
                    .collect();
                let list = format_name_list(&names);
                let (code, message) = if names.len() == 1 {
                    (
                        MessageId::AImportIsOnlyTypes,
                        format!("Import {list} is only used as types."),
                    )
                } else {
                    (
                        MessageId::SomeImportsAreOnlyTypes,
                        format!("Imports {list} are only used as types."),
                    )
                };
                let fixes = fixer::split_type(source_text, group, record);
                let diagnostic = Diagnostic::warning(Self::NAME, record.decl.span, message)
                    .with_code(code.as_str());
                ctx.report(attach(diagnostic, fixes));
            }
            ImportPlan::RetagValue { record } => {
                let record = &group.records[record];
                let fixes = fixer::retag_value(source_text, record);
                let diagnostic = Diagnostic::warning(
                    Self::NAME,
                    record.decl.span,
                    "Use an `import` instead of an `import type`.",
                )
                .with_code(MessageId::ValueOverType.as_str());
                ctx.report(attach(diagnostic, fixes));
            }
            ImportPlan::MergeDuplicate {
                record,
                target,
                fixable,
            } => {
                let dup = &group.records[record];
                let fixes = if fixable {
                    fixer::merge_duplicate(source_text, dup, &group.records[target])
                } else {
                    None
                };
                let diagnostic = Diagnostic::warning(
                    Self::NAME,
                    dup.decl.span,
                    format!(
                        "Type import from \"{}\" is a duplicate of an earlier type import.",
                        group.source
                    ),
                )
                .with_code(MessageId::DuplicateTypeImports.as_str())
                .with_help("Merge the imported names into the first type import.");
                ctx.report(attach(diagnostic, fixes));
            }
            ImportPlan::CombineInto { record, target } => {
                let rec = &group.records[record];
                let fixes = target
                    .and_then(|t| fixer::combine_into(source_text, rec, &group.records[t]));
                let diagnostic = Diagnostic::warning(
                    Self::NAME,
                    rec.decl.span,
                    format!(
                        "Type imports from \"{}\" must be combined with the existing value import.",
                        group.source
                    ),
                )
                .with_code(MessageId::MustBeOneImport.as_str());
                ctx.report(attach(diagnostic, fixes));
            }
        }
    }
}

/// Missing fixes degrade the diagnostic to fix-less rather than aborting
/// the traversal.
fn attach(diagnostic: Diagnostic, fixes: Option<Vec<crate::Fix>>) -> Diagnostic {
    match fixes {
        Some(fixes) => diagnostic.with_fixes(fixes),
        None => diagnostic,
    }
}
