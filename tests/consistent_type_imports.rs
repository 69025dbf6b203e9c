//! End-to-end tests for consistent-type-imports: lint a TypeScript source,
//! apply the emitted fixes, and check the rewritten output.

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use ts_linter::rules::{ConsistentTypeImportsConfig, ImportPreference};
use ts_linter::{ConsistentTypeImports, Diagnostic, Fix, LintContext};

fn lint(source: &str, config: ConsistentTypeImportsConfig) -> Vec<Diagnostic> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
    assert!(ret.errors.is_empty(), "should parse: {:?}", ret.errors);
    let semantic = SemanticBuilder::new().build(&ret.program).semantic;
    let mut ctx = LintContext::new(source, &semantic);
    ConsistentTypeImports::with_config(config).run(&mut ctx);
    ctx.into_diagnostics()
}

fn lint_default(source: &str) -> Vec<Diagnostic> {
    lint(source, ConsistentTypeImportsConfig::default())
}

fn with_prefer(prefer: ImportPreference) -> ConsistentTypeImportsConfig {
    ConsistentTypeImportsConfig {
        prefer,
        ..ConsistentTypeImportsConfig::default()
    }
}

/// Splice every fix from every diagnostic into the source. Fixes for one
/// file are expected to be non-overlapping.
fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> String {
    let mut fixes: Vec<&Fix> = diagnostics.iter().flat_map(|d| d.fixes.iter()).collect();
    fixes.sort_by_key(|f| (f.start, f.end));
    let mut out = String::new();
    let mut cursor = 0usize;
    for fix in fixes {
        let start = fix.start as usize;
        assert!(start >= cursor, "fixes overlap");
        out.push_str(&source[cursor..start]);
        out.push_str(&fix.replacement);
        cursor = fix.end as usize;
    }
    out.push_str(&source[cursor..]);
    out
}

fn fix_all(source: &str, config: ConsistentTypeImportsConfig) -> String {
    apply_fixes(source, &lint(source, config))
}

#[test]
fn retags_fully_type_only_named_import() {
    let source = "import { A, B } from 'mod'; type T = [A, B];";
    let diagnostics = lint_default(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("typeOverValue"));
    insta::assert_snapshot!(
        apply_fixes(source, &diagnostics),
        @"import type { A, B } from 'mod'; type T = [A, B];"
    );
}

#[test]
fn retags_type_only_default_import() {
    let source = "import Foo from 'mod'; type T = Foo;";
    let diagnostics = lint_default(source);
    assert_eq!(diagnostics[0].code, Some("typeOverValue"));
    insta::assert_snapshot!(
        apply_fixes(source, &diagnostics),
        @"import type Foo from 'mod'; type T = Foo;"
    );
}

#[test]
fn retag_strips_redundant_inline_type_qualifiers() {
    let source = "import { type A, B } from 'mod'; type T = [A, B];";
    let fixed = fix_all(source, ConsistentTypeImportsConfig::default());
    assert_eq!(fixed, "import type { A, B } from 'mod'; type T = [A, B];");
}

#[test]
fn splits_type_only_named_out_of_mixed_import() {
    let source = "import Foo, { Bar } from 'mod';\ntype T = Bar;\nconst x = new Foo();\n";
    let diagnostics = lint_default(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("aImportIsOnlyTypes"));
    assert_eq!(
        diagnostics[0].message,
        "Import \"Bar\" is only used as types."
    );
    assert_eq!(
        apply_fixes(source, &diagnostics),
        "import type { Bar } from 'mod';\nimport Foo from 'mod';\ntype T = Bar;\nconst x = new Foo();\n"
    );
}

#[test]
fn split_message_pluralizes_multiple_names() {
    let source = "import Foo, { A, B } from 'mod';\ntype T = [A, B];\nconst x = new Foo();\n";
    let diagnostics = lint_default(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("someImportsAreOnlyTypes"));
    assert_eq!(
        diagnostics[0].message,
        "Imports \"A\" and \"B\" are only used as types."
    );
    assert_eq!(
        apply_fixes(source, &diagnostics),
        "import type { A, B } from 'mod';\nimport Foo from 'mod';\ntype T = [A, B];\nconst x = new Foo();\n"
    );
}

#[test]
fn split_merges_into_existing_type_import() {
    let source = "import type { Baz } from 'mod';\nimport { Bar, val } from 'mod';\ntype T = Bar;\nconst x = val;\n";
    let diagnostics = lint_default(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("aImportIsOnlyTypes"));
    assert_eq!(
        apply_fixes(source, &diagnostics),
        "import type { Baz, Bar } from 'mod';\nimport { val } from 'mod';\ntype T = Bar;\nconst x = val;\n"
    );
}

#[test]
fn split_extracts_interior_specifier_with_one_removal() {
    let source = "import { a, T, b } from 'mod';\ntype X = T;\nconsole.log(a, b);\n";
    let diagnostics = lint_default(source);
    assert_eq!(
        apply_fixes(source, &diagnostics),
        "import type { T } from 'mod';\nimport { a, b } from 'mod';\ntype X = T;\nconsole.log(a, b);\n"
    );
}

#[test]
fn split_extracts_trailing_run() {
    let source = "import { a, T, U } from 'mod';\ntype X = [T, U];\nconsole.log(a);\n";
    let diagnostics = lint_default(source);
    assert_eq!(
        apply_fixes(source, &diagnostics),
        "import type { T, U } from 'mod';\nimport { a } from 'mod';\ntype X = [T, U];\nconsole.log(a);\n"
    );
}

#[test]
fn split_extracts_type_only_default_from_mixed_import() {
    let source = "import Foo, { bar } from 'mod';\ntype T = Foo;\nconsole.log(bar);\n";
    let diagnostics = lint_default(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("aImportIsOnlyTypes"));
    assert_eq!(
        apply_fixes(source, &diagnostics),
        "import type Foo from 'mod';\nimport { bar } from 'mod';\ntype T = Foo;\nconsole.log(bar);\n"
    );
}

#[test]
fn split_extracts_type_only_namespace_from_mixed_import() {
    let source = "import Foo, * as ns from 'mod';\nconst x = new Foo();\ntype T = ns.Thing;\n";
    let diagnostics = lint_default(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("aImportIsOnlyTypes"));
    assert_eq!(
        apply_fixes(source, &diagnostics),
        "import type * as ns from 'mod';\nimport Foo from 'mod';\nconst x = new Foo();\ntype T = ns.Thing;\n"
    );
}

#[test]
fn split_extracts_type_only_default_leaving_namespace() {
    let source = "import Foo, * as ns from 'mod';\ntype T = Foo;\nconsole.log(ns);\n";
    let diagnostics = lint_default(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("aImportIsOnlyTypes"));
    assert_eq!(
        apply_fixes(source, &diagnostics),
        "import type Foo from 'mod';\nimport * as ns from 'mod';\ntype T = Foo;\nconsole.log(ns);\n"
    );
}

#[test]
fn unused_imports_are_left_alone() {
    let source = "import { A } from 'mod';\nexport const x = 1;\n";
    assert!(lint_default(source).is_empty());
}

#[test]
fn side_effect_imports_are_ignored() {
    let source = "import 'polyfill';\n";
    assert!(lint_default(source).is_empty());
}

#[test]
fn typeof_query_counts_as_type_usage() {
    let source = "import { config } from 'mod'; type T = typeof config;";
    let diagnostics = lint_default(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("typeOverValue"));
}

#[test]
fn typeof_qualified_chain_counts_as_type_usage() {
    let source = "import { config } from 'mod'; type T = typeof config.nested.value;";
    let diagnostics = lint_default(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("typeOverValue"));
}

#[test]
fn no_type_imports_retags_back_to_value() {
    let source = "import type { A } from 'mod'; type T = A;";
    let diagnostics = lint(source, with_prefer(ImportPreference::NoTypeImports));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("valueOverType"));
    insta::assert_snapshot!(
        apply_fixes(source, &diagnostics),
        @"import { A } from 'mod'; type T = A;"
    );
}

#[test]
fn combine_merges_duplicate_type_imports() {
    let source = "import type { A } from 'mod';\nimport type { B } from 'mod';\ntype T = [A, B];\n";
    let diagnostics = lint(source, with_prefer(ImportPreference::TypeImportsCombine));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("duplicateTypeImports"));
    assert_eq!(
        apply_fixes(source, &diagnostics),
        "import type { A, B } from 'mod';\ntype T = [A, B];\n"
    );
}

#[test]
fn combine_reports_default_duplicates_without_fix() {
    let source =
        "import type A from 'mod';\nimport type B from 'mod';\ntype T = [A, B];\n";
    let diagnostics = lint(source, with_prefer(ImportPreference::TypeImportsCombine));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("duplicateTypeImports"));
    assert!(diagnostics[0].fixes.is_empty());
}

#[test]
fn combine_folds_type_import_into_value_sibling() {
    let source =
        "import { val } from 'mod';\nimport type { T } from 'mod';\nconst a = val;\ntype U = T;\n";
    let diagnostics = lint(source, with_prefer(ImportPreference::TypeImportsCombine));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("mustBeOneImport"));
    assert_eq!(
        apply_fixes(source, &diagnostics),
        "import { val, type T } from 'mod';\nconst a = val;\ntype U = T;\n"
    );
}

#[test]
fn combine_folds_into_default_only_sibling() {
    let source =
        "import Foo from 'mod';\nimport type { T } from 'mod';\nconst a = new Foo();\ntype U = T;\n";
    let diagnostics = lint(source, with_prefer(ImportPreference::TypeImportsCombine));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("mustBeOneImport"));
    assert_eq!(
        apply_fixes(source, &diagnostics),
        "import Foo, { type T } from 'mod';\nconst a = new Foo();\ntype U = T;\n"
    );
}

#[test]
fn combine_default_type_import_has_no_fix() {
    let source =
        "import { val } from 'mod';\nimport type Def from 'mod';\nconst a = val;\ntype U = Def;\n";
    let diagnostics = lint(source, with_prefer(ImportPreference::TypeImportsCombine));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("mustBeOneImport"));
    assert!(diagnostics[0].fixes.is_empty());
}

#[test]
fn import_type_annotations_are_reported() {
    let source = "type T = import('mod').Foo;";
    let diagnostics = lint_default(source);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, Some("noImportTypeAnnotations"));
    assert!(diagnostics[0].fixes.is_empty());
}

#[test]
fn import_type_annotations_can_be_allowed() {
    let source = "type T = import('mod').Foo;";
    let config = ConsistentTypeImportsConfig {
        disallow_type_annotations: false,
        ..ConsistentTypeImportsConfig::default()
    };
    assert!(lint(source, config).is_empty());
}

#[test]
fn fixed_output_is_a_fixed_point() {
    let sources = [
        "import { A, B } from 'mod'; type T = [A, B];",
        "import Foo, { Bar } from 'mod';\ntype T = Bar;\nconst x = new Foo();\n",
        "import { a, T, b } from 'mod';\ntype X = T;\nconsole.log(a, b);\n",
    ];
    for source in sources {
        let fixed = fix_all(source, ConsistentTypeImportsConfig::default());
        let remaining = lint_default(&fixed);
        assert!(
            remaining.is_empty(),
            "expected no diagnostics after fixing {source:?}, got {remaining:?}"
        );
    }
}
