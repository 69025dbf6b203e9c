//! valid-rule-meta
//!
//! Meta-lint for lint rules themselves: verifies that a rule's declared
//! capabilities (`meta.fixable`, `meta.hasSuggestions`) match what its
//! `create` function actually reports. Report descriptors are resolved
//! through constant propagation, conditional branches, and object spreads
//! before their `fix`/`suggest` keys are inspected.

pub mod flatten;

use oxc_ast::ast::{
    Argument, BindingPattern, Expression, FormalParameters, ObjectProperty, ObjectPropertyKind,
};
use oxc_ast::AstKind;
use oxc_semantic::{AstNodes, SymbolId};
use oxc_span::{GetSpan, Span};

use crate::diagnostic::Diagnostic;
use crate::{LintContext, RuleCategory, RuleMeta};
use flatten::{
    flatten, property_key_name, walk_object, LogicalProperty, ResolveConst, SemanticResolver,
};

/// Message identifiers reported by this rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageId {
    ShouldBeFixable,
    ShouldNotBeFixable,
    ShouldBeSuggestable,
    ShouldNotBeSuggestable,
}

impl MessageId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShouldBeFixable => "shouldBeFixable",
            Self::ShouldNotBeFixable => "shouldNotBeFixable",
            Self::ShouldBeSuggestable => "shouldBeSuggestable",
            Self::ShouldNotBeSuggestable => "shouldNotBeSuggestable",
        }
    }
}

/// The one rule object found in a file, if any.
///
/// Only the first object literal carrying both `meta` and `create` is
/// considered; later matches in the same file are ignored.
struct RuleObject<'a> {
    meta: &'a Expression<'a>,
    /// Symbol of the `create` function's first parameter, when it is a
    /// plain identifier.
    context_symbol: Option<SymbolId>,
}

/// Aggregated findings from every recognized `context.report(...)` call.
#[derive(Default)]
struct ReportFindings {
    /// Key spans of `fix` descriptor properties, in source order
    fix_sites: Vec<Span>,
    /// Key spans of `suggest` descriptor properties, in source order
    suggest_sites: Vec<Span>,
    /// Set when some report call's descriptor could not be statically shaped
    has_unknown: bool,
}

/// Declared capability flags read off the rule's `meta` object.
#[derive(Default)]
struct MetaFacts<'a> {
    fixable: Option<&'a ObjectProperty<'a>>,
    has_suggestions: Option<&'a ObjectProperty<'a>>,
    /// Set when meta itself or one of its spreads could not be resolved
    has_unknown: bool,
}

fn find_rule_object<'a>(
    nodes: &'a AstNodes<'a>,
    resolver: &dyn ResolveConst<'a>,
) -> Option<RuleObject<'a>> {
    for node in nodes.iter() {
        let AstKind::ObjectExpression(object) = node.kind() else {
            continue;
        };
        let mut meta = None;
        let mut create = None;
        for property in &object.properties {
            let ObjectPropertyKind::ObjectProperty(p) = property else {
                continue;
            };
            match property_key_name(&p.key) {
                Some("meta") => meta = Some(&p.value),
                Some("create") => create = Some(&p.value),
                _ => {}
            }
        }
        if let (Some(meta), Some(create)) = (meta, create) {
            return Some(RuleObject {
                meta,
                context_symbol: context_symbol(create, resolver),
            });
        }
    }
    None
}

/// Resolve the `create` value to a function and take its first parameter's
/// symbol. A non-function or a destructured parameter yields `None`.
fn context_symbol<'a>(
    create: &'a Expression<'a>,
    resolver: &dyn ResolveConst<'a>,
) -> Option<SymbolId> {
    flatten(create, resolver)
        .into_iter()
        .find_map(|candidate| match candidate {
            Expression::FunctionExpression(f) => first_param_symbol(&f.params),
            Expression::ArrowFunctionExpression(f) => first_param_symbol(&f.params),
            _ => None,
        })
}

fn first_param_symbol(params: &FormalParameters) -> Option<SymbolId> {
    let param = params.items.first()?;
    match &param.pattern {
        BindingPattern::BindingIdentifier(ident) => Some(ident.symbol_id()),
        _ => None,
    }
}

/// Walk every reference to the context parameter looking for
/// `context.report(descriptor)` calls, and record which descriptor keys
/// each one carries. A `.report` access that is not a direct call, or a
/// descriptor that does not reduce to object literals, marks the findings
/// shape-unknown. Other uses of the context (options, source code access)
/// are ignored.
fn collect_report_sites<'a>(
    ctx: &LintContext<'a>,
    symbol: SymbolId,
    resolver: &dyn ResolveConst<'a>,
) -> ReportFindings {
    let mut findings = ReportFindings::default();
    for reference in ctx.scoping().get_resolved_references(symbol) {
        let mut ancestors = ctx.nodes().ancestors(reference.node_id());
        let Some(parent) = ancestors.next() else {
            continue;
        };
        let AstKind::StaticMemberExpression(member) = parent.kind() else {
            continue;
        };
        if member.property.name != "report" {
            continue;
        }
        let call = match ancestors.next().map(|node| node.kind()) {
            Some(AstKind::CallExpression(call)) if call.callee.span() == member.span => call,
            _ => {
                findings.has_unknown = true;
                continue;
            }
        };
        let Some(descriptor) = call.arguments.first().and_then(Argument::as_expression) else {
            findings.has_unknown = true;
            continue;
        };
        for candidate in flatten(descriptor, resolver) {
            let Expression::ObjectExpression(object) = candidate else {
                findings.has_unknown = true;
                continue;
            };
            let shape = walk_object(object, resolver);
            if shape.has_unknown {
                findings.has_unknown = true;
            }
            for property in &shape.properties {
                let LogicalProperty::Named(p) = property else {
                    continue;
                };
                match property_key_name(&p.key) {
                    Some("fix") => findings.fix_sites.push(p.key.span()),
                    Some("suggest") => findings.suggest_sites.push(p.key.span()),
                    _ => {}
                }
            }
        }
    }
    findings
}

fn collect_meta_facts<'a>(
    meta: &'a Expression<'a>,
    resolver: &dyn ResolveConst<'a>,
) -> MetaFacts<'a> {
    let mut facts = MetaFacts::default();
    for candidate in flatten(meta, resolver) {
        let Expression::ObjectExpression(object) = candidate else {
            facts.has_unknown = true;
            continue;
        };
        let shape = walk_object(object, resolver);
        if shape.has_unknown {
            facts.has_unknown = true;
        }
        for property in &shape.properties {
            let LogicalProperty::Named(p) = property else {
                continue;
            };
            // Later duplicates win, matching evaluation order.
            match property_key_name(&p.key) {
                Some("fixable") => facts.fixable = Some(p),
                Some("hasSuggestions") => facts.has_suggestions = Some(p),
                _ => {}
            }
        }
    }
    facts
}

fn peel<'a>(expr: &'a Expression<'a>) -> &'a Expression<'a> {
    match expr {
        Expression::ParenthesizedExpression(inner) => peel(&inner.expression),
        Expression::TSAsExpression(inner) => peel(&inner.expression),
        Expression::TSSatisfiesExpression(inner) => peel(&inner.expression),
        _ => expr,
    }
}

fn is_null_or_undefined(expr: &Expression<'_>) -> bool {
    match expr {
        Expression::NullLiteral(_) => true,
        Expression::Identifier(ident) => ident.name == "undefined",
        _ => false,
    }
}

/// Literals whose truthiness is statically known. A non-literal value
/// (identifier, call, member access) is not decidable and suppresses the
/// positive suggestable check.
fn is_plain_literal(expr: &Expression<'_>) -> bool {
    matches!(
        expr,
        Expression::BooleanLiteral(_)
            | Expression::NullLiteral(_)
            | Expression::StringLiteral(_)
            | Expression::NumericLiteral(_)
            | Expression::BigIntLiteral(_)
    ) || is_null_or_undefined(expr)
}

fn is_literal_true(expr: &Expression<'_>) -> bool {
    matches!(expr, Expression::BooleanLiteral(b) if b.value)
}

/// valid-rule-meta rule
#[derive(Debug, Clone, Default)]
pub struct ValidRuleMeta;

impl RuleMeta for ValidRuleMeta {
    const NAME: &'static str = "valid-rule-meta";
    const CATEGORY: RuleCategory = RuleCategory::Correctness;
}

impl ValidRuleMeta {
    pub fn new() -> Self {
        Self
    }

    /// Run the rule over one file's semantic model.
    pub fn run<'a>(&self, ctx: &mut LintContext<'a>) {
        let resolver = SemanticResolver::new(ctx.semantic());
        let Some(rule_object) = find_rule_object(ctx.nodes(), &resolver) else {
            return;
        };
        let meta = collect_meta_facts(rule_object.meta, &resolver);
        let findings = match rule_object.context_symbol {
            Some(symbol) => collect_report_sites(ctx, symbol, &resolver),
            // Without a resolvable context parameter nothing about the
            // rule's reports is known.
            None => ReportFindings {
                has_unknown: true,
                ..ReportFindings::default()
            },
        };
        self.check_fixable(ctx, &meta, &findings);
        self.check_suggestions(ctx, &meta, &findings);
    }

    fn check_fixable(&self, ctx: &mut LintContext<'_>, meta: &MetaFacts<'_>, findings: &ReportFindings) {
        // Positive direction: evidence of a fix is trustworthy even when
        // other report sites are unknown, but an unresolved meta spread may
        // satisfy the declaration externally.
        if !findings.fix_sites.is_empty() && !meta.has_unknown {
            let declared = meta
                .fixable
                .is_some_and(|p| !is_null_or_undefined(peel(&p.value)));
            if !declared {
                for &site in &findings.fix_sites {
                    ctx.report(
                        Diagnostic::error(
                            Self::NAME,
                            site,
                            "Rule reports a fix but does not declare `meta.fixable`.",
                        )
                        .with_code(MessageId::ShouldBeFixable.as_str()),
                    );
                }
            }
        }

        // Negative direction: absence of evidence only counts when every
        // report descriptor was fully shaped.
        if findings.fix_sites.is_empty() && !findings.has_unknown {
            if let Some(p) = meta.fixable {
                if matches!(peel(&p.value), Expression::StringLiteral(_)) {
                    ctx.report(
                        Diagnostic::error(
                            Self::NAME,
                            p.span,
                            "Rule declares `meta.fixable` but never reports a fix.",
                        )
                        .with_code(MessageId::ShouldNotBeFixable.as_str()),
                    );
                }
            }
        }
    }

    fn check_suggestions(
        &self,
        ctx: &mut LintContext<'_>,
        meta: &MetaFacts<'_>,
        findings: &ReportFindings,
    ) {
        if !findings.suggest_sites.is_empty() && !meta.has_unknown {
            let declared = match meta.has_suggestions {
                Some(p) => {
                    let value = peel(&p.value);
                    // A non-literal declaration is taken on trust.
                    is_literal_true(value) || !is_plain_literal(value)
                }
                None => false,
            };
            if !declared {
                for &site in &findings.suggest_sites {
                    ctx.report(
                        Diagnostic::error(
                            Self::NAME,
                            site,
                            "Rule reports suggestions but does not declare `meta.hasSuggestions`.",
                        )
                        .with_code(MessageId::ShouldBeSuggestable.as_str()),
                    );
                }
            }
        }

        if findings.suggest_sites.is_empty() && !findings.has_unknown {
            if let Some(p) = meta.has_suggestions {
                if is_literal_true(peel(&p.value)) {
                    ctx.report(
                        Diagnostic::error(
                            Self::NAME,
                            p.span,
                            "Rule declares `meta.hasSuggestions` but never reports a suggestion.",
                        )
                        .with_code(MessageId::ShouldNotBeSuggestable.as_str()),
                    );
                }
            }
        }
    }
}
