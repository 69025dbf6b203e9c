//! Constant flattening over literal expression trees
//!
//! Expands an expression into the finite set of shapes it could statically
//! evaluate to: single-assignment `const` identifiers resolve through their
//! initializer, and both branches of a conditional count as reachable.
//! Everything else yields itself. Resolution only follows immutable
//! single-declarator bindings with an initializer, but a self-initializing
//! `const a = a;` still parses, so resolution depth is capped and anything
//! deeper stays opaque.

use oxc_ast::ast::{
    BindingPattern, Expression, IdentifierReference, ObjectExpression, ObjectProperty,
    ObjectPropertyKind, PropertyKey, SpreadElement,
};
use oxc_ast::AstKind;
use oxc_semantic::Semantic;

/// Binding resolution used by the flattener; mockable in tests.
pub trait ResolveConst<'a> {
    fn resolve(&self, ident: &IdentifierReference<'a>) -> Option<&'a Expression<'a>>;
}

/// Production resolver backed by the file's semantic model.
///
/// Follows a binding only when it is a `const` with a plain identifier
/// pattern and an initializer; anything else stays opaque.
pub struct SemanticResolver<'s, 'a> {
    semantic: &'s Semantic<'a>,
}

impl<'s, 'a> SemanticResolver<'s, 'a> {
    pub fn new(semantic: &'s Semantic<'a>) -> Self {
        Self { semantic }
    }
}

impl<'a> ResolveConst<'a> for SemanticResolver<'_, 'a> {
    fn resolve(&self, ident: &IdentifierReference<'a>) -> Option<&'a Expression<'a>> {
        let reference_id = ident.reference_id.get()?;
        let scoping = self.semantic.scoping();
        let reference = scoping.get_reference(reference_id);
        let symbol_id = reference.symbol_id()?;
        if !scoping.symbol_flags(symbol_id).is_const_variable() {
            return None;
        }
        let declaration = self.semantic.nodes().get_node(scoping.symbol_declaration(symbol_id));
        let AstKind::VariableDeclarator(declarator) = declaration.kind() else {
            return None;
        };
        if !matches!(declarator.id, BindingPattern::BindingIdentifier(_)) {
            return None;
        }
        declarator.init.as_ref()
    }
}

/// Bound on chained `const` resolutions, against self-referential bindings.
const MAX_RESOLVE_DEPTH: usize = 64;

/// Flatten an expression into its statically-known possible shapes.
pub fn flatten<'a>(
    expr: &'a Expression<'a>,
    resolver: &dyn ResolveConst<'a>,
) -> Vec<&'a Expression<'a>> {
    let mut out = Vec::new();
    flatten_into(expr, resolver, 0, &mut out);
    out
}

fn flatten_into<'a>(
    expr: &'a Expression<'a>,
    resolver: &dyn ResolveConst<'a>,
    depth: usize,
    out: &mut Vec<&'a Expression<'a>>,
) {
    match expr {
        Expression::Identifier(ident) => match resolver.resolve(ident) {
            Some(init) if depth < MAX_RESOLVE_DEPTH => {
                flatten_into(init, resolver, depth + 1, out);
            }
            _ => out.push(expr),
        },
        Expression::ConditionalExpression(conditional) => {
            // Both branches are considered reachable; the condition is not
            // evaluated.
            flatten_into(&conditional.consequent, resolver, depth, out);
            flatten_into(&conditional.alternate, resolver, depth, out);
        }
        Expression::ParenthesizedExpression(inner) => {
            flatten_into(&inner.expression, resolver, depth, out);
        }
        Expression::TSAsExpression(inner) => {
            flatten_into(&inner.expression, resolver, depth, out);
        }
        Expression::TSSatisfiesExpression(inner) => {
            flatten_into(&inner.expression, resolver, depth, out);
        }
        _ => out.push(expr),
    }
}

/// A property contributed by an object literal after spread flattening
pub enum LogicalProperty<'a> {
    /// An ordinary property or method
    Named(&'a ObjectProperty<'a>),
    /// A spread whose source could not be reduced to object literals
    Opaque(&'a SpreadElement<'a>),
}

/// The logical property set of an object literal
pub struct ObjectShape<'a> {
    pub properties: Vec<LogicalProperty<'a>>,
    /// Set when any spread source could not be statically resolved
    pub has_unknown: bool,
}

/// Iterate the logical properties of an object literal, recursively
/// flattening spread arguments. Each unresolvable spread is yielded once as
/// `Opaque` and flips `has_unknown`.
pub fn walk_object<'a>(
    object: &'a ObjectExpression<'a>,
    resolver: &dyn ResolveConst<'a>,
) -> ObjectShape<'a> {
    let mut shape = ObjectShape {
        properties: Vec::new(),
        has_unknown: false,
    };
    walk_into(object, resolver, &mut shape);
    shape
}

fn walk_into<'a>(
    object: &'a ObjectExpression<'a>,
    resolver: &dyn ResolveConst<'a>,
    shape: &mut ObjectShape<'a>,
) {
    for property in &object.properties {
        match property {
            ObjectPropertyKind::ObjectProperty(p) => {
                shape.properties.push(LogicalProperty::Named(&**p));
            }
            ObjectPropertyKind::SpreadProperty(spread) => {
                let mut opaque = false;
                for candidate in flatten(&spread.argument, resolver) {
                    if let Expression::ObjectExpression(inner) = candidate {
                        walk_into(inner, resolver, shape);
                    } else {
                        opaque = true;
                    }
                }
                if opaque {
                    shape.has_unknown = true;
                    shape.properties.push(LogicalProperty::Opaque(&**spread));
                }
            }
        }
    }
}

/// Statically-known name of a property key, if any.
pub fn property_key_name<'a>(key: &'a PropertyKey<'a>) -> Option<&'a str> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.as_str()),
        PropertyKey::StringLiteral(literal) => Some(literal.value.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_ast::ast::Statement;
    use oxc_parser::Parser;
    use oxc_semantic::SemanticBuilder;
    use oxc_span::SourceType;

    /// Resolver that never follows bindings.
    struct NoResolver;
    impl<'a> ResolveConst<'a> for NoResolver {
        fn resolve(&self, _ident: &IdentifierReference<'a>) -> Option<&'a Expression<'a>> {
            None
        }
    }

    /// Last expression statement of a program. The parser preserves parens,
    /// so a wrapping `ParenthesizedExpression` is peeled off.
    fn last_expression<'a>(
        program: &'a oxc_ast::ast::Program<'a>,
    ) -> &'a Expression<'a> {
        let expr = program
            .body
            .iter()
            .rev()
            .find_map(|stmt| match stmt {
                Statement::ExpressionStatement(stmt) => Some(&stmt.expression),
                _ => None,
            })
            .expect("expression statement");
        match expr {
            Expression::ParenthesizedExpression(paren) => &paren.expression,
            _ => expr,
        }
    }

    fn parse<'a>(allocator: &'a Allocator, source: &'a str) -> oxc_ast::ast::Program<'a> {
        let ret = Parser::new(allocator, source, SourceType::ts()).parse();
        assert!(ret.errors.is_empty(), "should parse: {:?}", ret.errors);
        ret.program
    }

    #[test]
    fn test_literal_yields_itself() {
        let allocator = Allocator::default();
        let program = parse(&allocator, "42;");
        let candidates = flatten(last_expression(&program), &NoResolver);
        assert_eq!(candidates.len(), 1);
        assert!(matches!(candidates[0], Expression::NumericLiteral(_)));
    }

    #[test]
    fn test_conditional_yields_both_branches() {
        let allocator = Allocator::default();
        let program = parse(&allocator, "x ? ({ a: 1 }) : 'other';");
        let candidates = flatten(last_expression(&program), &NoResolver);
        assert_eq!(candidates.len(), 2);
        assert!(matches!(candidates[0], Expression::ObjectExpression(_)));
        assert!(matches!(candidates[1], Expression::StringLiteral(_)));
    }

    #[test]
    fn test_unresolved_identifier_yields_itself() {
        let allocator = Allocator::default();
        let program = parse(&allocator, "mystery;");
        let candidates = flatten(last_expression(&program), &NoResolver);
        assert_eq!(candidates.len(), 1);
        assert!(matches!(candidates[0], Expression::Identifier(_)));
    }

    #[test]
    fn test_const_identifier_resolves_through_initializer() {
        let allocator = Allocator::default();
        let program = parse(&allocator, "const shapes = { a: 1 };\nshapes;");
        let semantic = SemanticBuilder::new().build(&program).semantic;
        let resolver = SemanticResolver::new(&semantic);
        let candidates = flatten(last_expression(&program), &resolver);
        assert_eq!(candidates.len(), 1);
        assert!(matches!(candidates[0], Expression::ObjectExpression(_)));
    }

    #[test]
    fn test_let_binding_stays_opaque() {
        let allocator = Allocator::default();
        let program = parse(&allocator, "let shapes = { a: 1 };\nshapes;");
        let semantic = SemanticBuilder::new().build(&program).semantic;
        let resolver = SemanticResolver::new(&semantic);
        let candidates = flatten(last_expression(&program), &resolver);
        assert_eq!(candidates.len(), 1);
        assert!(matches!(candidates[0], Expression::Identifier(_)));
    }

    #[test]
    fn test_self_referential_const_stays_opaque() {
        let allocator = Allocator::default();
        let program = parse(&allocator, "const a = a;\na;");
        let semantic = SemanticBuilder::new().build(&program).semantic;
        let resolver = SemanticResolver::new(&semantic);
        let candidates = flatten(last_expression(&program), &resolver);
        assert_eq!(candidates.len(), 1);
        assert!(matches!(candidates[0], Expression::Identifier(_)));
    }

    #[test]
    fn test_destructured_const_stays_opaque() {
        let allocator = Allocator::default();
        let program = parse(&allocator, "const { shapes } = source;\nshapes;");
        let semantic = SemanticBuilder::new().build(&program).semantic;
        let resolver = SemanticResolver::new(&semantic);
        let candidates = flatten(last_expression(&program), &resolver);
        assert!(matches!(candidates[0], Expression::Identifier(_)));
    }

    #[test]
    fn test_nested_const_and_conditional() {
        let allocator = Allocator::default();
        let program = parse(
            &allocator,
            "const a = { x: 1 };\nconst b = flag ? a : { y: 2 };\nb;",
        );
        let semantic = SemanticBuilder::new().build(&program).semantic;
        let resolver = SemanticResolver::new(&semantic);
        let candidates = flatten(last_expression(&program), &resolver);
        assert_eq!(candidates.len(), 2);
        assert!(candidates
            .iter()
            .all(|c| matches!(c, Expression::ObjectExpression(_))));
    }

    #[test]
    fn test_walk_object_direct_properties() {
        let allocator = Allocator::default();
        let program = parse(&allocator, "({ a: 1, b() {} });");
        let Expression::ObjectExpression(object) = last_expression(&program) else {
            panic!("expected object");
        };
        let shape = walk_object(object, &NoResolver);
        assert!(!shape.has_unknown);
        let names: Vec<_> = shape
            .properties
            .iter()
            .filter_map(|p| match p {
                LogicalProperty::Named(p) => property_key_name(&p.key),
                LogicalProperty::Opaque(_) => None,
            })
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_walk_object_resolved_spread() {
        let allocator = Allocator::default();
        let program = parse(&allocator, "const base = { a: 1 };\n({ ...base, b: 2 });");
        let semantic = SemanticBuilder::new().build(&program).semantic;
        let resolver = SemanticResolver::new(&semantic);
        let Expression::ObjectExpression(object) = last_expression(&program) else {
            panic!("expected object");
        };
        let shape = walk_object(object, &resolver);
        assert!(!shape.has_unknown);
        assert_eq!(shape.properties.len(), 2);
    }

    #[test]
    fn test_walk_object_opaque_spread() {
        let allocator = Allocator::default();
        let program = parse(&allocator, "({ ...unknown, b: 2 });");
        let Expression::ObjectExpression(object) = last_expression(&program) else {
            panic!("expected object");
        };
        let shape = walk_object(object, &NoResolver);
        assert!(shape.has_unknown);
        assert!(shape
            .properties
            .iter()
            .any(|p| matches!(p, LogicalProperty::Opaque(_))));
    }
}
