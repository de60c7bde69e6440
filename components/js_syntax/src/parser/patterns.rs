//! Binding patterns and assignment targets

use core_types::SyntaxResult;

use super::expressions::is_simple_target;
use super::{IdentifierKind, Parser};
use crate::ast::{
    ArrayExpression, ArrayPattern, AssignmentExpression, AssignmentOperator, AssignmentPattern,
    AssignmentProperty, Expression, ObjectExpression, ObjectPattern, ParenthesizedExpression,
    Pattern, PropertyKind, RestElement, SpreadElement,
};

impl Parser {
    /// Identifier, array pattern or object pattern in a declaration or
    /// parameter list
    pub(super) fn parse_binding_target(&mut self) -> SyntaxResult<Pattern> {
        self.nested(|parser| {
            if parser.at("[")? {
                return parser.parse_array_binding_pattern();
            }
            if parser.at("{")? {
                return parser.parse_object_binding_pattern();
            }
            match parser.parse_identifier(IdentifierKind::Binding, None)? {
                Some(identifier) => Ok(Pattern::Identifier(identifier)),
                None => parser.unexpected(),
            }
        })
    }

    /// Binding target with an optional `= default`
    pub(super) fn parse_binding_element(&mut self) -> SyntaxResult<Pattern> {
        let start = self.start_position()?;
        let target = self.parse_binding_target()?;
        if self.scanner.consume("=")?.is_none() {
            return Ok(target);
        }
        let right = self.parse_assignment_expression(true)?;
        Ok(Pattern::AssignmentPattern(Box::new(AssignmentPattern {
            left: target,
            right,
            loc: self.finish(start),
        })))
    }

    fn parse_array_binding_pattern(&mut self) -> SyntaxResult<Pattern> {
        let start = self.expect("[")?.location().start;
        let mut elements = Vec::new();
        while !self.at("]")? {
            if self.scanner.consume(",")?.is_some() {
                elements.push(None);
                continue;
            }
            if let Some(token) = self.scanner.consume("...")? {
                let argument = self.parse_binding_target()?;
                elements.push(Some(Pattern::RestElement(Box::new(RestElement {
                    argument,
                    loc: self.finish(token.location().start),
                }))));
                break;
            }
            elements.push(Some(self.parse_binding_element()?));
            if !self.at("]")? {
                self.expect(",")?;
            }
        }
        self.expect("]")?;
        Ok(Pattern::ArrayPattern(Box::new(ArrayPattern {
            elements,
            loc: self.finish(start),
        })))
    }

    fn parse_object_binding_pattern(&mut self) -> SyntaxResult<Pattern> {
        let start = self.expect("{")?.location().start;
        let mut properties = Vec::new();
        while !self.at("}")? {
            properties.push(self.parse_binding_property()?);
            if !self.at("}")? {
                self.expect(",")?;
            }
        }
        self.expect("}")?;
        Ok(Pattern::ObjectPattern(Box::new(ObjectPattern {
            properties,
            loc: self.finish(start),
        })))
    }

    fn parse_binding_property(&mut self) -> SyntaxResult<AssignmentProperty> {
        let start = self.start_position()?;
        let shorthand = !self.at("[")? && !self.next_value_is(&[":"])?;
        if shorthand {
            let key = self.expect_identifier(IdentifierKind::Binding)?;
            let mut value = Pattern::Identifier(key.clone());
            if self.scanner.consume("=")?.is_some() {
                let right = self.parse_assignment_expression(true)?;
                value = Pattern::AssignmentPattern(Box::new(AssignmentPattern {
                    left: value,
                    right,
                    loc: self.finish(start),
                }));
            }
            return Ok(AssignmentProperty {
                key: Expression::Identifier(key),
                value,
                shorthand: true,
                computed: false,
                loc: self.finish(start),
            });
        }

        let (key, computed) = self.parse_property_name()?;
        self.expect(":")?;
        let value = self.parse_binding_element()?;
        Ok(AssignmentProperty {
            key,
            value,
            shorthand: false,
            computed,
            loc: self.finish(start),
        })
    }

    /// Reinterpret an already parsed expression as an assignment target.
    ///
    /// Array and object literals become destructuring patterns only when
    /// `allow_destructuring` is set; compound assignments and update
    /// operators need a simple target.
    pub(super) fn expression_to_pattern(
        &self,
        expression: Expression,
        allow_destructuring: bool,
    ) -> SyntaxResult<Pattern> {
        let position = expression.loc().start;
        crate::stack::grow(|| match expression {
            Expression::Identifier(identifier) => {
                if self.scanner.is_strict_mode()
                    && matches!(identifier.name.as_str(), "eval" | "arguments")
                {
                    return self.error_at("Unexpected eval or arguments in strict mode", position);
                }
                Ok(Pattern::Identifier(identifier))
            }
            Expression::MemberExpression(member) => Ok(Pattern::MemberExpression(member)),
            Expression::ParenthesizedExpression(inner) if is_simple_target(&inner.expression) => {
                let ParenthesizedExpression { expression, .. } = *inner;
                self.expression_to_pattern(expression, false)
            }
            Expression::ArrayExpression(array) if allow_destructuring => self.array_to_pattern(*array),
            Expression::ObjectExpression(object) if allow_destructuring => {
                self.object_to_pattern(*object)
            }
            _ => self.error_at("Invalid assignment target", position),
        })
    }

    fn array_to_pattern(&self, array: ArrayExpression) -> SyntaxResult<Pattern> {
        let count = array.elements.len();
        let mut elements = Vec::with_capacity(count);
        for (index, element) in array.elements.into_iter().enumerate() {
            let pattern = match element {
                None => None,
                Some(Expression::SpreadElement(spread)) => {
                    if index + 1 != count {
                        return self.error_at("Rest element must be last element", spread.loc.start);
                    }
                    let SpreadElement { argument, loc } = *spread;
                    Some(Pattern::RestElement(Box::new(RestElement {
                        argument: self.expression_to_pattern(argument, true)?,
                        loc,
                    })))
                }
                Some(expression) => Some(self.element_to_pattern(expression)?),
            };
            elements.push(pattern);
        }
        Ok(Pattern::ArrayPattern(Box::new(ArrayPattern {
            elements,
            loc: array.loc,
        })))
    }

    fn object_to_pattern(&self, object: ObjectExpression) -> SyntaxResult<Pattern> {
        let mut properties = Vec::with_capacity(object.properties.len());
        for property in object.properties {
            if property.method || property.kind != PropertyKind::Init {
                return self.error_at("Invalid destructuring assignment target", property.loc.start);
            }
            properties.push(AssignmentProperty {
                key: property.key,
                value: self.element_to_pattern(property.value)?,
                shorthand: property.shorthand,
                computed: property.computed,
                loc: property.loc,
            });
        }
        Ok(Pattern::ObjectPattern(Box::new(ObjectPattern {
            properties,
            loc: object.loc,
        })))
    }

    /// Array element or property value: `target` or `target = default`
    fn element_to_pattern(&self, expression: Expression) -> SyntaxResult<Pattern> {
        match expression {
            Expression::AssignmentExpression(assignment)
                if assignment.operator == AssignmentOperator::Assign =>
            {
                let AssignmentExpression { left, right, loc, .. } = *assignment;
                Ok(Pattern::AssignmentPattern(Box::new(AssignmentPattern {
                    left,
                    right,
                    loc,
                })))
            }
            other => self.expression_to_pattern(other, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::{ParseOptions, Parser};

    fn parse(source: &str) -> core_types::SyntaxResult<Program> {
        Parser::new(source, ParseOptions::default()).parse()
    }

    fn declarator_id(source: &str) -> Pattern {
        match parse(source).expect("Failed to parse").body.remove(0) {
            Statement::VariableDeclaration(mut declaration) => declaration.declarations.remove(0).id,
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_array_binding_pattern() {
        match declarator_id("var [a, , b = 1, ...rest] = list;") {
            Pattern::ArrayPattern(array) => {
                assert_eq!(array.elements.len(), 4);
                assert!(array.elements[1].is_none());
                assert!(matches!(array.elements[2], Some(Pattern::AssignmentPattern(_))));
                assert!(matches!(array.elements[3], Some(Pattern::RestElement(_))));
            }
            other => panic!("expected array pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_object_binding_pattern() {
        match declarator_id("let {a, b: {c}, d = 2, [key]: e} = obj;") {
            Pattern::ObjectPattern(object) => {
                let shorthand: Vec<bool> = object.properties.iter().map(|p| p.shorthand).collect();
                assert_eq!(shorthand, vec![true, false, true, false]);
                assert!(matches!(object.properties[1].value, Pattern::ObjectPattern(_)));
                assert!(matches!(object.properties[2].value, Pattern::AssignmentPattern(_)));
                assert!(object.properties[3].computed);
            }
            other => panic!("expected object pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_rest_must_be_last() {
        assert!(parse("var [...a, b] = c;").is_err());
        let err = parse("[...a, b] = c;").unwrap_err();
        assert_eq!(err.message, "Rest element must be last element");
    }

    #[test]
    fn test_destructuring_assignment() {
        let program = parse("[a, {b, c: d = 1}] = value;").unwrap();
        match &program.body[0] {
            Statement::ExpressionStatement(statement) => match &statement.expression {
                Expression::AssignmentExpression(assignment) => {
                    assert!(matches!(assignment.left, Pattern::ArrayPattern(_)));
                }
                other => panic!("expected assignment, got {:?}", other),
            },
            other => panic!("expected expression statement, got {:?}", other),
        }
        assert!(parse("({a = 1} = obj);").is_ok());
    }

    #[test]
    fn test_invalid_targets() {
        assert_eq!(parse("a + b = c;").unwrap_err().message, "Invalid assignment target");
        assert_eq!(parse("f() = 1;").unwrap_err().message, "Invalid assignment target");
        assert!(parse("[a] += 1;").is_err());
        assert!(parse("({ m() {} } = obj);").is_err());
        assert!(parse("(a) = 1; (a.b) = 2;").is_ok());
    }

    #[test]
    fn test_strict_eval_target() {
        assert!(parse("eval = 1;").is_ok());
        assert!(parse("'use strict'; eval = 1;").is_err());
    }
}
