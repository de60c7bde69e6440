//! Expressions, from comma sequences down to primary expressions

use core_types::{Position, SourceLocation, SyntaxResult};

use super::{IdentifierKind, Parser};
use crate::ast::{
    ArrayExpression, AssignmentExpression, AssignmentOperator, BinaryExpression, BinaryOperator,
    CallExpression, ConditionalExpression, Expression, Identifier, Literal, LiteralValue,
    LogicalExpression, LogicalOperator, MemberExpression, MetaProperty, MethodKind, NewExpression,
    ObjectExpression, ParenthesizedExpression, Pattern, Property, PropertyKind, RegExpLiteral,
    SequenceExpression, SpreadElement, Super, TaggedTemplateExpression, TemplateElement,
    TemplateLiteral, ThisExpression, UnaryExpression, UnaryOperator, UpdateExpression,
    UpdateOperator, YieldExpression,
};
use crate::literal::{numeric_value, unescape};
use crate::scanner::Lookahead;
use crate::token::{Token, TokenKind};

/// Operator in a flat binary run, before precedence collapse
#[derive(Debug, Clone, Copy)]
enum RunOperator {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

impl RunOperator {
    fn from_token(value: &str) -> Option<Self> {
        LogicalOperator::from_token(value)
            .map(RunOperator::Logical)
            .or_else(|| BinaryOperator::from_token(value).map(RunOperator::Binary))
    }

    /// Precedence grade, higher binds tighter
    fn grade(self) -> u8 {
        use BinaryOperator::*;
        match self {
            RunOperator::Logical(LogicalOperator::Or) => 0,
            RunOperator::Logical(LogicalOperator::And) => 1,
            RunOperator::Binary(op) => match op {
                BitwiseOr => 2,
                BitwiseXor => 3,
                BitwiseAnd => 4,
                Eq | NotEq | StrictEq | StrictNotEq => 5,
                Lt | LtEq | Gt | GtEq | Instanceof | In => 6,
                LeftShift | RightShift | UnsignedRightShift => 7,
                Add | Sub => 8,
                Mul | Div | Mod => 9,
            },
        }
    }
}

/// Reduce a flat operand/operator run into a left-associative tree.
///
/// The leftmost occurrence of the highest remaining grade is collapsed
/// first, until a single operand is left.
fn collapse(first: Expression, rest: Vec<(RunOperator, Expression)>) -> Expression {
    let mut operands = vec![first];
    let mut operators = Vec::with_capacity(rest.len());
    for (operator, operand) in rest {
        operators.push(operator);
        operands.push(operand);
    }

    while let Some(top) = operators.iter().map(|op| op.grade()).max() {
        let Some(index) = operators.iter().position(|op| op.grade() == top) else {
            break;
        };
        let operator = operators.remove(index);
        let right = operands.remove(index + 1);
        let left = operands.remove(index);
        let loc = SourceLocation::new(left.loc().start, right.loc().end);
        let node = match operator {
            RunOperator::Binary(operator) => Expression::BinaryExpression(Box::new(BinaryExpression {
                operator,
                left,
                right,
                loc,
            })),
            RunOperator::Logical(operator) => {
                Expression::LogicalExpression(Box::new(LogicalExpression {
                    operator,
                    left,
                    right,
                    loc,
                }))
            }
        };
        operands.insert(index, node);
    }
    operands.swap_remove(0)
}

/// Tokens after which `yield` has no argument
const YIELD_TERMINATORS: [Lookahead<'static>; 6] = [
    Lookahead::One(")"),
    Lookahead::One("]"),
    Lookahead::One("}"),
    Lookahead::One(","),
    Lookahead::One(";"),
    Lookahead::One(":"),
];

/// Build a literal node from a literal token
pub(super) fn literal_from_token(token: &Token) -> Literal {
    let raw = token.value();
    let value = match token.kind() {
        TokenKind::NullLiteral => LiteralValue::Null,
        TokenKind::BooleanLiteral => LiteralValue::Boolean(raw == "true"),
        TokenKind::NumericLiteral => LiteralValue::Number(numeric_value(raw)),
        _ => LiteralValue::String(unescape(&raw[1..raw.len() - 1])),
    };
    Literal {
        value,
        raw: raw.to_string(),
        loc: token.location(),
    }
}

impl Parser {
    /// Comma-separated expression
    pub(super) fn parse_expression(&mut self, allow_in: bool) -> SyntaxResult<Expression> {
        let first = self.parse_assignment_expression(allow_in)?;
        if !self.at(",")? {
            return Ok(first);
        }
        let start = first.loc().start;
        let mut expressions = vec![first];
        while self.scanner.consume(",")?.is_some() {
            expressions.push(self.parse_assignment_expression(allow_in)?);
        }
        Ok(Expression::SequenceExpression(Box::new(SequenceExpression {
            expressions,
            loc: self.finish(start),
        })))
    }

    pub(super) fn parse_assignment_expression(&mut self, allow_in: bool) -> SyntaxResult<Expression> {
        self.nested(|parser| parser.parse_assignment_inner(allow_in))
    }

    fn parse_assignment_inner(&mut self, allow_in: bool) -> SyntaxResult<Expression> {
        if self.context.in_generator && self.at("yield")? {
            return self.parse_yield_expression(allow_in);
        }
        if let Some(arrow) = self.parse_arrow_function(allow_in)? {
            return Ok(arrow);
        }

        let left = self.parse_conditional_expression(allow_in)?;
        let operator = match self.scanner.get_token()? {
            Some(token) if token.kind() == TokenKind::Punctuator => {
                AssignmentOperator::from_token(token.value())
            }
            _ => None,
        };
        let Some(operator) = operator else {
            return Ok(left);
        };

        self.scanner.consume_token()?;
        let start = left.loc().start;
        let left = self.expression_to_pattern(left, operator == AssignmentOperator::Assign)?;
        let right = self.parse_assignment_expression(allow_in)?;
        Ok(Expression::AssignmentExpression(Box::new(AssignmentExpression {
            operator,
            left,
            right,
            loc: self.finish(start),
        })))
    }

    fn parse_yield_expression(&mut self, allow_in: bool) -> SyntaxResult<Expression> {
        let start = self.expect("yield")?.location().start;
        let mut delegate = false;
        let mut argument = None;
        if self.scanner.no_line_terminators()? {
            if self.scanner.consume("*")?.is_some() {
                delegate = true;
                argument = Some(self.parse_assignment_expression(allow_in)?);
            } else if !self.scanner.is_before(&YIELD_TERMINATORS, false)? {
                argument = Some(self.parse_assignment_expression(allow_in)?);
            }
        }
        Ok(Expression::YieldExpression(Box::new(YieldExpression {
            argument,
            delegate,
            loc: self.finish(start),
        })))
    }

    fn parse_conditional_expression(&mut self, allow_in: bool) -> SyntaxResult<Expression> {
        let test = self.parse_binary_expression(allow_in)?;
        if self.scanner.consume("?")?.is_none() {
            return Ok(test);
        }
        let consequent = self.parse_assignment_expression(true)?;
        self.expect(":")?;
        let alternate = self.parse_assignment_expression(allow_in)?;
        let start = test.loc().start;
        Ok(Expression::ConditionalExpression(Box::new(ConditionalExpression {
            test,
            consequent,
            alternate,
            loc: self.finish(start),
        })))
    }

    /// Flat run of unary operands joined by binary and logical operators
    fn parse_binary_expression(&mut self, allow_in: bool) -> SyntaxResult<Expression> {
        let first = self.parse_unary_expression()?;
        let mut rest = Vec::new();
        loop {
            let operator = match self.scanner.get_token()? {
                Some(token)
                    if matches!(token.kind(), TokenKind::Punctuator | TokenKind::Keyword)
                        && (allow_in || token.value() != "in") =>
                {
                    RunOperator::from_token(token.value())
                }
                _ => None,
            };
            let Some(operator) = operator else {
                break;
            };
            self.scanner.consume_token()?;
            rest.push((operator, self.parse_unary_expression()?));
        }
        Ok(collapse(first, rest))
    }

    fn parse_unary_expression(&mut self) -> SyntaxResult<Expression> {
        self.nested(|parser| parser.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> SyntaxResult<Expression> {
        let token = match self.scanner.get_token()? {
            Some(token) => token.clone(),
            None => return self.unexpected(),
        };
        let start = token.location().start;
        let is_operator_token = matches!(token.kind(), TokenKind::Punctuator | TokenKind::Keyword);

        if is_operator_token {
            if let Some(operator) = UnaryOperator::from_token(token.value()) {
                self.scanner.consume_token()?;
                let argument = self.parse_unary_expression()?;
                if operator == UnaryOperator::Delete
                    && self.scanner.is_strict_mode()
                    && matches!(argument, Expression::Identifier(_))
                {
                    return self.error_at("Delete of an unqualified identifier in strict mode", start);
                }
                return Ok(Expression::UnaryExpression(Box::new(UnaryExpression {
                    operator,
                    argument,
                    loc: self.finish(start),
                })));
            }
            if let Some(operator) = UpdateOperator::from_token(token.value()) {
                self.scanner.consume_token()?;
                let argument = self.parse_unary_expression()?;
                self.check_update_target(&argument)?;
                return Ok(Expression::UpdateExpression(Box::new(UpdateExpression {
                    operator,
                    prefix: true,
                    argument,
                    loc: self.finish(start),
                })));
            }
        }

        let argument = self.parse_left_hand_side_expression()?;
        let postfix = match self.scanner.get_token()? {
            Some(token) if token.kind() == TokenKind::Punctuator => {
                UpdateOperator::from_token(token.value())
            }
            _ => None,
        };
        match postfix {
            // A line terminator before `++`/`--` ends the statement instead
            Some(operator) if self.scanner.no_line_terminators()? => {
                self.check_update_target(&argument)?;
                self.scanner.consume_token()?;
                Ok(Expression::UpdateExpression(Box::new(UpdateExpression {
                    operator,
                    prefix: false,
                    argument,
                    loc: self.finish(start),
                })))
            }
            _ => Ok(argument),
        }
    }

    fn check_update_target(&self, argument: &Expression) -> SyntaxResult<()> {
        if is_simple_target(argument) {
            Ok(())
        } else {
            self.error_at("Invalid left-hand side expression in update operation", argument.loc().start)
        }
    }

    /// `new`, call, member and tagged template chains
    pub(super) fn parse_left_hand_side_expression(&mut self) -> SyntaxResult<Expression> {
        let mut new_starts: Vec<Position> = Vec::new();
        let mut object = None;
        while let Some(token) = self.scanner.consume("new")? {
            if self.scanner.consume(".")?.is_some() {
                object = Some(self.parse_meta_property(&token)?);
                break;
            }
            new_starts.push(token.location().start);
        }

        let mut expression = match object {
            Some(object) => object,
            None => match self.parse_super()? {
                Some(expression) => expression,
                None => match self.parse_primary_expression()? {
                    Some(expression) => expression,
                    None => return self.unexpected(),
                },
            },
        };

        loop {
            let start = expression.loc().start;
            if self.scanner.consume(".")?.is_some() {
                let property = self.expect_identifier(IdentifierKind::Name)?;
                expression = Expression::MemberExpression(Box::new(MemberExpression {
                    object: expression,
                    property: Expression::Identifier(property),
                    computed: false,
                    loc: self.finish(start),
                }));
            } else if self.scanner.consume("[")?.is_some() {
                let property = self.parse_expression(true)?;
                self.expect("]")?;
                expression = Expression::MemberExpression(Box::new(MemberExpression {
                    object: expression,
                    property,
                    computed: true,
                    loc: self.finish(start),
                }));
            } else if self.at_template_start()? {
                let quasi = self.parse_template_literal()?;
                expression = Expression::TaggedTemplateExpression(Box::new(TaggedTemplateExpression {
                    tag: expression,
                    quasi,
                    loc: self.finish(start),
                }));
            } else if self.at("(")? {
                let arguments = self.parse_arguments()?;
                expression = match new_starts.pop() {
                    Some(new_start) => Expression::NewExpression(Box::new(NewExpression {
                        callee: expression,
                        arguments,
                        loc: self.finish(new_start),
                    })),
                    None => Expression::CallExpression(Box::new(CallExpression {
                        callee: expression,
                        arguments,
                        loc: self.finish(start),
                    })),
                };
            } else {
                break;
            }
        }

        while let Some(new_start) = new_starts.pop() {
            expression = Expression::NewExpression(Box::new(NewExpression {
                callee: expression,
                arguments: Vec::new(),
                loc: self.finish(new_start),
            }));
        }
        Ok(expression)
    }

    /// `new.target`, after `new .`
    fn parse_meta_property(&mut self, new_token: &Token) -> SyntaxResult<Expression> {
        if !self.at_contextual("target")? {
            return self.unexpected();
        }
        let property = self.expect_identifier(IdentifierKind::Name)?;
        let meta = Identifier {
            name: "new".to_string(),
            loc: new_token.location(),
        };
        Ok(Expression::MetaProperty(Box::new(MetaProperty {
            meta,
            property,
            loc: self.finish(new_token.location().start),
        })))
    }

    /// `super(...)`, `super.name` or `super[expr]`
    fn parse_super(&mut self) -> SyntaxResult<Option<Expression>> {
        let Some(token) = self.scanner.consume("super")? else {
            return Ok(None);
        };
        let start = token.location().start;
        let callee = Expression::Super(Super {
            loc: token.location(),
        });

        if self.at("(")? {
            let arguments = self.parse_arguments()?;
            return Ok(Some(Expression::CallExpression(Box::new(CallExpression {
                callee,
                arguments,
                loc: self.finish(start),
            }))));
        }

        let (property, computed) = if self.scanner.consume(".")?.is_some() {
            (Expression::Identifier(self.expect_identifier(IdentifierKind::Name)?), false)
        } else if self.scanner.consume("[")?.is_some() {
            let property = self.parse_expression(true)?;
            self.expect("]")?;
            (property, true)
        } else {
            return self.unexpected();
        };
        Ok(Some(Expression::MemberExpression(Box::new(MemberExpression {
            object: callee,
            property,
            computed,
            loc: self.finish(start),
        }))))
    }

    /// Parenthesized argument list, spread allowed
    pub(super) fn parse_arguments(&mut self) -> SyntaxResult<Vec<Expression>> {
        self.expect("(")?;
        let mut arguments = Vec::new();
        while !self.at(")")? {
            arguments.push(self.parse_spread_or_assignment()?);
            if !self.at(")")? {
                self.expect(",")?;
                if self.at(")")? {
                    return self.unexpected();
                }
            }
        }
        self.expect(")")?;
        Ok(arguments)
    }

    fn parse_spread_or_assignment(&mut self) -> SyntaxResult<Expression> {
        match self.scanner.consume("...")? {
            Some(token) => {
                let argument = self.parse_assignment_expression(true)?;
                Ok(Expression::SpreadElement(Box::new(SpreadElement {
                    argument,
                    loc: self.finish(token.location().start),
                })))
            }
            None => self.parse_assignment_expression(true),
        }
    }

    /// Primary expression, or `None` when the current token cannot start one
    fn parse_primary_expression(&mut self) -> SyntaxResult<Option<Expression>> {
        let token = match self.scanner.get_token()? {
            Some(token) => token.clone(),
            None => return Ok(None),
        };

        let expression = match (token.kind(), token.value()) {
            (TokenKind::Keyword, "this") => {
                self.scanner.consume_token()?;
                Expression::ThisExpression(ThisExpression {
                    loc: token.location(),
                })
            }
            (TokenKind::Keyword, "function") => {
                Expression::FunctionExpression(Box::new(self.parse_function(false, false)?))
            }
            (TokenKind::Keyword, "class") => {
                Expression::ClassExpression(Box::new(self.parse_class(false, false)?))
            }
            (TokenKind::Identifier | TokenKind::Keyword, _) => {
                match self.parse_identifier(IdentifierKind::Binding, None)? {
                    Some(identifier) => Expression::Identifier(identifier),
                    None => return Ok(None),
                }
            }
            (
                TokenKind::NullLiteral
                | TokenKind::BooleanLiteral
                | TokenKind::NumericLiteral
                | TokenKind::StringLiteral,
                _,
            ) => {
                self.scanner.consume_token()?;
                Expression::Literal(Box::new(literal_from_token(&token)))
            }
            (TokenKind::Template, value) if value.starts_with('`') => {
                Expression::TemplateLiteral(Box::new(self.parse_template_literal()?))
            }
            (TokenKind::Punctuator, "[") => self.parse_array_literal()?,
            (TokenKind::Punctuator, "{") => self.parse_object_literal()?,
            (TokenKind::Punctuator, "(") => {
                self.scanner.consume_token()?;
                let expression = self.parse_expression(true)?;
                self.expect(")")?;
                Expression::ParenthesizedExpression(Box::new(ParenthesizedExpression {
                    expression,
                    loc: self.finish(token.location().start),
                }))
            }
            (TokenKind::Punctuator, "/" | "/=") => {
                let Some(regexp) = self.scanner.reconsume_current_token_as_regexp()? else {
                    return Ok(None);
                };
                self.scanner.consume_token()?;
                Expression::RegExpLiteral(Box::new(RegExpLiteral {
                    raw: regexp.value().to_string(),
                    loc: regexp.location(),
                }))
            }
            _ => return Ok(None),
        };
        Ok(Some(expression))
    }

    fn parse_array_literal(&mut self) -> SyntaxResult<Expression> {
        let start = self.expect("[")?.location().start;
        let mut elements = Vec::new();
        while !self.at("]")? {
            if self.scanner.consume(",")?.is_some() {
                elements.push(None);
                continue;
            }
            elements.push(Some(self.parse_spread_or_assignment()?));
            if !self.at("]")? {
                self.expect(",")?;
            }
        }
        self.expect("]")?;
        Ok(Expression::ArrayExpression(Box::new(ArrayExpression {
            elements,
            loc: self.finish(start),
        })))
    }

    fn parse_object_literal(&mut self) -> SyntaxResult<Expression> {
        let start = self.expect("{")?.location().start;
        let mut properties = Vec::new();
        while !self.at("}")? {
            properties.push(self.parse_property_definition()?);
            if !self.at("}")? {
                self.expect(",")?;
            }
        }
        self.expect("}")?;
        Ok(Expression::ObjectExpression(Box::new(ObjectExpression {
            properties,
            loc: self.finish(start),
        })))
    }

    fn parse_property_definition(&mut self) -> SyntaxResult<Property> {
        let start = self.start_position()?;

        let shorthand = matches!(
            self.scanner.get_token()?,
            Some(token) if token.is_identifier_name()
        ) && self.next_value_is(&[",", "}", "="])?;
        if shorthand {
            let Some(key) = self.parse_identifier(IdentifierKind::Binding, None)? else {
                return self.unexpected();
            };
            let value = match self.scanner.consume("=")? {
                Some(_) => {
                    let right = self.parse_assignment_expression(true)?;
                    Expression::AssignmentExpression(Box::new(AssignmentExpression {
                        operator: AssignmentOperator::Assign,
                        left: Pattern::Identifier(key.clone()),
                        right,
                        loc: self.finish(start),
                    }))
                }
                None => Expression::Identifier(key.clone()),
            };
            return Ok(Property {
                key: Expression::Identifier(key),
                value,
                kind: PropertyKind::Init,
                method: false,
                shorthand: true,
                computed: false,
                loc: self.finish(start),
            });
        }

        if self.at("*")? || self.is_accessor_prefix(&["(", ",", "}", ":", "="])? {
            let method = self.parse_method(false)?;
            let kind = match method.kind {
                MethodKind::Get => PropertyKind::Get,
                MethodKind::Set => PropertyKind::Set,
                _ => PropertyKind::Init,
            };
            return Ok(Property {
                key: method.key,
                value: Expression::FunctionExpression(Box::new(method.value)),
                kind,
                method: kind == PropertyKind::Init,
                shorthand: false,
                computed: method.computed,
                loc: self.finish(start),
            });
        }

        let (key, computed) = self.parse_property_name()?;
        if self.at("(")? {
            let value = self.parse_method_function(false, None)?;
            return Ok(Property {
                key,
                value: Expression::FunctionExpression(Box::new(value)),
                kind: PropertyKind::Init,
                method: true,
                shorthand: false,
                computed,
                loc: self.finish(start),
            });
        }
        self.expect(":")?;
        let value = self.parse_assignment_expression(true)?;
        Ok(Property {
            key,
            value,
            kind: PropertyKind::Init,
            method: false,
            shorthand: false,
            computed,
            loc: self.finish(start),
        })
    }

    /// Property name of an object member, method or pattern property.
    /// Returns the key and whether it is computed.
    pub(super) fn parse_property_name(&mut self) -> SyntaxResult<(Expression, bool)> {
        let token = match self.scanner.get_token()? {
            Some(token) => token.clone(),
            None => return self.unexpected(),
        };
        match token.kind() {
            TokenKind::StringLiteral | TokenKind::NumericLiteral => {
                self.scanner.consume_token()?;
                Ok((Expression::Literal(Box::new(literal_from_token(&token))), false))
            }
            TokenKind::Punctuator if token.value() == "[" => {
                self.scanner.consume_token()?;
                let key = self.parse_assignment_expression(true)?;
                self.expect("]")?;
                Ok((key, true))
            }
            _ => Ok((Expression::Identifier(self.expect_identifier(IdentifierKind::Name)?), false)),
        }
    }

    fn at_template_start(&mut self) -> SyntaxResult<bool> {
        Ok(matches!(
            self.scanner.get_token()?,
            Some(token) if token.kind() == TokenKind::Template && token.value().starts_with('`')
        ))
    }

    /// Template literal starting at a `` ` `` template token
    fn parse_template_literal(&mut self) -> SyntaxResult<TemplateLiteral> {
        let start = self.start_position()?;
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            let token = match self.scanner.get_token()? {
                Some(token) if token.kind() == TokenKind::Template => token.clone(),
                _ => return self.unexpected(),
            };
            let opening = quasis.is_empty();
            if token.value().starts_with('`') != opening {
                return self.unexpected();
            }
            self.scanner.consume_token()?;

            let value = token.value();
            let tail = value.len() >= 2 && value.ends_with('`');
            let raw = if tail {
                &value[1..value.len() - 1]
            } else {
                &value[1..value.len() - 2]
            };
            quasis.push(TemplateElement::new(raw, tail, token.location()));
            if tail {
                break;
            }
            expressions.push(self.parse_expression(true)?);
        }
        Ok(TemplateLiteral {
            quasis,
            expressions,
            loc: self.finish(start),
        })
    }
}

/// Identifier or member expression, optionally parenthesized
pub(super) fn is_simple_target(expression: &Expression) -> bool {
    match expression {
        Expression::Identifier(_) | Expression::MemberExpression(_) => true,
        Expression::ParenthesizedExpression(inner) => is_simple_target(&inner.expression),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::{ParseOptions, Parser};

    fn expression(source: &str) -> Expression {
        let program = Parser::new(source, ParseOptions::default())
            .parse()
            .expect("Failed to parse");
        match program.body.into_iter().next() {
            Some(Statement::ExpressionStatement(statement)) => statement.expression,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_collapse() {
        match expression("a || b && c") {
            Expression::LogicalExpression(root) => {
                assert_eq!(root.operator, LogicalOperator::Or);
                match &root.right {
                    Expression::LogicalExpression(right) => assert_eq!(right.operator, LogicalOperator::And),
                    other => panic!("expected &&, got {:?}", other),
                }
            }
            other => panic!("expected logical expression, got {:?}", other),
        }
    }

    #[test]
    fn test_left_associativity() {
        match expression("a - b - c") {
            Expression::BinaryExpression(root) => {
                assert_eq!(root.operator, BinaryOperator::Sub);
                assert_eq!(root.left.type_name(), "BinaryExpression");
                assert_eq!(root.right.type_name(), "Identifier");
            }
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_grades() {
        match expression("a + b * c << d") {
            Expression::BinaryExpression(root) => {
                assert_eq!(root.operator, BinaryOperator::LeftShift);
                match &root.left {
                    Expression::BinaryExpression(add) => {
                        assert_eq!(add.operator, BinaryOperator::Add);
                        assert_eq!(add.right.type_name(), "BinaryExpression");
                    }
                    other => panic!("expected +, got {:?}", other),
                }
            }
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_division_and_regexp() {
        match expression("1/2") {
            Expression::BinaryExpression(root) => assert_eq!(root.operator, BinaryOperator::Div),
            other => panic!("expected division, got {:?}", other),
        }
        match expression("/a[/]b/gi.test(s)") {
            Expression::CallExpression(call) => match &call.callee {
                Expression::MemberExpression(member) => match &member.object {
                    Expression::RegExpLiteral(regexp) => {
                        assert_eq!(regexp.pattern(), "a[/]b");
                        assert_eq!(regexp.flags(), "gi");
                    }
                    other => panic!("expected regexp, got {:?}", other),
                },
                other => panic!("expected member, got {:?}", other),
            },
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_new_and_calls() {
        match expression("new a.B(1).c()") {
            Expression::CallExpression(call) => match &call.callee {
                Expression::MemberExpression(member) => {
                    assert_eq!(member.object.type_name(), "NewExpression");
                }
                other => panic!("expected member, got {:?}", other),
            },
            other => panic!("expected call, got {:?}", other),
        }
        match expression("new new A()()") {
            Expression::NewExpression(outer) => {
                assert_eq!(outer.callee.type_name(), "NewExpression");
            }
            other => panic!("expected new, got {:?}", other),
        }
        match expression("new A") {
            Expression::NewExpression(node) => assert!(node.arguments.is_empty()),
            other => panic!("expected new, got {:?}", other),
        }
    }

    #[test]
    fn test_template_literal() {
        match expression("`text${1+1}more`") {
            Expression::TemplateLiteral(template) => {
                let raws: Vec<&str> = template.quasis.iter().map(|q| q.raw.as_str()).collect();
                assert_eq!(raws, vec!["text", "more"]);
                assert_eq!(template.expressions.len(), 1);
                assert_eq!(template.expressions[0].type_name(), "BinaryExpression");
                assert!(template.quasis[1].tail);
            }
            other => panic!("expected template, got {:?}", other),
        }
    }

    #[test]
    fn test_tagged_template() {
        match expression("tag`a${b}c${d}`") {
            Expression::TaggedTemplateExpression(tagged) => {
                assert_eq!(tagged.quasi.quasis.len(), 3);
                assert_eq!(tagged.quasi.expressions.len(), 2);
            }
            other => panic!("expected tagged template, got {:?}", other),
        }
    }

    #[test]
    fn test_object_literal_forms() {
        match expression("({a, b: 1, c() {}, get d() { return 1 }, set d(v) {}, [e]: 2, get: 3, set() {}})") {
            Expression::ParenthesizedExpression(paren) => match &paren.expression {
                Expression::ObjectExpression(object) => {
                    let kinds: Vec<(PropertyKind, bool, bool)> = object
                        .properties
                        .iter()
                        .map(|p| (p.kind, p.method, p.shorthand))
                        .collect();
                    assert_eq!(
                        kinds,
                        vec![
                            (PropertyKind::Init, false, true),
                            (PropertyKind::Init, false, false),
                            (PropertyKind::Init, true, false),
                            (PropertyKind::Get, false, false),
                            (PropertyKind::Set, false, false),
                            (PropertyKind::Init, false, false),
                            (PropertyKind::Init, false, false),
                            (PropertyKind::Init, true, false),
                        ]
                    );
                    assert!(object.properties[5].computed);
                }
                other => panic!("expected object, got {:?}", other),
            },
            other => panic!("expected parenthesized, got {:?}", other),
        }
    }

    #[test]
    fn test_keyword_property_names() {
        assert_eq!(expression("({if: 1, class: 2}).if").type_name(), "MemberExpression");
        assert!(Parser::new("({if})", ParseOptions::default()).parse().is_err());
    }

    #[test]
    fn test_literal_values() {
        match expression("'a\\nb'") {
            Expression::Literal(literal) => {
                assert_eq!(literal.value, LiteralValue::String("a\nb".to_string()));
                assert_eq!(literal.raw, "'a\\nb'");
            }
            other => panic!("expected literal, got {:?}", other),
        }
        match expression("0x10") {
            Expression::Literal(literal) => assert_eq!(literal.value, LiteralValue::Number(16.0)),
            other => panic!("expected literal, got {:?}", other),
        }
    }

    #[test]
    fn test_postfix_requires_same_line() {
        let program = Parser::new("a\n++b", ParseOptions::default()).parse().unwrap();
        assert_eq!(program.body.len(), 2);
        match &program.body[1] {
            Statement::ExpressionStatement(statement) => match &statement.expression {
                Expression::UpdateExpression(update) => assert!(update.prefix),
                other => panic!("expected update, got {:?}", other),
            },
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_update_target() {
        assert!(Parser::new("1++", ParseOptions::default()).parse().is_err());
        assert!(Parser::new("++(a)", ParseOptions::default()).parse().is_ok());
    }

    #[test]
    fn test_sequence_and_conditional() {
        assert_eq!(expression("a, b, c").type_name(), "SequenceExpression");
        match expression("a ? b : c ? d : e") {
            Expression::ConditionalExpression(node) => {
                assert_eq!(node.alternate.type_name(), "ConditionalExpression");
            }
            other => panic!("expected conditional, got {:?}", other),
        }
    }

    #[test]
    fn test_new_target() {
        let program = Parser::new("function F() { new.target }", ParseOptions::default()).parse();
        assert!(program.is_ok());
    }
}
