//! Functions, arrow functions, classes and methods

use core_types::SyntaxResult;

use super::{Context, IdentifierKind, Parser};
use crate::ast::{
    ArrowBody, ArrowFunctionExpression, BlockStatement, Class, ClassBody, Expression, Function,
    LiteralValue, MethodDefinition, MethodKind, Pattern, RestElement,
};
use crate::scanner::Lookahead;

/// A parsed method before it is wrapped as a class member or a property
pub(super) struct MethodParts {
    pub(super) key: Expression,
    pub(super) computed: bool,
    pub(super) kind: MethodKind,
    pub(super) value: Function,
}

fn is_constructor_key(key: &Expression) -> bool {
    match key {
        Expression::Identifier(identifier) => identifier.name == "constructor",
        Expression::Literal(literal) => {
            matches!(&literal.value, LiteralValue::String(value) if value == "constructor")
        }
        _ => false,
    }
}

impl Parser {
    /// `function` declaration or expression.
    ///
    /// Declarations need a name unless they are the value of `export default`.
    pub(super) fn parse_function(&mut self, declaration: bool, default_export: bool) -> SyntaxResult<Function> {
        let start = self.expect("function")?.location().start;
        let generator = self.scanner.consume("*")?.is_some();

        let id = if declaration {
            self.parse_identifier(IdentifierKind::Binding, None)?
        } else {
            let context = Context {
                in_generator: generator,
                ..self.context
            };
            self.with_context(context, |parser| parser.parse_identifier(IdentifierKind::Binding, None))?
        };
        if declaration && !default_export && id.is_none() {
            return self.unexpected();
        }

        let context = Context {
            allow_return: true,
            in_generator: generator,
        };
        let params = self.with_context(context, |parser| parser.parse_formal_parameters())?;
        let body = self.parse_function_body(context)?;
        Ok(Function {
            id,
            params,
            body,
            generator,
            loc: self.finish(start),
        })
    }

    /// Parenthesized parameter list. A rest parameter must come last and a
    /// trailing comma is not allowed.
    pub(super) fn parse_formal_parameters(&mut self) -> SyntaxResult<Vec<Pattern>> {
        self.expect("(")?;
        let mut params = Vec::new();
        while !self.at(")")? {
            if let Some(token) = self.scanner.consume("...")? {
                let argument = self.parse_binding_target()?;
                params.push(Pattern::RestElement(Box::new(RestElement {
                    argument,
                    loc: self.finish(token.location().start),
                })));
                break;
            }
            params.push(self.parse_binding_element()?);
            if !self.at(")")? {
                self.expect(",")?;
                if self.at(")")? {
                    return self.unexpected();
                }
            }
        }
        self.expect(")")?;
        Ok(params)
    }

    /// `{ ... }` body with its own directive prologue. Strict mode switched
    /// on by the body does not leak out of it.
    pub(super) fn parse_function_body(&mut self, context: Context) -> SyntaxResult<BlockStatement> {
        let start = self.expect("{")?.location().start;
        let strict = self.scanner.is_strict_mode();
        let body = self.with_context(context, |parser| {
            let mut body = parser.parse_directive_prologue()?;
            while !parser.at("}")? {
                body.push(parser.parse_statement_list_item()?);
            }
            Ok(body)
        });
        self.scanner.set_strict_mode(strict);
        let body = body?;
        self.expect("}")?;
        Ok(BlockStatement {
            body,
            loc: self.finish(start),
        })
    }

    /// Arrow function at the current token, or `None` when the tokens do
    /// not form arrow parameters followed by `=>`.
    pub(super) fn parse_arrow_function(&mut self, allow_in: bool) -> SyntaxResult<Option<Expression>> {
        let start = match self.scanner.get_token()? {
            Some(token) => token.location().start,
            None => return Ok(None),
        };

        let params = if self.at("(")? {
            if self.arrow_failures.contains(&start.index) {
                return Ok(None);
            }
            match self.try_parse("arrow parameters", |parser| parser.parse_arrow_parameters())? {
                Some(params) => params,
                None => {
                    self.arrow_failures.insert(start.index);
                    return Ok(None);
                }
            }
        } else {
            match self.parse_identifier(IdentifierKind::Binding, Some("=>"))? {
                Some(identifier) => {
                    if !self.scanner.no_line_terminators()? {
                        return self.unexpected();
                    }
                    self.expect("=>")?;
                    vec![Pattern::Identifier(identifier)]
                }
                None => return Ok(None),
            }
        };

        let body = if self.at("{")? {
            let context = Context {
                allow_return: true,
                in_generator: false,
            };
            ArrowBody::Block(self.parse_function_body(context)?)
        } else {
            let context = Context {
                in_generator: false,
                ..self.context
            };
            ArrowBody::Expression(
                self.with_context(context, |parser| parser.parse_assignment_expression(allow_in))?,
            )
        };

        Ok(Some(Expression::ArrowFunctionExpression(Box::new(
            ArrowFunctionExpression {
                params,
                body,
                loc: self.finish(start),
            },
        ))))
    }

    fn parse_arrow_parameters(&mut self) -> SyntaxResult<Option<Vec<Pattern>>> {
        let params = self.parse_formal_parameters()?;
        if !self.scanner.no_line_terminators()? || self.scanner.consume("=>")?.is_none() {
            return Ok(None);
        }
        Ok(Some(params))
    }

    /// `class` declaration or expression. The whole class is strict code.
    pub(super) fn parse_class(&mut self, declaration: bool, default_export: bool) -> SyntaxResult<Class> {
        let start = self.expect("class")?.location().start;
        let strict = self.scanner.is_strict_mode();
        self.scanner.set_strict_mode(true);
        let class = self.parse_class_tail(declaration && !default_export);
        self.scanner.set_strict_mode(strict);

        let (id, super_class, body) = class?;
        Ok(Class {
            id,
            super_class,
            body,
            loc: self.finish(start),
        })
    }

    fn parse_class_tail(
        &mut self,
        require_name: bool,
    ) -> SyntaxResult<(Option<crate::ast::Identifier>, Option<Expression>, ClassBody)> {
        let id = self.parse_identifier(IdentifierKind::Binding, None)?;
        if require_name && id.is_none() {
            return self.unexpected();
        }
        let super_class = if self.scanner.consume("extends")?.is_some() {
            Some(self.parse_left_hand_side_expression()?)
        } else {
            None
        };

        let body_start = self.expect("{")?.location().start;
        let mut members = Vec::new();
        loop {
            if self.scanner.consume(";")?.is_some() {
                continue;
            }
            if self.at("}")? {
                break;
            }
            members.push(self.parse_class_element()?);
        }
        self.expect("}")?;

        let body = ClassBody {
            body: members,
            loc: self.finish(body_start),
        };
        Ok((id, super_class, body))
    }

    fn parse_class_element(&mut self) -> SyntaxResult<MethodDefinition> {
        let start = self.start_position()?;
        // `static(){}` is a method named static
        let is_static = if self.at("static")?
            && !self.scanner.is_before(&[Lookahead::Two("static", "(")], true)?
        {
            self.scanner.consume_token()?;
            true
        } else {
            false
        };

        let method = self.parse_method(true)?;
        let kind = if method.kind == MethodKind::Method
            && !is_static
            && !method.computed
            && !method.value.generator
            && is_constructor_key(&method.key)
        {
            MethodKind::Constructor
        } else {
            method.kind
        };

        Ok(MethodDefinition {
            key: method.key,
            value: method.value,
            kind,
            computed: method.computed,
            is_static,
            loc: self.finish(start),
        })
    }

    /// Generator method, accessor or plain method.
    ///
    /// `get` and `set` are ordinary names when followed by `(`, and in
    /// object literals also when followed by `,`, `}`, `:` or `=`.
    pub(super) fn parse_method(&mut self, in_class: bool) -> SyntaxResult<MethodParts> {
        if self.scanner.consume("*")?.is_some() {
            let (key, computed) = self.parse_property_name()?;
            let value = self.parse_method_function(true, None)?;
            return Ok(MethodParts {
                key,
                computed,
                kind: MethodKind::Method,
                value,
            });
        }

        let name_followers: &[&str] = if in_class {
            &["("]
        } else {
            &["(", ",", "}", ":", "="]
        };
        if self.is_accessor_prefix(name_followers)? {
            let kind = if self.at_contextual("get")? {
                MethodKind::Get
            } else {
                MethodKind::Set
            };
            self.scanner.consume_token()?;
            let (key, computed) = self.parse_property_name()?;
            let value = self.parse_method_function(false, Some(kind))?;
            return Ok(MethodParts {
                key,
                computed,
                kind,
                value,
            });
        }

        let (key, computed) = self.parse_property_name()?;
        let value = self.parse_method_function(false, None)?;
        Ok(MethodParts {
            key,
            computed,
            kind: MethodKind::Method,
            value,
        })
    }

    /// Whether the current token is `get` or `set` used as an accessor
    /// prefix, i.e. not followed by one of `name_followers`
    pub(super) fn is_accessor_prefix(&mut self, name_followers: &[&str]) -> SyntaxResult<bool> {
        if !(self.at_contextual("get")? || self.at_contextual("set")?) {
            return Ok(false);
        }
        Ok(matches!(
            self.scanner.get_next_token()?,
            Some(next) if !name_followers.contains(&next.value())
        ))
    }

    /// Parameters and body of a method, starting at `(`
    pub(super) fn parse_method_function(
        &mut self,
        generator: bool,
        accessor: Option<MethodKind>,
    ) -> SyntaxResult<Function> {
        let start = self.start_position()?;
        let context = Context {
            allow_return: true,
            in_generator: generator,
        };
        let params = self.with_context(context, |parser| parser.parse_formal_parameters())?;
        match accessor {
            Some(MethodKind::Get) if !params.is_empty() => {
                return self.error_at("Getter must not have any formal parameters", start);
            }
            Some(MethodKind::Set)
                if params.len() != 1 || matches!(params[0], Pattern::RestElement(_)) =>
            {
                return self.error_at("Setter must have exactly one formal parameter", start);
            }
            _ => {}
        }
        let body = self.parse_function_body(context)?;
        Ok(Function {
            id: None,
            params,
            body,
            generator,
            loc: self.finish(start),
        })
    }
}
