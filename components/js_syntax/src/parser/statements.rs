//! Statements and declarations

use core_types::{Position, SyntaxResult};

use super::{IdentifierKind, Parser};
use crate::ast::{
    BlockStatement, BreakStatement, CatchClause, ContinueStatement, DebuggerStatement,
    DoWhileStatement, EmptyStatement, ForInOfLeft, ForInStatement, ForInit, ForOfStatement,
    ForStatement, IfStatement, LabeledStatement, Pattern, ReturnStatement, Statement,
    SwitchCase, SwitchStatement, ThrowStatement, TryStatement, VariableDeclaration,
    VariableDeclarator, VariableKind, WhileStatement, WithStatement,
};
use crate::scanner::Lookahead;
use crate::token::TokenKind;

/// `let` followed by a destructuring pattern
const LET_PATTERN: [Lookahead<'static>; 2] = [Lookahead::Two("let", "["), Lookahead::Two("let", "{")];

impl Parser {
    /// Statement or declaration inside a statement list
    pub(super) fn parse_statement_list_item(&mut self) -> SyntaxResult<Statement> {
        let keyword = match self.scanner.get_token()? {
            Some(token) if token.kind() == TokenKind::Keyword => token.value().to_string(),
            _ => return self.parse_statement(),
        };
        match keyword.as_str() {
            "function" => Ok(Statement::FunctionDeclaration(Box::new(
                self.parse_function(true, false)?,
            ))),
            "class" => Ok(Statement::ClassDeclaration(Box::new(self.parse_class(true, false)?))),
            "let" | "const" if self.is_lexical_declaration()? => {
                let declaration = self.parse_variable_declaration(true, false)?;
                self.assert_end_of_statement()?;
                Ok(Statement::VariableDeclaration(Box::new(declaration)))
            }
            _ => self.parse_statement(),
        }
    }

    /// `let` starts a declaration only when a binding follows it
    pub(super) fn is_lexical_declaration(&mut self) -> SyntaxResult<bool> {
        let keyword = match self.scanner.get_token()? {
            Some(token) if token.kind() == TokenKind::Keyword => token.value().to_string(),
            _ => return Ok(false),
        };
        match keyword.as_str() {
            "const" => Ok(true),
            "let" => {
                let next = match self.scanner.get_next_token()? {
                    Some(next) => next.clone(),
                    None => return Ok(false),
                };
                Ok(match next.kind() {
                    TokenKind::Identifier => true,
                    TokenKind::Keyword => !self.scanner.is_strict_mode_keyword(&next),
                    TokenKind::Punctuator => self.scanner.is_before(&LET_PATTERN, true)?,
                    _ => false,
                })
            }
            _ => Ok(false),
        }
    }

    /// Statement in a position where declarations are not allowed
    pub(super) fn parse_statement(&mut self) -> SyntaxResult<Statement> {
        self.nested(|parser| parser.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> SyntaxResult<Statement> {
        let token = match self.scanner.get_token()? {
            Some(token) => token.clone(),
            None => return self.unexpected(),
        };

        match (token.kind(), token.value()) {
            (TokenKind::Punctuator, "{") => {
                return Ok(Statement::BlockStatement(Box::new(self.parse_block()?)));
            }
            (TokenKind::Punctuator, ";") => {
                self.scanner.consume_token()?;
                return Ok(Statement::EmptyStatement(EmptyStatement {
                    loc: token.location(),
                }));
            }
            (TokenKind::Keyword, keyword) => match keyword {
                "var" => {
                    let declaration = self.parse_variable_declaration(true, false)?;
                    self.assert_end_of_statement()?;
                    return Ok(Statement::VariableDeclaration(Box::new(declaration)));
                }
                "if" => return self.parse_if_statement(),
                "for" => return self.parse_for_statement(),
                "while" => return self.parse_while_statement(),
                "do" => return self.parse_do_while_statement(),
                "continue" => return self.parse_continue_statement(),
                "break" => return self.parse_break_statement(),
                "return" => return self.parse_return_statement(),
                "with" => return self.parse_with_statement(),
                "switch" => return self.parse_switch_statement(),
                "throw" => return self.parse_throw_statement(),
                "try" => return self.parse_try_statement(),
                "debugger" => return self.parse_debugger_statement(),
                "function" | "class" => return self.unexpected(),
                "import" | "export" => {
                    let message = format!(
                        "'{}' declarations may only appear at the top level of module code",
                        keyword
                    );
                    return self.error_at(&message, token.location().start);
                }
                _ => {}
            },
            _ => {}
        }

        if let Some(label) = self.parse_identifier(IdentifierKind::Binding, Some(":"))? {
            self.expect(":")?;
            let body = if self.at("function")? {
                Statement::FunctionDeclaration(Box::new(self.parse_function(true, false)?))
            } else {
                self.parse_statement()?
            };
            return Ok(Statement::LabeledStatement(Box::new(LabeledStatement {
                label,
                body,
                loc: self.finish(token.location().start),
            })));
        }

        let statement = self.parse_expression_statement()?;
        Ok(Statement::ExpressionStatement(Box::new(statement)))
    }

    pub(super) fn parse_block(&mut self) -> SyntaxResult<BlockStatement> {
        let start = self.expect("{")?.location().start;
        let mut body = Vec::new();
        while !self.at("}")? {
            body.push(self.parse_statement_list_item()?);
        }
        self.expect("}")?;
        Ok(BlockStatement {
            body,
            loc: self.finish(start),
        })
    }

    /// `var`, `let` or `const` followed by one or more declarators.
    ///
    /// Initializers are not checked when `for_head` is set; the `for` rule
    /// checks them once it knows which kind of loop it is parsing.
    pub(super) fn parse_variable_declaration(
        &mut self,
        allow_in: bool,
        for_head: bool,
    ) -> SyntaxResult<VariableDeclaration> {
        let token = match self.scanner.consume_one_of(&["var", "let", "const"])? {
            Some(token) => token,
            None => return self.unexpected(),
        };
        let kind = match token.value() {
            "let" => VariableKind::Let,
            "const" => VariableKind::Const,
            _ => VariableKind::Var,
        };

        let mut declarations = Vec::new();
        loop {
            let start = self.start_position()?;
            let id = self.parse_binding_target()?;
            let init = if self.scanner.consume("=")?.is_some() {
                Some(self.parse_assignment_expression(allow_in)?)
            } else {
                None
            };
            declarations.push(VariableDeclarator {
                id,
                init,
                loc: self.finish(start),
            });
            if self.scanner.consume(",")?.is_none() {
                break;
            }
        }

        let declaration = VariableDeclaration {
            kind,
            declarations,
            loc: self.finish(token.location().start),
        };
        if !for_head {
            self.check_initializers(&declaration)?;
        }
        Ok(declaration)
    }

    fn check_initializers(&self, declaration: &VariableDeclaration) -> SyntaxResult<()> {
        for declarator in declaration.declarations.iter().filter(|d| d.init.is_none()) {
            if declaration.kind == VariableKind::Const {
                return self.error_at("Missing initializer in const declaration", declarator.loc.end);
            }
            if !matches!(declarator.id, Pattern::Identifier(_)) {
                return self.error_at(
                    "Missing initializer in destructuring declaration",
                    declarator.loc.end,
                );
            }
        }
        Ok(())
    }

    fn parse_if_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.expect("if")?.location().start;
        self.expect("(")?;
        let test = self.parse_expression(true)?;
        self.expect(")")?;
        let consequent = self.parse_statement()?;
        let alternate = if self.scanner.consume("else")?.is_some() {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(Statement::IfStatement(Box::new(IfStatement {
            test,
            consequent,
            alternate,
            loc: self.finish(start),
        })))
    }

    fn parse_while_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.expect("while")?.location().start;
        self.expect("(")?;
        let test = self.parse_expression(true)?;
        self.expect(")")?;
        let body = self.parse_statement()?;
        Ok(Statement::WhileStatement(Box::new(WhileStatement {
            test,
            body,
            loc: self.finish(start),
        })))
    }

    fn parse_do_while_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.expect("do")?.location().start;
        let body = self.parse_statement()?;
        self.expect("while")?;
        self.expect("(")?;
        let test = self.parse_expression(true)?;
        self.expect(")")?;
        // The semicolon after do-while is always optional
        self.scanner.consume(";")?;
        Ok(Statement::DoWhileStatement(Box::new(DoWhileStatement {
            body,
            test,
            loc: self.finish(start),
        })))
    }

    fn parse_for_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.expect("for")?.location().start;
        self.expect("(")?;

        if self.scanner.consume(";")?.is_some() {
            return self.parse_for_rest(start, None);
        }

        let is_declaration = self.at("var")? || self.is_lexical_declaration()?;
        if is_declaration {
            let declaration = self.parse_variable_declaration(false, true)?;
            let single_binding =
                declaration.declarations.len() == 1 && declaration.declarations[0].init.is_none();
            if single_binding && (self.at("in")? || self.at_contextual("of")?) {
                return self.parse_for_in_of(start, ForInOfLeft::VariableDeclaration(declaration));
            }
            self.check_initializers(&declaration)?;
            self.expect(";")?;
            return self.parse_for_rest(start, Some(ForInit::VariableDeclaration(declaration)));
        }

        let init = self.parse_expression(false)?;
        if self.at("in")? || self.at_contextual("of")? {
            let left = self.expression_to_pattern(init, true)?;
            return self.parse_for_in_of(start, ForInOfLeft::Pattern(left));
        }
        self.expect(";")?;
        self.parse_for_rest(start, Some(ForInit::Expression(init)))
    }

    /// Test, update and body of a C-style `for`, after the first `;`
    fn parse_for_rest(
        &mut self,
        start: Position,
        init: Option<ForInit>,
    ) -> SyntaxResult<Statement> {
        let test = if self.at(";")? {
            None
        } else {
            Some(self.parse_expression(true)?)
        };
        self.expect(";")?;
        let update = if self.at(")")? {
            None
        } else {
            Some(self.parse_expression(true)?)
        };
        self.expect(")")?;
        let body = self.parse_statement()?;
        Ok(Statement::ForStatement(Box::new(ForStatement {
            init,
            test,
            update,
            body,
            loc: self.finish(start),
        })))
    }

    fn parse_for_in_of(
        &mut self,
        start: Position,
        left: ForInOfLeft,
    ) -> SyntaxResult<Statement> {
        if self.scanner.consume("in")?.is_some() {
            let right = self.parse_expression(true)?;
            self.expect(")")?;
            let body = self.parse_statement()?;
            return Ok(Statement::ForInStatement(Box::new(ForInStatement {
                left,
                right,
                body,
                loc: self.finish(start),
            })));
        }
        self.expect_contextual("of")?;
        let right = self.parse_assignment_expression(true)?;
        self.expect(")")?;
        let body = self.parse_statement()?;
        Ok(Statement::ForOfStatement(Box::new(ForOfStatement {
            left,
            right,
            body,
            loc: self.finish(start),
        })))
    }

    fn parse_continue_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.expect("continue")?.location().start;
        let label = if self.scanner.no_line_terminators()? {
            self.parse_identifier(IdentifierKind::Binding, None)?
        } else {
            None
        };
        self.assert_end_of_statement()?;
        Ok(Statement::ContinueStatement(Box::new(ContinueStatement {
            label,
            loc: self.finish(start),
        })))
    }

    fn parse_break_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.expect("break")?.location().start;
        let label = if self.scanner.no_line_terminators()? {
            self.parse_identifier(IdentifierKind::Binding, None)?
        } else {
            None
        };
        self.assert_end_of_statement()?;
        Ok(Statement::BreakStatement(Box::new(BreakStatement {
            label,
            loc: self.finish(start),
        })))
    }

    fn parse_return_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start_position()?;
        if !self.context.allow_return {
            return self.error_at("Illegal return statement", start);
        }
        self.expect("return")?;
        let argument = if self.at_end_of_statement()? {
            None
        } else {
            Some(self.parse_expression(true)?)
        };
        self.assert_end_of_statement()?;
        Ok(Statement::ReturnStatement(Box::new(ReturnStatement {
            argument,
            loc: self.finish(start),
        })))
    }

    fn parse_with_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.start_position()?;
        if self.scanner.is_strict_mode() {
            return self.error_at("Strict mode code may not include a with statement", start);
        }
        self.expect("with")?;
        self.expect("(")?;
        let object = self.parse_expression(true)?;
        self.expect(")")?;
        let body = self.parse_statement()?;
        Ok(Statement::WithStatement(Box::new(WithStatement {
            object,
            body,
            loc: self.finish(start),
        })))
    }

    fn parse_switch_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.expect("switch")?.location().start;
        self.expect("(")?;
        let discriminant = self.parse_expression(true)?;
        self.expect(")")?;
        self.expect("{")?;

        let mut cases: Vec<SwitchCase> = Vec::new();
        while !self.at("}")? {
            let case_start = self.start_position()?;
            let test = if self.scanner.consume("case")?.is_some() {
                Some(self.parse_expression(true)?)
            } else if self.scanner.consume("default")?.is_some() {
                if cases.iter().any(|case| case.test.is_none()) {
                    return self.error_at("Multiple default clause in switch statement", case_start);
                }
                None
            } else {
                return self.unexpected();
            };
            self.expect(":")?;

            let mut consequent = Vec::new();
            while !(self.at("}")? || self.at("case")? || self.at("default")?) {
                consequent.push(self.parse_statement_list_item()?);
            }
            cases.push(SwitchCase {
                test,
                consequent,
                loc: self.finish(case_start),
            });
        }
        self.expect("}")?;

        Ok(Statement::SwitchStatement(Box::new(SwitchStatement {
            discriminant,
            cases,
            loc: self.finish(start),
        })))
    }

    fn parse_throw_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.expect("throw")?.location().start;
        if !self.scanner.no_line_terminators()? {
            if self.scanner.get_token()?.is_none() {
                return self.unexpected();
            }
            let position = self.start_position()?;
            return self.error_at("Illegal newline after throw", position);
        }
        let argument = self.parse_expression(true)?;
        self.assert_end_of_statement()?;
        Ok(Statement::ThrowStatement(Box::new(ThrowStatement {
            argument,
            loc: self.finish(start),
        })))
    }

    fn parse_try_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.expect("try")?.location().start;
        let block = self.parse_block()?;

        let handler = match self.scanner.consume("catch")? {
            Some(token) => {
                self.expect("(")?;
                let param = self.parse_binding_target()?;
                self.expect(")")?;
                let body = self.parse_block()?;
                Some(CatchClause {
                    param,
                    body,
                    loc: self.finish(token.location().start),
                })
            }
            None => None,
        };
        let finalizer = if self.scanner.consume("finally")?.is_some() {
            Some(self.parse_block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return self.unexpected();
        }

        Ok(Statement::TryStatement(Box::new(TryStatement {
            block,
            handler,
            finalizer,
            loc: self.finish(start),
        })))
    }

    fn parse_debugger_statement(&mut self) -> SyntaxResult<Statement> {
        let start = self.expect("debugger")?.location().start;
        self.assert_end_of_statement()?;
        Ok(Statement::DebuggerStatement(DebuggerStatement {
            loc: self.finish(start),
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::{ParseOptions, Parser};

    fn parse_one(source: &str) -> Statement {
        let mut program = Parser::new(source, ParseOptions::default())
            .parse()
            .expect("Failed to parse");
        assert_eq!(program.body.len(), 1, "expected one statement in {:?}", source);
        program.body.remove(0)
    }

    fn parse_err(source: &str) -> String {
        Parser::new(source, ParseOptions::default())
            .parse()
            .expect_err("expected a parse error")
            .message
    }

    #[test]
    fn test_variable_declaration_kinds() {
        for (source, kind) in [
            ("var a = 1;", VariableKind::Var),
            ("let a = 1;", VariableKind::Let),
            ("const a = 1;", VariableKind::Const),
        ] {
            match parse_one(source) {
                Statement::VariableDeclaration(declaration) => assert_eq!(declaration.kind, kind),
                other => panic!("expected declaration, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_let_as_identifier() {
        match parse_one("let = 5") {
            Statement::ExpressionStatement(statement) => {
                assert_eq!(statement.expression.type_name(), "AssignmentExpression");
            }
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_const_requires_initializer() {
        assert_eq!(parse_err("const a;"), "Missing initializer in const declaration");
        assert_eq!(parse_err("var [a];"), "Missing initializer in destructuring declaration");
    }

    #[test]
    fn test_for_variants() {
        assert_eq!(parse_one("for (;;) {}").type_name(), "ForStatement");
        assert_eq!(parse_one("for (var i = 0; i < n; i++) f(i);").type_name(), "ForStatement");
        assert_eq!(parse_one("for (var k in o) f(k);").type_name(), "ForInStatement");
        assert_eq!(parse_one("for (const v of list) f(v);").type_name(), "ForOfStatement");
        assert_eq!(parse_one("for (x of list) f(x);").type_name(), "ForOfStatement");
        assert_eq!(parse_one("for ([a, b] of pairs) f(a);").type_name(), "ForOfStatement");
        assert_eq!(parse_one("for (a.b in o);").type_name(), "ForInStatement");
    }

    #[test]
    fn test_for_init_excludes_in() {
        assert_eq!(parse_err("for (var i = a in b;;) {}"), "Unexpected in");
        match parse_one("for (var i = (a in b); i;) {}") {
            Statement::ForStatement(statement) => assert!(statement.update.is_none()),
            other => panic!("expected for statement, got {:?}", other),
        }
    }

    #[test]
    fn test_return_outside_function() {
        assert_eq!(parse_err("return 1;"), "Illegal return statement");
    }

    #[test]
    fn test_return_line_terminator() {
        let source = "function f() { return\n1 }";
        match parse_one(source) {
            Statement::FunctionDeclaration(function) => {
                assert_eq!(function.body.body.len(), 2);
                match &function.body.body[0] {
                    Statement::ReturnStatement(statement) => assert!(statement.argument.is_none()),
                    other => panic!("expected return, got {:?}", other),
                }
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_default_clauses() {
        assert_eq!(
            parse_err("switch (a) { default: b; case 1: c; default: d; }"),
            "Multiple default clause in switch statement"
        );
    }

    #[test]
    fn test_switch_cases() {
        match parse_one("switch (a) { case 1: case 2: b(); break; default: c(); }") {
            Statement::SwitchStatement(statement) => {
                assert_eq!(statement.cases.len(), 3);
                assert!(statement.cases[0].consequent.is_empty());
                assert_eq!(statement.cases[1].consequent.len(), 2);
                assert!(statement.cases[2].test.is_none());
            }
            other => panic!("expected switch, got {:?}", other),
        }
    }

    #[test]
    fn test_try_requires_handler() {
        assert!(parse_err("try {}").contains("Unexpected end of input"));
        assert_eq!(parse_one("try {} finally {}").type_name(), "TryStatement");
        assert_eq!(parse_one("try {} catch ({ message }) {}").type_name(), "TryStatement");
    }

    #[test]
    fn test_labels() {
        match parse_one("outer: for (;;) { break outer; }") {
            Statement::LabeledStatement(statement) => {
                assert_eq!(statement.label.name, "outer");
                assert_eq!(statement.body.type_name(), "ForStatement");
            }
            other => panic!("expected labeled statement, got {:?}", other),
        }
    }

    #[test]
    fn test_asi_requires_line_break() {
        assert!(Parser::new("a\nb", ParseOptions::default()).parse().is_ok());
        assert_eq!(parse_err("a b"), "Unexpected b");
    }

    #[test]
    fn test_do_while_optional_semicolon() {
        let program = Parser::new("do x++; while (x < 5) y()", ParseOptions::default())
            .parse()
            .unwrap();
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn test_import_in_script() {
        assert!(parse_err("import a from 'a';").contains("module code"));
    }
}
