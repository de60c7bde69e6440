//! Recursive-descent parser
//!
//! The parser pulls tokens from a [`Scanner`] and builds the tree defined in
//! [`crate::ast`]. Grammar rules are split by area:
//!
//! - `statements`: statement list, control flow, variable declarations
//! - `expressions`: assignment down to primary expressions, operator
//!   precedence collapse, templates and literals
//! - `functions`: functions, arrows, classes and methods
//! - `patterns`: binding patterns and expression-to-pattern conversion
//! - `modules`: import and export declarations
//!
//! Most rules commit after their first token and raise a parse error on a
//! later mismatch. The few ambiguous productions (arrow parameters and the
//! `for` head) snapshot the scanner and retry; see [`Parser::try_parse`].

mod expressions;
mod functions;
mod modules;
mod patterns;
mod statements;

use std::collections::HashSet;

use core_types::{Position, SourceLocation, SyntaxResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ast::{Expression, ExpressionStatement, Identifier, Program, SourceType, Statement};
use crate::error::{parse_error, unexpected_end, unexpected_token};
use crate::scanner::{Scanner, ScannerState};
use crate::token::{Token, TokenKind};

/// Default recursion ceiling for [`ParseOptions::max_depth`]
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Top-level grammar
    pub source_type: SourceType,
    /// Maximum nesting of statements and expressions before the parse is
    /// abandoned with an error
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::Script,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Options for script code
    pub fn script() -> Self {
        Self::default()
    }

    /// Options for module code
    pub fn module() -> Self {
        Self {
            source_type: SourceType::Module,
            ..Self::default()
        }
    }

    /// Replace the recursion ceiling
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Grammar parameters that change at function boundaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Context {
    allow_return: bool,
    in_generator: bool,
}

/// Everything restored when a speculative rule fails
struct Checkpoint {
    scanner: ScannerState,
    context: Context,
    depth: usize,
}

/// How keyword tokens are treated by [`Parser::parse_identifier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdentifierKind {
    /// Property and specifier names: any IdentifierName
    Name,
    /// Bindings and references: reserved words are rejected
    Binding,
}

/// JavaScript parser
pub struct Parser {
    scanner: Scanner,
    options: ParseOptions,
    context: Context,
    depth: usize,
    /// Token indexes where arrow parameters were already tried and failed
    arrow_failures: HashSet<usize>,
}

impl Parser {
    /// Create a parser for the given source
    pub fn new(source: &str, options: ParseOptions) -> Self {
        Self {
            scanner: Scanner::new(source),
            options,
            context: Context::default(),
            depth: 0,
            arrow_failures: HashSet::new(),
        }
    }

    /// Record every consumed token; see [`Parser::tokens`]
    pub fn enable_token_registration(&mut self) {
        self.scanner.enable_token_registration();
    }

    /// Tokens consumed so far, when registration is enabled
    pub fn tokens(&self) -> &[Token] {
        self.scanner.tokens()
    }

    /// Take the registered tokens
    pub fn into_tokens(self) -> Vec<Token> {
        self.scanner.into_tokens()
    }

    /// Parse the whole source into a [`Program`]
    pub fn parse(&mut self) -> SyntaxResult<Program> {
        let source_type = self.options.source_type;
        debug!(?source_type, length = self.scanner.source_len(), "parsing program");
        if source_type == SourceType::Module {
            self.scanner.set_strict_mode(true);
        }

        let mut body = self.parse_directive_prologue()?;
        while self.scanner.get_token()?.is_some() {
            let item = match source_type {
                SourceType::Module => self.parse_module_item()?,
                SourceType::Script => self.parse_statement_list_item()?,
            };
            body.push(item);
        }

        let loc = SourceLocation::new(Position::origin(), self.scanner.scan_position());
        debug!(statements = body.len(), "parsed program");
        Ok(Program {
            source_type,
            body,
            loc,
        })
    }

    /// Leading string-literal statements of a program or function body.
    ///
    /// Enables strict mode when one of them is `"use strict"`. The first
    /// statement that turns out not to be a directive is returned as an
    /// ordinary statement at the end of the list.
    fn parse_directive_prologue(&mut self) -> SyntaxResult<Vec<Statement>> {
        let mut statements = Vec::new();
        while matches!(self.scanner.get_token()?, Some(token) if token.kind() == TokenKind::StringLiteral)
        {
            let mut statement = self.parse_expression_statement()?;
            let directive = match &statement.expression {
                Expression::Literal(literal) => Some(literal.raw[1..literal.raw.len() - 1].to_string()),
                _ => None,
            };
            let Some(directive) = directive else {
                statements.push(Statement::ExpressionStatement(Box::new(statement)));
                break;
            };
            if directive == "use strict" {
                self.scanner.set_strict_mode(true);
            }
            statement.directive = Some(directive);
            statements.push(Statement::ExpressionStatement(Box::new(statement)));
        }
        Ok(statements)
    }

    fn parse_expression_statement(&mut self) -> SyntaxResult<ExpressionStatement> {
        let start = self.start_position()?;
        let expression = self.parse_expression(true)?;
        self.assert_end_of_statement()?;
        Ok(ExpressionStatement {
            expression,
            directive: None,
            loc: self.finish(start),
        })
    }

    // ===== Backtracking =====

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            scanner: self.scanner.get_state(),
            context: self.context,
            depth: self.depth,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.scanner.set_state(checkpoint.scanner);
        self.context = checkpoint.context;
        self.depth = checkpoint.depth;
    }

    /// Run a speculative rule.
    ///
    /// On `Ok(None)` or a parse error the scanner, context and depth are
    /// rolled back and `Ok(None)` is returned. Scan errors are never retried.
    fn try_parse<T>(
        &mut self,
        rule: &'static str,
        parse: impl FnOnce(&mut Self) -> SyntaxResult<Option<T>>,
    ) -> SyntaxResult<Option<T>> {
        let checkpoint = self.checkpoint();
        match parse(self) {
            Ok(Some(node)) => Ok(Some(node)),
            Ok(None) => {
                trace!(rule, "no match, backtracking");
                self.restore(checkpoint);
                Ok(None)
            }
            Err(err) if err.is_parse_error() => {
                trace!(rule, error = %err, "failed, backtracking");
                self.restore(checkpoint);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Run `parse` one nesting level deeper
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> SyntaxResult<T>) -> SyntaxResult<T> {
        if self.depth >= self.options.max_depth {
            let position = self.start_position()?;
            return Err(parse_error("Maximum nesting depth exceeded", position));
        }
        self.depth += 1;
        let result = crate::stack::grow(|| parse(self));
        self.depth -= 1;
        result
    }

    /// Run `parse` with a replaced context, restoring the old one afterwards
    fn with_context<T>(
        &mut self,
        context: Context,
        parse: impl FnOnce(&mut Self) -> SyntaxResult<T>,
    ) -> SyntaxResult<T> {
        let saved = std::mem::replace(&mut self.context, context);
        let result = parse(self);
        self.context = saved;
        result
    }

    // ===== Token helpers =====

    /// Start of the current token, or the end of input
    fn start_position(&mut self) -> SyntaxResult<Position> {
        let end = self.scanner.position();
        Ok(self
            .scanner
            .get_token()?
            .map_or(end, |token| token.location().start))
    }

    /// Location from `start` to the end of the last consumed token
    fn finish(&self, start: Position) -> SourceLocation {
        SourceLocation::new(start, self.scanner.position())
    }

    fn at(&mut self, value: &str) -> SyntaxResult<bool> {
        Ok(matches!(self.scanner.get_token()?, Some(token) if token.value() == value))
    }

    fn at_kind(&mut self, kind: TokenKind) -> SyntaxResult<bool> {
        Ok(matches!(self.scanner.get_token()?, Some(token) if token.kind() == kind))
    }

    /// Whether the current token is the contextual word `word` (`of`, `as`,
    /// `from`, `get`, `set`)
    fn at_contextual(&mut self, word: &str) -> SyntaxResult<bool> {
        Ok(matches!(
            self.scanner.get_token()?,
            Some(token) if token.kind() == TokenKind::Identifier && token.value() == word
        ))
    }

    fn next_value_is(&mut self, values: &[&str]) -> SyntaxResult<bool> {
        Ok(matches!(self.scanner.get_next_token()?, Some(token) if values.contains(&token.value())))
    }

    fn expect(&mut self, value: &str) -> SyntaxResult<Token> {
        match self.scanner.consume(value)? {
            Some(token) => Ok(token),
            None => self.unexpected(),
        }
    }

    fn expect_contextual(&mut self, word: &str) -> SyntaxResult<Token> {
        if self.at_contextual(word)? {
            if let Some(token) = self.scanner.consume_token()? {
                return Ok(token);
            }
        }
        self.unexpected()
    }

    /// Error for the current token
    fn unexpected<T>(&mut self) -> SyntaxResult<T> {
        let end = self.scanner.position();
        Err(match self.scanner.get_token()? {
            Some(token) => unexpected_token(token.value(), token.location().start),
            None => unexpected_end(end),
        })
    }

    fn error_at<T>(&self, message: &str, position: Position) -> SyntaxResult<T> {
        Err(parse_error(message, position))
    }

    /// Whether the statement can end here: `;`, `}`, end of input, or a
    /// line terminator before the current token
    fn at_end_of_statement(&mut self) -> SyntaxResult<bool> {
        match self.scanner.get_token()? {
            None => Ok(true),
            Some(token) if token.is_punctuator(";") || token.is_punctuator("}") => Ok(true),
            Some(_) => Ok(!self.scanner.no_line_terminators()?),
        }
    }

    fn assert_end_of_statement(&mut self) -> SyntaxResult<()> {
        if self.scanner.consume(";")?.is_some() || self.at_end_of_statement()? {
            Ok(())
        } else {
            self.unexpected()
        }
    }

    /// Identifier at the current token, or `None` without consuming.
    ///
    /// With `after`, the identifier only matches when the following token
    /// has that value.
    fn parse_identifier(
        &mut self,
        kind: IdentifierKind,
        after: Option<&str>,
    ) -> SyntaxResult<Option<Identifier>> {
        let token = match self.scanner.get_token()? {
            Some(token) => token.clone(),
            None => return Ok(None),
        };
        let allowed = match token.kind() {
            TokenKind::Identifier => true,
            TokenKind::Keyword if kind == IdentifierKind::Binding => {
                if token.value() == "yield" {
                    !self.context.in_generator && !self.scanner.is_strict_mode()
                } else {
                    !self.scanner.is_strict_mode_keyword(&token)
                }
            }
            TokenKind::Keyword | TokenKind::BooleanLiteral | TokenKind::NullLiteral => {
                kind == IdentifierKind::Name
            }
            _ => false,
        };
        if !allowed {
            return Ok(None);
        }
        if let Some(after) = after {
            if !self.next_value_is(&[after])? {
                return Ok(None);
            }
        }
        self.scanner.consume_token()?;
        Ok(Some(Identifier {
            name: token.value().to_string(),
            loc: token.location(),
        }))
    }

    fn expect_identifier(&mut self, kind: IdentifierKind) -> SyntaxResult<Identifier> {
        match self.parse_identifier(kind, None)? {
            Some(identifier) => Ok(identifier),
            None => self.unexpected(),
        }
    }
}
