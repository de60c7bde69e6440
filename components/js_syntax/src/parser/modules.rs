//! Import and export declarations

use core_types::SyntaxResult;

use super::expressions::literal_from_token;
use super::{IdentifierKind, Parser};
use crate::ast::{
    ExportAllDeclaration, ExportDefault, ExportDefaultDeclaration, ExportNamedDeclaration,
    ExportSpecifier, ImportClause, ImportDeclaration, ImportDefaultSpecifier,
    ImportNamespaceSpecifier, ImportSpecifier, Literal, Statement,
};
use crate::token::TokenKind;

impl Parser {
    /// Top-level item of module code
    pub(super) fn parse_module_item(&mut self) -> SyntaxResult<Statement> {
        if self.at("import")? {
            return Ok(Statement::ImportDeclaration(Box::new(self.parse_import_declaration()?)));
        }
        if self.at("export")? {
            return self.parse_export_declaration();
        }
        self.parse_statement_list_item()
    }

    fn parse_import_declaration(&mut self) -> SyntaxResult<ImportDeclaration> {
        let start = self.expect("import")?.location().start;
        let mut specifiers = Vec::new();

        if !self.at_kind(TokenKind::StringLiteral)? {
            if let Some(local) = self.parse_identifier(IdentifierKind::Binding, None)? {
                specifiers.push(ImportClause::ImportDefaultSpecifier(ImportDefaultSpecifier {
                    loc: local.loc,
                    local,
                }));
                if self.scanner.consume(",")?.is_none() {
                    return self.finish_import(start, specifiers);
                }
            }
            if self.at("*")? {
                specifiers.push(self.parse_namespace_import()?);
            } else if self.at("{")? {
                self.parse_named_imports(&mut specifiers)?;
            } else {
                return self.unexpected();
            }
        }
        self.finish_import(start, specifiers)
    }

    fn finish_import(
        &mut self,
        start: core_types::Position,
        specifiers: Vec<ImportClause>,
    ) -> SyntaxResult<ImportDeclaration> {
        if !specifiers.is_empty() {
            self.expect_contextual("from")?;
        }
        let source = self.parse_module_specifier()?;
        self.assert_end_of_statement()?;
        Ok(ImportDeclaration {
            specifiers,
            source,
            loc: self.finish(start),
        })
    }

    fn parse_namespace_import(&mut self) -> SyntaxResult<ImportClause> {
        let start = self.expect("*")?.location().start;
        self.expect_contextual("as")?;
        let local = self.expect_identifier(IdentifierKind::Binding)?;
        Ok(ImportClause::ImportNamespaceSpecifier(ImportNamespaceSpecifier {
            local,
            loc: self.finish(start),
        }))
    }

    fn parse_named_imports(&mut self, specifiers: &mut Vec<ImportClause>) -> SyntaxResult<()> {
        self.expect("{")?;
        while !self.at("}")? {
            let start = self.start_position()?;
            let imported = self.expect_identifier(IdentifierKind::Name)?;
            let local = if self.at_contextual("as")? {
                self.scanner.consume_token()?;
                self.expect_identifier(IdentifierKind::Binding)?
            } else {
                if self.scanner.is_reserved_word(&imported.name) {
                    return self.error_at(
                        &format!("Unexpected reserved word {}", imported.name),
                        imported.loc.start,
                    );
                }
                imported.clone()
            };
            specifiers.push(ImportClause::ImportSpecifier(ImportSpecifier {
                imported,
                local,
                loc: self.finish(start),
            }));
            if !self.at("}")? {
                self.expect(",")?;
            }
        }
        self.expect("}")?;
        Ok(())
    }

    fn parse_module_specifier(&mut self) -> SyntaxResult<Literal> {
        let literal = match self.scanner.get_token()? {
            Some(token) if token.kind() == TokenKind::StringLiteral => literal_from_token(token),
            _ => return self.unexpected(),
        };
        self.scanner.consume_token()?;
        Ok(literal)
    }

    fn parse_export_declaration(&mut self) -> SyntaxResult<Statement> {
        let start = self.expect("export")?.location().start;

        if self.scanner.consume("*")?.is_some() {
            self.expect_contextual("from")?;
            let source = self.parse_module_specifier()?;
            self.assert_end_of_statement()?;
            return Ok(Statement::ExportAllDeclaration(Box::new(ExportAllDeclaration {
                source,
                loc: self.finish(start),
            })));
        }

        if self.scanner.consume("default")?.is_some() {
            let declaration = if self.at("function")? {
                ExportDefault::FunctionDeclaration(self.parse_function(true, true)?)
            } else if self.at("class")? {
                ExportDefault::ClassDeclaration(self.parse_class(true, true)?)
            } else {
                let expression = self.parse_assignment_expression(true)?;
                self.assert_end_of_statement()?;
                ExportDefault::Expression(expression)
            };
            return Ok(Statement::ExportDefaultDeclaration(Box::new(
                ExportDefaultDeclaration {
                    declaration,
                    loc: self.finish(start),
                },
            )));
        }

        if self.at("{")? {
            let specifiers = self.parse_export_clause()?;
            let source = if self.at_contextual("from")? {
                self.scanner.consume_token()?;
                Some(self.parse_module_specifier()?)
            } else {
                if let Some(reserved) = specifiers
                    .iter()
                    .find(|specifier| self.scanner.is_reserved_word(&specifier.local.name))
                {
                    return self.error_at(
                        &format!("Unexpected reserved word {}", reserved.local.name),
                        reserved.local.loc.start,
                    );
                }
                None
            };
            self.assert_end_of_statement()?;
            return Ok(Statement::ExportNamedDeclaration(Box::new(ExportNamedDeclaration {
                declaration: None,
                specifiers,
                source,
                loc: self.finish(start),
            })));
        }

        let declaration = if self.at("var")? {
            let declaration = self.parse_variable_declaration(true, false)?;
            self.assert_end_of_statement()?;
            Statement::VariableDeclaration(Box::new(declaration))
        } else if (self.at("let")? || self.at("const")?) && self.is_lexical_declaration()? {
            let declaration = self.parse_variable_declaration(true, false)?;
            self.assert_end_of_statement()?;
            Statement::VariableDeclaration(Box::new(declaration))
        } else if self.at("function")? {
            Statement::FunctionDeclaration(Box::new(self.parse_function(true, false)?))
        } else if self.at("class")? {
            Statement::ClassDeclaration(Box::new(self.parse_class(true, false)?))
        } else {
            return self.unexpected();
        };
        Ok(Statement::ExportNamedDeclaration(Box::new(ExportNamedDeclaration {
            declaration: Some(declaration),
            specifiers: Vec::new(),
            source: None,
            loc: self.finish(start),
        })))
    }

    fn parse_export_clause(&mut self) -> SyntaxResult<Vec<ExportSpecifier>> {
        self.expect("{")?;
        let mut specifiers = Vec::new();
        while !self.at("}")? {
            let start = self.start_position()?;
            let local = self.expect_identifier(IdentifierKind::Name)?;
            let exported = if self.at_contextual("as")? {
                self.scanner.consume_token()?;
                self.expect_identifier(IdentifierKind::Name)?
            } else {
                local.clone()
            };
            specifiers.push(ExportSpecifier {
                local,
                exported,
                loc: self.finish(start),
            });
            if !self.at("}")? {
                self.expect(",")?;
            }
        }
        self.expect("}")?;
        Ok(specifiers)
    }
}
