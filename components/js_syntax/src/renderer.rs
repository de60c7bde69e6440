//! Tree to source text
//!
//! [`Renderer`] walks a tree and re-emits JavaScript source according to a
//! [`FormattingOptions`] style. Grouping comes from the tree itself: the
//! parser keeps parenthesized expressions as nodes, so the renderer never
//! inserts parentheses based on precedence.
//!
//! Every rendered statement ends in `;` or `}`, which keeps statements
//! separable even when the style uses no newlines at all.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::ast::{
    ArrowBody, Class, ExportDefault, Expression, ForInOfLeft, ForInit, Function, ImportClause,
    MethodKind, Pattern, Program, Property, PropertyKind, Statement, TemplateLiteral,
    VariableDeclaration, VariableKind,
};

/// Whitespace and brace style used by [`Renderer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingOptions {
    /// Line separator, empty for single-line output
    pub newline: String,
    /// One level of indentation
    pub indent_unit: String,
    /// Put `{` of a compound statement on its own line
    pub newline_before_brace: bool,
    /// Spaces around binary and assignment operators, after commas and
    /// before braces
    pub space_around_operators: bool,
    /// `( a )` instead of `(a)`
    pub space_inside_parens: bool,
    /// Wrap every compound-statement body in braces
    pub always_wrap_blocks: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self::pretty_print()
    }
}

impl FormattingOptions {
    /// Readable multi-line output with four-space indentation
    pub fn pretty_print() -> Self {
        Self {
            newline: "\n".to_string(),
            indent_unit: "    ".to_string(),
            newline_before_brace: false,
            space_around_operators: true,
            space_inside_parens: false,
            always_wrap_blocks: false,
        }
    }

    /// Minimal whitespace
    pub fn compact() -> Self {
        Self {
            newline: String::new(),
            indent_unit: String::new(),
            newline_before_brace: false,
            space_around_operators: false,
            space_inside_parens: false,
            always_wrap_blocks: false,
        }
    }

    /// Pretty print with braces on their own line, padded parentheses and
    /// braces around every body
    pub fn expanded() -> Self {
        Self {
            newline_before_brace: true,
            space_inside_parens: true,
            always_wrap_blocks: true,
            ..Self::pretty_print()
        }
    }
}

/// A node that can be rendered on its own
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    /// Whole program
    Program(&'a Program),
    /// Statement, rendered with its trailing `;` when it needs one
    Statement(&'a Statement),
    /// Expression
    Expression(&'a Expression),
    /// Binding or assignment pattern
    Pattern(&'a Pattern),
}

impl NodeRef<'_> {
    /// ESTree type name of the node
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeRef::Program(_) => "Program",
            NodeRef::Statement(statement) => statement.type_name(),
            NodeRef::Expression(expression) => expression.type_name(),
            NodeRef::Pattern(_) => "Pattern",
        }
    }
}

impl<'a> From<&'a Program> for NodeRef<'a> {
    fn from(node: &'a Program) -> Self {
        NodeRef::Program(node)
    }
}

impl<'a> From<&'a Statement> for NodeRef<'a> {
    fn from(node: &'a Statement) -> Self {
        NodeRef::Statement(node)
    }
}

impl<'a> From<&'a Expression> for NodeRef<'a> {
    fn from(node: &'a Expression) -> Self {
        NodeRef::Expression(node)
    }
}

impl<'a> From<&'a Pattern> for NodeRef<'a> {
    fn from(node: &'a Pattern) -> Self {
        NodeRef::Pattern(node)
    }
}

/// Render a node with the given style
pub fn render<'a>(node: impl Into<NodeRef<'a>>, options: &FormattingOptions) -> String {
    Renderer::new(options.clone()).render(node)
}

/// Statements that end in `}` or in a nested statement and so never get a
/// trailing `;`
fn needs_semicolon(statement: &Statement) -> bool {
    match statement {
        Statement::BlockStatement(_)
        | Statement::ClassDeclaration(_)
        | Statement::ForStatement(_)
        | Statement::ForInStatement(_)
        | Statement::ForOfStatement(_)
        | Statement::FunctionDeclaration(_)
        | Statement::IfStatement(_)
        | Statement::LabeledStatement(_)
        | Statement::SwitchStatement(_)
        | Statement::TryStatement(_)
        | Statement::WhileStatement(_)
        | Statement::WithStatement(_) => false,
        Statement::ExportDefaultDeclaration(export) => {
            matches!(export.declaration, ExportDefault::Expression(_))
        }
        Statement::ExportNamedDeclaration(export) => !matches!(
            export.declaration,
            Some(Statement::FunctionDeclaration(_)) | Some(Statement::ClassDeclaration(_))
        ),
        _ => true,
    }
}

fn is_declaration(statement: &Statement) -> bool {
    match statement {
        Statement::FunctionDeclaration(_) | Statement::ClassDeclaration(_) => true,
        Statement::VariableDeclaration(declaration) => !matches!(declaration.kind, VariableKind::Var),
        _ => false,
    }
}

/// Whether an `else` placed after `statement` would bind to a nested `if`
fn ends_with_open_if(statement: &Statement) -> bool {
    match statement {
        Statement::IfStatement(node) => match &node.alternate {
            Some(alternate) => ends_with_open_if(alternate),
            None => true,
        },
        Statement::WhileStatement(node) => ends_with_open_if(&node.body),
        Statement::ForStatement(node) => ends_with_open_if(&node.body),
        Statement::ForInStatement(node) => ends_with_open_if(&node.body),
        Statement::ForOfStatement(node) => ends_with_open_if(&node.body),
        Statement::WithStatement(node) => ends_with_open_if(&node.body),
        Statement::LabeledStatement(node) => ends_with_open_if(&node.body),
        _ => false,
    }
}

/// Text that an expression statement may not start with
fn starts_ambiguously(text: &str) -> bool {
    let starts_with_word = |word: &str| {
        text.strip_prefix(word)
            .map_or(false, |rest| !rest.starts_with(|c: char| c == '_' || c == '$' || c.is_alphanumeric()))
    };
    text.starts_with('{')
        || starts_with_word("function")
        || starts_with_word("class")
        || text.starts_with("let[")
        || text.starts_with("let [")
}

/// Decimal integer spelled with digits only, which would swallow a
/// following `.` as a fraction
fn is_bare_integer(expression: &Expression) -> bool {
    match expression {
        Expression::Literal(literal) => {
            !literal.raw.is_empty() && literal.raw.bytes().all(|byte| byte.is_ascii_digit())
        }
        _ => false,
    }
}

/// Tree walker producing source text
pub struct Renderer {
    options: FormattingOptions,
    indent_level: usize,
    single_line: bool,
}

impl Renderer {
    /// Create a renderer with the given style
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            options,
            indent_level: 0,
            single_line: false,
        }
    }

    /// Style in use
    pub fn options(&self) -> &FormattingOptions {
        &self.options
    }

    /// Render a node to source text
    pub fn render<'a>(&mut self, node: impl Into<NodeRef<'a>>) -> String {
        let node = node.into();
        trace!(node = node.type_name(), "rendering");
        self.indent_level = 0;
        self.single_line = false;
        match node {
            NodeRef::Program(program) => self.program(program),
            NodeRef::Statement(statement) => self.statement(statement),
            NodeRef::Expression(expression) => self.expression(expression),
            NodeRef::Pattern(pattern) => self.pattern(pattern),
        }
    }

    // ===== Whitespace =====

    fn gap(&self) -> &'static str {
        if self.options.space_around_operators {
            " "
        } else {
            ""
        }
    }

    fn newline(&self) -> String {
        if self.single_line {
            String::new()
        } else {
            self.options.newline.clone()
        }
    }

    fn indent(&self) -> String {
        if self.single_line {
            String::new()
        } else {
            self.options.indent_unit.repeat(self.indent_level)
        }
    }

    /// Separator in front of a `{`, and of `else`, `catch`, `finally` or the
    /// `while` of a do-while
    fn before_brace(&self) -> String {
        if self.options.newline_before_brace && !self.single_line {
            format!("{}{}", self.options.newline, self.indent())
        } else {
            self.gap().to_string()
        }
    }

    fn parens(&self, inner: &str) -> String {
        if self.options.space_inside_parens && !inner.is_empty() {
            format!("( {} )", inner)
        } else {
            format!("({})", inner)
        }
    }

    fn comma(&self) -> String {
        format!(",{}", self.gap())
    }

    // ===== Statements =====

    fn program(&mut self, program: &Program) -> String {
        let newline = self.newline();
        let statements: Vec<String> = program.body.iter().map(|s| self.statement(s)).collect();
        statements.join(&newline)
    }

    fn statement(&mut self, statement: &Statement) -> String {
        let mut text = crate::stack::grow(|| self.statement_body(statement));
        if needs_semicolon(statement) {
            text.push(';');
        }
        text
    }

    fn block(&mut self, body: &[Statement]) -> String {
        if body.is_empty() {
            return "{}".to_string();
        }
        if self.single_line {
            let gap = self.gap();
            let statements: Vec<String> = body.iter().map(|s| self.statement(s)).collect();
            return format!("{{{}{}{}}}", gap, statements.join(gap), gap);
        }

        let newline = self.newline();
        let mut text = String::from("{");
        self.indent_level += 1;
        for statement in body {
            text.push_str(&newline);
            text.push_str(&self.indent());
            let rendered = self.statement(statement);
            text.push_str(&rendered);
        }
        self.indent_level -= 1;
        text.push_str(&newline);
        text.push_str(&self.indent());
        text.push('}');
        text
    }

    /// Body of a compound statement, including the separator before it
    fn clause(&mut self, body: &Statement, force_braces: bool) -> String {
        match body {
            Statement::BlockStatement(block) => {
                let brace = self.before_brace();
                format!("{}{}", brace, self.block(&block.body))
            }
            _ if force_braces || self.options.always_wrap_blocks || is_declaration(body) => {
                let brace = self.before_brace();
                format!("{}{}", brace, self.block(std::slice::from_ref(body)))
            }
            _ => format!(" {}", self.statement(body)),
        }
    }

    fn statement_body(&mut self, statement: &Statement) -> String {
        let gap = self.gap();
        match statement {
            Statement::ExpressionStatement(node) => {
                let text = self.expression(&node.expression);
                if starts_ambiguously(&text) {
                    self.parens(&text)
                } else {
                    text
                }
            }
            Statement::BlockStatement(node) => self.block(&node.body),
            Statement::EmptyStatement(_) => String::new(),
            Statement::DebuggerStatement(_) => "debugger".to_string(),
            Statement::WithStatement(node) => {
                let object = self.expression(&node.object);
                format!("with{}{}{}", gap, self.parens(&object), self.clause(&node.body, false))
            }
            Statement::ReturnStatement(node) => match &node.argument {
                Some(argument) => format!("return {}", self.expression(argument)),
                None => "return".to_string(),
            },
            Statement::LabeledStatement(node) => {
                let body = match &node.body {
                    Statement::BlockStatement(block) => {
                        let brace = self.before_brace();
                        format!("{}{}", brace, self.block(&block.body))
                    }
                    body => format!(" {}", self.statement(body)),
                };
                format!("{}:{}", node.label.name, body)
            }
            Statement::BreakStatement(node) => match &node.label {
                Some(label) => format!("break {}", label.name),
                None => "break".to_string(),
            },
            Statement::ContinueStatement(node) => match &node.label {
                Some(label) => format!("continue {}", label.name),
                None => "continue".to_string(),
            },
            Statement::IfStatement(node) => {
                let test = self.expression(&node.test);
                let dangling = node.alternate.is_some() && ends_with_open_if(&node.consequent);
                let mut text = format!(
                    "if{}{}{}",
                    gap,
                    self.parens(&test),
                    self.clause(&node.consequent, dangling)
                );
                if let Some(alternate) = &node.alternate {
                    text.push_str(&self.before_brace());
                    text.push_str("else");
                    let rendered = match alternate {
                        Statement::IfStatement(_) => format!(" {}", self.statement(alternate)),
                        _ => self.clause(alternate, false),
                    };
                    text.push_str(&rendered);
                }
                text
            }
            Statement::SwitchStatement(node) => {
                let discriminant = self.expression(&node.discriminant);
                let head = format!("switch{}{}{}", gap, self.parens(&discriminant), self.before_brace());
                if node.cases.is_empty() {
                    return format!("{}{{}}", head);
                }

                let newline = self.newline();
                let mut text = format!("{}{{", head);
                self.indent_level += 1;
                for case in &node.cases {
                    text.push_str(&newline);
                    text.push_str(&self.indent());
                    match &case.test {
                        Some(test) => {
                            let test = self.expression(test);
                            text.push_str(&format!("case {}:", test));
                        }
                        None => text.push_str("default:"),
                    }
                    self.indent_level += 1;
                    for statement in &case.consequent {
                        text.push_str(&newline);
                        text.push_str(&self.indent());
                        let rendered = self.statement(statement);
                        text.push_str(&rendered);
                    }
                    self.indent_level -= 1;
                }
                self.indent_level -= 1;
                text.push_str(&newline);
                text.push_str(&self.indent());
                text.push('}');
                text
            }
            Statement::ThrowStatement(node) => format!("throw {}", self.expression(&node.argument)),
            Statement::TryStatement(node) => {
                let brace = self.before_brace();
                let mut text = format!("try{}{}", brace, self.block(&node.block.body));
                if let Some(handler) = &node.handler {
                    let param = self.pattern(&handler.param);
                    text.push_str(&self.before_brace());
                    text.push_str(&format!("catch{}{}{}", gap, self.parens(&param), self.before_brace()));
                    let body = self.block(&handler.body.body);
                    text.push_str(&body);
                }
                if let Some(finalizer) = &node.finalizer {
                    text.push_str(&self.before_brace());
                    text.push_str(&format!("finally{}", self.before_brace()));
                    let body = self.block(&finalizer.body);
                    text.push_str(&body);
                }
                text
            }
            Statement::WhileStatement(node) => {
                let test = self.expression(&node.test);
                format!("while{}{}{}", gap, self.parens(&test), self.clause(&node.body, false))
            }
            Statement::DoWhileStatement(node) => {
                let body = self.clause(&node.body, false);
                let test = self.expression(&node.test);
                format!("do{}{}while{}{}", body, self.before_brace(), gap, self.parens(&test))
            }
            Statement::ForStatement(node) => {
                let single_line = std::mem::replace(&mut self.single_line, true);
                let init = match &node.init {
                    Some(ForInit::VariableDeclaration(declaration)) => self.variable_declaration(declaration),
                    Some(ForInit::Expression(expression)) => self.expression(expression),
                    None => String::new(),
                };
                let test = node.test.as_ref().map(|test| self.expression(test)).unwrap_or_default();
                let update = node
                    .update
                    .as_ref()
                    .map(|update| self.expression(update))
                    .unwrap_or_default();
                self.single_line = single_line;

                let head = format!(
                    "{};{}{};{}{}",
                    init,
                    if test.is_empty() { "" } else { gap },
                    test,
                    if update.is_empty() { "" } else { gap },
                    update
                );
                format!("for{}{}{}", gap, self.parens(&head), self.clause(&node.body, false))
            }
            Statement::ForInStatement(node) => {
                let head = self.for_in_of_head(&node.left, "in", &node.right);
                format!("for{}{}{}", gap, head, self.clause(&node.body, false))
            }
            Statement::ForOfStatement(node) => {
                let head = self.for_in_of_head(&node.left, "of", &node.right);
                format!("for{}{}{}", gap, head, self.clause(&node.body, false))
            }
            Statement::FunctionDeclaration(function) => self.function(function),
            Statement::VariableDeclaration(declaration) => self.variable_declaration(declaration),
            Statement::ClassDeclaration(class) => self.class(class),
            Statement::ImportDeclaration(node) => {
                if node.specifiers.is_empty() {
                    return format!("import {}", node.source.raw);
                }
                let mut clauses = Vec::new();
                let mut named = Vec::new();
                for specifier in &node.specifiers {
                    match specifier {
                        ImportClause::ImportDefaultSpecifier(specifier) => {
                            clauses.push(specifier.local.name.clone())
                        }
                        ImportClause::ImportNamespaceSpecifier(specifier) => {
                            clauses.push(format!("* as {}", specifier.local.name))
                        }
                        ImportClause::ImportSpecifier(specifier) => {
                            named.push(if specifier.imported.name == specifier.local.name {
                                specifier.local.name.clone()
                            } else {
                                format!("{} as {}", specifier.imported.name, specifier.local.name)
                            })
                        }
                    }
                }
                if !named.is_empty() {
                    clauses.push(format!("{{{}{}{}}}", gap, named.join(&self.comma()), gap));
                }
                format!("import {} from {}", clauses.join(&self.comma()), node.source.raw)
            }
            Statement::ExportNamedDeclaration(node) => {
                if let Some(declaration) = &node.declaration {
                    return format!("export {}", self.statement_body(declaration));
                }
                let specifiers: Vec<String> = node
                    .specifiers
                    .iter()
                    .map(|specifier| {
                        if specifier.local.name == specifier.exported.name {
                            specifier.local.name.clone()
                        } else {
                            format!("{} as {}", specifier.local.name, specifier.exported.name)
                        }
                    })
                    .collect();
                let clause = if specifiers.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{{}{}{}}}", gap, specifiers.join(&self.comma()), gap)
                };
                match &node.source {
                    Some(source) => format!("export {} from {}", clause, source.raw),
                    None => format!("export {}", clause),
                }
            }
            Statement::ExportDefaultDeclaration(node) => {
                let declaration = match &node.declaration {
                    ExportDefault::FunctionDeclaration(function) => self.function(function),
                    ExportDefault::ClassDeclaration(class) => self.class(class),
                    ExportDefault::Expression(expression) => self.expression(expression),
                };
                format!("export default {}", declaration)
            }
            Statement::ExportAllDeclaration(node) => format!("export * from {}", node.source.raw),
        }
    }

    fn for_in_of_head(&mut self, left: &ForInOfLeft, keyword: &str, right: &Expression) -> String {
        let single_line = std::mem::replace(&mut self.single_line, true);
        let left = match left {
            ForInOfLeft::VariableDeclaration(declaration) => self.variable_declaration(declaration),
            ForInOfLeft::Pattern(pattern) => self.pattern(pattern),
        };
        let right = self.expression(right);
        self.single_line = single_line;
        self.parens(&format!("{} {} {}", left, keyword, right))
    }

    fn variable_declaration(&mut self, declaration: &VariableDeclaration) -> String {
        let gap = self.gap();
        let multiline = !self.single_line && declaration.declarations.len() > 1;
        let separator = if multiline {
            self.indent_level += 1;
            format!(",{}{}", self.newline(), self.indent())
        } else {
            self.comma()
        };
        let declarators: Vec<String> = declaration
            .declarations
            .iter()
            .map(|declarator| {
                let id = self.pattern(&declarator.id);
                match &declarator.init {
                    Some(init) => format!("{}{}={}{}", id, gap, gap, self.expression(init)),
                    None => id,
                }
            })
            .collect();
        if multiline {
            self.indent_level -= 1;
        }
        format!("{} {}", declaration.kind.as_str(), declarators.join(&separator))
    }

    // ===== Functions and classes =====

    fn params(&mut self, params: &[Pattern]) -> String {
        let params: Vec<String> = params.iter().map(|param| self.pattern(param)).collect();
        self.parens(&params.join(&self.comma()))
    }

    /// Parameters and body, shared by functions, methods and accessors
    fn function_tail(&mut self, function: &Function) -> String {
        let params = self.params(&function.params);
        let brace = self.before_brace();
        format!("{}{}{}", params, brace, self.block(&function.body.body))
    }

    fn function(&mut self, function: &Function) -> String {
        let mut text = String::from("function");
        if function.generator {
            text.push('*');
        }
        if let Some(id) = &function.id {
            text.push(' ');
            text.push_str(&id.name);
        }
        text.push_str(&self.function_tail(function));
        text
    }

    fn class(&mut self, class: &Class) -> String {
        let mut text = String::from("class");
        if let Some(id) = &class.id {
            text.push(' ');
            text.push_str(&id.name);
        }
        if let Some(super_class) = &class.super_class {
            text.push_str(" extends ");
            text.push_str(&self.expression(super_class));
        }
        text.push_str(&self.before_brace());
        if class.body.body.is_empty() {
            text.push_str("{}");
            return text;
        }

        let newline = self.newline();
        text.push('{');
        self.indent_level += 1;
        for method in &class.body.body {
            text.push_str(&newline);
            text.push_str(&self.indent());
            if method.is_static {
                text.push_str("static ");
            }
            let key = self.property_key(&method.key, method.computed);
            let rendered = match method.kind {
                MethodKind::Get => format!("get {}{}", key, self.function_tail(&method.value)),
                MethodKind::Set => format!("set {}{}", key, self.function_tail(&method.value)),
                MethodKind::Constructor | MethodKind::Method => {
                    let star = if method.value.generator { "*" } else { "" };
                    format!("{}{}{}", star, key, self.function_tail(&method.value))
                }
            };
            text.push_str(&rendered);
        }
        self.indent_level -= 1;
        text.push_str(&newline);
        text.push_str(&self.indent());
        text.push('}');
        text
    }

    fn property_key(&mut self, key: &Expression, computed: bool) -> String {
        let key = self.expression(key);
        if computed {
            format!("[{}]", key)
        } else {
            key
        }
    }

    // ===== Expressions =====

    fn expression(&mut self, expression: &Expression) -> String {
        crate::stack::grow(|| self.expression_kind(expression))
    }

    fn expression_kind(&mut self, expression: &Expression) -> String {
        let gap = self.gap();
        match expression {
            Expression::Identifier(identifier) => identifier.name.clone(),
            Expression::Literal(literal) => literal.raw.clone(),
            Expression::RegExpLiteral(regexp) => regexp.raw.clone(),
            Expression::TemplateLiteral(template) => self.template(template),
            Expression::TaggedTemplateExpression(node) => {
                let tag = self.expression(&node.tag);
                format!("{}{}", tag, self.template(&node.quasi))
            }
            Expression::ThisExpression(_) => "this".to_string(),
            Expression::Super(_) => "super".to_string(),
            Expression::ArrayExpression(array) => {
                let elements: Vec<Option<String>> = array
                    .elements
                    .iter()
                    .map(|element| element.as_ref().map(|element| self.expression(element)))
                    .collect();
                self.array(elements)
            }
            Expression::ObjectExpression(object) => {
                self.indent_level += 1;
                let properties: Vec<String> = object.properties.iter().map(|p| self.property(p)).collect();
                self.indent_level -= 1;
                self.object(properties)
            }
            Expression::FunctionExpression(function) => self.function(function),
            Expression::ArrowFunctionExpression(arrow) => {
                let params = match arrow.params.as_slice() {
                    [Pattern::Identifier(identifier)] => identifier.name.clone(),
                    params => self.params(params),
                };
                let body = match &arrow.body {
                    ArrowBody::Block(block) => self.block(&block.body),
                    ArrowBody::Expression(expression) => {
                        let body = self.expression(expression);
                        if body.starts_with('{') {
                            self.parens(&body)
                        } else {
                            body
                        }
                    }
                };
                format!("{}{}=>{}{}", params, gap, gap, body)
            }
            Expression::ClassExpression(class) => self.class(class),
            Expression::MetaProperty(node) => format!("{}.{}", node.meta.name, node.property.name),
            Expression::ParenthesizedExpression(node) => {
                let inner = self.expression(&node.expression);
                self.parens(&inner)
            }
            Expression::SequenceExpression(node) => {
                let expressions: Vec<String> =
                    node.expressions.iter().map(|e| self.expression(e)).collect();
                expressions.join(&self.comma())
            }
            Expression::UnaryExpression(node) => {
                let operator = node.operator.as_str();
                let argument = self.expression(&node.argument);
                // `- -a` must not fuse into `--a`
                let fuses = matches!(operator, "+" | "-") && argument.starts_with(operator);
                if node.operator.is_keyword() || fuses {
                    format!("{} {}", operator, argument)
                } else {
                    format!("{}{}", operator, argument)
                }
            }
            Expression::UpdateExpression(node) => {
                let argument = self.expression(&node.argument);
                if node.prefix {
                    format!("{}{}", node.operator.as_str(), argument)
                } else {
                    format!("{}{}", argument, node.operator.as_str())
                }
            }
            Expression::BinaryExpression(node) => {
                self.binary(&node.left, node.operator.as_str(), node.operator.is_keyword(), &node.right)
            }
            Expression::LogicalExpression(node) => {
                self.binary(&node.left, node.operator.as_str(), false, &node.right)
            }
            Expression::AssignmentExpression(node) => {
                let left = self.pattern(&node.left);
                let right = self.expression(&node.right);
                format!("{}{}{}{}{}", left, gap, node.operator.as_str(), gap, right)
            }
            Expression::ConditionalExpression(node) => {
                let test = self.expression(&node.test);
                let consequent = self.expression(&node.consequent);
                let alternate = self.expression(&node.alternate);
                format!("{test}{gap}?{gap}{consequent}{gap}:{gap}{alternate}")
            }
            Expression::CallExpression(node) => {
                let callee = self.expression(&node.callee);
                format!("{}{}", callee, self.arguments(&node.arguments))
            }
            Expression::NewExpression(node) => {
                let callee = self.expression(&node.callee);
                format!("new {}{}", callee, self.arguments(&node.arguments))
            }
            Expression::MemberExpression(node) => {
                let mut object = self.expression(&node.object);
                let property = self.expression(&node.property);
                if node.computed {
                    format!("{}[{}]", object, property)
                } else {
                    if is_bare_integer(&node.object) {
                        object.push(' ');
                    }
                    format!("{}.{}", object, property)
                }
            }
            Expression::SpreadElement(node) => format!("...{}", self.expression(&node.argument)),
            Expression::YieldExpression(node) => {
                let keyword = if node.delegate { "yield*" } else { "yield" };
                match &node.argument {
                    Some(argument) => {
                        let argument = self.expression(argument);
                        if node.delegate {
                            format!("{}{}{}", keyword, gap, argument)
                        } else {
                            format!("{} {}", keyword, argument)
                        }
                    }
                    None => keyword.to_string(),
                }
            }
        }
    }

    fn binary(&mut self, left: &Expression, operator: &str, keyword: bool, right: &Expression) -> String {
        let left = self.expression(left);
        let right = self.expression(right);
        if keyword || self.options.space_around_operators {
            return format!("{} {} {}", left, operator, right);
        }
        // `a - -b` and `a / /re/` must not fuse into `--` or `//`
        let fuses = operator
            .chars()
            .last()
            .map_or(false, |last| matches!(last, '+' | '-' | '/') && right.starts_with(last));
        if fuses {
            format!("{}{} {}", left, operator, right)
        } else {
            format!("{}{}{}", left, operator, right)
        }
    }

    fn arguments(&mut self, arguments: &[Expression]) -> String {
        let arguments: Vec<String> = arguments.iter().map(|a| self.expression(a)).collect();
        self.parens(&arguments.join(&self.comma()))
    }

    fn template(&mut self, template: &TemplateLiteral) -> String {
        let mut text = String::from("`");
        for (index, quasi) in template.quasis.iter().enumerate() {
            text.push_str(&quasi.raw);
            if let Some(expression) = template.expressions.get(index) {
                let expression = self.expression(expression);
                text.push_str("${");
                text.push_str(&expression);
                text.push('}');
            }
        }
        text.push('`');
        text
    }

    /// `[a, , b]`; a trailing hole needs its own comma
    fn array(&self, elements: Vec<Option<String>>) -> String {
        let trailing_hole = matches!(elements.last(), Some(None));
        let elements: Vec<String> = elements.into_iter().map(Option::unwrap_or_default).collect();
        let mut text = format!("[{}", elements.join(&self.comma()));
        if trailing_hole {
            text.push(',');
        }
        text.push(']');
        text
    }

    /// Object literal or pattern from already rendered members, one per line
    /// outside single-line mode
    fn object(&self, members: Vec<String>) -> String {
        if members.is_empty() {
            return "{}".to_string();
        }
        let newline = self.newline();
        if newline.is_empty() {
            let gap = self.gap();
            return format!("{{{}{}{}}}", gap, members.join(&self.comma()), gap);
        }
        let inner_indent = self.options.indent_unit.repeat(self.indent_level + 1);
        let separator = format!(",{}{}", newline, inner_indent);
        format!(
            "{{{}{}{}{}{}}}",
            newline,
            inner_indent,
            members.join(&separator),
            newline,
            self.indent()
        )
    }

    fn property(&mut self, property: &Property) -> String {
        let gap = self.gap();
        let key = self.property_key(&property.key, property.computed);
        let function = match &property.value {
            Expression::FunctionExpression(function) if property.method || property.kind != PropertyKind::Init => {
                Some(function)
            }
            _ => None,
        };
        if let Some(function) = function {
            return match property.kind {
                PropertyKind::Get => format!("get {}{}", key, self.function_tail(function)),
                PropertyKind::Set => format!("set {}{}", key, self.function_tail(function)),
                PropertyKind::Init => {
                    let star = if function.generator { "*" } else { "" };
                    format!("{}{}{}", star, key, self.function_tail(function))
                }
            };
        }
        if property.shorthand {
            // `{a}` or `{a = 1}`
            return self.expression(&property.value);
        }
        format!("{}:{}{}", key, gap, self.expression(&property.value))
    }

    // ===== Patterns =====

    fn pattern(&mut self, pattern: &Pattern) -> String {
        crate::stack::grow(|| self.pattern_kind(pattern))
    }

    fn pattern_kind(&mut self, pattern: &Pattern) -> String {
        let gap = self.gap();
        match pattern {
            Pattern::Identifier(identifier) => identifier.name.clone(),
            Pattern::MemberExpression(member) => {
                let mut object = self.expression(&member.object);
                let property = self.expression(&member.property);
                if member.computed {
                    format!("{}[{}]", object, property)
                } else {
                    if is_bare_integer(&member.object) {
                        object.push(' ');
                    }
                    format!("{}.{}", object, property)
                }
            }
            Pattern::ArrayPattern(array) => {
                let elements: Vec<Option<String>> = array
                    .elements
                    .iter()
                    .map(|element| element.as_ref().map(|element| self.pattern(element)))
                    .collect();
                self.array(elements)
            }
            Pattern::ObjectPattern(object) => {
                self.indent_level += 1;
                let properties: Vec<String> = object
                    .properties
                    .iter()
                    .map(|property| {
                        if property.shorthand {
                            return self.pattern(&property.value);
                        }
                        let key = self.property_key(&property.key, property.computed);
                        format!("{}:{}{}", key, gap, self.pattern(&property.value))
                    })
                    .collect();
                self.indent_level -= 1;
                self.object(properties)
            }
            Pattern::AssignmentPattern(node) => {
                let left = self.pattern(&node.left);
                let right = self.expression(&node.right);
                format!("{}{}={}{}", left, gap, gap, right)
            }
            Pattern::RestElement(node) => format!("...{}", self.pattern(&node.argument)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseOptions, Parser};

    fn pretty(source: &str) -> String {
        let program = Parser::new(source, ParseOptions::default()).parse().expect("Failed to parse");
        render(&program, &FormattingOptions::pretty_print())
    }

    fn compact(source: &str) -> String {
        let program = Parser::new(source, ParseOptions::default()).parse().expect("Failed to parse");
        render(&program, &FormattingOptions::compact())
    }

    #[test]
    fn test_presets() {
        assert_eq!(FormattingOptions::default(), FormattingOptions::pretty_print());
        let compact = FormattingOptions::compact();
        assert!(compact.newline.is_empty());
        assert!(!compact.space_around_operators);
        let expanded = FormattingOptions::expanded();
        assert!(expanded.newline_before_brace && expanded.always_wrap_blocks);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: FormattingOptions = serde_json::from_str(r#"{"indent_unit": "\t"}"#).unwrap();
        assert_eq!(options.indent_unit, "\t");
        assert_eq!(options.newline, "\n");
    }

    #[test]
    fn test_semicolons() {
        assert_eq!(pretty("a = 1\nb()"), "a = 1;\nb();");
        assert_eq!(pretty("function f() {}"), "function f() {}");
        assert_eq!(pretty("do x(); while (y)"), "do x(); while (y);");
    }

    #[test]
    fn test_block_indentation() {
        assert_eq!(
            pretty("function f(a, b) { if (a) { return b } }"),
            "function f(a, b) {\n    if (a) {\n        return b;\n    }\n}"
        );
    }

    #[test]
    fn test_compact() {
        assert_eq!(compact("if (a) { b = 1; } else c()"), "if(a){b=1;}else c();");
        assert_eq!(compact("a - -b; a + ++b; x / /re/"), "a- -b;a+ ++b;x/ /re/;");
        assert_eq!(compact("typeof a in b"), "typeof a in b;");
    }

    #[test]
    fn test_expanded_wraps_bodies() {
        let program = Parser::new("while (a) b();", ParseOptions::default()).parse().unwrap();
        assert_eq!(
            render(&program, &FormattingOptions::expanded()),
            "while ( a )\n{\n    b();\n}"
        );
    }

    #[test]
    fn test_for_header_is_single_line() {
        assert_eq!(
            pretty("for (var i = 0, j = 1; i < j; i++) {}"),
            "for (var i = 0, j = 1; i < j; i++) {}"
        );
        assert_eq!(pretty("for (;;) {}"), "for (;;) {}");
        assert_eq!(pretty("var a = 1, b = 2"), "var a = 1,\n    b = 2;");
    }

    #[test]
    fn test_object_literal_layout() {
        assert_eq!(pretty("x = {a: 1, b}"), "x = {\n    a: 1,\n    b\n};");
        assert_eq!(compact("x = {a: 1, get b() { return 2 }}"), "x={a:1,get b(){return 2;}};");
    }

    #[test]
    fn test_integer_member_object() {
        assert_eq!(pretty("1 .toString()"), "1 .toString();");
        assert_eq!(pretty("1.5.toFixed()"), "1.5.toFixed();");
    }

    #[test]
    fn test_arrays_keep_holes() {
        assert_eq!(pretty("[a, , b, ,]"), "[a, , b, ,];");
    }

    #[test]
    fn test_dangling_else_gets_braces() {
        let mut program = Parser::new("if (a) { if (b) c(); } else d();", ParseOptions::default())
            .parse()
            .unwrap();
        // Replace the block with its only statement
        let Statement::IfStatement(node) = &mut program.body[0] else {
            panic!("expected if statement");
        };
        let inner = match &mut node.consequent {
            Statement::BlockStatement(block) => block.body.remove(0),
            other => panic!("expected block, got {:?}", other),
        };
        node.consequent = inner;
        assert_eq!(
            render(&program, &FormattingOptions::pretty_print()),
            "if (a) {\n    if (b) c();\n} else d();"
        );
    }

    #[test]
    fn test_render_single_nodes() {
        let program = Parser::new("a || b && c", ParseOptions::default()).parse().unwrap();
        let Statement::ExpressionStatement(statement) = &program.body[0] else {
            panic!("expected expression statement");
        };
        assert_eq!(render(&statement.expression, &FormattingOptions::compact()), "a||b&&c");
        assert_eq!(render(&program.body[0], &FormattingOptions::default()), "a || b && c;");
    }
}
