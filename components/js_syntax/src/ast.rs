//! Syntax tree node definitions
//!
//! Every node owns exactly one [`SourceLocation`]. Nodes are built in one
//! piece once the parser knows all of their children and the end position,
//! and are never mutated afterwards.
//!
//! The node enums serialize with an ESTree-style `"type"` tag, so a tree can
//! be dumped as JSON with [`Program::to_json`].

use core_types::SourceLocation;
use serde::{Deserialize, Serialize};

use crate::literal::cook_template;

macro_rules! operators {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$doc:meta])* $variant:ident => $text:literal, )+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(
                $(#[$doc])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Source spelling of the operator
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }

            /// Operator for a token value
            pub fn from_token(value: &str) -> Option<Self> {
                match value {
                    $( $text => Some($name::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

operators! {
    /// Binary operators
    BinaryOperator {
        /// Addition
        Add => "+",
        /// Subtraction
        Sub => "-",
        /// Multiplication
        Mul => "*",
        /// Division
        Div => "/",
        /// Modulo
        Mod => "%",
        /// Equality
        Eq => "==",
        /// Inequality
        NotEq => "!=",
        /// Strict equality
        StrictEq => "===",
        /// Strict inequality
        StrictNotEq => "!==",
        /// Less than
        Lt => "<",
        /// Less than or equal
        LtEq => "<=",
        /// Greater than
        Gt => ">",
        /// Greater than or equal
        GtEq => ">=",
        /// Bitwise AND
        BitwiseAnd => "&",
        /// Bitwise OR
        BitwiseOr => "|",
        /// Bitwise XOR
        BitwiseXor => "^",
        /// Left shift
        LeftShift => "<<",
        /// Right shift
        RightShift => ">>",
        /// Unsigned right shift
        UnsignedRightShift => ">>>",
        /// Instanceof
        Instanceof => "instanceof",
        /// In
        In => "in",
    }
}

operators! {
    /// Logical operators
    LogicalOperator {
        /// Logical AND
        And => "&&",
        /// Logical OR
        Or => "||",
    }
}

operators! {
    /// Unary operators
    UnaryOperator {
        /// Negate
        Minus => "-",
        /// Plus (type coercion)
        Plus => "+",
        /// Logical NOT
        Not => "!",
        /// Bitwise NOT
        BitwiseNot => "~",
        /// Typeof
        Typeof => "typeof",
        /// Void
        Void => "void",
        /// Delete
        Delete => "delete",
    }
}

operators! {
    /// Update operators
    UpdateOperator {
        /// Increment
        Increment => "++",
        /// Decrement
        Decrement => "--",
    }
}

operators! {
    /// Assignment operators
    AssignmentOperator {
        /// Simple assignment (=)
        Assign => "=",
        /// Addition assignment (+=)
        AddAssign => "+=",
        /// Subtraction assignment (-=)
        SubAssign => "-=",
        /// Multiplication assignment (*=)
        MulAssign => "*=",
        /// Division assignment (/=)
        DivAssign => "/=",
        /// Modulo assignment (%=)
        ModAssign => "%=",
        /// Left shift assignment (<<=)
        LeftShiftAssign => "<<=",
        /// Right shift assignment (>>=)
        RightShiftAssign => ">>=",
        /// Unsigned right shift assignment (>>>=)
        UnsignedRightShiftAssign => ">>>=",
        /// Bitwise AND assignment (&=)
        BitAndAssign => "&=",
        /// Bitwise XOR assignment (^=)
        BitXorAssign => "^=",
        /// Bitwise OR assignment (|=)
        BitOrAssign => "|=",
    }
}

impl UnaryOperator {
    /// Whether the operator is a word and needs a space before its operand
    pub fn is_keyword(self) -> bool {
        matches!(self, UnaryOperator::Typeof | UnaryOperator::Void | UnaryOperator::Delete)
    }
}

impl BinaryOperator {
    /// Whether the operator is a word and always needs surrounding spaces
    pub fn is_keyword(self) -> bool {
        matches!(self, BinaryOperator::Instanceof | BinaryOperator::In)
    }
}

/// Top-level grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Statement list, sloppy mode unless a directive says otherwise
    #[default]
    Script,
    /// Module item list, always strict
    Module,
}

/// Complete program
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Program {
    /// Grammar the program was parsed with
    #[serde(rename = "sourceType")]
    pub source_type: SourceType,
    /// Statements and module declarations
    pub body: Vec<Statement>,
    /// Source location
    pub loc: SourceLocation,
}

impl Program {
    /// ESTree-style JSON form of the tree
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// JavaScript statements and module declarations
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Statement {
    /// Expression followed by end of statement
    ExpressionStatement(Box<ExpressionStatement>),
    /// `{ ... }`
    BlockStatement(Box<BlockStatement>),
    /// `;`
    EmptyStatement(EmptyStatement),
    /// `debugger`
    DebuggerStatement(DebuggerStatement),
    /// `with (object) body`
    WithStatement(Box<WithStatement>),
    /// `return argument`
    ReturnStatement(Box<ReturnStatement>),
    /// `label: body`
    LabeledStatement(Box<LabeledStatement>),
    /// `break label`
    BreakStatement(Box<BreakStatement>),
    /// `continue label`
    ContinueStatement(Box<ContinueStatement>),
    /// `if (test) consequent else alternate`
    IfStatement(Box<IfStatement>),
    /// `switch (discriminant) { cases }`
    SwitchStatement(Box<SwitchStatement>),
    /// `throw argument`
    ThrowStatement(Box<ThrowStatement>),
    /// `try block catch finally`
    TryStatement(Box<TryStatement>),
    /// `while (test) body`
    WhileStatement(Box<WhileStatement>),
    /// `do body while (test)`
    DoWhileStatement(Box<DoWhileStatement>),
    /// C-style `for`
    ForStatement(Box<ForStatement>),
    /// `for (left in right)`
    ForInStatement(Box<ForInStatement>),
    /// `for (left of right)`
    ForOfStatement(Box<ForOfStatement>),
    /// `function name() {}`
    FunctionDeclaration(Box<Function>),
    /// `var`, `let` or `const` declaration
    VariableDeclaration(Box<VariableDeclaration>),
    /// `class Name {}`
    ClassDeclaration(Box<Class>),
    /// `import ... from "source"`
    ImportDeclaration(Box<ImportDeclaration>),
    /// `export { ... }` or `export <declaration>`
    ExportNamedDeclaration(Box<ExportNamedDeclaration>),
    /// `export default ...`
    ExportDefaultDeclaration(Box<ExportDefaultDeclaration>),
    /// `export * from "source"`
    ExportAllDeclaration(Box<ExportAllDeclaration>),
}

/// Expression statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    /// The expression
    pub expression: Expression,
    /// Raw directive text for directive prologue entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
    /// Source location
    pub loc: SourceLocation,
}

/// Block statement, also used for function bodies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStatement {
    /// Statements in the block
    pub body: Vec<Statement>,
    /// Source location
    pub loc: SourceLocation,
}

/// Empty statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyStatement {
    /// Source location
    pub loc: SourceLocation,
}

/// Debugger statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebuggerStatement {
    /// Source location
    pub loc: SourceLocation,
}

/// With statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithStatement {
    /// Scope object
    pub object: Expression,
    /// Body
    pub body: Statement,
    /// Source location
    pub loc: SourceLocation,
}

/// Return statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement {
    /// Returned value
    pub argument: Option<Expression>,
    /// Source location
    pub loc: SourceLocation,
}

/// Labeled statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledStatement {
    /// Label
    pub label: Identifier,
    /// Labeled statement
    pub body: Statement,
    /// Source location
    pub loc: SourceLocation,
}

/// Break statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakStatement {
    /// Optional label
    pub label: Option<Identifier>,
    /// Source location
    pub loc: SourceLocation,
}

/// Continue statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinueStatement {
    /// Optional label
    pub label: Option<Identifier>,
    /// Source location
    pub loc: SourceLocation,
}

/// If statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStatement {
    /// Condition
    pub test: Expression,
    /// Then branch
    pub consequent: Statement,
    /// Else branch
    pub alternate: Option<Statement>,
    /// Source location
    pub loc: SourceLocation,
}

/// Switch statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchStatement {
    /// Value being switched on
    pub discriminant: Expression,
    /// Case clauses, at most one of them without a test
    pub cases: Vec<SwitchCase>,
    /// Source location
    pub loc: SourceLocation,
}

/// Switch case clause
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchCase {
    /// Test expression, `None` for `default`
    pub test: Option<Expression>,
    /// Statements of the clause
    pub consequent: Vec<Statement>,
    /// Source location
    pub loc: SourceLocation,
}

/// Throw statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThrowStatement {
    /// Thrown value
    pub argument: Expression,
    /// Source location
    pub loc: SourceLocation,
}

/// Try statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TryStatement {
    /// Protected block
    pub block: BlockStatement,
    /// Catch clause
    pub handler: Option<CatchClause>,
    /// Finally block
    pub finalizer: Option<BlockStatement>,
    /// Source location
    pub loc: SourceLocation,
}

/// Catch clause
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchClause {
    /// Caught value binding
    pub param: Pattern,
    /// Handler body
    pub body: BlockStatement,
    /// Source location
    pub loc: SourceLocation,
}

/// While statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStatement {
    /// Condition
    pub test: Expression,
    /// Body
    pub body: Statement,
    /// Source location
    pub loc: SourceLocation,
}

/// Do-while statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoWhileStatement {
    /// Body
    pub body: Statement,
    /// Condition
    pub test: Expression,
    /// Source location
    pub loc: SourceLocation,
}

/// For loop initialization
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForInit {
    /// Variable declaration
    VariableDeclaration(VariableDeclaration),
    /// Expression
    Expression(Expression),
}

/// C-style for statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStatement {
    /// Initialization
    pub init: Option<ForInit>,
    /// Condition
    pub test: Option<Expression>,
    /// Update
    pub update: Option<Expression>,
    /// Body
    pub body: Statement,
    /// Source location
    pub loc: SourceLocation,
}

/// Left side of for-in/for-of loop
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForInOfLeft {
    /// Declaration with a single declarator (`var x`, `let [a, b]`)
    VariableDeclaration(VariableDeclaration),
    /// Existing binding or destructuring target
    Pattern(Pattern),
}

/// For-in statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForInStatement {
    /// Iteration binding
    pub left: ForInOfLeft,
    /// Object whose keys are iterated
    pub right: Expression,
    /// Body
    pub body: Statement,
    /// Source location
    pub loc: SourceLocation,
}

/// For-of statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForOfStatement {
    /// Iteration binding
    pub left: ForInOfLeft,
    /// Iterated value
    pub right: Expression,
    /// Body
    pub body: Statement,
    /// Source location
    pub loc: SourceLocation,
}

/// Variable declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// `var`
    Var,
    /// `let`
    Let,
    /// `const`
    Const,
}

impl VariableKind {
    /// Keyword spelling
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

/// Variable declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    /// Declaration kind
    pub kind: VariableKind,
    /// Declarators, never empty
    pub declarations: Vec<VariableDeclarator>,
    /// Source location
    pub loc: SourceLocation,
}

/// Variable declarator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclarator {
    /// Binding
    pub id: Pattern,
    /// Initializer
    pub init: Option<Expression>,
    /// Source location
    pub loc: SourceLocation,
}

/// Function declaration or expression, also the value of a method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    /// Function name
    pub id: Option<Identifier>,
    /// Parameters
    pub params: Vec<Pattern>,
    /// Body
    pub body: BlockStatement,
    /// Is generator function
    pub generator: bool,
    /// Source location
    pub loc: SourceLocation,
}

/// Class declaration or expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    /// Class name
    pub id: Option<Identifier>,
    /// Heritage expression
    #[serde(rename = "superClass")]
    pub super_class: Option<Expression>,
    /// Class body
    pub body: ClassBody,
    /// Source location
    pub loc: SourceLocation,
}

/// Class body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassBody {
    /// Methods
    pub body: Vec<MethodDefinition>,
    /// Source location
    pub loc: SourceLocation,
}

/// Method kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    /// Class constructor
    Constructor,
    /// Ordinary method
    Method,
    /// Getter
    Get,
    /// Setter
    Set,
}

/// Method of a class or an object literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDefinition {
    /// Method name
    pub key: Expression,
    /// Method function
    pub value: Function,
    /// Method kind
    pub kind: MethodKind,
    /// Is the key computed (`[expr]`)
    pub computed: bool,
    /// Is static
    #[serde(rename = "static")]
    pub is_static: bool,
    /// Source location
    pub loc: SourceLocation,
}

/// Import specifier
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ImportClause {
    /// `{ imported as local }`
    ImportSpecifier(ImportSpecifier),
    /// `local`
    ImportDefaultSpecifier(ImportDefaultSpecifier),
    /// `* as local`
    ImportNamespaceSpecifier(ImportNamespaceSpecifier),
}

/// Named import specifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSpecifier {
    /// Exported name in the source module
    pub imported: Identifier,
    /// Local binding
    pub local: Identifier,
    /// Source location
    pub loc: SourceLocation,
}

/// Default import specifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportDefaultSpecifier {
    /// Local binding
    pub local: Identifier,
    /// Source location
    pub loc: SourceLocation,
}

/// Namespace import specifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportNamespaceSpecifier {
    /// Local binding
    pub local: Identifier,
    /// Source location
    pub loc: SourceLocation,
}

/// Import declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportDeclaration {
    /// Specifiers, empty for `import "source"`
    pub specifiers: Vec<ImportClause>,
    /// Module specifier
    pub source: Literal,
    /// Source location
    pub loc: SourceLocation,
}

/// Export specifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSpecifier {
    /// Local name
    pub local: Identifier,
    /// Exported name
    pub exported: Identifier,
    /// Source location
    pub loc: SourceLocation,
}

/// Named export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportNamedDeclaration {
    /// Exported declaration
    pub declaration: Option<Statement>,
    /// Export clause entries
    pub specifiers: Vec<ExportSpecifier>,
    /// Re-export source
    pub source: Option<Literal>,
    /// Source location
    pub loc: SourceLocation,
}

/// Value of `export default`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportDefault {
    /// Function declaration, name optional
    FunctionDeclaration(Function),
    /// Class declaration, name optional
    ClassDeclaration(Class),
    /// Any assignment expression
    Expression(Expression),
}

/// Default export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDefaultDeclaration {
    /// Exported value
    pub declaration: ExportDefault,
    /// Source location
    pub loc: SourceLocation,
}

/// `export * from "source"`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportAllDeclaration {
    /// Re-export source
    pub source: Literal,
    /// Source location
    pub loc: SourceLocation,
}

/// JavaScript expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    /// Identifier reference
    Identifier(Identifier),
    /// Null, boolean, string or numeric literal
    Literal(Box<Literal>),
    /// Regular expression literal
    RegExpLiteral(Box<RegExpLiteral>),
    /// Template literal
    TemplateLiteral(Box<TemplateLiteral>),
    /// Tagged template
    TaggedTemplateExpression(Box<TaggedTemplateExpression>),
    /// `this`
    ThisExpression(ThisExpression),
    /// `super` as callee or member object
    Super(Super),
    /// `[a, , ...b]`
    ArrayExpression(Box<ArrayExpression>),
    /// `{a: 1, b}`
    ObjectExpression(Box<ObjectExpression>),
    /// `function () {}`
    FunctionExpression(Box<Function>),
    /// `(a) => body`
    ArrowFunctionExpression(Box<ArrowFunctionExpression>),
    /// `class {}`
    ClassExpression(Box<Class>),
    /// `new.target`
    MetaProperty(Box<MetaProperty>),
    /// `(expression)`
    ParenthesizedExpression(Box<ParenthesizedExpression>),
    /// `a, b`
    SequenceExpression(Box<SequenceExpression>),
    /// `!a`, `typeof a`
    UnaryExpression(Box<UnaryExpression>),
    /// `a++`, `--a`
    UpdateExpression(Box<UpdateExpression>),
    /// `a + b`
    BinaryExpression(Box<BinaryExpression>),
    /// `a && b`
    LogicalExpression(Box<LogicalExpression>),
    /// `a = b`
    AssignmentExpression(Box<AssignmentExpression>),
    /// `a ? b : c`
    ConditionalExpression(Box<ConditionalExpression>),
    /// `f(a)`
    CallExpression(Box<CallExpression>),
    /// `new F(a)`
    NewExpression(Box<NewExpression>),
    /// `a.b`, `a[b]`
    MemberExpression(Box<MemberExpression>),
    /// `...a` in arrays and arguments
    SpreadElement(Box<SpreadElement>),
    /// `yield a`
    YieldExpression(Box<YieldExpression>),
}

/// Identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    /// Name with escapes decoded
    pub name: String,
    /// Source location
    pub loc: SourceLocation,
}

/// Decoded literal value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    /// `null`
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// Numeric literal
    Number(f64),
    /// String literal with escapes decoded
    String(String),
}

/// Literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    /// Decoded value
    pub value: LiteralValue,
    /// Source spelling
    pub raw: String,
    /// Source location
    pub loc: SourceLocation,
}

/// Regular expression literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegExpLiteral {
    /// Source spelling, `/pattern/flags`
    pub raw: String,
    /// Source location
    pub loc: SourceLocation,
}

impl RegExpLiteral {
    /// Pattern between the slashes
    pub fn pattern(&self) -> &str {
        match self.raw.rfind('/') {
            Some(end) if end > 0 => &self.raw[1..end],
            _ => "",
        }
    }

    /// Flags after the closing slash
    pub fn flags(&self) -> &str {
        match self.raw.rfind('/') {
            Some(end) => &self.raw[end + 1..],
            None => "",
        }
    }
}

/// Template literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLiteral {
    /// String parts, one more than `expressions`
    pub quasis: Vec<TemplateElement>,
    /// Embedded expressions
    pub expressions: Vec<Expression>,
    /// Source location
    pub loc: SourceLocation,
}

/// String part of a template literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateElement {
    /// Source text between the delimiters
    pub raw: String,
    /// Text with escapes decoded
    pub cooked: String,
    /// Is the last part
    pub tail: bool,
    /// Source location
    pub loc: SourceLocation,
}

impl TemplateElement {
    /// Build an element from its raw text
    pub fn new(raw: impl Into<String>, tail: bool, loc: SourceLocation) -> Self {
        let raw = raw.into();
        let cooked = cook_template(&raw);
        Self {
            raw,
            cooked,
            tail,
            loc,
        }
    }
}

/// Tagged template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedTemplateExpression {
    /// Tag function
    pub tag: Expression,
    /// Template
    pub quasi: TemplateLiteral,
    /// Source location
    pub loc: SourceLocation,
}

/// `this`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThisExpression {
    /// Source location
    pub loc: SourceLocation,
}

/// `super`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Super {
    /// Source location
    pub loc: SourceLocation,
}

/// Array literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayExpression {
    /// Elements, `None` for holes
    pub elements: Vec<Option<Expression>>,
    /// Source location
    pub loc: SourceLocation,
}

/// Object literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectExpression {
    /// Properties
    pub properties: Vec<Property>,
    /// Source location
    pub loc: SourceLocation,
}

/// Property kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// Value or method
    Init,
    /// Getter
    Get,
    /// Setter
    Set,
}

/// Object literal property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    /// Property name
    pub key: Expression,
    /// Value; for a shorthand with default (`{a = 1}`) an assignment whose
    /// left side is the key
    pub value: Expression,
    /// Property kind
    pub kind: PropertyKind,
    /// Is a method (`a() {}`)
    pub method: bool,
    /// Is shorthand (`{a}`)
    pub shorthand: bool,
    /// Is the key computed (`[expr]`)
    pub computed: bool,
    /// Source location
    pub loc: SourceLocation,
}

/// Body of an arrow function
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrowBody {
    /// `=> { ... }`
    Block(BlockStatement),
    /// `=> expression`
    Expression(Expression),
}

/// Arrow function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowFunctionExpression {
    /// Parameters
    pub params: Vec<Pattern>,
    /// Body
    pub body: ArrowBody,
    /// Source location
    pub loc: SourceLocation,
}

/// `new.target`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaProperty {
    /// `new`
    pub meta: Identifier,
    /// `target`
    pub property: Identifier,
    /// Source location
    pub loc: SourceLocation,
}

/// Parenthesized expression, kept so rendering preserves grouping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParenthesizedExpression {
    /// Inner expression
    pub expression: Expression,
    /// Source location
    pub loc: SourceLocation,
}

/// Comma-separated expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceExpression {
    /// Expressions, at least two
    pub expressions: Vec<Expression>,
    /// Source location
    pub loc: SourceLocation,
}

/// Unary expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpression {
    /// Operator
    pub operator: UnaryOperator,
    /// Operand
    pub argument: Expression,
    /// Source location
    pub loc: SourceLocation,
}

/// Update expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateExpression {
    /// Operator
    pub operator: UpdateOperator,
    /// Is prefix (`++a`)
    pub prefix: bool,
    /// Operand
    pub argument: Expression,
    /// Source location
    pub loc: SourceLocation,
}

/// Binary expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpression {
    /// Operator
    pub operator: BinaryOperator,
    /// Left operand
    pub left: Expression,
    /// Right operand
    pub right: Expression,
    /// Source location
    pub loc: SourceLocation,
}

/// Logical expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalExpression {
    /// Operator
    pub operator: LogicalOperator,
    /// Left operand
    pub left: Expression,
    /// Right operand
    pub right: Expression,
    /// Source location
    pub loc: SourceLocation,
}

/// Assignment expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentExpression {
    /// Operator
    pub operator: AssignmentOperator,
    /// Target
    pub left: Pattern,
    /// Assigned value
    pub right: Expression,
    /// Source location
    pub loc: SourceLocation,
}

/// Conditional expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalExpression {
    /// Condition
    pub test: Expression,
    /// Value when true
    pub consequent: Expression,
    /// Value when false
    pub alternate: Expression,
    /// Source location
    pub loc: SourceLocation,
}

/// Call expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpression {
    /// Called function
    pub callee: Expression,
    /// Arguments, spread allowed
    pub arguments: Vec<Expression>,
    /// Source location
    pub loc: SourceLocation,
}

/// New expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpression {
    /// Constructor
    pub callee: Expression,
    /// Arguments, spread allowed
    pub arguments: Vec<Expression>,
    /// Source location
    pub loc: SourceLocation,
}

/// Member access
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberExpression {
    /// Object
    pub object: Expression,
    /// Property: an identifier, or any expression when computed
    pub property: Expression,
    /// Is computed (`a[b]`)
    pub computed: bool,
    /// Source location
    pub loc: SourceLocation,
}

/// Spread element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadElement {
    /// Spread value
    pub argument: Expression,
    /// Source location
    pub loc: SourceLocation,
}

/// Yield expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldExpression {
    /// Yielded value
    pub argument: Option<Expression>,
    /// Is `yield*`
    pub delegate: bool,
    /// Source location
    pub loc: SourceLocation,
}

/// Binding and assignment targets
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Simple binding
    Identifier(Identifier),
    /// Member target, only in assignment contexts
    MemberExpression(Box<MemberExpression>),
    /// `[a, b]`
    ArrayPattern(Box<ArrayPattern>),
    /// `{a, b: c}`
    ObjectPattern(Box<ObjectPattern>),
    /// `a = default`
    AssignmentPattern(Box<AssignmentPattern>),
    /// `...rest`
    RestElement(Box<RestElement>),
}

/// Array destructuring pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayPattern {
    /// Elements, `None` for holes
    pub elements: Vec<Option<Pattern>>,
    /// Source location
    pub loc: SourceLocation,
}

/// Object destructuring pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectPattern {
    /// Properties
    pub properties: Vec<AssignmentProperty>,
    /// Source location
    pub loc: SourceLocation,
}

/// Property of an object pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentProperty {
    /// Property name
    pub key: Expression,
    /// Target
    pub value: Pattern,
    /// Is shorthand (`{a}` or `{a = 1}`)
    pub shorthand: bool,
    /// Is the key computed
    pub computed: bool,
    /// Source location
    pub loc: SourceLocation,
}

/// Pattern with a default value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentPattern {
    /// Target
    pub left: Pattern,
    /// Default value
    pub right: Expression,
    /// Source location
    pub loc: SourceLocation,
}

/// Rest element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestElement {
    /// Target
    pub argument: Pattern,
    /// Source location
    pub loc: SourceLocation,
}

impl Statement {
    /// Source location
    pub fn loc(&self) -> SourceLocation {
        match self {
            Statement::ExpressionStatement(node) => node.loc,
            Statement::BlockStatement(node) => node.loc,
            Statement::EmptyStatement(node) => node.loc,
            Statement::DebuggerStatement(node) => node.loc,
            Statement::WithStatement(node) => node.loc,
            Statement::ReturnStatement(node) => node.loc,
            Statement::LabeledStatement(node) => node.loc,
            Statement::BreakStatement(node) => node.loc,
            Statement::ContinueStatement(node) => node.loc,
            Statement::IfStatement(node) => node.loc,
            Statement::SwitchStatement(node) => node.loc,
            Statement::ThrowStatement(node) => node.loc,
            Statement::TryStatement(node) => node.loc,
            Statement::WhileStatement(node) => node.loc,
            Statement::DoWhileStatement(node) => node.loc,
            Statement::ForStatement(node) => node.loc,
            Statement::ForInStatement(node) => node.loc,
            Statement::ForOfStatement(node) => node.loc,
            Statement::FunctionDeclaration(node) => node.loc,
            Statement::VariableDeclaration(node) => node.loc,
            Statement::ClassDeclaration(node) => node.loc,
            Statement::ImportDeclaration(node) => node.loc,
            Statement::ExportNamedDeclaration(node) => node.loc,
            Statement::ExportDefaultDeclaration(node) => node.loc,
            Statement::ExportAllDeclaration(node) => node.loc,
        }
    }

    /// ESTree node type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Statement::ExpressionStatement(_) => "ExpressionStatement",
            Statement::BlockStatement(_) => "BlockStatement",
            Statement::EmptyStatement(_) => "EmptyStatement",
            Statement::DebuggerStatement(_) => "DebuggerStatement",
            Statement::WithStatement(_) => "WithStatement",
            Statement::ReturnStatement(_) => "ReturnStatement",
            Statement::LabeledStatement(_) => "LabeledStatement",
            Statement::BreakStatement(_) => "BreakStatement",
            Statement::ContinueStatement(_) => "ContinueStatement",
            Statement::IfStatement(_) => "IfStatement",
            Statement::SwitchStatement(_) => "SwitchStatement",
            Statement::ThrowStatement(_) => "ThrowStatement",
            Statement::TryStatement(_) => "TryStatement",
            Statement::WhileStatement(_) => "WhileStatement",
            Statement::DoWhileStatement(_) => "DoWhileStatement",
            Statement::ForStatement(_) => "ForStatement",
            Statement::ForInStatement(_) => "ForInStatement",
            Statement::ForOfStatement(_) => "ForOfStatement",
            Statement::FunctionDeclaration(_) => "FunctionDeclaration",
            Statement::VariableDeclaration(_) => "VariableDeclaration",
            Statement::ClassDeclaration(_) => "ClassDeclaration",
            Statement::ImportDeclaration(_) => "ImportDeclaration",
            Statement::ExportNamedDeclaration(_) => "ExportNamedDeclaration",
            Statement::ExportDefaultDeclaration(_) => "ExportDefaultDeclaration",
            Statement::ExportAllDeclaration(_) => "ExportAllDeclaration",
        }
    }
}

impl Expression {
    /// Source location
    pub fn loc(&self) -> SourceLocation {
        match self {
            Expression::Identifier(node) => node.loc,
            Expression::Literal(node) => node.loc,
            Expression::RegExpLiteral(node) => node.loc,
            Expression::TemplateLiteral(node) => node.loc,
            Expression::TaggedTemplateExpression(node) => node.loc,
            Expression::ThisExpression(node) => node.loc,
            Expression::Super(node) => node.loc,
            Expression::ArrayExpression(node) => node.loc,
            Expression::ObjectExpression(node) => node.loc,
            Expression::FunctionExpression(node) => node.loc,
            Expression::ArrowFunctionExpression(node) => node.loc,
            Expression::ClassExpression(node) => node.loc,
            Expression::MetaProperty(node) => node.loc,
            Expression::ParenthesizedExpression(node) => node.loc,
            Expression::SequenceExpression(node) => node.loc,
            Expression::UnaryExpression(node) => node.loc,
            Expression::UpdateExpression(node) => node.loc,
            Expression::BinaryExpression(node) => node.loc,
            Expression::LogicalExpression(node) => node.loc,
            Expression::AssignmentExpression(node) => node.loc,
            Expression::ConditionalExpression(node) => node.loc,
            Expression::CallExpression(node) => node.loc,
            Expression::NewExpression(node) => node.loc,
            Expression::MemberExpression(node) => node.loc,
            Expression::SpreadElement(node) => node.loc,
            Expression::YieldExpression(node) => node.loc,
        }
    }

    /// ESTree node type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Expression::Identifier(_) => "Identifier",
            Expression::Literal(_) => "Literal",
            Expression::RegExpLiteral(_) => "RegExpLiteral",
            Expression::TemplateLiteral(_) => "TemplateLiteral",
            Expression::TaggedTemplateExpression(_) => "TaggedTemplateExpression",
            Expression::ThisExpression(_) => "ThisExpression",
            Expression::Super(_) => "Super",
            Expression::ArrayExpression(_) => "ArrayExpression",
            Expression::ObjectExpression(_) => "ObjectExpression",
            Expression::FunctionExpression(_) => "FunctionExpression",
            Expression::ArrowFunctionExpression(_) => "ArrowFunctionExpression",
            Expression::ClassExpression(_) => "ClassExpression",
            Expression::MetaProperty(_) => "MetaProperty",
            Expression::ParenthesizedExpression(_) => "ParenthesizedExpression",
            Expression::SequenceExpression(_) => "SequenceExpression",
            Expression::UnaryExpression(_) => "UnaryExpression",
            Expression::UpdateExpression(_) => "UpdateExpression",
            Expression::BinaryExpression(_) => "BinaryExpression",
            Expression::LogicalExpression(_) => "LogicalExpression",
            Expression::AssignmentExpression(_) => "AssignmentExpression",
            Expression::ConditionalExpression(_) => "ConditionalExpression",
            Expression::CallExpression(_) => "CallExpression",
            Expression::NewExpression(_) => "NewExpression",
            Expression::MemberExpression(_) => "MemberExpression",
            Expression::SpreadElement(_) => "SpreadElement",
            Expression::YieldExpression(_) => "YieldExpression",
        }
    }
}

impl Pattern {
    /// Source location
    pub fn loc(&self) -> SourceLocation {
        match self {
            Pattern::Identifier(node) => node.loc,
            Pattern::MemberExpression(node) => node.loc,
            Pattern::ArrayPattern(node) => node.loc,
            Pattern::ObjectPattern(node) => node.loc,
            Pattern::AssignmentPattern(node) => node.loc,
            Pattern::RestElement(node) => node.loc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Position;

    fn loc(start: usize, end: usize) -> SourceLocation {
        SourceLocation::new(Position::new(1, start as u32, start), Position::new(1, end as u32, end))
    }

    #[test]
    fn test_operator_round_trip() {
        for op in ["+", "instanceof", ">>>", "in"] {
            let parsed = BinaryOperator::from_token(op).unwrap();
            assert_eq!(parsed.as_str(), op);
        }
        assert_eq!(LogicalOperator::from_token("&&"), Some(LogicalOperator::And));
        assert_eq!(AssignmentOperator::from_token(">>>="), Some(AssignmentOperator::UnsignedRightShiftAssign));
        assert!(BinaryOperator::from_token("&&").is_none());
    }

    #[test]
    fn test_regexp_parts() {
        let regexp = RegExpLiteral {
            raw: "/a\\/b[/]/gi".to_string(),
            loc: loc(0, 11),
        };
        assert_eq!(regexp.pattern(), "a\\/b[/]");
        assert_eq!(regexp.flags(), "gi");
    }

    #[test]
    fn test_template_element_cooks_raw() {
        let element = TemplateElement::new("a\\tb", true, loc(0, 4));
        assert_eq!(element.raw, "a\\tb");
        assert_eq!(element.cooked, "a\tb");
    }

    #[test]
    fn test_statement_serializes_with_type_tag() {
        let statement = Statement::ExpressionStatement(Box::new(ExpressionStatement {
            expression: Expression::Identifier(Identifier {
                name: "x".to_string(),
                loc: loc(0, 1),
            }),
            directive: None,
            loc: loc(0, 1),
        }));
        let json = serde_json::to_value(&statement).unwrap();
        assert_eq!(json["type"], "ExpressionStatement");
        assert_eq!(json["expression"]["type"], "Identifier");
        assert_eq!(json["expression"]["name"], "x");
        assert_eq!(statement.type_name(), "ExpressionStatement");
    }
}
