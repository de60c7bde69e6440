//! Lexical scanner for JavaScript source text
//!
//! The scanner turns a code point sequence into a lazy stream of [`Token`]s
//! with one token of lookahead (two when the parser asks for it). It owns
//! the bracket counters and the template nesting stack, the strict-mode
//! flag and line/column tracking.
//!
//! All mutable scanning state lives in [`ScannerState`], which the parser
//! snapshots and restores when it has to try one grammar production and
//! fall back to another.

use std::sync::OnceLock;

use core_types::{Position, SourceLocation, SyntaxError, SyntaxResult};
use regex::Regex;

use crate::error::scan_error;
use crate::literal::check_escapes;
use crate::token::{Token, TokenKind};

/// Reserved words in every mode
pub const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "finally", "for", "function", "if", "import", "in",
    "instanceof", "new", "return", "super", "switch", "this", "throw", "try", "typeof", "var",
    "void", "while", "with", "yield",
];

/// Words that are reserved only in strict mode code
pub const STRICT_MODE_KEYWORDS: &[&str] = &[
    "implements",
    "interface",
    "let",
    "package",
    "private",
    "protected",
    "public",
    "static",
];

/// Punctuators grouped by length; index 0 holds the one-character ones.
/// Brackets are handled separately because they are counted.
const PUNCTUATORS: [&[&str]; 4] = [
    &[
        ".", ";", ",", "<", ">", "+", "-", "*", "%", "&", "|", "^", "!", "~", "?", ":", "=", "/",
    ],
    &[
        "<=", ">=", "==", "!=", "++", "--", "<<", ">>", "&&", "||", "+=", "-=", "*=", "%=", "&=",
        "|=", "^=", "/=", "=>",
    ],
    &["...", "===", "!==", ">>>", "<<=", ">>="],
    &[">>>="],
];

const WHITESPACES: &[char] = &[
    ' ', '\t', '\u{000B}', '\u{000C}', '\u{00A0}', '\u{FEFF}', '\u{1680}', '\u{2000}', '\u{2001}',
    '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}',
    '\u{200A}', '\u{202F}', '\u{205F}', '\u{3000}',
];

const LINE_TERMINATORS: &[char] = &['\n', '\r', '\u{2028}', '\u{2029}'];

fn is_line_terminator(c: char) -> bool {
    LINE_TERMINATORS.contains(&c)
}

fn is_whitespace(c: char) -> bool {
    WHITESPACES.contains(&c) || is_line_terminator(c)
}

fn unicode_class(cell: &'static OnceLock<Option<Regex>>, pattern: &str, c: char) -> bool {
    let mut buf = [0u8; 4];
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .map_or_else(|| c.is_alphanumeric(), |re| re.is_match(c.encode_utf8(&mut buf)))
}

/// Whether `c` can start an identifier
pub fn is_identifier_start(c: char) -> bool {
    static ID_START: OnceLock<Option<Regex>> = OnceLock::new();
    if c.is_ascii() {
        return c.is_ascii_alphabetic() || c == '$' || c == '_';
    }
    unicode_class(&ID_START, r"^[\p{Lu}\p{Ll}\p{Lt}\p{Lm}\p{Lo}\p{Nl}]$", c)
}

/// Whether `c` can continue an identifier
pub fn is_identifier_part(c: char) -> bool {
    static ID_PART: OnceLock<Option<Regex>> = OnceLock::new();
    if c.is_ascii() {
        return c.is_ascii_alphanumeric() || c == '$' || c == '_';
    }
    unicode_class(
        &ID_PART,
        r"^[\p{Lu}\p{Ll}\p{Lt}\p{Lm}\p{Lo}\p{Nl}\p{Mn}\p{Mc}\p{Nd}\p{Pc}\x{200C}\x{200D}]$",
        c,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bracket {
    Round = 0,
    Square = 1,
    Curly = 2,
}

impl Bracket {
    const ALL: [Bracket; 3] = [Bracket::Round, Bracket::Square, Bracket::Curly];

    /// Bracket kind and whether it opens
    fn classify(c: char) -> Option<(Bracket, bool)> {
        match c {
            '(' => Some((Bracket::Round, true)),
            ')' => Some((Bracket::Round, false)),
            '[' => Some((Bracket::Square, true)),
            ']' => Some((Bracket::Square, false)),
            '{' => Some((Bracket::Curly, true)),
            '}' => Some((Bracket::Curly, false)),
            _ => None,
        }
    }

    fn opening(self) -> char {
        match self {
            Bracket::Round => '(',
            Bracket::Square => '[',
            Bracket::Curly => '{',
        }
    }
}

/// Expected token values for [`Scanner::is_before`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookahead<'a> {
    /// The current token has this value
    One(&'a str),
    /// The current and the following token have these values
    Two(&'a str, &'a str),
}

/// Snapshot of everything the scanner mutates.
///
/// Saving clones this value, restoring overwrites it. Tokens are immutable
/// so cloning the two token slots never aliases.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannerState {
    index: usize,
    line: u32,
    column: u32,
    position: Position,
    current_token: Option<Token>,
    next_token: Option<Token>,
    strict_mode: bool,
    open_brackets: [u32; 3],
    open_templates: Vec<u32>,
    registered_tokens: usize,
}

impl ScannerState {
    fn new() -> Self {
        Self {
            index: 0,
            line: 1,
            column: 0,
            position: Position::origin(),
            current_token: None,
            next_token: None,
            strict_mode: false,
            open_brackets: [0; 3],
            open_templates: Vec::new(),
            registered_tokens: 0,
        }
    }
}

/// JavaScript scanner
pub struct Scanner {
    source: Vec<char>,
    state: ScannerState,
    register_tokens: bool,
    tokens: Vec<Token>,
}

impl Scanner {
    /// Create a scanner over the given source
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            state: ScannerState::new(),
            register_tokens: false,
            tokens: Vec::new(),
        }
    }

    /// Length of the source in code points
    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    /// Record every consumed token; see [`Scanner::tokens`]
    pub fn enable_token_registration(&mut self) {
        self.register_tokens = true;
    }

    /// Tokens consumed so far, when registration is enabled
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Take the registered tokens
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Whether strict mode is active
    pub fn is_strict_mode(&self) -> bool {
        self.state.strict_mode
    }

    /// Enable or disable strict mode
    pub fn set_strict_mode(&mut self, strict: bool) {
        self.state.strict_mode = strict;
    }

    /// Whether the token is a keyword that cannot be used as an identifier
    /// in the current mode
    pub fn is_strict_mode_keyword(&self, token: &Token) -> bool {
        token.kind() == TokenKind::Keyword
            && (KEYWORDS.contains(&token.value())
                || (self.state.strict_mode && STRICT_MODE_KEYWORDS.contains(&token.value())))
    }

    /// Whether `name` is reserved in the current mode
    pub fn is_reserved_word(&self, name: &str) -> bool {
        matches!(name, "null" | "true" | "false")
            || KEYWORDS.contains(&name)
            || (self.state.strict_mode && STRICT_MODE_KEYWORDS.contains(&name))
    }

    /// Snapshot the scanner for backtracking
    pub fn get_state(&self) -> ScannerState {
        let mut state = self.state.clone();
        state.registered_tokens = self.tokens.len();
        state
    }

    /// Restore a snapshot taken with [`Scanner::get_state`]
    pub fn set_state(&mut self, state: ScannerState) {
        if self.register_tokens {
            self.tokens.truncate(state.registered_tokens);
        }
        self.state = state;
    }

    /// End position of the last consumed token
    pub fn position(&self) -> Position {
        self.state.position
    }

    /// Position the scanner has read up to (past any lookahead)
    pub fn scan_position(&self) -> Position {
        Position::new(self.state.line, self.state.column, self.state.index)
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.source.get(index).copied()
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        scan_error(message, self.scan_position())
    }

    /// The current token, without consuming it
    pub fn get_token(&mut self) -> SyntaxResult<Option<&Token>> {
        if self.state.current_token.is_none() {
            self.state.current_token = self.scan_token()?;
        }
        Ok(self.state.current_token.as_ref())
    }

    /// The token after the current one, without consuming anything
    pub fn get_next_token(&mut self) -> SyntaxResult<Option<&Token>> {
        if self.get_token()?.is_none() {
            return Ok(None);
        }
        if self.state.next_token.is_none() {
            self.state.next_token = self.scan_token()?;
        }
        Ok(self.state.next_token.as_ref())
    }

    /// Consume the current token and return it
    pub fn consume_token(&mut self) -> SyntaxResult<Option<Token>> {
        if self.get_token()?.is_none() {
            return Ok(None);
        }
        let token = self.state.current_token.take();
        if let Some(token) = &token {
            self.state.position = token.location().end;
            if self.register_tokens {
                self.tokens.push(token.clone());
            }
        }
        self.state.current_token = self.state.next_token.take();
        Ok(token)
    }

    /// Consume the current token if its value is `expected`
    pub fn consume(&mut self, expected: &str) -> SyntaxResult<Option<Token>> {
        let matched = matches!(self.get_token()?, Some(token) if token.value() == expected);
        if matched {
            self.consume_token()
        } else {
            Ok(None)
        }
    }

    /// Consume the current token if its value is one of `expected`
    pub fn consume_one_of(&mut self, expected: &[&str]) -> SyntaxResult<Option<Token>> {
        let matched = matches!(self.get_token()?, Some(token) if expected.contains(&token.value()));
        if matched {
            self.consume_token()
        } else {
            Ok(None)
        }
    }

    /// Whether the current token starts on the line where the last consumed
    /// token ended. False at the end of input.
    pub fn no_line_terminators(&mut self) -> SyntaxResult<bool> {
        let line = self.state.position.line;
        Ok(matches!(self.get_token()?, Some(token) if token.location().start.line == line))
    }

    /// Whether the upcoming tokens match one of `expected`.
    ///
    /// [`Lookahead::Two`] entries are only checked when `use_next_token` is
    /// set, and the second token is only scanned when the current token
    /// matches the first half of some pair.
    pub fn is_before(&mut self, expected: &[Lookahead<'_>], use_next_token: bool) -> SyntaxResult<bool> {
        let current = match self.get_token()? {
            Some(token) => token.value().to_string(),
            None => return Ok(false),
        };
        let mut wants_next = false;
        for item in expected {
            match item {
                Lookahead::One(value) if *value == current => return Ok(true),
                Lookahead::Two(first, _) if *first == current => wants_next = true,
                _ => {}
            }
        }
        if !use_next_token || !wants_next {
            return Ok(false);
        }
        let next = match self.get_next_token()? {
            Some(token) => token.value().to_string(),
            None => return Ok(false),
        };
        Ok(expected.iter().any(|item| {
            matches!(item, Lookahead::Two(first, second) if *first == current && *second == next)
        }))
    }

    /// Rescan the current `/` or `/=` punctuator as a regular expression.
    ///
    /// Returns `None` without side effects when the current token is not a
    /// slash punctuator. The returned token is left as the current token.
    pub fn reconsume_current_token_as_regexp(&mut self) -> SyntaxResult<Option<Token>> {
        let start = match self.get_token()? {
            Some(token) if token.kind() == TokenKind::Punctuator && token.value().starts_with('/') => {
                token.location().start
            }
            _ => return Ok(None),
        };
        self.state.index = start.index;
        self.state.line = start.line;
        self.state.column = start.column;
        self.state.next_token = None;
        let token = self.scan_regexp(start)?;
        self.state.current_token = Some(token.clone());
        Ok(Some(token))
    }

    fn scan_regexp(&mut self, start: Position) -> SyntaxResult<Token> {
        let mut value = String::from('/');
        self.state.index += 1;
        let mut in_class = false;
        loop {
            let c = match self.char_at(self.state.index) {
                Some(c) if !is_line_terminator(c) => c,
                _ => return Err(self.error("Unterminated regular expression")),
            };
            self.state.index += 1;
            value.push(c);
            match c {
                '\\' => match self.char_at(self.state.index) {
                    Some(escaped) if !is_line_terminator(escaped) => {
                        self.state.index += 1;
                        value.push(escaped);
                    }
                    _ => return Err(self.error("Unterminated regular expression")),
                },
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        while let Some(c) = self.char_at(self.state.index) {
            if !is_identifier_part(c) {
                break;
            }
            value.push(c);
            self.state.index += 1;
        }
        self.state.column = start.column + (self.state.index - start.index) as u32;
        let location = SourceLocation::new(start, self.scan_position());
        Ok(Token::new(TokenKind::RegularExpression, value, location))
    }

    fn scan_token(&mut self) -> SyntaxResult<Option<Token>> {
        self.skip_whitespaces_and_comments()?;
        if self.state.index >= self.source.len() {
            if !self.state.open_templates.is_empty() {
                return Err(self.error("Unterminated template"));
            }
            for bracket in Bracket::ALL {
                if self.state.open_brackets[bracket as usize] > 0 {
                    return Err(self.error(format!("Unclosed {}", bracket.opening())));
                }
            }
            return Ok(None);
        }

        let start = self.scan_position();
        let scanned = match self.scan_string()? {
            Some(found) => found,
            None => match self.scan_template()? {
                Some(found) => found,
                None => match self.scan_number()? {
                    Some(found) => found,
                    None => match self.scan_punctuator()? {
                        Some(found) => found,
                        None => match self.scan_keyword_or_identifier()? {
                            Some(found) => found,
                            None => {
                                let c = self.char_at(self.state.index).unwrap_or('\u{FFFD}');
                                return Err(self.error(format!("Unexpected {}", c)));
                            }
                        },
                    },
                },
            },
        };
        let (kind, value) = scanned;
        let location = SourceLocation::new(start, self.scan_position());
        Ok(Some(Token::new(kind, value, location)))
    }

    /// Re-derive line and column after consuming `source[from..index]`
    fn adjust_column_and_line(&mut self, from: usize) {
        let end = self.state.index;
        let mut lines = 0;
        let mut line_start = None;
        let mut i = from;
        while i < end {
            let c = self.source[i];
            if is_line_terminator(c) {
                if c == '\r' && i + 1 < end && self.source[i + 1] == '\n' {
                    i += 1;
                }
                lines += 1;
                line_start = Some(i + 1);
            }
            i += 1;
        }
        match line_start {
            Some(start) => {
                self.state.line += lines;
                self.state.column = (end - start) as u32;
            }
            None => self.state.column += (end - from) as u32,
        }
    }

    fn skip_whitespaces_and_comments(&mut self) -> SyntaxResult<()> {
        let from = self.state.index;
        while let Some(c) = self.char_at(self.state.index) {
            if is_whitespace(c) {
                self.state.index += 1;
                continue;
            }
            if c != '/' {
                break;
            }
            match self.char_at(self.state.index + 1) {
                Some('/') => {
                    self.state.index += 2;
                    while let Some(c) = self.char_at(self.state.index) {
                        if is_line_terminator(c) {
                            break;
                        }
                        self.state.index += 1;
                    }
                }
                Some('*') => {
                    self.state.index += 2;
                    loop {
                        match self.char_at(self.state.index) {
                            None => {
                                self.adjust_column_and_line(from);
                                return Err(self.error("Unterminated comment"));
                            }
                            Some('*') if self.char_at(self.state.index + 1) == Some('/') => {
                                self.state.index += 2;
                                break;
                            }
                            Some(_) => self.state.index += 1,
                        }
                    }
                }
                _ => break,
            }
        }
        self.adjust_column_and_line(from);
        Ok(())
    }

    /// Consume up to and including the first unescaped stop character.
    /// Returns the consumed text and the stop, or `None` at end of input.
    fn consume_until(&mut self, stops: &[char]) -> Option<(String, char)> {
        let from = self.state.index;
        let mut buffer = String::new();
        let mut escaped = false;
        while let Some(c) = self.char_at(self.state.index) {
            self.state.index += 1;
            buffer.push(c);
            if escaped {
                if c == '\r' && self.char_at(self.state.index) == Some('\n') {
                    self.state.index += 1;
                    buffer.push('\n');
                }
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if stops.contains(&c) {
                self.adjust_column_and_line(from);
                return Some((buffer, c));
            }
        }
        self.adjust_column_and_line(from);
        None
    }

    fn scan_string(&mut self) -> SyntaxResult<Option<(TokenKind, String)>> {
        let quote = match self.char_at(self.state.index) {
            Some(c @ ('"' | '\'')) => c,
            _ => return Ok(None),
        };
        self.state.index += 1;
        self.state.column += 1;
        let stops = [quote, '\n', '\r', '\u{2028}', '\u{2029}'];
        match self.consume_until(&stops) {
            Some((body, stop)) if stop == quote => {
                check_escapes(&body).map_err(|message| self.error(message))?;
                Ok(Some((TokenKind::StringLiteral, format!("{}{}", quote, body))))
            }
            _ => Err(self.error("Unterminated string")),
        }
    }

    fn scan_template(&mut self) -> SyntaxResult<Option<(TokenKind, String)>> {
        let first = match self.char_at(self.state.index) {
            Some(c) => c,
            None => return Ok(None),
        };
        let curly_depth = self.state.open_brackets[Bracket::Curly as usize];
        let continuation =
            first == '}' && self.state.open_templates.last() == Some(&curly_depth);
        if first != '`' && !continuation {
            return Ok(None);
        }
        if continuation {
            self.state.open_templates.pop();
        }
        self.state.index += 1;
        self.state.column += 1;
        let mut value = String::from(first);
        loop {
            match self.consume_until(&['`', '$']) {
                None => return Err(self.error("Unterminated template")),
                Some((chunk, '`')) => {
                    value.push_str(&chunk);
                    break;
                }
                Some((chunk, _)) => {
                    value.push_str(&chunk);
                    if self.char_at(self.state.index) == Some('{') {
                        self.state.index += 1;
                        self.state.column += 1;
                        value.push('{');
                        self.state.open_templates.push(curly_depth);
                        break;
                    }
                }
            }
        }
        check_escapes(&value).map_err(|message| self.error(message))?;
        Ok(Some((TokenKind::Template, value)))
    }

    fn consume_digits(&mut self, radix: u32) -> String {
        let mut digits = String::new();
        while let Some(c) = self.char_at(self.state.index) {
            if !c.is_digit(radix) {
                break;
            }
            digits.push(c);
            self.state.index += 1;
        }
        digits
    }

    fn scan_number(&mut self) -> SyntaxResult<Option<(TokenKind, String)>> {
        let from = self.state.index;
        let first = match self.char_at(from) {
            Some(c) => c,
            None => return Ok(None),
        };
        let mut value = String::new();
        if first == '.' {
            if !self.char_at(from + 1).is_some_and(|c| c.is_ascii_digit()) {
                return Ok(None);
            }
            self.state.index += 1;
            value.push('.');
            value.push_str(&self.consume_digits(10));
        } else if first.is_ascii_digit() {
            let radix = match (first, self.char_at(from + 1)) {
                ('0', Some('x' | 'X')) => Some(16),
                ('0', Some('o' | 'O')) => Some(8),
                ('0', Some('b' | 'B')) => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.state.index += 2;
                if self.consume_digits(radix).is_empty() {
                    return Err(self.error("Missing digits after radix prefix"));
                }
                let value = self.source[from..self.state.index].iter().collect();
                return self.finish_number(from, value);
            }
            value.push_str(&self.consume_digits(10));
            if self.char_at(self.state.index) == Some('.') {
                self.state.index += 1;
                value.push('.');
                value.push_str(&self.consume_digits(10));
            }
        } else {
            return Ok(None);
        }

        if let Some(marker @ ('e' | 'E')) = self.char_at(self.state.index) {
            self.state.index += 1;
            value.push(marker);
            if let Some(sign @ ('+' | '-')) = self.char_at(self.state.index) {
                self.state.index += 1;
                value.push(sign);
            }
            let exponent = self.consume_digits(10);
            if exponent.is_empty() {
                self.state.column += (self.state.index - from) as u32;
                return Err(self.error("Missing exponent"));
            }
            value.push_str(&exponent);
        }
        self.finish_number(from, value)
    }

    fn finish_number(&mut self, from: usize, value: String) -> SyntaxResult<Option<(TokenKind, String)>> {
        self.state.column += (self.state.index - from) as u32;
        if let Some(c) = self.char_at(self.state.index) {
            if c.is_ascii_digit() || c == '\\' || is_identifier_start(c) {
                return Err(self.error("Invalid or unexpected token after numeric literal"));
            }
        }
        Ok(Some((TokenKind::NumericLiteral, value)))
    }

    fn scan_punctuator(&mut self) -> SyntaxResult<Option<(TokenKind, String)>> {
        let from = self.state.index;
        let first = match self.char_at(from) {
            Some(c) => c,
            None => return Ok(None),
        };
        if let Some((bracket, opens)) = Bracket::classify(first) {
            let count = &mut self.state.open_brackets[bracket as usize];
            if opens {
                *count += 1;
            } else if *count == 0 {
                return Err(self.error(format!("Unexpected {}", first)));
            } else {
                *count -= 1;
            }
            self.state.index += 1;
            self.state.column += 1;
            return Ok(Some((TokenKind::Punctuator, first.to_string())));
        }

        let mut buffer = String::new();
        let mut matched = 0;
        for (length, table) in PUNCTUATORS.iter().enumerate() {
            match self.char_at(from + length) {
                Some(c) => buffer.push(c),
                None => break,
            }
            if table.contains(&buffer.as_str()) {
                matched = length + 1;
            }
        }
        if matched == 0 {
            return Ok(None);
        }
        self.state.index += matched;
        self.state.column += matched as u32;
        let value = self.source[from..from + matched].iter().collect();
        Ok(Some((TokenKind::Punctuator, value)))
    }

    /// Decode a `\uXXXX` or `\u{X...}` escape starting at the backslash
    fn consume_unicode_escape(&mut self) -> Option<char> {
        if self.char_at(self.state.index + 1) != Some('u') {
            return None;
        }
        let mut index = self.state.index + 2;
        let mut code: u32 = 0;
        if self.char_at(index) == Some('{') {
            index += 1;
            let mut digits = 0;
            loop {
                match self.char_at(index) {
                    Some('}') if digits > 0 => break,
                    Some(c) if c.is_ascii_hexdigit() && code <= 0x10FFFF => {
                        code = code * 16 + c.to_digit(16)?;
                        digits += 1;
                        index += 1;
                    }
                    _ => return None,
                }
            }
            index += 1;
        } else {
            for _ in 0..4 {
                code = code * 16 + self.char_at(index)?.to_digit(16)?;
                index += 1;
            }
        }
        let decoded = char::from_u32(code)?;
        self.state.index = index;
        Some(decoded)
    }

    fn scan_keyword_or_identifier(&mut self) -> SyntaxResult<Option<(TokenKind, String)>> {
        let from = self.state.index;
        let mut name = String::new();
        while let Some(c) = self.char_at(self.state.index) {
            let (decoded, escaped) = if c == '\\' {
                match self.consume_unicode_escape() {
                    Some(decoded) => (decoded, true),
                    None => return Err(self.error("Invalid Unicode escape sequence")),
                }
            } else {
                (c, false)
            };
            let valid = if name.is_empty() {
                is_identifier_start(decoded)
            } else {
                is_identifier_part(decoded)
            };
            if !valid {
                if escaped {
                    return Err(self.error("Invalid Unicode escape sequence"));
                }
                break;
            }
            if !escaped {
                self.state.index += 1;
            }
            name.push(decoded);
        }
        if name.is_empty() {
            return Ok(None);
        }
        self.state.column += (self.state.index - from) as u32;
        let kind = match name.as_str() {
            "null" => TokenKind::NullLiteral,
            "true" | "false" => TokenKind::BooleanLiteral,
            word if KEYWORDS.contains(&word) || STRICT_MODE_KEYWORDS.contains(&word) => {
                TokenKind::Keyword
            }
            _ => TokenKind::Identifier,
        };
        Ok(Some((kind, name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(source: &str) -> Vec<(TokenKind, String)> {
        let mut scanner = Scanner::new(source);
        let mut tokens = Vec::new();
        while let Some(token) = scanner.consume_token().unwrap() {
            tokens.push((token.kind(), token.value().to_string()));
        }
        tokens
    }

    #[test]
    fn test_scan_simple_statement() {
        let tokens = scan_all("var x = 42;");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Keyword, "var".to_string()),
                (TokenKind::Identifier, "x".to_string()),
                (TokenKind::Punctuator, "=".to_string()),
                (TokenKind::NumericLiteral, "42".to_string()),
                (TokenKind::Punctuator, ";".to_string()),
            ]
        );
    }

    #[test]
    fn test_longest_punctuator_match() {
        let values: Vec<String> = scan_all("a >>>= b ... c !== d")
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        assert_eq!(values, vec!["a", ">>>=", "b", "...", "c", "!==", "d"]);
    }

    #[test]
    fn test_numbers() {
        let values: Vec<String> = scan_all("1 1.5 .5 5. 1e3 .5e-2 0xFF 0b10 0o7")
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        assert_eq!(values, vec!["1", "1.5", ".5", "5.", "1e3", ".5e-2", "0xFF", "0b10", "0o7"]);
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(Scanner::new("0x").get_token().is_err());
        assert!(Scanner::new("0b12").get_token().is_err());
        assert!(Scanner::new("3in").get_token().is_err());
        assert!(Scanner::new("1e").get_token().is_err());
    }

    #[test]
    fn test_line_and_column_tracking() {
        let mut scanner = Scanner::new("a\r\n  b\u{2028}c /* x\n y */ d");
        let positions: Vec<(u32, u32)> = std::iter::from_fn(|| scanner.consume_token().unwrap())
            .map(|t| (t.location().start.line, t.location().start.column))
            .collect();
        assert_eq!(positions, vec![(1, 0), (2, 2), (3, 0), (4, 6)]);
    }

    #[test]
    fn test_brackets_must_balance() {
        let err = Scanner::new(")").get_token().unwrap_err();
        assert!(err.is_scan_error());

        let mut scanner = Scanner::new("[1");
        scanner.consume_token().unwrap();
        scanner.consume_token().unwrap();
        let err = scanner.consume_token().unwrap_err();
        assert_eq!(err.message, "Unclosed [");
    }

    #[test]
    fn test_template_with_nested_braces() {
        let values: Vec<String> = scan_all("`a${ {b: 1} }c`")
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        assert_eq!(values, vec!["`a${", "{", "b", ":", "1", "}", "}c`"]);
    }

    #[test]
    fn test_state_restore() {
        let mut scanner = Scanner::new("a b c");
        scanner.consume_token().unwrap();
        let state = scanner.get_state();
        scanner.consume_token().unwrap();
        scanner.consume_token().unwrap();
        assert!(scanner.get_token().unwrap().is_none());
        scanner.set_state(state);
        assert_eq!(scanner.get_token().unwrap().unwrap().value(), "b");
    }

    #[test]
    fn test_regexp_reconsume() {
        let mut scanner = Scanner::new("/[/]+/g.test(x)");
        assert_eq!(scanner.get_token().unwrap().unwrap().value(), "/");
        let token = scanner.reconsume_current_token_as_regexp().unwrap().unwrap();
        assert_eq!(token.kind(), TokenKind::RegularExpression);
        assert_eq!(token.value(), "/[/]+/g");
        scanner.consume_token().unwrap();
        assert_eq!(scanner.consume_token().unwrap().unwrap().value(), ".");
    }

    #[test]
    fn test_identifier_escapes_and_unicode() {
        let tokens = scan_all("\\u0061b café \\u{62}");
        assert_eq!(tokens[0], (TokenKind::Identifier, "ab".to_string()));
        assert_eq!(tokens[1], (TokenKind::Identifier, "café".to_string()));
        assert_eq!(tokens[2], (TokenKind::Identifier, "b".to_string()));
    }

    #[test]
    fn test_keyword_classes() {
        let tokens = scan_all("if let null true foo");
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword,
                TokenKind::Keyword,
                TokenKind::NullLiteral,
                TokenKind::BooleanLiteral,
                TokenKind::Identifier,
            ]
        );
    }
}
