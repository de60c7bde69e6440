//! Token types produced by the scanner

use core_types::SourceLocation;
use serde::Serialize;

/// Lexical class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Identifier name that is not a reserved word
    Identifier,
    /// Reserved word, including strict-mode-only reserved words
    Keyword,
    /// `null`
    NullLiteral,
    /// `true` or `false`
    BooleanLiteral,
    /// Quoted string, value includes the quotes
    StringLiteral,
    /// Numeric literal in its source spelling
    NumericLiteral,
    /// Template chunk including its delimiters (`` `a${ ``, `}b${`, `` }c` ``)
    Template,
    /// Operator or bracket
    Punctuator,
    /// Regular expression literal with flags
    RegularExpression,
}

/// A classified lexeme with its raw text and span.
///
/// Tokens are immutable: the scanner only ever replaces a tentative token
/// (for example a `/` re-read as a regular expression), it never edits one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    kind: TokenKind,
    value: String,
    #[serde(rename = "loc")]
    location: SourceLocation,
}

impl Token {
    /// Create a token
    pub fn new(kind: TokenKind, value: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            value: value.into(),
            location,
        }
    }

    /// Lexical class
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Raw source text (identifier escapes are decoded)
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Source span
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// Whether this token is a punctuator with the given text
    pub fn is_punctuator(&self, value: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.value == value
    }

    /// Whether this token can be used where an IdentifierName is expected
    /// (property names, import/export specifiers)
    pub fn is_identifier_name(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier
                | TokenKind::Keyword
                | TokenKind::BooleanLiteral
                | TokenKind::NullLiteral
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Position;

    #[test]
    fn test_token_accessors() {
        let loc = SourceLocation::new(Position::new(1, 0, 0), Position::new(1, 1, 1));
        let token = Token::new(TokenKind::Punctuator, "(", loc);
        assert_eq!(token.kind(), TokenKind::Punctuator);
        assert_eq!(token.value(), "(");
        assert!(token.is_punctuator("("));
        assert!(!token.is_identifier_name());
    }

    #[test]
    fn test_keyword_is_identifier_name() {
        let token = Token::new(TokenKind::Keyword, "class", SourceLocation::default());
        assert!(token.is_identifier_name());
    }
}
