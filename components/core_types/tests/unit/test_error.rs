//! Unit tests for SyntaxError and ErrorKind

use core_types::{ErrorKind, Position, SyntaxError, SyntaxResult};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kind_scan_error() {
        let kind = ErrorKind::ScanError;
        assert!(matches!(kind, ErrorKind::ScanError));
        assert_ne!(kind, ErrorKind::ParseError);
    }

    #[test]
    fn test_error_kind_is_copy() {
        let kind = ErrorKind::ParseError;
        let copy = kind;
        assert_eq!(kind, copy);
    }
}

#[cfg(test)]
mod syntax_error_tests {
    use super::*;

    #[test]
    fn test_syntax_error_fields() {
        let error = SyntaxError::new(ErrorKind::ScanError, "Unclosed (", Position::new(1, 2, 2));

        assert_eq!(error.kind, ErrorKind::ScanError);
        assert_eq!(error.message, "Unclosed (");
        assert_eq!(error.position, Position::new(1, 2, 2));
        assert!(error.is_scan_error());
        assert!(!error.is_parse_error());
    }

    #[test]
    fn test_syntax_error_display_includes_position() {
        let error = SyntaxError::new(
            ErrorKind::ParseError,
            "Invalid assignment target",
            Position::new(12, 8, 300),
        );

        let text = error.to_string();
        assert!(text.starts_with("ParseError"));
        assert!(text.contains("Invalid assignment target"));
        assert!(text.contains("line 12"));
        assert!(text.contains("column 8"));
    }

    #[test]
    fn test_syntax_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}

        let error = SyntaxError::new(ErrorKind::ParseError, "x", Position::origin());
        takes_error(&error);
    }

    #[test]
    fn test_syntax_result_propagates_with_question_mark() {
        fn inner() -> SyntaxResult<u32> {
            Err(SyntaxError::new(
                ErrorKind::ParseError,
                "boom",
                Position::origin(),
            ))
        }

        fn outer() -> SyntaxResult<u32> {
            let value = inner()?;
            Ok(value + 1)
        }

        let error = outer().unwrap_err();
        assert_eq!(error.message, "boom");
    }

    #[test]
    fn test_syntax_error_serializes() {
        let error = SyntaxError::new(ErrorKind::ScanError, "bad", Position::new(1, 0, 0));
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["kind"], "ScanError");
        assert_eq!(json["message"], "bad");
        assert_eq!(json["position"]["line"], 1);
    }
}
