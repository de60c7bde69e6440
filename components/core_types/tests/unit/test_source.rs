//! Unit tests for Position and SourceLocation

use core_types::{Position, SourceLocation};

#[cfg(test)]
mod position_tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(10, 5, 150);

        assert_eq!(pos.line, 10);
        assert_eq!(pos.column, 5);
        assert_eq!(pos.index, 150);
    }

    #[test]
    fn test_position_origin() {
        let pos = Position::origin();

        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 0);
        assert_eq!(pos.index, 0);
    }

    #[test]
    fn test_position_large_values() {
        let pos = Position::new(u32::MAX, u32::MAX, usize::MAX);

        assert_eq!(pos.line, u32::MAX);
        assert_eq!(pos.column, u32::MAX);
        assert_eq!(pos.index, usize::MAX);
    }

    #[test]
    fn test_position_copy_and_equality() {
        let pos1 = Position::new(42, 7, 1000);
        let pos2 = pos1;

        assert_eq!(pos1, pos2);
        assert_ne!(pos1, Position::new(42, 8, 1001));
    }
}

#[cfg(test)]
mod source_location_tests {
    use super::*;

    #[test]
    fn test_location_single_line() {
        let loc = SourceLocation::new(Position::new(1, 4, 4), Position::new(1, 9, 9));

        assert_eq!(loc.len(), 5);
        assert!(!loc.is_multiline());
    }

    #[test]
    fn test_location_empty() {
        let loc = SourceLocation::new(Position::origin(), Position::origin());

        assert!(loc.is_empty());
    }

    #[test]
    fn test_location_serializes_start_and_end() {
        let loc = SourceLocation::new(Position::new(1, 0, 0), Position::new(2, 3, 10));
        let json = serde_json::to_value(loc).unwrap();

        assert_eq!(json["start"]["line"], 1);
        assert_eq!(json["end"]["column"], 3);
        assert_eq!(json["end"]["index"], 10);
    }
}
