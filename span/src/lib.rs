//! Source positions and the shared keyword table, used by every other
//! FeLangKit crate.

mod keyword;
mod pos;

pub use keyword::{lookup_keyword, Keyword};
pub use pos::{PositionTracker, SourcePosition};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_matches_both_scripts() {
        assert_eq!(lookup_keyword("variable"), Some(Keyword::VariableDecl));
        assert_eq!(lookup_keyword("変数"), Some(Keyword::VariableDecl));
        assert_eq!(lookup_keyword("not_a_keyword"), None);
    }

    #[test]
    fn position_tracker_advances_lines_and_columns() {
        let mut tracker = PositionTracker::new("ab\ncd");
        assert_eq!(tracker.position(), SourcePosition::new(1, 1, 0));
        tracker.bump();
        tracker.bump();
        assert_eq!(tracker.position(), SourcePosition::new(1, 3, 2));
        tracker.bump(); // the newline
        assert_eq!(tracker.position(), SourcePosition::new(2, 1, 3));
    }

    #[test]
    fn source_position_orders_by_offset() {
        let a = SourcePosition::new(1, 1, 0);
        let b = SourcePosition::new(1, 2, 1);
        assert!(a < b);
    }
}
