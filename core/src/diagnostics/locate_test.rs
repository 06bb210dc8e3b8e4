use super::{DiagnosticLocation, locate, trim_origin};
use crate::markers::Position;
use pretty_assertions::assert_eq;

fn at(line: u32, column: Option<u32>) -> Option<DiagnosticLocation> {
    Some(DiagnosticLocation { line, column })
}

#[test]
fn converts_to_zero_based() {
    assert_eq!(locate("Parse error at 3:7"), at(2, Some(6)));
}

#[test]
fn no_location_in_message() {
    assert_eq!(locate("Unexpected end of input"), None);
    assert_eq!(locate(""), None);
}

#[test]
fn messages_from_the_compiler_service() {
    assert_eq!(
        locate("Error: Parser error at 2:5: Expected ';' after variable declaration"),
        at(1, Some(4))
    );
    assert_eq!(
        locate("Error: Lexer error at 1:12: Unexpected character: @"),
        at(0, Some(11))
    );
    assert_eq!(locate("Unexpected token ';' at 2:5"), at(1, Some(4)));
}

#[test]
fn unparsable_column_keeps_line() {
    assert_eq!(locate("broken at 4:x"), at(3, None));
    assert_eq!(locate("broken at 4:"), at(3, None));
    assert_eq!(locate("broken at 4:99999999999"), at(3, None));
}

#[test]
fn trailing_punctuation_after_column() {
    assert_eq!(locate("Unexpected token at 3:7."), at(2, Some(6)));
    assert_eq!(locate("Bad range at 3:7-9"), at(2, Some(6)));
    assert_eq!(locate("Expected ')' (at 3:7)"), at(2, Some(6)));
}

#[test]
fn first_occurrence_wins() {
    assert_eq!(locate("at 1:2 and then at 5:6"), at(0, Some(1)));
}

#[test]
fn requires_word_boundary_before_at() {
    assert_eq!(locate("format 3:4"), None);
}

#[test]
fn zero_coordinates_saturate() {
    assert_eq!(locate("at 0:0"), at(0, Some(0)));
}

#[test]
fn oversized_line_is_no_match() {
    assert_eq!(locate("at 99999999999:1"), None);
}

#[test]
fn scroll_position_falls_back_to_line_start() {
    assert_eq!(at(3, None).unwrap().position(), Position::new(3, 0));
    assert_eq!(at(3, Some(8)).unwrap().position(), Position::new(3, 8));
}

#[test]
fn trim_origin_counts_leading_lines_and_columns() {
    assert_eq!(trim_origin("sum;"), Position::new(0, 0));
    assert_eq!(trim_origin("  sum;"), Position::new(0, 2));
    assert_eq!(trim_origin("\n\n   sum;"), Position::new(2, 3));
    assert_eq!(trim_origin("\r\n\tsum;"), Position::new(1, 1));
    assert_eq!(trim_origin("   "), Position::new(0, 3));
}

#[test]
fn shifted_moves_first_line_columns_only() {
    let origin = Position::new(2, 3);
    assert_eq!(at(0, Some(4)).unwrap().shifted(origin), at(2, Some(7)).unwrap());
    assert_eq!(at(1, Some(4)).unwrap().shifted(origin), at(3, Some(4)).unwrap());
    assert_eq!(at(0, None).unwrap().shifted(origin), at(2, None).unwrap());
    assert_eq!(
        at(5, Some(1)).unwrap().shifted(Position::default()),
        at(5, Some(1)).unwrap()
    );
}
