//! End-to-end rendering of programs the compiler service rejects: the session
//! places markers, the renderer draws them.

use bytepad::markers::mock::RecordingView;
use bytepad::session::mock::RecordingPanels;
use bytepad::transport::mock::{MockBehavior, MockTransport};
use bytepad::{
    CompileResponse, CompileSession, MarkerKind, SessionError, SessionOptions,
    render_failure_to_string_no_color,
};
use pretty_assertions::assert_eq;

async fn reject(source: &str, error: &str) -> (Vec<MarkerKind>, String) {
    let session = CompileSession::new(
        MockTransport::new(MockBehavior::Respond(CompileResponse::Failure {
            error: error.to_string(),
        })),
        RecordingView::new(source),
        RecordingPanels::new(),
        SessionOptions::default(),
    );

    let err = session.compile_view().await.unwrap_err();
    let SessionError::Compile { message, .. } = err else {
        panic!("expected a compile error, got {err:?}");
    };
    let markers = session.markers();
    let rendered = render_failure_to_string_no_color("<test>", source, &message, &markers);
    (markers, rendered)
}

macro_rules! rejections {
    ( $($name:ident => ($source:expr, $error:expr, [$($marker:expr),* $(,)?], $shown:expr)),* $(,)? ) => {
        $(
            #[tokio::test]
            async fn $name() {
                let (markers, rendered) = reject($source, $error).await;
                assert_eq!(markers, vec![$($marker),*]);
                assert!(
                    rendered.contains($error),
                    "message missing from report for {:?}:\n{}",
                    $source,
                    rendered
                );
                assert!(
                    rendered.contains($shown),
                    "expected {:?} in report:\n{}",
                    $shown,
                    rendered
                );
            }
        )*
    };
}

rejections! {
    parser_error_on_second_line => (
        "int x = 15;\nint y = ;",
        "Parser error at 2:9: Expected expression",
        [MarkerKind::Line { line: 1 }, MarkerKind::Point { line: 1, column: 8 }],
        "int y = ;"
    ),
    lexer_error_on_first_line => (
        "int x = 1 @ 2;",
        "Lexer error at 1:11: Unexpected character: @",
        [MarkerKind::Line { line: 0 }, MarkerKind::Point { line: 0, column: 10 }],
        "int x = 1 @ 2;"
    ),
    leading_blank_lines_are_accounted_for => (
        "\n\nint ;",
        "Unexpected token ';' at 1:5",
        [MarkerKind::Line { line: 2 }, MarkerKind::Point { line: 2, column: 4 }],
        "int ;"
    ),
    line_only_position => (
        "while (x) {\n  x = x - 1\n}",
        "Parser error at 2:?",
        [MarkerKind::Line { line: 1 }],
        "x = x - 1"
    ),
    no_position => (
        "int x =",
        "Unexpected end of input",
        [],
        "Unexpected end of input"
    ),
}
