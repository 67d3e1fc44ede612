use super::*;
use crate::mark::mark_matches;
use crate::token::Token;
use crate::types::MatchingBlock;

fn marked_spans(source: &str, spans: &[std::ops::Range<usize>]) -> MarkedSource {
    let tokens: Vec<Token> = spans.iter().map(|s| Token::new("t", s.clone())).collect();
    let mut marked = MarkedSource::unmarked(source);
    marked.mark_tokens(&tokens, Marker::default());
    marked
}

fn braces() -> RenderOptions {
    RenderOptions::default()
}

fn plain() -> RenderOptions {
    RenderOptions {
        start_tokens: String::new(),
        end_tokens: String::new(),
        html_encoded: false,
    }
}

fn html(start: &str, end: &str) -> RenderOptions {
    RenderOptions {
        start_tokens: start.to_string(),
        end_tokens: end.to_string(),
        html_encoded: true,
    }
}

#[test]
fn marking_keeps_length_and_overwrites_spans() {
    let source = "def foo():\n    bar()\n";
    let marked = marked_spans(source, &[4..7, 15..18]);
    assert_eq!(marked.len(), source.len());
    assert_eq!(marked.to_string_lossy(), "def @@@():\n    @@@()\n");
}

#[test]
fn mark_matches_marks_both_sides_from_blocks() {
    let source_a = "a = 1\nb = 2\n";
    let source_b = "zz = 1\n";
    let tokens_a = vec![
        Token::new("identifier", 0..1),
        Token::new("=", 2..3),
        Token::new("integer", 4..5),
        Token::new("identifier", 6..7),
        Token::new("=", 8..9),
        Token::new("integer", 10..11),
    ];
    let tokens_b = vec![
        Token::new("identifier", 0..2),
        Token::new("=", 3..4),
        Token::new("integer", 5..6),
    ];
    let blocks = [MatchingBlock { a: 3, b: 0, len: 3 }];

    let (marked_a, marked_b) = mark_matches(
        &tokens_a,
        &tokens_b,
        source_a,
        source_b,
        &blocks,
        Marker::default(),
    );
    assert_eq!(marked_a.len(), source_a.len());
    assert_eq!(marked_b.len(), source_b.len());
    assert_eq!(marked_a.to_string_lossy(), "a = 1\n@ @ @\n");
    assert_eq!(marked_b.to_string_lossy(), "@@ @ @\n");
}

#[test]
fn mark_matches_tolerates_out_of_range_blocks_and_spans() {
    let source = "abc";
    let tokens = vec![Token::new("x", 1..99)];
    let blocks = [MatchingBlock { a: 0, b: 0, len: 5 }];
    let (marked_a, marked_b) = mark_matches(&tokens, &[], source, "", &blocks, Marker::default());
    assert_eq!(marked_a.to_string_lossy(), "a@@");
    assert!(marked_b.is_empty());
}

#[test]
fn wraps_marked_runs_in_delimiters() {
    let source = "def foo():\n    bar()\n";
    let marked = marked_spans(source, &[4..7, 15..18]);
    assert_eq!(
        render_marked(source, &marked, Marker::default(), &braces()),
        "def {foo}():\n    {bar}()\n"
    );
}

#[test]
fn empty_delimiters_reproduce_the_source() {
    let source = "if (a < b) { return \"x@y\"; }\n";
    let marked = marked_spans(source, &[0..2, 4..9, 13..28]);
    assert_eq!(
        render_marked(source, &marked, Marker::default(), &plain()),
        source
    );
}

#[test]
fn literal_marker_outside_matches_is_not_treated_as_marked() {
    let source = "email = 'a@b'\nvalue = 1\n";
    let marked = marked_spans(source, &[14..23]);
    assert_eq!(
        render_marked(source, &marked, Marker::default(), &braces()),
        "email = 'a@b'\n{value = 1}\n"
    );
}

#[test]
fn literal_marker_inside_a_match_splits_the_run() {
    let source = "a@b";
    let marked = marked_spans(source, &[0..3]);
    assert_eq!(
        render_marked(source, &marked, Marker::default(), &braces()),
        "{a}@{b}"
    );
}

#[test]
fn run_reaching_the_end_is_closed() {
    let source = "abc";
    let marked = marked_spans(source, &[1..3]);
    assert_eq!(
        render_marked(source, &marked, Marker::default(), &braces()),
        "a{bc}"
    );
}

#[test]
fn html_mode_escapes_text_and_reopens_runs_after_newlines() {
    let source = "if a < b:\n    go()\n";
    let marked = marked_spans(source, &[3..15]);
    assert_eq!(
        render_marked(source, &marked, Marker::default(), &html("<mark>", "</mark>")),
        "if <mark>a &lt; b:</mark>\n<mark>    g</mark>o()\n"
    );
}

#[test]
fn html_mode_leaves_no_empty_run_after_a_trailing_newline() {
    let source = "x = 1\ny = 2\n";
    let marked = marked_spans(source, &[0..6]);
    assert_eq!(
        render_marked(source, &marked, Marker::default(), &html("<mark>", "</mark>")),
        "<mark>x = 1</mark>\ny = 2\n"
    );

    let source = "a\n";
    let marked = marked_spans(source, &[0..2]);
    assert_eq!(
        render_marked(source, &marked, Marker::default(), &html("<mark>", "</mark>")),
        "<mark>a</mark>\n"
    );
}

#[test]
fn html_mode_escapes_unmarked_text() {
    let source = "s = '<b>' & \"x\"";
    let marked = MarkedSource::unmarked(source);
    assert_eq!(
        render_marked(source, &marked, Marker::default(), &html("[", "]")),
        "s = &#x27;&lt;b&gt;&#x27; &amp; &quot;x&quot;"
    );
}

#[test]
fn plain_mode_keeps_newlines_inside_runs() {
    let source = "a\nb";
    let marked = marked_spans(source, &[0..3]);
    assert_eq!(
        render_marked(source, &marked, Marker::default(), &braces()),
        "{a\nb}"
    );
}

#[test]
fn multibyte_text_survives_marking() {
    let source = "x = 'héllo'\n";
    let marked = marked_spans(source, &[4..12]);
    assert_eq!(marked.len(), source.len());
    assert_eq!(
        render_marked(source, &marked, Marker::default(), &braces()),
        "x = {'héllo'}\n"
    );
}

#[test]
fn custom_marker_is_honoured() -> crate::error::Result<()> {
    let marker = Marker::new('#')?;
    let source = "a@b";
    let tokens = vec![Token::new("x", 0..3)];
    let mut marked = MarkedSource::unmarked(source);
    marked.mark_tokens(&tokens, marker);
    assert_eq!(marked.to_string_lossy(), "###");
    assert_eq!(render_marked(source, &marked, marker, &braces()), "{a@b}");
    Ok(())
}

#[test]
fn non_ascii_marker_is_rejected() {
    assert!(Marker::new('é').is_err());
    assert_eq!(Marker::default().as_char(), '@');
}
