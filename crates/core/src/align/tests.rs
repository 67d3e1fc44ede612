use super::*;
use crate::token::Token;

fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

fn block(a: usize, b: usize, len: usize) -> MatchingBlock {
    MatchingBlock { a, b, len }
}

fn tokens(kinds: &[&str]) -> Vec<Token> {
    kinds
        .iter()
        .enumerate()
        .map(|(idx, kind)| Token::new(*kind, idx..idx + 1))
        .collect()
}

#[test]
fn identical_sequences_match_completely() {
    let seq = chars("abcdef");
    let alignment = align(&seq, &seq);
    assert_eq!(alignment.ratio, 1.0);
    assert_eq!(alignment.blocks, [block(0, 0, 6)]);
}

#[test]
fn disjoint_sequences_have_zero_ratio() {
    let alignment = align(&chars("abc"), &chars("xyz"));
    assert_eq!(alignment.ratio, 0.0);
    assert!(alignment.blocks.is_empty());
}

#[test]
fn both_empty_counts_as_identical() {
    let empty: Vec<char> = Vec::new();
    let alignment = align(&empty, &empty);
    assert_eq!(alignment.ratio, 1.0);
    assert!(alignment.blocks.is_empty());
}

#[test]
fn one_empty_side_has_zero_ratio() {
    let empty: Vec<char> = Vec::new();
    let alignment = align(&chars("abc"), &empty);
    assert_eq!(alignment.ratio, 0.0);
    assert!(alignment.blocks.is_empty());
}

#[test]
fn recursive_split_matches_reference_decomposition() {
    // Known decompositions of the classic Ratcliff/Obershelp examples.
    let alignment = align(&chars("abxcd"), &chars("abcd"));
    assert_eq!(alignment.blocks, [block(0, 0, 2), block(3, 2, 2)]);
    assert!((alignment.ratio - 8.0 / 9.0).abs() < 1e-12);

    let alignment = align(
        &chars("private Thread currentThread;"),
        &chars("private volatile Thread currentThread;"),
    );
    assert_eq!(alignment.blocks, [block(0, 0, 6), block(6, 15, 23)]);
}

#[test]
fn longest_match_prefers_earliest_position() {
    let alignment = align(&chars("ab"), &chars("abab"));
    assert_eq!(alignment.blocks, [block(0, 0, 2)]);

    let alignment = align(&chars("xaby"), &chars("abxy"));
    assert_eq!(alignment.blocks, [block(1, 0, 2), block(3, 3, 1)]);
}

#[test]
fn blocks_are_sorted_and_do_not_overlap() {
    let a = chars("the quick brown fox jumps over the lazy dog");
    let b = chars("a quick brown cat jumps over a lazy fox");
    let alignment = align(&a, &b);
    for pair in alignment.blocks.windows(2) {
        assert!(pair[0].a + pair[0].len <= pair[1].a);
        assert!(pair[0].b + pair[0].len <= pair[1].b);
    }
    for blk in &alignment.blocks {
        assert!(blk.len > 0);
        assert_eq!(a[blk.a..blk.a + blk.len], b[blk.b..blk.b + blk.len]);
    }
    assert!(alignment.ratio > 0.0 && alignment.ratio < 1.0);
}

#[test]
fn adjacent_blocks_are_merged() {
    let blocks = merge_adjacent(vec![block(0, 0, 2), block(2, 2, 3), block(6, 5, 1)]);
    assert_eq!(blocks, [block(0, 0, 5), block(6, 5, 1)]);
}

#[test]
fn tokens_align_by_kind_only() {
    let a = vec![
        Token::new("identifier", 0..3),
        Token::new("=", 4..5),
        Token::new("integer", 6..7),
    ];
    let b = vec![
        Token::new("identifier", 0..10),
        Token::new("=", 11..12),
        Token::new("integer", 13..20),
    ];
    let alignment = align(&a, &b);
    assert_eq!(alignment.ratio, 1.0);
    assert_eq!(alignment.blocks, [block(0, 0, 3)]);
}

#[test]
fn ratio_counts_matched_tokens_on_both_sides() {
    let a = tokens(&["def", "identifier", "(", ")", ":"]);
    let b = tokens(&["class", "identifier", "(", ")", ":", "pass"]);
    let alignment = align(&a, &b);
    assert_eq!(alignment.blocks, [block(1, 1, 4)]);
    assert!((alignment.ratio - 8.0 / 11.0).abs() < 1e-12);
}

#[test]
fn ratio_stays_within_bounds() {
    assert_eq!(similarity_ratio(0, 0), 1.0);
    assert_eq!(similarity_ratio(0, 10), 0.0);
    assert_eq!(similarity_ratio(5, 10), 1.0);
    assert_eq!(similarity_ratio(9, 10), 1.0);
}
