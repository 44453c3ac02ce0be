//! Scanner loop for the Ouroboros tokenizer
//!
//! Single pass, single cursor: ask the disambiguation engine for the best
//! match, emit a token, advance by the match length. Positions no rule
//! claims become single-code-point `unknown` tokens, so the scan never
//! stalls and the emitted spans always partition the whole input. Composite
//! categories get their span re-scanned once against a restricted registry;
//! children never recurse further.

use crate::ouro::engine::best_match_at;
use crate::ouro::rules::{self, Registry};
use crate::ouro::token::{Token, TokenCategory};
use std::ops::Range;

/// Tokenize Ouroboros source text.
///
/// Pure and restartable: the same input always yields the same token
/// sequence, and no state survives between calls. Never fails: malformed
/// input degrades to `unknown` tokens or to literals extended to end of
/// input, per the grammar.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    while cursor < input.len() {
        match best_match_at(rules::top_level(), input, 0..input.len(), cursor) {
            Some(found) => {
                let end = cursor + found.length;
                let text = &input[cursor..end];
                tokens.push(match found.category {
                    TokenCategory::ClassNameDefinition => Token::composite(
                        found.category,
                        text,
                        cursor,
                        classify_span(rules::class_definition_interior(), input, cursor..end),
                    ),
                    TokenCategory::Method | TokenCategory::Property => Token::composite(
                        found.category,
                        text,
                        cursor,
                        classify_span(rules::member_interior(), input, cursor..end),
                    ),
                    category => Token::leaf(category, text, cursor),
                });
                cursor = end;
            }
            None => {
                let step = char_len_at(input, cursor);
                tokens.push(Token::leaf(
                    TokenCategory::Unknown,
                    &input[cursor..cursor + step],
                    cursor,
                ));
                cursor += step;
            }
        }
    }
    tokens
}

/// Depth-1 sub-tokenization of a composite span against a restricted
/// registry. Positions no sub-rule claims become single-code-point `unknown`
/// children, so the children tile the parent span exactly.
fn classify_span(registry: &Registry, input: &str, window: Range<usize>) -> Vec<Token> {
    let mut children = Vec::new();
    let mut cursor = window.start;
    while cursor < window.end {
        match best_match_at(registry, input, window.clone(), cursor) {
            Some(found) => {
                let end = cursor + found.length;
                children.push(Token::leaf(found.category, &input[cursor..end], cursor));
                cursor = end;
            }
            None => {
                let step = char_len_at(input, cursor);
                children.push(Token::leaf(
                    TokenCategory::Unknown,
                    &input[cursor..cursor + step],
                    cursor,
                ));
                cursor += step;
            }
        }
    }
    children
}

fn char_len_at(input: &str, cursor: usize) -> usize {
    input[cursor..].chars().next().map_or(1, |c| c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ouro::token::reconstruct;

    fn categories(tokens: &[Token]) -> Vec<TokenCategory> {
        tokens.iter().map(|t| t.category).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_single_keyword() {
        let tokens = tokenize("return");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].category, TokenCategory::Keyword);
        assert_eq!(tokens[0].text, "return");
    }

    #[test]
    fn test_class_definition_emits_keyword_then_composite() {
        let tokens = tokenize("class Foo {");
        assert_eq!(
            categories(&tokens),
            vec![
                TokenCategory::Keyword,             // "class"
                TokenCategory::Unknown,             // " "
                TokenCategory::ClassNameDefinition, // "Foo"
                TokenCategory::Unknown,             // " "
                TokenCategory::Punctuation,         // "{"
            ]
        );
        let definition = &tokens[2];
        assert_eq!(definition.text, "Foo");
        assert_eq!(definition.start, 6);
        assert_eq!(definition.end, 9);
        assert_eq!(definition.children.len(), 1);
        assert_eq!(definition.children[0].category, TokenCategory::Identifier);
        assert_eq!(definition.children[0].text, "Foo");
    }

    #[test]
    fn test_generic_definition_children_flatten_to_depth_one() {
        let tokens = tokenize("struct Pair<A, B> {}");
        let definition = &tokens[2];
        assert_eq!(definition.category, TokenCategory::ClassNameDefinition);
        assert_eq!(definition.text, "Pair<A, B>");
        let child_view: Vec<(TokenCategory, &str)> = definition
            .children
            .iter()
            .map(|c| (c.category, c.text.as_str()))
            .collect();
        assert_eq!(
            child_view,
            vec![
                (TokenCategory::Identifier, "Pair"),
                (TokenCategory::Punctuation, "<"),
                (TokenCategory::UserDefinedType, "A"),
                (TokenCategory::Punctuation, ","),
                (TokenCategory::Unknown, " "),
                (TokenCategory::UserDefinedType, "B"),
                (TokenCategory::Punctuation, ">"),
            ]
        );
        for child in &definition.children {
            assert!(child.children.is_empty());
        }
    }

    #[test]
    fn test_member_chain_mixes_properties_and_methods() {
        let tokens = tokenize("a.b.c()");
        assert_eq!(
            categories(&tokens),
            vec![
                TokenCategory::Identifier,  // "a"
                TokenCategory::Property,    // ".b"
                TokenCategory::Method,      // ".c"
                TokenCategory::Punctuation, // "("
                TokenCategory::Punctuation, // ")"
            ]
        );
        assert_eq!(tokens[1].children[0].category, TokenCategory::PunctuationDot);
        assert_eq!(tokens[1].children[1].category, TokenCategory::Property);
        assert_eq!(tokens[2].children[1].category, TokenCategory::Method);
        assert_eq!(tokens[2].children[1].text, "c");
    }

    #[test]
    fn test_member_with_interior_whitespace() {
        let tokens = tokenize("x. y");
        assert_eq!(tokens[1].category, TokenCategory::Property);
        assert_eq!(tokens[1].text, ". y");
        let child_view: Vec<(TokenCategory, &str)> = tokens[1]
            .children
            .iter()
            .map(|c| (c.category, c.text.as_str()))
            .collect();
        assert_eq!(
            child_view,
            vec![
                (TokenCategory::PunctuationDot, "."),
                (TokenCategory::Unknown, " "),
                (TokenCategory::Property, "y"),
            ]
        );
    }

    #[test]
    fn test_double_dot_is_plain_punctuation() {
        let tokens = tokenize("a..b");
        assert_eq!(
            categories(&tokens),
            vec![
                TokenCategory::Identifier,  // "a"
                TokenCategory::Punctuation, // "."
                TokenCategory::Punctuation, // "."
                TokenCategory::Identifier,  // "b"
            ]
        );
    }

    #[test]
    fn test_dot_after_identifier_is_not_a_float() {
        let tokens = tokenize("x.5");
        assert_eq!(
            categories(&tokens),
            vec![
                TokenCategory::Identifier,  // "x"
                TokenCategory::Punctuation, // "."
                TokenCategory::Number,      // "5"
            ]
        );

        let tokens = tokenize(" .5");
        assert_eq!(
            categories(&tokens),
            vec![TokenCategory::Unknown, TokenCategory::Number]
        );
        assert_eq!(tokens[1].text, ".5");
    }

    #[test]
    fn test_unknown_fallback_covers_stray_characters() {
        let tokens = tokenize("a @ b");
        assert_eq!(
            categories(&tokens),
            vec![
                TokenCategory::Identifier,
                TokenCategory::Unknown,
                TokenCategory::Unknown, // "@"
                TokenCategory::Unknown,
                TokenCategory::Identifier,
            ]
        );
        assert_eq!(tokens[2].text, "@");
    }

    #[test]
    fn test_unknown_advances_whole_code_points() {
        let tokens = tokenize("é");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].category, TokenCategory::Unknown);
        assert_eq!(tokens[0].text, "é");
        assert_eq!(tokens[0].end, "é".len());
    }

    #[test]
    fn test_string_swallows_keywords() {
        let tokens = tokenize("\"class\"");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].category, TokenCategory::String);
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        let tokens = tokenize("/* abc");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].category, TokenCategory::Comment);
        assert_eq!(tokens[0].text, "/* abc");
    }

    #[test]
    fn test_spans_are_contiguous_and_reconstruct_the_input() {
        let input = "fn main() { let v: Vector2 = new Vector2(1.5, .5); v.norm(); }";
        let tokens = tokenize(input);
        assert_eq!(reconstruct(&tokens), input);
        let mut cursor = 0;
        for token in &tokens {
            assert_eq!(token.start, cursor);
            cursor = token.end;
            if !token.children.is_empty() {
                let mut inner = token.start;
                for child in &token.children {
                    assert_eq!(child.start, inner);
                    inner = child.end;
                }
                assert_eq!(inner, token.end);
            }
        }
        assert_eq!(cursor, input.len());
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let input = "let a: Map<K, V> = b ? c : D;";
        assert_eq!(tokenize(input), tokenize(input));
    }
}
