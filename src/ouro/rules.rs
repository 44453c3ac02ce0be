//! Pattern registry for the Ouroboros tokenizer
//!
//! The grammar is data, not code: every token category is an anchored regex
//! plus optional context predicates, and disambiguation comes from one fixed
//! evaluation order assembled here. The order realizes a two-tier priority:
//!
//! 1. comments and strings, absolute first
//! 2. the type-ish categories (builtin-type, user-defined-type,
//!    class-name-definition, class-name-usage) before `keyword`
//! 3. function definitions, numbers, member access, builtin functions,
//!    operators, punctuation
//! 4. `identifier` as the catch-all
//!
//! Context that a single pattern cannot express ("preceded by `class` plus
//! whitespace", "followed by `(`") lives in small predicate functions
//! attached to rules, so each disambiguation policy stays independently
//! testable. Predicates inspect the raw input around the candidate match but
//! never consume it: emitted spans always start at the cursor.

use crate::ouro::token::TokenCategory;
use once_cell::sync::Lazy;
use regex::Regex;

/// Context predicate over the raw input. `window_start` is where the current
/// scan window begins (0 for top-level scans, the parent span start inside a
/// composite), `pos` is the position under test: the cursor for lookbehinds,
/// the match end for lookaheads.
pub type ContextCheck = fn(&str, usize, usize) -> bool;

// Anchored patterns, transliterated from the language grammar. Word classes
// and boundaries are ASCII throughout.

/// Block comments run lazily to the first `*/`, or to end of input when
/// unterminated.
const BLOCK_COMMENT: &str = r"^/\*(?s:.)*?(?:\*/|$)";
/// Line comments stop before the line break (also before `\r` in CRLF files).
const LINE_COMMENT: &str = r"^//[^\n\r]*";
/// Double-quoted string with JSON-style escapes; raw control characters are
/// not valid content.
const STRING_LITERAL: &str = r#"^"(?:\\(?:["\\/bfnrt]|u[0-9a-fA-F]{4})|[^"\\\x00-\x1F\x7F]+)*""#;
/// An opening quote with no closing quote anywhere before end of input.
const STRING_UNTERMINATED: &str = r#"^"[^"]*$"#;
const KEYWORD: &str = r"^(?:let|var|const|fn|function|return|if|else|while|for|class|struct|new|this|extends|super|import|public|private|static|break|continue|print|as|in|is|async|await|yield|enum|interface|implements|package|module|typeof|instanceof|true|false|null)(?-u:\b)";
const BUILTIN_TYPE: &str =
    r"^(?:int|long|float|double|bool|boolean|string|char|void|any|array|object|Vector2|Vector3|Vector4|map)(?-u:\b)";
/// Capitalized (or underscore-led) type name with an optional `<...>` generic
/// list. Shared by user-defined-type, class-name-definition and
/// class-name-usage; their context predicates tell them apart.
const TYPE_NAME: &str = r"^[A-Z_][A-Za-z0-9_]*(?:\s*<[^>]+>)?";
const FUNCTION_NAME: &str = r"^[a-zA-Z_][0-9A-Za-z_]*";
// The four numeric forms, tried in this order. Hex, decimal and leading-dot
// are case-insensitive; underscore grouping accepts only uppercase suffixes.
const NUMBER_HEX: &str = r"^(?i)0x[0-9a-f]+[ln]?(?-u:\b)";
const NUMBER_GROUPED: &str = r"^[0-9]{1,3}(?:_[0-9]{3})+[LN]?(?-u:\b)";
const NUMBER_DECIMAL: &str = r"^(?i)[0-9]+(?:\.[0-9]*)?(?:e[+-]?[0-9]+)?[fdln]?(?-u:\b)";
/// `.5`, `.5e-10`. The original `\B` anchor reduces to the same check as a
/// leading word boundary once the first character is a non-word `.`.
const NUMBER_LEADING_DOT: &str = r"^(?i)\.[0-9]+(?:e[+-]?[0-9]+)?[fdln]?(?-u:\b)";
/// A member-access fragment: the dot, optional whitespace, and the name.
const MEMBER_ACCESS: &str = r"^\.\s*[a-zA-Z_][0-9A-Za-z_]*";
const BUILTIN_FUNCTION: &str = r"^(?:print|to_string|string_concat|string_length|sqrt|abs|max|min|assert|log|warn|error|opengl_[a-z_]+|vulkan_[a-z_]+|voxel_[a-z_]+|ml_[a-z_]+|init_gui|draw_window|draw_label|draw_button|gui_message_loop|connect_to_server|http_get|register_event|trigger_event|set_timeout)(?-u:\b)";
/// Longest-form operator family; alternation order decides ties, so `--`
/// beats `-` and `?.` beats `?`.
const OPERATOR: &str = r"^(?:--?|\+\+?|!=?=?|<=?|>=?|&&?|\|\|?|\?\.|[?*/~^%&|=<>:])";
const PUNCTUATION: &str = r"^[{}\[\]();,.]";
const IDENTIFIER: &str = r"^[a-zA-Z_][0-9A-Za-z_]*";
// Interior patterns for composite spans.
const GENERIC_PUNCTUATION: &str = r"^[<>,]";
const GENERIC_TYPE_NAME: &str = r"^[A-Z_][0-9A-Za-z_]*";
const MEMBER_DOT: &str = r"^\.";
const MEMBER_NAME: &str = r"^[a-zA-Z_][0-9A-Za-z_]*";

/// ASCII word character, the grammar's `\w`.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn prev_char(input: &str, pos: usize) -> Option<char> {
    input[..pos].chars().next_back()
}

fn next_nonspace_char(input: &str, pos: usize) -> Option<char> {
    input[pos..].chars().find(|c| !c.is_whitespace())
}

/// True when `pos` sits at an ASCII word boundary: start of input or right
/// after a non-word character.
fn at_word_boundary(input: &str, _window_start: usize, pos: usize) -> bool {
    prev_char(input, pos).is_none_or(|c| !is_word_char(c))
}

/// Block comments may not ride an escaping backslash.
fn not_escaped(input: &str, _window_start: usize, pos: usize) -> bool {
    prev_char(input, pos) != Some('\\')
}

/// Line comments are additionally barred right after `:`, keeping URL
/// schemes like `http://` out of comments.
fn not_escaped_or_after_colon(input: &str, _window_start: usize, pos: usize) -> bool {
    !matches!(prev_char(input, pos), Some('\\') | Some(':'))
}

/// Member access starts at a lone `.`, never the second dot of `..`.
fn not_after_dot(input: &str, _window_start: usize, pos: usize) -> bool {
    prev_char(input, pos) != Some('.')
}

/// True when the text before `pos`, ignoring trailing whitespace, ends with
/// one of `keywords` at a word boundary. At least one whitespace character
/// must separate the keyword from `pos`.
fn preceded_by_keyword(input: &str, pos: usize, keywords: &[&str]) -> bool {
    let before = &input[..pos];
    let trimmed = before.trim_end();
    if trimmed.len() == before.len() {
        return false;
    }
    keywords.iter().any(|keyword| {
        trimmed.ends_with(keyword) && {
            let head = &trimmed[..trimmed.len() - keyword.len()];
            head.chars().next_back().is_none_or(|c| !is_word_char(c))
        }
    })
}

/// After `class`, `struct`, `enum` or `interface` plus whitespace.
fn after_definition_keyword(input: &str, _window_start: usize, pos: usize) -> bool {
    preceded_by_keyword(input, pos, &["class", "struct", "enum", "interface"])
}

/// After `new` or `extends` plus whitespace.
fn after_usage_keyword(input: &str, _window_start: usize, pos: usize) -> bool {
    preceded_by_keyword(input, pos, &["new", "extends"])
}

/// After `function` or `fn` plus whitespace.
fn after_function_keyword(input: &str, _window_start: usize, pos: usize) -> bool {
    preceded_by_keyword(input, pos, &["function", "fn"])
}

/// After a type-annotation `:`, possibly separated by whitespace. The `:`
/// itself may close any of the annotation forms (`let x:`, `x:`, `(x:`, or a
/// bare `:`), so the check reduces to the nearest non-space character.
fn after_annotation_colon(input: &str, _window_start: usize, pos: usize) -> bool {
    input[..pos].trim_end().ends_with(':')
}

/// Declaration-like continuation: optional whitespace, then an identifier
/// character, `=`, `;`, `,`, `(`, `)`, `{`, or end of input. Keeps a type
/// name in a ternary's `:` arm from reading as an annotation.
fn declaration_like_follows(input: &str, _window_start: usize, pos: usize) -> bool {
    match next_nonspace_char(input, pos) {
        None => true,
        Some(c) => is_word_char(c) || matches!(c, '=' | ';' | ',' | '(' | ')' | '{'),
    }
}

/// A call opens after the match: optional whitespace, then `(`. The paren is
/// inspected, never consumed.
fn call_follows(input: &str, _window_start: usize, pos: usize) -> bool {
    next_nonspace_char(input, pos) == Some('(')
}

/// Anchors a rule to the first position of the scan window; inside a
/// class-definition span this pins the definition name, letting generic
/// parameters further in classify differently.
fn at_window_start(_input: &str, window_start: usize, pos: usize) -> bool {
    pos == window_start
}

/// One evaluation step of the registry: an anchored matcher for a category,
/// gated by optional context predicates.
pub struct Rule {
    pub category: TokenCategory,
    pub matcher: Regex,
    pub lookbehind: Option<ContextCheck>,
    pub lookahead: Option<ContextCheck>,
}

/// A frozen, ordered rule list. Built once at process start and shared
/// read-only; concurrent scans never mutate it.
pub struct Registry {
    rules: Vec<Rule>,
}

impl Registry {
    /// The rules in their fixed evaluation order.
    pub fn rules_in_priority_order(&self) -> &[Rule] {
        &self.rules
    }
}

/// Assembles a registry in declaration order, then freezes it. Patterns are
/// compiled here; the constants above are exercised by the test suite, so
/// construction inside the lazy statics cannot fail at runtime.
struct RegistryBuilder {
    rules: Vec<Rule>,
}

impl RegistryBuilder {
    fn new() -> Self {
        RegistryBuilder { rules: Vec::new() }
    }

    fn rule(self, category: TokenCategory, pattern: &str) -> Self {
        self.entry(category, pattern, None, None)
    }

    fn rule_behind(self, category: TokenCategory, pattern: &str, behind: ContextCheck) -> Self {
        self.entry(category, pattern, Some(behind), None)
    }

    fn rule_ahead(self, category: TokenCategory, pattern: &str, ahead: ContextCheck) -> Self {
        self.entry(category, pattern, None, Some(ahead))
    }

    fn rule_around(
        self,
        category: TokenCategory,
        pattern: &str,
        behind: ContextCheck,
        ahead: ContextCheck,
    ) -> Self {
        self.entry(category, pattern, Some(behind), Some(ahead))
    }

    fn entry(
        mut self,
        category: TokenCategory,
        pattern: &str,
        lookbehind: Option<ContextCheck>,
        lookahead: Option<ContextCheck>,
    ) -> Self {
        self.rules.push(Rule {
            category,
            matcher: Regex::new(pattern).unwrap(),
            lookbehind,
            lookahead,
        });
        self
    }

    fn freeze(self) -> Registry {
        Registry { rules: self.rules }
    }
}

static TOP_LEVEL: Lazy<Registry> = Lazy::new(|| {
    RegistryBuilder::new()
        .rule_behind(TokenCategory::Comment, BLOCK_COMMENT, not_escaped)
        .rule_behind(TokenCategory::Comment, LINE_COMMENT, not_escaped_or_after_colon)
        .rule(TokenCategory::String, STRING_LITERAL)
        .rule(TokenCategory::String, STRING_UNTERMINATED)
        .rule_behind(TokenCategory::BuiltinType, BUILTIN_TYPE, at_word_boundary)
        .rule_around(
            TokenCategory::UserDefinedType,
            TYPE_NAME,
            after_annotation_colon,
            declaration_like_follows,
        )
        .rule_behind(TokenCategory::ClassNameDefinition, TYPE_NAME, after_definition_keyword)
        .rule_behind(TokenCategory::ClassNameUsage, TYPE_NAME, after_usage_keyword)
        .rule_behind(TokenCategory::Keyword, KEYWORD, at_word_boundary)
        .rule_behind(TokenCategory::FunctionDefinition, FUNCTION_NAME, after_function_keyword)
        .rule_behind(TokenCategory::Number, NUMBER_HEX, at_word_boundary)
        .rule_behind(TokenCategory::Number, NUMBER_GROUPED, at_word_boundary)
        .rule_behind(TokenCategory::Number, NUMBER_DECIMAL, at_word_boundary)
        .rule_behind(TokenCategory::Number, NUMBER_LEADING_DOT, at_word_boundary)
        .rule_around(TokenCategory::Method, MEMBER_ACCESS, not_after_dot, call_follows)
        .rule_behind(TokenCategory::Property, MEMBER_ACCESS, not_after_dot)
        .rule_behind(TokenCategory::BuiltinFunction, BUILTIN_FUNCTION, at_word_boundary)
        .rule(TokenCategory::Operator, OPERATOR)
        .rule(TokenCategory::Punctuation, PUNCTUATION)
        .rule_behind(TokenCategory::Identifier, IDENTIFIER, at_word_boundary)
        .freeze()
});

static CLASS_DEFINITION_INTERIOR: Lazy<Registry> = Lazy::new(|| {
    RegistryBuilder::new()
        .rule_behind(TokenCategory::Identifier, GENERIC_TYPE_NAME, at_window_start)
        .rule(TokenCategory::Punctuation, GENERIC_PUNCTUATION)
        .rule(TokenCategory::UserDefinedType, GENERIC_TYPE_NAME)
        .freeze()
});

static MEMBER_INTERIOR: Lazy<Registry> = Lazy::new(|| {
    RegistryBuilder::new()
        .rule(TokenCategory::PunctuationDot, MEMBER_DOT)
        .rule_ahead(TokenCategory::Method, MEMBER_NAME, call_follows)
        .rule(TokenCategory::Property, MEMBER_NAME)
        .freeze()
});

/// The full registry driving top-level scans.
pub fn top_level() -> &'static Registry {
    &TOP_LEVEL
}

/// Restricted registry for the interior of a class-definition span
/// (`Name` or `Name<Params>`).
pub fn class_definition_interior() -> &'static Registry {
    &CLASS_DEFINITION_INTERIOR
}

/// Restricted registry for the interior of a member-access span
/// (`.name`, `. name`).
pub fn member_interior() -> &'static Registry {
    &MEMBER_INTERIOR
}
