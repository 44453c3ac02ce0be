//! Token definitions for the Ouroboros tokenizer
//!
//! This module defines the closed set of token categories the scanner can
//! emit, the token type itself, and the display aliasing that lets consumers
//! with a coarser category set (highlighters, themes) style the fine-grained
//! categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical language identifier.
pub const LANGUAGE_ID: &str = "ouroboros";
/// Short language alias, accepted wherever [`LANGUAGE_ID`] is.
pub const LANGUAGE_ALIAS: &str = "ouro";
/// File extension of Ouroboros sources.
pub const SOURCE_EXTENSION: &str = "ouro";

/// All token categories the scanner can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenCategory {
    // Absolute-first literals
    Comment,
    String,

    // Type-ish categories, tried before keyword
    BuiltinType,
    UserDefinedType,
    ClassNameDefinition,
    ClassNameUsage,

    Keyword,
    FunctionDefinition,
    Number,

    // Member access after `.`
    Method,
    Property,
    PunctuationDot,

    BuiltinFunction,
    Operator,
    Punctuation,

    // Catch-alls
    Identifier,
    Unknown,
}

impl TokenCategory {
    /// Every category, in the order `ouro categories` lists them
    pub const ALL: [TokenCategory; 17] = [
        TokenCategory::Comment,
        TokenCategory::String,
        TokenCategory::Keyword,
        TokenCategory::BuiltinType,
        TokenCategory::UserDefinedType,
        TokenCategory::ClassNameDefinition,
        TokenCategory::ClassNameUsage,
        TokenCategory::FunctionDefinition,
        TokenCategory::Number,
        TokenCategory::Method,
        TokenCategory::Property,
        TokenCategory::PunctuationDot,
        TokenCategory::BuiltinFunction,
        TokenCategory::Operator,
        TokenCategory::Punctuation,
        TokenCategory::Identifier,
        TokenCategory::Unknown,
    ];

    /// Canonical name of this category
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Comment => "comment",
            TokenCategory::String => "string",
            TokenCategory::Keyword => "keyword",
            TokenCategory::BuiltinType => "builtin-type",
            TokenCategory::UserDefinedType => "user-defined-type",
            TokenCategory::ClassNameDefinition => "class-name-definition",
            TokenCategory::ClassNameUsage => "class-name-usage",
            TokenCategory::FunctionDefinition => "function-definition",
            TokenCategory::Number => "number",
            TokenCategory::Method => "method",
            TokenCategory::Property => "property",
            TokenCategory::PunctuationDot => "punctuation-dot",
            TokenCategory::BuiltinFunction => "builtin-function",
            TokenCategory::Operator => "operator",
            TokenCategory::Punctuation => "punctuation",
            TokenCategory::Identifier => "identifier",
            TokenCategory::Unknown => "unknown",
        }
    }

    /// Coarser display category, for consumers that don't recognize the
    /// fine-grained one. `None` means the category displays as itself.
    pub fn alias(&self) -> Option<&'static str> {
        match self {
            TokenCategory::BuiltinType
            | TokenCategory::UserDefinedType
            | TokenCategory::ClassNameDefinition
            | TokenCategory::ClassNameUsage => Some("class-name"),
            TokenCategory::FunctionDefinition | TokenCategory::Method => Some("function"),
            TokenCategory::Property => Some("variable"),
            TokenCategory::PunctuationDot => Some("punctuation"),
            _ => None,
        }
    }

    /// CSS class the renderers style this category with: the display alias
    /// where one exists, the canonical name otherwise
    pub fn css_class(&self) -> &'static str {
        self.alias().unwrap_or_else(|| self.as_str())
    }

    /// Check if this category is the unclassified fallback
    pub fn is_unknown(&self) -> bool {
        matches!(self, TokenCategory::Unknown)
    }

    /// Check if this category is a literal (comment, string or number)
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenCategory::Comment | TokenCategory::String | TokenCategory::Number
        )
    }

    /// Check if this category names a type and displays as `class-name`
    pub fn is_type_like(&self) -> bool {
        matches!(
            self,
            TokenCategory::BuiltinType
                | TokenCategory::UserDefinedType
                | TokenCategory::ClassNameDefinition
                | TokenCategory::ClassNameUsage
        )
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified, contiguous span of source text.
///
/// Top-level tokens partition the input exactly: spans are contiguous,
/// non-overlapping, and concatenate back to the original text. Composite
/// tokens carry `children` that tile the parent span the same way; children
/// never have children of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub category: TokenCategory,
    pub text: String,
    /// Byte offset of the span start in the original input
    pub start: usize,
    /// Byte offset one past the span end
    pub end: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Token>,
}

impl Token {
    /// Create a childless token from a span
    pub fn leaf(category: TokenCategory, text: &str, start: usize) -> Token {
        Token {
            category,
            text: text.to_string(),
            start,
            end: start + text.len(),
            children: Vec::new(),
        }
    }

    /// Create a token whose span carries an internal sub-tokenization
    pub fn composite(
        category: TokenCategory,
        text: &str,
        start: usize,
        children: Vec<Token>,
    ) -> Token {
        Token {
            category,
            text: text.to_string(),
            start,
            end: start + text.len(),
            children,
        }
    }
}

/// Rebuild the exact source text from a token stream.
pub fn reconstruct(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}
