//! Output formats for token streams (tokens → text/JSON/YAML/HTML/ANSI)
//!
//! The scanner produces the tokens; everything a consumer actually sees
//! comes out of here. HTML output is Prism-compatible markup (one
//! `<span class="token CSS">` per classified token, CSS being the display
//! alias), ANSI output styles the same classes for terminals, and the
//! text/JSON/YAML forms dump the stream itself for tooling.

use crate::ouro::token::{Token, LANGUAGE_ID};
use crossterm::style::{Color, Stylize};
use std::fmt;

/// Errors from the output-format edge. Scanning itself is total and has no
/// error type; only serialization and format selection can fail.
#[derive(Debug)]
pub enum RenderError {
    UnsupportedFormat(String),
    SerializationError(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnsupportedFormat(format) => {
                write!(f, "Unsupported output format: {}", format)
            }
            RenderError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Plain-text dump of a token stream: one `category "text"` line per token,
/// children indented below their parent.
pub fn render_text(tokens: &[Token]) -> String {
    let mut output = String::new();
    for token in tokens {
        output.push_str(&format!("{} {:?}\n", token.category, token.text));
        for child in &token.children {
            output.push_str(&format!("  {} {:?}\n", child.category, child.text));
        }
    }
    output
}

/// Serialize a token stream in the named dump format (`text`, `json`, `yaml`).
pub fn serialize_tokens(tokens: &[Token], format: &str) -> Result<String, RenderError> {
    match format {
        "text" => Ok(render_text(tokens)),
        "json" => serde_json::to_string_pretty(tokens).map_err(|e| {
            RenderError::SerializationError(format!("JSON serialization failed: {}", e))
        }),
        "yaml" => serde_yaml::to_string(tokens).map_err(|e| {
            RenderError::SerializationError(format!("YAML serialization failed: {}", e))
        }),
        other => Err(RenderError::UnsupportedFormat(other.to_string())),
    }
}

/// Render a token stream in the named highlight format (`html`, `ansi`).
/// The HTML form is the standalone page; `title` names it.
pub fn render_highlight(tokens: &[Token], format: &str, title: &str) -> Result<String, RenderError> {
    match format {
        "html" => Ok(render_html_page(title, tokens)),
        "ansi" => Ok(render_ansi(tokens)),
        other => Err(RenderError::UnsupportedFormat(other.to_string())),
    }
}

/// Render Prism-compatible highlight markup.
///
/// Classified tokens become `<span class="token CSS">`, CSS being the
/// display alias (falling back to the category name); composite tokens nest
/// child spans inside the outer one; `unknown` tokens pass through as
/// escaped bare text so whitespace and stray characters stay unstyled.
pub fn render_html(tokens: &[Token]) -> String {
    let mut output = String::new();
    for token in tokens {
        push_html(&mut output, token);
    }
    output
}

fn push_html(output: &mut String, token: &Token) {
    if token.category.is_unknown() {
        output.push_str(&escape_html(&token.text));
        return;
    }
    output.push_str(&format!(
        "<span class=\"token {}\">",
        token.category.css_class()
    ));
    if token.children.is_empty() {
        output.push_str(&escape_html(&token.text));
    } else {
        for child in &token.children {
            push_html(output, child);
        }
    }
    output.push_str("</span>");
}

/// Wrap highlight markup in a complete HTML document with the embedded
/// dark-theme stylesheet.
pub fn render_html_page(title: &str, tokens: &[Token]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="ouro">
  <title>{}</title>
  <style>
{}
  </style>
</head>
<body>
<pre class="language-{}"><code>{}</code></pre>
</body>
</html>"#,
        escape_html(title),
        STYLESHEET,
        LANGUAGE_ID,
        render_html(tokens)
    )
}

/// Render a token stream for a terminal, styled per display alias with ANSI
/// colors. `unknown` and unstyled classes pass through as-is.
pub fn render_ansi(tokens: &[Token]) -> String {
    let mut output = String::new();
    for token in tokens {
        push_ansi(&mut output, token);
    }
    output
}

fn push_ansi(output: &mut String, token: &Token) {
    if !token.children.is_empty() {
        for child in &token.children {
            push_ansi(output, child);
        }
        return;
    }
    match terminal_color(token.category.css_class()) {
        Some(color) => output.push_str(&token.text.as_str().with(color).to_string()),
        None => output.push_str(&token.text),
    }
}

fn terminal_color(css_class: &str) -> Option<Color> {
    match css_class {
        "comment" => Some(Color::DarkGrey),
        "string" => Some(Color::DarkGreen),
        "keyword" => Some(Color::Magenta),
        "class-name" => Some(Color::Yellow),
        "function" => Some(Color::Blue),
        "variable" => Some(Color::Cyan),
        "number" => Some(Color::DarkYellow),
        "builtin-function" => Some(Color::DarkCyan),
        "operator" => Some(Color::Grey),
        _ => None,
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// One style rule per display class, dark background.
const STYLESHEET: &str = r#"    body { background: #1e1e2e; margin: 0; padding: 1rem; }
    pre { color: #cdd6f4; font-family: "Fira Code", Menlo, Consolas, monospace; font-size: 14px; line-height: 1.5; }
    .token.comment { color: #6c7086; font-style: italic; }
    .token.string { color: #a6e3a1; }
    .token.keyword { color: #cba6f7; font-weight: bold; }
    .token.class-name { color: #f9e2af; }
    .token.function { color: #89b4fa; }
    .token.variable { color: #94e2d5; }
    .token.number { color: #fab387; }
    .token.builtin-function { color: #89dceb; }
    .token.operator { color: #bac2de; }
    .token.punctuation { color: #9399b2; }
    .token.identifier { color: #cdd6f4; }"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ouro::scanner::tokenize;

    #[test]
    fn test_render_text_lists_tokens_with_indented_children() {
        let text = render_text(&tokenize("obj.run()"));
        assert_eq!(
            text,
            concat!(
                "identifier \"obj\"\n",
                "method \".run\"\n",
                "  punctuation-dot \".\"\n",
                "  method \"run\"\n",
                "punctuation \"(\"\n",
                "punctuation \")\"\n",
            )
        );
    }

    #[test]
    fn test_render_html_uses_display_alias_classes() {
        let html = render_html(&tokenize("let v: Point = 1;"));
        assert!(html.contains("<span class=\"token keyword\">let</span>"));
        assert!(html.contains("<span class=\"token class-name\">Point</span>"));
        assert!(html.contains("<span class=\"token number\">1</span>"));
        assert!(html.contains("<span class=\"token punctuation\">;</span>"));
    }

    #[test]
    fn test_render_html_nests_composite_children() {
        let html = render_html(&tokenize("a.b()"));
        assert!(html.contains(
            "<span class=\"token function\">\
             <span class=\"token punctuation\">.</span>\
             <span class=\"token function\">b</span></span>"
        ));
    }

    #[test]
    fn test_render_html_escapes_markup_characters() {
        let html = render_html(&tokenize("a < \"x&y\""));
        assert!(html.contains("&lt;"));
        assert!(html.contains("&quot;x&amp;y&quot;"));
        assert!(!html.contains("< "));
    }

    #[test]
    fn test_render_html_leaves_unknown_unstyled() {
        let html = render_html(&tokenize("a @"));
        assert!(html.contains("<span class=\"token identifier\">a</span> @"));
        assert!(!html.contains("unknown"));
    }

    #[test]
    fn test_render_html_page_wraps_standalone_document() {
        let page = render_html_page("demo.ouro", &tokenize("print"));
        assert!(page.contains("<!DOCTYPE html>"));
        assert!(page.contains("<title>demo.ouro</title>"));
        assert!(page.contains("<pre class=\"language-ouroboros\">"));
        assert!(page.contains(".token.keyword"));
    }

    #[test]
    fn test_render_ansi_styles_keywords_and_passes_plain_text() {
        let styled = render_ansi(&tokenize("return"));
        assert!(styled.contains("\u{1b}["));
        assert!(styled.contains("return"));

        // Identifiers and whitespace carry no color
        assert_eq!(render_ansi(&tokenize("plain name")), "plain name");
    }

    #[test]
    fn test_serialize_tokens_json_round_trips() {
        let tokens = tokenize("let x = 1;");
        let json = serialize_tokens(&tokens, "json").unwrap();
        let parsed: Vec<crate::ouro::token::Token> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tokens);
    }

    #[test]
    fn test_serialize_tokens_yaml_names_categories_in_kebab_case() {
        let yaml = serialize_tokens(&tokenize("Foo.bar"), "yaml").unwrap();
        assert!(yaml.contains("category: identifier"));
        assert!(yaml.contains("category: punctuation-dot"));
    }

    #[test]
    fn test_serialize_tokens_rejects_unknown_format() {
        let err = serialize_tokens(&[], "xml").unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
        assert_eq!(err.to_string(), "Unsupported output format: xml");
    }

    #[test]
    fn test_render_highlight_dispatches_on_format() {
        let tokens = tokenize("print");
        assert!(render_highlight(&tokens, "html", "t").unwrap().contains("<!DOCTYPE html>"));
        assert!(render_highlight(&tokens, "ansi", "t").unwrap().contains("print"));
        assert!(render_highlight(&tokens, "svg", "t").is_err());
    }
}
