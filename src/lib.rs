//! # ouro
//!
//! A lexical tokenizer and syntax highlighter for the Ouroboros scripting
//! language.
//!
//! The core is [`tokenize`]: a pure, single-pass scan that partitions any
//! input into classified [`Token`] spans, degrading to single-character
//! `unknown` tokens instead of failing. Renderers in [`ouro::render`] turn
//! the stream into Prism-compatible HTML or ANSI-styled terminal output.

pub mod ouro;

pub use crate::ouro::render::{render_ansi, render_html, render_html_page, RenderError};
pub use crate::ouro::scanner::tokenize;
pub use crate::ouro::token::{reconstruct, Token, TokenCategory};
