//! WHATWG HTML tokenizer for the Wren toolkit.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - All 67 states, including script data escaping and CDATA sections
//!   - Named and numeric character references
//!   - Parse error reporting with input positions
//!   - Content model switching after `<title>`, `<style>`, `<script>` and friends
//!
//! # Not Implemented
//!
//! - Tree construction
//! - Byte stream decoding (input is already a `&str`)
//! - Input stream preprocessing of CR LF pairs

/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use tokenizer::{
    Attribute, Attributes, CharacterStream, ErrorCollector, ParseError, ParseErrorRecord,
    StringCache, Token, Tokenizer, TokenizerConfig, TokenizerState,
};
