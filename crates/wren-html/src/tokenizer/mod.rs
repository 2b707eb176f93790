//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Fixed-size cache of short tag and attribute names.
pub mod cache;
/// Character reference decoding per § 13.2.5.72.
mod character_reference;
/// The pull driver and its configuration.
pub mod core;
/// Parse error codes and the bounded collector.
pub mod errors;
/// Helper methods shared by the state handlers.
mod helpers;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// The tokenizer states.
pub mod state;
/// One handler per tokenizer state.
mod states;
/// Cursor over the input text.
pub mod stream;
/// Token types produced by the tokenizer.
pub mod token;

pub use cache::StringCache;
pub use self::core::{Tokenizer, TokenizerConfig};
pub use errors::{ErrorCollector, ParseError, ParseErrorRecord};
pub use state::TokenizerState;
pub use stream::CharacterStream;
pub use token::{Attribute, Attributes, Token};
