//! Character reference decoding for the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! The character reference sub-machine of the standard is run here as one
//! lookahead routine over the input. It is entered just after a `&` has
//! been consumed and either decodes a reference or rewinds to where it
//! started, leaving the caller to treat the `&` as literal text.

use super::core::Tokenizer;
use super::errors::ParseError;
use super::named_character_references::{is_base_named_entity, is_named_entity, lookup_entity};
use super::state::TokenizerState;

const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// Replacements for code points 0x80 to 0x9F. Entries that map to
/// themselves have no Windows-1252 assignment.
const WINDOWS_1252: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// A decoded character reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharacterReference {
    /// `&name;` expanded to its replacement text.
    Named(&'static str),
    /// `&#NNN;` or `&#xHHHH;` after range checks and remapping.
    Numeric(char),
}

impl CharacterReference {
    pub(crate) fn push_onto(self, out: &mut String) {
        match self {
            Self::Named(text) => out.push_str(text),
            Self::Numeric(c) => out.push(c),
        }
    }
}

impl Tokenizer<'_> {
    /// Try to decode a character reference at the cursor, just past `&`.
    ///
    /// `additional_allowed` is a character that means "not a reference"
    /// when it directly follows the `&`: the closing quote of a quoted
    /// attribute value, or `>` for an unquoted one. In attributes a legacy
    /// name followed by an alphanumeric, `=`, `-` or `_` is left alone,
    /// so `href="?a=1&copy=2"` keeps its query string.
    ///
    /// Returns `None` when the `&` should be treated literally; the cursor
    /// is then back where it was on entry.
    pub(super) fn consume_character_reference(
        &mut self,
        additional_allowed: Option<char>,
        in_attribute: bool,
    ) -> Option<CharacterReference> {
        let current = self.reader.current()?;
        if Some(current) == additional_allowed
            || matches!(current, '\t' | '\n' | '\r' | '\x0C' | ' ' | '<' | '&')
        {
            return None;
        }

        self.reader.mark();
        if self.reader.match_consume("#") {
            return self.consume_numeric_reference();
        }

        let name = self.reader.consume_letter_then_digit_sequence();
        let looks_legit = self.reader.matches(';');
        let found = is_base_named_entity(name) || (is_named_entity(name) && looks_legit);

        if !found {
            self.reader.rewind_to_mark();
            if looks_legit {
                self.error(ParseError::UnknownNamedCharacterReference);
            }
            return None;
        }

        if in_attribute
            && (self.reader.matches_letter()
                || self.reader.matches_digit()
                || self.reader.matches_any(&['=', '-', '_']))
        {
            self.reader.rewind_to_mark();
            return None;
        }

        self.reader.unmark();
        if !self.reader.match_consume(";") {
            self.error(ParseError::MissingSemicolonAfterCharacterReference);
        }
        lookup_entity(name).map(CharacterReference::Named)
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    ///
    /// Cursor is just past `&#`, with the mark set before the `#`.
    fn consume_numeric_reference(&mut self) -> Option<CharacterReference> {
        let hex = self.reader.match_consume_ignore_case("x");
        let digits = if hex {
            self.reader.consume_hex_sequence()
        } else {
            self.reader.consume_digit_sequence()
        };

        if digits.is_empty() {
            self.error(ParseError::AbsenceOfDigitsInNumericCharacterReference);
            self.reader.rewind_to_mark();
            return None;
        }

        self.reader.unmark();
        if !self.reader.match_consume(";") {
            self.error(ParseError::MissingSemicolonAfterCharacterReference);
        }

        // Values too large for u32 are certainly outside the Unicode range.
        let code = u32::from_str_radix(digits, if hex { 16 } else { 10 }).ok();
        Some(CharacterReference::Numeric(self.resolve_code_point(code)))
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    fn resolve_code_point(&mut self, code: Option<u32>) -> char {
        match code {
            Some(0) => {
                self.error(ParseError::NullCharacterReference);
                REPLACEMENT_CHARACTER
            }
            None => {
                self.error(ParseError::CharacterReferenceOutsideUnicodeRange);
                REPLACEMENT_CHARACTER
            }
            Some(c) if c > 0x10_FFFF => {
                self.error(ParseError::CharacterReferenceOutsideUnicodeRange);
                REPLACEMENT_CHARACTER
            }
            Some(0xD800..=0xDFFF) => {
                self.error(ParseError::SurrogateCharacterReference);
                REPLACEMENT_CHARACTER
            }
            Some(c @ 0x80..=0x9F) => {
                self.error(ParseError::ControlCharacterReference);
                WINDOWS_1252[(c - 0x80) as usize]
            }
            Some(c) if is_noncharacter(c) => {
                self.error(ParseError::NoncharacterCharacterReference);
                char::from_u32(c).unwrap_or(REPLACEMENT_CHARACTER)
            }
            Some(c @ (0x01..=0x08 | 0x0B | 0x0D..=0x1F | 0x7F)) => {
                self.error(ParseError::ControlCharacterReference);
                char::from_u32(c).unwrap_or(REPLACEMENT_CHARACTER)
            }
            Some(c) => char::from_u32(c).unwrap_or(REPLACEMENT_CHARACTER),
        }
    }

    /// Decode a reference in text content and return to `return_state`.
    /// A failed reference leaves a literal `&`.
    pub(super) fn read_char_ref(&mut self, return_state: TokenizerState) {
        match self.consume_character_reference(None, false) {
            Some(reference) => reference.push_onto(&mut self.char_buffer),
            None => self.emit_char('&'),
        }
        self.transition(return_state);
    }

    /// Decode a reference inside an attribute value. A failed reference
    /// appends a literal `&` to the value.
    pub(super) fn read_attribute_char_ref(&mut self, additional_allowed: char) {
        match self.consume_character_reference(Some(additional_allowed), true) {
            Some(reference) => reference.push_onto(self.tag_pending().attribute_value_mut()),
            None => self.tag_pending().append_attribute_value_char('&'),
        }
    }
}

/// "A noncharacter is a code point that is in the range U+FDD0 to U+FDEF,
/// inclusive, or U+FFFE, U+FFFF, U+1FFFE, U+1FFFF, ... U+10FFFE, U+10FFFF."
const fn is_noncharacter(c: u32) -> bool {
    matches!(c, 0xFDD0..=0xFDEF) || (c & 0xFFFE) == 0xFFFE
}

#[cfg(test)]
mod tests {
    use super::super::token::Token;
    use super::*;

    fn text(input: &str) -> String {
        let mut tokenizer = Tokenizer::new(input);
        match tokenizer.next_token() {
            Token::Character { data } => data,
            other => panic!("expected characters, got {other:?}"),
        }
    }

    #[test]
    fn test_windows_1252_remap() {
        assert_eq!(text("&#128;"), "\u{20AC}");
        assert_eq!(text("&#x9F;"), "\u{0178}");
        assert_eq!(text("&#x81;"), "\u{0081}");
    }

    #[test]
    fn test_invalid_code_points_become_replacement() {
        assert_eq!(text("&#0;"), "\u{FFFD}");
        assert_eq!(text("&#xD800;"), "\u{FFFD}");
        assert_eq!(text("&#x110000;"), "\u{FFFD}");
        assert_eq!(text("&#99999999999999;"), "\u{FFFD}");
    }

    fn first_error(input: &str) -> Option<ParseError> {
        let mut tokenizer = Tokenizer::new(input);
        let _ = tokenizer.next_token();
        tokenizer.errors().iter().next().map(|record| record.kind)
    }

    #[test]
    fn test_control_and_noncharacter_references() {
        assert_eq!(text("&#1;"), "\u{0001}");
        assert_eq!(first_error("&#1;"), Some(ParseError::ControlCharacterReference));
        assert_eq!(first_error("&#x0D;"), Some(ParseError::ControlCharacterReference));
        assert_eq!(first_error("&#x7F;"), Some(ParseError::ControlCharacterReference));
        assert_eq!(first_error("&#x80;"), Some(ParseError::ControlCharacterReference));

        assert_eq!(text("&#xFDD0;"), "\u{FDD0}");
        assert_eq!(first_error("&#xFDD0;"), Some(ParseError::NoncharacterCharacterReference));
        assert_eq!(first_error("&#xFFFF;"), Some(ParseError::NoncharacterCharacterReference));
        assert_eq!(first_error("&#x10FFFE;"), Some(ParseError::NoncharacterCharacterReference));

        assert_eq!(first_error("&#x09;"), None);
        assert_eq!(first_error("&#x0C;"), None);
        assert_eq!(first_error("&#xFFFD;"), None);
        assert_eq!(first_error("&#x1F600;"), None);
    }

    #[test]
    fn test_numeric_without_digits_is_literal() {
        assert_eq!(text("&#;"), "&#;");
        assert_eq!(text("&#xg;"), "&#xg;");
    }

    #[test]
    fn test_legacy_name_without_semicolon() {
        assert_eq!(text("&copy 2024"), "\u{00A9} 2024");
        assert_eq!(text("&hellip"), "&hellip");
        assert_eq!(text("&hellip;"), "\u{2026}");
    }
}
