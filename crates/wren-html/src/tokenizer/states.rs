//! State handlers.
//!
//! One `handle_*_state` method per [`TokenizerState`]. Each call looks at
//! the input, consumes at least one character or changes state (or both),
//! and emits at most one non-character token.

use super::core::Tokenizer;
use super::errors::ParseError;
use super::helpers::is_whitespace;
use super::state::TokenizerState;
use super::token::Token;

const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Characters that end an attribute name run.
const ATTRIBUTE_NAME_TERMINATORS: &[char] = &[
    '\t', '\n', '\r', '\x0C', ' ', '"', '\'', '/', '<', '=', '>', '\0',
];

/// Characters that end an unquoted attribute value run.
const ATTRIBUTE_VALUE_UNQUOTED_TERMINATORS: &[char] = &[
    '\t', '\n', '\r', '\x0C', ' ', '&', '>', '\0', '"', '\'', '<', '=', '`',
];

/// Characters that end a DOCTYPE name run.
const DOCTYPE_NAME_TERMINATORS: &[char] = &['\t', '\n', '\r', '\x0C', ' ', '>', '\0'];

// =============================================================================
// Text States
// =============================================================================

impl Tokenizer<'_> {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    pub(super) fn handle_data_state(&mut self) {
        match self.reader.current() {
            // "U+0026 AMPERSAND (&): Set the return state to the data state.
            // Switch to the character reference state."
            Some('&') => self.advance_transition(TokenizerState::CharacterReferenceInData),
            // "U+003C LESS-THAN SIGN (<): Switch to the tag open state."
            Some('<') => self.advance_transition(TokenizerState::TagOpen),
            // "U+0000 NULL: This is an unexpected-null-character parse error.
            // Emit the current input character as a character token."
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.reader.advance();
                self.emit_char('\0');
            }
            // "EOF: Emit an end-of-file token."
            None => self.emit(Token::EndOfFile),
            Some(_) => {
                let data = self.reader.consume_data();
                self.emit_str(data);
            }
        }
    }

    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    pub(super) fn handle_rcdata_state(&mut self) {
        match self.reader.current() {
            Some('&') => self.advance_transition(TokenizerState::CharacterReferenceInRcdata),
            Some('<') => self.advance_transition(TokenizerState::RcdataLessThanSign),
            // "Emit a U+FFFD REPLACEMENT CHARACTER character token."
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.reader.advance();
                self.emit_char(REPLACEMENT_CHARACTER);
            }
            None => self.emit(Token::EndOfFile),
            Some(_) => {
                let data = self.reader.consume_data();
                self.emit_str(data);
            }
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    pub(super) fn handle_rawtext_state(&mut self) {
        self.read_raw_data(TokenizerState::RawtextLessThanSign);
    }

    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    pub(super) fn handle_script_data_state(&mut self) {
        self.read_raw_data(TokenizerState::ScriptDataLessThanSign);
    }

    /// Shared body of the RAWTEXT and script data states: only `<` is special.
    fn read_raw_data(&mut self, less_than_state: TokenizerState) {
        match self.reader.current() {
            Some('<') => self.advance_transition(less_than_state),
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.reader.advance();
                self.emit_char(REPLACEMENT_CHARACTER);
            }
            None => self.emit(Token::EndOfFile),
            Some(_) => {
                let data = self.reader.consume_raw_data();
                self.emit_str(data);
            }
        }
    }

    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    pub(super) fn handle_plaintext_state(&mut self) {
        match self.reader.current() {
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.reader.advance();
                self.emit_char(REPLACEMENT_CHARACTER);
            }
            None => self.emit(Token::EndOfFile),
            Some(_) => {
                let data = self.reader.consume_to('\0');
                self.emit_str(data);
            }
        }
    }
}

// =============================================================================
// Tag States
// =============================================================================

impl Tokenizer<'_> {
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    pub(super) fn handle_tag_open_state(&mut self) {
        match self.reader.current() {
            // "U+0021 EXCLAMATION MARK (!): Switch to the markup declaration open state."
            Some('!') => self.advance_transition(TokenizerState::MarkupDeclarationOpen),
            // "U+002F SOLIDUS (/): Switch to the end tag open state."
            Some('/') => self.advance_transition(TokenizerState::EndTagOpen),
            // "U+003F QUESTION MARK (?): This is an
            // unexpected-question-mark-instead-of-tag-name parse error. Create a
            // comment token whose data is the empty string. Reconsume in the
            // bogus comment state."
            Some('?') => {
                self.error(ParseError::UnexpectedQuestionMarkInsteadOfTagName);
                self.create_comment_pending(true);
                self.transition(TokenizerState::BogusComment);
            }
            // "ASCII alpha: Create a new start tag token, set its tag name to the
            // empty string. Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.create_tag_pending(true);
                self.transition(TokenizerState::TagName);
            }
            // "EOF: This is an eof-before-tag-name parse error. Emit a U+003C
            // LESS-THAN SIGN character token and an end-of-file token."
            None => {
                self.eof_error(ParseError::EofBeforeTagName);
                self.emit_char('<');
                self.transition(TokenizerState::Data);
            }
            // "Anything else: This is an invalid-first-character-of-tag-name parse
            // error. Emit a U+003C LESS-THAN SIGN character token. Reconsume in
            // the data state."
            Some(_) => {
                self.error(ParseError::InvalidFirstCharacterOfTagName);
                self.emit_char('<');
                self.transition(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    pub(super) fn handle_end_tag_open_state(&mut self) {
        match self.reader.current() {
            None => {
                self.eof_error(ParseError::EofBeforeTagName);
                self.emit_str("</");
                self.transition(TokenizerState::Data);
            }
            Some(c) if c.is_ascii_alphabetic() => {
                self.create_tag_pending(false);
                self.transition(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>): This is a missing-end-tag-name parse
            // error. Switch to the data state."
            Some('>') => {
                self.error(ParseError::MissingEndTagName);
                self.advance_transition(TokenizerState::Data);
            }
            Some(_) => {
                self.error(ParseError::InvalidFirstCharacterOfTagName);
                self.create_comment_pending(true);
                self.transition(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    pub(super) fn handle_tag_name_state(&mut self) {
        let name = self.reader.consume_tag_name();
        self.tag_pending().append_tag_name(name);

        match self.reader.consume() {
            Some(c) if is_whitespace(c) => self.transition(TokenizerState::BeforeAttributeName),
            Some('/') => self.transition(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.emit_tag_pending();
                self.transition(TokenizerState::Data);
            }
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.tag_pending().append_tag_name_char(REPLACEMENT_CHARACTER);
            }
            // "EOF: This is an eof-in-tag parse error. Emit an end-of-file token."
            None => {
                self.eof_error(ParseError::EofInTag);
                self.transition(TokenizerState::Data);
            }
            Some(c) => self.tag_pending().append_tag_name_char(c),
        }
    }

    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    ///
    /// When a start tag follows and the matching end tag for the element
    /// does not appear anywhere ahead, the element is closed here with a
    /// synthetic end tag instead of swallowing the rest of the document.
    pub(super) fn handle_rcdata_less_than_sign_state(&mut self) {
        if self.reader.matches('/') {
            self.data_buffer.clear();
            self.advance_transition(TokenizerState::RcdataEndTagOpen);
        } else if self.reader.matches_letter() && self.end_tag_missing_ahead() {
            self.emit_synthetic_end_tag();
            self.transition(TokenizerState::TagOpen);
        } else {
            self.emit_char('<');
            self.transition(TokenizerState::Rcdata);
        }
    }

    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    pub(super) fn handle_rawtext_less_than_sign_state(&mut self) {
        if self.reader.matches('/') {
            self.data_buffer.clear();
            self.advance_transition(TokenizerState::RawtextEndTagOpen);
        } else {
            self.emit_char('<');
            self.transition(TokenizerState::Rawtext);
        }
    }

    /// Shared end tag open state for RCDATA, RAWTEXT and the script data
    /// states: an ASCII letter starts an end tag, anything else is text.
    pub(super) fn handle_end_tag_open_in_text(
        &mut self,
        name_state: TokenizerState,
        fallback: TokenizerState,
    ) {
        if self.reader.matches_letter() {
            self.create_tag_pending(false);
            self.transition(name_state);
        } else {
            self.emit_str("</");
            self.transition(fallback);
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// Shared by the RAWTEXT, script data and script data escaped end tag
    /// name states. Only an appropriate end tag leaves the text; anything
    /// else is emitted as `</` plus the letters read so far.
    pub(super) fn handle_data_end_tag(&mut self, fallback: TokenizerState) {
        if self.reader.matches_letter() {
            let name = self.reader.consume_letter_sequence();
            self.tag_pending().append_tag_name(name);
            self.data_buffer.push_str(name);
            return;
        }

        if self.is_appropriate_end_tag_token() {
            match self.reader.current() {
                Some(c) if is_whitespace(c) => {
                    self.advance_transition(TokenizerState::BeforeAttributeName);
                    return;
                }
                Some('/') => {
                    self.advance_transition(TokenizerState::SelfClosingStartTag);
                    return;
                }
                Some('>') => {
                    self.emit_tag_pending();
                    self.advance_transition(TokenizerState::Data);
                    return;
                }
                _ => {}
            }
        }

        self.emit_str("</");
        let buffered = std::mem::take(&mut self.data_buffer);
        self.emit_str(&buffered);
        self.transition(fallback);
    }

    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    pub(super) fn handle_script_data_less_than_sign_state(&mut self) {
        match self.reader.current() {
            Some('/') => {
                self.data_buffer.clear();
                self.advance_transition(TokenizerState::ScriptDataEndTagOpen);
            }
            Some('!') => {
                self.emit_str("<!");
                self.advance_transition(TokenizerState::ScriptDataEscapeStart);
            }
            _ => {
                self.emit_char('<');
                self.transition(TokenizerState::ScriptData);
            }
        }
    }
}

// =============================================================================
// Script Data Escape States
// =============================================================================

impl Tokenizer<'_> {
    /// [§ 13.2.5.18 Script data escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-state)
    pub(super) fn handle_script_data_escape_start_state(&mut self) {
        if self.reader.matches('-') {
            self.emit_char('-');
            self.advance_transition(TokenizerState::ScriptDataEscapeStartDash);
        } else {
            self.transition(TokenizerState::ScriptData);
        }
    }

    /// [§ 13.2.5.19 Script data escape start dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-dash-state)
    pub(super) fn handle_script_data_escape_start_dash_state(&mut self) {
        if self.reader.matches('-') {
            self.emit_char('-');
            self.advance_transition(TokenizerState::ScriptDataEscapedDashDash);
        } else {
            self.transition(TokenizerState::ScriptData);
        }
    }

    /// [§ 13.2.5.20 Script data escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-state)
    pub(super) fn handle_script_data_escaped_state(&mut self) {
        match self.reader.current() {
            None => {
                self.eof_error(ParseError::EofInScriptHtmlCommentLikeText);
                self.transition(TokenizerState::Data);
            }
            Some('-') => {
                self.emit_char('-');
                self.advance_transition(TokenizerState::ScriptDataEscapedDash);
            }
            Some('<') => self.advance_transition(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.reader.advance();
                self.emit_char(REPLACEMENT_CHARACTER);
            }
            Some(_) => {
                let data = self.reader.consume_to_any(&['-', '<', '\0']);
                self.emit_str(data);
            }
        }
    }

    /// [§ 13.2.5.21 Script data escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-state)
    pub(super) fn handle_script_data_escaped_dash_state(&mut self) {
        match self.reader.consume() {
            None => {
                self.eof_error(ParseError::EofInScriptHtmlCommentLikeText);
                self.transition(TokenizerState::Data);
            }
            Some('-') => {
                self.emit_char('-');
                self.transition(TokenizerState::ScriptDataEscapedDashDash);
            }
            Some('<') => self.transition(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.emit_char(REPLACEMENT_CHARACTER);
                self.transition(TokenizerState::ScriptDataEscaped);
            }
            Some(c) => {
                self.emit_char(c);
                self.transition(TokenizerState::ScriptDataEscaped);
            }
        }
    }

    /// [§ 13.2.5.22 Script data escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-dash-state)
    pub(super) fn handle_script_data_escaped_dash_dash_state(&mut self) {
        match self.reader.consume() {
            None => {
                self.eof_error(ParseError::EofInScriptHtmlCommentLikeText);
                self.transition(TokenizerState::Data);
            }
            Some('-') => self.emit_char('-'),
            Some('<') => self.transition(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('>') => {
                self.emit_char('>');
                self.transition(TokenizerState::ScriptData);
            }
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.emit_char(REPLACEMENT_CHARACTER);
                self.transition(TokenizerState::ScriptDataEscaped);
            }
            Some(c) => {
                self.emit_char(c);
                self.transition(TokenizerState::ScriptDataEscaped);
            }
        }
    }

    /// [§ 13.2.5.23 Script data escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-less-than-sign-state)
    pub(super) fn handle_script_data_escaped_less_than_sign_state(&mut self) {
        match self.reader.current() {
            Some('/') => {
                self.data_buffer.clear();
                self.advance_transition(TokenizerState::ScriptDataEscapedEndTagOpen);
            }
            // "ASCII alpha: Set the temporary buffer to the empty string. Emit a
            // U+003C LESS-THAN SIGN character token. Reconsume in the script data
            // double escape start state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.data_buffer.clear();
                self.emit_char('<');
                self.transition(TokenizerState::ScriptDataDoubleEscapeStart);
            }
            _ => {
                self.emit_char('<');
                self.transition(TokenizerState::ScriptDataEscaped);
            }
        }
    }

    /// [§ 13.2.5.26 Script data double escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-start-state)
    ///
    /// Also serves the double escape end state with the two targets swapped:
    /// a word equal to `script` moves to `primary`, anything else to `fallback`.
    pub(super) fn handle_data_double_escape_tag(
        &mut self,
        primary: TokenizerState,
        fallback: TokenizerState,
    ) {
        if self.reader.matches_letter() {
            let name = self.reader.consume_letter_sequence();
            self.data_buffer.push_str(&name.to_ascii_lowercase());
            self.emit_str(name);
            return;
        }

        match self.reader.current() {
            Some(c) if is_whitespace(c) || c == '/' || c == '>' => {
                let next = if self.data_buffer == "script" {
                    primary
                } else {
                    fallback
                };
                self.emit_char(c);
                self.advance_transition(next);
            }
            _ => self.transition(fallback),
        }
    }

    /// [§ 13.2.5.27 Script data double escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-state)
    pub(super) fn handle_script_data_double_escaped_state(&mut self) {
        match self.reader.current() {
            None => {
                self.eof_error(ParseError::EofInScriptHtmlCommentLikeText);
                self.transition(TokenizerState::Data);
            }
            Some('-') => {
                self.emit_char('-');
                self.advance_transition(TokenizerState::ScriptDataDoubleEscapedDash);
            }
            Some('<') => {
                self.emit_char('<');
                self.advance_transition(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
            }
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.reader.advance();
                self.emit_char(REPLACEMENT_CHARACTER);
            }
            Some(_) => {
                let data = self.reader.consume_to_any(&['-', '<', '\0']);
                self.emit_str(data);
            }
        }
    }

    /// [§ 13.2.5.28 Script data double escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-state)
    pub(super) fn handle_script_data_double_escaped_dash_state(&mut self) {
        match self.reader.consume() {
            None => {
                self.eof_error(ParseError::EofInScriptHtmlCommentLikeText);
                self.transition(TokenizerState::Data);
            }
            Some('-') => {
                self.emit_char('-');
                self.transition(TokenizerState::ScriptDataDoubleEscapedDashDash);
            }
            Some('<') => {
                self.emit_char('<');
                self.transition(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
            }
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.emit_char(REPLACEMENT_CHARACTER);
                self.transition(TokenizerState::ScriptDataDoubleEscaped);
            }
            Some(c) => {
                self.emit_char(c);
                self.transition(TokenizerState::ScriptDataDoubleEscaped);
            }
        }
    }

    /// [§ 13.2.5.29 Script data double escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-dash-state)
    pub(super) fn handle_script_data_double_escaped_dash_dash_state(&mut self) {
        match self.reader.consume() {
            None => {
                self.eof_error(ParseError::EofInScriptHtmlCommentLikeText);
                self.transition(TokenizerState::Data);
            }
            Some('-') => self.emit_char('-'),
            Some('<') => {
                self.emit_char('<');
                self.transition(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
            }
            Some('>') => {
                self.emit_char('>');
                self.transition(TokenizerState::ScriptData);
            }
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.emit_char(REPLACEMENT_CHARACTER);
                self.transition(TokenizerState::ScriptDataDoubleEscaped);
            }
            Some(c) => {
                self.emit_char(c);
                self.transition(TokenizerState::ScriptDataDoubleEscaped);
            }
        }
    }

    /// [§ 13.2.5.30 Script data double escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-less-than-sign-state)
    pub(super) fn handle_script_data_double_escaped_less_than_sign_state(&mut self) {
        if self.reader.matches('/') {
            self.emit_char('/');
            self.data_buffer.clear();
            self.advance_transition(TokenizerState::ScriptDataDoubleEscapeEnd);
        } else {
            self.transition(TokenizerState::ScriptDataDoubleEscaped);
        }
    }
}

// =============================================================================
// Attribute States
// =============================================================================

impl Tokenizer<'_> {
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    pub(super) fn handle_before_attribute_name_state(&mut self) {
        match self.reader.consume() {
            Some(c) if is_whitespace(c) => {}
            Some('/') => self.transition(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.emit_tag_pending();
                self.transition(TokenizerState::Data);
            }
            None => {
                self.eof_error(ParseError::EofInTag);
                self.transition(TokenizerState::Data);
            }
            // "U+003D EQUALS SIGN (=): This is an
            // unexpected-equals-sign-before-attribute-name parse error. Start a new
            // attribute in the current tag token. Set that attribute's name to the
            // current input character."
            Some('=') => {
                self.error(ParseError::UnexpectedEqualsSignBeforeAttributeName);
                self.new_attribute();
                self.tag_pending().append_attribute_name_char('=');
                self.transition(TokenizerState::AttributeName);
            }
            Some(_) => {
                self.reader.unconsume();
                self.new_attribute();
                self.transition(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    pub(super) fn handle_attribute_name_state(&mut self) {
        let name = self.reader.consume_to_any(ATTRIBUTE_NAME_TERMINATORS);
        self.tag_pending().append_attribute_name(name);

        match self.reader.consume() {
            Some(c) if is_whitespace(c) => self.transition(TokenizerState::AfterAttributeName),
            Some('/') => self.transition(TokenizerState::SelfClosingStartTag),
            Some('=') => {
                self.tag_pending().set_empty_attribute_value();
                self.transition(TokenizerState::BeforeAttributeValue);
            }
            Some('>') => {
                self.emit_tag_pending();
                self.transition(TokenizerState::Data);
            }
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.tag_pending()
                    .append_attribute_name_char(REPLACEMENT_CHARACTER);
            }
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C
            // LESS-THAN SIGN (<): This is an unexpected-character-in-attribute-name
            // parse error. Treat it as per the "anything else" entry below."
            Some(c @ ('"' | '\'' | '<')) => {
                self.error(ParseError::UnexpectedCharacterInAttributeName);
                self.tag_pending().append_attribute_name_char(c);
            }
            None => {
                self.eof_error(ParseError::EofInTag);
                self.transition(TokenizerState::Data);
            }
            Some(c) => self.tag_pending().append_attribute_name_char(c),
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    pub(super) fn handle_after_attribute_name_state(&mut self) {
        match self.reader.consume() {
            Some(c) if is_whitespace(c) => {}
            Some('/') => self.transition(TokenizerState::SelfClosingStartTag),
            Some('=') => {
                self.tag_pending().set_empty_attribute_value();
                self.transition(TokenizerState::BeforeAttributeValue);
            }
            Some('>') => {
                self.emit_tag_pending();
                self.transition(TokenizerState::Data);
            }
            None => {
                self.eof_error(ParseError::EofInTag);
                self.transition(TokenizerState::Data);
            }
            Some(_) => {
                self.reader.unconsume();
                self.new_attribute();
                self.transition(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    pub(super) fn handle_before_attribute_value_state(&mut self) {
        match self.reader.consume() {
            Some(c) if is_whitespace(c) => {}
            Some('"') => self.transition(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.transition(TokenizerState::AttributeValueSingleQuoted),
            // "U+003E GREATER-THAN SIGN (>): This is a missing-attribute-value parse
            // error. Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.error(ParseError::MissingAttributeValue);
                self.emit_tag_pending();
                self.transition(TokenizerState::Data);
            }
            None => {
                self.eof_error(ParseError::EofInTag);
                self.transition(TokenizerState::Data);
            }
            Some(_) => {
                self.reader.unconsume();
                self.transition(TokenizerState::AttributeValueUnquoted);
            }
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    ///
    /// Also the single-quoted state, with `quote` set to `'`.
    pub(super) fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        let value = self.reader.consume_to_any(&[quote, '&', '\0']);
        if !value.is_empty() {
            self.tag_pending().append_attribute_value(value);
        }

        match self.reader.consume() {
            Some(c) if c == quote => self.transition(TokenizerState::AfterAttributeValueQuoted),
            Some('&') => self.read_attribute_char_ref(quote),
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.tag_pending()
                    .append_attribute_value_char(REPLACEMENT_CHARACTER);
            }
            None => {
                self.eof_error(ParseError::EofInTag);
                self.transition(TokenizerState::Data);
            }
            Some(c) => self.tag_pending().append_attribute_value_char(c),
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    pub(super) fn handle_attribute_value_unquoted_state(&mut self) {
        let value = self
            .reader
            .consume_to_any(ATTRIBUTE_VALUE_UNQUOTED_TERMINATORS);
        if !value.is_empty() {
            self.tag_pending().append_attribute_value(value);
        }

        match self.reader.consume() {
            Some(c) if is_whitespace(c) => self.transition(TokenizerState::BeforeAttributeName),
            Some('&') => self.read_attribute_char_ref('>'),
            Some('>') => {
                self.emit_tag_pending();
                self.transition(TokenizerState::Data);
            }
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.tag_pending()
                    .append_attribute_value_char(REPLACEMENT_CHARACTER);
            }
            Some(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                self.error(ParseError::UnexpectedCharacterInUnquotedAttributeValue);
                self.tag_pending().append_attribute_value_char(c);
            }
            None => {
                self.eof_error(ParseError::EofInTag);
                self.transition(TokenizerState::Data);
            }
            Some(c) => self.tag_pending().append_attribute_value_char(c),
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    pub(super) fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.reader.consume() {
            Some(c) if is_whitespace(c) => self.transition(TokenizerState::BeforeAttributeName),
            Some('/') => self.transition(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.emit_tag_pending();
                self.transition(TokenizerState::Data);
            }
            None => {
                self.eof_error(ParseError::EofInTag);
                self.transition(TokenizerState::Data);
            }
            Some(_) => {
                self.reader.unconsume();
                self.error(ParseError::MissingWhitespaceBetweenAttributes);
                self.transition(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    pub(super) fn handle_self_closing_start_tag_state(&mut self) {
        match self.reader.consume() {
            Some('>') => {
                self.tag_pending().set_self_closing();
                self.emit_tag_pending();
                self.transition(TokenizerState::Data);
            }
            None => {
                self.eof_error(ParseError::EofInTag);
                self.transition(TokenizerState::Data);
            }
            Some(_) => {
                self.reader.unconsume();
                self.error(ParseError::UnexpectedSolidusInTag);
                self.transition(TokenizerState::BeforeAttributeName);
            }
        }
    }
}

// =============================================================================
// Comment States
// =============================================================================

impl Tokenizer<'_> {
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(super) fn handle_bogus_comment_state(&mut self) {
        let data = self.reader.consume_to_any(&['>', '\0']);
        self.comment.push_str(data);

        match self.reader.consume() {
            Some('>') | None => {
                self.emit_comment_pending();
                self.transition(TokenizerState::Data);
            }
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.comment.push(REPLACEMENT_CHARACTER);
            }
            Some(c) => self.comment.push(c),
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    pub(super) fn handle_markup_declaration_open_state(&mut self) {
        // "Two U+002D HYPHEN-MINUS characters (-): Consume those two characters,
        // create a comment token whose data is the empty string, and switch to
        // the comment start state."
        if self.reader.match_consume("--") {
            self.create_comment_pending(false);
            self.transition(TokenizerState::CommentStart);
        // "ASCII case-insensitive match for the word "DOCTYPE": Consume those
        // characters and switch to the DOCTYPE state."
        } else if self.reader.match_consume_ignore_case("DOCTYPE") {
            self.create_doctype_pending();
            self.transition(TokenizerState::Doctype);
        } else if self.reader.match_consume("[CDATA[") {
            self.data_buffer.clear();
            self.transition(TokenizerState::CdataSection);
        } else {
            self.error(ParseError::IncorrectlyOpenedComment);
            self.create_comment_pending(true);
            self.transition(TokenizerState::BogusComment);
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn handle_comment_start_state(&mut self) {
        match self.reader.consume() {
            Some('-') => self.transition(TokenizerState::CommentStartDash),
            Some('>') => {
                self.error(ParseError::AbruptClosingOfEmptyComment);
                self.emit_comment_pending();
                self.transition(TokenizerState::Data);
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.reader.unconsume();
                self.transition(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn handle_comment_start_dash_state(&mut self) {
        match self.reader.consume() {
            Some('-') => self.transition(TokenizerState::CommentEnd),
            Some('>') => {
                self.error(ParseError::AbruptClosingOfEmptyComment);
                self.emit_comment_pending();
                self.transition(TokenizerState::Data);
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.reader.unconsume();
                self.comment.push('-');
                self.transition(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn handle_comment_state(&mut self) {
        match self.reader.current() {
            Some('-') => self.advance_transition(TokenizerState::CommentEndDash),
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.reader.advance();
                self.comment.push(REPLACEMENT_CHARACTER);
            }
            None => self.eof_in_comment(),
            Some(_) => {
                let data = self.reader.consume_to_any(&['-', '\0']);
                self.comment.push_str(data);
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn handle_comment_end_dash_state(&mut self) {
        match self.reader.consume() {
            Some('-') => self.transition(TokenizerState::CommentEnd),
            None => self.eof_in_comment(),
            Some(_) => {
                self.reader.unconsume();
                self.comment.push('-');
                self.transition(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn handle_comment_end_state(&mut self) {
        match self.reader.consume() {
            Some('>') => {
                self.emit_comment_pending();
                self.transition(TokenizerState::Data);
            }
            Some('!') => self.transition(TokenizerState::CommentEndBang),
            // "U+002D HYPHEN-MINUS (-): Append a U+002D HYPHEN-MINUS character (-)
            // to the comment token's data."
            Some('-') => self.comment.push('-'),
            None => self.eof_in_comment(),
            Some(_) => {
                self.reader.unconsume();
                self.comment.push_str("--");
                self.transition(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    pub(super) fn handle_comment_end_bang_state(&mut self) {
        match self.reader.consume() {
            Some('-') => {
                self.comment.push_str("--!");
                self.transition(TokenizerState::CommentEndDash);
            }
            Some('>') => {
                self.error(ParseError::IncorrectlyClosedComment);
                self.emit_comment_pending();
                self.transition(TokenizerState::Data);
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.reader.unconsume();
                self.comment.push_str("--!");
                self.transition(TokenizerState::Comment);
            }
        }
    }

    /// "EOF: This is an eof-in-comment parse error. Emit the current comment
    /// token. Emit an end-of-file token."
    fn eof_in_comment(&mut self) {
        self.eof_error(ParseError::EofInComment);
        self.emit_comment_pending();
        self.transition(TokenizerState::Data);
    }
}

// =============================================================================
// DOCTYPE States
// =============================================================================

impl Tokenizer<'_> {
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.reader.consume() {
            Some(c) if is_whitespace(c) => self.transition(TokenizerState::BeforeDoctypeName),
            None => self.eof_in_doctype(),
            // "U+003E GREATER-THAN SIGN (>): Reconsume in the before DOCTYPE name state."
            Some('>') => {
                self.reader.unconsume();
                self.transition(TokenizerState::BeforeDoctypeName);
            }
            Some(_) => {
                self.reader.unconsume();
                self.error(ParseError::MissingWhitespaceBeforeDoctypeName);
                self.transition(TokenizerState::BeforeDoctypeName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.reader.consume() {
            Some(c) if is_whitespace(c) => {}
            Some('>') => {
                self.error(ParseError::MissingDoctypeName);
                self.doctype.set_force_quirks();
                self.emit_doctype_pending();
                self.transition(TokenizerState::Data);
            }
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.doctype.append_name_char(REPLACEMENT_CHARACTER);
                self.transition(TokenizerState::DoctypeName);
            }
            None => self.eof_in_doctype(),
            Some(c) => {
                self.doctype.append_name_char(c);
                self.transition(TokenizerState::DoctypeName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        let name = self.reader.consume_to_any(DOCTYPE_NAME_TERMINATORS);
        self.doctype.append_name(name);

        match self.reader.consume() {
            Some('>') => {
                self.emit_doctype_pending();
                self.transition(TokenizerState::Data);
            }
            Some(c) if is_whitespace(c) => self.transition(TokenizerState::AfterDoctypeName),
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.doctype.append_name_char(REPLACEMENT_CHARACTER);
            }
            None => self.eof_in_doctype(),
            Some(c) => self.doctype.append_name_char(c),
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.reader.current() {
            None => self.eof_in_doctype(),
            Some(c) if is_whitespace(c) => self.reader.advance(),
            Some('>') => {
                self.emit_doctype_pending();
                self.advance_transition(TokenizerState::Data);
            }
            // "If the six characters starting from the current input character are
            // an ASCII case-insensitive match for the word "PUBLIC", then consume
            // those characters and switch to the after DOCTYPE public keyword state."
            Some(_) if self.reader.match_consume_ignore_case("PUBLIC") => {
                self.transition(TokenizerState::AfterDoctypePublicKeyword);
            }
            Some(_) if self.reader.match_consume_ignore_case("SYSTEM") => {
                self.transition(TokenizerState::AfterDoctypeSystemKeyword);
            }
            Some(_) => {
                self.error(ParseError::InvalidCharacterSequenceAfterDoctypeName);
                self.doctype.set_force_quirks();
                self.transition(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    pub(super) fn handle_after_doctype_public_keyword_state(&mut self) {
        match self.reader.consume() {
            Some(c) if is_whitespace(c) => {
                self.transition(TokenizerState::BeforeDoctypePublicIdentifier);
            }
            Some('"') => {
                self.error(ParseError::MissingWhitespaceAfterDoctypePublicKeyword);
                self.doctype.start_public_identifier();
                self.transition(TokenizerState::DoctypePublicIdentifierDoubleQuoted);
            }
            Some('\'') => {
                self.error(ParseError::MissingWhitespaceAfterDoctypePublicKeyword);
                self.doctype.start_public_identifier();
                self.transition(TokenizerState::DoctypePublicIdentifierSingleQuoted);
            }
            Some('>') => self.missing_doctype_identifier(ParseError::MissingDoctypePublicIdentifier),
            None => self.eof_in_doctype(),
            Some(_) => {
                self.reader.unconsume();
                self.error(ParseError::MissingQuoteBeforeDoctypePublicIdentifier);
                self.doctype.set_force_quirks();
                self.transition(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    pub(super) fn handle_before_doctype_public_identifier_state(&mut self) {
        match self.reader.consume() {
            Some(c) if is_whitespace(c) => {}
            Some('"') => {
                self.doctype.start_public_identifier();
                self.transition(TokenizerState::DoctypePublicIdentifierDoubleQuoted);
            }
            Some('\'') => {
                self.doctype.start_public_identifier();
                self.transition(TokenizerState::DoctypePublicIdentifierSingleQuoted);
            }
            Some('>') => self.missing_doctype_identifier(ParseError::MissingDoctypePublicIdentifier),
            None => self.eof_in_doctype(),
            Some(_) => {
                self.reader.unconsume();
                self.error(ParseError::MissingQuoteBeforeDoctypePublicIdentifier);
                self.doctype.set_force_quirks();
                self.transition(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    ///
    /// Also the single-quoted state, with `quote` set to `'`.
    pub(super) fn handle_doctype_public_identifier_quoted_state(&mut self, quote: char) {
        let id = self.reader.consume_to_any(&[quote, '>', '\0']);
        self.doctype.append_public_identifier(id);

        match self.reader.consume() {
            Some(c) if c == quote => self.transition(TokenizerState::AfterDoctypePublicIdentifier),
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.doctype
                    .append_public_identifier(&REPLACEMENT_CHARACTER.to_string());
            }
            Some('>') => self.missing_doctype_identifier(ParseError::AbruptDoctypePublicIdentifier),
            None => self.eof_in_doctype(),
            Some(c) => self.doctype.append_public_identifier(&c.to_string()),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.reader.consume() {
            Some(c) if is_whitespace(c) => {
                self.transition(TokenizerState::BetweenDoctypePublicAndSystemIdentifiers);
            }
            Some('>') => {
                self.emit_doctype_pending();
                self.transition(TokenizerState::Data);
            }
            Some('"') => {
                self.error(ParseError::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers);
                self.doctype.start_system_identifier();
                self.transition(TokenizerState::DoctypeSystemIdentifierDoubleQuoted);
            }
            Some('\'') => {
                self.error(ParseError::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers);
                self.doctype.start_system_identifier();
                self.transition(TokenizerState::DoctypeSystemIdentifierSingleQuoted);
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                self.reader.unconsume();
                self.error(ParseError::MissingQuoteBeforeDoctypeSystemIdentifier);
                self.doctype.set_force_quirks();
                self.transition(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state(&mut self) {
        match self.reader.consume() {
            Some(c) if is_whitespace(c) => {}
            Some('>') => {
                self.emit_doctype_pending();
                self.transition(TokenizerState::Data);
            }
            Some('"') => {
                self.doctype.start_system_identifier();
                self.transition(TokenizerState::DoctypeSystemIdentifierDoubleQuoted);
            }
            Some('\'') => {
                self.doctype.start_system_identifier();
                self.transition(TokenizerState::DoctypeSystemIdentifierSingleQuoted);
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                self.reader.unconsume();
                self.error(ParseError::MissingQuoteBeforeDoctypeSystemIdentifier);
                self.doctype.set_force_quirks();
                self.transition(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_system_keyword_state(&mut self) {
        match self.reader.consume() {
            Some(c) if is_whitespace(c) => {
                self.transition(TokenizerState::BeforeDoctypeSystemIdentifier);
            }
            Some('"') => {
                self.error(ParseError::MissingWhitespaceAfterDoctypeSystemKeyword);
                self.doctype.start_system_identifier();
                self.transition(TokenizerState::DoctypeSystemIdentifierDoubleQuoted);
            }
            Some('\'') => {
                self.error(ParseError::MissingWhitespaceAfterDoctypeSystemKeyword);
                self.doctype.start_system_identifier();
                self.transition(TokenizerState::DoctypeSystemIdentifierSingleQuoted);
            }
            Some('>') => self.missing_doctype_identifier(ParseError::MissingDoctypeSystemIdentifier),
            None => self.eof_in_doctype(),
            Some(_) => {
                self.reader.unconsume();
                self.error(ParseError::MissingQuoteBeforeDoctypeSystemIdentifier);
                self.doctype.set_force_quirks();
                self.transition(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_system_identifier_state(&mut self) {
        match self.reader.consume() {
            Some(c) if is_whitespace(c) => {}
            Some('"') => {
                self.doctype.start_system_identifier();
                self.transition(TokenizerState::DoctypeSystemIdentifierDoubleQuoted);
            }
            Some('\'') => {
                self.doctype.start_system_identifier();
                self.transition(TokenizerState::DoctypeSystemIdentifierSingleQuoted);
            }
            Some('>') => self.missing_doctype_identifier(ParseError::MissingDoctypeSystemIdentifier),
            None => self.eof_in_doctype(),
            Some(_) => {
                self.reader.unconsume();
                self.error(ParseError::MissingQuoteBeforeDoctypeSystemIdentifier);
                self.doctype.set_force_quirks();
                self.transition(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    ///
    /// Also the single-quoted state, with `quote` set to `'`.
    pub(super) fn handle_doctype_system_identifier_quoted_state(&mut self, quote: char) {
        let id = self.reader.consume_to_any(&[quote, '>', '\0']);
        self.doctype.append_system_identifier(id);

        match self.reader.consume() {
            Some(c) if c == quote => self.transition(TokenizerState::AfterDoctypeSystemIdentifier),
            Some('\0') => {
                self.error(ParseError::UnexpectedNullCharacter);
                self.doctype
                    .append_system_identifier(&REPLACEMENT_CHARACTER.to_string());
            }
            Some('>') => self.missing_doctype_identifier(ParseError::AbruptDoctypeSystemIdentifier),
            None => self.eof_in_doctype(),
            Some(c) => self.doctype.append_system_identifier(&c.to_string()),
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.reader.consume() {
            Some(c) if is_whitespace(c) => {}
            Some('>') => {
                self.emit_doctype_pending();
                self.transition(TokenizerState::Data);
            }
            None => self.eof_in_doctype(),
            // "This is an unexpected-character-after-doctype-system-identifier parse
            // error. Reconsume in the bogus DOCTYPE state. (This does not set the
            // current DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.reader.unconsume();
                self.error(ParseError::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.transition(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        let _ = self.reader.consume_to_any(&['>', '\0']);

        match self.reader.consume() {
            Some('>') | None => {
                self.emit_doctype_pending();
                self.transition(TokenizerState::Data);
            }
            Some('\0') => self.error(ParseError::UnexpectedNullCharacter),
            Some(_) => {}
        }
    }

    /// `>` where an identifier was expected: report `kind`, set force-quirks
    /// and emit the DOCTYPE.
    fn missing_doctype_identifier(&mut self, kind: ParseError) {
        self.error(kind);
        self.doctype.set_force_quirks();
        self.emit_doctype_pending();
        self.transition(TokenizerState::Data);
    }
}

// =============================================================================
// CDATA
// =============================================================================

impl Tokenizer<'_> {
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    ///
    /// Everything up to `]]>` is taken verbatim.
    pub(super) fn handle_cdata_section_state(&mut self) {
        let data = self.reader.consume_to_str("]]>");
        self.data_buffer.push_str(data);
        if !self.reader.match_consume("]]>") {
            self.eof_error(ParseError::EofInCdata);
        }
        let data = std::mem::take(&mut self.data_buffer);
        self.emit(Token::CData { data });
        self.transition(TokenizerState::Data);
    }
}
