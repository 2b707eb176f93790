//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains the operations the state handlers share:
//! - Token emission ("Emit the current token")
//! - Tag, comment and DOCTYPE builder management
//! - Parse error reporting
//! - Content model selection after raw text start tags

use wren_common::warning::warn_once;

use super::core::Tokenizer;
use super::errors::{ParseError, ParseErrorRecord};
use super::state::TokenizerState;
use super::token::{AttributeOutcome, TagBuilder, Token};

/// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
///
/// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
/// or U+0020 SPACE."
pub(super) const fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}

/// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
///
/// The content model a tree builder would switch the tokenizer into after
/// inserting an element named `name`.
pub(super) fn content_model_for(name: &str) -> Option<TokenizerState> {
    match name {
        "title" | "textarea" => Some(TokenizerState::Rcdata),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(TokenizerState::Rawtext),
        "script" => Some(TokenizerState::ScriptData),
        "plaintext" => Some(TokenizerState::Plaintext),
        _ => None,
    }
}

// =============================================================================
// Emission
// =============================================================================

impl Tokenizer<'_> {
    /// "Emit the current token"
    ///
    /// Queues a non-character token. Any character data emitted before it
    /// is returned first.
    ///
    /// # Panics
    ///
    /// Panics if a token is already pending. Every state handler emits at
    /// most one non-character token per step, so this indicates a bug in
    /// the state machine.
    pub(super) fn emit(&mut self, token: Token) {
        assert!(
            self.emit_pending.is_none(),
            "emit() called with a token already pending: {token:?}"
        );
        self.emit_pending = Some(token);
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_char(&mut self, c: char) {
        self.char_buffer.push(c);
    }

    /// Emit a run of characters.
    pub(super) fn emit_str(&mut self, s: &str) {
        self.char_buffer.push_str(s);
    }
}

// =============================================================================
// Tag Helpers
// =============================================================================

impl Tokenizer<'_> {
    /// "Create a new start tag token" / "Create a new end tag token"
    pub(super) fn create_tag_pending(&mut self, is_start: bool) {
        self.tag_is_start = is_start;
        self.tag_pending().reset();
    }

    /// The tag token being built.
    pub(super) const fn tag_pending(&mut self) -> &mut TagBuilder {
        if self.tag_is_start {
            &mut self.start_tag
        } else {
            &mut self.end_tag
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    ///
    /// "Start a new attribute in the current tag token."
    pub(super) fn new_attribute(&mut self) {
        let tag = if self.tag_is_start {
            &mut self.start_tag
        } else {
            &mut self.end_tag
        };
        let outcome = tag.new_attribute(self.reader.cache_mut());
        self.report_attribute_outcome(outcome);
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "if there is already an attribute on the token with the exact same name,
    /// then this is a duplicate-attribute parse error"
    ///
    /// The duplicate is kept; lookups on the emitted token see the first one.
    fn report_attribute_outcome(&mut self, outcome: AttributeOutcome) {
        if outcome == AttributeOutcome::Duplicate {
            self.error(ParseError::DuplicateAttribute);
        }
    }

    /// "Emit the current tag token."
    ///
    /// Commits the pending attribute, reports end tag misuse, remembers
    /// the last start tag name and queues a content model switch.
    pub(super) fn emit_tag_pending(&mut self) {
        let tag = if self.tag_is_start {
            &mut self.start_tag
        } else {
            &mut self.end_tag
        };
        let outcome = tag.commit_attribute(self.reader.cache_mut());
        self.report_attribute_outcome(outcome);

        if self.tag_is_start {
            let name = self.start_tag.name().to_owned();
            if self.switch_content_models && !self.start_tag.is_self_closing() {
                self.pending_content_model = content_model_for(&name);
            }
            self.last_start_tag = Some(name);
        } else {
            // "When an end tag token is emitted with attributes, that is an
            // end-tag-with-attributes parse error."
            if self.end_tag.has_attributes() {
                self.error(ParseError::EndTagWithAttributes);
            }
            // "When an end tag token is emitted with its self-closing flag
            // set, that is an end-tag-with-trailing-solidus parse error."
            if self.end_tag.is_self_closing() {
                self.error(ParseError::EndTagWithTrailingSolidus);
            }
        }

        let token = if self.tag_is_start {
            self.start_tag.build(self.reader.cache_mut())
        } else {
            self.end_tag.build(self.reader.cache_mut())
        };
        self.emit(token);
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-end-tag-token)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        !self.tag_is_start
            && self
                .last_start_tag
                .as_deref()
                .is_some_and(|last| last.eq_ignore_ascii_case(self.end_tag.name()))
    }

    /// Returns true when there is a last start tag and `</name` appears
    /// nowhere ahead of the cursor.
    pub(super) fn end_tag_missing_ahead(&mut self) -> bool {
        let Some(last) = self.last_start_tag.as_deref() else {
            return false;
        };
        let target = format!("</{last}");
        !self.reader.contains_ignore_case(&target)
    }

    /// Emit an end tag for the last start tag without reading one from the input.
    pub(super) fn emit_synthetic_end_tag(&mut self) {
        let Some(name) = self.last_start_tag.clone() else {
            return;
        };
        self.create_tag_pending(false);
        self.end_tag.append_tag_name(&name);
        self.emit_tag_pending();
    }
}

// =============================================================================
// Comment and DOCTYPE Helpers
// =============================================================================

impl Tokenizer<'_> {
    /// "Create a comment token whose data is the empty string."
    pub(super) fn create_comment_pending(&mut self, bogus: bool) {
        self.comment.reset(bogus);
    }

    /// "Emit the comment token."
    pub(super) fn emit_comment_pending(&mut self) {
        let token = self.comment.build();
        self.emit(token);
    }

    /// "Create a new DOCTYPE token."
    pub(super) fn create_doctype_pending(&mut self) {
        self.doctype.reset();
    }

    /// "Emit the current DOCTYPE token."
    pub(super) fn emit_doctype_pending(&mut self) {
        let token = self.doctype.build();
        self.emit(token);
    }

    /// "This is an eof-in-doctype parse error. Set the current DOCTYPE token's
    /// force-quirks flag to on. Emit the current DOCTYPE token. Emit an
    /// end-of-file token."
    pub(super) fn eof_in_doctype(&mut self) {
        self.eof_error(ParseError::EofInDoctype);
        self.doctype.set_force_quirks();
        self.emit_doctype_pending();
        self.transition(TokenizerState::Data);
    }
}

// =============================================================================
// Error Helpers
// =============================================================================

impl Tokenizer<'_> {
    /// Record a parse error at the current input position.
    pub(super) fn error(&mut self, kind: ParseError) {
        self.record_error(self.reader.pos(), kind);
    }

    /// Record a parse error caused by reaching the end of the input.
    pub(super) fn eof_error(&mut self, kind: ParseError) {
        self.record_error(self.reader.input().len(), kind);
    }

    fn record_error(&mut self, position: usize, kind: ParseError) {
        if !self.errors.can_add_error() {
            return;
        }
        let record = ParseErrorRecord {
            position,
            kind,
            state: self.state,
        };
        if self.echo_errors {
            warn_once("HTML Tokenizer", &record.message());
        }
        let _ = self.errors.push(record);
    }
}
