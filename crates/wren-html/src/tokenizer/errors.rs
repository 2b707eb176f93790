//! Parse errors and the collector that records them.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! "This specification defines the parsing rules for HTML documents, whether
//! they are syntactically correct or not. Certain points in the parsing
//! algorithm are said to be parse errors. The error handling for parse
//! errors is well-defined."
//!
//! Parse errors never stop tokenization. Each one is recorded with the
//! input position and the state that noticed it, up to a configurable cap.

use core::fmt;

use serde::Serialize;
use thiserror::Error;

use super::state::TokenizerState;

/// The parse error codes this tokenizer reports.
///
/// Display strings are the WHATWG error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseError {
    /// A U+0000 NULL in the input.
    #[error("unexpected-null-character")]
    UnexpectedNullCharacter,
    /// `<?` where a tag name was expected.
    #[error("unexpected-question-mark-instead-of-tag-name")]
    UnexpectedQuestionMarkInsteadOfTagName,
    /// Input ended right after `<` or `</`.
    #[error("eof-before-tag-name")]
    EofBeforeTagName,
    /// A character that cannot start a tag name followed `<` or `</`.
    #[error("invalid-first-character-of-tag-name")]
    InvalidFirstCharacterOfTagName,
    /// `</>`
    #[error("missing-end-tag-name")]
    MissingEndTagName,
    /// Input ended inside a tag.
    #[error("eof-in-tag")]
    EofInTag,
    /// `=` where an attribute name was expected.
    #[error("unexpected-equals-sign-before-attribute-name")]
    UnexpectedEqualsSignBeforeAttributeName,
    /// `"`, `'` or `<` inside an attribute name.
    #[error("unexpected-character-in-attribute-name")]
    UnexpectedCharacterInAttributeName,
    /// `=` followed directly by `>`.
    #[error("missing-attribute-value")]
    MissingAttributeValue,
    /// `"`, `'`, `<`, `=` or `` ` `` inside an unquoted attribute value.
    #[error("unexpected-character-in-unquoted-attribute-value")]
    UnexpectedCharacterInUnquotedAttributeValue,
    /// Two attributes with nothing between them.
    #[error("missing-whitespace-between-attributes")]
    MissingWhitespaceBetweenAttributes,
    /// A `/` inside a tag not followed by `>`.
    #[error("unexpected-solidus-in-tag")]
    UnexpectedSolidusInTag,
    /// An attribute name repeated on the same tag.
    #[error("duplicate-attribute")]
    DuplicateAttribute,
    /// An end tag carrying attributes.
    #[error("end-tag-with-attributes")]
    EndTagWithAttributes,
    /// An end tag with the self-closing flag set.
    #[error("end-tag-with-trailing-solidus")]
    EndTagWithTrailingSolidus,
    /// `<!` not followed by `--`, `DOCTYPE` or `[CDATA[`.
    #[error("incorrectly-opened-comment")]
    IncorrectlyOpenedComment,
    /// `<!-->` or `<!--->`.
    #[error("abrupt-closing-of-empty-comment")]
    AbruptClosingOfEmptyComment,
    /// Input ended inside a comment.
    #[error("eof-in-comment")]
    EofInComment,
    /// A comment closed by `--!>`.
    #[error("incorrectly-closed-comment")]
    IncorrectlyClosedComment,
    /// Input ended inside a DOCTYPE.
    #[error("eof-in-doctype")]
    EofInDoctype,
    /// `<!DOCTYPEhtml>`
    #[error("missing-whitespace-before-doctype-name")]
    MissingWhitespaceBeforeDoctypeName,
    /// `<!DOCTYPE>`
    #[error("missing-doctype-name")]
    MissingDoctypeName,
    /// Something other than `PUBLIC` or `SYSTEM` after the DOCTYPE name.
    #[error("invalid-character-sequence-after-doctype-name")]
    InvalidCharacterSequenceAfterDoctypeName,
    /// `PUBLIC"...`
    #[error("missing-whitespace-after-doctype-public-keyword")]
    MissingWhitespaceAfterDoctypePublicKeyword,
    /// `PUBLIC>`
    #[error("missing-doctype-public-identifier")]
    MissingDoctypePublicIdentifier,
    /// A public identifier that does not start with a quote.
    #[error("missing-quote-before-doctype-public-identifier")]
    MissingQuoteBeforeDoctypePublicIdentifier,
    /// `>` inside a quoted public identifier.
    #[error("abrupt-doctype-public-identifier")]
    AbruptDoctypePublicIdentifier,
    /// Public and system identifiers with nothing between them.
    #[error("missing-whitespace-between-doctype-public-and-system-identifiers")]
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    /// `SYSTEM"...`
    #[error("missing-whitespace-after-doctype-system-keyword")]
    MissingWhitespaceAfterDoctypeSystemKeyword,
    /// `SYSTEM>`
    #[error("missing-doctype-system-identifier")]
    MissingDoctypeSystemIdentifier,
    /// A system identifier that does not start with a quote.
    #[error("missing-quote-before-doctype-system-identifier")]
    MissingQuoteBeforeDoctypeSystemIdentifier,
    /// `>` inside a quoted system identifier.
    #[error("abrupt-doctype-system-identifier")]
    AbruptDoctypeSystemIdentifier,
    /// Trailing junk after the system identifier.
    #[error("unexpected-character-after-doctype-system-identifier")]
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    /// Input ended inside a CDATA section.
    #[error("eof-in-cdata")]
    EofInCdata,
    /// Input ended inside `<!--` ... in script data.
    #[error("eof-in-script-html-comment-like-text")]
    EofInScriptHtmlCommentLikeText,
    /// `&#` or `&#x` without digits.
    #[error("absence-of-digits-in-numeric-character-reference")]
    AbsenceOfDigitsInNumericCharacterReference,
    /// A character reference not terminated by `;`.
    #[error("missing-semicolon-after-character-reference")]
    MissingSemicolonAfterCharacterReference,
    /// `&#0;`
    #[error("null-character-reference")]
    NullCharacterReference,
    /// A numeric reference above U+10FFFF.
    #[error("character-reference-outside-unicode-range")]
    CharacterReferenceOutsideUnicodeRange,
    /// A numeric reference to a surrogate code point.
    #[error("surrogate-character-reference")]
    SurrogateCharacterReference,
    /// A numeric reference to a control other than ASCII whitespace.
    #[error("control-character-reference")]
    ControlCharacterReference,
    /// A numeric reference to a Unicode noncharacter.
    #[error("noncharacter-character-reference")]
    NoncharacterCharacterReference,
    /// `&name;` where `name` is not a known entity.
    #[error("unknown-named-character-reference")]
    UnknownNamedCharacterReference,
}

/// One recorded parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseErrorRecord {
    /// Byte offset into the input where the error was noticed.
    pub position: usize,
    /// Which error.
    pub kind: ParseError,
    /// The state the tokenizer was in.
    pub state: TokenizerState,
}

impl ParseErrorRecord {
    /// Human readable form, e.g. `unexpected-null-character in TagName state`.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ParseErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {} state", self.kind, self.state)
    }
}

/// A bounded, ordered list of parse errors.
///
/// Once full, further errors are silently discarded. Tokenization carries on.
#[derive(Debug, Clone, Default)]
pub struct ErrorCollector {
    max: usize,
    errors: Vec<ParseErrorRecord>,
}

impl ErrorCollector {
    /// A collector that keeps at most `max` errors.
    #[must_use]
    pub const fn new(max: usize) -> Self {
        Self {
            max,
            errors: Vec::new(),
        }
    }

    /// A collector with no cap.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    /// A collector that records nothing.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(0)
    }

    /// The cap this collector was built with.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Returns true while there is room for another error.
    #[must_use]
    pub fn can_add_error(&self) -> bool {
        self.errors.len() < self.max
    }

    /// Record an error. Returns false if the collector was full.
    pub fn push(&mut self, record: ParseErrorRecord) -> bool {
        if !self.can_add_error() {
            return false;
        }
        self.errors.push(record);
        true
    }

    /// Number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded errors in the order they were found.
    pub fn iter(&self) -> std::slice::Iter<'_, ParseErrorRecord> {
        self.errors.iter()
    }

    /// Recorded errors as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ParseErrorRecord] {
        &self.errors
    }

    /// Returns true if any recorded error is `kind`.
    #[must_use]
    pub fn contains(&self, kind: ParseError) -> bool {
        self.errors.iter().any(|record| record.kind == kind)
    }
}

impl<'a> IntoIterator for &'a ErrorCollector {
    type Item = &'a ParseErrorRecord;
    type IntoIter = std::slice::Iter<'a, ParseErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(position: usize) -> ParseErrorRecord {
        ParseErrorRecord {
            position,
            kind: ParseError::UnexpectedNullCharacter,
            state: TokenizerState::TagName,
        }
    }

    #[test]
    fn test_message_format() {
        assert_eq!(
            record(3).message(),
            "unexpected-null-character in TagName state"
        );
    }

    #[test]
    fn test_collector_stops_at_cap() {
        let mut errors = ErrorCollector::new(2);
        assert!(errors.push(record(0)));
        assert!(errors.push(record(1)));
        assert!(!errors.can_add_error());
        assert!(!errors.push(record(2)));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.as_slice()[1].position, 1);
    }

    #[test]
    fn test_disabled_collector_records_nothing() {
        let mut errors = ErrorCollector::disabled();
        assert!(!errors.push(record(0)));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_error_code_serializes_kebab_case() {
        let json = serde_json::to_string(&ParseError::EofInComment).unwrap();
        assert_eq!(json, "\"eof-in-comment\"");
    }
}
