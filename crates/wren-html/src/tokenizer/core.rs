use super::cache::StringCache;
use super::errors::ErrorCollector;
use super::state::TokenizerState;
use super::stream::CharacterStream;
use super::token::{
    CommentBuilder, DEFAULT_MAX_ATTRIBUTES, DoctypeBuilder, TagBuilder, TagKind, Token,
};

/// Settings for a [`Tokenizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// State to start in. A fragment parser starts a `<title>` body in
    /// [`TokenizerState::Rcdata`], for example.
    pub initial_state: TokenizerState,
    /// Name of the start tag that opened the raw text being tokenized, so
    /// that its end tag is recognised.
    pub last_start_tag: Option<String>,
    /// Parse errors kept before further ones are dropped.
    pub max_errors: usize,
    /// Attributes kept per tag before further ones are dropped.
    pub max_attributes: usize,
    /// Slots in the tag and attribute name cache. Zero disables it.
    pub string_cache_slots: usize,
    /// Switch into RCDATA, RAWTEXT, script data or PLAINTEXT after the
    /// start tags that require it. Turn off when a tree builder drives
    /// [`Tokenizer::transition`] itself.
    pub switch_content_models: bool,
    /// Echo every recorded parse error through the warning channel.
    pub echo_errors: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            initial_state: TokenizerState::Data,
            last_start_tag: None,
            max_errors: usize::MAX,
            max_attributes: DEFAULT_MAX_ATTRIBUTES,
            string_cache_slots: super::cache::DEFAULT_SLOTS,
            switch_content_models: true,
            echo_errors: false,
        }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to tokenize HTML."
///
/// A pull tokenizer: each call to [`next_token`](Self::next_token) runs the
/// state machine just far enough to produce one token. Adjacent character
/// data is coalesced into a single [`Token::Character`].
///
/// # Example
///
/// ```
/// use wren_html::{Token, Tokenizer};
///
/// let mut tokenizer = Tokenizer::new("<p>Hi</p>");
/// assert!(tokenizer.next_token().is_start_tag("p"));
/// assert_eq!(tokenizer.next_token(), Token::new_character("Hi"));
/// assert!(tokenizer.next_token().is_end_tag("p"));
/// assert!(tokenizer.next_token().is_eof());
/// ```
#[derive(Debug)]
pub struct Tokenizer<'a> {
    pub(super) reader: CharacterStream<'a>,
    pub(super) state: TokenizerState,

    /// The single non-character token waiting to be returned.
    pub(super) emit_pending: Option<Token>,
    /// Character data emitted since the last returned token.
    pub(super) char_buffer: String,

    pub(super) start_tag: TagBuilder,
    pub(super) end_tag: TagBuilder,
    /// Which of the two tag builders is current.
    pub(super) tag_is_start: bool,
    pub(super) comment: CommentBuilder,
    pub(super) doctype: DoctypeBuilder,

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#temporary-buffer)
    /// "The temporary buffer is used to temporarily store characters during certain
    /// tokenization operations", and for CDATA section content.
    pub(super) data_buffer: String,

    /// "The last start tag token emitted is used as part of the tree construction stage
    /// and in the RCDATA, RAWTEXT, and script data states."
    pub(super) last_start_tag: Option<String>,

    /// Content model picked by the last emitted start tag. Applied after the
    /// state handler returns, so it overrides the handler's own transition.
    pub(super) pending_content_model: Option<TokenizerState>,

    pub(super) errors: ErrorCollector,
    pub(super) switch_content_models: bool,
    pub(super) echo_errors: bool,

    /// Set once the end-of-file token has been returned.
    eof_returned: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `input` with the default configuration.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, TokenizerConfig::default())
    }

    /// Create a tokenizer over `input`.
    #[must_use]
    pub fn with_config(input: &'a str, config: TokenizerConfig) -> Self {
        let cache = StringCache::new(config.string_cache_slots);
        Self {
            reader: CharacterStream::with_cache(input, cache),
            state: config.initial_state,
            emit_pending: None,
            char_buffer: String::new(),
            start_tag: TagBuilder::new(TagKind::Start, config.max_attributes),
            end_tag: TagBuilder::new(TagKind::End, config.max_attributes),
            tag_is_start: true,
            comment: CommentBuilder::default(),
            doctype: DoctypeBuilder::default(),
            data_buffer: String::new(),
            last_start_tag: config.last_start_tag.map(|name| name.to_ascii_lowercase()),
            pending_content_model: None,
            errors: ErrorCollector::new(config.max_errors),
            switch_content_models: config.switch_content_models,
            echo_errors: config.echo_errors,
            eof_returned: false,
        }
    }

    /// Produce the next token.
    ///
    /// Character data gathered before a pending tag, comment or DOCTYPE is
    /// returned first as one [`Token::Character`]. After the end-of-file
    /// token has been returned, every further call returns it again.
    pub fn next_token(&mut self) -> Token {
        loop {
            if self.eof_returned {
                return Token::EndOfFile;
            }

            if let Some(token) = self.emit_pending.take() {
                if !self.char_buffer.is_empty() {
                    self.emit_pending = Some(token);
                    return Token::new_character(std::mem::take(&mut self.char_buffer));
                }
                if token.is_eof() {
                    self.eof_returned = true;
                }
                return token;
            }

            self.step();
        }
    }

    /// Run the handler for the current state once.
    fn step(&mut self) {
        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::CharacterReferenceInData => {
                self.read_char_ref(TokenizerState::Data);
            }
            TokenizerState::Rcdata => self.handle_rcdata_state(),
            TokenizerState::CharacterReferenceInRcdata => {
                self.read_char_ref(TokenizerState::Rcdata);
            }
            TokenizerState::Rawtext => self.handle_rawtext_state(),
            TokenizerState::ScriptData => self.handle_script_data_state(),
            TokenizerState::Plaintext => self.handle_plaintext_state(),
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::RcdataLessThanSign => self.handle_rcdata_less_than_sign_state(),
            TokenizerState::RcdataEndTagOpen => self.handle_end_tag_open_in_text(
                TokenizerState::RcdataEndTagName,
                TokenizerState::Rcdata,
            ),
            TokenizerState::RcdataEndTagName => self.handle_data_end_tag(TokenizerState::Rcdata),
            TokenizerState::RawtextLessThanSign => self.handle_rawtext_less_than_sign_state(),
            TokenizerState::RawtextEndTagOpen => self.handle_end_tag_open_in_text(
                TokenizerState::RawtextEndTagName,
                TokenizerState::Rawtext,
            ),
            TokenizerState::RawtextEndTagName => {
                self.handle_data_end_tag(TokenizerState::Rawtext);
            }
            TokenizerState::ScriptDataLessThanSign => {
                self.handle_script_data_less_than_sign_state();
            }
            TokenizerState::ScriptDataEndTagOpen => self.handle_end_tag_open_in_text(
                TokenizerState::ScriptDataEndTagName,
                TokenizerState::ScriptData,
            ),
            TokenizerState::ScriptDataEndTagName => {
                self.handle_data_end_tag(TokenizerState::ScriptData);
            }
            TokenizerState::ScriptDataEscapeStart => self.handle_script_data_escape_start_state(),
            TokenizerState::ScriptDataEscapeStartDash => {
                self.handle_script_data_escape_start_dash_state();
            }
            TokenizerState::ScriptDataEscaped => self.handle_script_data_escaped_state(),
            TokenizerState::ScriptDataEscapedDash => self.handle_script_data_escaped_dash_state(),
            TokenizerState::ScriptDataEscapedDashDash => {
                self.handle_script_data_escaped_dash_dash_state();
            }
            TokenizerState::ScriptDataEscapedLessThanSign => {
                self.handle_script_data_escaped_less_than_sign_state();
            }
            TokenizerState::ScriptDataEscapedEndTagOpen => self.handle_end_tag_open_in_text(
                TokenizerState::ScriptDataEscapedEndTagName,
                TokenizerState::ScriptDataEscaped,
            ),
            TokenizerState::ScriptDataEscapedEndTagName => {
                self.handle_data_end_tag(TokenizerState::ScriptDataEscaped);
            }
            TokenizerState::ScriptDataDoubleEscapeStart => self.handle_data_double_escape_tag(
                TokenizerState::ScriptDataDoubleEscaped,
                TokenizerState::ScriptDataEscaped,
            ),
            TokenizerState::ScriptDataDoubleEscaped => {
                self.handle_script_data_double_escaped_state();
            }
            TokenizerState::ScriptDataDoubleEscapedDash => {
                self.handle_script_data_double_escaped_dash_state();
            }
            TokenizerState::ScriptDataDoubleEscapedDashDash => {
                self.handle_script_data_double_escaped_dash_dash_state();
            }
            TokenizerState::ScriptDataDoubleEscapedLessThanSign => {
                self.handle_script_data_double_escaped_less_than_sign_state();
            }
            TokenizerState::ScriptDataDoubleEscapeEnd => self.handle_data_double_escape_tag(
                TokenizerState::ScriptDataEscaped,
                TokenizerState::ScriptDataDoubleEscaped,
            ),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state('"');
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state('\'');
            }
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state();
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            TokenizerState::BogusComment => self.handle_bogus_comment_state(),
            TokenizerState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(),
            TokenizerState::CommentStart => self.handle_comment_start_state(),
            TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
            TokenizerState::Comment => self.handle_comment_state(),
            TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
            TokenizerState::CommentEnd => self.handle_comment_end_state(),
            TokenizerState::CommentEndBang => self.handle_comment_end_bang_state(),
            TokenizerState::Doctype => self.handle_doctype_state(),
            TokenizerState::BeforeDoctypeName => self.handle_before_doctype_name_state(),
            TokenizerState::DoctypeName => self.handle_doctype_name_state(),
            TokenizerState::AfterDoctypeName => self.handle_after_doctype_name_state(),
            TokenizerState::AfterDoctypePublicKeyword => {
                self.handle_after_doctype_public_keyword_state();
            }
            TokenizerState::BeforeDoctypePublicIdentifier => {
                self.handle_before_doctype_public_identifier_state();
            }
            TokenizerState::DoctypePublicIdentifierDoubleQuoted => {
                self.handle_doctype_public_identifier_quoted_state('"');
            }
            TokenizerState::DoctypePublicIdentifierSingleQuoted => {
                self.handle_doctype_public_identifier_quoted_state('\'');
            }
            TokenizerState::AfterDoctypePublicIdentifier => {
                self.handle_after_doctype_public_identifier_state();
            }
            TokenizerState::BetweenDoctypePublicAndSystemIdentifiers => {
                self.handle_between_doctype_public_and_system_identifiers_state();
            }
            TokenizerState::AfterDoctypeSystemKeyword => {
                self.handle_after_doctype_system_keyword_state();
            }
            TokenizerState::BeforeDoctypeSystemIdentifier => {
                self.handle_before_doctype_system_identifier_state();
            }
            TokenizerState::DoctypeSystemIdentifierDoubleQuoted => {
                self.handle_doctype_system_identifier_quoted_state('"');
            }
            TokenizerState::DoctypeSystemIdentifierSingleQuoted => {
                self.handle_doctype_system_identifier_quoted_state('\'');
            }
            TokenizerState::AfterDoctypeSystemIdentifier => {
                self.handle_after_doctype_system_identifier_state();
            }
            TokenizerState::BogusDoctype => self.handle_bogus_doctype_state(),
            TokenizerState::CdataSection => self.handle_cdata_section_state(),
        }

        if let Some(content_model) = self.pending_content_model.take() {
            self.state = content_model;
        }
    }

    /// The active state.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Switch to `state` without consuming input.
    ///
    /// A tree builder calls this after opening an element whose content is
    /// not parsed as markup, e.g. [`TokenizerState::Rawtext`] after `<style>`.
    pub const fn transition(&mut self, state: TokenizerState) {
        self.state = state;
    }

    /// Consume one character, then switch to `state`.
    pub fn advance_transition(&mut self, state: TokenizerState) {
        self.reader.advance();
        self.state = state;
    }

    /// Set (or clear) the name an end tag must have to close the current
    /// raw text. Normally this tracks the last emitted start tag.
    pub fn set_last_start_tag(&mut self, name: Option<&str>) {
        self.last_start_tag = name.map(str::to_ascii_lowercase);
    }

    /// Name of the last emitted start tag.
    #[must_use]
    pub fn last_start_tag(&self) -> Option<&str> {
        self.last_start_tag.as_deref()
    }

    /// Parse errors recorded so far.
    #[must_use]
    pub const fn errors(&self) -> &ErrorCollector {
        &self.errors
    }

    /// Take the recorded errors, leaving an empty collector with the same cap.
    pub fn take_errors(&mut self) -> ErrorCollector {
        let max = self.errors.max();
        std::mem::replace(&mut self.errors, ErrorCollector::new(max))
    }

    /// Current input position (byte offset).
    #[must_use]
    pub const fn position(&self) -> usize {
        self.reader.pos()
    }

    /// 1-based line and column of a byte offset, such as an error position.
    #[must_use]
    pub fn line_and_column(&self, offset: usize) -> (usize, usize) {
        self.reader.line_and_column(offset)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Yields every token up to and including the end-of-file token, then `None`.
    fn next(&mut self) -> Option<Token> {
        if self.eof_returned {
            None
        } else {
            Some(self.next_token())
        }
    }
}
