//! Integration tests for the HTML tokenizer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use quickcheck_macros::quickcheck;
use strum::IntoEnumIterator;
use wren_html::{
    Attribute, Attributes, ParseError, Token, Tokenizer, TokenizerConfig, TokenizerState,
};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).collect()
}

/// Helper to tokenize a string and return the tokens and the error codes
fn tokenize_with_errors(input: &str) -> (Vec<Token>, Vec<ParseError>) {
    let mut tokenizer = Tokenizer::new(input);
    let tokens: Vec<Token> = tokenizer.by_ref().collect();
    let errors = tokenizer.errors().iter().map(|record| record.kind).collect();
    (tokens, errors)
}

fn chars(data: &str) -> Token {
    Token::new_character(data)
}

// =============================================================================
// Data state and character coalescing
// =============================================================================

#[test]
fn test_empty_input() {
    let tokens = tokenize("");
    assert_eq!(tokens, vec![Token::EndOfFile]);
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens, vec![chars("Hello"), Token::EndOfFile]);
}

#[test]
fn test_paragraph_with_entity() {
    let tokens = tokenize(r#"<p class="a">Hi &amp; bye</p>"#);
    assert_eq!(tokens.len(), 4);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(&**name, "p");
            assert!(!self_closing);
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes.value("class"), Some("a"));
        }
        _ => panic!("Expected StartTag token"),
    }
    assert_eq!(tokens[1], chars("Hi & bye"));
    assert!(tokens[2].is_end_tag("p"));
    assert!(tokens[3].is_eof());
}

#[test]
fn test_text_around_dropped_tag_is_coalesced() {
    // `</>` produces no token, so the text on either side is one run.
    let (tokens, errors) = tokenize_with_errors("a</>b");
    assert_eq!(tokens, vec![chars("ab"), Token::EndOfFile]);
    assert_eq!(errors, vec![ParseError::MissingEndTagName]);
}

#[test]
fn test_null_in_data_is_kept() {
    let mut tokenizer = Tokenizer::new("a\0b");
    assert_eq!(tokenizer.next_token(), chars("a\0b"));
    assert!(tokenizer.next_token().is_eof());
    let errors = tokenizer.errors().as_slice();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ParseError::UnexpectedNullCharacter);
    assert_eq!(errors[0].position, 1);
    assert_eq!(errors[0].state, TokenizerState::Data);
}

#[test]
fn test_error_line_and_column() {
    let mut tokenizer = Tokenizer::new("ab\nc\0");
    let _ = tokenizer.by_ref().count();
    let position = tokenizer.errors().as_slice()[0].position;
    assert_eq!(position, 4);
    assert_eq!(tokenizer.line_and_column(position), (2, 2));
}

#[test]
fn test_less_than_sign_as_text() {
    let (tokens, errors) = tokenize_with_errors("1 <3 2");
    assert_eq!(tokens, vec![chars("1 <3 2"), Token::EndOfFile]);
    assert_eq!(errors, vec![ParseError::InvalidFirstCharacterOfTagName]);
}

#[test]
fn test_eof_after_less_than_sign() {
    let (tokens, errors) = tokenize_with_errors("<");
    assert_eq!(tokens, vec![chars("<"), Token::EndOfFile]);
    assert_eq!(errors, vec![ParseError::EofBeforeTagName]);

    let (tokens, errors) = tokenize_with_errors("</");
    assert_eq!(tokens, vec![chars("</"), Token::EndOfFile]);
    assert_eq!(errors, vec![ParseError::EofBeforeTagName]);
}

// =============================================================================
// Tags
// =============================================================================

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(&**name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokenize(r#"<DiV CLASS="Keep">"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(&**name, "div");
            assert_eq!(attributes.value("class"), Some("Keep"));
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::EndTag { name, .. } => {
            assert_eq!(&**name, "div");
        }
        _ => panic!("Expected EndTag token"),
    }
}

#[test]
fn test_self_closing_tag() {
    for input in ["<br/>", "<br />"] {
        let tokens = tokenize(input);
        assert_eq!(tokens.len(), 2);
        match &tokens[0] {
            Token::StartTag {
                name, self_closing, ..
            } => {
                assert_eq!(&**name, "br");
                assert!(self_closing);
            }
            _ => panic!("Expected self-closing StartTag token"),
        }
    }
}

#[test]
fn test_null_in_tag_name_is_replaced() {
    let (tokens, errors) = tokenize_with_errors("<a\0b>");
    assert_eq!(tokens[0].tag_name(), Some("a\u{FFFD}b"));
    assert_eq!(errors, vec![ParseError::UnexpectedNullCharacter]);
}

#[test]
fn test_less_than_sign_inside_tag_name() {
    let tokens = tokenize("<a<b>");
    assert_eq!(tokens[0].tag_name(), Some("a<b"));
}

#[test]
fn test_end_tag_misuse_is_reported() {
    let (tokens, errors) = tokenize_with_errors(r#"</p class="x">"#);
    assert!(tokens[0].is_end_tag("p"));
    assert_eq!(errors, vec![ParseError::EndTagWithAttributes]);

    let (tokens, errors) = tokenize_with_errors("</br/>");
    assert!(tokens[0].is_end_tag("br"));
    assert_eq!(errors, vec![ParseError::EndTagWithTrailingSolidus]);
}

#[test]
fn test_eof_in_tag_drops_the_tag() {
    let (tokens, errors) = tokenize_with_errors(r#"text<div class="x"#);
    assert_eq!(tokens, vec![chars("text"), Token::EndOfFile]);
    assert_eq!(errors, vec![ParseError::EofInTag]);
}

#[test]
fn test_unexpected_solidus_in_tag() {
    let (tokens, errors) = tokenize_with_errors("<a / b>");
    let attributes = tokens[0].attributes().unwrap();
    assert!(attributes.has("b"));
    assert!(!matches!(tokens[0], Token::StartTag { self_closing: true, .. }));
    assert_eq!(errors, vec![ParseError::UnexpectedSolidusInTag]);
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn test_attribute_value_variants() {
    let tokens = tokenize(r#"<a b='1' c="2" d=3 e f="">"#);
    let attributes = tokens[0].attributes().unwrap();
    assert_eq!(attributes.len(), 5);
    assert_eq!(attributes.value("b"), Some("1"));
    assert_eq!(attributes.value("c"), Some("2"));
    assert_eq!(attributes.value("d"), Some("3"));
    assert!(attributes.get("e").unwrap().is_boolean());
    assert_eq!(attributes.value("e"), Some(""));
    assert!(!attributes.get("f").unwrap().is_boolean());
    assert_eq!(attributes.value("f"), Some(""));
}

#[test]
fn test_attribute_order_is_preserved() {
    let tokens = tokenize("<a z=1 y=2 x=3>");
    let names: Vec<&str> = tokens[0]
        .attributes()
        .unwrap()
        .iter()
        .map(|attr| &*attr.name)
        .collect();
    assert_eq!(names, vec!["z", "y", "x"]);
}

#[test]
fn test_whitespace_around_equals() {
    let tokens = tokenize("<a b = 'c' >");
    assert_eq!(tokens[0].attributes().unwrap().value("b"), Some("c"));
}

#[test]
fn test_missing_attribute_value() {
    let (tokens, errors) = tokenize_with_errors("<a b=>");
    assert_eq!(tokens[0].attributes().unwrap().value("b"), Some(""));
    assert_eq!(errors, vec![ParseError::MissingAttributeValue]);
}

#[test]
fn test_duplicate_attribute_first_wins() {
    let (tokens, errors) = tokenize_with_errors("<a x=1 x=2>");
    let attributes = tokens[0].attributes().unwrap();
    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes.value("x"), Some("1"));
    assert_eq!(errors, vec![ParseError::DuplicateAttribute]);
}

#[test]
fn test_missing_whitespace_between_attributes() {
    let (tokens, errors) = tokenize_with_errors(r#"<a b="1"c="2">"#);
    let attributes = tokens[0].attributes().unwrap();
    assert_eq!(attributes.value("b"), Some("1"));
    assert_eq!(attributes.value("c"), Some("2"));
    assert_eq!(errors, vec![ParseError::MissingWhitespaceBetweenAttributes]);
}

#[test]
fn test_equals_sign_before_attribute_name() {
    let (tokens, errors) = tokenize_with_errors("<a =b>");
    assert!(tokens[0].attributes().unwrap().has("=b"));
    assert_eq!(
        errors,
        vec![ParseError::UnexpectedEqualsSignBeforeAttributeName]
    );
}

#[test]
fn test_quote_in_attribute_name() {
    let (tokens, errors) = tokenize_with_errors(r#"<a b"c>"#);
    assert!(tokens[0].attributes().unwrap().has("b\"c"));
    assert_eq!(errors, vec![ParseError::UnexpectedCharacterInAttributeName]);
}

#[test]
fn test_quote_in_unquoted_attribute_value() {
    let (tokens, errors) = tokenize_with_errors(r#"<a b=c"d>"#);
    assert_eq!(tokens[0].attributes().unwrap().value("b"), Some("c\"d"));
    assert_eq!(
        errors,
        vec![ParseError::UnexpectedCharacterInUnquotedAttributeValue]
    );
}

#[test]
fn test_null_in_attribute_value() {
    let tokens = tokenize("<a b=\"x\0y\">");
    assert_eq!(
        tokens[0].attributes().unwrap().value("b"),
        Some("x\u{FFFD}y")
    );
}

#[test]
fn test_attribute_cap_drops_excess() {
    let config = TokenizerConfig {
        max_attributes: 2,
        ..TokenizerConfig::default()
    };
    let mut tokenizer = Tokenizer::with_config("<a b c d e>", config);
    let token = tokenizer.next_token();
    let attributes = token.attributes().unwrap();
    assert_eq!(attributes.len(), 2);
    assert!(attributes.has("b"));
    assert!(attributes.has("c"));
    assert!(tokenizer.errors().is_empty());
}

// =============================================================================
// Character references
// =============================================================================

#[test]
fn test_named_references() {
    let tokens = tokenize("&lt;&gt;&quot;&AMP;&nbsp;");
    assert_eq!(tokens[0], chars("<>\"&\u{00A0}"));
}

#[test]
fn test_numeric_references() {
    let tokens = tokenize("&#65;&#x42;&#X43;&#x1F600;");
    assert_eq!(tokens[0], chars("ABC\u{1F600}"));
}

#[test]
fn test_unknown_reference_passes_through() {
    let (tokens, errors) = tokenize_with_errors("&notarealentity;");
    assert_eq!(tokens, vec![chars("&notarealentity;"), Token::EndOfFile]);
    assert_eq!(errors, vec![ParseError::UnknownNamedCharacterReference]);
}

#[test]
fn test_legacy_reference_without_semicolon() {
    let (tokens, errors) = tokenize_with_errors("&amp x");
    assert_eq!(tokens[0], chars("& x"));
    assert_eq!(
        errors,
        vec![ParseError::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_bare_ampersand() {
    let (tokens, errors) = tokenize_with_errors("a & b &");
    assert_eq!(tokens[0], chars("a & b &"));
    assert!(errors.is_empty());
}

#[test]
fn test_reference_in_attribute_values() {
    let tokens = tokenize(r#"<a title="&amp;x" alt='&lt;' data=x&gt;y>"#);
    let attributes = tokens[0].attributes().unwrap();
    assert_eq!(attributes.value("title"), Some("&x"));
    assert_eq!(attributes.value("alt"), Some("<"));
    assert_eq!(attributes.value("data"), Some("x>y"));
}

#[test]
fn test_legacy_reference_in_query_string_is_literal() {
    let (tokens, errors) = tokenize_with_errors(r#"<a href="?a=1&copy=2&not">"#);
    assert_eq!(
        tokens[0].attributes().unwrap().value("href"),
        Some("?a=1&copy=2\u{00AC}")
    );
    assert_eq!(
        errors,
        vec![ParseError::MissingSemicolonAfterCharacterReference]
    );
}

// =============================================================================
// Comments
// =============================================================================

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Comment { data, bogus } => {
            assert_eq!(data, " hello ");
            assert!(!bogus);
        }
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_empty_comments() {
    let (tokens, errors) = tokenize_with_errors("<!---->");
    assert_eq!(tokens[0].data(), Some(""));
    assert!(errors.is_empty());

    let (tokens, errors) = tokenize_with_errors("<!-->");
    assert_eq!(tokens[0].data(), Some(""));
    assert_eq!(errors, vec![ParseError::AbruptClosingOfEmptyComment]);
}

#[test]
fn test_comment_with_dashes() {
    assert_eq!(tokenize("<!--a-b-->")[0].data(), Some("a-b"));
    assert_eq!(tokenize("<!--a---->")[0].data(), Some("a--"));
}

#[test]
fn test_comment_closed_with_bang() {
    let (tokens, errors) = tokenize_with_errors("<!--a--!>");
    assert_eq!(tokens[0].data(), Some("a"));
    assert_eq!(errors, vec![ParseError::IncorrectlyClosedComment]);
}

#[test]
fn test_unterminated_comment() {
    let (tokens, errors) = tokenize_with_errors("<!-- abc");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].data(), Some(" abc"));
    assert!(tokens[1].is_eof());
    assert_eq!(errors, vec![ParseError::EofInComment]);
}

#[test]
fn test_bogus_comments() {
    let (tokens, errors) = tokenize_with_errors(r#"<?xml version="1.0"?>"#);
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: r#"?xml version="1.0"?"#.to_string(),
            bogus: true,
        }
    );
    assert_eq!(
        errors,
        vec![ParseError::UnexpectedQuestionMarkInsteadOfTagName]
    );

    let (tokens, errors) = tokenize_with_errors("<!x>");
    assert_eq!(tokens[0].data(), Some("x"));
    assert_eq!(errors, vec![ParseError::IncorrectlyOpenedComment]);

    let (tokens, _) = tokenize_with_errors("</ x>");
    assert_eq!(tokens[0].data(), Some(" x"));
}

// =============================================================================
// DOCTYPE
// =============================================================================

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_with_identifiers() {
    let (tokens, errors) = tokenize_with_errors(
        r#"<!doctype HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" 'http://www.w3.org/TR/html4/strict.dtd'>"#,
    );
    assert_eq!(
        tokens[0],
        Token::Doctype {
            name: Some("html".to_string()),
            public_identifier: Some("-//W3C//DTD HTML 4.01//EN".to_string()),
            system_identifier: Some("http://www.w3.org/TR/html4/strict.dtd".to_string()),
            force_quirks: false,
        }
    );
    assert!(errors.is_empty());
}

#[test]
fn test_doctype_system_only() {
    let tokens = tokenize(r#"<!DOCTYPE html SYSTEM "about:legacy-compat">"#);
    match &tokens[0] {
        Token::Doctype {
            public_identifier,
            system_identifier,
            ..
        } => {
            assert_eq!(public_identifier.as_deref(), None);
            assert_eq!(system_identifier.as_deref(), Some("about:legacy-compat"));
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_errors_force_quirks() {
    let (tokens, errors) = tokenize_with_errors("<!DOCTYPE>");
    assert!(matches!(
        &tokens[0],
        Token::Doctype { name: None, force_quirks: true, .. }
    ));
    assert_eq!(errors, vec![ParseError::MissingDoctypeName]);

    let (tokens, errors) = tokenize_with_errors("<!DOCTYPE html");
    assert!(matches!(&tokens[0], Token::Doctype { force_quirks: true, .. }));
    assert!(tokens[1].is_eof());
    assert_eq!(errors, vec![ParseError::EofInDoctype]);

    let (tokens, errors) = tokenize_with_errors("<!DOCTYPE html bogus>");
    assert!(matches!(&tokens[0], Token::Doctype { force_quirks: true, .. }));
    assert_eq!(
        errors,
        vec![ParseError::InvalidCharacterSequenceAfterDoctypeName]
    );

    let (tokens, errors) = tokenize_with_errors(r#"<!DOCTYPE html PUBLIC "abc>"#);
    assert!(matches!(&tokens[0], Token::Doctype { force_quirks: true, .. }));
    assert_eq!(errors, vec![ParseError::AbruptDoctypePublicIdentifier]);
}

#[test]
fn test_doctype_missing_whitespace_before_name() {
    let (tokens, errors) = tokenize_with_errors("<!DOCTYPEhtml>");
    match &tokens[0] {
        Token::Doctype { name, .. } => assert_eq!(name.as_deref(), Some("html")),
        _ => panic!("Expected DOCTYPE token"),
    }
    assert_eq!(errors, vec![ParseError::MissingWhitespaceBeforeDoctypeName]);
}

#[test]
fn test_junk_after_system_identifier_keeps_quirks_off() {
    let (tokens, errors) = tokenize_with_errors(r#"<!DOCTYPE html SYSTEM "x" junk>"#);
    assert!(matches!(&tokens[0], Token::Doctype { force_quirks: false, .. }));
    assert_eq!(
        errors,
        vec![ParseError::UnexpectedCharacterAfterDoctypeSystemIdentifier]
    );
}

// =============================================================================
// CDATA
// =============================================================================

#[test]
fn test_cdata_section() {
    let tokens = tokenize("<![CDATA[x<y&amp;]]>z");
    assert_eq!(
        tokens,
        vec![
            Token::CData {
                data: "x<y&amp;".to_string()
            },
            chars("z"),
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_unterminated_cdata_section() {
    let (tokens, errors) = tokenize_with_errors("<![CDATA[abc");
    assert_eq!(tokens[0].data(), Some("abc"));
    assert_eq!(errors, vec![ParseError::EofInCdata]);
}

// =============================================================================
// Content models
// =============================================================================

#[test]
fn test_title_keeps_markup_as_text() {
    let tokens = tokenize("<title>a<b>c</title>");
    assert_eq!(tokens.len(), 4);
    assert!(tokens[0].is_start_tag("title"));
    assert_eq!(tokens[1], chars("a<b>c"));
    assert!(tokens[2].is_end_tag("title"));
    assert!(tokens[3].is_eof());
}

#[test]
fn test_rcdata_decodes_references() {
    let tokens = tokenize("<textarea>&lt;b&gt;</textarea>");
    assert_eq!(tokens[1], chars("<b>"));
    assert!(tokens[2].is_end_tag("textarea"));
}

#[test]
fn test_rcdata_without_end_tag_is_closed_early() {
    let tokens = tokenize("<title>a<b>c");
    assert!(tokens[0].is_start_tag("title"));
    assert_eq!(tokens[1], chars("a"));
    assert!(tokens[2].is_end_tag("title"));
    assert!(tokens[3].is_start_tag("b"));
    assert_eq!(tokens[4], chars("c"));
    assert!(tokens[5].is_eof());
}

#[test]
fn test_rawtext_ignores_other_end_tags() {
    let tokens = tokenize("<style>p > a { }</b></STYLE>");
    assert!(tokens[0].is_start_tag("style"));
    assert_eq!(tokens[1], chars("p > a { }</b>"));
    assert!(tokens[2].is_end_tag("style"));
}

#[test]
fn test_rawtext_keeps_references_literal() {
    let tokens = tokenize("<style>&amp;</style>");
    assert_eq!(tokens[1], chars("&amp;"));
}

#[test]
fn test_script_data() {
    let tokens = tokenize("<script>if (a<b) x</script>");
    assert!(tokens[0].is_start_tag("script"));
    assert_eq!(tokens[1], chars("if (a<b) x"));
    assert!(tokens[2].is_end_tag("script"));
    assert!(tokens[3].is_eof());
}

#[test]
fn test_script_data_double_escaped() {
    let tokens = tokenize("<script><!--<script>x</script>--></script>");
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[1], chars("<!--<script>x</script>-->"));
    assert!(tokens[2].is_end_tag("script"));
}

#[test]
fn test_script_data_escaped_end_tag() {
    let tokens = tokenize("<script><!-- a </script>b");
    assert_eq!(tokens[1], chars("<!-- a "));
    assert!(tokens[2].is_end_tag("script"));
    assert_eq!(tokens[3], chars("b"));
}

#[test]
fn test_eof_in_escaped_script() {
    let (tokens, errors) = tokenize_with_errors("<script><!-- a");
    assert_eq!(tokens[1], chars("<!-- a"));
    assert!(tokens[2].is_eof());
    assert_eq!(errors, vec![ParseError::EofInScriptHtmlCommentLikeText]);
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize("<plaintext>a</plaintext><b>");
    assert_eq!(tokens[1], chars("a</plaintext><b>"));
    assert!(tokens[2].is_eof());
}

#[test]
fn test_self_closing_title_does_not_switch() {
    let tokens = tokenize("<title/><b>");
    assert!(tokens[1].is_start_tag("b"));
}

#[test]
fn test_content_model_switching_can_be_disabled() {
    let config = TokenizerConfig {
        switch_content_models: false,
        ..TokenizerConfig::default()
    };
    let tokens: Vec<Token> = Tokenizer::with_config("<title><b></title>", config).collect();
    assert!(tokens[0].is_start_tag("title"));
    assert!(tokens[1].is_start_tag("b"));
    assert!(tokens[2].is_end_tag("title"));
}

#[test]
fn test_caller_driven_transition() {
    let config = TokenizerConfig {
        switch_content_models: false,
        ..TokenizerConfig::default()
    };
    let mut tokenizer = Tokenizer::with_config("<x>a<y></x>", config);
    assert!(tokenizer.next_token().is_start_tag("x"));
    tokenizer.transition(TokenizerState::Rawtext);
    assert_eq!(tokenizer.next_token(), chars("a<y>"));
    assert!(tokenizer.next_token().is_end_tag("x"));
    assert_eq!(tokenizer.state(), TokenizerState::Data);
}

#[test]
fn test_initial_state_and_last_start_tag() {
    let config = TokenizerConfig {
        initial_state: TokenizerState::Rcdata,
        last_start_tag: Some("TEXTAREA".to_string()),
        ..TokenizerConfig::default()
    };
    let tokens: Vec<Token> = Tokenizer::with_config("a<b></textarea>", config).collect();
    assert_eq!(tokens[0], chars("a<b>"));
    assert!(tokens[1].is_end_tag("textarea"));
    assert!(tokens[2].is_eof());
}

#[test]
fn test_textarea_full_of_lt_letter_pairs_scales_linearly() {
    // Every `<a` asks whether `</textarea` is still ahead.
    let n = 150_000;
    let input = format!("<textarea>{}</textarea>", "<a".repeat(n));
    let start = Instant::now();
    let tokens = tokenize(&input);
    let elapsed = start.elapsed();

    assert_eq!(tokens.len(), 4);
    assert!(tokens[0].is_start_tag("textarea"));
    assert_eq!(tokens[1].data().map(str::len), Some(2 * n));
    assert!(tokens[2].is_end_tag("textarea"));
    assert!(elapsed < Duration::from_secs(5), "took {elapsed:?}");
}

// =============================================================================
// Per-state NUL, EOF and anything-else handling
// =============================================================================

/// Tokenize `input` starting in `state`, returning tokens and error codes.
fn tokenize_from(state: TokenizerState, input: &str) -> (Vec<Token>, Vec<ParseError>) {
    let config = TokenizerConfig {
        initial_state: state,
        ..TokenizerConfig::default()
    };
    let mut tokenizer = Tokenizer::with_config(input, config);
    let tokens: Vec<Token> = tokenizer.by_ref().collect();
    let errors = tokenizer.errors().iter().map(|record| record.kind).collect();
    (tokens, errors)
}

fn start_tag(name: &str, attributes: &[(&str, Option<&str>)]) -> Token {
    let attributes: Vec<Attribute> = attributes
        .iter()
        .map(|(name, value)| Attribute::new(*name, value.map(str::to_string)))
        .collect();
    Token::StartTag {
        name: Arc::from(name),
        self_closing: false,
        attributes: Attributes::from(attributes),
    }
}

fn comment(data: &str, bogus: bool) -> Token {
    Token::Comment {
        data: data.to_string(),
        bogus,
    }
}

fn doctype(
    name: Option<&str>,
    public_identifier: Option<&str>,
    system_identifier: Option<&str>,
    force_quirks: bool,
) -> Token {
    Token::Doctype {
        name: name.map(str::to_string),
        public_identifier: public_identifier.map(str::to_string),
        system_identifier: system_identifier.map(str::to_string),
        force_quirks,
    }
}

type Case = (TokenizerState, &'static str, Vec<Token>, Vec<ParseError>);

fn check_cases(cases: &[Case]) {
    for (state, input, tokens, errors) in cases {
        let (actual_tokens, actual_errors) = tokenize_from(*state, input);
        assert_eq!(&actual_tokens, tokens, "tokens for {input:?} in {state}");
        assert_eq!(&actual_errors, errors, "errors for {input:?} in {state}");
    }
}

#[test]
fn test_text_states_replace_null() {
    use ParseError::{
        EofInScriptHtmlCommentLikeText as EofInScript, UnexpectedNullCharacter as Null,
    };
    use TokenizerState as S;

    let replaced = || vec![chars("a\u{FFFD}b"), Token::EndOfFile];
    let dash_replaced = || vec![chars("\u{FFFD}b"), Token::EndOfFile];
    check_cases(&[
        (S::Rcdata, "a\0b", replaced(), vec![Null]),
        (S::Rawtext, "a\0b", replaced(), vec![Null]),
        (S::ScriptData, "a\0b", replaced(), vec![Null]),
        (S::Plaintext, "a\0b", replaced(), vec![Null]),
        (S::ScriptDataEscaped, "a\0b", replaced(), vec![Null, EofInScript]),
        (S::ScriptDataEscapedDash, "\0b", dash_replaced(), vec![Null, EofInScript]),
        (S::ScriptDataEscapedDashDash, "\0b", dash_replaced(), vec![Null, EofInScript]),
        (S::ScriptDataDoubleEscaped, "a\0b", replaced(), vec![Null, EofInScript]),
        (S::ScriptDataDoubleEscapedDash, "\0b", dash_replaced(), vec![Null, EofInScript]),
        (S::ScriptDataDoubleEscapedDashDash, "\0b", dash_replaced(), vec![Null, EofInScript]),
    ]);
}

#[test]
fn test_text_states_at_eof_and_plain_text() {
    use ParseError::EofInScriptHtmlCommentLikeText as EofInScript;
    use TokenizerState as S;

    let eof = || vec![Token::EndOfFile];
    let text = || vec![chars("ab"), Token::EndOfFile];
    check_cases(&[
        (S::Rcdata, "", eof(), vec![]),
        (S::Rawtext, "", eof(), vec![]),
        (S::ScriptData, "", eof(), vec![]),
        (S::Plaintext, "", eof(), vec![]),
        (S::ScriptDataEscaped, "", eof(), vec![EofInScript]),
        (S::ScriptDataEscapedDash, "", eof(), vec![EofInScript]),
        (S::ScriptDataDoubleEscapedDashDash, "", eof(), vec![EofInScript]),
        (S::Rcdata, "ab", text(), vec![]),
        (S::Rawtext, "ab", text(), vec![]),
        (S::ScriptData, "ab", text(), vec![]),
        (S::Plaintext, "ab", text(), vec![]),
        (S::ScriptDataEscaped, "ab", text(), vec![EofInScript]),
        (S::ScriptDataDoubleEscaped, "ab", text(), vec![EofInScript]),
    ]);
}

#[test]
fn test_tag_states_replace_null() {
    use ParseError::{EofInTag, UnexpectedNullCharacter as Null};
    use TokenizerState as S;

    check_cases(&[
        (
            S::TagName,
            "a\0b>",
            vec![start_tag("a\u{FFFD}b", &[]), Token::EndOfFile],
            vec![Null],
        ),
        (
            S::AttributeName,
            "a\0b>",
            vec![start_tag("", &[("a\u{FFFD}b", None)]), Token::EndOfFile],
            vec![Null],
        ),
        (
            S::Data,
            "<p a=\"x\0y\">",
            vec![start_tag("p", &[("a", Some("x\u{FFFD}y"))]), Token::EndOfFile],
            vec![Null],
        ),
        (
            S::Data,
            "<p a='x\0y'>",
            vec![start_tag("p", &[("a", Some("x\u{FFFD}y"))]), Token::EndOfFile],
            vec![Null],
        ),
        (
            S::Data,
            "<p a=x\0y>",
            vec![start_tag("p", &[("a", Some("x\u{FFFD}y"))]), Token::EndOfFile],
            vec![Null],
        ),
        (S::TagName, "a", vec![Token::EndOfFile], vec![EofInTag]),
        (S::AttributeName, "a", vec![Token::EndOfFile], vec![EofInTag]),
        (S::Data, "<p a='x", vec![Token::EndOfFile], vec![EofInTag]),
        (S::Data, "<p a=x", vec![Token::EndOfFile], vec![EofInTag]),
    ]);
}

#[test]
fn test_comment_states() {
    use ParseError::{
        EofInComment, UnexpectedNullCharacter as Null, UnexpectedQuestionMarkInsteadOfTagName,
    };
    use TokenizerState as S;

    check_cases(&[
        (
            S::Comment,
            "a\0b-->",
            vec![comment("a\u{FFFD}b", false), Token::EndOfFile],
            vec![Null],
        ),
        (
            S::Comment,
            "a",
            vec![comment("a", false), Token::EndOfFile],
            vec![EofInComment],
        ),
        (
            S::Data,
            "<?a\0b>",
            vec![comment("?a\u{FFFD}b", true), Token::EndOfFile],
            vec![UnexpectedQuestionMarkInsteadOfTagName, Null],
        ),
        // A bogus comment simply ends at EOF.
        (
            S::Data,
            "<?a",
            vec![comment("?a", true), Token::EndOfFile],
            vec![UnexpectedQuestionMarkInsteadOfTagName],
        ),
    ]);
}

#[test]
fn test_doctype_states_replace_null() {
    use ParseError::UnexpectedNullCharacter as Null;
    use TokenizerState as S;

    let eof = Token::EndOfFile;
    check_cases(&[
        (
            S::BeforeDoctypeName,
            "\0x>",
            vec![doctype(Some("\u{FFFD}x"), None, None, false), eof.clone()],
            vec![Null],
        ),
        (
            S::DoctypeName,
            "a\0b>",
            vec![doctype(Some("a\u{FFFD}b"), None, None, false), eof.clone()],
            vec![Null],
        ),
        (
            S::DoctypePublicIdentifierDoubleQuoted,
            "a\0b\">",
            vec![doctype(None, Some("a\u{FFFD}b"), None, false), eof.clone()],
            vec![Null],
        ),
        (
            S::DoctypePublicIdentifierSingleQuoted,
            "a\0b'>",
            vec![doctype(None, Some("a\u{FFFD}b"), None, false), eof.clone()],
            vec![Null],
        ),
        (
            S::DoctypeSystemIdentifierDoubleQuoted,
            "a\0b\">",
            vec![doctype(None, None, Some("a\u{FFFD}b"), false), eof.clone()],
            vec![Null],
        ),
        (
            S::DoctypeSystemIdentifierSingleQuoted,
            "a\0b'>",
            vec![doctype(None, None, Some("a\u{FFFD}b"), false), eof.clone()],
            vec![Null],
        ),
        // NUL is dropped from a bogus DOCTYPE.
        (
            S::BogusDoctype,
            "\0>",
            vec![doctype(None, None, None, false), eof],
            vec![Null],
        ),
    ]);
}

#[test]
fn test_doctype_states_at_eof() {
    use ParseError::EofInDoctype;
    use TokenizerState as S;

    let quirky = || vec![doctype(None, None, None, true), Token::EndOfFile];
    check_cases(&[
        (S::Doctype, "", quirky(), vec![EofInDoctype]),
        (S::BeforeDoctypeName, "", quirky(), vec![EofInDoctype]),
        (S::AfterDoctypeName, "", quirky(), vec![EofInDoctype]),
        (S::AfterDoctypePublicKeyword, "", quirky(), vec![EofInDoctype]),
        (S::BeforeDoctypePublicIdentifier, "", quirky(), vec![EofInDoctype]),
        (S::AfterDoctypePublicIdentifier, "", quirky(), vec![EofInDoctype]),
        (S::AfterDoctypeSystemKeyword, "", quirky(), vec![EofInDoctype]),
        (S::AfterDoctypeSystemIdentifier, "", quirky(), vec![EofInDoctype]),
        (
            S::DoctypeName,
            "a",
            vec![doctype(Some("a"), None, None, true), Token::EndOfFile],
            vec![EofInDoctype],
        ),
        (
            S::DoctypePublicIdentifierDoubleQuoted,
            "a",
            vec![doctype(None, Some("a"), None, true), Token::EndOfFile],
            vec![EofInDoctype],
        ),
        (
            S::DoctypePublicIdentifierSingleQuoted,
            "a",
            vec![doctype(None, Some("a"), None, true), Token::EndOfFile],
            vec![EofInDoctype],
        ),
        (
            S::DoctypeSystemIdentifierDoubleQuoted,
            "a",
            vec![doctype(None, None, Some("a"), true), Token::EndOfFile],
            vec![EofInDoctype],
        ),
        (
            S::DoctypeSystemIdentifierSingleQuoted,
            "a",
            vec![doctype(None, None, Some("a"), true), Token::EndOfFile],
            vec![EofInDoctype],
        ),
        // The bogus DOCTYPE state emits what it has, with no error.
        (
            S::BogusDoctype,
            "",
            vec![doctype(None, None, None, false), Token::EndOfFile],
            vec![],
        ),
    ]);
}

#[test]
fn test_doctype_states_anything_else() {
    use ParseError::{
        AbruptDoctypePublicIdentifier, AbruptDoctypeSystemIdentifier,
        MissingQuoteBeforeDoctypePublicIdentifier, MissingQuoteBeforeDoctypeSystemIdentifier,
        UnexpectedCharacterAfterDoctypeSystemIdentifier,
    };
    use TokenizerState as S;

    let quirky = || vec![doctype(None, None, None, true), Token::EndOfFile];
    check_cases(&[
        (
            S::AfterDoctypePublicKeyword,
            "x>",
            quirky(),
            vec![MissingQuoteBeforeDoctypePublicIdentifier],
        ),
        (
            S::BeforeDoctypePublicIdentifier,
            "x>",
            quirky(),
            vec![MissingQuoteBeforeDoctypePublicIdentifier],
        ),
        (
            S::AfterDoctypeSystemKeyword,
            "x>",
            quirky(),
            vec![MissingQuoteBeforeDoctypeSystemIdentifier],
        ),
        (
            S::DoctypePublicIdentifierDoubleQuoted,
            "a>",
            vec![doctype(None, Some("a"), None, true), Token::EndOfFile],
            vec![AbruptDoctypePublicIdentifier],
        ),
        (
            S::DoctypeSystemIdentifierSingleQuoted,
            "a>",
            vec![doctype(None, None, Some("a"), true), Token::EndOfFile],
            vec![AbruptDoctypeSystemIdentifier],
        ),
        // Trailing junk does not set force-quirks.
        (
            S::AfterDoctypeSystemIdentifier,
            "x>",
            vec![doctype(None, None, None, false), Token::EndOfFile],
            vec![UnexpectedCharacterAfterDoctypeSystemIdentifier],
        ),
    ]);
}

#[test]
fn test_cdata_section_keeps_null() {
    use ParseError::EofInCdata;
    use TokenizerState as S;

    check_cases(&[
        (
            S::CdataSection,
            "a\0b]]>",
            vec![Token::CData { data: "a\0b".to_string() }, Token::EndOfFile],
            vec![],
        ),
        (
            S::CdataSection,
            "a",
            vec![Token::CData { data: "a".to_string() }, Token::EndOfFile],
            vec![EofInCdata],
        ),
    ]);
}

// =============================================================================
// Errors, logging and serialization
// =============================================================================

#[test]
fn test_error_cap() {
    let config = TokenizerConfig {
        max_errors: 2,
        ..TokenizerConfig::default()
    };
    let mut tokenizer = Tokenizer::with_config("\0\0\0\0", config);
    let _ = tokenizer.by_ref().count();
    assert_eq!(tokenizer.errors().len(), 2);
}

#[test]
fn test_echo_errors_through_warnings() {
    let config = TokenizerConfig {
        echo_errors: true,
        ..TokenizerConfig::default()
    };
    let mut tokenizer = Tokenizer::with_config("<!DOCTYPE>", config);
    let _ = tokenizer.by_ref().count();
    assert!(wren_common::warning::has_warned(
        "HTML Tokenizer",
        "missing-doctype-name in BeforeDoctypeName state"
    ));
}

#[test]
fn test_token_json() {
    let tokens = tokenize(r#"<input disabled value="x">"#);
    let json = serde_json::to_value(&tokens[0]).unwrap();
    assert_eq!(json["type"], "StartTag");
    assert_eq!(json["name"], "input");
    assert_eq!(json["attributes"][0]["name"], "disabled");
    assert!(json["attributes"][0]["value"].is_null());
    assert_eq!(json["attributes"][1]["value"], "x");

    let json = serde_json::to_value(&tokens[1]).unwrap();
    assert_eq!(json["type"], "EndOfFile");
}

#[test]
fn test_token_display() {
    let rendered: Vec<String> = tokenize(r#"<!DOCTYPE html><p class="a" hidden>Hi</p><!--c-->"#)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        rendered,
        vec![
            "<!DOCTYPE html>",
            r#"<p class="a" hidden>"#,
            "\"Hi\"",
            "</p>",
            "<!--c-->",
            "EOF",
        ]
    );
}

// =============================================================================
// Termination
// =============================================================================

fn assert_single_eof(tokens: &[Token]) {
    assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
    assert!(tokens.last().is_some_and(Token::is_eof));
}

#[test]
fn test_edge_inputs_end_with_one_eof() {
    for input in ["", "\0", "<", "<!", "<!-", "<!--", "</", "<a", "<a b", "<a b=", "&", "&#", "&#x"]
    {
        assert_single_eof(&tokenize(input));
    }
}

#[test]
fn test_every_state_terminates() {
    let inputs = [
        "", "\0", "a", "<", "</", "-", "-->", "--!", "!", "\"", "'", ">", "/", "&", "=",
        " x", "script>", "]]>", "<!--", "</title>", "PUBLIC", "SYSTEM",
    ];
    for state in TokenizerState::iter() {
        for input in inputs {
            let config = TokenizerConfig {
                initial_state: state,
                last_start_tag: Some("title".to_string()),
                ..TokenizerConfig::default()
            };
            let tokens: Vec<Token> = Tokenizer::with_config(input, config).collect();
            assert_single_eof(&tokens);
        }
    }
}

#[test]
fn test_eof_token_repeats() {
    let mut tokenizer = Tokenizer::new("<p>");
    let _ = tokenizer.by_ref().count();
    assert!(tokenizer.next_token().is_eof());
    assert!(tokenizer.next_token().is_eof());
}

#[quickcheck]
fn prop_arbitrary_input_ends_with_one_eof(input: String) -> bool {
    let tokens: Vec<Token> = Tokenizer::new(&input).collect();
    tokens.iter().filter(|t| t.is_eof()).count() == 1 && tokens.last().is_some_and(Token::is_eof)
}

/// Markup-heavy input: every byte picks one character from an alphabet
/// that reaches the tag, comment, DOCTYPE, reference and script states.
#[quickcheck]
fn prop_markup_input_ends_with_one_eof(prefix: u8, picks: Vec<u8>) -> bool {
    const PREFIXES: [&str; 6] = ["", "<script>", "<title>", "<style>", "<!DOCTYPE ", "<plaintext>"];
    const ALPHABET: [char; 28] = [
        '<', '>', '/', '!', '-', '&', '#', 'x', ';', 'a', 's', 'c', 'r', 'i', 'p', 't', '=',
        '"', '\'', ' ', '\0', '?', '[', ']', 'D', 'C', 'A', '9',
    ];

    let mut input = PREFIXES[usize::from(prefix) % PREFIXES.len()].to_string();
    input.extend(
        picks
            .iter()
            .map(|&pick| ALPHABET[usize::from(pick) % ALPHABET.len()]),
    );

    let tokens: Vec<Token> = Tokenizer::new(&input).collect();
    tokens.iter().filter(|t| t.is_eof()).count() == 1 && tokens.last().is_some_and(Token::is_eof)
}

#[quickcheck]
fn prop_plain_text_round_trips(input: String) -> bool {
    let text: String = input
        .chars()
        .filter(|c| !matches!(c, '<' | '&' | '\0'))
        .collect();
    let tokens: Vec<Token> = Tokenizer::new(&text).collect();
    if text.is_empty() {
        tokens == vec![Token::EndOfFile]
    } else {
        tokens == vec![Token::new_character(text.clone()), Token::EndOfFile]
    }
}
