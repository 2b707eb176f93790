use core::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::cache::StringCache;

/// Default cap on the number of attributes kept per tag.
pub const DEFAULT_MAX_ATTRIBUTES: usize = 512;

/// An attribute on a start or end tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
///
/// A value of `None` marks a boolean attribute written without `=`
/// (`<input disabled>`), which is distinct from an explicitly empty value
/// (`<input value="">` or `<input value=>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: Arc<str>,
    /// "and a value"
    pub value: Option<String>,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The value, with a boolean attribute reading as the empty string.
    #[must_use]
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Returns true if the attribute was written without a value.
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        self.value.is_none()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}=\"{value}\"", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The ordered attribute list of a tag.
///
/// Source order is preserved and duplicate names are kept; lookups return
/// the first occurrence, which is the one a tree builder honours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    /// An empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of attributes, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First attribute named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.0.iter().find(|attr| &*attr.name == name)
    }

    /// Value of the first attribute named `name`. A boolean attribute
    /// yields `Some("")`.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(Attribute::value_or_empty)
    }

    /// Returns true if an attribute named `name` is present.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    /// Append an attribute, keeping any earlier one with the same name.
    pub fn push(&mut self, attribute: Attribute) {
        self.0.push(attribute);
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Attribute>> for Attributes {
    fn from(attributes: Vec<Attribute>) -> Self {
        Self(attributes)
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "The output of the tokenization step is a series of zero or more of the following
/// tokens: DOCTYPE, start tag, end tag, comment, character, end-of-file."
///
/// Tokens are owned values. The tokenizer builds them in reusable builders
/// and hands out a fresh value on every emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Token {
    /// "DOCTYPE tokens have a name, a public identifier, a system identifier,
    /// and a force-quirks flag. When a DOCTYPE token is created, its name,
    /// public identifier, and system identifier must be marked as missing
    /// (which is a distinct state from the empty string), and the force-quirks
    /// flag must be set to off (its other state is on)."
    Doctype {
        /// "a name"
        name: Option<String>,
        /// "a public identifier"
        public_identifier: Option<String>,
        /// "a system identifier"
        system_identifier: Option<String>,
        /// "a force-quirks flag"
        force_quirks: bool,
    },

    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes, each of which has a name and a value."
    StartTag {
        /// "a tag name", ASCII-lowercased
        name: Arc<str>,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes"
        attributes: Attributes,
    },

    /// End tag token. Same structure as a start tag; attributes and the
    /// self-closing flag are parse errors here but are still reported.
    EndTag {
        /// "a tag name", ASCII-lowercased
        name: Arc<str>,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes"
        attributes: Attributes,
    },

    /// "Comment and character tokens have data."
    Comment {
        /// "data"
        data: String,
        /// True for comments recovered from malformed markup such as `<?xml ...>`
        /// or `</ foo>`.
        bogus: bool,
    },

    /// A run of adjacent character data, coalesced into one token.
    Character {
        /// "data"
        data: String,
    },

    /// The verbatim content of a `<![CDATA[ ... ]]>` section.
    CData {
        /// Section content, without the delimiters.
        data: String,
    },

    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// Create a character token with the given text.
    #[must_use]
    pub fn new_character(data: impl Into<String>) -> Self {
        Self::Character { data: data.into() }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// Returns true if this is character data.
    #[must_use]
    pub const fn is_character(&self) -> bool {
        matches!(self, Self::Character { .. })
    }

    /// Returns true for a start tag named `name`.
    #[must_use]
    pub fn is_start_tag(&self, name: &str) -> bool {
        matches!(self, Self::StartTag { name: n, .. } if &**n == name)
    }

    /// Returns true for an end tag named `name`.
    #[must_use]
    pub fn is_end_tag(&self, name: &str) -> bool {
        matches!(self, Self::EndTag { name: n, .. } if &**n == name)
    }

    /// Tag name of a start or end tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name, .. } => Some(&**name),
            _ => None,
        }
    }

    /// Attributes of a start or end tag.
    #[must_use]
    pub const fn attributes(&self) -> Option<&Attributes> {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => {
                Some(attributes)
            }
            _ => None,
        }
    }

    /// Text carried by a character, comment or CDATA token.
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        match self {
            Self::Character { data } | Self::Comment { data, .. } | Self::CData { data } => {
                Some(data.as_str())
            }
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                write!(f, "<!DOCTYPE")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                if let Some(pub_id) = public_identifier {
                    write!(f, " PUBLIC \"{pub_id}\"")?;
                }
                if let Some(sys_id) = system_identifier {
                    write!(f, " SYSTEM \"{sys_id}\"")?;
                }
                write!(f, ">")?;
                if *force_quirks {
                    write!(f, " (force-quirks)")?;
                }
                Ok(())
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {attr}")?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name, .. } => write!(f, "</{name}>"),
            Self::Comment { data, .. } => write!(f, "<!--{data}-->"),
            Self::Character { data } => write!(f, "{data:?}"),
            Self::CData { data } => write!(f, "<![CDATA[{data}]]>"),
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}

/// What happened to a pending attribute when it was committed to its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttributeOutcome {
    /// No attribute was pending, or its name was empty.
    Nothing,
    /// Appended to the attribute list.
    Added,
    /// Appended, but an earlier attribute has the same name.
    Duplicate,
    /// Discarded because the tag already holds the maximum.
    Dropped,
}

/// Whether a [`TagBuilder`] produces start or end tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    Start,
    End,
}

/// Accumulates a tag token across many incremental reads.
///
/// "When a start or end tag token is created, its self-closing flag must be
/// unset (its other state is that it be set), and its attributes list must
/// be empty."
#[derive(Debug)]
pub(crate) struct TagBuilder {
    kind: TagKind,
    name: String,
    self_closing: bool,
    attributes: Attributes,
    pending_attribute: bool,
    attr_name: String,
    attr_value: String,
    has_attr_value: bool,
    max_attributes: usize,
}

impl TagBuilder {
    pub(crate) const fn new(kind: TagKind, max_attributes: usize) -> Self {
        Self {
            kind,
            name: String::new(),
            self_closing: false,
            attributes: Attributes::new(),
            pending_attribute: false,
            attr_name: String::new(),
            attr_value: String::new(),
            has_attr_value: false,
            max_attributes,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.name.clear();
        self.self_closing = false;
        self.attributes = Attributes::new();
        self.clear_pending_attribute();
    }

    fn clear_pending_attribute(&mut self) {
        self.pending_attribute = false;
        self.attr_name.clear();
        self.attr_value.clear();
        self.has_attr_value = false;
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    ///
    /// "Append the lowercase version of the current input character to the
    /// current tag token's tag name."
    pub(crate) fn append_tag_name(&mut self, s: &str) {
        push_lowercase(&mut self.name, s);
    }

    pub(crate) fn append_tag_name_char(&mut self, c: char) {
        self.name.push(c.to_ascii_lowercase());
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    ///
    /// "Set the self-closing flag of the current tag token."
    pub(crate) const fn set_self_closing(&mut self) {
        self.self_closing = true;
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    ///
    /// "Start a new attribute in the current tag token."
    ///
    /// Any attribute still pending is committed first.
    pub(crate) fn new_attribute(&mut self, cache: &mut StringCache) -> AttributeOutcome {
        let outcome = self.commit_attribute(cache);
        self.pending_attribute = true;
        outcome
    }

    pub(crate) fn append_attribute_name(&mut self, s: &str) {
        self.pending_attribute = true;
        push_lowercase(&mut self.attr_name, s);
    }

    pub(crate) fn append_attribute_name_char(&mut self, c: char) {
        self.pending_attribute = true;
        self.attr_name.push(c.to_ascii_lowercase());
    }

    pub(crate) fn append_attribute_value(&mut self, s: &str) {
        self.has_attr_value = true;
        self.attr_value.push_str(s);
    }

    pub(crate) fn append_attribute_value_char(&mut self, c: char) {
        self.has_attr_value = true;
        self.attr_value.push(c);
    }

    /// The pending attribute's value, for appending decoded references.
    pub(crate) fn attribute_value_mut(&mut self) -> &mut String {
        self.has_attr_value = true;
        &mut self.attr_value
    }

    /// Seeing `=` gives the pending attribute a value, possibly empty.
    pub(crate) const fn set_empty_attribute_value(&mut self) {
        self.has_attr_value = true;
    }

    /// Move the pending attribute into the attribute list.
    pub(crate) fn commit_attribute(&mut self, cache: &mut StringCache) -> AttributeOutcome {
        if !self.pending_attribute || self.attr_name.is_empty() {
            self.clear_pending_attribute();
            return AttributeOutcome::Nothing;
        }
        if self.attributes.len() >= self.max_attributes {
            self.clear_pending_attribute();
            return AttributeOutcome::Dropped;
        }

        let duplicate = self.attributes.has(&self.attr_name);
        let value = self
            .has_attr_value
            .then(|| std::mem::take(&mut self.attr_value));
        self.attributes
            .push(Attribute::new(cache.get(&self.attr_name), value));
        self.clear_pending_attribute();

        if duplicate {
            AttributeOutcome::Duplicate
        } else {
            AttributeOutcome::Added
        }
    }

    /// Returns true if the tag has (or is building) any attribute.
    pub(crate) fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub(crate) const fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Produce the token. The pending attribute must already be committed.
    pub(crate) fn build(&mut self, cache: &mut StringCache) -> Token {
        let name = cache.get(&self.name);
        let attributes = std::mem::take(&mut self.attributes);
        let self_closing = self.self_closing;
        self.reset();
        match self.kind {
            TagKind::Start => Token::StartTag {
                name,
                self_closing,
                attributes,
            },
            TagKind::End => Token::EndTag {
                name,
                self_closing,
                attributes,
            },
        }
    }
}

/// Accumulates comment data.
#[derive(Debug, Default)]
pub(crate) struct CommentBuilder {
    data: String,
    bogus: bool,
}

impl CommentBuilder {
    pub(crate) fn reset(&mut self, bogus: bool) {
        self.data.clear();
        self.bogus = bogus;
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    ///
    /// "Append the current input character to the comment token's data."
    pub(crate) fn push(&mut self, c: char) {
        self.data.push(c);
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.data.push_str(s);
    }

    pub(crate) fn build(&mut self) -> Token {
        Token::Comment {
            data: std::mem::take(&mut self.data),
            bogus: self.bogus,
        }
    }
}

/// Accumulates a DOCTYPE token.
#[derive(Debug, Default)]
pub(crate) struct DoctypeBuilder {
    name: Option<String>,
    public_identifier: Option<String>,
    system_identifier: Option<String>,
    force_quirks: bool,
}

impl DoctypeBuilder {
    /// "When a DOCTYPE token is created, its name, public identifier, and system
    /// identifier must be marked as missing (which is a distinct state from the
    /// empty string), and the force-quirks flag must be set to off."
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    ///
    /// "Append the lowercase version of the current input character to the
    /// current DOCTYPE token's name."
    pub(crate) fn append_name(&mut self, s: &str) {
        push_lowercase(self.name.get_or_insert_with(String::new), s);
    }

    pub(crate) fn append_name_char(&mut self, c: char) {
        self.name
            .get_or_insert_with(String::new)
            .push(c.to_ascii_lowercase());
    }

    /// "Set the current DOCTYPE token's public identifier to the empty string
    /// (not missing)"
    pub(crate) fn start_public_identifier(&mut self) {
        self.public_identifier = Some(String::new());
    }

    pub(crate) fn append_public_identifier(&mut self, s: &str) {
        self.public_identifier
            .get_or_insert_with(String::new)
            .push_str(s);
    }

    /// "Set the current DOCTYPE token's system identifier to the empty string
    /// (not missing)"
    pub(crate) fn start_system_identifier(&mut self) {
        self.system_identifier = Some(String::new());
    }

    pub(crate) fn append_system_identifier(&mut self, s: &str) {
        self.system_identifier
            .get_or_insert_with(String::new)
            .push_str(s);
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on."
    pub(crate) const fn set_force_quirks(&mut self) {
        self.force_quirks = true;
    }

    pub(crate) fn build(&mut self) -> Token {
        let doctype = std::mem::take(self);
        Token::Doctype {
            name: doctype.name,
            public_identifier: doctype.public_identifier,
            system_identifier: doctype.system_identifier,
            force_quirks: doctype.force_quirks,
        }
    }
}

fn push_lowercase(target: &mut String, s: &str) {
    target.extend(s.chars().map(|c| c.to_ascii_lowercase()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_vs_empty_attribute() {
        let mut cache = StringCache::default();
        let mut tag = TagBuilder::new(TagKind::Start, DEFAULT_MAX_ATTRIBUTES);
        tag.append_tag_name("INPUT");
        let _ = tag.new_attribute(&mut cache);
        tag.append_attribute_name("disabled");
        let _ = tag.new_attribute(&mut cache);
        tag.append_attribute_name("value");
        tag.set_empty_attribute_value();
        let _ = tag.commit_attribute(&mut cache);

        let token = tag.build(&mut cache);
        assert!(token.is_start_tag("input"));
        let attrs = token.attributes().unwrap();
        assert_eq!(attrs.get("disabled").unwrap().value, None);
        assert_eq!(attrs.get("value").unwrap().value.as_deref(), Some(""));
        assert_eq!(attrs.value("disabled"), Some(""));
    }

    #[test]
    fn test_duplicate_attribute_kept_first_wins() {
        let mut cache = StringCache::default();
        let mut tag = TagBuilder::new(TagKind::Start, DEFAULT_MAX_ATTRIBUTES);
        tag.append_tag_name("a");
        tag.append_attribute_name("href");
        tag.append_attribute_value("one");
        assert_eq!(tag.commit_attribute(&mut cache), AttributeOutcome::Added);
        tag.append_attribute_name("HREF");
        tag.append_attribute_value("two");
        assert_eq!(
            tag.commit_attribute(&mut cache),
            AttributeOutcome::Duplicate
        );

        let token = tag.build(&mut cache);
        let attrs = token.attributes().unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.value("href"), Some("one"));
    }

    #[test]
    fn test_attribute_cap_drops_excess() {
        let mut cache = StringCache::default();
        let mut tag = TagBuilder::new(TagKind::Start, 2);
        for name in ["a", "b", "c"] {
            tag.append_attribute_name(name);
            let _ = tag.commit_attribute(&mut cache);
        }
        tag.append_attribute_name("d");
        assert_eq!(tag.commit_attribute(&mut cache), AttributeOutcome::Dropped);
        assert_eq!(tag.build(&mut cache).attributes().unwrap().len(), 2);
    }

    #[test]
    fn test_builder_is_reset_after_build() {
        let mut cache = StringCache::default();
        let mut tag = TagBuilder::new(TagKind::End, DEFAULT_MAX_ATTRIBUTES);
        tag.append_tag_name("div");
        tag.set_self_closing();
        let _ = tag.build(&mut cache);
        assert_eq!(tag.name(), "");
        assert!(!tag.is_self_closing());
        assert!(!tag.has_attributes());
    }

    #[test]
    fn test_doctype_missing_vs_empty() {
        let mut doctype = DoctypeBuilder::default();
        doctype.append_name("HTML");
        doctype.start_system_identifier();
        match doctype.build() {
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                assert_eq!(name.as_deref(), Some("html"));
                assert_eq!(public_identifier, None);
                assert_eq!(system_identifier.as_deref(), Some(""));
                assert!(!force_quirks);
            }
            other => panic!("expected doctype, got {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        let token = Token::StartTag {
            name: Arc::from("p"),
            self_closing: false,
            attributes: vec![
                Attribute::new("class", Some("a".to_string())),
                Attribute::new("hidden", None),
            ]
            .into(),
        };
        assert_eq!(token.to_string(), "<p class=\"a\" hidden>");
        assert_eq!(Token::new_character("Hi").to_string(), "\"Hi\"");
        assert_eq!(Token::EndOfFile.to_string(), "EOF");
    }
}
