//! Character stream feeding the tokenizer.
//!
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
//!
//! "The input stream consists of the characters pushed into it as the input
//! byte stream is decoded or from the various APIs that directly manipulate
//! the input stream."
//!
//! The stream is a cursor over already-decoded text. Positions are UTF-8
//! byte offsets into the source and always fall on a char boundary. Bulk
//! `consume_*` operations return slices borrowed from the source itself
//! (lifetime `'a`), not from the stream, so a caller may hold a consumed
//! slice while continuing to drive the stream.

use std::sync::Arc;

use super::cache::StringCache;

/// Characters that end a tag name run.
const TAG_NAME_TERMINATORS: &[char] = &['\t', '\n', '\r', '\x0C', ' ', '/', '>', '\0'];

/// Lookahead-capable cursor over the tokenizer input.
#[derive(Debug)]
pub struct CharacterStream<'a> {
    input: &'a str,
    pos: usize,
    mark: Option<usize>,
    cache: StringCache,
    lookahead: Option<Lookahead>,
}

/// Result of the last [`CharacterStream::contains_ignore_case`] scan.
#[derive(Debug)]
struct Lookahead {
    target: String,
    lower: Found,
    upper: Found,
}

/// Where a forward search starting at `from` found its needle.
#[derive(Debug, Clone, Copy)]
struct Found {
    from: usize,
    at: Option<usize>,
}

impl Found {
    fn search(input: &str, from: usize, needle: &str) -> Self {
        Self {
            from,
            at: input[from..].find(needle).map(|i| from + i),
        }
    }

    /// The answer still holds for a cursor at `pos`: the cursor has not
    /// moved back before the scan, nor past the occurrence found.
    fn covers(self, pos: usize) -> bool {
        self.from <= pos && self.at.is_none_or(|at| at >= pos)
    }
}

impl<'a> CharacterStream<'a> {
    /// Create a stream over `input` with the default string cache.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_cache(input, StringCache::default())
    }

    /// Create a stream over `input` using the given string cache.
    #[must_use]
    pub const fn with_cache(input: &'a str, cache: StringCache) -> Self {
        Self {
            input,
            pos: 0,
            mark: None,
            cache,
            lookahead: None,
        }
    }

    /// The full source text.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Current cursor position (byte offset).
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Returns true when the cursor is at the end of the input.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// The character at the cursor, or `None` at EOF. Never advances.
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// "Consume the next input character"
    ///
    /// Returns the character at the cursor and advances past it. At EOF
    /// returns `None` and the cursor stays at the end.
    pub fn consume(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Step the cursor back by one character.
    ///
    /// Must only follow a `consume()` that returned a character.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the start of the input, which means the
    /// state machine unconsumed something it never consumed.
    pub fn unconsume(&mut self) {
        assert!(self.pos > 0, "unconsume() called at start of input");
        self.pos = self.input[..self.pos]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
    }

    /// Move forward one character without returning it.
    pub fn advance(&mut self) {
        let _ = self.consume();
    }

    /// Remember the current position for a later [`rewind_to_mark`](Self::rewind_to_mark).
    pub const fn mark(&mut self) {
        self.mark = Some(self.pos);
    }

    /// Forget the saved position.
    pub const fn unmark(&mut self) {
        self.mark = None;
    }

    /// Move the cursor back to the saved position and clear the mark.
    ///
    /// # Panics
    ///
    /// Panics if no mark is set.
    pub fn rewind_to_mark(&mut self) {
        let Some(mark) = self.mark.take() else {
            panic!("rewind_to_mark() called without a mark");
        };
        self.pos = mark;
    }

    /// Offset from the cursor to the next occurrence of `c`.
    #[must_use]
    pub fn next_index_of(&self, c: char) -> Option<usize> {
        self.rest().find(c)
    }

    /// Offset from the cursor to the next occurrence of `target`.
    #[must_use]
    pub fn next_index_of_str(&self, target: &str) -> Option<usize> {
        self.rest().find(target)
    }

    /// Advance by `len` bytes and return the skipped slice.
    fn take(&mut self, len: usize) -> &'a str {
        let start = self.pos;
        self.pos += len;
        &self.input[start..self.pos]
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let len = self.rest().find(|c| !pred(c)).unwrap_or(self.rest().len());
        self.take(len)
    }

    /// Consume up to (not including) `delimiter`, or to EOF if absent.
    pub fn consume_to(&mut self, delimiter: char) -> &'a str {
        let len = self.next_index_of(delimiter).unwrap_or(self.rest().len());
        self.take(len)
    }

    /// Consume up to (not including) `delimiter`, or to EOF if absent.
    pub fn consume_to_str(&mut self, delimiter: &str) -> &'a str {
        let len = self
            .next_index_of_str(delimiter)
            .unwrap_or(self.rest().len());
        self.take(len)
    }

    /// Consume up to the first character found in `delimiters`, or to EOF.
    pub fn consume_to_any(&mut self, delimiters: &[char]) -> &'a str {
        let len = self.rest().find(delimiters).unwrap_or(self.rest().len());
        self.take(len)
    }

    /// Consume everything that is left.
    pub fn consume_to_end(&mut self) -> &'a str {
        self.take(self.rest().len())
    }

    /// Data state fast path: runs up to `&`, `<` or NUL.
    pub fn consume_data(&mut self) -> &'a str {
        self.consume_to_any(&['&', '<', '\0'])
    }

    /// RAWTEXT / script data fast path: runs up to `<` or NUL.
    pub fn consume_raw_data(&mut self) -> &'a str {
        self.consume_to_any(&['<', '\0'])
    }

    /// Tag name fast path: runs up to whitespace, `/`, `>` or NUL.
    pub fn consume_tag_name(&mut self) -> &'a str {
        self.consume_to_any(TAG_NAME_TERMINATORS)
    }

    /// Longest prefix of ASCII letters.
    pub fn consume_letter_sequence(&mut self) -> &'a str {
        self.consume_while(|c| c.is_ascii_alphabetic())
    }

    /// ASCII letters followed by ASCII digits, as in `frac12` or `sup2`.
    pub fn consume_letter_then_digit_sequence(&mut self) -> &'a str {
        let start = self.pos;
        let _ = self.consume_letter_sequence();
        let _ = self.consume_digit_sequence();
        &self.input[start..self.pos]
    }

    /// Longest prefix of ASCII digits.
    pub fn consume_digit_sequence(&mut self) -> &'a str {
        self.consume_while(|c| c.is_ascii_digit())
    }

    /// Longest prefix of ASCII hex digits.
    pub fn consume_hex_sequence(&mut self) -> &'a str {
        self.consume_while(|c| c.is_ascii_hexdigit())
    }

    /// Returns true if the current character is `c`.
    #[must_use]
    pub fn matches(&self, c: char) -> bool {
        self.current() == Some(c)
    }

    /// Returns true if the input at the cursor starts with `target`.
    #[must_use]
    pub fn matches_str(&self, target: &str) -> bool {
        self.rest().starts_with(target)
    }

    /// ASCII case-insensitive version of [`matches_str`](Self::matches_str).
    #[must_use]
    pub fn matches_ignore_case(&self, target: &str) -> bool {
        self.rest()
            .as_bytes()
            .get(..target.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(target.as_bytes()))
    }

    /// Returns true if the current character is any of `candidates`.
    #[must_use]
    pub fn matches_any(&self, candidates: &[char]) -> bool {
        self.current().is_some_and(|c| candidates.contains(&c))
    }

    /// Returns true if the current character is an ASCII letter.
    #[must_use]
    pub fn matches_letter(&self) -> bool {
        self.current().is_some_and(|c| c.is_ascii_alphabetic())
    }

    /// Returns true if the current character is an ASCII digit.
    #[must_use]
    pub fn matches_digit(&self) -> bool {
        self.current().is_some_and(|c| c.is_ascii_digit())
    }

    /// Consume `target` if the input starts with it.
    pub fn match_consume(&mut self, target: &str) -> bool {
        if self.matches_str(target) {
            self.pos += target.len();
            true
        } else {
            false
        }
    }

    /// Consume `target` if the input starts with it, ignoring ASCII case.
    pub fn match_consume_ignore_case(&mut self, target: &str) -> bool {
        if self.matches_ignore_case(target) {
            self.pos += target.len();
            true
        } else {
            false
        }
    }

    /// Scan ahead (without moving) for `target` in all-lowercase or
    /// all-uppercase form. Mixed case occurrences are not found.
    ///
    /// The position of the next occurrence is remembered, so repeated
    /// queries for the same target only rescan once the cursor has moved
    /// past it. The total cost over one pass of the input stays linear.
    pub fn contains_ignore_case(&mut self, target: &str) -> bool {
        let (input, pos) = (self.input, self.pos);
        match &mut self.lookahead {
            Some(lookahead) if lookahead.target == target => {
                if !lookahead.lower.covers(pos) {
                    lookahead.lower = Found::search(input, pos, &target.to_ascii_lowercase());
                }
                if !lookahead.upper.covers(pos) {
                    lookahead.upper = Found::search(input, pos, &target.to_ascii_uppercase());
                }
            }
            slot => {
                *slot = Some(Lookahead {
                    target: target.to_owned(),
                    lower: Found::search(input, pos, &target.to_ascii_lowercase()),
                    upper: Found::search(input, pos, &target.to_ascii_uppercase()),
                });
            }
        }
        self.lookahead
            .as_ref()
            .is_some_and(|lookahead| lookahead.lower.at.is_some() || lookahead.upper.at.is_some())
    }

    /// Intern `s` through the stream's short-string cache.
    pub fn cache_string(&mut self, s: &str) -> Arc<str> {
        self.cache.get(s)
    }

    /// Mutable access to the string cache.
    pub const fn cache_mut(&mut self) -> &mut StringCache {
        &mut self.cache
    }

    /// 1-based line and column of a byte offset into the input.
    ///
    /// Columns count characters, not bytes. Offsets past the end are
    /// clamped to the end of the input.
    #[must_use]
    pub fn line_and_column(&self, offset: usize) -> (usize, usize) {
        let mut end = offset.min(self.input.len());
        while !self.input.is_char_boundary(end) {
            end -= 1;
        }
        let before = &self.input[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_and_current() {
        let mut r = CharacterStream::new("ab");
        assert_eq!(r.current(), Some('a'));
        assert_eq!(r.consume(), Some('a'));
        assert_eq!(r.consume(), Some('b'));
        assert_eq!(r.consume(), None);
        assert_eq!(r.consume(), None);
        assert!(r.is_empty());
        assert_eq!(r.pos(), 2);
    }

    #[test]
    fn test_unconsume_multibyte() {
        let mut r = CharacterStream::new("é<");
        assert_eq!(r.consume(), Some('é'));
        assert_eq!(r.pos(), 2);
        r.unconsume();
        assert_eq!(r.pos(), 0);
        assert_eq!(r.current(), Some('é'));
    }

    #[test]
    #[should_panic(expected = "unconsume() called at start of input")]
    fn test_unconsume_at_start_panics() {
        let mut r = CharacterStream::new("abc");
        r.unconsume();
    }

    #[test]
    #[should_panic(expected = "without a mark")]
    fn test_rewind_without_mark_panics() {
        let mut r = CharacterStream::new("abc");
        r.rewind_to_mark();
    }

    #[test]
    fn test_mark_and_rewind() {
        let mut r = CharacterStream::new("one two");
        r.mark();
        assert_eq!(r.consume_letter_sequence(), "one");
        r.rewind_to_mark();
        assert_eq!(r.pos(), 0);
        assert_eq!(r.consume_to(' '), "one");
    }

    #[test]
    fn test_consume_to_missing_delimiter_reads_to_end() {
        let mut r = CharacterStream::new("no delimiter here");
        assert_eq!(r.consume_to('<'), "no delimiter here");
        assert!(r.is_empty());
        assert_eq!(r.consume_to('<'), "");
    }

    #[test]
    fn test_consume_to_str_and_any() {
        let mut r = CharacterStream::new("abc]]>def");
        assert_eq!(r.consume_to_str("]]>"), "abc");
        assert!(r.match_consume("]]>"));
        let mut r = CharacterStream::new("text&more<");
        assert_eq!(r.consume_to_any(&['<', '&']), "text");
        assert_eq!(r.current(), Some('&'));
    }

    #[test]
    fn test_sequences() {
        let mut r = CharacterStream::new("frac12;");
        assert_eq!(r.consume_letter_then_digit_sequence(), "frac12");
        let mut r = CharacterStream::new("1f9Z");
        assert_eq!(r.consume_hex_sequence(), "1f9");
        let mut r = CharacterStream::new("42x");
        assert_eq!(r.consume_digit_sequence(), "42");
        let mut r = CharacterStream::new("éa");
        assert_eq!(r.consume_letter_sequence(), "");
    }

    #[test]
    fn test_matches_family() {
        let mut r = CharacterStream::new("DocType html");
        assert!(r.matches('D'));
        assert!(!r.matches_str("DOCTYPE"));
        assert!(r.matches_ignore_case("DOCTYPE"));
        assert!(r.matches_any(&['x', 'D']));
        assert!(r.matches_letter());
        assert!(!r.matches_digit());
        assert!(!r.match_consume("DOCTYPE"));
        assert_eq!(r.pos(), 0);
        assert!(r.match_consume_ignore_case("doctype"));
        assert_eq!(r.pos(), 7);
    }

    #[test]
    fn test_matches_ignore_case_past_end() {
        let r = CharacterStream::new("<!DOC");
        assert!(!r.matches_ignore_case("<!DOCTYPE"));
    }

    #[test]
    fn test_contains_ignore_case_lower_or_upper_only() {
        let mut r = CharacterStream::new("abc</TITLE>");
        assert!(r.contains_ignore_case("</title"));
        let mut r = CharacterStream::new("abc</Title>");
        assert!(!r.contains_ignore_case("</title"));
    }

    #[test]
    fn test_contains_ignore_case_follows_cursor() {
        let mut r = CharacterStream::new("a</x b</X c");
        assert!(r.contains_ignore_case("</x"));
        assert_eq!(r.consume_to('b'), "a</x ");
        // Past the lowercase hit; the uppercase one is still ahead.
        assert!(r.contains_ignore_case("</x"));
        assert_eq!(r.consume_to('c'), "b</X ");
        assert!(!r.contains_ignore_case("</x"));

        // A different target or a rewind starts a fresh scan.
        assert!(!r.contains_ignore_case("</y"));

        let mut r = CharacterStream::new("</x");
        r.mark();
        r.advance();
        assert!(!r.contains_ignore_case("</x"));
        r.rewind_to_mark();
        assert!(r.contains_ignore_case("</x"));
    }

    #[test]
    fn test_next_index_of() {
        let r = CharacterStream::new("hello>");
        assert_eq!(r.next_index_of('>'), Some(5));
        assert_eq!(r.next_index_of('<'), None);
        assert_eq!(r.next_index_of_str("lo"), Some(3));
    }

    #[test]
    fn test_line_and_column() {
        let r = CharacterStream::new("ab\ncdé\nf");
        assert_eq!(r.line_and_column(0), (1, 1));
        assert_eq!(r.line_and_column(3), (2, 1));
        assert_eq!(r.line_and_column(8), (3, 1));
        assert_eq!(r.line_and_column(100), (3, 2));
    }

    #[test]
    fn test_empty_input_is_total() {
        let mut r = CharacterStream::new("");
        assert!(r.is_empty());
        assert_eq!(r.current(), None);
        assert_eq!(r.consume_data(), "");
        assert_eq!(r.consume_tag_name(), "");
        assert!(!r.contains_ignore_case("</x"));
        r.advance();
        assert_eq!(r.pos(), 0);
    }
}
