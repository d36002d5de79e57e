//! Position-tracking text reader used by every grammar production.
//!
//! The cursor is a byte offset into the borrowed input. Productions never
//! share the cursor with anything else, so backtracking is just "remember the
//! offset, put it back": [`Scanner::attempt`] restores on failure and
//! [`Scanner::probe`] restores unconditionally.
//!
//! Whitespace (all of Unicode's, newlines included) is skipped before each
//! token unless a production runs inside [`Scanner::adjacent`].

/// Characters accepted as a range dash, on top of the word `to`.
const DASHES: &[char] = &['-', '–', '‐', '‒', '—', '―', '~', '～'];

#[derive(Debug, Clone)]
pub(crate) struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    skip_whitespace: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Scanner { text, pos: 0, skip_whitespace: true }
    }

    // --- Cursor control ------------------------------------------------------

    pub fn cursor(&self) -> usize {
        self.pos
    }

    pub fn rewind(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Run `f`; if it fails, put the cursor back where it was.
    pub fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.pos;
        let out = f(self);
        if out.is_none() {
            self.pos = start;
        }
        out
    }

    /// Run `f` as pure lookahead: the cursor is restored whatever the outcome.
    pub fn probe<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let start = self.pos;
        let out = f(self);
        self.pos = start;
        out
    }

    /// Run `f` with whitespace skipping turned off.
    pub fn adjacent<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.skip_whitespace;
        self.skip_whitespace = false;
        let out = f(self);
        self.skip_whitespace = saved;
        out
    }

    pub fn skip_blanks(&mut self) {
        if self.skip_whitespace {
            let blanks: usize = self.rest().chars().take_while(|c| c.is_whitespace()).map(char::len_utf8).sum();
            self.pos += blanks;
        }
    }

    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Nothing but whitespace left.
    pub fn is_at_end(&self) -> bool {
        self.rest().chars().all(char::is_whitespace)
    }

    /// Cursor position counted in characters rather than bytes.
    pub fn char_offset(&self) -> usize {
        self.text[..self.pos].chars().count()
    }

    pub fn text_since(&self, start: usize) -> &'a str {
        &self.text[start.min(self.pos)..self.pos]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    // --- Tokens --------------------------------------------------------------

    /// Case-insensitive literal. Does not move the cursor on failure.
    pub fn scan_str(&mut self, literal: &str) -> bool {
        self.attempt(|s| {
            s.skip_blanks();
            let len = match_ignore_case(s.rest(), literal)?;
            s.pos += len;
            Some(())
        })
        .is_some()
    }

    /// Like [`scan_str`](Self::scan_str), but the literal must not run into
    /// further letters (`Sep` does not match the start of `Sept`).
    pub fn scan_word(&mut self, word: &str) -> bool {
        self.attempt(|s| (s.scan_str(word) && !s.peek().is_some_and(char::is_alphabetic)).then_some(())).is_some()
    }

    /// First entry of `table` whose word is next in the input.
    pub fn scan_any_word<T: Copy>(&mut self, table: &[(&str, T)]) -> Option<T> {
        table.iter().find(|(word, _)| self.scan_word(word)).map(|(_, value)| *value)
    }

    /// One character out of `set`.
    pub fn scan_one_of(&mut self, set: &str) -> Option<char> {
        self.attempt(|s| {
            s.skip_blanks();
            let c = s.peek().filter(|c| set.contains(*c))?;
            s.pos += c.len_utf8();
            Some(c)
        })
    }

    /// The longest non-empty run of characters satisfying `pred`.
    pub fn scan_while(&mut self, pred: impl Fn(char) -> bool) -> Option<&'a str> {
        self.attempt(|s| {
            s.skip_blanks();
            let start = s.pos;
            let len: usize = s.rest().chars().take_while(|c| pred(*c)).map(char::len_utf8).sum();
            s.pos += len;
            (len > 0).then(|| s.text_since(start))
        })
    }

    pub fn scan_letters(&mut self) -> Option<&'a str> {
        self.scan_while(char::is_alphabetic)
    }

    /// A letter run of at least `min` characters that abbreviates `word`.
    pub fn scan_word_prefix(&mut self, word: &str, min: usize) -> bool {
        self.attempt(|s| {
            let run = s.scan_letters()?;
            (run.chars().count() >= min && is_prefix_ignore_case(run, word)).then_some(())
        })
        .is_some()
    }

    /// Unsigned decimal number.
    pub fn scan_uint(&mut self) -> Option<u32> {
        self.attempt(|s| s.scan_while(|c| c.is_ascii_digit())?.parse().ok())
    }

    /// Decimal number with an optional sign glued to its digits.
    pub fn scan_int(&mut self) -> Option<i32> {
        self.attempt(|s| {
            s.skip_blanks();
            s.adjacent(|s| {
                let negative = match s.scan_one_of("+-") {
                    Some('-') => true,
                    Some(_) | None => false,
                };
                let magnitude = i32::try_from(s.scan_uint()?).ok()?;
                Some(if negative { -magnitude } else { magnitude })
            })
        })
    }

    /// A range dash: one or more dash-like characters, or the word `to`.
    pub fn scan_dash(&mut self) -> bool {
        self.attempt(|s| {
            s.skip_blanks();
            let run: usize = s.rest().chars().take_while(|c| DASHES.contains(c)).map(char::len_utf8).sum();
            if run > 0 {
                s.pos += run;
                return Some(());
            }
            s.scan_word("to").then_some(())
        })
        .is_some()
    }
}

/// Byte length of the prefix of `haystack` that spells `literal`, ignoring case.
fn match_ignore_case(haystack: &str, literal: &str) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for expected in literal.chars() {
        let (_, found) = chars.next()?;
        if !found.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(chars.next().map_or(haystack.len(), |(index, _)| index))
}

pub(crate) fn is_prefix_ignore_case(prefix: &str, word: &str) -> bool {
    match_ignore_case(word, prefix).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_ignore_case_and_leading_whitespace() {
        let mut s = Scanner::new("  \n\tOPEN now");
        assert!(s.scan_str("open"));
        assert_eq!(s.rest(), " now");
        assert!(!s.scan_str("later"));
        assert_eq!(s.rest(), " now");
    }

    #[test]
    fn word_needs_a_boundary() {
        let mut s = Scanner::new("Sept");
        assert!(!s.scan_word("Sep"));
        assert!(s.scan_word("sept"));
        assert!(s.is_at_end());
    }

    #[test]
    fn attempt_restores_on_failure_only() {
        let mut s = Scanner::new("Mo Tu");
        let failed: Option<()> = s.attempt(|s| {
            s.scan_str("Mo");
            None
        });
        assert!(failed.is_none());
        assert_eq!(s.cursor(), 0);
        assert!(s.attempt(|s| s.scan_str("Mo").then_some(())).is_some());
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn probe_always_restores() {
        let mut s = Scanner::new("10:00");
        assert_eq!(s.probe(|s| s.scan_uint()), Some(10));
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn adjacent_disables_skipping() {
        let mut s = Scanner::new("1 2");
        assert_eq!(s.scan_uint(), Some(1));
        assert_eq!(s.adjacent(|s| s.scan_uint()), None);
        assert_eq!(s.scan_uint(), Some(2));
    }

    #[test]
    fn signed_integers() {
        let mut s = Scanner::new("-1 +2 - 3 99999999999");
        assert_eq!(s.scan_int(), Some(-1));
        assert_eq!(s.scan_int(), Some(2));
        assert_eq!(s.scan_int(), None);
        assert_eq!(s.rest(), " - 3 99999999999");
        assert!(s.scan_dash());
        assert_eq!(s.scan_int(), Some(3));
        assert_eq!(s.scan_int(), None);
    }

    #[test]
    fn dashes_and_to() {
        for text in ["-", "–", "—", "~", "～", "--", " to "] {
            let mut s = Scanner::new(text);
            assert!(s.scan_dash(), "{text:?}");
        }
        let mut s = Scanner::new("today");
        assert!(!s.scan_dash());
    }

    #[test]
    fn word_prefix_requires_minimum_length() {
        assert!(Scanner::new("day").scan_word_prefix("days", 3));
        assert!(Scanner::new("Days").scan_word_prefix("days", 3));
        assert!(!Scanner::new("da").scan_word_prefix("days", 3));
        assert!(!Scanner::new("dayz").scan_word_prefix("days", 3));
    }

    #[test]
    fn offsets_count_characters() {
        let mut s = Scanner::new("Mo–Fr");
        assert!(s.scan_str("Mo"));
        assert!(s.scan_dash());
        assert_eq!(s.cursor(), 5);
        assert_eq!(s.char_offset(), 3);
    }
}
