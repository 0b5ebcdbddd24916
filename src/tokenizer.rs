//! Splits text into tokens that keep their trailing delimiter.
//!
//! Concatenating the tokens always reproduces the input exactly.

/// The set of delimiters that terminate a token.
///
/// When both line-feed variants are enabled, a double line feed is preferred
/// over a single one at the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterClass {
    pub space: bool,
    pub tab: bool,
    pub line_feed: bool,
    pub paragraph_break: bool,
}

impl DelimiterClass {
    /// Space, tab, single and double line feed.
    pub const ALL: DelimiterClass = DelimiterClass {
        space: true,
        tab: true,
        line_feed: true,
        paragraph_break: true,
    };

    /// Returns the length in bytes of the delimiter starting at the front of
    /// `rest`, or `None` if `rest` does not start with one.
    fn match_at(&self, rest: &[u8]) -> Option<usize> {
        match rest.first()? {
            b' ' if self.space => Some(1),
            b'\t' if self.tab => Some(1),
            b'\n' => {
                if self.paragraph_break && rest.get(1) == Some(&b'\n') {
                    Some(2)
                } else if self.line_feed {
                    Some(1)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Default for DelimiterClass {
    fn default() -> Self {
        Self::ALL
    }
}

/// Iterator over the tokens of a text.
///
/// Each token ends with the delimiter that followed it in the source. Only the
/// last token may lack one.
pub struct Tokens<'a> {
    text: &'a str,
    class: DelimiterClass,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str, class: DelimiterClass) -> Self {
        Self { text, class }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.text.is_empty() {
            return None;
        }

        let bytes = self.text.as_bytes();
        let mut end = bytes.len();
        let mut i = 0;
        while i < bytes.len() {
            if let Some(len) = self.class.match_at(&bytes[i..]) {
                end = i + len;
                break;
            }
            i += 1;
        }

        // Delimiters are ASCII, so `end` is always a char boundary
        let (token, rest) = self.text.split_at(end);
        self.text = rest;
        Some(token)
    }
}

/// Splits `text` into tokens using `class`.
pub fn tokenize(text: &str, class: DelimiterClass) -> Vec<&str> {
    Tokens::new(text, class).collect()
}
