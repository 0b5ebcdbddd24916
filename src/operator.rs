//! Reversible orthographic operators.
//!
//! Each operator captures one surface feature of a token (casing, terminal
//! punctuation, quoting or trailing whitespace) and can detect, strip and
//! reapply it. IDs are part of the wire format and must not change.

use crate::error::Error;

/// Whitespace set aside by the punctuation and quote operators.
const WHITESPACE: [char; 4] = [' ', '\t', '\n', '\r'];
const CLOSING_QUOTES: [char; 2] = ['"', '\u{201D}'];
const OPENING_QUOTES: [char; 2] = ['"', '\u{201C}'];
const ELLIPSIS_CHAR: char = '\u{2026}';

/// An orthographic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operator {
    /// Marks a token stored as raw UTF-8. Carries no string transformation.
    Literal = 0,
    Capitalize = 1,
    AllCaps = 2,
    Period = 3,
    Exclamation = 4,
    Question = 5,
    Ellipsis = 6,
    Comma = 7,
    Colon = 8,
    Semicolon = 9,
    LineFeed = 10,
    ParagraphBreak = 11,
    Tab = 12,
    CloseQuote = 13,
    OpenQuote = 14,
}

/// Operator categories, declared in canonical application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Casing,
    OpenQuote,
    Punctuation,
    CloseQuote,
    Whitespace,
    Literal,
}

impl Operator {
    /// Every operator, indexed by ID.
    pub const ALL: [Operator; 15] = [
        Operator::Literal,
        Operator::Capitalize,
        Operator::AllCaps,
        Operator::Period,
        Operator::Exclamation,
        Operator::Question,
        Operator::Ellipsis,
        Operator::Comma,
        Operator::Colon,
        Operator::Semicolon,
        Operator::LineFeed,
        Operator::ParagraphBreak,
        Operator::Tab,
        Operator::CloseQuote,
        Operator::OpenQuote,
    ];

    /// Punctuation operators in selection priority order.
    pub(crate) const PUNCTUATION_PRIORITY: [Operator; 7] = [
        Operator::Ellipsis,
        Operator::Exclamation,
        Operator::Question,
        Operator::Period,
        Operator::Comma,
        Operator::Colon,
        Operator::Semicolon,
    ];

    /// Whitespace operators in selection priority order.
    pub(crate) const WHITESPACE_PRIORITY: [Operator; 3] = [
        Operator::Tab,
        Operator::ParagraphBreak,
        Operator::LineFeed,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Only the literal sentinel is followed by a length-prefixed payload.
    pub fn requires_length(self) -> bool {
        matches!(self, Operator::Literal)
    }

    /// True for operators that emit the token's trailing whitespace
    /// themselves, so no separator space may follow.
    pub fn overwrites_trailing_space(self) -> bool {
        matches!(
            self,
            Operator::LineFeed | Operator::ParagraphBreak | Operator::Tab
        )
    }

    pub fn category(self) -> Category {
        match self {
            Operator::Literal => Category::Literal,
            Operator::Capitalize | Operator::AllCaps => Category::Casing,
            Operator::OpenQuote => Category::OpenQuote,
            Operator::Period
            | Operator::Exclamation
            | Operator::Question
            | Operator::Ellipsis
            | Operator::Comma
            | Operator::Colon
            | Operator::Semicolon => Category::Punctuation,
            Operator::CloseQuote => Category::CloseQuote,
            Operator::LineFeed | Operator::ParagraphBreak | Operator::Tab => {
                Category::Whitespace
            }
        }
    }

    /// The mark a punctuation operator emits.
    fn mark(self) -> Option<&'static str> {
        match self {
            Operator::Period => Some("."),
            Operator::Exclamation => Some("!"),
            Operator::Question => Some("?"),
            Operator::Ellipsis => Some("..."),
            Operator::Comma => Some(","),
            Operator::Colon => Some(":"),
            Operator::Semicolon => Some(";"),
            _ => None,
        }
    }

    /// The whitespace a whitespace operator emits.
    fn trailing(self) -> Option<&'static str> {
        match self {
            Operator::LineFeed => Some("\n"),
            Operator::ParagraphBreak => Some("\n\n"),
            Operator::Tab => Some("\t"),
            _ => None,
        }
    }

    /// Does `s` already exhibit this operator's feature?
    pub fn is_applied(self, s: &str) -> bool {
        match self {
            Operator::Literal => true,
            Operator::Capitalize => s
                .chars()
                .find(|c| c.is_alphabetic())
                .is_some_and(char::is_uppercase),
            Operator::AllCaps => {
                let mut letters = s.chars().filter(|c| c.is_alphabetic()).peekable();
                letters.peek().is_some() && letters.all(|c| !c.is_lowercase())
            }
            Operator::Ellipsis => {
                let (body, _) = split_tail(s, true);
                body.ends_with("...") || body.ends_with(ELLIPSIS_CHAR)
            }
            Operator::LineFeed => s.ends_with('\n') && !s.ends_with("\n\n"),
            Operator::ParagraphBreak => s.ends_with("\n\n"),
            Operator::Tab => s.ends_with('\t'),
            Operator::CloseQuote => {
                let (body, _) = split_tail(s, false);
                body.ends_with(CLOSING_QUOTES)
            }
            Operator::OpenQuote => s
                .trim_start_matches(WHITESPACE)
                .starts_with(OPENING_QUOTES),
            punct => {
                let (body, _) = split_tail(s, true);
                punct.mark().is_some_and(|mark| body.ends_with(mark))
            }
        }
    }

    /// Removes the feature from `s`, producing the canonical form.
    ///
    /// Returns `s` unchanged if the feature is absent.
    pub fn clean(self, s: &str) -> String {
        match self {
            Operator::Literal => s.to_owned(),
            Operator::Capitalize => map_first_letter(s, char::to_lowercase),
            Operator::AllCaps => s.to_lowercase(),
            Operator::Ellipsis => {
                let (body, tail) = split_tail(s, true);
                match body
                    .strip_suffix(ELLIPSIS_CHAR)
                    .or_else(|| body.strip_suffix("..."))
                {
                    Some(stripped) => format!("{stripped}{tail}"),
                    None => s.to_owned(),
                }
            }
            Operator::LineFeed => {
                if self.is_applied(s) {
                    s[..s.len() - 1].to_owned()
                } else {
                    s.to_owned()
                }
            }
            Operator::ParagraphBreak | Operator::Tab => {
                let trailing = self.trailing().unwrap_or_default();
                s.strip_suffix(trailing).unwrap_or(s).to_owned()
            }
            Operator::CloseQuote => {
                let (body, tail) = split_tail(s, false);
                match body.strip_suffix(CLOSING_QUOTES) {
                    Some(stripped) => format!("{stripped}{tail}"),
                    None => s.to_owned(),
                }
            }
            Operator::OpenQuote => {
                let rest = s.trim_start_matches(WHITESPACE);
                let lead = &s[..s.len() - rest.len()];
                match rest.strip_prefix(OPENING_QUOTES) {
                    Some(stripped) => format!("{lead}{stripped}"),
                    None => s.to_owned(),
                }
            }
            punct => {
                let (body, tail) = split_tail(s, true);
                match punct.mark().and_then(|mark| body.strip_suffix(mark)) {
                    Some(stripped) => format!("{stripped}{tail}"),
                    None => s.to_owned(),
                }
            }
        }
    }

    /// Adds the feature to a canonical form.
    pub fn apply(self, s: &str) -> String {
        match self {
            Operator::Literal => s.to_owned(),
            Operator::Capitalize => map_first_letter(s, char::to_uppercase),
            Operator::AllCaps => s.to_uppercase(),
            Operator::LineFeed | Operator::ParagraphBreak | Operator::Tab => {
                let mut out = s.to_owned();
                out.push_str(self.trailing().unwrap_or_default());
                out
            }
            Operator::CloseQuote => {
                let (body, tail) = split_tail(s, true);
                format!("{body}\"{tail}")
            }
            Operator::OpenQuote => {
                let rest = s.trim_start_matches(WHITESPACE);
                let lead = &s[..s.len() - rest.len()];
                format!("{lead}\"{rest}")
            }
            punct => {
                let (body, tail) = split_tail(s, true);
                format!("{body}{}{tail}", punct.mark().unwrap_or_default())
            }
        }
    }
}

impl TryFrom<u8> for Operator {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Operator::ALL
            .get(id as usize)
            .copied()
            .ok_or(Error::UnknownOperatorId(id))
    }
}

/// Splits `s` into a body and the trailing whitespace (and closing quotes, if
/// `with_quotes`) that punctuation is inserted in front of.
fn split_tail(s: &str, with_quotes: bool) -> (&str, &str) {
    let body = if with_quotes {
        s.trim_end_matches(|c: char| WHITESPACE.contains(&c) || CLOSING_QUOTES.contains(&c))
    } else {
        s.trim_end_matches(WHITESPACE)
    };
    s.split_at(body.len())
}

/// Rewrites the first alphabetic character of `s` with `map`.
fn map_first_letter<I>(s: &str, map: impl Fn(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    match s.char_indices().find(|(_, c)| c.is_alphabetic()) {
        Some((i, c)) => {
            let mut out = String::with_capacity(s.len() + 2);
            out.push_str(&s[..i]);
            out.extend(map(c));
            out.push_str(&s[i + c.len_utf8()..]);
            out
        }
        None => s.to_owned(),
    }
}
