//! Rule-based sentence splitting for English article prose.
//!
//! Each input line is treated as its own paragraph, so a line break always
//! ends a sentence. Within a line, a run of `.`, `!` or `?` (plus any closing
//! quotes or brackets) followed by whitespace ends a sentence, except after
//! titles and common abbreviations, single initials, dotted acronyms, or when
//! the next word starts in lowercase.

use std::collections::HashSet;

/// Splits a block of text into ordered sentences.
pub trait SentenceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Abbreviations that never end a sentence, in any case.
const NO_BREAK_AFTER: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "rev", "st", "mt", "ft", "lt", "sgt", "capt", "gov", "sen",
    "approx", "ca", "cf", "vs", "vol", "pp", "eds",
];

/// Abbreviations that collide with ordinary words, so only their capitalised form counts.
const CAPITALISED_NO_BREAK: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "Jun", "Jul", "Aug", "Sep", "Sept", "Oct", "Nov", "Dec", "Gen",
    "Col", "Hon", "Rep", "Fig", "Figs", "Ed",
];

/// "No. 5": only an abbreviation when a number follows.
const NUMBERED: &[&str] = &["no", "nos"];

#[derive(Debug, Clone)]
pub struct RuleTokenizer {
    no_break_after: HashSet<&'static str>,
    capitalised: HashSet<&'static str>,
}

impl Default for RuleTokenizer {
    fn default() -> Self {
        Self {
            no_break_after: NO_BREAK_AFTER.iter().copied().collect(),
            capitalised: CAPITALISED_NO_BREAK.iter().copied().collect(),
        }
    }
}

impl SentenceTokenizer for RuleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.lines()
            .flat_map(|line| self.split_paragraph(line))
            .collect()
    }
}

fn is_ender(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
}

impl RuleTokenizer {
    fn split_paragraph(&self, para: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = para.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            if !is_ender(chars[i].1) {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j < chars.len() && (is_ender(chars[j].1) || is_closer(chars[j].1)) {
                j += 1;
            }

            let end = chars.get(j).map(|&(pos, _)| pos).unwrap_or(para.len());
            let at_end = j == chars.len();
            let breaks = at_end
                || (chars[j].1.is_whitespace() && self.is_boundary(para, start, &chars, i, j));

            if breaks {
                push_trimmed(&mut sentences, &para[start..end]);
                start = end;
            }
            i = j;
        }

        push_trimmed(&mut sentences, &para[start..]);
        sentences
    }

    /// `i` is the first terminator of the run, `j` the char after the run.
    fn is_boundary(&self, para: &str, start: usize, chars: &[(usize, char)], i: usize, j: usize) -> bool {
        let next_word = para[chars[j].0..].chars().find(|c| c.is_alphanumeric());
        if chars[i].1 != '.' {
            return true;
        }
        if next_word.is_some_and(char::is_lowercase) {
            return false;
        }
        // An ellipsis followed by a capital is a real break.
        if chars[i + 1..j].iter().any(|&(_, c)| c == '.') {
            return true;
        }

        let token = para[start..chars[i].0]
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or_default()
            .trim_start_matches(|c: char| !c.is_alphanumeric());

        if token.is_empty() {
            return true;
        }
        let lower = token.to_lowercase();
        if self.no_break_after.contains(lower.as_str()) || self.capitalised.contains(token) {
            return false;
        }
        if NUMBERED.contains(&lower.as_str()) {
            let next = para[chars[j].0..].trim_start().chars().next();
            return !next.is_some_and(|c| c.is_ascii_digit());
        }
        !(is_initial(token) || is_dotted_acronym(token))
    }
}

fn is_initial(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

/// "U.S" or "e.g" as seen before their final period.
fn is_dotted_acronym(token: &str) -> bool {
    token.contains('.') && token.split('.').all(is_initial)
}

fn push_trimmed(out: &mut Vec<String>, s: &str) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s.to_string());
    }
}
