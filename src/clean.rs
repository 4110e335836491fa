use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

// Everything from the "See also" heading to the end holds no prose sentences.
static SEE_ALSO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?ms)^== See also ==.*").unwrap());
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"=+.+=+").unwrap());
static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\n*").unwrap());

/// A named regex substitution applied to raw article text.
#[derive(Debug, Clone)]
pub struct CleaningRule {
    pub name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl CleaningRule {
    fn new(name: &'static str, pattern: &Regex) -> Self {
        Self {
            name,
            pattern: pattern.clone(),
            replacement: "",
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }
}

/// Fixed, ordered rule table. Each rule sees the output of the one before it.
#[derive(Debug, Clone)]
pub struct CleaningRules {
    rules: Vec<CleaningRule>,
}

impl Default for CleaningRules {
    fn default() -> Self {
        Self {
            rules: vec![
                CleaningRule::new("see_also", &SEE_ALSO_RE),
                CleaningRule::new("headings", &HEADING_RE),
                CleaningRule::new("newlines", &BLANK_LINES_RE),
            ],
        }
    }
}

impl CleaningRules {
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    pub fn apply(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for rule in &self.rules {
            let before = text.len();
            text = rule.apply(&text);
            debug!(rule = rule.name, removed = before - text.len(), "applied cleaning rule");
        }
        text
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "Intro sentence.\n\n\n== History ==\nHistory text.\n\n=== Early years ===\nMore text.\n\n\n== See also ==\nRelated page\n\n== References ==\nSome reference.\n";

    #[test]
    fn rule_order() {
        assert_eq!(CleaningRules::default().names(), vec!["see_also", "headings", "newlines"]);
    }

    #[test]
    fn strips_see_also_and_headings() {
        let cleaned = CleaningRules::default().apply(PAGE);
        assert_eq!(cleaned, "Intro sentence.\nHistory text.\nMore text.\n");
    }

    #[test]
    fn order_is_significant() {
        let mut reversed = CleaningRules::default();
        reversed.rules.swap(0, 1);
        let cleaned = reversed.apply(PAGE);
        // With headings gone first the "See also" marker never matches.
        assert!(cleaned.contains("Related page"));
        assert!(cleaned.contains("Some reference."));
    }

    #[test]
    fn no_see_also_is_noop() {
        let page = "First.\n\n== Career ==\nSecond.\n";
        let cleaned = CleaningRules::default().apply(page);
        assert_eq!(cleaned, "First.\nSecond.\n");
    }

    #[test]
    fn see_also_must_start_a_line() {
        let rule = CleaningRule::new("see_also", &SEE_ALSO_RE);
        let text = "Mentions == See also == inline.\nNext line.";
        assert_eq!(rule.apply(text), text);
    }

    #[test]
    fn leading_blank_lines() {
        let rule = CleaningRule::new("newlines", &BLANK_LINES_RE);
        assert_eq!(rule.apply("\n\n\nText.\n\n\nMore."), "Text.\nMore.");
    }

    #[test]
    fn headings_only_page_is_empty() {
        let cleaned = CleaningRules::default().apply("== A ==\n\n=== B ===\n\n");
        assert!(cleaned.is_empty());
    }
}
