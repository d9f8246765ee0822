//! Cleanup of model output.
//!
//! Reasoning-tuned models leak their scratch work: `<think>` blocks and
//! chatty openers like "Okay, let me see...". Sanitization removes both and
//! normalizes blank lines. The rule list is declarative; each rule names
//! where in the text it may match.

use lazy_static::lazy_static;
use regex::Regex;

/// Where a rule is allowed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalScope {
    /// Every match anywhere in the text is removed.
    Anywhere,
    /// Only a match at the very start of the text is removed.
    Leading,
}

/// A pattern and the scope it is removed from.
#[derive(Debug)]
pub struct SanitizeRule {
    pub name: &'static str,
    pub scope: RemovalScope,
    pattern: Regex,
}

impl SanitizeRule {
    /// A paired meta-reasoning tag such as `<think>...</think>`, matched
    /// lazily across lines.
    fn tag_block(tag: &'static str) -> Self {
        let pattern = format!(r"(?si)<{tag}>.*?</{tag}>", tag = regex::escape(tag));
        Self {
            name: tag,
            scope: RemovalScope::Anywhere,
            pattern: Regex::new(&pattern).expect("tag pattern is valid"),
        }
    }

    /// A discourse-marker opener, removed up to and including the next
    /// blank line.
    fn filler(phrase: &'static str) -> Self {
        let pattern = format!(r"(?si)\A\s*{}.*?\n\n", regex::escape(phrase));
        Self {
            name: phrase,
            scope: RemovalScope::Leading,
            pattern: Regex::new(&pattern).expect("filler pattern is valid"),
        }
    }

    fn apply(&self, text: &str) -> String {
        match self.scope {
            RemovalScope::Anywhere => self.pattern.replace_all(text, "").into_owned(),
            RemovalScope::Leading => self.pattern.replace(text, "").into_owned(),
        }
    }
}

/// Tags whose content is never part of an answer.
pub const REASONING_TAGS: &[&str] = &["reasoning", "think", "reflection", "scratchpad"];

/// Openers that introduce thinking-out-loud rather than an answer.
pub const FILLER_PHRASES: &[&str] = &[
    "Ok, let me think",
    "Let me see",
    "Let me figure this out",
    "First,",
    "I need to",
    "So,",
    "Alright,",
    "Okay,",
];

lazy_static! {
    static ref RULES: Vec<SanitizeRule> = REASONING_TAGS
        .iter()
        .map(|tag| SanitizeRule::tag_block(tag))
        .chain(FILLER_PHRASES.iter().map(|phrase| SanitizeRule::filler(phrase)))
        .collect();

    static ref BLANK_RUN: Regex = Regex::new(r"\n\s*\n\s*\n").expect("blank-run pattern is valid");
}

/// The rule list in application order.
pub fn rules() -> &'static [SanitizeRule] {
    &RULES
}

/// Strip meta-reasoning and normalize whitespace.
///
/// Runs the rules, collapses three or more newlines (with any whitespace in
/// between) into one blank line and trims, repeating until nothing changes.
/// Every change shortens the text, so the loop terminates, the output is
/// never longer than the input and `sanitize(sanitize(x)) == sanitize(x)`.
///
/// Filler removal is best effort: an answer that genuinely starts with
/// "So," loses its first paragraph.
pub fn sanitize(text: &str) -> String {
    let mut current = sanitize_pass(text);
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_pass(text: &str) -> String {
    let mut out = text.to_string();
    for rule in RULES.iter() {
        out = rule.apply(&out);
    }
    let out = BLANK_RUN.replace_all(&out, "\n\n");
    out.trim().to_string()
}
