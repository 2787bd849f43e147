//! Ordered pattern cascades.
//!
//! A cascade holds the candidate patterns for one field, from the most
//! specific (text right after a field caption) to the most generic (any
//! token with the field's shape). The first pattern that matches wins, so a
//! generic fallback never shadows a labelled match.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapse whitespace runs to a single space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

/// One candidate pattern of a cascade.
///
/// Matching modes (case-insensitive, multi-line, dot-all) are expressed as
/// inline flags in the pattern. Only the first capturing group is used.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
}

impl PatternRule {
    /// Wrap a compiled pattern.
    pub fn new(regex: Regex) -> Self {
        Self { regex }
    }

    /// Compile a pattern string.
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::new)
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// First capturing group of the first match, whitespace-collapsed.
    ///
    /// Returns `None` when the pattern does not match, has no capturing
    /// group, or captures only whitespace.
    pub fn capture(&self, text: &str) -> Option<String> {
        let caps = self.regex.captures(text)?;
        let value = collapse_whitespace(caps.get(1)?.as_str());
        if value.is_empty() { None } else { Some(value) }
    }
}

/// A successful cascade evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeMatch {
    /// Captured, whitespace-collapsed value.
    pub value: String,
    /// Index of the rule that matched.
    pub rule: usize,
}

/// Ordered list of pattern rules for one field.
#[derive(Debug, Clone, Default)]
pub struct PatternCascade {
    rules: Vec<PatternRule>,
}

impl PatternCascade {
    /// Build a cascade from precompiled patterns, keeping their order.
    pub fn from_regexes(regexes: impl IntoIterator<Item = Regex>) -> Self {
        Self {
            rules: regexes.into_iter().map(PatternRule::new).collect(),
        }
    }

    /// Compile a cascade from pattern strings, keeping their order.
    pub fn compile(patterns: &[&str]) -> Result<Self, regex::Error> {
        let rules = patterns
            .iter()
            .map(|p| PatternRule::compile(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the cascade has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Return the first capture produced by any rule, in declaration order.
    pub fn evaluate(&self, text: &str) -> Option<String> {
        self.evaluate_traced(text).map(|m| m.value)
    }

    /// Like [`evaluate`](Self::evaluate), also reporting which rule matched.
    pub fn evaluate_traced(&self, text: &str) -> Option<CascadeMatch> {
        if text.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .enumerate()
            .find_map(|(rule, r)| r.capture(text).map(|value| CascadeMatch { value, rule }))
    }

    /// Evaluate against several texts as one blob without letting a match
    /// span two of them: each rule, in order, is tried on every text
    /// before the next rule. Also reports which text matched.
    pub fn evaluate_across(&self, texts: &[&str]) -> Option<(CascadeMatch, usize)> {
        self.rules.iter().enumerate().find_map(|(rule, r)| {
            texts.iter().enumerate().find_map(|(source, text)| {
                r.capture(text).map(|value| (CascadeMatch { value, rule }, source))
            })
        })
    }
}
