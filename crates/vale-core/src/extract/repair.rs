//! Space insertion for concatenated Spanish amount-in-words strings.
//!
//! Text layers often drop the spaces between number words, turning
//! `SEIS MIL TRESCIENTOS PESOS 00/100 M.N.` into `SEISMILTRESCIENTOSPESOS00/100M.N.`.
//! The repairer applies an ordered table of `(pattern, replacement)` rules
//! over and over until a pass changes nothing or the pass cap is reached.
//!
//! The table must be collectively idempotent: applied to text that already
//! satisfies every rule it is a no-op. That is what lets the loop stop
//! before the cap on well-formed input.

use regex::{Regex, RegexSet};
use tracing::{debug, trace};

use super::cascade::collapse_whitespace;

/// Default pass cap.
pub const DEFAULT_MAX_PASSES: usize = 5;

/// Specificity tier of a repair rule. Tables are ordered by tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RepairTier {
    /// Known irregular glued compounds.
    Irregular,
    /// Thousand / million / hundred boundaries.
    Boundary,
    /// The `Y` conjunction.
    Conjunction,
    /// Currency suffixes (`PESOS`, `00/100`, `M.N.`).
    Currency,
    /// Undo splits the earlier tiers get wrong.
    Cleanup,
}

/// One `(pattern, replacement)` pair.
#[derive(Debug, Clone)]
pub struct RepairRule {
    /// Tier the rule belongs to.
    pub tier: RepairTier,
    pattern: Regex,
    replacement: String,
}

impl RepairRule {
    /// Compile a rule. The replacement uses `${n}` group references.
    pub fn new(tier: RepairTier, pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            tier,
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
        })
    }

    /// The pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Apply the rule to every non-overlapping match.
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

/// Outcome of a repair, with convergence details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    /// Repaired text.
    pub text: String,
    /// Full passes over the table (0 when the fast path applied).
    pub passes: usize,
    /// Whether a pass confirmed the fixed point.
    pub converged: bool,
}

/// Fixed-point space repairer.
#[derive(Debug, Clone)]
pub struct TextRepairer {
    rules: Vec<RepairRule>,
    glued: RegexSet,
    max_passes: usize,
}

impl TextRepairer {
    /// Build a repairer from an ordered rule table.
    ///
    /// The still-glued markers checked by the fast path are the rule
    /// patterns themselves.
    pub fn new(rules: Vec<RepairRule>) -> Result<Self, regex::Error> {
        let glued = RegexSet::new(rules.iter().map(RepairRule::pattern))?;
        Ok(Self {
            rules,
            glued,
            max_passes: DEFAULT_MAX_PASSES,
        })
    }

    /// Repairer with the built-in Spanish number-word table.
    pub fn spanish() -> Self {
        super::rules::words::SPANISH_REPAIRER.clone()
    }

    /// Set the pass cap (at least one pass always runs).
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Current pass cap.
    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Rule table in application order.
    pub fn rules(&self) -> &[RepairRule] {
        &self.rules
    }

    /// Whether any still-glued marker is present.
    pub fn needs_repair(&self, text: &str) -> bool {
        self.glued.is_match(text)
    }

    /// Repair a string, returning only the text.
    pub fn repair(&self, text: &str) -> String {
        self.repair_traced(text).text
    }

    /// Repair a string and report how the loop ended.
    pub fn repair_traced(&self, input: &str) -> Repair {
        if input.contains(' ') && !self.needs_repair(input) {
            return Repair {
                text: input.to_string(),
                passes: 0,
                converged: true,
            };
        }

        let mut text = input.to_string();
        let mut passes = 0;
        let mut converged = false;

        while passes < self.max_passes {
            passes += 1;
            let next = self.apply_pass(&text);
            if next == text {
                converged = true;
                break;
            }
            trace!(pass = passes, "repair pass: {}", next);
            text = next;
        }

        if !converged {
            debug!(
                "amount-in-words repair hit the {} pass cap: {}",
                self.max_passes, text
            );
        }

        Repair {
            text: collapse_whitespace(&text),
            passes,
            converged,
        }
    }

    fn apply_pass(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }
}

impl Default for TextRepairer {
    fn default() -> Self {
        Self::spanish()
    }
}
