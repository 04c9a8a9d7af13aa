//! Guarded regex rules.
//!
//! A rule is a case-insensitive, multi-line expression whose first capture group is the
//! field value. The `regex` crate has no look-around, so terminators are written as
//! consumed groups after the capture and negative look-around becomes a [`Guard`] that is
//! checked on every candidate match.

use std::fmt;
use std::ops::Range;

use regex::{Regex, RegexBuilder};
use tracing::trace;

/// Compiled size limit for a single rule.
const RULE_SIZE_LIMIT: usize = 4 * (1 << 20);

/// Check applied to a candidate match before it is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// The match must not start right after one of these words (whitespace between is
    /// allowed).
    NotPrecededBy(&'static [&'static str]),
    /// The captured value must not be followed, after optional whitespace, by one of these
    /// words.
    NotFollowedBy(&'static [&'static str]),
    /// The line the match starts on must not contain any of these words.
    LineExcludes(&'static [&'static str]),
}

impl Guard {
    /// Whether a candidate passes this guard. `whole` is the full match span and `value`
    /// the capture span.
    fn allows(&self, text: &str, whole: &Range<usize>, value: &Range<usize>) -> bool {
        match self {
            Guard::NotPrecededBy(words) => {
                let before = text[..whole.start].trim_end();
                !words.iter().any(|w| ends_with_ignore_case(before, w))
            }
            Guard::NotFollowedBy(words) => {
                let after = text[value.end..].trim_start();
                !words.iter().any(|w| starts_with_ignore_case(after, w))
            }
            Guard::LineExcludes(words) => {
                let line = line_at(text, whole.start).to_lowercase();
                !words.iter().any(|w| line.contains(&w.to_lowercase()))
            }
        }
    }
}

/// Priority class of a rule within its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleTier {
    /// Anchored on the field's own label.
    Primary,
    /// Generic catch-all that may fire on unrelated text. Always declared last.
    Fallback,
}

/// Result of evaluating one rule against a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule matched; the value is the trimmed first capture group.
    Match {
        value: String,
        span: Range<usize>,
    },
    /// The rule did not match, or every candidate was rejected by a guard.
    NoMatch,
    /// The rule itself is unusable.
    Error(String),
}

/// One alternative extraction rule for a field.
#[derive(Clone)]
pub struct FieldRule {
    source: String,
    matcher: Result<Regex, String>,
    guards: Vec<Guard>,
    tier: RuleTier,
}

impl FieldRule {
    /// Build a rule from a raw expression. Compilation errors are kept and reported
    /// when the rule is applied.
    pub fn new(pattern: impl Into<String>) -> Self {
        let source = pattern.into();
        let matcher = RegexBuilder::new(&source)
            .case_insensitive(true)
            .multi_line(true)
            .size_limit(RULE_SIZE_LIMIT)
            .build()
            .map_err(|e| e.to_string());

        Self {
            source,
            matcher,
            guards: Vec::new(),
            tier: RuleTier::Primary,
        }
    }

    /// Anchor followed by a value that must end at one of `stops` or at the end of the
    /// line.
    pub fn anchored(anchor: &str, value: &str, stops: &[&str]) -> Self {
        let mut terminators: Vec<&str> = stops.to_vec();
        terminators.push("$");
        Self::new(format!(r"{anchor}({value})\s*(?:{})", terminators.join("|")))
    }

    /// Anchor followed by a value that must end at one of `stops`.
    pub fn bounded(anchor: &str, value: &str, stops: &[&str]) -> Self {
        Self::new(format!(r"{anchor}({value})\s*(?:{})", stops.join("|")))
    }

    /// Anchor followed by an unterminated value.
    pub fn open(anchor: &str, value: &str) -> Self {
        Self::new(format!("{anchor}({value})"))
    }

    /// Mark this rule as a generic catch-all.
    pub fn fallback(mut self) -> Self {
        self.tier = RuleTier::Fallback;
        self
    }

    /// Add a guard.
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    /// The expression this rule was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Priority class.
    pub fn tier(&self) -> RuleTier {
        self.tier
    }

    /// Compilation error, if the rule is unusable.
    pub fn error(&self) -> Option<&str> {
        self.matcher.as_ref().err().map(String::as_str)
    }

    /// Evaluate the rule. Candidates rejected by a guard resume the search one
    /// character after their start.
    pub fn apply(&self, text: &str) -> RuleOutcome {
        let regex = match &self.matcher {
            Ok(regex) => regex,
            Err(e) => return RuleOutcome::Error(e.clone()),
        };

        let mut start = 0;
        while start <= text.len() {
            let Some(caps) = regex.captures_at(text, start) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };

            match caps.get(1) {
                Some(value) => {
                    let value_range = value.range();
                    if self.guards.iter().all(|g| g.allows(text, &whole.range(), &value_range)) {
                        return RuleOutcome::Match {
                            value: value.as_str().trim().to_string(),
                            span: value_range,
                        };
                    }
                    trace!("Guard rejected candidate at {} for {}", whole.start(), self.source);
                }
                None => return RuleOutcome::NoMatch,
            }

            start = next_char_boundary(text, whole.start());
        }

        RuleOutcome::NoMatch
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("source", &self.source)
            .field("tier", &self.tier)
            .field("guards", &self.guards)
            .field("valid", &self.matcher.is_ok())
            .finish()
    }
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len() + 1)
}

fn line_at(text: &str, pos: usize) -> &str {
    let start = text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len());
    &text[start..end]
}

fn ends_with_ignore_case(haystack: &str, word: &str) -> bool {
    haystack.len() >= word.len()
        && haystack
            .get(haystack.len() - word.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(word))
}

fn starts_with_ignore_case(haystack: &str, word: &str) -> bool {
    haystack
        .get(..word.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(word))
}
