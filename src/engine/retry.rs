// src/engine/retry.rs

//! Serializable retry predicates evaluated against captured output.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// A single output matcher.
///
/// Matchers are tagged plain data rather than closures so a retry policy
/// can travel with its config across thread, task, and worker-process
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMatcher {
    /// Substring match on the full captured output.
    Contains(String),
    /// Regex match on the full captured output.
    Pattern(String),
}

impl OutputMatcher {
    fn matches(&self, output: &str) -> bool {
        match self {
            OutputMatcher::Contains(substring) => output.contains(substring),
            // Patterns are compiled and rejected before the first attempt
            // (RetryWhen::validate); a pattern that still fails to compile
            // here never matches.
            OutputMatcher::Pattern(pattern) => {
                Regex::new(pattern).is_ok_and(|re| re.is_match(output))
            }
        }
    }
}

/// Logical-OR accumulation of output matchers.
///
/// Empty means "never retry". A failed attempt is eligible for retry when
/// *any* matcher matches its captured output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetryWhen {
    matchers: Vec<OutputMatcher>,
}

impl RetryWhen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a matcher to the OR-list.
    pub fn or(mut self, matcher: OutputMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Retry when the output contains `substring`.
    pub fn or_contains(self, substring: impl Into<String>) -> Self {
        self.or(OutputMatcher::Contains(substring.into()))
    }

    /// Retry when the output matches the regex `pattern`.
    ///
    /// The pattern is compiled eagerly so a bad pattern fails here, at
    /// configuration time, not mid-run.
    pub fn or_matching(self, pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        Regex::new(&pattern).map_err(|e| {
            Error::InvalidConfig(format!("invalid retry_when pattern '{pattern}': {e}"))
        })?;
        Ok(self.or(OutputMatcher::Pattern(pattern)))
    }

    /// Will always fail.
    ///
    /// Retry predicates must be plain serializable matchers so the engine
    /// can run inside an isolated worker; arbitrary closures cannot cross
    /// that boundary. Use [`RetryWhen::or_contains`] or
    /// [`RetryWhen::or_matching`] instead.
    #[deprecated(note = "closures are not supported; use or_contains or or_matching")]
    pub fn or_predicate<F>(self, _predicate: F) -> Result<Self>
    where
        F: Fn(&str) -> bool,
    {
        Err(Error::UnsupportedPredicate(
            "retry predicates must be serializable so the retry loop can run in an \
             isolated worker; closures cannot cross that boundary. Use or_contains \
             for substring matches or or_matching for regex matches."
                .to_string(),
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Pure OR-fold over the matchers. No side effects.
    pub fn is_satisfied_by(&self, output: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(output))
    }

    /// Compile every pattern matcher, rejecting the policy if any fails.
    ///
    /// [`RetryWhen::or_matching`] already compiles eagerly; this catches
    /// policies built another way (deserialized, or via [`RetryWhen::or`]).
    pub fn validate(&self) -> Result<()> {
        for matcher in &self.matchers {
            if let OutputMatcher::Pattern(pattern) = matcher {
                Regex::new(pattern).map_err(|e| {
                    Error::InvalidConfig(format!(
                        "invalid retry_when pattern '{pattern}': {e}"
                    ))
                })?;
            }
        }
        Ok(())
    }
}
