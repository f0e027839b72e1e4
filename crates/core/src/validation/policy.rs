//! Harmful-term content policy.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, PolicyConfig};

/// Built-in harmful term list.
pub const DEFAULT_HARMFUL_TERMS: &[&str] = &[
    "gun",
    "bomb",
    "kill",
    "murder",
    "shoot",
    "attack",
    "weapon",
    "explosive",
    "bullet",
    "acid",
    "sniper",
    "grenade",
    "terror",
    "assault",
    "execute",
    "behead",
    "poison",
    "cyanide",
    "sarin",
    "anthrax",
    "suicide bomber",
    "arson",
    "sabotage",
    "molotov",
    "lynch",
    "genocide",
    "riot",
    "vandalism",
    "rape",
    "slaughter",
    "firearm",
    "extremist",
    "burn down",
    "hate crime",
    "abuse",
    "threaten",
];

/// How policy terms are matched against input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Term may appear anywhere, including inside a longer word.
    #[default]
    Substring,
    /// Term must be delimited by non-word characters or the input edges.
    WordBoundary,
}

/// A normalized, swappable list of disallowed terms.
#[derive(Debug, Clone)]
pub struct ContentPolicy {
    terms: Vec<String>,
    mode: MatchMode,
    // Only built for WordBoundary.
    pattern: Option<Regex>,
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self {
            terms: normalize_terms(DEFAULT_HARMFUL_TERMS.iter().copied()),
            mode: MatchMode::Substring,
            pattern: None,
        }
    }
}

impl ContentPolicy {
    /// Build a policy from arbitrary terms.
    ///
    /// Terms are trimmed and lowercased; blanks and duplicates are dropped.
    pub fn new<I, S>(terms: I, mode: MatchMode) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = normalize_terms(terms);
        let pattern = match mode {
            MatchMode::WordBoundary if !terms.is_empty() => Some(build_word_pattern(&terms)?),
            _ => None,
        };

        Ok(Self {
            terms,
            mode,
            pattern,
        })
    }

    /// Build the policy described by the `[policy]` config section.
    pub fn from_config(config: &PolicyConfig) -> Result<Self, ConfigError> {
        let base: Vec<String> = match &config.harmful_terms {
            Some(terms) => terms.clone(),
            None => DEFAULT_HARMFUL_TERMS.iter().map(|t| t.to_string()).collect(),
        };

        Self::new(
            base.iter().chain(config.extra_terms.iter()),
            config.match_mode,
        )
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Return the first policy term found in `input`, if any.
    pub fn find_match(&self, input: &str) -> Option<&str> {
        let lowered = input.to_lowercase();

        match &self.pattern {
            Some(pattern) => {
                let found = pattern.find(&lowered)?;
                self.terms
                    .iter()
                    .find(|t| t.as_str() == found.as_str())
                    .map(String::as_str)
            }
            None => self
                .terms
                .iter()
                .find(|t| lowered.contains(t.as_str()))
                .map(String::as_str),
        }
    }

    pub fn is_violated_by(&self, input: &str) -> bool {
        self.find_match(input).is_some()
    }
}

fn normalize_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for term in terms {
        let term = term.as_ref().trim().to_lowercase();
        if !term.is_empty() && !normalized.contains(&term) {
            normalized.push(term);
        }
    }
    normalized
}

/// `terms` must be non-empty; an empty alternation matches everywhere.
fn build_word_pattern(terms: &[String]) -> Result<Regex, ConfigError> {
    let alternation = terms
        .iter()
        .map(|t| regex_lite::escape(t))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(r"\b(?:{})\b", alternation))
        .map_err(|e| ConfigError::ValidationError(format!("invalid policy pattern: {}", e)))
}
