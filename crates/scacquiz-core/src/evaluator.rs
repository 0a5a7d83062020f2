//! Answer evaluation.
//!
//! Choice questions demand exact equality (single) or exact set equality
//! (multi). Free-text answers run a layered policy that forgives case,
//! punctuation, partial names, and light typos, in that order; the first
//! layer that matches wins, and an answer that survives every layer is
//! incorrect.

use std::collections::BTreeSet;

use crate::model::{Expected, Question, Shape};
use crate::similarity::{normalize, ratio, tight_normalize};

/// Words ignored by the word-overlap layers: articles, conjunctions, and
/// the corporate suffixes that pad out carrier names.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "of", "inc", "llc", "ltd", "co", "corp",
    "company", "corporation", "incorporated", "group", "holdings", "services",
];

/// Tunable thresholds for free-text matching.
///
/// The defaults are the engine's contract; tests probe their boundaries.
#[derive(Debug, Clone)]
pub struct MatchPolicy {
    /// Shortest string that substring containment accepts.
    pub containment_min_chars: usize,
    /// Shortest word that word-level containment accepts.
    pub word_match_min_chars: usize,
    /// Fraction of expected words the answer must cover.
    pub overlap_threshold: f64,
    /// Whole-string similarity accepted as a match.
    pub ratio_threshold: f64,
    /// Words excluded from the word-overlap layers.
    pub stop_words: Vec<String>,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            containment_min_chars: 3,
            word_match_min_chars: 4,
            overlap_threshold: 0.6,
            ratio_threshold: 0.80,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Checks submitted answers against a question's canonical answer.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    policy: MatchPolicy,
}

impl Evaluator {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Decide correctness for one submission.
    ///
    /// Pure: same question, answer, and policy always give the same
    /// verdict. A shape paired with the wrong expected-answer kind cannot
    /// come out of the generator and is judged incorrect rather than
    /// panicking.
    pub fn evaluate(&self, question: &Question, raw_answer: &str) -> bool {
        match (question.shape, &question.expected) {
            (Shape::SingleChoice, Expected::Text(want)) => raw_answer.trim() == want,
            (Shape::MultiChoice, Expected::Set(want)) => &split_selection(raw_answer) == want,
            (Shape::FreeText, Expected::Text(want)) => self.free_text_matches(want, raw_answer),
            _ => false,
        }
    }

    /// The layered free-text policy.
    ///
    /// 1. A trimmed-empty answer is incorrect, whatever the expected value.
    /// 2. Normalized (lowercase, trimmed) equality.
    /// 3. Tight-normalized equality, so "Con-way" matches "conway".
    /// 4. Substring containment either way, once the contained string is
    ///    long enough to mean something.
    /// 5. Any answer word matching any expected word, stop words removed:
    ///    tight equality, or containment for words past the length gate.
    /// 6. Enough of the expected words covered by the answer words.
    /// 7. Whole-string similarity ratio as the last resort for typos.
    pub fn free_text_matches(&self, expected: &str, answer: &str) -> bool {
        let policy = &self.policy;

        if answer.trim().is_empty() {
            return false;
        }

        let loose_answer = normalize(answer);
        let loose_expected = normalize(expected);
        if loose_answer == loose_expected {
            return true;
        }

        let tight_answer = tight_normalize(answer);
        let tight_expected = tight_normalize(expected);
        if tight_answer == tight_expected {
            return true;
        }

        if contains_either(&tight_answer, &tight_expected, policy.containment_min_chars)
            || contains_either(&loose_answer, &loose_expected, policy.containment_min_chars)
        {
            return true;
        }

        let answer_words = self.content_words(&loose_answer);
        let expected_words = self.content_words(&loose_expected);
        for answer_word in &answer_words {
            for expected_word in &expected_words {
                if words_match(answer_word, expected_word, policy.word_match_min_chars) {
                    return true;
                }
            }
        }

        if !expected_words.is_empty() {
            let covered = answer_words.intersection(&expected_words).count();
            let overlap = covered as f64 / expected_words.len() as f64;
            if overlap >= policy.overlap_threshold {
                return true;
            }
        }

        ratio(&loose_answer, &loose_expected) >= policy.ratio_threshold
    }

    /// Whitespace-split words with stop words and bare punctuation
    /// removed. Words keep their punctuation; membership in the stop list
    /// is checked on the alphanumeric core, so "inc." is still dropped.
    fn content_words<'a>(&self, normalized: &'a str) -> BTreeSet<&'a str> {
        normalized
            .split_whitespace()
            .filter(|word| {
                let core = word.trim_matches(|c: char| !c.is_alphanumeric());
                !core.is_empty() && !self.policy.stop_words.iter().any(|stop| stop == core)
            })
            .collect()
    }
}

/// Split a multi-choice submission on `;` and newlines into a trimmed,
/// deduplicated set. Empty segments are dropped.
pub fn split_selection(raw: &str) -> BTreeSet<String> {
    raw.split([';', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn contains_either(a: &str, b: &str, min_chars: usize) -> bool {
    (a.chars().count() >= min_chars && b.contains(a))
        || (b.chars().count() >= min_chars && a.contains(b))
}

fn words_match(a: &str, b: &str, min_chars: usize) -> bool {
    let tight_a = tight_normalize(a);
    let tight_b = tight_normalize(b);
    if tight_a == tight_b {
        return true;
    }
    contains_either(&tight_a, &tight_b, min_chars)
}
