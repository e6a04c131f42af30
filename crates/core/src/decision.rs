//! The boundary to whoever settles ambiguous cases: a person at a terminal,
//! or a fixed policy in automated runs and tests.

use std::collections::VecDeque;

/// Answers questions the editor cannot settle on its own.
///
/// With non-empty `candidates` the answer should be one of them. With no
/// candidates the answer is free-form, e.g. a yes/no confirmation.
pub trait DecisionProvider {
    fn decide(&mut self, prompt: &str, candidates: &[String]) -> String;
}

impl<F> DecisionProvider for F
where
    F: FnMut(&str, &[String]) -> String,
{
    fn decide(&mut self, prompt: &str, candidates: &[String]) -> String {
        self(prompt, candidates)
    }
}

/// Replays queued answers and records every request it receives.
///
/// Once the queue is empty it answers with an empty string, which callers
/// treat as "take the default".
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    answers: VecDeque<String>,
    requests: Vec<(String, Vec<String>)>,
}

impl ScriptedDecisions {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            requests: Vec::new(),
        }
    }

    /// Every `(prompt, candidates)` pair asked so far.
    pub fn requests(&self) -> &[(String, Vec<String>)] {
        &self.requests
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn decide(&mut self, prompt: &str, candidates: &[String]) -> String {
        self.requests.push((prompt.to_string(), candidates.to_vec()));
        self.answers.pop_front().unwrap_or_default()
    }
}

/// Whether a free-form confirmation answer means "no".
///
/// Anything that does not start with `n` counts as yes, including no answer.
pub fn is_no(answer: &str) -> bool {
    answer
        .trim()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'n'))
}

/// Whether a free-form confirmation answer means "yes".
///
/// Only answers starting with `y` count, so no answer means no.
pub fn is_yes(answer: &str) -> bool {
    answer
        .trim()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut decisions = ScriptedDecisions::new(["a", "b"]);
        assert_eq!(decisions.decide("first", &[]), "a");
        assert_eq!(decisions.decide("second", &["x".to_string()]), "b");
        assert_eq!(decisions.decide("third", &[]), "");
        assert_eq!(decisions.requests().len(), 3);
        assert_eq!(decisions.requests()[1].1, vec!["x"]);
    }

    #[test]
    fn test_closure_provider() {
        let mut calls = 0;
        let mut provider = |_: &str, candidates: &[String]| {
            calls += 1;
            candidates.first().cloned().unwrap_or_default()
        };
        assert_eq!(provider.decide("p", &["90".to_string()]), "90");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_is_no() {
        assert!(is_no("n"));
        assert!(is_no(" No"));
        assert!(!is_no(""));
        assert!(!is_no("y"));
        assert!(!is_no("whatever"));
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("Y"));
        assert!(is_yes("yes"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
    }
}
