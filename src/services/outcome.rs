//! Outcome classification for completion text.
//!
//! A lexical heuristic, not a proof: the classifier scans the completion
//! for fixed failure and success indicators and applies length thresholds.
//! It is best-effort and can misread text that narrates an obstacle while
//! still delivering a workaround ("despite being unable to access X, I
//! completed Y" scores on keyword precedence). When uncertain it fails
//! closed: ambiguous completions are classified as failures.

/// Verdict on a task's completion text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failure,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Completions shorter than this are treated as incomplete.
const MIN_RESULT_LEN: usize = 50;

/// Completions at or above this length with no failure signal count as
/// substantial results.
const SUBSTANTIAL_RESULT_LEN: usize = 100;

const FAILURE_INDICATORS: &[&str] = &[
    "failed",
    "error",
    "cannot",
    "unable",
    "impossible",
    "not possible",
    "failed to",
    "could not",
    "unsuccessful",
    "incomplete",
    "blocked",
    "permission denied",
    "access denied",
    "insufficient",
    "missing",
    "i cannot",
    "i am unable",
    "sorry, i cannot",
    "unfortunately",
];

const SUCCESS_INDICATORS: &[&str] = &[
    "completed",
    "successful",
    "done",
    "finished",
    "accomplished",
    "achieved",
    "implemented",
    "resolved",
    "solved",
    "created",
    "delivered",
    "established",
    "built",
    "designed",
    "developed",
];

/// Classify a completion as success or failure.
///
/// Rules, in order:
/// 1. Trimmed length below 50 chars: Failure (too short to be a real result).
/// 2. Any failure indicator present with no success indicator: Failure.
/// 3. Trimmed length of at least 100 chars: Success.
/// 4. Otherwise: Failure.
pub fn classify(completion: &str) -> TaskOutcome {
    let trimmed = completion.trim();

    if trimmed.len() < MIN_RESULT_LEN {
        return TaskOutcome::Failure;
    }

    let lower = trimmed.to_lowercase();
    let has_failure_indicator = FAILURE_INDICATORS.iter().any(|kw| lower.contains(kw));
    let has_success_indicator = SUCCESS_INDICATORS.iter().any(|kw| lower.contains(kw));

    if has_failure_indicator && !has_success_indicator {
        return TaskOutcome::Failure;
    }

    if trimmed.len() >= SUBSTANTIAL_RESULT_LEN {
        return TaskOutcome::Success;
    }

    TaskOutcome::Failure
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_failure() {
        // Exactly 49 characters, no keywords
        let text = "a".repeat(49);
        assert_eq!(classify(&text), TaskOutcome::Failure);
    }

    #[test]
    fn test_hundred_chars_of_clean_prose_is_success() {
        // Exactly 100 characters of neutral prose with no failure keywords
        let base = "The analysis yielded a thorough plan covering scope and rollout";
        let text = format!("{base}{}", "x".repeat(100 - base.len()));
        assert_eq!(text.len(), 100);
        assert_eq!(classify(&text), TaskOutcome::Success);
    }

    #[test]
    fn test_failure_keyword_wins_without_success_keyword() {
        let text = "The request could not be satisfied because the upstream system was \
                    stuck and access denied throughout the whole window of the change.";
        assert!(text.len() >= 100);
        assert_eq!(classify(text), TaskOutcome::Failure);
    }

    #[test]
    fn test_both_keywords_in_ambiguous_band_is_failure() {
        // "failed" and "completed" both present; below the substantial
        // length threshold the verdict stays Failure
        let text = "The step failed at first but then completed eventually here";
        assert!(text.len() >= 50 && text.len() < 100);
        assert_eq!(classify(text), TaskOutcome::Failure);
    }

    #[test]
    fn test_success_keyword_neutralizes_failure_gate_at_length() {
        // Both indicators present and the text is substantial: the failure
        // gate does not trip, so the length rule accepts it
        let text = "Although the first attempt failed, the second pass completed the \
                    migration and delivered the verified dataset to the warehouse.";
        assert!(text.len() >= 100);
        assert_eq!(classify(text), TaskOutcome::Success);
    }

    #[test]
    fn test_medium_length_without_signals_is_failure() {
        // Between 50 and 99 chars, no keywords either way: fail closed
        let text = "Here is a short observation about the request, with no outcome";
        assert!(text.len() >= 50 && text.len() < 100);
        assert_eq!(classify(text), TaskOutcome::Failure);
    }

    #[test]
    fn test_whitespace_is_trimmed_before_measuring() {
        let padded = format!("   {}   ", "b".repeat(49));
        assert_eq!(classify(&padded), TaskOutcome::Failure);
    }

    #[test]
    fn test_case_insensitive_keywords() {
        let text = "UNFORTUNATELY the provisioning step was rejected upstream and the \
                    environment stayed in its previous broken condition.";
        assert_eq!(classify(text), TaskOutcome::Failure);
    }

    #[test]
    fn test_long_clarifying_question_slips_through() {
        let text = "Before I proceed, may I clarify which region should host the \
                    deployment? I want to be sure about every requirement first.";
        // No keyword either way; over 100 chars means the length rule accepts
        // it. Keyword lists are the only guard here, which is why prompts
        // carry the autonomy directive.
        assert!(text.len() >= 100);
        assert_eq!(classify(text), TaskOutcome::Success);
    }
}
