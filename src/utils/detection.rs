// src/utils/detection.rs

/// Literal marker that flags a submitted answer. Matched case-sensitively.
pub const AI_GENERATED_MARKER: &str = "AI-generated";

/// Naive AI-content heuristic: a plain substring check, not a classifier.
pub fn is_suspicious(answer: &str) -> bool {
    answer.contains(AI_GENERATED_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_marker_anywhere_in_answer() {
        assert!(is_suspicious("This is AI-generated text"));
        assert!(is_suspicious("AI-generated"));
    }

    #[test]
    fn ignores_other_spellings() {
        assert!(!is_suspicious("original work"));
        assert!(!is_suspicious("ai-generated"));
        assert!(!is_suspicious("AI generated"));
        assert!(!is_suspicious(""));
    }
}
