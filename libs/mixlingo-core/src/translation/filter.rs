//! Acceptance rules for provider answers.
//!
//! Free providers often echo the input or return a lone punctuation mark
//! when they have nothing; those answers must not reach the cache.

/// Whether `candidate` is a usable translation of `input`.
pub fn is_acceptable(input: &str, candidate: &str) -> bool {
    let candidate = candidate.trim();
    if candidate.chars().count() <= 1 {
        return false;
    }
    if candidate == input.trim() {
        return false;
    }
    candidate.chars().any(char::is_alphanumeric)
}
