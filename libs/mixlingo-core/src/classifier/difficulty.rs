//! Word difficulty heuristic.
//!
//! Pure function of the word and its part of speech, so the same input
//! always scores the same.

use crate::types::PartOfSpeech;

const EASY_SUFFIXES: &[&str] = &["ing", "ed", "er", "est", "ly"];
const HARD_SUFFIXES: &[&str] = &["tion", "sion", "ment", "ness", "ity", "ous", "ful"];

/// Estimate a word's difficulty on a 1-10 scale.
pub fn estimate_level(word: &str, pos: PartOfSpeech) -> u8 {
    let lower = word.to_lowercase();
    let len = lower.chars().count();

    let mut level = 5.0_f64;
    if len <= 4 {
        level -= 1.0;
    }
    if len >= 8 {
        level += 1.0;
    }
    if len >= 12 {
        level += 1.0;
    }

    level += match pos {
        PartOfSpeech::Verb => 1.0,
        PartOfSpeech::Adverb => 1.5,
        PartOfSpeech::Adjective => 0.5,
        PartOfSpeech::ProperNoun => -1.0,
        _ => 0.0,
    };

    if EASY_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        level -= 0.5;
    }
    if HARD_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        level += 0.5;
    }

    level.clamp(1.0, 10.0).round() as u8
}

/// Map a 1-10 difficulty onto the dictionary's 1-5 scale.
pub fn dictionary_level(level: u8) -> u8 {
    ((level.clamp(1, 10) + 1) / 2).clamp(1, 5)
}
