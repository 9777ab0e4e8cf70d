//! Part-of-speech tagging.

use regex::Regex;

use crate::error::TagError;
use crate::types::PartOfSpeech;

/// One tagged token and where it starts in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub text: String,
    pub pos: PartOfSpeech,
    /// Byte offset into the tagged text.
    pub offset: usize,
}

/// Anything that can assign parts of speech to the tokens of a text.
pub trait PartOfSpeechTagger: Send + Sync {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TagError>;
}

const TOKEN_PATTERN: &str = r"[\p{L}\p{N}]+(?:['’][\p{L}]+)*|[^\s\p{L}\p{N}]";

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "some", "any", "no", "every", "each", "all", "both", "either", "neither", "much",
    "many", "few", "several",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself", "yourself",
    "himself", "herself", "itself", "ourselves", "themselves", "who", "whom", "whose", "which",
    "what", "something", "anything", "nothing", "everything", "someone", "anyone", "everyone",
    "nobody", "somebody", "mine", "yours", "hers", "ours", "theirs",
];

const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "of", "off", "over",
    "under", "near", "without", "within", "along", "across", "behind", "beyond", "around",
    "among", "since", "until", "upon", "toward", "towards",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "if", "because", "although", "though", "while",
    "whereas", "unless", "than", "whether", "when", "where", "as",
];

const AUXILIARIES: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't", "can't", "won't",
    "i'm", "it's", "you're", "we're", "they're", "i've", "i'll",
];

const PARTICLES: &[&str] = &[
    "not", "there", "here", "very", "too", "also", "just", "then", "yes", "oh", "okay", "please",
];

const COMMON_VERBS: &[&str] = &[
    "go", "goes", "went", "gone", "make", "makes", "made", "take", "takes", "took", "taken",
    "see", "sees", "saw", "seen", "come", "comes", "came", "know", "knows", "knew", "known",
    "get", "gets", "got", "give", "gives", "gave", "given", "find", "finds", "think", "thinks",
    "thought", "tell", "tells", "told", "become", "becomes", "became", "leave", "leaves", "feel",
    "feels", "felt", "bring", "brings", "brought", "begin", "begins", "began", "keep", "keeps",
    "kept", "hold", "holds", "held", "write", "writes", "wrote", "stand", "stands", "stood",
    "hear", "hears", "heard", "run", "runs", "ran", "meet", "meets", "met", "eat", "eats", "ate",
    "sleep", "sleeps", "slept", "speak", "speaks", "spoke", "read", "reads", "say", "says", "said",
    "jump", "jumps", "walk", "walks", "want", "wants", "like", "likes", "need", "needs", "love",
    "loves", "sing", "sings", "sang", "swim", "swims", "swam", "fly", "flies", "flew", "buy",
    "buys", "bought", "learn", "learns", "study", "studies", "travel", "travels",
];

const COMMON_ADJECTIVES: &[&str] = &[
    "good", "bad", "new", "old", "big", "small", "great", "little", "long", "short", "high",
    "low", "young", "quick", "slow", "brown", "red", "blue", "green", "black", "white", "yellow",
    "happy", "sad", "lazy", "bright", "dark", "warm", "cold", "hot", "early", "late", "easy",
    "hard", "strong", "weak", "quiet", "loud", "rich", "poor", "clean", "dirty", "deep", "fresh",
    "free", "full", "ready", "simple", "strange", "clear", "tall", "soft", "sweet", "busy",
];

const COMMON_ADVERBS: &[&str] = &[
    "often", "always", "never", "sometimes", "soon", "already", "still", "again", "almost",
    "perhaps", "maybe", "together", "today", "tomorrow", "yesterday", "now", "later", "away",
    "outside", "inside", "everywhere", "rather", "quite", "seldom", "well", "fast",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "al", "ic", "less", "ish",
];

/// Lexicon and suffix-rule tagger for English.
///
/// Needs no model files; good enough to separate content words from
/// function words, which is all the classifier relies on.
pub struct LexiconTagger {
    token_re: Regex,
}

impl LexiconTagger {
    pub fn new() -> Result<Self, TagError> {
        let token_re =
            Regex::new(TOKEN_PATTERN).map_err(|e| TagError::Unavailable(e.to_string()))?;
        Ok(Self { token_re })
    }

    fn tag_word(word: &str, sentence_start: bool) -> PartOfSpeech {
        let lower = word.to_lowercase();
        let lower = lower.replace('’', "'");
        let w = lower.as_str();

        if DETERMINERS.contains(&w) {
            return PartOfSpeech::Determiner;
        }
        if PRONOUNS.contains(&w) {
            return PartOfSpeech::Pronoun;
        }
        if PREPOSITIONS.contains(&w) {
            return PartOfSpeech::Preposition;
        }
        if CONJUNCTIONS.contains(&w) {
            return PartOfSpeech::Conjunction;
        }
        if AUXILIARIES.contains(&w) {
            return PartOfSpeech::Auxiliary;
        }
        if PARTICLES.contains(&w) {
            return PartOfSpeech::Other;
        }
        if w.chars().all(|c| c.is_numeric()) {
            return PartOfSpeech::Numeral;
        }

        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        if capitalized && !sentence_start {
            return PartOfSpeech::ProperNoun;
        }

        if COMMON_VERBS.contains(&w) {
            return PartOfSpeech::Verb;
        }
        if COMMON_ADJECTIVES.contains(&w) {
            return PartOfSpeech::Adjective;
        }
        if COMMON_ADVERBS.contains(&w) {
            return PartOfSpeech::Adverb;
        }

        let len = w.chars().count();
        if len > 4 && w.ends_with("ly") {
            return PartOfSpeech::Adverb;
        }
        if len > 4 && (w.ends_with("ing") || w.ends_with("ed")) {
            return PartOfSpeech::Verb;
        }
        if len > 5 && (w.ends_with("ize") || w.ends_with("ify")) {
            return PartOfSpeech::Verb;
        }
        if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| w.ends_with(s)) {
            return PartOfSpeech::Adjective;
        }

        PartOfSpeech::Noun
    }
}

impl PartOfSpeechTagger for LexiconTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TagError> {
        let mut tokens = Vec::new();
        let mut sentence_start = true;
        let mut last_end = 0;

        for m in self.token_re.find_iter(text) {
            if text[last_end..m.start()].contains('\n') {
                sentence_start = true;
            }
            last_end = m.end();

            let token = m.as_str();
            let is_word = token.chars().next().is_some_and(char::is_alphanumeric);

            if !is_word {
                if matches!(token, "." | "!" | "?") {
                    sentence_start = true;
                }
                tokens.push(TaggedToken {
                    text: token.to_string(),
                    pos: PartOfSpeech::Punctuation,
                    offset: m.start(),
                });
                continue;
            }

            tokens.push(TaggedToken {
                text: token.to_string(),
                pos: Self::tag_word(token, sentence_start),
                offset: m.start(),
            });
            sentence_start = false;
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags(text: &str) -> Vec<(String, PartOfSpeech)> {
        LexiconTagger::new()
            .unwrap()
            .tag(text)
            .unwrap()
            .into_iter()
            .map(|t| (t.text, t.pos))
            .collect()
    }

    #[test]
    fn tags_simple_sentence() {
        assert_eq!(
            tags("The quick brown fox jumps."),
            vec![
                ("The".to_string(), PartOfSpeech::Determiner),
                ("quick".to_string(), PartOfSpeech::Adjective),
                ("brown".to_string(), PartOfSpeech::Adjective),
                ("fox".to_string(), PartOfSpeech::Noun),
                ("jumps".to_string(), PartOfSpeech::Verb),
                (".".to_string(), PartOfSpeech::Punctuation),
            ]
        );
    }

    #[test]
    fn capitalized_mid_sentence_is_proper_noun() {
        let tagged = tags("We flew to Tokyo yesterday. Tokyo was busy.");
        assert_eq!(tagged[3], ("Tokyo".to_string(), PartOfSpeech::ProperNoun));
        // Sentence-initial capital is not enough on its own.
        assert_eq!(tagged[6], ("Tokyo".to_string(), PartOfSpeech::Noun));
    }

    #[test]
    fn suffix_rules() {
        let tagged = tags("she carefully organized dangerous expeditions");
        assert_eq!(tagged[1].1, PartOfSpeech::Adverb);
        assert_eq!(tagged[2].1, PartOfSpeech::Verb);
        assert_eq!(tagged[3].1, PartOfSpeech::Adjective);
        assert_eq!(tagged[4].1, PartOfSpeech::Noun);
    }

    #[test]
    fn offsets_point_into_text() {
        let text = "Hello, wide world";
        let tokens = LexiconTagger::new().unwrap().tag(text).unwrap();
        for token in tokens {
            assert_eq!(&text[token.offset..token.offset + token.text.len()], token.text);
        }
    }

    #[test]
    fn keeps_apostrophes_and_digits_inside_tokens() {
        let tagged = tags("the fox's den2");
        assert_eq!(tagged[1].0, "fox's");
        assert_eq!(tagged[2].0, "den2");
    }
}
