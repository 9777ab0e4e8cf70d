//! The `{{WORD:n}}` marker protocol shared with the rendering layer.

use crate::types::{MixedContentResult, WordMetadata};

pub const MARKER_PREFIX: &str = "{{WORD:";
pub const MARKER_SUFFIX: &str = "}}";

/// Marker token for `index`.
pub fn marker(index: usize) -> String {
    format!("{MARKER_PREFIX}{index}{MARKER_SUFFIX}")
}

/// Split marked text into literal pieces and marker indices, in order.
fn scan(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(MARKER_PREFIX) {
        let after = &rest[start + MARKER_PREFIX.len()..];
        let digits = after.chars().take_while(char::is_ascii_digit).count();
        let parsed = after[..digits].parse::<usize>().ok();

        match parsed {
            Some(index) if after[digits..].starts_with(MARKER_SUFFIX) => {
                pieces.push(Piece::Literal(&rest[..start]));
                pieces.push(Piece::Marker(index));
                rest = &after[digits + MARKER_SUFFIX.len()..];
            }
            _ => {
                let literal_end = start + MARKER_PREFIX.len();
                pieces.push(Piece::Literal(&rest[..literal_end]));
                rest = &rest[literal_end..];
            }
        }
    }
    pieces.push(Piece::Literal(rest));
    pieces
}

enum Piece<'a> {
    Literal(&'a str),
    Marker(usize),
}

impl MixedContentResult {
    /// Indices of the markers in `text`, left to right.
    pub fn marker_indices(&self) -> Vec<usize> {
        scan(&self.text)
            .into_iter()
            .filter_map(|p| match p {
                Piece::Marker(i) => Some(i),
                Piece::Literal(_) => None,
            })
            .collect()
    }

    /// Replace every marker with the string chosen by `pick`.
    ///
    /// Markers without metadata are left as they are.
    pub fn substitute<F>(&self, pick: F) -> String
    where
        F: Fn(&WordMetadata) -> &str,
    {
        let mut out = String::with_capacity(self.text.len());
        for piece in scan(&self.text) {
            match piece {
                Piece::Literal(s) => out.push_str(s),
                Piece::Marker(index) => match self.word_metadata.iter().find(|m| m.index == index)
                {
                    Some(meta) => out.push_str(pick(meta)),
                    None => out.push_str(&marker(index)),
                },
            }
        }
        out
    }

    /// The text with every marker turned back into its original word.
    pub fn restore_original(&self) -> String {
        self.substitute(|m| &m.original)
    }

    /// The text with every marker showing its translation.
    pub fn render_translated(&self) -> String {
        self.substitute(|m| &m.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DirectionFlag, Language};
    use pretty_assertions::assert_eq;

    fn meta(index: usize, original: &str, translation: &str) -> WordMetadata {
        WordMetadata {
            index,
            original: original.to_string(),
            translation: translation.to_string(),
            direction: DirectionFlag::ShowTargetFromEnglish,
            source_lang: Language::English,
            target_lang: Language::Spanish,
            provider: "test".to_string(),
        }
    }

    #[test]
    fn marker_format() {
        assert_eq!(marker(0), "{{WORD:0}}");
        assert_eq!(marker(12), "{{WORD:12}}");
    }

    #[test]
    fn substitutes_both_ways() {
        let result = MixedContentResult {
            text: "The {{WORD:0}} sat on the {{WORD:1}}.".to_string(),
            word_metadata: vec![meta(0, "cat", "gato"), meta(1, "mat", "alfombra")],
        };
        assert_eq!(result.marker_indices(), vec![0, 1]);
        assert_eq!(result.restore_original(), "The cat sat on the mat.");
        assert_eq!(result.render_translated(), "The gato sat on the alfombra.");
    }

    #[test]
    fn malformed_markers_stay_literal() {
        let result = MixedContentResult {
            text: "{{WORD:x}} and {{WORD:3".to_string(),
            word_metadata: vec![],
        };
        assert!(result.marker_indices().is_empty());
        assert_eq!(result.restore_original(), "{{WORD:x}} and {{WORD:3");
    }

    #[test]
    fn unknown_index_is_kept() {
        let result = MixedContentResult {
            text: "a {{WORD:7}} b".to_string(),
            word_metadata: vec![],
        };
        assert_eq!(result.restore_original(), "a {{WORD:7}} b");
    }
}
