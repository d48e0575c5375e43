use serde::Serialize;

use super::{Speaker, WordTimestamp};

/// A recognized word with its timing in seconds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognizedWord {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl RecognizedWord {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

impl From<&WordTimestamp> for RecognizedWord {
    fn from(ts: &WordTimestamp) -> Self {
        Self {
            text: ts.0.clone(),
            start: ts.1,
            end: ts.2,
        }
    }
}

/// A maximal run of consecutive words attributed to one speaker
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub start: f64,
    pub speaker: Speaker,
    pub text: String,
    pub end: f64,
}

impl Utterance {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// One keyword occurrence attributed to a speaker
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordHit {
    pub start: f64,
    pub speaker: Speaker,
    pub keyword: String,
    pub end: f64,
}

/// A timed, speaker-attributed line of output
pub trait TimedEntry {
    fn start(&self) -> f64;
    fn speaker(&self) -> Speaker;
    fn text(&self) -> &str;
    fn end(&self) -> f64;
}

impl TimedEntry for Utterance {
    fn start(&self) -> f64 {
        self.start
    }
    fn speaker(&self) -> Speaker {
        self.speaker
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn end(&self) -> f64 {
        self.end
    }
}

impl TimedEntry for KeywordHit {
    fn start(&self) -> f64 {
        self.start
    }
    fn speaker(&self) -> Speaker {
        self.speaker
    }
    fn text(&self) -> &str {
        &self.keyword
    }
    fn end(&self) -> f64 {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_from_timestamp() {
        let ts = WordTimestamp("hello".to_string(), 0.5, 0.8);
        let word = RecognizedWord::from(&ts);
        assert_eq!(word, RecognizedWord::new("hello", 0.5, 0.8));
    }

    #[test]
    fn test_keyword_hit_text_is_keyword() {
        let hit = KeywordHit {
            start: 1.0,
            speaker: Speaker::Known(1),
            keyword: "refund".to_string(),
            end: 1.4,
        };
        assert_eq!(hit.text(), "refund");
        assert_eq!(hit.speaker(), Speaker::Known(1));
    }
}
