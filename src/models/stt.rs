use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::{RecognizedWord, SpeakerId, SpeakerSegment};

/// Root of a speech-to-text recognition document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SttResponse {
    pub results: Vec<SttResult>,
    /// Diarization intervals; absent in documents recognized without speaker labels
    #[serde(default)]
    pub speaker_labels: Vec<SpeakerSegment>,
}

/// One recognition section of the audio
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SttResult {
    #[serde(default)]
    pub alternatives: Vec<SttAlternative>,
    #[serde(default)]
    pub keywords_result: Option<KeywordResults>,
    #[serde(default, rename = "final")]
    pub is_final: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SttAlternative {
    #[serde(default)]
    pub timestamps: Vec<WordTimestamp>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// `[word, start, end]` as emitted by the recognizer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WordTimestamp(pub String, pub f64, pub f64);

/// A single keyword occurrence
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeywordMatch {
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub normalized_text: Option<String>,
}

/// Keyword matches of one result section, in document order
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeywordResults(pub Vec<(String, Vec<KeywordMatch>)>);

impl KeywordResults {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[KeywordMatch])> {
        self.0.iter().map(|(k, m)| (k.as_str(), m.as_slice()))
    }
}

impl<'de> Deserialize<'de> for KeywordResults {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeywordResultsVisitor;

        impl<'de> Visitor<'de> for KeywordResultsVisitor {
            type Value = KeywordResults;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of keyword to match list")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((keyword, matches)) =
                    map.next_entry::<String, Vec<KeywordMatch>>()?
                {
                    entries.push((keyword, matches));
                }
                Ok(KeywordResults(entries))
            }
        }

        deserializer.deserialize_map(KeywordResultsVisitor)
    }
}

impl SttResponse {
    /// All recognized words across results, taken from each result's first alternative
    pub fn words(&self) -> Vec<RecognizedWord> {
        self.results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .flat_map(|a| a.timestamps.iter())
            .map(RecognizedWord::from)
            .collect()
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Distinct speaker ids present in the diarization labels, sorted
    pub fn speakers(&self) -> Vec<SpeakerId> {
        let mut speakers: Vec<SpeakerId> =
            self.speaker_labels.iter().map(|s| s.speaker).collect();
        speakers.sort();
        speakers.dedup();
        speakers
    }
}
