use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric speaker identifier assigned by the diarizer, taken as-is
pub type SpeakerId = i64;

/// Speaker attribution for a word or keyword hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    /// Matched a diarization segment
    Known(SpeakerId),
    /// No segment matched the interval
    Unresolved,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::Known(id) => write!(f, "{}", id),
            // Existing transcripts carry -1 for unattributed lines
            Speaker::Unresolved => f.write_str("-1"),
        }
    }
}

/// One contiguous diarization interval, times in seconds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpeakerSegment {
    pub from: f64,
    pub to: f64,
    pub speaker: SpeakerId,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default, rename = "final")]
    pub is_final: bool,
}

impl SpeakerSegment {
    pub fn new(from: f64, to: f64, speaker: SpeakerId) -> Self {
        Self {
            from,
            to,
            speaker,
            confidence: None,
            is_final: false,
        }
    }

    /// Whether `t` lies in `[from, to]`, bounds inclusive
    pub fn contains(&self, t: f64) -> bool {
        t >= self.from && t <= self.to
    }
}
