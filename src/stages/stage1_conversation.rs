use tracing::debug;

use super::SpeakerTimeline;
use crate::error::BuildError;
use crate::models::{RecognizedWord, Speaker, SpeakerSegment, Utterance};

/// What to do with utterances that end up with no words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyUtterancePolicy {
    /// Emit them. The seed utterance taken from the first speaker segment
    /// appears in the output even when no word extends it, as in existing
    /// transcripts.
    #[default]
    Keep,
    /// Skip any utterance whose text is empty
    Drop,
}

/// Configuration for conversation building
#[derive(Debug, Clone, Default)]
pub struct ConversationConfig {
    pub empty_utterances: EmptyUtterancePolicy,
}

/// Utterance being accumulated; text carries a trailing space per word
#[derive(Debug, Clone)]
struct PendingUtterance {
    start: f64,
    speaker: Speaker,
    text: String,
    end: f64,
}

impl PendingUtterance {
    fn seed(segment: &SpeakerSegment) -> Self {
        Self {
            start: segment.from,
            speaker: Speaker::Known(segment.speaker),
            text: String::new(),
            end: segment.to,
        }
    }

    fn from_word(word: &RecognizedWord, speaker: Speaker) -> Self {
        let mut pending = Self {
            start: word.start,
            speaker,
            text: String::new(),
            end: word.end,
        };
        pending.append(word);
        pending
    }

    fn append(&mut self, word: &RecognizedWord) {
        self.text.push_str(&word.text);
        self.text.push(' ');
        self.end = word.end;
    }

    fn finish(self) -> Utterance {
        Utterance {
            start: self.start,
            speaker: self.speaker,
            text: self.text.trim().to_string(),
            end: self.end,
        }
    }
}

/// Fold state: the open utterance plus everything already closed
#[derive(Debug)]
struct ConversationState {
    current: PendingUtterance,
    finished: Vec<Utterance>,
    policy: EmptyUtterancePolicy,
}

impl ConversationState {
    fn step(mut self, word: &RecognizedWord, speaker: Speaker) -> Self {
        if speaker == self.current.speaker {
            self.current.append(word);
            return self;
        }
        let next = PendingUtterance::from_word(word, speaker);
        let closed = std::mem::replace(&mut self.current, next);
        close_into(&mut self.finished, closed, self.policy);
        self
    }

    fn into_utterances(self) -> Vec<Utterance> {
        let Self {
            current,
            mut finished,
            policy,
        } = self;
        close_into(&mut finished, current, policy);
        finished
    }
}

fn close_into(
    finished: &mut Vec<Utterance>,
    pending: PendingUtterance,
    policy: EmptyUtterancePolicy,
) {
    let utterance = pending.finish();
    if utterance.is_empty() && policy == EmptyUtterancePolicy::Drop {
        debug!(start = utterance.start, end = utterance.end, "Dropping empty utterance");
        return;
    }
    finished.push(utterance);
}

/// Group words into speaker utterances.
///
/// Each word is attributed with the speaker resolver; consecutive words with
/// the same speaker are joined with single spaces. The first speaker segment
/// seeds the initial utterance, so `segments` must not be empty.
pub fn build_conversation(
    words: &[RecognizedWord],
    segments: &[SpeakerSegment],
    config: &ConversationConfig,
) -> Result<Vec<Utterance>, BuildError> {
    let seed = segments.first().ok_or(BuildError::NoSpeakerLabels)?;
    let timeline = SpeakerTimeline::new(segments);

    let initial = ConversationState {
        current: PendingUtterance::seed(seed),
        finished: Vec::new(),
        policy: config.empty_utterances,
    };

    let state = words.iter().fold(initial, |state, word| {
        let speaker = timeline.resolve(word.start, word.end);
        state.step(word, speaker)
    });

    Ok(state.into_utterances())
}
