use super::SpeakerTimeline;
use crate::models::{KeywordHit, SpeakerSegment, SttResult};

/// Configuration for keyword extraction
#[derive(Debug, Clone, Default)]
pub struct KeywordConfig {
    /// Report only the first match of each keyword within a result section,
    /// the way older reports were produced
    pub first_match_only: bool,
}

/// Attribute every spotted keyword occurrence to a speaker.
///
/// Hits come out in document order: result sections, then keywords within a
/// section, then matches within a keyword. Repeated keywords are not merged.
pub fn extract_keywords(
    results: &[SttResult],
    segments: &[SpeakerSegment],
    config: &KeywordConfig,
) -> Vec<KeywordHit> {
    let timeline = SpeakerTimeline::new(segments);
    let take = if config.first_match_only { 1 } else { usize::MAX };

    results
        .iter()
        .filter_map(|r| r.keywords_result.as_ref())
        .flat_map(|keywords| keywords.iter())
        .flat_map(|(keyword, matches)| {
            matches.iter().take(take).map(move |m| KeywordHit {
                start: m.start_time,
                speaker: timeline.resolve(m.start_time, m.end_time),
                keyword: keyword.to_string(),
                end: m.end_time,
            })
        })
        .collect()
}
