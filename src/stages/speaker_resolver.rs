use tracing::warn;

use crate::models::{Speaker, SpeakerSegment};

/// Maximum distance in seconds between a word start and a segment edge for
/// the word to still be attributed to that segment
pub const ADJACENCY_TOLERANCE_SECS: f64 = 0.5;

/// Diarization segments in their original order, used to attribute intervals
#[derive(Debug, Clone, Copy)]
pub struct SpeakerTimeline<'a> {
    segments: &'a [SpeakerSegment],
}

impl<'a> SpeakerTimeline<'a> {
    pub fn new(segments: &'a [SpeakerSegment]) -> Self {
        Self { segments }
    }

    /// Attribute the interval `[start, end]` to a speaker.
    ///
    /// Segments are scanned in order and the first one satisfying any rule
    /// wins:
    /// 1. `start` lies inside the segment
    /// 2. `end` lies inside the segment
    /// 3. `start` is within the tolerance of the segment's end
    /// 4. `start` is within the tolerance of the segment's start
    ///
    /// When nothing matches the interval is logged and `Unresolved` returned.
    pub fn resolve(&self, start: f64, end: f64) -> Speaker {
        let matched = self
            .segments
            .iter()
            .find(|seg| matches_segment(seg, start, end));
        match matched {
            Some(seg) => Speaker::Known(seg.speaker),
            None => {
                warn!(start, end, "No speaker segment matches interval");
                Speaker::Unresolved
            }
        }
    }
}

fn matches_segment(seg: &SpeakerSegment, start: f64, end: f64) -> bool {
    seg.contains(start)
        || seg.contains(end)
        || (start - seg.to).abs() <= ADJACENCY_TOLERANCE_SECS
        || (start - seg.from).abs() <= ADJACENCY_TOLERANCE_SECS
}

/// Resolve a single interval against `segments`
pub fn resolve_speaker(segments: &[SpeakerSegment], start: f64, end: f64) -> Speaker {
    SpeakerTimeline::new(segments).resolve(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_speakers() -> Vec<SpeakerSegment> {
        vec![
            SpeakerSegment::new(0.0, 5.0, 0),
            SpeakerSegment::new(5.0, 10.0, 1),
        ]
    }

    #[test]
    fn test_start_inside_segment() {
        let segments = two_speakers();
        assert_eq!(resolve_speaker(&segments, 1.0, 2.0), Speaker::Known(0));
        assert_eq!(resolve_speaker(&segments, 6.0, 7.0), Speaker::Known(1));
    }

    #[test]
    fn test_shared_boundary_goes_to_first_segment() {
        let segments = two_speakers();
        assert_eq!(resolve_speaker(&segments, 5.0, 5.4), Speaker::Known(0));
    }

    #[test]
    fn test_end_inside_segment() {
        let segments = vec![SpeakerSegment::new(3.0, 4.0, 2)];
        // start is 1.0s before the segment, too far for the tolerance
        assert_eq!(resolve_speaker(&segments, 2.0, 3.5), Speaker::Known(2));
    }

    #[test]
    fn test_start_shortly_after_segment_end() {
        let segments = vec![
            SpeakerSegment::new(0.0, 5.0, 0),
            SpeakerSegment::new(8.0, 9.0, 1),
        ];
        assert_eq!(resolve_speaker(&segments, 5.3, 5.6), Speaker::Known(0));
        assert_eq!(resolve_speaker(&segments, 5.6, 5.9), Speaker::Unresolved);
    }

    #[test]
    fn test_tolerance_edge_is_inclusive() {
        let segments = vec![
            SpeakerSegment::new(0.0, 5.0, 0),
            SpeakerSegment::new(8.0, 9.0, 1),
        ];
        // exactly 0.5s after the first segment's end
        assert_eq!(resolve_speaker(&segments, 5.5, 5.7), Speaker::Known(0));
        // exactly 0.5s before the second segment's start
        assert_eq!(resolve_speaker(&segments, 7.5, 7.6), Speaker::Known(1));
    }

    #[test]
    fn test_start_shortly_before_segment_start() {
        let segments = vec![SpeakerSegment::new(10.0, 12.0, 3)];
        assert_eq!(resolve_speaker(&segments, 9.6, 9.9), Speaker::Known(3));
        assert_eq!(resolve_speaker(&segments, 9.4, 9.9), Speaker::Unresolved);
    }

    #[test]
    fn test_first_matching_segment_wins_over_closer_one() {
        // The word's start lies inside the second segment, but the first one
        // matches on its end time and is scanned first.
        let segments = vec![
            SpeakerSegment::new(2.0, 3.0, 0),
            SpeakerSegment::new(1.0, 2.0, 1),
        ];
        assert_eq!(resolve_speaker(&segments, 1.5, 2.5), Speaker::Known(0));
    }

    #[test]
    fn test_overlapping_segments_resolve_in_order() {
        let segments = vec![
            SpeakerSegment::new(0.0, 4.0, 1),
            SpeakerSegment::new(2.0, 6.0, 0),
        ];
        assert_eq!(resolve_speaker(&segments, 3.0, 3.5), Speaker::Known(1));
    }

    #[test]
    fn test_empty_timeline_is_unresolved() {
        assert_eq!(resolve_speaker(&[], 1.0, 2.0), Speaker::Unresolved);
    }

    #[test]
    fn test_gapless_segments_resolve_by_start() {
        let segments: Vec<SpeakerSegment> = (0..10)
            .map(|i| SpeakerSegment::new(i as f64 * 2.0, (i + 1) as f64 * 2.0, i % 3))
            .collect();
        let timeline = SpeakerTimeline::new(&segments);

        // Starts more than the tolerance past a boundary, so the previous
        // segment's end rule cannot claim them first
        for seg in &segments {
            for offset in [0.75, 1.25, 1.9] {
                let start = seg.from + offset;
                assert_eq!(
                    timeline.resolve(start, start + 0.05),
                    Speaker::Known(seg.speaker)
                );
            }
        }
    }

    #[test]
    fn test_start_just_past_boundary_stays_with_previous_speaker() {
        let segments = two_speakers();
        assert_eq!(resolve_speaker(&segments, 5.2, 5.6), Speaker::Known(0));
    }
}
