use std::io::Write;
use std::path::Path;

use crate::error::OutputError;
use crate::models::TimedEntry;

/// Added before truncating to whole seconds so 12.0 stored as 11.999999... renders as 12
const TIME_EPSILON_SECS: f64 = 0.000_001;

/// Format seconds as H:MM:SS, discarding the sub-second part
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        (seconds + TIME_EPSILON_SECS).floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{}:{:02}:{:02}", hours, minutes, secs)
}

/// Format one entry as a transcript line, blank line included
pub fn format_entry<E: TimedEntry>(entry: &E) -> String {
    format!(
        "[{}] - Speaker {}: {} - [{}]\n\n",
        format_timestamp(entry.start()),
        entry.speaker(),
        entry.text(),
        format_timestamp(entry.end())
    )
}

/// Render a sequence of entries in order
pub fn render_entries<E: TimedEntry>(entries: &[E]) -> String {
    entries.iter().map(format_entry).collect()
}

/// Write entries to `path`, replacing any existing file.
///
/// The parent directory must already exist.
pub fn write_entries<E: TimedEntry>(entries: &[E], path: &Path) -> Result<(), OutputError> {
    let to_output_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = std::fs::File::create(path).map_err(to_output_error)?;
    file.write_all(render_entries(entries).as_bytes())
        .map_err(to_output_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeywordHit, Speaker, Utterance};

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "0:00:00");
        assert_eq!(format_timestamp(12.0), "0:00:12");
        assert_eq!(format_timestamp(3661.2), "1:01:01");
        assert_eq!(format_timestamp(59.999), "0:00:59");
        assert_eq!(format_timestamp(90_000.0), "25:00:00");
    }

    #[test]
    fn test_format_timestamp_near_integer_boundary() {
        let t = 4.35_f64 * 100.0;
        assert!(t < 435.0);
        assert_eq!(format_timestamp(t), "0:07:15");
    }

    #[test]
    fn test_format_timestamp_clamps_invalid() {
        assert_eq!(format_timestamp(-3.0), "0:00:00");
        assert_eq!(format_timestamp(f64::NAN), "0:00:00");
    }

    #[test]
    fn test_render_entries() {
        let utterances = vec![
            Utterance {
                start: 0.0,
                speaker: Speaker::Known(0),
                text: "hi there".to_string(),
                end: 2.0,
            },
            Utterance {
                start: 6.0,
                speaker: Speaker::Unresolved,
                text: "bye".to_string(),
                end: 7.0,
            },
        ];

        assert_eq!(
            render_entries(&utterances),
            "[0:00:00] - Speaker 0: hi there - [0:00:02]\n\n\
             [0:00:06] - Speaker -1: bye - [0:00:07]\n\n"
        );
    }

    #[test]
    fn test_write_entries_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kwds_doc.txt");
        std::fs::write(&path, "stale contents").unwrap();

        let hits = vec![KeywordHit {
            start: 65.0,
            speaker: Speaker::Known(1),
            keyword: "invoice".to_string(),
            end: 65.7,
        }];
        write_entries(&hits, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "[0:01:05] - Speaker 1: invoice - [0:01:05]\n\n");
    }

    #[test]
    fn test_write_entries_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("conv_doc.txt");

        let err = write_entries::<Utterance>(&[], &path).unwrap_err();
        assert!(matches!(err, OutputError::Write { .. }));
        assert!(!dir.path().join("missing").exists());
    }
}
