use std::path::Path;

use crate::error::LoadError;
use crate::models::SttResponse;

/// Load a recognition document from disk
pub fn load_stt_file(path: &Path) -> Result<SttResponse, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_stt_json(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a recognition document, tolerating raw tabs and newlines in the text
pub fn parse_stt_json(raw: &str) -> Result<SttResponse, serde_json::Error> {
    let cleaned = sanitize_raw_json(raw);
    serde_json::from_str(&cleaned)
}

/// Tabs are removed and newlines become spaces, so control characters that
/// leaked into string values no longer break the parser.
fn sanitize_raw_json(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c != '\t')
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stt_json() {
        let json = r#"{
            "results": [{"alternatives": [{"timestamps": [["hi", 0.0, 1.0], ["there", 1.0, 2.0]]}]}],
            "speaker_labels": [{"from": 0.0, "to": 5.0, "speaker": 0}]
        }"#;

        let response = parse_stt_json(json).unwrap();

        assert_eq!(response.words().len(), 2);
        assert_eq!(response.speaker_labels.len(), 1);
    }

    #[test]
    fn test_raw_control_characters_inside_strings() {
        let json = "{\"results\": [{\"alternatives\": [{\"transcript\": \"line\tone\nline two\", \"timestamps\": []}]}], \"speaker_labels\": []}";

        let response = parse_stt_json(json).unwrap();

        assert_eq!(
            response.results[0].alternatives[0].transcript.as_deref(),
            Some("lineone line two")
        );
    }

    #[test]
    fn test_negative_speaker_label_is_accepted() {
        let json = r#"{"results": [], "speaker_labels": [{"from": 0.0, "to": 1.0, "speaker": -1}]}"#;

        let response = parse_stt_json(json).unwrap();

        assert_eq!(response.speakers(), vec![-1]);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_stt_json("{\"results\": [").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_stt_file(Path::new("/nonexistent/doc.json")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }
}
