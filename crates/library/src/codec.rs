//! Document encoding.

use pro_core::{Error, PresentationFile, Result};

/// Converts presentation documents to and from bytes.
pub trait DocumentCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PresentationFile>;
    fn encode(&self, file: &PresentationFile) -> Result<Vec<u8>>;
}

/// JSON representation of the decoded presentation structure.
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write indented JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl DocumentCodec for JsonCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PresentationFile> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::CodecError(format!("Failed to decode presentation: {}", e)))
    }

    fn encode(&self, file: &PresentationFile) -> Result<Vec<u8>> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(file)
        } else {
            serde_json::to_vec(file)
        };
        encoded.map_err(|e| Error::CodecError(format!("Failed to encode presentation: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pro_core::{Action, Cue, CueGroup, SlideAction};

    #[test]
    fn test_decode_tagged_actions() {
        let json = r#"{
            "name": "DDS 001",
            "cues": [{
                "uuid": "A",
                "enabled": false,
                "actions": [
                    {"type": "media", "name": "Background"},
                    {"type": "slide", "label": "", "slide": {"elements": [
                        {"text": {"rtf_data": "{\\rtf1 x}"}}
                    ]}}
                ]
            }],
            "cue_groups": [{"name": "Verse", "identifiers": ["A"]}]
        }"#;

        let file = JsonCodec::new().decode(json.as_bytes()).unwrap();
        assert_eq!(file.cues.len(), 1);
        assert!(matches!(file.cues[0].actions[0], Action::Media(_)));
        match &file.cues[0].actions[1] {
            Action::Slide(action) => {
                assert_eq!(action.slide.text().unwrap().rtf_data, r"{\rtf1 x}");
            }
            other => panic!("expected slide action, got {}", other.kind()),
        }
        assert_eq!(file.cue_groups[0].identifiers[0].as_str(), "A");
    }

    #[test]
    fn test_encode_decode() {
        let cue = Cue::new(vec![Action::Slide(SlideAction::default())]);
        let file = PresentationFile {
            name: "Test".to_string(),
            cue_groups: vec![CueGroup {
                name: String::new(),
                identifiers: vec![cue.uuid.clone()],
            }],
            cues: vec![cue],
            ..Default::default()
        };

        let codec = JsonCodec::new().with_pretty(true);
        let bytes = codec.encode(&file).unwrap();
        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(decoded.cues, file.cues);
        assert_eq!(decoded.cue_groups, file.cue_groups);
    }

    #[test]
    fn test_decode_garbage() {
        let result = JsonCodec::new().decode(b"\x00\x01not json");
        assert!(matches!(result, Err(Error::CodecError(_))));
    }
}
