//! Object-creation notifications consumed by the ingestion stage.

use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// One object-creation event from external storage.
///
/// The key arrives percent-encoded with a literal `+` standing for a space,
/// the way storage events encode it on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectNotification {
    pub container: String,
    pub key: String,
    pub event_timestamp: DateTime<Utc>,
}

impl ObjectNotification {
    /// The key as stored in the object store: `+` expanded to a space,
    /// then percent-decoded.
    pub fn decoded_key(&self) -> String {
        decode_object_key(&self.key)
    }

    /// Final path segment of the decoded key.
    pub fn filename(&self) -> String {
        let decoded = self.decoded_key();
        decoded
            .rsplit('/')
            .next()
            .unwrap_or(decoded.as_str())
            .to_string()
    }
}

/// Decode a notification key. Space substitution happens before
/// percent-decoding: an encoded `%2B` must decode to a literal `+`, not to
/// a space.
pub fn decode_object_key(key: &str) -> String {
    let plus_expanded = key.replace('+', " ");
    percent_decode_str(&plus_expanded)
        .decode_utf8_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(key: &str) -> ObjectNotification {
        ObjectNotification {
            container: "uploads".to_string(),
            key: key.to_string(),
            event_timestamp: Utc::now(),
        }
    }

    #[test]
    fn plus_becomes_space() {
        assert_eq!(decode_object_key("folder/a+b.txt"), "folder/a b.txt");
    }

    #[test]
    fn percent_sequences_decode() {
        assert_eq!(decode_object_key("folder/caf%C3%A9.md"), "folder/café.md");
        assert_eq!(decode_object_key("a%20b.txt"), "a b.txt");
    }

    #[test]
    fn plus_substitution_happens_before_percent_decoding() {
        // "%2B" is an encoded literal '+'; decoding order must preserve it.
        assert_eq!(decode_object_key("a%2Bb.txt"), "a+b.txt");
    }

    #[test]
    fn filename_is_last_segment() {
        assert_eq!(notification("folder/a+b.txt").filename(), "a b.txt");
        assert_eq!(notification("deep/nested/path/doc.md").filename(), "doc.md");
        assert_eq!(notification("plain.txt").filename(), "plain.txt");
    }

    #[test]
    fn deserializes_from_wire_format() {
        let raw = r#"{
            "container": "uploads",
            "key": "folder/a+b.txt",
            "eventTimestamp": "2024-03-01T12:00:00Z"
        }"#;
        let parsed: ObjectNotification = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.container, "uploads");
        assert_eq!(parsed.decoded_key(), "folder/a b.txt");
    }
}
