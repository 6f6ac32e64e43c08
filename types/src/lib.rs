use serde::{Deserialize, Serialize};

/// Body of a `POST` conversion request.
///
/// Every field is optional on the wire so that a request with missing fields
/// can still be read and answered with a validation error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_source_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_bucket: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_bucket_region: Option<String>,

    /// Callers send either a string or a number here.
    #[serde(
        rename = "uniqueId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unique_id: Option<UniqueId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniqueId {
    Text(String),

    Number(serde_json::Number),
}

impl std::fmt::Display for UniqueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResponse {
    pub final_video_url: String,

    pub thumbnail_url: String,

    pub video_s3_key: String,

    pub video_s3_path: String,

    pub final_video_hls_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_numeric_unique_id() {
        let request: ConversionRequest = serde_json::from_str(
            r#"{"video_source_url": "s3://src/video.mp4", "uniqueId": 42}"#,
        )
        .unwrap();

        assert_eq!(request.unique_id.unwrap().to_string(), "42");
        assert!(request.destination_bucket.is_none());
    }

    #[test]
    fn test_request_rejects_object_unique_id() {
        let result = serde_json::from_str::<ConversionRequest>(
            r#"{"uniqueId": {"id": 1}}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_empty_body_object_has_no_fields() {
        let request: ConversionRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, ConversionRequest::default());
    }
}
