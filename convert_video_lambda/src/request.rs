use types::ConversionRequest;

pub const MISSING_FIELDS_MESSAGE: &str =
    "Required fields are missing in request body";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields(Vec<&'static str>),
    #[error("video_source_url must be an s3:// object URI")]
    InvalidSourceUrl,
}

impl ValidationError {
    /// Why the request was rejected, naming the fields at fault.
    pub fn reason(&self) -> String {
        match self {
            Self::MissingFields(fields) => {
                format!("missing or empty fields: {}", fields.join(", "))
            }
            Self::InvalidSourceUrl => self.to_string(),
        }
    }
}

/// A request with every required field present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest {
    pub video_source_url: String,
    pub destination_bucket: String,
    pub destination_bucket_region: String,
    pub unique_id: String,
}

impl ValidRequest {
    /// Last path segment of the source URL.
    pub fn source_file_name(&self) -> &str {
        source_file_name(&self.video_source_url).unwrap_or_default()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn source_file_name(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|name| !name.is_empty())
}

pub fn validate(request: ConversionRequest) -> Result<ValidRequest, ValidationError> {
    let (video_source_url, destination_bucket, destination_bucket_region, unique_id) =
        match (
            non_empty(request.video_source_url),
            non_empty(request.destination_bucket),
            non_empty(request.destination_bucket_region),
            non_empty(request.unique_id.map(|id| id.to_string())),
        ) {
            (Some(url), Some(bucket), Some(region), Some(id)) => {
                (url, bucket, region, id)
            }
            (url, bucket, region, id) => {
                let missing = [
                    ("video_source_url", url.is_none()),
                    ("destination_bucket", bucket.is_none()),
                    ("destination_bucket_region", region.is_none()),
                    ("uniqueId", id.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, missing)| missing.then_some(field))
                .collect();

                return Err(ValidationError::MissingFields(missing));
            }
        };

    let (bucket, key) = video_source_url
        .strip_prefix("s3://")
        .and_then(|object_path| object_path.split_once('/'))
        .ok_or(ValidationError::InvalidSourceUrl)?;
    if bucket.is_empty() || source_file_name(key).is_none() {
        return Err(ValidationError::InvalidSourceUrl);
    }

    Ok(ValidRequest {
        video_source_url,
        destination_bucket,
        destination_bucket_region,
        unique_id,
    })
}
