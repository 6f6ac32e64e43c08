use chrono::{DateTime, Utc};

/// Second-granularity timestamp used in output prefixes.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Object key prefix the HLS output is written under, without a leading
/// slash: `public/{unique_id}/{timestamp}/HLS/{base_name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    key: String,
}

impl OutputLocation {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// `s3://{bucket}/{key}`, the HLS destination handed to MediaConvert.
    pub fn s3_uri(&self, bucket: &str) -> String {
        format!("s3://{bucket}/{}", self.key)
    }

    /// Key of the master playlist MediaConvert writes for this prefix.
    pub fn master_playlist_key(&self) -> String {
        format!("{}.m3u8", self.key)
    }
}

/// File name without its last extension.
///
/// Leading dots do not start an extension, so `.video` is kept whole.
pub fn base_name(file_name: &str) -> &str {
    let leading_dots = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[leading_dots..].rfind('.') {
        Some(index) => &file_name[..leading_dots + index],
        None => file_name,
    }
}

pub fn derive_output_location(
    unique_id: &str,
    source_file_name: &str,
    now: DateTime<Utc>,
) -> OutputLocation {
    OutputLocation {
        key: format!(
            "public/{unique_id}/{}/HLS/{}",
            now.format(TIMESTAMP_FORMAT),
            base_name(source_file_name)
        ),
    }
}

/// URLs of the job's output, known before the job runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub final_video_url: String,
    pub video_s3_key: String,
    pub video_s3_path: String,
    pub final_video_hls_url: String,
}

pub fn compute_result_urls(
    location: &OutputLocation,
    destination_bucket: &str,
    region: &str,
) -> ConversionResult {
    let s3_path = location.s3_uri(destination_bucket);

    ConversionResult {
        final_video_url: s3_path.clone(),
        video_s3_key: location.key().to_string(),
        video_s3_path: s3_path,
        final_video_hls_url: format!(
            "https://{destination_bucket}.s3.{region}.amazonaws.com/{}",
            location.master_playlist_key()
        ),
    }
}

impl From<ConversionResult> for types::ConversionResponse {
    fn from(result: ConversionResult) -> Self {
        Self {
            final_video_url: result.final_video_url,
            // thumbnails are not generated
            thumbnail_url: String::new(),
            video_s3_key: result.video_s3_key,
            video_s3_path: result.video_s3_path,
            final_video_hls_url: result.final_video_hls_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 8, 14, 30, 22).unwrap()
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("video.mp4"), "video");
        assert_eq!(base_name("archive.tar.gz"), "archive.tar");
        assert_eq!(base_name("video"), "video");
        assert_eq!(base_name(".video"), ".video");
        assert_eq!(base_name("..video.mov"), "..video");
    }

    #[test]
    fn test_derive_output_location() {
        let location = derive_output_location("abc123", "video.mp4", clock());

        assert_eq!(location.key(), "public/abc123/20251108143022/HLS/video");
        assert_eq!(
            location.s3_uri("out"),
            "s3://out/public/abc123/20251108143022/HLS/video"
        );
    }

    #[test]
    fn test_derive_output_location_is_deterministic() {
        let first = derive_output_location("abc123", "video.mp4", clock());
        let second = derive_output_location(
            "abc123",
            "video.mp4",
            clock() + chrono::Duration::milliseconds(900),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn test_derive_output_location_changes_with_the_second() {
        let first = derive_output_location("abc123", "video.mp4", clock());
        let second = derive_output_location(
            "abc123",
            "video.mp4",
            clock() + chrono::Duration::seconds(1),
        );

        assert_ne!(first, second);
    }

    #[test]
    fn test_compute_result_urls() {
        let location = derive_output_location("abc123", "video.mp4", clock());
        let result = compute_result_urls(&location, "out", "us-east-1");

        assert_eq!(
            result,
            ConversionResult {
                final_video_url:
                    "s3://out/public/abc123/20251108143022/HLS/video"
                        .to_string(),
                video_s3_key: "public/abc123/20251108143022/HLS/video"
                    .to_string(),
                video_s3_path: "s3://out/public/abc123/20251108143022/HLS/video"
                    .to_string(),
                final_video_hls_url: "https://out.s3.us-east-1.amazonaws.com/public/abc123/20251108143022/HLS/video.m3u8"
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_hls_url_uses_bucket_region() {
        let location =
            derive_output_location("42", "clip.final.mov", clock());
        let result = compute_result_urls(&location, "media", "eu-west-2");

        assert_eq!(
            result.final_video_hls_url,
            format!(
                "https://media.s3.eu-west-2.amazonaws.com/{}.m3u8",
                location.key()
            )
        );
        assert!(result.video_s3_key.ends_with("/HLS/clip.final"));
    }

    #[test]
    fn test_response_has_empty_thumbnail() {
        let location = derive_output_location("abc123", "video.mp4", clock());
        let response: types::ConversionResponse =
            compute_result_urls(&location, "out", "us-east-1").into();

        assert_eq!(response.thumbnail_url, "");
        assert_eq!(response.video_s3_key, location.key());
    }
}
