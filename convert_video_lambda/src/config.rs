use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// IAM role MediaConvert assumes to read the source and write the output.
    /// `MediaConvertRole` is accepted for older deployments.
    #[serde(alias = "mediaconvertrole")]
    pub media_convert_role: String,

    pub media_convert_endpoint: Option<String>,

    #[serde(default = "default_discover_endpoint")]
    pub discover_media_convert_endpoint: bool,

    pub job_template_path: Option<PathBuf>,
}

const fn default_discover_endpoint() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_config_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env(
                "MEDIA_CONVERT_ROLE",
                "arn:aws:iam::123456789012:role/MediaConvertRole",
            );

            let config: Config = ht_app::config_figment().extract()?;
            assert_eq!(
                config.media_convert_role,
                "arn:aws:iam::123456789012:role/MediaConvertRole"
            );
            assert!(config.media_convert_endpoint.is_none());
            assert!(config.discover_media_convert_endpoint);
            assert!(config.job_template_path.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_config_accepts_legacy_role_variable() {
        Jail::expect_with(|jail| {
            jail.set_env(
                "MediaConvertRole",
                "arn:aws:iam::123456789012:role/Legacy",
            );

            let config: Config = ht_app::config_figment().extract()?;
            assert_eq!(
                config.media_convert_role,
                "arn:aws:iam::123456789012:role/Legacy"
            );
            Ok(())
        });
    }

    #[test]
    fn test_config_overrides() {
        Jail::expect_with(|jail| {
            jail.set_env("MEDIA_CONVERT_ROLE", "arn:aws:iam::1:role/r");
            jail.set_env(
                "MEDIA_CONVERT_ENDPOINT",
                "https://abcd1234.mediaconvert.us-east-1.amazonaws.com",
            );
            jail.set_env("DISCOVER_MEDIA_CONVERT_ENDPOINT", "false");
            jail.set_env("JOB_TEMPLATE_PATH", "/opt/templates/job.json");

            let config: Config = ht_app::config_figment().extract()?;
            assert_eq!(
                config.media_convert_endpoint.as_deref(),
                Some("https://abcd1234.mediaconvert.us-east-1.amazonaws.com")
            );
            assert!(!config.discover_media_convert_endpoint);
            assert_eq!(
                config.job_template_path,
                Some(PathBuf::from("/opt/templates/job.json"))
            );
            Ok(())
        });
    }

    #[test]
    fn test_config_requires_role() {
        Jail::expect_with(|_jail| {
            assert!(ht_app::config_figment().extract::<Config>().is_err());
            Ok(())
        });
    }
}
