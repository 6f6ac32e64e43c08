use crate::job_settings::JobSettings;
use std::{collections::BTreeMap, path::PathBuf};

/// The HLS ladder template shipped with the function.
const EMBEDDED_TEMPLATE: &str = include_str!("../job.json");

/// User metadata key MediaConvert echoes back in job state change events.
pub const ASSET_ID_METADATA_KEY: &str = "assetID";

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read job template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("job template is not a valid job settings document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("job template has no inputs")]
    MissingInput,
    #[error("job template has no output groups")]
    MissingOutputGroup,
}

/// Where the job template is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    File(PathBuf),
}

impl TemplateSource {
    /// Use the file at `path` if one is configured, the embedded template otherwise.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Embedded, Self::File)
    }

    pub async fn load(&self) -> Result<JobTemplate, TemplateError> {
        match self {
            Self::Embedded => JobTemplate::parse(EMBEDDED_TEMPLATE),
            Self::File(path) => {
                let contents = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| TemplateError::Read {
                        path: path.clone(),
                        source,
                    })?;
                JobTemplate::parse(&contents)
            }
        }
    }
}

/// A checked, immutable job settings template.
///
/// A template always has at least one input and one output group, which are
/// the two places a request's locations are written into.
#[derive(Debug, Clone, PartialEq)]
pub struct JobTemplate {
    settings: JobSettings,
}

impl JobTemplate {
    pub fn parse(json: &str) -> Result<Self, TemplateError> {
        let settings: JobSettings = serde_json::from_str(json)?;

        if settings.inputs.is_empty() {
            return Err(TemplateError::MissingInput);
        }
        if settings.output_groups.is_empty() {
            return Err(TemplateError::MissingOutputGroup);
        }

        Ok(Self { settings })
    }

    pub const fn settings(&self) -> &JobSettings {
        &self.settings
    }
}

/// A template filled in for one request, ready to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSpecification {
    settings: JobSettings,
    user_metadata: BTreeMap<String, String>,
}

impl JobSpecification {
    pub const fn settings(&self) -> &JobSettings {
        &self.settings
    }

    pub const fn user_metadata(&self) -> &BTreeMap<String, String> {
        &self.user_metadata
    }

    #[must_use]
    pub fn with_asset_id(mut self, asset_id: &str) -> Self {
        self.user_metadata
            .insert(ASSET_ID_METADATA_KEY.to_string(), asset_id.to_string());
        self
    }

    /// The source the job reads from.
    pub fn input_uri(&self) -> &str {
        &self.settings.inputs[0].file_input
    }

    /// The HLS destination prefix the job writes to.
    pub fn output_prefix(&self) -> &str {
        &self.settings.output_groups[0]
            .output_group_settings
            .hls_group_settings
            .destination
    }
}

/// Copy `template` with the first input pointed at `input_uri` and the first
/// output group's HLS destination set to `output_prefix`.
///
/// Nothing else in the template is touched.
pub fn build_job_specification(
    template: &JobTemplate,
    input_uri: &str,
    output_prefix: &str,
) -> JobSpecification {
    let mut settings = template.settings.clone();

    settings.inputs[0].file_input = input_uri.to_string();
    settings.output_groups[0]
        .output_group_settings
        .hls_group_settings
        .destination = output_prefix.to_string();

    JobSpecification {
        settings,
        user_metadata: BTreeMap::new(),
    }
}
