use crate::job_settings as settings;
use crate::job_template::JobSpecification;
use aws_sdk_mediaconvert::{
    Client,
    error::{DisplayErrorContext, SdkError},
    operation::create_job::CreateJobError,
    types as mc,
};
use tokio::sync::OnceCell;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("not authorized to submit jobs: {0}")]
    Unauthorized(String),
    #[error("job specification rejected: {0}")]
    Rejected(String),
    #[error("transcoding service unavailable: {0}")]
    Unavailable(String),
}

impl SubmissionError {
    fn from_create_job<R>(err: &SdkError<CreateJobError, R>) -> Self
    where
        R: std::fmt::Debug,
    {
        let message = DisplayErrorContext(err).to_string();

        if matches!(err, SdkError::ConstructionFailure(_)) {
            return Self::Rejected(message);
        }

        match err.as_service_error() {
            Some(e) if e.is_forbidden_exception() => Self::Unauthorized(message),
            Some(e)
                if e.is_bad_request_exception()
                    || e.is_not_found_exception()
                    || e.is_conflict_exception() =>
            {
                Self::Rejected(message)
            }
            _ => Self::Unavailable(message),
        }
    }
}

/// A submitted job. The job keeps running after this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub id: String,
    pub arn: Option<String>,
}

/// Hands job specifications to the transcoding service.
pub trait JobSubmitter: Send + Sync + 'static {
    fn submit(
        &self,
        job: &JobSpecification,
    ) -> impl Future<Output = Result<JobHandle, SubmissionError>> + Send;
}

/// How the MediaConvert endpoint for job submissions is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointSelection {
    /// Use this URL as is.
    Explicit(String),
    /// Ask `DescribeEndpoints` for the account endpoint once.
    Discover,
    /// Use the SDK's regional endpoint.
    Regional,
}

impl EndpointSelection {
    pub fn new(explicit: Option<String>, discover: bool) -> Self {
        match explicit {
            Some(url) => Self::Explicit(url),
            None if discover => Self::Discover,
            None => Self::Regional,
        }
    }
}

/// Submits jobs through the MediaConvert API.
///
/// The endpoint is resolved on the first submission, not when the process
/// starts. A failed resolution is reported as [`SubmissionError::Unavailable`]
/// and retried by the next submission.
#[derive(Debug)]
pub struct MediaConvertSubmitter {
    client: Client,
    endpoint: EndpointSelection,
    jobs_client: OnceCell<Client>,
    role: String,
}

impl MediaConvertSubmitter {
    pub const fn new(
        client: Client,
        role: String,
        endpoint: EndpointSelection,
    ) -> Self {
        Self {
            client,
            endpoint,
            jobs_client: OnceCell::const_new(),
            role,
        }
    }

    pub fn from_sdk_config(
        aws_config: &aws_config::SdkConfig,
        role: String,
        endpoint: EndpointSelection,
    ) -> Self {
        Self::new(Client::new(aws_config), role, endpoint)
    }

    async fn jobs_client(&self) -> Result<&Client, SubmissionError> {
        self.jobs_client
            .get_or_try_init(|| self.resolve_jobs_client())
            .await
    }

    async fn resolve_jobs_client(&self) -> Result<Client, SubmissionError> {
        let url = match &self.endpoint {
            EndpointSelection::Regional => return Ok(self.client.clone()),
            EndpointSelection::Explicit(url) => url.clone(),
            EndpointSelection::Discover => discover_endpoint(&self.client).await?,
        };

        tracing::info!("Using MediaConvert endpoint {}", url);
        Ok(Client::from_conf(
            self.client.config().to_builder().endpoint_url(url).build(),
        ))
    }
}

#[allow(deprecated)]
async fn discover_endpoint(client: &Client) -> Result<String, SubmissionError> {
    let output = client
        .describe_endpoints()
        .max_results(1)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(
                "DescribeEndpoints failed: {}",
                DisplayErrorContext(&e)
            );
            SubmissionError::Unavailable(
                "failed to resolve the MediaConvert endpoint".to_string(),
            )
        })?;

    output
        .endpoints()
        .first()
        .and_then(|endpoint| endpoint.url())
        .map(ToString::to_string)
        .ok_or_else(|| {
            SubmissionError::Unavailable(
                "DescribeEndpoints returned no endpoint".to_string(),
            )
        })
}

impl JobSubmitter for MediaConvertSubmitter {
    async fn submit(
        &self,
        job: &JobSpecification,
    ) -> Result<JobHandle, SubmissionError> {
        let output = self
            .jobs_client()
            .await?
            .create_job()
            .role(&self.role)
            .settings(job_settings(job.settings()))
            .set_user_metadata(Some(
                job.user_metadata()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ))
            .send()
            .await
            .map_err(|e| SubmissionError::from_create_job(&e))?;

        let created = output.job().ok_or_else(|| {
            SubmissionError::Unavailable(
                "CreateJob response did not include a job".to_string(),
            )
        })?;

        Ok(JobHandle {
            id: created.id().unwrap_or_default().to_string(),
            arn: created.arn().map(ToString::to_string),
        })
    }
}

/// An SDK enum from its wire name. Names the SDK does not know yet are kept
/// as they are and sent unchanged.
fn enumerated<T>(value: Option<&str>) -> Option<T>
where
    T: for<'a> From<&'a str>,
{
    value.map(T::from)
}

/// Convert the template model into the SDK's job settings.
pub fn job_settings(job: &settings::JobSettings) -> mc::JobSettings {
    mc::JobSettings::builder()
        .set_ad_avail_offset(job.ad_avail_offset)
        .set_follow_source(job.follow_source)
        .set_timecode_config(job.timecode_config.as_ref().map(|timecode| {
            mc::TimecodeConfig::builder()
                .set_source(enumerated(timecode.source.as_deref()))
                .set_start(timecode.start.clone())
                .build()
        }))
        .set_inputs(Some(job.inputs.iter().map(input).collect()))
        .set_output_groups(Some(
            job.output_groups.iter().map(output_group).collect(),
        ))
        .build()
}

fn input(input: &settings::Input) -> mc::Input {
    mc::Input::builder()
        .file_input(&input.file_input)
        .set_timecode_source(enumerated(input.timecode_source.as_deref()))
        .set_timecode_start(input.timecode_start.clone())
        .set_audio_selectors(Some(
            input
                .audio_selectors
                .iter()
                .map(|(name, selector)| (name.clone(), audio_selector(selector)))
                .collect(),
        ))
        .set_video_selector(input.video_selector.as_ref().map(|selector| {
            mc::VideoSelector::builder()
                .set_color_space(enumerated(selector.color_space.as_deref()))
                .set_color_space_usage(enumerated(
                    selector.color_space_usage.as_deref(),
                ))
                .set_rotate(enumerated(selector.rotate.as_deref()))
                .set_alpha_behavior(enumerated(
                    selector.alpha_behavior.as_deref(),
                ))
                .build()
        }))
        .set_deblock_filter(enumerated(input.deblock_filter.as_deref()))
        .set_denoise_filter(enumerated(input.denoise_filter.as_deref()))
        .set_filter_enable(enumerated(input.filter_enable.as_deref()))
        .set_filter_strength(input.filter_strength)
        .set_psi_control(enumerated(input.psi_control.as_deref()))
        .set_input_scan_type(enumerated(input.input_scan_type.as_deref()))
        .build()
}

fn audio_selector(selector: &settings::AudioSelector) -> mc::AudioSelector {
    mc::AudioSelector::builder()
        .set_default_selection(enumerated(selector.default_selection.as_deref()))
        .set_selector_type(enumerated(selector.selector_type.as_deref()))
        .set_offset(selector.offset)
        .set_program_selection(selector.program_selection)
        .set_tracks(selector.tracks.clone())
        .build()
}

fn output_group(group: &settings::OutputGroup) -> mc::OutputGroup {
    mc::OutputGroup::builder()
        .set_name(group.name.clone())
        .set_custom_name(group.custom_name.clone())
        .output_group_settings(
            mc::OutputGroupSettings::builder()
                .r#type(mc::OutputGroupType::from(
                    group.output_group_settings.group_type.as_str(),
                ))
                .hls_group_settings(hls_group_settings(
                    &group.output_group_settings.hls_group_settings,
                ))
                .build(),
        )
        .set_outputs(Some(group.outputs.iter().map(output).collect()))
        .build()
}

fn hls_group_settings(hls: &settings::HlsGroupSettings) -> mc::HlsGroupSettings {
    mc::HlsGroupSettings::builder()
        .destination(&hls.destination)
        .set_segment_length(hls.segment_length)
        .set_segment_length_control(enumerated(
            hls.segment_length_control.as_deref(),
        ))
        .set_min_segment_length(hls.min_segment_length)
        .set_min_final_segment_length(hls.min_final_segment_length)
        .set_segment_control(enumerated(hls.segment_control.as_deref()))
        .set_segments_per_subdirectory(hls.segments_per_subdirectory)
        .set_manifest_duration_format(enumerated(
            hls.manifest_duration_format.as_deref(),
        ))
        .set_manifest_compression(enumerated(hls.manifest_compression.as_deref()))
        .set_directory_structure(enumerated(hls.directory_structure.as_deref()))
        .set_stream_inf_resolution(enumerated(
            hls.stream_inf_resolution.as_deref(),
        ))
        .set_codec_specification(enumerated(hls.codec_specification.as_deref()))
        .set_output_selection(enumerated(hls.output_selection.as_deref()))
        .set_program_date_time(enumerated(hls.program_date_time.as_deref()))
        .set_program_date_time_period(hls.program_date_time_period)
        .set_timed_metadata_id3_frame(enumerated(
            hls.timed_metadata_id3_frame.as_deref(),
        ))
        .set_timed_metadata_id3_period(hls.timed_metadata_id3_period)
        .set_caption_language_setting(enumerated(
            hls.caption_language_setting.as_deref(),
        ))
        .set_client_cache(enumerated(hls.client_cache.as_deref()))
        .set_audio_only_header(enumerated(hls.audio_only_header.as_deref()))
        .set_target_duration_compatibility_mode(enumerated(
            hls.target_duration_compatibility_mode.as_deref(),
        ))
        .set_ad_markers(hls.ad_markers.as_ref().map(|markers| {
            markers
                .iter()
                .map(|marker| mc::HlsAdMarkers::from(marker.as_str()))
                .collect()
        }))
        .set_base_url(hls.base_url.clone())
        .build()
}

fn output(output: &settings::Output) -> mc::Output {
    mc::Output::builder()
        .set_name_modifier(output.name_modifier.clone())
        .set_extension(output.extension.clone())
        .container_settings(container_settings(&output.container_settings))
        .set_output_settings(output.output_settings.as_ref().map(|settings| {
            mc::OutputSettings::builder()
                .set_hls_settings(settings.hls_settings.as_ref().map(hls_settings))
                .build()
        }))
        .set_video_description(
            output.video_description.as_ref().map(video_description),
        )
        .set_audio_descriptions(Some(
            output
                .audio_descriptions
                .iter()
                .map(audio_description)
                .collect(),
        ))
        .build()
}

fn container_settings(
    container: &settings::ContainerSettings,
) -> mc::ContainerSettings {
    mc::ContainerSettings::builder()
        .container(mc::ContainerType::from(container.container.as_str()))
        .set_m3u8_settings(container.m3u8_settings.as_ref().map(|m3u8| {
            mc::M3u8Settings::builder()
                .set_audio_duration(enumerated(m3u8.audio_duration.as_deref()))
                .set_audio_frames_per_pes(m3u8.audio_frames_per_pes)
                .set_audio_pids(m3u8.audio_pids.clone())
                .set_nielsen_id3(enumerated(m3u8.nielsen_id3.as_deref()))
                .set_pat_interval(m3u8.pat_interval)
                .set_pcr_control(enumerated(m3u8.pcr_control.as_deref()))
                .set_pcr_pid(m3u8.pcr_pid)
                .set_pmt_interval(m3u8.pmt_interval)
                .set_pmt_pid(m3u8.pmt_pid)
                .set_private_metadata_pid(m3u8.private_metadata_pid)
                .set_program_number(m3u8.program_number)
                .set_scte35_pid(m3u8.scte35_pid)
                .set_scte35_source(enumerated(m3u8.scte35_source.as_deref()))
                .set_timed_metadata(enumerated(m3u8.timed_metadata.as_deref()))
                .set_timed_metadata_pid(m3u8.timed_metadata_pid)
                .set_transport_stream_id(m3u8.transport_stream_id)
                .set_video_pid(m3u8.video_pid)
                .build()
        }))
        .build()
}

fn hls_settings(hls: &settings::HlsSettings) -> mc::HlsSettings {
    mc::HlsSettings::builder()
        .set_audio_group_id(hls.audio_group_id.clone())
        .set_audio_only_container(enumerated(hls.audio_only_container.as_deref()))
        .set_audio_rendition_sets(hls.audio_rendition_sets.clone())
        .set_audio_track_type(enumerated(hls.audio_track_type.as_deref()))
        .set_descriptive_video_service_flag(enumerated(
            hls.descriptive_video_service_flag.as_deref(),
        ))
        .set_i_frame_only_manifest(enumerated(hls.i_frame_only_manifest.as_deref()))
        .set_segment_modifier(hls.segment_modifier.clone())
        .build()
}

fn video_description(video: &settings::VideoDescription) -> mc::VideoDescription {
    mc::VideoDescription::builder()
        .set_width(video.width)
        .set_height(video.height)
        .set_scaling_behavior(enumerated(video.scaling_behavior.as_deref()))
        .set_timecode_insertion(enumerated(video.timecode_insertion.as_deref()))
        .set_anti_alias(enumerated(video.anti_alias.as_deref()))
        .set_sharpness(video.sharpness)
        .set_afd_signaling(enumerated(video.afd_signaling.as_deref()))
        .set_drop_frame_timecode(enumerated(video.drop_frame_timecode.as_deref()))
        .set_respond_to_afd(enumerated(video.respond_to_afd.as_deref()))
        .set_color_metadata(enumerated(video.color_metadata.as_deref()))
        .codec_settings(
            mc::VideoCodecSettings::builder()
                .codec(mc::VideoCodec::from(video.codec_settings.codec.as_str()))
                .set_h264_settings(
                    video.codec_settings.h264_settings.as_ref().map(h264_settings),
                )
                .build(),
        )
        .build()
}

fn h264_settings(h264: &settings::H264Settings) -> mc::H264Settings {
    mc::H264Settings::builder()
        .set_rate_control_mode(enumerated(h264.rate_control_mode.as_deref()))
        .set_bitrate(h264.bitrate)
        .set_max_bitrate(h264.max_bitrate)
        .set_qvbr_settings(h264.qvbr_settings.as_ref().map(|qvbr| {
            mc::H264QvbrSettings::builder()
                .set_qvbr_quality_level(qvbr.qvbr_quality_level)
                .set_qvbr_quality_level_fine_tune(qvbr.qvbr_quality_level_fine_tune)
                .set_max_average_bitrate(qvbr.max_average_bitrate)
                .build()
        }))
        .set_hrd_buffer_size(h264.hrd_buffer_size)
        .set_hrd_buffer_initial_fill_percentage(
            h264.hrd_buffer_initial_fill_percentage,
        )
        .set_scene_change_detect(enumerated(h264.scene_change_detect.as_deref()))
        .set_gop_size(h264.gop_size)
        .set_gop_size_units(enumerated(h264.gop_size_units.as_deref()))
        .set_gop_closed_cadence(h264.gop_closed_cadence)
        .set_gop_b_reference(enumerated(h264.gop_b_reference.as_deref()))
        .set_min_i_interval(h264.min_i_interval)
        .set_number_b_frames_between_reference_frames(
            h264.number_b_frames_between_reference_frames,
        )
        .set_number_reference_frames(h264.number_reference_frames)
        .set_dynamic_sub_gop(enumerated(h264.dynamic_sub_gop.as_deref()))
        .set_codec_profile(enumerated(h264.codec_profile.as_deref()))
        .set_codec_level(enumerated(h264.codec_level.as_deref()))
        .set_entropy_encoding(enumerated(h264.entropy_encoding.as_deref()))
        .set_field_encoding(enumerated(h264.field_encoding.as_deref()))
        .set_interlace_mode(enumerated(h264.interlace_mode.as_deref()))
        .set_syntax(enumerated(h264.syntax.as_deref()))
        .set_slices(h264.slices)
        .set_softness(h264.softness)
        .set_slow_pal(enumerated(h264.slow_pal.as_deref()))
        .set_telecine(enumerated(h264.telecine.as_deref()))
        .set_repeat_pps(enumerated(h264.repeat_pps.as_deref()))
        .set_unregistered_sei_timecode(enumerated(
            h264.unregistered_sei_timecode.as_deref(),
        ))
        .set_quality_tuning_level(enumerated(h264.quality_tuning_level.as_deref()))
        .set_adaptive_quantization(enumerated(
            h264.adaptive_quantization.as_deref(),
        ))
        .set_spatial_adaptive_quantization(enumerated(
            h264.spatial_adaptive_quantization.as_deref(),
        ))
        .set_temporal_adaptive_quantization(enumerated(
            h264.temporal_adaptive_quantization.as_deref(),
        ))
        .set_flicker_adaptive_quantization(enumerated(
            h264.flicker_adaptive_quantization.as_deref(),
        ))
        .set_framerate_control(enumerated(h264.framerate_control.as_deref()))
        .set_framerate_conversion_algorithm(enumerated(
            h264.framerate_conversion_algorithm.as_deref(),
        ))
        .set_framerate_numerator(h264.framerate_numerator)
        .set_framerate_denominator(h264.framerate_denominator)
        .set_par_control(enumerated(h264.par_control.as_deref()))
        .set_par_numerator(h264.par_numerator)
        .set_par_denominator(h264.par_denominator)
        .build()
}

fn audio_description(audio: &settings::AudioDescription) -> mc::AudioDescription {
    mc::AudioDescription::builder()
        .set_audio_source_name(audio.audio_source_name.clone())
        .set_audio_type(audio.audio_type)
        .set_audio_type_control(enumerated(audio.audio_type_control.as_deref()))
        .set_language_code_control(enumerated(
            audio.language_code_control.as_deref(),
        ))
        .set_stream_name(audio.stream_name.clone())
        .codec_settings(
            mc::AudioCodecSettings::builder()
                .codec(mc::AudioCodec::from(audio.codec_settings.codec.as_str()))
                .set_aac_settings(audio.codec_settings.aac_settings.as_ref().map(
                    |aac| {
                        mc::AacSettings::builder()
                            .set_audio_description_broadcaster_mix(enumerated(
                                aac.audio_description_broadcaster_mix.as_deref(),
                            ))
                            .set_bitrate(aac.bitrate)
                            .set_codec_profile(enumerated(
                                aac.codec_profile.as_deref(),
                            ))
                            .set_coding_mode(enumerated(aac.coding_mode.as_deref()))
                            .set_rate_control_mode(enumerated(
                                aac.rate_control_mode.as_deref(),
                            ))
                            .set_raw_format(enumerated(aac.raw_format.as_deref()))
                            .set_sample_rate(aac.sample_rate)
                            .set_specification(enumerated(
                                aac.specification.as_deref(),
                            ))
                            .build()
                    },
                ))
                .build(),
        )
        .build()
}

#[cfg(test)]
pub mod testing {
    //! A fake MediaConvert API for exercising the real SDK client.
    use aws_sdk_mediaconvert::{
        Client,
        config::{BehaviorVersion, Credentials, Region},
    };
    use aws_smithy_http_client::test_util::infallible_client_fn;
    use axum::http::{Response, StatusCode};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    /// A request the fake MediaConvert API received.
    #[derive(Debug, Clone)]
    pub struct Call {
        pub host: String,
        pub path: String,
        pub body: Value,
    }

    pub type Calls = Arc<Mutex<Vec<Call>>>;

    /// A MediaConvert client answering each API path with a fixed status and
    /// body, recording every call it sees.
    pub fn fake_client(
        routes: &[(&'static str, StatusCode, &'static str)],
    ) -> (Client, Calls) {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = calls.clone();
        let routes = routes.to_vec();

        let http_client = infallible_client_fn(move |request| {
            let path = request.uri().path().to_string();
            recorded.lock().unwrap().push(Call {
                host: request.uri().host().unwrap_or_default().to_string(),
                path: path.clone(),
                body: request
                    .body()
                    .bytes()
                    .and_then(|bytes| serde_json::from_slice(bytes).ok())
                    .unwrap_or(Value::Null),
            });

            let (status, body) = routes
                .iter()
                .find(|(route, _, _)| *route == path)
                .map_or((StatusCode::NOT_FOUND, "{}"), |(_, status, body)| {
                    (*status, *body)
                });
            let mut response = Response::builder()
                .status(status)
                .header("content-type", "application/json");
            if status == StatusCode::FORBIDDEN {
                response = response.header("x-amzn-errortype", "ForbiddenException");
            }
            response.body(body.to_string()).unwrap()
        });

        let config = aws_sdk_mediaconvert::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new(
                "AKIDEXAMPLE",
                "secret",
                None,
                None,
                "test",
            ))
            .http_client(http_client)
            .build();

        (Client::from_conf(config), calls)
    }

    pub fn paths(calls: &Calls) -> Vec<String> {
        calls
            .lock()
            .unwrap()
            .iter()
            .map(|call| call.path.clone())
            .collect()
    }
}
