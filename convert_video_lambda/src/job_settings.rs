//! Serde model of the MediaConvert job `Settings` document.
//!
//! Covers the settings an HLS job exported from the MediaConvert console
//! carries: file inputs with audio and video selectors, HLS output groups,
//! M3U8 outputs with H.264 video and AAC audio. Keys follow the PascalCase
//! form of console and JSON job exports. Unknown keys are rejected so a
//! template never loses settings silently on its way to the SDK.
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct JobSettings {
    pub ad_avail_offset: Option<i32>,
    pub follow_source: Option<i32>,
    pub timecode_config: Option<TimecodeConfig>,
    pub inputs: Vec<Input>,
    pub output_groups: Vec<OutputGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct TimecodeConfig {
    pub source: Option<String>,
    pub start: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Input {
    /// Overwritten with the request's source for every job.
    #[serde(default)]
    pub file_input: String,
    pub timecode_source: Option<String>,
    pub timecode_start: Option<String>,
    #[serde(default)]
    pub audio_selectors: BTreeMap<String, AudioSelector>,
    pub video_selector: Option<VideoSelector>,
    pub deblock_filter: Option<String>,
    pub denoise_filter: Option<String>,
    pub filter_enable: Option<String>,
    pub filter_strength: Option<i32>,
    pub psi_control: Option<String>,
    pub input_scan_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct AudioSelector {
    pub default_selection: Option<String>,
    pub selector_type: Option<String>,
    pub offset: Option<i32>,
    pub program_selection: Option<i32>,
    pub tracks: Option<Vec<i32>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct VideoSelector {
    pub color_space: Option<String>,
    pub color_space_usage: Option<String>,
    pub rotate: Option<String>,
    pub alpha_behavior: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct OutputGroup {
    pub name: Option<String>,
    pub custom_name: Option<String>,
    pub output_group_settings: OutputGroupSettings,
    pub outputs: Vec<Output>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct OutputGroupSettings {
    #[serde(rename = "Type")]
    pub group_type: String,
    pub hls_group_settings: HlsGroupSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct HlsGroupSettings {
    /// `s3://bucket/prefix`; MediaConvert appends `.m3u8` for the master
    /// playlist and each output's name modifier for the variants.
    /// Overwritten for every job.
    #[serde(default)]
    pub destination: String,
    pub segment_length: Option<i32>,
    pub segment_length_control: Option<String>,
    pub min_segment_length: Option<i32>,
    pub min_final_segment_length: Option<f64>,
    pub segment_control: Option<String>,
    pub segments_per_subdirectory: Option<i32>,
    pub manifest_duration_format: Option<String>,
    pub manifest_compression: Option<String>,
    pub directory_structure: Option<String>,
    pub stream_inf_resolution: Option<String>,
    pub codec_specification: Option<String>,
    pub output_selection: Option<String>,
    pub program_date_time: Option<String>,
    pub program_date_time_period: Option<i32>,
    pub timed_metadata_id3_frame: Option<String>,
    pub timed_metadata_id3_period: Option<i32>,
    pub caption_language_setting: Option<String>,
    pub client_cache: Option<String>,
    pub audio_only_header: Option<String>,
    pub target_duration_compatibility_mode: Option<String>,
    pub ad_markers: Option<Vec<String>>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Output {
    pub name_modifier: Option<String>,
    pub extension: Option<String>,
    pub container_settings: ContainerSettings,
    pub output_settings: Option<OutputSettings>,
    pub video_description: Option<VideoDescription>,
    #[serde(default)]
    pub audio_descriptions: Vec<AudioDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ContainerSettings {
    pub container: String,
    pub m3u8_settings: Option<M3u8Settings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct M3u8Settings {
    pub audio_duration: Option<String>,
    pub audio_frames_per_pes: Option<i32>,
    pub audio_pids: Option<Vec<i32>>,
    pub nielsen_id3: Option<String>,
    pub pat_interval: Option<i32>,
    pub pcr_control: Option<String>,
    pub pcr_pid: Option<i32>,
    pub pmt_interval: Option<i32>,
    pub pmt_pid: Option<i32>,
    pub private_metadata_pid: Option<i32>,
    pub program_number: Option<i32>,
    pub scte35_pid: Option<i32>,
    pub scte35_source: Option<String>,
    pub timed_metadata: Option<String>,
    pub timed_metadata_pid: Option<i32>,
    pub transport_stream_id: Option<i32>,
    pub video_pid: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct OutputSettings {
    pub hls_settings: Option<HlsSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct HlsSettings {
    pub audio_group_id: Option<String>,
    pub audio_only_container: Option<String>,
    pub audio_rendition_sets: Option<String>,
    pub audio_track_type: Option<String>,
    pub descriptive_video_service_flag: Option<String>,
    pub i_frame_only_manifest: Option<String>,
    pub segment_modifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct VideoDescription {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub scaling_behavior: Option<String>,
    pub timecode_insertion: Option<String>,
    pub anti_alias: Option<String>,
    pub sharpness: Option<i32>,
    pub afd_signaling: Option<String>,
    pub drop_frame_timecode: Option<String>,
    pub respond_to_afd: Option<String>,
    pub color_metadata: Option<String>,
    pub codec_settings: VideoCodecSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct VideoCodecSettings {
    pub codec: String,
    pub h264_settings: Option<H264Settings>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct H264Settings {
    pub rate_control_mode: Option<String>,
    pub bitrate: Option<i32>,
    pub max_bitrate: Option<i32>,
    pub qvbr_settings: Option<QvbrSettings>,
    pub hrd_buffer_size: Option<i32>,
    pub hrd_buffer_initial_fill_percentage: Option<i32>,
    pub scene_change_detect: Option<String>,
    pub gop_size: Option<f64>,
    pub gop_size_units: Option<String>,
    pub gop_closed_cadence: Option<i32>,
    pub gop_b_reference: Option<String>,
    pub min_i_interval: Option<i32>,
    pub number_b_frames_between_reference_frames: Option<i32>,
    pub number_reference_frames: Option<i32>,
    pub dynamic_sub_gop: Option<String>,
    pub codec_profile: Option<String>,
    pub codec_level: Option<String>,
    pub entropy_encoding: Option<String>,
    pub field_encoding: Option<String>,
    pub interlace_mode: Option<String>,
    pub syntax: Option<String>,
    pub slices: Option<i32>,
    pub softness: Option<i32>,
    pub slow_pal: Option<String>,
    pub telecine: Option<String>,
    pub repeat_pps: Option<String>,
    pub unregistered_sei_timecode: Option<String>,
    pub quality_tuning_level: Option<String>,
    pub adaptive_quantization: Option<String>,
    pub spatial_adaptive_quantization: Option<String>,
    pub temporal_adaptive_quantization: Option<String>,
    pub flicker_adaptive_quantization: Option<String>,
    pub framerate_control: Option<String>,
    pub framerate_conversion_algorithm: Option<String>,
    pub framerate_numerator: Option<i32>,
    pub framerate_denominator: Option<i32>,
    pub par_control: Option<String>,
    pub par_numerator: Option<i32>,
    pub par_denominator: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct QvbrSettings {
    pub qvbr_quality_level: Option<i32>,
    pub qvbr_quality_level_fine_tune: Option<f64>,
    pub max_average_bitrate: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct AudioDescription {
    pub audio_source_name: Option<String>,
    pub audio_type: Option<i32>,
    pub audio_type_control: Option<String>,
    pub language_code_control: Option<String>,
    pub stream_name: Option<String>,
    pub codec_settings: AudioCodecSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct AudioCodecSettings {
    pub codec: String,
    pub aac_settings: Option<AacSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct AacSettings {
    pub audio_description_broadcaster_mix: Option<String>,
    pub bitrate: Option<i32>,
    pub codec_profile: Option<String>,
    pub coding_mode: Option<String>,
    pub rate_control_mode: Option<String>,
    pub raw_format: Option<String>,
    pub sample_rate: Option<i32>,
    pub specification: Option<String>,
}
