/**
 * This is the main entrypoint for the `convert_video_lambda` function.
 *
 * The function accepts a POST request naming a source video in S3 and a
 * destination bucket, submits an HLS conversion job to AWS Elemental
 * MediaConvert from a fixed job template, and answers with the URLs the job
 * will write to. It does not wait for the job to finish.
 */
use axum::{Router, routing::post};
use chrono::{DateTime, Utc};
use ht_app::AppError;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod config;
mod handlers;
mod job_settings;
mod job_template;
mod mediaconvert;
mod output;
mod request;

use config::Config;
use job_template::{JobTemplate, TemplateError, TemplateSource};
use mediaconvert::{EndpointSelection, JobSubmitter, MediaConvertSubmitter};

/// State shared by every invocation handled by this process.
///
/// A template that failed to load is kept as its error so every request
/// is answered with an internal error instead of the process failing to
/// start.
struct AppContext<S> {
    template: Result<JobTemplate, TemplateError>,
    submitter: S,
    clock: fn() -> DateTime<Utc>,
}

impl ht_app::ContextProvider<Config> for AppContext<MediaConvertSubmitter> {
    async fn new(
        config: Config,
        aws_config: aws_config::SdkConfig,
    ) -> Result<Self, AppError> {
        let source = TemplateSource::from_path(config.job_template_path);
        tracing::info!("Loading job template from {:?}", source);
        let template = source.load().await;
        match &template {
            Ok(template) => tracing::info!(
                "Loaded job template with {} output groups",
                template.settings().output_groups.len()
            ),
            Err(e) => tracing::error!("Failed to load job template: {}", e),
        }

        let submitter = MediaConvertSubmitter::from_sdk_config(
            &aws_config,
            config.media_convert_role,
            EndpointSelection::new(
                config.media_convert_endpoint,
                config.discover_media_convert_endpoint,
            ),
        );

        Ok(Self {
            template,
            submitter,
            clock: Utc::now,
        })
    }
}

fn router<S: JobSubmitter>(context: AppContext<S>) -> Router {
    Router::new()
        .route("/", post(handlers::convert_video::<S>))
        .route("/convert", post(handlers::convert_video::<S>))
        .layer(ht_axum::cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(context))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let context = ht_app::create_app_context::<
        AppContext<MediaConvertSubmitter>,
        Config,
    >()
    .await?;

    ht_axum::run_app(router(context)).await
}
