use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};
use types::{ConversionRequest, ConversionResponse, ErrorResponse};

use crate::{
    AppContext,
    job_template::build_job_specification,
    mediaconvert::JobSubmitter,
    output::{compute_result_urls, derive_output_location},
    request::{ValidationError, validate},
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Submit an HLS conversion job and answer with the URLs it will produce.
pub async fn convert_video<S: JobSubmitter>(
    State(ctx): State<Arc<AppContext<S>>>,
    body: Bytes,
) -> Result<Json<ConversionResponse>, ApiError> {
    info!("Request body: {}", String::from_utf8_lossy(&body));

    // an unreadable body carries none of the required fields
    let request: ConversionRequest =
        serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to parse request body: {}", e);
            ValidationError::MissingFields(Vec::new())
        })?;

    let request = validate(request).inspect_err(|e| {
        warn!("Rejected conversion request: {}", e.reason());
    })?;

    let template = ctx.template.as_ref().map_err(|e| {
        error!("Job template is unavailable: {}", e);
        ApiError::Internal
    })?;

    let location = derive_output_location(
        &request.unique_id,
        request.source_file_name(),
        (ctx.clock)(),
    );

    let job = build_job_specification(
        template,
        &request.video_source_url,
        &location.s3_uri(&request.destination_bucket),
    )
    .with_asset_id(&request.unique_id);

    let handle = ctx.submitter.submit(&job).await.map_err(|e| {
        error!(
            "Failed to submit conversion job for asset {}: {}",
            request.unique_id, e
        );
        ApiError::Internal
    })?;

    info!(
        "Submitted job {} ({}) for asset {}: {} -> {}",
        handle.id,
        handle.arn.as_deref().unwrap_or("no arn"),
        request.unique_id,
        job.input_uri(),
        job.output_prefix()
    );

    Ok(Json(
        compute_result_urls(
            &location,
            &request.destination_bucket,
            &request.destination_bucket_region,
        )
        .into(),
    ))
}
