use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
};
use tower_http::cors::{Any, CorsLayer};

/// Address used when the router is served outside of Lambda.
pub const LOCAL_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3030);

/// CORS policy for browser callers: any origin may POST JSON.
///
/// Responses always carry `Access-Control-Allow-Origin: *`.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

/// Runs an Axum router in either local development mode or Lambda runtime mode.
///
/// In debug builds (`#[cfg(debug_assertions)]`), the router is served on
/// [`LOCAL_ADDR`] using a standard Axum server.
///
/// In release builds, the router is wrapped with the Lambda runtime adapter
/// (API Gateway stage prefix trimmed) and executed as a Lambda function.
///
/// # Errors
///
/// Returns an error if:
/// - The local server fails to bind to the port (debug mode)
/// - The Lambda runtime fails to start or exits with an error (release mode)
pub async fn run_app(app: Router) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(debug_assertions)]
    {
        let addr = std::net::SocketAddr::from(LOCAL_ADDR);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Starting local development server on http://{}", addr);
        axum::serve(listener, app).await?;
    }

    #[cfg(not(debug_assertions))]
    {
        use lambda_http::tower;

        let app = tower::ServiceBuilder::new()
            .layer(axum_aws_lambda::LambdaLayer::default().trim_stage())
            .service(app);

        lambda_http::run(app).await?;
    }

    Ok(())
}
