use aws_config::{BehaviorVersion, meta::region::RegionProviderChain};
use figment::{Figment, providers::Env};
use serde::de::DeserializeOwned;

/// Errors raised while bootstrapping a function.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),
    #[error("failed to initialize application context: {0}")]
    Context(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

pub trait ContextProvider<Config>: Sized {
    fn new(
        config: Config,
        aws_config: aws_config::SdkConfig,
    ) -> impl Future<Output = Result<Self, AppError>>;
}

/// Install the JSON tracing subscriber used by every function.
///
/// See <https://docs.aws.amazon.com/lambda/latest/dg/rust-logging.html>.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .json()
        // allow log level to be overridden by RUST_LOG env var
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        // this needs to be set to remove duplicated information in the log.
        .with_current_span(false)
        // ANSI color codes show up as garbage in CloudWatch logs.
        .with_ansi(false)
        // CloudWatch adds the ingestion time.
        .without_time()
        .with_target(false)
        .init();
}

/// The configuration sources shared by every function: the raw process
/// environment, with keys lower-cased.
#[must_use]
pub fn config_figment() -> Figment {
    Figment::new().merge(Env::raw())
}

/// Initialize the application context with configuration from environment variables.
/// The configuration is extracted using figment.
/// The AWS configuration is loaded using the default provider chain, falling
/// back to `us-east-1` when no region is configured.
///
/// # Errors
/// If the configuration cannot be extracted from the environment variables
/// or if the context provider fails to build its clients.
pub async fn create_app_context<A, Config>() -> Result<A, AppError>
where
    A: ContextProvider<Config>,
    Config: DeserializeOwned,
{
    init_tracing();

    let config: Config = config_figment().extract()?;

    let region_provider =
        RegionProviderChain::default_provider().or_else("us-east-1");
    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;

    let context = A::new(config, aws_config).await.inspect_err(|e| {
        tracing::error!("failed to create app context: {}", e);
    })?;

    Ok(context)
}
