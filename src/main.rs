use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{run, service_fn, tracing, Error};
mod config;
mod dataset;
mod error;
mod event_handler;
mod fetcher;
mod publisher;
mod transformer;
use config::Config;
use event_handler::function_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let env_filter = tracing::subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing::subscriber::EnvFilter::new("info"));
    tracing::subscriber::fmt()
        .json()
        .with_env_filter(env_filter)
        .init();
    let config = Config::from_env();
    tracing::info!(
        output_bucket = %config.output_bucket,
        scratch_dir = %config.scratch_dir.display(),
        "Loaded configuration"
    );
    let shared_config = aws_config::load_defaults(BehaviorVersion::v2025_01_17()).await;
    let s3_client = S3Client::new(&shared_config);
    run(service_fn(|event| function_handler(event, &s3_client, &config))).await
}
