use aws_lambda_events::event::s3::S3Event;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::Serialize;

use crate::config::Config;
use crate::error::PipelineError;
use crate::fetcher::{basename, fetch_dataset};
use crate::publisher::publish;
use crate::transformer::transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct Response {
    #[serde(rename = "statusCode")]
    pub(crate) status_code: u16,
}

impl Response {
    fn from_upload(uploaded: bool) -> Self {
        let status_code = if uploaded { 200 } else { 500 };
        Self { status_code }
    }
}

/// Bucket and decoded key of the first record. S3 notifications URL-encode
/// keys with spaces as `+`.
fn source_location(event: &S3Event) -> Result<(String, String), PipelineError> {
    let record = event
        .records
        .first()
        .ok_or(PipelineError::MalformedEvent("no records"))?;
    let bucket = record
        .s3
        .bucket
        .name
        .clone()
        .ok_or(PipelineError::MalformedEvent("record has no bucket name"))?;
    let raw_key = record
        .s3
        .object
        .key
        .as_deref()
        .ok_or(PipelineError::MalformedEvent("record has no object key"))?;
    let plus_decoded = raw_key.replace('+', " ");
    let key = urlencoding::decode(&plus_decoded)
        .map(|key| key.into_owned())
        .unwrap_or(plus_decoded);
    Ok((bucket, key))
}

pub(crate) async fn function_handler(
    event: LambdaEvent<S3Event>,
    s3_client: &S3Client,
    config: &Config,
) -> Result<Response, Error> {
    let (bucket, key) = source_location(&event.payload)?;
    tracing::info!(bucket = %bucket, key = %key, "key of source: {}", key);

    let dataset = fetch_dataset(s3_client, &bucket, &key, &config.scratch_dir).await?;
    let transformed = transform(dataset)?;

    let output_key = basename(&key);
    let uploaded = publish(s3_client, &transformed, &config.output_bucket, output_key).await?;
    Ok(Response::from_upload(uploaded))
}
