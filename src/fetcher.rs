use std::path::Path;

use aws_sdk_s3::Client as S3Client;
use lambda_runtime::tracing;

use crate::dataset::Dataset;
use crate::error::PipelineError;

/// Filename portion of an object key.
pub(crate) fn basename(key: &str) -> &str {
    key.rsplit_once('/').map_or(key, |(_, name)| name)
}

/// Downloads `s3://bucket/key` into `scratch_dir` and parses it as CSV.
pub(crate) async fn fetch_dataset(
    s3_client: &S3Client,
    bucket: &str,
    key: &str,
    scratch_dir: &Path,
) -> Result<Dataset, PipelineError> {
    let local_path = scratch_dir.join(basename(key));
    let object = s3_client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|source| PipelineError::Download {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source,
        })?;
    let body = object.body.collect().await?.into_bytes();
    tokio::fs::write(&local_path, &body).await?;

    tracing::info!(bucket, key, "Reading data from S3 bucket: {}, key: {}", bucket, key);
    let dataset = Dataset::from_path(&local_path)?;
    tracing::info!(
        records = dataset.len(),
        "Data loaded successfully with {} records",
        dataset.len()
    );
    Ok(dataset)
}
