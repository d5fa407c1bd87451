use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::tracing;

use crate::dataset::Dataset;
use crate::error::PipelineError;

/// Uploads the dataset as CSV to `s3://bucket/key`.
///
/// Returns `Ok(false)` when the upload itself fails; the error is logged and
/// not propagated. Only a serialization failure comes back as `Err`.
pub(crate) async fn publish(
    s3_client: &S3Client,
    dataset: &Dataset,
    bucket: &str,
    key: &str,
) -> Result<bool, PipelineError> {
    let body = dataset.to_csv_bytes()?;

    tracing::info!(bucket, key, "Saving transformed data to S3 bucket: {}, key: {}", bucket, key);
    let result = s3_client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type("text/csv")
        .body(ByteStream::from(body))
        .send()
        .await;

    match result {
        Ok(_) => {
            tracing::info!(
                bucket,
                key,
                "Transformed data successfully saved to S3 bucket: {}, key: {}",
                bucket,
                key
            );
            Ok(true)
        }
        Err(err) => {
            tracing::error!(
                bucket,
                key,
                error = %aws_sdk_s3::error::DisplayErrorContext(&err),
                "Failed to save transformed data to S3"
            );
            Ok(false)
        }
    }
}
