use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStreamError;
use thiserror::Error;

/// Failures that abort an invocation. Upload errors are not listed here: the
/// publisher reports them as a `false` result instead.
#[derive(Debug, Error)]
pub(crate) enum PipelineError {
    #[error("malformed S3 event: {0}")]
    MalformedEvent(&'static str),

    #[error("failed to download s3://{bucket}/{key}: {source}")]
    Download {
        bucket: String,
        key: String,
        #[source]
        source: SdkError<GetObjectError>,
    },

    #[error("failed to read object body: {0}")]
    Body(#[from] ByteStreamError),

    #[error("scratch file error: {0}")]
    Scratch(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("row {row}: datetime value {value:?} does not match {format:?}")]
    InvalidDatetime {
        row: usize,
        value: String,
        format: &'static str,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("row {row} has {actual} fields but the header has {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("column {column} has {actual} values but the dataset has {expected} rows")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("failed to serialize CSV: {0}")]
    Serialize(String),
}
