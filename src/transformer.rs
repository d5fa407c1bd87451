use chrono::NaiveDateTime;
use lambda_runtime::tracing;

use crate::dataset::Dataset;
use crate::error::PipelineError;

const DROPPED_COLUMNS: [&str; 3] = ["trans_num", "lat", "long"];

const RENAMED_COLUMNS: [(&str, &str); 4] = [
    ("trans_date_trans_time", "datetime"),
    ("amt", "transaction_amount"),
    ("dob", "birth_date"),
    ("city_pop", "city_population"),
];

/// Format of `trans_date_trans_time` in the source files, e.g. `01-03-2023 14:05`.
const SOURCE_DATETIME_FORMAT: &str = "%d-%m-%Y %H:%M";
/// How a parsed timestamp is written back out.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%d/%m/%Y";
const TIME_24H_FORMAT: &str = "%H:%M";

fn parse_datetime(row: usize, value: &str) -> Result<NaiveDateTime, PipelineError> {
    let invalid = |source| PipelineError::InvalidDatetime {
        row,
        value: value.to_string(),
        format: SOURCE_DATETIME_FORMAT,
        source,
    };
    // chrono skips leading whitespace; the format does not allow it.
    if value != value.trim_start() {
        return Err(invalid(None));
    }
    NaiveDateTime::parse_from_str(value, SOURCE_DATETIME_FORMAT).map_err(|err| invalid(Some(err)))
}

fn format_all(timestamps: &[NaiveDateTime], format: &str) -> Vec<String> {
    timestamps
        .iter()
        .map(|ts| ts.format(format).to_string())
        .collect()
}

/// Reshapes a transactions table for serving: drops the columns nobody reads,
/// gives the rest friendlier names, and splits the transaction timestamp into
/// `date` and `time_24h` columns appended at the end.
///
/// Fails on the first missing column or unparseable timestamp. Rows are never
/// added or removed.
pub(crate) fn transform(mut dataset: Dataset) -> Result<Dataset, PipelineError> {
    dataset.drop_columns(&DROPPED_COLUMNS)?;
    dataset.rename_columns(&RENAMED_COLUMNS)?;

    let timestamps = dataset
        .values("datetime")?
        .enumerate()
        .map(|(index, value)| parse_datetime(index + 1, value))
        .collect::<Result<Vec<NaiveDateTime>, PipelineError>>()?;

    dataset.set_column("datetime", format_all(&timestamps, TIMESTAMP_FORMAT))?;
    dataset.push_column("date", format_all(&timestamps, DATE_FORMAT))?;
    dataset.push_column("time_24h", format_all(&timestamps, TIME_24H_FORMAT))?;

    tracing::info!(
        records = dataset.len(),
        columns = dataset.headers().len(),
        "Data transformed successfully with {} records",
        dataset.len()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "\
trans_date_trans_time,merchant,category,amt,city,state,lat,long,city_pop,job,dob,trans_num,is_fraud
01-03-2023 14:05,fraud_Kirlin and Sons,personal_care,2.86,Columbia,SC,33.9659,-80.9355,333497,Mechanical engineer,19-03-1968,2da90c7d74bd46a0caf3777415b3ebd3,0
21-06-2020 00:14,\"fraud_Sporer-Keebler, Inc\",personal_care,29.84,Altonah,UT,40.3207,-110.436,302,\"Sales professional, IT\",17-01-1990,324cc204407e99f51b0d6ca0055005e7,1
";

    fn input() -> Dataset {
        Dataset::from_reader(INPUT.as_bytes()).unwrap()
    }

    fn value<'a>(dataset: &'a Dataset, row: usize, column: &str) -> &'a str {
        dataset.values(column).unwrap().nth(row).unwrap()
    }

    #[test]
    fn test_drops_and_renames_columns() {
        let output = transform(input()).unwrap();
        for dropped in ["trans_num", "lat", "long"] {
            assert!(!output.headers().iter().any(|h| h == dropped), "{dropped} still present");
        }
        for old in ["trans_date_trans_time", "amt", "dob", "city_pop"] {
            assert!(!output.headers().iter().any(|h| h == old), "{old} not renamed");
        }
        assert_eq!(
            output.headers(),
            [
                "datetime",
                "merchant",
                "category",
                "transaction_amount",
                "city",
                "state",
                "city_population",
                "job",
                "birth_date",
                "is_fraud",
                "date",
                "time_24h",
            ]
        );
    }

    #[test]
    fn test_splits_datetime_into_date_and_time() {
        let output = transform(input()).unwrap();
        assert_eq!(value(&output, 0, "date"), "01/03/2023");
        assert_eq!(value(&output, 0, "time_24h"), "14:05");
        assert_eq!(value(&output, 0, "datetime"), "2023-03-01 14:05:00");
        assert_eq!(value(&output, 1, "date"), "21/06/2020");
        assert_eq!(value(&output, 1, "time_24h"), "00:14");
    }

    #[test]
    fn test_preserves_row_count_and_passthrough_values() {
        let output = transform(input()).unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(value(&output, 1, "merchant"), "fraud_Sporer-Keebler, Inc");
        assert_eq!(value(&output, 1, "transaction_amount"), "29.84");
        assert_eq!(value(&output, 0, "birth_date"), "19-03-1968");
        assert_eq!(value(&output, 0, "city_population"), "333497");
    }

    #[test]
    fn test_header_only_input() {
        let dataset = Dataset::from_reader(INPUT.lines().next().unwrap().as_bytes()).unwrap();
        let output = transform(dataset).unwrap();
        assert_eq!(output.len(), 0);
        assert_eq!(output.headers().last().unwrap(), "time_24h");
    }

    #[test]
    fn test_malformed_datetime_fails() {
        for bad in [
            "2023-03-01 14:05",
            "01-03-2023",
            "",
            "32-01-2023 10:00",
            "01-03-2023 2:05 PM",
            " 01-03-2023 14:05",
        ] {
            let csv = format!(
                "trans_date_trans_time,amt,dob,city_pop,lat,long,trans_num\n\
                 01-03-2023 14:05,1.0,01-01-1990,10,1,2,a\n\
                 \"{bad}\",1.0,01-01-1990,10,1,2,b\n"
            );
            let err = transform(Dataset::from_reader(csv.as_bytes()).unwrap()).unwrap_err();
            match err {
                PipelineError::InvalidDatetime { row, value, .. } => {
                    assert_eq!(row, 2);
                    assert_eq!(value, bad);
                }
                other => panic!("unexpected error for {bad:?}: {other}"),
            }
        }
    }

    #[test]
    fn test_short_row_keeps_empty_trailing_values() {
        let csv = "trans_date_trans_time,amt,dob,city_pop,lat,long,trans_num,extra\n\
                   01-03-2023 14:05,1.0,01-01-1990,10,1,2,a,x\n\
                   02-03-2023 09:30,2.0,01-01-1990,10,1,2\n";
        let output = transform(Dataset::from_reader(csv.as_bytes()).unwrap()).unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(value(&output, 0, "extra"), "x");
        assert_eq!(value(&output, 1, "extra"), "");
        assert_eq!(value(&output, 1, "date"), "02/03/2023");
        assert_eq!(value(&output, 1, "time_24h"), "09:30");
    }

    #[test]
    fn test_missing_column_fails() {
        let csv = "trans_date_trans_time,amt,dob,lat,long,trans_num\n01-03-2023 14:05,1.0,01-01-1990,1,2,a\n";
        let err = transform(Dataset::from_reader(csv.as_bytes()).unwrap()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn(ref name) if name == "city_pop"));
    }
}
