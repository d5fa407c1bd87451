use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::PipelineError;

/// A CSV table held in memory: a header row and the data rows aligned with it.
///
/// Values stay as the text read from the file. Column operations check every
/// name they are given before touching anything, so a failed call leaves the
/// dataset unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub(crate) fn from_path(path: &Path) -> Result<Self, PipelineError> {
        Self::from_reader(File::open(path)?)
    }

    /// Short rows are padded with empty values; rows longer than the header
    /// are rejected.
    pub(crate) fn from_reader<R: Read>(reader: R) -> Result<Self, PipelineError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(PipelineError::RowLength {
                    row: index + 1,
                    expected: headers.len(),
                    actual: record.len(),
                });
            }
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }
        Ok(Self { headers, rows })
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn headers(&self) -> &[String] {
        &self.headers
    }

    fn column(&self, name: &str) -> Result<usize, PipelineError> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    }

    pub(crate) fn values<'a>(
        &'a self,
        name: &str,
    ) -> Result<impl Iterator<Item = &'a str> + 'a, PipelineError> {
        let index = self.column(name)?;
        Ok(self.rows.iter().map(move |row| row[index].as_str()))
    }

    pub(crate) fn drop_columns(&mut self, names: &[&str]) -> Result<(), PipelineError> {
        let mut indices = names
            .iter()
            .map(|name| self.column(name))
            .collect::<Result<Vec<usize>, PipelineError>>()?;
        indices.sort_unstable();
        indices.dedup();
        for index in indices.into_iter().rev() {
            self.headers.remove(index);
            for row in &mut self.rows {
                row.remove(index);
            }
        }
        Ok(())
    }

    pub(crate) fn rename_columns(&mut self, renames: &[(&str, &str)]) -> Result<(), PipelineError> {
        let indices = renames
            .iter()
            .map(|(from, _)| self.column(from))
            .collect::<Result<Vec<usize>, PipelineError>>()?;
        for (index, (_, to)) in indices.into_iter().zip(renames) {
            self.headers[index] = to.to_string();
        }
        Ok(())
    }

    pub(crate) fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<(), PipelineError> {
        let index = self.column(name)?;
        self.check_length(name, values.len())?;
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[index] = value;
        }
        Ok(())
    }

    pub(crate) fn push_column(&mut self, name: &str, values: Vec<String>) -> Result<(), PipelineError> {
        self.check_length(name, values.len())?;
        self.headers.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    fn check_length(&self, name: &str, actual: usize) -> Result<(), PipelineError> {
        if actual != self.rows.len() {
            return Err(PipelineError::ColumnLength {
                column: name.to_string(),
                expected: self.rows.len(),
                actual,
            });
        }
        Ok(())
    }

    pub(crate) fn to_csv_bytes(&self) -> Result<Vec<u8>, PipelineError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|err| PipelineError::Serialize(err.to_string()))
    }
}
