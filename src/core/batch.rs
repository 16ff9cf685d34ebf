use crate::config::toml_config::{BatchConfig, InputFormat};
use crate::core::formatter::NameFormatter;
use crate::core::{BatchResult, FormattedRecord, NamePart, NameRecord, Pipeline, Storage};
use crate::utils::error::{NameError, Result};

const FIRST_NAME_COLUMN: &str = "first_name";
const LAST_NAME_COLUMN: &str = "last_name";

/// Reads name pairs from `source`, formats them, and writes the results to
/// `sink`.
pub struct BatchPipeline<S: Storage> {
    pub(crate) source: S,
    pub(crate) sink: S,
    pub(crate) config: BatchConfig,
    pub(crate) formatter: NameFormatter,
}

impl<S: Storage> BatchPipeline<S> {
    pub fn new(source: S, sink: S, config: BatchConfig) -> Result<Self> {
        let formatter = NameFormatter::with_max_length(config.max_length())?;
        Ok(Self {
            source,
            sink,
            config,
            formatter,
        })
    }

    fn parse_csv(&self, data: &[u8]) -> Result<Vec<NameRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(data);

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| NameError::InvalidInputError {
                    row: 0,
                    message: format!("missing '{}' column", name),
                })
        };
        let first_idx = column(FIRST_NAME_COLUMN)?;
        let last_idx = column(LAST_NAME_COLUMN)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            // CSV 欄位一律視為文字，避免 "007" 被轉成數字
            records.push(NameRecord::new(
                row.get(first_idx).unwrap_or(""),
                row.get(last_idx).unwrap_or(""),
            ));
        }

        Ok(records)
    }

    fn parse_json(&self, data: &[u8]) -> Result<Vec<NameRecord>> {
        let json_data: serde_json::Value = serde_json::from_slice(data)?;

        let items = match json_data {
            serde_json::Value::Array(items) => items,
            _ => {
                return Err(NameError::InvalidInputError {
                    row: 0,
                    message: "expected a JSON array of name objects".to_string(),
                })
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let serde_json::Value::Object(mut obj) = item else {
                return Err(NameError::InvalidInputError {
                    row: index + 1,
                    message: "expected an object".to_string(),
                });
            };

            let first = obj.remove(FIRST_NAME_COLUMN).map(NamePart::from).unwrap_or_default();
            let last = obj.remove(LAST_NAME_COLUMN).map(NamePart::from).unwrap_or_default();
            records.push(NameRecord::new(first, last));
        }

        Ok(records)
    }

    fn render_csv(&self, result: &BatchResult) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in &result.records {
            writer.serialize(record)?;
        }
        writer.into_inner().map_err(|e| NameError::IoError(e.into_error()))
    }
}

impl<S: Storage> Pipeline for BatchPipeline<S> {
    fn extract(&self) -> Result<Vec<NameRecord>> {
        let path = self.config.input_path();
        let format = self.config.input_format();
        tracing::debug!("Reading names from {} ({:?})", path, format);

        let data = self.source.read_file(path)?;
        let records = match format {
            InputFormat::Csv => self.parse_csv(&data)?,
            InputFormat::Json => self.parse_json(&data)?,
        };

        tracing::debug!("Parsed {} name records", records.len());
        Ok(records)
    }

    fn transform(&self, records: Vec<NameRecord>) -> Result<BatchResult> {
        let mut result = BatchResult::default();

        for (index, record) in records.into_iter().enumerate() {
            let first_name = record.first_name.to_text();
            let last_name = record.last_name.to_text();

            if self.config.skip_blank() && first_name.trim().is_empty() && last_name.trim().is_empty() {
                tracing::warn!("Skipping blank row {}", index + 1);
                continue;
            }

            let full = self.formatter.normalize(first_name.as_str(), last_name.as_str());
            let formatted = self.formatter.format(first_name.as_str(), last_name.as_str());
            if formatted.len_chars() < full.chars().count() {
                result.truncated += 1;
            }

            tracing::debug!("Row {}: '{}' -> '{}'", index + 1, full, formatted);
            result.records.push(FormattedRecord {
                first_name,
                last_name,
                formatted,
            });
        }

        Ok(result)
    }

    fn load(&self, result: BatchResult) -> Result<Vec<String>> {
        let mut written = Vec::new();

        if self.config.wants_format("csv") {
            let filename = self.config.csv_filename();
            let data = self.render_csv(&result)?;
            self.sink.write_file(filename, &data)?;
            written.push(format!("{}/{}", self.config.output_path(), filename));
        }

        if self.config.wants_format("json") {
            let filename = self.config.json_filename();
            let data = serde_json::to_string_pretty(&result.records)?;
            self.sink.write_file(filename, data.as_bytes())?;
            written.push(format!("{}/{}", self.config.output_path(), filename));
        }

        tracing::debug!("Wrote {} output files", written.len());
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .borrow_mut()
                .insert(path.to_string(), data.as_bytes().to_vec());
            storage
        }

        fn get_file(&self, path: &str) -> Option<String> {
            self.files
                .borrow()
                .get(path)
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                NameError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn config(input_path: &str, extra: &str) -> BatchConfig {
        let toml_content = format!(
            r#"
[batch]
name = "unit"

[input]
path = "{}"
{}

[output]
path = "out"
formats = ["csv", "json"]
"#,
            input_path, extra
        );
        BatchConfig::from_toml_str(&toml_content).unwrap()
    }

    #[test]
    fn test_extract_csv_keeps_raw_text() {
        let source = MockStorage::with_file(
            "names.csv",
            "last_name,first_name\n doe ,john\nbond,007\n",
        );
        let pipeline = BatchPipeline::new(source, MockStorage::default(), config("names.csv", "")).unwrap();

        let records = pipeline.extract().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], NameRecord::new("john", " doe "));
        assert_eq!(records[1].first_name.to_text(), "007");
    }

    #[test]
    fn test_extract_csv_without_name_columns_fails() {
        let source = MockStorage::with_file("names.csv", "name,surname\njohn,doe\n");
        let pipeline = BatchPipeline::new(source, MockStorage::default(), config("names.csv", "")).unwrap();

        match pipeline.extract() {
            Err(NameError::InvalidInputError { row, message }) => {
                assert_eq!(row, 0);
                assert!(message.contains("first_name"));
            }
            other => panic!("expected InvalidInputError, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_json_coerces_scalars() {
        let source = MockStorage::with_file(
            "names.json",
            r#"[{"first_name": 123, "last_name": "doe"}, {"first_name": true}, {"last_name": 2.0}]"#,
        );
        let pipeline = BatchPipeline::new(source, MockStorage::default(), config("names.json", "")).unwrap();

        let records = pipeline.extract().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].first_name, NamePart::Integer(123));
        assert_eq!(records[1].first_name, NamePart::Bool(true));
        assert_eq!(records[1].last_name.to_text(), "");
        assert_eq!(records[2].last_name.to_text(), "2.0");
    }

    #[test]
    fn test_extract_json_rejects_non_objects() {
        let source = MockStorage::with_file("names.json", r#"[{"first_name": "a"}, "b"]"#);
        let pipeline = BatchPipeline::new(source, MockStorage::default(), config("names.json", "")).unwrap();

        assert!(matches!(
            pipeline.extract(),
            Err(NameError::InvalidInputError { row: 2, .. })
        ));
    }

    #[test]
    fn test_transform_formats_and_counts_truncations() {
        let pipeline = BatchPipeline::new(
            MockStorage::default(),
            MockStorage::default(),
            config("names.csv", ""),
        )
        .unwrap();

        let records = vec![
            NameRecord::new("john", "doe"),
            NameRecord::new("  ", ""),
            NameRecord::new("christopher", "schwarzenegger"),
            NameRecord::new(123, "doe"),
        ];

        let result = pipeline.transform(records).unwrap();
        let formatted: Vec<&str> = result.records.iter().map(|r| r.formatted.as_str()).collect();
        assert_eq!(formatted, vec!["John Doe", "Christopher Sch", "123 Doe"]);
        assert_eq!(result.truncated, 1);
        assert_eq!(result.records[2].first_name, "123");
    }

    #[test]
    fn test_transform_keeps_blank_rows_when_configured() {
        let pipeline = BatchPipeline::new(
            MockStorage::default(),
            MockStorage::default(),
            config("names.csv", "skip_blank = false"),
        )
        .unwrap();

        let result = pipeline
            .transform(vec![NameRecord::new("", ""), NameRecord::new("eva", "")])
            .unwrap();
        assert_eq!(result.records.len(), 2);
        assert!(result.records[0].formatted.is_empty());
        assert_eq!(result.records[1].formatted, "Eva");
    }

    #[test]
    fn test_load_writes_csv_and_json() {
        let pipeline = BatchPipeline::new(
            MockStorage::default(),
            MockStorage::default(),
            config("names.csv", ""),
        )
        .unwrap();

        let result = pipeline
            .transform(vec![NameRecord::new("anne-marie", "o'neill")])
            .unwrap();
        let written = pipeline.load(result).unwrap();

        assert_eq!(
            written,
            vec!["out/formatted_names.csv".to_string(), "out/formatted_names.json".to_string()]
        );

        let csv_output = pipeline.sink.get_file("formatted_names.csv").unwrap();
        assert_eq!(
            csv_output,
            "first_name,last_name,formatted\nanne-marie,o'neill,Anne-Marie O'Ne\n"
        );

        let json_output = pipeline.sink.get_file("formatted_names.json").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
        assert_eq!(parsed[0]["formatted"], "Anne-Marie O'Ne");
    }
}
