use crate::core::Pipeline;
use crate::utils::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub read: usize,
    pub formatted: usize,
    pub skipped: usize,
    pub truncated: usize,
    pub outputs: Vec<String>,
}

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<BatchSummary> {
        tracing::info!("Starting name batch...");

        // Extract
        let records = self.pipeline.extract()?;
        let read = records.len();
        tracing::info!("Read {} name records", read);

        // Transform
        let result = self.pipeline.transform(records)?;
        let formatted = result.records.len();
        let truncated = result.truncated;
        tracing::info!("Formatted {} names ({} truncated)", formatted, truncated);

        // Load
        let outputs = self.pipeline.load(result)?;
        for output in &outputs {
            tracing::info!("Output saved to: {}", output);
        }

        Ok(BatchSummary {
            read,
            formatted,
            skipped: read.saturating_sub(formatted),
            truncated,
            outputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BatchResult, NameRecord};
    use crate::core::formatter::format_name;
    use crate::domain::model::FormattedRecord;
    use crate::utils::error::NameError;

    struct StaticPipeline {
        records: Vec<NameRecord>,
        fail_load: bool,
    }

    impl Pipeline for StaticPipeline {
        fn extract(&self) -> Result<Vec<NameRecord>> {
            Ok(self.records.clone())
        }

        fn transform(&self, records: Vec<NameRecord>) -> Result<BatchResult> {
            let records = records
                .into_iter()
                .filter(|r| !r.first_name.to_text().is_empty())
                .map(|r| FormattedRecord {
                    first_name: r.first_name.to_text(),
                    last_name: r.last_name.to_text(),
                    formatted: format_name(r.first_name, r.last_name),
                })
                .collect();
            Ok(BatchResult { records, truncated: 0 })
        }

        fn load(&self, result: BatchResult) -> Result<Vec<String>> {
            if self.fail_load {
                return Err(NameError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            Ok(vec![format!("memory/{}", result.records.len())])
        }
    }

    #[test]
    fn test_run_reports_summary() {
        let engine = BatchEngine::new(StaticPipeline {
            records: vec![
                NameRecord::new("miky", "novak"),
                NameRecord::new("", "ghost"),
                NameRecord::new("jana", "svobodova"),
            ],
            fail_load: false,
        });

        let summary = engine.run().unwrap();
        assert_eq!(summary.read, 3);
        assert_eq!(summary.formatted, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.outputs, vec!["memory/2".to_string()]);
    }

    #[test]
    fn test_run_propagates_load_errors() {
        let engine = BatchEngine::new(StaticPipeline {
            records: vec![NameRecord::new("eva", "")],
            fail_load: true,
        });

        assert!(matches!(engine.run(), Err(NameError::IoError(_))));
    }
}
