use crate::domain::model::{BatchResult, NameRecord};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<NameRecord>>;
    fn transform(&self, records: Vec<NameRecord>) -> Result<BatchResult>;
    fn load(&self, result: BatchResult) -> Result<Vec<String>>;
}
