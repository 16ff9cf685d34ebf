pub mod batch;
pub mod engine;
pub mod formatter;

pub use crate::domain::model::{BatchResult, FormattedName, FormattedRecord, NamePart, NameRecord};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
